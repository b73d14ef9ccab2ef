use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("provider credentials are not configured")]
    ProviderNotConfigured,
    #[error("subscription rejected: {0}")]
    SubscribeRejected(String),
    #[error("provider error: status {status}")]
    Provider { status: u16, body: String },

    #[error("data parsing error: {0}")]
    DataParsing(#[from] super::data::DataParsingError),

    #[error("beehiiv client error: {0}")]
    BeehiivClient(#[from] crate::beehiiv_client::Error),

    #[error("error awaiting a tokio task: {0}")]
    TokioJoin(#[from] tokio::task::JoinError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            // Validation failures are 422-class, like the rejections axum's
            // `Json` extractor produces for malformed bodies.
            Error::DataParsing(data_er) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                InvalidInput(data_er.to_string()),
            ),
            Error::SubscribeRejected(msg) => (StatusCode::BAD_REQUEST, SubscribeFail(msg.clone())),
            // The provider's status code and body text propagate verbatim.
            Error::Provider { status, body } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                ProviderFail(body.clone()),
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Received invalid input: {_0}")]
    InvalidInput(String),
    #[display("{_0}")]
    SubscribeFail(String),
    #[display("{_0}")]
    ProviderFail(String),
    #[display("Service Error!")]
    ServiceError,
}
