use axum::{extract::State, Json};
use serde_json::Value;

use crate::{
    beehiiv_client,
    web::{Error, WebResult},
    AppState,
};

/// Passes the provider's publication record through unchanged. Provider errors
/// keep their original status code and body text; transport errors become a
/// generic service error.
#[tracing::instrument(name = "Fetching publication info", skip(app_state))]
pub async fn publication_info(State(app_state): State<AppState>) -> WebResult<Json<Value>> {
    let beehiiv_client = app_state.beehiiv_client()?;

    let info = beehiiv_client
        .publication_info()
        .await
        .map_err(|er| match er {
            beehiiv_client::Error::Provider { status, body } => Error::Provider { status, body },
            er => Error::BeehiivClient(er),
        })?;

    Ok(Json(info))
}
