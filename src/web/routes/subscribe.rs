use axum::{extract::State, Json};

use crate::{
    web::{
        data::{SubscribeRequest, SubscribeResponse, ValidEmail},
        Error, WebResult,
    },
    AppState,
};

/// Forwards a subscription request to the provider and translates the
/// normalized outcome into the public contract: successful outcomes (including
/// the 409 already-subscribed case) answer 200, failed ones answer 400 with
/// the failure message.
#[tracing::instrument(
    name = "Subscribing an email to the newsletter",
    skip(app_state, request),
    fields(
        subscriber_email = %request.email,
        source = %request.source
    )
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    Json(request): Json<SubscribeRequest>,
) -> WebResult<Json<SubscribeResponse>> {
    let beehiiv_client = app_state.beehiiv_client()?;
    let email = ValidEmail::parse(&request.email)?;

    let outcome = beehiiv_client
        .subscribe(
            &email,
            request.first_name.as_deref(),
            request.last_name.as_deref(),
            &request.source,
        )
        .await;

    if !outcome.success {
        return Err(Error::SubscribeRejected(outcome.message));
    }

    Ok(Json(outcome.into()))
}
