use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::web::data::ValidEmail;

/// The normalized result of a subscription attempt, decoupled from the
/// provider's status codes. The adapter always produces one of these for
/// `subscribe`; provider rejections and transport failures never escape as
/// errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubscriptionOutcome {
    pub success: bool,
    pub message: String,
    pub subscriber_id: Option<String>,
}

impl SubscriptionOutcome {
    fn failure(message: String) -> Self {
        SubscriptionOutcome {
            success: false,
            message,
            subscriber_id: None,
        }
    }
}

#[derive(Debug)]
pub struct BeehiivClient {
    pub http_client: Client,
    base_url: String,
    publication_id: String,
    api_key: SecretString,
}

impl BeehiivClient {
    /// Fails when either credential is empty, or when the base url doesn't
    /// parse. This is the once-per-process configuration check: a constructed
    /// client is always usable.
    pub fn new<S: AsRef<str>>(
        base_url: S,
        api_key: SecretString,
        publication_id: impl Into<String>,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let publication_id = publication_id.into();
        if api_key.expose_secret().trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        if publication_id.trim().is_empty() {
            return Err(Error::MissingPublicationId);
        }

        let base_url = base_url.as_ref().trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(BeehiivClient {
            http_client,
            base_url,
            publication_id,
            api_key,
        })
    }

    /// Subscribes an email to the publication with a single POST to the
    /// provider, classifying the response:
    ///
    /// - 201: subscribed, `subscriber_id` taken from the response `id` field
    /// - 409: already subscribed, still a success
    /// - anything else: failure carrying the raw provider body
    ///
    /// Transport errors are absorbed into a failure outcome as well.
    pub async fn subscribe(
        &self,
        email: &ValidEmail,
        first_name: Option<&str>,
        last_name: Option<&str>,
        source: &str,
    ) -> SubscriptionOutcome {
        let url = format!(
            "{}/publications/{}/subscriptions",
            self.base_url, self.publication_id
        );

        let body = SubscriptionBody {
            email: email.as_ref(),
            reactivate_existing: true,
            send_welcome_email: true,
            utm_source: source,
            // Empty names are treated the same as absent ones: the keys are
            // left out of the payload entirely.
            first_name: first_name.filter(|n| !n.trim().is_empty()),
            last_name: last_name.filter(|n| !n.trim().is_empty()),
        };

        let res = match self
            .http_client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
        {
            Ok(res) => res,
            Err(er) => {
                error!("{:<20} - Network error: {er}", "subscribe");
                return SubscriptionOutcome::failure(format!("Network error: {er}"));
            }
        };

        match res.status().as_u16() {
            201 => match res.json::<Value>().await {
                Ok(data) => {
                    let subscriber_id = data
                        .get("id")
                        .and_then(Value::as_str)
                        .map(ToOwned::to_owned);
                    info!("{:<20} - New subscription created", "subscribe");
                    SubscriptionOutcome {
                        success: true,
                        message: "Successfully subscribed to newsletter".to_string(),
                        subscriber_id,
                    }
                }
                Err(er) => {
                    error!("{:<20} - Unexpected error: {er}", "subscribe");
                    SubscriptionOutcome::failure(format!("Unexpected error: {er}"))
                }
            },
            409 => {
                info!("{:<20} - Email already subscribed", "subscribe");
                SubscriptionOutcome {
                    success: true,
                    message: "Email already subscribed to newsletter".to_string(),
                    subscriber_id: None,
                }
            }
            status => {
                let body = res.text().await.unwrap_or_default();
                error!("{:<20} - Provider error: {status} - {body}", "subscribe");
                SubscriptionOutcome::failure(format!("Failed to subscribe: {body}"))
            }
        }
    }

    /// Fetches the raw publication record from the provider.
    pub async fn publication_info(&self) -> Result<Value> {
        let url = format!("{}/publications/{}", self.base_url, self.publication_id);

        let res = self
            .http_client
            .get(&url)
            .bearer_auth(self.api_key.expose_secret())
            .send()
            .await?;

        let status = res.status();
        if status == reqwest::StatusCode::OK {
            Ok(res.json().await?)
        } else {
            let body = res.text().await.unwrap_or_default();
            error!(
                "{:<20} - Provider error: {} - {body}",
                "publication_info",
                status.as_u16()
            );
            Err(Error::Provider {
                status: status.as_u16(),
                body,
            })
        }
    }
}

/// The provider's wire format for a subscription request.
/// Optional name keys are omitted, not serialized as null.
#[derive(Serialize)]
struct SubscriptionBody<'a> {
    email: &'a str,
    reactivate_existing: bool,
    send_welcome_email: bool,
    utm_source: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<&'a str>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("BEEHIIV_API_KEY is missing or empty")]
    MissingApiKey,
    #[error("BEEHIIV_PUBLICATION_ID is missing or empty")]
    MissingPublicationId,
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("provider returned status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
