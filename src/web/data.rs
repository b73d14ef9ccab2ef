use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

use crate::beehiiv_client::SubscriptionOutcome;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable subscription request.
/// Can be deserialized from the inbound JSON but may carry an invalid email;
/// handlers validate with `ValidEmail::parse` before touching the provider.
#[derive(Deserialize, Debug)]
pub struct SubscribeRequest {
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default = "default_source")]
    pub source: String,
}

fn default_source() -> String {
    "website".to_string()
}

/// The public response shape for a subscription attempt.
/// `subscriber_id` is omitted, not null, when the provider didn't return one.
#[derive(Serialize, Debug)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,
}

impl From<SubscriptionOutcome> for SubscribeResponse {
    fn from(outcome: SubscriptionOutcome) -> Self {
        SubscribeResponse {
            success: outcome.success,
            message: outcome.message,
            subscriber_id: outcome.subscriber_id,
        }
    }
}

/// Validated email address.
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

// ###################################
// ->   IMPLS
// ###################################
impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug)]
pub enum DataParsingError {
    EmailInvalid,
    EmailTooLong,
}
// Error Boilerplate
impl core::fmt::Display for DataParsingError {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for DataParsingError {}
