pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{config::AppConfig, web, BeehiivClient, Result};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    /// Builds the full application from an `AppConfig`.
    ///
    /// Missing provider credentials are not fatal here: the server still comes
    /// up, but without a `BeehiivClient`, and every provider-backed endpoint
    /// answers with a service error until the process is restarted with
    /// `BEEHIIV_API_KEY` and `BEEHIIV_PUBLICATION_ID` set.
    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        let provider = &config.provider_config;

        let beehiiv_client = match provider.credentials() {
            Ok((api_key, publication_id)) => Some(BeehiivClient::new(
                &provider.base_url,
                api_key,
                publication_id,
                provider.timeout(),
            )?),
            Err(er) => {
                error!(
                    "{:<20} - {er}; provider endpoints disabled",
                    "build_from_config"
                );
                None
            }
        };

        let app_state = AppState::new(beehiiv_client);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub beehiiv_client: Option<BeehiivClient>,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(beehiiv_client: Option<BeehiivClient>) -> Self {
        AppState(Arc::new(InternalState { beehiiv_client }))
    }

    /// The provider client, or a `web::Error` if the process started without
    /// credentials.
    pub fn beehiiv_client(&self) -> web::WebResult<&BeehiivClient> {
        self.beehiiv_client
            .as_ref()
            .ok_or(web::Error::ProviderNotConfigured)
    }
}
