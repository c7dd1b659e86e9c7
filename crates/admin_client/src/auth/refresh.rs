use log::{info, warn};

use super::auth_client::AuthClient;
use crate::utils::{mask_token, SingleFlight};

/// Coalesces concurrent refresh attempts into one `POST /admin/auth/refresh`.
///
/// Every caller that arrives while a refresh is outstanding receives that
/// refresh's result. At most one refresh call is in flight at any time.
#[derive(Debug, Clone)]
pub struct RefreshCoordinator {
    auth: AuthClient,
    flight: SingleFlight<Option<String>>,
}

impl RefreshCoordinator {
    pub fn new(auth: AuthClient) -> Self {
        RefreshCoordinator {
            auth,
            flight: SingleFlight::new(),
        }
    }

    /// Returns a freshly issued access token, or `None` when the server
    /// denies the session or cannot be reached. Never errors.
    pub async fn fresh_access_token(&self) -> Option<String> {
        let auth = self.auth.clone();
        self.flight
            .run(move || async move {
                match auth.refresh().await {
                    Ok(Some(token)) => {
                        info!("Access token refreshed ({})", mask_token(&token));
                        Some(token)
                    }
                    Ok(None) => {
                        warn!("Refresh succeeded without an access token");
                        None
                    }
                    Err(e) => {
                        warn!("Refresh denied: {e}");
                        None
                    }
                }
            })
            .await
    }

    pub async fn is_refreshing(&self) -> bool {
        self.flight.is_in_flight().await
    }
}
