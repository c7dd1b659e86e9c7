pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod routes;
pub mod utils;

pub use api::client::ApiClient;
pub use api::resources::AdminApi;
pub use app::AdminApp;
pub use auth::{AuthClient, AuthSession, AuthStatus, LoginFlow, RefreshCoordinator, TokenStore};
pub use config::Config;
pub use dashboard::Dashboard;
pub use error::{ApiError, LoginError, Result};
pub use routes::{GateDecision, ProtectedRoute};
