//! Admin authentication
//!
//! Token lifecycle:
//! 1. Boot: exchange the session cookie for an access token (refresh)
//! 2. Login: exchange credentials for an access token and a session cookie
//! 3. Authenticated requests carry the token as a bearer header
//! 4. A 401 triggers one coordinated refresh, then one retry
//! 5. Logout or a failed refresh clears the token and drops to guest

pub mod auth_client;
pub mod endpoints;
pub mod login;
pub mod refresh;
pub mod session;
pub mod token_store;

pub use auth_client::{AuthClient, TokenResponse};
pub use login::{LoginFlow, LoginForm};
pub use refresh::RefreshCoordinator;
pub use session::{AuthSession, AuthStatus};
pub use token_store::TokenStore;
