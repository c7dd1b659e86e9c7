use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{info, warn};

use super::auth_client::AuthClient;
use super::session::AuthSession;
use crate::error::LoginError;
use crate::routes::ReturnTo;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        LoginForm {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Submission logic behind the admin login form.
#[derive(Debug, Clone)]
pub struct LoginFlow {
    auth: AuthClient,
    session: AuthSession,
    return_to: ReturnTo,
    busy: Arc<AtomicBool>,
}

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl LoginFlow {
    pub fn new(auth: AuthClient, session: AuthSession, return_to: ReturnTo) -> Self {
        LoginFlow {
            auth,
            session,
            return_to,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Submits the credentials. On success the session becomes `authed` and
    /// the path to navigate to is returned. On failure the session status is
    /// left untouched.
    pub async fn submit(&self, form: &LoginForm) -> Result<String, LoginError> {
        if self.busy.swap(true, Ordering::SeqCst) {
            return Err(LoginError::Busy);
        }
        let _busy = BusyGuard(&self.busy);

        let email = form.email.trim();
        let body = match self.auth.login(email, &form.password).await {
            Ok(body) => body,
            Err(e) => {
                warn!("Login for {email} failed: {e}");
                return Err(e
                    .server_message()
                    .map(|message| LoginError::Rejected(message.to_string()))
                    .unwrap_or(LoginError::Failed));
            }
        };

        let Some(token) = body.into_token() else {
            return Err(LoginError::MissingToken);
        };

        self.session.set_authed(token);
        let destination = self.return_to.take();
        info!("Logged in as {email}, continuing to {destination}");
        Ok(destination)
    }
}
