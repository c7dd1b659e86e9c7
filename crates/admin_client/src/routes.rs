//! Protected-route gating for the admin area.
//!
//! A guest visiting a protected path is redirected to the login screen and
//! the path is remembered, so a successful login can send them back.

use std::sync::{Arc, Mutex};

use log::debug;

use crate::auth::{AuthSession, AuthStatus};

pub const LOGIN_ROUTE: &str = "/admin/login";
pub const DEFAULT_ADMIN_ROUTE: &str = "/admin";
pub const LOADING_PLACEHOLDER: &str = "Loading…";

/// Everything under `/admin` except the login screen.
pub fn is_protected(path: &str) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path == LOGIN_ROUTE || path.starts_with("/admin/login/") {
        return false;
    }
    path == DEFAULT_ADMIN_ROUTE || path.starts_with("/admin/")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Session not resolved yet: show the neutral placeholder.
    Loading,
    /// Replace the current location with the login screen.
    RedirectToLogin { from: String },
    Render,
}

/// The location a guest was redirected away from.
#[derive(Debug, Clone, Default)]
pub struct ReturnTo {
    path: Arc<Mutex<Option<String>>>,
}

impl ReturnTo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn remember(&self, path: impl Into<String>) {
        let path = path.into();
        debug!("Remembering {path} for after login");
        *self.path.lock().unwrap_or_else(|e| e.into_inner()) = Some(path);
    }

    pub fn peek(&self) -> Option<String> {
        self.path.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Consumes the remembered path, falling back to the admin home.
    pub fn take(&self) -> String {
        self.path
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take()
            .unwrap_or_else(|| DEFAULT_ADMIN_ROUTE.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct ProtectedRoute {
    session: AuthSession,
    return_to: ReturnTo,
}

impl ProtectedRoute {
    pub fn new(session: AuthSession, return_to: ReturnTo) -> Self {
        ProtectedRoute { session, return_to }
    }

    /// Decides from the current status without waiting.
    pub fn check(&self, path: &str) -> GateDecision {
        if !is_protected(path) {
            return GateDecision::Render;
        }
        match self.session.status() {
            AuthStatus::Loading => GateDecision::Loading,
            AuthStatus::Authed => GateDecision::Render,
            AuthStatus::Guest => {
                self.return_to.remember(path);
                GateDecision::RedirectToLogin {
                    from: path.to_string(),
                }
            }
        }
    }

    /// Waits for the session to resolve, then decides.
    pub async fn resolve(&self, path: &str) -> GateDecision {
        if is_protected(path) {
            self.session.resolved().await;
        }
        self.check(path)
    }

    pub fn return_to(&self) -> &ReturnTo {
        &self.return_to
    }
}
