use std::sync::{Arc, RwLock};

use log::debug;

use crate::utils::mask_token;

/// In-memory holder of the current access token.
///
/// Cloning yields another handle onto the same cell. Nothing is persisted;
/// a new process starts empty.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    token: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held token. Empty or whitespace-only strings count as absent.
    pub fn set<S: Into<String>>(&self, token: Option<S>) {
        let token = token.map(Into::into).filter(|t| !t.trim().is_empty());
        match &token {
            Some(t) => debug!("Access token set ({})", mask_token(t)),
            None => debug!("Access token cleared"),
        }
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = token;
    }

    pub fn clear(&self) {
        self.set(None::<String>);
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }
}
