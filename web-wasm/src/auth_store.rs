//! localStorage 上の認証情報

use crop_detect_common::auth::{AUTHENTICATED_KEY, EMAIL_KEY};
use crop_detect_common::{AuthSession, AuthStore};
use gloo::storage::{LocalStorage, Storage};

/// ブラウザの localStorage を読み書きする `AuthStore`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserAuthStore;

impl BrowserAuthStore {
    fn get(key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }
}

impl AuthStore for BrowserAuthStore {
    fn load(&self) -> AuthSession {
        let authenticated = Self::get(AUTHENTICATED_KEY);
        let email = Self::get(EMAIL_KEY);
        AuthSession::from_raw(authenticated.as_deref(), email.as_deref())
    }

    fn store(&mut self, session: &AuthSession) {
        let storage = LocalStorage::raw();
        let flag = if session.is_authenticated { "true" } else { "false" };
        if storage.set_item(AUTHENTICATED_KEY, flag).is_err() {
            leptos::logging::warn!("failed to write {AUTHENTICATED_KEY}");
        }
        let written = match &session.email {
            Some(email) => storage.set_item(EMAIL_KEY, email),
            None => storage.remove_item(EMAIL_KEY),
        };
        if written.is_err() {
            leptos::logging::warn!("failed to write {EMAIL_KEY}");
        }
    }

    fn clear(&mut self) {
        let storage = LocalStorage::raw();
        for key in [AUTHENTICATED_KEY, EMAIL_KEY] {
            if storage.remove_item(key).is_err() {
                leptos::logging::warn!("failed to remove {key}");
            }
        }
    }
}
