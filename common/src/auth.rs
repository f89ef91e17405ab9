//! 認証セッション（表示専用）
//!
//! ストレージへの読み書きは `AuthStore` 経由に限定し、各画面には `AuthSession` を渡す。
//! 認可の判断には使わない。

use serde::{Deserialize, Serialize};

/// ストレージキー: 認証済みフラグ（"true" / "false"）
pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
/// ストレージキー: メールアドレス
pub const EMAIL_KEY: &str = "userEmail";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub is_authenticated: bool,
    pub email: Option<String>,
}

impl AuthSession {
    pub fn signed_in(email: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            email: Some(email.into()),
        }
    }

    /// ヘッダー表示用の名前（未ログインなら None）
    pub fn display_name(&self) -> Option<&str> {
        if !self.is_authenticated {
            return None;
        }
        self.email
            .as_deref()
            .map(|email| email.split('@').next().unwrap_or(email))
            .filter(|name| !name.is_empty())
    }

    /// ストレージの生の値から復元
    pub fn from_raw(authenticated: Option<&str>, email: Option<&str>) -> Self {
        Self {
            is_authenticated: authenticated.map(|v| v.trim() == "true").unwrap_or(false),
            email: email.map(str::trim).filter(|e| !e.is_empty()).map(String::from),
        }
    }
}

/// 認証情報の唯一の読み書き窓口
pub trait AuthStore {
    fn load(&self) -> AuthSession;
    fn store(&mut self, session: &AuthSession);
    fn clear(&mut self);
}

/// メモリ上の実装（CLI・テスト用）
#[derive(Debug, Clone, Default)]
pub struct MemoryAuthStore {
    session: AuthSession,
}

impl MemoryAuthStore {
    pub fn new(session: AuthSession) -> Self {
        Self { session }
    }
}

impl AuthStore for MemoryAuthStore {
    fn load(&self) -> AuthSession {
        self.session.clone()
    }

    fn store(&mut self, session: &AuthSession) {
        self.session = session.clone();
    }

    fn clear(&mut self) {
        self.session = AuthSession::default();
    }
}
