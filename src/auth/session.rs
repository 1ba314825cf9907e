use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::store::{KeyValueStore, StoreError};
use crate::api::{ApiClient, Token};
use crate::error::ApiResult;
use crate::models::{LoginReqDto, LoginResponse};

pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Session context handed to every screen.
///
/// Screens only read the token, once, when they mount. Writing it is reserved
/// to [`Session::login`] and [`Session::logout`].
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The stored token, if any. Blank values count as absent.
    pub fn token(&self) -> Result<Option<Token>, StoreError> {
        let token = self
            .store
            .get(&self.key)?
            .filter(|t| !t.trim().is_empty())
            .map(Token::new);
        Ok(token)
    }

    /// Authenticates and persists the returned token.
    #[instrument(name = "session_login", skip(self, api, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, api: &ApiClient, credentials: &LoginReqDto) -> ApiResult<LoginResponse> {
        let response = api.login(credentials).await.inspect_err(|e| {
            warn!(error = %e, "Login rejected");
        })?;

        self.store.set(&self.key, &response.token)?;
        info!(username = ?response.username, roles = ?response.roles, "Logged in");
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), StoreError> {
        self.store.remove(&self.key)?;
        info!("Session token removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::RecordingTransport;
    use crate::auth::store::{FileStore, MemoryStore};
    use crate::error::ApiError;
    use crate::model::Employee;
    use serde_json::json;

    fn credentials() -> LoginReqDto {
        LoginReqDto {
            email: "a@b.com".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn login_persists_token_used_by_later_calls() {
        let transport = RecordingTransport::replying(|req| match req.path.as_str() {
            "/auth/login" => Ok(json!({"token": "abc123", "username": "a", "roles": ["admin"]})),
            _ => Ok(json!([])),
        });
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone(), DEFAULT_TOKEN_KEY);
        let api = ApiClient::new(transport.clone());

        let resp = session.login(&api, &credentials()).await.unwrap();
        assert_eq!(resp.username.as_deref(), Some("a"));
        assert_eq!(store.get("token").unwrap().as_deref(), Some("abc123"));

        let token = session.token().unwrap().unwrap();
        api.with_token(token).list::<Employee>().await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].authorization(), None);
        assert_eq!(calls[1].authorization().as_deref(), Some("Bearer abc123"));
    }

    #[tokio::test]
    async fn failed_login_keeps_previous_state() {
        let transport = RecordingTransport::replying(|_| {
            Err(ApiError::from_response(401, r#"{"message":"Invalid credentials"}"#))
        });
        let store = Arc::new(MemoryStore::new());
        let session = Session::new(store.clone(), DEFAULT_TOKEN_KEY);

        let err = session
            .login(&ApiClient::new(transport), &credentials())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert!(session.token().unwrap().is_none());
    }

    #[tokio::test]
    async fn login_recovers_from_corrupt_session_file() {
        let dir = std::env::temp_dir().join(format!("hrm-session-{}", uuid::Uuid::new_v4()));
        let path = dir.join("session.json");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let session = Session::new(Arc::new(FileStore::new(&path)), DEFAULT_TOKEN_KEY);
        assert!(session.token().is_err());

        let transport = RecordingTransport::replying(|_| Ok(json!({"token": "abc123"})));
        session
            .login(&ApiClient::new(transport), &credentials())
            .await
            .unwrap();
        assert_eq!(session.token().unwrap().unwrap().as_str(), "abc123");

        std::fs::write(&path, "not json").unwrap();
        session.logout().unwrap();
        assert!(session.token().unwrap().is_none());

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let session = Session::new(Arc::new(MemoryStore::with_entry("token", "  ")), "token");
        assert!(session.token().unwrap().is_none());
    }

    #[test]
    fn logout_clears_token() {
        let session = Session::new(Arc::new(MemoryStore::with_entry("token", "t")), "token");
        assert!(session.token().unwrap().is_some());
        session.logout().unwrap();
        assert!(session.token().unwrap().is_none());
    }
}
