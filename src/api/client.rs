use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::request::{ApiRequest, RequestBody, Transport};
use super::resource::Resource;
use crate::error::{ApiError, ApiResult};
use crate::model::Application;
use crate::models::{LoginReqDto, LoginResponse};

/// Bearer token issued by `POST /auth/login`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Typed access to the HR backend: one method per endpoint.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    token: Option<Token>,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("authorized", &self.token.is_some())
            .finish()
    }
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            token: None,
        }
    }

    /// A client that sends `Authorization: Bearer <token>` on every call.
    pub fn with_token(&self, token: Token) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            token: Some(token),
        }
    }

    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let request = request.with_bearer(self.token.as_ref().map(Token::as_str));
        self.transport.send(request).await
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let body = self.send(request).await?;
        decode(body)
    }

    /// `POST /auth/login`. Pure request/response: persisting the token is the session's job.
    #[instrument(name = "api_login", skip(self, credentials), fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginReqDto) -> ApiResult<LoginResponse> {
        let body = RequestBody::json(credentials)?;
        self.fetch(ApiRequest::post("/auth/login", body)).await
    }

    /// `GET {base}/all`
    pub async fn list<R: Resource>(&self) -> ApiResult<Vec<R>> {
        debug!(resource = R::NAME, "Listing");
        let items: Vec<R> = self.fetch(ApiRequest::get(R::list_path())).await?;
        debug!(resource = R::NAME, count = items.len(), "Listed");
        Ok(items)
    }

    /// `POST {create}`, JSON unless the resource says otherwise.
    pub async fn create<R: Resource>(&self, draft: &R::Draft) -> ApiResult<Value> {
        let body = R::create_body(draft)?;
        let created = self.send(ApiRequest::post(R::CREATE, body)).await?;
        info!(resource = R::NAME, "Created");
        Ok(created)
    }

    /// `PUT {base}/{id}`; fails with [`ApiError::Unsupported`] without a request
    /// when the backend has no update route for the resource.
    pub async fn update<R: Resource>(&self, id: u64, draft: &R::Draft) -> ApiResult<Value> {
        if !R::UPDATABLE {
            return Err(ApiError::Unsupported {
                resource: R::NAME,
                operation: "update",
            });
        }
        let body = RequestBody::json(draft)?;
        let updated = self.send(ApiRequest::put(R::item_path(id), body)).await?;
        info!(resource = R::NAME, id, "Updated");
        Ok(updated)
    }

    /// `DELETE {base}/{id}`
    pub async fn delete<R: Resource>(&self, id: u64) -> ApiResult<Value> {
        let deleted = self.send(ApiRequest::delete(R::item_path(id))).await?;
        info!(resource = R::NAME, id, "Deleted");
        Ok(deleted)
    }

    /// `GET /applications/me`
    pub async fn my_applications(&self) -> ApiResult<Vec<Application>> {
        self.fetch(ApiRequest::get("/applications/me")).await
    }

    /// `GET /applications/all`
    pub async fn all_applications(&self) -> ApiResult<Vec<Application>> {
        self.list::<Application>().await
    }

    /// `PUT /applications/{id}/approve?approved=bool`
    pub async fn decide_application(&self, id: u64, approved: bool) -> ApiResult<Value> {
        let request =
            ApiRequest::put(format!("/applications/{id}/approve"), RequestBody::Empty)
                .with_query("approved", approved);
        let decided = self.send(request).await?;
        info!(id, approved, "Application decided");
        Ok(decided)
    }
}

/// Accepts both a bare JSON value and the `{"data": ..}` envelope some list routes use.
fn decode<T: DeserializeOwned>(body: Value) -> ApiResult<T> {
    let body = match body {
        Value::Object(mut map) if map.contains_key("data") && !map.contains_key("id") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    };
    serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::request::Method;
    use crate::api::testing::RecordingTransport;
    use crate::model::{Area, CatalogDraft, Employee, User, UserDraft};
    use serde_json::json;

    fn client(transport: &Arc<RecordingTransport>) -> ApiClient {
        ApiClient::new(transport.clone()).with_token(Token::new("abc123"))
    }

    #[tokio::test]
    async fn list_attaches_bearer_and_decodes() {
        let transport = RecordingTransport::replying(|_| {
            Ok(json!([{"id": 1, "firstName": "Ana"}, {"id": 2}]))
        });
        let employees = client(&transport).list::<Employee>().await.unwrap();

        assert_eq!(employees.len(), 2);
        let calls = transport.calls();
        assert_eq!(calls[0].method, Method::Get);
        assert_eq!(calls[0].path, "/employees/all");
        assert_eq!(calls[0].authorization().as_deref(), Some("Bearer abc123"));
    }

    #[tokio::test]
    async fn data_envelope_is_unwrapped() {
        let transport = RecordingTransport::replying(|_| {
            Ok(json!({"data": [{"id": 9, "name": "Ventas"}], "page": 1, "total": 1}))
        });
        let areas = client(&transport).list::<Area>().await.unwrap();
        assert_eq!(areas[0].name.as_deref(), Some("Ventas"));
    }

    #[tokio::test]
    async fn wrong_shape_is_a_decode_error() {
        let transport = RecordingTransport::replying(|_| Ok(json!({"unexpected": true})));
        let err = client(&transport).list::<Area>().await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn create_and_delete_use_resource_routes() {
        let transport = RecordingTransport::replying(|_| Ok(Value::Null));
        let api = client(&transport);

        api.create::<Area>(&CatalogDraft::named("Ventas")).await.unwrap();
        api.delete::<User>(5).await.unwrap();

        let calls = transport.calls();
        assert_eq!((calls[0].method, calls[0].path.as_str()), (Method::Post, "/areas/"));
        assert_eq!(calls[0].body, RequestBody::Json(json!({"name": "Ventas"})));
        assert_eq!((calls[1].method, calls[1].path.as_str()), (Method::Delete, "/user/5"));
    }

    #[tokio::test]
    async fn user_update_is_unsupported_and_sends_nothing() {
        let transport = RecordingTransport::replying(|_| Ok(Value::Null));
        let err = client(&transport)
            .update::<User>(3, &UserDraft::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Unsupported {
                resource: "user",
                operation: "update"
            }
        );
        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn decide_sends_approved_flag_as_query() {
        let transport = RecordingTransport::replying(|_| Ok(Value::Null));
        client(&transport).decide_application(7, false).await.unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.method, Method::Put);
        assert_eq!(call.path, "/applications/7/approve");
        assert_eq!(call.query, vec![("approved".to_string(), "false".to_string())]);
    }

    #[tokio::test]
    async fn login_sends_no_authorization() {
        let transport = RecordingTransport::replying(|_| {
            Ok(json!({"token": "abc123", "username": "a", "roles": ["admin"]}))
        });
        let api = ApiClient::new(transport.clone());
        let resp = api
            .login(&LoginReqDto {
                email: "a@b.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(resp.token, "abc123");
        let call = &transport.calls()[0];
        assert_eq!(call.path, "/auth/login");
        assert_eq!(call.bearer, None);
        assert_eq!(
            call.body,
            RequestBody::Json(json!({"email": "a@b.com", "password": "secret"}))
        );
    }

    #[test]
    fn token_is_not_printed() {
        assert_eq!(format!("{:?}", Token::new("abc123")), "Token(***)");
    }
}
