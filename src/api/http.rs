use async_trait::async_trait;
use reqwest::multipart::Form;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use super::request::{ApiRequest, Method, RequestBody, Transport};
use crate::error::{ApiError, ApiResult};

/// [`Transport`] backed by a shared `reqwest` client.
///
/// No timeout is configured: a request that never completes keeps the caller waiting.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: &Url) -> Self {
        Self {
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, request.path);
        let request_id = Uuid::new_v4().to_string();

        let mut builder = self
            .client
            .request(request.method.into(), &url)
            .header("X-Request-Id", &request_id);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(payload) => builder.json(&payload),
            RequestBody::Form(fields) => {
                let form = fields
                    .into_iter()
                    .fold(Form::new(), |form, (name, value)| form.text(name, value));
                builder.multipart(form)
            }
        };

        debug!(method = %request.method, path = %request.path, request_id = %request_id, "Sending request");

        let response = builder.send().await.map_err(|e| {
            warn!(error = %e, method = %request.method, path = %request.path, request_id = %request_id, "Request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!(error = %e, path = %request.path, request_id = %request_id, "Failed to read response body");
            ApiError::Transport(e.to_string())
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), method = %request.method, path = %request.path, request_id = %request_id, "Backend rejected request");
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        debug!(status = status.as_u16(), path = %request.path, request_id = %request_id, "Request succeeded");

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        // Some endpoints answer 2xx with a plain text confirmation.
        Ok(serde_json::from_str(&body).unwrap_or(Value::String(body)))
    }
}
