use serde_json::Value;
use thiserror::Error;

use crate::auth::store::StoreError;

/// Result type for every call that goes through the API client.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("request failed with HTTP {status}{}", suffix(.message))]
    Status {
        status: u16,
        message: Option<String>,
    },

    /// The request never produced a response (connection refused, reset, ...).
    #[error("network error: {0}")]
    Transport(String),

    /// A 2xx response whose body does not have the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The backend exposes no endpoint for this operation.
    #[error("{operation} is not supported for {resource}")]
    Unsupported {
        resource: &'static str,
        operation: &'static str,
    },

    #[error("session storage error: {0}")]
    Storage(#[from] StoreError),
}

fn suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

impl ApiError {
    /// Builds a `Status` error, keeping whatever explanation the backend put in the body.
    ///
    /// The HR backend answers either `{"message": ..}` or `{"error": ..}`; some
    /// handlers reply with a bare text body instead.
    pub fn from_response(status: u16, body: &str) -> Self {
        Self::Status {
            status,
            message: backend_message(body),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text shown to the user inside an alert.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                status,
                message: Some(message),
            } => format!("{message} (HTTP {status})"),
            Self::Status {
                status,
                message: None,
            } => format!("La solicitud falló (HTTP {status})"),
            Self::Transport(_) => "No se pudo conectar con el servidor".to_string(),
            Self::Decode(_) => "El servidor devolvió una respuesta inesperada".to_string(),
            Self::Unsupported { .. } => "Operación no soportada".to_string(),
            Self::Storage(_) => "No se pudo acceder a la sesión guardada".to_string(),
        }
    }
}

fn backend_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        Ok(Value::String(text)) => Some(text),
        Ok(_) => None,
        Err(_) => Some(body.to_string()),
    }
}
