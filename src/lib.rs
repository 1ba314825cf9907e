//! Client for the HR administration backend: typed REST access, session
//! handling and the screen controllers that drive every module.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod render;
pub mod screen;
pub mod utils;
pub mod validate;

pub use api::{ApiClient, HttpTransport, Token};
pub use auth::Session;
pub use config::Config;
pub use error::{ApiError, ApiResult};
