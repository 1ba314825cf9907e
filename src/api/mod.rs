pub mod client;
pub mod http;
pub mod request;
pub mod resource;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, Token};
pub use http::HttpTransport;
pub use request::{ApiRequest, Method, RequestBody, Transport};
pub use resource::Resource;
