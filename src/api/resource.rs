use serde::de::DeserializeOwned;
use serde::Serialize;

use super::request::RequestBody;
use crate::error::ApiResult;
use crate::validate::Validate;

/// A backend collection reachable through the uniform list/create/update/delete routes.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Payload accepted by the create and update endpoints.
    type Draft: Serialize + Validate + Send + Sync;

    /// Name used in logs and unsupported-operation errors.
    const NAME: &'static str;
    /// Singular noun with its demonstrative (`esta sede`), shown in confirmation prompts.
    const LABEL: &'static str;
    /// Collection prefix, e.g. `/employees`.
    const BASE: &'static str;
    /// Route for `POST`; the backend is not consistent about the trailing slash.
    const CREATE: &'static str;
    const UPDATABLE: bool = true;

    fn id(&self) -> u64;

    fn list_path() -> String {
        format!("{}/all", Self::BASE)
    }

    fn item_path(id: u64) -> String {
        format!("{}/{id}", Self::BASE)
    }

    fn create_body(draft: &Self::Draft) -> ApiResult<RequestBody> {
        RequestBody::json(draft)
    }
}
