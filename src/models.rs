use serde::{Deserialize, Serialize};

use crate::model::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginReqDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl LoginResponse {
    /// Whether the signed-in user may see and decide on everyone's applications.
    pub fn is_reviewer(&self) -> bool {
        self.roles.iter().any(|role| Role::is_reviewer(role))
    }
}
