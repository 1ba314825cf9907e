use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, id_or_placeholder, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    pub employee_id: Option<u64>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
}

impl Validate for UserDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("username", &self.username)
            .required("email", &self.email)
            .email("email", &self.email)
            .required("password", &self.password)
            .required_some("roleId", self.role_id);
        errors.into_result()
    }
}

/// Users cannot be edited: the backend has no update route for them.
impl Resource for User {
    type Draft = UserDraft;

    const NAME: &'static str = "user";
    const LABEL: &'static str = "este usuario";
    const BASE: &'static str = "/user";
    const CREATE: &'static str = "/user/";
    const UPDATABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = [&self.username, &self.email]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        fields.extend(self.roles.iter().map(String::as_str));
        fields
    }
}

impl Render for User {
    fn title(&self) -> String {
        name_or_placeholder(self.username.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        let roles = self.roles.join(", ");
        let active = match self.is_active {
            Some(true) => Some("Activo"),
            Some(false) => Some("Inactivo"),
            None => None,
        };
        vec![
            FieldDisplay::new("Correo", text_or_placeholder(self.email.as_deref())),
            FieldDisplay::new("Roles", text_or_placeholder(Some(&roles))),
            FieldDisplay::new("Empleado", id_or_placeholder(self.employee_id)),
            FieldDisplay::new("Estado", text_or_placeholder(active)),
        ]
    }
}
