use serde::{Deserialize, Serialize};

use super::CatalogDraft;
use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;

/// Access role as administered from the roles screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Role {
    /// True for roles whose holders may review every employee's applications.
    pub fn is_reviewer(name: &str) -> bool {
        matches!(
            name.trim().to_lowercase().as_str(),
            "admin" | "administrador" | "hr" | "rrhh"
        )
    }
}

impl Resource for Role {
    type Draft = CatalogDraft;

    const NAME: &'static str = "role";
    const LABEL: &'static str = "este rol";
    const BASE: &'static str = "/role";
    const CREATE: &'static str = "/role/";
    const UPDATABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Role {
    fn search_fields(&self) -> Vec<&str> {
        [&self.name, &self.description]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

impl Render for Role {
    fn title(&self) -> String {
        name_or_placeholder(self.name.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        vec![FieldDisplay::new(
            "Descripción",
            text_or_placeholder(self.description.as_deref()),
        )]
    }
}
