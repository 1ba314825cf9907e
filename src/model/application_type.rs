use serde::{Deserialize, Serialize};

use super::CatalogDraft;
use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;

/// Kind of leave or permission an application asks for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationType {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Resource for ApplicationType {
    type Draft = CatalogDraft;

    const NAME: &'static str = "application-type";
    const LABEL: &'static str = "este tipo de solicitud";
    const BASE: &'static str = "/application-type";
    const CREATE: &'static str = "/application-type/";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for ApplicationType {
    fn search_fields(&self) -> Vec<&str> {
        [&self.name, &self.description]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

impl Render for ApplicationType {
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
