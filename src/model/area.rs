use serde::{Deserialize, Serialize};

use super::CatalogDraft;
use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Area {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl Resource for Area {
    type Draft = CatalogDraft;

    const NAME: &'static str = "area";
    const LABEL: &'static str = "esta área";
    const BASE: &'static str = "/areas";
    const CREATE: &'static str = "/areas/";
    const UPDATABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Area {
    fn search_fields(&self) -> Vec<&str> {
        [&self.name, &self.description]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

impl Render for Area {
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
