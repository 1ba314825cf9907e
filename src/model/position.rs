use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, id_or_placeholder, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

/// Job position, optionally attached to an area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: u64,
    pub name: Option<String>,
    pub description: Option<String>,
    pub area_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<u64>,
}

impl Validate for PositionDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("name", &self.name);
        errors.into_result()
    }
}

impl Resource for Position {
    type Draft = PositionDraft;

    const NAME: &'static str = "position";
    const LABEL: &'static str = "este cargo";
    const BASE: &'static str = "/positions";
    const CREATE: &'static str = "/positions/";
    const UPDATABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Position {
    fn search_fields(&self) -> Vec<&str> {
        [&self.name, &self.description]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

impl Render for Position {
    fn title(&self) -> String {
        name_or_placeholder(self.name.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        vec![
            FieldDisplay::new("Descripción", text_or_placeholder(self.description.as_deref())),
            FieldDisplay::new("Área", id_or_placeholder(self.area_id)),
        ]
    }
}
