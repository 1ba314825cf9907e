use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u64,
    pub name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl Validate for LocationDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("name", &self.name)
            .required("address", &self.address);
        errors.into_result()
    }
}

impl Resource for Location {
    type Draft = LocationDraft;

    const NAME: &'static str = "location";
    const LABEL: &'static str = "esta sede";
    const BASE: &'static str = "/location";
    const CREATE: &'static str = "/location/";
    const UPDATABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Location {
    fn search_fields(&self) -> Vec<&str> {
        [&self.name, &self.address, &self.city]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

impl Render for Location {
    fn title(&self) -> String {
        name_or_placeholder(self.name.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        vec![
            FieldDisplay::new("Dirección", text_or_placeholder(self.address.as_deref())),
            FieldDisplay::new("Ciudad", text_or_placeholder(self.city.as_deref())),
        ]
    }
}
