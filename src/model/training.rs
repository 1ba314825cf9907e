use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, date_or_placeholder, id_or_placeholder, name_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TrainingKind {
    Induction,
    #[default]
    Training,
}

impl TrainingKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Induction => "Inducción",
            Self::Training => "Capacitación",
        }
    }
}

/// Inductions and trainings share one backend collection, told apart by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Training {
    pub id: u64,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub kind: TrainingKind,
    pub date: Option<NaiveDate>,
    pub employee_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub kind: TrainingKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
}

impl Validate for TrainingDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("title", &self.title);
        errors.into_result()
    }
}

impl Resource for Training {
    type Draft = TrainingDraft;

    const NAME: &'static str = "training";
    const LABEL: &'static str = "esta capacitación";
    const BASE: &'static str = "/training";
    const CREATE: &'static str = "/training/";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Training {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = [&self.title, &self.description]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect();
        fields.push(self.kind.label());
        fields
    }
}

impl Render for Training {
    fn title(&self) -> String {
        name_or_placeholder(self.title.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        vec![
            FieldDisplay::new("Tipo", self.kind.label()),
            FieldDisplay::new("Descripción", text_or_placeholder(self.description.as_deref())),
            FieldDisplay::new("Fecha", date_or_placeholder(self.date)),
            FieldDisplay::new("Empleado", id_or_placeholder(self.employee_id)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::filter::filter;

    #[test]
    fn kind_label_is_searchable() {
        let items: Vec<Training> = serde_json::from_str(
            r#"[{"id":1,"title":"Bienvenida","kind":"induction"},{"id":2,"title":"Excel"}]"#,
        )
        .unwrap();
        assert_eq!(items[1].kind, TrainingKind::Training);
        let found = filter(&items, "inducción");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }
}
