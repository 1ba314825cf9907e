use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, id_or_placeholder, name_or_placeholder, text_or_placeholder, time_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

/// Work shift assigned to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: u64,
    pub name: Option<String>,
    pub employee_id: Option<u64>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub days: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<u64>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub days: Vec<String>,
}

impl Validate for ScheduleDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("name", &self.name)
            .required_some("startTime", self.start_time)
            .required_some("endTime", self.end_time);
        errors.into_result()
    }
}

impl Resource for Schedule {
    type Draft = ScheduleDraft;

    const NAME: &'static str = "schedule";
    const LABEL: &'static str = "este horario";
    const BASE: &'static str = "/schedule";
    const CREATE: &'static str = "/schedule/";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Schedule {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.name.as_deref().into_iter().collect();
        fields.extend(self.days.iter().map(String::as_str));
        fields
    }
}

impl Render for Schedule {
    fn title(&self) -> String {
        name_or_placeholder(self.name.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        let days = self.days.join(", ");
        vec![
            FieldDisplay::new("Empleado", id_or_placeholder(self.employee_id)),
            FieldDisplay::new("Entrada", time_or_placeholder(self.start_time)),
            FieldDisplay::new("Salida", time_or_placeholder(self.end_time)),
            FieldDisplay::new("Días", text_or_placeholder(Some(&days))),
        ]
    }
}
