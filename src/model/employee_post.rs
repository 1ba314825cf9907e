use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, date_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

/// Assignment of an employee to a position over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePost {
    pub id: u64,
    pub employee_id: u64,
    pub position_id: u64,
    pub employee_name: Option<String>,
    pub position_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePostDraft {
    pub employee_id: Option<u64>,
    pub position_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Validate for EmployeePostDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required_some("employeeId", self.employee_id)
            .required_some("positionId", self.position_id);
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                errors.add("endDate", "La fecha de fin no puede ser anterior al inicio");
            }
        }
        errors.into_result()
    }
}

impl Resource for EmployeePost {
    type Draft = EmployeePostDraft;

    const NAME: &'static str = "employee-post";
    const LABEL: &'static str = "esta asignación de cargo";
    const BASE: &'static str = "/employee-post";
    const CREATE: &'static str = "/employee-post/";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for EmployeePost {
    fn search_fields(&self) -> Vec<&str> {
        [&self.employee_name, &self.position_name]
            .into_iter()
            .filter_map(Option::as_deref)
            .collect()
    }
}

impl Render for EmployeePost {
    fn title(&self) -> String {
        match self.employee_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Empleado #{}", self.employee_id),
        }
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        let position = self
            .position_name
            .clone()
            .unwrap_or_else(|| format!("Cargo #{}", self.position_id));
        vec![
            FieldDisplay::new("Cargo", text_or_placeholder(Some(&position))),
            FieldDisplay::new("Desde", date_or_placeholder(self.start_date)),
            FieldDisplay::new("Hasta", date_or_placeholder(self.end_date)),
        ]
    }
}
