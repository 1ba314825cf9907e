use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, date_or_placeholder, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: u64,
    pub employee_id: u64,
    pub contract_type: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub salary: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDraft {
    pub employee_id: Option<u64>,
    pub contract_type: String,
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
}

impl Validate for ContractDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required_some("employeeId", self.employee_id)
            .required("contractType", &self.contract_type)
            .required_some("startDate", self.start_date);
        errors.into_result()
    }
}

impl Resource for Contract {
    type Draft = ContractDraft;

    const NAME: &'static str = "contract";
    const LABEL: &'static str = "este contrato";
    const BASE: &'static str = "/contract";
    const CREATE: &'static str = "/contract/";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Contract {
    fn search_fields(&self) -> Vec<&str> {
        self.contract_type.as_deref().into_iter().collect()
    }
}

impl Render for Contract {
    fn title(&self) -> String {
        format!("Contrato #{}", self.id)
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        let salary = self.salary.map(|s| format!("{s:.2}"));
        vec![
            FieldDisplay::new("Empleado", self.employee_id.to_string()),
            FieldDisplay::new("Tipo", text_or_placeholder(self.contract_type.as_deref())),
            FieldDisplay::new("Inicio", date_or_placeholder(self.start_date)),
            FieldDisplay::new("Fin", date_or_placeholder(self.end_date)),
            FieldDisplay::new("Salario", text_or_placeholder(salary.as_deref())),
        ]
    }
}
