use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{
    FieldDisplay, Render, date_or_placeholder, full_name, id_or_placeholder, text_or_placeholder,
};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: u64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub document_number: Option<String>,
    pub area_id: Option<u64>,
    pub position_id: Option<u64>,
    pub hire_date: Option<NaiveDate>,
    pub status: Option<String>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<NaiveDate>,
}

impl From<&Employee> for EmployeeDraft {
    /// Prefills the edit form.
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone().unwrap_or_default(),
            last_name: employee.last_name.clone().unwrap_or_default(),
            email: employee.email.clone().unwrap_or_default(),
            phone: employee.phone.clone(),
            document_number: employee.document_number.clone(),
            area_id: employee.area_id,
            position_id: employee.position_id,
            hire_date: employee.hire_date,
        }
    }
}

impl Validate for EmployeeDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required("firstName", &self.first_name)
            .required("lastName", &self.last_name)
            .required("email", &self.email)
            .email("email", &self.email);
        errors.into_result()
    }
}

impl Resource for Employee {
    type Draft = EmployeeDraft;

    const NAME: &'static str = "employee";
    const LABEL: &'static str = "este empleado";
    const BASE: &'static str = "/employees";
    const CREATE: &'static str = "/employees";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Employee {
    fn search_fields(&self) -> Vec<&str> {
        [
            &self.first_name,
            &self.last_name,
            &self.email,
            &self.document_number,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .collect()
    }
}

impl Render for Employee {
    fn title(&self) -> String {
        self.full_name()
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        vec![
            FieldDisplay::new("Correo", text_or_placeholder(self.email.as_deref())),
            FieldDisplay::new("Teléfono", text_or_placeholder(self.phone.as_deref())),
            FieldDisplay::new("Documento", text_or_placeholder(self.document_number.as_deref())),
            FieldDisplay::new("Área", id_or_placeholder(self.area_id)),
            FieldDisplay::new("Cargo", id_or_placeholder(self.position_id)),
            FieldDisplay::new("Fecha de ingreso", date_or_placeholder(self.hire_date)),
            FieldDisplay::new("Estado", text_or_placeholder(self.status.as_deref())),
        ]
    }
}
