use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::validate::{Validate, ValidationErrors};

pub mod application;
pub mod application_type;
pub mod area;
pub mod attendance;
pub mod contract;
pub mod employee;
pub mod employee_post;
pub mod location;
pub mod position;
pub mod role;
pub mod schedule;
pub mod training;
pub mod user;

pub use application::{Application, ApplicationDraft, ApplicationStatus};
pub use application_type::ApplicationType;
pub use area::Area;
pub use attendance::{Attendance, AttendanceDraft};
pub use contract::{Contract, ContractDraft};
pub use employee::{Employee, EmployeeDraft};
pub use employee_post::{EmployeePost, EmployeePostDraft};
pub use location::{Location, LocationDraft};
pub use position::{Position, PositionDraft};
pub use role::Role;
pub use schedule::{Schedule, ScheduleDraft};
pub use training::{Training, TrainingDraft, TrainingKind};
pub use user::{User, UserDraft};

/// Create/update payload shared by the name-and-description catalogs
/// (roles, areas, application types).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CatalogDraft {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }
}

impl Validate for CatalogDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.required("name", &self.name);
        errors.into_result()
    }
}
