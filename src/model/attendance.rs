use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::api::resource::Resource;
use crate::render::{FieldDisplay, Render, format_date, time_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub id: u64,
    pub employee_id: u64,
    pub date: NaiveDate,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    /// Employee display name, when the backend joins it in.
    pub employee_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceDraft {
    pub employee_id: Option<u64>,
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveTime>,
}

impl Validate for AttendanceDraft {
    fn validate(&self, _today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required_some("employeeId", self.employee_id)
            .required_some("date", self.date);
        if let (Some(check_in), Some(check_out)) = (self.check_in, self.check_out) {
            if check_out <= check_in {
                errors.add("checkOut", "La salida debe ser posterior a la entrada");
            }
        }
        errors.into_result()
    }
}

impl Resource for Attendance {
    type Draft = AttendanceDraft;

    const NAME: &'static str = "attendance";
    const LABEL: &'static str = "este registro de asistencia";
    const BASE: &'static str = "/attendance";
    const CREATE: &'static str = "/attendance/";

    fn id(&self) -> u64 {
        self.id
    }
}

impl Searchable for Attendance {
    fn search_fields(&self) -> Vec<&str> {
        self.employee_name.as_deref().into_iter().collect()
    }
}

impl Render for Attendance {
    fn title(&self) -> String {
        match self.employee_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => format!("Empleado #{}", self.employee_id),
        }
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        vec![
            FieldDisplay::new("Fecha", format_date(self.date)),
            FieldDisplay::new("Entrada", time_or_placeholder(self.check_in)),
            FieldDisplay::new("Salida", time_or_placeholder(self.check_out)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_out_must_follow_check_in() {
        let draft = AttendanceDraft {
            employee_id: Some(1),
            date: NaiveDate::from_ymd_opt(2026, 2, 2),
            check_in: NaiveTime::from_hms_opt(9, 0, 0),
            check_out: NaiveTime::from_hms_opt(8, 0, 0),
        };
        let err = draft.validate(NaiveDate::MIN).unwrap_err();
        assert!(err.contains("checkOut"));
    }

    #[test]
    fn title_falls_back_to_employee_id() {
        let record: Attendance = serde_json::from_str(
            r#"{"id":1,"employeeId":12,"date":"2026-02-02","checkIn":"09:00:00"}"#,
        )
        .unwrap();
        assert_eq!(record.title(), "Empleado #12");
        assert_eq!(record.fields()[1].value, "09:00");
    }
}
