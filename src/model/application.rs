use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{AsRefStr, EnumString};

use crate::api::request::RequestBody;
use crate::api::resource::Resource;
use crate::error::ApiResult;
use crate::render::{Badge, FieldDisplay, Render, format_date, format_datetime, text_or_placeholder};
use crate::utils::filter::Searchable;
use crate::validate::{Validate, ValidationErrors};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ApplicationStatus {
    #[default]
    #[serde(alias = "PENDING", alias = "Pending")]
    Pending,
    #[serde(alias = "APPROVED", alias = "Approved")]
    Approved,
    #[serde(alias = "REJECTED", alias = "Rejected")]
    Rejected,
}

impl ApplicationStatus {
    pub fn badge(self) -> Badge {
        match self {
            Self::Pending => Badge { text: "Pendiente", color: "#F59E0B" },
            Self::Approved => Badge { text: "Aprobada", color: "#10B981" },
            Self::Rejected => Badge { text: "Rechazada", color: "#EF4444" },
        }
    }
}

/// A leave or permission request filed by an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: u64,
    pub employee_id: Option<u64>,
    pub application_type_id: Option<u64>,
    pub reason: Option<String>,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    #[serde(default, deserialize_with = "status_or_pending")]
    pub status: ApplicationStatus,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

fn status_or_pending<'de, D: Deserializer<'de>>(de: D) -> Result<ApplicationStatus, D::Error> {
    Ok(Option::<ApplicationStatus>::deserialize(de)?.unwrap_or_default())
}

/// RFC 3339, or a zone-less timestamp read as local time. Anything else becomes `None`.
fn lenient_timestamp<'de, D: Deserializer<'de>>(de: D) -> Result<Option<DateTime<Utc>>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(de)? else {
        return Ok(None);
    };
    let raw = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(Some(at.with_timezone(&Utc)));
    }
    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok());
    Ok(naive
        .and_then(|at| Local.from_local_datetime(&at).earliest())
        .map(|at| at.with_timezone(&Utc)))
}

/// Sent as `multipart/form-data`, not JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationDraft {
    #[serde(rename = "applicationTypeid")]
    pub application_type_id: Option<u64>,
    pub reason: String,
    #[serde(rename = "dateStart")]
    pub date_start: Option<NaiveDate>,
    #[serde(rename = "dateEnd")]
    pub date_end: Option<NaiveDate>,
}

impl ApplicationDraft {
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(4);
        if let Some(type_id) = self.application_type_id {
            fields.push(("applicationTypeid".to_string(), type_id.to_string()));
        }
        fields.push(("reason".to_string(), self.reason.trim().to_string()));
        if let Some(start) = self.date_start {
            fields.push(("dateStart".to_string(), start.to_string()));
        }
        if let Some(end) = self.date_end {
            fields.push(("dateEnd".to_string(), end.to_string()));
        }
        fields
    }
}

impl Validate for ApplicationDraft {
    fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors
            .required_some("applicationTypeid", self.application_type_id)
            .required("reason", &self.reason)
            .date_range(
                ("dateStart", self.date_start),
                ("dateEnd", self.date_end),
                today,
            );
        errors.into_result()
    }
}

impl Resource for Application {
    type Draft = ApplicationDraft;

    const NAME: &'static str = "application";
    const LABEL: &'static str = "esta solicitud";
    const BASE: &'static str = "/applications";
    const CREATE: &'static str = "/applications/";
    const UPDATABLE: bool = false;

    fn id(&self) -> u64 {
        self.id
    }

    fn create_body(draft: &ApplicationDraft) -> ApiResult<RequestBody> {
        Ok(RequestBody::Form(draft.form_fields()))
    }
}

impl Searchable for Application {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.reason.as_deref().into_iter().collect();
        fields.push(self.status.badge().text);
        fields.push(self.status.as_ref());
        fields
    }
}

impl Render for Application {
    fn title(&self) -> String {
        text_or_placeholder(self.reason.as_deref())
    }

    fn fields(&self) -> Vec<FieldDisplay> {
        let created = self
            .created_at
            .map(|at| format_datetime(&at.with_timezone(&Local)));
        vec![
            FieldDisplay::new("Desde", format_date(self.date_start)),
            FieldDisplay::new("Hasta", format_date(self.date_end)),
            FieldDisplay::badge("Estado", self.status.badge()),
            FieldDisplay::new("Creada", text_or_placeholder(created.as_deref())),
        ]
    }
}
