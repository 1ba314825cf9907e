//! Turns records into labeled display fields for list cards and detail views.

use std::fmt::Display;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone};

/// Shown in place of a missing name.
pub const NO_NAME: &str = "Sin nombre";
/// Shown in place of any other missing value.
pub const NO_DATA: &str = "Sin datos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub text: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDisplay {
    pub label: &'static str,
    pub value: String,
    pub badge: Option<Badge>,
}

impl FieldDisplay {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
            badge: None,
        }
    }

    pub fn badge(label: &'static str, badge: Badge) -> Self {
        Self {
            label,
            value: badge.text.to_string(),
            badge: Some(badge),
        }
    }
}

pub trait Render {
    /// Card heading.
    fn title(&self) -> String;
    fn fields(&self) -> Vec<FieldDisplay>;
}

/// `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `dd/mm/yyyy HH:MM` in the timezone the value carries.
pub fn format_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    at.format("%d/%m/%Y %H:%M").to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// The value itself, or `placeholder` when absent or blank.
pub fn or_placeholder(value: Option<&str>, placeholder: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

pub fn name_or_placeholder(value: Option<&str>) -> String {
    or_placeholder(value, NO_NAME)
}

pub fn text_or_placeholder(value: Option<&str>) -> String {
    or_placeholder(value, NO_DATA)
}

pub fn date_or_placeholder(value: Option<NaiveDate>) -> String {
    value.map(format_date).unwrap_or_else(|| NO_DATA.to_string())
}

pub fn time_or_placeholder(value: Option<NaiveTime>) -> String {
    value.map(format_time).unwrap_or_else(|| NO_DATA.to_string())
}

pub fn id_or_placeholder(value: Option<u64>) -> String {
    value.map(|id| id.to_string()).unwrap_or_else(|| NO_DATA.to_string())
}

/// Joins first and last name, falling back to [`NO_NAME`] when both are blank.
pub fn full_name(first: Option<&str>, last: Option<&str>) -> String {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    name_or_placeholder(Some(&joined))
}
