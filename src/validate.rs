//! Form rules checked before any mutation reaches the network.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

pub const REQUIRED: &str = "Este campo es obligatorio";
pub const INVALID_EMAIL: &str = "El correo electrónico no es válido";
pub const START_BEFORE_TODAY: &str = "La fecha de inicio no puede ser anterior a hoy";
pub const END_NOT_AFTER_START: &str = "La fecha de fin debe ser posterior a la fecha de inicio";

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Field-level messages keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    pub fn required(&mut self, field: &'static str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add(field, REQUIRED);
        }
        self
    }

    pub fn required_some<T>(&mut self, field: &'static str, value: Option<T>) -> &mut Self {
        if value.is_none() {
            self.add(field, REQUIRED);
        }
        self
    }

    /// Blank values are left to [`Self::required`].
    pub fn email(&mut self, field: &'static str, value: &str) -> &mut Self {
        let value = value.trim();
        if !value.is_empty() && !EMAIL.is_match(value) {
            self.add(field, INVALID_EMAIL);
        }
        self
    }

    /// Start may not precede `today`; end must be strictly after start.
    pub fn date_range(
        &mut self,
        (start_field, start): (&'static str, Option<NaiveDate>),
        (end_field, end): (&'static str, Option<NaiveDate>),
        today: NaiveDate,
    ) -> &mut Self {
        self.required_some(start_field, start);
        self.required_some(end_field, end);

        if let Some(start) = start {
            if start < today {
                self.add(start_field, START_BEFORE_TODAY);
            }
            if let Some(end) = end {
                if end <= start {
                    self.add(end_field, END_NOT_AFTER_START);
                }
            }
        }
        self
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self.0.keys().copied().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Client-side checks for a create/update payload.
pub trait Validate {
    fn validate(&self, today: NaiveDate) -> Result<(), ValidationErrors>;
}
