//! Form fields and validation into a [`GenerationRequest`].

use chrono::NaiveDate;
use thiserror::Error;

use crate::constants::{DEFAULT_DURATION_MINUTES, DEFAULT_SUNRISE_TITLE, DEFAULT_SUNSET_TITLE};
use crate::generate::GenerationRequest;
use crate::location::CoordinateFields;

/// Problems caught before anything is sent. The message is what the user sees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Select at least one: sunrise and/or sunset.")]
    NothingIncluded,

    #[error("Please fill latitude, longitude, start date, and end date.")]
    MissingFields,

    #[error("Invalid {field}: '{value}'")]
    Invalid { field: &'static str, value: String },

    #[error("End date must be on or after start date.")]
    EndBeforeStart,
}

impl ValidationError {
    /// The inclusion problem is shown next to the checkboxes, everything else
    /// in the form status.
    pub fn is_inline(&self) -> bool {
        matches!(self, ValidationError::NothingIncluded)
    }
}

/// Raw form input, as typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    pub include_sunrise: bool,
    pub include_sunset: bool,
    pub sunrise_title: String,
    pub sunset_title: String,
}

impl Default for FormFields {
    fn default() -> Self {
        FormFields {
            start_date: String::new(),
            end_date: String::new(),
            duration: DEFAULT_DURATION_MINUTES.to_string(),
            include_sunrise: true,
            include_sunset: true,
            sunrise_title: String::new(),
            sunset_title: String::new(),
        }
    }
}

impl FormFields {
    pub fn check_included(&self) -> Result<(), ValidationError> {
        if self.include_sunrise || self.include_sunset {
            Ok(())
        } else {
            Err(ValidationError::NothingIncluded)
        }
    }

    /// Validate the form together with the coordinate fields.
    pub fn validate(
        &self,
        coordinates: &CoordinateFields,
    ) -> Result<GenerationRequest, ValidationError> {
        self.check_included()?;

        let lat = coordinates.latitude.trim();
        let lon = coordinates.longitude.trim();
        let start = self.start_date.trim();
        let end = self.end_date.trim();

        if lat.is_empty() || lon.is_empty() || start.is_empty() || end.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        let request = GenerationRequest {
            lat: parse_number("latitude", lat)?,
            lon: parse_number("longitude", lon)?,
            start_date: parse_date("start date", start)?,
            end_date: parse_date("end date", end)?,
            duration: self
                .duration
                .trim()
                .parse()
                .map_err(|_| invalid("duration", &self.duration))?,
            include_sunrise: self.include_sunrise,
            include_sunset: self.include_sunset,
            sunrise_title: title_or(&self.sunrise_title, DEFAULT_SUNRISE_TITLE),
            sunset_title: title_or(&self.sunset_title, DEFAULT_SUNSET_TITLE),
        };

        if request.end_date < request.start_date {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(request)
    }
}

fn invalid(field: &'static str, value: &str) -> ValidationError {
    ValidationError::Invalid {
        field,
        value: value.to_string(),
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, ValidationError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(field, value))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| invalid(field, value))
}

fn title_or(title: &str, default: &str) -> String {
    if title.is_empty() {
        default.to_string()
    } else {
        title.to_string()
    }
}
