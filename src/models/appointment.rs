use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::customer::Customer;
use crate::models::FormRecord;

/// Appointment as edited by the appointment form and posted to the salon API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub customer: Option<u64>,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub stylist: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub starts_at: Option<i64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

impl Appointment {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn blank_for_customer(customer_id: u64) -> Self {
        Self {
            customer: Some(customer_id),
            ..Self::default()
        }
    }
}

fn parse_optional<T: std::str::FromStr>(name: &str, value: &str) -> Result<Option<T>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| FormError::InvalidValue {
            field: name.to_string(),
            value: value.to_string(),
        })
}

impl FormRecord for Appointment {
    fn field_names() -> &'static [&'static str] {
        &["service", "stylist", "startsAt", "notes"]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "service" => Some(self.service.clone()),
            "stylist" => Some(self.stylist.clone()),
            "startsAt" => Some(self.starts_at.map(|t| t.to_string()).unwrap_or_default()),
            "notes" => Some(self.notes.clone()),
            "customer" => Some(self.customer.map(|c| c.to_string()).unwrap_or_default()),
            _ => None,
        }
    }

    fn with_field(self, name: &str, value: &str) -> Result<Self, FormError> {
        match name {
            "service" => Ok(Self {
                service: value.to_string(),
                ..self
            }),
            "stylist" => Ok(Self {
                stylist: value.to_string(),
                ..self
            }),
            "startsAt" => Ok(Self {
                starts_at: parse_optional(name, value)?,
                ..self
            }),
            "notes" => Ok(Self {
                notes: value.to_string(),
                ..self
            }),
            "customer" => Ok(Self {
                customer: parse_optional(name, value)?,
                ..self
            }),
            _ => Err(FormError::UnknownField(name.to_string())),
        }
    }
}

/// A bookable start time and the stylists free at that time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableTimeSlot {
    pub starts_at: i64,
    #[serde(default)]
    pub stylists: Vec<String>,
}

/// Appointment as listed in the day view, with the customer embedded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledAppointment {
    pub starts_at: i64,
    pub customer: Customer,
    #[serde(default)]
    pub stylist: String,
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub notes: String,
}
