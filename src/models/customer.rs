use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::FormRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone_number: String,
}

impl Customer {
    /// Template used by the add-customer route
    pub fn blank() -> Self {
        Self::default()
    }
}

impl FormRecord for Customer {
    fn field_names() -> &'static [&'static str] {
        &["firstName", "lastName", "phoneNumber"]
    }

    fn field(&self, name: &str) -> Option<String> {
        match name {
            "firstName" => Some(self.first_name.clone()),
            "lastName" => Some(self.last_name.clone()),
            "phoneNumber" => Some(self.phone_number.clone()),
            _ => None,
        }
    }

    fn with_field(self, name: &str, value: &str) -> Result<Self, FormError> {
        let value = value.to_string();
        match name {
            "firstName" => Ok(Self {
                first_name: value,
                ..self
            }),
            "lastName" => Ok(Self {
                last_name: value,
                ..self
            }),
            "phoneNumber" => Ok(Self {
                phone_number: value,
                ..self
            }),
            _ => Err(FormError::UnknownField(name.to_string())),
        }
    }
}
