//! Employee Model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::shift::{EmployeeStatus, Shift};
use crate::error::{DraftError, MappingError};

/// Password the backend assigns to every account created through
/// `add-user-account`. Shown to the operator, never sent by the client.
pub const DEFAULT_PASSWORD: &str = "123456";

/// Keys the backend has used for the display name, in lookup order
const NAME_KEYS: [&str; 3] = ["full_name", "fullName", "name"];

/// Employee record as held by the console
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    /// Unique login name. Shift and resign calls are addressed by it.
    pub username: String,
    pub full_name: String,
    pub age: Option<u32>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
    pub shift: Shift,
    pub status: EmployeeStatus,
    /// Raw base64 or an already-prefixed data URI
    pub avatar_base64: Option<String>,
}

impl Employee {
    /// Normalize a loosely-typed server record.
    ///
    /// - `id` may be a number or a numeric string
    /// - the display name is taken from `full_name`, `fullName` or `name`
    /// - unknown or missing `shift`/`status` become `day`/`working`
    pub fn from_remote(raw: &Value) -> Result<Self, MappingError> {
        let obj = raw.as_object().ok_or(MappingError::NotAnObject)?;

        let id = remote_id(obj)?;
        let username =
            str_field(obj, "username").ok_or(MappingError::MissingUsername { id })?;
        let full_name = NAME_KEYS
            .iter()
            .find_map(|key| str_field(obj, key))
            .unwrap_or_default();

        Ok(Self {
            id,
            username,
            full_name,
            age: obj.get("age").and_then(remote_age),
            address: str_field(obj, "address"),
            phone: str_field(obj, "phone"),
            gender: str_field(obj, "gender"),
            role: str_field(obj, "role"),
            shift: Shift::from_remote(obj.get("shift").and_then(Value::as_str)),
            status: EmployeeStatus::from_remote(obj.get("status").and_then(Value::as_str)),
            avatar_base64: str_field(obj, "avatar_base64"),
        })
    }

    /// Avatar as something an `<img src>` or terminal image viewer accepts.
    pub fn avatar_data_uri(&self) -> Option<String> {
        self.avatar_base64.as_deref().filter(|s| !s.is_empty()).map(|raw| {
            if raw.starts_with("data:image") {
                raw.to_string()
            } else {
                format!("data:image/png;base64,{raw}")
            }
        })
    }

    /// Case-insensitive substring match on display name or username.
    /// `needle` must already be lowercase.
    pub fn matches(&self, needle: &str) -> bool {
        self.full_name.to_lowercase().contains(needle)
            || self.username.to_lowercase().contains(needle)
    }
}

fn remote_id(obj: &Map<String, Value>) -> Result<i64, MappingError> {
    match obj.get("id") {
        None | Some(Value::Null) => Err(MappingError::MissingId),
        Some(Value::Number(n)) => n
            .as_i64()
            .filter(|id| *id >= 0)
            .ok_or_else(|| MappingError::InvalidId(n.to_string())),
        Some(Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id >= 0)
            .ok_or_else(|| MappingError::InvalidId(s.clone())),
        Some(other) => Err(MappingError::InvalidId(other.to_string())),
    }
}

fn remote_age(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn str_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Add-employee form buffer. Raw strings straight from the input fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeDraft {
    pub full_name: String,
    pub username: String,
    pub age: String,
    pub address: String,
    pub phone: String,
    pub shift: Shift,
}

impl EmployeeDraft {
    /// Check the draft before it is submitted.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.username.trim().is_empty() {
            return Err(DraftError::EmptyUsername);
        }
        let age = self.age.trim();
        if !age.is_empty() && age.parse::<u32>().is_err() {
            return Err(DraftError::InvalidAge(age.to_string()));
        }
        Ok(())
    }

    /// Ordered form fields for `add-user-account`. Every value is trimmed;
    /// blank optional fields are sent as empty strings.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("username", self.username.trim().to_string()),
            ("full_name", self.full_name.trim().to_string()),
            ("age", self.age.trim().to_string()),
            ("address", self.address.trim().to_string()),
            ("phone", self.phone.trim().to_string()),
            ("shift", self.shift.as_str().to_string()),
        ]
    }
}

/// JSON payload of the legacy `POST /employees` endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub full_name: String,
    pub username: String,
    pub password: String,
    pub age: u32,
    pub address: String,
    pub phone: String,
    pub shift: Shift,
}
