//! Shift and employment status enums

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Work schedule assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    #[default]
    Day,
    Night,
}

impl Shift {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }

    /// The other shift. `day` becomes `night` and vice versa.
    pub fn toggled(self) -> Self {
        match self {
            Self::Day => Self::Night,
            Self::Night => Self::Day,
        }
    }

    /// Lenient parse for server payloads: anything unrecognised is `Day`.
    pub fn from_remote(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    /// Table label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day => "Day",
            Self::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            other => Err(format!("unknown shift: {other}")),
        }
    }
}

/// Employment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    #[default]
    Working,
    Resigned,
    Absent,
    /// Soft "resigned" marker written by the resign endpoint
    Off,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::Resigned => "resigned",
            Self::Absent => "absent",
            Self::Off => "off",
        }
    }

    /// Lenient parse for server payloads: anything unrecognised is `Working`.
    pub fn from_remote(raw: Option<&str>) -> Self {
        raw.and_then(|s| s.parse().ok()).unwrap_or_default()
    }

    pub fn is_working(&self) -> bool {
        matches!(self, Self::Working)
    }

    /// Table label. Everything but `working` reads as having left.
    pub fn label(&self) -> &'static str {
        if self.is_working() { "Working" } else { "Left" }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmployeeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "working" => Ok(Self::Working),
            "resigned" => Ok(Self::Resigned),
            "absent" => Ok(Self::Absent),
            "off" => Ok(Self::Off),
            other => Err(format!("unknown status: {other}")),
        }
    }
}
