use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk band shown on both demo results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Spanish label used on the site.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Medium => "Medio",
            Self::High => "Alto",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole-number percentage, always within `0..=100`.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Percentage(u8);

impl Percentage {
    pub fn clamped(value: u32) -> Self {
        Self(value.min(100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
