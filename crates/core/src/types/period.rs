//! Dashboard reporting period.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Look-back window used for revenue on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Interpret a `period` query value. Unknown values fall back to a month.
    #[must_use]
    pub fn from_query(value: &str) -> Self {
        match value {
            "week" => Self::Week,
            "quarter" => Self::Quarter,
            "year" => Self::Year,
            _ => Self::Month,
        }
    }

    /// Length of the window in days.
    #[must_use]
    pub const fn days(self) -> i64 {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    #[must_use]
    pub fn window(self) -> TimeDelta {
        TimeDelta::days(self.days())
    }
}
