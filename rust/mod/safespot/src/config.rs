use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::provider::Coordinate;
use crate::state::{Region, Span};

/// How overlapping sign-in attempts resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RacePolicy {
    /// Outcomes of attempts superseded by a newer submission are dropped.
    #[default]
    LatestIssued,
    /// Every outcome is applied in completion order; the last callback to
    /// finish wins even if it belongs to an older attempt.
    LastCompleted,
}

impl fmt::Display for RacePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RacePolicy::LatestIssued => "latest-issued",
            RacePolicy::LastCompleted => "last-completed",
        })
    }
}

impl FromStr for RacePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest-issued" => Ok(RacePolicy::LatestIssued),
            "last-completed" => Ok(RacePolicy::LastCompleted),
            other => Err(format!(
                "unknown race policy '{other}' (expected latest-issued or last-completed)"
            )),
        }
    }
}

/// Region shown before any search: downtown San Francisco.
pub const DEFAULT_REGION: Region = Region {
    center: Coordinate::new(37.7749, -122.4194),
    span: Span {
        latitude_delta: 0.05,
        longitude_delta: 0.05,
    },
};

/// Core configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// redb file for profile fields. In-memory storage when `None`.
    pub db_path: Option<PathBuf>,
    /// Locale for user-facing messages.
    pub locale: String,
    pub race_policy: RacePolicy,
    pub default_region: Region,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            locale: "en".to_string(),
            race_policy: RacePolicy::default(),
            default_region: DEFAULT_REGION,
        }
    }
}
