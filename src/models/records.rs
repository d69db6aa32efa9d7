//! Records returned by the namespace list endpoints
//!
//! Shapes follow the dashboard backend's JSON responses.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Pod health classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Health {
    Healthy,
    Unhealthy,
    #[default]
    #[serde(other)]
    Unknown,
}

impl Health {
    pub fn as_str(&self) -> &'static str {
        match self {
            Health::Healthy => "healthy",
            Health::Unhealthy => "unhealthy",
            Health::Unknown => "unknown",
        }
    }
}

/// Row of `/api/health/{ns}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodHealth {
    pub name: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub health: Health,
    #[serde(default = "not_available")]
    pub cpu: String,
    #[serde(default = "not_available")]
    pub memory: String,
    #[serde(default)]
    pub restarts: u32,
    #[serde(default = "not_available")]
    pub age: String,
}

/// Row of `/api/images/{ns}` (and `/api/images`, which adds the namespace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub pod_name: String,
    pub image: String,
}

/// Row of `/api/events/{ns}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde(rename = "type", default = "unknown")]
    pub event_type: String,
    #[serde(default = "unknown")]
    pub reason: String,
    #[serde(default = "unknown")]
    pub object: String,
    #[serde(default)]
    pub message: String,
    #[serde(default = "one")]
    pub count: u32,
    #[serde(default = "not_available")]
    pub last_seen: String,
}

impl EventRecord {
    pub fn is_warning(&self) -> bool {
        self.event_type.eq_ignore_ascii_case("warning")
    }
}

/// Request/limit pair, "N/A" when unset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLimit {
    #[serde(default = "not_available")]
    pub request: String,
    #[serde(default = "not_available")]
    pub limit: String,
}

impl Default for RequestLimit {
    fn default() -> Self {
        Self {
            request: not_available(),
            limit: not_available(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PodResources {
    #[serde(default)]
    pub cpu: RequestLimit,
    #[serde(default)]
    pub memory: RequestLimit,
}

/// Container state inside `/api/pods/{ns}/{name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    #[serde(default)]
    pub ready: bool,
    #[serde(default)]
    pub restarts: u32,
    #[serde(default)]
    pub image: String,
    /// Running, Waiting or Terminated
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub exit_code: Option<i32>,
}

/// Response of `/api/pods/{ns}/{name}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PodDetails {
    pub name: String,
    pub namespace: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub health: Health,
    #[serde(default = "not_available")]
    pub age: String,
    #[serde(default = "not_available")]
    pub created: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default = "not_available")]
    pub node: String,
    #[serde(default = "not_available")]
    pub ip: String,
    #[serde(default)]
    pub resources: PodResources,
    #[serde(default)]
    pub containers: Vec<ContainerStatus>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub total_restarts: u32,
}

fn unknown() -> String {
    "Unknown".to_string()
}

fn not_available() -> String {
    "N/A".to_string()
}

fn one() -> u32 {
    1
}

/// Compact age string: days, else hours, else minutes ("3d", "5h", "12m")
pub fn format_age(age: Duration) -> String {
    let age = age.max(Duration::zero());
    if age.num_days() > 0 {
        format!("{}d", age.num_days())
    } else if age.num_hours() > 0 {
        format!("{}h", age.num_hours())
    } else {
        format!("{}m", age.num_minutes())
    }
}

/// Age of `timestamp` relative to `now`, "N/A" when unknown
pub fn age_since(timestamp: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match timestamp {
        Some(ts) => format_age(now - ts),
        None => not_available(),
    }
}
