//! Service status dashboard check
//!
//! The status service answers `GET /status` with a map of service name to
//! `{"status": "online" | "offline", ...}`, optionally with a `system` block
//! of host metrics.

use std::fmt;
use std::time::Duration;

use colored::Colorize;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::error::{Result, WishlistError};
use crate::store::{build_agent, read_body};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Online,
    Offline,
    Checking,
    Unknown,
}

impl ServiceState {
    fn parse(value: &str) -> Self {
        match value {
            "online" => ServiceState::Online,
            "offline" => ServiceState::Offline,
            "checking" => ServiceState::Checking,
            _ => ServiceState::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ServiceState::Online => "Online",
            ServiceState::Offline => "Offline",
            ServiceState::Checking => "Checking...",
            ServiceState::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.label();
        let colored = match self {
            ServiceState::Online => label.green(),
            ServiceState::Offline => label.red(),
            ServiceState::Checking => label.yellow(),
            ServiceState::Unknown => label.dimmed(),
        };
        write!(f, "{}", colored)
    }
}

/// Parsed response of the status service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatusSnapshot {
    services: Map<String, Value>,
    system: Option<Map<String, Value>>,
}

impl StatusSnapshot {
    pub fn from_json(body: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(body)?;
        let Value::Object(mut services) = value else {
            return Err(WishlistError::ApiError {
                status: 200,
                detail: "status response is not an object".into(),
            });
        };
        let system = match services.remove("system") {
            Some(Value::Object(system)) => Some(system),
            _ => None,
        };
        Ok(Self { services, system })
    }

    /// Every service name the response mentions, sorted
    pub fn service_names(&self) -> Vec<String> {
        self.services.keys().cloned().collect()
    }

    fn state_of(&self, name: &str) -> ServiceState {
        self.services
            .get(name)
            .and_then(|entry| entry.get("status"))
            .and_then(Value::as_str)
            .map(ServiceState::parse)
            .unwrap_or(ServiceState::Offline)
    }

    /// Host metrics as display lines, `key: value`
    pub fn system_lines(&self) -> Vec<(String, String)> {
        let Some(system) = &self.system else {
            return Vec::new();
        };
        system
            .iter()
            .map(|(key, value)| {
                let shown = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (key.clone(), shown)
            })
            .collect()
    }
}

/// One row of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    pub name: String,
    pub state: ServiceState,
}

/// Fetch the status document; the whole call is bounded by `timeout`
pub fn fetch_status(url: &str, timeout: Duration) -> Result<StatusSnapshot> {
    debug!(url, "checking service status");
    let agent = build_agent(timeout);
    let mut response = agent.get(url).call()?;
    let status = response.status();
    let body = read_body(&mut response)?;
    if !status.is_success() {
        return Err(WishlistError::ApiError {
            status: status.as_u16(),
            detail: "status service returned an error".into(),
        });
    }
    StatusSnapshot::from_json(&body)
}

/// Resolve each named service against a snapshot
///
/// With no snapshot (the check failed) every service is offline. A service
/// absent from the response is offline. With no names configured, every
/// service in the response is listed.
pub fn resolve(snapshot: Option<&StatusSnapshot>, names: &[String]) -> Vec<ServiceStatus> {
    let names: Vec<String> = match (names.is_empty(), snapshot) {
        (true, Some(snapshot)) => snapshot.service_names(),
        _ => names.to_vec(),
    };
    names
        .into_iter()
        .map(|name| {
            let state = snapshot.map_or(ServiceState::Offline, |s| s.state_of(&name));
            ServiceStatus { name, state }
        })
        .collect()
}

/// Run one full check: fetch, then resolve, logging a failed fetch
pub fn check(url: &str, timeout: Duration, names: &[String]) -> (Vec<ServiceStatus>, Option<StatusSnapshot>) {
    match fetch_status(url, timeout) {
        Ok(snapshot) => (resolve(Some(&snapshot), names), Some(snapshot)),
        Err(e) => {
            error!(error = %e, "failed to fetch service statuses");
            (resolve(None, names), None)
        }
    }
}
