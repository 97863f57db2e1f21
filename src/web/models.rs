use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::network::{Device, DeviceRoute, EngineKind, Host, Network, RouteSpec, TieBreakPolicy};

/// Body of a network upload
#[derive(Debug, Deserialize)]
pub struct NetworkRequest {
    /// Network description in the `[host]` / `[device]` / `[route]` format
    pub description: String,
}

/// Parameters for a route computation from one device.
///
/// `tie_break` and `engine` stay raw strings so that bad values are reported
/// as `invalid_parameter` by the handler instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct RoutesRequest {
    pub source: String,
    #[serde(default)]
    pub tie_break: Option<String>,
    #[serde(default)]
    pub engine: Option<String>,
}

/// Parameters for a route between two hosts
#[derive(Debug, Deserialize)]
pub struct HostRouteRequest {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub tie_break: Option<String>,
}

/// Response containing route computation results
#[derive(Debug, Clone, Serialize)]
pub struct RoutesResponse {
    pub execution_id: Uuid,
    pub source: String,
    pub tie_break: TieBreakPolicy,
    pub engine: EngineKind,
    pub execution_time_ms: f64,
    pub routes: Vec<DeviceRoute>,
}

/// Error response for API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Uploaded network as returned to clients
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub devices: Vec<Device>,
    pub hosts: Vec<Host>,
    pub links: Vec<RouteSpec>,
}

/// Short listing entry for `/api/sessions`
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub device_count: usize,
    pub host_count: usize,
    pub link_count: usize,
}

/// Session containing a parsed network and its last route computation
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub network: Network,
    pub last_result: Option<RoutesResponse>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(network: Network) -> Self {
        Self {
            id: Uuid::new_v4(),
            network,
            last_result: None,
            created_at: Utc::now(),
        }
    }

    pub fn view(&self) -> NetworkSession {
        NetworkSession {
            id: self.id,
            created_at: self.created_at,
            devices: self.network.devices().to_vec(),
            hosts: self.network.hosts().to_vec(),
            links: self.network.links(),
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            created_at: self.created_at,
            device_count: self.network.devices().len(),
            host_count: self.network.hosts().len(),
            link_count: self.network.links().len(),
        }
    }
}
