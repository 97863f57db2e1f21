//! Device network model on top of the graph and the shortest path engines.
//!
//! A [`Network`] is a list of devices (the routing vertices), the hosts
//! attached to them and directed weighted links between devices. Devices
//! are addressed in the graph by their [`DeviceId`] handle.

pub mod parser;
pub mod policy;

use std::collections::HashMap;
use std::fmt;
use std::net::IpAddr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::{routing_table, ShortestPathAlgorithm, ShortestPaths};
use crate::graph::{DirectedGraph, Graph, MutableGraph};
use crate::{Dijkstra, Error, HeapDijkstra, Result};

pub use policy::{DeviceTieBreak, EngineKind, TieBreakKey, TieBreakPolicy};

/// Handle of a device inside one [`Network`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeviceId(usize);

impl DeviceId {
    /// Declaration position of the device
    pub fn index(self) -> usize {
        self.0
    }
}

/// A routing device (router, switch, gateway)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub ip: IpAddr,
}

/// An end host attached to one device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub ip: IpAddr,
    /// Name of the device the host is plugged into
    pub device: String,
}

/// A directed link between two devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteSpec {
    pub from: String,
    pub to: String,
    pub weight: u32,
}

/// Minimum-cost route between two devices
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRoute {
    pub source: String,
    pub destination: String,
    /// Total link weight, `None` if the destination is unreachable
    pub cost: Option<u32>,
    /// Device names from source to destination, empty if unreachable
    pub hops: Vec<String>,
}

impl fmt::Display for DeviceRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.cost {
            Some(cost) => write!(
                f,
                "{} -> {}: cost {} via {}",
                self.source,
                self.destination,
                cost,
                self.hops.join(" > ")
            ),
            None => write!(f, "{} -> {}: unreachable", self.source, self.destination),
        }
    }
}

/// Every route from one source device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteReport {
    pub source: String,
    pub tie_break: TieBreakPolicy,
    /// One route per other device, in declaration order
    pub routes: Vec<DeviceRoute>,
}

impl RouteReport {
    pub fn route_to(&self, destination: &str) -> Option<&DeviceRoute> {
        self.routes
            .iter()
            .find(|route| route.destination == destination)
    }
}

/// Devices, hosts and the link graph between devices
#[derive(Debug, Clone, Default)]
pub struct Network {
    devices: Vec<Device>,
    hosts: Vec<Host>,
    by_name: HashMap<String, DeviceId>,
    graph: DirectedGraph<DeviceId, u32>,
}

impl Network {
    /// Creates an empty network
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a device. Names are unique.
    pub fn add_device(&mut self, device: Device) -> Result<DeviceId> {
        if self.by_name.contains_key(&device.name) {
            return Err(Error::DuplicateDevice(device.name));
        }

        let id = DeviceId(self.devices.len());
        if !self.graph.add_vertex(id) {
            return Err(Error::AllocationFailure);
        }
        self.by_name.insert(device.name.clone(), id);
        self.devices.push(device);
        Ok(id)
    }

    /// Attaches a host to an already declared device
    pub fn add_host(&mut self, host: Host) -> Result<()> {
        if !self.by_name.contains_key(&host.device) {
            return Err(Error::UnknownDevice(host.device));
        }
        self.hosts.push(host);
        Ok(())
    }

    /// Adds the directed link `from -> to`, overwriting the weight of an
    /// existing one.
    pub fn add_link(&mut self, from: &str, to: &str, weight: u32) -> Result<()> {
        let from_id = self.require_device(from)?;
        let to_id = self.require_device(to)?;

        if let Some(previous) = self.graph.edge_weight(&from_id, &to_id) {
            warn!(
                "link {} -> {} declared again, weight {} replaced by {}",
                from, to, previous, weight
            );
        }
        self.graph
            .try_add_edge(&from_id, &to_id, weight)
            .map_err(|err| match err {
                Error::SelfLoop(_) => Error::SelfLoop(from.to_string()),
                other => other,
            })
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    pub fn device(&self, id: DeviceId) -> Option<&Device> {
        self.devices.get(id.0)
    }

    pub fn device_id(&self, name: &str) -> Option<DeviceId> {
        self.by_name.get(name).copied()
    }

    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.iter().find(|host| host.name == name)
    }

    /// Link graph keyed by device handle
    pub fn graph(&self) -> &DirectedGraph<DeviceId, u32> {
        &self.graph
    }

    /// Every link, grouped by source device in declaration order
    pub fn links(&self) -> Vec<RouteSpec> {
        self.graph
            .edges()
            .map(|(from, to, weight)| RouteSpec {
                from: self.device_name(*from).to_string(),
                to: self.device_name(*to).to_string(),
                weight,
            })
            .collect()
    }

    /// Tie-break over this network's devices
    pub fn tie_break(&self, policy: TieBreakPolicy) -> DeviceTieBreak<'_> {
        DeviceTieBreak::new(&self.devices, policy)
    }

    /// Raw shortest path result set from `source`
    pub fn shortest_paths(
        &self,
        source: &str,
        policy: TieBreakPolicy,
        engine: EngineKind,
    ) -> Result<ShortestPaths<DeviceId, u32>> {
        let source_id = self.require_device(source)?;
        debug!(
            "routing from {} with {} engine, tie-break {}",
            source, engine, policy
        );

        let tie_break = self.tie_break(policy);
        match engine {
            EngineKind::Marking => {
                Dijkstra::with_tie_break(tie_break).compute_shortest_paths(&self.graph, &source_id)
            }
            EngineKind::Heap => HeapDijkstra::with_tie_break(tie_break)
                .compute_shortest_paths(&self.graph, &source_id),
        }
    }

    /// Routes from `source` to every other device, using the marking engine
    pub fn routes_from(&self, source: &str, policy: TieBreakPolicy) -> Result<RouteReport> {
        self.routes_from_with(source, policy, EngineKind::Marking)
    }

    /// Routes from `source` to every other device with the chosen engine
    pub fn routes_from_with(
        &self,
        source: &str,
        policy: TieBreakPolicy,
        engine: EngineKind,
    ) -> Result<RouteReport> {
        let paths = self.shortest_paths(source, policy, engine)?;
        Ok(self.report(&paths, policy))
    }

    /// Route between the devices two hosts are attached to
    pub fn host_route(
        &self,
        from_host: &str,
        to_host: &str,
        policy: TieBreakPolicy,
    ) -> Result<DeviceRoute> {
        let from = self
            .host(from_host)
            .ok_or_else(|| Error::UnknownHost(from_host.to_string()))?;
        let to = self
            .host(to_host)
            .ok_or_else(|| Error::UnknownHost(to_host.to_string()))?;

        let paths = self.shortest_paths(&from.device, policy, EngineKind::Marking)?;
        let destination = self.require_device(&to.device)?;
        Ok(self.device_route(&paths, destination))
    }

    /// Route reports from every device, computed in parallel
    pub fn routing_table(&self, policy: TieBreakPolicy) -> Result<Vec<RouteReport>> {
        let engine = Dijkstra::with_tie_break(self.tie_break(policy));
        let tables: Vec<ShortestPaths<DeviceId, u32>> =
            routing_table::all_sources(&engine, &self.graph)?;
        Ok(tables
            .iter()
            .map(|paths| self.report(paths, policy))
            .collect())
    }

    fn report(&self, paths: &ShortestPaths<DeviceId, u32>, policy: TieBreakPolicy) -> RouteReport {
        let source = *paths.source();
        let routes = self
            .graph
            .vertices()
            .into_iter()
            .filter(|&id| id != source)
            .map(|id| self.device_route(paths, id))
            .collect();

        RouteReport {
            source: self.device_name(source).to_string(),
            tie_break: policy,
            routes,
        }
    }

    fn device_route(&self, paths: &ShortestPaths<DeviceId, u32>, destination: DeviceId) -> DeviceRoute {
        let (cost, hops) = match paths.route_to(&destination) {
            Some(path) => (
                Some(path.total_weight),
                path.vertices
                    .iter()
                    .map(|&id| self.device_name(id).to_string())
                    .collect(),
            ),
            None => (None, Vec::new()),
        };

        DeviceRoute {
            source: self.device_name(*paths.source()).to_string(),
            destination: self.device_name(destination).to_string(),
            cost,
            hops,
        }
    }

    fn device_name(&self, id: DeviceId) -> &str {
        self.devices
            .get(id.0)
            .map(|device| device.name.as_str())
            .unwrap_or("?")
    }

    fn require_device(&self, name: &str) -> Result<DeviceId> {
        self.device_id(name)
            .ok_or_else(|| Error::UnknownDevice(name.to_string()))
    }
}
