use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::algorithm::TieBreak;
use crate::network::{Device, DeviceId};
use crate::Error;

/// Device attribute compared when two routes cost the same
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TieBreakKey {
    /// Device name, lexicographic
    Name,
    /// Device IP address
    Address,
    /// Declaration order in the network file
    Listed,
}

/// Named tie-break rule over device attributes.
///
/// Parses from `name`, `address` (or `ip`) and `listed`, optionally suffixed
/// with `-desc` to prefer the larger value instead of the smaller one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TieBreakPolicy {
    pub key: TieBreakKey,
    pub descending: bool,
}

impl TieBreakPolicy {
    pub const fn ascending(key: TieBreakKey) -> Self {
        TieBreakPolicy {
            key,
            descending: false,
        }
    }

    pub const fn descending(key: TieBreakKey) -> Self {
        TieBreakPolicy {
            key,
            descending: true,
        }
    }

    /// Same key, opposite preference
    pub fn reversed(self) -> Self {
        TieBreakPolicy {
            key: self.key,
            descending: !self.descending,
        }
    }
}

impl Default for TieBreakPolicy {
    fn default() -> Self {
        TieBreakPolicy::ascending(TieBreakKey::Name)
    }
}

impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.key {
            TieBreakKey::Name => "name",
            TieBreakKey::Address => "address",
            TieBreakKey::Listed => "listed",
        };
        if self.descending {
            write!(f, "{}-desc", key)
        } else {
            f.write_str(key)
        }
    }
}

impl FromStr for TieBreakPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let (key, descending) = match normalized.strip_suffix("-desc") {
            Some(key) => (key, true),
            None => (normalized.strip_suffix("-asc").unwrap_or(normalized.as_str()), false),
        };

        let key = match key {
            "name" => TieBreakKey::Name,
            "address" | "ip" => TieBreakKey::Address,
            "listed" | "first" => TieBreakKey::Listed,
            _ => return Err(Error::InvalidTieBreak(s.to_string())),
        };
        Ok(TieBreakPolicy { key, descending })
    }
}

impl TryFrom<String> for TieBreakPolicy {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TieBreakPolicy> for String {
    fn from(policy: TieBreakPolicy) -> Self {
        policy.to_string()
    }
}

/// [`TieBreak`] over the devices of one network, driven by a policy
#[derive(Debug, Clone, Copy)]
pub struct DeviceTieBreak<'a> {
    devices: &'a [Device],
    policy: TieBreakPolicy,
}

impl<'a> DeviceTieBreak<'a> {
    pub fn new(devices: &'a [Device], policy: TieBreakPolicy) -> Self {
        DeviceTieBreak { devices, policy }
    }

    pub fn policy(&self) -> TieBreakPolicy {
        self.policy
    }
}

impl TieBreak<DeviceId> for DeviceTieBreak<'_> {
    fn compare(&self, a: &DeviceId, b: &DeviceId) -> Ordering {
        let (Some(left), Some(right)) = (self.devices.get(a.index()), self.devices.get(b.index()))
        else {
            return Ordering::Equal;
        };

        let ordering = match self.policy.key {
            TieBreakKey::Name => left.name.cmp(&right.name),
            TieBreakKey::Address => left.ip.cmp(&right.ip),
            TieBreakKey::Listed => a.cmp(b),
        };

        if self.policy.descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

/// Shortest path engine used for route computations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Marked/unmarked partition scan, O(V²)
    #[default]
    Marking,
    /// Binary heap, O((V + E) log V)
    Heap,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineKind::Marking => f.write_str("marking"),
            EngineKind::Heap => f.write_str("heap"),
        }
    }
}

impl FromStr for EngineKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "marking" | "dijkstra" => Ok(EngineKind::Marking),
            "heap" => Ok(EngineKind::Heap),
            _ => Err(Error::InvalidEngine(s.to_string())),
        }
    }
}
