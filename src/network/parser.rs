//! Reader for the sectioned network description format:
//!
//! ```text
//! [host]
//! pc1,192.168.0.10,R1
//! [device]
//! R1,10.0.0.1
//! R2,10.0.0.2
//! [route]
//! R1->R2,4
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Hosts may be listed
//! before the devices they attach to; they are checked once the whole input
//! has been read.

use std::io::Read;
use std::net::IpAddr;
use std::str::FromStr;

use log::debug;

use crate::network::{Device, Host, Network, RouteSpec};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Host,
    Device,
    Route,
}

impl Section {
    fn from_header(header: &str) -> Option<Self> {
        match header.to_ascii_lowercase().as_str() {
            "[host]" => Some(Section::Host),
            "[device]" => Some(Section::Device),
            "[route]" => Some(Section::Route),
            _ => None,
        }
    }
}

/// Parses a whole network description
pub fn parse_network(input: &str) -> Result<Network> {
    let mut network = Network::new();
    let mut hosts = Vec::new();
    let mut section = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.starts_with('[') {
            section = Some(Section::from_header(line).ok_or_else(|| Error::Parse {
                line: line_no,
                message: format!("unknown section {}", line),
            })?);
            debug!("line {}: entering section {}", line_no, line);
            continue;
        }

        match section {
            None => {
                return Err(Error::Parse {
                    line: line_no,
                    message: "entry before any section header".to_string(),
                })
            }
            Some(Section::Host) => hosts.push(parse_host(line, line_no)?),
            Some(Section::Device) => {
                network.add_device(parse_device(line, line_no)?)?;
            }
            Some(Section::Route) => {
                let route = parse_route(line, line_no)?;
                network.add_link(&route.from, &route.to, route.weight)?;
            }
        }
    }

    for host in hosts {
        network.add_host(host)?;
    }

    debug!(
        "parsed network: {} devices, {} hosts, {} links",
        network.devices().len(),
        network.hosts().len(),
        network.graph().edges().count()
    );
    Ok(network)
}

/// `name,ip,device`
pub fn parse_host(line: &str, line_no: usize) -> Result<Host> {
    let fields = split_fields(line, 3, line_no, "host")?;
    Ok(Host {
        name: fields[0].to_string(),
        ip: parse_ip(fields[1], line_no)?,
        device: fields[2].to_string(),
    })
}

/// `name,ip`
pub fn parse_device(line: &str, line_no: usize) -> Result<Device> {
    let fields = split_fields(line, 2, line_no, "device")?;
    Ok(Device {
        name: fields[0].to_string(),
        ip: parse_ip(fields[1], line_no)?,
    })
}

/// `from->to,weight`
pub fn parse_route(line: &str, line_no: usize) -> Result<RouteSpec> {
    let malformed = || Error::Parse {
        line: line_no,
        message: format!("expected 'from->to,weight', got '{}'", line),
    };

    let (from, rest) = line.split_once("->").ok_or_else(malformed)?;
    let (to, weight) = rest.rsplit_once(',').ok_or_else(malformed)?;
    let (from, to, weight) = (from.trim(), to.trim(), weight.trim());
    if from.is_empty() || to.is_empty() {
        return Err(malformed());
    }

    let weight = weight.parse::<u32>().map_err(|err| Error::Parse {
        line: line_no,
        message: format!("invalid weight '{}': {}", weight, err),
    })?;

    Ok(RouteSpec {
        from: from.to_string(),
        to: to.to_string(),
        weight,
    })
}

fn split_fields<'a>(
    line: &'a str,
    expected: usize,
    line_no: usize,
    kind: &str,
) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != expected || fields.iter().any(|field| field.is_empty()) {
        return Err(Error::Parse {
            line: line_no,
            message: format!("{} entry needs {} fields, got '{}'", kind, expected, line),
        });
    }
    Ok(fields)
}

fn parse_ip(field: &str, line_no: usize) -> Result<IpAddr> {
    field.parse().map_err(|_| Error::Parse {
        line: line_no,
        message: format!("invalid IP address '{}'", field),
    })
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse_network(s)
    }
}

impl Network {
    /// Reads and parses a network description from any reader
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        parse_network(&input)
    }
}
