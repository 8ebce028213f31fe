use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::error::{Error, ParseError};
use crate::valve_set::ValveSet;

pub const DEFAULT_START: &str = "AA";

// eg: Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
//     Valve HH has flow rate=22; tunnel leads to valve GG
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^Valve (\S+) has flow rate=([^;]*); tunnels? leads? to valves?(?: (.*))?$"#).unwrap()
});

/// One decoded line of input, before neighbor names have been checked against the rest of the
/// graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValveRecord {
    pub name: String,
    pub flow_rate: usize,
    pub tunnels: Vec<String>,
}

impl ValveRecord {
    pub fn new(name: &str, flow_rate: usize, tunnels: &[&str]) -> Self {
        ValveRecord {
            name: name.to_string(),
            flow_rate,
            tunnels: tunnels.iter().map(|s| s.to_string()).collect(),
        }
    }
}

fn is_valve_name(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_uppercase())
}

impl FromStr for ValveRecord {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_end();
        let Some(caps) = LINE_RE.captures(line) else {
            return Err(ParseError::UnexpectedFormat(line.to_string()));
        };

        let name = &caps[1];
        if !is_valve_name(name) {
            return Err(ParseError::InvalidName(name.to_string()));
        }

        let rate = &caps[2];
        let flow_rate: usize = rate.parse()
            .map_err(|_| ParseError::InvalidFlowRate(rate.to_string()))?;

        let adjacent = caps.get(3).map(|m| m.as_str().trim()).unwrap_or("");
        if adjacent.is_empty() {
            return Err(ParseError::NoTunnels(name.to_string()));
        }
        let tunnels = adjacent.split(',')
            .map(str::trim)
            .map(|dst| if is_valve_name(dst) {
                Ok(dst.to_string())
            } else {
                Err(ParseError::InvalidNeighbor(dst.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ValveRecord { name: name.to_string(), flow_rate, tunnels })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValveHandle(usize);

impl ValveHandle {
    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Debug for ValveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Valve {
    pub name: String,
    pub flow_rate: usize,
    pub tunnels: Vec<ValveHandle>,
}

/// The validated tunnel graph. Valves are indexed in declaration order, and the valves with a
/// non-zero flow rate additionally get a bit in a `ValveSet`, also in declaration order.
#[derive(Debug)]
pub struct Volcano {
    valves: Vec<Valve>,
    handle_for: HashMap<String, ValveHandle>,
    start: ValveHandle,
    useful: Vec<ValveHandle>,
    bit_for: Vec<Option<usize>>,
}

impl Volcano {
    pub fn new(records: Vec<ValveRecord>, start: &str) -> Result<Self, Error> {
        let mut handle_for: HashMap<String, ValveHandle> = HashMap::new();
        for (i, record) in records.iter().enumerate() {
            if handle_for.insert(record.name.clone(), ValveHandle(i)).is_some() {
                return Err(Error::DuplicateValve(record.name.clone()));
            }
        }

        let mut valves = Vec::with_capacity(records.len());
        for record in records {
            let mut tunnels = Vec::with_capacity(record.tunnels.len());
            for dst in &record.tunnels {
                let Some(&rh) = handle_for.get(dst) else {
                    return Err(Error::UnknownNeighbor {
                        valve: record.name.clone(),
                        neighbor: dst.clone(),
                    });
                };
                tunnels.push(rh);
            }
            valves.push(Valve { name: record.name, flow_rate: record.flow_rate, tunnels });
        }

        // Tunnels go both ways, so every tunnel has to be listed by the valves at both ends.
        for (i, valve) in valves.iter().enumerate() {
            for &dst in &valve.tunnels {
                if !valves[dst.as_usize()].tunnels.contains(&ValveHandle(i)) {
                    return Err(Error::OneWayTunnel {
                        valve: valve.name.clone(),
                        neighbor: valves[dst.as_usize()].name.clone(),
                    });
                }
            }
        }

        let Some(&start_rh) = handle_for.get(start) else {
            return Err(Error::StartNotFound(start.to_string()));
        };

        let useful: Vec<ValveHandle> = (0..valves.len())
            .filter(|&i| valves[i].flow_rate > 0)
            .map(ValveHandle)
            .collect();
        if useful.len() > ValveSet::CAPACITY {
            return Err(Error::TooManyUsefulValves {
                count: useful.len(),
                max: ValveSet::CAPACITY,
            });
        }
        let mut bit_for = vec![None; valves.len()];
        for (bit, rh) in useful.iter().enumerate() {
            bit_for[rh.as_usize()] = Some(bit);
        }

        Ok(Volcano { valves, handle_for, start: start_rh, useful, bit_for })
    }

    pub fn parse(input: &str, start: &str) -> Result<Self, Error> {
        let mut records = Vec::new();
        for (i, line) in input.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record = line.parse::<ValveRecord>()
                .map_err(|source| Error::Parse { line: i + 1, source })?;
            records.push(record);
        }
        Volcano::new(records, start)
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn start(&self) -> ValveHandle {
        self.start
    }

    pub fn handle(&self, name: &str) -> Option<ValveHandle> {
        self.handle_for.get(name).copied()
    }

    pub fn valve(&self, rh: ValveHandle) -> &Valve {
        &self.valves[rh.as_usize()]
    }

    pub fn name(&self, rh: ValveHandle) -> &str {
        &self.valve(rh).name
    }

    /// Valves with a non-zero flow rate, in bit order.
    pub fn useful(&self) -> &[ValveHandle] {
        &self.useful
    }

    pub fn bit_for(&self, rh: ValveHandle) -> Option<usize> {
        self.bit_for[rh.as_usize()]
    }

    pub fn tunnels(&self, rh: ValveHandle) -> impl Iterator<Item=ValveHandle> + '_ {
        self.valve(rh).tunnels.iter().copied()
    }

    pub fn flow(&self, name: &str) -> Option<usize> {
        self.handle(name).map(|rh| self.valve(rh).flow_rate)
    }

    pub fn tunnel_names(&self, name: &str) -> Vec<&str> {
        let Some(src) = self.handle(name) else {
            return Vec::new();
        };
        self.tunnels(src).map(|rh| self.name(rh)).collect()
    }

    pub fn opened_names(&self, opened: ValveSet) -> Vec<&str> {
        opened.iter()
            .filter_map(|bit| self.useful.get(bit))
            .map(|&rh| self.name(rh))
            .collect()
    }
}

impl FromStr for Volcano {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Volcano::parse(s, DEFAULT_START)
    }
}
