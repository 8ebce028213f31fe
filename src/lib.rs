//! Maximum pressure that can be released from a network of valves and tunnels in a fixed number
//! of minutes, either alone or together with a helper who needs some time to get set up.
//!
//! Moving through a tunnel takes a minute and so does opening a valve. An opened valve releases
//! its flow rate in pressure for every remaining minute.

use std::io::Read;

use log::info;

pub mod distances;
pub mod error;
pub mod explore;
pub mod pairs;
pub mod valve_set;
pub mod volcano;

pub use distances::DistanceTable;
pub use error::{Error, ParseError};
pub use explore::{explore, explore_bounded, Paths};
pub use pairs::best_disjoint_pair;
pub use valve_set::ValveSet;
pub use volcano::{Valve, ValveHandle, ValveRecord, Volcano};

pub const MINUTES: usize = 30;
pub const HELPER_SETUP_MINUTES: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    pub start: String,
    pub minutes: usize,
    /// Minutes spent teaching the helper, taken off the budget in part 2.
    pub helper_setup_minutes: usize,
    pub max_states: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            start: volcano::DEFAULT_START.to_string(),
            minutes: MINUTES,
            helper_setup_minutes: HELPER_SETUP_MINUTES,
            max_states: None,
        }
    }
}

impl SolverConfig {
    pub fn helper_minutes(&self) -> usize {
        self.minutes.saturating_sub(self.helper_setup_minutes)
    }
}

fn search(volcano: &Volcano, minutes: usize, max_states: Option<usize>) -> Result<Paths, Error> {
    let distances = DistanceTable::for_search(volcano);
    distances.check_reachable(volcano)?;
    explore_bounded(volcano, &distances, minutes, max_states)
}

/// Most pressure a single agent can release.
pub fn max_pressure(volcano: &Volcano, config: &SolverConfig) -> Result<usize, Error> {
    let paths = search(volcano, config.minutes, config.max_states)?;
    let Some((&opened, &best)) = paths.iter().max_by_key(|(_, &p)| p) else {
        return Ok(0);
    };
    let opened = volcano.opened_names(opened);
    info!("alone for {} minutes: {best} by opening {opened:?}", config.minutes);
    Ok(best)
}

/// Most pressure two agents can release together, after the helper's setup time.
pub fn max_pressure_with_helper(volcano: &Volcano, config: &SolverConfig) -> Result<usize, Error> {
    let minutes = config.helper_minutes();
    let paths = search(volcano, minutes, config.max_states)?;
    let best = best_disjoint_pair(&paths);
    info!("with helper for {minutes} minutes: {best} from {} opened sets", paths.len());
    Ok(best)
}

pub fn part1(r: impl Read, config: &SolverConfig) -> Result<usize, Error> {
    let input = std::io::read_to_string(r)?;
    let volcano = Volcano::parse(&input, &config.start)?;
    max_pressure(&volcano, config)
}

pub fn part2(r: impl Read, config: &SolverConfig) -> Result<usize, Error> {
    let input = std::io::read_to_string(r)?;
    let volcano = Volcano::parse(&input, &config.start)?;
    max_pressure_with_helper(&volcano, config)
}
