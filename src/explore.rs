use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::distances::DistanceTable;
use crate::error::Error;
use crate::valve_set::ValveSet;
use crate::volcano::{ValveHandle, Volcano};

/// Best pressure released for each exact set of opened valves.
pub type Paths = HashMap<ValveSet, usize>;

#[derive(Clone, Copy, Debug)]
struct State {
    valve: ValveHandle,
    opened: ValveSet,
    minutes_left: usize,
    pressure: usize,
}

// Minutes left aren't part of the key: with the same valve, opened set and pressure, a state
// with less time left can't do anything a state with more time couldn't.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct StateKey {
    valve: ValveHandle,
    opened: ValveSet,
    pressure: usize,
}

impl State {
    fn key(&self) -> StateKey {
        StateKey { valve: self.valve, opened: self.opened, pressure: self.pressure }
    }
}

/// Breadth-first search over every order of opening useful valves, jumping straight from one
/// useful valve to the next along a shortest path. Every state reached is a valid place to stop,
/// so all of them count towards the result, not just the ones that run out of moves.
///
/// Fails with `Error::Overflow` if opening every valve at the very start could release more
/// pressure than fits in a `usize`.
pub fn explore(
    volcano: &Volcano,
    distances: &DistanceTable,
    minutes: usize,
) -> Result<Paths, Error> {
    explore_bounded(volcano, distances, minutes, None)
}

/// Upper bound on the pressure any state can reach: every useful valve open for every minute.
fn pressure_bound(volcano: &Volcano, minutes: usize) -> Option<usize> {
    volcano.useful().iter()
        .try_fold(0usize, |total, &rh| total.checked_add(volcano.valve(rh).flow_rate))?
        .checked_mul(minutes)
}

/// Same as `explore`, but give up with `Error::StateLimit` after processing `max_states` states.
pub fn explore_bounded(
    volcano: &Volcano,
    distances: &DistanceTable,
    minutes: usize,
    max_states: Option<usize>,
) -> Result<Paths, Error> {
    // Pressures in the search never exceed this, so the arithmetic below can't overflow.
    if pressure_bound(volcano, minutes).is_none() {
        return Err(Error::Overflow { minutes });
    }

    let start = State {
        valve: volcano.start(),
        opened: ValveSet::EMPTY,
        minutes_left: minutes,
        pressure: 0,
    };
    let mut paths: Paths = HashMap::new();
    paths.insert(ValveSet::EMPTY, 0);

    let mut queue: VecDeque<State> = VecDeque::new();
    let mut checked: HashSet<StateKey> = HashSet::new();
    queue.push_back(start);

    let mut nstates: usize = 0;
    while let Some(state) = queue.pop_front() {
        if state.minutes_left == 0 {
            continue;
        }
        if !checked.insert(state.key()) {
            continue;
        }
        nstates += 1;
        if let Some(limit) = max_states {
            if nstates > limit {
                return Err(Error::StateLimit { limit });
            }
        }

        let best = paths.entry(state.opened).or_insert(0);
        *best = (*best).max(state.pressure);

        for (bit, &target) in volcano.useful().iter().enumerate() {
            if state.opened.contains(bit) {
                continue;
            }
            let Some(dist) = distances.get(state.valve, target) else {
                panic!("no distance from {} to {}",
                    volcano.name(state.valve), volcano.name(target));
            };

            // One more minute to open the valve once we get there.
            let travel = dist + 1;
            if state.minutes_left <= travel {
                continue;
            }
            let minutes_left = state.minutes_left - travel;
            queue.push_back(State {
                valve: target,
                opened: state.opened.with(bit),
                minutes_left,
                pressure: state.pressure + volcano.valve(target).flow_rate * minutes_left,
            });
        }
    }
    debug!("explored minutes={minutes} nstates={nstates} opened_sets={}", paths.len());
    Ok(paths)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::volcano::test::EXAMPLE;
    use crate::volcano::ValveRecord;

    fn example() -> (Volcano, DistanceTable) {
        let volcano: Volcano = EXAMPLE.parse().unwrap();
        let distances = DistanceTable::for_search(&volcano);
        (volcano, distances)
    }

    fn set_of(volcano: &Volcano, names: &[&str]) -> ValveSet {
        names.iter()
            .map(|name| volcano.bit_for(volcano.handle(name).unwrap()).unwrap())
            .fold(ValveSet::EMPTY, |set, bit| set.with(bit))
    }

    #[test]
    fn test_no_time() {
        let (volcano, distances) = example();
        let paths = explore(&volcano, &distances, 0).unwrap();
        assert_eq!(paths, HashMap::from([(ValveSet::EMPTY, 0)]));
    }

    #[test]
    fn test_no_useful_valves() {
        let records = vec![
            ValveRecord::new("AA", 0, &["BB"]),
            ValveRecord::new("BB", 0, &["AA"]),
        ];
        let volcano = Volcano::new(records, "AA").unwrap();
        let distances = DistanceTable::for_search(&volcano);
        let paths = explore(&volcano, &distances, 30).unwrap();
        assert_eq!(paths, HashMap::from([(ValveSet::EMPTY, 0)]));
    }

    #[test]
    fn test_single_valve_pressure() {
        let (volcano, distances) = example();
        let minutes = 30;
        let start = volcano.start();
        for &rh in volcano.useful() {
            let bit = volcano.bit_for(rh).unwrap();
            let dist = distances.get(start, rh).unwrap();
            let want = volcano.valve(rh).flow_rate * (minutes - dist - 1);
            let paths = explore(&volcano, &distances, minutes).unwrap();
            assert_eq!(paths.get(&ValveSet::EMPTY.with(bit)), Some(&want), "{}", volcano.name(rh));
        }
    }

    #[test]
    fn test_too_far_to_open() {
        let (volcano, distances) = example();
        // HH is 5 steps from AA, so opening it takes 6 minutes and releases nothing with 6 left.
        let paths = explore(&volcano, &distances, 6).unwrap();
        assert_eq!(paths.get(&set_of(&volcano, &["HH"])), None);
        let paths = explore(&volcano, &distances, 7).unwrap();
        assert_eq!(paths.get(&set_of(&volcano, &["HH"])), Some(&22));
    }

    #[test]
    fn test_example_best() {
        let (volcano, distances) = example();
        let paths = explore(&volcano, &distances, 30).unwrap();
        assert_eq!(paths.values().max(), Some(&1651));
        let best = set_of(&volcano, &["BB", "CC", "DD", "EE", "HH", "JJ"]);
        assert_eq!(paths.get(&best), Some(&1651));
    }

    #[test]
    fn test_intermediate_states_recorded() {
        let (volcano, distances) = example();
        let paths = explore(&volcano, &distances, 30).unwrap();
        // Opening DD then BB then stopping: DD at minute 2 (28 left), BB at minute 5 (25 left).
        let dd_bb = set_of(&volcano, &["DD", "BB"]);
        assert!(paths[&dd_bb] >= 20 * 28 + 13 * 25);
    }

    #[test]
    fn test_idempotent() {
        let (volcano, distances) = example();
        let a = explore(&volcano, &distances, 26).unwrap();
        let b = explore(&volcano, &distances, 26).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_state_limit() {
        let (volcano, distances) = example();
        let err = explore_bounded(&volcano, &distances, 30, Some(10)).unwrap_err();
        assert!(matches!(err, Error::StateLimit { limit: 10 }));
        let paths = explore_bounded(&volcano, &distances, 30, Some(1_000_000)).unwrap();
        assert_eq!(paths, explore(&volcano, &distances, 30).unwrap());
    }

    #[test]
    fn test_overflow() {
        let records = vec![
            ValveRecord::new("AA", 0, &["BB"]),
            ValveRecord::new("BB", usize::MAX, &["AA"]),
        ];
        let volcano = Volcano::new(records, "AA").unwrap();
        let distances = DistanceTable::for_search(&volcano);
        let err = explore(&volcano, &distances, 30).unwrap_err();
        assert!(matches!(err, Error::Overflow { minutes: 30 }), "got {err:?}");
        // No time means nothing gets released, however big the flow rate.
        let paths = explore(&volcano, &distances, 0).unwrap();
        assert_eq!(paths, HashMap::from([(ValveSet::EMPTY, 0)]));

        let (volcano, distances) = example();
        let err = explore(&volcano, &distances, usize::MAX).unwrap_err();
        assert!(matches!(err, Error::Overflow { .. }), "got {err:?}");
    }
}
