use std::collections::VecDeque;
use std::fmt;

use crate::error::Error;
use crate::volcano::{ValveHandle, Volcano};

/// Hop counts from a handful of source valves to every valve in the graph. Only rows for the
/// sources are stored; the search never asks about paths starting at a zero-flow valve other than
/// the start.
#[derive(Clone)]
pub struct DistanceTable {
    cols: usize,
    row_for: Vec<Option<usize>>,
    data: Vec<Option<usize>>,
}

impl DistanceTable {
    /// Breadth-first search from each source. Since every tunnel costs one minute the first time
    /// a valve is discovered is also its shortest distance, so each valve is visited at most once
    /// per source.
    pub fn compute(volcano: &Volcano, sources: &[ValveHandle]) -> Self {
        let cols = volcano.len();
        let mut row_for = vec![None; cols];
        let mut data: Vec<Option<usize>> = Vec::new();

        let mut queue: VecDeque<(ValveHandle, usize)> = VecDeque::new();
        for &src in sources {
            if row_for[src.as_usize()].is_some() {
                continue;
            }
            let row = data.len() / cols;
            row_for[src.as_usize()] = Some(row);
            data.resize(data.len() + cols, None);
            let dist = &mut data[row * cols..];

            dist[src.as_usize()] = Some(0);
            queue.push_back((src, 0));
            while let Some((cur, d)) = queue.pop_front() {
                for adj in volcano.tunnels(cur) {
                    if dist[adj.as_usize()].is_none() {
                        dist[adj.as_usize()] = Some(d + 1);
                        queue.push_back((adj, d + 1));
                    }
                }
            }
        }
        DistanceTable { cols, row_for, data }
    }

    /// Distances from the start valve and from every valve worth opening.
    pub fn for_search(volcano: &Volcano) -> Self {
        let mut sources = vec![volcano.start()];
        sources.extend_from_slice(volcano.useful());
        Self::compute(volcano, &sources)
    }

    pub fn row(&self, src: ValveHandle) -> Option<&[Option<usize>]> {
        let row = self.row_for.get(src.as_usize()).copied().flatten()?;
        let start = row * self.cols;
        Some(&self.data[start..(start + self.cols)])
    }

    pub fn get(&self, src: ValveHandle, dst: ValveHandle) -> Option<usize> {
        self.row(src)?.get(dst.as_usize()).copied().flatten()
    }

    /// Every useful valve has to be reachable from the start, or the search's answers would be
    /// quietly wrong.
    pub fn check_reachable(&self, volcano: &Volcano) -> Result<(), Error> {
        let start = volcano.start();
        for &rh in volcano.useful() {
            if self.get(start, rh).is_none() {
                return Err(Error::Unreachable {
                    valve: volcano.name(rh).to_string(),
                    start: volcano.name(start).to_string(),
                });
            }
        }
        Ok(())
    }
}

impl fmt::Display for DistanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_for.iter().flatten() {
            let start = row * self.cols;
            for w in &self.data[start..(start + self.cols)] {
                match w {
                    Some(w) => write!(f, "{:>3}", w)?,
                    _ => write!(f, "{:>3}", "-")?,
                }
            }
            writeln!(f)?
        }
        Ok(())
    }
}
