use crate::explore::Paths;
use crate::valve_set::ValveSet;

/// Best combined pressure of two agents that never open the same valve: the max of `a + b` over
/// pairs of entries with disjoint opened sets. One agent staying idle is always allowed, so the
/// answer is never less than the best single entry. Sums too big for a `usize` saturate.
pub fn best_disjoint_pair(paths: &Paths) -> usize {
    let mut entries: Vec<(ValveSet, usize)> = paths.iter().map(|(&set, &p)| (set, p)).collect();
    // Sort by pressure, descending.
    entries.sort_by(|(_, a), (_, b)| b.cmp(a));

    let mut best = entries.first().map(|&(_, p)| p).unwrap_or(0);
    for (i, &(set_a, a)) in entries.iter().enumerate() {
        // best >= a always holds, since best starts at the largest entry.
        // Nothing after this can beat the best, since b <= a for every later entry.
        if a <= best - a {
            break;
        }
        for &(set_b, b) in &entries[i + 1..] {
            if b <= best - a {
                break;
            }
            if set_a.is_disjoint(set_b) {
                best = a.saturating_add(b);
                break;
            }
        }
    }
    best
}
