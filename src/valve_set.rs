use std::fmt;

/// Set of opened useful valves. Bit `i` stands for the valve that was given index `i` when the
/// graph was built.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ValveSet(u64);

impl ValveSet {
    pub const EMPTY: ValveSet = ValveSet(0);
    pub const CAPACITY: usize = u64::BITS as usize;

    pub fn from_bits(bits: u64) -> Self {
        ValveSet(bits)
    }

    pub fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, bit: usize) -> bool {
        self.0 & (1 << bit) != 0
    }

    pub fn with(self, bit: usize) -> Self {
        ValveSet(self.0 | (1 << bit))
    }

    pub fn is_disjoint(self, other: ValveSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(self) -> impl Iterator<Item=usize> {
        (0..Self::CAPACITY).filter(move |&bit| self.contains(bit))
    }
}

impl fmt::Debug for ValveSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#b}", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_with_and_contains() {
        let set = ValveSet::EMPTY.with(0).with(5);
        assert!(set.contains(0));
        assert!(set.contains(5));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert!(ValveSet::EMPTY.is_empty());
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 5]);
    }

    #[test]
    fn test_disjoint() {
        let a = ValveSet::from_bits(0b0101);
        let b = ValveSet::from_bits(0b1010);
        assert!(a.is_disjoint(b));
        assert!(!a.is_disjoint(a.with(1)));
        assert!(ValveSet::EMPTY.is_disjoint(ValveSet::EMPTY));
    }

    #[test]
    fn test_top_bit() {
        let set = ValveSet::EMPTY.with(ValveSet::CAPACITY - 1);
        assert!(set.contains(63));
        assert_eq!(set.bits(), 1 << 63);
    }
}
