//! Effective ordering: the sequence next/previous actually traverse

use crate::shuffle::shuffle_order;

/// Natural order, or the seeded shuffle permutation
///
/// A slot is a position in the effective ordering; an index is a position in
/// the context's natural order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EffectiveOrder {
    Natural { len: usize },
    Shuffled { slots: Vec<usize> },
}

impl EffectiveOrder {
    pub(crate) fn new(len: usize, is_shuffling: bool, seed: u64) -> Self {
        if is_shuffling {
            Self::Shuffled {
                slots: shuffle_order(len, seed),
            }
        } else {
            Self::Natural { len }
        }
    }

    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Natural { len } => *len,
            Self::Shuffled { slots } => slots.len(),
        }
    }

    /// Context index at `slot`
    pub(crate) fn index_at(&self, slot: usize) -> usize {
        match self {
            Self::Natural { .. } => slot,
            Self::Shuffled { slots } => slots[slot],
        }
    }

    /// Slot holding context index `index`
    pub(crate) fn slot_of(&self, index: usize) -> usize {
        match self {
            Self::Natural { .. } => index,
            Self::Shuffled { slots } => slots
                .iter()
                .position(|&i| i == index)
                .unwrap_or(index),
        }
    }

    pub(crate) fn first(&self) -> usize {
        self.index_at(0)
    }

    pub(crate) fn last(&self) -> usize {
        self.index_at(self.len() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_is_identity() {
        let order = EffectiveOrder::new(4, false, 99);
        assert_eq!(order.len(), 4);
        for i in 0..4 {
            assert_eq!(order.index_at(i), i);
            assert_eq!(order.slot_of(i), i);
        }
        assert_eq!(order.first(), 0);
        assert_eq!(order.last(), 3);
    }

    #[test]
    fn shuffled_slot_and_index_are_inverse() {
        let order = EffectiveOrder::new(12, true, 7);
        for slot in 0..order.len() {
            assert_eq!(order.slot_of(order.index_at(slot)), slot);
        }
    }
}
