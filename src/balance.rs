//! Two-sided difference accumulator driving the decomposition.
//!
//! Side `s` of a [`BalanceSet`] holds the edges that are *outstanding for*
//! `s`: already covered by a cycle of the other permutation, not yet by a
//! cycle of `s`. Adding an edge to one side cancels it from the other side
//! if it is waiting there, so the two sides are always disjoint.

use bitvec::vec::BitVec;

use crate::{error::DessinError, pair::Side};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceSet {
    sides: [BitVec; 2],
    counts: [usize; 2],
}

impl BalanceSet {
    /// An empty balance over the edges `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        BalanceSet {
            sides: [BitVec::repeat(false, capacity), BitVec::repeat(false, capacity)],
            counts: [0, 0],
        }
    }

    pub fn capacity(&self) -> usize {
        self.sides[0].len()
    }

    /// Claims `edges` for `side`.
    ///
    /// An edge outstanding on the other side is cancelled there instead of
    /// being added. An edge already outstanding on `side` is a duplicate
    /// claim and aborts with [`DessinError::StateInconsistency`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::{balance::BalanceSet, pair::Side};
    /// let mut balance = BalanceSet::new(4);
    /// balance.add(Side::Beta, [0, 1, 2]).unwrap();
    /// balance.add(Side::Alpha, [0, 3]).unwrap();
    ///
    /// assert_eq!(balance.iter(Side::Beta).collect::<Vec<_>>(), vec![1, 2]);
    /// assert_eq!(balance.iter(Side::Alpha).collect::<Vec<_>>(), vec![3]);
    /// assert!(balance.add(Side::Beta, [2]).is_err());
    /// ```
    pub fn add<I>(&mut self, side: Side, edges: I) -> Result<(), DessinError>
    where
        I: IntoIterator<Item = usize>,
    {
        let (this, other) = (side.index(), side.other().index());
        for edge in edges {
            if edge >= self.capacity() {
                return Err(DessinError::Domain {
                    index: edge,
                    max: self.capacity(),
                });
            }
            if self.sides[this][edge] {
                return Err(DessinError::StateInconsistency(format!(
                    "edge {edge} claimed twice for side {side}"
                )));
            }
            if self.sides[other][edge] {
                self.sides[other].set(edge, false);
                self.counts[other] -= 1;
            } else {
                self.sides[this].set(edge, true);
                self.counts[this] += 1;
            }
        }
        Ok(())
    }

    pub fn contains(&self, side: Side, edge: usize) -> bool {
        self.sides[side.index()]
            .get(edge)
            .is_some_and(|bit| *bit)
    }

    /// Smallest edge outstanding for `side`.
    pub fn min(&self, side: Side) -> Option<usize> {
        if self.counts[side.index()] == 0 {
            return None;
        }
        self.sides[side.index()].first_one()
    }

    pub fn len(&self, side: Side) -> usize {
        self.counts[side.index()]
    }

    pub fn is_empty(&self, side: Side) -> bool {
        self.counts[side.index()] == 0
    }

    /// Nothing outstanding on either side.
    pub fn is_balanced(&self) -> bool {
        self.counts == [0, 0]
    }

    /// Outstanding edges of `side`, in increasing order.
    pub fn iter(&self, side: Side) -> impl Iterator<Item = usize> + '_ {
        self.sides[side.index()].iter_ones()
    }
}
