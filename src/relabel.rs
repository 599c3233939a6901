//! Incremental relabelling tables.
//!
//! A [`Relabel`] hands out new labels `0, 1, 2, …` to old labels in the order
//! they are first presented, and remembers the assignment in both directions.
//! It is the bookkeeping behind the canonical walk.

use tracing::trace;

use crate::{error::DessinError, permutation::Permutation};

/// A partial relabelling of `0..max_size`, built up one label at a time.
///
/// # Examples
///
/// ```
/// use dessins::relabel::Relabel;
///
/// let mut relabel = Relabel::new(10);
///
/// // New labels are created in numeric order.
/// let new_labels = [7, 4, 6, 1, 0].map(|old| relabel.forward(old).unwrap());
/// assert_eq!(new_labels, [0, 1, 2, 3, 4]);
///
/// // We can find the original labels.
/// let old_labels = new_labels.map(|new| relabel.backward(new).unwrap());
/// assert_eq!(old_labels, [7, 4, 6, 1, 0]);
///
/// // The table is dynamic: label 5 does not exist yet, until it does.
/// assert!(relabel.backward(5).is_err());
/// assert_eq!(relabel.forward(9).unwrap(), 5);
/// assert_eq!(relabel.backward(5).unwrap(), 9);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relabel {
    size: usize,
    // `forward[old] == 0` means unassigned, except for the one old label that really got 0.
    zero_origin: Option<usize>,
    forward: Vec<usize>,
    backward: Vec<usize>,
}

impl Relabel {
    pub fn new(max_size: usize) -> Self {
        Relabel {
            size: 0,
            zero_origin: None,
            forward: vec![0; max_size],
            backward: vec![0; max_size],
        }
    }

    /// Number of labels assigned so far.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn max_size(&self) -> usize {
        self.forward.len()
    }

    /// Every old label has been assigned a new one.
    pub fn is_complete(&self) -> bool {
        self.size == self.max_size()
    }

    /// The new label of `old`, assigning the next unused one on first sight.
    ///
    /// Repeated calls with the same `old` return the same label.
    pub fn forward(&mut self, old: usize) -> Result<usize, DessinError> {
        if old >= self.max_size() {
            return Err(DessinError::Domain {
                index: old,
                max: self.max_size(),
            });
        }
        Ok(self.forward_unchecked(old))
    }

    /// As [`Relabel::forward`], panicking when `old >= max_size`.
    pub(crate) fn forward_unchecked(&mut self, old: usize) -> usize {
        let value = self.forward[old];
        if value != 0 || self.zero_origin == Some(old) {
            return value;
        }

        let new = self.size;
        self.forward[old] = new;
        self.backward[new] = old;
        if new == 0 {
            self.zero_origin = Some(old);
        }
        self.size += 1;
        trace!(old, new, "assigned label");
        new
    }

    /// The old label that was given `new`, if `new` has been handed out.
    pub fn backward(&self, new: usize) -> Result<usize, DessinError> {
        if new < self.size {
            Ok(self.backward[new])
        } else {
            Err(DessinError::Range {
                index: new,
                size: self.size,
            })
        }
    }

    /// Looks up the new label of `old` without assigning one.
    ///
    /// ```
    /// # use dessins::relabel::Relabel;
    /// let mut relabel = Relabel::new(3);
    /// assert_eq!(relabel.get(2), None);
    /// relabel.forward(2).unwrap();
    /// assert_eq!(relabel.get(2), Some(0));
    /// assert_eq!(relabel.get(0), None);
    /// ```
    pub fn get(&self, old: usize) -> Option<usize> {
        let value = *self.forward.get(old)?;
        (value != 0 || self.zero_origin == Some(old)).then_some(value)
    }

    /// Assigned `(new, old)` pairs in order of assignment.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.backward[..self.size].iter().copied().enumerate()
    }

    /// The completed table as the permutation `old -> new`.
    pub fn into_permutation(self) -> Result<Permutation, DessinError> {
        if !self.is_complete() {
            return Err(DessinError::State {
                expected: "complete relabelling",
                found: "partial relabelling",
            });
        }
        Ok(Permutation::from_map(self.forward))
    }
}
