//! # Permutations
//!
//! This module provides a `Permutation` struct and associated functionalities
//! for representing and working with permutations of a sequence of integers `0..n`.
//! Permutations are the raw material of a dessin: a
//! [`PermutationPair`](crate::pair::PermutationPair) is two of them acting on
//! the same edge set.
//!
//! ## Key Features:
//!
//! - **Representation**: A `Permutation` is stored by its direct mapping (`map[i]` is
//!   the image of `i`) and its inverse mapping.
//! - **Construction**:
//!   - Identity permutation: `Permutation::id(n)`.
//!   - From a mapping vector: `Permutation::from_map(vec![...])` (trusted) or
//!     `Permutation::try_from_map(vec![...])` (validated with [`is_permutation`]).
//!   - From disjoint cycles: `Permutation::from_disjoint_cycles(&[vec![...]])`.
//! - **Basic Operations**: `p.inverse()`, `p.compose(&q)`, `p.is_identity()`.
//! - **Cycle Utilities**:
//!   - The cycle through a point: `p.cycle(start)`.
//!   - Full cycle decomposition, lowest index first: `p.find_cycles()`.
//!   - Renumbering a family of cycles onto `0..k`: [`rebase_cycles`].
//! - **Products**: `Permutation::cartesian_product(&[&p, &q])` acts coordinatewise
//!   on the Cartesian product of the index sets.
//! - **Encoding**: base-62 and base-36 string codecs live in [`encoding`].

pub mod encoding;

use std::{fmt, ops::Index};

use itertools::Itertools;

use crate::error::DessinError;

/// Returns `true` if `seq` is a rearrangement of `0..seq.len()`.
///
/// # Examples
///
/// ```
/// # use dessins::permutation::is_permutation;
/// assert!(is_permutation(&[0, 1]) && is_permutation(&[1, 0]) && is_permutation(&[1, 2, 0]));
/// assert!(!is_permutation(&[1]) && !is_permutation(&[2, 0, 0]));
/// assert!(is_permutation(&[]));
/// ```
pub fn is_permutation(seq: &[usize]) -> bool {
    let mut seen = vec![false; seq.len()];
    for &i in seq {
        if i >= seq.len() || std::mem::replace(&mut seen[i], true) {
            return false;
        }
    }
    true
}

/// A permutation of `0..n`.
///
/// # Examples
///
/// ```
/// use dessins::permutation::Permutation;
///
/// // 0->2, 1->0, 2->1, 3->3
/// let p = Permutation::from_map(vec![2, 0, 1, 3]);
/// assert_eq!(p[0], 2);
/// assert_eq!(p.inv()[2], 0);
/// assert_eq!(p.find_cycles(), vec![vec![0, 2, 1], vec![3]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct Permutation {
    map: Vec<usize>,
    inv: Vec<usize>,
}

/// Implement ordering comparisons for permutations based on their `map` field.
impl PartialOrd for Permutation {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Permutation {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.map.cmp(&other.map)
    }
}

impl Permutation {
    // --------------------------------------------------------------------------------------------
    // Basic Constructors and Accessors
    // --------------------------------------------------------------------------------------------

    /// Creates the identity permutation of length `n`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::Permutation;
    /// let p = Permutation::id(4);
    /// assert!(p.is_identity());
    /// assert_eq!(p.len(), 4);
    /// ```
    pub fn id(n: usize) -> Self {
        Permutation {
            map: (0..n).collect(),
            inv: (0..n).collect(),
        }
    }

    /// Creates a permutation from a mapping vector.
    /// The `map` vector states where index `i` is sent: `map[i]` is the image of `i`.
    ///
    /// The mapping is trusted. Values outside `0..map.len()` panic, and repeated
    /// values produce a `Permutation` whose cycles never close; use
    /// [`Permutation::try_from_map`] for untrusted input.
    pub fn from_map(map: Vec<usize>) -> Self {
        let mut inv = vec![0; map.len()];
        for (i, &j) in map.iter().enumerate() {
            inv[j] = i;
        }
        Permutation { map, inv }
    }

    /// Validating version of [`Permutation::from_map`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::Permutation;
    /// assert!(Permutation::try_from_map(vec![1, 2, 0]).is_ok());
    /// assert!(Permutation::try_from_map(vec![1, 1]).is_err());
    /// ```
    pub fn try_from_map(map: Vec<usize>) -> Result<Self, DessinError> {
        if is_permutation(&map) {
            Ok(Self::from_map(map))
        } else {
            Err(DessinError::NotAPermutation(map))
        }
    }

    /// Returns the internal mapping as a slice.
    pub fn map(&self) -> &[usize] {
        &self.map
    }

    /// Returns the inverse mapping as a slice.
    pub fn inv(&self) -> &[usize] {
        &self.inv
    }

    /// Number of points acted upon.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    // --------------------------------------------------------------------------------------------
    // Basic Operations
    // --------------------------------------------------------------------------------------------

    /// Returns the inverse of the permutation.
    pub fn inverse(&self) -> Self {
        Permutation {
            map: self.inv.clone(),
            inv: self.map.clone(),
        }
    }

    /// Composition `self ∘ other`: applies `other` first, then `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::Permutation;
    /// let p = Permutation::from_map(vec![1, 2, 0]);
    /// let q = Permutation::from_map(vec![1, 0, 2]);
    /// // 0 -q-> 1 -p-> 2
    /// assert_eq!(p.compose(&q).map(), &[2, 1, 0]);
    /// assert!(p.compose(&p.inverse()).is_identity());
    /// ```
    pub fn compose(&self, other: &Self) -> Self {
        Self::from_map(other.map.iter().map(|&i| self.map[i]).collect())
    }

    /// Checks if this permutation is the identity permutation.
    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &m)| i == m)
    }

    // --------------------------------------------------------------------------------------------
    // Cycles
    // --------------------------------------------------------------------------------------------

    /// The cycle through `start`, listed from `start` onwards: `start, p(start), p(p(start)), …`.
    ///
    /// The walk gives up after `len()` steps, so a mapping that is not a
    /// permutation is reported instead of looping forever.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::Permutation;
    /// let p = Permutation::from_map(vec![1, 2, 0]);
    /// assert_eq!(p.cycle(0).unwrap(), vec![0, 1, 2]);
    /// assert_eq!(p.cycle(2).unwrap(), vec![2, 0, 1]);
    ///
    /// let broken = Permutation::from_map(vec![1, 1]);
    /// assert!(broken.cycle(0).is_err());
    /// ```
    pub fn cycle(&self, start: usize) -> Result<Vec<usize>, DessinError> {
        if start >= self.len() {
            return Err(DessinError::Domain {
                index: start,
                max: self.len(),
            });
        }
        let mut cycle = Vec::new();
        let mut current = start;
        for _ in 0..self.len() {
            cycle.push(current);
            current = self.map[current];
            if current == start {
                return Ok(cycle);
            }
        }
        Err(DessinError::NotAPermutation(self.map.clone()))
    }

    /// Returns the cycle decomposition of `self`, each cycle starting at its
    /// smallest element and the cycles ordered by that element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::{encoding::perm_from_str62, Permutation};
    /// let p = perm_from_str62("3214560").unwrap();
    /// assert_eq!(p.find_cycles(), vec![vec![0, 3, 4, 5, 6], vec![1, 2]]);
    /// ```
    pub fn find_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.map.len()];
        let mut cycles = Vec::new();
        for i in 0..self.map.len() {
            if visited[i] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut j = i;
            while !visited[j] {
                visited[j] = true;
                cycle.push(j);
                j = self.map[j];
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Creates a permutation from a set of disjoint cycles.
    /// The size is one more than the largest entry; points that appear in no
    /// cycle are fixed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::Permutation;
    /// let p = Permutation::from_disjoint_cycles(&[vec![3, 0, 1, 2]]).unwrap();
    /// assert_eq!(p.map(), &[1, 2, 3, 0]);
    ///
    /// // Error if cycles are not disjoint
    /// let invalid = vec![vec![0, 1], vec![1, 2]];
    /// assert!(Permutation::from_disjoint_cycles(&invalid).is_err());
    /// ```
    pub fn from_disjoint_cycles(cycles: &[Vec<usize>]) -> Result<Self, DessinError> {
        let n = cycles
            .iter()
            .flatten()
            .max()
            .map(|&max| max + 1)
            .unwrap_or(0);

        let mut seen = vec![false; n];
        for &idx in cycles.iter().flatten() {
            if std::mem::replace(&mut seen[idx], true) {
                return Err(DessinError::InvalidOperand(format!(
                    "{idx} appears in more than one cycle"
                )));
            }
        }

        let mut map = (0..n).collect::<Vec<_>>();
        for cycle in cycles {
            for (&from, &to) in cycle.iter().circular_tuple_windows() {
                map[from] = to;
            }
        }

        Ok(Permutation::from_map(map))
    }

    // --------------------------------------------------------------------------------------------
    // Cartesian products
    // --------------------------------------------------------------------------------------------

    /// Radix multipliers for the mixed-radix encoding of a product index set:
    /// the factor at position `k` is the product of the lengths of all later factors.
    ///
    /// Returns `None` on overflow.
    pub(crate) fn radices(lengths: &[usize]) -> Option<(Vec<usize>, usize)> {
        let mut radices = vec![0; lengths.len()];
        let mut prev = 1usize;
        for (radix, &len) in radices.iter_mut().zip(lengths).rev() {
            *radix = prev;
            prev = prev.checked_mul(len)?;
        }
        Some((radices, prev))
    }

    /// Componentwise action on the Cartesian product of the index sets.
    ///
    /// The product index `(i_0, …, i_k)` is encoded like a milometer reading,
    /// `Σ i_j · r_j` where `r_j` is the product of the lengths of the later
    /// factors, so the first factor varies slowest.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::permutation::{encoding::{perm_from_str62, str62_from_perm}, Permutation};
    /// let p = perm_from_str62("210").unwrap();
    /// let q = perm_from_str62("0123").unwrap();
    /// let pq = Permutation::cartesian_product(&[&p, &q]).unwrap();
    /// assert_eq!(str62_from_perm(&pq).unwrap(), "89ab45670123");
    /// ```
    pub fn cartesian_product(factors: &[&Permutation]) -> Result<Self, DessinError> {
        if factors.is_empty() {
            return Err(DessinError::InvalidOperand(
                "cartesian product of no factors".to_string(),
            ));
        }
        let lengths = factors.iter().map(|p| p.len()).collect::<Vec<_>>();
        let (radices, _) = Self::radices(&lengths).ok_or_else(|| {
            DessinError::InvalidOperand(format!("product of sizes {lengths:?} overflows"))
        })?;

        let map = factors
            .iter()
            .zip(&radices)
            .map(|(p, &r)| p.map.iter().map(move |&i| i * r))
            .multi_cartesian_product()
            .map(|terms| terms.into_iter().sum())
            .collect();

        Ok(Self::from_map(map))
    }
}

/// Renumbers the entries of `cycles` onto `0..k`, keeping their relative order.
///
/// # Examples
///
/// ```
/// # use dessins::permutation::rebase_cycles;
/// assert_eq!(rebase_cycles(&[vec![9, 3, 7], vec![4]]), vec![vec![3, 0, 2], vec![1]]);
/// ```
pub fn rebase_cycles(cycles: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let values = cycles.iter().flatten().copied().sorted().collect::<Vec<_>>();

    cycles
        .iter()
        .map(|cycle| {
            cycle
                .iter()
                .map(|i| values.partition_point(|v| v < i))
                .collect()
        })
        .collect()
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // First show cycle notation
        let mut first = true;
        for cycle in self.find_cycles() {
            if cycle.len() > 1 {
                // Only show non-trivial cycles
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "({})", cycle.iter().join(" "))?;
                first = false;
            }
        }
        if first {
            write!(f, "()")?;
        }

        // Then show one-line notation
        write!(f, " [{}]", self.map.iter().join(" "))
    }
}

impl Index<usize> for Permutation {
    type Output = usize;

    fn index(&self, index: usize) -> &Self::Output {
        &self.map[index]
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = DessinError;

    fn try_from(map: Vec<usize>) -> Result<Self, Self::Error> {
        Self::try_from_map(map)
    }
}

#[cfg(test)]
mod test;
