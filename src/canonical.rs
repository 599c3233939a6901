//! # Canonical relabelling
//!
//! A [`CanonicalWalk`] renumbers the edges reachable from a root by first
//! visit: the root becomes `0`, and the images `α(e), β(e)` of each edge, in
//! order of their new labels, are labelled as they are met. The walk emits
//! those new labels, two per edge, so its output is the interleaved
//! `α, β` table of the component of the root in canonical numbering.
//!
//! Two dessins that agree up to renaming produce identical walks from
//! corresponding roots. Minimising over roots gives a canonical form of a
//! component, which is what [`PermutationPair::is_isomorphic`] compares.

use ahash::RandomState;
use indexmap::IndexMap;
use itertools::Itertools;
use tracing::trace;

use crate::{error::DessinError, pair::PermutationPair, relabel::Relabel};

/// Lazy canonical relabelling of the component of `root`.
///
/// # Examples
///
/// ```
/// use dessins::{canonical::CanonicalWalk, pair::PermutationPair};
///
/// let pair = PermutationPair::from_str62("1439678502", "3145926087").unwrap();
/// let walk = CanonicalWalk::new(&pair, 4).unwrap();
/// assert_eq!(
///     walk.collect::<Vec<_>>(),
///     vec![1, 2, 3, 1, 4, 5, 6, 3, 7, 0, 8, 6, 9, 7, 2, 8, 5, 4, 0, 9]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CanonicalWalk<'a> {
    pair: &'a PermutationPair,
    relabel: Relabel,
    /// Next canonical label whose images are due.
    current: usize,
    /// β image of `current - 1`, emitted after its α image.
    pending: Option<usize>,
}

impl<'a> CanonicalWalk<'a> {
    pub fn new(pair: &'a PermutationPair, root: usize) -> Result<Self, DessinError> {
        let mut relabel = Relabel::new(pair.len());
        relabel.forward(root)?;
        Ok(CanonicalWalk {
            pair,
            relabel,
            current: 0,
            pending: None,
        })
    }

    pub fn relabel(&self) -> &Relabel {
        &self.relabel
    }

    /// The walk has emitted everything.
    pub fn is_finished(&self) -> bool {
        self.pending.is_none() && self.current == self.relabel.size()
    }

    /// Number of edges in the component of the root.
    ///
    /// Only known once the walk is exhausted; before that the frontier may
    /// still grow and [`DessinError::State`] is returned.
    pub fn degree(&self) -> Result<usize, DessinError> {
        if self.is_finished() {
            Ok(self.relabel.size())
        } else {
            Err(DessinError::State {
                expected: "finished walk",
                found: "walk in progress",
            })
        }
    }

    /// Drains the walk and repacks it as a pair on `0..degree`.
    pub fn into_pair(mut self) -> Result<PermutationPair, DessinError> {
        let seq = self.by_ref().collect::<Vec<_>>();
        PermutationPair::from_interleaved(seq)
    }
}

impl Iterator for CanonicalWalk<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if let Some(beta) = self.pending.take() {
            return Some(beta);
        }
        // Done once every labelled edge has been expanded.
        let old = self.relabel.backward(self.current).ok()?;
        self.current += 1;

        let new_alpha = self.relabel.forward_unchecked(self.pair.alpha(old));
        let new_beta = self.relabel.forward_unchecked(self.pair.beta(old));
        trace!(old, new_alpha, new_beta, "walked edge");
        self.pending = Some(new_beta);
        Some(new_alpha)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let pending = usize::from(self.pending.is_some());
        let known = 2 * (self.relabel.size() - self.current) + pending;
        let unknown = 2 * (self.pair.len() - self.relabel.size());
        (known, Some(known + unknown))
    }
}

impl std::iter::FusedIterator for CanonicalWalk<'_> {}

/// Canonical walk from `root`, collected.
///
/// ```
/// # use dessins::{canonical::canonicalize, pair::PermutationPair};
/// let pair = PermutationPair::from_str62("120", "201").unwrap();
/// assert_eq!(canonicalize(&pair, 0).unwrap(), vec![1, 2, 2, 0, 0, 1]);
/// ```
pub fn canonicalize(pair: &PermutationPair, root: usize) -> Result<Vec<usize>, DessinError> {
    Ok(CanonicalWalk::new(pair, root)?.collect())
}

/// Smallest canonical walk over the roots `roots`, which should lie in one component.
fn min_walk<I>(pair: &PermutationPair, roots: I) -> Result<Vec<usize>, DessinError>
where
    I: IntoIterator<Item = usize>,
{
    let mut best: Option<Vec<usize>> = None;
    for root in roots {
        let walk = canonicalize(pair, root)?;
        if best.as_ref().map_or(true, |b| walk < *b) {
            best = Some(walk);
        }
    }
    best.ok_or_else(|| DessinError::InvalidOperand("no roots to walk from".to_string()))
}

/// Canonical form of the component containing `root`: the smallest walk from any of its edges.
///
/// ```
/// # use dessins::{canonical::canonical_form, pair::PermutationPair};
/// let p = PermutationPair::from_str62("120", "012").unwrap();
/// let q = PermutationPair::from_str62("201", "012").unwrap();
/// assert_eq!(canonical_form(&p, 2).unwrap(), canonical_form(&q, 0).unwrap());
/// ```
pub fn canonical_form(pair: &PermutationPair, root: usize) -> Result<Vec<usize>, DessinError> {
    let mut walk = CanonicalWalk::new(pair, root)?;
    walk.by_ref().for_each(drop);
    let roots = walk.relabel().iter().map(|(_, old)| old).collect::<Vec<_>>();
    min_walk(pair, roots)
}

impl PermutationPair {
    /// The component reachable from `root`, renumbered canonically from `root`.
    ///
    /// ```
    /// # use dessins::pair::PermutationPair;
    /// let pair = PermutationPair::from_str62("1032", "0132").unwrap();
    /// let sub = pair.extract_component(3).unwrap();
    /// assert_eq!(sub, PermutationPair::from_str62("10", "10").unwrap());
    /// ```
    pub fn extract_component(&self, root: usize) -> Result<PermutationPair, DessinError> {
        CanonicalWalk::new(self, root)?.into_pair()
    }

    /// Canonical forms of all irreducible components, sorted.
    pub fn canonical_components(&self) -> Result<Vec<Vec<usize>>, DessinError> {
        let forms = self
            .components()
            .map(|component| min_walk(self, component?.edges()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(forms.into_iter().sorted().collect())
    }

    /// Equal up to renaming the edges.
    ///
    /// ```
    /// # use dessins::pair::PermutationPair;
    /// let p = PermutationPair::from_str62("1203", "0132").unwrap();
    /// let q = PermutationPair::from_str62("0231", "1023").unwrap();
    /// assert!(p.is_isomorphic(&q).unwrap());
    /// assert!(!p.is_isomorphic(&PermutationPair::id(4)).unwrap());
    /// ```
    pub fn is_isomorphic(&self, other: &Self) -> Result<bool, DessinError> {
        if self.len() != other.len() {
            return Ok(false);
        }
        Ok(self.canonical_components()? == other.canonical_components()?)
    }

    /// Groups the roots `0..len` by their canonical walk, in order of first appearance.
    ///
    /// Roots in one group are images of each other under an automorphism.
    pub fn root_classes(
        &self,
    ) -> Result<IndexMap<Vec<usize>, Vec<usize>, RandomState>, DessinError> {
        let mut classes: IndexMap<Vec<usize>, Vec<usize>, RandomState> = IndexMap::default();
        for root in 0..self.len() {
            classes
                .entry(canonicalize(self, root)?)
                .or_default()
                .push(root);
        }
        trace!(classes = classes.len(), "grouped roots");
        Ok(classes)
    }
}
