//! # Permutation pairs
//!
//! A [`PermutationPair`] `(α, β)` is the raw data of a dessin: two
//! permutations acting on the same edge set `0..n`. Pairs are immutable;
//! every operation returns a new pair.
//!
//! The product of two pairs acts coordinatewise on the Cartesian product of
//! their edge sets, with edge `(i, j)` stored at `i * n + j` where `n` is the
//! size of the right factor.

use std::{fmt, ops::Mul};

use tracing::debug;

use crate::{
    error::DessinError,
    permutation::{encoding::perm_from_str62, Permutation},
};

/// Which of the two permutations of a pair is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub enum Side {
    Alpha,
    Beta,
}

impl Side {
    pub const fn other(self) -> Self {
        match self {
            Side::Alpha => Side::Beta,
            Side::Beta => Side::Alpha,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Side::Alpha => 0,
            Side::Beta => 1,
        }
    }

    /// Single letter tag, `a` or `b`.
    pub const fn tag(self) -> char {
        match self {
            Side::Alpha => 'a',
            Side::Beta => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Two permutations of the same size.
///
/// # Examples
///
/// ```
/// use dessins::{pair::PermutationPair, permutation::Permutation};
///
/// let pair = PermutationPair::from_maps(vec![1, 2, 0], vec![2, 0, 1]).unwrap();
/// assert_eq!(pair.len(), 3);
/// assert_eq!(pair.alpha(0), 1);
/// assert_eq!(pair.beta(0), 2);
///
/// let err = PermutationPair::new(Permutation::id(2), Permutation::id(3));
/// assert!(err.is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct PermutationPair {
    alpha: Permutation,
    beta: Permutation,
}

impl PermutationPair {
    pub fn new(alpha: Permutation, beta: Permutation) -> Result<Self, DessinError> {
        if alpha.len() != beta.len() {
            return Err(DessinError::ShapeMismatch {
                left: alpha.len(),
                right: beta.len(),
            });
        }
        Ok(PermutationPair { alpha, beta })
    }

    /// Validates both maps with [`is_permutation`](crate::permutation::is_permutation).
    pub fn from_maps(alpha: Vec<usize>, beta: Vec<usize>) -> Result<Self, DessinError> {
        if alpha.len() != beta.len() {
            return Err(DessinError::ShapeMismatch {
                left: alpha.len(),
                right: beta.len(),
            });
        }
        Self::new(
            Permutation::try_from_map(alpha)?,
            Permutation::try_from_map(beta)?,
        )
    }

    /// Builds a pair from two base-62 strings.
    ///
    /// ```
    /// # use dessins::pair::PermutationPair;
    /// let pair = PermutationPair::from_str62("120", "012").unwrap();
    /// assert_eq!(pair.alpha_perm().map(), &[1, 2, 0]);
    /// ```
    pub fn from_str62(alpha: &str, beta: &str) -> Result<Self, DessinError> {
        Self::new(perm_from_str62(alpha)?, perm_from_str62(beta)?)
    }

    /// The identity pair on `n` edges.
    pub fn id(n: usize) -> Self {
        PermutationPair {
            alpha: Permutation::id(n),
            beta: Permutation::id(n),
        }
    }

    /// Rebuilds a pair from a flat sequence `α(0), β(0), α(1), β(1), …`, the
    /// shape produced by a canonical walk.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::pair::PermutationPair;
    /// let pair = PermutationPair::from_interleaved([1, 2, 2, 0, 0, 1]).unwrap();
    /// assert_eq!(pair, PermutationPair::from_maps(vec![1, 2, 0], vec![2, 0, 1]).unwrap());
    /// assert!(PermutationPair::from_interleaved([0, 0, 0]).is_err());
    /// ```
    pub fn from_interleaved<I>(seq: I) -> Result<Self, DessinError>
    where
        I: IntoIterator<Item = usize>,
    {
        let seq = seq.into_iter().collect::<Vec<_>>();
        if seq.len() % 2 != 0 {
            return Err(DessinError::InvalidOperand(format!(
                "interleaved sequence of odd length {}",
                seq.len()
            )));
        }
        let (alpha, beta): (Vec<_>, Vec<_>) = seq.chunks_exact(2).map(|c| (c[0], c[1])).unzip();
        Self::from_maps(alpha, beta)
    }

    /// Number of edges.
    pub fn len(&self) -> usize {
        self.alpha.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alpha.is_empty()
    }

    pub fn alpha(&self, edge: usize) -> usize {
        self.alpha[edge]
    }

    pub fn beta(&self, edge: usize) -> usize {
        self.beta[edge]
    }

    pub fn alpha_perm(&self) -> &Permutation {
        &self.alpha
    }

    pub fn beta_perm(&self) -> &Permutation {
        &self.beta
    }

    pub fn perm(&self, side: Side) -> &Permutation {
        match side {
            Side::Alpha => &self.alpha,
            Side::Beta => &self.beta,
        }
    }

    /// Iterates `(α(e), β(e))` for `e = 0, 1, …`.
    pub fn iter_images(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.alpha
            .map()
            .iter()
            .copied()
            .zip(self.beta.map().iter().copied())
    }

    // --------------------------------------------------------------------------------------------
    // Products
    // --------------------------------------------------------------------------------------------

    /// Product of two pairs; the right factor's size is the radix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use dessins::pair::PermutationPair;
    /// let p = PermutationPair::from_maps(vec![1, 0], vec![0, 1]).unwrap();
    /// let q = PermutationPair::from_maps(vec![1, 2, 0], vec![0, 2, 1]).unwrap();
    /// let pq = p.product(&q).unwrap();
    /// assert_eq!(pq.len(), 6);
    /// // edge 4 = (1, 1): α sends it to (0, 2) = 2
    /// assert_eq!(pq.alpha(4), 2);
    /// assert_eq!(pq.beta(4), 5);
    /// ```
    pub fn product(&self, other: &Self) -> Result<Self, DessinError> {
        Self::product_all(&[self, other])
    }

    /// Product of any number of pairs, associating freely: the edge
    /// `(i_0, …, i_k)` is stored at `Σ i_j · r_j` with `r_j` the product of
    /// the sizes of the later factors.
    pub fn product_all(factors: &[&Self]) -> Result<Self, DessinError> {
        debug!(
            sizes = ?factors.iter().map(|p| p.len()).collect::<Vec<_>>(),
            "building product"
        );
        let alphas = factors.iter().map(|p| &p.alpha).collect::<Vec<_>>();
        let betas = factors.iter().map(|p| &p.beta).collect::<Vec<_>>();
        Self::new(
            Permutation::cartesian_product(&alphas)?,
            Permutation::cartesian_product(&betas)?,
        )
    }
}

impl Mul for &PermutationPair {
    type Output = Result<PermutationPair, DessinError>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.product(rhs)
    }
}

impl fmt::Display for PermutationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "α: {}, β: {}", self.alpha, self.beta)
    }
}
