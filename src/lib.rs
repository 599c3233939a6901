//! # Dessins
//!
//! Dessins is a Rust library for working with dessins d'enfants in their raw
//! form: a pair of permutations `(α, β)` acting on a common edge set `0..n`.
//!
//! It provides
//! - [`pair::PermutationPair`] and its product, which acts coordinatewise on the
//!   Cartesian product of the edge sets;
//! - [`decompose`], the split of a pair into irreducible components, produced
//!   lazily as a stream of cycles;
//! - [`canonical`], a relabelling of edges by first visit from a root, used to
//!   compare dessins up to renaming and to cut a component out as a pair of its own.
//!
//! ```
//! use dessins::pair::PermutationPair;
//!
//! // A 7-cycle and a transposition generate the full symmetric group, so the
//! // product with itself splits into the diagonal and everything else.
//! let a = PermutationPair::from_str62("1234560", "1023456").unwrap();
//! let aa = (&a * &a).unwrap();
//! assert_eq!(aa.component_degrees().unwrap(), vec![7, 42]);
//! assert!(aa.extract_component(0).unwrap().is_isomorphic(&a).unwrap());
//! ```

pub mod balance;
pub mod canonical;
pub mod decompose;
pub mod error;
pub mod pair;
pub mod permutation;
pub mod relabel;

pub use error::DessinError;
