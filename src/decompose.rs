//! # Irreducible decomposition
//!
//! Splits a [`PermutationPair`] into its irreducible components: the maximal
//! sets of edges closed under following α-cycles and β-cycles.
//!
//! A [`Decomposer`] walks the pair one cycle at a time, alternating between
//! the two permutations until every edge covered by an α-cycle of the
//! current component is also covered by one of its β-cycles, and the other
//! way round. The outstanding edges of each side live in a [`BalanceSet`].
//!
//! The walk is pull-driven. It can be consumed
//! - cycle by cycle, through [`Decomposer::next_component`] and
//!   [`Decomposer::next_cycle`],
//! - as a flat stream of [`Event`]s, through [`Events`],
//! - or one grouped [`Component`] at a time, through [`Components`].
//!
//! Stopping early costs nothing: no work is done for components that are never
//! pulled.
//!
//! ```
//! use dessins::{decompose::Event, pair::{PermutationPair, Side}};
//!
//! let pair = PermutationPair::from_maps(vec![1, 2, 0], vec![0, 1, 2]).unwrap();
//! let events = pair.events().collect::<Result<Vec<_>, _>>().unwrap();
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::Start(0),
//!         Event::Cycle(Side::Alpha, vec![0, 1, 2]),
//!         Event::Cycle(Side::Beta, vec![0]),
//!         Event::Cycle(Side::Beta, vec![1]),
//!         Event::Cycle(Side::Beta, vec![2]),
//!         Event::End(0),
//!     ]
//! );
//! ```

use std::fmt;

use bitvec::vec::BitVec;
use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    balance::BalanceSet,
    error::DessinError,
    pair::{PermutationPair, Side},
    permutation::Permutation,
};

/// One record of the decomposition stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub enum Event {
    /// The component with this index begins.
    Start(usize),
    /// A full cycle of one side, listed from the edge that triggered the walk.
    Cycle(Side, Vec<usize>),
    /// The component with this index is complete.
    End(usize),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Start(i) => write!(f, "S{i}"),
            Event::Cycle(side, cycle) => write!(f, "{side}({})", cycle.iter().join(" ")),
            Event::End(i) => write!(f, "E{i}"),
        }
    }
}

/// A component announced by [`Decomposer::next_component`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentStart {
    /// Components are numbered `0, 1, …` in discovery order.
    pub index: usize,
    /// The lowest unseen edge, whose α-cycle opens the component.
    pub seed: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Between components: the next one may be requested.
    Component,
    /// Inside a component: cycles are pending until both sides balance.
    Cycle,
}

impl Mode {
    const fn name(self) -> &'static str {
        match self {
            Mode::Component => "component",
            Mode::Cycle => "cycle",
        }
    }
}

/// Resumable decomposition state over one pair.
///
/// Owns its seen-marks and balance; nothing is shared between runs.
///
/// # Examples
///
/// ```
/// # use dessins::{decompose::Decomposer, pair::{PermutationPair, Side}};
/// let pair = PermutationPair::id(1);
/// let mut decomposer = Decomposer::new(&pair);
///
/// let start = decomposer.next_component().unwrap().unwrap();
/// assert_eq!((start.index, start.seed), (0, 0));
///
/// // A new component may not start before this one is finished.
/// assert!(decomposer.next_component().is_err());
///
/// assert_eq!(decomposer.next_cycle().unwrap(), Some((Side::Alpha, vec![0])));
/// assert_eq!(decomposer.next_cycle().unwrap(), Some((Side::Beta, vec![0])));
/// assert_eq!(decomposer.next_cycle().unwrap(), None);
/// assert_eq!(decomposer.next_component().unwrap(), None);
/// ```
#[derive(Debug, Clone)]
pub struct Decomposer<'a> {
    pair: &'a PermutationPair,
    seen: BitVec,
    mode: Mode,
    balance: BalanceSet,
    seed: Option<usize>,
    components: usize,
}

impl<'a> Decomposer<'a> {
    pub fn new(pair: &'a PermutationPair) -> Self {
        Decomposer {
            pair,
            seen: BitVec::repeat(false, pair.len()),
            mode: Mode::Component,
            balance: BalanceSet::new(pair.len()),
            seed: None,
            components: 0,
        }
    }

    /// Number of components started so far.
    pub fn component_count(&self) -> usize {
        self.components
    }

    /// Edges covered by some cycle walked so far.
    pub fn seen(&self) -> &BitVec {
        &self.seen
    }

    /// Seeds the next component at the lowest unseen edge, or returns `None`
    /// once every edge has been covered.
    ///
    /// Fails with [`DessinError::State`] while a component is still open.
    pub fn next_component(&mut self) -> Result<Option<ComponentStart>, DessinError> {
        self.expect_mode(Mode::Component)?;

        let Some(seed) = self.seen.first_zero() else {
            return Ok(None);
        };

        let start = ComponentStart {
            index: self.components,
            seed,
        };
        debug!(component = start.index, seed, "starting component");
        self.components += 1;
        self.seed = Some(seed);
        self.mode = Mode::Cycle;
        Ok(Some(start))
    }

    /// Walks the next cycle of the open component, or closes it and returns
    /// `None` once both sides of the balance are empty.
    ///
    /// Priority: the pending seed (α), then the smallest edge outstanding for
    /// α, then the smallest edge outstanding for β.
    ///
    /// Fails with [`DessinError::State`] when no component is open.
    pub fn next_cycle(&mut self) -> Result<Option<(Side, Vec<usize>)>, DessinError> {
        self.expect_mode(Mode::Cycle)?;

        let next = if let Some(seed) = self.seed.take() {
            Some((Side::Alpha, seed))
        } else if let Some(edge) = self.balance.min(Side::Alpha) {
            Some((Side::Alpha, edge))
        } else {
            self.balance.min(Side::Beta).map(|edge| (Side::Beta, edge))
        };

        match next {
            Some((side, edge)) => {
                let cycle = self.walk(side, edge)?;
                Ok(Some((side, cycle)))
            }
            None => {
                self.close()?;
                Ok(None)
            }
        }
    }

    /// Walks the `side` cycle through `edge`, marking it seen and moving its
    /// edges across the balance.
    fn walk(&mut self, side: Side, edge: usize) -> Result<Vec<usize>, DessinError> {
        let cycle = walk_seen_cycle(self.pair.perm(side), edge, &mut self.seen)?;
        trace!(%side, edge, len = cycle.len(), "walked cycle");
        self.balance.add(side.other(), cycle.iter().copied())?;
        Ok(cycle)
    }

    fn close(&mut self) -> Result<(), DessinError> {
        if !self.balance.is_balanced() {
            return Err(DessinError::StateInconsistency(format!(
                "component {} closed with {} α and {} β edges outstanding",
                self.components - 1,
                self.balance.len(Side::Alpha),
                self.balance.len(Side::Beta),
            )));
        }
        debug!(component = self.components - 1, "component complete");
        self.mode = Mode::Component;
        Ok(())
    }

    fn expect_mode(&self, expected: Mode) -> Result<(), DessinError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(DessinError::State {
                expected: expected.name(),
                found: self.mode.name(),
            })
        }
    }
}

/// The cycle of `perm` through `start`, listed from `start`, marking every
/// visited edge in `seen`.
///
/// A walk that does not return to `start` within `perm.len()` steps means
/// `perm` is not a permutation.
fn walk_seen_cycle(
    perm: &Permutation,
    start: usize,
    seen: &mut BitVec,
) -> Result<Vec<usize>, DessinError> {
    let mut cycle = Vec::new();
    let mut current = start;
    for _ in 0..perm.len() {
        seen.set(current, true);
        cycle.push(current);
        current = perm[current];
        if current == start {
            return Ok(cycle);
        }
    }
    Err(DessinError::StateInconsistency(format!(
        "cycle through {start} does not close, not a permutation"
    )))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Between,
    Inside(usize),
    Done,
}

/// Flat event stream over a decomposition.
///
/// Yields `Start(i)`, the cycles of component `i`, then `End(i)`, for each
/// component in turn. After an error the stream is fused.
#[derive(Debug, Clone)]
pub struct Events<'a> {
    decomposer: Decomposer<'a>,
    phase: Phase,
}

impl<'a> Events<'a> {
    pub fn new(pair: &'a PermutationPair) -> Self {
        Events {
            decomposer: Decomposer::new(pair),
            phase: Phase::Between,
        }
    }

    fn advance(&mut self) -> Result<Option<Event>, DessinError> {
        match self.phase {
            Phase::Done => Ok(None),
            Phase::Between => match self.decomposer.next_component()? {
                Some(start) => {
                    self.phase = Phase::Inside(start.index);
                    Ok(Some(Event::Start(start.index)))
                }
                None => {
                    self.phase = Phase::Done;
                    Ok(None)
                }
            },
            Phase::Inside(index) => match self.decomposer.next_cycle()? {
                Some((side, cycle)) => Ok(Some(Event::Cycle(side, cycle))),
                None => {
                    self.phase = Phase::Between;
                    Ok(Some(Event::End(index)))
                }
            },
        }
    }
}

impl Iterator for Events<'_> {
    type Item = Result<Event, DessinError>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.advance();
        if result.is_err() {
            self.phase = Phase::Done;
        }
        result.transpose()
    }
}

impl std::iter::FusedIterator for Events<'_> {}

/// The cycles of one irreducible component, grouped by side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bincode", derive(bincode::Encode, bincode::Decode))]
pub struct Component {
    pub index: usize,
    pub seed: usize,
    /// α-cycles in the order they were walked.
    pub alpha_cycles: Vec<Vec<usize>>,
    /// β-cycles in the order they were walked.
    pub beta_cycles: Vec<Vec<usize>>,
}

impl Component {
    /// Number of edges in the component.
    pub fn degree(&self) -> usize {
        self.alpha_cycles.iter().map(Vec::len).sum()
    }

    /// The edges of the component, sorted.
    pub fn edges(&self) -> Vec<usize> {
        self.alpha_cycles.iter().flatten().copied().sorted().collect()
    }

    pub fn cycles(&self, side: Side) -> &[Vec<usize>] {
        match side {
            Side::Alpha => &self.alpha_cycles,
            Side::Beta => &self.beta_cycles,
        }
    }
}

/// Grouped decomposition: one [`Component`] per pull.
#[derive(Debug, Clone)]
pub struct Components<'a> {
    decomposer: Decomposer<'a>,
    done: bool,
}

impl<'a> Components<'a> {
    pub fn new(pair: &'a PermutationPair) -> Self {
        Components {
            decomposer: Decomposer::new(pair),
            done: false,
        }
    }

    fn advance(&mut self) -> Result<Option<Component>, DessinError> {
        let Some(start) = self.decomposer.next_component()? else {
            return Ok(None);
        };
        let mut component = Component {
            index: start.index,
            seed: start.seed,
            alpha_cycles: Vec::new(),
            beta_cycles: Vec::new(),
        };
        while let Some((side, cycle)) = self.decomposer.next_cycle()? {
            match side {
                Side::Alpha => component.alpha_cycles.push(cycle),
                Side::Beta => component.beta_cycles.push(cycle),
            }
        }
        Ok(Some(component))
    }
}

impl Iterator for Components<'_> {
    type Item = Result<Component, DessinError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.advance();
        if !matches!(result, Ok(Some(_))) {
            self.done = true;
        }
        result.transpose()
    }
}

impl std::iter::FusedIterator for Components<'_> {}

impl PermutationPair {
    /// Flat decomposition stream, see [`Events`].
    pub fn events(&self) -> Events<'_> {
        Events::new(self)
    }

    /// Grouped decomposition, see [`Components`].
    pub fn components(&self) -> Components<'_> {
        Components::new(self)
    }

    /// Degrees of the irreducible components, in discovery order.
    ///
    /// ```
    /// # use dessins::pair::PermutationPair;
    /// let pair = PermutationPair::from_str62("1032", "0123").unwrap();
    /// assert_eq!(pair.component_degrees().unwrap(), vec![2, 2]);
    /// ```
    pub fn component_degrees(&self) -> Result<Vec<usize>, DessinError> {
        self.components().map_ok(|c| c.degree()).collect()
    }

    /// A single irreducible component (the empty pair counts as connected).
    pub fn is_connected(&self) -> Result<bool, DessinError> {
        let mut components = self.components();
        components.next().transpose()?;
        Ok(components.next().transpose()?.is_none())
    }
}

#[cfg(test)]
mod test;
