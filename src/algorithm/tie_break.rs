//! Tie-break strategies for candidates with equal tentative distance.
//!
//! When the engine has to choose the next node to mark and two candidates
//! share the smallest distance, it asks the strategy
//! `compare(candidate, incumbent)`. [`Ordering::Less`] picks the candidate,
//! [`Ordering::Greater`] keeps the incumbent, and [`Ordering::Equal`] also
//! keeps the incumbent.
//!
//! The strategy only sees caller keys, never internal nodes. It should be
//! transitive over any set of tied candidates; beyond that no stability is
//! promised.

use std::cmp::Ordering;
use std::fmt::Debug;

use log::trace;

use crate::algorithm::PathNode;
use crate::graph::{VertexKey, Weight};

/// Decides between two tied candidates
pub trait TieBreak<K> {
    /// `Less` prefers `a`, `Greater` prefers `b`
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K, F> TieBreak<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Keeps whichever tied candidate was seen first in the scan
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSeen;

impl<K> TieBreak<K> for FirstSeen {
    fn compare(&self, _a: &K, _b: &K) -> Ordering {
        Ordering::Greater
    }
}

/// Prefers the smaller key
#[derive(Debug, Clone, Copy, Default)]
pub struct ByKey;

impl<K: Ord> TieBreak<K> for ByKey {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Flips the preference of the wrapped strategy
#[derive(Debug, Clone, Copy, Default)]
pub struct Reversed<T>(pub T);

impl<K, T: TieBreak<K>> TieBreak<K> for Reversed<T> {
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self.0.compare(b, a)
    }
}

/// Orders tentative distances with `None` (not reached yet) above every
/// finite distance.
pub(crate) fn compare_distance<W: Ord + Debug>(a: Option<W>, b: Option<W>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Position in `candidates` of the node to mark next: smallest distance
/// first, ties settled by `tie_break` in scan order.
pub(crate) fn select_candidate<K, W, T>(
    tie_break: &T,
    nodes: &[PathNode<K, W>],
    candidates: &[usize],
) -> usize
where
    K: VertexKey,
    W: Weight,
    T: TieBreak<K>,
{
    let mut best = 0;
    for pos in 1..candidates.len() {
        let candidate = &nodes[candidates[pos]];
        let incumbent = &nodes[candidates[best]];

        match compare_distance(candidate.distance, incumbent.distance) {
            Ordering::Less => best = pos,
            Ordering::Equal => {
                let decision = tie_break.compare(&candidate.key, &incumbent.key);
                trace!(
                    "tie at {:?} between {:?} and {:?}: {:?}",
                    candidate.distance,
                    candidate.key,
                    incumbent.key,
                    decision
                );
                if decision == Ordering::Less {
                    best = pos;
                }
            }
            Ordering::Greater => {}
        }
    }
    best
}
