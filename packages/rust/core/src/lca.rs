//! Lowest common ancestor of two ancestor chains.
//!
//! Both chains run leaf → root. Walking them together from the root end, the
//! LCA is the last position where they still agree, e.g.
//! `[6, 4, 2, 1]` and `[7, 5, 3, 2, 1]` meet at `2`.

use orgchain_shared::{OrgChainError, Result};

use crate::hierarchy::{Hierarchy, NodeId};

/// Position of the lowest common ancestor inside each chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcaMatch {
    pub first_index: usize,
    pub second_index: usize,
}

/// Find the deepest element shared by two leaf → root chains.
///
/// Returns `None` when the chains end at different roots.
pub fn resolve_lca<T: PartialEq>(first: &[T], second: &[T]) -> Option<LcaMatch> {
    let shared = first
        .iter()
        .rev()
        .zip(second.iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    if shared == 0 {
        return None;
    }

    Some(LcaMatch {
        first_index: first.len() - shared,
        second_index: second.len() - shared,
    })
}

impl Hierarchy {
    /// [`resolve_lca`] over node chains, failing with `DisconnectedHierarchy`.
    pub fn lowest_common_ancestor(&self, first: &[NodeId], second: &[NodeId]) -> Result<LcaMatch> {
        resolve_lca(first, second).ok_or_else(|| {
            let key = |chain: &[NodeId]| {
                chain
                    .first()
                    .map(|id| self.node(*id).key.clone())
                    .unwrap_or_default()
            };
            OrgChainError::DisconnectedHierarchy {
                first: key(first),
                second: key(second),
            }
        })
    }
}
