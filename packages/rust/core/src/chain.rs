//! Communication chain assembly.

use tracing::{debug, instrument};

use orgchain_shared::{CommunicationChain, Result};

use crate::hierarchy::{Hierarchy, NodeId};
use crate::lca::LcaMatch;

/// Join two leaf → root chains at their LCA.
///
/// Produces `first[0] … LCA … second[0]` with the LCA exactly once.
pub fn assemble_path<T: Clone>(first: &[T], second: &[T], lca: LcaMatch) -> Vec<T> {
    let mut path = first[..=lca.first_index].to_vec();
    path.extend(second[..lca.second_index].iter().rev().cloned());
    path
}

impl Hierarchy {
    /// Shortest management path from employee `first` to employee `second`.
    #[instrument(skip(self))]
    pub fn communication_chain(&self, first: &str, second: &str) -> Result<CommunicationChain> {
        let a = self.require(first)?;
        let b = self.require(second)?;
        self.chain_between(a, b)
    }

    /// [`communication_chain`](Self::communication_chain) for resolved nodes.
    pub fn chain_between(&self, first: NodeId, second: NodeId) -> Result<CommunicationChain> {
        let first_chain = self.ancestors_of(first)?;
        let second_chain = self.ancestors_of(second)?;
        let lca = self.lowest_common_ancestor(&first_chain, &second_chain)?;

        let path = assemble_path(&first_chain, &second_chain, lca);
        debug!(
            lca = %self.node(first_chain[lca.first_index]).key,
            length = path.len(),
            "communication chain assembled"
        );

        Ok(CommunicationChain {
            links: self.links(&path),
            lca_index: lca.first_index,
        })
    }
}
