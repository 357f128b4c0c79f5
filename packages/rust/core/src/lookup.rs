//! Query by display name.
//!
//! Display names are not unique in the table format, so one query name can
//! resolve to several employees. A chain is produced for every distinct pair.

use tracing::{debug, instrument};

use orgchain_shared::{CommunicationChain, NameMatching, OrgChainError, Result};

use crate::hierarchy::{Hierarchy, NodeId};

/// Lowercase and collapse whitespace: `"  gonzo   ThE GREAt "` → `"gonzo the great"`.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every combination of `first` × `second`, minus self-pairs and mirrored repeats.
pub fn unique_pairs(first: &[NodeId], second: &[NodeId]) -> Vec<(NodeId, NodeId)> {
    let mut pairs: Vec<(NodeId, NodeId)> = Vec::new();
    for &a in first {
        for &b in second {
            if a != b && !pairs.contains(&(b, a)) && !pairs.contains(&(a, b)) {
                pairs.push((a, b));
            }
        }
    }
    pairs
}

impl Hierarchy {
    /// Ids of all employees whose display name matches `name`, in first-seen order.
    pub fn find_ids_by_name(&self, name: &str, matching: NameMatching) -> Vec<NodeId> {
        let wanted = match matching {
            NameMatching::Normalized => normalize_name(name),
            NameMatching::Exact => name.to_string(),
        };

        self.nodes()
            .filter(|(_, node)| match matching {
                NameMatching::Normalized => normalize_name(&node.name) == wanted,
                NameMatching::Exact => node.name == wanted,
            })
            .map(|(id, _)| id)
            .collect()
    }

    /// Chains between every employee called `first` and every employee called `second`.
    #[instrument(skip(self))]
    pub fn chains_between_names(
        &self,
        first: &str,
        second: &str,
        matching: NameMatching,
    ) -> Result<Vec<CommunicationChain>> {
        let first_ids = self.resolve_name(first, matching)?;
        let second_ids = self.resolve_name(second, matching)?;

        let mut pairs = unique_pairs(&first_ids, &second_ids);
        if pairs.is_empty() {
            // Both names resolved to the same single employee.
            pairs.push((first_ids[0], first_ids[0]));
        }

        debug!(pairs = pairs.len(), "resolved name query");
        pairs
            .into_iter()
            .map(|(a, b)| self.chain_between(a, b))
            .collect()
    }

    fn resolve_name(&self, name: &str, matching: NameMatching) -> Result<Vec<NodeId>> {
        let ids = self.find_ids_by_name(name, matching);
        if ids.is_empty() {
            return Err(OrgChainError::unknown_employee(name));
        }
        Ok(ids)
    }
}
