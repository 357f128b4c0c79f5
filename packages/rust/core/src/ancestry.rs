//! Upward traversal: ancestor chains and whole-hierarchy validation.

use std::collections::HashSet;

use tracing::{debug, instrument};

use orgchain_shared::{OrgChainError, Result};

use crate::hierarchy::{Hierarchy, NodeId};

/// Summary produced by [`Hierarchy::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyReport {
    pub employees: usize,
    /// Keys of nodes without a manager.
    pub roots: Vec<String>,
    /// Keys only ever referenced as a manager.
    pub placeholders: Vec<String>,
    /// Length of the longest ancestor chain.
    pub max_depth: usize,
}

impl HierarchyReport {
    pub fn is_single_tree(&self) -> bool {
        self.roots.len() == 1
    }
}

impl Hierarchy {
    /// Ancestor chain of `key`, from the employee up to and including the root.
    pub fn ancestor_chain(&self, key: &str) -> Result<Vec<NodeId>> {
        let start = self.require(key)?;
        self.ancestors_of(start)
    }

    /// Same as [`ancestor_chain`](Self::ancestor_chain) but returns keys.
    pub fn ancestor_names(&self, key: &str) -> Result<Vec<String>> {
        let chain = self.ancestor_chain(key)?;
        Ok(chain.iter().map(|id| self.node(*id).key.clone()).collect())
    }

    /// Follow manager links from `start` until a root.
    ///
    /// Fails with `CycleDetected` as soon as a node repeats.
    pub fn ancestors_of(&self, start: NodeId) -> Result<Vec<NodeId>> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = Some(start);

        while let Some(id) = current {
            if !seen.insert(id) {
                chain.push(id);
                return Err(OrgChainError::CycleDetected {
                    employee: self.node(start).key.clone(),
                    chain: chain.iter().map(|id| self.node(*id).key.clone()).collect(),
                });
            }
            chain.push(id);
            current = self.node(id).manager;
        }

        Ok(chain)
    }

    /// Walk every node to its root, failing on the first cycle.
    #[instrument(skip_all, fields(employees = self.len()))]
    pub fn validate(&self) -> Result<HierarchyReport> {
        let mut max_depth = 0;
        for (id, _) in self.nodes() {
            max_depth = max_depth.max(self.ancestors_of(id)?.len());
        }

        let key = |id: NodeId| self.node(id).key.clone();
        let report = HierarchyReport {
            employees: self.len(),
            roots: self.roots().into_iter().map(key).collect(),
            placeholders: self
                .nodes()
                .filter(|(_, n)| !n.declared)
                .map(|(_, n)| n.key.clone())
                .collect(),
            max_depth,
        };

        debug!(roots = report.roots.len(), max_depth, "hierarchy validated");
        Ok(report)
    }
}
