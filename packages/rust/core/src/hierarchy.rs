//! Management hierarchy construction.
//!
//! Nodes live in an arena indexed by [`NodeId`] with a key → id map next to
//! it. Each node only knows its manager; there are no child lists because
//! every query walks upwards.

use std::collections::HashMap;

use tracing::{debug, instrument, warn};

use orgchain_shared::{ChainLink, EmployeeRecord, OrgChainError, RedeclarationPolicy, Result};

/// Index of a node inside a [`Hierarchy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A single employee.
#[derive(Debug, Clone)]
pub struct EmployeeNode {
    /// Unique key (the record id).
    pub key: String,
    /// Display name; equals the key until the employee's own record is seen.
    pub name: String,
    /// Direct manager, `None` for a root.
    pub manager: Option<NodeId>,
    /// False while the node has only been referenced as someone's manager.
    pub declared: bool,
}

impl EmployeeNode {
    fn placeholder(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            manager: None,
            declared: false,
        }
    }

    pub fn link(&self) -> ChainLink {
        ChainLink {
            id: self.key.clone(),
            name: self.name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Hierarchy
// ---------------------------------------------------------------------------

/// Read-only, fully linked management hierarchy.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<EmployeeNode>,
    index: HashMap<String, NodeId>,
}

impl Hierarchy {
    /// Build from parsed records.
    pub fn from_records(records: &[EmployeeRecord], policy: RedeclarationPolicy) -> Result<Self> {
        let mut builder = HierarchyBuilder::new(policy);
        for record in records {
            builder.add_record(record)?;
        }
        Ok(builder.build())
    }

    /// Build from `(employee, manager)` pairs; an empty manager marks the root.
    pub fn from_pairs<I, E, M>(pairs: I, policy: RedeclarationPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = (E, M)>,
        E: AsRef<str>,
        M: AsRef<str>,
    {
        let mut builder = HierarchyBuilder::new(policy);
        for (employee, manager) in pairs {
            builder.add_pair(employee.as_ref(), manager.as_ref())?;
        }
        Ok(builder.build())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node by id. Ids are only handed out by this hierarchy, so this cannot miss.
    pub fn node(&self, id: NodeId) -> &EmployeeNode {
        &self.nodes[id.0]
    }

    pub fn lookup(&self, key: &str) -> Option<NodeId> {
        self.index.get(key).copied()
    }

    /// Like [`lookup`](Self::lookup) but fails with `UnknownEmployee`.
    pub fn require(&self, key: &str) -> Result<NodeId> {
        self.lookup(key)
            .ok_or_else(|| OrgChainError::unknown_employee(key))
    }

    /// All nodes in first-seen order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &EmployeeNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    /// Nodes without a manager.
    pub fn roots(&self) -> Vec<NodeId> {
        self.nodes()
            .filter(|(_, n)| n.manager.is_none())
            .map(|(id, _)| id)
            .collect()
    }

    pub(crate) fn links(&self, ids: &[NodeId]) -> Vec<ChainLink> {
        ids.iter().map(|id| self.node(*id).link()).collect()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Incrementally links records into a [`Hierarchy`].
///
/// Managers may be referenced before their own record appears; a placeholder
/// node is created on first sight and filled in later.
#[derive(Debug)]
pub struct HierarchyBuilder {
    nodes: Vec<EmployeeNode>,
    index: HashMap<String, NodeId>,
    policy: RedeclarationPolicy,
}

impl HierarchyBuilder {
    pub fn new(policy: RedeclarationPolicy) -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            policy,
        }
    }

    /// Add an `(employee, manager)` pair where the employee name is its key.
    pub fn add_pair(&mut self, employee: &str, manager: &str) -> Result<()> {
        let manager = manager.trim();
        let manager = (!manager.is_empty()).then(|| manager.to_string());
        self.add_record(&EmployeeRecord::named(employee.trim(), manager))
    }

    /// Declare an employee and link it to its manager.
    pub fn add_record(&mut self, record: &EmployeeRecord) -> Result<()> {
        let employee = self.insert_or_get(&record.id);
        let requested = record.manager.as_deref();

        let node = &self.nodes[employee.0];
        if node.declared {
            let existing = node.manager.map(|m| self.nodes[m.0].key.clone());
            if existing.as_deref() != requested {
                match self.policy {
                    RedeclarationPolicy::LastWriteWins => {
                        warn!(
                            employee = %record.id,
                            existing = existing.as_deref().unwrap_or(""),
                            requested = requested.unwrap_or(""),
                            "employee re-declared, keeping the later manager"
                        );
                    }
                    RedeclarationPolicy::FirstWriteWins => {
                        debug!(employee = %record.id, "employee re-declared, keeping the first manager");
                        return Ok(());
                    }
                    RedeclarationPolicy::Reject => {
                        return Err(OrgChainError::ConflictingManager {
                            employee: record.id.clone(),
                            existing: existing.unwrap_or_default(),
                            requested: requested.unwrap_or_default().to_string(),
                        });
                    }
                }
            }
        }

        let manager = requested.map(|m| self.insert_or_get(m));
        let node = &mut self.nodes[employee.0];
        node.name = record.name.clone();
        node.manager = manager;
        node.declared = true;
        Ok(())
    }

    #[instrument(skip_all, fields(nodes = self.nodes.len()))]
    pub fn build(self) -> Hierarchy {
        let placeholders = self.nodes.iter().filter(|n| !n.declared).count();
        debug!(placeholders, "hierarchy built");
        Hierarchy {
            nodes: self.nodes,
            index: self.index,
        }
    }

    fn insert_or_get(&mut self, key: &str) -> NodeId {
        if let Some(id) = self.index.get(key) {
            return *id;
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(EmployeeNode::placeholder(key));
        self.index.insert(key.to_string(), id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager_of<'a>(h: &'a Hierarchy, key: &str) -> Option<&'a str> {
        let id = h.lookup(key)?;
        h.node(id).manager.map(|m| h.node(m).key.as_str())
    }

    #[test]
    fn forward_references_are_linked() {
        let h = Hierarchy::from_pairs(
            [("A", "B"), ("B", "C"), ("C", "")],
            RedeclarationPolicy::default(),
        )
        .unwrap();
        assert_eq!(h.len(), 3);
        assert_eq!(manager_of(&h, "A"), Some("B"));
        assert_eq!(manager_of(&h, "B"), Some("C"));
        assert_eq!(manager_of(&h, "C"), None);
        assert!(h.nodes().all(|(_, n)| n.declared));
    }

    #[test]
    fn undeclared_manager_becomes_placeholder_root() {
        let h = Hierarchy::from_pairs([("A", "Boss")], RedeclarationPolicy::default()).unwrap();
        let boss = h.require("Boss").unwrap();
        assert!(!h.node(boss).declared);
        assert_eq!(h.roots(), vec![boss]);
    }

    #[test]
    fn placeholder_takes_declared_name() {
        let records = vec![
            EmployeeRecord {
                id: "16".into(),
                name: "Batman".into(),
                manager: Some("6".into()),
            },
            EmployeeRecord {
                id: "6".into(),
                name: "Black Widow".into(),
                manager: None,
            },
        ];
        let h = Hierarchy::from_records(&records, RedeclarationPolicy::default()).unwrap();
        let id = h.require("6").unwrap();
        assert_eq!(h.node(id).name, "Black Widow");
    }

    #[test]
    fn last_write_wins_by_default() {
        let h = Hierarchy::from_pairs(
            [("A", "B"), ("A", "C"), ("B", ""), ("C", "")],
            RedeclarationPolicy::LastWriteWins,
        )
        .unwrap();
        assert_eq!(manager_of(&h, "A"), Some("C"));
    }

    #[test]
    fn first_write_wins_keeps_first_manager() {
        let h = Hierarchy::from_pairs(
            [("A", "B"), ("A", "C"), ("B", "")],
            RedeclarationPolicy::FirstWriteWins,
        )
        .unwrap();
        assert_eq!(manager_of(&h, "A"), Some("B"));
        assert!(h.lookup("C").is_none());
    }

    #[test]
    fn reject_policy_fails_on_conflict() {
        let err = Hierarchy::from_pairs(
            [("A", "B"), ("A", "C")],
            RedeclarationPolicy::Reject,
        )
        .unwrap_err();
        match err {
            OrgChainError::ConflictingManager {
                employee,
                existing,
                requested,
            } => {
                assert_eq!(employee, "A");
                assert_eq!(existing, "B");
                assert_eq!(requested, "C");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[test]
    fn identical_redeclaration_is_accepted_under_reject() {
        let h = Hierarchy::from_pairs(
            [("A", "B"), ("A", "B"), ("B", "")],
            RedeclarationPolicy::Reject,
        )
        .unwrap();
        assert_eq!(manager_of(&h, "A"), Some("B"));
    }

    #[test]
    fn unknown_key_is_reported() {
        let h = Hierarchy::from_pairs([("A", "")], RedeclarationPolicy::default()).unwrap();
        let err = h.require("Z").unwrap_err();
        assert!(matches!(err, OrgChainError::UnknownEmployee { name } if name == "Z"));
    }
}
