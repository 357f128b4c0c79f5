//! Hierarchy construction and communication-chain search for orgchain.
//!
//! Records are parsed into a [`Hierarchy`], each queried employee is walked
//! up to the root, the two chains are joined at their lowest common ancestor
//! and returned as a single ordered path.

pub mod ancestry;
pub mod chain;
pub mod hierarchy;
pub mod lca;
pub mod lookup;
pub mod records;

pub use ancestry::HierarchyReport;
pub use chain::assemble_path;
pub use hierarchy::{EmployeeNode, Hierarchy, HierarchyBuilder, NodeId};
pub use lca::{LcaMatch, resolve_lca};
pub use lookup::{normalize_name, unique_pairs};
pub use records::{detect_format, parse_employee_records, parse_records};

use orgchain_shared::{RedeclarationPolicy, Result};

/// Shortest management path between `first` and `second`, by employee key.
///
/// An empty manager marks the root. Uses the default re-declaration policy.
pub fn find_communication_chain<I, E, M>(pairs: I, first: &str, second: &str) -> Result<Vec<String>>
where
    I: IntoIterator<Item = (E, M)>,
    E: AsRef<str>,
    M: AsRef<str>,
{
    let hierarchy = Hierarchy::from_pairs(pairs, RedeclarationPolicy::default())?;
    Ok(hierarchy.communication_chain(first, second)?.ids())
}
