//! Core domain types for organisation hierarchies.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// EmployeeRecord
// ---------------------------------------------------------------------------

/// One parsed line of a hierarchy file.
///
/// In the plain `employee,manager` format the id and the name are the same
/// string. In the table format the id is the first cell and names may repeat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    /// Unique key of the employee.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Key of the direct manager, `None` for the root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<String>,
}

impl EmployeeRecord {
    /// Record where the key doubles as the display name.
    pub fn named(name: impl Into<String>, manager: Option<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            manager,
        }
    }
}

// ---------------------------------------------------------------------------
// CommunicationChain
// ---------------------------------------------------------------------------

/// A single employee on a communication chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    pub id: String,
    pub name: String,
}

impl std::fmt::Display for ChainLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.id == self.name {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.id)
        }
    }
}

/// Ordered path `[A, …, LCA, …, B]` between two employees.
///
/// Links before `lca_index` climb towards the common manager, links after it
/// descend to the second employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunicationChain {
    pub links: Vec<ChainLink>,
    pub lca_index: usize,
}

impl CommunicationChain {
    /// The lowest common manager of both ends.
    pub fn lca(&self) -> &ChainLink {
        &self.links[self.lca_index]
    }

    /// Employee keys in path order.
    pub fn ids(&self) -> Vec<String> {
        self.links.iter().map(|l| l.id.clone()).collect()
    }

    /// Display names in path order.
    pub fn names(&self) -> Vec<String> {
        self.links.iter().map(|l| l.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// The same chain walked from the other end.
    pub fn reversed(&self) -> Self {
        let mut links = self.links.clone();
        links.reverse();
        Self {
            lca_index: links.len().saturating_sub(1) - self.lca_index,
            links,
        }
    }

    /// Space-joined labels, without direction markers.
    pub fn to_plain_string(&self) -> String {
        self.links
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Renders `A -> B -> LCA <- C <- D`.
impl std::fmt::Display for CommunicationChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                let arrow = if i <= self.lca_index { " -> " } else { " <- " };
                f.write_str(arrow)?;
            }
            write!(f, "{link}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: &str, name: &str) -> ChainLink {
        ChainLink {
            id: id.into(),
            name: name.into(),
        }
    }

    fn superhero_chain() -> CommunicationChain {
        CommunicationChain {
            links: vec![
                link("16", "Batman"),
                link("6", "Black Widow"),
                link("2", "Gonzo the Great"),
                link("1", "Dangermouse"),
                link("3", "Invisible Woman"),
                link("15", "Super Ted"),
            ],
            lca_index: 3,
        }
    }

    #[test]
    fn display_uses_arrows_around_lca() {
        assert_eq!(
            superhero_chain().to_string(),
            "Batman (16) -> Black Widow (6) -> Gonzo the Great (2) -> Dangermouse (1) \
             <- Invisible Woman (3) <- Super Ted (15)"
        );
    }

    #[test]
    fn display_omits_id_when_it_is_the_name() {
        let chain = CommunicationChain {
            links: vec![link("A", "A"), link("B", "B"), link("C", "C")],
            lca_index: 2,
        };
        assert_eq!(chain.to_string(), "A -> B -> C");
        assert_eq!(chain.to_plain_string(), "A B C");
    }

    #[test]
    fn reversed_moves_lca_index() {
        let reversed = superhero_chain().reversed();
        assert_eq!(reversed.lca().name, "Dangermouse");
        assert_eq!(reversed.lca_index, 2);
        assert_eq!(reversed.links[0].name, "Super Ted");
    }

    #[test]
    fn chain_serialization() {
        let json = serde_json::to_string(&superhero_chain()).expect("serialize");
        let parsed: CommunicationChain = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, superhero_chain());
    }
}
