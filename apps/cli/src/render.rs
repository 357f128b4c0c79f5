//! Console rendering for chains and hierarchy reports.

use color_eyre::eyre::Result;
use orgchain_core::HierarchyReport;
use orgchain_shared::{CommunicationChain, OutputStyle};

/// One chain per line, or a JSON array for [`OutputStyle::Json`].
pub(crate) fn render_chains(chains: &[CommunicationChain], style: OutputStyle) -> Result<String> {
    let rendered = match style {
        OutputStyle::Arrows => chains
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputStyle::Plain => chains
            .iter()
            .map(CommunicationChain::to_plain_string)
            .collect::<Vec<_>>()
            .join("\n"),
        OutputStyle::Json => serde_json::to_string_pretty(chains)?,
    };
    Ok(rendered)
}

pub(crate) fn render_report(report: &HierarchyReport) -> String {
    let mut lines = vec![
        format!("  Employees:    {}", report.employees),
        format!("  Roots:        {}", report.roots.join(", ")),
        format!("  Max depth:    {}", report.max_depth),
    ];
    if !report.placeholders.is_empty() {
        lines.push(format!("  Undeclared:   {}", report.placeholders.join(", ")));
    }
    lines.join("\n")
}
