use std::collections::HashSet;

use zone_core::{GroupMerge, TargetEndpoint, Vendor, Zone, ZoneMode};

/// Counts appended after a generated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub vendor: Vendor,
    pub mode: ZoneMode,
    pub initiators: usize,
    pub targets: usize,
    /// Target groups; only reported in grouped mode.
    pub groups: Option<usize>,
    pub zones: usize,
    pub zoneset: String,
}

impl GenerationSummary {
    /// Render as `!` comment lines, valid in both vendors' command files.
    pub fn render(&self) -> String {
        let mut lines = vec![
            "! --- SUMMARY ---".to_string(),
            format!("! Vendor     : {}", self.vendor),
            format!("! Mode       : {}", self.mode),
            format!("! Initiators : {}", self.initiators),
            format!("! Targets    : {}", self.targets),
        ];
        if let Some(groups) = self.groups {
            lines.push(format!("! Groups     : {groups}"));
        }
        lines.push(format!("! Zones      : {}", self.zones));
        lines.push(format!("! Zoneset    : {}", self.zoneset));
        lines.push("! --- END OF SUMMARY ---".to_string());
        lines.join("\n")
    }
}

/// Number of target groups the selector forms under `merge`.
pub fn count_groups(targets: &[&TargetEndpoint], merge: GroupMerge) -> usize {
    targets
        .iter()
        .map(|t| {
            let block = match merge {
                GroupMerge::Block => t.group_block,
                GroupMerge::Name => None,
            };
            (block, t.group.as_deref().unwrap_or(""))
        })
        .collect::<HashSet<_>>()
        .len()
}

/// Plain-text zone preview used by dry runs.
pub fn render_preview(zones: &[Zone]) -> String {
    let rows: Vec<[String; 3]> = zones
        .iter()
        .map(|z| {
            [
                z.name().to_string(),
                z.initiator().alias.clone(),
                z.targets()
                    .iter()
                    .map(|t| t.alias.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            ]
        })
        .collect();
    let header = ["ZONE", "INITIATOR", "TARGETS"];
    let mut widths = header.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.len());
        }
    }

    let line = |cells: [&str; 3]| {
        format!(
            "{:<w0$}  {:<w1$}  {}",
            cells[0],
            cells[1],
            cells[2],
            w0 = widths[0],
            w1 = widths[1]
        )
        .trim_end()
        .to_string()
    };
    let mut out = vec![line(header)];
    for row in &rows {
        out.push(line([&row[0], &row[1], &row[2]]));
    }
    out.join("\n")
}
