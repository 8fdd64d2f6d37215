//! Terminal rendering of result tables

use std::fmt::Write;

use super::table::{ResultTable, TableStatus};

pub const NO_HOLDERS: &str = "No holder addresses found.";
pub const NO_TARGETS: &str = "No target addresses found.";

/// Render a table for the terminal, one target address per line
pub fn render_table(table: &ResultTable) -> String {
    let mut out = String::new();

    if table.status() == TableStatus::NoHolders {
        let _ = writeln!(out, "{}", NO_HOLDERS);
        return out;
    }

    let holder_width = column_width(table.rows.iter().map(|r| r.holder.as_str()), "HOLDER ADDRESS");
    let cluster_width = column_width(table.rows.iter().map(|r| r.cluster_key.as_str()), "CLUSTER NAME");
    let target_width = column_width(
        table.rows.iter().flat_map(|r| r.targets.iter().map(String::as_str)),
        "TARGET ADDRESSES",
    );

    let _ = writeln!(
        out,
        "{:<hw$}  {:<cw$}  {}",
        "HOLDER ADDRESS",
        "CLUSTER NAME",
        "TARGET ADDRESSES",
        hw = holder_width,
        cw = cluster_width
    );
    let _ = writeln!(out, "{}", "-".repeat(holder_width + cluster_width + target_width + 4));

    if table.status() == TableStatus::NoTargets {
        let _ = writeln!(out, "{}", NO_TARGETS);
        return out;
    }

    for row in &table.rows {
        let mut targets = row.targets.iter();
        let _ = writeln!(
            out,
            "{:<hw$}  {:<cw$}  {}",
            row.holder,
            row.cluster_key,
            targets.next().map(String::as_str).unwrap_or(""),
            hw = holder_width,
            cw = cluster_width
        );
        for target in targets {
            let _ = writeln!(
                out,
                "{:<hw$}  {:<cw$}  {}",
                "",
                "",
                target,
                hw = holder_width,
                cw = cluster_width
            );
        }
    }

    out
}

fn column_width<'a>(cells: impl Iterator<Item = &'a str>, title: &str) -> usize {
    cells.map(str::len).max().unwrap_or(0).max(title.len())
}
