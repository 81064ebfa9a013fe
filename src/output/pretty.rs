use std::io::Write;

use crate::error::NetmonError;
use crate::model::Dashboard;
use crate::tui::widgets::format_bytes;

const WIDTH: usize = 64;

/// Write the dashboard as human-readable tables.
pub fn write_pretty(dashboard: &Dashboard, writer: &mut impl Write) -> Result<(), NetmonError> {
    write_pretty_inner(dashboard, writer).map_err(NetmonError::Serialization)
}

fn write_pretty_inner(d: &Dashboard, w: &mut impl Write) -> Result<(), std::io::Error> {
    writeln!(w, "Live (bytes in last tick)")?;
    writeln!(w, "{}", "=".repeat(WIDTH))?;
    writeln!(w, "{:<8} {:<24} {:>14} {:>14}", "PID", "PROCESS", "UP", "DOWN")?;
    writeln!(w, "{}", "-".repeat(WIDTH))?;
    for row in &d.live.rows {
        writeln!(
            w,
            "{:<8} {:<24} {:>14} {:>14}",
            row.pid,
            truncate(&row.name, 24),
            format_bytes(row.tx_rate),
            format_bytes(row.rx_rate),
        )?;
    }
    if d.live.rows.is_empty() {
        writeln!(w, "(no active processes)")?;
    }
    writeln!(w, "{}", "-".repeat(WIDTH))?;
    writeln!(
        w,
        "{:<8} {:<24} {:>14} {:>14}",
        d.live.active_count,
        "ACTIVE TOTAL",
        format_bytes(d.live.total_tx_rate),
        format_bytes(d.live.total_rx_rate),
    )?;
    writeln!(w)?;

    writeln!(w, "History (cumulative, grouped by name)")?;
    writeln!(w, "{}", "=".repeat(WIDTH))?;
    writeln!(w, "{:<33} {:>14} {:>14}", "PROCESS", "SENT", "RECEIVED")?;
    writeln!(w, "{}", "-".repeat(WIDTH))?;
    for row in &d.history.rows {
        writeln!(
            w,
            "{:<33} {:>14} {:>14}",
            truncate(&row.name, 33),
            format_bytes(row.tx_total),
            format_bytes(row.rx_total),
        )?;
    }
    if d.history.rows.is_empty() {
        writeln!(w, "(no traffic recorded)")?;
    }
    writeln!(w, "{}", "-".repeat(WIDTH))?;
    writeln!(
        w,
        "{:<33} {:>14} {:>14}",
        format!("{} groups", d.history.group_count),
        format_bytes(d.history.grand_tx_total),
        format_bytes(d.history.grand_rx_total),
    )?;
    writeln!(w)?;

    writeln!(
        w,
        "Peak: up {} / down {} over {} ticks",
        format_bytes(d.trend.tx_peak),
        format_bytes(d.trend.rx_peak),
        d.trend.tx.len(),
    )?;

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}~")
    }
}
