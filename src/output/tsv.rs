use std::io::Write;

use crate::error::NetmonError;
use crate::model::Dashboard;

/// Write the dashboard as TSV.
///
/// Three sections, each introduced by a `# name` line and a header row:
/// `live` (pid, process, tx_rate, rx_rate), `history` (process, tx_total,
/// rx_total) and `trend` (sample, tx, rx). Byte counts are exact integers.
pub fn write_tsv(dashboard: &Dashboard, writer: &mut impl Write) -> Result<(), NetmonError> {
    write_tsv_inner(dashboard, writer).map_err(NetmonError::Serialization)
}

fn write_tsv_inner(d: &Dashboard, w: &mut impl Write) -> Result<(), std::io::Error> {
    writeln!(w, "# live")?;
    writeln!(w, "pid\tprocess\ttx_rate\trx_rate")?;
    for row in &d.live.rows {
        writeln!(
            w,
            "{}\t{}\t{}\t{}",
            row.pid,
            escape_tsv(&row.name),
            row.tx_rate,
            row.rx_rate
        )?;
    }

    writeln!(w, "# history")?;
    writeln!(w, "process\ttx_total\trx_total")?;
    for row in &d.history.rows {
        writeln!(
            w,
            "{}\t{}\t{}",
            escape_tsv(&row.name),
            row.tx_total,
            row.rx_total
        )?;
    }

    writeln!(w, "# trend")?;
    writeln!(w, "sample\ttx\trx")?;
    for (i, (tx, rx)) in d.trend.tx.iter().zip(&d.trend.rx).enumerate() {
        writeln!(w, "{i}\t{tx}\t{rx}")?;
    }

    Ok(())
}

/// Escape tabs and newlines in a string for TSV output.
fn escape_tsv(s: &str) -> String {
    s.replace(['\t', '\n', '\r'], " ")
}
