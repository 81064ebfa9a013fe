pub mod json;
pub mod pretty;
pub mod tsv;

use std::io::Write;

use crate::cli::OutputFormat;
use crate::error::NetmonError;
use crate::model::Dashboard;

/// Write the final dashboard of a snapshot run in the specified format.
pub fn write_snapshot(
    dashboard: &Dashboard,
    format: OutputFormat,
    writer: &mut impl Write,
) -> Result<(), NetmonError> {
    match format {
        OutputFormat::Tsv => tsv::write_tsv(dashboard, writer),
        OutputFormat::Json => json::write_json(dashboard, writer),
        OutputFormat::Pretty => pretty::write_pretty(dashboard, writer),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::model::*;

    pub fn dashboard() -> Dashboard {
        Dashboard {
            live: LiveView {
                rows: vec![
                    LiveRow {
                        pid: 4242,
                        name: "firefox".to_string(),
                        tx_rate: 2048,
                        rx_rate: 65536,
                    },
                    LiveRow {
                        pid: 77,
                        name: "ssh".to_string(),
                        tx_rate: 100,
                        rx_rate: 20,
                    },
                ],
                active_count: 2,
                total_tx_rate: 2148,
                total_rx_rate: 65556,
            },
            history: HistoryView {
                rows: vec![
                    HistoryRow {
                        name: "firefox".to_string(),
                        tx_total: 1_048_576,
                        rx_total: 52_428_800,
                    },
                    HistoryRow {
                        name: "ssh".to_string(),
                        tx_total: 5000,
                        rx_total: 3000,
                    },
                ],
                group_count: 2,
                grand_tx_total: 1_053_576,
                grand_rx_total: 52_431_800,
            },
            trend: TrendView {
                tx: vec![0, 1000, 2148],
                rx: vec![0, 70000, 65556],
                tx_peak: 2148,
                rx_peak: 70000,
            },
        }
    }
}
