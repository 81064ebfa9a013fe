use std::io::Write;

use crate::error::NetmonError;
use crate::model::Dashboard;

/// Write the dashboard as pretty-printed JSON.
pub fn write_json(dashboard: &Dashboard, writer: &mut impl Write) -> Result<(), NetmonError> {
    serde_json::to_writer_pretty(&mut *writer, dashboard)
        .map_err(|e| NetmonError::Serialization(std::io::Error::other(e.to_string())))?;
    writeln!(writer).map_err(NetmonError::Serialization)
}
