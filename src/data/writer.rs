use std::path::Path;

use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::debug;

use super::model::RecordSet;
use crate::error::{ProcessError, Result};

/// Render records as the flattened sample format.
///
/// Every field is followed by a comma, the last one included, and every row
/// ends with `\n`: `100,3,4,\n`. No header. An empty set renders as `""`.
pub fn serialize(set: &RecordSet) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in set.iter() {
        // The empty last field is what produces the trailing comma.
        let fields = record
            .cells
            .iter()
            .map(|c| c.to_string())
            .chain(std::iter::once(String::new()));
        writer.write_record(fields)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    // Only ASCII digits, signs, "NaN" and commas were written.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Replace whatever is at `path` with `text`. The parent directory must
/// already exist.
pub fn write_file(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|e| ProcessError::io(path, e))?;
    debug!("wrote {} bytes to {}", text.len(), path.display());
    Ok(())
}
