//! CSV summary of a batch.

use std::io::Write;

use crate::error::Result;
use crate::models::record::{DocumentRecord, FIELD_NAMES};

/// Write `records` as CSV with a header row of field names.
pub fn write_summary<W: Write>(writer: W, records: &[DocumentRecord]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    wtr.write_record(FIELD_NAMES)?;
    for record in records {
        wtr.write_record(record.values())?;
    }

    wtr.flush()?;
    Ok(())
}

/// Summary as CSV bytes.
pub fn summary_csv(records: &[DocumentRecord]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_summary(&mut buffer, records)?;
    Ok(buffer)
}
