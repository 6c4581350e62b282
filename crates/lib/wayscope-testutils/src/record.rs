//! Writers that lay down record container files for tests.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use prost::Message;

use wayscope_wire::record::write_frame;
use wayscope_wire::schema::Scenario;

/// Writes the scenarios as one framed record each, in order.
pub fn write_record_file(path: &Path, scenarios: &[Scenario]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for scenario in scenarios {
        write_frame(&mut writer, &scenario.encode_to_vec())?;
    }
    writer.flush()
}

/// Writes raw payloads with valid framing; payloads need not be valid
/// scenario messages, which lets tests exercise schema decode failures.
pub fn write_raw_record_file(path: &Path, payloads: &[Vec<u8>]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for payload in payloads {
        write_frame(&mut writer, payload)?;
    }
    writer.flush()
}
