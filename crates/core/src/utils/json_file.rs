//! JSON file helpers shared by the stores.
//!
//! Every artifact is written with two-space indentation so files stay
//! diffable against ones produced by earlier runs.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

/// Serialize `value` as pretty-printed JSON into `writer`.
pub fn write_pretty_json<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(())
}

/// Create or truncate `path` and write `value` to it.
pub fn save_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = fs::File::create(path)?;
    write_pretty_json(file, value)
}

/// Read and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}
