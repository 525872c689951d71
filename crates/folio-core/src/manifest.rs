//! Manifest persistence.
//!
//! The manifest is pretty-printed JSON (two-space indent, UTF-8 written
//! literally). Writes go to a sibling temp file that is renamed over the
//! target, so readers never see a half-written manifest.

use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::types::Manifest;

/// Serialize a value as pretty JSON followed by a newline.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut writer, value).map_err(io::Error::other)?;
    writeln!(writer)?;
    writer.flush()
}

/// Serialize a manifest to a pretty JSON string.
pub fn to_json(manifest: &Manifest) -> std::result::Result<String, serde_json::Error> {
    serde_json::to_string_pretty(manifest)
}

/// Write `manifest` to `path`, replacing any previous file.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<()> {
    let tmp = temp_path(path);
    let outcome = File::create(&tmp)
        .and_then(|file| write_json(BufWriter::new(file), manifest))
        .and_then(|()| std::fs::rename(&tmp, path));

    if let Err(e) = outcome {
        let _ = std::fs::remove_file(&tmp);
        return Err(e.into());
    }
    tracing::debug!("Manifest written to {:?}", path);
    Ok(())
}

/// Read a manifest back from disk.
pub fn read_manifest(path: &Path) -> Result<Manifest> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
