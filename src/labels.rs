use base64::{Engine as _, engine::general_purpose};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Decode a base64 label as ASM returns it, line breaks included.
pub fn decode_label(label: &str) -> Result<Vec<u8>> {
    let compact: String = label.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    Ok(general_purpose::STANDARD.decode(compact)?)
}

/// Write a label PDF to a uniquely named file in `dir` and keep it.
pub fn write_label(dir: &Path, database: &str, reference: &str, pdf: &[u8]) -> Result<PathBuf> {
    let mut file = tempfile::Builder::new()
        .prefix(&format!("{}-asm-{}-", database, reference))
        .suffix(".pdf")
        .tempfile_in(dir)?;

    file.write_all(pdf)?;
    let (_, path) = file.keep().map_err(|e| e.error)?;
    Ok(path)
}
