//! PDF header sniffing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
/// Header bytes needed to read "%PDF-x.y".
const HEADER_LEN: usize = PDF_MAGIC.len() + 3;

/// Check that `data` starts with a `%PDF-x.y` header and return the version.
pub fn pdf_version(data: &[u8]) -> Result<String> {
    if data.len() < HEADER_LEN || !data.starts_with(PDF_MAGIC) {
        return Err(Error::UnknownFormat);
    }

    match &data[PDF_MAGIC.len()..HEADER_LEN] {
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit() => {
            Ok(format!("{}.{}", *major as char, *minor as char))
        }
        other => Err(Error::UnsupportedVersion(
            String::from_utf8_lossy(other).to_string(),
        )),
    }
}

/// Read the header of a file and return its PDF version.
pub fn pdf_version_of_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut header = Vec::with_capacity(HEADER_LEN);
    File::open(path)?
        .take(HEADER_LEN as u64)
        .read_to_end(&mut header)?;
    pdf_version(&header)
}

/// Whether a file looks like a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    pdf_version_of_file(path).is_ok()
}
