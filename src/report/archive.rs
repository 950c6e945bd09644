use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::report::ReportError;

/// Packs `files` flat into a deflated zip at `path`, in the given order.
pub fn write_zip(path: &Path, files: &[PathBuf]) -> Result<(), ReportError> {
    let mut zip = ZipWriter::new(File::create(path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for file in files {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ReportError::Archive(format!("unnamed entry {}", file.display())))?;
        zip.start_file(name, options)?;
        io::copy(&mut File::open(file)?, &mut zip)?;
    }
    zip.finish()?;
    Ok(())
}
