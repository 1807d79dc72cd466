use flate2::read::GzDecoder;
use std::ffi::OsStr;
use std::fs;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;

use crate::error::{EvalError, Result};

const READ_BUFFER: usize = 128 * 1024;

/// Read normal or compressed files seamlessly
/// Uses the presence of a `.gz` extension to decide
pub fn reader<P: AsRef<Path>>(filename: P) -> Result<Box<dyn BufRead>> {
    let path = filename.as_ref();
    let file = fs::File::open(path).map_err(|why| EvalError::open(path, why))?;

    if path.extension() == Some(OsStr::new("gz")) {
        Ok(Box::new(BufReader::with_capacity(
            READ_BUFFER,
            GzDecoder::new(file),
        )))
    } else {
        Ok(Box::new(BufReader::with_capacity(READ_BUFFER, file)))
    }
}
