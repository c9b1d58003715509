//! Comma-separated decimal files for batches of messages or ciphertexts.
//!
//! The format is ASCII decimal digits separated by single commas, with no
//! sign and no trailing comma: `12,0,340282366920938463463374607431768211456`.
//! Whitespace around the list and around each token is ignored when reading.
use crate::crypto::{FaheError, FaheResult};
use std::fmt::Display;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// Writes `values` as comma-separated decimals.
pub fn write_list<W: Write, T: Display>(mut writer: W, values: &[T]) -> FaheResult<()> {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            writer.write_all(b",")?;
        }
        write!(writer, "{value}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads a comma-separated decimal list.
///
/// # Errors
///
/// [`FaheError::Parse`] with the zero-based position of the first token that
/// is empty or not made of ASCII digits only.
pub fn read_list<T: FromStr, R: Read>(mut reader: R) -> FaheResult<Vec<T>> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_list(&text)
}

fn parse_list<T: FromStr>(text: &str) -> FaheResult<Vec<T>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    let count = text.split(',').count();
    let mut values = Vec::new();
    values
        .try_reserve_exact(count)
        .map_err(|_| FaheError::OutOfMemory { requested: count })?;

    for (index, raw) in text.split(',').enumerate() {
        let token = raw.trim();
        let parse_error = || FaheError::Parse {
            index,
            token: token.to_string(),
        };
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(parse_error());
        }
        values.push(token.parse::<T>().map_err(|_| parse_error())?);
    }
    Ok(values)
}

#[instrument(skip_all, fields(path = %path.as_ref().display(), count = values.len()))]
pub fn write_list_to_path<T: Display, P: AsRef<Path>>(path: P, values: &[T]) -> FaheResult<()> {
    let file = File::create(path.as_ref())?;
    write_list(BufWriter::new(file), values)?;
    debug!("batch written");
    Ok(())
}

#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_list_from_path<T: FromStr, P: AsRef<Path>>(path: P) -> FaheResult<Vec<T>> {
    let file = File::open(path.as_ref())?;
    let values = read_list(BufReader::new(file))?;
    debug!(count = values.len(), "batch read");
    Ok(values)
}
