//! Line-by-line decoding of newline-delimited JSON streams.

use std::io::{BufRead, BufReader, Read};

use serde::de::DeserializeOwned;

use crate::decoder::Decoder;
use crate::error::LoadError;

/// Longest line accepted, terminator excluded.
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Outcome of [`load_lines`]: the records decoded before the first failure,
/// plus that failure if there was one.
#[derive(Debug)]
pub struct LineLoad<T> {
    pub records: Vec<T>,
    pub error: Option<LoadError>,
}

impl<T> LineLoad<T> {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }

    /// Drop the partial records if loading failed.
    pub fn into_result(self) -> Result<Vec<T>, LoadError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.records),
        }
    }
}

/// Decode every line of `stream` into a `T`, in order.
///
/// Stops at the first read or decode failure and returns what was decoded up
/// to that line. The stream is consumed and dropped before returning.
pub fn load_lines<T, R, D>(stream: R, decoder: &D) -> LineLoad<T>
where
    T: DeserializeOwned,
    R: Read,
    D: Decoder,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut records = Vec::new();
    let mut line_no = 0usize;

    let error = loop {
        buf.clear();
        // Room for a full-length line plus a `\r\n` terminator.
        let read = match (&mut reader)
            .take(MAX_LINE_BYTES as u64 + 2)
            .read_until(b'\n', &mut buf)
        {
            Ok(n) => n,
            Err(source) => {
                break Some(LoadError::Read {
                    line: line_no + 1,
                    source,
                })
            }
        };
        if read == 0 {
            break None;
        }
        line_no += 1;

        let line = strip_terminator(&buf);
        if line.len() > MAX_LINE_BYTES {
            break Some(LoadError::LineTooLong {
                line: line_no,
                limit: MAX_LINE_BYTES,
            });
        }

        match decoder.decode::<T>(line) {
            Ok(record) => records.push(record),
            Err(source) => {
                break Some(LoadError::Decode {
                    line: line_no,
                    source,
                })
            }
        }
    };

    tracing::debug!(
        records = records.len(),
        lines = line_no,
        failed = error.is_some(),
        "decoded line-delimited records"
    );

    LineLoad { records, error }
}

fn strip_terminator(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}
