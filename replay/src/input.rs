//! Trace input for replay
//!
//! Traces are CSV files with a `key,value` header. Rows are streamed one at a
//! time so a trace never has to fit in memory.

use crate::error::ReplayError;
use crate::models::Request;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Streaming reader over the requests of a trace.
pub struct TraceReader<R: Read> {
    reader: csv::Reader<R>,
    headers: csv::StringRecord,
    record: csv::StringRecord,
}

impl TraceReader<BufReader<File>> {
    /// Open a trace file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ReplayError> {
        let file = File::open(path)?;
        // Use 1MB buffer for better I/O performance
        Self::from_reader(BufReader::with_capacity(1024 * 1024, file))
    }
}

impl<R: Read> TraceReader<R> {
    /// Read a trace from any byte source
    pub fn from_reader(rdr: R) -> Result<Self, ReplayError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(rdr);
        let headers = reader.headers()?.clone();
        Ok(Self {
            reader,
            headers,
            record: csv::StringRecord::new(),
        })
    }

    fn parse_record(&self) -> Result<Request, ReplayError> {
        let line = self.record.position().map_or(0, csv::Position::line);
        let request: Request = self
            .record
            .deserialize(Some(&self.headers))
            .map_err(|err| ReplayError::Parse {
                line,
                reason: err.to_string(),
            })?;

        if request.key.is_empty() {
            return Err(ReplayError::Parse {
                line,
                reason: "empty key".to_string(),
            });
        }
        Ok(request)
    }
}

impl<R: Read> Iterator for TraceReader<R> {
    type Item = Result<Request, ReplayError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(true) => Some(self.parse_record()),
            Ok(false) => None,
            Err(err) => Some(Err(err.into())),
        }
    }
}

impl<R: Read> std::fmt::Debug for TraceReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraceReader")
            .field("headers", &self.headers)
            .finish()
    }
}
