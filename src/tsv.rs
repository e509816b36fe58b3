// src/tsv.rs
//
// Chunked reader for the tab-separated review sources.
// Quoting is off: a literal `"` inside a review is kept as-is.
// Chunk size bounds how many rows are held before the loader consumes them;
// it has no effect on what is read.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::config::consts::SOURCE_SEP;

pub struct ChunkedReader<R: Read> {
    rdr: csv::Reader<R>,
    chunk_size: usize,
    done: bool,
}

impl<R: Read> ChunkedReader<R> {
    pub fn new(reader: R, chunk_size: usize) -> Self {
        let rdr = ReaderBuilder::new()
            .delimiter(SOURCE_SEP)
            .quoting(false)
            .has_headers(true)
            .flexible(true) // row width is checked by the loader, with line numbers
            .trim(Trim::None)
            .from_reader(reader);
        Self { rdr, chunk_size: chunk_size.max(1), done: false }
    }

    pub fn headers(&mut self) -> Result<StringRecord, csv::Error> {
        self.rdr.headers().cloned()
    }

    /// Next batch of at most `chunk_size` rows; `None` once the source is drained.
    pub fn next_chunk(&mut self) -> Option<Result<Vec<StringRecord>, csv::Error>> {
        if self.done { return None; }

        let mut chunk = Vec::with_capacity(self.chunk_size);
        let mut rec = StringRecord::new();
        while chunk.len() < self.chunk_size {
            match self.rdr.read_record(&mut rec) {
                Ok(true) => chunk.push(rec.clone()),
                Ok(false) => { self.done = true; break; }
                Err(e) => { self.done = true; return Some(Err(e)); }
            }
        }
        if chunk.is_empty() { None } else { Some(Ok(chunk)) }
    }
}

impl<R: Read> Iterator for ChunkedReader<R> {
    type Item = Result<Vec<StringRecord>, csv::Error>;
    fn next(&mut self) -> Option<Self::Item> { self.next_chunk() }
}
