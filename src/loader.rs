// src/loader.rs
//
// Typed loader for one partition.
//
// Fixed schema, in column order:
//   index:i32  drugName:str  condition:str?  review:str  rating:f32? (empty → NaN)
//   date:"Month DD, YYYY"  usefulCount:i16 (>= 0)
//
// A date that does not match the format becomes `None` (and so do the derived
// day/month/year); the row is still loaded. Any other coercion failure aborts
// the load with the offending line.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use serde::Deserialize;

use crate::config::consts::{DATE_FORMAT, DATE_FORMAT_UNPADDED};
use crate::core::sanitize::normalize_drug_name;
use crate::data::{derive_date_parts, DatasetPartition, Partition, RawRecord};
use crate::error::LoadError;
use crate::progress::Progress;
use crate::tsv::ChunkedReader;

/// Expected header names. The first column is the unnamed row index and may
/// appear under any of `INDEX_ALIASES`.
pub const COLUMNS: [&str; 7] = ["index", "drugName", "condition", "review", "rating", "date", "usefulCount"];
const INDEX_ALIASES: [&str; 3] = ["", "index", "Unnamed: 0"];

#[derive(Debug, Deserialize)]
struct SourceRow {
    index: i32,
    drug_name: String,
    condition: Option<String>,
    review: String,
    rating: Option<f32>,
    date: String,
    useful_count: i16,
}

/// Parse "Month DD, YYYY" (day may be one digit). Anything else is `None`.
///
/// chrono also takes abbreviated months and loose spacing, so the input must
/// read back exactly as the full form.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    let d = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    let exact = [DATE_FORMAT, DATE_FORMAT_UNPADDED]
        .iter()
        .any(|fmt| d.format(fmt).to_string().eq_ignore_ascii_case(s));
    if !exact {
        return None;
    }
    d.and_hms_opt(0, 0, 0)
}

pub fn load_partition(
    path: &Path,
    partition: Partition,
    chunk_size: usize,
    progress: Option<&mut (dyn Progress + '_)>,
) -> Result<DatasetPartition, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    load_reader(file, path, partition, chunk_size, progress)
}

/// Same as `load_partition`, over any reader. `source` only labels errors.
pub fn load_reader<R: Read>(
    reader: R,
    source: &Path,
    partition: Partition,
    chunk_size: usize,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<DatasetPartition, LoadError> {
    let csv_err = |e: csv::Error| LoadError::Csv { path: source.to_path_buf(), source: e };

    let mut chunks = ChunkedReader::new(reader, chunk_size);
    let headers = chunks.headers().map_err(csv_err)?;
    check_headers(&headers, source)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(partition);
    }

    let mut out = DatasetPartition::new(partition);
    let mut unparsed_dates = 0usize;
    let mut n_chunks = 0usize;

    while let Some(chunk) = chunks.next_chunk() {
        let chunk = chunk.map_err(csv_err)?;
        out.records.reserve(chunk.len());
        for row in &chunk {
            let rec = coerce(row, partition, source)?;
            if rec.date.is_none() {
                unparsed_dates += 1;
                logd!("{}: unparsed date {:?}", line_of(row), row.get(5).unwrap_or(""));
            }
            out.records.push(rec);
        }
        n_chunks += 1;
        if let Some(p) = progress.as_deref_mut() {
            p.chunk_done(n_chunks, out.records.len());
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        if unparsed_dates > 0 {
            p.log(&format!("{}: {unparsed_dates} date(s) not in \"Month DD, YYYY\" form", partition.name()));
        }
        p.finish(partition, out.records.len());
    }
    logf!(
        "{} loaded from {}: {} rows in {} chunk(s), {} unparsed date(s)",
        partition.name(), source.display(), out.records.len(), n_chunks, unparsed_dates
    );

    Ok(out)
}

fn check_headers(headers: &StringRecord, source: &Path) -> Result<(), LoadError> {
    let bad = |message: String| LoadError::Header { path: source.to_path_buf(), message };

    if headers.len() != COLUMNS.len() {
        return Err(bad(format!("expected {} columns, found {}", COLUMNS.len(), headers.len())));
    }
    let names: Vec<&str> = headers.iter().map(|h| h.trim().trim_matches('"')).collect();
    if !INDEX_ALIASES.contains(&names[0]) {
        return Err(bad(format!("unexpected index column {:?}", names[0])));
    }
    for (i, want) in COLUMNS.iter().enumerate().skip(1) {
        if names[i] != *want {
            return Err(bad(format!("column {} is {:?}, expected {:?}", i + 1, names[i], want)));
        }
    }
    Ok(())
}

fn line_of(row: &StringRecord) -> u64 {
    row.position().map(|p| p.line()).unwrap_or(0)
}

fn coerce(row: &StringRecord, partition: Partition, source: &Path) -> Result<RawRecord, LoadError> {
    let line = line_of(row);
    let bad = |message: String| LoadError::Row { path: source.to_path_buf(), line, message };

    if row.len() != COLUMNS.len() {
        return Err(bad(format!("expected {} fields, found {}", COLUMNS.len(), row.len())));
    }
    let src: SourceRow = row.deserialize(None).map_err(|e| bad(e.to_string()))?;

    // Missing rating is kept as NaN; aggregation skips it.
    let rating = match src.rating {
        Some(r) if r.is_nan() => f32::NAN,
        Some(r) if !(0.0..=10.0).contains(&r) => {
            return Err(bad(format!("rating {r} outside 0..=10")));
        }
        Some(r) => r,
        None => f32::NAN,
    };
    let useful_count = u16::try_from(src.useful_count)
        .map_err(|_| bad(format!("negative usefulCount {}", src.useful_count)))?;

    let date = parse_date(&src.date);
    let (day, month, year) = derive_date_parts(date);

    Ok(RawRecord {
        index: Some(src.index),
        drug_name: normalize_drug_name(&src.drug_name),
        condition: src.condition,
        review: src.review,
        rating,
        date,
        useful_count,
        day,
        month,
        year,
        origin: partition.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const HEADER: &str = "\tdrugName\tcondition\treview\trating\tdate\tusefulCount\n";

    fn load(body: &str, chunk: usize) -> Result<DatasetPartition, LoadError> {
        let text = join!(HEADER, body);
        load_reader(text.as_bytes(), &PathBuf::from("mem.tsv"), Partition::Train, chunk, None)
    }

    #[test]
    fn parse_date_recovers_exact_parts() {
        let d = parse_date("May 20, 2012").unwrap();
        assert_eq!(derive_date_parts(Some(d)), (Some(20), Some(5), Some(2012)));
        let d = parse_date("December 1, 2017").unwrap();
        assert_eq!(derive_date_parts(Some(d)), (Some(1), Some(12), Some(2017)));
        let d = parse_date("February 29, 2016").unwrap();
        assert_eq!(derive_date_parts(Some(d)), (Some(29), Some(2), Some(2016)));
        let d = parse_date("March 05, 2014").unwrap();
        assert_eq!(derive_date_parts(Some(d)), (Some(5), Some(3), Some(2014)));
    }

    #[test]
    fn parse_date_rejects_other_shapes() {
        for s in [
            "2012-05-20", "20 May 2012", "May 2012", "", "Smarch 3, 2012", "February 30, 2016",
            "Dec 1, 2017", "May 20,2012", "May  20, 2012", "  May 20, 2012  ",
        ] {
            assert!(parse_date(s).is_none(), "{s}");
        }
    }

    #[test]
    fn bad_date_is_recovered_per_row() {
        let p = load("1\tvalsartan\tHigh Blood Pressure\tok\t8.0\tnot a date\t3\n", 10).unwrap();
        let r = &p.records[0];
        assert_eq!(r.drug_name, "Valsartan");
        assert_eq!((r.date, r.day, r.month, r.year), (None, None, None, None));
        assert_eq!(r.useful_count, 3);
    }

    #[test]
    fn empty_condition_is_none() {
        let p = load("7\tA\t\tok\t1\tMay 1, 2010\t0\n", 10).unwrap();
        assert_eq!(p.records[0].condition, None);
        assert_eq!(p.records[0].index, Some(7));
    }

    #[test]
    fn negative_useful_count_is_fatal() {
        let err = load("1\tA\tB\tok\t5\tMay 1, 2010\t-1\n", 10).unwrap_err();
        assert!(matches!(err, LoadError::Row { line: 2, .. }), "{err}");
    }

    #[test]
    fn rating_out_of_scale_is_fatal() {
        assert!(matches!(load("1\tA\tB\tok\t11\tMay 1, 2010\t1\n", 10), Err(LoadError::Row { .. })));
        assert!(matches!(load("1\tA\tB\tok\tten\tMay 1, 2010\t1\n", 10), Err(LoadError::Row { .. })));
    }

    #[test]
    fn empty_rating_keeps_the_row() {
        let p = load("1\tA\tB\tok\t\tMay 1, 2010\t4\n2\tA\tB\tok\t6\tMay 2, 2010\t1\n", 1).unwrap();
        assert_eq!(p.len(), 2);
        assert!(p.records[0].rating.is_nan());
        assert_eq!(p.records[0].useful_count, 4);
        assert_eq!(p.records[1].rating, 6.0);
    }

    #[test]
    fn short_row_is_fatal() {
        assert!(matches!(load("1\tA\tB\n", 10), Err(LoadError::Row { .. })));
    }

    #[test]
    fn header_mismatch_is_fatal() {
        let text = "\tdrug\tcondition\treview\trating\tdate\tusefulCount\n";
        let err = load_reader(text.as_bytes(), &PathBuf::from("h.tsv"), Partition::Test, 5, None);
        assert!(matches!(err, Err(LoadError::Header { .. })));

        let text = "Unnamed: 0\tdrugName\tcondition\treview\trating\tdate\tusefulCount\n";
        let ok = load_reader(text.as_bytes(), &PathBuf::from("h.tsv"), Partition::Test, 5, None).unwrap();
        assert!(ok.is_empty());
    }
}
