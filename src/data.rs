// src/data.rs
//
// Review records and the resident dataset.
//
// - RawRecord: one typed row, with day/month/year derived from its date.
// - DatasetPartition: one source file (train or test), in file order.
// - UnifiedDataset: train then test, then any reviews submitted this session.
//                   It is the single owned store every operation borrows;
//                   `append_review` is its only mutator and never removes rows.

use std::ops::Range;

use chrono::{Datelike, Local, NaiveDateTime};
use serde::Serialize;

use crate::config::consts::{REVIEW_RATING_MAX, REVIEW_RATING_MIN};
use crate::core::sanitize::normalize_drug_name;
use crate::error::ReviewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    pub fn name(self) -> &'static str {
        match self { Partition::Train => "train", Partition::Test => "test" }
    }
}

/// Where a record came from. Submitted ratings are on a 0–5 scale,
/// source ratings on 0–10; the two are kept as-is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Origin {
    Train,
    Test,
    Submitted,
}

impl From<Partition> for Origin {
    fn from(p: Partition) -> Self {
        match p { Partition::Train => Origin::Train, Partition::Test => Origin::Test }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub index: Option<i32>,
    pub drug_name: String,
    pub condition: Option<String>,
    pub review: String,
    pub rating: f32,
    pub date: Option<NaiveDateTime>,
    pub useful_count: u16,
    pub day: Option<u8>,
    pub month: Option<u8>,
    pub year: Option<i16>,
    pub origin: Origin,
}

/// Day, month and year of `date`; all `None` together when the date is missing.
pub fn derive_date_parts(date: Option<NaiveDateTime>) -> (Option<u8>, Option<u8>, Option<i16>) {
    match date {
        Some(d) => (
            Some(d.day() as u8),
            Some(d.month() as u8),
            i16::try_from(d.year()).ok(),
        ),
        None => (None, None, None),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DatasetPartition {
    pub partition: Partition,
    pub records: Vec<RawRecord>,
}

impl DatasetPartition {
    pub fn new(partition: Partition) -> Self {
        Self { partition, records: Vec::new() }
    }
    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnifiedDataset {
    records: Vec<RawRecord>,
    train_len: usize,
    test_len: usize,
}

impl UnifiedDataset {
    /// Concatenate in the fixed order train → test. Row order is kept; the
    /// source `index` values are not renumbered. Partition bounds come from
    /// each record's `origin`, not from the arguments' labels.
    pub(crate) fn from_partitions(train: DatasetPartition, test: DatasetPartition) -> Self {
        let mut records = train.records;
        records.reserve(test.records.len());
        records.extend(test.records);

        let train_len = records.iter().take_while(|r| r.origin == Origin::Train).count();
        let test_len = records[train_len..].iter().take_while(|r| r.origin == Origin::Test).count();
        Self { records, train_len, test_len }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }
    pub fn records(&self) -> &[RawRecord] { &self.records }
    pub fn last(&self) -> Option<&RawRecord> { self.records.last() }

    /// Rows loaded from one source file, in file order.
    pub fn partition(&self, p: Partition) -> &[RawRecord] {
        &self.records[self.partition_range(p)]
    }

    /// Reviews appended after load.
    pub fn submitted(&self) -> &[RawRecord] {
        &self.records[self.train_len + self.test_len..]
    }

    fn partition_range(&self, p: Partition) -> Range<usize> {
        match p {
            Partition::Train => 0..self.train_len,
            Partition::Test => self.train_len..self.train_len + self.test_len,
        }
    }

    /// Records whose drug name equals the normalized `name`.
    pub fn by_drug<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a RawRecord> + 'a {
        let key = normalize_drug_name(name);
        self.records.iter().filter(move |r| r.drug_name == key)
    }

    /// Append one user review dated now. Requires non-empty text and a rating
    /// in 1..=5; on rejection the dataset is unchanged.
    pub fn append_review(
        &mut self,
        name: &str,
        review: &str,
        rating: u8,
    ) -> Result<&RawRecord, ReviewError> {
        if review.trim().is_empty() {
            return Err(ReviewError::EmptyReview);
        }
        if !(REVIEW_RATING_MIN..=REVIEW_RATING_MAX).contains(&rating) {
            return Err(ReviewError::RatingOutOfRange(rating));
        }

        let drug_name = normalize_drug_name(name);
        logf!("review appended for {drug_name} (rating {rating})");

        let date = Some(Local::now().naive_local());
        let (day, month, year) = derive_date_parts(date);
        self.records.push(RawRecord {
            index: None,
            drug_name,
            condition: None,
            review: s!(review),
            rating: f32::from(rating),
            date,
            useful_count: 0,
            day,
            month,
            year,
            origin: Origin::Submitted,
        });
        Ok(&self.records[self.records.len() - 1])
    }
}
