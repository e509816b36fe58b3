// src/config/consts.rs

// Sources
pub const DEFAULT_DATA_DIR: &str = "datasets";
pub const TRAIN_FILE: &str = "drugsComTrain_raw.tsv";
pub const TEST_FILE: &str = "drugsComTest_raw.tsv";
pub const SOURCE_SEP: u8 = b'\t';
pub const CHUNK_SIZE: usize = 10_000;

// "Month DD, YYYY"
pub const DATE_FORMAT: &str = "%B %d, %Y";
pub const DATE_FORMAT_UNPADDED: &str = "%B %-d, %Y";

// Net config
pub const BASE_URL: &str = "https://www.drugs.com";
pub const PAGE_EXT: &str = ".html";
pub const FETCH_TIMEOUT_SECS: u64 = 15;
pub const USER_AGENT: &str = concat!("pharmascore/", env!("CARGO_PKG_VERSION"));

// Page anchors (heading ids)
pub const ANCHOR_USES: &str = "uses";
pub const ANCHOR_WARNINGS: &str = "warnings";
pub const ANCHOR_BEFORE_TAKING: &str = "before-taking";

// Sentinels
pub const NOT_AVAILABLE: &str = "Not Available";
pub const NO_RATINGS: &str = "No Ratings";

// Review submission (0–5 slider, zero means "not rated")
pub const REVIEW_RATING_MIN: u8 = 1;
pub const REVIEW_RATING_MAX: u8 = 5;
pub const STAR_MAX: u8 = 5;

// Local log
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";
