//! CSV downloads
//!
//! Generic streaming CSV responses plus the version export built on them.

pub mod csv;
pub mod versions;

pub use self::csv::{CsvDownload, CsvLines, csv_response, encode_row};
pub use versions::{version_rows, versions_filename};
