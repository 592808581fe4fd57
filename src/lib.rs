//! Reader for SHIELD-HIT12A binary detector output (BDO) files.
//!
//! ```no_run
//! use shbdo::config::DecodeConfig;
//! use shbdo::reader::read_detector_file;
//!
//! let record = read_detector_file("dose.bdo", &DecodeConfig::default()).unwrap();
//! println!("{} [{}]", record.title(), record.units().value);
//! ```

pub mod batch;
pub mod catalog;
pub mod config;
pub mod error;
pub mod header;
pub mod payload;
pub mod reader;
pub mod record;
