use crate::config::DecodeConfig;
use crate::error::BdoResult;
use crate::header::read_header;
use crate::payload::read_payload;
use crate::record::DetectorRecord;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::info;

/// Decodes a complete detector from any seekable byte source.
pub fn read_detector<R: Read + Seek>(
    reader: &mut R,
    config: &DecodeConfig,
) -> BdoResult<DetectorRecord> {
    let header = read_header(reader, config)?;
    read_payload(reader, header, config)
}

pub fn read_detector_file<P: AsRef<Path>>(
    path: P,
    config: &DecodeConfig,
) -> BdoResult<DetectorRecord> {
    let path = path.as_ref();
    info!("Reading detector: {}", path.display());
    let mut reader = BufReader::new(File::open(path)?);
    read_detector(&mut reader, config)
}
