use crate::config::DecodeConfig;
use crate::error::BdoResult;
use crate::reader::read_detector_file;
use crate::record::DetectorRecord;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::warn;

pub struct BatchOutcome {
    pub path: PathBuf,
    pub result: BdoResult<DetectorRecord>,
}

/// Decodes every file independently on the rayon pool. Output order follows
/// `paths`; a failing file does not affect the others.
pub fn read_many<P: AsRef<Path> + Sync>(paths: &[P], config: &DecodeConfig) -> Vec<BatchOutcome> {
    paths
        .par_iter()
        .map(|p| {
            let path = p.as_ref().to_path_buf();
            let result = read_detector_file(&path, config);
            if let Err(e) = &result {
                warn!("Failed to decode {}: {}", path.display(), e);
            }
            BatchOutcome { path, result }
        })
        .collect()
}
