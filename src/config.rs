use crate::error::{BdoError, BdoResult};
use clap::parser::ValueSource;
use clap::{ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default ceiling for a single payload record (1 GiB).
pub const DEFAULT_MAX_RECORD_BYTES: u64 = 1 << 30;

#[derive(Args, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeConfig {
    /// Keep raw per-run sums instead of dividing by NSTAT
    #[arg(long, default_value_t = false)]
    pub skip_normalization: bool,

    /// Reject headers announcing a payload record larger than this
    #[arg(long, default_value_t = DEFAULT_MAX_RECORD_BYTES)]
    pub max_record_bytes: u64,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            skip_normalization: false,
            max_record_bytes: DEFAULT_MAX_RECORD_BYTES,
        }
    }
}

impl DecodeConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> BdoResult<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides file settings with the flags the user actually typed;
    /// clap defaults never win over the file.
    pub fn merge_from_cli(&mut self, cli: &DecodeConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli.$field;
                }
            };
        }
        update_if_present!(skip_normalization);
        update_if_present!(max_record_bytes);
    }

    pub fn validate(&self) -> BdoResult<()> {
        if self.max_record_bytes == 0 {
            return Err(BdoError::Config(
                "max_record_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
