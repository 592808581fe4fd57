use clap::{CommandFactory, FromArgMatches, Parser};
use shbdo::config::{DecodeConfig, DEFAULT_MAX_RECORD_BYTES};
use shbdo::error::BdoError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = DecodeConfig::default();
    assert!(!config.skip_normalization);
    assert_eq!(config.max_record_bytes, DEFAULT_MAX_RECORD_BYTES);
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_full_config() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{ "skip_normalization": true, "max_record_bytes": 4096 }}"#
    )
    .unwrap();

    let config = DecodeConfig::load_from_file(file.path()).unwrap();
    assert!(config.skip_normalization);
    assert_eq!(config.max_record_bytes, 4096);
}

#[test]
fn test_missing_fields_use_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "skip_normalization": true }}"#).unwrap();

    let config = DecodeConfig::load_from_file(file.path()).unwrap();
    assert!(config.skip_normalization);
    assert_eq!(config.max_record_bytes, DEFAULT_MAX_RECORD_BYTES);
}

#[test]
fn test_zero_limit_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, r#"{{ "max_record_bytes": 0 }}"#).unwrap();

    let err = DecodeConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, BdoError::Config(_)));
}

#[test]
fn test_malformed_json_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "not json").unwrap();

    let err = DecodeConfig::load_from_file(file.path()).unwrap_err();
    assert!(matches!(err, BdoError::Json(_)));
}

#[test]
fn test_missing_config_file() {
    let err = DecodeConfig::load_from_file("/nonexistent/shbdo.json").unwrap_err();
    assert!(matches!(err, BdoError::Io(_)));
}

#[derive(Parser, Debug)]
struct DecodeArgs {
    #[command(flatten)]
    config: DecodeConfig,
}

fn merged(file_config: DecodeConfig, args: &[&str]) -> DecodeConfig {
    let matches = DecodeArgs::command().get_matches_from(args);
    let cli = DecodeArgs::from_arg_matches(&matches).unwrap();
    let mut config = file_config;
    config.merge_from_cli(&cli.config, &matches);
    config
}

#[test]
fn test_explicit_flags_override_file() {
    let file_config = DecodeConfig {
        skip_normalization: true,
        max_record_bytes: 4096,
    };
    let config = merged(file_config, &["shbdo", "--max-record-bytes", "8"]);
    assert_eq!(config.max_record_bytes, 8);
    assert!(config.skip_normalization);
}

#[test]
fn test_clap_defaults_do_not_override_file() {
    let file_config = DecodeConfig {
        skip_normalization: true,
        max_record_bytes: 4096,
    };
    let config = merged(file_config.clone(), &["shbdo"]);
    assert_eq!(config, file_config);
}
