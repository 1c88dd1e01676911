#![deny(missing_docs)]

//! # Configuration
//!
//! Builds the mapping table used by the converter. Layers, lowest first:
//! built-in defaults, an optional config file, `--type` flags, `--fallback`.
//!
//! Config files are YAML (`.yaml`/`.yml`) or JSON (anything else):
//!
//! ```yaml
//! types:
//!   uuid.UUID: string
//!   decimal.Decimal: string
//! fallback: unknown
//! ```

use crate::error::{CliError, CliResult};
use std::fs;
use std::path::Path;
use struct2type_core::{AppError, MappingConfig, MappingOverrides};

/// Helper to parse "GoType=TsType" arguments.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid GO=TS: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Reads overrides from a YAML or JSON file, chosen by extension.
pub fn load_overrides(path: &Path) -> CliResult<MappingOverrides> {
    if !path.exists() {
        return Err(CliError::Config(format!(
            "Config file not found: {:?}",
            path
        )));
    }

    let content = fs::read_to_string(path)?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let overrides = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?,
        _ => serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))?,
    };

    tracing::debug!(path = %path.display(), "loaded mapping overrides");
    Ok(overrides)
}

/// Resolves the final mapping table from all configuration layers.
pub fn resolve(
    config_path: Option<&Path>,
    types: &[(String, String)],
    fallback: Option<&str>,
) -> CliResult<MappingConfig> {
    let mut config = MappingConfig::default();

    if let Some(path) = config_path {
        config = config
            .merge(load_overrides(path)?)
            .map_err(config_error)?;
    }

    let flags = MappingOverrides {
        types: types.iter().cloned().collect(),
        fallback: fallback.map(str::to_string),
    };
    config.merge(flags).map_err(config_error)
}

fn config_error(err: AppError) -> CliError {
    match err {
        AppError::Config(msg) => CliError::Config(msg),
        other => CliError::Core(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::File::create(&path)
            .unwrap()
            .write_all(content.as_bytes())
            .unwrap();
        path
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("uuid.UUID=string").unwrap(),
            ("uuid.UUID".to_string(), "string".to_string())
        );
        assert!(parse_key_val("nope").is_err());
    }

    #[test]
    fn test_defaults_without_layers() {
        let config = resolve(None, &[], None).unwrap();
        assert_eq!(config, MappingConfig::default());
    }

    #[test]
    fn test_yaml_file_then_flags() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "struct2type.yaml",
            "types:\n  uuid.UUID: string\n  int64: string\nfallback: unknown\n",
        );

        let flags = vec![("int64".to_string(), "bigint".to_string())];
        let config = resolve(Some(path.as_path()), &flags, None).unwrap();

        assert_eq!(config.types.get("uuid.UUID").map(String::as_str), Some("string"));
        assert_eq!(config.types.get("int64").map(String::as_str), Some("bigint"));
        assert_eq!(config.fallback, "unknown");
    }

    #[test]
    fn test_json_file_and_fallback_flag() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "mapping.json",
            r#"{ "types": { "decimal.Decimal": "string" }, "fallback": "unknown" }"#,
        );

        let config = resolve(Some(path.as_path()), &[], Some("never")).unwrap();
        assert_eq!(config.types.get("decimal.Decimal").map(String::as_str), Some("string"));
        assert_eq!(config.fallback, "never");
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempdir().unwrap();
        let err = resolve(Some(dir.path().join("absent.yaml").as_path()), &[], None).unwrap_err();
        match err {
            CliError::Config(msg) => assert!(msg.contains("Config file not found")),
            other => panic!("Wrong error type: {}", other),
        }
    }

    #[test]
    fn test_invalid_config_file() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "bad.yml", "typos:\n  a: b\n");
        assert!(matches!(
            resolve(Some(path.as_path()), &[], None),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_empty_flag_entry_rejected() {
        let flags = vec![("".to_string(), "string".to_string())];
        assert!(matches!(resolve(None, &flags, None), Err(CliError::Config(_))));
    }
}
