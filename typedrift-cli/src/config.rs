//! Configuration file loading for typedrift.
//!
//! Discovers and loads `typedrift.toml` from the project root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;
use typedrift_domain::parse_mode;
use typedrift_extract::StdLibTable;
use typedrift_types::ComparisonMode;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "typedrift.toml";

/// Top-level configuration from typedrift.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TypedriftConfig {
    pub stdlib: StdlibConfig,
    pub compare: CompareConfig,
    pub convert: ConvertConfig,
}

/// Which module paths count as standard library.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StdlibConfig {
    /// Start from the builtin table.
    pub include_builtin: bool,

    /// Extra module paths.
    pub paths: Vec<String>,

    /// Newline-separated file of module paths, relative to the project root.
    pub file: Option<Utf8PathBuf>,
}

impl Default for StdlibConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            paths: Vec::new(),
            file: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// `identical` or `left-inclusive`.
    pub mode: Option<String>,

    /// Type-name globs to compare; empty means all.
    pub include: Vec<String>,

    /// Type-name globs to skip.
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    pub out_dir: Option<Utf8PathBuf>,
}

impl StdlibConfig {
    /// Build the table this section describes. `root` anchors a relative `file`.
    pub fn table(&self, root: &Utf8Path) -> anyhow::Result<StdLibTable> {
        let base = if self.include_builtin {
            StdLibTable::builtin()
        } else {
            StdLibTable::empty()
        };
        let mut table = base.union(self.paths.iter().cloned());

        if let Some(file) = &self.file {
            let path = if file.is_absolute() {
                file.clone()
            } else {
                root.join(file)
            };
            let extra = StdLibTable::from_file(&path)?;
            table = table.union(extra.iter().map(str::to_string));
        }

        debug!(entries = table.len(), "stdlib table ready");
        Ok(table)
    }
}

/// Discover the typedrift.toml config file in `root`.
pub fn discover_config(root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

pub fn load_config(path: &Utf8Path) -> anyhow::Result<TypedriftConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

pub fn parse_config(contents: &str) -> anyhow::Result<TypedriftConfig> {
    let config: TypedriftConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from `root`, or return default if not found.
pub fn load_or_default(root: &Utf8Path) -> anyhow::Result<TypedriftConfig> {
    match discover_config(root) {
        Some(path) => load_config(&path),
        None => Ok(TypedriftConfig::default()),
    }
}

/// Settings for `compare` after merging.
#[derive(Debug, Clone)]
pub struct MergedCompare {
    pub mode: ComparisonMode,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: TypedriftConfig,
}

impl ConfigMerger {
    pub fn new(config: TypedriftConfig) -> Self {
        Self { config }
    }

    /// CLI mode wins over the config file; without either the mode is `identical`.
    /// CLI type patterns extend the config file lists.
    pub fn merge_compare_args(
        &self,
        cli_mode: Option<ComparisonMode>,
        cli_include: &[String],
        cli_exclude: &[String],
    ) -> anyhow::Result<MergedCompare> {
        let mode = match (cli_mode, &self.config.compare.mode) {
            (Some(mode), _) => mode,
            (None, Some(name)) => parse_mode(name).context("compare.mode in typedrift.toml")?,
            (None, None) => ComparisonMode::Identical,
        };

        Ok(MergedCompare {
            mode,
            include: extend_unique(&self.config.compare.include, cli_include),
            exclude: extend_unique(&self.config.compare.exclude, cli_exclude),
        })
    }

    /// CLI `--out-dir` wins over `[convert] out_dir`.
    pub fn merge_convert_out_dir(&self, cli_out_dir: Option<Utf8PathBuf>) -> Option<Utf8PathBuf> {
        cli_out_dir.or_else(|| self.config.convert.out_dir.clone())
    }

    pub fn stdlib(&self) -> &StdlibConfig {
        &self.config.stdlib
    }
}

fn extend_unique(base: &[String], extra: &[String]) -> Vec<String> {
    let mut out = base.to_vec();
    for pattern in extra {
        if !out.contains(pattern) {
            out.push(pattern.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_root() -> (TempDir, Utf8PathBuf) {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        (temp, root)
    }

    #[test]
    fn test_parse_example_config() {
        let contents = r#"
[stdlib]
include_builtin = false
paths = ["github.com/google/uuid"]

[compare]
mode = "left-inclusive"
include = ["User*"]
exclude = ["*Test"]

[convert]
out_dir = "generated"
"#;

        let config = parse_config(contents).unwrap();
        assert!(!config.stdlib.include_builtin);
        assert_eq!(config.stdlib.paths, vec!["github.com/google/uuid"]);
        assert_eq!(config.compare.mode.as_deref(), Some("left-inclusive"));
        assert_eq!(config.compare.include, vec!["User*"]);
        assert_eq!(config.convert.out_dir, Some(Utf8PathBuf::from("generated")));
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert!(config.stdlib.include_builtin);
        assert!(config.stdlib.paths.is_empty());
        assert!(config.compare.mode.is_none());
        assert!(config.convert.out_dir.is_none());
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = parse_config("[compare\nmode = ").unwrap_err();
        assert!(err.to_string().contains("invalid TOML"));
    }

    #[test]
    fn test_cli_mode_overrides_config() {
        let config = parse_config("[compare]\nmode = \"left-inclusive\"\n").unwrap();
        let merger = ConfigMerger::new(config);

        let merged = merger
            .merge_compare_args(Some(ComparisonMode::Identical), &[], &[])
            .unwrap();
        assert_eq!(merged.mode, ComparisonMode::Identical);

        let merged = merger.merge_compare_args(None, &[], &[]).unwrap();
        assert_eq!(merged.mode, ComparisonMode::LeftInclusive);
    }

    #[test]
    fn test_mode_defaults_to_identical() {
        let merged = ConfigMerger::new(TypedriftConfig::default())
            .merge_compare_args(None, &[], &[])
            .unwrap();
        assert_eq!(merged.mode, ComparisonMode::Identical);
    }

    #[test]
    fn test_unknown_config_mode_is_error() {
        let config = parse_config("[compare]\nmode = \"sideways\"\n").unwrap();
        let err = ConfigMerger::new(config)
            .merge_compare_args(None, &[], &[])
            .unwrap_err();
        assert!(format!("{err:#}").contains("unknown mode: sideways"));
    }

    #[test]
    fn test_cli_patterns_extend_config() {
        let config = parse_config("[compare]\ninclude = [\"User*\"]\n").unwrap();
        let merged = ConfigMerger::new(config)
            .merge_compare_args(None, &["User*".to_string(), "Order".to_string()], &[])
            .unwrap();
        assert_eq!(merged.include, vec!["User*", "Order"]);
    }

    #[test]
    fn test_out_dir_precedence() {
        let config = parse_config("[convert]\nout_dir = \"generated\"\n").unwrap();
        let merger = ConfigMerger::new(config);
        assert_eq!(
            merger.merge_convert_out_dir(None),
            Some(Utf8PathBuf::from("generated"))
        );
        assert_eq!(
            merger.merge_convert_out_dir(Some(Utf8PathBuf::from("cli"))),
            Some(Utf8PathBuf::from("cli"))
        );
    }

    #[test]
    fn test_stdlib_table_from_sections() {
        let (_temp, root) = temp_root();
        std::fs::write(root.join("stdlib.txt"), "# vendored\ngithub.com/acme/clock\n").unwrap();

        let config = parse_config(
            "[stdlib]\ninclude_builtin = false\npaths = [\"example.com/std\"]\nfile = \"stdlib.txt\"\n",
        )
        .unwrap();
        let table = config.stdlib.table(&root).unwrap();
        assert!(!table.contains("time"));
        assert!(table.contains("example.com/std"));
        assert!(table.contains("github.com/acme/clock"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_stdlib_table_missing_file_is_error() {
        let (_temp, root) = temp_root();
        let config = parse_config("[stdlib]\nfile = \"absent.txt\"\n").unwrap();
        assert!(config.stdlib.table(&root).is_err());
    }

    #[test]
    fn test_default_stdlib_is_builtin() {
        let (_temp, root) = temp_root();
        let table = StdlibConfig::default().table(&root).unwrap();
        assert!(table.contains("time"));
    }

    #[test]
    fn test_discover_config_some_and_none() {
        let (_temp, root) = temp_root();
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn test_load_or_default_returns_default_when_missing() {
        let (_temp, root) = temp_root();
        let cfg = load_or_default(&root).expect("load default");
        assert!(cfg.stdlib.include_builtin);
        assert!(cfg.compare.include.is_empty());
    }
}
