use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};

use crate::presets::Presets;

#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the TOML document catalog.
    pub catalog_path: PathBuf,
    /// chrono format strings tried in order when parsing catalog dates.
    /// The source system stored dates as MM/DD/YYYY, so that spelling comes
    /// first; ISO is accepted as well.
    pub input_date_formats: Vec<String>,
    /// Display format for document dates.
    pub date_format: String,
}

#[derive(Debug, Deserialize)]
struct FileConfig {
    catalog_path: Option<PathBuf>,
    input_date_formats: Option<Vec<String>>,
    date_format: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// l30 = "last 30 days"
    /// ytd = "this year"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Public entrypoint: load config from disk (first XDG path, then native),
    /// apply defaults, and extend the global preset registry with
    /// user-defined synonyms if present.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|_| FileConfig {
            catalog_path: None,
            input_date_formats: None,
            date_format: None,
            synonyms: None,
        });

        let input_date_formats = file_config
            .input_date_formats
            .filter(|formats| !formats.is_empty())
            .unwrap_or_else(Self::default_input_formats);

        let date_format = file_config
            .date_format
            .unwrap_or_else(|| "%d %b %Y".to_string());

        let catalog_path = file_config
            .catalog_path
            .unwrap_or_else(Self::default_catalog_path);

        // Extend global preset registry once at startup.
        Self::load_synonyms(&file_config.synonyms);

        Ok(Self {
            catalog_path,
            input_date_formats,
            date_format,
        })
    }

    fn default_input_formats() -> Vec<String> {
        vec!["%m/%d/%Y".to_string(), "%Y-%m-%d".to_string()]
    }

    /// Default catalog location: `{data_dir}/transpara/catalog.toml`
    /// - macOS:   `~/Library/Application Support/transpara/catalog.toml`
    /// - Linux:   `$XDG_DATA_HOME/transpara/catalog.toml` or `~/.local/share/transpara/catalog.toml`
    /// - Windows: `%APPDATA%\transpara\catalog.toml`
    fn default_catalog_path() -> PathBuf {
        if let Some(base) = BaseDirs::new() {
            let mut p = base.data_dir().to_path_buf();
            p.push("transpara");
            p.push("catalog.toml");
            p
        } else {
            PathBuf::from("./transpara/catalog.toml")
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            let xdg = b
                .home_dir()
                .join(".config")
                .join("transpara")
                .join("config.toml");
            v.push(xdg);
            let native = b.config_dir().join("transpara").join("config.toml");
            v.push(native);
        }
        v
    }

    /// Read the first existing config file and parse it.
    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig {
            catalog_path: None,
            input_date_formats: None,
            date_format: None,
            synonyms: None,
        })
    }

    /// Parse a TOML string into `FileConfig`.
    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Merge `[synonyms]` into the global preset registry.
    /// Omits aliases that collide with a canonical preset spelling.
    /// Lowercases both alias and target for case-insensitive behavior.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        match synonyms {
            Some(map) if !map.is_empty() => {
                let pairs: Vec<(String, String)> = map
                    .iter()
                    .filter(|(alias, _)| !Presets::is_canonical(alias))
                    .map(|(a, t)| (a.clone(), t.clone()))
                    .collect();

                if !pairs.is_empty() {
                    Presets::extend(&pairs);
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::presets::{Preset, Presets};
    use std::path::Path;
    use std::path::PathBuf;

    /// Test helper to create a default `Config` for testing purposes.
    ///
    /// This is the single source of truth for test configuration.
    /// If you add a field to `Config`, you only need to update it here.
    pub(crate) fn mk_config(catalog_path: PathBuf) -> Config {
        Config {
            catalog_path,
            input_date_formats: vec!["%m/%d/%Y".to_string(), "%Y-%m-%d".to_string()],
            date_format: "%d %b %Y".to_string(),
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let expected_xdg = b
                .home_dir()
                .join(".config")
                .join("transpara")
                .join("config.toml");
            let expected_native = b.config_dir().join("transpara").join("config.toml");
            let c = super::Config::config_file_paths();
            assert_eq!(c.first(), Some(&expected_xdg));
            assert_eq!(c.get(1), Some(&expected_native));
        }
    }

    #[test]
    fn parse_file_accepts_catalog_path_and_formats() {
        let toml = r#"
            catalog_path = "/tmp/my-catalog.toml"
            input_date_formats = ["%d/%m/%Y"]
            date_format = "%Y-%m-%d"
        "#;
        let fc = super::Config::parse_file(toml).unwrap();
        assert_eq!(
            fc.catalog_path.as_deref(),
            Some(Path::new("/tmp/my-catalog.toml"))
        );
        assert_eq!(fc.input_date_formats.as_deref(), Some(&["%d/%m/%Y".to_string()][..]));
        assert_eq!(fc.date_format.as_deref(), Some("%Y-%m-%d"));
    }

    #[test]
    fn parse_file_accepts_synonyms_and_extends_registry() {
        let toml = r#"
            catalog_path = "/tmp/my-catalog.toml"

            [synonyms]
            month30 = "last 30 days"
            ANNUM = "this year"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert!(Presets::matches(Preset::Last30Days, "month30"));
        assert!(Presets::matches(Preset::ThisYear, "annum"));
    }

    #[test]
    fn parse_file_no_accepts_canonical_synonyms() {
        let toml = r#"
            catalog_path = "/tmp/my-catalog.toml"

            [synonyms]
            today = "last year"
            anteayer = "last year"
        "#;

        let fc = super::Config::parse_file(toml).unwrap();
        assert!(fc.synonyms.is_some());

        super::Config::load_synonyms(&fc.synonyms);

        assert!(!Presets::matches(Preset::LastYear, "today"));
        assert!(Presets::matches(Preset::LastYear, "anteayer"));
    }
}
