//! Optional `rdg.toml` defaults.
//!
//! ```toml
//! [defaults]
//! catalog = "catalog.json"
//! encode_fields = "encode_fields.txt"
//! rdg = "Stroke"
//! tool = "FIM"
//! sections = ["clinicalstaff", "1", "2"]
//! count = 10
//! ```
//!
//! Values resolve as command-line flag, then config file, then the
//! `RDG_CATALOG` environment variable (catalog only), then built-in
//! defaults.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use rdg_catalog::default_sections;
use rdg_model::AssessmentTool;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const CONFIG_FILENAME: &str = "rdg.toml";
pub const CATALOG_ENV: &str = "RDG_CATALOG";
pub const DEFAULT_COUNT: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdgConfig {
    pub defaults: Defaults,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub catalog: Option<PathBuf>,
    pub encode_fields: Option<PathBuf>,
    pub rdg: Option<String>,
    pub tool: Option<String>,
    pub sections: Option<Vec<String>>,
    pub count: Option<usize>,
}

impl RdgConfig {
    /// Load `explicit`, or `rdg.toml` from the working directory if present.
    ///
    /// An explicit path must exist; a missing implicit file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None => {
                let path = Path::new(CONFIG_FILENAME);
                match fs::read_to_string(path) {
                    Ok(text) => Self::parse(&text)
                        .with_context(|| format!("parse {}", path.display())),
                    Err(error) if error.kind() == io::ErrorKind::NotFound => {
                        debug!("no {CONFIG_FILENAME} in working directory, using defaults");
                        Ok(Self::default())
                    }
                    Err(error) => Err(error).with_context(|| format!("read {}", path.display())),
                }
            }
        }
    }

    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        let config = Self::parse(&text).with_context(|| format!("parse {}", path.display()))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Catalog path from flag, config, then `env` (the value of `RDG_CATALOG`).
    pub fn catalog_path(&self, flag: Option<&Path>, env: Option<OsString>) -> Result<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.defaults.catalog.clone())
            .or_else(|| env.filter(|value| !value.is_empty()).map(PathBuf::from))
            .ok_or_else(|| {
                anyhow!("no field catalog given; pass --catalog, set [defaults].catalog or {CATALOG_ENV}")
            })
    }

    pub fn encode_fields_path(&self, flag: Option<&Path>) -> Option<PathBuf> {
        flag.map(Path::to_path_buf)
            .or_else(|| self.defaults.encode_fields.clone())
    }

    /// Case category; empty selects every category.
    pub fn category(&self, flag: Option<&str>) -> String {
        flag.map(str::to_string)
            .or_else(|| self.defaults.rdg.clone())
            .unwrap_or_default()
    }

    /// Unrecognised `[defaults].tool` values fall back to FIM.
    pub fn tool(&self, flag: Option<AssessmentTool>) -> AssessmentTool {
        if let Some(tool) = flag {
            return tool;
        }
        let configured = self.defaults.tool.as_deref();
        if let Some(text) = configured
            && text.parse::<AssessmentTool>().is_err()
        {
            warn!(tool = text, "unknown [defaults].tool, using FIM");
        }
        AssessmentTool::from_selection(configured)
    }

    /// Section filter, lower-cased.
    pub fn sections(&self, flag: &[String]) -> Vec<String> {
        let sections = if !flag.is_empty() {
            flag.to_vec()
        } else {
            self.defaults
                .sections
                .clone()
                .unwrap_or_else(default_sections)
        };
        sections
            .iter()
            .map(|section| section.trim().to_lowercase())
            .filter(|section| !section.is_empty())
            .collect()
    }

    pub fn count(&self, flag: Option<usize>) -> usize {
        flag.or(self.defaults.count).unwrap_or(DEFAULT_COUNT)
    }
}

/// Current value of `RDG_CATALOG`.
pub fn catalog_env() -> Option<OsString> {
    std::env::var_os(CATALOG_ENV)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[defaults]
catalog = "kb/catalog.json"
rdg = "Stroke"
tool = "mbi"
sections = ["ClinicalStaff", "3"]
count = 12
"#;

    #[test]
    fn flag_beats_config_beats_env() {
        let config = RdgConfig::parse(SAMPLE).unwrap();
        let env = Some(OsString::from("env.json"));
        assert_eq!(
            config.catalog_path(Some(Path::new("flag.json")), env.clone()).unwrap(),
            PathBuf::from("flag.json")
        );
        assert_eq!(
            config.catalog_path(None, env.clone()).unwrap(),
            PathBuf::from("kb/catalog.json")
        );
        assert_eq!(
            RdgConfig::default().catalog_path(None, env).unwrap(),
            PathBuf::from("env.json")
        );
        assert!(RdgConfig::default().catalog_path(None, None).is_err());
    }

    #[test]
    fn defaults_fill_missing_flags() {
        let config = RdgConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.category(None), "Stroke");
        assert_eq!(config.category(Some("Hip fracture")), "Hip fracture");
        assert_eq!(config.tool(None), AssessmentTool::Mbi);
        assert_eq!(config.tool(Some(AssessmentTool::Fim)), AssessmentTool::Fim);
        assert_eq!(config.sections(&[]), vec!["clinicalstaff", "3"]);
        assert_eq!(config.count(None), 12);
        assert_eq!(config.count(Some(2)), 2);
    }

    #[test]
    fn empty_config_uses_built_in_defaults() {
        let config = RdgConfig::parse("").unwrap();
        assert_eq!(config, RdgConfig::default());
        assert_eq!(config.tool(None), AssessmentTool::Fim);
        assert_eq!(config.sections(&[]), default_sections());
        assert_eq!(config.count(None), DEFAULT_COUNT);
    }

    #[test]
    fn unknown_tool_falls_back_to_fim() {
        let config = RdgConfig::parse("[defaults]\ntool = \"barthel\"").unwrap();
        assert_eq!(config.tool(None), AssessmentTool::Fim);
        assert_eq!(config.tool(Some(AssessmentTool::Mbi)), AssessmentTool::Mbi);
        let config = RdgConfig::parse("[defaults]\ntool = \" mbi \"").unwrap();
        assert_eq!(config.tool(None), AssessmentTool::Mbi);
    }
}
