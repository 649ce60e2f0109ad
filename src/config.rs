use std::{env, path::PathBuf};

use color_eyre::{Result, eyre::Context};
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;

/// Built-in candidate catalog, used unless overridden via config or CLI.
const DEFAULT_CONCENTRATIONS: &[&str] = &[
    "Artificial Intelligence",
    "Computational Biology",
    "Computer Graphics",
    "Computer Systems",
    "Databases",
    "Human-Computer Interaction",
    "Networking",
    "Programming Languages",
    "Security and Privacy",
    "Software Engineering",
    "Theory of Computation",
    "Visual Computing",
];

#[derive(Clone, Debug, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub data_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PickerConfig {
    /// Shown dim in the empty search input.
    #[serde(default)]
    pub placeholder: String,

    /// An inert picker: renders, but takes no input.
    #[serde(default)]
    pub disabled: bool,

    /// Accent color for chips and the dropdown highlight, in any form
    /// ratatui parses ("cyan", "#5b21b6", "13").
    #[serde(default)]
    pub accent: Option<String>,

    /// Ordered candidate list the dropdown filters over.
    #[serde(default)]
    pub concentrations: Vec<String>,

    /// Selection seeded at startup; deduplicated and capped by the widget.
    #[serde(default)]
    pub selected: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub app: AppConfig,
    #[serde(default, flatten)]
    pub picker: PickerConfig,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
}

impl Config {
    pub fn new(cli_source: Option<crate::cli::ClapSource>) -> Result<Self> {
        let data_dir = get_data_dir();
        let mut builder = config::Config::builder()
            .set_default("data_dir", data_dir.to_str().unwrap())?
            .set_default("placeholder", "type to search concentrations")?
            .set_default("disabled", false)?
            .set_default(
                "concentrations",
                DEFAULT_CONCENTRATIONS
                    .iter()
                    .map(|s| s.to_string())
                    .collect::<Vec<String>>(),
            )?
            .set_default("selected", Vec::<String>::new())?;

        // Add CLI source last (highest priority)
        if let Some(cli_source) = cli_source {
            builder = builder.add_source(cli_source);
        }

        let cfg: Self = builder
            .build()
            .context("Error building config")?
            .try_deserialize()
            .context("Error deserialize config")?;

        Ok(cfg)
    }
}

#[cfg(test)]
impl Config {
    pub fn test_default() -> Self {
        Self {
            app: AppConfig {
                data_dir: PathBuf::from("."),
            },
            picker: PickerConfig {
                placeholder: "type to filter".into(),
                disabled: false,
                accent: None,
                concentrations: [
                    "Artificial Intelligence",
                    "Computer Systems",
                    "Theory",
                    "Visual Computing",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
                selected: Vec::new(),
            },
        }
    }
}

pub fn get_data_dir() -> PathBuf {
    if let Some(s) = env::var(format!("{}_DATA", PROJECT_NAME.clone()))
        .ok()
        .map(PathBuf::from)
    {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.data_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".data")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "copick", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {

    use clap::Parser;
    use tempfile::tempdir_in;

    use crate::cli::{ClapSource, Cli};

    use super::*;

    #[test]
    fn data_dir_from_env() {
        let temp_data = tempdir_in(".").unwrap();

        temp_env::with_vars(
            [(
                format!("{}_DATA", PROJECT_NAME.clone()).as_str(),
                Some(temp_data.path().to_str().unwrap()),
            )],
            || {
                let config = Config::new(None).unwrap();
                assert_eq!(config.app.data_dir, temp_data.path());
            },
        );
    }

    #[test]
    fn data_dir_from_cli() {
        let args = Cli::parse_from(["test-config", "--data-dir", ".cli-data"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.app.data_dir, PathBuf::from(".cli-data"));
    }

    #[test]
    fn default_catalog_is_used_without_overrides() {
        let args = Cli::parse_from(["test-config"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.picker.concentrations.len(), DEFAULT_CONCENTRATIONS.len());
        assert_eq!(config.picker.concentrations[0], "Artificial Intelligence");
        assert!(config.picker.selected.is_empty());
        assert!(!config.picker.disabled);
    }

    #[test]
    fn placeholder_from_cli() {
        let args = Cli::parse_from(["test-config", "--placeholder", "search here"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.picker.placeholder, "search here");
    }

    #[test]
    fn catalog_from_cli_is_comma_separated() {
        let args = Cli::parse_from(["test-config", "--concentrations", "Alpha,Beta,Gamma"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.picker.concentrations, ["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn accent_from_cli() {
        let args = Cli::parse_from(["test-config", "--accent", "cyan"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.picker.accent.as_deref(), Some("cyan"));

        let args = Cli::parse_from(["test-config"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");
        assert_eq!(config.picker.accent, None);
    }

    #[test]
    fn preselection_from_cli() {
        let args = Cli::parse_from(["test-config", "--selected", "Alpha,Beta"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");

        assert_eq!(config.picker.selected, ["Alpha", "Beta"]);
    }

    #[test]
    fn disabled_from_cli() {
        let args = Cli::parse_from(["test-config", "--disabled"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");
        assert!(config.picker.disabled);

        let args = Cli::parse_from(["test-config"]);
        let config = Config::new(Some(ClapSource::new(&args))).expect("Failed to load config");
        assert!(!config.picker.disabled);
    }
}
