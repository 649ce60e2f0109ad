use clap::{Parser, Subcommand};
use config::Source;

use crate::config::get_data_dir;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Tick rate, i.e. number of ticks per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 4.0)]
    pub tick_rate: f64,

    /// Frame rate, i.e. number of frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0)]
    pub frame_rate: f64,

    /// Path to the data directory
    #[arg(short, long, value_name = "PATH")]
    pub data_dir: Option<String>,

    /// Placeholder text for the empty search input
    #[arg(short, long, value_name = "TEXT")]
    pub placeholder: Option<String>,

    /// Accent color for chips and the dropdown highlight
    #[arg(short, long, value_name = "COLOR")]
    pub accent: Option<String>,

    /// Replace the built-in catalog, comma separated
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub concentrations: Option<Vec<String>>,

    /// Preselect concentrations, comma separated (at most two are kept)
    #[arg(short, long, value_name = "NAMES", value_delimiter = ',')]
    pub selected: Option<Vec<String>>,

    /// Render the picker inert: no selection can be made
    #[arg(long)]
    pub disabled: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the candidate catalog and exit
    List,
}

const VERSION_MESSAGE: &str = concat!(env!("CARGO_PKG_VERSION"));

pub fn version() -> String {
    let author = clap::crate_authors!();

    let data_dir_path = get_data_dir().display().to_string();

    format!(
        "\
{VERSION_MESSAGE}

Authors: {author}

Data directory: {data_dir_path}"
    )
}

/// Bridges set CLI flags into the `config` layer, where they take priority
/// over the built-in defaults.
#[derive(Debug, Clone)]
pub(crate) struct ClapSource {
    pub data_dir: Option<String>,
    pub placeholder: Option<String>,
    pub accent: Option<String>,
    pub concentrations: Option<Vec<String>>,
    pub selected: Option<Vec<String>>,
    pub disabled: bool,
}

impl ClapSource {
    pub fn new(cli: &Cli) -> Self {
        Self {
            data_dir: cli.data_dir.clone(),
            placeholder: cli.placeholder.clone(),
            accent: cli.accent.clone(),
            concentrations: cli.concentrations.clone(),
            selected: cli.selected.clone(),
            disabled: cli.disabled,
        }
    }
}

impl Source for ClapSource {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut map = config::Map::new();
        if let Some(data_dir) = &self.data_dir {
            map.insert(
                "data_dir".to_string(),
                config::Value::new(None, data_dir.clone()),
            );
        }
        if let Some(placeholder) = &self.placeholder {
            map.insert(
                "placeholder".to_string(),
                config::Value::new(None, placeholder.clone()),
            );
        }
        if let Some(accent) = &self.accent {
            map.insert(
                "accent".to_string(),
                config::Value::new(None, accent.clone()),
            );
        }
        if let Some(concentrations) = &self.concentrations {
            map.insert(
                "concentrations".to_string(),
                config::Value::new(None, concentrations.clone()),
            );
        }
        if let Some(selected) = &self.selected {
            map.insert(
                "selected".to_string(),
                config::Value::new(None, selected.clone()),
            );
        }
        // absent means "keep the configured value", so only a set flag lands
        // in the map
        if self.disabled {
            map.insert("disabled".to_string(), config::Value::new(None, true));
        }
        Ok(map)
    }
}
