use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Config file could not be opened")]
    FileNotFound(#[from] std::io::Error),
    #[error("Config file could not be parsed")]
    InvalidConfig(#[from] serde_yaml::Error),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct LedgerConfig {
    // where and how the per-size results tables are stored
    #[serde(default)]
    pub results: ResultsConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct ResultsConfig {
    #[serde(default = "default_results_dir")]
    pub dir: PathBuf,
    /// file stem prefix, a size-`n` series is stored as `<prefix><n>.csv`
    #[serde(default = "default_table_prefix")]
    pub prefix: String,
}

impl Default for ResultsConfig {
    fn default() -> Self {
        Self {
            dir: default_results_dir(),
            prefix: default_table_prefix(),
        }
    }
}

impl LedgerConfig {
    /// load the config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigErrors> {
        Ok(serde_yaml::from_reader(File::open(path)?)?)
    }
}

impl ResultsConfig {
    /// table path for the series with the given problem size
    pub fn table_path(&self, size: u64) -> PathBuf {
        self.dir.join(format!("{}{size}.csv", self.prefix))
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_table_prefix() -> String {
    "results".to_owned()
}
