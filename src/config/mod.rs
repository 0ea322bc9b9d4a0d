use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    errors::Result,
    ledger::LedgerKind,
    utils::paths::{app_data_dir, config_file_in, ensure_dir, store_dir_in},
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub currency: String,
    #[serde(default = "Config::default_income_categories")]
    pub default_income_categories: Vec<String>,
    #[serde(default)]
    pub default_expense_categories: Vec<String>,
    /// Overrides the directory the key/value documents are written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: "UAH".into(),
            default_income_categories: Self::default_income_categories(),
            default_expense_categories: Vec::new(),
            data_dir: None,
        }
    }
}

impl Config {
    fn default_income_categories() -> Vec<String> {
        vec!["Salary".into(), "Bonuses".into(), "Gifts".into()]
    }

    /// Categories written on first launch for a ledger type that has never been saved.
    pub fn seed_categories(&self, kind: LedgerKind) -> &[String] {
        match kind {
            LedgerKind::Expense => &self.default_expense_categories,
            LedgerKind::Income => &self.default_income_categories,
        }
    }
}

pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self> {
        Self::from_base(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        Self::from_base(base)
    }

    fn from_base(base: PathBuf) -> Result<Self> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
            base,
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            ensure_dir(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = self.path.with_extension(TMP_SUFFIX);
        let mut file = File::create(&tmp)?;
        file.write_all(json.as_bytes())?;
        file.flush()?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Directory the durable store should use for the given configuration.
    pub fn store_dir(&self, config: &Config) -> PathBuf {
        config
            .data_dir
            .clone()
            .unwrap_or_else(|| store_dir_in(&self.base))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
