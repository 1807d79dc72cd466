use serde_derive::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EvalError, Result};
use crate::model::Label;

/// Evaluation settings, read from a TOML file. Every key is optional.
///
/// ```toml
/// labels = [3, 5, 8]
/// skip_header = true
/// model_delimiter = " "
/// test_delimiter = ","
/// progress = false
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Label for each model row, in file order. Rows are labelled 0..N-1
    /// when absent.
    pub labels: Option<Vec<Label>>,
    /// Discard the first line of the test file.
    pub skip_header: bool,
    pub model_delimiter: char,
    pub test_delimiter: char,
    /// Show a progress bar on stderr while scoring.
    pub progress: bool,
}

impl Default for EvalConfig {
    fn default() -> EvalConfig {
        EvalConfig {
            labels: None,
            skip_header: true,
            model_delimiter: ' ',
            test_delimiter: ',',
            progress: false,
        }
    }
}

impl EvalConfig {
    pub fn load<P: AsRef<Path>>(filename: P) -> Result<EvalConfig> {
        let path = filename.as_ref();
        let text = fs::read_to_string(path).map_err(|why| EvalError::open(path, why))?;
        EvalConfig::parse(&text)
    }

    pub fn parse(text: &str) -> Result<EvalConfig> {
        let config: EvalConfig = toml::from_str(text)?;
        if config.model_delimiter == '\n' || config.test_delimiter == '\n' {
            return Err(EvalError::Config("newline can't be a delimiter".to_string()));
        }
        Ok(config)
    }
}
