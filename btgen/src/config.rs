//! Run configuration for the board template generator.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::honeycomb::DEFAULT_API_URL;
use crate::Error;

/// Primary key used for the generated board template when none is supplied.
pub const DEFAULT_SEQUENCE_NUMBER: u64 = 99999;

/// Graphic index used for the generated board template when none is
/// supplied.
pub const DEFAULT_GRAPHIC: u32 = 1;

/// Immutable configuration for a single generator run.
///
/// Built once at startup and handed to each pipeline stage by reference.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    board_id: String,
    api_key: String,
    api_url: String,
    sequence_number: u64,
    graphic: u32,
    variables_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
}

impl Config {
    /// Constructor. Both the board ID and the API key are required and must
    /// be non-empty.
    pub fn new<B, K>(board_id: B, api_key: K) -> Result<Self, Error>
    where
        B: AsRef<str>,
        K: AsRef<str>,
    {
        let board_id = board_id.as_ref().trim();
        let api_key = api_key.as_ref().trim();
        if api_key.is_empty() {
            return Err(Error::MissingOption("Honeycomb API Key"));
        }
        if board_id.is_empty() {
            return Err(Error::MissingOption("Honeycomb Board ID"));
        }
        Ok(Self {
            board_id: board_id.to_string(),
            api_key: api_key.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            sequence_number: DEFAULT_SEQUENCE_NUMBER,
            graphic: DEFAULT_GRAPHIC,
            variables_file: None,
            output_file: None,
        })
    }

    pub fn with_api_url<S: AsRef<str>>(mut self, api_url: S) -> Self {
        self.api_url = api_url.as_ref().to_string();
        self
    }

    pub fn with_sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = sequence_number;
        self
    }

    pub fn with_graphic(mut self, graphic: u32) -> Self {
        self.graphic = graphic;
        self
    }

    pub fn with_variables_file<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.variables_file = path.map(Into::into);
        self
    }

    pub fn with_output_file<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.output_file = path.map(Into::into);
        self
    }

    pub fn board_id(&self) -> &str {
        &self.board_id
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn graphic(&self) -> u32 {
        self.graphic
    }

    pub fn variables_file(&self) -> Option<&Path> {
        self.variables_file.as_deref()
    }

    /// Where the generated code goes. `None` means standard output.
    pub fn output_file(&self) -> Option<&Path> {
        self.output_file.as_deref()
    }
}

// The API key never shows up in debug output.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("board_id", &self.board_id)
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("sequence_number", &self.sequence_number)
            .field("graphic", &self.graphic)
            .field("variables_file", &self.variables_file)
            .field("output_file", &self.output_file)
            .finish()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::new("abc123", "key").unwrap();
        assert_eq!(config.sequence_number(), 99999);
        assert_eq!(config.graphic(), 1);
        assert_eq!(config.api_url(), "https://api.honeycomb.io");
        assert!(config.variables_file().is_none());
        assert!(config.output_file().is_none());
    }

    #[test]
    fn missing_required_options() {
        match Config::new("board", "") {
            Err(Error::MissingOption(what)) => assert_eq!(what, "Honeycomb API Key"),
            other => panic!("expected missing API key, got {:?}", other),
        }
        match Config::new("  ", "key") {
            Err(Error::MissingOption(what)) => assert_eq!(what, "Honeycomb Board ID"),
            other => panic!("expected missing board ID, got {:?}", other),
        }
    }

    #[test]
    fn builder_sets_fields() {
        let config = Config::new("board", "key")
            .unwrap()
            .with_sequence_number(42)
            .with_graphic(7)
            .with_variables_file(Some("vars.yaml"))
            .with_output_file(None::<PathBuf>);
        assert_eq!(config.sequence_number(), 42);
        assert_eq!(config.graphic(), 7);
        assert_eq!(config.variables_file(), Some(Path::new("vars.yaml")));
        assert!(config.output_file().is_none());
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = Config::new("board", "super-secret").unwrap();
        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
