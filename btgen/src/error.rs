use std::path::PathBuf;

use thiserror::Error;

/// The primary error type that can be produced by the board template
/// generator.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error {0}: {1}")]
    Io(String, std::io::Error),
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("cannot determine file type of file: {0}")]
    CannotDetermineFileType(PathBuf),
    #[error("failed to load variables from file {0}: {1}")]
    LoadVariables(PathBuf, Box<Error>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid API URL \"{0}\"")]
    InvalidApiUrl(String),
    #[error("the API key contains characters that cannot be sent in an HTTP header")]
    InvalidApiKey,
    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),
    #[error("request to {0} failed: {1}")]
    Request(String, reqwest::Error),
    #[error("{0} not found: {1}")]
    NotFound(&'static str, String),
    #[error("request to {url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {0}: {1}")]
    Decode(String, serde_json::Error),
    #[error("\"{0}\" cannot be used as an identifier")]
    InvalidIdentifier(String),
    #[error("failed to parse template \"{0}\": {1}")]
    TemplateParse(String, handlebars::TemplateError),
    #[error("failed to render template \"{0}\": {1}")]
    TemplateRender(String, handlebars::RenderError),
    #[error("missing: {0}")]
    MissingOption(&'static str),
}
