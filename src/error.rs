use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConnectorError {
    #[error("Unsupported input format: {0:?} (expected a .xml or .zip file)")]
    UnsupportedFormat(PathBuf),

    #[error("No XML document found in archive: {0:?}")]
    NoDocumentFound(PathBuf),

    #[error("Unexpected tag: expected '{expected}', found '{found}'")]
    UnexpectedSchema { expected: String, found: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Malformed XML document: {0}")]
    MalformedDocument(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ConnectorError>;
