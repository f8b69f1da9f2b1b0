use crate::config::{XML_EXTENSION, ZIP_EXTENSION};
use crate::error::{ConnectorError, Result};
use crate::parser::{parse_document, Element};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::{debug, info};

/// Reads a DrugBank export into an element tree. `.xml` files are parsed directly,
/// `.zip` archives are scanned for their first `.xml` entry.
pub fn load_document(path: &Path) -> Result<Element> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(XML_EXTENSION) => {
            info!("Parsing XML document: {:?}", path);
            let file = File::open(path)?;
            parse_document(BufReader::new(file))
        }
        Some(ZIP_EXTENSION) => {
            info!("Opening archive: {:?}", path);
            parse_first_xml_entry(path)
        }
        _ => Err(ConnectorError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Streams the first `.xml` entry through the parser. Entries after it are never opened.
fn parse_first_xml_entry(path: &Path) -> Result<Element> {
    let file = File::open(path)?;
    let mut archive = zip::ZipArchive::new(BufReader::new(file))?;
    let suffix = format!(".{}", XML_EXTENSION);

    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if !entry.name().ends_with(&suffix) {
            debug!(entry = entry.name(), "Skipping archive entry");
            continue;
        }

        info!(entry = entry.name(), "Reading XML entry from archive");
        return parse_document(BufReader::new(entry));
    }

    Err(ConnectorError::NoDocumentFound(path.to_path_buf()))
}
