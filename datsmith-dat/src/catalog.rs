use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use datsmith_core::{Record, Source};

use crate::error::DatError;
use crate::{clrmamepro, logiqx};

/// Header fields of a catalog file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogHeader {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

/// A parsed catalog in canonical form: header plus ordered records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub header: CatalogHeader,
    pub records: Vec<Record>,
}

impl Catalog {
    pub fn new(header: CatalogHeader, records: Vec<Record>) -> Self {
        Self { header, records }
    }
}

/// Catalog dialects understood by the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFormat {
    /// Logiqx XML (`<datafile>`)
    #[default]
    Logiqx,
    /// ClrMamePro text (`clrmamepro ( ... )`), read only
    ClrMamePro,
    /// Canonical model as JSON
    Json,
}

impl CatalogFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Logiqx | Self::ClrMamePro => "dat",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for CatalogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Logiqx => "xml",
            Self::ClrMamePro => "clrmamepro",
            Self::Json => "json",
        })
    }
}

impl FromStr for CatalogFormat {
    type Err = DatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "xml" | "logiqx" => Ok(Self::Logiqx),
            "cmp" | "clrmamepro" => Ok(Self::ClrMamePro),
            "json" => Ok(Self::Json),
            other => Err(DatError::invalid_dat(format!("Unknown catalog format: {other}"))),
        }
    }
}

/// Parse a catalog, auto-detecting the dialect from its first byte.
///
/// Every record is stamped with `source`.
pub fn parse_catalog<R: BufRead>(mut reader: R, source: Source) -> Result<Catalog, DatError> {
    // Peek at the first non-whitespace content to detect format
    let mut first_bytes = Vec::new();
    let mut buf = [0u8; 1];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            return Err(DatError::invalid_dat("Empty DAT file"));
        }
        first_bytes.push(buf[0]);
        if !buf[0].is_ascii_whitespace() {
            break;
        }
    }

    let chain = std::io::Cursor::new(first_bytes).chain(reader);
    let buffered = BufReader::new(chain);

    let mut catalog = match buf[0] {
        b'<' => logiqx::parse(buffered)?,
        b'{' => serde_json::from_reader(buffered)?,
        _ => clrmamepro::parse(buffered)?,
    };
    for record in &mut catalog.records {
        record.source = source.clone();
    }
    log::debug!(
        "parsed '{}': {} records",
        catalog.header.name,
        catalog.records.len()
    );
    Ok(catalog)
}

/// Parse a catalog file. The source label is the file name.
pub fn load_catalog(path: &Path, index: usize) -> Result<Catalog, DatError> {
    let file = File::open(path)?;
    let label = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    parse_catalog(BufReader::new(file), Source::named(index, label))
}

/// Serialize a catalog in `format`.
pub fn write_catalog<W: Write>(writer: W, catalog: &Catalog, format: CatalogFormat) -> Result<(), DatError> {
    match format {
        CatalogFormat::Logiqx => logiqx::write(writer, catalog),
        CatalogFormat::Json => {
            serde_json::to_writer_pretty(writer, catalog)?;
            Ok(())
        }
        CatalogFormat::ClrMamePro => Err(DatError::invalid_dat(
            "ClrMamePro output is not supported; use xml or json",
        )),
    }
}

/// Write a catalog to `path`, creating parent directories.
pub fn save_catalog(path: &Path, catalog: &Catalog, format: CatalogFormat) -> Result<(), DatError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_catalog(&mut writer, catalog, format)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
