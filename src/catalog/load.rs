use super::{Catalog, CatalogError};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Some(Self::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Some(Self::Yaml)
            }
            _ => None,
        }
    }
}

pub fn parse_catalog(raw: &str, format: CatalogFormat, origin: &str) -> Result<Catalog, CatalogError> {
    let catalog: Catalog = match format {
        CatalogFormat::Json => serde_json::from_str(raw).map_err(|err| CatalogError::Parse {
            path: origin.to_string(),
            message: err.to_string(),
        })?,
        CatalogFormat::Yaml => serde_yaml::from_str(raw).map_err(|err| CatalogError::Parse {
            path: origin.to_string(),
            message: err.to_string(),
        })?,
    };
    catalog.validate()?;
    Ok(catalog)
}

pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let format = CatalogFormat::from_path(path).ok_or_else(|| CatalogError::UnsupportedFormat {
        path: path.display().to_string(),
    })?;
    let raw = fs::read_to_string(path).map_err(|source| CatalogError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_catalog(&raw, format, &path.display().to_string())
}
