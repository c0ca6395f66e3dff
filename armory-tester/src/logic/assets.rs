use anyhow::{Context, Result};
use armory_core::{ArmorCategory, Catalog, CatalogBuilder, CatalogDiagnostic, CatalogLoad};
use std::path::{Path, PathBuf};

use crate::common::util::read_catalog_file;

/// Catalog documents shared by every scenario run.
#[derive(Debug, Clone)]
pub struct TesterAssets {
    source: PathBuf,
    load: CatalogLoad,
}

impl TesterAssets {
    /// Catalog shipped with the web front end.
    pub fn default_data_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("armory-web")
            .join("static")
            .join("data")
    }

    pub fn load_default() -> Result<Self> {
        Self::load_from_dir(&Self::default_data_root())
    }

    /// Load every category file in `dir`. Missing or broken files are
    /// recorded as failed categories; only a completely empty result is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut builder = CatalogBuilder::new();
        for category in ArmorCategory::ALL {
            match read_catalog_file(dir, category) {
                Ok(json) => {
                    if let Err(err) = builder.add_category_json(category, &json) {
                        log::warn!("{category} catalog in {} not loaded: {err}", dir.display());
                    }
                }
                Err(err) => builder.record_failure(category, format!("{err:#}")),
            }
        }
        let load = builder
            .finish()
            .with_context(|| format!("loading catalog from {}", dir.display()))?;
        Ok(Self {
            source: dir.to_path_buf(),
            load,
        })
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub const fn catalog(&self) -> &Catalog {
        &self.load.catalog
    }

    pub fn diagnostics(&self) -> &[CatalogDiagnostic] {
        &self.load.diagnostics
    }

    pub fn failed_categories(&self) -> &[ArmorCategory] {
        &self.load.failed_categories
    }
}
