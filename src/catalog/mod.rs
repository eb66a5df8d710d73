//! Read-only product catalog. The cart never mutates it; it only
//! reads products out of it when adding lines.
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

pub mod models;
mod seed;

pub use models::{Category, CategoryFilter, Product};

/// Number of products highlighted on the landing listing
const FEATURED_COUNT: usize = 3;

#[derive(Clone, Debug)]
pub struct Catalog(Vec<Product>);

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self(products)
    }

    /// The built-in catalog
    pub fn seed() -> Self {
        Self(seed::products())
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).context("Failed to parse catalog JSON")?;
        let mut ids = std::collections::HashSet::new();
        for p in products.iter() {
            if !ids.insert(p.id.as_str()) {
                bail!("Duplicate product id in catalog: {}", p.id);
            }
        }
        Ok(Self(products))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
        Self::from_json_str(&json)
    }

    /// Load from `path` when given, otherwise fall back to the seed
    /// catalog.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(p) => {
                let catalog = Self::from_json_file(p)?;
                tracing::info!("Loaded {} products from {}", catalog.len(), p);
                Ok(catalog)
            }
            None => Ok(Self::seed()),
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.0.iter().find(|p| p.id == id)
    }

    pub fn featured(&self) -> &[Product] {
        &self.0[..self.0.len().min(FEATURED_COUNT)]
    }

    /// Products in catalog order matching the category and a case
    /// insensitive substring of the name.
    pub fn filter(&self, category: CategoryFilter, search: &str) -> Vec<&Product> {
        let needle = search.to_lowercase();
        self.0
            .iter()
            .filter(|p| category.matches(p.category))
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }
}
