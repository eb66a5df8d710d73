use anyhow::Result;

use super::shop::render_products;
use crate::catalog::{Catalog, CategoryFilter};
use crate::core::AppConfig;

pub fn run(config: &AppConfig, category: Option<String>, search: Option<String>) -> Result<()> {
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let filter = match category {
        Some(c) => c.parse::<CategoryFilter>()?,
        None => CategoryFilter::All,
    };
    let products = catalog.filter(filter, search.as_deref().unwrap_or(""));
    print!("{}", render_products(products));
    Ok(())
}
