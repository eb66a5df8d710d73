use anyhow::{Result, anyhow};

use crate::cart::{Cart, WeightTier};
use crate::catalog::Catalog;
use crate::checkout;
use crate::core::AppConfig;

/// Parse an `<id>:<weight>` item spec, e.g. `v1:500g`
pub fn parse_item(spec: &str) -> Result<(String, WeightTier)> {
    let (id, weight) = spec
        .split_once(':')
        .ok_or(anyhow!("Expected <id>:<weight>, got {}", spec))?;
    Ok((id.to_string(), weight.parse()?))
}

/// Build a cart from item specs. Repeating a spec adds another pack.
pub fn build_cart(catalog: &Catalog, items: &[String]) -> Result<Cart> {
    let mut cart = Cart::new();
    for spec in items {
        let (id, tier) = parse_item(spec)?;
        let product = catalog
            .get(&id)
            .ok_or(anyhow!("No product with id {}", id))?;
        cart.add(product, tier);
    }
    Ok(cart)
}

pub fn run(config: &AppConfig, items: Vec<String>) -> Result<()> {
    let catalog = Catalog::load(config.catalog_path.as_deref())?;
    let cart = build_cart(&catalog, &items)?;
    let (summary, link) = checkout::checkout(&cart, &config.contact_phone);
    println!("{}\n\n{}", summary, link);
    Ok(())
}
