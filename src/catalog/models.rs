use std::fmt;
use std::str::FromStr;

use anyhow::{Error, anyhow};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Non-Veg Pickles")]
    NonVegPickles,
    #[serde(rename = "Veg Pickles")]
    VegPickles,
    #[serde(rename = "Sweets")]
    Sweets,
    #[serde(rename = "NV Dry Items")]
    NvDryItems,
    #[serde(rename = "Hot Items")]
    HotItems,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::NonVegPickles,
        Category::VegPickles,
        Category::Sweets,
        Category::NvDryItems,
        Category::HotItems,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::NonVegPickles => "Non-Veg Pickles",
            Category::VegPickles => "Veg Pickles",
            Category::Sweets => "Sweets",
            Category::NvDryItems => "NV Dry Items",
            Category::HotItems => "Hot Items",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category selection used when browsing. `All` is not a real
/// product category so it only exists on the filter side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => *c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the display label or a loose slug like "veg-pickles"
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        if normalized == "all" {
            return Ok(CategoryFilter::All);
        }
        Category::ALL
            .iter()
            .find(|c| {
                c.label()
                    .chars()
                    .filter(|ch| ch.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_lowercase()
                    == normalized
            })
            .map(|c| CategoryFilter::Only(*c))
            .ok_or(anyhow!("Unknown category: {}", s))
    }
}

/// A catalog entry. `price` is the base price in whole rupees for
/// the 1kg pack; smaller packs are derived from it.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub price: u64,
    pub unit: String,
    pub image: String,
}
