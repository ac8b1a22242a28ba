//! Category Registry: the fixed set of content categories.
//!
//! Each category has a stable id (what items reference), a display name and
//! the RGB triple every derived visual (nebula, stars, edges, labels) uses.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::dataset::read_json;
use crate::error::Result;

/// One registry entry. In JSON: `{ "id": "travel", "name": "Travel", "color": "#4fc3f7" }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    pub color: Rgb,
}

impl Category {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, color: Rgb) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            color,
        }
    }
}

/// Built-in categories, in registry order.
const BUILTIN: &[(&str, &str, Rgb)] = &[
    ("lifestyle", "Lifestyle", Rgb::new(255, 183, 77)),
    ("travel", "Travel", Rgb::new(79, 195, 247)),
    ("food", "Food", Rgb::new(255, 112, 67)),
    ("fashion", "Fashion", Rgb::new(240, 98, 146)),
    ("fitness", "Fitness", Rgb::new(102, 187, 106)),
    ("art", "Art & Design", Rgb::new(171, 71, 188)),
    ("tech", "Tech", Rgb::new(38, 198, 218)),
    ("music", "Music", Rgb::new(255, 238, 88)),
];

/// Immutable lookup of categories by id.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<Category>,
}

impl CategoryRegistry {
    /// Build a registry. Later duplicates of an id are dropped.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut unique: Vec<Category> = Vec::with_capacity(categories.len());
        for c in categories {
            if unique.iter().any(|u| u.id == c.id) {
                log::warn!("duplicate category id '{}' ignored", c.id);
                continue;
            }
            unique.push(c);
        }
        Self { categories: unique }
    }

    /// Load a JSON array of categories.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let categories: Vec<Category> = read_json(path)?;
        log::info!("loaded {} categories from {}", categories.len(), path.display());
        Ok(Self::new(categories))
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Display name and color for `id`, falling back to the id itself and
    /// a neutral gray when the registry doesn't know it.
    pub fn resolve(&self, id: &str) -> (String, Rgb) {
        match self.get(id) {
            Some(c) => (c.display_name.clone(), c.color),
            None => (id.to_string(), Rgb::NEUTRAL),
        }
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(
            BUILTIN
                .iter()
                .map(|&(id, name, color)| Category::new(id, name, color))
                .collect(),
        )
    }
}
