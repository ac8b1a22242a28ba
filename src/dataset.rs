//! Dataset boundary: reading item lists from disk, and a seeded demo set
//! for running without the scraping/analysis collaborators.

use std::path::Path;

use chrono::{Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::de::DeserializeOwned;

use crate::category::CategoryRegistry;
use crate::error::{Result, StarfieldError};
use crate::model::Item;

/// Read and deserialize a JSON file.
pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = std::fs::read_to_string(path).map_err(|source| StarfieldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| StarfieldError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of items.
pub fn load_items(path: &Path) -> Result<Vec<Item>> {
    let items: Vec<Item> = read_json(path)?;
    log::info!("loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

const DEMO_CAPTIONS: &[&str] = &[
    "golden hour",
    "first light",
    "new season",
    "behind the scenes",
    "weekend notes",
    "late night session",
    "small wins",
    "on the road",
    "studio day",
    "morning ritual",
];

const DEMO_TAGS: &[&str] = &[
    "daily", "moody", "color", "outdoors", "process", "favorites", "city", "home",
];

/// Generate `count` items spread unevenly over the first `categories`
/// registry entries. Same seed, same dataset.
pub fn demo_items(registry: &CategoryRegistry, count: usize, categories: usize, seed: u64) -> Vec<Item> {
    let ids: Vec<&str> = registry
        .iter()
        .take(categories.max(1))
        .map(|c| c.id.as_str())
        .collect();
    if ids.is_empty() {
        return Vec::new();
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_else(Utc::now);

    (0..count)
        .map(|i| {
            // Skewed pick so clusters have visibly different sizes.
            let pick: f32 = rng.gen::<f32>().powf(1.6);
            let category = ids[((pick * ids.len() as f32) as usize).min(ids.len() - 1)];
            let caption = DEMO_CAPTIONS[rng.gen_range(0..DEMO_CAPTIONS.len())];
            let tags = (0..rng.gen_range(1..=3))
                .map(|_| DEMO_TAGS[rng.gen_range(0..DEMO_TAGS.len())].to_string())
                .collect();
            // Long-tailed popularity.
            let weight = (rng.gen::<f32>().powi(3) * 5000.0).round();
            Item {
                id: format!("demo-{i}"),
                caption: caption.to_string(),
                tags,
                weight,
                timestamp: epoch + Duration::hours(rng.gen_range(0..24 * 365)),
                media_url: None,
                category_id: category.to_string(),
            }
        })
        .collect()
}
