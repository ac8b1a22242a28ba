//! Items: the externally supplied, already-categorized content.
//!
//! Read-only input to layout. Field names follow the JSON the content
//! collaborators emit (camelCase, RFC 3339 timestamps).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Popularity metric (likes, plays, ...). Drives star size.
    #[serde(default)]
    pub weight: f32,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub media_url: Option<String>,
    pub category_id: String,
}

impl Item {
    /// Weight as used by layout: non-finite or negative values count as 0.
    pub fn effective_weight(&self) -> f32 {
        if self.weight.is_finite() {
            self.weight.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_camel_case_json() {
        let json = r#"{
            "id": "p1",
            "caption": "sunset",
            "tags": ["beach"],
            "weight": 42,
            "timestamp": "2024-05-01T10:00:00Z",
            "mediaUrl": "https://img.example/1.jpg",
            "categoryId": "travel"
        }"#;
        let item: Item = serde_json::from_str(json).expect("parse");
        assert_eq!(item.category_id, "travel");
        assert_eq!(item.media_url.as_deref(), Some("https://img.example/1.jpg"));
        assert_eq!(item.weight, 42.0);
    }

    #[test]
    fn test_effective_weight_guards() {
        let mut item: Item = serde_json::from_str(
            r#"{"id":"x","timestamp":"2024-01-01T00:00:00Z","categoryId":"art"}"#,
        )
        .expect("parse");
        assert_eq!(item.effective_weight(), 0.0);
        item.weight = f32::NAN;
        assert_eq!(item.effective_weight(), 0.0);
        item.weight = -5.0;
        assert_eq!(item.effective_weight(), 0.0);
        item.weight = 7.5;
        assert_eq!(item.effective_weight(), 7.5);
    }
}
