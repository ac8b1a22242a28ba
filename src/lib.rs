//! Categorized content as an explorable star field.
//!
//! Items (already categorized upstream) become stars grouped into
//! category clusters, surrounded by procedural nebulae, particle streams
//! and constellation lines. A scene session owns the eased camera and the
//! gesture state; the render loop draws it once per display refresh.
//!
//! ```no_run
//! use alice_starfield::{build_scene, CategoryRegistry};
//! let registry = CategoryRegistry::default();
//! let items = alice_starfield::dataset::demo_items(&registry, 40, 5, 7);
//! let scene = build_scene(&items, &registry);
//! assert_eq!(scene.stars.len(), items.len());
//! ```

pub mod camera;
pub mod category;
pub mod clock;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geom;
pub mod interaction;
pub mod layout;
pub mod model;
pub mod render;
pub mod session;

pub use camera::{Camera, CameraConfig, View};
pub use category::{Category, CategoryRegistry};
pub use config::StarfieldConfig;
pub use error::{Result, StarfieldError};
pub use interaction::{PointerEvent, SelectionHandler};
pub use layout::{build_scene, LayoutConfig, LayoutEngine, SceneGraph};
pub use model::Item;
pub use session::SceneSession;
