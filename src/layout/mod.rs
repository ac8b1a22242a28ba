//! Layout Engine: items → scene graph.
//!
//! Architecture:
//!   - group items by category, order clusters by descending size
//!   - place cluster centers (golden-angle spiral, or even angular division)
//!   - scatter one star per item around its cluster center
//!   - derive ambient particles from cluster geometry (`ambient`)
//!   - link nearest same-category stars (`constellation`)
//!
//! Layout runs once per dataset. Nothing here is touched by the frame loop
//! except by shared reference; only the camera moves afterwards.
//!
//! Star index == item index: `scene.stars[i]` is the star for `scene.items[i]`.

pub mod ambient;
pub mod constellation;

use std::f32::consts::{FRAC_PI_2, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::category::CategoryRegistry;
use crate::color::Rgb;
use crate::geom::Point;
use crate::model::Item;

pub use ambient::{Nebula, NebulaKind, Speck};
pub use constellation::ConstellationEdge;

/// π·(3 − √5): consecutive spiral entries never line up.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Scene graph
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// All stars sharing one category.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub category_id: String,
    pub name: String,
    pub color: Rgb,
    /// Fixed for the lifetime of the scene.
    pub center: Point,
    pub item_count: usize,
    /// Share of the whole dataset, 0–100.
    pub percentage: f32,
    /// Member star indices, in item order.
    pub stars: Vec<usize>,
}

/// One per item.
#[derive(Debug, Clone)]
pub struct Star {
    /// Index into `SceneGraph::items` (equal to the star's own index).
    pub item: usize,
    /// Index into `SceneGraph::clusters`.
    pub cluster: usize,
    pub position: Point,
    pub radius: f32,
    pub twinkle_speed: f32,
    pub twinkle_phase: f32,
    pub spike_angle: f32,
    pub is_brightest: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub items: Vec<Item>,
    /// Presentation order: descending item count.
    pub clusters: Vec<Cluster>,
    pub stars: Vec<Star>,
    /// Per-cluster cores and satellite wisps.
    pub nebulae: Vec<Nebula>,
    /// Interpolated-color blobs between adjacent clusters.
    pub bridges: Vec<Nebula>,
    /// Bowed speck chains between adjacent clusters.
    pub streams: Vec<Speck>,
    /// Data-independent background specks.
    pub dust: Vec<Speck>,
    pub edges: Vec<ConstellationEdge>,
    /// Star index of the heaviest item.
    pub brightest: Option<usize>,
}

impl SceneGraph {
    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn cluster_index(&self, category_id: &str) -> Option<usize> {
        self.clusters.iter().position(|c| c.category_id == category_id)
    }

    pub fn item_of(&self, star: &Star) -> &Item {
        &self.items[star.item]
    }

    pub fn cluster_of(&self, star: &Star) -> &Cluster {
        &self.clusters[star.cluster]
    }

    pub fn brightest_star(&self) -> Option<&Star> {
        self.brightest.and_then(|i| self.stars.get(i))
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LayoutConfig
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClusterPlacement {
    /// `angle = i·GOLDEN_ANGLE`, radius growing with i.
    #[default]
    GoldenSpiral,
    /// `2π / n` between neighbors on one ring.
    Angular,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CoordinateSpace {
    /// Origin at (0, 0), no bounds; the camera frames the content.
    #[default]
    Unbounded,
    /// Fixed logical canvas for stored/normalized coordinates:
    /// origin at the canvas center, stars clamped to `[padding, size − padding]`.
    Canvas { size: f32, padding: f32 },
}

impl CoordinateSpace {
    pub fn origin(&self) -> Point {
        match *self {
            CoordinateSpace::Unbounded => Point::ZERO,
            CoordinateSpace::Canvas { size, .. } => Point::new(size * 0.5, size * 0.5),
        }
    }

    pub fn confine(&self, p: Point) -> Point {
        match *self {
            CoordinateSpace::Unbounded => p,
            CoordinateSpace::Canvas { size, padding } => {
                let lo = padding.min(size * 0.5);
                p.clamp(lo, size - lo)
            }
        }
    }
}

/// Layout constants, all in logical scene units.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub placement: ClusterPlacement,
    pub space: CoordinateSpace,
    /// Reference viewport size the cluster ring is proportioned to.
    pub viewport_extent: f32,
    /// Cluster ring radius as a fraction of `viewport_extent`.
    pub cluster_radius_factor: f32,
    /// Extra spiral radius per cluster index.
    pub spiral_step: f32,
    pub min_spread: f32,
    pub scatter_base: f32,
    pub scatter_per_item: f32,
    pub scatter_max: f32,
    pub star_base_size: f32,
    pub star_size_range: f32,
    pub brightest_multiplier: f32,
    pub nebula_base_radius: f32,
    pub nebula_per_item: f32,
    pub nebula_max_radius: f32,
    pub wisps_per_cluster: usize,
    /// Wisp offset ring, as multiples of the core nebula radius.
    pub wisp_ring_inner: f32,
    pub wisp_ring_outer: f32,
    pub bridge_blobs: usize,
    pub stream_specks: usize,
    /// Stream bow amplitude as a fraction of the cluster distance.
    pub stream_bow: f32,
    pub dust_count: usize,
    /// Dust square side as a multiple of `viewport_extent`.
    pub dust_area_factor: f32,
    pub constellation_threshold: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            placement: ClusterPlacement::GoldenSpiral,
            space: CoordinateSpace::Unbounded,
            viewport_extent: 900.0,
            cluster_radius_factor: 0.32,
            spiral_step: 40.0,
            min_spread: 24.0,
            scatter_base: 30.0,
            scatter_per_item: 6.0,
            scatter_max: 220.0,
            star_base_size: 2.0,
            star_size_range: 6.0,
            brightest_multiplier: 1.6,
            nebula_base_radius: 90.0,
            nebula_per_item: 6.0,
            nebula_max_radius: 260.0,
            wisps_per_cluster: 5,
            wisp_ring_inner: 0.4,
            wisp_ring_outer: 1.3,
            bridge_blobs: 3,
            stream_specks: 40,
            stream_bow: 0.18,
            dust_count: 600,
            dust_area_factor: 4.0,
            constellation_threshold: 70.0,
        }
    }
}

impl LayoutConfig {
    /// Lightweight preset: angular placement inside a 1000×1000 canvas.
    pub fn canvas() -> Self {
        Self {
            placement: ClusterPlacement::Angular,
            space: CoordinateSpace::Canvas {
                size: 1000.0,
                padding: 40.0,
            },
            viewport_extent: 1000.0,
            cluster_radius_factor: 0.28,
            scatter_max: 140.0,
            dust_count: 200,
            dust_area_factor: 1.0,
            ..Self::default()
        }
    }

    pub fn with_placement(mut self, placement: ClusterPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_space(mut self, space: CoordinateSpace) -> Self {
        self.space = space;
        self
    }

    fn scatter(&self, count: usize) -> f32 {
        (self.scatter_base + self.scatter_per_item * count as f32).min(self.scatter_max)
    }

    /// Cluster center offset from the scene origin.
    fn cluster_offset(&self, index: usize, count: usize) -> Point {
        if count < 2 {
            return Point::ZERO;
        }
        let base = self.viewport_extent * self.cluster_radius_factor;
        match self.placement {
            ClusterPlacement::GoldenSpiral => Point::polar(
                index as f32 * GOLDEN_ANGLE,
                base + index as f32 * self.spiral_step,
            ),
            ClusterPlacement::Angular => {
                Point::polar(index as f32 * TAU / count as f32 - FRAC_PI_2, base)
            }
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  LayoutEngine
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Builds scene graphs. Owns its random source so a fixed seed gives
/// identical coordinates.
pub struct LayoutEngine {
    config: LayoutConfig,
    rng: StdRng,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn build(&mut self, items: &[Item], registry: &CategoryRegistry) -> SceneGraph {
        if items.is_empty() {
            log::debug!("layout: no items, empty scene");
            return SceneGraph::default();
        }

        let cfg = &self.config;
        let rng = &mut self.rng;
        let origin = cfg.space.origin();
        let groups = group_by_category(items);
        let total = items.len() as f32;
        let coerced = items.iter().filter(|i| i.effective_weight() != i.weight).count();
        if coerced > 0 {
            log::warn!("layout: {} items with non-finite or negative weight counted as 0", coerced);
        }

        let mut clusters = Vec::with_capacity(groups.len());
        let mut cluster_of_item = vec![0usize; items.len()];
        let mut rank_of_item = vec![0usize; items.len()];

        for (ci, (category_id, members)) in groups.iter().enumerate() {
            if registry.get(category_id).is_none() {
                log::warn!("layout: unknown category '{}', using neutral color", category_id);
            }
            let (name, color) = registry.resolve(category_id);
            for (rank, &item) in members.iter().enumerate() {
                cluster_of_item[item] = ci;
                rank_of_item[item] = rank;
            }
            clusters.push(Cluster {
                category_id: category_id.clone(),
                name,
                color,
                center: origin + cfg.cluster_offset(ci, groups.len()),
                item_count: members.len(),
                percentage: members.len() as f32 / total * 100.0,
                stars: members.clone(),
            });
        }

        // Max-observed normalization, guarded so all-zero weights don't divide by 0.
        let max_weight = items
            .iter()
            .map(Item::effective_weight)
            .fold(0.0f32, f32::max)
            .max(1.0);
        let brightest = items
            .iter()
            .enumerate()
            .fold(None::<(usize, f32)>, |best, (i, item)| {
                let w = item.effective_weight();
                match best {
                    Some((_, bw)) if bw >= w => best,
                    _ => Some((i, w)),
                }
            })
            .map(|(i, _)| i);

        let stars: Vec<Star> = items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let cluster = &clusters[cluster_of_item[i]];
                let count = cluster.item_count;
                let step = TAU / count as f32;
                let angle = rank_of_item[i] as f32 * step + rng.gen_range(-0.5f32..0.5) * step;
                let spread = cfg.min_spread + rng.gen::<f32>() * cfg.scatter(count);
                let position = cfg.space.confine(cluster.center + Point::polar(angle, spread));

                let is_brightest = brightest == Some(i);
                let mut radius =
                    cfg.star_base_size + item.effective_weight() / max_weight * cfg.star_size_range;
                if is_brightest {
                    radius *= cfg.brightest_multiplier;
                }

                Star {
                    item: i,
                    cluster: cluster_of_item[i],
                    position,
                    radius,
                    twinkle_speed: rng.gen_range(0.6f32..2.2),
                    twinkle_phase: rng.gen_range(0.0f32..TAU),
                    spike_angle: rng.gen_range(0.0f32..FRAC_PI_2),
                    is_brightest,
                }
            })
            .collect();

        let ambient = ambient::generate(cfg, &clusters, origin, rng);
        let edges = constellation::link(&stars, cfg.constellation_threshold);

        log::debug!(
            "layout: {} clusters, {} stars, {} edges, {} nebulae, {} bridges, {} stream specks, {} dust",
            clusters.len(),
            stars.len(),
            edges.len(),
            ambient.nebulae.len(),
            ambient.bridges.len(),
            ambient.streams.len(),
            ambient.dust.len(),
        );

        SceneGraph {
            items: items.to_vec(),
            clusters,
            stars,
            nebulae: ambient.nebulae,
            bridges: ambient.bridges,
            streams: ambient.streams,
            dust: ambient.dust,
            edges,
            brightest,
        }
    }
}

/// Build with default config and an entropy-seeded random source.
pub fn build_scene(items: &[Item], registry: &CategoryRegistry) -> SceneGraph {
    LayoutEngine::new(LayoutConfig::default()).build(items, registry)
}

/// `(category_id, item indices)`, largest group first; ties keep first-seen order.
fn group_by_category(items: &[Item]) -> Vec<(String, Vec<usize>)> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match groups.iter_mut().find(|(id, _)| *id == item.category_id) {
            Some((_, members)) => members.push(i),
            None => groups.push((item.category_id.clone(), vec![i])),
        }
    }
    groups.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
    groups
}
