//! Ambient particle families, generated once from cluster geometry.
//!
//! - Nebula cores: one per cluster, radius grows with item count
//! - Wisps: small satellites in a ring around each core
//! - Bridges: interpolated-color blobs on the line between adjacent clusters
//! - Streams: a bowed chain of specks between adjacent clusters
//! - Dust: uniform background specks, independent of the data
//!
//! Phases and speeds only feed the renderer's alpha oscillation.

use std::f32::consts::{PI, TAU};

use rand::Rng;

use super::{Cluster, LayoutConfig};
use crate::color::{lerp_color, Rgb};
use crate::geom::Point;

const DUST_COLOR: Rgb = Rgb::new(200, 212, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NebulaKind {
    Core,
    Wisp,
    Bridge,
}

/// Soft radial blob.
#[derive(Debug, Clone)]
pub struct Nebula {
    pub position: Point,
    pub radius: f32,
    pub color: Rgb,
    pub phase: f32,
    pub speed: f32,
    pub kind: NebulaKind,
}

/// Tiny twinkling point (stream or dust).
#[derive(Debug, Clone)]
pub struct Speck {
    pub position: Point,
    pub size: f32,
    pub color: Rgb,
    pub phase: f32,
    pub speed: f32,
}

#[derive(Debug, Default)]
pub(crate) struct Ambient {
    pub nebulae: Vec<Nebula>,
    pub bridges: Vec<Nebula>,
    pub streams: Vec<Speck>,
    pub dust: Vec<Speck>,
}

/// Cyclic neighbor pairs over the cluster order. Two clusters form one
/// pair (not 0→1 and 1→0); fewer than two form none.
pub fn adjacent_pairs(count: usize) -> Vec<(usize, usize)> {
    match count {
        0 | 1 => Vec::new(),
        2 => vec![(0, 1)],
        n => (0..n).map(|i| (i, (i + 1) % n)).collect(),
    }
}

pub(crate) fn generate<R: Rng>(
    cfg: &LayoutConfig,
    clusters: &[Cluster],
    origin: Point,
    rng: &mut R,
) -> Ambient {
    let mut out = Ambient::default();

    for cluster in clusters {
        let core = (cfg.nebula_base_radius + cluster.item_count as f32 * cfg.nebula_per_item)
            .min(cfg.nebula_max_radius);
        out.nebulae.push(Nebula {
            position: cluster.center,
            radius: core,
            color: cluster.color,
            phase: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(0.2..0.6),
            kind: NebulaKind::Core,
        });
        let ring_lo = cfg.wisp_ring_inner.min(cfg.wisp_ring_outer);
        let ring_hi = cfg.wisp_ring_inner.max(cfg.wisp_ring_outer);
        for _ in 0..cfg.wisps_per_cluster {
            let reach = rng.gen_range(ring_lo..=ring_hi) * core;
            out.nebulae.push(Nebula {
                position: cluster.center + Point::polar(rng.gen_range(0.0..TAU), reach),
                radius: core * rng.gen_range(0.2..0.45),
                color: cluster.color,
                phase: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(0.3..0.9),
                kind: NebulaKind::Wisp,
            });
        }
    }

    for (ia, ib) in adjacent_pairs(clusters.len()) {
        let (a, b) = (&clusters[ia], &clusters[ib]);
        emit_bridges(cfg, a, b, rng, &mut out.bridges);
        emit_stream(cfg, a, b, rng, &mut out.streams);
    }

    let half = cfg.viewport_extent * cfg.dust_area_factor * 0.5;
    if half > 0.0 {
        for _ in 0..cfg.dust_count {
            out.dust.push(Speck {
                position: origin + Point::new(rng.gen_range(-half..half), rng.gen_range(-half..half)),
                size: rng.gen_range(0.3..1.3),
                color: DUST_COLOR,
                phase: rng.gen_range(0.0..TAU),
                speed: rng.gen_range(0.3..1.5),
            });
        }
    }

    out
}

fn emit_bridges<R: Rng>(cfg: &LayoutConfig, a: &Cluster, b: &Cluster, rng: &mut R, out: &mut Vec<Nebula>) {
    let k = cfg.bridge_blobs;
    for i in 0..k {
        let t = (i + 1) as f32 / (k + 1) as f32;
        let jitter = Point::polar(rng.gen_range(0.0..TAU), rng.gen_range(0.0..20.0));
        out.push(Nebula {
            position: a.center.lerp(b.center, t) + jitter,
            radius: rng.gen_range(35.0..70.0),
            color: lerp_color(a.color, b.color, t),
            phase: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(0.2..0.5),
            kind: NebulaKind::Bridge,
        });
    }
}

fn emit_stream<R: Rng>(cfg: &LayoutConfig, a: &Cluster, b: &Cluster, rng: &mut R, out: &mut Vec<Speck>) {
    let d = b.center - a.center;
    let len = d.length();
    if len < 1e-3 || cfg.stream_specks == 0 {
        return;
    }
    let normal = d.perp() * (1.0 / len);
    let side = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
    let bow = len * cfg.stream_bow * side;
    let m = cfg.stream_specks;

    for s in 0..m {
        let t = if m > 1 { s as f32 / (m - 1) as f32 } else { 0.5 };
        let on_path = a.center.lerp(b.center, t) + normal * (bow * (PI * t).sin());
        let jitter = Point::new(rng.gen_range(-6.0..6.0), rng.gen_range(-6.0..6.0));
        out.push(Speck {
            position: on_path + jitter,
            size: rng.gen_range(0.6..1.8),
            color: lerp_color(a.color, b.color, t),
            phase: rng.gen_range(0.0..TAU),
            speed: rng.gen_range(0.8..2.5),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryRegistry;
    use crate::layout::tests::item;
    use crate::layout::LayoutEngine;

    #[test]
    fn test_adjacent_pairs() {
        assert!(adjacent_pairs(0).is_empty());
        assert!(adjacent_pairs(1).is_empty());
        assert_eq!(adjacent_pairs(2), vec![(0, 1)]);
        assert_eq!(adjacent_pairs(3), vec![(0, 1), (1, 2), (2, 0)]);
    }

    #[test]
    fn test_counts_follow_config() {
        let items = vec![
            item("1", "travel", 1.0),
            item("2", "food", 1.0),
            item("3", "art", 1.0),
        ];
        let cfg = LayoutConfig::default();
        let scene = LayoutEngine::new(cfg.clone()).with_seed(3).build(&items, &CategoryRegistry::default());
        assert_eq!(scene.nebulae.len(), 3 * (1 + cfg.wisps_per_cluster));
        assert_eq!(scene.bridges.len(), 3 * cfg.bridge_blobs);
        assert_eq!(scene.streams.len(), 3 * cfg.stream_specks);
        assert_eq!(scene.dust.len(), cfg.dust_count);
    }

    #[test]
    fn test_bridge_colors_blend_between_clusters() {
        let items = vec![item("1", "travel", 1.0), item("2", "food", 1.0)];
        let mut cfg = LayoutConfig::default();
        cfg.bridge_blobs = 1;
        let scene = LayoutEngine::new(cfg).with_seed(4).build(&items, &CategoryRegistry::default());
        assert_eq!(scene.bridges.len(), 1);
        let (a, b) = (&scene.clusters[0], &scene.clusters[1]);
        assert_eq!(scene.bridges[0].color, lerp_color(a.color, b.color, 0.5));
    }

    #[test]
    fn test_stream_endpoints_near_cluster_centers() {
        let items = vec![item("1", "travel", 1.0), item("2", "food", 1.0)];
        let scene = LayoutEngine::new(LayoutConfig::default())
            .with_seed(6)
            .build(&items, &CategoryRegistry::default());
        let first = &scene.streams[0];
        let last = scene.streams.last().expect("stream");
        assert!(first.position.distance(scene.clusters[0].center) < 10.0);
        assert!(last.position.distance(scene.clusters[1].center) < 10.0);
        assert_eq!(first.color, scene.clusters[0].color);
        assert_eq!(last.color, scene.clusters[1].color);
    }

    #[test]
    fn test_dust_inside_area() {
        let items = vec![item("1", "art", 1.0)];
        let cfg = LayoutConfig::default();
        let half = cfg.viewport_extent * cfg.dust_area_factor * 0.5;
        let scene = LayoutEngine::new(cfg).with_seed(1).build(&items, &CategoryRegistry::default());
        assert!(scene
            .dust
            .iter()
            .all(|d| d.position.x.abs() <= half && d.position.y.abs() <= half));
    }
}
