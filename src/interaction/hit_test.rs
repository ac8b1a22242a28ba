//! Tap → scene entity.
//!
//! The tap is mapped back into scene space through the inverse camera
//! transform, then compared against stars and cluster centers with a
//! threshold of `radius / zoom`, so hit targets keep a constant on-screen
//! size at every zoom level. Stars win over their own cluster.

use super::InteractionConfig;
use crate::camera::View;
use crate::geom::{Point, Viewport};
use crate::layout::SceneGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Index into `SceneGraph::stars`.
    Star(usize),
    /// Index into `SceneGraph::clusters`.
    Cluster(usize),
}

pub fn hit_test(
    scene: &SceneGraph,
    view: View,
    viewport: Viewport,
    screen: Point,
    cfg: &InteractionConfig,
) -> Option<Hit> {
    if !(view.zoom > 0.0) {
        return None;
    }
    let logical = view.screen_to_world(screen, viewport);

    let star_limit = cfg.star_hit_radius / view.zoom;
    if let Some(i) = nearest_within(scene.stars.iter().map(|s| s.position), logical, star_limit) {
        return Some(Hit::Star(i));
    }

    let cluster_limit = cfg.cluster_hit_radius / view.zoom;
    nearest_within(scene.clusters.iter().map(|c| c.center), logical, cluster_limit).map(Hit::Cluster)
}

fn nearest_within(points: impl Iterator<Item = Point>, target: Point, limit: f32) -> Option<usize> {
    let limit_sq = limit * limit;
    points
        .enumerate()
        .map(|(i, p)| (i, p.distance_squared(target)))
        .filter(|&(_, d)| d <= limit_sq)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryRegistry;
    use crate::layout::tests::item;
    use crate::layout::{LayoutConfig, LayoutEngine};

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn scene() -> SceneGraph {
        let items = vec![
            item("1", "travel", 4.0),
            item("2", "travel", 2.0),
            item("3", "food", 1.0),
        ];
        LayoutEngine::new(LayoutConfig::default())
            .with_seed(12)
            .build(&items, &CategoryRegistry::default())
    }

    #[test]
    fn test_tap_on_star() {
        let scene = scene();
        let view = View::HOME;
        let target = scene.stars[2].position;
        let screen = view.world_to_screen(target, VP);
        let hit = hit_test(&scene, view, VP, screen, &InteractionConfig::default());
        assert_eq!(hit, Some(Hit::Star(2)));
    }

    #[test]
    fn test_threshold_scale_invariant() {
        let scene = scene();
        let cfg = InteractionConfig::default();
        let star = scene.stars[0].position;
        // 12 screen pixels off the star at both zoom levels.
        for zoom in [1.0, 2.0] {
            let view = View {
                pan: star * -1.0,
                zoom,
            };
            let screen = view.world_to_screen(star, VP) + Point::new(12.0, 0.0);
            let hit = hit_test(&scene, view, VP, screen, &cfg);
            assert_eq!(hit, Some(Hit::Star(0)), "zoom {zoom}");
        }
    }

    #[test]
    fn test_cluster_when_no_star_close() {
        let mut scene = scene();
        // Push every star far away so only the cluster center can match.
        for s in &mut scene.stars {
            s.position = Point::new(5000.0, 5000.0);
        }
        let view = View::HOME;
        let screen = view.world_to_screen(scene.clusters[1].center + Point::new(30.0, 0.0), VP);
        let hit = hit_test(&scene, view, VP, screen, &InteractionConfig::default());
        assert_eq!(hit, Some(Hit::Cluster(1)));
    }

    #[test]
    fn test_empty_space_is_noop() {
        let scene = scene();
        let view = View {
            pan: Point::new(-4000.0, -4000.0),
            zoom: 1.0,
        };
        assert_eq!(hit_test(&scene, view, VP, VP.center(), &InteractionConfig::default()), None);
        assert_eq!(
            hit_test(&SceneGraph::default(), View::HOME, VP, VP.center(), &InteractionConfig::default()),
            None
        );
    }
}
