//! `StarfieldApp`: the desktop front-end.
//!
//! Stands in for the page chrome around the star field. State lives here;
//! drawing is split across the sibling modules:
//!
//! - `toolbar`: category pills, reset and reshuffle controls
//! - `content`: the star-field canvas, input mapping and detail panel

pub mod content;
pub mod toolbar;

use alice_starfield::clock::SystemClock;
use alice_starfield::layout::{Cluster, Star};
use alice_starfield::render::{FrameTicket, RenderLoop};
use alice_starfield::{
    CategoryRegistry, Item, LayoutEngine, SceneSession, SelectionHandler, StarfieldConfig,
};

// ─── Detail panel ────────────────────────────────────────────────────────────

/// What the side panel shows, filled by selection callbacks.
#[derive(Debug, Clone, Default)]
pub enum Detail {
    #[default]
    Empty,
    Star {
        id: String,
        caption: String,
        category: String,
        tags: Vec<String>,
        weight: f32,
        posted: String,
        media_url: Option<String>,
    },
    Cluster {
        name: String,
        color: [u8; 3],
        count: usize,
        percentage: f32,
        /// Captions of the heaviest members, best first.
        highlights: Vec<String>,
    },
}

/// Selection sink handed to the session.
pub struct DetailPanel {
    pub detail: Detail,
    /// Caption and weight per item index.
    captions: Vec<(String, f32)>,
}

impl DetailPanel {
    fn new(items: &[Item]) -> Self {
        Self {
            detail: Detail::Empty,
            captions: items.iter().map(|i| (i.caption.clone(), i.effective_weight())).collect(),
        }
    }
}

impl SelectionHandler for DetailPanel {
    fn on_star_selected(&mut self, star: &Star, item: &Item) {
        log::debug!("detail: star {} ({})", star.item, item.id);
        self.detail = Detail::Star {
            id: item.id.clone(),
            caption: item.caption.clone(),
            category: item.category_id.clone(),
            tags: item.tags.clone(),
            weight: item.effective_weight(),
            posted: item.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            media_url: item.media_url.clone(),
        };
    }

    fn on_cluster_selected(&mut self, cluster: &Cluster, members: &[&Star]) {
        let mut ranked: Vec<&(String, f32)> = members
            .iter()
            .filter_map(|s| self.captions.get(s.item))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        self.detail = Detail::Cluster {
            name: cluster.name.clone(),
            color: [cluster.color.r, cluster.color.g, cluster.color.b],
            count: cluster.item_count,
            percentage: cluster.percentage,
            highlights: ranked.into_iter().take(5).map(|(c, _)| c.clone()).collect(),
        };
    }
}

// ─── Application state ───────────────────────────────────────────────────────

pub struct StarfieldApp {
    pub config: StarfieldConfig,
    pub registry: CategoryRegistry,
    pub items: Vec<Item>,
    pub seed: u64,
    pub session: SceneSession,
    pub render_loop: RenderLoop,
    pub ticket: FrameTicket,
    pub panel: DetailPanel,
    pub show_detail: bool,
}

impl StarfieldApp {
    pub fn new(config: StarfieldConfig, registry: CategoryRegistry, items: Vec<Item>, seed: u64) -> Self {
        let session = build_session(&config, &registry, &items, seed);
        let mut render_loop = RenderLoop::new(config.render.clone());
        let ticket = render_loop.start();
        let panel = DetailPanel::new(&items);
        Self {
            config,
            registry,
            items,
            seed,
            session,
            render_loop,
            ticket,
            panel,
            show_detail: true,
        }
    }

    /// Rebuild the scene with the next seed. The old loop is cancelled
    /// and the old session torn down before the new one starts.
    pub fn reshuffle(&mut self) {
        self.render_loop.cancel();
        self.session.teardown();
        self.seed = self.seed.wrapping_add(1);
        log::debug!("app: reshuffle with seed {}", self.seed);
        self.session = build_session(&self.config, &self.registry, &self.items, self.seed);
        self.panel.detail = Detail::Empty;
        self.ticket = self.render_loop.start();
    }

    pub fn reset_view(&mut self) {
        self.session.reset();
        self.panel.detail = Detail::Empty;
    }

    pub fn focus_category(&mut self, category_id: &str) {
        self.session.focus_on_cluster(category_id, &mut self.panel);
    }
}

fn build_session(
    config: &StarfieldConfig,
    registry: &CategoryRegistry,
    items: &[Item],
    seed: u64,
) -> SceneSession {
    let scene = LayoutEngine::new(config.layout.clone())
        .with_seed(seed)
        .build(items, registry);
    SceneSession::new(
        scene,
        config.camera.clone(),
        config.interaction.clone(),
        Box::new(SystemClock::new()),
    )
}

impl eframe::App for StarfieldApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui);
        });

        if self.show_detail {
            egui::SidePanel::right("detail")
                .default_width(260.0)
                .resizable(true)
                .show(ctx, |ui| {
                    self.draw_detail_panel(ui);
                });
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.draw_starfield(ui, ctx);
            });

        // Twinkle never stops, so keep frames coming.
        ctx.request_repaint();
    }
}
