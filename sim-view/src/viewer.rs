//! Interactive grouped-particle viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`Simulation`] plus the
//! configuration being edited, and implements [`eframe::App`] to drive
//! ticks at a fixed rate and paint the arena through [`PainterCanvas`].

use eframe::App;
use glam::Vec2;
use sim_core::{
    Simulation,
    arena::Arena,
    canvas::Canvas,
    config::{GroupConfig, Placement, SimConfig},
    error::Result,
    types::Color,
};

/// Names and colors offered when a group is added from the config panel.
const PALETTE: [(&str, Color); 6] = [
    ("red", Color::RED),
    ("blue", Color::BLUE),
    ("green", Color::rgb(70, 190, 90)),
    ("orange", Color::rgb(240, 150, 40)),
    ("purple", Color::rgb(150, 80, 200)),
    ("teal", Color::rgb(40, 170, 170)),
];

/// Ticks per second while running.
const DEFAULT_FRAME_RATE: f64 = 40.0;

fn color32(c: Color) -> egui::Color32 {
    let [r, g, b, a] = c.0;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Maps arena coordinates onto a screen rectangle, preserving aspect ratio.
#[derive(Clone, Copy, Debug)]
struct ArenaView {
    origin: egui::Pos2,
    scale: f32,
}

impl ArenaView {
    /// Largest uniform scale at which `arena` fits in `rect`, centered.
    fn fit(arena: Arena, rect: egui::Rect) -> Self {
        let scale = (rect.width() / arena.width)
            .min(rect.height() / arena.height)
            .max(f32::EPSILON);
        let size = egui::vec2(arena.width, arena.height) * scale;
        Self {
            origin: rect.center() - size / 2.0,
            scale,
        }
    }

    fn to_screen(self, p: Vec2) -> egui::Pos2 {
        egui::pos2(
            self.origin.x + p.x * self.scale,
            self.origin.y + p.y * self.scale,
        )
    }

    fn to_arena(self, p: egui::Pos2) -> Vec2 {
        Vec2::new(
            (p.x - self.origin.x) / self.scale,
            (p.y - self.origin.y) / self.scale,
        )
    }
}

/// [`Canvas`] backed by an egui painter.
struct PainterCanvas<'a> {
    painter: &'a egui::Painter,
    view: ArenaView,
}

impl Canvas for PainterCanvas<'_> {
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.painter.circle_filled(
            self.view.to_screen(center),
            radius * self.view.scale,
            color32(color),
        );
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.painter.line_segment(
            [self.view.to_screen(from), self.view.to_screen(to)],
            egui::Stroke::new(1.0, color32(color)),
        );
    }
}

/// Main application state for the interactive viewer.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions (start/stop, reset, config edits).
/// 2. If `running` is `true` and a frame interval has passed, call [`Viewer::step_once`].
/// 3. Render the particles and the midline.
///
/// ### Fields
/// - `sim` - The running simulation.
/// - `cfg` - Configuration being edited; applied on Start and Reset.
/// - `running` - Whether ticks are currently being delivered.
/// - `frame_rate` - Target ticks per second.
/// - `last_step_time` / `last_step_dt` - Timing of the last automatic step (display only).
/// - `last_error` - Message from the last rejected configuration.
pub struct Viewer {
    sim: Simulation,
    cfg: SimConfig,

    running: bool,
    frame_rate: f64,
    last_step_time: f64,
    last_step_dt: f64,

    last_error: Option<String>,
}

impl Viewer {
    /// Creates a viewer with the default configuration, populated but paused.
    pub fn new() -> Result<Self> {
        let cfg = SimConfig::default();
        let sim = Simulation::new(cfg.clone(), None)?;
        log::info!(
            "viewer ready: {} particles in a {}x{} arena",
            sim.particles().len(),
            cfg.arena.width,
            cfg.arena.height
        );

        Ok(Self {
            sim,
            cfg,
            running: false,
            frame_rate: DEFAULT_FRAME_RATE,
            last_step_time: 0.0,
            last_step_dt: 0.0,
            last_error: None,
        })
    }

    /// Repopulates from the edited configuration.
    ///
    /// A rejected configuration leaves the current simulation untouched and
    /// is reported in the status bar.
    fn apply_config(&mut self) -> bool {
        let cap = self.cfg.population_capacity();
        if self.cfg.population > cap {
            log::warn!(
                "population {} exceeds arena capacity {}, clamping",
                self.cfg.population,
                cap
            );
            self.cfg.population = cap;
        }
        match self.sim.reconfigure(self.cfg.clone()) {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                log::error!("configuration rejected: {e}");
                self.last_error = Some(e.to_string());
                false
            }
        }
    }

    /// Repopulates and starts delivering ticks.
    fn start(&mut self) {
        self.running = self.apply_config();
    }

    fn stop(&mut self) {
        self.running = false;
    }

    /// Discards the current particles and repopulates, paused.
    fn reset(&mut self) {
        self.apply_config();
        self.running = false;
    }

    fn step_once(&mut self) {
        self.sim.tick();
    }

    /// Adds the first palette group not already configured.
    fn add_group(&mut self) {
        if let Some(&(name, color)) = PALETTE
            .iter()
            .find(|(name, _)| self.cfg.groups.iter().all(|g| g.name != *name))
        {
            self.cfg.groups.push(GroupConfig::new(name, 1.0, color));
        }
    }

    /// Helper to draw a labeled `f32` [`egui::DragValue`].
    fn labeled_drag_f32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut f32,
        range: std::ops::RangeInclusive<f32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Builds the top panel UI (start/stop, stepping, reset, frame rate).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if self.running {
                    if ui.button("⏸ Stop").clicked() {
                        self.stop();
                    }
                } else if ui.button("▶ Start").clicked() {
                    self.start();
                }

                if ui.button("Step").clicked() {
                    self.step_once();
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                ui.add(
                    egui::DragValue::new(&mut self.frame_rate)
                        .prefix("fps = ")
                        .range(1.0..=240.0)
                        .speed(1.0),
                );
            });
        });
    }

    /// Builds the bottom status bar (tick, midline split, group counts, errors).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let stats = self.sim.stats();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("tick = {}", self.sim.tick_count()));
                ui.separator();
                ui.label(format!("left = {}", stats.left));
                ui.label(format!("right = {}", stats.right));
                ui.separator();
                for (g, count) in self.sim.groups().iter().zip(&stats.per_group) {
                    ui.colored_label(color32(g.color), format!("{} = {}", g.name, count));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("dt last = {:.3} s", self.last_step_dt));
                    if let Some(err) = &self.last_error {
                        ui.colored_label(egui::Color32::RED, err.as_str());
                    }
                });
            });
        });
    }

    /// Builds the right-hand configuration panel.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");
                ui.label("Applied on Start / Reset");

                ui.separator();
                let cap = self.cfg.population_capacity();
                ui.horizontal(|ui| {
                    ui.label("population:");
                    ui.add(
                        egui::DragValue::new(&mut self.cfg.population)
                            .range(0..=cap)
                            .speed(1.0),
                    );
                    ui.weak(format!("max {cap}"));
                });

                ui.separator();
                ui.label("Group ratios");
                let mut remove = None;
                let can_remove = self.cfg.groups.len() > 1;
                for (i, g) in self.cfg.groups.iter_mut().enumerate() {
                    ui.horizontal(|ui| {
                        ui.colored_label(color32(g.color), format!("{}:", g.name));
                        ui.add(egui::DragValue::new(&mut g.ratio).range(0.0..=100.0).speed(0.1));
                        if can_remove && ui.small_button("✕").clicked() {
                            remove = Some(i);
                        }
                    });
                }
                if let Some(i) = remove {
                    self.cfg.groups.remove(i);
                }
                if self.cfg.groups.len() < PALETTE.len() && ui.button("Add group").clicked() {
                    self.add_group();
                }

                ui.separator();
                ui.label("Particles");
                let p = &mut self.cfg.particle;
                Self::labeled_drag_f32(ui, "radius:", &mut p.radius, 1.0..=50.0, 0.1);
                Self::labeled_drag_f32(ui, "spring:", &mut p.spring, 0.01..=1.0, 0.005);
                Self::labeled_drag_f32(ui, "friction:", &mut p.friction, -1.0..=1.0, 0.01);
                Self::labeled_drag_f32(ui, "speed:", &mut p.initial_speed, 0.0..=20.0, 0.1);

                ui.label("Placement");
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut p.placement, Placement::Random, "Random");
                    ui.selectable_value(&mut p.placement, Placement::Grouped, "Grouped");
                });

                ui.separator();
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = SimConfig::default();
                }
            });
    }

    /// Builds the central panel where the arena is drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            let arena = self.sim.arena();
            let view = ArenaView::fit(arena, rect);
            let arena_rect = egui::Rect::from_min_max(
                view.to_screen(Vec2::ZERO),
                view.to_screen(arena.size()),
            );
            painter.rect_filled(arena_rect, 0.0, egui::Color32::from_gray(24));

            let mut canvas = PainterCanvas {
                painter: &painter,
                view,
            };
            self.sim.draw(&mut canvas);

            if let Some(hover) = response.hover_pos() {
                let p = view.to_arena(hover);
                painter.text(
                    arena_rect.left_top() + egui::vec2(6.0, 6.0),
                    egui::Align2::LEFT_TOP,
                    format!("({:.0}, {:.0})", p.x, p.y),
                    egui::FontId::monospace(12.0),
                    egui::Color32::GRAY,
                );
            }

            // Deliver ticks at the target frame rate.
            if self.running {
                let now = ctx.input(|i| i.time);
                let elapsed = now - self.last_step_time;
                if elapsed >= 1.0 / self.frame_rate {
                    if self.last_step_time > 0.0 {
                        self.last_step_dt = elapsed;
                    }
                    self.step_once();
                    self.last_step_time = now;
                }

                ctx.request_repaint();
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);
    }
}
