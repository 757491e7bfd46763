//! Interactive noise-drift viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which hosts the animation core
//! (scheduler, scene, configuration) and implements [`eframe::App`]
//! to render the mutated buffers and control the lifecycle through an
//! egui UI: the tile raster is uploaded as a texture, and the mesh and
//! particle buffers are projected to screen space as depth-faded
//! points.

use drift_core::{
    config::{Config, ConfigError},
    scheduler::{FrameSource, Scheduler},
    types::Rgba8,
};
use eframe::App;
use glam::{Mat3, Vec3};

/// Adapter delivering the scheduler's frame requests to egui.
///
/// The scheduler asks for one frame at a time; egui's repaint request
/// is exactly that primitive.
struct RepaintFrames<'a>(&'a egui::Context);

impl FrameSource for RepaintFrames<'_> {
    fn request_frame(&mut self) {
        self.0.request_repaint();
    }
}

/// Main application state for the interactive viewer.
///
/// [`Viewer`] glues together:
/// - The animation core: [`Scheduler`] (scene, clock, lifecycle).
/// - An edit buffer for [`Config`], applied atomically on request.
/// - eframe/egui callbacks for drawing and user interaction.
///
/// The typical per-frame update is:
/// 1. Handle UI interactions / input.
/// 2. Forward viewport size changes to the scheduler.
/// 3. Draw the tile raster, then the blob and particle points.
/// 4. If running, deliver one frame callback and request a repaint.
///
/// ### Fields
/// - `scheduler` - The running animation instance.
/// - `cfg` - Configuration edit buffer; only applied via the Apply
///   button, so an invalid edit never touches the running scene.
/// - `cfg_error` - Last rejected configuration, shown inline.
///
/// - `texture` - GPU texture holding the latest tile raster upload.
/// - `last_size` - Last central-panel size forwarded as a resize.
///
/// - `zoom` - Screen scale for the projected 3-D buffers.
/// - `show_tiles` / `show_blob` / `show_particles` - Layer toggles.
///
/// - `last_frame_time` - Time stamp of the last delivered frame (egui time).
/// - `last_frame_dt` - Actual delta between the last two frames (display only).
pub struct Viewer {
    scheduler: Scheduler,
    cfg: Config,
    cfg_error: Option<String>,

    texture: Option<egui::TextureHandle>,
    last_size: (u32, u32),

    zoom: f32,
    show_tiles: bool,
    show_blob: bool,
    show_particles: bool,

    last_frame_time: f64,
    last_frame_dt: f64,
}

impl Viewer {
    /// Creates a viewer around a scheduler built from the default
    /// configuration.
    ///
    /// The animation starts paused; the raster is sized on the first
    /// frame once the central panel reports its size.
    ///
    /// ### Errors
    /// Propagates [`ConfigError`] from scene construction.
    pub fn new() -> Result<Self, ConfigError> {
        let cfg = Config::default();
        let scheduler = Scheduler::new(&cfg)?;

        Ok(Self {
            scheduler,
            cfg,
            cfg_error: None,
            texture: None,
            last_size: (0, 0),
            zoom: 1.0,
            show_tiles: true,
            show_blob: true,
            show_particles: true,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        })
    }

    /// Rebuilds the scheduler from the configuration edit buffer.
    ///
    /// On success the previous instance is dropped (and thereby
    /// released) and the replacement is resized to the last known
    /// viewport. On rejection the running scene is left untouched and
    /// the error is surfaced in the config panel.
    fn apply_config(&mut self) {
        match Scheduler::new(&self.cfg) {
            Ok(mut scheduler) => {
                let (w, h) = self.last_size;
                scheduler.on_resize(w, h);
                self.scheduler = scheduler;
                self.cfg_error = None;
                self.texture = None;
            }
            Err(err) => self.cfg_error = Some(err.to_string()),
        }
    }

    /// Projects a view-space point to screen space around `center`,
    /// flipping y so that positive y goes up in world space.
    fn project(p: Vec3, center: egui::Pos2, scale: f32) -> egui::Pos2 {
        egui::pos2(center.x + p.x * scale, center.y - p.y * scale)
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

    /// Helper to draw a labeled `usize` [`egui::DragValue`].
    fn labeled_drag_usize(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut usize,
        range: std::ops::RangeInclusive<usize>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled `u32` [`egui::DragValue`].
    fn labeled_drag_u32(
        ui: &mut egui::Ui,
        label: &str,
        value: &mut u32,
        range: std::ops::RangeInclusive<u32>,
        speed: f64,
    ) {
        ui.horizontal(|ui| {
            ui.label(label);
            ui.add(egui::DragValue::new(value).range(range).speed(speed));
        });
    }

    /// Helper to draw a labeled color picker bound to an [`Rgba8`].
    fn labeled_color(ui: &mut egui::Ui, label: &str, color: &mut Rgba8) {
        ui.horizontal(|ui| {
            ui.label(label);
            let mut col =
                egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a);
            if ui.color_edit_button_srgba(&mut col).changed() {
                *color = Rgba8 {
                    r: col.r(),
                    g: col.g(),
                    b: col.b(),
                    a: col.a(),
                };
            }
        });
    }

    /// Builds the top panel UI (lifecycle controls, zoom, layer toggles).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let running = self.scheduler.is_running();
                if ui
                    .button(if running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    if running {
                        self.scheduler.stop();
                    } else {
                        self.scheduler.start(&mut RepaintFrames(ctx));
                    }
                }

                if ui.button("Step").clicked() {
                    self.scheduler.step();
                }

                if ui.button("Reset").clicked() {
                    self.apply_config();
                }

                ui.separator();
                ui.add(egui::Slider::new(&mut self.zoom, 0.2..=4.0).text("Zoom"));

                ui.separator();
                ui.checkbox(&mut self.show_tiles, "tiles");
                ui.checkbox(&mut self.show_blob, "blob");
                ui.checkbox(&mut self.show_particles, "particles");
            });
        });
    }

    /// Builds the bottom status bar (clock, frame delta, buffer sizes).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let scene = self.scheduler.scene();
                ui.label(format!("clock = {:.3}", self.scheduler.time()));
                ui.label(format!("dt last = {:.3} s", self.last_frame_dt));
                ui.separator();
                ui.label(format!("vertices = {}", scene.mesh.live().len()));
                ui.label(format!("particles = {}", scene.particles.len()));
                ui.label(format!(
                    "raster = {}×{}",
                    scene.tiles.width(),
                    scene.tiles.height()
                ));
            });
        });
    }

    /// Builds the right-hand configuration panel.
    ///
    /// All widgets edit the buffer only; the Apply button validates
    /// and rebuilds, surfacing rejections without touching the
    /// running scene.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                ui.label("Seed");
                let mut fixed = self.cfg.seed.is_some();
                if ui.checkbox(&mut fixed, "fixed seed").changed() {
                    self.cfg.seed = if fixed {
                        Some(self.scheduler.scene().noise.seed())
                    } else {
                        None
                    };
                }
                if let Some(seed) = &mut self.cfg.seed {
                    ui.add(egui::DragValue::new(seed).speed(1.0));
                }
                ui.label(format!(
                    "active seed = {}",
                    self.scheduler.scene().noise.seed()
                ));

                ui.separator();
                ui.label("Deformation");
                Self::labeled_drag_f32(ui, "amplitude:", &mut self.cfg.amplitude, 0.0..=2.0, 0.01);
                Self::labeled_drag_f32(ui, "frequency:", &mut self.cfg.frequency, 0.0..=5.0, 0.01);

                ui.separator();
                ui.label("Particles");
                Self::labeled_drag_usize(
                    ui,
                    "count:",
                    &mut self.cfg.particle_count,
                    0..=100_000,
                    10.0,
                );
                Self::labeled_drag_f32(
                    ui,
                    "half extent:",
                    &mut self.cfg.particle_half_extent,
                    0.1..=50.0,
                    0.1,
                );
                Self::labeled_drag_f32(
                    ui,
                    "drift amplitude:",
                    &mut self.cfg.drift_amplitude,
                    0.0..=0.2,
                    0.001,
                );

                ui.separator();
                ui.label("Tiles");
                Self::labeled_drag_u32(ui, "tile size:", &mut self.cfg.tile_size, 1..=256, 1.0);
                Self::labeled_color(ui, "top:", &mut self.cfg.colors[0]);
                Self::labeled_color(ui, "bottom:", &mut self.cfg.colors[1]);

                ui.separator();
                ui.label("Clock");
                Self::labeled_drag_f32(ui, "speed:", &mut self.cfg.speed, 0.0001..=0.1, 0.0005);

                ui.separator();
                if ui.button("Apply").clicked() {
                    self.apply_config();
                }
                if ui.button("Reset cfg to default").clicked() {
                    self.cfg = Config::default();
                }
                if let Some(err) = &self.cfg_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
    }

    /// Builds the central panel: raster, projected buffers, auto-run.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let painter = ui.painter_at(rect);

            // Forward viewport size changes as resize notifications.
            let size = (rect.width().max(0.0) as u32, rect.height().max(0.0) as u32);
            if size != self.last_size {
                self.scheduler.on_resize(size.0, size.1);
                self.last_size = size;
            }

            // Tile raster, uploaded as a texture and stretched over the panel.
            if self.show_tiles && size.0 > 0 && size.1 > 0 {
                let image = egui::ColorImage::from_rgba_unmultiplied(
                    [size.0 as usize, size.1 as usize],
                    self.scheduler.scene().tiles.pixels(),
                );
                let options = egui::TextureOptions::LINEAR;
                match &mut self.texture {
                    Some(texture) => texture.set(image, options),
                    None => self.texture = Some(ctx.load_texture("tile-noise", image, options)),
                }
                if let Some(texture) = &self.texture {
                    painter.image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            }

            let center = rect.center();
            let scene = self.scheduler.scene();

            // Blob mesh: live vertices under the cosmetic orientation.
            if self.show_blob {
                let rot = Mat3::from_rotation_y(scene.mesh.rotation().y)
                    * Mat3::from_rotation_x(scene.mesh.rotation().x);
                let scale = 90.0 * self.zoom;
                for v in scene.mesh.live() {
                    let p = rot * *v;
                    let depth = ((p.z + 1.5) / 3.0).clamp(0.0, 1.0);
                    let alpha = (40.0 + depth * 160.0) as u8;
                    painter.circle_filled(
                        Self::project(p, center, scale),
                        1.0,
                        egui::Color32::from_rgba_unmultiplied(0x3b, 0x82, 0xf6, alpha),
                    );
                }
            }

            // Particle cloud under its rigid rotation, depth-faded.
            if self.show_particles {
                let rot = Mat3::from_rotation_y(scene.particles.rotation_y());
                let half = self.cfg.particle_half_extent.max(0.1);
                let scale = 28.0 * self.zoom;
                for particle in &scene.particles.points {
                    let p = rot * particle.pos;
                    let depth = ((p.z + half) / (2.0 * half)).clamp(0.0, 1.0);
                    let alpha = (30.0 + depth * 150.0) as u8;
                    painter.circle_filled(
                        Self::project(p, center, scale),
                        1.5,
                        egui::Color32::from_rgba_unmultiplied(0x93, 0xc5, 0xfd, alpha),
                    );
                }
            }

            // Auto-run: deliver one frame callback, then repaint.
            if self.scheduler.is_running() {
                let now = ctx.input(|i| i.time);
                if self.last_frame_time > 0.0 {
                    self.last_frame_dt = now - self.last_frame_time;
                }
                self.last_frame_time = now;
                self.scheduler.on_frame(&mut RepaintFrames(ctx));
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_viewer_starts_paused_with_default_config() {
        let viewer = Viewer::new().unwrap();

        assert!(!viewer.scheduler.is_running());
        assert_eq!(viewer.cfg, Config::default());
        assert!(viewer.cfg_error.is_none());
        assert_eq!(viewer.scheduler.time(), 0.0);
    }

    #[test]
    fn apply_rejects_invalid_config_and_keeps_the_scene() {
        let mut viewer = Viewer::new().unwrap();
        viewer.last_size = (200, 100);
        viewer.scheduler.on_resize(200, 100);
        viewer.scheduler.step();
        let time = viewer.scheduler.time();

        viewer.cfg.tile_size = 0;
        viewer.apply_config();

        assert!(viewer.cfg_error.is_some());
        // The running instance is untouched on rejection.
        assert_eq!(viewer.scheduler.time(), time);
        assert_eq!(viewer.scheduler.scene().tiles.width(), 200);
    }

    #[test]
    fn apply_rebuilds_the_scene_at_the_last_viewport_size() {
        let mut viewer = Viewer::new().unwrap();
        viewer.last_size = (320, 240);
        viewer.scheduler.on_resize(320, 240);
        viewer.scheduler.step();

        viewer.cfg.seed = Some(42);
        viewer.cfg.particle_count = 10;
        viewer.apply_config();

        assert!(viewer.cfg_error.is_none());
        // Fresh instance: clock at zero, new config in effect, raster
        // already sized to the known viewport.
        assert_eq!(viewer.scheduler.time(), 0.0);
        assert_eq!(viewer.scheduler.scene().noise.seed(), 42);
        assert_eq!(viewer.scheduler.scene().particles.len(), 10);
        assert_eq!(viewer.scheduler.scene().tiles.width(), 320);
        assert_eq!(viewer.scheduler.scene().tiles.height(), 240);
    }

    #[test]
    fn projection_is_centered_and_flips_y() {
        let center = egui::pos2(100.0, 100.0);
        let p = Viewer::project(Vec3::new(1.0, 1.0, 0.0), center, 10.0);
        assert_eq!(p, egui::pos2(110.0, 90.0));
    }
}
