//! Main window: gradient backdrop with a centered card holding the buttons,
//! the thumbnail and the result text.

mod state;
mod theme;

pub use state::{AppState, StartError};

use eframe::{App, Frame, egui};
use egui::{Align, Align2, Color32, Layout, RichText, Stroke};
use image::imageops::FilterType;
use plant_core::Classifier;
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const WINDOW_TITLE: &str = "🌿 Plant Image Classifier 🌱";

const CARD_SIZE: egui::Vec2 = egui::vec2(450.0, 550.0);
const CARD_MARGIN: i8 = 10;
const BUTTON_SIZE: egui::Vec2 = egui::vec2(150.0, 34.0);
const BUTTON_GAP: f32 = 40.0;
const RESULT_WRAP_WIDTH: f32 = 400.0;

pub struct UiApp {
    classifier: Arc<Classifier>,
    state: AppState,
    thumbnail: Option<egui::TextureHandle>,
    thumbnail_size: u32,
    /// Hover flags for the upload and classify buttons from the last frame.
    hovered: [bool; 2],
    version: &'static str,
}

impl UiApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        classifier: Arc<Classifier>,
        thumbnail_size: u32,
        version: &'static str,
    ) -> Self {
        theme::apply_theme(&cc.egui_ctx);
        Self::with_classifier(classifier, thumbnail_size, version)
    }

    fn with_classifier(classifier: Arc<Classifier>, thumbnail_size: u32, version: &'static str) -> Self {
        Self {
            classifier,
            state: AppState::default(),
            thumbnail: None,
            thumbnail_size,
            hovered: [false; 2],
            version,
        }
    }

    fn upload_image(&mut self, ctx: &egui::Context) {
        if let Some(path) = FileDialog::new().set_directory(".").pick_file() {
            self.open_image(ctx, path);
        }
    }

    /// Shows `path` as the current image. On a decode failure the previous
    /// selection and thumbnail stay in place.
    fn open_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        match load_thumbnail(ctx, &path, self.thumbnail_size) {
            Ok(texture) => {
                tracing::info!("selected {}", path.display());
                self.thumbnail = Some(texture);
                self.state.select_image(path);
            }
            Err(e) => {
                tracing::warn!("cannot show {}: {e}", path.display());
                self.state.show_message(format!("Could not open image: {e}"));
            }
        }
    }

    fn classify(&mut self, ctx: &egui::Context) {
        let repaint = ctx.clone();
        match self
            .state
            .start_classify(Arc::clone(&self.classifier), move || repaint.request_repaint())
        {
            Ok(()) => {}
            Err(StartError::NoImage) => show_error("Error", &StartError::NoImage.to_string()),
            Err(e) => {
                tracing::warn!("classify request rejected: {e}");
                self.state.show_message(e.to_string());
            }
        }
    }

    fn render_card(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        ui.set_min_size(CARD_SIZE);
        ui.set_max_width(CARD_SIZE.x);
        ui.vertical_centered(|ui| {
            ui.add_space(20.0);
            ui.label(RichText::new(WINDOW_TITLE).size(26.0).strong().color(theme::THEME_COLOR));
            ui.add_space(20.0);

            ui.horizontal(|ui| {
                let used = BUTTON_SIZE.x * 2.0 + BUTTON_GAP;
                ui.add_space(((ui.available_width() - used) / 2.0).max(0.0));
                if themed_button(ui, "Upload Image", true, &mut self.hovered[0]).clicked() {
                    self.upload_image(ctx);
                }
                ui.add_space(BUTTON_GAP);
                let can_classify = !self.state.is_busy();
                if themed_button(ui, "Classify Image", can_classify, &mut self.hovered[1]).clicked() {
                    self.classify(ctx);
                }
            });
            ui.add_space(20.0);

            self.render_thumbnail(ui);
            ui.add_space(20.0);

            ui.scope(|ui| {
                ui.set_max_width(RESULT_WRAP_WIDTH);
                ui.add(
                    egui::Label::new(
                        RichText::new(self.state.result_text())
                            .size(16.0)
                            .strong()
                            .color(theme::THEME_COLOR),
                    )
                    .wrap(),
                );
            });

            ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
                ui.add_space(10.0);
                ui.label(
                    RichText::new(format!("Developed by The Perfect Mix · v{}", self.version))
                        .size(12.0)
                        .italics()
                        .color(theme::THEME_COLOR),
                );
            });
        });
    }

    fn render_thumbnail(&self, ui: &mut egui::Ui) {
        let side = self.thumbnail_size as f32;
        let (resp, painter) = ui.allocate_painter(egui::vec2(side, side), egui::Sense::hover());
        let r = resp.rect;
        match &self.thumbnail {
            Some(texture) => {
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                painter.image(texture.id(), uv, r, Color32::WHITE);
            }
            None => {
                painter.rect_filled(r, 0.0, Color32::from_gray(245));
                painter.text(
                    r.center(),
                    Align2::CENTER_CENTER,
                    "No image selected",
                    egui::FontId::proportional(13.0),
                    Color32::GRAY,
                );
            }
        }
        painter.rect_stroke(
            r,
            0.0,
            Stroke::new(2.0, Color32::BLACK),
            egui::StrokeKind::Inside,
        );
    }
}

impl App for UiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.state.poll();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                theme::paint_gradient(ui.painter(), ui.max_rect());
            });

        egui::Area::new(egui::Id::new("card"))
            .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(theme::CARD_FILL)
                    .stroke(Stroke::new(4.0, theme::CARD_STROKE))
                    .corner_radius(6.0)
                    .inner_margin(egui::Margin::same(CARD_MARGIN))
                    .show(ui, |ui| self.render_card(ctx, ui));
            });
    }
}

/// White-on-green button that swaps to the hover colour while the pointer is
/// over it.
fn themed_button(ui: &mut egui::Ui, text: &str, enabled: bool, hovered: &mut bool) -> egui::Response {
    let fill = if *hovered && enabled {
        theme::HOVER_COLOR
    } else {
        theme::BUTTON_COLOR
    };
    let button = egui::Button::new(RichText::new(text).size(15.0).strong().color(Color32::WHITE))
        .fill(fill)
        .min_size(BUTTON_SIZE);
    let resp = ui.add_enabled(enabled, button);
    *hovered = resp.hovered();
    resp
}

fn load_thumbnail(
    ctx: &egui::Context,
    path: &Path,
    size: u32,
) -> plant_core::Result<egui::TextureHandle> {
    let img = plant_core::preprocess::load_image(path)?;
    let thumb = img.resize_exact(size, size, FilterType::Lanczos3).to_rgba8();
    let (w, h) = thumb.dimensions();
    let pixels = thumb.into_raw();
    let color = egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels);
    Ok(ctx.load_texture(
        format!("thumb:{}", path.display()),
        color,
        egui::TextureOptions::LINEAR,
    ))
}

pub fn show_error(title: &str, message: &str) {
    MessageDialog::new()
        .set_level(MessageLevel::Error)
        .set_title(title)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
