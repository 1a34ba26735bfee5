use eframe::egui;
use tracing::{info, warn};

use crate::model::ImageData;
use crate::tagger::Tagger;
use crate::view::TaggerView;

// ── App ─────────────────────────────────────────────────────────────────────

pub struct TaggerApp {
    tagger: Tagger,
    view: TaggerView,
    status: Option<String>,
}

impl TaggerApp {
    pub fn new(tagger: Tagger) -> Self {
        Self {
            tagger,
            view: TaggerView::new(),
            status: None,
        }
    }

    fn open_image(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "gif", "bmp", "webp"])
            .pick_file()
        else {
            return;
        };

        let loaded = ImageData::from_image_file(&path)
            .and_then(|image| self.tagger.render_tagger(image));
        match loaded {
            Ok(()) => {
                info!(path = %path.display(), "opened image");
                self.view.reset();
                self.status = None;
            }
            Err(err) => {
                warn!(%err, "cannot open image");
                self.status = Some(err.to_string());
            }
        }
    }
}

// ── eframe App impl ────────────────────────────────────────────────────────

impl eframe::App for TaggerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.tagger.close_tag_form();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open image…").clicked() {
                    self.open_image();
                }
                ui.separator();
                let mut allow_draw = self.tagger.config().allow_draw;
                if ui.checkbox(&mut allow_draw, "Draw mode").changed() {
                    self.tagger.set_allow_draw(allow_draw);
                }
                ui.separator();
                ui.label(format!("Tags: {}", self.tagger.tags().len()));
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), status);
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both().show(ui, |ui| {
                self.view.show(ui, &mut self.tagger);
                ui.add_space(12.0);
                ui.heading("Tags");
                self.view.show_thumbnails(ui, &mut self.tagger);
            });
        });

        self.view.show_tag_form(ctx, &mut self.tagger);
    }
}
