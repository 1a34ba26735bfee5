//! egui rendering for a [`Tagger`].
//!
//! Reads the props from [`Tagger::layout`], paints them, and turns egui
//! pointer input into calls on the tagger's handlers.

use std::path::Path;

use eframe::egui;
use tracing::warn;

use crate::geometry::{Dimensions, Point, Rect};
use crate::model::{Snap, TagId};
use crate::tagger::{PointerEvent, Tagger};

const PLACEHOLDER: egui::Color32 = egui::Color32::from_gray(90);
const THUMBNAIL_GAP: f32 = 6.0;

#[derive(Default)]
pub struct TaggerView {
    texture: Option<egui::TextureHandle>,
    /// Url the texture (or the failed attempt) belongs to.
    loaded_url: Option<String>,
    hovered: Option<TagId>,
}

enum FormAction {
    None,
    Submit,
    Cancel,
}

impl TaggerView {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_texture(&mut self, ctx: &egui::Context, snap: &Snap) {
        if self.loaded_url.as_deref() == Some(snap.url.as_str()) {
            return;
        }
        self.loaded_url = Some(snap.url.clone());
        self.texture = match image::open(Path::new(&snap.url)) {
            Ok(img) => {
                let rgba = img.to_rgba8();
                let size = [rgba.width() as usize, rgba.height() as usize];
                let pixels = rgba.as_flat_samples();
                let color_image =
                    egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());
                Some(ctx.load_texture("tagger-image", color_image, egui::TextureOptions::LINEAR))
            }
            Err(err) => {
                warn!(url = %snap.url, %err, "cannot load image, painting a placeholder");
                None
            }
        };
    }

    /// Paint `region` of the rendered image into `target`. Parts of the
    /// region that fall outside the image are left empty.
    fn paint_region(
        &self,
        painter: &egui::Painter,
        target: egui::Rect,
        region: Rect,
        container: Dimensions,
        tint: egui::Color32,
    ) {
        if region.width <= 0.0 || region.height <= 0.0 || container.is_empty() {
            return;
        }
        let (cw, ch) = (container.width as f32, container.height as f32);
        let left = region.left.max(0.0);
        let top = region.top.max(0.0);
        let right = region.right().min(cw);
        let bottom = region.bottom().min(ch);
        if right <= left || bottom <= top {
            return;
        }

        let sx = target.width() / region.width;
        let sy = target.height() / region.height;
        let dest = egui::Rect::from_min_max(
            target.min + egui::vec2((left - region.left) * sx, (top - region.top) * sy),
            target.min + egui::vec2((right - region.left) * sx, (bottom - region.top) * sy),
        );

        match &self.texture {
            Some(tex) => {
                let uv = egui::Rect::from_min_max(
                    egui::pos2(left / cw, top / ch),
                    egui::pos2(right / cw, bottom / ch),
                );
                painter.image(tex.id(), dest, uv, tint);
            }
            None => {
                painter.rect_filled(dest, 0.0, PLACEHOLDER.gamma_multiply(tint.a() as f32 / 255.0));
            }
        }
    }

    /// Paint the widget and feed it this frame's pointer input.
    pub fn show(&mut self, ui: &mut egui::Ui, tagger: &mut Tagger) -> egui::Response {
        self.ensure_texture(ui.ctx(), tagger.snap());

        let container = tagger.container();
        let size = egui::vec2(container.width as f32, container.height as f32);
        let (response, painter) = ui.allocate_painter(size, egui::Sense::click_and_drag());
        let canvas = response.rect;
        let painter = painter.with_clip_rect(canvas);
        tagger.set_surface_origin(Point::new(canvas.min.x, canvas.min.y));

        self.handle_pointer(ui.ctx(), &response, tagger);

        let layout = tagger.layout();
        let full = Rect::new(0.0, 0.0, container.width as f32, container.height as f32);

        painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(30));

        for layer in &layout.displacement {
            let offset = egui::vec2(
                layer.background_position.x as f32,
                layer.background_position.y as f32 + layer.top as f32,
            );
            let alpha = (layer.opacity.clamp(0.0, 1.0) * 255.0) as u8;
            self.paint_region(
                &painter,
                canvas.translate(offset),
                full,
                layer.size,
                egui::Color32::from_white_alpha(alpha),
            );
        }

        if layout.image.visible && layout.image.opacity > 0.0 {
            let tint = egui::Color32::WHITE.gamma_multiply(layout.image.opacity);
            self.paint_region(&painter, canvas, full, layout.image.size, tint);
        }

        let rectangle = layout.rectangle;
        if rectangle.displayed {
            let content = rectangle.content_box();
            let target = egui::Rect::from_min_size(
                canvas.min + egui::vec2(content.left, content.top),
                egui::vec2(content.width, content.height),
            );
            self.paint_region(
                &painter,
                target,
                rectangle.source_region(),
                container,
                egui::Color32::WHITE,
            );
            let border = rectangle.border_left.max(rectangle.border_top) as f32;
            painter.rect_stroke(
                target,
                0.0,
                egui::Stroke::new(border, egui::Color32::WHITE),
                egui::StrokeKind::Outside,
            );
        }

        if rectangle.crosshair && response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
        }

        response
    }

    fn handle_pointer(&self, ctx: &egui::Context, response: &egui::Response, tagger: &mut Tagger) {
        let to_point = |pos: egui::Pos2| Point::new(pos.x, pos.y);

        if response.drag_started_by(egui::PointerButton::Primary) {
            let press = ctx
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = press {
                tagger.handle_pointer(PointerEvent::Down(to_point(pos)));
            }
        }

        if tagger.is_drawing() {
            if let Some(pos) = ctx.input(|i| i.pointer.latest_pos()) {
                tagger.handle_pointer(PointerEvent::Move(to_point(pos)));
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary) {
            let pos = ctx.input(|i| i.pointer.latest_pos()).unwrap_or_default();
            tagger.handle_pointer(PointerEvent::Up(to_point(pos)));
        }
    }

    /// Paint the thumbnail strip and route hover and click events.
    pub fn show_thumbnails(&mut self, ui: &mut egui::Ui, tagger: &mut Tagger) {
        let container = tagger.container();
        let thumbnails = tagger.thumbnails().to_vec();
        let form_tag = tagger.tag_form().map(|form| form.tag_id);
        let mut hovered = None;
        let mut clicked = None;

        if thumbnails.is_empty() {
            ui.weak("No tags yet");
        }

        for row in thumbnails.split_inclusive(|thumb| thumb.last_in_row) {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = THUMBNAIL_GAP;
                for thumb in row {
                    let size = egui::vec2(
                        thumb.style.size.width as f32,
                        thumb.style.size.height as f32,
                    );
                    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
                    let painter = ui.painter_at(rect);
                    painter.rect_filled(rect, 0.0, egui::Color32::from_gray(30));
                    self.paint_region(
                        &painter,
                        rect,
                        thumb.style.visible_region(container),
                        container,
                        egui::Color32::WHITE,
                    );

                    let highlighted = response.hovered() || form_tag == Some(thumb.tag_id);
                    let stroke = if highlighted {
                        egui::Stroke::new(2.0, egui::Color32::from_rgb(0, 120, 255))
                    } else {
                        egui::Stroke::new(1.0, egui::Color32::from_gray(120))
                    };
                    painter.rect_stroke(rect, 0.0, stroke, egui::StrokeKind::Inside);

                    if response.hovered() {
                        hovered = Some(thumb.tag_id);
                    }
                    if response.clicked() {
                        clicked = Some(thumb.tag_id);
                    }
                    if let Some(tag) = tagger.image().tag(thumb.tag_id) {
                        if !tag.title.is_empty() {
                            response.on_hover_text(tag.title.as_str());
                        }
                    }
                }
            });
            ui.add_space(THUMBNAIL_GAP);
        }

        if hovered != self.hovered {
            if let Some(prev) = self.hovered.take() {
                tagger.thumbnail_hover_out(prev);
            }
            if let Some(id) = hovered {
                if tagger.thumbnail_hover_in(id) {
                    self.hovered = Some(id);
                }
            }
        }

        if let Some(id) = clicked {
            tagger.open_tag_form(id);
        }
    }

    /// Title editor for the tag whose thumbnail was clicked.
    pub fn show_tag_form(&mut self, ctx: &egui::Context, tagger: &mut Tagger) {
        let Some(form) = tagger.tag_form_mut() else {
            return;
        };
        let mut action = FormAction::None;
        egui::Window::new(format!("Tag #{}", form.tag_id))
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Title:");
                let edit = ui.text_edit_singleline(&mut form.title);
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = FormAction::Submit;
                }
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = FormAction::Submit;
                    }
                    if ui.button("Cancel").clicked() {
                        action = FormAction::Cancel;
                    }
                });
            });

        match action {
            FormAction::Submit => {
                tagger.submit_tag_form();
            }
            FormAction::Cancel => tagger.close_tag_form(),
            FormAction::None => {}
        }
    }

    /// Drop the cached texture, e.g. after the tagger loaded a new image.
    pub fn reset(&mut self) {
        self.texture = None;
        self.loaded_url = None;
        self.hovered = None;
    }
}
