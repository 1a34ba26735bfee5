//! The tagger widget instance.
//!
//! One `Tagger` owns one image, its tags, the draw state machine and the
//! thumbnail projections. Hosts feed it pointer and hover events through the
//! handler methods and paint whatever [`Tagger::layout`] returns.

use tracing::{debug, info};

use crate::config::TaggerConfig;
use crate::draw::{DrawMachine, DrawOutcome};
use crate::error::Result;
use crate::geometry::{relative_cursor, Dimensions, Point, Rect};
use crate::layout::{
    self, DisplacementStyle, ImageLayerStyle, RectangleStyle, TaggerLayout, Thumbnail,
};
use crate::model::{ImageData, Snap, Tag, TagId};

/// Pointer input over the draw surface, in the host's page coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
}

/// Title editor for one tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagForm {
    pub tag_id: TagId,
    pub title: String,
}

pub struct Tagger {
    config: TaggerConfig,
    image: ImageData,
    snap: Snap,
    container: Dimensions,
    vertical_offset: u32,
    surface_origin: Point,
    draw: DrawMachine,
    preview: Option<TagId>,
    tag_form: Option<TagForm>,
    thumbnails: Vec<Thumbnail>,
}

impl Tagger {
    /// Build a widget, showing `image` or the bundled example when `None`.
    pub fn new(config: TaggerConfig, image: Option<ImageData>) -> Result<Self> {
        config.validate()?;
        let placeholder = ImageData::example();
        let mut tagger = Self {
            draw: DrawMachine::new(config.min_tag_size),
            config,
            snap: placeholder.primary_snap(),
            image: placeholder,
            container: Dimensions::default(),
            vertical_offset: 0,
            surface_origin: Point::ZERO,
            preview: None,
            tag_form: None,
            thumbnails: Vec::new(),
        };
        tagger.render_tagger(image.unwrap_or_else(ImageData::example))?;
        Ok(tagger)
    }

    /// Replace the current image wholesale and rebuild every layer.
    pub fn render_tagger(&mut self, image: ImageData) -> Result<()> {
        image.validate()?;
        let snap = image.primary_snap();
        self.container =
            layout::container_dimensions(self.config.container_width, snap.image_dimensions);
        self.vertical_offset = layout::vertical_offset(self.container, snap.image_dimensions);
        self.snap = snap;
        self.image = image;

        self.draw = DrawMachine::new(self.config.min_tag_size);
        self.preview = None;
        self.tag_form = None;
        self.refresh_thumbnails();

        info!(
            url = %self.snap.url,
            width = self.container.width,
            height = self.container.height,
            tags = self.image.tags.len(),
            "image loaded"
        );
        Ok(())
    }

    // ── accessors ──────────────────────────────────────────────────────────

    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    pub fn image(&self) -> &ImageData {
        &self.image
    }

    pub fn snap(&self) -> &Snap {
        &self.snap
    }

    pub fn tags(&self) -> &[Tag] {
        &self.image.tags
    }

    pub fn container(&self) -> Dimensions {
        self.container
    }

    pub fn thumbnails(&self) -> &[Thumbnail] {
        &self.thumbnails
    }

    pub fn is_drawing(&self) -> bool {
        self.draw.is_drawing()
    }

    pub fn preview(&self) -> Option<TagId> {
        self.preview
    }

    pub fn tag_form(&self) -> Option<&TagForm> {
        self.tag_form.as_ref()
    }

    pub fn tag_form_mut(&mut self) -> Option<&mut TagForm> {
        self.tag_form.as_mut()
    }

    pub fn set_allow_draw(&mut self, allow: bool) {
        self.config.allow_draw = allow;
        if !allow {
            if self.draw.is_drawing() {
                debug!("draw mode turned off, dropping the drag in progress");
            }
            self.draw = DrawMachine::new(self.config.min_tag_size);
            self.tag_form = None;
        }
    }

    /// Page position of the draw surface's top-left corner.
    pub fn set_surface_origin(&mut self, origin: Point) {
        self.surface_origin = origin;
    }

    // ── pointer handlers ───────────────────────────────────────────────────

    pub fn handle_pointer(&mut self, event: PointerEvent) -> DrawOutcome {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos),
            PointerEvent::Move(pos) => self.pointer_move(pos),
            PointerEvent::Up(_) => self.pointer_up(),
        }
    }

    pub fn pointer_down(&mut self, page: Point) -> DrawOutcome {
        if !self.config.allow_draw {
            debug!("pointer down ignored, draw mode is off");
            return DrawOutcome::Ignored;
        }
        let pos = relative_cursor(page, self.surface_origin);
        let outcome = self.draw.begin(pos, self.container);
        self.preview = None;
        self.tag_form = None;
        debug!(?pos, "drag started");
        outcome
    }

    pub fn pointer_move(&mut self, page: Point) -> DrawOutcome {
        let pos = relative_cursor(page, self.surface_origin);
        self.draw.update(pos, self.container)
    }

    pub fn pointer_up(&mut self) -> DrawOutcome {
        let outcome = self.draw.finish();
        match outcome {
            DrawOutcome::Committed(rect) => {
                let id = self.add_tag(rect);
                debug!(id, ?rect, "tag committed");
            }
            DrawOutcome::Discarded(rect) => {
                debug!(?rect, "drag below minimum size, discarded");
            }
            _ => {}
        }
        outcome
    }

    // ── tags ───────────────────────────────────────────────────────────────

    /// Id for the next tag: the tag count, unless loaded data already used it.
    fn next_tag_id(&self) -> TagId {
        let count = self.image.tags.len() as TagId;
        if self.image.tag(count).is_none() {
            return count;
        }
        self.image
            .tags
            .iter()
            .map(|tag| tag.id)
            .max()
            .map_or(count, |max| max.saturating_add(1))
    }

    pub fn add_tag(&mut self, rect: Rect) -> TagId {
        let id = self.next_tag_id();
        self.image.tags.push(Tag::from_rect(id, rect));
        self.refresh_thumbnails();
        id
    }

    /// Re-project every tag into thumbnail space.
    pub fn refresh_thumbnails(&mut self) {
        self.thumbnails = layout::project_thumbnails(
            &self.image.tags,
            self.config.thumbnail_size,
            self.container.width,
            self.config.thumbnail_fit,
            self.config.thumbnails_per_row,
        );
    }

    // ── thumbnail handlers ─────────────────────────────────────────────────

    /// Preview a tag's region over the dimmed image. Returns false when the
    /// tag is unknown or a drag is in progress.
    pub fn thumbnail_hover_in(&mut self, id: TagId) -> bool {
        if self.draw.is_drawing() {
            return false;
        }
        if self.image.tag(id).is_none() {
            debug!(id, "hover over unknown tag");
            return false;
        }
        self.preview = Some(id);
        true
    }

    pub fn thumbnail_hover_out(&mut self, id: TagId) {
        if self.preview == Some(id) {
            self.preview = None;
        }
    }

    /// Open the title editor for a tag. Only available in draw mode.
    pub fn open_tag_form(&mut self, id: TagId) -> bool {
        if !self.config.allow_draw || self.draw.is_drawing() {
            return false;
        }
        let Some(tag) = self.image.tag(id) else {
            debug!(id, "tag form requested for unknown tag");
            return false;
        };
        self.tag_form = Some(TagForm {
            tag_id: id,
            title: tag.title.clone(),
        });
        true
    }

    pub fn close_tag_form(&mut self) {
        self.tag_form = None;
    }

    /// Store the form's title on its tag and close the form.
    pub fn submit_tag_form(&mut self) -> Option<TagId> {
        let form = self.tag_form.take()?;
        let tag = self.image.tag_mut(form.tag_id)?;
        tag.title = form.title.trim().to_owned();
        debug!(id = form.tag_id, title = %tag.title, "tag title updated");
        Some(form.tag_id)
    }

    // ── layout ─────────────────────────────────────────────────────────────

    pub fn layout(&self) -> TaggerLayout {
        let background_width = self.container.width;
        let border = self.config.rectangle_border;
        let crosshair = self.config.allow_draw;

        let rectangle = match (self.draw.rectangle(), self.preview_tag()) {
            (Some(rect), _) => RectangleStyle::showing(rect, border.left, border.top, crosshair),
            (None, Some(tag)) => {
                RectangleStyle::showing(tag.rect(), border.left, border.top, crosshair)
            }
            (None, None) => RectangleStyle::hidden(border.left, border.top, crosshair),
        };

        let displacement = layout::displacement_offsets(self.config.displacement_layers)
            .into_iter()
            .map(|offset| DisplacementStyle {
                size: self.container,
                background_width,
                background_position: offset,
                top: self.vertical_offset,
                opacity: self.config.displacement_opacity,
            })
            .collect();

        TaggerLayout {
            container: self.container,
            image: ImageLayerStyle {
                size: self.container,
                background_width,
                visible: !self.draw.is_drawing(),
                opacity: if self.preview.is_some() { 0.0 } else { 1.0 },
            },
            displacement,
            draw_surface: self.container,
            rectangle,
            thumbnails: self.thumbnails.clone(),
        }
    }

    fn preview_tag(&self) -> Option<&Tag> {
        self.preview.and_then(|id| self.image.tag(id))
    }
}
