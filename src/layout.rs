//! Layout engine.
//!
//! Pure functions that turn container width, natural image size and tag
//! geometry into presentation props. Nothing in here touches egui; the view
//! reads the structs produced here and paints them.

use crate::config::ThumbnailFit;
use crate::geometry::{Dimensions, Point, Rect};
use crate::model::{Tag, TagId};

/// Integer background offset in pixels, as a CSS `background-position` pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackgroundPosition {
    pub x: i32,
    pub y: i32,
}

impl BackgroundPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Height of the scaled image when its width is pinned to `container_width`.
pub fn recalculate_height(container_width: u32, natural: Dimensions) -> u32 {
    if natural.width == 0 {
        return 0;
    }
    let height = u64::from(container_width) * u64::from(natural.height) / u64::from(natural.width);
    u32::try_from(height).unwrap_or(u32::MAX)
}

pub fn container_dimensions(container_width: u32, natural: Dimensions) -> Dimensions {
    Dimensions::new(container_width, recalculate_height(container_width, natural))
}

/// Top offset that centres an image of `natural` size scaled to the
/// container width inside `container`. Zero when the image is taller.
pub fn vertical_offset(container: Dimensions, natural: Dimensions) -> u32 {
    if natural.width == 0 {
        return 0;
    }
    let reduction = container.width as f32 / natural.width as f32;
    let scaled_height = (natural.height as f32 * reduction).trunc();
    let offset = (container.height as f32 - scaled_height) / 2.0;
    if offset > 0.0 { offset as u32 } else { 0 }
}

/// Background offsets for the displaced copies that make up the blur.
///
/// Starts at (1, 1); x flips sign after every even layer count, y after every
/// odd one, cycling through the four diagonal neighbours.
pub fn displacement_offsets(layers: usize) -> Vec<BackgroundPosition> {
    let mut offset = BackgroundPosition::new(1, 1);
    let mut out = Vec::with_capacity(layers);
    for i in 0..layers {
        out.push(offset);
        if (i + 1) % 2 == 0 {
            offset.x = -offset.x;
        } else {
            offset.y = -offset.y;
        }
    }
    out
}

// ── Thumbnail projection ───────────────────────────────────────────────────

/// Axis of the selection that is fitted exactly to the thumbnail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleAxis {
    Width,
    Height,
}

pub fn scale_axis(fit: ThumbnailFit, selection: Rect) -> ScaleAxis {
    let wide = selection.width > selection.height;
    match (fit, wide) {
        (ThumbnailFit::Cover, true) => ScaleAxis::Height,
        (ThumbnailFit::Cover, false) => ScaleAxis::Width,
        (ThumbnailFit::Contain, true) => ScaleAxis::Width,
        (ThumbnailFit::Contain, false) => ScaleAxis::Height,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThumbnailStyle {
    pub size: Dimensions,
    pub axis: ScaleAxis,
    pub reduction: f32,
    /// Displayed width of the whole image behind the thumbnail. The height
    /// follows the image's aspect ratio.
    pub background_width: u32,
    pub background_position: BackgroundPosition,
}

impl ThumbnailStyle {
    /// Region of the rendered image (container pixels) that shows through
    /// the thumbnail.
    pub fn visible_region(&self, container: Dimensions) -> Rect {
        if self.background_width == 0 || container.width == 0 {
            return Rect::default();
        }
        let scale = self.background_width as f32 / container.width as f32;
        Rect::new(
            -self.background_position.x as f32 / scale,
            -self.background_position.y as f32 / scale,
            self.size.width as f32 / scale,
            self.size.height as f32 / scale,
        )
    }
}

/// Project a selection into a thumbnail so the thumbnail shows a zoomed crop
/// centred on it.
pub fn scale_to_fit(
    selection: Rect,
    thumbnail: Dimensions,
    container_width: u32,
    fit: ThumbnailFit,
) -> ThumbnailStyle {
    let thumb_w = thumbnail.width as f32;
    let thumb_h = thumbnail.height as f32;
    let axis = scale_axis(fit, selection);
    let reduction = match axis {
        ScaleAxis::Width if selection.width > 0.0 => thumb_w / selection.width,
        ScaleAxis::Height if selection.height > 0.0 => thumb_h / selection.height,
        _ => 0.0,
    };

    let new_width = container_width as f32 * reduction;
    let background_width = if new_width > 0.0 { new_width as u32 } else { 0 };

    let overflow = |size: f32, thumb: f32| {
        let scaled = size * reduction;
        if scaled > thumb { (scaled - thumb) / 2.0 } else { 0.0 }
    };
    let offset_x = selection.left * reduction + overflow(selection.width, thumb_w);
    let offset_y = selection.top * reduction + overflow(selection.height, thumb_h);

    ThumbnailStyle {
        size: thumbnail,
        axis,
        reduction,
        background_width,
        background_position: BackgroundPosition::new(
            -(offset_x.trunc() as i32),
            -(offset_y.trunc() as i32),
        ),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Thumbnail {
    pub tag_id: TagId,
    /// Closes a row of the thumbnail strip.
    pub last_in_row: bool,
    pub style: ThumbnailStyle,
}

pub fn project_thumbnails(
    tags: &[Tag],
    thumbnail: Dimensions,
    container_width: u32,
    fit: ThumbnailFit,
    per_row: usize,
) -> Vec<Thumbnail> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| Thumbnail {
            tag_id: tag.id,
            last_in_row: per_row > 0 && (i + 1) % per_row == 0,
            style: scale_to_fit(tag.rect(), thumbnail, container_width, fit),
        })
        .collect()
}

// ── Layer props ────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageLayerStyle {
    pub size: Dimensions,
    pub background_width: u32,
    /// Hidden while drawing so the blur beneath shows through.
    pub visible: bool,
    /// Dropped to zero while a tag is previewed from its thumbnail.
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplacementStyle {
    pub size: Dimensions,
    pub background_width: u32,
    pub background_position: BackgroundPosition,
    pub top: u32,
    pub opacity: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectangleStyle {
    /// Left/top are the outer corner of the box, width/height its content
    /// size. The border sits between the two.
    pub rect: Rect,
    pub border_left: u32,
    pub border_top: u32,
    /// Offset of the crisp image inside the rectangle so the revealed region
    /// lines up with the layers beneath.
    pub background_position: Point,
    pub displayed: bool,
    pub crosshair: bool,
}

impl RectangleStyle {
    pub fn hidden(border_left: u32, border_top: u32, crosshair: bool) -> Self {
        Self {
            rect: Rect::default(),
            border_left,
            border_top,
            background_position: Point::ZERO,
            displayed: false,
            crosshair,
        }
    }

    /// Rectangle showing `rect`, with the background shifted past its border.
    pub fn showing(rect: Rect, border_left: u32, border_top: u32, crosshair: bool) -> Self {
        Self {
            rect,
            border_left,
            border_top,
            background_position: Point::new(
                -(rect.left + border_left as f32),
                -(rect.top + border_top as f32),
            ),
            displayed: true,
            crosshair,
        }
    }

    /// Where the content box lands on the draw surface.
    pub fn content_box(&self) -> Rect {
        Rect::new(
            self.rect.left + self.border_left as f32,
            self.rect.top + self.border_top as f32,
            self.rect.width,
            self.rect.height,
        )
    }

    /// Region of the rendered image shown inside the content box.
    pub fn source_region(&self) -> Rect {
        Rect::new(
            -self.background_position.x,
            -self.background_position.y,
            self.rect.width,
            self.rect.height,
        )
    }
}

/// Everything the view needs to paint one frame of the widget.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggerLayout {
    pub container: Dimensions,
    pub image: ImageLayerStyle,
    pub displacement: Vec<DisplacementStyle>,
    pub draw_surface: Dimensions,
    pub rectangle: RectangleStyle,
    pub thumbnails: Vec<Thumbnail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_preserves_aspect_ratio() {
        let natural = Dimensions::new(505, 340);
        assert_eq!(recalculate_height(505, natural), 340);
        assert_eq!(recalculate_height(1010, natural), 680);
        assert_eq!(recalculate_height(300, natural), 201);
    }

    #[test]
    fn zero_width_image_gets_zero_height() {
        assert_eq!(recalculate_height(505, Dimensions::new(0, 340)), 0);
    }

    #[test]
    fn extreme_aspect_ratio_saturates_instead_of_wrapping() {
        let natural = Dimensions::new(1, 4_000_000_000);
        assert_eq!(recalculate_height(505, natural), u32::MAX);
    }

    #[test]
    fn vertical_offset_centres_short_images() {
        let natural = Dimensions::new(500, 200);
        assert_eq!(vertical_offset(Dimensions::new(500, 300), natural), 50);
        assert_eq!(vertical_offset(Dimensions::new(500, 100), natural), 0);
    }

    #[test]
    fn displacement_cycles_through_diagonals() {
        let offsets = displacement_offsets(5);
        let pairs: Vec<_> = offsets.iter().map(|o| (o.x, o.y)).collect();
        assert_eq!(pairs, vec![(1, 1), (1, -1), (-1, -1), (-1, 1), (1, 1)]);
    }

    #[test]
    fn cover_scales_a_wide_selection_by_height() {
        let selection = Rect::new(10.0, 10.0, 100.0, 50.0);
        let style = scale_to_fit(selection, Dimensions::new(50, 50), 505, ThumbnailFit::Cover);
        assert_eq!(style.axis, ScaleAxis::Height);
        assert_eq!(style.reduction, 1.0);
        assert_eq!(style.background_width, 505);
        // 10 + (100 - 50) / 2 horizontally, no vertical overflow.
        assert_eq!(style.background_position, BackgroundPosition::new(-35, -10));
    }

    #[test]
    fn contain_scales_a_wide_selection_by_width() {
        let selection = Rect::new(10.0, 10.0, 100.0, 50.0);
        let style = scale_to_fit(selection, Dimensions::new(50, 50), 505, ThumbnailFit::Contain);
        assert_eq!(style.axis, ScaleAxis::Width);
        assert_eq!(style.reduction, 0.5);
        assert_eq!(style.background_width, 252);
        assert_eq!(style.background_position, BackgroundPosition::new(-5, -5));
    }

    #[test]
    fn square_selection_ties() {
        let square = Rect::new(0.0, 0.0, 40.0, 40.0);
        assert_eq!(scale_axis(ThumbnailFit::Cover, square), ScaleAxis::Width);
        assert_eq!(scale_axis(ThumbnailFit::Contain, square), ScaleAxis::Height);
    }

    #[test]
    fn tall_selection_centres_vertically_under_cover() {
        let selection = Rect::new(20.0, 40.0, 40.0, 80.0);
        let style = scale_to_fit(selection, Dimensions::new(80, 80), 505, ThumbnailFit::Cover);
        assert_eq!(style.axis, ScaleAxis::Width);
        assert_eq!(style.reduction, 2.0);
        assert_eq!(style.background_width, 1010);
        // y: 40 * 2 + (160 - 80) / 2
        assert_eq!(style.background_position, BackgroundPosition::new(-40, -120));
    }

    #[test]
    fn cover_crop_is_centred_on_the_selection() {
        let selection = Rect::new(10.0, 10.0, 100.0, 50.0);
        let style = scale_to_fit(selection, Dimensions::new(50, 50), 505, ThumbnailFit::Cover);
        let region = style.visible_region(Dimensions::new(505, 340));
        assert_eq!(region, Rect::new(35.0, 10.0, 50.0, 50.0));
        assert_eq!(region.center(), selection.center());
    }

    #[test]
    fn degenerate_selection_projects_to_nothing() {
        let style = scale_to_fit(
            Rect::new(5.0, 5.0, 0.0, 0.0),
            Dimensions::new(50, 50),
            505,
            ThumbnailFit::Cover,
        );
        assert_eq!(style.background_width, 0);
        assert_eq!(style.visible_region(Dimensions::new(505, 340)), Rect::default());
    }

    #[test]
    fn every_third_thumbnail_closes_a_row() {
        let tags: Vec<Tag> = (0..7)
            .map(|id| Tag {
                id,
                title: String::new(),
                x: 0,
                y: 0,
                width: 30,
                height: 30,
            })
            .collect();
        let thumbs = project_thumbnails(&tags, Dimensions::new(80, 80), 505, ThumbnailFit::Cover, 3);
        let closers: Vec<_> = thumbs.iter().filter(|t| t.last_in_row).map(|t| t.tag_id).collect();
        assert_eq!(closers, vec![2, 5]);
    }

    #[test]
    fn projection_is_idempotent() {
        let tags = vec![Tag {
            id: 0,
            title: "dog".into(),
            x: 17,
            y: 33,
            width: 91,
            height: 47,
        }];
        let first = project_thumbnails(&tags, Dimensions::new(80, 60), 505, ThumbnailFit::Cover, 3);
        let second = project_thumbnails(&tags, Dimensions::new(80, 60), 505, ThumbnailFit::Cover, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn rectangle_background_skips_the_border() {
        let style = RectangleStyle::showing(Rect::new(30.0, 40.0, 50.0, 25.0), 2, 3, true);
        assert_eq!(style.background_position, Point::new(-32.0, -43.0));
        assert_eq!(style.source_region(), Rect::new(32.0, 43.0, 50.0, 25.0));
        assert_eq!(style.content_box(), style.source_region());
    }
}
