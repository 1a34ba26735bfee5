//! Image tagging widget: drag out rectangles over a photo, keep them as tags,
//! and browse them as zoomed thumbnails.
//!
//! The geometry ([`layout`], [`draw`]) is pure and independent of egui; the
//! [`view`] module paints a [`Tagger`] with egui and forwards its input.

pub mod app;
pub mod config;
pub mod draw;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod tagger;
pub mod view;

pub use config::{TaggerConfig, ThumbnailFit};
pub use draw::{DrawOutcome, DrawState};
pub use error::TaggerError;
pub use geometry::{Dimensions, Point, Rect};
pub use model::{ImageData, Snap, Tag, TagId};
pub use tagger::{PointerEvent, TagForm, Tagger};
pub use view::TaggerView;
