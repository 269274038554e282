//! The Canvas Surface seam and the object lifecycle built on top of it.
//!
//! [`CanvasSurface`] is the black-box scene-graph API the editor consumes;
//! [`SceneCanvas`] is the in-memory implementation. The sibling modules
//! cover object placement, selection, rotation and keyboard handling.

pub mod drawable;
pub mod keyboard;
pub mod objects;
pub mod rotation;
pub mod scene;
pub mod selection;
mod surface;

pub use drawable::{
    DEFAULT_IMAGE_SCALE, Drawable, ImageDrawable, Locks, RectDrawable, TextAlign, TextDrawable,
    placeholder_label,
};
pub use scene::{CANVAS_HEIGHT, CANVAS_WIDTH, SceneCanvas};
pub use surface::{CanvasEvent, CanvasObserver, CanvasSurface, SceneData};
