#![warn(clippy::all, rust_2018_idioms)]

pub mod canvas;
pub mod editor;
pub mod error;
pub mod events;
pub mod geometry;
pub mod images;
pub mod page;
pub mod scheduler;
pub mod template;
pub mod thumbnail;
pub mod util;
pub mod variant;

pub use canvas::{CanvasSurface, Drawable, SceneCanvas, SceneData};
pub use editor::PhotobookEditor;
pub use error::{EditorError, EditorResult};
pub use events::{EditorEvent, EventBus};
pub use page::PageState;
pub use template::{PhotobookTemplate, TemplateRegistry};
pub use thumbnail::ThumbnailEngine;
pub use variant::VariantData;
