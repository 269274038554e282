use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::drawable::Drawable;

/// Notifications fired by the canvas surface. Programmatic mutations must
/// re-fire these too, so persistence and thumbnails stay synchronized with
/// changes that did not come from a user gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    ObjectAdded { id: Uuid },
    ObjectRemoved { id: Uuid },
    ObjectModified { id: Uuid },
    SelectionCreated { id: Uuid },
    SelectionUpdated { id: Uuid },
    SelectionCleared,
    /// A reloaded scene has fully settled and is safe to read back.
    ContentSettled,
}

pub type CanvasObserver = Box<dyn Fn(&CanvasEvent)>;

/// Serialized scene graph: what `to_scene`/`load_scene` round-trip and what
/// the page content map stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneData {
    pub background_color: String,
    pub objects: Vec<Drawable>,
}

impl SceneData {
    pub fn empty() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            objects: Vec::new(),
        }
    }
}

/// The black-box 2D scene-graph engine the editor draws on.
///
/// A real deployment backs this with a full rendering library; the crate
/// ships [`SceneCanvas`](super::scene::SceneCanvas) as the in-memory
/// implementation. Exactly one page's content is mounted on the surface at
/// any time.
pub trait CanvasSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// Add a drawable and fire `ObjectAdded`. Returns the object's id.
    fn add(&mut self, drawable: Drawable) -> Uuid;

    /// Remove a drawable by id, firing `ObjectRemoved` when it existed.
    fn remove(&mut self, id: Uuid) -> Option<Drawable>;

    /// Remove every object and reset the background. Fires no per-object
    /// events; callers fire what their protocol requires.
    fn clear(&mut self);

    fn objects(&self) -> &[Drawable];

    fn object(&self, id: Uuid) -> Option<&Drawable>;

    /// Direct mutable access for transform edits. The caller is responsible
    /// for firing `ObjectModified` afterwards.
    fn object_mut(&mut self, id: Uuid) -> Option<&mut Drawable>;

    fn background_color(&self) -> &str;

    fn set_background_color(&mut self, color: &str);

    fn active_object(&self) -> Option<Uuid>;

    /// Focus an object, firing `SelectionCreated` or `SelectionUpdated`.
    /// Single-object focus: selecting replaces any previous focus.
    fn set_active_object(&mut self, id: Uuid);

    /// Clear focus, firing `SelectionCleared` if something was focused.
    fn discard_active_object(&mut self);

    /// Serialize the current scene graph.
    fn to_scene(&self) -> SceneData;

    /// Replace the scene graph with a previously serialized one. Object ids
    /// are regenerated; custom lock flags are NOT guaranteed to be intact,
    /// callers must reassert them.
    fn load_scene(&mut self, scene: &SceneData);

    /// Request a repaint. The in-memory surface only counts these.
    fn render_all(&mut self);

    /// Broadcast an event to all observers.
    fn fire(&self, event: CanvasEvent);

    fn subscribe(&mut self, observer: CanvasObserver);
}
