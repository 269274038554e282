use std::cell::RefCell;

use log::debug;
use uuid::Uuid;

use super::drawable::{Drawable, Locks};
use super::surface::{CanvasEvent, CanvasObserver, CanvasSurface, SceneData};

/// Reference surface dimensions for a photobook page.
pub const CANVAS_WIDTH: u32 = 750;
pub const CANVAS_HEIGHT: u32 = 550;

/// In-memory implementation of [`CanvasSurface`].
///
/// Group selection is disabled; the surface tracks a single active object.
pub struct SceneCanvas {
    width: u32,
    height: u32,
    background_color: String,
    objects: Vec<Drawable>,
    active_object: Option<Uuid>,
    observers: RefCell<Vec<CanvasObserver>>,
    render_count: u64,
}

impl std::fmt::Debug for SceneCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneCanvas")
            .field("objects", &self.objects.len())
            .field("active_object", &self.active_object)
            .field("background_color", &self.background_color)
            .field("observers", &format!("<{} observers>", self.observers.borrow().len()))
            .finish()
    }
}

impl Default for SceneCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneCanvas {
    pub fn new() -> Self {
        Self::with_size(CANVAS_WIDTH, CANVAS_HEIGHT)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background_color: "#ffffff".to_string(),
            objects: Vec::new(),
            active_object: None,
            observers: RefCell::new(Vec::new()),
            render_count: 0,
        }
    }

    /// Number of repaint requests, exposed for tests.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }
}

impl CanvasSurface for SceneCanvas {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn add(&mut self, drawable: Drawable) -> Uuid {
        let id = drawable.id();
        self.objects.push(drawable);
        self.fire(CanvasEvent::ObjectAdded { id });
        id
    }

    fn remove(&mut self, id: Uuid) -> Option<Drawable> {
        let index = self.objects.iter().position(|obj| obj.id() == id)?;
        let removed = self.objects.remove(index);
        if self.active_object == Some(id) {
            self.active_object = None;
        }
        self.fire(CanvasEvent::ObjectRemoved { id });
        Some(removed)
    }

    fn clear(&mut self) {
        debug!("clearing canvas ({} objects)", self.objects.len());
        self.objects.clear();
        self.active_object = None;
        self.background_color = "#ffffff".to_string();
    }

    fn objects(&self) -> &[Drawable] {
        &self.objects
    }

    fn object(&self, id: Uuid) -> Option<&Drawable> {
        self.objects.iter().find(|obj| obj.id() == id)
    }

    fn object_mut(&mut self, id: Uuid) -> Option<&mut Drawable> {
        self.objects.iter_mut().find(|obj| obj.id() == id)
    }

    fn background_color(&self) -> &str {
        &self.background_color
    }

    fn set_background_color(&mut self, color: &str) {
        self.background_color = color.to_string();
    }

    fn active_object(&self) -> Option<Uuid> {
        self.active_object
    }

    fn set_active_object(&mut self, id: Uuid) {
        if self.object(id).is_none() {
            return;
        }
        let event = if self.active_object.is_some() {
            CanvasEvent::SelectionUpdated { id }
        } else {
            CanvasEvent::SelectionCreated { id }
        };
        self.active_object = Some(id);
        self.fire(event);
    }

    fn discard_active_object(&mut self) {
        if self.active_object.take().is_some() {
            self.fire(CanvasEvent::SelectionCleared);
        }
    }

    fn to_scene(&self) -> SceneData {
        SceneData {
            background_color: self.background_color.clone(),
            objects: self.objects.clone(),
        }
    }

    fn load_scene(&mut self, scene: &SceneData) {
        self.objects = scene.objects.clone();
        self.background_color = scene.background_color.clone();
        self.active_object = None;
        for obj in &mut self.objects {
            obj.regenerate_id();
            // The deserializer does not carry custom lock flags through; the
            // restore path reasserts them.
            if let Some(text) = obj.as_text_mut() {
                text.locks = Locks::none();
            }
        }
    }

    fn render_all(&mut self) {
        self.render_count += 1;
    }

    fn fire(&self, event: CanvasEvent) {
        for observer in self.observers.borrow().iter() {
            observer(&event);
        }
    }

    fn subscribe(&mut self, observer: CanvasObserver) {
        self.observers.borrow_mut().push(observer);
    }
}
