use uuid::Uuid;

use super::drawable::Locks;
use super::surface::{CanvasEvent, CanvasSurface};

/// Single-object focus model: selecting a new object replaces the previous
/// focus, there is no multi-select accumulation.
#[derive(Debug, Default)]
pub struct SelectionState {
    focused: Option<Uuid>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<Uuid> {
        self.focused
    }

    /// Keep the focus in sync with canvas selection events.
    pub fn apply_event(&mut self, event: &CanvasEvent) {
        match event {
            CanvasEvent::SelectionCreated { id } | CanvasEvent::SelectionUpdated { id } => {
                self.focused = Some(*id);
            }
            CanvasEvent::SelectionCleared => {
                self.focused = None;
            }
            CanvasEvent::ObjectRemoved { id } => {
                if self.focused == Some(*id) {
                    self.focused = None;
                }
            }
            _ => {}
        }
    }

    /// Focus an object. Focusing a text box reasserts its style locks, since
    /// a reloaded scene may have shed them.
    pub fn focus(&mut self, canvas: &mut dyn CanvasSurface, id: Uuid) {
        let Some(obj) = canvas.object(id) else {
            return;
        };
        if !obj.selectable() {
            return;
        }

        canvas.set_active_object(id);
        self.focused = Some(id);

        if let Some(text) = canvas.object_mut(id).and_then(|obj| obj.as_text_mut()) {
            text.locks = Locks::all();
            canvas.render_all();
        }
    }

    pub fn clear(&mut self, canvas: &mut dyn CanvasSurface) {
        self.focused = None;
        canvas.discard_active_object();
        canvas.render_all();
    }
}
