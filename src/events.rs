//! Editor-level event broadcasting.
//!
//! Canvas-local events stay on the canvas observer list; this bus carries
//! the coarser editor lifecycle notifications that outer UI chrome (page
//! strip, template picker, library panel) listens for.

use std::cell::RefCell;

use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    TemplateSelected { template_id: String },
    PageChanged { old_index: usize, new_index: usize },
    PageContentSaved { page_index: usize },
    PageContentRestored { page_index: usize },
    ThumbnailUpdated { page_index: usize },
    ObjectPlaced { page_index: usize, object_id: Uuid },
    ObjectDeleted { page_index: usize, object_id: Uuid },
}

pub trait EventHandler {
    fn handle_event(&mut self, event: &EditorEvent);
}

/// A simple event bus for broadcasting editor events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: EditorEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder {
        seen: Rc<RefCell<Vec<EditorEvent>>>,
    }

    impl EventHandler for Recorder {
        fn handle_event(&mut self, event: &EditorEvent) {
            self.seen.borrow_mut().push(event.clone());
        }
    }

    #[test]
    fn test_emit_reaches_all_handlers() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        bus.subscribe(Box::new(Recorder { seen: Rc::clone(&seen) }));
        bus.subscribe(Box::new(Recorder { seen: Rc::clone(&seen) }));

        bus.emit(EditorEvent::PageChanged { old_index: 0, new_index: 2 });

        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(
            seen.borrow()[0],
            EditorEvent::PageChanged { old_index: 0, new_index: 2 }
        );
    }
}
