//! The top-level editor: one canvas, one page list, one template.
//!
//! Wires the canvas, page state, template machinery, task queue and
//! thumbnail engine together and enforces the cross-module protocols:
//! save-before-switch, template application exactly once per page, and
//! deferred mounts that are discarded when navigation has moved on.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, info};
use uuid::Uuid;

use crate::canvas::{
    CanvasEvent, CanvasSurface, SceneCanvas, keyboard, objects, rotation,
    selection::SelectionState,
};
use crate::canvas::objects::TextStyle;
use crate::error::EditorResult;
use crate::events::{EditorEvent, EventBus, EventHandler};
use crate::geometry::Point;
use crate::images::ImageLibrary;
use crate::page::navigation::plan_switch;
use crate::page::persistence::{restore_page_content, save_page_content};
use crate::page::PageState;
use crate::scheduler::{DeferredTask, TaskQueue};
use crate::template::applicator::{apply_to_page_index, resolve_page_template};
use crate::template::generator::generate_template_from_variant;
use crate::template::text as template_text;
use crate::template::{PageTemplate, PhotobookTemplate, TemplateRegistry};
use crate::thumbnail::ThumbnailEngine;
use crate::variant::VariantData;

pub struct PhotobookEditor {
    canvas: Rc<RefCell<SceneCanvas>>,
    /// Canvas events observed since the last pump, in firing order.
    pending_events: Rc<RefCell<Vec<CanvasEvent>>>,
    page_state: PageState,
    registry: TemplateRegistry,
    selected_template: Option<PhotobookTemplate>,
    current_page_template: Option<PageTemplate>,
    /// Pages whose template has been applied. Guards against a second,
    /// destructive application on revisit.
    visited: HashSet<usize>,
    /// Page whose scene is actually on the canvas. Differs from the current
    /// index while a mount is still queued; saving reads the canvas, so only
    /// the mounted page may be saved.
    mounted_page: Option<usize>,
    selection: SelectionState,
    thumbnails: ThumbnailEngine,
    queue: TaskQueue,
    library: ImageLibrary,
    bus: EventBus,
    variant: VariantData,
}

impl PhotobookEditor {
    pub fn new(variant: VariantData) -> Self {
        Self::with_registry(variant, TemplateRegistry::builtin())
    }

    pub fn with_registry(variant: VariantData, registry: TemplateRegistry) -> Self {
        let canvas = Rc::new(RefCell::new(SceneCanvas::new()));
        let pending_events = Rc::new(RefCell::new(Vec::new()));
        {
            let sink = Rc::clone(&pending_events);
            canvas
                .borrow_mut()
                .subscribe(Box::new(move |event: &CanvasEvent| {
                    sink.borrow_mut().push(event.clone());
                }));
        }

        let mut page_state = PageState::new();
        page_state.recompute(None, &variant.selected_options);

        Self {
            canvas,
            pending_events,
            page_state,
            registry,
            selected_template: None,
            current_page_template: None,
            visited: HashSet::new(),
            mounted_page: None,
            selection: SelectionState::new(),
            thumbnails: ThumbnailEngine::new(),
            queue: TaskQueue::new(),
            library: ImageLibrary::in_memory(),
            bus: EventBus::new(),
            variant,
        }
    }

    /// Select the template the book is built from: a catalog template when
    /// an id is given and known, otherwise one generated from the variant.
    ///
    /// Selection resets the book: the page list is recomputed, all saved
    /// content and visit tracking is dropped, initial thumbnails are
    /// generated for every page and the cover is mounted.
    pub fn initialize_template(&mut self, template_id: Option<&str>) -> EditorResult<()> {
        let template = template_id
            .and_then(|id| self.registry.by_id(id))
            .cloned()
            .unwrap_or_else(|| generate_template_from_variant(&self.variant));
        info!("template selected: {}", template.id);

        self.page_state = PageState::new();
        self.page_state
            .recompute(Some(&template), &self.variant.selected_options);
        self.visited.clear();
        self.mounted_page = None;
        self.thumbnails
            .generate_initial(&template, self.page_state.total_pages())?;
        self.bus.emit(EditorEvent::TemplateSelected {
            template_id: template.id.clone(),
        });
        self.selected_template = Some(template);

        self.queue.schedule(DeferredTask::ApplyTemplate { page_index: 0 });
        self.settle()
    }

    /// Navigate to another page. Saves the page being left synchronously
    /// (its scene is still live) and captures its thumbnail, then defers
    /// the mount of the target page to the next [`settle`](Self::settle).
    pub fn switch_to_page(&mut self, target_index: usize) -> EditorResult<()> {
        let Some(plan) = plan_switch(&self.page_state, target_index) else {
            self.page_state.set_current_page_index(target_index);
            return Ok(());
        };

        if self.mounted_page == Some(plan.leaving_index) {
            {
                let canvas = self.canvas.borrow();
                save_page_content(&*canvas, &mut self.page_state, plan.leaving_index)?;
                self.thumbnails.capture_live(&*canvas, plan.leaving_index)?;
            }
            self.bus.emit(EditorEvent::PageContentSaved {
                page_index: plan.leaving_index,
            });
            self.bus.emit(EditorEvent::ThumbnailUpdated {
                page_index: plan.leaving_index,
            });
        } else {
            debug!(
                "leaving page {} without save: its scene was never mounted",
                plan.leaving_index
            );
        }

        self.page_state.set_current_page_index(plan.target_index);
        self.current_page_template = self.resolve_current_page_template();
        self.bus.emit(EditorEvent::PageChanged {
            old_index: plan.leaving_index,
            new_index: plan.target_index,
        });

        let task = if plan.restore {
            DeferredTask::RestoreContent { page_index: plan.target_index }
        } else {
            DeferredTask::ApplyTemplate { page_index: plan.target_index }
        };
        self.queue.schedule(task);
        Ok(())
    }

    /// Drain the deferred task queue. Tasks keyed to a page the editor has
    /// since navigated away from are dropped rather than executed.
    pub fn settle(&mut self) -> EditorResult<()> {
        loop {
            let current = self.page_state.current_page_index();
            let Some(task) = self.queue.next(current) else {
                break;
            };
            if task.page_index() != current {
                debug!("dropping stale task {task:?} (now on page {current})");
                continue;
            }
            match task {
                DeferredTask::SaveContent { page_index } => {
                    let canvas = self.canvas.borrow();
                    save_page_content(&*canvas, &mut self.page_state, page_index)?;
                    drop(canvas);
                    self.bus.emit(EditorEvent::PageContentSaved { page_index });
                }
                DeferredTask::RestoreContent { page_index } => {
                    {
                        let mut canvas = self.canvas.borrow_mut();
                        restore_page_content(&mut *canvas, &self.page_state, page_index);
                    }
                    self.visited.insert(page_index);
                    self.mounted_page = Some(page_index);
                    self.bus.emit(EditorEvent::PageContentRestored { page_index });
                }
                DeferredTask::ApplyTemplate { page_index } => {
                    self.apply_template_to_page(page_index);
                }
                DeferredTask::RefreshThumbnail { page_index } => {
                    let canvas = self.canvas.borrow();
                    self.thumbnails.capture_live(&*canvas, page_index)?;
                    drop(canvas);
                    self.bus.emit(EditorEvent::ThumbnailUpdated { page_index });
                }
            }
            self.pump_canvas_events();
        }
        Ok(())
    }

    /// First-visit mount: apply the slot's template, once. Revisits leave
    /// the canvas to the restore path.
    fn apply_template_to_page(&mut self, page_index: usize) {
        if self.visited.contains(&page_index) {
            debug!("page {page_index} already templated, skipping");
            return;
        }
        self.mounted_page = Some(page_index);
        let Some(template) = &self.selected_template else {
            return;
        };
        let total = self.page_state.total_pages();
        let applied = {
            let mut canvas = self.canvas.borrow_mut();
            apply_to_page_index(&mut *canvas, template, page_index, total).cloned()
        };
        self.current_page_template = applied;
        self.visited.insert(page_index);
        self.pump_canvas_events();
    }

    fn resolve_current_page_template(&self) -> Option<PageTemplate> {
        let template = self.selected_template.as_ref()?;
        resolve_page_template(
            template,
            self.page_state.current_page_index(),
            self.page_state.total_pages(),
        )
        .cloned()
    }

    /// Feed buffered canvas events to selection tracking and schedule the
    /// save and thumbnail refresh they imply. Duplicates coalesce in the
    /// queue, so a burst of mutations settles into one save per page.
    fn pump_canvas_events(&mut self) {
        let events: Vec<CanvasEvent> = self.pending_events.borrow_mut().drain(..).collect();
        let current = self.page_state.current_page_index();
        for event in events {
            self.selection.apply_event(&event);
            match event {
                CanvasEvent::ObjectAdded { .. }
                | CanvasEvent::ObjectRemoved { .. }
                | CanvasEvent::ObjectModified { .. }
                | CanvasEvent::ContentSettled => {
                    self.queue
                        .schedule(DeferredTask::SaveContent { page_index: current });
                    self.queue
                        .schedule(DeferredTask::RefreshThumbnail { page_index: current });
                }
                CanvasEvent::SelectionCreated { .. }
                | CanvasEvent::SelectionUpdated { .. }
                | CanvasEvent::SelectionCleared => {}
            }
        }
    }

    // ---- object lifecycle -------------------------------------------------

    /// Drop an image onto the canvas. Lands in a vacant image spot when the
    /// position hits one, free placement otherwise.
    pub fn add_image_at(&mut self, src: &str, pos: Point) -> Option<Uuid> {
        let placed = {
            let mut canvas = self.canvas.borrow_mut();
            objects::place_image(&mut *canvas, self.current_page_template.as_ref(), src, pos)
        };
        self.pump_canvas_events();
        if let Some(id) = placed {
            self.bus.emit(EditorEvent::ObjectPlaced {
                page_index: self.page_state.current_page_index(),
                object_id: id,
            });
        }
        placed
    }

    /// Fill a named image spot of the current page directly, bypassing hit
    /// testing. Occupied or unknown spots are left untouched.
    pub fn add_image_to_spot(&mut self, src: &str, spot_id: &str) -> Option<Uuid> {
        let spot = self
            .current_page_template
            .as_ref()
            .and_then(|tpl| tpl.image_spot(spot_id))
            .cloned()?;
        let placed = {
            let mut canvas = self.canvas.borrow_mut();
            if !objects::spot_is_vacant(&*canvas, &spot.id) {
                debug!("spot {spot_id} already filled");
                return None;
            }
            let decoded = crate::util::decode_image_source(src)?;
            Some(objects::fill_spot(
                &mut *canvas,
                &spot,
                src,
                decoded.width() as f32,
                decoded.height() as f32,
            ))
        };
        self.pump_canvas_events();
        if let Some(id) = placed {
            self.bus.emit(EditorEvent::ObjectPlaced {
                page_index: self.page_state.current_page_index(),
                object_id: id,
            });
        }
        placed
    }

    pub fn add_text_at(&mut self, text: &str, pos: Point, style: &TextStyle) -> Uuid {
        let id = {
            let mut canvas = self.canvas.borrow_mut();
            objects::place_text(&mut *canvas, text, pos, style)
        };
        self.pump_canvas_events();
        self.bus.emit(EditorEvent::ObjectPlaced {
            page_index: self.page_state.current_page_index(),
            object_id: id,
        });
        id
    }

    /// Delete the focused object. Images only.
    pub fn delete_focused(&mut self) -> bool {
        let Some(id) = self.selection.focused() else {
            return false;
        };
        let removed = {
            let mut canvas = self.canvas.borrow_mut();
            objects::delete_object(&mut *canvas, id)
        };
        self.pump_canvas_events();
        if removed {
            self.bus.emit(EditorEvent::ObjectDeleted {
                page_index: self.page_state.current_page_index(),
                object_id: id,
            });
        }
        removed
    }

    // ---- rotation ---------------------------------------------------------

    /// The rotate button: +90 degrees, snapped to the fine increment.
    pub fn rotate_focused(&mut self) {
        if let Some(id) = self.selection.focused() {
            let mut canvas = self.canvas.borrow_mut();
            rotation::rotate_click(&mut *canvas, id);
        }
        self.pump_canvas_events();
    }

    pub fn precise_rotate_focused(&mut self, increment: f32) {
        if let Some(id) = self.selection.focused() {
            let mut canvas = self.canvas.borrow_mut();
            rotation::precise_rotate(&mut *canvas, id, increment);
        }
        self.pump_canvas_events();
    }

    pub fn drag_rotate_focused(&mut self, angle: f32) {
        if let Some(id) = self.selection.focused() {
            let mut canvas = self.canvas.borrow_mut();
            rotation::apply_drag_rotation(&mut *canvas, id, angle);
        }
        self.pump_canvas_events();
    }

    pub fn reset_focused_transform(&mut self) {
        if let Some(id) = self.selection.focused() {
            let mut canvas = self.canvas.borrow_mut();
            rotation::reset_transform(&mut *canvas, id);
        }
        self.pump_canvas_events();
    }

    // ---- selection and keys -----------------------------------------------

    pub fn focus_object(&mut self, id: Uuid) {
        {
            let mut canvas = self.canvas.borrow_mut();
            self.selection.focus(&mut *canvas, id);
        }
        self.pump_canvas_events();
    }

    pub fn clear_selection(&mut self) {
        {
            let mut canvas = self.canvas.borrow_mut();
            self.selection.clear(&mut *canvas);
        }
        self.pump_canvas_events();
    }

    pub fn handle_key(&mut self, key: keyboard::Key) {
        let action = {
            let canvas = self.canvas.borrow();
            let focused = self.selection.focused().and_then(|id| canvas.object(id));
            keyboard::action_for_key(key, focused)
        };
        match action {
            keyboard::KeyAction::DeleteFocused => {
                self.delete_focused();
            }
            keyboard::KeyAction::ClearSelection => self.clear_selection(),
            keyboard::KeyAction::None => {}
        }
    }

    // ---- template text ----------------------------------------------------

    pub fn update_text_area(&mut self, area_id: &str, new_text: &str) {
        if let Some(page) = self.current_page_template.clone() {
            let mut canvas = self.canvas.borrow_mut();
            template_text::update_text_in_area(&mut *canvas, &page, area_id, new_text);
        }
        self.pump_canvas_events();
    }

    pub fn text_in_area(&self, area_id: &str) -> Option<String> {
        let page = self.current_page_template.as_ref()?;
        page.text_area(area_id)?;
        let canvas = self.canvas.borrow();
        Some(template_text::text_from_area(&*canvas, page, area_id))
    }

    // ---- accessors --------------------------------------------------------

    pub fn canvas(&self) -> Rc<RefCell<SceneCanvas>> {
        Rc::clone(&self.canvas)
    }

    pub fn page_state(&self) -> &PageState {
        &self.page_state
    }

    pub fn selected_template(&self) -> Option<&PhotobookTemplate> {
        self.selected_template.as_ref()
    }

    pub fn current_page_template(&self) -> Option<&PageTemplate> {
        self.current_page_template.as_ref()
    }

    pub fn is_page_visited(&self, page_index: usize) -> bool {
        self.visited.contains(&page_index)
    }

    pub fn focused_object(&self) -> Option<Uuid> {
        self.selection.focused()
    }

    pub fn thumbnail(&self, page_index: usize) -> Option<&str> {
        self.thumbnails.thumbnail(page_index)
    }

    pub fn thumbnails(&self) -> &[Option<String>] {
        self.thumbnails.thumbnails()
    }

    pub fn library(&self) -> &ImageLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut ImageLibrary {
        &mut self.library
    }

    pub fn variant(&self) -> &VariantData {
        &self.variant
    }

    pub fn on_event(&self, handler: Box<dyn EventHandler>) {
        self.bus.subscribe(handler);
    }
}
