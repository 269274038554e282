use log::{debug, warn};

use super::PageState;
use crate::canvas::{CanvasEvent, CanvasSurface, Locks, SceneData};
use crate::error::{EditorError, EditorResult};

/// Serialize the live canvas scene and store it at the given page index.
///
/// Invoked before switching away from a page and (deferred) after any canvas
/// mutation, so the content map always reflects the last-saved scene.
pub fn save_page_content(
    canvas: &dyn CanvasSurface,
    state: &mut PageState,
    index: usize,
) -> EditorResult<()> {
    let scene = canvas.to_scene();
    let value = serde_json::to_value(&scene).map_err(EditorError::SceneSerialization)?;
    state.update_content(index, Some(value));
    debug!("saved page {} ({} objects)", index, scene.objects.len());
    Ok(())
}

/// Restore a page's saved scene onto the canvas.
///
/// After deserialization the text-object style locks are reasserted (the
/// deserializer does not preserve them) and a `ContentSettled` notification
/// fires so dependent observers refresh. A missing entry, a `None` entry, or
/// a scene that fails to parse all leave the canvas cleared; parse failures
/// are logged, never surfaced as blocking errors.
pub fn restore_page_content(canvas: &mut dyn CanvasSurface, state: &PageState, index: usize) {
    let scene = match state.content(index) {
        Some(Some(value)) => match serde_json::from_value::<SceneData>(value.clone()) {
            Ok(scene) => Some(scene),
            Err(err) => {
                warn!("page {index}: {}", EditorError::SceneDeserialization(err));
                None
            }
        },
        Some(None) => {
            debug!("page {index} was saved empty, clearing canvas");
            None
        }
        None => {
            debug!("page {index} has no saved content, clearing canvas");
            None
        }
    };

    match scene {
        Some(scene) => {
            canvas.load_scene(&scene);
            reassert_style_locks(canvas);
            canvas.render_all();
            canvas.fire(CanvasEvent::ContentSettled);
        }
        None => {
            canvas.clear();
            canvas.render_all();
            canvas.fire(CanvasEvent::ContentSettled);
        }
    }
}

/// Put the lock flags back on every text object. Scene reloads shed them.
pub fn reassert_style_locks(canvas: &mut dyn CanvasSurface) {
    let text_ids: Vec<_> = canvas
        .objects()
        .iter()
        .filter(|obj| obj.as_text().is_some())
        .map(|obj| obj.id())
        .collect();

    for id in text_ids {
        if let Some(text) = canvas.object_mut(id).and_then(|obj| obj.as_text_mut()) {
            text.locks = Locks::all();
        }
    }
}
