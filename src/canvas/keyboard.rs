use super::drawable::Drawable;

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Backspace,
    Delete,
    Escape,
}

/// What a key press should do, given the currently focused object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Delete the focused image object.
    DeleteFocused,
    /// Clear focus without deleting anything.
    ClearSelection,
    /// Let the key fall through (e.g. Backspace while editing text).
    None,
}

/// Decide the action for a key press.
///
/// Deletion only ever applies to image objects, and a text box in edit mode
/// takes precedence: Backspace/Delete then edit the text content, never the
/// object set. Escape always just clears focus.
pub fn action_for_key(key: Key, focused: Option<&Drawable>) -> KeyAction {
    match key {
        Key::Backspace | Key::Delete => match focused {
            Some(Drawable::Text(text)) if text.is_editing => KeyAction::None,
            Some(Drawable::Image(_)) => KeyAction::DeleteFocused,
            _ => KeyAction::None,
        },
        Key::Escape => KeyAction::ClearSelection,
    }
}
