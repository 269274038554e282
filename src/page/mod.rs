pub mod navigation;
pub mod persistence;

use std::collections::HashMap;

use log::warn;
use serde_json::Value;

use crate::template::PhotobookTemplate;
use crate::variant::{SelectedOption, page_count_from_options};

/// One visitable slot of the book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: usize,
    pub id: String,
}

impl Page {
    fn new(index: usize) -> Self {
        Self {
            index,
            id: format!("page-{index}"),
        }
    }
}

/// Owns the ordered page list, the current page index, and the per-page
/// serialized-content map.
///
/// The content map is the only cross-page shared state; a key's presence
/// means "visited" (even when the stored scene is `None`, i.e. explicitly
/// empty), its absence means "never visited".
#[derive(Debug, Default)]
pub struct PageState {
    pages: Vec<Page>,
    current_page_index: usize,
    page_content: HashMap<usize, Option<Value>>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute the page list from the active template or, failing that,
    /// the variant's options. A template contributes its interior pages plus
    /// the two covers. If the current index falls outside the new bounds the
    /// editor lands back on the cover.
    pub fn recompute(
        &mut self,
        template: Option<&PhotobookTemplate>,
        options: &[SelectedOption],
    ) {
        let total = compute_page_count(template, options);
        self.pages = (0..total).map(Page::new).collect();
        if self.current_page_index >= self.pages.len() {
            self.current_page_index = 0;
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn total_pages(&self) -> usize {
        self.pages.len()
    }

    pub fn current_page_index(&self) -> usize {
        self.current_page_index
    }

    /// 1-based page number for display.
    pub fn current_page_number(&self) -> usize {
        self.current_page_index + 1
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page_index + 1 < self.pages.len()
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page_index > 0
    }

    /// Move the current index. Out-of-bounds targets are a no-op: the
    /// current page stays mounted and the bad navigation is only logged.
    pub fn set_current_page_index(&mut self, index: usize) -> bool {
        if index >= self.pages.len() {
            warn!(
                "ignoring navigation to page {} ({} pages)",
                index,
                self.pages.len()
            );
            return false;
        }
        self.current_page_index = index;
        true
    }

    /// Upsert a page's serialized scene. `None` records "visited, empty",
    /// which is distinct from never having visited at all.
    pub fn update_content(&mut self, index: usize, scene: Option<Value>) {
        self.page_content.insert(index, scene);
    }

    pub fn content(&self, index: usize) -> Option<&Option<Value>> {
        self.page_content.get(&index)
    }

    /// Key presence, not truthiness: a `None` entry still counts as content.
    pub fn has_content(&self, index: usize) -> bool {
        self.page_content.contains_key(&index)
    }
}

/// Total visitable pages: the template's interior count plus the two covers
/// when a template is active, else derived from variant metadata.
pub fn compute_page_count(
    template: Option<&PhotobookTemplate>,
    options: &[SelectedOption],
) -> usize {
    match template {
        Some(template) => template.total_pages(),
        None => page_count_from_options(options),
    }
}
