use super::PageState;

/// The ordered steps of one page switch: save the page being left, move the
/// index, then (deferred) either restore saved content or apply the slot's
/// template for a first visit, and refresh the left page's thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchPlan {
    /// Page being left; its content gets saved and its thumbnail refreshed.
    pub leaving_index: usize,
    pub target_index: usize,
    /// True when the target has saved content to restore. False means the
    /// target is unvisited and the template applicator should run instead.
    pub restore: bool,
}

/// Validate a navigation request and produce the switch protocol steps.
/// Out-of-bounds targets yield `None` (the page state logs the violation).
/// Navigating to the current page is a no-op as well.
pub fn plan_switch(state: &PageState, target_index: usize) -> Option<SwitchPlan> {
    if target_index == state.current_page_index() {
        return None;
    }
    if target_index >= state.total_pages() {
        return None;
    }
    Some(SwitchPlan {
        leaving_index: state.current_page_index(),
        target_index,
        restore: state.has_content(target_index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::SelectedOption;

    fn state() -> PageState {
        let mut state = PageState::new();
        state.recompute(None, &[SelectedOption::new("Pages", "12 Pages")]);
        state
    }

    #[test]
    fn test_plan_restores_only_visited_targets() {
        let mut state = state();
        state.update_content(4, None);

        let to_unvisited = plan_switch(&state, 2).unwrap();
        assert!(!to_unvisited.restore);

        let to_visited = plan_switch(&state, 4).unwrap();
        assert!(to_visited.restore);
        assert_eq!(to_visited.leaving_index, 0);
    }

    #[test]
    fn test_no_plan_for_bad_targets() {
        let state = state();
        assert!(plan_switch(&state, 0).is_none());
        assert!(plan_switch(&state, 12).is_none());
    }
}
