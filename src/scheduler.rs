use std::collections::VecDeque;

use log::debug;

/// Deferred work scheduled by the editor and drained on the next settle
/// pass. The original order of scheduling is preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Save the live scene into the content map.
    SaveContent { page_index: usize },
    /// Restore a saved scene onto the canvas.
    RestoreContent { page_index: usize },
    /// First-visit template application.
    ApplyTemplate { page_index: usize },
    /// Re-render the page's thumbnail.
    RefreshThumbnail { page_index: usize },
}

impl DeferredTask {
    pub fn page_index(&self) -> usize {
        match self {
            DeferredTask::SaveContent { page_index }
            | DeferredTask::RestoreContent { page_index }
            | DeferredTask::ApplyTemplate { page_index }
            | DeferredTask::RefreshThumbnail { page_index } => *page_index,
        }
    }

    /// Whether the task mounts content onto the canvas and must therefore be
    /// discarded when the user has navigated away in the meantime.
    fn is_mount(&self) -> bool {
        matches!(
            self,
            DeferredTask::RestoreContent { .. } | DeferredTask::ApplyTemplate { .. }
        )
    }
}

/// Cooperative task queue standing in for the event loop's microtask/timer
/// scheduling: ordering hints, not concurrency.
///
/// Duplicate pending tasks coalesce (the debounce model: many mutation
/// events within one settle window yield a single save and a single
/// thumbnail refresh per page).
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: VecDeque<DeferredTask>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: DeferredTask) {
        if self.tasks.contains(&task) {
            return;
        }
        self.tasks.push_back(task);
    }

    /// Pop the next runnable task. Mount tasks whose target no longer
    /// matches the current page index are stale results of a superseded
    /// navigation and are dropped.
    pub fn next(&mut self, current_page_index: usize) -> Option<DeferredTask> {
        while let Some(task) = self.tasks.pop_front() {
            if task.is_mount() && task.page_index() != current_page_index {
                debug!(
                    "discarding stale {:?} (current page is {})",
                    task, current_page_index
                );
                continue;
            }
            return Some(task);
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_coalesce() {
        let mut queue = TaskQueue::new();
        queue.schedule(DeferredTask::RefreshThumbnail { page_index: 1 });
        queue.schedule(DeferredTask::RefreshThumbnail { page_index: 1 });
        queue.schedule(DeferredTask::RefreshThumbnail { page_index: 2 });
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_stale_mount_tasks_dropped() {
        let mut queue = TaskQueue::new();
        queue.schedule(DeferredTask::RestoreContent { page_index: 3 });
        queue.schedule(DeferredTask::ApplyTemplate { page_index: 4 });
        queue.schedule(DeferredTask::RefreshThumbnail { page_index: 3 });

        // User is now on page 5: both mounts are stale, the thumbnail
        // refresh for the left page still runs.
        assert_eq!(
            queue.next(5),
            Some(DeferredTask::RefreshThumbnail { page_index: 3 })
        );
        assert_eq!(queue.next(5), None);
    }

    #[test]
    fn test_order_preserved() {
        let mut queue = TaskQueue::new();
        queue.schedule(DeferredTask::SaveContent { page_index: 0 });
        queue.schedule(DeferredTask::RestoreContent { page_index: 1 });
        assert_eq!(queue.next(1), Some(DeferredTask::SaveContent { page_index: 0 }));
        assert_eq!(
            queue.next(1),
            Some(DeferredTask::RestoreContent { page_index: 1 })
        );
    }
}
