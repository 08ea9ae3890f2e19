//! String interning for task IDs.
//!
//! Task IDs are mapped to dense integers so the algorithms can use plain
//! vectors instead of string-keyed maps. IDs are interned in ascending
//! lexicographic order, so comparing two [`TaskId`]s gives the same answer as
//! comparing the strings they stand for. Every tie-break in the scheduler
//! relies on this.

use rustc_hash::FxHashMap;

/// Interned task ID.
pub type TaskId = u32;

/// Bidirectional mapping between task ID strings and ordered integers.
#[derive(Debug, Clone, Default)]
pub struct TaskIndex {
    to_int: FxHashMap<String, TaskId>,
    from_int: Vec<String>,
}

impl TaskIndex {
    /// Build an index from arbitrary IDs. Duplicates are collapsed.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut sorted: Vec<String> = ids.into_iter().map(Into::into).collect();
        sorted.sort();
        sorted.dedup();

        let to_int = sorted
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), i as TaskId))
            .collect();

        Self {
            to_int,
            from_int: sorted,
        }
    }

    #[inline]
    pub fn get_id(&self, s: &str) -> Option<TaskId> {
        self.to_int.get(s).copied()
    }

    /// Resolve an interned ID back to its string.
    ///
    /// IDs handed out by this index are always valid, so this indexes directly.
    #[inline]
    pub fn name(&self, id: TaskId) -> &str {
        &self.from_int[id as usize]
    }

    pub fn len(&self) -> usize {
        self.from_int.len()
    }

    pub fn is_empty(&self) -> bool {
        self.from_int.is_empty()
    }

    /// All IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = TaskId> {
        0..self.from_int.len() as TaskId
    }
}
