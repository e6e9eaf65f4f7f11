use crate::constants::{SENTINEL_CONTENT, SENTINEL_PATH};
use crate::logger;

/// One editable file: path identifier, current text, dirty flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Unique path identifier
    pub path: String,
    /// Current text content
    pub content: String,
    /// Content diverges from the pristine copy
    pub dirty: bool,
}

impl ArchiveEntry {
    fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            dirty: false,
        }
    }
}

/// Collection of working buffers plus their pristine originals.
///
/// The working and pristine sequences always have equal length and
/// index-aligned paths. An entry is dirty exactly when its content
/// differs from the pristine copy; reset restores pristine content,
/// a successful commit re-baselines pristine to the working set.
#[derive(Debug)]
pub struct Archive {
    /// Working copies the user edits
    working: Vec<ArchiveEntry>,
    /// Originals as loaded or last committed, same order as working
    pristine: Vec<ArchiveEntry>,
    /// Index of the buffer shown in the editor
    current: usize,
    /// Editing disabled (view-only archive)
    editing_disabled: bool,
}

impl Archive {
    /// Build an archive from backend-supplied (path, content) pairs.
    ///
    /// An empty list yields a single placeholder entry so the editor
    /// always has something to show.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        let pristine: Vec<ArchiveEntry> = if pairs.is_empty() {
            vec![ArchiveEntry::new(SENTINEL_PATH, SENTINEL_CONTENT)]
        } else {
            pairs
                .into_iter()
                .map(|(path, content)| ArchiveEntry::new(path, content))
                .collect()
        };
        let working = pristine.clone();

        Self {
            working,
            pristine,
            current: 0,
            editing_disabled: false,
        }
    }

    /// Disable editing (view-only archive)
    pub fn set_editing_disabled(&mut self, disabled: bool) {
        self.editing_disabled = disabled;
    }

    /// Check if editing is disabled
    pub fn editing_disabled(&self) -> bool {
        self.editing_disabled
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.working.len()
    }

    /// The archive is never empty (placeholder entry at minimum)
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.working.is_empty()
    }

    /// Index of the currently selected entry
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Currently selected entry
    pub fn current_entry(&self) -> &ArchiveEntry {
        &self.working[self.current]
    }

    /// Entry by index
    pub fn entry(&self, index: usize) -> Option<&ArchiveEntry> {
        self.working.get(index)
    }

    /// Pristine entry by index
    #[allow(dead_code)]
    pub fn pristine_entry(&self, index: usize) -> Option<&ArchiveEntry> {
        self.pristine.get(index)
    }

    /// Iterate over working entries in order
    pub fn entries(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.working.iter()
    }

    /// Switch the visible buffer to `index`.
    ///
    /// Out-of-range indices are a defined no-op: state is unchanged,
    /// `false` is returned and a warning is logged.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.working.len() {
            logger::warn(format!(
                "select: index {} out of range (len {})",
                index,
                self.working.len()
            ));
            return false;
        }
        self.current = index;
        true
    }

    /// Replace the current entry's content with `new_content`.
    ///
    /// The dirty flag is recomputed against the pristine copy, so
    /// editing the original text back in clears the marker.
    /// No-op when editing is disabled.
    pub fn edit(&mut self, new_content: &str) {
        if self.editing_disabled {
            return;
        }
        self.edit_at(self.current, new_content);
    }

    /// Replace the content of the entry at `index` (detached view mirroring).
    ///
    /// Out-of-range indices are a defined no-op with a warning, like `select`.
    pub fn edit_at(&mut self, index: usize, new_content: &str) -> bool {
        if self.editing_disabled {
            return false;
        }
        let Some(entry) = self.working.get_mut(index) else {
            logger::warn(format!(
                "edit: index {} out of range (len {})",
                index,
                self.working.len()
            ));
            return false;
        };
        if entry.content != new_content {
            entry.content = new_content.to_string();
        }
        entry.dirty = entry.content != self.pristine[index].content;
        true
    }

    /// Replace the entry at `index` with a fresh copy of its pristine
    /// original and clear its dirty flag.
    ///
    /// Out-of-range indices are a defined no-op: state is unchanged,
    /// `false` is returned and a warning is logged.
    pub fn reset_entry(&mut self, index: usize) -> bool {
        if index >= self.working.len() {
            logger::warn(format!(
                "reset: index {} out of range (len {})",
                index,
                self.working.len()
            ));
            return false;
        }
        self.working[index] = self.pristine[index].clone();
        true
    }

    /// Re-initialize every working entry from its pristine copy and
    /// select the first entry. Clears all dirty flags, which disarms
    /// the unsaved-changes confirmation.
    pub fn reset_all(&mut self) {
        self.working = self.pristine.clone();
        self.current = 0;
    }

    /// Re-baseline after a successful commit: pristine becomes a copy
    /// of the working set and every dirty flag clears.
    pub fn mark_committed(&mut self) {
        for entry in &mut self.working {
            entry.dirty = false;
        }
        self.pristine = self.working.clone();
    }

    /// True while any entry has uncommitted edits.
    ///
    /// Gates the quit confirmation (the unsaved-changes warning).
    pub fn any_dirty(&self) -> bool {
        self.working.iter().any(|e| e.dirty)
    }

    /// Number of dirty entries
    pub fn dirty_count(&self) -> usize {
        self.working.iter().filter(|e| e.dirty).count()
    }

    /// (path, content) pairs of the working set, for the backend
    pub fn payload(&self) -> Vec<(String, String)> {
        self.working
            .iter()
            .map(|e| (e.path.clone(), e.content.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Archive {
        Archive::new(vec![
            ("a.txt".to_string(), "hello".to_string()),
            ("b.txt".to_string(), "world".to_string()),
        ])
    }

    #[test]
    fn test_empty_list_yields_placeholder() {
        let archive = Archive::new(Vec::new());
        assert_eq!(archive.len(), 1);
        assert_eq!(archive.current_entry().path, "/dev/null");
        assert_eq!(archive.current_entry().content, "No files specified");
        assert!(!archive.current_entry().dirty);
    }

    #[test]
    fn test_init_aligns_working_and_pristine() {
        let archive = sample();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.current_index(), 0);
        for i in 0..archive.len() {
            let working = archive.entry(i).unwrap();
            let pristine = archive.pristine_entry(i).unwrap();
            assert_eq!(working.path, pristine.path);
            assert_eq!(working.content, pristine.content);
            assert!(!working.dirty);
        }
    }

    #[test]
    fn test_edit_marks_only_target_dirty() {
        let mut archive = sample();
        archive.edit("HELLO");

        let first = archive.entry(0).unwrap();
        assert!(first.dirty);
        assert_eq!(first.content, "HELLO");

        let second = archive.entry(1).unwrap();
        assert!(!second.dirty);
        assert_eq!(second.content, "world");
    }

    #[test]
    fn test_edit_back_to_pristine_clears_dirty() {
        let mut archive = sample();
        archive.edit("HELLO");
        assert!(archive.entry(0).unwrap().dirty);

        archive.edit("hello");
        assert!(!archive.entry(0).unwrap().dirty);
        assert!(!archive.any_dirty());
    }

    #[test]
    fn test_reset_entry_restores_pristine() {
        let mut archive = sample();
        archive.edit("HELLO");

        assert!(archive.reset_entry(0));
        let first = archive.entry(0).unwrap();
        assert_eq!(first.content, "hello");
        assert!(!first.dirty);
    }

    #[test]
    fn test_reset_all_restores_everything() {
        let mut archive = sample();
        archive.edit("HELLO");
        archive.select(1);
        archive.edit("WORLD");

        archive.reset_all();
        assert_eq!(archive.current_index(), 0);
        assert!(!archive.any_dirty());
        for i in 0..archive.len() {
            assert_eq!(
                archive.entry(i).unwrap().content,
                archive.pristine_entry(i).unwrap().content
            );
        }
    }

    #[test]
    fn test_out_of_range_select_is_noop() {
        let mut archive = sample();
        archive.select(1);

        assert!(!archive.select(2));
        assert!(!archive.select(usize::MAX));
        assert_eq!(archive.current_index(), 1);
    }

    #[test]
    fn test_out_of_range_reset_is_noop() {
        let mut archive = sample();
        archive.edit("HELLO");

        assert!(!archive.reset_entry(2));
        assert_eq!(archive.entry(0).unwrap().content, "HELLO");
        assert!(archive.entry(0).unwrap().dirty);
    }

    #[test]
    fn test_mark_committed_rebaselines() {
        let mut archive = sample();
        archive.edit("HELLO");
        assert!(archive.any_dirty());

        archive.mark_committed();
        assert!(!archive.any_dirty());
        assert_eq!(archive.pristine_entry(0).unwrap().content, "HELLO");

        // A reset after commit restores the committed text, not the
        // originally loaded one
        archive.edit("changed again");
        assert!(archive.reset_entry(0));
        assert_eq!(archive.entry(0).unwrap().content, "HELLO");
    }

    #[test]
    fn test_editing_disabled_blocks_edits() {
        let mut archive = sample();
        archive.set_editing_disabled(true);

        archive.edit("HELLO");
        assert_eq!(archive.entry(0).unwrap().content, "hello");
        assert!(!archive.any_dirty());
    }

    #[test]
    fn test_dirty_count_and_payload() {
        let mut archive = sample();
        archive.edit("HELLO");
        archive.select(1);
        archive.edit("WORLD");

        assert_eq!(archive.dirty_count(), 2);
        assert_eq!(
            archive.payload(),
            vec![
                ("a.txt".to_string(), "HELLO".to_string()),
                ("b.txt".to_string(), "WORLD".to_string()),
            ]
        );
    }

    #[test]
    fn test_edit_then_revert_scenario() {
        // init [("a.txt","hello"),("b.txt","world")] -> edit 0 "HELLO"
        // -> reset 0 -> clean "hello"
        let mut archive = sample();
        archive.edit("HELLO");
        assert!(archive.entry(0).unwrap().dirty);
        assert_eq!(archive.entry(0).unwrap().content, "HELLO");
        assert_eq!(archive.entry(1).unwrap().content, "world");

        archive.reset_entry(0);
        assert!(!archive.entry(0).unwrap().dirty);
        assert_eq!(archive.entry(0).unwrap().content, "hello");
    }
}
