//! Edit mirroring between the detached view and the primary state.
//!
//! The detached full-screen surface never holds a reference back into
//! the primary editor; it only owns a sender. The application drains
//! the receiver on every loop iteration and applies the events to the
//! archive.

use std::sync::mpsc::{self, Receiver, Sender};

/// One mirrored edit: the full new content of the entry at `index`
#[derive(Debug, Clone)]
pub struct EditEvent {
    /// Archive entry the edit belongs to
    pub index: usize,
    /// Full replacement content
    pub content: String,
}

/// Create a connected (sender, receiver) pair for edit mirroring
pub fn channel() -> (Sender<EditEvent>, Receiver<EditEvent>) {
    mpsc::channel()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let (tx, rx) = channel();
        tx.send(EditEvent {
            index: 0,
            content: "first".to_string(),
        })
        .unwrap();
        tx.send(EditEvent {
            index: 0,
            content: "second".to_string(),
        })
        .unwrap();

        let drained: Vec<EditEvent> = rx.try_iter().collect();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].content, "first");
        assert_eq!(drained[1].content, "second");
    }
}
