use crate::document::Document;

/// Events delivered to a page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Pointer click. `target` is the deepest element under the pointer.
    Click {
        target: Option<String>,
        button: MouseButton,
    },
    /// The page is about to be navigated away from.
    BeforeUnload,
}

impl Event {
    /// Left-button click on the element with `target`.
    pub fn click(target: impl Into<String>) -> Self {
        Self::Click {
            target: Some(target.into()),
            button: MouseButton::Left,
        }
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Something that reacts to page events by reading or mutating the document.
///
/// Handlers run synchronously and to completion, one event at a time.
pub trait EventHandler {
    fn handle(&mut self, document: &mut Document, event: &Event) -> EventResult;
}
