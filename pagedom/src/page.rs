use crate::document::Document;
use crate::event::{Event, EventHandler, EventResult};

/// A document together with the handlers listening on it.
pub struct Page {
    document: Document,
    handlers: Vec<Box<dyn EventHandler>>,
}

impl Page {
    pub fn new(document: impl Into<Document>) -> Self {
        Self {
            document: document.into(),
            handlers: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Register a handler. Handlers see events in registration order.
    pub fn listen(&mut self, handler: impl EventHandler + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Offer `event` to each handler until one consumes it.
    pub fn dispatch(&mut self, event: &Event) -> EventResult {
        for (index, handler) in self.handlers.iter_mut().enumerate() {
            if handler.handle(&mut self.document, event).is_handled() {
                log::trace!("event {event:?} consumed by handler #{index}");
                return EventResult::Consumed;
            }
        }
        EventResult::Ignored
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("document", &self.document)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
