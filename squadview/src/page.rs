//! Navigation busy affordance.

use pagedom::{Document, Event, EventHandler, EventResult, PointerEvents};

/// Dims the page body and disables pointer input once navigation starts.
///
/// Purely cosmetic. The event is left unconsumed for other unload handlers.
#[derive(Debug, Clone, Copy)]
pub struct BusyIndicator {
    opacity: f32,
}

impl Default for BusyIndicator {
    fn default() -> Self {
        Self { opacity: 0.7 }
    }
}

impl BusyIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    fn mark_busy(&self, document: &mut Document) -> bool {
        let Some(body_id) = document
            .query_all(|el| el.is("body"))
            .first()
            .map(|el| el.id.clone())
        else {
            return false;
        };
        let Some(body) = document.find_mut(&body_id) else {
            return false;
        };
        body.style.opacity = Some(self.opacity);
        body.style.pointer_events = PointerEvents::None;
        true
    }
}

impl EventHandler for BusyIndicator {
    fn handle(&mut self, document: &mut Document, event: &Event) -> EventResult {
        if matches!(event, Event::BeforeUnload) && self.mark_busy(document) {
            log::debug!("page marked busy for navigation");
        }
        EventResult::Ignored
    }
}
