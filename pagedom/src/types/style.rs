/// Whether an element reacts to pointer input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerEvents {
    #[default]
    Auto,
    None,
}

/// Inline style of an element. Only the properties the page helpers touch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    /// Opacity in `0.0..=1.0`. `None` means inherited / fully opaque.
    pub opacity: Option<f32>,
    pub pointer_events: PointerEvents,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = Some(opacity.clamp(0.0, 1.0));
        self
    }

    pub fn pointer_events(mut self, pointer_events: PointerEvents) -> Self {
        self.pointer_events = pointer_events;
        self
    }
}
