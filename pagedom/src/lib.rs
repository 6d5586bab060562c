//! A small retained document tree with class lists, data attributes and
//! event dispatch. Enough of the browser DOM for presentation helpers to be
//! written and tested without a browser.

pub mod document;
pub mod element;
pub mod event;
pub mod page;
pub mod types;

pub use document::Document;
pub use element::{Content, Element};
pub use event::{Event, EventHandler, EventResult, MouseButton};
pub use page::Page;
pub use types::*;
