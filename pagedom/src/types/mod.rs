mod style;

pub use style::{PointerEvents, Style};
