//! Click-to-sort for rendered tables.
//!
//! Headers carrying the sortable marker class reorder the rows of their
//! table's body when clicked. The clicked header gets an `ascending` or
//! `descending` class; every other header of the table loses both.
//!
//! # Example
//!
//! ```
//! use pagedom::{Document, Element};
//! use squadview::config::SortConfig;
//! use squadview::diagnostics::log_diagnostics;
//! use squadview::table::{SortDirection, TableSorter};
//!
//! let mut doc = Document::new(Element::table().children([
//!     Element::thead().child(
//!         Element::tr().child(Element::th("Goals").id("goals").class("sortable").data("column", "goals")),
//!     ),
//!     Element::tbody().children([
//!         Element::tr().child(Element::td("12")),
//!         Element::tr().child(Element::td("3")),
//!     ]),
//! ]));
//!
//! let mut sorter = TableSorter::new(SortConfig::default(), log_diagnostics());
//! sorter.bind(&doc);
//! let outcome = sorter.sort_by_header(&mut doc, "goals").unwrap();
//! assert_eq!(outcome.direction, SortDirection::Ascending);
//! assert!(doc.find("goals").unwrap().has_class("ascending"));
//! ```

mod direction;
mod key;
mod position;
mod sorter;

pub use direction::SortDirection;
pub use key::CellKey;
pub use position::{PositionKey, PositionRanks, Rank};
pub use sorter::{ColumnKind, SortOutcome, TableSorter};
