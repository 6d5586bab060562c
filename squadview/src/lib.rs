//! Presentation helpers for the club and player pages: click-to-sort tables
//! and color utilities for club badges.

pub mod color;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod page;
pub mod table;

use std::sync::Arc;

use pagedom::Page;

pub use color::{ColorClassifier, Gradient, Rgb};
pub use config::{ColorConfig, MissingCellPolicy, SecondaryTieBreak, SortConfig, ViewConfig};
pub use diagnostics::{Diagnostic, Diagnostics, LogDiagnostics, RecordingDiagnostics, Severity};
pub use error::{ColorError, ConfigError, LoggingError, SortError};
pub use page::BusyIndicator;
pub use table::{SortDirection, SortOutcome, TableSorter};

/// Wire the page behaviors onto a loaded page: a table sorter bound to the
/// current sortable headers, then the navigation busy indicator.
///
/// Returns the number of sortable headers bound.
pub fn attach(page: &mut Page, config: &ViewConfig, diagnostics: Arc<dyn Diagnostics>) -> usize {
    let mut sorter = TableSorter::new(config.sorting.clone(), diagnostics);
    let bound = sorter.bind(page.document());
    page.listen(sorter);
    page.listen(BusyIndicator::new());
    log::info!("attached page helpers ({bound} sortable headers)");
    bound
}
