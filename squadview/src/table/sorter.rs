use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use pagedom::{Document, Element, Event, EventHandler, EventResult, MouseButton};

use super::direction::SortDirection;
use super::key::CellKey;
use super::position::PositionKey;
use crate::config::{MissingCellPolicy, SortConfig};
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::SortError;

const SOURCE: &str = "table_sort";

/// How a column's cells are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Numbers numerically, everything else as text.
    Natural,
    /// Comma-separated position codes, by rank.
    Position,
}

/// What a completed sort did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOutcome {
    pub header: String,
    pub column: usize,
    pub kind: ColumnKind,
    pub direction: SortDirection,
    /// Rows placed by key.
    pub sorted: usize,
    /// Rows without a cell at `column`, kept at the end.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
enum RowKey {
    Natural(CellKey),
    Position(PositionKey),
}

/// Sorts a table's rows when one of its sortable headers is clicked.
pub struct TableSorter {
    config: SortConfig,
    diagnostics: Arc<dyn Diagnostics>,
    headers: HashSet<String>,
}

impl TableSorter {
    pub fn new(config: SortConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            config,
            diagnostics,
            headers: HashSet::new(),
        }
    }

    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Start listening on every element that currently carries the sortable
    /// class. Returns how many headers are bound in total.
    pub fn bind(&mut self, document: &Document) -> usize {
        for header in document.query_class(&self.config.sortable_class) {
            self.headers.insert(header.id.clone());
        }
        log::debug!("bound {} sortable headers", self.headers.len());
        self.headers.len()
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.headers.contains(id)
    }

    /// Nearest bound header at or above the click target.
    fn header_for_target(&self, document: &Document, target: &str) -> Option<String> {
        document
            .ancestors(target)
            .into_iter()
            .rev()
            .find(|el| self.headers.contains(&el.id))
            .map(|el| el.id.clone())
    }

    /// Sort the table owning `header_id` by that header's column.
    ///
    /// Direction flips from ascending to descending, otherwise ascending.
    /// The document is left untouched when an error is returned.
    pub fn sort_by_header(
        &self,
        document: &mut Document,
        header_id: &str,
    ) -> Result<SortOutcome, SortError> {
        let header_path = document
            .path_to(header_id)
            .ok_or_else(|| SortError::ElementNotFound(header_id.to_string()))?;
        let column = *header_path
            .last()
            .ok_or_else(|| SortError::NoTable(header_id.to_string()))?;
        let header_row_id = document
            .get_path(&header_path[..header_path.len() - 1])
            .map(|row| row.id.clone());

        let (kind, direction) = {
            let header = document
                .get_path(&header_path)
                .ok_or_else(|| SortError::ElementNotFound(header_id.to_string()))?;
            (self.column_kind(header), SortDirection::next_for(header))
        };

        let table_path = document
            .closest_path(header_id, "table")
            .ok_or_else(|| SortError::NoTable(header_id.to_string()))?;
        let body_path = {
            let table = document
                .get_path(&table_path)
                .ok_or_else(|| SortError::NoTable(header_id.to_string()))?;
            let index = table
                .child_elements()
                .iter()
                .position(|el| el.is("tbody"))
                .ok_or_else(|| SortError::NoBody(table.id.clone()))?;
            let mut path = table_path.clone();
            path.push(index);
            path
        };

        let order = {
            let body = document
                .get_path(&body_path)
                .ok_or_else(|| SortError::NoTable(header_id.to_string()))?;
            self.row_order(body, header_row_id.as_deref(), column, kind, direction)?
        };

        if let Some(table) = document.get_path_mut(&table_path) {
            self.clear_sort_state(table);
        }
        if let Some(rows) = document
            .get_path_mut(&body_path)
            .and_then(Element::child_elements_mut)
        {
            let mut slots: Vec<Option<Element>> = std::mem::take(rows).into_iter().map(Some).collect();
            *rows = order
                .indices
                .iter()
                .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
                .collect();
        }
        if let Some(header) = document.find_mut(header_id) {
            header.add_class(direction.css_class());
        }

        let outcome = SortOutcome {
            header: header_id.to_string(),
            column,
            kind,
            direction,
            sorted: order.sorted,
            skipped: order.skipped,
        };
        log::debug!(
            "sorted '{}' by column {} ({:?}, {:?}): {} rows, {} skipped",
            outcome.header,
            outcome.column,
            outcome.kind,
            outcome.direction,
            outcome.sorted,
            outcome.skipped
        );
        Ok(outcome)
    }

    fn column_kind(&self, header: &Element) -> ColumnKind {
        match header.get_data("column") {
            Some(column) if *column == self.config.position_column => ColumnKind::Position,
            _ => ColumnKind::Natural,
        }
    }

    /// New child order for the table body. Children that are not data rows
    /// keep their index; the remaining slots take rows by key, then rows
    /// lacking the cell.
    fn row_order(
        &self,
        body: &Element,
        header_row: Option<&str>,
        column: usize,
        kind: ColumnKind,
        direction: SortDirection,
    ) -> Result<RowOrder, SortError> {
        let mut fixed = Vec::new();
        let mut keyed = Vec::new();
        let mut skipped = Vec::new();

        for (index, row) in body.child_elements().iter().enumerate() {
            if !row.is("tr") || header_row == Some(row.id.as_str()) {
                fixed.push(index);
                continue;
            }

            let Some(cell) = row.child_elements().get(column) else {
                match self.config.missing_cell {
                    MissingCellPolicy::Fail => {
                        return Err(SortError::MissingCell {
                            row: row.id.clone(),
                            column,
                        });
                    }
                    MissingCellPolicy::Skip => {
                        self.diagnostics.report(Diagnostic::warning(
                            SOURCE,
                            format!("row '{}' has no cell at column {column}, kept at the end", row.id),
                        ));
                        skipped.push(index);
                        continue;
                    }
                }
            };

            let text = cell.text_content();
            let key = match kind {
                ColumnKind::Natural => RowKey::Natural(CellKey::parse(&text)),
                ColumnKind::Position => {
                    RowKey::Position(PositionKey::parse(&text, &self.config.position_ranks))
                }
            };
            keyed.push((index, key));
        }

        // Stable, so equal keys keep their relative order.
        keyed.sort_by(|(_, a), (_, b)| direction.apply(self.compare(a, b)));

        let sorted = keyed.len();
        let skipped_count = skipped.len();
        let mut movable = keyed
            .into_iter()
            .map(|(index, _)| index)
            .chain(skipped);
        let indices = (0..body.child_elements().len())
            .filter_map(|index| {
                if fixed.contains(&index) {
                    Some(index)
                } else {
                    movable.next()
                }
            })
            .collect();

        Ok(RowOrder {
            indices,
            sorted,
            skipped: skipped_count,
        })
    }

    /// Remove both direction classes from every header cell under `root`.
    /// Data cells and rows keep their classes.
    fn clear_sort_state(&self, root: &mut Element) {
        if root.is("th") || self.is_bound(&root.id) {
            for direction in SortDirection::ALL {
                root.remove_class(direction.css_class());
            }
        }
        if let Some(children) = root.child_elements_mut() {
            for child in children {
                self.clear_sort_state(child);
            }
        }
    }

    fn compare(&self, a: &RowKey, b: &RowKey) -> Ordering {
        match (a, b) {
            (RowKey::Natural(a), RowKey::Natural(b)) => a.compare(b),
            (RowKey::Position(a), RowKey::Position(b)) => {
                let tie_break = self.config.secondary_tie_break;
                a.ordering_key(tie_break).cmp(&b.ordering_key(tie_break))
            }
            // A column is keyed one way throughout.
            _ => Ordering::Equal,
        }
    }
}

impl std::fmt::Debug for TableSorter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSorter")
            .field("config", &self.config)
            .field("headers", &self.headers.len())
            .finish()
    }
}

impl EventHandler for TableSorter {
    fn handle(&mut self, document: &mut Document, event: &Event) -> EventResult {
        let Event::Click {
            target: Some(target),
            button: MouseButton::Left,
        } = event
        else {
            return EventResult::Ignored;
        };

        let Some(header) = self.header_for_target(document, target) else {
            return EventResult::Ignored;
        };

        match self.sort_by_header(document, &header) {
            Ok(_) => EventResult::Consumed,
            Err(err) => {
                self.diagnostics.report(Diagnostic::error(SOURCE, err.to_string()));
                EventResult::Ignored
            }
        }
    }
}

struct RowOrder {
    indices: Vec<usize>,
    sorted: usize,
    skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SecondaryTieBreak;
    use crate::diagnostics::{RecordingDiagnostics, Severity};
    use pretty_assertions::assert_eq;

    /// Squad table with name / age / position columns.
    fn squad(rows: &[(&str, &str, &str)]) -> Document {
        Document::new(
            Element::body().id("body").child(
                Element::table().id("squad").children([
                    Element::thead().child(Element::tr().id("head").children([
                        Element::th("Name").id("h-name").class("sortable").data("column", "name"),
                        Element::th("Age").id("h-age").class("sortable").data("column", "age"),
                        Element::th("Pos").id("h-pos").class("sortable").data("column", "position"),
                    ])),
                    Element::tbody().id("rows").children(rows.iter().enumerate().map(
                        |(i, (name, age, pos))| {
                            Element::tr()
                                .id(format!("r{i}"))
                                .children([Element::td(*name), Element::td(*age), Element::td(*pos)])
                        },
                    )),
                ]),
            ),
        )
    }

    fn row_ids(doc: &Document) -> Vec<String> {
        doc.find("rows")
            .unwrap()
            .child_elements()
            .iter()
            .map(|row| row.id.clone())
            .collect()
    }

    fn sorter_with(config: SortConfig) -> (TableSorter, Arc<RecordingDiagnostics>) {
        let diagnostics = RecordingDiagnostics::new();
        let mut sorter = TableSorter::new(config, diagnostics.clone());
        sorter.headers.extend(["h-name", "h-age", "h-pos"].map(String::from));
        (sorter, diagnostics)
    }

    fn sorter() -> (TableSorter, Arc<RecordingDiagnostics>) {
        sorter_with(SortConfig::default())
    }

    #[test]
    fn numeric_column_sorts_numerically() {
        let mut doc = squad(&[("A", "9", "GK"), ("B", "31", "DF"), ("C", "10", "MF")]);
        let (sorter, _) = sorter();

        let outcome = sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!(outcome.column, 1);
        assert_eq!(outcome.kind, ColumnKind::Natural);
        assert_eq!(outcome.direction, SortDirection::Ascending);
        assert_eq!(row_ids(&doc), vec!["r0", "r2", "r1"]);
    }

    #[test]
    fn second_click_reverses_distinct_keys() {
        let mut doc = squad(&[("A", "27", ""), ("B", "19", ""), ("C", "33", ""), ("D", "22", "")]);
        let (sorter, _) = sorter();

        sorter.sort_by_header(&mut doc, "h-age").unwrap();
        let first = row_ids(&doc);
        let outcome = sorter.sort_by_header(&mut doc, "h-age").unwrap();
        let second = row_ids(&doc);

        assert_eq!(outcome.direction, SortDirection::Descending);
        assert_eq!(first, vec!["r1", "r3", "r0", "r2"]);
        assert_eq!(second, first.iter().rev().cloned().collect::<Vec<_>>());

        // And back again.
        assert_eq!(
            sorter.sort_by_header(&mut doc, "h-age").unwrap().direction,
            SortDirection::Ascending
        );
        assert_eq!(row_ids(&doc), first);
    }

    #[test]
    fn text_column_is_case_sensitive() {
        let mut doc = squad(&[("bruno", "1", ""), ("Zé", "2", ""), ("Ana", "3", "")]);
        let (sorter, _) = sorter();
        sorter.sort_by_header(&mut doc, "h-name").unwrap();
        assert_eq!(row_ids(&doc), vec!["r2", "r1", "r0"]);
    }

    #[test]
    fn mixed_column_puts_numbers_first() {
        let mut doc = squad(&[("A", "n/a", ""), ("B", "20", ""), ("C", "-", ""), ("D", "18", "")]);
        let (sorter, _) = sorter();
        sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!(row_ids(&doc), vec!["r3", "r1", "r2", "r0"]);
    }

    #[test]
    fn equal_keys_keep_relative_order_both_ways() {
        let mut doc = squad(&[("A", "25", ""), ("B", "20", ""), ("C", "25", ""), ("D", "20", "")]);
        let (sorter, _) = sorter();

        sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!(row_ids(&doc), vec!["r1", "r3", "r0", "r2"]);

        sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!(row_ids(&doc), vec!["r0", "r2", "r1", "r3"]);
    }

    #[test]
    fn position_column_uses_rank_table() {
        let mut doc = squad(&[("A", "1", "FW"), ("B", "2", "GK"), ("C", "3", "MF,DF")]);
        let (sorter, _) = sorter();

        let outcome = sorter.sort_by_header(&mut doc, "h-pos").unwrap();
        assert_eq!(outcome.kind, ColumnKind::Position);
        assert_eq!(row_ids(&doc), vec!["r1", "r2", "r0"]);
    }

    #[test]
    fn position_unknown_codes_sort_last() {
        let mut doc = squad(&[("A", "1", "ST"), ("B", "2", "FW"), ("C", "3", ""), ("D", "4", "GK")]);
        let (sorter, _) = sorter();
        sorter.sort_by_header(&mut doc, "h-pos").unwrap();
        assert_eq!(row_ids(&doc), vec!["r3", "r1", "r0", "r2"]);
    }

    #[test]
    fn position_secondary_tie_breaks() {
        let rows = [("A", "1", "MF,FW"), ("B", "2", "MF"), ("C", "3", "MF,DF")];

        let mut doc = squad(&rows);
        let (primary_only, _) = sorter_with(
            SortConfig::default().with_secondary_tie_break(SecondaryTieBreak::None),
        );
        primary_only.sort_by_header(&mut doc, "h-pos").unwrap();
        assert_eq!(row_ids(&doc), vec!["r0", "r1", "r2"]);

        let mut doc = squad(&rows);
        let (when_present, _) = sorter();
        when_present.sort_by_header(&mut doc, "h-pos").unwrap();
        assert_eq!(row_ids(&doc), vec!["r1", "r2", "r0"]);

        let mut doc = squad(&rows);
        let (own_primary, _) = sorter_with(
            SortConfig::default().with_secondary_tie_break(SecondaryTieBreak::OwnPrimary),
        );
        own_primary.sort_by_header(&mut doc, "h-pos").unwrap();
        assert_eq!(row_ids(&doc), vec!["r2", "r1", "r0"]);
    }

    #[test]
    fn alternate_rank_table_is_injected() {
        let mut doc = squad(&[("A", "1", "GK"), ("B", "2", "FW"), ("C", "3", "DF")]);
        let ranks = crate::table::PositionRanks::new([("FW", 1), ("DF", 2), ("GK", 3)]);
        let (sorter, _) = sorter_with(SortConfig::default().with_position_ranks(ranks));
        sorter.sort_by_header(&mut doc, "h-pos").unwrap();
        assert_eq!(row_ids(&doc), vec!["r1", "r2", "r0"]);
    }

    #[test]
    fn only_clicked_header_carries_state() {
        let mut doc = squad(&[("A", "1", "GK"), ("B", "2", "FW")]);
        let (sorter, _) = sorter();

        sorter.sort_by_header(&mut doc, "h-name").unwrap();
        sorter.sort_by_header(&mut doc, "h-name").unwrap();
        assert!(doc.find("h-name").unwrap().has_class("descending"));

        sorter.sort_by_header(&mut doc, "h-age").unwrap();
        let name = doc.find("h-name").unwrap();
        assert!(!name.has_class("ascending") && !name.has_class("descending"));
        let age = doc.find("h-age").unwrap();
        assert_eq!(age.classes, vec!["sortable", "ascending"]);
    }

    #[test]
    fn rows_are_moved_not_rebuilt() {
        let mut doc = squad(&[("A", "30", "GK"), ("B", "20", "FW")]);
        let before = doc.find("r0").unwrap().clone();
        let (sorter, _) = sorter();

        sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!(doc.find("r0").unwrap(), &before);
    }

    #[test]
    fn data_cell_classes_survive_a_sort() {
        let mut doc = squad(&[("A", "30", "GK"), ("B", "20", "FW")]);
        let r0 = doc.find_mut("r0").unwrap();
        r0.add_class("ascending");
        r0.child_elements_mut().unwrap()[1].add_class("descending");
        let (sorter, _) = sorter();

        sorter.sort_by_header(&mut doc, "h-name").unwrap();
        sorter.sort_by_header(&mut doc, "h-age").unwrap();

        let r0 = doc.find("r0").unwrap();
        assert!(r0.has_class("ascending"));
        assert!(r0.child_elements()[1].has_class("descending"));
        assert!(!doc.find("h-name").unwrap().has_class("ascending"));
    }

    #[test]
    fn non_row_children_keep_their_place() {
        let mut doc = squad(&[("A", "30", "GK"), ("B", "20", "FW"), ("C", "25", "MF")]);
        doc.find_mut("rows")
            .unwrap()
            .child_elements_mut()
            .unwrap()
            .insert(1, Element::div().id("divider"));
        let (sorter, _) = sorter();

        let outcome = sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!(outcome.sorted, 3);
        assert_eq!(row_ids(&doc), vec!["r1", "divider", "r2", "r0"]);
    }

    #[test]
    fn header_row_inside_body_stays_put() {
        let mut doc = Document::new(Element::table().child(Element::tbody().id("rows").children([
            Element::tr().id("r0").child(Element::td("9")),
            Element::tr()
                .id("head")
                .child(Element::th("Goals").id("h").class("sortable")),
            Element::tr().id("r1").child(Element::td("3")),
            Element::tr().id("r2").child(Element::td("5")),
        ])));
        let diagnostics = RecordingDiagnostics::new();
        let mut sorter = TableSorter::new(SortConfig::default(), diagnostics.clone());
        sorter.bind(&doc);

        sorter.sort_by_header(&mut doc, "h").unwrap();
        assert_eq!(row_ids(&doc), vec!["r1", "head", "r2", "r0"]);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_cell_is_skipped_to_the_end() {
        let mut doc = squad(&[("A", "30", "GK"), ("B", "20", "FW"), ("C", "25", "MF")]);
        doc.find_mut("r1")
            .unwrap()
            .child_elements_mut()
            .unwrap()
            .truncate(1);
        let (sorter, diagnostics) = sorter();

        let outcome = sorter.sort_by_header(&mut doc, "h-age").unwrap();
        assert_eq!((outcome.sorted, outcome.skipped), (2, 1));
        assert_eq!(row_ids(&doc), vec!["r2", "r0", "r1"]);

        let reports = diagnostics.take();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Warning);
    }

    #[test]
    fn missing_cell_fails_without_mutation() {
        let mut doc = squad(&[("A", "30", "GK"), ("B", "20", "FW")]);
        doc.find_mut("r0")
            .unwrap()
            .child_elements_mut()
            .unwrap()
            .truncate(1);
        sorter().0.sort_by_header(&mut doc, "h-name").unwrap();
        let before = doc.clone();

        let (sorter, _) = sorter_with(SortConfig::default().with_missing_cell(MissingCellPolicy::Fail));
        let err = sorter.sort_by_header(&mut doc, "h-age").unwrap_err();
        assert_eq!(
            err,
            SortError::MissingCell {
                row: "r0".into(),
                column: 1
            }
        );
        assert_eq!(doc, before);
    }

    #[test]
    fn structural_errors() {
        let (sorter, _) = sorter();

        let mut doc = squad(&[]);
        assert_eq!(
            sorter.sort_by_header(&mut doc, "nope").unwrap_err(),
            SortError::ElementNotFound("nope".into())
        );

        let mut loose = Document::new(Element::div().child(Element::th("Loose").id("loose")));
        assert_eq!(
            sorter.sort_by_header(&mut loose, "loose").unwrap_err(),
            SortError::NoTable("loose".into())
        );

        let mut bodiless = Document::new(
            Element::table()
                .id("t")
                .child(Element::thead().child(Element::tr().child(Element::th("X").id("x")))),
        );
        assert_eq!(
            sorter.sort_by_header(&mut bodiless, "x").unwrap_err(),
            SortError::NoBody("t".into())
        );
    }

    #[test]
    fn click_bubbles_from_header_content() {
        let mut doc = Document::new(Element::table().children([
            Element::thead().child(Element::tr().child(
                Element::new("th")
                    .id("h")
                    .class("sortable")
                    .child(Element::new("span").id("label").text("Caps")),
            )),
            Element::tbody().id("rows").children([
                Element::tr().id("r0").child(Element::td("80")),
                Element::tr().id("r1").child(Element::td("7")),
            ]),
        ]));
        let diagnostics = RecordingDiagnostics::new();
        let mut sorter = TableSorter::new(SortConfig::default(), diagnostics.clone());
        assert_eq!(sorter.bind(&doc), 1);
        assert!(sorter.is_bound("h"));

        assert_eq!(sorter.handle(&mut doc, &Event::click("label")), EventResult::Consumed);
        assert_eq!(row_ids(&doc), vec!["r1", "r0"]);

        let right = Event::Click {
            target: Some("h".into()),
            button: MouseButton::Right,
        };
        assert_eq!(sorter.handle(&mut doc, &right), EventResult::Ignored);
        assert_eq!(sorter.handle(&mut doc, &Event::click("r0")), EventResult::Ignored);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn failed_click_is_reported_not_raised() {
        let mut doc = squad(&[("A", "30", "GK")]);
        doc.find_mut("r0")
            .unwrap()
            .child_elements_mut()
            .unwrap()
            .clear();
        let diagnostics = RecordingDiagnostics::new();
        let mut sorter = TableSorter::new(
            SortConfig::default().with_missing_cell(MissingCellPolicy::Fail),
            diagnostics.clone(),
        );
        sorter.bind(&doc);

        assert_eq!(sorter.handle(&mut doc, &Event::click("h-age")), EventResult::Ignored);
        let reports = diagnostics.take();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity, Severity::Error);
        assert_eq!(reports[0].source, "table_sort");
        assert!(!doc.find("h-age").unwrap().has_class("ascending"));
    }
}
