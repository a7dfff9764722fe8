//! Comma-separated feed parser.
//!
//! Rules, in the order they are applied:
//!
//! 1. The body is split on `\n`; the first line is the header. Header cells
//!    are trimmed and matched to [`Column`]s by name (Spanish or English,
//!    case and accents ignored). Every column is required.
//! 2. Blank lines are skipped without comment.
//! 3. A row with fewer cells than the header is skipped and reported as a
//!    [`RowError`]. Parsing continues with the next row.
//! 4. Cells are trimmed. Cells beyond the header width are ignored.
//! 5. Rows whose `Visible` cell is not `TRUE` (any case) are dropped
//!    silently.
//!
//! Output keeps the input order of the rows that survive.

use core::fmt;

use thiserror::Error;
use tracing::{debug, warn};

use sheetshop_core::{ProductId, Visibility};

use super::FeedError;
use crate::models::ProductRecord;

const DELIMITER: char = ',';

/// A feed column the parser knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Id,
    Name,
    Description,
    Category,
    Price,
    Stock,
    Image,
    Visible,
}

impl Column {
    /// All columns, in the order the reference sheet lays them out.
    pub const ALL: [Self; 8] = [
        Self::Id,
        Self::Name,
        Self::Description,
        Self::Category,
        Self::Price,
        Self::Stock,
        Self::Image,
        Self::Visible,
    ];

    /// Header spellings accepted for this column, already folded to
    /// lowercase ASCII.
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Id => &["id", "sku"],
            Self::Name => &["nombre", "name"],
            Self::Description => &["descripcion", "description"],
            Self::Category => &["categoria", "category"],
            Self::Price => &["precio", "price"],
            Self::Stock => &["stock", "inventario", "inventory"],
            Self::Image => &["imagen", "image", "imageref", "image_ref"],
            Self::Visible => &["visible", "visibility"],
        }
    }

    /// Canonical header name (as in the reference sheet).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Nombre",
            Self::Description => "Descripcion",
            Self::Category => "Categoria",
            Self::Price => "Precio",
            Self::Stock => "Stock",
            Self::Image => "Imagen",
            Self::Visible => "Visible",
        }
    }

    fn matches(self, header_cell: &str) -> bool {
        let folded = fold_header(header_cell);
        self.aliases().contains(&folded.as_str())
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a row was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowErrorReason {
    /// The row has fewer cells than the header.
    #[error("short-row: expected {expected} fields, found {found}")]
    ShortRow {
        /// Header width.
        expected: usize,
        /// Cells in the row.
        found: usize,
    },
}

impl RowErrorReason {
    /// Stable machine-readable tag.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ShortRow { .. } => "short-row",
        }
    }
}

/// A skipped row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("row {index}: {reason}")]
pub struct RowError {
    /// Zero-based line index in the feed body; the header is line 0.
    pub index: usize,
    /// Why the row was skipped.
    pub reason: RowErrorReason,
}

/// Result of parsing a feed body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeed {
    /// Published records, in feed order.
    pub records: Vec<ProductRecord>,
    /// Rows that were skipped as malformed.
    pub errors: Vec<RowError>,
    /// Well-formed rows that were not published.
    pub hidden: usize,
}

/// Header position of every [`Column`].
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    id: usize,
    name: usize,
    description: usize,
    category: usize,
    price: usize,
    stock: usize,
    image: usize,
    visible: usize,
}

impl ColumnMap {
    fn resolve(header: &[&str]) -> Result<Self, FeedError> {
        let position = |column: Column| {
            header
                .iter()
                .position(|cell| column.matches(cell))
                .ok_or(FeedError::MissingColumn(column))
        };

        Ok(Self {
            id: position(Column::Id)?,
            name: position(Column::Name)?,
            description: position(Column::Description)?,
            category: position(Column::Category)?,
            price: position(Column::Price)?,
            stock: position(Column::Stock)?,
            image: position(Column::Image)?,
            visible: position(Column::Visible)?,
        })
    }

    fn record(&self, cells: &[&str], visibility: Visibility) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(cell(cells, self.id)),
            name: cell(cells, self.name).to_owned(),
            description: cell(cells, self.description).to_owned(),
            category: cell(cells, self.category).to_owned(),
            price: cell(cells, self.price).to_owned(),
            stock: cell(cells, self.stock).to_owned(),
            image_ref: cell(cells, self.image).to_owned(),
            visibility,
        }
    }
}

/// Parse a feed body into published records.
///
/// # Errors
///
/// Returns [`FeedError::EmptyFeed`] when there is no header row and
/// [`FeedError::MissingColumn`] when the header lacks a column. Malformed
/// data rows never fail the parse; they are collected in
/// [`ParsedFeed::errors`].
pub fn parse_feed(raw: &str) -> Result<ParsedFeed, FeedError> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.split('\n').enumerate();

    let header: Vec<&str> = match lines.next() {
        Some((_, line)) if !line.trim().is_empty() => split_cells(line),
        _ => return Err(FeedError::EmptyFeed),
    };
    let columns = ColumnMap::resolve(&header)?;

    let mut feed = ParsedFeed::default();
    for (index, line) in lines {
        if line.trim().is_empty() {
            continue;
        }

        let cells = split_cells(line);
        if cells.len() < header.len() {
            warn!(
                row = index,
                expected = header.len(),
                found = cells.len(),
                "Skipping short feed row"
            );
            feed.errors.push(RowError {
                index,
                reason: RowErrorReason::ShortRow {
                    expected: header.len(),
                    found: cells.len(),
                },
            });
            continue;
        }

        let visibility = Visibility::parse(cell(&cells, columns.visible));
        if !visibility.is_visible() {
            debug!(row = index, "Feed row not published");
            feed.hidden += 1;
            continue;
        }

        feed.records.push(columns.record(&cells, visibility));
    }

    debug!(
        records = feed.records.len(),
        skipped = feed.errors.len(),
        hidden = feed.hidden,
        "Parsed feed"
    );

    Ok(feed)
}

fn split_cells(line: &str) -> Vec<&str> {
    line.split(DELIMITER).map(str::trim).collect()
}

/// Cell at `idx`, or empty when the row is too short to have it.
fn cell<'a>(cells: &[&'a str], idx: usize) -> &'a str {
    cells.get(idx).copied().unwrap_or("")
}

/// Lowercase a header cell and drop the accents Spanish headers carry.
fn fold_header(cell: &str) -> String {
    cell.trim()
        .chars()
        .map(|c| match c {
            'á' | 'Á' => 'a',
            'é' | 'É' => 'e',
            'í' | 'Í' => 'i',
            'ó' | 'Ó' => 'o',
            'ú' | 'Ú' | 'ü' | 'Ü' => 'u',
            'ñ' | 'Ñ' => 'n',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    const HEADER: &str = "ID,Nombre,Descripcion,Categoria,Precio,Stock,Imagen,Visible";

    fn feed(rows: &[&str]) -> String {
        let mut body = HEADER.to_string();
        for row in rows {
            body.push('\n');
            body.push_str(row);
        }
        body
    }

    fn names(feed: &ParsedFeed) -> Vec<&str> {
        feed.records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_parses_visible_rows_in_order() {
        let body = feed(&[
            "1,Apple,Crisp,Fruit,$1.50,4,apple.jpg,TRUE",
            "2,Bread,Fresh,Bakery,3,10,bread.jpg,TRUE",
            "3,Cherry,Red,Fruit,5,1,cherry.jpg,TRUE",
        ]);
        let parsed = parse_feed(&body).unwrap();

        assert_eq!(names(&parsed), ["Apple", "Bread", "Cherry"]);
        assert!(parsed.errors.is_empty());
        assert!(parsed.records.iter().all(ProductRecord::is_visible));
    }

    #[test]
    fn test_maps_columns_to_fields() {
        let parsed = parse_feed(&feed(&["7, Apple , Crisp ,Fruit, $1.50 ,4,apple.jpg,true"])).unwrap();
        let apple = &parsed.records[0];

        assert_eq!(apple.id.as_str(), "7");
        assert_eq!(apple.name, "Apple");
        assert_eq!(apple.description, "Crisp");
        assert_eq!(apple.category, "Fruit");
        assert_eq!(apple.price, "$1.50");
        assert_eq!(apple.stock, "4");
        assert_eq!(apple.image_ref, "apple.jpg");
        assert_eq!(apple.visibility, Visibility::Visible);
    }

    #[test]
    fn test_visibility_is_case_insensitive_and_strict() {
        let body = feed(&[
            "1,A,,X,1,1,a,TRUE",
            "2,B,,X,1,1,b,true",
            "3,C,,X,1,1,c,True",
            "4,D,,X,1,1,d,FALSE",
            "5,E,,X,1,1,e,",
            "6,F,,X,1,1,f,yes",
        ]);
        let parsed = parse_feed(&body).unwrap();

        assert_eq!(names(&parsed), ["A", "B", "C"]);
        assert_eq!(parsed.hidden, 3);
        assert!(parsed.errors.is_empty(), "hidden rows are not errors");
    }

    #[test]
    fn test_short_row_is_skipped_and_parsing_continues() {
        let body = feed(&[
            "1,A,,X,1,1,a,TRUE",
            "2,B,,X,1,1,b,TRUE",
            "3,C,,X,1,1,c,TRUE",
            "4,D,,X,1,1,d,TRUE",
            "5,E,,X,1,1",
            "6,F,,X,1,1,f,TRUE",
            "7,G,,X,1,1,g,TRUE",
        ]);
        let parsed = parse_feed(&body).unwrap();

        assert_eq!(names(&parsed), ["A", "B", "C", "D", "F", "G"]);
        assert_eq!(
            parsed.errors,
            [RowError {
                index: 5,
                reason: RowErrorReason::ShortRow {
                    expected: 8,
                    found: 6
                },
            }]
        );
        assert_eq!(parsed.errors[0].reason.as_str(), "short-row");
    }

    #[test]
    fn test_extra_cells_are_ignored() {
        let parsed = parse_feed(&feed(&["1,A,has, comma,X,1,1,a,TRUE"])).unwrap();
        // The embedded comma shifts cells; quoting is not supported.
        assert_eq!(parsed.records.len(), 0);
        assert_eq!(parsed.hidden, 1);
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let body = format!("{HEADER}\r\n1,A,,X,1,1,a,TRUE\r\n\r\n2,B,,X,1,1,b,TRUE\r\n");
        let parsed = parse_feed(&body).unwrap();

        assert_eq!(names(&parsed), ["A", "B"]);
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_header_only() {
        let parsed = parse_feed(HEADER).unwrap();
        assert!(parsed.records.is_empty());
        assert!(parsed.errors.is_empty());
    }

    #[test]
    fn test_empty_body() {
        assert!(matches!(parse_feed(""), Err(FeedError::EmptyFeed)));
        assert!(matches!(parse_feed("\n\n"), Err(FeedError::EmptyFeed)));
    }

    #[test]
    fn test_missing_column() {
        let err = parse_feed("ID,Nombre,Descripcion,Categoria,Precio,Stock,Imagen\n").unwrap_err();
        assert!(matches!(err, FeedError::MissingColumn(Column::Visible)));
    }

    #[test]
    fn test_english_and_accented_headers() {
        let body = "\u{feff}Visible,Name,Descripción,Categoría,Price,Stock,Image,Id\n\
                    TRUE,Apple,Crisp,Fruit,1.50,4,apple.jpg,1\n";
        let parsed = parse_feed(body).unwrap();
        let apple = &parsed.records[0];

        assert_eq!(apple.name, "Apple");
        assert_eq!(apple.description, "Crisp");
        assert_eq!(apple.category, "Fruit");
        assert_eq!(apple.id.as_str(), "1");
    }

    #[test]
    fn test_fold_header() {
        assert_eq!(fold_header(" Descripción "), "descripcion");
        assert_eq!(fold_header("CATEGORÍA"), "categoria");
        assert_eq!(fold_header("ImageRef"), "imageref");
    }

    #[test]
    fn test_row_error_display() {
        let err = RowError {
            index: 5,
            reason: RowErrorReason::ShortRow {
                expected: 8,
                found: 6,
            },
        };
        assert_eq!(err.to_string(), "row 5: short-row: expected 8 fields, found 6");
    }
}
