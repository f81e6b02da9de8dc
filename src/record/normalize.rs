//! Tabular ingestion.
//!
//! Module spreadsheets arrive as a header row plus rows of text cells.
//! [`RecordTable`] maps header names onto the catalog once, then coerces
//! every row into a [`ModuleRecord`]. This is the only place numeric
//! coercion happens; everything downstream assumes finite, non-negative
//! values.

use thiserror::Error;
use tracing::debug;

use super::types::{ModuleRecord, DEFAULT_ID};
use crate::catalog::{Attribute, AttributeSet, AttributeValues};

/// Header names recognized as the identifier column.
const ID_COLUMNS: [&str; 2] = ["ID", "id"];

/// How malformed cells are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Coercion {
    /// Unparsable, non-finite and negative cells become 0; short rows are
    /// padded with 0 and extra cells are ignored.
    #[default]
    Lenient,
    /// Any malformed cell or ragged row is an error. Blank cells still
    /// mean 0.
    Strict,
}

/// Ingestion failure under [`Coercion::Strict`].
///
/// `row` is the zero-based data row (the header is not counted).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NormalizeError {
    #[error("row {row}, column {column:?}: {value:?} is not a finite number")]
    InvalidNumber {
        row: usize,
        column: String,
        value: String,
    },

    #[error("row {row}, column {column:?}: negative value {value}")]
    NegativeValue {
        row: usize,
        column: String,
        value: f64,
    },

    #[error("row {row} has {found} cells, header has {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Column layout resolved from a header row.
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::Attribute;
/// use u_modcombo::record::RecordTable;
///
/// let table = RecordTable::from_headers(&["ID", "魔法耐性", "memo"]);
/// let records = table
///     .normalize_rows(vec![vec!["A", "8", "x"], vec!["B", "oops", ""]])
///     .unwrap();
///
/// assert_eq!(records[0].value(Attribute::MagicResistance), 8.0);
/// assert_eq!(records[1].value(Attribute::MagicResistance), 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct RecordTable {
    headers: Vec<String>,
    columns: Vec<Option<Attribute>>,
    id_column: Option<usize>,
    coercion: Coercion,
}

impl RecordTable {
    /// Resolves header names against the catalog.
    ///
    /// Columns matching no attribute are ignored. If an attribute appears
    /// more than once, the first column wins.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers.iter().map(|h| h.as_ref().trim().to_string()).collect();

        let mut seen = AttributeSet::empty();
        let columns: Vec<Option<Attribute>> = headers
            .iter()
            .map(|h| match h.parse::<Attribute>() {
                Ok(attribute) if seen.insert(attribute) => Some(attribute),
                _ => None,
            })
            .collect();

        let id_column = headers.iter().position(|h| ID_COLUMNS.contains(&h.as_str()));

        let ignored: Vec<&str> = headers
            .iter()
            .zip(&columns)
            .enumerate()
            .filter(|&(i, (_, col))| col.is_none() && Some(i) != id_column)
            .map(|(_, (h, _))| h.as_str())
            .collect();
        if !ignored.is_empty() {
            debug!(columns = ?ignored, "ignoring non-catalog columns");
        }

        Self {
            headers,
            columns,
            id_column,
            coercion: Coercion::default(),
        }
    }

    /// Sets the coercion policy.
    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = coercion;
        self
    }

    /// Number of header columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Attributes present in the header. The rest default to 0.
    pub fn attributes(&self) -> AttributeSet {
        self.columns.iter().flatten().copied().collect()
    }

    pub fn has_id_column(&self) -> bool {
        self.id_column.is_some()
    }

    /// Normalizes one data row.
    pub fn normalize_row<S: AsRef<str>>(
        &self,
        row: usize,
        cells: &[S],
    ) -> Result<ModuleRecord, NormalizeError> {
        if self.coercion == Coercion::Strict && cells.len() != self.width() {
            return Err(NormalizeError::RaggedRow {
                row,
                expected: self.width(),
                found: cells.len(),
            });
        }

        let id = match self.id_column {
            Some(i) => cells
                .get(i)
                .map(|c| c.as_ref().trim().to_string())
                .unwrap_or_default(),
            None => DEFAULT_ID.to_string(),
        };

        let mut values = AttributeValues::zeros();
        for (col, attribute) in self.columns.iter().enumerate() {
            let Some(attribute) = *attribute else {
                continue;
            };
            let cell = cells.get(col).map(|c| c.as_ref()).unwrap_or("");
            values[attribute] = self.coerce(row, col, cell)?;
        }

        Ok(ModuleRecord::new(id, values))
    }

    /// Normalizes every row, stopping at the first error.
    pub fn normalize_rows<I, S>(&self, rows: I) -> Result<Vec<ModuleRecord>, NormalizeError>
    where
        I: IntoIterator<Item = Vec<S>>,
        S: AsRef<str>,
    {
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| self.normalize_row(i, &cells))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            records = records.len(),
            attributes = self.attributes().len(),
            "normalized module table"
        );
        Ok(records)
    }

    fn coerce(&self, row: usize, col: usize, cell: &str) -> Result<f64, NormalizeError> {
        let text = cell.trim();
        if text.is_empty() {
            return Ok(0.0);
        }

        let parsed = text.parse::<f64>().ok().filter(|v| v.is_finite());
        match (self.coercion, parsed) {
            (Coercion::Lenient, Some(v)) => Ok(v.max(0.0)),
            (Coercion::Lenient, None) => Ok(0.0),
            (Coercion::Strict, Some(v)) if v < 0.0 => Err(NormalizeError::NegativeValue {
                row,
                column: self.headers[col].clone(),
                value: v,
            }),
            (Coercion::Strict, Some(v)) => Ok(v),
            (Coercion::Strict, None) => Err(NormalizeError::InvalidNumber {
                row,
                column: self.headers[col].clone(),
                value: text.to_string(),
            }),
        }
    }
}
