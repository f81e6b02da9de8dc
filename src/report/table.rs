//! Display table for one ranked combination.

use std::fmt;

use crate::catalog::{Attribute, Level};
use crate::search::{CombinationStats, ConstraintSet, RankedCombination};

/// Member rows with at least this many positive displayed values are
/// highlighted.
pub const HIGHLIGHT_MIN_POSITIVE: usize = 3;

/// Columns to show for a combination.
///
/// Mandatory and priority attributes are always shown; any other attribute
/// is shown when its sum is positive. Ordering groups attributes as
/// mandatory-and-priority, mandatory only, priority only, then the rest,
/// each group in catalog order.
pub fn display_columns(stats: &CombinationStats, constraints: &ConstraintSet) -> Vec<Attribute> {
    let must = constraints.must;
    let priority = constraints.priority;
    let targets = constraints.targets();

    let mut columns: Vec<Attribute> = must.intersection(priority).iter().collect();
    columns.extend(must.difference(priority).iter());
    columns.extend(priority.difference(must).iter());
    columns.extend(
        stats
            .sums
            .iter()
            .filter(|&(a, v)| v > 0.0 && !targets.contains(a))
            .map(|(a, _)| a),
    );
    columns
}

/// One member row of a [`ResultTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    /// Record identifier.
    pub id: String,
    /// Position of the record in the input sequence.
    pub source_index: usize,
    /// Values aligned with [`ResultTable::columns`].
    pub values: Vec<f64>,
    /// At least [`HIGHLIGHT_MIN_POSITIVE`] of `values` are positive.
    pub highlighted: bool,
}

/// Tabular view of a ranked combination: a level row, a total row and one
/// row per member, over the columns chosen by [`display_columns`].
///
/// # Examples
///
/// ```
/// use u_modcombo::catalog::Attribute;
/// use u_modcombo::record::ModuleRecord;
/// use u_modcombo::report::ResultTable;
/// use u_modcombo::search::{ConstraintSet, SearchConfig, SearchRunner};
///
/// let records: Vec<_> = (0..4)
///     .map(|i| ModuleRecord::from_pairs(format!("M{i}"), [(Attribute::MagicResistance, 5.0)]))
///     .collect();
/// let constraints = ConstraintSet::new().with_must([Attribute::MagicResistance]);
/// let outcome = SearchRunner::run(&records, &constraints, &SearchConfig::default()).unwrap();
///
/// let table = ResultTable::build(&outcome.ranked()[0], &constraints);
/// assert_eq!(table.columns, vec![Attribute::MagicResistance]);
/// assert_eq!(table.levels[0].to_string(), "Lv.6");
/// assert_eq!(table.totals, vec![20.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    /// 1-based rank of the combination.
    pub rank: usize,
    /// Displayed attributes, in display order.
    pub columns: Vec<Attribute>,
    /// Level of each column's combined sum.
    pub levels: Vec<Level>,
    /// Combined sum of each column.
    pub totals: Vec<f64>,
    /// One row per member, in input order.
    pub members: Vec<MemberRow>,
}

impl ResultTable {
    pub fn build(ranked: &RankedCombination, constraints: &ConstraintSet) -> Self {
        let columns = display_columns(&ranked.stats, constraints);
        let levels = columns.iter().map(|&a| ranked.stats.level(a)).collect();
        let totals = columns.iter().map(|&a| ranked.stats.sum(a)).collect();

        let members = ranked
            .members
            .iter()
            .map(|m| {
                let values: Vec<f64> = columns.iter().map(|&a| m.record.value(a)).collect();
                let positive = values.iter().filter(|&&v| v > 0.0).count();
                MemberRow {
                    id: m.record.id.clone(),
                    source_index: m.source_index,
                    values,
                    highlighted: positive >= HIGHLIGHT_MIN_POSITIVE,
                }
            })
            .collect();

        Self {
            rank: ranked.rank,
            columns,
            levels,
            totals,
            members,
        }
    }
}

fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(self.members.len() + 3);
        rows.push(
            std::iter::once("ID".to_string())
                .chain(self.columns.iter().map(|a| a.label().to_string()))
                .collect(),
        );
        rows.push(
            std::iter::once("Level".to_string())
                .chain(self.levels.iter().map(|l| l.to_string()))
                .collect(),
        );
        rows.push(
            std::iter::once("Total".to_string())
                .chain(self.totals.iter().map(|&v| format_value(v)))
                .collect(),
        );
        for member in &self.members {
            let id = if member.highlighted {
                format!("*{}", member.id)
            } else {
                member.id.clone()
            };
            rows.push(
                std::iter::once(id)
                    .chain(member.values.iter().map(|&v| format_value(v)))
                    .collect(),
            );
        }

        let width = self.columns.len() + 1;
        let widths: Vec<usize> = (0..width)
            .map(|c| rows.iter().map(|r| r[c].chars().count()).max().unwrap_or(0))
            .collect();

        writeln!(f, "#{}", self.rank)?;
        for row in &rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect();
            writeln!(f, "{}", cells.join(" | ").trim_end())?;
        }
        Ok(())
    }
}
