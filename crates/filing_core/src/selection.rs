use std::collections::HashSet;

use crate::record::ReportRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
struct RowCheckbox {
    report_id: String,
    checked: bool,
}

/// Checkbox state of the rendered results table.
///
/// The row checkboxes are authoritative; the selection is recomputed from
/// them on every read and never stored separately.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsTable {
    rows: Vec<RowCheckbox>,
    select_all: bool,
}

impl ResultsTable {
    /// Rebuilds one checked row per report, in order.
    pub(crate) fn full_render(reports: &[ReportRecord]) -> Self {
        let rows: Vec<RowCheckbox> = reports
            .iter()
            .map(|report| RowCheckbox {
                report_id: report.id.clone(),
                checked: true,
            })
            .collect();
        let select_all = !rows.is_empty();
        Self { rows, select_all }
    }

    pub(crate) fn clear(&mut self) {
        self.rows.clear();
        self.select_all = false;
    }

    /// Applies a checkbox change event for one row and reconciles the
    /// select-all control. Returns `false` if no such row is rendered.
    pub(crate) fn toggle_row(&mut self, report_id: &str, checked: bool) -> bool {
        let Some(row) = self.rows.iter_mut().find(|row| row.report_id == report_id) else {
            return false;
        };
        row.checked = checked;
        let total = self.rows.len();
        self.select_all = total > 0 && self.checked_count() == total;
        true
    }

    pub(crate) fn set_all(&mut self, checked: bool) {
        for row in &mut self.rows {
            row.checked = checked;
        }
        self.select_all = checked && !self.rows.is_empty();
    }

    /// Rendered rows as `(report_id, checked)`, in display order.
    pub fn rows(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.rows
            .iter()
            .map(|row| (row.report_id.as_str(), row.checked))
    }

    /// Whether a row for `report_id` is currently rendered.
    pub fn contains(&self, report_id: &str) -> bool {
        self.rows.iter().any(|row| row.report_id == report_id)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn checked_count(&self) -> usize {
        self.rows.iter().filter(|row| row.checked).count()
    }

    pub fn is_checked(&self, report_id: &str) -> bool {
        self.rows
            .iter()
            .any(|row| row.checked && row.report_id == report_id)
    }

    pub fn select_all_checked(&self) -> bool {
        self.select_all
    }

    pub fn has_selection(&self) -> bool {
        self.rows.iter().any(|row| row.checked)
    }

    /// Reports whose row is checked, in `reports` order. Ids that are not
    /// part of `reports` are never returned.
    pub fn selected<'a>(&self, reports: &'a [ReportRecord]) -> Vec<&'a ReportRecord> {
        let checked: HashSet<&str> = self
            .rows
            .iter()
            .filter(|row| row.checked)
            .map(|row| row.report_id.as_str())
            .collect();
        reports
            .iter()
            .filter(|report| checked.contains(report.id.as_str()))
            .collect()
    }
}
