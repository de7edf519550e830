use crate::record::{year_label, ReportRecord, ReportType};

pub type SearchGeneration = u64;

/// Parameters of one submission, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub report_type: ReportType,
    pub year: Option<u16>,
}

/// Successful backend answer to a [`SearchRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPayload {
    pub stock_id: String,
    pub stock_name: String,
    /// Human readable label; `None` falls back to the submitted token.
    pub report_type_label: Option<String>,
    pub reports: Vec<ReportRecord>,
}

/// Failed search: non-2xx status or transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchFailure {
    /// Backend supplied `detail`, if any.
    pub detail: Option<String>,
}

pub type SearchOutcome = Result<SearchPayload, SearchFailure>;

/// Query context and complete result set of the latest successful search.
///
/// Only ever replaced as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSession {
    target_id: String,
    target_name: String,
    document_type_label: String,
    year: Option<u16>,
    reports: Vec<ReportRecord>,
}

impl SearchSession {
    pub(crate) fn from_payload(request: &SearchRequest, payload: SearchPayload) -> Self {
        let document_type_label = payload
            .report_type_label
            .filter(|label| !label.is_empty())
            .unwrap_or_else(|| request.report_type.token().to_string());
        Self {
            target_id: payload.stock_id,
            target_name: payload.stock_name,
            document_type_label,
            year: request.year,
            reports: payload.reports,
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn document_type_label(&self) -> &str {
        &self.document_type_label
    }

    pub fn year(&self) -> Option<u16> {
        self.year
    }

    pub fn reports(&self) -> &[ReportRecord] {
        &self.reports
    }

    pub fn find(&self, report_id: &str) -> Option<&ReportRecord> {
        self.reports.iter().find(|report| report.id == report_id)
    }

    /// `台积电 (2330) · 年报 · 全部年份 · 共 1 条`
    pub fn summary(&self) -> String {
        format!(
            "{} ({}) · {} · {} · 共 {} 条",
            self.target_name,
            self.target_id,
            self.document_type_label,
            year_label(self.year),
            self.reports.len()
        )
    }
}
