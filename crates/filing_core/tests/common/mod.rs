use std::sync::Once;

use filing_core::{update, AppState, Effect, Msg, ReportRecord, ReportType, SearchPayload};

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(filing_logging::initialize_for_tests);
}

pub fn reports(count: usize) -> Vec<ReportRecord> {
    (1..=count)
        .map(|n| ReportRecord::new(format!("r{n}"), format!("2024-0{}-01", n % 9 + 1), format!("报告 {n}")))
        .collect()
}

/// Runs a full search for stock 2330 that returns `reports`.
pub fn searched(reports: Vec<ReportRecord>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::QueryChanged("2330".to_string()));
    let (state, _) = update(state, Msg::ReportTypeChanged(ReportType::Annual));
    let (state, effects) = update(state, Msg::SearchSubmitted);
    let generation = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Search { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("search effect");
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation,
            outcome: Ok(SearchPayload {
                stock_id: "2330".to_string(),
                stock_name: "台积电".to_string(),
                report_type_label: Some("年报".to_string()),
                reports,
            }),
        },
    );
    state
}

pub fn toggle(state: AppState, report_id: &str, checked: bool) -> AppState {
    let (state, effects) = update(
        state,
        Msg::RowToggled {
            report_id: report_id.to_string(),
            checked,
        },
    );
    assert!(effects.is_empty());
    state
}
