mod common;

use common::init_logging;
use filing_core::{
    update, AppState, Effect, Msg, ReportRecord, ReportType, SearchFailure, SearchGeneration,
    SearchPayload, SearchRequest, Severity,
};
use pretty_assertions::assert_eq;

fn submit(
    state: AppState,
    query: &str,
    report_type: ReportType,
    year: Option<u16>,
) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::QueryChanged(query.to_string()));
    let (state, _) = update(state, Msg::ReportTypeChanged(report_type));
    let (state, _) = update(state, Msg::YearChanged(year));
    update(state, Msg::SearchSubmitted)
}

fn generation_of(effects: &[Effect]) -> SearchGeneration {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Search { generation, .. } => Some(*generation),
            _ => None,
        })
        .expect("search effect")
}

fn tsmc_payload(reports: Vec<ReportRecord>) -> SearchPayload {
    SearchPayload {
        stock_id: "2330".to_string(),
        stock_name: "台积电".to_string(),
        report_type_label: Some("年报".to_string()),
        reports,
    }
}

fn complete(state: AppState, generation: SearchGeneration, payload: SearchPayload) -> AppState {
    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            generation,
            outcome: Ok(payload),
        },
    );
    assert!(effects.is_empty());
    state
}

#[test]
fn empty_query_warns_without_request() {
    init_logging();
    let (mut state, effects) = submit(AppState::new(), "   \t ", ReportType::Annual, None);

    assert!(effects.is_empty());
    assert!(!state.is_loading());
    let status = state.view().status.expect("status set");
    assert_eq!(status.message, "请输入股票代码或名称。");
    assert_eq!(status.severity, Severity::Warn);
    assert!(state.consume_dirty());
}

#[test]
fn submit_trims_query_and_sets_loading() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "  2330 ", ReportType::HalfYear, Some(2023));

    assert_eq!(
        effects,
        vec![Effect::Search {
            generation: 1,
            request: SearchRequest {
                query: "2330".to_string(),
                report_type: ReportType::HalfYear,
                year: Some(2023),
            },
        }]
    );
    let view = state.view();
    assert!(view.loading);
    assert!(!view.empty_state_visible);
    assert_eq!(view.status.unwrap().message, "正在抓取报告列表...");
}

#[test]
fn successful_search_renders_all_rows_checked() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "2330", ReportType::Annual, None);
    let generation = generation_of(&effects);
    let state = complete(
        state,
        generation,
        tsmc_payload(vec![ReportRecord::new("r1", "2023-03-01", "2022年报")]),
    );

    let view = state.view();
    assert!(!view.loading);
    assert_eq!(view.rows.len(), 1);
    assert!(view.rows[0].checked);
    assert!(view.select_all_checked);
    assert!(view.select_all_enabled);
    assert!(view.download_selected_enabled);
    assert!(!view.empty_state_visible);
    assert_eq!(view.summary, "台积电 (2330) · 年报 · 全部年份 · 共 1 条");
    let status = view.status.unwrap();
    assert_eq!(status.message, "已抓取 1 条报告。");
    assert_eq!(status.severity, Severity::Info);
}

#[test]
fn session_preserves_server_order() {
    init_logging();
    let reports = vec![
        ReportRecord::new("b", "2024-04-01", "B"),
        ReportRecord::new("a", "2023-04-01", "A"),
        ReportRecord::new("c", "2022-04-01", "C"),
    ];
    let (state, effects) = submit(AppState::new(), "2330", ReportType::All, Some(2023));
    let state = complete(state, generation_of(&effects), tsmc_payload(reports.clone()));

    assert_eq!(state.reports(), reports.as_slice());
    let selected: Vec<_> = state.selected().into_iter().cloned().collect();
    assert_eq!(selected, reports);
    assert_eq!(
        state.view().summary,
        "台积电 (2330) · 年报 · 2023年 · 共 3 条"
    );
}

#[test]
fn empty_result_shows_empty_state() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "2330", ReportType::Annual, None);
    let state = complete(state, generation_of(&effects), tsmc_payload(Vec::new()));

    let view = state.view();
    assert!(view.empty_state_visible);
    assert!(view.rows.is_empty());
    assert!(!view.select_all_enabled);
    assert!(!view.select_all_checked);
    assert!(!view.download_selected_enabled);
    assert_eq!(view.summary, "台积电 (2330) · 年报 · 全部年份 · 共 0 条");
}

#[test]
fn missing_label_falls_back_to_submitted_token() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "2330", ReportType::ThirdQuarter, None);
    let payload = SearchPayload {
        report_type_label: None,
        ..tsmc_payload(Vec::new())
    };
    let state = complete(state, generation_of(&effects), payload);

    assert_eq!(state.session().unwrap().document_type_label(), "q3");
}

#[test]
fn failed_search_reports_detail_and_clears_results() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "2330", ReportType::Annual, None);
    let state = complete(
        state,
        generation_of(&effects),
        tsmc_payload(vec![ReportRecord::new("r1", "2023-03-01", "2022年报")]),
    );

    let (state, effects) = submit(state, "2330", ReportType::Annual, None);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation: generation_of(&effects),
            outcome: Err(SearchFailure {
                detail: Some("rate limited".to_string()),
            }),
        },
    );

    let view = state.view();
    assert!(!view.loading);
    assert!(state.reports().is_empty());
    assert!(view.empty_state_visible);
    assert!(!view.download_selected_enabled);
    let status = view.status.unwrap();
    assert_eq!(status.message, "rate limited");
    assert_eq!(status.severity, Severity::Error);
}

#[test]
fn failure_without_detail_uses_generic_message() {
    init_logging();
    let (state, effects) = submit(AppState::new(), "nothing", ReportType::Annual, None);
    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation: generation_of(&effects),
            outcome: Err(SearchFailure::default()),
        },
    );

    let status = state.view().status.unwrap();
    assert_eq!(status.message, "抓取失败");
    assert_eq!(status.severity, Severity::Error);
    assert_eq!(state.view().summary, "请先查询报告。");
}

#[test]
fn identical_searches_yield_identical_sessions() {
    init_logging();
    let reports = vec![
        ReportRecord::new("r1", "2023-03-01", "2022年报"),
        ReportRecord::new("r2", "2022-03-01", "2021年报"),
    ];
    let (state, effects) = submit(AppState::new(), "2330", ReportType::Annual, None);
    let state = complete(state, generation_of(&effects), tsmc_payload(reports.clone()));
    let first_session = state.session().cloned();
    let (state, _) = update(
        state,
        Msg::RowToggled {
            report_id: "r2".to_string(),
            checked: false,
        },
    );

    let (state, effects) = submit(state, "2330", ReportType::Annual, None);
    let state = complete(state, generation_of(&effects), tsmc_payload(reports));

    assert_eq!(state.session().cloned(), first_session);
    assert_eq!(state.selected().len(), 2);
    assert!(state.view().select_all_checked);
}

#[test]
fn stale_response_is_dropped() {
    init_logging();
    let (state, first) = submit(AppState::new(), "600000", ReportType::Annual, None);
    let (state, second) = submit(state, "2330", ReportType::Annual, None);
    let old = generation_of(&first);
    let new = generation_of(&second);
    assert!(new > old);

    let state = complete(
        state,
        new,
        tsmc_payload(vec![ReportRecord::new("r1", "2023-03-01", "2022年报")]),
    );
    let before = state.view();

    let stale = SearchPayload {
        stock_id: "600000".to_string(),
        stock_name: "浦发银行".to_string(),
        report_type_label: None,
        reports: Vec::new(),
    };
    let (state, effects) = update(
        state,
        Msg::SearchCompleted {
            generation: old,
            outcome: Ok(stale),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.view(), before);
}

#[test]
fn stale_failure_keeps_newer_search_loading() {
    init_logging();
    let (state, first) = submit(AppState::new(), "600000", ReportType::Annual, None);
    let (state, _second) = submit(state, "2330", ReportType::Annual, None);

    let (state, _) = update(
        state,
        Msg::SearchCompleted {
            generation: generation_of(&first),
            outcome: Err(SearchFailure::default()),
        },
    );

    assert!(state.is_loading());
    assert_eq!(state.view().status.unwrap().message, "正在抓取报告列表...");
}
