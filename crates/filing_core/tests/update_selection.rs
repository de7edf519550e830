mod common;

use common::{init_logging, reports, searched, toggle};
use filing_core::{update, Msg};

#[test]
fn unchecking_one_row_clears_select_all() {
    init_logging();
    let state = toggle(searched(reports(3)), "r2", false);

    let view = state.view();
    assert!(!view.select_all_checked);
    assert!(view.download_selected_enabled);
    let ids: Vec<_> = state.selected().iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1", "r3"]);
}

#[test]
fn rechecking_last_row_restores_select_all() {
    init_logging();
    let state = toggle(searched(reports(2)), "r1", false);
    assert!(!state.view().select_all_checked);

    let state = toggle(state, "r1", true);
    assert!(state.view().select_all_checked);
}

#[test]
fn unchecking_every_row_disables_download_selected() {
    init_logging();
    let mut state = searched(reports(3));
    for id in ["r1", "r2", "r3"] {
        state = toggle(state, id, false);
    }

    let view = state.view();
    assert!(!view.select_all_checked);
    assert!(!view.download_selected_enabled);
    assert!(state.selected().is_empty());
}

#[test]
fn select_all_tracks_row_count_over_toggle_sequences() {
    init_logging();
    let sequence = [
        ("r1", false),
        ("r3", false),
        ("r1", true),
        ("r4", false),
        ("r3", true),
        ("r4", true),
        ("r2", false),
        ("r2", true),
    ];
    let mut state = searched(reports(4));
    for (id, checked) in sequence {
        state = toggle(state, id, checked);
        let table = state.table();
        let expected = table.row_count() > 0 && table.checked_count() == table.row_count();
        assert_eq!(state.view().select_all_checked, expected, "after {id}={checked}");
        assert_eq!(state.selected().len(), table.checked_count());
    }
}

#[test]
fn select_all_sets_full_state_not_previous_partial() {
    init_logging();
    let mut state = searched(reports(5));
    for id in ["r1", "r2", "r3", "r4"] {
        state = toggle(state, id, false);
    }
    assert_eq!(state.selected().len(), 1);

    let (state, effects) = update(state, Msg::SelectAllToggled(true));
    assert!(effects.is_empty());
    let view = state.view();
    assert!(view.rows.iter().all(|row| row.checked));
    assert!(view.select_all_checked);
    assert_eq!(state.selected().len(), 5);
}

#[test]
fn select_all_off_unchecks_everything() {
    init_logging();
    let (state, _) = update(searched(reports(3)), Msg::SelectAllToggled(false));

    let view = state.view();
    assert!(view.rows.iter().all(|row| !row.checked));
    assert!(!view.select_all_checked);
    assert!(!view.download_selected_enabled);
}

#[test]
fn select_all_ignored_without_rows() {
    init_logging();
    let mut state = searched(Vec::new());
    assert!(state.consume_dirty());

    let (mut state, _) = update(state, Msg::SelectAllToggled(true));
    assert!(!state.view().select_all_checked);
    assert!(!state.consume_dirty());
}

#[test]
fn toggle_for_unknown_row_changes_nothing() {
    init_logging();
    let mut state = searched(reports(2));
    assert!(state.consume_dirty());
    let before = state.view();

    let mut state = toggle(state, "from-an-old-search", false);
    assert_eq!(state.view(), before);
    assert!(!state.consume_dirty());
}

#[test]
fn new_search_discards_previous_selection() {
    init_logging();
    let state = toggle(searched(reports(3)), "r2", false);
    let (state, _) = update(state, Msg::SearchSubmitted);

    // Rows are cleared while the request is in flight.
    let view = state.view();
    assert!(view.loading);
    assert!(view.rows.is_empty());
    assert!(!view.download_selected_enabled);
    assert!(state.selected().is_empty());
}

#[test]
fn row_download_needs_a_rendered_row() {
    init_logging();
    let (state, _) = update(searched(reports(2)), Msg::SearchSubmitted);
    assert!(state.view().rows.is_empty());

    let (state, effects) = update(
        state,
        Msg::RowDownloadClicked {
            report_id: "r1".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.table().row_count(), 0);
}
