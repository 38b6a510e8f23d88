//! Behaviour of the FilterSelector widget as seen by its owning page.

use std::sync::{Arc, Mutex};

use azimuth_filters::prelude::*;

fn empty_options(count: usize) -> Vec<FilterOption> {
    (1..=count)
        .map(|i| FilterOption::new(format!("type{i}")))
        .collect()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Selector whose emitted selections are collected for inspection.
fn recording_selector() -> (FilterSelector, Arc<Mutex<Vec<Vec<String>>>>) {
    let emitted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&emitted);
    let selector = FilterSelector::new().on_change(move |selection| {
        sink.lock().unwrap().push(selection);
    });
    (selector, emitted)
}

#[test]
fn test_loading_state() {
    let selector = FilterSelector::new();
    let props = FilterSelectorProps::new("type").loading(true);
    let view = selector.view(&props);

    assert_eq!(view.label, "type");
    assert!(view.loading);
    assert!(view.rows.is_empty());
    assert!(view.collapse_enabled);
    assert_eq!(view.collapse_label(), "collapse-type");
}

#[test]
fn test_null_state() {
    let selector = FilterSelector::new();
    let props = FilterSelectorProps::new("type");
    let view = selector.view(&props);

    assert!(!view.loading);
    assert!(view.rows.is_empty());
    assert!(!view.collapse_enabled);
    assert_eq!(
        selector.dispatch(&FilterSelectorEvent::ToggleCollapsed, &props),
        EventResult::Ignored
    );
    assert!(!selector.is_collapsed());
}

#[test]
fn test_loading_hides_existing_options() {
    let selector = FilterSelector::new();
    let options = empty_options(3);
    let props = FilterSelectorProps::new("type").options(&options).loading(true);
    let view = selector.view(&props);
    assert!(view.rows.is_empty());
    assert!(view.see_more.is_none());
    assert!(!view.shows_list());
}

#[test]
fn test_empty_outcome_count() {
    let selector = FilterSelector::new();
    let options = empty_options(1);
    let view = selector.view(&FilterSelectorProps::new("type").options(&options));

    assert_eq!(view.rows.len(), 1);
    let row = &view.rows[0];
    assert!(!row.disabled);
    assert!(row.distribution.iter().all(|s| s.width() == "0%"));
}

#[test]
fn test_empty_outcome_count_with_and() {
    let selector = FilterSelector::new();
    let options = vec![
        FilterOption::new("type1"),
        FilterOption::new("type2")
            .with_count(OutcomeKind::CorrectAndPredicted, 1)
            .with_total(1),
    ];
    let props = FilterSelectorProps::new("type")
        .operator(Operator::And)
        .max_selectable(1)
        .options(&options);
    let view = selector.view(&props);

    assert!(view.row("type1").unwrap().disabled);
    assert!(!view.row("type2").unwrap().disabled);
    // no select-all control under AND
    assert!(view.select_all.is_none());
    assert_eq!(
        selector.dispatch(&FilterSelectorEvent::ToggleAll, &props),
        EventResult::Ignored
    );
}

#[test]
fn test_disabled_option_does_not_emit() {
    let (selector, emitted) = recording_selector();
    let options = vec![FilterOption::new("type1"), FilterOption::new("type2").with_total(1)];
    let props = FilterSelectorProps::new("type")
        .operator(Operator::And)
        .options(&options);

    let result = selector.dispatch(&FilterSelectorEvent::ToggleOption("type1".into()), &props);
    assert_eq!(result, EventResult::Ignored);
    assert!(emitted.lock().unwrap().is_empty());

    let result = selector.dispatch(&FilterSelectorEvent::ToggleOption("type2".into()), &props);
    assert!(result.is_consumed());
    assert_eq!(emitted.lock().unwrap().as_slice(), &[strings(&["type2"])]);
}

#[test]
fn test_collapsible_filter() {
    let selector = FilterSelector::new();
    let options = empty_options(1);
    let props = FilterSelectorProps::new("type").options(&options);

    assert_eq!(selector.view(&props).rows.len(), 1);

    selector.dispatch(&FilterSelectorEvent::ToggleCollapsed, &props);
    let view = selector.view(&props);
    assert!(view.collapsed);
    assert!(view.row("type1").is_none());

    selector.dispatch(&FilterSelectorEvent::ToggleCollapsed, &props);
    assert!(selector.view(&props).row("type1").is_some());
}

#[test]
fn test_collapse_keeps_pagination() {
    let selector = FilterSelector::new();
    let options = empty_options(30);
    let props = FilterSelectorProps::new("type").options(&options);

    selector.view(&props);
    selector.dispatch(&FilterSelectorEvent::RevealMore, &props);
    assert_eq!(selector.revealed_count(), 20);

    selector.set_collapsed(true);
    assert!(selector.view(&props).rows.is_empty());
    assert_eq!(
        selector.dispatch(&FilterSelectorEvent::RevealMore, &props),
        EventResult::Ignored
    );

    selector.set_collapsed(false);
    assert_eq!(selector.view(&props).rows.len(), 20);
}

#[test]
fn test_multi_filter_order() {
    let selector = FilterSelector::new();
    let options = vec![
        FilterOption::new("type2")
            .with_count(OutcomeKind::CorrectAndPredicted, 5)
            .with_count(OutcomeKind::CorrectAndRejected, 5)
            .with_count(OutcomeKind::IncorrectAndPredicted, 5)
            .with_count(OutcomeKind::IncorrectAndRejected, 5)
            .with_total(20),
        FilterOption::new("type1")
            .with_count(OutcomeKind::CorrectAndPredicted, 12)
            .with_total(12),
        FilterOption::new("type3")
            .with_count(OutcomeKind::IncorrectAndPredicted, 10)
            .with_total(10),
    ];
    let view = selector.view(&FilterSelectorProps::new("type").max_selectable(20).options(&options));

    let order: Vec<&str> = view.rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(order, ["type2", "type1", "type3"]);

    let proportions: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|r| r.distribution.iter().map(|s| s.width()).collect())
        .collect();
    assert_eq!(
        proportions,
        [
            ["25%", "25%", "25%", "25%"],
            ["100%", "0%", "0%", "0%"],
            ["0%", "0%", "0%", "100%"],
        ]
    );
}

#[test]
fn test_see_more() {
    let selector = FilterSelector::new();
    let options = empty_options(11);
    let props = FilterSelectorProps::new("type").options(&options);

    let view = selector.view(&props);
    assert_eq!(view.list_height, 5 * 28);
    assert_eq!(view.see_more, Some(6));
    assert_eq!(view.see_more_label().as_deref(), Some("See more (6)"));

    assert!(selector.dispatch(&FilterSelectorEvent::RevealMore, &props).is_consumed());
    let view = selector.view(&props);
    assert_eq!(view.list_height, 11 * 28);
    assert_eq!(view.rows.len(), 11);
    assert!(view.see_more.is_none());
    assert_eq!(
        selector.dispatch(&FilterSelectorEvent::RevealMore, &props),
        EventResult::Ignored
    );
}

#[test]
fn test_see_more_long_list() {
    let selector = FilterSelector::new();
    let options = empty_options(21);
    let props = FilterSelectorProps::new("type").options(&options);

    let view = selector.view(&props);
    assert_eq!(view.list_height, 5 * 28);
    assert_eq!(view.see_more_label().as_deref(), Some("See more (15)"));

    selector.dispatch(&FilterSelectorEvent::RevealMore, &props);
    let view = selector.view(&props);
    assert_eq!(view.list_height, 20 * 28);
    assert_eq!(view.see_more_label().as_deref(), Some("See more (1)"));

    selector.dispatch(&FilterSelectorEvent::RevealMore, &props);
    let view = selector.view(&props);
    assert_eq!(view.list_height, 21 * 28);
    assert!(view.see_more_label().is_none());
}

#[test]
fn test_new_search_resets_window() {
    let selector = FilterSelector::new();
    let options = empty_options(30);
    let props = FilterSelectorProps::new("type").options(&options);
    selector.view(&props);
    selector.dispatch(&FilterSelectorEvent::RevealMore, &props);
    assert_eq!(selector.view(&props).revealed_count, 20);

    // "type1" matches type1 and type10..=type19
    let searched = props.search("type1");
    let view = selector.view(&searched);
    assert_eq!(view.matching_count, 11);
    assert_eq!(view.revealed_count, 5);

    // same inputs again keep the window
    assert_eq!(selector.view(&searched).revealed_count, 5);
    assert!(selector.is_dirty());
    selector.clear_dirty();
    selector.view(&searched);
    assert!(!selector.is_dirty());
}

#[test]
fn test_new_search_matching_everything_resets_window() {
    let selector = FilterSelector::new();
    let options = empty_options(30);
    let props = FilterSelectorProps::new("type").options(&options);
    selector.view(&props);
    selector.dispatch(&FilterSelectorEvent::RevealMore, &props);
    assert_eq!(selector.revealed_count(), 20);

    // every option still matches, but the search is new
    let view = selector.view(&props.search("type"));
    assert_eq!(view.matching_count, 30);
    assert_eq!(view.revealed_count, 5);
}

#[test]
fn test_operator_change_resets_window() {
    let selector = FilterSelector::new();
    let options: Vec<FilterOption> = (1..=30)
        .map(|i| FilterOption::new(format!("type{i}")).with_total(i))
        .collect();
    let props = FilterSelectorProps::new("type").options(&options);
    selector.view(&props);
    selector.dispatch(&FilterSelectorEvent::RevealMore, &props);
    assert_eq!(selector.revealed_count(), 20);

    let view = selector.view(&props.operator(Operator::And));
    assert_eq!(view.revealed_count, 5);
}

#[test]
fn test_selected_options() {
    let (selector, emitted) = recording_selector();
    let options = empty_options(2);
    let selected = strings(&["type2"]);
    let props = FilterSelectorProps::new("type")
        .options(&options)
        .selected(&selected);
    let view = selector.view(&props);

    assert!(!view.row("type1").unwrap().checked);
    assert!(view.row("type2").unwrap().checked);
    let control = view.select_all.unwrap();
    assert!(control.state.is_checked());
    assert!(control.state.is_indeterminate());

    selector.dispatch(&FilterSelectorEvent::ToggleAll, &props);
    assert_eq!(emitted.lock().unwrap().as_slice(), &[Vec::<String>::new()]);
}

#[test]
fn test_select_all_options() {
    let (selector, emitted) = recording_selector();
    let options = empty_options(2);
    let props = FilterSelectorProps::new("type").options(&options);
    let view = selector.view(&props);

    assert!(view.rows.iter().all(|r| !r.checked));
    let control = view.select_all.unwrap();
    assert!(!control.state.is_checked());
    assert!(!control.state.is_indeterminate());

    selector.dispatch(&FilterSelectorEvent::ToggleAll, &props);
    assert_eq!(emitted.lock().unwrap().as_slice(), &[strings(&["type1", "type2"])]);
}

#[test]
fn test_unselect_all_options() {
    let (selector, emitted) = recording_selector();
    let options = empty_options(2);
    let selected = strings(&["type1", "type2"]);
    let props = FilterSelectorProps::new("type")
        .options(&options)
        .selected(&selected);
    let view = selector.view(&props);

    assert!(view.rows.iter().all(|r| r.checked));
    let control = view.select_all.unwrap();
    assert_eq!(control.state, SelectAllState::All);

    selector.dispatch(&FilterSelectorEvent::ToggleAll, &props);
    assert_eq!(emitted.lock().unwrap().as_slice(), &[Vec::<String>::new()]);
}

#[test]
fn test_select_all_ignores_search() {
    let (selector, emitted) = recording_selector();
    let options = vec![FilterOption::new("type1"), FilterOption::new("category1")];
    let props = FilterSelectorProps::new("type").options(&options).search("cat");
    selector.dispatch(&FilterSelectorEvent::ToggleAll, &props);
    assert_eq!(
        emitted.lock().unwrap().as_slice(),
        &[strings(&["type1", "category1"])]
    );
}

#[test]
fn test_filter_by_search() {
    let selector = FilterSelector::new();
    let options: Vec<FilterOption> = ["type1", "type2", "type3", "category1", "category2", "category3"]
        .into_iter()
        .map(FilterOption::new)
        .collect();
    let view = selector.view(&FilterSelectorProps::new("type").options(&options).search("category"));

    let order: Vec<&str> = view.rows.iter().map(|r| r.value.as_str()).collect();
    assert_eq!(order, ["category1", "category2", "category3"]);
}

#[test]
fn test_clones_share_state() {
    let selector = FilterSelector::new();
    let handle = selector.clone();
    handle.toggle_collapsed();
    assert!(selector.is_collapsed());
    assert_eq!(selector.id(), handle.id());
    assert!(selector.id_string().starts_with("__filter_selector_"));
    assert_ne!(selector.id(), FilterSelector::new().id());
}

#[test]
fn test_render_group_lines() {
    let selector = FilterSelector::new();
    let options = vec![
        FilterOption::new("type1")
            .with_count(OutcomeKind::CorrectAndPredicted, 1)
            .with_count(OutcomeKind::IncorrectAndPredicted, 1)
            .with_total(2),
        FilterOption::new("type2"),
    ];
    let selected = strings(&["type1"]);
    let props = FilterSelectorProps::new("type").options(&options).selected(&selected);
    let render = RenderOptions {
        label_width: 8,
        bar_width: 10,
    };
    let lines = render_group(&selector.view(&props), &render);

    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].target, LineTarget::Header);
    assert!(lines[0].text().starts_with("▼ [-] type"));

    assert_eq!(lines[1].target, LineTarget::Option("type1".into()));
    assert!(lines[1].text().contains("[x] type1"));
    let correct: usize = lines[1]
        .spans
        .iter()
        .filter(|s| s.tone == Tone::Outcome(OutcomeKind::CorrectAndPredicted))
        .map(|s| s.text.chars().count())
        .sum();
    assert_eq!(correct, 5);

    // zero total renders an empty track
    assert!(lines[2].text().ends_with(&"·".repeat(10)));
}
