use hlist::{Item, ItemId, ItemState, ListConfig, ListContainer, ListEvent, SelectionMode};

fn list(mode: SelectionMode, n: usize) -> (ListContainer<usize>, Vec<ItemId>) {
    let mut list = ListContainer::with_config(ListConfig::new(mode));
    let ids = (0..n).map(|i| list.push(Item::new(i))).collect();
    list.take_events();
    (list, ids)
}

fn selected_rows(list: &ListContainer<usize>) -> Vec<usize> {
    let mut rows: Vec<usize> = list
        .selection()
        .iter()
        .filter_map(|&id| list.child_position(id))
        .collect();
    rows.sort_unstable();
    rows
}

fn selection_changes(events: &[ListEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, ListEvent::SelectionChanged))
        .count()
}

// ============================================================================
// Single and Browse
// ============================================================================

#[test]
fn test_single_select_replaces_previous() {
    let (mut list, ids) = list(SelectionMode::Single, 3);

    list.select_child(ids[0]);
    list.select_child(ids[1]);

    assert_eq!(list.selection(), &[ids[1]]);
    assert_eq!(list.item(ids[0]).map(Item::state), Some(ItemState::Normal));
    assert_eq!(list.item(ids[1]).map(Item::state), Some(ItemState::Selected));
}

#[test]
fn test_single_select_all_is_noop() {
    let (mut list, _) = list(SelectionMode::Single, 3);
    list.select_all();
    assert!(list.selection().is_empty());
    assert!(list.take_events().is_empty());
}

#[test]
fn test_browse_selects_first_child_on_insert() {
    let (list, ids) = list(SelectionMode::Browse, 3);
    assert_eq!(list.selection(), &[ids[0]]);
}

#[test]
fn test_browse_select_moves_selection() {
    let (mut list, ids) = list(SelectionMode::Browse, 3);
    list.select_child(ids[2]);
    assert_eq!(list.selection(), &[ids[2]]);
}

#[test]
fn test_browse_unselect_all_keeps_focus_selected() {
    let (mut list, ids) = list(SelectionMode::Browse, 3);
    list.grab_focus(ids[1]);
    assert_eq!(list.selection(), &[ids[1]]);

    list.unselect_all();

    assert_eq!(list.selection(), &[ids[1]]);
}

#[test]
fn test_browse_toggle_cannot_unselect() {
    let (mut list, ids) = list(SelectionMode::Browse, 2);

    list.toggle_child(ids[0]);
    list.toggle_row(ids[0]);

    assert_eq!(list.selection(), &[ids[0]]);
    assert!(list.item(ids[0]).is_some_and(Item::is_selected));
}

// ============================================================================
// Multiple
// ============================================================================

#[test]
fn test_select_child_twice_notifies_once() {
    let (mut list, ids) = list(SelectionMode::Multiple, 3);

    list.select_child(ids[1]);
    assert_eq!(selection_changes(&list.take_events()), 1);

    list.select_child(ids[1]);
    assert!(list.take_events().is_empty());
    assert_eq!(list.selection(), &[ids[1]]);
}

#[test]
fn test_multiple_keeps_selection_order() {
    let (mut list, ids) = list(SelectionMode::Multiple, 4);

    list.select_child(ids[3]);
    list.select_child(ids[0]);
    list.select_child(ids[2]);

    assert_eq!(list.selection(), &[ids[3], ids[0], ids[2]]);
}

#[test]
fn test_multiple_select_all_skips_insensitive() {
    let mut list = ListContainer::with_config(ListConfig::new(SelectionMode::Multiple));
    list.push(Item::new(0));
    let dead = list.push(Item::new(1).insensitive());
    list.push(Item::new(2));

    list.select_all();

    assert_eq!(selected_rows(&list), vec![0, 2]);
    assert_eq!(list.item(dead).map(Item::state), Some(ItemState::Insensitive));
}

#[test]
fn test_toggle_child_flips_in_multiple() {
    let (mut list, ids) = list(SelectionMode::Multiple, 2);

    list.toggle_child(ids[0]);
    assert_eq!(list.selection(), &[ids[0]]);

    list.toggle_child(ids[0]);
    assert!(list.selection().is_empty());
}

#[test]
fn test_select_item_out_of_range_is_ignored() {
    let (mut list, _) = list(SelectionMode::Multiple, 2);
    list.select_item(7);
    list.unselect_item(7);
    assert!(list.selection().is_empty());
    assert!(list.take_events().is_empty());
}

#[test]
fn test_select_by_index() {
    let (mut list, ids) = list(SelectionMode::Multiple, 3);
    list.select_item(2);
    assert_eq!(list.selection(), &[ids[2]]);
    list.unselect_item(2);
    assert!(list.selection().is_empty());
}

#[test]
fn test_unselect_all_emits_per_item() {
    let (mut list, ids) = list(SelectionMode::Multiple, 3);
    list.select_child(ids[0]);
    list.select_child(ids[2]);
    list.take_events();

    list.unselect_all();

    assert!(list.selection().is_empty());
    assert_eq!(selection_changes(&list.take_events()), 2);
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn test_foreign_item_is_ignored() {
    let (mut list, _) = list(SelectionMode::Multiple, 2);
    let mut other = ListContainer::new();
    let stranger = other.push(Item::new(9));

    list.select_child(stranger);
    list.toggle_row(stranger);

    assert!(list.selection().is_empty());
    assert!(list.take_events().is_empty());
}

#[test]
fn test_insensitive_item_is_never_selected() {
    let (mut list, ids) = list(SelectionMode::Multiple, 2);
    list.select_child(ids[0]);

    list.set_item_sensitive(ids[0], false);
    assert!(list.selection().is_empty());
    assert_eq!(list.item(ids[0]).map(Item::state), Some(ItemState::Insensitive));

    list.select_child(ids[0]);
    assert!(list.selection().is_empty());

    list.set_item_sensitive(ids[0], true);
    assert_eq!(list.item(ids[0]).map(Item::state), Some(ItemState::Normal));
}

// ============================================================================
// Mode changes
// ============================================================================

#[test]
fn test_switch_to_single_clears_selection() {
    let (mut list, ids) = list(SelectionMode::Multiple, 3);
    list.select_child(ids[0]);
    list.select_child(ids[1]);

    list.set_selection_mode(SelectionMode::Single);

    assert_eq!(list.selection_mode(), SelectionMode::Single);
    assert!(list.selection().is_empty());
}

#[test]
fn test_switch_to_same_mode_is_noop() {
    let (mut list, ids) = list(SelectionMode::Multiple, 3);
    list.select_child(ids[0]);
    list.take_events();

    list.set_selection_mode(SelectionMode::Multiple);

    assert_eq!(list.selection(), &[ids[0]]);
    assert!(list.take_events().is_empty());
}

#[test]
fn test_switch_mode_commits_open_gesture() {
    let (mut list, _) = list(SelectionMode::Extended, 4);
    list.set_anchor(false, 1, None);
    list.update_extended_selection(2);

    list.set_selection_mode(SelectionMode::Multiple);

    assert!(list.anchor().is_none());
    assert_eq!(selected_rows(&list), vec![1, 2]);
}
