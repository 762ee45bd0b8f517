use hlist::prelude::*;

fn laid_out(mode: SelectionMode, n: usize) -> (ListContainer<usize>, Vec<ItemId>) {
    let mut list = ListContainer::with_config(ListConfig::new(mode));
    let ids = (0..n).map(|i| list.push(Item::new(i).with_size(10, 1))).collect();
    list.size_allocate(Rect::new(0, 0, 10, n as i32));
    list.map();
    list.take_events();
    (list, ids)
}

fn row(y: i32) -> Point {
    Point::new(2, y)
}

fn press(list: &mut ListContainer<usize>, y: i32, modifiers: Modifiers) -> bool {
    list.pointer_press(row(y), MouseButton::Left, modifiers, PressKind::Initial)
}

fn release(list: &mut ListContainer<usize>, y: i32) -> bool {
    list.pointer_release(row(y), MouseButton::Left, Modifiers::NONE)
}

fn click(list: &mut ListContainer<usize>, y: i32, modifiers: Modifiers) {
    press(list, y, modifiers);
    release(list, y);
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

fn scheduled(events: &[ListEvent], axis: Axis) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, ListEvent::TimerScheduled { axis: a, .. } if *a == axis))
        .count()
}

// ============================================================================
// Press and release
// ============================================================================

#[test]
fn test_press_captures_input() {
    let (mut list, ids) = laid_out(SelectionMode::Single, 3);

    assert!(press(&mut list, 1, Modifiers::NONE));

    assert!(list.has_grab());
    assert!(list.is_dragging());
    assert_eq!(list.focus_child(), Some(ids[1]));
    let events = list.take_events();
    assert!(events.iter().any(|e| matches!(e, ListEvent::InputCaptured(_))));
    assert!(events.contains(&ListEvent::FocusRequested(ids[1])));
}

#[test]
fn test_release_frees_the_same_capture() {
    let (mut list, _) = laid_out(SelectionMode::Single, 3);
    press(&mut list, 1, Modifiers::NONE);
    let captured = list.take_events().into_iter().find_map(|e| match e {
        ListEvent::InputCaptured(token) => Some(token),
        _ => None,
    });

    assert!(release(&mut list, 1));

    assert!(!list.has_grab());
    let released = list.take_events().into_iter().find_map(|e| match e {
        ListEvent::InputReleased(token) => Some(token),
        _ => None,
    });
    assert!(captured.is_some());
    assert_eq!(captured, released);
}

#[test]
fn test_press_ignores_other_buttons_and_gaps() {
    let (mut list, _) = laid_out(SelectionMode::Single, 3);
    assert!(!list.pointer_press(row(1), MouseButton::Right, Modifiers::NONE, PressKind::Initial));
    assert!(!press(&mut list, 40, Modifiers::NONE));
    assert!(!list.has_grab());
    assert!(list.take_events().is_empty());
}

#[test]
fn test_press_on_insensitive_item_is_ignored() {
    let (mut list, ids) = laid_out(SelectionMode::Multiple, 3);
    list.set_item_sensitive(ids[1], false);

    assert!(!press(&mut list, 1, Modifiers::NONE));
    assert_eq!(list.focus_child(), None);
}

#[test]
fn test_single_click_selects_on_release() {
    let (mut list, ids) = laid_out(SelectionMode::Single, 3);

    press(&mut list, 1, Modifiers::NONE);
    assert!(list.selection().is_empty());
    assert_eq!(list.undo_focus_child(), Some(ids[1]));

    release(&mut list, 1);
    assert_eq!(list.selection(), &[ids[1]]);
    assert_eq!(list.undo_focus_child(), None);
}

#[test]
fn test_single_click_on_selected_unselects() {
    let (mut list, _) = laid_out(SelectionMode::Single, 3);
    click(&mut list, 1, Modifiers::NONE);
    click(&mut list, 1, Modifiers::NONE);
    assert!(list.selection().is_empty());
}

#[test]
fn test_release_elsewhere_does_not_toggle() {
    let (mut list, _) = laid_out(SelectionMode::Multiple, 3);
    press(&mut list, 0, Modifiers::NONE);
    release(&mut list, 2);
    assert!(list.selection().is_empty());
    assert_eq!(list.undo_focus_child(), None);
}

#[test]
fn test_repeat_press_selects_immediately() {
    let (mut list, ids) = laid_out(SelectionMode::Multiple, 3);
    press(&mut list, 1, Modifiers::NONE);

    list.pointer_press(row(1), MouseButton::Left, Modifiers::NONE, PressKind::Double);

    assert!(!list.has_grab());
    assert_eq!(list.selection(), &[ids[1]]);
    assert!(!release(&mut list, 1));
    assert_eq!(list.selection(), &[ids[1]]);
}

#[test]
fn test_browse_drag_follows_pointer() {
    let (mut list, ids) = laid_out(SelectionMode::Browse, 5);

    press(&mut list, 1, Modifiers::NONE);
    assert_eq!(list.selection(), &[ids[1]]);

    list.pointer_motion(row(3));
    assert_eq!(list.selection(), &[ids[3]]);
    assert_eq!(list.focus_child(), Some(ids[3]));

    release(&mut list, 3);
    assert_eq!(list.selection(), &[ids[3]]);
}

#[test]
fn test_motion_without_drag_is_ignored() {
    let (mut list, _) = laid_out(SelectionMode::Browse, 5);
    list.take_events();
    list.pointer_motion(row(3));
    assert!(list.take_events().is_empty());
}

// ============================================================================
// Extended gestures
// ============================================================================

#[test]
fn test_extended_drag_selects_range() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 6);

    press(&mut list, 2, Modifiers::NONE);
    list.pointer_motion(row(5));
    assert!(list.anchor().is_some());
    release(&mut list, 5);

    assert_eq!(selected_rows(&list), vec![2, 3, 4, 5]);
    assert!(list.anchor().is_none());
}

#[test]
fn test_extended_drag_back_over_anchor() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 6);

    press(&mut list, 3, Modifiers::NONE);
    list.pointer_motion(row(5));
    list.pointer_motion(row(1));
    release(&mut list, 1);

    assert_eq!(selected_rows(&list), vec![1, 2, 3]);
}

#[test]
fn test_extended_shift_click_extends_from_last_focus() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 6);
    click(&mut list, 1, Modifiers::NONE);
    assert_eq!(selected_rows(&list), vec![1]);

    click(&mut list, 4, Modifiers::shift());

    assert_eq!(selected_rows(&list), vec![1, 2, 3, 4]);
}

#[test]
fn test_extended_ctrl_click_toggles_rows() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 6);
    click(&mut list, 0, Modifiers::NONE);

    click(&mut list, 3, Modifiers::ctrl());
    assert_eq!(selected_rows(&list), vec![0, 3]);

    click(&mut list, 0, Modifiers::ctrl());
    assert_eq!(selected_rows(&list), vec![3]);
}

#[test]
fn test_extended_plain_click_replaces_selection() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 6);
    click(&mut list, 0, Modifiers::NONE);
    click(&mut list, 3, Modifiers::ctrl());

    click(&mut list, 5, Modifiers::NONE);

    assert_eq!(selected_rows(&list), vec![5]);
}

#[test]
fn test_shift_release_leaves_gesture_open() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 6);
    press(&mut list, 0, Modifiers::NONE);
    list.pointer_motion(row(2));

    list.pointer_release(row(2), MouseButton::Left, Modifiers::shift());

    assert!(!list.has_grab());
    assert_eq!(list.anchor(), Some(AnchorRange { anchor: 0, drag_pos: 2 }));
    list.end_selection();
    assert_eq!(selected_rows(&list), vec![0, 1, 2]);
}

#[test]
fn test_undo_after_drag_restores_previous() {
    let (mut list, ids) = laid_out(SelectionMode::Extended, 4);
    click(&mut list, 0, Modifiers::NONE);
    assert_eq!(list.selection(), &[ids[0]]);

    press(&mut list, 1, Modifiers::NONE);
    list.pointer_motion(row(2));
    release(&mut list, 2);
    assert_eq!(selected_rows(&list), vec![1, 2]);

    list.undo_selection();

    assert_eq!(list.selection(), &[ids[0]]);
    assert_eq!(list.focus_child(), Some(ids[0]));
}

#[test]
fn test_end_selection_waits_for_release() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 4);
    press(&mut list, 0, Modifiers::NONE);
    list.pointer_motion(row(2));

    list.end_selection();

    assert!(list.anchor().is_some());
}

#[test]
fn test_press_clears_add_mode() {
    let (mut list, ids) = laid_out(SelectionMode::Extended, 4);
    list.grab_focus(ids[0]);
    list.toggle_add_mode();
    list.take_events();

    press(&mut list, 2, Modifiers::NONE);

    assert!(!list.add_mode());
    assert!(list.take_events().contains(&ListEvent::RedrawRequested(ids[2])));
}

// ============================================================================
// Autoscroll
// ============================================================================

fn scrolled(n: usize) -> ListContainer<usize> {
    let (mut list, _) = laid_out(SelectionMode::Extended, n);
    list.set_vadjustment(Some(Adjustment::new(0.0, 0.0, n as f64, 1.0, 5.0, 5.0)));
    list
}

#[test]
fn test_vertical_timer_is_single_flight() {
    let mut list = scrolled(20);
    press(&mut list, 1, Modifiers::NONE);
    list.take_events();

    list.pointer_motion(row(8));
    list.pointer_motion(row(9));
    list.pointer_motion(row(10));

    let events = list.take_events();
    assert_eq!(scheduled(&events, Axis::Vertical), 1);
    assert!(list.pending_timer(Axis::Vertical).is_some());
}

#[test]
fn test_release_cancels_timers() {
    let mut list = scrolled(20);
    press(&mut list, 1, Modifiers::NONE);
    list.pointer_motion(row(8));
    let token = list.pending_timer(Axis::Vertical);
    assert!(token.is_some());
    list.take_events();

    release(&mut list, 8);

    assert_eq!(list.pending_timer(Axis::Vertical), None);
    let events = list.take_events();
    assert!(events.contains(&ListEvent::TimerCancelled {
        axis: Axis::Vertical,
        token: token.unwrap(),
    }));
    assert!(events.iter().any(|e| matches!(e, ListEvent::InputReleased(_))));
}

#[test]
fn test_stale_timer_is_ignored() {
    let mut list = scrolled(20);
    press(&mut list, 1, Modifiers::NONE);
    list.pointer_motion(row(8));
    let token = list.pending_timer(Axis::Vertical).unwrap();
    release(&mut list, 8);
    list.take_events();

    list.timer_fired(Axis::Vertical, token);

    assert!(list.take_events().is_empty());
}

#[test]
fn test_timer_replays_pointer_and_extends() {
    let mut list = scrolled(20);
    press(&mut list, 1, Modifiers::NONE);
    list.pointer_motion(row(8));
    list.pointer_motion(row(9));
    let token = list.pending_timer(Axis::Vertical).unwrap();
    assert_eq!(list.anchor().map(|a| a.drag_pos), Some(8));

    list.timer_fired(Axis::Vertical, token);

    assert_eq!(list.anchor().map(|a| a.drag_pos), Some(9));
    assert!(list.vadjustment().is_some_and(|adj| adj.value > 0.0));
}

#[test]
fn test_no_vertical_timer_above_first_row() {
    let mut list = scrolled(20);
    press(&mut list, 0, Modifiers::NONE);

    list.pointer_motion(row(-3));

    assert_eq!(list.pending_timer(Axis::Vertical), None);
}

#[test]
fn test_focus_scrolls_vertical_adjustment() {
    let mut list = scrolled(20);
    let target = list.children()[12].id();
    list.take_events();

    list.grab_focus(target);

    assert_eq!(list.vadjustment().map(|adj| adj.value), Some(8.0));
    assert!(list.take_events().contains(&ListEvent::AdjustmentChanged {
        axis: Axis::Vertical,
        value: 8.0,
    }));
}

#[test]
fn test_horizontal_autoscroll_moves_adjustment() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 5);
    list.set_hadjustment(Some(Adjustment::new(0.0, 0.0, 10.0, 1.0, 2.0, 4.0)));
    press(&mut list, 1, Modifiers::NONE);
    list.take_events();

    list.pointer_motion(Point::new(8, 1));
    list.pointer_motion(Point::new(9, 1));

    let events = list.take_events();
    assert_eq!(scheduled(&events, Axis::Horizontal), 1);
    assert_eq!(list.hadjustment().map(|adj| adj.value), Some(3.0));
    assert!(events.contains(&ListEvent::AdjustmentChanged {
        axis: Axis::Horizontal,
        value: 3.0,
    }));
}

#[test]
fn test_pointer_on_right_page_edge_scrolls() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 5);
    list.set_hadjustment(Some(Adjustment::new(0.0, 0.0, 10.0, 1.0, 2.0, 4.0)));
    press(&mut list, 1, Modifiers::NONE);
    list.take_events();

    list.pointer_motion(Point::new(3, 1));
    assert!(list.pending_timer(Axis::Horizontal).is_none());

    list.pointer_motion(Point::new(4, 1));

    let events = list.take_events();
    assert_eq!(scheduled(&events, Axis::Horizontal), 1);
    assert!(list.pending_timer(Axis::Horizontal).is_some());
    assert_eq!(list.hadjustment().map(|adj| adj.value), Some(1.0));
}

// ============================================================================
// Interruptions
// ============================================================================

#[test]
fn test_unmap_ends_drag_and_commits() {
    let (mut list, _) = laid_out(SelectionMode::Extended, 5);
    press(&mut list, 1, Modifiers::NONE);
    list.pointer_motion(row(3));

    list.unmap();

    assert!(!list.is_mapped());
    assert!(!list.has_grab());
    assert!(list.anchor().is_none());
    assert_eq!(selected_rows(&list), vec![1, 2, 3]);
}

#[test]
fn test_drag_begin_cancels_pending_toggle() {
    let (mut list, _) = laid_out(SelectionMode::Multiple, 3);
    press(&mut list, 1, Modifiers::NONE);

    list.drag_begin();

    assert!(!list.is_dragging());
    assert_eq!(list.undo_focus_child(), None);
    release(&mut list, 1);
    assert!(list.selection().is_empty());
}
