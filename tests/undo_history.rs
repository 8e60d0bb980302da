use egui::{Pos2, Rect, pos2, vec2};
use egui_annotate::command::history::INITIAL_DESCRIPTION;
use egui_annotate::{Command, EditState, EditorElement, SlotSet, UndoHistory};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn state_with_points(points: &[Pos2]) -> EditState {
    EditState::new(points.iter().map(|p| EditorElement::point(*p)).collect())
}

fn selected(state: &EditState, slots: &[usize]) -> EditState {
    state.with_selected(SlotSet::from_sorted(slots.to_vec()))
}

#[test]
fn test_new_history_has_only_initial_entry() {
    let history = UndoHistory::new(EditState::default(), 50);
    assert_eq!(history.len(), 1);
    assert_eq!(history.cursor(), 1);
    assert_eq!(history.entries()[0].description(), INITIAL_DESCRIPTION);
    assert!(!history.can_undo());
    assert!(!history.can_redo());
    assert_eq!(history.undo_label(), None);
}

#[test]
fn test_matching_commands_merge_into_one_entry() {
    init_logging();
    let base = selected(&state_with_points(&[pos2(0.0, 0.0)]), &[0]);
    let mut history = UndoHistory::new(base.clone(), 50);

    for step in 1..=5 {
        let moved = base.with_selected_translated(vec2(step as f32, 0.0));
        history.record(Command::new("Move Item", moved));
    }

    assert_eq!(history.len(), 2);
    assert_eq!(history.cursor(), 2);
    let expected = base.with_selected_translated(vec2(5.0, 0.0));
    assert_eq!(history.current_state(), &expected);
    assert_eq!(history.undo_label().as_deref(), Some("Undo Move Item"));
}

#[test]
fn test_different_selection_appends() {
    let base = state_with_points(&[pos2(0.0, 0.0), pos2(10.0, 10.0)]);
    let mut history = UndoHistory::new(base.clone(), 50);

    history.record(Command::new("Move Item", selected(&base, &[0])));
    history.record(Command::new("Move Item", selected(&base, &[1])));

    assert_eq!(history.len(), 3);
}

#[test]
fn test_merge_disabled_appends() {
    let base = selected(&state_with_points(&[pos2(0.0, 0.0)]), &[0]);
    let mut history = UndoHistory::new(base.clone(), 50);

    history.record(Command::new("Add Polygon", base.clone()));
    history.record(Command::new("Add Polygon", base.clone()).with_merge_disabled(true));

    assert_eq!(history.len(), 3);
}

#[test]
fn test_undo_then_redo_restores_state() {
    let initial = state_with_points(&[pos2(0.0, 0.0)]);
    let mut history = UndoHistory::new(initial.clone(), 50);
    let added = state_with_points(&[pos2(0.0, 0.0), pos2(5.0, 5.0)]);
    history.record(Command::new("Add Point", added.clone()));

    assert_eq!(history.perform_undo(), Some(initial.clone()));
    assert!(!history.can_undo());
    assert_eq!(history.redo_label().as_deref(), Some("Redo Add Point"));

    assert_eq!(history.perform_redo(), Some(added.clone()));
    assert!(!history.can_redo());
    assert_eq!(history.current_state(), &added);
}

const DESCRIPTIONS: [&str; 3] = ["Add Point", "Move Item", "Set Category"];

// Step `i` of a mixed edit sequence: one more point, a different selection each time
fn step_state(i: usize) -> EditState {
    let points: Vec<Pos2> = (0..=i).map(|k| pos2(k as f32, (k * k) as f32)).collect();
    selected(&state_with_points(&points), &[i / 2])
}

// Record steps 1..=count, returning every state starting with the initial one
fn record_steps(history: &mut UndoHistory, count: usize) -> Vec<EditState> {
    let mut states = vec![step_state(0)];
    for i in 1..=count {
        let state = step_state(i);
        history.record(Command::new(DESCRIPTIONS[i % 3], state.clone()));
        states.push(state);
    }
    states
}

// From the current cursor, undo-redo-undo must land on the state one step back
fn assert_undo_redo_undo(history: &mut UndoHistory, current: &EditState, previous: &EditState) {
    assert_eq!(history.current_state(), current);
    assert_eq!(history.perform_undo().as_ref(), Some(previous));
    assert_eq!(history.perform_redo().as_ref(), Some(current));
    assert_eq!(history.perform_undo().as_ref(), Some(previous));
    assert_eq!(history.current_state(), previous);
}

#[test]
fn test_undo_redo_undo_at_every_position() {
    init_logging();
    let mut history = UndoHistory::new(step_state(0), 50);
    let states = record_steps(&mut history, 12);
    assert_eq!(history.len(), 13);

    for k in (1..states.len()).rev() {
        assert_eq!(history.cursor(), k + 1);
        assert_undo_redo_undo(&mut history, &states[k], &states[k - 1]);
    }
    assert!(!history.can_undo());
    assert_eq!(history.current_state(), &states[0]);

    // Everything can be redone again in order.
    for state in &states[1..] {
        assert_eq!(history.perform_redo().as_ref(), Some(state));
    }
    assert!(!history.can_redo());
}

#[test]
fn test_undo_redo_undo_after_trimming() {
    let mut history = UndoHistory::new(step_state(0), 5);
    let mut states = vec![step_state(0)];
    for i in 1..=8 {
        let state = step_state(i);
        history.record(Command::new(DESCRIPTIONS[i % 3], state.clone()));
        states.push(state);
        assert_eq!(history.cursor(), (i + 1).min(5));
        assert_eq!(history.len(), (i + 1).min(5));
    }
    assert_eq!(history.entries()[0].new_state(), &states[4]);

    for k in (5..=8).rev() {
        assert_undo_redo_undo(&mut history, &states[k], &states[k - 1]);
    }
    // The oldest kept entry is as far back as undo goes.
    assert!(!history.can_undo());
    assert_eq!(history.cursor(), 1);
    assert_eq!(history.current_state(), &states[4]);
}

#[test]
fn test_record_after_undo_drops_redo_entries() {
    let initial = EditState::default();
    let mut history = UndoHistory::new(initial.clone(), 50);
    let one = state_with_points(&[pos2(1.0, 1.0)]);
    let two = state_with_points(&[pos2(2.0, 2.0)]);
    history.record(Command::new("Add Point", one));
    history.perform_undo();
    history.record(Command::new("Paste Item", two.clone()));

    assert_eq!(history.len(), 2);
    assert!(!history.can_redo());
    assert_eq!(history.current_state(), &two);
}

#[test]
fn test_history_is_trimmed_to_limit() {
    init_logging();
    let mut history = UndoHistory::new(EditState::default(), 50);
    let mut last = EditState::default();
    for i in 0..60 {
        last = state_with_points(&[pos2(i as f32, 0.0)]);
        // Alternating descriptions keep every command from merging.
        let description = if i % 2 == 0 { "Add Point" } else { "Paste Item" };
        history.record(Command::new(description, last.clone()));
    }

    assert_eq!(history.len(), 50);
    assert_eq!(history.cursor(), 50);
    assert_eq!(history.current_state(), &last);

    let mut undone = 0;
    while history.perform_undo().is_some() {
        undone += 1;
    }
    assert_eq!(undone, 49);
}

#[test]
fn test_skip_undo_leaves_history_alone() {
    let base = state_with_points(&[pos2(0.0, 0.0)]);
    let mut history = UndoHistory::new(base.clone(), 50);
    history.record(Command::new("Select Item", selected(&base, &[0])).with_skip_undo(true));

    assert_eq!(history.len(), 1);
    assert_eq!(history.current_state(), &base);
}

#[test]
fn test_discard_last_removes_only_latest_entry() {
    let initial = EditState::default();
    let mut history = UndoHistory::new(initial.clone(), 50);
    let one = state_with_points(&[pos2(1.0, 1.0)]);
    let two = EditState::new(vec![EditorElement::rect(Rect::from_min_size(
        pos2(0.0, 0.0),
        vec2(4.0, 4.0),
    ))]);
    history.record(Command::new("Add Point", one.clone()));
    history.record(Command::new("Add Box", two));

    let discarded = history.discard_last();
    assert_eq!(discarded.map(|c| c.description().to_string()).as_deref(), Some("Add Box"));
    assert_eq!(history.len(), 2);
    assert_eq!(history.current_state(), &one);

    assert!(history.discard_last().is_some());
    assert!(history.discard_last().is_none(), "initial entry is never discarded");
    assert_eq!(history.current_state(), &initial);
}

#[test]
fn test_discard_last_refused_with_pending_redo() {
    let mut history = UndoHistory::new(EditState::default(), 50);
    history.record(Command::new("Add Point", state_with_points(&[pos2(1.0, 1.0)])));
    history.perform_undo();

    assert!(history.discard_last().is_none());
    assert!(history.can_redo());
}

#[test]
fn test_reset_starts_fresh() {
    let mut history = UndoHistory::new(EditState::default(), 50);
    history.record(Command::new("Add Point", state_with_points(&[pos2(1.0, 1.0)])));
    let loaded = state_with_points(&[pos2(3.0, 3.0), pos2(4.0, 4.0)]);
    history.reset(loaded.clone());

    assert_eq!(history.len(), 1);
    assert!(!history.can_undo());
    assert_eq!(history.current_state(), &loaded);
}
