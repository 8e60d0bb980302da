use egui::{Rect, pos2, vec2};
use egui_annotate::element::ElementProperties;
use egui_annotate::operations::{CommandKind, CommandOperation, HistoryOperation};
use egui_annotate::{
    EditState, EditorConfig, EditorContext, EditorElement, Element, EventDispatcher, Operation,
    SlotSet,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn square(x: f32, y: f32, size: f32) -> EditorElement {
    EditorElement::rect(Rect::from_min_size(pos2(x, y), vec2(size, size)))
}

fn setup(elements: Vec<EditorElement>, selected: &[usize]) -> (EditorContext, EventDispatcher) {
    init_logging();
    let state = EditState::new(elements).with_selected(SlotSet::from_sorted(selected.to_vec()));
    let mut ctx = EditorContext::new(state, EditorConfig::default());
    let dispatcher = EventDispatcher::new(&mut ctx);
    (ctx, dispatcher)
}

fn run(kind: CommandKind, dispatcher: &mut EventDispatcher, ctx: &mut EditorContext) -> bool {
    dispatcher.perform(CommandOperation::new(kind), ctx)
}

fn selection(ctx: &EditorContext) -> Vec<usize> {
    ctx.state().selected().iter().collect()
}

#[test]
fn test_paste_with_empty_clipboard_is_disabled() {
    let (mut ctx, mut dispatcher) = setup(vec![square(0.0, 0.0, 10.0)], &[0]);
    let before = ctx.state().clone();

    assert!(!run(CommandKind::Paste, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state(), &before);
    assert_eq!(ctx.history().len(), 1);
    assert_eq!(dispatcher.operation_name(), "Select");
}

#[test]
fn test_cut_then_paste_twice() {
    let (mut ctx, mut dispatcher) = setup(
        vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0), square(40.0, 0.0, 10.0)],
        &[0, 2],
    );

    assert!(run(CommandKind::Cut, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state().element_count(), 1);
    assert_eq!(ctx.state().element(0).bounds().min, pos2(20.0, 0.0));
    assert_eq!(ctx.state().clipboard().len(), 2);
    assert!(ctx.state().selected().is_empty());
    assert_eq!(ctx.history().undo_label().as_deref(), Some("Undo Cut 2 Items"));

    assert!(run(CommandKind::Paste, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state().element_count(), 3);
    assert_eq!(selection(&ctx), vec![1, 2]);
    assert_eq!(ctx.state().element(1).bounds().min, pos2(8.0, 8.0));
    assert_eq!(ctx.state().element(2).bounds().min, pos2(48.0, 8.0));
    assert_eq!(ctx.state().duplication_offset(), vec2(8.0, 8.0));

    // Each paste steps one more offset away.
    assert!(run(CommandKind::Paste, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state().element_count(), 5);
    assert_eq!(selection(&ctx), vec![3, 4]);
    assert_eq!(ctx.state().element(3).bounds().min, pos2(16.0, 16.0));
    assert_eq!(ctx.history().undo_label().as_deref(), Some("Undo Paste 2 Items"));
}

#[test]
fn test_copy_keeps_elements() {
    let (mut ctx, mut dispatcher) = setup(vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0)], &[1]);

    assert!(run(CommandKind::Copy, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state().element_count(), 2);
    assert_eq!(selection(&ctx), vec![1]);
    assert_eq!(ctx.state().clipboard(), &[square(20.0, 0.0, 10.0)]);
}

#[test]
fn test_cut_and_copy_need_a_selection() {
    let (mut ctx, mut dispatcher) = setup(vec![square(0.0, 0.0, 10.0)], &[]);
    assert!(!run(CommandKind::Cut, &mut dispatcher, &mut ctx));
    assert!(!run(CommandKind::Copy, &mut dispatcher, &mut ctx));
}

#[test]
fn test_undo_and_redo_operations() {
    let (mut ctx, mut dispatcher) = setup(vec![square(0.0, 0.0, 10.0)], &[0]);

    let mut undo = HistoryOperation::undo();
    assert!(!undo.should_be_enabled(&ctx));

    run(CommandKind::Cut, &mut dispatcher, &mut ctx);
    assert_eq!(undo.label_text(&ctx).as_deref(), Some("Undo Cut Item"));

    assert!(dispatcher.perform(HistoryOperation::undo(), &mut ctx));
    assert_eq!(ctx.state().element_count(), 1);
    assert_eq!(
        HistoryOperation::redo().label_text(&ctx).as_deref(),
        Some("Redo Cut Item")
    );

    assert!(dispatcher.perform(HistoryOperation::redo(), &mut ctx));
    assert_eq!(ctx.state().element_count(), 0);
    assert!(!dispatcher.perform(HistoryOperation::redo(), &mut ctx));
}

#[test]
fn test_select_all_and_none() {
    let (mut ctx, mut dispatcher) = setup(vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0)], &[]);

    assert!(run(CommandKind::SelectAll, &mut dispatcher, &mut ctx));
    assert_eq!(selection(&ctx), vec![0, 1]);
    assert!(!run(CommandKind::SelectAll, &mut dispatcher, &mut ctx));

    assert!(run(CommandKind::SelectNone, &mut dispatcher, &mut ctx));
    assert!(ctx.state().selected().is_empty());
    assert!(!run(CommandKind::SelectNone, &mut dispatcher, &mut ctx));

    assert!(!ctx.history().can_undo());
}

#[test]
fn test_set_selection() {
    let (mut ctx, mut dispatcher) = setup(vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0)], &[0]);
    let kind = CommandKind::SetSelection(SlotSet::single(1));

    let mut operation = CommandOperation::new(kind.clone());
    assert_eq!(
        operation.construct_command(&ctx).map(|c| c.description().to_string()).as_deref(),
        Some("Select Item")
    );

    assert!(run(kind.clone(), &mut dispatcher, &mut ctx));
    assert_eq!(selection(&ctx), vec![1]);
    assert!(!run(kind, &mut dispatcher, &mut ctx));
}

#[test]
fn test_set_category() {
    let (mut ctx, mut dispatcher) = setup(
        vec![square(0.0, 0.0, 10.0), square(20.0, 0.0, 10.0), square(40.0, 0.0, 10.0)],
        &[0, 2],
    );

    assert!(run(CommandKind::SetCategory(Some(3)), &mut dispatcher, &mut ctx));
    let categories: Vec<Option<i32>> = ctx
        .state()
        .elements()
        .iter()
        .map(|e| e.properties().category)
        .collect();
    assert_eq!(categories, vec![Some(3), None, Some(3)]);

    assert!(!run(CommandKind::SetCategory(Some(3)), &mut dispatcher, &mut ctx));
    assert_eq!(ctx.history().undo_label().as_deref(), Some("Undo Set Category"));
}

#[test]
fn test_toggle_rotation_applies_to_boxes_only() {
    let (mut ctx, mut dispatcher) = setup(
        vec![square(0.0, 0.0, 10.0), EditorElement::point(pos2(50.0, 50.0))],
        &[0, 1],
    );

    assert!(run(CommandKind::ToggleRotation, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state().element(0).properties().rotation, Some(0));
    assert_eq!(ctx.state().element(1).properties().rotation, None);

    assert!(run(CommandKind::ToggleRotation, &mut dispatcher, &mut ctx));
    assert_eq!(ctx.state().element(0).properties().rotation, None);

    let (mut ctx, mut dispatcher) = setup(vec![EditorElement::point(pos2(0.0, 0.0))], &[0]);
    assert!(!run(CommandKind::ToggleRotation, &mut dispatcher, &mut ctx));
}

fn scored(x: f32, confidence: i32) -> EditorElement {
    let element = square(x, 0.0, 100.0);
    element.with_properties(ElementProperties::default().with_confidence(Some(confidence)))
}

#[test]
fn test_non_max_suppression_keeps_most_confident() {
    let (mut ctx, mut dispatcher) = setup(vec![scored(300.0, 50), scored(10.0, 80), scored(0.0, 90)], &[1]);

    assert!(run(CommandKind::NonMaxSuppression, &mut dispatcher, &mut ctx));

    let xs: Vec<f32> = ctx.state().elements().iter().map(|e| e.bounds().min.x).collect();
    assert_eq!(xs, vec![0.0, 300.0]);
    assert!(ctx.state().selected().is_empty());

    // Nothing overlaps any more.
    assert!(!run(CommandKind::NonMaxSuppression, &mut dispatcher, &mut ctx));
}

#[test]
fn test_non_max_suppression_needs_only_boxes() {
    let (mut ctx, mut dispatcher) = setup(
        vec![scored(0.0, 90), scored(10.0, 80), EditorElement::point(pos2(5.0, 5.0))],
        &[],
    );
    assert!(!run(CommandKind::NonMaxSuppression, &mut dispatcher, &mut ctx));

    let (mut ctx, mut dispatcher) = setup(vec![scored(0.0, 90)], &[]);
    assert!(!run(CommandKind::NonMaxSuppression, &mut dispatcher, &mut ctx));
}
