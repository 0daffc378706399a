use super::*;
use crate::capture::{CaptureError, PersistenceSink, SaveOutcome};
use crate::config::{Action, KeybindingsConfig};
use crate::draw::{BLACK, BLUE, Color, GREEN, RED, Raster};
use crate::gesture::classifier::tests::hand_with;
use crate::gesture::{Fingers, Gesture, LandmarkSet};
use crate::input::{Key, KeyPress, Modifiers};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;
use std::path::PathBuf;

const POINT: Fingers = [false, true, false, false, false];
const PALM: Fingers = [true, true, true, true, true];
const THUMB: Fingers = [true, false, false, false, false];

#[derive(Default)]
struct RecordingSink {
    saved: Vec<Vec<u8>>,
}

impl PersistenceSink for RecordingSink {
    fn save(&mut self, canvas: &Raster) -> Result<PathBuf, CaptureError> {
        self.saved.push(canvas.to_bytes()?);
        Ok(PathBuf::from(format!("drawing_{}.png", self.saved.len())))
    }
}

struct FailingSink;

impl PersistenceSink for FailingSink {
    fn save(&mut self, _canvas: &Raster) -> Result<PathBuf, CaptureError> {
        Err(CaptureError::SaveError(io::Error::other("disk full")))
    }
}

fn create_test_machine() -> DrawingMachine {
    let action_map = KeybindingsConfig::default().build_action_map().unwrap();
    let mut machine = DrawingMachine::with_defaults(BLUE, 4, 20, action_map);
    machine.show_landmarks = false;
    machine
}

fn frame() -> Raster {
    Raster::new(100, 100).unwrap()
}

fn press(machine: &mut DrawingMachine, key: &str) {
    let press: KeyPress = key.parse().unwrap();
    machine.on_key_press(press).unwrap();
}

fn step(
    machine: &mut DrawingMachine,
    hand: Option<&LandmarkSet>,
    sink: &mut dyn PersistenceSink,
) -> FrameOutput {
    machine.process_frame(&frame(), hand, sink).unwrap()
}

#[test]
fn test_canvas_allocated_on_first_frame() {
    let mut machine = create_test_machine();
    assert!(machine.canvas().is_none());

    step(&mut machine, None, &mut RecordingSink::default());
    let canvas = machine.canvas().unwrap();
    assert_eq!(canvas.size(), (100, 100));
    assert!(canvas.is_filled_with(BLACK));
}

#[test]
fn test_canvas_size_is_fixed_after_first_frame() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    step(&mut machine, None, &mut sink);

    let small = Raster::new(40, 30).unwrap();
    machine.process_frame(&small, None, &mut sink).unwrap();
    assert_eq!(machine.canvas().unwrap().size(), (100, 100));
}

#[test]
fn test_red_segment_then_clear() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    press(&mut machine, "r");

    // Establish the previous pointer without painting.
    machine.draw_mode = false;
    let out = step(&mut machine, Some(&hand_with(POINT, (0.1, 0.1))), &mut sink);
    assert_eq!(out.state, DrawingState::Idle);
    assert_eq!(machine.history().undo_depth(), 0);
    assert_eq!(machine.prev_pointer(), Some((10, 10)));

    machine.draw_mode = true;
    let out = step(&mut machine, Some(&hand_with(POINT, (0.2, 0.2))), &mut sink);
    assert_eq!(out.state, DrawingState::Drawing);
    assert_eq!(machine.history().undo_depth(), 1);

    let canvas = machine.canvas().unwrap();
    assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0]));
    assert_eq!(canvas.pixel(15, 15), Some([255, 0, 0]));
    assert_eq!(canvas.pixel(20, 20), Some([255, 0, 0]));

    press(&mut machine, "c");
    assert_eq!(machine.history().undo_depth(), 2);
    assert_eq!(machine.history().redo_depth(), 0);
    assert!(machine.canvas().unwrap().is_filled_with(BLACK));
}

#[test]
fn test_first_hand_frame_draws_a_dot() {
    let mut machine = create_test_machine();
    step(
        &mut machine,
        Some(&hand_with(POINT, (0.25, 0.25))),
        &mut RecordingSink::default(),
    );
    assert_eq!(machine.canvas().unwrap().pixel(25, 25), Some(BLUE.to_rgb8()));
}

#[test]
fn test_no_hand_forgets_pointer_and_rearms_gate() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    let thumbs = hand_with(THUMB, (0.5, 0.5));

    step(&mut machine, Some(&thumbs), &mut sink);
    assert!(machine.prev_pointer().is_some());

    let out = step(&mut machine, None, &mut sink);
    assert_eq!(out.state, DrawingState::NoHand);
    assert_eq!(out.gesture, Gesture::None);
    assert!(out.gesture_text.is_none());
    assert!(machine.prev_pointer().is_none());

    step(&mut machine, Some(&thumbs), &mut sink);
    assert_eq!(sink.saved.len(), 2);
}

#[test]
fn test_no_hand_does_not_draw() {
    let mut machine = create_test_machine();
    for _ in 0..3 {
        step(&mut machine, None, &mut RecordingSink::default());
    }
    assert_eq!(machine.history().undo_depth(), 0);
    assert!(machine.canvas().unwrap().is_filled_with(BLACK));
}

#[test]
fn test_thumbs_up_saves_once_per_run() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    let point = hand_with(POINT, (0.5, 0.5));
    let thumbs = hand_with(THUMB, (0.5, 0.5));

    let sequence = [&point, &thumbs, &thumbs, &thumbs, &point, &thumbs];
    let mut fired = Vec::new();
    for hand in sequence {
        let out = step(&mut machine, Some(hand), &mut sink);
        fired.push(out.save.is_some());
    }

    assert_eq!(fired, vec![false, true, false, false, false, true]);
    assert_eq!(sink.saved.len(), 2);
}

#[test]
fn test_open_palm_does_not_rearm_save_gate() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    let palm = hand_with(PALM, (0.5, 0.5));
    let thumbs = hand_with(THUMB, (0.5, 0.5));

    for hand in [&thumbs, &palm, &thumbs, &palm, &thumbs] {
        step(&mut machine, Some(hand), &mut sink);
    }
    assert_eq!(sink.saved.len(), 1);
}

#[test]
fn test_pointing_between_thumbs_up_saves_twice() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    let point = hand_with(POINT, (0.5, 0.5));
    let palm = hand_with(PALM, (0.5, 0.5));
    let thumbs = hand_with(THUMB, (0.5, 0.5));

    for hand in [&thumbs, &palm, &point, &thumbs] {
        step(&mut machine, Some(hand), &mut sink);
    }
    assert_eq!(sink.saved.len(), 2);
}

#[test]
fn test_thumbs_up_frame_reports_save_and_does_not_draw() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    step(&mut machine, Some(&hand_with(POINT, (0.1, 0.1))), &mut sink);
    let depth = machine.history().undo_depth();
    let before = machine.canvas().unwrap().try_clone().unwrap();

    let out = step(&mut machine, Some(&hand_with(THUMB, (0.8, 0.8))), &mut sink);
    assert_eq!(out.gesture, Gesture::ThumbsUp);
    assert_eq!(out.state, DrawingState::SaveTriggered);
    assert_eq!(out.gesture_text, Some(SAVED_TEXT));
    assert_eq!(
        out.save,
        Some(SaveOutcome::Saved(PathBuf::from("drawing_1.png")))
    );
    assert_eq!(machine.history().undo_depth(), depth);
    assert!(machine.canvas().unwrap().same_pixels(&before));
    // The saved image is the canvas itself, not the composited frame.
    assert_eq!(sink.saved[0], before.to_bytes().unwrap());

    // Held thumbs-up: no new save, still no drawing.
    let out = step(&mut machine, Some(&hand_with(THUMB, (0.8, 0.8))), &mut sink);
    assert_eq!(out.state, DrawingState::Idle);
    assert!(out.save.is_none());
    assert!(out.gesture_text.is_none());
}

#[test]
fn test_save_failure_is_reported_not_fatal() {
    let mut machine = create_test_machine();
    step(
        &mut machine,
        Some(&hand_with(POINT, (0.1, 0.1))),
        &mut FailingSink,
    );
    let before = machine.canvas().unwrap().try_clone().unwrap();
    let depth = machine.history().undo_depth();

    let out = machine
        .process_frame(&frame(), Some(&hand_with(THUMB, (0.5, 0.5))), &mut FailingSink)
        .unwrap();
    match out.save {
        Some(SaveOutcome::Failed(msg)) => assert!(msg.contains("disk full")),
        other => panic!("expected failed save, got {:?}", other),
    }
    assert_eq!(out.gesture_text, Some(SAVE_FAILED_TEXT));
    assert!(machine.canvas().unwrap().same_pixels(&before));
    assert_eq!(machine.history().undo_depth(), depth);
}

#[test]
fn test_open_palm_erases_without_changing_selection() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    press(&mut machine, "r");
    step(&mut machine, Some(&hand_with(POINT, (0.5, 0.5))), &mut sink);
    assert_eq!(machine.canvas().unwrap().pixel(50, 50), Some([255, 0, 0]));

    let out = step(&mut machine, Some(&hand_with(PALM, (0.5, 0.5))), &mut sink);
    assert_eq!(out.gesture, Gesture::OpenPalm);
    assert_eq!(out.state, DrawingState::Erasing);
    assert_eq!(out.gesture_text, Some(ERASER_TEXT));
    assert!(machine.canvas().unwrap().is_filled_with(BLACK));
    assert!(!machine.eraser);

    // Pointing again paints with the selected color.
    let out = step(&mut machine, Some(&hand_with(POINT, (0.5, 0.5))), &mut sink);
    assert_eq!(out.state, DrawingState::Drawing);
    assert_eq!(machine.canvas().unwrap().pixel(50, 50), Some([255, 0, 0]));
}

#[test]
fn test_explicit_eraser_paints_background() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    step(&mut machine, Some(&hand_with(POINT, (0.5, 0.5))), &mut sink);

    press(&mut machine, "e");
    assert!(machine.eraser);
    let out = step(&mut machine, Some(&hand_with(POINT, (0.5, 0.5))), &mut sink);
    assert_eq!(out.state, DrawingState::Erasing);
    assert!(machine.canvas().unwrap().is_filled_with(BLACK));
}

#[test]
fn test_draw_mode_off_skips_snapshots() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    press(&mut machine, "d");
    assert!(!machine.draw_mode);

    for x in [0.1, 0.2, 0.4] {
        let out = step(&mut machine, Some(&hand_with(POINT, (x, 0.5))), &mut sink);
        assert_eq!(out.state, DrawingState::Idle);
    }
    assert_eq!(machine.history().undo_depth(), 0);
    assert!(machine.canvas().unwrap().is_filled_with(BLACK));
}

#[test]
fn test_random_color_uses_rng_per_segment() {
    let mut machine = create_test_machine().with_rng(StdRng::seed_from_u64(7));
    press(&mut machine, "m");
    assert!(machine.random_color);

    let mut expected_rng = StdRng::seed_from_u64(7);
    let expected = Color::from_rgb8(
        expected_rng.gen_range(0..=255),
        expected_rng.gen_range(0..=255),
        expected_rng.gen_range(0..=255),
    );

    let out = step(
        &mut machine,
        Some(&hand_with(POINT, (0.5, 0.5))),
        &mut RecordingSink::default(),
    );
    assert_eq!(out.state, DrawingState::Drawing);
    assert_eq!(machine.canvas().unwrap().pixel(50, 50), Some(expected.to_rgb8()));
}

#[test]
fn test_random_color_wins_over_open_palm() {
    let mut machine = create_test_machine();
    press(&mut machine, "m");
    let out = step(
        &mut machine,
        Some(&hand_with(PALM, (0.5, 0.5))),
        &mut RecordingSink::default(),
    );
    assert_eq!(out.state, DrawingState::Drawing);
}

#[test]
fn test_color_keys_leave_special_modes() {
    let mut machine = create_test_machine();
    press(&mut machine, "m");
    press(&mut machine, "g");
    assert_eq!(machine.current_color, GREEN);
    assert!(!machine.random_color);

    press(&mut machine, "e");
    press(&mut machine, "k");
    assert_eq!(machine.current_color, BLACK);
    assert!(!machine.eraser);

    press(&mut machine, "e");
    press(&mut machine, "m");
    assert!(machine.random_color);
    assert!(!machine.eraser);
}

#[test]
fn test_brush_size_has_floor_only() {
    let mut machine = create_test_machine();
    press(&mut machine, "+");
    press(&mut machine, "=");
    assert_eq!(machine.brush_size, 6);

    for _ in 0..10 {
        press(&mut machine, "-");
    }
    assert_eq!(machine.brush_size, 1);

    for _ in 0..100 {
        machine.handle_action(Action::IncreaseBrush).unwrap();
    }
    assert_eq!(machine.brush_size, 101);

    machine.adjust_brush(i32::MIN);
    assert_eq!(machine.brush_size, 1);
}

#[test]
fn test_large_brush_from_defaults_is_kept() {
    let action_map = KeybindingsConfig::default().build_action_map().unwrap();
    let machine = DrawingMachine::with_defaults(BLUE, 80, 20, action_map);
    assert_eq!(machine.brush_size, 80);
}

#[test]
fn test_undo_redo_keys() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    step(&mut machine, None, &mut sink);
    let blank = machine.canvas().unwrap().try_clone().unwrap();

    step(&mut machine, Some(&hand_with(POINT, (0.5, 0.5))), &mut sink);
    let drawn = machine.canvas().unwrap().try_clone().unwrap();

    machine
        .on_key_press(KeyPress::with_modifiers(Key::Char('z'), Modifiers::ctrl()))
        .unwrap();
    assert!(machine.canvas().unwrap().same_pixels(&blank));
    assert_eq!(machine.history().redo_depth(), 1);

    press(&mut machine, "y");
    assert!(machine.canvas().unwrap().same_pixels(&drawn));

    // Nothing left to redo.
    assert!(!machine.redo());
}

#[test]
fn test_history_actions_before_first_frame_are_noops() {
    let mut machine = create_test_machine();
    assert!(!machine.undo());
    assert!(!machine.redo());
    machine.clear_canvas().unwrap();
    assert!(machine.canvas().is_none());
    assert_eq!(machine.history().undo_depth(), 0);
}

#[test]
fn test_unbound_key_is_ignored() {
    let mut machine = create_test_machine();
    machine.on_key_press(KeyPress::new(Key::Char('q'))).unwrap();
    machine.on_key_press(KeyPress::new(Key::Unknown)).unwrap();
    assert!(!machine.should_exit());
    assert_eq!(machine.current_color, BLUE);
}

#[test]
fn test_escape_requests_exit() {
    let mut machine = create_test_machine();
    press(&mut machine, "Escape");
    assert!(machine.should_exit());
}

#[test]
fn test_hud_swatch_shows_preview_color() {
    let mut machine = create_test_machine();
    let mut sink = RecordingSink::default();
    press(&mut machine, "r");
    let out = step(&mut machine, None, &mut sink);
    assert_eq!(out.image.pixel(35, 75), Some([255, 0, 0]));

    let out = step(&mut machine, Some(&hand_with(PALM, (0.9, 0.1))), &mut sink);
    assert_eq!(out.image.pixel(35, 75), Some([0, 0, 0]));

    machine.show_hud = false;
    let out = step(&mut machine, None, &mut sink);
    assert_eq!(out.image.pixel(35, 75), Some([0, 0, 0]));
}

#[test]
fn test_output_composites_canvas_over_frame() {
    let mut machine = create_test_machine();
    machine.show_hud = false;
    let mut sink = RecordingSink::default();
    step(&mut machine, Some(&hand_with(POINT, (0.9, 0.1))), &mut sink);

    let video = Raster::filled(100, 100, Color::from_rgb8(0, 100, 0)).unwrap();
    let out = machine.process_frame(&video, None, &mut sink).unwrap();
    assert_eq!(out.image.pixel(90, 10), Some([0, 100, 255]));
    assert_eq!(out.image.pixel(20, 80), Some([0, 100, 0]));
}

#[test]
fn test_cleared_canvas_leaves_video_untouched() {
    let mut machine = create_test_machine();
    machine.show_hud = false;
    let mut sink = RecordingSink::default();
    step(&mut machine, Some(&hand_with(POINT, (0.5, 0.5))), &mut sink);
    press(&mut machine, "c");
    press(&mut machine, "e");
    step(&mut machine, Some(&hand_with(POINT, (0.2, 0.2))), &mut sink);

    let video = Raster::filled(100, 100, Color::from_rgb8(40, 120, 200)).unwrap();
    let out = machine.process_frame(&video, None, &mut sink).unwrap();
    assert_eq!(out.image.pixel(50, 50), Some([40, 120, 200]));
    assert_eq!(out.image.pixel(20, 20), Some([40, 120, 200]));
}

#[test]
fn test_from_config_applies_drawing_and_ui_sections() {
    let mut config = crate::config::Config::default();
    config.drawing.brush_size = 9;
    config.drawing.draw_mode = false;
    config.ui.show_hud = false;
    let action_map = config.keybindings.build_action_map().unwrap();

    let machine = DrawingMachine::from_config(&config, action_map);
    assert_eq!(machine.brush_size, 9);
    assert!(!machine.draw_mode);
    assert!(!machine.show_hud);
    assert_eq!(machine.current_color, BLUE);
}
