//! Helpers for writing replay recordings in integration tests.

#![allow(dead_code)]

pub const POINT: [bool; 5] = [false, true, false, false, false];
pub const PALM: [bool; 5] = [true, true, true, true, true];
pub const THUMB: [bool; 5] = [true, false, false, false, false];

/// 21 landmarks forming the given extension pattern, with the index
/// fingertip at `tip` (normalized coordinates).
pub fn hand_points(fingers: [bool; 5], tip: (f32, f32)) -> Vec<[f32; 3]> {
    let mut points = vec![[0.5, 0.8, 0.0]; 21];
    points[3] = [0.5, 0.6, 0.0];
    points[4] = [if fingers[0] { 0.4 } else { 0.6 }, 0.6, 0.0];
    for (digit, tip_index) in [8usize, 12, 16, 20].into_iter().enumerate() {
        let digit = digit + 1;
        let x = 0.3 + 0.1 * digit as f32;
        points[tip_index - 2] = [x, 0.5, 0.0];
        points[tip_index] = [x, if fingers[digit] { 0.3 } else { 0.7 }, 0.0];
    }
    points[8] = [tip.0, tip.1, 0.0];
    points[6][1] = if fingers[1] { tip.1 + 0.05 } else { tip.1 - 0.05 };
    points
}

/// One JSON-lines record.
pub fn frame_line(hand: Option<([bool; 5], (f32, f32))>, keys: &[&str]) -> String {
    let hand = match hand {
        Some((fingers, tip)) => serde_json::to_value(hand_points(fingers, tip)).unwrap(),
        None => serde_json::Value::Null,
    };
    serde_json::json!({ "hand": hand, "keys": keys }).to_string()
}

pub fn recording(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
