use crate::model::RoomState;

/// Percentage similarity between two rooms, 0..=100.
///
/// Each item of `a` scores when *any* item of `b` equals it on every field;
/// matching is existence-based, not bijective, so one `b` item may satisfy
/// several `a` items. Floor and wall color each contribute one more point,
/// and the denominator is `max(|a|, |b|, 1) + 2`.
pub fn similarity(a: &RoomState, b: &RoomState) -> u8 {
    let total = a.items.len().max(b.items.len()).max(1) + 2;
    let mut matches = 0usize;
    for item in &a.items {
        if b.items.iter().any(|other| other == item) {
            matches += 1;
        }
    }
    if a.floor_color == b.floor_color {
        matches += 1;
    }
    if a.wall_color == b.wall_color {
        matches += 1;
    }
    (100.0 * matches as f64 / total as f64).round() as u8
}
