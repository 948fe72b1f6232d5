use crate::catalog::furniture_by_kind;
use crate::compare::similarity;
use crate::error::EditorError;
use crate::model::{Color, GRID_SIZE, RoomState, TILE_SIZE};
use crate::placement::{clamp_item, footprint, grid_position_from_pointer, rotate_item};
use crate::seed;

/// Two pointer presses on an item closer than this are a double-press and
/// rotate instead of starting a drag.
pub const DOUBLE_PRESS_MS: f64 = 300.0;

/// An in-flight drag: which item and where inside its bounding box the
/// cursor grabbed it, in pixels.
#[derive(Clone, Copy, Debug)]
pub struct DragState {
    pub item: usize,
    pub grab: (f64, f64),
}

/// Everything the renderer needs to draw the room background.
#[derive(Clone, Copy, Debug)]
pub struct GridView {
    pub floor_color: Color,
    pub wall_color: Color,
    pub size: i32,
    pub tile_size: f64,
}

/// One furniture rectangle ready for direct drawing: pixel coordinates are
/// relative to the room origin, with the grid's Y flip already applied.
#[derive(Clone, Debug)]
pub struct ItemView {
    pub kind: String,
    pub width_px: f64,
    pub height_px: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub rotation_degrees: u32,
    pub color: Color,
    pub selected: bool,
}

/// The single editing session: the live room, the optional reference room
/// loaded for side-by-side comparison, the current selection, and the drag
/// state machine. Replaces what the original UI kept in ambient globals.
#[derive(Clone, Debug, Default)]
pub struct EditorSession {
    layout: RoomState,
    reference: Option<RoomState>,
    selection: Option<usize>,
    drag: Option<DragState>,
    last_press_ms: Option<f64>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(&self) -> &RoomState {
        &self.layout
    }

    pub fn reference(&self) -> Option<&RoomState> {
        self.reference.as_ref()
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn add_item(&mut self, kind: &str) -> Result<usize, EditorError> {
        self.layout.add_item(kind)
    }

    /// A press on the item at `index`. Within `DOUBLE_PRESS_MS` of the
    /// previous press this is a double-press: rotate in place and stay idle
    /// (the timer resets so a triple press does not rotate twice). Otherwise
    /// the item becomes the selection and a drag begins with the given grab
    /// offset.
    pub fn pointer_down(&mut self, index: usize, timestamp_ms: f64, local_offset: (f64, f64)) {
        if index >= self.layout.items.len() {
            return;
        }
        if let Some(last) = self.last_press_ms
            && timestamp_ms - last < DOUBLE_PRESS_MS
        {
            self.last_press_ms = None;
            self.rotate_at(index);
            return;
        }
        self.last_press_ms = Some(timestamp_ms);
        self.selection = Some(index);
        self.drag = Some(DragState {
            item: index,
            grab: local_offset,
        });
    }

    /// Repositions the dragged item under the pointer, clamped on every move
    /// so the item never leaves the grid even mid-drag.
    pub fn pointer_move(&mut self, px: f64, py: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let Some(item) = self.layout.items.get_mut(drag.item) else {
            return;
        };
        let Ok(def) = furniture_by_kind(&item.kind) else {
            return;
        };
        let fp = footprint(def, item.rotation);
        let (x, y) = grid_position_from_pointer(px, py, fp, drag.grab);
        item.x = x;
        item.y = y;
        clamp_item(item, def);
    }

    /// Ends the drag; also covers release outside the canvas. Selection
    /// persists until changed or the selected item is deleted.
    pub fn pointer_up(&mut self) {
        self.drag = None;
    }

    pub fn rotate_selected(&mut self) {
        if let Some(index) = self.selection {
            self.rotate_at(index);
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(index) = self.selection.take() else {
            return;
        };
        self.layout.remove_item(index);
        // indices after the removed item shift down, so any drag is stale
        self.drag = None;
    }

    pub fn set_floor_color(&mut self, color: Color) {
        self.layout.set_floor_color(color);
    }

    pub fn set_wall_color(&mut self, color: Color) {
        self.layout.set_wall_color(color);
    }

    pub fn generate_seed(&self) -> String {
        seed::encode(&self.layout)
    }

    /// Replaces the whole room from a seed token. All-or-nothing: on any
    /// decode failure the live room, selection and drag are untouched.
    pub fn load_seed(&mut self, token: &str) -> Result<(), EditorError> {
        let state = seed::decode(token)?;
        self.layout = state;
        self.selection = None;
        self.drag = None;
        self.last_press_ms = None;
        Ok(())
    }

    /// Scores the live room against the room a token describes.
    pub fn compare(&self, token: &str) -> Result<u8, EditorError> {
        let other = seed::decode(token)?;
        Ok(similarity(&self.layout, &other))
    }

    /// Loads a second room for side-by-side display; the live room is not
    /// affected.
    pub fn load_reference(&mut self, token: &str) -> Result<(), EditorError> {
        self.reference = Some(seed::decode(token)?);
        Ok(())
    }

    pub fn clear_reference(&mut self) {
        self.reference = None;
    }

    /// Score of the live room against the loaded reference, if any.
    pub fn reference_score(&self) -> Option<u8> {
        self.reference
            .as_ref()
            .map(|other| similarity(&self.layout, other))
    }

    pub fn grid(&self) -> GridView {
        GridView {
            floor_color: self.layout.floor_color,
            wall_color: self.layout.wall_color,
            size: GRID_SIZE,
            tile_size: TILE_SIZE,
        }
    }

    pub fn items(&self) -> Vec<ItemView> {
        Self::views(&self.layout, self.selection)
    }

    pub fn reference_items(&self) -> Vec<ItemView> {
        self.reference
            .as_ref()
            .map(|room| Self::views(room, None))
            .unwrap_or_default()
    }

    fn views(room: &RoomState, selection: Option<usize>) -> Vec<ItemView> {
        room.items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let def = furniture_by_kind(&item.kind).ok()?;
                let (w, h) = footprint(def, item.rotation);
                Some(ItemView {
                    kind: item.kind.clone(),
                    width_px: w as f64 * TILE_SIZE,
                    height_px: h as f64 * TILE_SIZE,
                    pixel_x: item.x as f64 * TILE_SIZE,
                    pixel_y: (GRID_SIZE - h - item.y) as f64 * TILE_SIZE,
                    rotation_degrees: item.rotation.degrees(),
                    color: item.color,
                    selected: selection == Some(i),
                })
            })
            .collect()
    }

    fn rotate_at(&mut self, index: usize) {
        let Some(item) = self.layout.items.get_mut(index) else {
            return;
        };
        let Ok(def) = furniture_by_kind(&item.kind) else {
            return;
        };
        rotate_item(item, def);
    }
}
