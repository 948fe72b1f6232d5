use serde::{Deserialize, Serialize};

use crate::catalog::furniture_by_kind;
use crate::error::EditorError;

/// Room edge length in grid cells.
pub const GRID_SIZE: i32 = 5;
/// Edge length of one grid cell in pixels.
pub const TILE_SIZE: f64 = 64.0;

/// Packed `0xRRGGBB` color. Serialized as the bare integer so seeds stay
/// compact and match the historical JSON layout format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(pub u32);

impl Color {
    /// CSS hex string for canvas fill/stroke styles.
    pub fn css(&self) -> String {
        format!("#{:06x}", self.0 & 0xff_ff_ff)
    }
}

/// Quarter-turn rotation. The closed set is enforced here once, at
/// construction and decode time, instead of ad hoc at every use site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    pub fn from_degrees(deg: u32) -> Result<Self, EditorError> {
        match deg {
            0 => Ok(Rotation::R0),
            90 => Ok(Rotation::R90),
            180 => Ok(Rotation::R180),
            270 => Ok(Rotation::R270),
            other => Err(EditorError::InvalidRotation(other)),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }

    /// One quarter turn counter-clockwise, wrapping 270 back to 0.
    pub fn turned(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R90,
            Rotation::R90 => Rotation::R180,
            Rotation::R180 => Rotation::R270,
            Rotation::R270 => Rotation::R0,
        }
    }

    /// Whether this rotation swaps the catalog footprint's width and height.
    pub fn swaps_footprint(self) -> bool {
        matches!(self, Rotation::R90 | Rotation::R270)
    }
}

impl TryFrom<u32> for Rotation {
    type Error = EditorError;

    fn try_from(deg: u32) -> Result<Self, Self::Error> {
        Rotation::from_degrees(deg)
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> u32 {
        rotation.degrees()
    }
}

/// One placed furniture item. `x`/`y` are the grid cell of the rotated
/// bounding box's lower-left corner. Field declaration order is the canonical
/// seed field order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "type")]
    pub kind: String,
    pub x: i32,
    pub y: i32,
    pub rotation: Rotation,
    pub color: Color,
}

/// Full editable state of one room. Item order is z-order for rendering and
/// part of the canonical serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomState {
    pub floor_color: Color,
    pub wall_color: Color,
    pub items: Vec<Item>,
}

impl Default for RoomState {
    fn default() -> Self {
        Self {
            floor_color: Color(0xffffff),
            wall_color: Color(0xdddddd),
            items: Vec::new(),
        }
    }
}

impl RoomState {
    /// Appends a new item of `kind` at (0,0), rotation 0, with the catalog's
    /// default color. Returns the index of the appended item.
    pub fn add_item(&mut self, kind: &str) -> Result<usize, EditorError> {
        let def = furniture_by_kind(kind)?;
        self.items.push(Item {
            kind: def.kind.to_string(),
            x: 0,
            y: 0,
            rotation: Rotation::R0,
            color: def.default_color,
        });
        Ok(self.items.len() - 1)
    }

    /// Removes the item at `index`; no-op when out of range.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.items.len() {
            self.items.remove(index);
        }
    }

    pub fn set_floor_color(&mut self, color: Color) {
        self.floor_color = color;
    }

    pub fn set_wall_color(&mut self, color: Color) {
        self.wall_color = color;
    }
}
