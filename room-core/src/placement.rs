use crate::catalog::FurnitureDef;
use crate::model::{GRID_SIZE, Item, Rotation, TILE_SIZE};

/// Rotation-adjusted footprint of a furniture definition, in grid cells.
pub fn footprint(def: &FurnitureDef, rotation: Rotation) -> (i32, i32) {
    if rotation.swaps_footprint() {
        (def.height, def.width)
    } else {
        (def.width, def.height)
    }
}

/// Clamps one axis coordinate so an extent of `extent` cells stays inside the
/// grid. An item wider than the whole grid clamps to 0 and overhangs; that
/// degenerate placement is tolerated rather than rejected.
pub fn clamp_axis(v: i32, extent: i32) -> i32 {
    v.clamp(0, (GRID_SIZE - extent).max(0))
}

/// Clamps the item's position so its rotated bounding box stays in bounds.
pub fn clamp_item(item: &mut Item, def: &FurnitureDef) {
    let (w, h) = footprint(def, item.rotation);
    item.x = clamp_axis(item.x, w);
    item.y = clamp_axis(item.y, h);
}

/// Advances the item one quarter turn and re-clamps; the turn may swap the
/// footprint and invalidate the previous position.
pub fn rotate_item(item: &mut Item, def: &FurnitureDef) {
    item.rotation = item.rotation.turned();
    clamp_item(item, def);
}

/// Maps a room-origin-relative pointer position to the grid cell of the
/// dragged item's lower-left corner. Grid row 0 is the bottom row while
/// pointer Y grows downward, so the vertical axis flips; `grab` is the
/// cursor's offset inside the item's bounding box captured at drag start.
/// The result still needs `clamp_item`.
pub fn grid_position_from_pointer(
    px: f64,
    py: f64,
    footprint: (i32, i32),
    grab: (f64, f64),
) -> (i32, i32) {
    let col = ((px - grab.0) / TILE_SIZE).round() as i32;
    let row = ((py - grab.1) / TILE_SIZE).round() as i32;
    (col, GRID_SIZE - footprint.1 - row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::furniture_by_kind;
    use crate::model::Color;

    fn bed_at(x: i32, y: i32, rotation: Rotation) -> Item {
        Item {
            kind: "bed".to_string(),
            x,
            y,
            rotation,
            color: Color(0xff4444),
        }
    }

    #[test]
    fn footprint_swaps_on_quarter_turns() {
        let bed = furniture_by_kind("bed").unwrap();
        assert_eq!(footprint(bed, Rotation::R0), (2, 1));
        assert_eq!(footprint(bed, Rotation::R90), (1, 2));
        assert_eq!(footprint(bed, Rotation::R180), (2, 1));
        assert_eq!(footprint(bed, Rotation::R270), (1, 2));
    }

    #[test]
    fn clamp_moves_overhanging_bed_back_in() {
        // bed at x=4 overhangs a 5-wide grid by one cell; clamp to x=3
        let bed = furniture_by_kind("bed").unwrap();
        let mut item = bed_at(4, 0, Rotation::R0);
        clamp_item(&mut item, bed);
        assert_eq!((item.x, item.y), (3, 0));
    }

    #[test]
    fn clamp_is_idempotent() {
        let bed = furniture_by_kind("bed").unwrap();
        for x in -3..8 {
            for y in -3..8 {
                let mut once = bed_at(x, y, Rotation::R90);
                clamp_item(&mut once, bed);
                let mut twice = once.clone();
                clamp_item(&mut twice, bed);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn oversize_footprint_clamps_to_origin() {
        let wardrobe = FurnitureDef {
            kind: "wardrobe",
            width: GRID_SIZE + 2,
            height: 1,
            default_color: Color(0x000000),
        };
        let mut item = Item {
            kind: "wardrobe".to_string(),
            x: 3,
            y: 0,
            rotation: Rotation::R0,
            color: Color(0x000000),
        };
        clamp_item(&mut item, &wardrobe);
        assert_eq!(item.x, 0);
    }

    #[test]
    fn four_turns_restore_rotation_and_footprint() {
        let bed = furniture_by_kind("bed").unwrap();
        let mut item = bed_at(1, 1, Rotation::R0);
        let original = item.clone();
        for _ in 0..4 {
            rotate_item(&mut item, bed);
        }
        assert_eq!(item.rotation, original.rotation);
        assert_eq!(
            footprint(bed, item.rotation),
            footprint(bed, original.rotation)
        );
    }

    #[test]
    fn turning_a_corner_bed_keeps_it_in_bounds() {
        // 2x1 bed at (0,0) turned once becomes 1x2, still valid at (0,0)
        let bed = furniture_by_kind("bed").unwrap();
        let mut item = bed_at(0, 0, Rotation::R0);
        rotate_item(&mut item, bed);
        assert_eq!(item.rotation, Rotation::R90);
        assert_eq!((item.x, item.y), (0, 0));
    }

    #[test]
    fn pointer_maps_bottom_left_cell() {
        // pointer at the top-left pixel of the bottom-left cell, no grab offset
        let (x, y) = grid_position_from_pointer(0.0, 4.0 * TILE_SIZE, (1, 1), (0.0, 0.0));
        assert_eq!((x, y), (0, 0));
    }

    #[test]
    fn pointer_rounds_to_nearest_cell_and_honors_grab() {
        let grab = (10.0, 6.0);
        let (x, y) = grid_position_from_pointer(
            2.0 * TILE_SIZE + grab.0 + 5.0,
            1.0 * TILE_SIZE + grab.1 - 3.0,
            (2, 1),
            grab,
        );
        assert_eq!(x, 2);
        // row 1 of pointer space is grid y = 5 - 1 - 1 = 3
        assert_eq!(y, 3);
    }
}
