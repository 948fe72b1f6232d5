pub mod catalog;
pub mod compare;
pub mod error;
pub mod model;
pub mod placement;
pub mod seed;
pub mod session;

pub use catalog::{FURNITURE_CATALOG, FurnitureDef, furniture_by_kind};
pub use compare::similarity;
pub use error::EditorError;
pub use model::{Color, GRID_SIZE, Item, Rotation, RoomState, TILE_SIZE};
pub use placement::{clamp_item, footprint, grid_position_from_pointer, rotate_item};
pub use seed::{decode, encode};
pub use session::{DragState, EditorSession, GridView, ItemView};
