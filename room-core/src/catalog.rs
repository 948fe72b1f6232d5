use crate::error::EditorError;
use crate::model::Color;

/// Unrotated footprint and default color of one furniture kind.
/// Entries are fixed at build time; the catalog is read-only configuration.
#[derive(Clone, Copy, Debug)]
pub struct FurnitureDef {
    pub kind: &'static str,
    pub width: i32,
    pub height: i32,
    pub default_color: Color,
}

pub const FURNITURE_CATALOG: &[FurnitureDef] = &[
    FurnitureDef {
        kind: "bed",
        width: 2,
        height: 1,
        default_color: Color(0xff4444),
    },
    FurnitureDef {
        kind: "table",
        width: 1,
        height: 1,
        default_color: Color(0x4444ff),
    },
    FurnitureDef {
        kind: "chair",
        width: 1,
        height: 1,
        default_color: Color(0x44aa44),
    },
];

/// Kinds are canonical lowercase slugs; lookup trims surrounding whitespace
/// but is otherwise exact.
pub fn furniture_by_kind(kind: &str) -> Result<&'static FurnitureDef, EditorError> {
    let trimmed = kind.trim();
    FURNITURE_CATALOG
        .iter()
        .find(|def| def.kind == trimmed)
        .ok_or_else(|| EditorError::UnknownItemType(kind.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_kinds_resolve() {
        let bed = furniture_by_kind("bed").unwrap();
        assert_eq!((bed.width, bed.height), (2, 1));
        assert!(furniture_by_kind(" table ").is_ok());
    }

    #[test]
    fn unknown_kind_is_reported_with_its_name() {
        match furniture_by_kind("sofa") {
            Err(EditorError::UnknownItemType(kind)) => assert_eq!(kind, "sofa"),
            other => panic!("expected UnknownItemType, got {other:?}"),
        }
    }
}
