//! Map-global tile ids.
//!
//! A `.tmx` layer stores each cell as a GID: the tileset's `first_gid` plus
//! the local tile id, with flip/rotation flags packed into the top four bits.

/// Horizontal flip flag.
pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
/// Vertical flip flag.
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
/// Anti-diagonal flip flag (rotation for orthogonal maps).
pub const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;
/// 120° rotation flag (hexagonal maps only).
pub const ROTATED_HEXAGONAL_120: u32 = 0x1000_0000;

const FLAG_MASK: u32 =
    FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY | ROTATED_HEXAGONAL_120;

/// A raw GID split into id and flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileGid {
    id: u32,
    flags: u32,
}

impl TileGid {
    pub fn from_raw(raw: u32) -> Self {
        Self {
            id: raw & !FLAG_MASK,
            flags: raw & FLAG_MASK,
        }
    }

    /// GID without flags. Zero means an empty cell.
    #[inline]
    pub fn id(self) -> u32 {
        self.id
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.id == 0
    }

    /// Local id within the tileset starting at `first_gid`.
    ///
    /// `None` for empty cells and GIDs belonging to an earlier tileset.
    pub fn local_id(self, first_gid: u32) -> Option<u32> {
        if self.is_empty() {
            return None;
        }
        self.id.checked_sub(first_gid)
    }

    pub fn flipped_h(self) -> bool {
        self.flags & FLIPPED_HORIZONTALLY != 0
    }

    pub fn flipped_v(self) -> bool {
        self.flags & FLIPPED_VERTICALLY != 0
    }

    pub fn flipped_d(self) -> bool {
        self.flags & FLIPPED_DIAGONALLY != 0
    }

    pub fn rotated_hex_120(self) -> bool {
        self.flags & ROTATED_HEXAGONAL_120 != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_gid() {
        let gid = TileGid::from_raw(9);
        assert_eq!(gid.id(), 9);
        assert!(!gid.flipped_h() && !gid.flipped_v() && !gid.flipped_d());
        assert_eq!(gid.local_id(1), Some(8));
    }

    #[test]
    fn test_flags_are_stripped() {
        let gid = TileGid::from_raw(7 | FLIPPED_HORIZONTALLY | FLIPPED_DIAGONALLY);
        assert_eq!(gid.id(), 7);
        assert!(gid.flipped_h());
        assert!(!gid.flipped_v());
        assert!(gid.flipped_d());
        assert!(!gid.rotated_hex_120());
        assert_eq!(gid.local_id(1), Some(6));
    }

    #[test]
    fn test_empty_and_foreign_gids() {
        assert_eq!(TileGid::from_raw(0).local_id(1), None);
        assert_eq!(TileGid::from_raw(FLIPPED_VERTICALLY).local_id(1), None);
        // Belongs to a tileset that starts before ours.
        assert_eq!(TileGid::from_raw(40).local_id(65), None);
        assert_eq!(TileGid::from_raw(65).local_id(65), Some(0));
    }
}
