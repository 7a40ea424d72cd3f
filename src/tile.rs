//! Tile references as stored in Tiled layer data.

pub const FLIP_H: u32 = 0x8000_0000; // bit 31
pub const FLIP_V: u32 = 0x4000_0000; // bit 30
pub const FLIP_D: u32 = 0x2000_0000; // bit 29
pub const GID_MASK: u32 = 0x1FFF_FFFF; // lower 29 bits

/// Raw layer cell: a global tile id with Tiled's flip flags in the top bits.
/// `0` means the cell is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileRef(pub u32);

impl TileRef {
    pub const EMPTY: TileRef = TileRef(0);

    #[inline] pub fn raw(self) -> u32 { self.0 }
    /// Global tile id without the flip flags.
    #[inline] pub fn gid(self) -> u32 { self.0 & GID_MASK }
    #[inline] pub fn is_empty(self) -> bool { self.gid() == 0 }
    #[inline] pub fn flip_h(self) -> bool { (self.0 & FLIP_H) != 0 }
    #[inline] pub fn flip_v(self) -> bool { (self.0 & FLIP_V) != 0 }
    #[inline] pub fn flip_d(self) -> bool { (self.0 & FLIP_D) != 0 }

    /// Builds a reference from a clean gid and flip flags.
    pub fn with_flips(gid: u32, flip_h: bool, flip_v: bool, flip_d: bool) -> Self {
        let mut raw = gid & GID_MASK;
        if flip_h {
            raw |= FLIP_H;
        }
        if flip_v {
            raw |= FLIP_V;
        }
        if flip_d {
            raw |= FLIP_D;
        }
        TileRef(raw)
    }
}

impl From<u32> for TileRef {
    fn from(raw: u32) -> Self {
        TileRef(raw)
    }
}
