//! Orthogonal directions and mirror axes for grid growth

/// One of the four orthogonal growth directions
///
/// Positions use `[x, y]` with `y` increasing downward, so `North` points
/// toward smaller `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward smaller `y`
    North,
    /// Toward larger `x`
    East,
    /// Toward larger `y`
    South,
    /// Toward smaller `x`
    West,
}

/// Axis a symmetric generation mirrors across
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymmetryAxis {
    /// Mirror left/right: `x` maps to `width - 1 - x`
    Vertical,
    /// Mirror top/bottom: `y` maps to `height - 1 - y`
    Horizontal,
}

impl Direction {
    /// All directions in frontier scan order
    ///
    /// The order is part of the deterministic contract: frontier insertion
    /// and therefore parent assignment follow it.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Unit offset `[dx, dy]` of this direction
    pub const fn offset(self) -> [i32; 2] {
        match self {
            Self::North => [0, -1],
            Self::East => [1, 0],
            Self::South => [0, 1],
            Self::West => [-1, 0],
        }
    }

    /// Direction of the unit step from one tile to an orthogonal neighbor
    ///
    /// Returns `None` when the tiles are not orthogonally adjacent.
    pub const fn between(from: [i32; 2], to: [i32; 2]) -> Option<Self> {
        match [to[0] - from[0], to[1] - from[1]] {
            [0, -1] => Some(Self::North),
            [1, 0] => Some(Self::East),
            [0, 1] => Some(Self::South),
            [-1, 0] => Some(Self::West),
            _ => None,
        }
    }

    /// Directions perpendicular to this one
    pub const fn perpendicular(self) -> [Self; 2] {
        match self {
            Self::North | Self::South => [Self::East, Self::West],
            Self::East | Self::West => [Self::North, Self::South],
        }
    }

    /// The direction a mirrored growth event propagates in
    pub const fn mirrored(self, axis: SymmetryAxis) -> Self {
        match (axis, self) {
            (SymmetryAxis::Vertical, Self::East) => Self::West,
            (SymmetryAxis::Vertical, Self::West) => Self::East,
            (SymmetryAxis::Horizontal, Self::North) => Self::South,
            (SymmetryAxis::Horizontal, Self::South) => Self::North,
            (_, keep) => keep,
        }
    }

    /// Compact encoding for grid storage, `1..=4`
    pub const fn encode(self) -> u8 {
        match self {
            Self::North => 1,
            Self::East => 2,
            Self::South => 3,
            Self::West => 4,
        }
    }

    /// Decode a stored direction; `0` means none
    pub const fn decode(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::North),
            2 => Some(Self::East),
            3 => Some(Self::South),
            4 => Some(Self::West),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Confirms offsets and between() are inverses of each other
    // Verified by transposing the offset table
    #[test]
    fn test_offset_between_roundtrip() {
        for dir in Direction::ALL {
            let [dx, dy] = dir.offset();
            assert_eq!(Direction::between([3, 3], [3 + dx, 3 + dy]), Some(dir));
        }
        assert_eq!(Direction::between([0, 0], [1, 1]), None);
        assert_eq!(Direction::between([0, 0], [0, 0]), None);
    }

    // Confirms mirroring flips only the component crossing the axis
    // Verified by flipping the perpendicular component instead
    #[test]
    fn test_mirrored() {
        assert_eq!(
            Direction::East.mirrored(SymmetryAxis::Vertical),
            Direction::West
        );
        assert_eq!(
            Direction::North.mirrored(SymmetryAxis::Vertical),
            Direction::North
        );
        assert_eq!(
            Direction::North.mirrored(SymmetryAxis::Horizontal),
            Direction::South
        );
        assert_eq!(
            Direction::West.mirrored(SymmetryAxis::Horizontal),
            Direction::West
        );
    }

    // Confirms the storage encoding round-trips and reserves zero for none
    // Verified by shifting the decode table by one
    #[test]
    fn test_encode_decode() {
        assert_eq!(Direction::decode(0), None);
        for dir in Direction::ALL {
            assert_eq!(Direction::decode(dir.encode()), Some(dir));
        }
    }
}
