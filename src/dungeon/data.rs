//! Core dungeon data structures
//!
//! Every consumer that classifies rooms by size goes through
//! [`room_class_for`] so the tier thresholds stay consistent across the
//! classifier, the assembler and any downstream content placement.

use std::collections::HashMap;

use crate::io::configuration::{
    DOOR_SURCHARGE_HEAVY, DOOR_SURCHARGE_SECRET, ROOM_LARGE_MIN_AREA, ROOM_SMALL_MAX_AREA,
};

/// Semantic size tier of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomClass {
    /// The room the exploration starts in
    Starter,
    /// Degenerate room reading as a passage
    Corridor,
    /// Area of at most 6 tiles
    Small,
    /// Between small and large
    Medium,
    /// Area of at least 32 tiles
    Large,
}

/// Size tier for a room with the given bounding box and area
///
/// The thresholds are shared crate-wide; reuse this wherever room size is
/// classified so tiers never drift apart.
pub const fn room_class_for(width: usize, height: usize, area: usize) -> RoomClass {
    if width == 1 || height == 1 {
        RoomClass::Corridor
    } else if area <= ROOM_SMALL_MAX_AREA {
        RoomClass::Small
    } else if area >= ROOM_LARGE_MIN_AREA {
        RoomClass::Large
    } else {
        RoomClass::Medium
    }
}

/// A classified room
///
/// Tiles of distinct rooms are disjoint. The centroid is the rounded tile
/// average and may fall outside the room for concave shapes; consumers
/// needing an in-room tile must fall back to the tile list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    /// Stable room identifier, dense from 0
    pub id: usize,
    /// Tile positions belonging to the room
    pub tiles: Vec<[i32; 2]>,
    /// Rounded average of the tile positions
    pub centroid: [i32; 2],
    /// Size tier
    pub class: RoomClass,
}

impl Room {
    /// Build a room from its tiles, deriving centroid and size tier
    pub fn from_tiles(id: usize, tiles: Vec<[i32; 2]>) -> Self {
        let centroid = centroid_of(&tiles);
        let (width, height) = bounding_size(&tiles);
        let class = room_class_for(width, height, tiles.len());
        Self {
            id,
            tiles,
            centroid,
            class,
        }
    }

    /// Number of tiles in the room
    pub const fn area(&self) -> usize {
        self.tiles.len()
    }

    /// Whether a position belongs to this room
    pub fn contains(&self, pos: [i32; 2]) -> bool {
        self.tiles.contains(&pos)
    }
}

/// A corridor segment of the walk network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corridor {
    /// Stable corridor identifier, dense from 0
    pub id: usize,
    /// Tile positions belonging to the segment
    pub tiles: Vec<[i32; 2]>,
    /// Widest passage of the segment, in tiles
    pub width: usize,
}

/// An adjacency between two rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Connection {
    /// Lower room id of the pair
    pub room_a: usize,
    /// Higher room id of the pair
    pub room_b: usize,
    /// Corridor carrying the connection; `None` for direct adjacency
    pub via_corridor: Option<usize>,
}

/// Kind of a placed dungeon object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// Open archway, free passage
    DoorArchway,
    /// Plain door, free passage
    DoorPlain,
    /// Locked door
    DoorLocked,
    /// Barred door
    DoorBarred,
    /// Portcullis
    DoorPortcullis,
    /// Secret door
    DoorSecret,
    /// Exploration entry point
    StairsUp,
    /// Exploration exit point
    StairsDown,
    /// Floor trap
    Trap,
}

impl ObjectKind {
    /// Whether this object is a door variant
    pub const fn is_door(self) -> bool {
        matches!(
            self,
            Self::DoorArchway
                | Self::DoorPlain
                | Self::DoorLocked
                | Self::DoorBarred
                | Self::DoorPortcullis
                | Self::DoorSecret
        )
    }

    /// Movement surcharge a traversal pays for crossing this object
    ///
    /// Secret doors cost the most, heavy doors (locked, barred,
    /// portcullis) a moderate amount, everything else nothing.
    pub const fn door_surcharge(self) -> u32 {
        match self {
            Self::DoorSecret => DOOR_SURCHARGE_SECRET,
            Self::DoorLocked | Self::DoorBarred | Self::DoorPortcullis => DOOR_SURCHARGE_HEAVY,
            _ => 0,
        }
    }
}

/// A placed dungeon object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DungeonObject {
    /// Object kind
    pub kind: ObjectKind,
    /// Tile x coordinate
    pub x: i32,
    /// Tile y coordinate
    pub y: i32,
    /// Rotation in degrees, multiples of 90
    pub rotation: u16,
    /// Free-form properties for downstream theming
    pub properties: HashMap<String, String>,
}

/// Immutable snapshot of one generated dungeon
///
/// Produced once per generation cycle; analysis and visibility read it
/// without ever mutating it.
#[derive(Debug, Clone, PartialEq)]
pub struct DungeonData {
    /// Grid width in tiles
    pub grid_width: usize,
    /// Grid height in tiles
    pub grid_height: usize,
    /// Classified rooms
    pub rooms: Vec<Room>,
    /// Corridor segments
    pub corridors: Vec<Corridor>,
    /// Room adjacencies
    pub connections: Vec<Connection>,
    /// Placed objects
    pub objects: Vec<DungeonObject>,
    /// Backbone tiles when the spine variant generated this dungeon
    pub spine_tiles: Vec<[i32; 2]>,
    /// Seed the dungeon was generated from
    pub seed: u64,
}

impl DungeonData {
    /// The stairs-up object, if one was placed
    pub fn stairs_up(&self) -> Option<&DungeonObject> {
        self.objects
            .iter()
            .find(|object| object.kind == ObjectKind::StairsUp)
    }

    /// First object at a position, if any
    pub fn object_at(&self, pos: [i32; 2]) -> Option<&DungeonObject> {
        self.objects
            .iter()
            .find(|object| [object.x, object.y] == pos)
    }

    /// Room by id
    pub fn room(&self, id: usize) -> Option<&Room> {
        self.rooms.get(id)
    }
}

/// Rounded average position of a tile set
fn centroid_of(tiles: &[[i32; 2]]) -> [i32; 2] {
    if tiles.is_empty() {
        return [0, 0];
    }
    let n = tiles.len() as f64;
    let sum_x: i64 = tiles.iter().map(|pos| i64::from(pos[0])).sum();
    let sum_y: i64 = tiles.iter().map(|pos| i64::from(pos[1])).sum();
    [
        (sum_x as f64 / n).round() as i32,
        (sum_y as f64 / n).round() as i32,
    ]
}

/// Bounding box dimensions of a tile set
fn bounding_size(tiles: &[[i32; 2]]) -> (usize, usize) {
    if tiles.is_empty() {
        return (0, 0);
    }
    let mut min = [i32::MAX, i32::MAX];
    let mut max = [i32::MIN, i32::MIN];
    for pos in tiles {
        min = [min[0].min(pos[0]), min[1].min(pos[1])];
        max = [max[0].max(pos[0]), max[1].max(pos[1])];
    }
    (
        (max[0] - min[0] + 1) as usize,
        (max[1] - min[1] + 1) as usize,
    )
}
