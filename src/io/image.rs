//! PNG export with automatic cropping and transparency handling
//!
//! Renders an assembled dungeon to a tile-per-pixel PNG, and the analysis
//! cost map to a heat gradient. Both crop to the populated bounding box
//! and keep untouched tiles transparent.

use std::path::Path;

use image::{ImageBuffer, Rgba};

use crate::analysis::costmap::{CostMap, walk_mask};
use crate::dungeon::{DungeonData, ObjectKind, RoomClass};
use crate::io::error::{GenerationError, Result, empty_dungeon};

/// Fill color for rooms by class
const fn class_color(class: RoomClass) -> [u8; 4] {
    match class {
        RoomClass::Starter => [232, 193, 84, 255],
        RoomClass::Corridor => [150, 150, 150, 255],
        RoomClass::Small => [106, 168, 79, 255],
        RoomClass::Medium => [61, 133, 198, 255],
        RoomClass::Large => [103, 78, 167, 255],
    }
}

/// Fill color for placed objects
const fn object_color(kind: ObjectKind) -> [u8; 4] {
    match kind {
        ObjectKind::StairsUp => [255, 255, 255, 255],
        ObjectKind::StairsDown => [20, 20, 20, 255],
        ObjectKind::Trap => [204, 60, 60, 255],
        _ => [139, 94, 60, 255],
    }
}

const COLOR_CORRIDOR: [u8; 4] = [128, 128, 128, 255];
const COLOR_SPINE: [u8; 4] = [90, 90, 90, 255];

/// Heat gradient color for a normalized value in `[0, 1]`
///
/// Deep blue through amber to red; used by the cost heatmap and the
/// growth replay.
pub fn heat_color(t: f64) -> [u8; 4] {
    const LOW: [u8; 4] = [26, 35, 126, 255];
    const MID: [u8; 4] = [255, 193, 7, 255];
    const HIGH: [u8; 4] = [183, 28, 28, 255];

    let t = t.clamp(0.0, 1.0);
    let (from, to, local) = if t < 0.5 {
        (LOW, MID, t * 2.0)
    } else {
        (MID, HIGH, (t - 0.5) * 2.0)
    };

    let mut color = [0u8; 4];
    for (slot, (&a, &b)) in color.iter_mut().zip(from.iter().zip(to.iter())) {
        *slot = f64::from(b).mul_add(local, f64::from(a) * (1.0 - local)) as u8;
    }
    color
}

#[derive(Debug)]
struct CropBox {
    min_x: i32,
    min_y: i32,
    width: u32,
    height: u32,
}

fn crop_to(positions: impl Iterator<Item = [i32; 2]>) -> Option<CropBox> {
    let mut min = [i32::MAX, i32::MAX];
    let mut max = [i32::MIN, i32::MIN];
    let mut any = false;
    for pos in positions {
        any = true;
        min = [min[0].min(pos[0]), min[1].min(pos[1])];
        max = [max[0].max(pos[0]), max[1].max(pos[1])];
    }
    any.then(|| CropBox {
        min_x: min[0],
        min_y: min[1],
        width: (max[0] - min[0] + 1) as u32,
        height: (max[1] - min[1] + 1) as u32,
    })
}

fn save_image(img: &ImageBuffer<Rgba<u8>, Vec<u8>>, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    img.save(output_path).map_err(|e| GenerationError::ImageExport {
        path: output_path.to_path_buf(),
        source: e,
    })
}

/// Export the assembled dungeon as a PNG map
///
/// Rooms are tinted by class, corridors and spine tiles by their own
/// shades, objects drawn on top.
///
/// # Errors
///
/// Returns an error if:
/// - The dungeon contains no tiles at all
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_dungeon_map(dungeon: &DungeonData, output_path: &Path) -> Result<()> {
    let mask = walk_mask(dungeon);
    let bbox = crop_to(mask.to_vec().into_iter())
        .ok_or_else(|| empty_dungeon(&"no tiles to render"))?;

    let mut img = ImageBuffer::new(bbox.width, bbox.height);
    let mut put = |pos: [i32; 2], rgba: [u8; 4]| {
        let x = pos[0] - bbox.min_x;
        let y = pos[1] - bbox.min_y;
        if x >= 0 && y >= 0 && (x as u32) < bbox.width && (y as u32) < bbox.height {
            img.put_pixel(x as u32, y as u32, Rgba(rgba));
        }
    };

    for &pos in &dungeon.spine_tiles {
        put(pos, COLOR_SPINE);
    }
    for corridor in &dungeon.corridors {
        for &pos in &corridor.tiles {
            put(pos, COLOR_CORRIDOR);
        }
    }
    for room in &dungeon.rooms {
        for &pos in &room.tiles {
            put(pos, class_color(room.class));
        }
    }
    for object in &dungeon.objects {
        put([object.x, object.y], object_color(object.kind));
    }

    save_image(&img, output_path)
}

/// Export the analysis cost map as a heat gradient PNG
///
/// Reachable tiles are shaded from blue (near) to red (far); walkable but
/// unreached tiles are dimmed, everything else stays transparent.
///
/// # Errors
///
/// Returns an error if:
/// - No tile is walkable
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_cost_heatmap(cost_map: &CostMap, output_path: &Path) -> Result<()> {
    let walkable = cost_map.walkable.to_vec();
    let bbox = crop_to(walkable.iter().copied())
        .ok_or_else(|| empty_dungeon(&"no walkable tiles to render"))?;

    let max_cost = walkable
        .iter()
        .filter_map(|&pos| cost_map.cost_at(pos))
        .max()
        .unwrap_or(0);

    let mut img = ImageBuffer::new(bbox.width, bbox.height);
    for pos in walkable {
        let rgba = cost_map.cost_at(pos).map_or([70, 70, 70, 255], |cost| {
            if max_cost == 0 {
                heat_color(0.0)
            } else {
                heat_color(f64::from(cost) / f64::from(max_cost))
            }
        });
        let x = (pos[0] - bbox.min_x) as u32;
        let y = (pos[1] - bbox.min_y) as u32;
        img.put_pixel(x, y, Rgba(rgba));
    }

    save_image(&img, output_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_cost_map;
    use crate::classify::ClassifierSettings;
    use crate::dungeon::generate;
    use crate::growth::GenerationSettings;

    // Confirms the heat ramp is monotone at its anchor points
    // Verified by swapping the gradient endpoints
    #[test]
    fn test_heat_color_anchors() {
        assert_eq!(heat_color(0.0), [26, 35, 126, 255]);
        assert_eq!(heat_color(1.0), [183, 28, 28, 255]);
        let mid = heat_color(0.5);
        assert_eq!(mid, [255, 193, 7, 255]);
    }

    // Confirms map export writes a file for a generated dungeon
    // Verified by skipping the save call
    #[test]
    fn test_map_export_writes_file() {
        let settings = GenerationSettings::organic(4, 24, 24, 240);
        let dungeon =
            generate(&settings, &ClassifierSettings::default()).expect("valid settings");

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("map.png");
        export_dungeon_map(&dungeon, &path).expect("export succeeds");
        assert!(path.exists());
    }

    // Confirms heatmap export writes a file from an analysis cost map
    // Verified by skipping the save call
    #[test]
    fn test_heatmap_export_writes_file() {
        let settings = GenerationSettings::organic(4, 24, 24, 240);
        let dungeon =
            generate(&settings, &ClassifierSettings::default()).expect("valid settings");
        let start = dungeon
            .stairs_up()
            .map_or([12, 12], |stairs| [stairs.x, stairs.y]);
        let cost_map = compute_cost_map(&dungeon, start);

        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested/heat.png");
        export_cost_heatmap(&cost_map, &path).expect("export succeeds");
        assert!(path.exists());
    }

    // Confirms the empty dungeon is rejected with a typed error
    // Verified by rendering a zero-sized canvas instead
    #[test]
    fn test_empty_dungeon_rejected() {
        let dungeon = DungeonData {
            grid_width: 8,
            grid_height: 8,
            rooms: Vec::new(),
            corridors: Vec::new(),
            connections: Vec::new(),
            objects: Vec::new(),
            spine_tiles: Vec::new(),
            seed: 0,
        };
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("empty.png");
        assert!(export_dungeon_map(&dungeon, &path).is_err());
        assert!(!path.exists());
    }
}
