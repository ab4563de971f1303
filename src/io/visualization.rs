//! Growth replay GIF export
//!
//! Replays a completed run's growth order into animation frames, one tile
//! per event, with automatic frame skipping so the output stays within
//! what GIF viewers actually render. Tiles are tinted by how late they
//! grew, turning the replay into an animated heatmap of the run.

use std::path::Path;

use image::{Frame, Rgba, RgbaImage};

use crate::io::configuration::VIEWER_MIN_FRAME_DELAY_MS;
use crate::io::error::{GenerationError, Result, empty_dungeon};
use crate::io::image::heat_color;
use crate::spatial::GridState;

/// Replayable record of a completed growth run
pub struct GrowthReplay {
    /// Grown positions sorted by growth order
    placements: Vec<[i32; 2]>,
    min: [i32; 2],
    size: (usize, usize),
}

impl GrowthReplay {
    /// Capture the replay from a grown grid
    ///
    /// Growth order is recovered from the grid's per-tile stamps, so any
    /// completed (or partially grown) grid can be replayed after the
    /// fact without recording during the run.
    pub fn from_grid(grid: &GridState) -> Self {
        let mut ordered: Vec<(u32, [i32; 2])> = grid
            .grown_tiles()
            .into_iter()
            .map(|pos| (grid.growth_order_at(pos), pos))
            .collect();
        ordered.sort_unstable();

        let mut min = [i32::MAX, i32::MAX];
        let mut max = [i32::MIN, i32::MIN];
        for &(_, pos) in &ordered {
            min = [min[0].min(pos[0]), min[1].min(pos[1])];
            max = [max[0].max(pos[0]), max[1].max(pos[1])];
        }
        let size = if ordered.is_empty() {
            (0, 0)
        } else {
            (
                (max[0] - min[0] + 1) as usize,
                (max[1] - min[1] + 1) as usize,
            )
        };

        Self {
            placements: ordered.into_iter().map(|(_, pos)| pos).collect(),
            min,
            size,
        }
    }

    /// Number of recorded growth events
    pub const fn placement_count(&self) -> usize {
        self.placements.len()
    }

    /// Export the replay as a GIF with automatic frame skipping
    ///
    /// Skips frames when the requested delay is below what viewers
    /// reliably support, keeping the apparent speed while dropping the
    /// frame count.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No growth was captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(&self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.placements.is_empty() {
            return Err(empty_dungeon(&"no growth captured for replay"));
        }

        let effective_delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let frames = self.generate_frames(effective_delay_ms, skip_factor);

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GenerationError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| GenerationError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| GenerationError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    fn generate_frames(&self, delay_ms: u32, skip_factor: usize) -> Vec<Frame> {
        let total = self.placements.len();
        let mut canvas = RgbaImage::new(self.size.0 as u32, self.size.1 as u32);
        let mut frames = vec![render_frame(&canvas, delay_ms)];

        for (event, &pos) in self.placements.iter().enumerate() {
            let tint = heat_color(event as f64 / total.max(1) as f64);
            let x = (pos[0] - self.min[0]) as u32;
            let y = (pos[1] - self.min[1]) as u32;
            if x < canvas.width() && y < canvas.height() {
                canvas.put_pixel(x, y, Rgba(tint));
            }

            if (event + 1) % skip_factor == 0 {
                frames.push(render_frame(&canvas, delay_ms));
            }
        }

        if total % skip_factor != 0 {
            frames.push(render_frame(&canvas, delay_ms));
        }

        // Final frame displays longer for better visibility
        let final_frame_delay = delay_ms * 25;
        if let Some(last) = frames.last().map(|frame| frame.buffer().clone()) {
            frames.push(Frame::from_parts(
                last,
                0,
                0,
                image::Delay::from_numer_denom_ms(final_frame_delay, 1),
            ));
        }

        frames
    }
}

fn render_frame(canvas: &RgbaImage, delay_ms: u32) -> Frame {
    Frame::from_parts(
        canvas.clone(),
        0,
        0,
        image::Delay::from_numer_denom_ms(delay_ms, 1),
    )
}
