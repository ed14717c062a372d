#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering for zombie pursuit adapters.
//!
//! Frames are plain strings with one character per cell and one line per row,
//! suitable for terminals and snapshot comparisons.

use zombie_pursuit_core::DistanceField;
use zombie_pursuit_world::{query, query::CellContents, World};

/// Character drawn for an empty cell.
pub const EMPTY_GLYPH: char = '.';
/// Character drawn for an obstacle cell.
pub const OBSTACLE_GLYPH: char = '#';
/// Character drawn for a cell holding humans only.
pub const HUMAN_GLYPH: char = 'H';
/// Character drawn for a cell holding zombies only.
pub const ZOMBIE_GLYPH: char = 'Z';
/// Character drawn for a cell shared by humans and zombies.
pub const CONTESTED_GLYPH: char = 'X';
/// Character drawn for a field cell no source reached.
pub const UNREACHED_GLYPH: char = '-';
/// Character drawn for a reached field cell whose distance exceeds one digit.
pub const FAR_GLYPH: char = '*';

const DIGIT_RADIX: u32 = 36;

/// Maps the contents of a cell to its glyph.
#[must_use]
pub const fn glyph(contents: CellContents) -> char {
    match contents {
        CellContents::Empty => EMPTY_GLYPH,
        CellContents::Obstacle => OBSTACLE_GLYPH,
        CellContents::Humans => HUMAN_GLYPH,
        CellContents::Zombies => ZOMBIE_GLYPH,
        CellContents::Contested => CONTESTED_GLYPH,
    }
}

/// Draws the obstacles and agents of the world.
#[must_use]
pub fn render_world(world: &World) -> String {
    let (_, columns) = world.dimensions();
    let glyphs: Vec<char> = query::cell_contents(world).into_iter().map(glyph).collect();
    join_rows(&glyphs, columns)
}

/// Draws a distance field with one base-36 digit per cell.
///
/// Unreached cells use [`UNREACHED_GLYPH`] and distances past `z` use
/// [`FAR_GLYPH`].
#[must_use]
pub fn render_field(field: &DistanceField) -> String {
    let sentinel = field.sentinel();
    let glyphs: Vec<char> = field
        .cells()
        .iter()
        .map(|&distance| {
            if distance >= sentinel {
                UNREACHED_GLYPH
            } else {
                char::from_digit(distance, DIGIT_RADIX).unwrap_or(FAR_GLYPH)
            }
        })
        .collect();
    join_rows(&glyphs, field.columns())
}

fn join_rows(glyphs: &[char], columns: u32) -> String {
    let width = usize::try_from(columns).unwrap_or(0);
    if width == 0 {
        return String::new();
    }

    let mut frame = String::with_capacity(glyphs.len() + glyphs.len() / width);
    for row in glyphs.chunks(width) {
        frame.extend(row);
        frame.push('\n');
    }
    frame
}
