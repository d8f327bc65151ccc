#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure codec converting comma-encoded integer sequences into grids.

use std::fmt::Display;

use cell_society_core::{CodecError, Grid, FIELD_SEPARATOR};

/// Parses a comma-encoded sequence of integers.
///
/// Whitespace around tokens is ignored and a single trailing separator is
/// tolerated. Empty text yields an empty sequence.
pub fn parse_values(text: &str) -> Result<Vec<i32>, CodecError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let body = trimmed.strip_suffix(FIELD_SEPARATOR).unwrap_or(trimmed);
    body.split(FIELD_SEPARATOR)
        .enumerate()
        .map(|(position, token)| {
            let token = token.trim();
            token
                .parse::<i32>()
                .map_err(|_| CodecError::MalformedEncoding {
                    token: token.to_owned(),
                    position,
                })
        })
        .collect()
}

/// Decodes `text` into a grid `width` columns wide and `height` rows tall.
///
/// Values fill the grid row by row. The sequence must contain exactly
/// `width * height` values.
pub fn decode(text: &str, width: u32, height: u32) -> Result<Grid<i32>, CodecError> {
    let values = parse_values(text)?;
    Grid::from_row_major(width, height, values)
}

/// Encodes a grid as comma-joined values in row-major order.
#[must_use]
pub fn encode<T: Display>(grid: &Grid<T>) -> String {
    grid.cells()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(&FIELD_SEPARATOR.to_string())
}
