//! Required-dimension estimation per venue topology
//!
//! Each topology arranges its sections around a fixed centerpiece (field,
//! screen, stage) or, for generic venues, in a near-square grid. The
//! estimator only needs the outer bounding size, so no per-seat geometry is
//! ever built.

use crate::config::LayoutConstants;
use crate::domain::core::Size;
use crate::domain::seat_map::{SeatMapDescription, SectionGeometry, Topology};

/// Natural size of a seat map before any scaling
///
/// An empty map needs no space at all, whatever its topology.
///
/// # Example
/// ```rust
/// use seatmap_viewport::config::LayoutConstants;
/// use seatmap_viewport::domain::layout::required_size;
/// use seatmap_viewport::domain::seat_map::{SeatMapDescription, SectionGeometry, Topology};
///
/// let map = SeatMapDescription::new(Topology::Cinema, vec![SectionGeometry::new("A", 10, 15)]);
/// let size = required_size(&map, &LayoutConstants::default());
/// assert_eq!((size.width, size.height), (500.0, 540.0));
/// ```
pub fn required_size(map: &SeatMapDescription, constants: &LayoutConstants) -> Size {
    if map.is_empty() {
        return Size::zero();
    }

    match map.topology {
        Topology::Stadium => stadium_size(map, constants),
        Topology::Cinema => stacked_size(
            &map.sections,
            constants,
            StackedVenue {
                front_width: constants.cinema_screen_width,
                extra_width: constants.cinema_extra_width,
                section_gap: constants.cinema_section_gap,
                extra_height: constants.cinema_extra_height,
            },
        ),
        Topology::Theater => stacked_size(
            &map.sections,
            constants,
            StackedVenue {
                front_width: constants.theater_stage_width,
                extra_width: constants.theater_extra_width,
                section_gap: constants.theater_section_gap,
                extra_height: constants.theater_extra_height,
            },
        ),
        Topology::Concert => concert_size(map, constants),
        Topology::Generic => generic_size(map, constants),
    }
}

/// Size of the widest and tallest section block, padding included
fn tribune_block(map: &SeatMapDescription, constants: &LayoutConstants) -> Size {
    Size::new(
        cells(map.max_seats_per_row(), constants) + constants.section_padding,
        cells(map.max_rows(), constants) + constants.section_padding,
    )
}

fn stadium_size(map: &SeatMapDescription, constants: &LayoutConstants) -> Size {
    let tribune = tribune_block(map, constants);
    Size::new(
        constants.stadium_field_width + 2.0 * tribune.width + constants.stadium_extra_width,
        constants.stadium_field_height + 2.0 * tribune.height + constants.stadium_extra_height,
    )
}

fn concert_size(map: &SeatMapDescription, constants: &LayoutConstants) -> Size {
    let block = tribune_block(map, constants);
    Size::new(
        constants.concert_stage_width + 2.0 * block.width + constants.concert_extra_width,
        constants.concert_stage_height + 2.0 * block.height + constants.concert_extra_height,
    )
}

/// Padding set for venues whose sections stack in one column facing a front
struct StackedVenue {
    front_width: f64,
    extra_width: f64,
    section_gap: f64,
    extra_height: f64,
}

/// Sections stack in a single column, so `section_gap` separates rows of
/// sections vertically and is added once per section to the height only.
/// The column is as wide as its widest section's seats, with the venue's
/// `extra_width` applied once around the whole column.
fn stacked_size(sections: &[SectionGeometry], constants: &LayoutConstants, venue: StackedVenue) -> Size {
    let widest = sections
        .iter()
        .map(|s| cells(s.seats_per_row, constants))
        .fold(0.0, f64::max);
    let stacked_height: f64 = sections
        .iter()
        .map(|s| cells(s.rows, constants) + venue.section_gap)
        .sum();

    Size::new(
        venue.front_width.max(widest) + venue.extra_width,
        stacked_height + venue.extra_height,
    )
}

/// Grid shape used for generic venues: `(columns, rows)`
///
/// `columns = ceil(sqrt(n))`, `rows = ceil(n / columns)`.
pub fn generic_grid_shape(section_count: usize) -> (usize, usize) {
    if section_count == 0 {
        return (0, 0);
    }

    let mut cols = (section_count as f64).sqrt().ceil() as usize;
    // Guard against float rounding on perfect squares
    while cols * cols < section_count {
        cols += 1;
    }
    let rows = section_count.div_ceil(cols);
    (cols, rows)
}

fn generic_size(map: &SeatMapDescription, constants: &LayoutConstants) -> Size {
    let (cols, rows) = generic_grid_shape(map.sections.len());
    let cell = tribune_block(map, constants);
    let cols = cols as f64;
    let rows = rows as f64;

    Size::new(
        cols * cell.width + (cols - 1.0) * constants.generic_gutter + constants.generic_padding,
        rows * cell.height + (rows - 1.0) * constants.generic_gutter + constants.generic_padding,
    )
}

fn cells(count: u32, constants: &LayoutConstants) -> f64 {
    f64::from(count) * constants.cell_size
}
