#![forbid(unsafe_code)]

//! Pane grid arithmetic.
//!
//! Panes are numbered row-major: pane `i` sits at row `i / columns`,
//! column `i % columns`. A [`Grid`] is immutable for the lifetime of a
//! navigation session.
//!
//! # Invariants
//!
//! 1. `0 < rows <= pane_count` and `rows` divides `pane_count`.
//! 2. [`Grid::row_column`] and [`Grid::index_of`] are mutual inverses over
//!    `[0, pane_count)`.
//! 3. Every index returned by this module is within `[0, pane_count)`.

use crate::error::GridError;
use crate::geometry::{Axis, Offset, Viewport};

/// Shape of the pane grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pane_count: usize,
    rows: usize,
    columns: usize,
}

impl Grid {
    /// Create a grid of `pane_count` panes laid out in `rows` rows.
    ///
    /// Fails fast when the panes do not fill every row: a ragged last row
    /// would make the row/column arithmetic silently wrong.
    pub fn new(pane_count: usize, rows: usize) -> Result<Self, GridError> {
        if pane_count == 0 {
            return Err(GridError::NoPanes);
        }
        if rows == 0 {
            return Err(GridError::NoRows);
        }
        if rows > pane_count {
            return Err(GridError::TooManyRows { rows, pane_count });
        }
        if pane_count % rows != 0 {
            return Err(GridError::RaggedGrid { pane_count, rows });
        }
        Ok(Self {
            pane_count,
            rows,
            columns: pane_count / rows,
        })
    }

    /// A single horizontal strip of `pane_count` panes.
    pub fn single_row(pane_count: usize) -> Result<Self, GridError> {
        Self::new(pane_count, 1)
    }

    #[inline]
    pub const fn pane_count(&self) -> usize {
        self.pane_count
    }

    #[inline]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of panes along `axis` (columns for horizontal, rows for vertical).
    #[inline]
    pub const fn lines(&self, axis: Axis) -> usize {
        match axis {
            Axis::Horizontal => self.columns,
            Axis::Vertical => self.rows,
        }
    }

    /// `(row, column)` of pane `index`.
    #[inline]
    pub const fn row_column(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }

    /// Pane index at `(row, column)`.
    #[inline]
    pub const fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    /// Position of pane `index` along `axis`: its column or its row.
    #[inline]
    pub const fn line_of(&self, index: usize, axis: Axis) -> usize {
        let (row, column) = self.row_column(index);
        match axis {
            Axis::Horizontal => column,
            Axis::Vertical => row,
        }
    }

    /// Clamp a candidate index (possibly negative) into `[0, pane_count)`.
    #[inline]
    pub fn clamp_index(&self, candidate: isize) -> usize {
        if candidate <= 0 {
            0
        } else {
            (candidate as usize).min(self.pane_count - 1)
        }
    }

    /// Scroll offset at which pane `index` fills the viewport.
    pub fn pane_offset(&self, index: usize, viewport: Viewport) -> Offset {
        let (row, column) = self.row_column(index.min(self.pane_count - 1));
        Offset::new(
            column as f64 * viewport.width(),
            row as f64 * viewport.height(),
        )
    }

    /// Largest valid scroll offset on each axis.
    pub fn max_offset(&self, viewport: Viewport) -> Offset {
        Offset::new(
            (self.columns - 1) as f64 * viewport.width(),
            (self.rows - 1) as f64 * viewport.height(),
        )
    }

    /// Furthest offset a drag may reach along `axis` while `active` is the
    /// current pane: the far edge of the adjacent strip, capped at the grid.
    pub fn pan_limit(&self, active: usize, axis: Axis, viewport: Viewport) -> f64 {
        let line = self.line_of(active, axis);
        let next = (line + 1).min(self.lines(axis) - 1);
        next as f64 * viewport.extent(axis)
    }

    /// Pane closest to `offset`, rounding each axis to the nearest line.
    pub fn nearest_pane(&self, offset: Offset, viewport: Viewport) -> usize {
        let snap = |value: f64, extent: f64, lines: usize| -> usize {
            let line = (value / extent).round();
            if line.is_nan() || line <= 0.0 {
                0
            } else {
                (line as usize).min(lines - 1)
            }
        };
        let column = snap(offset.x, viewport.width(), self.columns);
        let row = snap(offset.y, viewport.height(), self.rows);
        self.index_of(row, column)
    }
}
