//! Geometry primitives: [`Coordinate`], [`Offset`] and [`Bounds`].
//!
//! Coordinates are `(row, col)` pairs of non-negative integers. Rows grow
//! down and columns grow right, the same way the visualizer lays out cells.

use std::fmt;
use std::ops::Add;

// ---------------------------------------------------------------------------
// Coordinate
// ---------------------------------------------------------------------------

/// The identity of one cell in a grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Apply `offset`, returning `None` if either component would go negative.
    ///
    /// Upper bounds are not checked here; see [`Bounds::contains`].
    #[inline]
    pub fn offset(self, offset: Offset) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(offset.dr as isize)?,
            col: self.col.checked_add_signed(offset.dc as isize)?,
        })
    }

    /// Signed displacement from `self` to `other`.
    #[inline]
    pub fn delta(self, other: Coordinate) -> Offset {
        Offset::new(
            other.row as i32 - self.row as i32,
            other.col as i32 - self.col as i32,
        )
    }

    /// Whether `other` is one orthogonal step away.
    #[inline]
    pub fn is_orthogonal_to(self, other: Coordinate) -> bool {
        self.delta(other).is_orthogonal()
    }

    /// Whether `other` is one diagonal step away.
    #[inline]
    pub fn is_diagonal_to(self, other: Coordinate) -> bool {
        self.delta(other).is_diagonal()
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coordinate {
    /// Row-major order.
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl Add<Offset> for Coordinate {
    type Output = Option<Coordinate>;
    #[inline]
    fn add(self, rhs: Offset) -> Option<Coordinate> {
        self.offset(rhs)
    }
}

// ---------------------------------------------------------------------------
// Offset
// ---------------------------------------------------------------------------

/// A signed `(row, col)` displacement between two cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Offset {
    pub dr: i32,
    pub dc: i32,
}

impl Offset {
    /// The four orthogonal steps: left, right, up, down.
    pub const ORTHOGONAL: [Offset; 4] = [
        Offset::new(0, -1),
        Offset::new(0, 1),
        Offset::new(-1, 0),
        Offset::new(1, 0),
    ];

    /// The four diagonal steps: up-left, up-right, down-left, down-right.
    pub const DIAGONAL: [Offset; 4] = [
        Offset::new(-1, -1),
        Offset::new(-1, 1),
        Offset::new(1, -1),
        Offset::new(1, 1),
    ];

    #[inline]
    pub const fn new(dr: i32, dc: i32) -> Self {
        Self { dr, dc }
    }

    /// Exactly one axis moves by one.
    #[inline]
    pub fn is_orthogonal(self) -> bool {
        self.dr.abs() + self.dc.abs() == 1
    }

    /// Both axes move by one.
    #[inline]
    pub fn is_diagonal(self) -> bool {
        self.dr.abs() == 1 && self.dc.abs() == 1
    }
}

// ---------------------------------------------------------------------------
// Bounds
// ---------------------------------------------------------------------------

/// The `rows × cols` extent of a grid, anchored at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub rows: usize,
    pub cols: usize,
}

impl Bounds {
    #[inline]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of cells.
    #[inline]
    pub fn len(self) -> usize {
        self.rows * self.cols
    }

    /// Whether the extent has zero area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Whether `c` lies inside the extent.
    #[inline]
    pub fn contains(self, c: Coordinate) -> bool {
        c.row < self.rows && c.col < self.cols
    }

    /// Row-major flat index of `c`, or `None` if out of bounds.
    #[inline]
    pub fn index(self, c: Coordinate) -> Option<usize> {
        self.contains(c).then(|| c.row * self.cols + c.col)
    }

    /// Inverse of [`index`](Self::index). `idx` must be `< self.len()`.
    #[inline]
    pub fn coordinate(self, idx: usize) -> Coordinate {
        Coordinate::new(idx / self.cols, idx % self.cols)
    }

    /// Row-major iterator over every coordinate.
    #[inline]
    pub fn iter(self) -> BoundsIter {
        BoundsIter {
            bounds: self,
            next: 0,
        }
    }
}

impl IntoIterator for Bounds {
    type Item = Coordinate;
    type IntoIter = BoundsIter;
    #[inline]
    fn into_iter(self) -> BoundsIter {
        self.iter()
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Row-major iterator over the coordinates in a [`Bounds`].
#[derive(Clone, Debug)]
pub struct BoundsIter {
    bounds: Bounds,
    next: usize,
}

impl Iterator for BoundsIter {
    type Item = Coordinate;

    #[inline]
    fn next(&mut self) -> Option<Coordinate> {
        if self.next >= self.bounds.len() {
            return None;
        }
        let c = self.bounds.coordinate(self.next);
        self.next += 1;
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.bounds.len().saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for BoundsIter {}
