//! 2D coordinate and extent value types
//!
//! [`Coordinate`] and [`Area`] are structurally the same pair of values. The
//! conversion between them is an explicit reinterpretation (`x <-> width`,
//! `y <-> height`), never a unit conversion. Equality is exact, including for
//! floating point element types.

use serde::{Deserialize, Serialize};

/// A 2D point (or any `x`/`y` pair such as a content scale)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate<T> {
    /// Horizontal component
    pub x: T,
    /// Vertical component
    pub y: T,
}

/// A 2D extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Area<T> {
    /// Horizontal extent
    pub width: T,
    /// Vertical extent
    pub height: T,
}

impl<T> Coordinate<T> {
    /// Create a new coordinate
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// Reinterpret an area as a coordinate (`width -> x`, `height -> y`)
    pub fn from_area(area: Area<T>) -> Self {
        Self {
            x: area.width,
            y: area.height,
        }
    }
}

impl<T> Area<T> {
    /// Create a new area
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// Reinterpret a coordinate as an area (`x -> width`, `y -> height`)
    pub fn from_coordinate(coordinate: Coordinate<T>) -> Self {
        Self {
            width: coordinate.x,
            height: coordinate.y,
        }
    }
}

impl<T> From<(T, T)> for Coordinate<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T> From<Coordinate<T>> for (T, T) {
    fn from(coordinate: Coordinate<T>) -> Self {
        (coordinate.x, coordinate.y)
    }
}

impl<T> From<(T, T)> for Area<T> {
    fn from((width, height): (T, T)) -> Self {
        Self { width, height }
    }
}

impl<T> From<Area<T>> for (T, T) {
    fn from(area: Area<T>) -> Self {
        (area.width, area.height)
    }
}

/// Numeric element types that can be scaled by a content-scale factor
///
/// Integer types round to the nearest value; floating point types keep the
/// exact product or quotient.
pub trait Scalar: Copy + PartialEq + std::fmt::Debug {
    /// Placeholder returned when a conversion has no window to scale by
    const UNSET: Self;

    /// Multiply by `factor`
    #[must_use]
    fn scaled(self, factor: f32) -> Self;

    /// Divide by `factor`
    #[must_use]
    fn unscaled(self, factor: f32) -> Self;
}

impl Scalar for i32 {
    const UNSET: Self = -1;

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn scaled(self, factor: f32) -> Self {
        (f64::from(self) * f64::from(factor)).round() as Self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn unscaled(self, factor: f32) -> Self {
        (f64::from(self) / f64::from(factor)).round() as Self
    }
}

impl Scalar for u32 {
    const UNSET: Self = u32::MAX;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn scaled(self, factor: f32) -> Self {
        (f64::from(self) * f64::from(factor)).round() as Self
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn unscaled(self, factor: f32) -> Self {
        (f64::from(self) / f64::from(factor)).round() as Self
    }
}

impl Scalar for f32 {
    const UNSET: Self = -1.0;

    fn scaled(self, factor: f32) -> Self {
        self * factor
    }

    fn unscaled(self, factor: f32) -> Self {
        self / factor
    }
}

impl Scalar for f64 {
    const UNSET: Self = -1.0;

    fn scaled(self, factor: f32) -> Self {
        self * f64::from(factor)
    }

    fn unscaled(self, factor: f32) -> Self {
        self / f64::from(factor)
    }
}
