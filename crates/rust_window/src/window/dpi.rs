//! Physical pixel / screen coordinate conversion
//!
//! The public window API speaks physical pixels; the backend speaks screen
//! coordinates. `pixel = screen * content_scale` on each axis, rounded for
//! integer element types.

use crate::foundation::geometry::{Area, Coordinate, Scalar};

use super::{Window, WindowResult};
use crate::backend::NativeHandle;

fn axis_scale(scale: f32) -> f32 {
    if scale > 0.0 {
        scale
    } else {
        1.0
    }
}

/// Convert physical pixels to screen coordinates
///
/// Non-positive scale components are treated as 1.0.
pub fn pixel_to_screen<T: Scalar>(pixels: Coordinate<T>, scale: Coordinate<f32>) -> Coordinate<T> {
    Coordinate::new(
        pixels.x.unscaled(axis_scale(scale.x)),
        pixels.y.unscaled(axis_scale(scale.y)),
    )
}

/// Convert screen coordinates to physical pixels
///
/// Non-positive scale components are treated as 1.0.
pub fn screen_to_pixel<T: Scalar>(screen: Coordinate<T>, scale: Coordinate<f32>) -> Coordinate<T> {
    Coordinate::new(
        screen.x.scaled(axis_scale(scale.x)),
        screen.y.scaled(axis_scale(scale.y)),
    )
}

impl Window {
    /// Physical pixels per screen coordinate, `(-1.0, -1.0)` when not created
    pub fn content_scale(&self) -> Coordinate<f32> {
        self.assert_created().map_or(Coordinate::new(-1.0, -1.0), |handle| {
            self.context.backend().content_scale(handle)
        })
    }

    /// Convert physical pixels to this window's screen coordinates
    ///
    /// Returns [`Scalar::UNSET`] on both axes when not created.
    pub fn pixel_to_screen_coordinate<T: Scalar>(&self, pixels: Coordinate<T>) -> Coordinate<T> {
        self.assert_created().map_or(Coordinate::new(T::UNSET, T::UNSET), |handle| {
            self.to_screen(handle, pixels)
        })
    }

    /// Convert this window's screen coordinates to physical pixels
    ///
    /// Returns [`Scalar::UNSET`] on both axes when not created.
    pub fn screen_coordinate_to_pixel<T: Scalar>(&self, screen: Coordinate<T>) -> Coordinate<T> {
        self.assert_created().map_or(Coordinate::new(T::UNSET, T::UNSET), |handle| {
            self.to_pixel(handle, screen)
        })
    }

    /// Position in physical pixels, `(-1, -1)` when not created
    pub fn position(&self) -> Coordinate<i32> {
        match self.assert_created() {
            Ok(handle) => {
                let position = self.context.backend().window_position(handle);
                self.to_pixel(handle, position)
            }
            Err(_) => Coordinate::new(-1, -1),
        }
    }

    /// Position in screen coordinates, `(-1, -1)` when not created
    pub fn position_in_screen_coordinates(&self) -> Coordinate<i32> {
        self.assert_created().map_or(Coordinate::new(-1, -1), |handle| {
            self.context.backend().window_position(handle)
        })
    }

    /// Move the window, `position` in physical pixels
    pub fn set_position(&mut self, position: Coordinate<i32>) -> WindowResult<()> {
        let handle = self.assert_created()?;
        let position = self.to_screen(handle, position);
        self.context
            .backend_mut()
            .set_window_position(handle, position);
        Ok(())
    }

    /// Content-area size in physical pixels, `(-1, -1)` when not created
    pub fn size(&self) -> Area<i32> {
        match self.assert_created() {
            Ok(handle) => {
                let size = self.context.backend().window_size(handle);
                Area::from_coordinate(self.to_pixel(handle, Coordinate::from_area(size)))
            }
            Err(_) => Area::new(-1, -1),
        }
    }

    /// Content-area size in screen coordinates, `(-1, -1)` when not created
    pub fn size_in_screen_coordinates(&self) -> Area<i32> {
        self.assert_created()
            .map_or(Area::new(-1, -1), |handle| self.context.backend().window_size(handle))
    }

    /// Resize the content area, `size` in physical pixels
    pub fn set_size(&mut self, size: Area<i32>) -> WindowResult<()> {
        let handle = self.assert_created()?;
        let size = self.area_to_screen(handle, size);
        self.context.backend_mut().set_window_size(handle, size);
        Ok(())
    }

    /// Framebuffer size in pixels, `(-1, -1)` when not created
    pub fn framebuffer_size(&self) -> Area<i32> {
        self.assert_created().map_or(Area::new(-1, -1), |handle| {
            self.context.backend().framebuffer_size(handle)
        })
    }

    /// Content-area size limits in physical pixels, `None` for no limit
    pub fn set_size_limits(
        &mut self,
        minimum: Option<Area<i32>>,
        maximum: Option<Area<i32>>,
    ) -> WindowResult<()> {
        let handle = self.assert_created()?;
        let minimum = minimum.map(|size| self.area_to_screen(handle, size));
        let maximum = maximum.map(|size| self.area_to_screen(handle, size));
        self.context
            .backend_mut()
            .set_size_limits(handle, minimum, maximum);
        Ok(())
    }

    /// Minimum content-area size in physical pixels, clears the maximum
    pub fn set_minimum_size(&mut self, size: Area<i32>) -> WindowResult<()> {
        self.set_size_limits(Some(size), None)
    }

    /// Maximum content-area size in physical pixels, clears the minimum
    pub fn set_maximum_size(&mut self, size: Area<i32>) -> WindowResult<()> {
        self.set_size_limits(None, Some(size))
    }

    pub(super) fn area_to_screen(&self, handle: NativeHandle, size: Area<i32>) -> Area<i32> {
        Area::from_coordinate(self.to_screen(handle, Coordinate::from_area(size)))
    }

    pub(super) fn to_screen<T: Scalar>(
        &self,
        handle: NativeHandle,
        pixels: Coordinate<T>,
    ) -> Coordinate<T> {
        pixel_to_screen(pixels, self.context.backend().content_scale(handle))
    }

    fn to_pixel<T: Scalar>(&self, handle: NativeHandle, screen: Coordinate<T>) -> Coordinate<T> {
        screen_to_pixel(screen, self.context.backend().content_scale(handle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_round_trip_at_common_scales() {
        for scale in [1.0, 1.25, 2.0] {
            let scale = Coordinate::new(scale, scale);
            for point in [Coordinate::new(0, 0), Coordinate::new(100, 100), Coordinate::new(-640, 1080)] {
                assert_eq!(pixel_to_screen(screen_to_pixel(point, scale), scale), point);
            }
        }
    }

    #[test]
    fn test_axes_use_their_own_scale() {
        let scale = Coordinate::new(2.0, 1.5);

        assert_eq!(screen_to_pixel(Coordinate::new(10, 10), scale), Coordinate::new(20, 15));
        assert_eq!(pixel_to_screen(Coordinate::new(20, 15), scale), Coordinate::new(10, 10));
    }

    #[test]
    fn test_non_positive_scale_is_identity() {
        let point = Coordinate::new(33, 44);

        assert_eq!(screen_to_pixel(point, Coordinate::new(0.0, -1.0)), point);
        assert_eq!(pixel_to_screen(point, Coordinate::new(-1.0, 0.0)), point);
    }

    #[test]
    fn test_float_coordinates_are_not_rounded() {
        let converted = pixel_to_screen(Coordinate::new(15.0_f64, 7.5), Coordinate::new(1.25, 1.25));

        assert_relative_eq!(converted.x, 12.0);
        assert_relative_eq!(converted.y, 6.0);
    }
}
