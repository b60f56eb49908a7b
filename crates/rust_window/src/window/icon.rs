//! Window icons decoded from image files

use std::path::Path;

use crate::backend::IconImage;

use super::{Window, WindowError, WindowResult};

/// Decode an image file into an RGBA8 icon
pub fn load_icon(path: impl AsRef<Path>) -> WindowResult<IconImage> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|error| WindowError::IconLoadFailed(format!("{}: {error}", path.display())))?
        .to_rgba8();

    Ok(IconImage {
        width: image.width(),
        height: image.height(),
        pixels: image.into_raw(),
    })
}

/// Check that `pixels` holds exactly `width * height` RGBA8 texels
fn check_icon(image: &IconImage) -> WindowResult<()> {
    let expected = (image.width as usize)
        .checked_mul(image.height as usize)
        .and_then(|texels| texels.checked_mul(4));

    match expected {
        Some(len) if len > 0 && len == image.pixels.len() => Ok(()),
        _ => Err(WindowError::IconLoadFailed(format!(
            "{}x{} icon needs {} bytes of RGBA8, got {}",
            image.width,
            image.height,
            expected.map_or_else(|| "too many".to_string(), |len| len.to_string()),
            image.pixels.len()
        ))),
    }
}

impl Window {
    /// Set the window icon from image files
    ///
    /// Several sizes may be given; the system picks the closest one. The icon
    /// is left unchanged when any file fails to decode.
    pub fn set_icon<P: AsRef<Path>>(&mut self, paths: &[P]) -> WindowResult<()> {
        self.assert_created()?;
        let images = paths
            .iter()
            .map(|path| load_icon(path))
            .collect::<WindowResult<Vec<_>>>()
            .map_err(|error| self.report(error))?;

        self.set_icon_images(&images)
    }

    /// Set the window icon from decoded images
    ///
    /// Every image must be non-empty with `width * height * 4` bytes of pixels,
    /// otherwise the icon is left unchanged.
    pub fn set_icon_images(&mut self, images: &[IconImage]) -> WindowResult<()> {
        let handle = self.assert_created()?;
        images
            .iter()
            .try_for_each(check_icon)
            .map_err(|error| self.report(error))?;

        self.context.backend_mut().set_icon(handle, images);
        log::debug!("Set {} icon image(s) on window '{}'", images.len(), self.title());
        Ok(())
    }
}
