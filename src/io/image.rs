use crate::core::framebuffer::FrameBuffer;
use crate::error::Result;
use image::{ImageBuffer, Rgb};
use log::info;
use std::path::Path;

/// Saves the framebuffer to an image file; the format follows the extension.
pub fn save_framebuffer<P: AsRef<Path>>(framebuffer: &FrameBuffer, path: P) -> Result<()> {
    let path = path.as_ref();
    let img_buf = ImageBuffer::from_fn(
        framebuffer.width as u32,
        framebuffer.height as u32,
        |x, y| {
            let color = framebuffer
                .get_pixel(x as usize, y as usize)
                .unwrap_or_default();
            Rgb([color.r(), color.g(), color.b()])
        },
    );

    img_buf.save(path)?;
    info!(
        "Saved {}x{} image to '{}'",
        framebuffer.width,
        framebuffer.height,
        path.display()
    );
    Ok(())
}
