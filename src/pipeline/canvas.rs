use crate::core::color::Color;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::Point;
use crate::core::rasterizer::fill_triangle;
use crate::error::{Error, Result};
use crate::io::image::save_framebuffer;
use crate::scene::face::Face2D;
use log::debug;
use std::fmt;
use std::path::Path;

/// Horizontal and vertical extent of the projection window, in camera-plane units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectRatio {
    horizontal: f64,
    vertical: f64,
}

impl AspectRatio {
    /// Fails with [`Error::InvalidAspectRatio`] when `vertical` is zero.
    pub fn new(horizontal: f64, vertical: f64) -> Result<Self> {
        if vertical == 0.0 {
            return Err(Error::InvalidAspectRatio);
        }
        Ok(Self {
            horizontal,
            vertical,
        })
    }

    pub fn horizontal(&self) -> f64 {
        self.horizontal
    }

    pub fn vertical(&self) -> f64 {
        self.vertical
    }

    /// Scalar ratio `horizontal / vertical`.
    pub fn ratio(&self) -> f64 {
        self.horizontal / self.vertical
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.horizontal, self.vertical)
    }
}

/// The drawing surface: turns a render list into pixels with the painter's algorithm.
pub struct Canvas {
    aspect_ratio: AspectRatio,
    resolution: u32,
    background: Color,
    framebuffer: FrameBuffer,
}

impl Canvas {
    /// A canvas of `horizontal * resolution` by `vertical * resolution` pixels.
    pub fn new(aspect_ratio: AspectRatio, resolution: u32, background: Color) -> Self {
        let width = (aspect_ratio.horizontal * f64::from(resolution)).max(0.0) as usize;
        let height = (aspect_ratio.vertical * f64::from(resolution)).max(0.0) as usize;
        Self {
            aspect_ratio,
            resolution,
            background,
            framebuffer: FrameBuffer::new(width, height, background),
        }
    }

    pub fn width(&self) -> usize {
        self.framebuffer.width
    }

    pub fn height(&self) -> usize {
        self.framebuffer.height
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        self.framebuffer.get_pixel(x, y)
    }

    /// Maps a projected point to pixel coordinates: centred, scaled by resolution,
    /// Y flipped. Coordinates are truncated toward zero.
    pub fn translate_point(&self, point: Point) -> Point {
        let res = f64::from(self.resolution);
        let x = (point.x() + self.aspect_ratio.horizontal / 2.0) * res;
        let y = (-point.y() + self.aspect_ratio.vertical / 2.0) * res;
        Point::new(x.trunc(), y.trunc())
    }

    pub fn clear(&mut self) {
        self.framebuffer.clear(self.background);
    }

    /// Draws faces farthest-first so nearer ones paint over them.
    ///
    /// Faces at equal depth keep their render-list order. Returns how many
    /// faces produced pixels.
    pub fn draw(&mut self, faces: &[Face2D]) -> usize {
        let mut ordered: Vec<&Face2D> = faces.iter().collect();
        ordered.sort_by(|a, b| b.cmp_distance(a));

        let mut drawn = 0;
        for face in ordered {
            let points = face.points().map(|p| self.translate_point(p).to_point2());
            if fill_triangle(&mut self.framebuffer, &points, face.color()) {
                drawn += 1;
            } else {
                debug!("Skipped face at depth {:.3}: off-canvas or degenerate", face.distance());
            }
        }
        drawn
    }

    /// Clears to the background and draws `faces`.
    pub fn render(&mut self, faces: &[Face2D]) -> usize {
        self.clear();
        self.draw(faces)
    }

    /// Writes the canvas to an image file (format chosen by extension).
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        save_framebuffer(&self.framebuffer, path)
    }
}
