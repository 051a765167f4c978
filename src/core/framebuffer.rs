use crate::core::color::Color;

/// A 2D buffer of colors. There is no depth buffer: visibility comes
/// purely from draw order.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Color>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, background: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![background; width * height],
        }
    }

    #[inline(always)]
    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Resets every pixel to `color`.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if !self.in_bounds(x, y) {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    /// Row-major pixel storage.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access to rows `start..=end`, flattened row-major.
    pub fn rows_mut(&mut self, start: usize, end: usize) -> &mut [Color] {
        let width = self.width;
        &mut self.pixels[start * width..(end + 1) * width]
    }
}
