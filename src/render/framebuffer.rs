//! Frame buffer abstraction for 2D pixel access.
//!
//! Provides a view over a caller-owned color buffer and the renderer's depth
//! buffer with bounds-checked access.

/// A view into color and depth buffers.
///
/// Wraps 1D slices with width/height metadata to enable 2D pixel access.
/// This is a borrowed view, not an owning type: it is created for the
/// duration of one frame and dropped before the caller gets its color buffer
/// back.
///
/// # Depth Buffer
///
/// The depth buffer stores the perspective-correct view-space depth of each
/// pixel. Smaller values are closer to the camera; a cleared buffer holds
/// `+inf`.
pub struct FrameBuffer<'a> {
    color_buffer: &'a mut [u32],
    depth_buffer: &'a mut [f64],
    width: u32,
    height: u32,
}

impl<'a> FrameBuffer<'a> {
    /// Create a new FrameBuffer view from buffer slices and dimensions.
    ///
    /// # Panics
    /// Panics if either buffer length doesn't match `width * height`.
    pub fn new(
        color_buffer: &'a mut [u32],
        depth_buffer: &'a mut [f64],
        width: u32,
        height: u32,
    ) -> Self {
        let size = width as usize * height as usize;
        assert_eq!(
            color_buffer.len(),
            size,
            "color buffer size doesn't match {width}x{height}"
        );
        assert_eq!(
            depth_buffer.len(),
            size,
            "depth buffer size doesn't match {width}x{height}"
        );
        Self {
            color_buffer,
            depth_buffer,
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the color buffer with `color` and reset every depth to `+inf`.
    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(f64::INFINITY);
    }

    /// Whether `depth` is strictly closer than what is stored at `index`.
    ///
    /// Ties fail, so the first writer at equal depth wins.
    #[inline]
    pub fn depth_test(&self, index: usize, depth: f64) -> bool {
        depth < self.depth_buffer[index]
    }

    /// Unconditionally write color and depth at a linear index.
    #[inline]
    pub fn write(&mut self, index: usize, depth: f64, color: u32) {
        self.depth_buffer[index] = depth;
        self.color_buffer[index] = color;
    }

    /// Set the color at (x, y) without touching depth.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: u32) {
        if x < self.width && y < self.height {
            self.color_buffer[y as usize * self.width as usize + x as usize] = color;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_color_and_depth() {
        let mut color = vec![7u32; 4];
        let mut depth = vec![1.0; 4];
        FrameBuffer::new(&mut color, &mut depth, 2, 2).clear(0xFF000000);
        assert_eq!(color, vec![0xFF000000; 4]);
        assert!(depth.iter().all(|d| *d == f64::INFINITY));
    }

    #[test]
    fn depth_test_is_strict() {
        let mut color = vec![0u32; 1];
        let mut depth = vec![f64::INFINITY; 1];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 1, 1);

        assert!(fb.depth_test(0, 2.0));
        fb.write(0, 2.0, 1);
        assert!(!fb.depth_test(0, 2.0));
        assert!(fb.depth_test(0, 1.5));
        assert!(!fb.depth_test(0, 5.0));
    }

    #[test]
    fn set_pixel_leaves_depth_alone() {
        let mut color = vec![0u32; 4];
        let mut depth = vec![f64::INFINITY; 4];
        let mut fb = FrameBuffer::new(&mut color, &mut depth, 2, 2);
        fb.set_pixel(1, 0, 9);
        fb.set_pixel(2, 0, 9);
        fb.set_pixel(0, 2, 9);
        assert_eq!(color, vec![0, 9, 0, 0]);
        assert!(depth.iter().all(|d| d.is_infinite()));
    }

    #[test]
    #[should_panic(expected = "color buffer size")]
    fn mismatched_color_buffer_panics() {
        let mut color = vec![0u32; 3];
        let mut depth = vec![0.0; 4];
        FrameBuffer::new(&mut color, &mut depth, 2, 2);
    }
}
