//! Per-frame renderer statistics.

use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProfilerData {
    pub width: u32,
    pub height: u32,
    pub thread_count: usize,
    /// Triangles submitted across all classes in the last frame.
    pub potentially_visible_triangles: usize,
    /// Triangles left after culling and clipping in the last frame.
    pub visible_triangles: usize,
    pub visible_lights: usize,
}

impl fmt::Display for ProfilerData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{}, {} thread(s), triangles {}/{}, lights {}",
            self.width,
            self.height,
            self.thread_count,
            self.visible_triangles,
            self.potentially_visible_triangles,
            self.visible_lights
        )
    }
}
