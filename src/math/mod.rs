//! Double-precision vector and matrix types used by the pipeline.
//!
//! World coordinates can be large (chunked worlds), so everything is `f64`.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

/// Tolerance used by back-face culling and clip winding checks.
pub const EPSILON: f64 = 1e-5;
