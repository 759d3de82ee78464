//! World-space triangle clipping.
//!
//! Triangles are clipped one plane at a time. A triangle tested against a
//! plane produces zero, one or two triangles depending on how many of its
//! vertices are inside, so no polygon representation is needed.
//!
//! - [`plane`]: point + normal planes and ray intersection.
//! - [`triangle`]: clipping a single triangle against a single plane.
//! - [`frustum`]: back-face culling and clipping against the five view planes.

pub mod frustum;
pub mod plane;
pub mod triangle;

pub use frustum::{ClipScratch, Frustum};
pub use plane::Plane;
pub use triangle::{clip_triangle, ClipResult};
