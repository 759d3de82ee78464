//! Flat geometry buffers.
//!
//! These mirror what a hardware backend would upload. The CPU rasterizer
//! consumes [`RenderTriangle`](crate::triangle::RenderTriangle) lists
//! directly, but buffer lifetimes go through the same pools and contracts.

/// Vertex positions, `vertex_count * components_per_vertex` values.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    pub vertices: Vec<f64>,
}

impl VertexBuffer {
    pub fn new(vertex_count: usize, components_per_vertex: usize) -> Self {
        assert!(vertex_count > 0, "vertex count must be positive");
        assert!(
            components_per_vertex >= 2,
            "vertex buffers need at least 2 components per vertex (got {components_per_vertex})"
        );
        Self {
            vertices: vec![0.0; vertex_count * components_per_vertex],
        }
    }
}

/// Per-vertex attributes such as texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBuffer {
    pub attributes: Vec<f64>,
}

impl AttributeBuffer {
    pub fn new(vertex_count: usize, components_per_vertex: usize) -> Self {
        assert!(vertex_count > 0, "vertex count must be positive");
        assert!(
            components_per_vertex >= 2,
            "attribute buffers need at least 2 components per vertex (got {components_per_vertex})"
        );
        Self {
            attributes: vec![0.0; vertex_count * components_per_vertex],
        }
    }
}

/// Triangle list indices. Always a positive multiple of 3 long.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexBuffer {
    pub indices: Vec<i32>,
}

impl IndexBuffer {
    pub fn new(index_count: usize) -> Self {
        assert!(index_count > 0, "index count must be positive");
        assert!(
            index_count % 3 == 0,
            "index count must be a multiple of 3 (got {index_count})"
        );
        Self {
            indices: vec![0; index_count],
        }
    }
}
