//! Object materials: how a surface samples its texture(s).

use crate::pool::ObjectTextureId;

/// One or two textures sampled by a triangle.
///
/// A layered material samples `layer` first and falls through to `base`
/// wherever the layer texel is 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectMaterial {
    Single(ObjectTextureId),
    Layered {
        base: ObjectTextureId,
        layer: ObjectTextureId,
    },
}

impl ObjectMaterial {
    pub fn base(&self) -> ObjectTextureId {
        match *self {
            Self::Single(base) | Self::Layered { base, .. } => base,
        }
    }

    pub fn layer(&self) -> Option<ObjectTextureId> {
        match *self {
            Self::Single(_) => None,
            Self::Layered { layer, .. } => Some(layer),
        }
    }
}
