//! wgpu rendering for the textured quad, shared by web and native hosts.

mod context;
mod quad;
mod texture;

pub use context::GpuContext;
pub use quad::{QuadRenderer, QuadVertex, QUAD_INDICES, QUAD_VERTICES};
pub use texture::ImageTexture;
