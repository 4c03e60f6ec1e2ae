//! GPU rendering.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! [`RenderTarget`] handed out by the frame context.
//!
//! Convention: geometry arrives in view space as a column-major model-view
//! matrix per instance; the projection is a per-frame uniform.

mod ctx;
pub mod sphere;

pub use ctx::{RenderCtx, RenderTarget};
pub use sphere::{SphereInstance, SphereRenderer};
