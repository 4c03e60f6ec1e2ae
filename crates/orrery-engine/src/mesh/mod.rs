//! CPU-side mesh generation.

mod sphere;

pub use sphere::{MeshVertex, SphereMesh};
