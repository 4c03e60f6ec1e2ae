use std::f32::consts::{PI, TAU};

use bytemuck::{Pod, Zeroable};

/// Interleaved vertex: position, normal, texture coordinate (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Indexed UV sphere centred on the origin.
///
/// The poles lie on the Z axis (`+Z` at `v = 0`), so a scene that wants them on
/// Y applies `rot_x(-π/2)`. Triangles wind counter-clockwise seen from outside.
/// The seam column is duplicated so `u` runs cleanly from 0 to 1.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// `segments` is the number of slices around the equator (at least 3);
    /// half as many stacks run pole to pole.
    pub fn new(radius: f32, segments: u32) -> Self {
        let slices = segments.max(3);
        let stacks = (slices / 2).max(2);
        let row = slices + 1;

        let mut vertices = Vec::with_capacity((row * (stacks + 1)) as usize);
        for i in 0..=stacks {
            let v = i as f32 / stacks as f32;
            let (sin_t, cos_t) = (v * PI).sin_cos();
            for j in 0..=slices {
                let u = j as f32 / slices as f32;
                let (sin_p, cos_p) = (u * TAU).sin_cos();
                let n = [sin_t * cos_p, sin_t * sin_p, cos_t];
                vertices.push(MeshVertex {
                    position: [radius * n[0], radius * n[1], radius * n[2]],
                    normal: n,
                    uv: [u, v],
                });
            }
        }

        let mut indices = Vec::with_capacity((6 * slices * stacks) as usize);
        for i in 0..stacks {
            for j in 0..slices {
                let a = i * row + j;
                let b = a + row;
                let c = b + 1;
                let d = a + 1;
                // The first triangle collapses at the south pole, the second at the north pole.
                if i + 1 < stacks {
                    indices.extend_from_slice(&[a, b, c]);
                }
                if i > 0 {
                    indices.extend_from_slice(&[a, c, d]);
                }
            }
        }

        log::debug!(
            "sphere mesh: {} vertices, {} triangles",
            vertices.len(),
            indices.len() / 3
        );

        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
