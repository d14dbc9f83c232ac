//! Turns a [`PointBuffer`] into something the renderer can draw.
//!
//! wgpu's point primitives are fixed at one pixel, so each point becomes a
//! camera-facing quad instead: four vertices whose UV carries the corner
//! offset, expanded to the configured size in view space by the vertex shader
//! and masked down to a feathered disc by the fragment shader.  Per-point
//! colour rides along as a vertex attribute.

use bevy::{
    asset::{Asset, RenderAssetUsages},
    mesh::{Indices, Mesh, PrimitiveTopology},
    pbr::Material,
    prelude::AlphaMode,
    reflect::TypePath,
    render::render_resource::{AsBindGroup, ShaderType},
    shader::ShaderRef,
};

use crate::field::PointBuffer;

/// How the point-sprite material renders, independent of any parameter set.
///
/// The default is perspective-attenuated sprites, additive blending with
/// depth writes off (overlapping points sum to a glow instead of
/// z-fighting), and per-vertex colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointsMaterialDescriptor {
    /// Quad side length in world units at unit view distance.
    pub point_size: f32,
    /// Scale sprites down with view distance.  When `false` they keep a
    /// constant on-screen size.
    pub size_attenuation: bool,
    pub additive_blending: bool,
    pub depth_write: bool,
    /// Tint from the mesh's colour attribute; `false` renders white sprites.
    pub vertex_colors: bool,
}

impl Default for PointsMaterialDescriptor {
    fn default() -> Self {
        Self {
            point_size: 0.01,
            size_attenuation: true,
            additive_blending: true,
            depth_write: false,
            vertex_colors: true,
        }
    }
}

/// Material drawing a galaxy point mesh as sized, blended sprites.
#[derive(Asset, TypePath, AsBindGroup, Clone, Debug, Default)]
#[uniform(0, GalaxyPointsUniform)]
pub struct GalaxyPointsMaterial {
    pub descriptor: PointsMaterialDescriptor,
}

/// GPU-side mirror of [`PointsMaterialDescriptor`] (bools as `u32` — WGSL has
/// no bool in uniform storage).
#[derive(Clone, Default, ShaderType)]
pub struct GalaxyPointsUniform {
    pub point_size: f32,
    pub size_attenuation: u32,
    pub use_vertex_colors: u32,
}

impl From<&GalaxyPointsMaterial> for GalaxyPointsUniform {
    fn from(material: &GalaxyPointsMaterial) -> Self {
        let d = &material.descriptor;
        Self {
            point_size: d.point_size,
            size_attenuation: d.size_attenuation as u32,
            use_vertex_colors: d.vertex_colors as u32,
        }
    }
}

impl Material for GalaxyPointsMaterial {
    fn vertex_shader() -> ShaderRef {
        "embedded://bevy_galaxy_field/points.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "embedded://bevy_galaxy_field/points.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        // Add is additive with depth writes disabled; any other combination
        // degrades to ordinary blending.
        if self.descriptor.additive_blending && !self.descriptor.depth_write {
            AlphaMode::Add
        } else {
            AlphaMode::Blend
        }
    }
}

/// Corner offsets of one quad, CCW so default back-face culling keeps the
/// camera-facing side.
const CORNERS: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];

/// Expand a [`PointBuffer`] into a quad-per-point mesh.
///
/// Every vertex of a quad carries the point's center as its position — the
/// shader does the corner displacement — plus the corner offset as UV and the
/// point colour as RGBA with alpha 1.  An empty buffer yields an empty mesh,
/// which renders nothing and is still a valid drawable.
pub fn points_mesh(buffer: &PointBuffer) -> Mesh {
    let n = buffer.len();
    let mut positions = Vec::with_capacity(n * 4);
    let mut uvs = Vec::with_capacity(n * 4);
    let mut colors = Vec::with_capacity(n * 4);
    let mut indices = Vec::with_capacity(n * 6);

    for (i, (center, color)) in buffer.positions.iter().zip(&buffer.colors).enumerate() {
        for corner in CORNERS {
            positions.push(*center);
            uvs.push(corner);
            colors.push([color[0], color[1], color[2], 1.0]);
        }
        let base = (i * 4) as u32;
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use bevy::mesh::VertexAttributeValues;

    use super::*;
    use crate::{field::generate, params::GalaxyParams};

    fn small_buffer() -> PointBuffer {
        generate(&GalaxyParams {
            count: 5,
            ..Default::default()
        })
        .expect("tiny default field must generate")
    }

    #[test]
    fn four_vertices_and_six_indices_per_point() {
        let buffer = small_buffer();
        let mesh = points_mesh(&buffer);

        assert_eq!(mesh.count_vertices(), buffer.len() * 4);
        let indices = mesh.indices().expect("points mesh must be indexed");
        assert_eq!(indices.len(), buffer.len() * 6);

        // Every index must address a vertex of its own quad.
        for (i, index) in indices.iter().enumerate() {
            let quad = i / 6;
            assert!(
                index / 4 == quad,
                "index {i} ({index}) escaped quad {quad}"
            );
        }
    }

    #[test]
    fn quad_corners_share_the_point_center() {
        let buffer = small_buffer();
        let mesh = points_mesh(&buffer);
        let Some(VertexAttributeValues::Float32x3(positions)) =
            mesh.attribute(Mesh::ATTRIBUTE_POSITION)
        else {
            panic!("position attribute missing or mistyped");
        };
        for (i, center) in buffer.positions.iter().enumerate() {
            for corner in 0..4 {
                assert_eq!(
                    &positions[i * 4 + corner],
                    center,
                    "corner {corner} of point {i} drifted off-center"
                );
            }
        }
    }

    #[test]
    fn vertex_colors_are_opaque_rgba() {
        let buffer = small_buffer();
        let mesh = points_mesh(&buffer);
        let Some(VertexAttributeValues::Float32x4(colors)) = mesh.attribute(Mesh::ATTRIBUTE_COLOR)
        else {
            panic!("color attribute missing or mistyped");
        };
        for (i, rgba) in colors.iter().enumerate() {
            let expected = buffer.colors[i / 4];
            assert_eq!(&rgba[..3], &expected, "vertex {i} colour mismatch");
            assert_eq!(rgba[3], 1.0, "vertex {i} alpha must be 1");
        }
    }

    /// The first triangle of each quad must wind counter-clockwise in corner
    /// space, otherwise default culling hides every sprite.
    #[test]
    fn quads_wind_counter_clockwise() {
        for tri in [[0usize, 1, 2], [0, 2, 3]] {
            let [a, b, c] = tri.map(|i| CORNERS[i]);
            let cross = (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0]);
            assert!(cross > 0.0, "triangle {tri:?} winds clockwise");
        }
    }

    #[test]
    fn empty_buffer_is_an_empty_mesh() {
        let mesh = points_mesh(&PointBuffer {
            positions: Vec::new(),
            colors: Vec::new(),
        });
        assert_eq!(mesh.count_vertices(), 0);
        assert_eq!(mesh.indices().map(|i| i.len()), Some(0));
    }

    #[test]
    fn alpha_mode_follows_descriptor() {
        let additive = GalaxyPointsMaterial::default();
        assert_eq!(additive.alpha_mode(), AlphaMode::Add);

        let blended = GalaxyPointsMaterial {
            descriptor: PointsMaterialDescriptor {
                additive_blending: false,
                ..Default::default()
            },
        };
        assert_eq!(blended.alpha_mode(), AlphaMode::Blend);
    }
}
