use glium::index::{NoIndices, PrimitiveType};
use glium::uniforms::Uniforms;
use glium::{implement_vertex, Display, DrawError, DrawParameters, Frame, IndexBuffer, Program};
use glium::{Surface, VertexBuffer};
use glutin::surface::WindowSurface;

use crate::error::SceneError;

#[derive(Copy, Clone, Debug)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub tex_coords: [f32; 2],
}

implement_vertex!(SceneVertex, position, tex_coords);

fn vertex(position: [f32; 3], tex_coords: [f32; 2]) -> SceneVertex {
    SceneVertex {
        position,
        tex_coords,
    }
}

/// GPU-resident geometry: a vertex buffer plus indices for the meshes that
/// share corner vertices. The cube is drawn unindexed.
pub struct Mesh {
    vertices: VertexBuffer<SceneVertex>,
    indices: Option<IndexBuffer<u16>>,
}

impl Mesh {
    fn indexed(
        display: &Display<WindowSurface>,
        vertices: &[SceneVertex],
        indices: &[u16],
    ) -> Result<Self, SceneError> {
        Ok(Self {
            vertices: VertexBuffer::new(display, vertices)?,
            indices: Some(IndexBuffer::new(
                display,
                PrimitiveType::TrianglesList,
                indices,
            )?),
        })
    }

    fn unindexed(
        display: &Display<WindowSurface>,
        vertices: &[SceneVertex],
    ) -> Result<Self, SceneError> {
        Ok(Self {
            vertices: VertexBuffer::new(display, vertices)?,
            indices: None,
        })
    }

    pub fn pool(display: &Display<WindowSurface>) -> Result<Self, SceneError> {
        Self::indexed(display, &pool_vertices(), &pool_indices())
    }

    pub fn walkway(display: &Display<WindowSurface>) -> Result<Self, SceneError> {
        Self::indexed(display, &walkway_vertices(), &walkway_indices())
    }

    pub fn cube(display: &Display<WindowSurface>) -> Result<Self, SceneError> {
        Self::unindexed(display, &cube_vertices())
    }

    pub fn draw<U: Uniforms>(
        &self,
        target: &mut Frame,
        program: &Program,
        uniforms: &U,
        params: &DrawParameters<'_>,
    ) -> Result<(), DrawError> {
        match &self.indices {
            Some(indices) => target.draw(&self.vertices, indices, program, uniforms, params),
            None => target.draw(
                &self.vertices,
                NoIndices(PrimitiveType::TrianglesList),
                program,
                uniforms,
                params,
            ),
        }
    }
}

/// Pool basin: top quad at the waterline, bottom quad 0.6 below, closed into
/// a box by the index list.
pub fn pool_vertices() -> Vec<SceneVertex> {
    vec![
        // top face
        vertex([-1.0, 0.0, -1.0], [0.0, 0.0]),
        vertex([1.0, 0.0, -1.0], [1.0, 0.0]),
        vertex([1.0, 0.0, 1.0], [1.0, 1.0]),
        vertex([-1.0, 0.0, 1.0], [0.0, 1.0]),
        // bottom face
        vertex([-1.0, -0.6, -1.0], [0.0, 0.0]),
        vertex([1.0, -0.6, -1.0], [1.0, 0.0]),
        vertex([1.0, -0.6, 1.0], [1.0, 1.0]),
        vertex([-1.0, -0.6, 1.0], [0.0, 1.0]),
    ]
}

pub fn pool_indices() -> Vec<u16> {
    vec![
        // top face
        0, 1, 2, 2, 3, 0, //
        // bottom face
        4, 5, 6, 6, 7, 4, //
        // side faces
        0, 1, 5, 5, 4, 0, //
        1, 2, 6, 6, 5, 1, //
        2, 3, 7, 7, 6, 2, //
        3, 0, 4, 4, 7, 3,
    ]
}

/// Walkway: a ring between an outer quad (texture tiled x3) and the inner
/// quad hugging the pool rim.
pub fn walkway_vertices() -> Vec<SceneVertex> {
    vec![
        // outer edge, tiled texture coordinates
        vertex([-1.2, 0.0, -1.2], [0.0, 0.0]),
        vertex([1.2, 0.0, -1.2], [3.0, 0.0]),
        vertex([1.2, 0.0, 1.2], [3.0, 3.0]),
        vertex([-1.2, 0.0, 1.2], [0.0, 3.0]),
        // inner edge
        vertex([-1.0, 0.0, -1.0], [0.0, 0.0]),
        vertex([1.0, 0.0, -1.0], [1.0, 0.0]),
        vertex([1.0, 0.0, 1.0], [1.0, 1.0]),
        vertex([-1.0, 0.0, 1.0], [0.0, 1.0]),
    ]
}

pub fn walkway_indices() -> Vec<u16> {
    vec![
        0, 1, 4, 1, 5, 4, //
        1, 2, 5, 2, 6, 5, //
        2, 3, 6, 3, 7, 6, //
        3, 0, 7, 0, 4, 7,
    ]
}

/// Unit cube, 6 faces x 2 triangles, reused for every table in the scene.
pub fn cube_vertices() -> Vec<SceneVertex> {
    vec![
        vertex([-0.5, -0.5, -0.5], [0.0, 0.0]),
        vertex([0.5, -0.5, -0.5], [1.0, 0.0]),
        vertex([0.5, 0.5, -0.5], [1.0, 1.0]),
        vertex([0.5, 0.5, -0.5], [1.0, 1.0]),
        vertex([-0.5, 0.5, -0.5], [0.0, 1.0]),
        vertex([-0.5, -0.5, -0.5], [0.0, 0.0]),
        //
        vertex([-0.5, -0.5, 0.5], [0.0, 0.0]),
        vertex([0.5, -0.5, 0.5], [1.0, 0.0]),
        vertex([0.5, 0.5, 0.5], [1.0, 1.0]),
        vertex([0.5, 0.5, 0.5], [1.0, 1.0]),
        vertex([-0.5, 0.5, 0.5], [0.0, 1.0]),
        vertex([-0.5, -0.5, 0.5], [0.0, 0.0]),
        //
        vertex([-0.5, 0.5, 0.5], [1.0, 0.0]),
        vertex([-0.5, 0.5, -0.5], [1.0, 1.0]),
        vertex([-0.5, -0.5, -0.5], [0.0, 1.0]),
        vertex([-0.5, -0.5, -0.5], [0.0, 1.0]),
        vertex([-0.5, -0.5, 0.5], [0.0, 0.0]),
        vertex([-0.5, 0.5, 0.5], [1.0, 0.0]),
        //
        vertex([0.5, 0.5, 0.5], [1.0, 0.0]),
        vertex([0.5, 0.5, -0.5], [1.0, 1.0]),
        vertex([0.5, -0.5, -0.5], [0.0, 1.0]),
        vertex([0.5, -0.5, -0.5], [0.0, 1.0]),
        vertex([0.5, -0.5, 0.5], [0.0, 0.0]),
        vertex([0.5, 0.5, 0.5], [1.0, 0.0]),
        //
        vertex([-0.5, -0.5, -0.5], [0.0, 1.0]),
        vertex([0.5, -0.5, -0.5], [1.0, 1.0]),
        vertex([0.5, -0.5, 0.5], [1.0, 0.0]),
        vertex([0.5, -0.5, 0.5], [1.0, 0.0]),
        vertex([-0.5, -0.5, 0.5], [0.0, 0.0]),
        vertex([-0.5, -0.5, -0.5], [0.0, 1.0]),
        //
        vertex([-0.5, 0.5, -0.5], [0.0, 1.0]),
        vertex([0.5, 0.5, -0.5], [1.0, 1.0]),
        vertex([0.5, 0.5, 0.5], [1.0, 0.0]),
        vertex([0.5, 0.5, 0.5], [1.0, 0.0]),
        vertex([-0.5, 0.5, 0.5], [0.0, 0.0]),
        vertex([-0.5, 0.5, -0.5], [0.0, 1.0]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_a_closed_box_of_twelve_triangles() {
        let vertices = pool_vertices();
        let indices = pool_indices();
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 36);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn pool_bottom_sits_below_the_waterline() {
        let vertices = pool_vertices();
        assert!(vertices[..4].iter().all(|v| v.position[1] == 0.0));
        assert!(vertices[4..].iter().all(|v| v.position[1] == -0.6));
    }

    #[test]
    fn walkway_is_a_ring_of_eight_triangles() {
        let vertices = walkway_vertices();
        let indices = walkway_indices();
        assert_eq!(vertices.len(), 8);
        assert_eq!(indices.len(), 24);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn walkway_outer_edge_tiles_the_texture_three_times() {
        let vertices = walkway_vertices();
        let max_outer_uv = vertices[..4]
            .iter()
            .flat_map(|v| v.tex_coords)
            .fold(0.0f32, f32::max);
        let max_inner_uv = vertices[4..]
            .iter()
            .flat_map(|v| v.tex_coords)
            .fold(0.0f32, f32::max);
        assert_eq!(max_outer_uv, 3.0);
        assert_eq!(max_inner_uv, 1.0);
    }

    #[test]
    fn cube_has_thirty_six_unindexed_vertices() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        // every corner stays on the unit cube
        for v in &vertices {
            for c in v.position {
                assert_eq!(c.abs(), 0.5);
            }
        }
    }
}
