use glam::{Mat4, Vec3};
use glium::texture::SrgbTexture2d;
use glium::uniforms::{
    MagnifySamplerFilter, MinifySamplerFilter, Sampler, SamplerWrapFunction, Uniforms,
};
use glium::{uniform, Display, DrawError, DrawParameters, Frame, Program};
use glutin::surface::WindowSurface;

use crate::camera::Camera;
use crate::error::SceneError;
use crate::mesh::Mesh;
use crate::{shader, texture};

const LIGHT_POSITION: Vec3 = Vec3::new(2.0, 6.0, 3.0);
const LIGHT_COLOR: [f32; 3] = [1.0, 0.95, 0.8];
const LIGHT_AMBIENT_STRENGTH: f32 = 0.3;
const LIGHT_DIFFUSE_STRENGTH: f32 = 1.0;
const LIGHT_SPECULAR_STRENGTH: f32 = 0.0;

// the spotlight trails the camera and points wherever it looks
const SPOTLIGHT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.5);
const SPOTLIGHT_COLOR: [f32; 3] = [1.0, 0.9, 0.6];
const SPOTLIGHT_CUTOFF_DEGREES: f32 = 25.5;
const SPOTLIGHT_AMBIENT_STRENGTH: f32 = 0.05;
const SPOTLIGHT_DIFFUSE_STRENGTH: f32 = 0.15;
const SPOTLIGHT_SPECULAR_STRENGTH: f32 = 0.0;

/// Pool and walkway share one translation; tables are placed around them.
const SCENE_OFFSET: Vec3 = Vec3::new(0.0, -0.5, 0.0);
const TABLE_SCALE: f32 = 0.2;
const TABLE_PLACEMENTS: [Vec3; 6] = [
    Vec3::new(1.4, -0.4, 0.0),
    Vec3::new(1.4, -0.4, 0.7),
    Vec3::new(1.4, -0.4, -0.5),
    Vec3::new(-1.4, -0.4, 0.0),
    Vec3::new(-1.4, -0.4, 0.7),
    Vec3::new(-1.4, -0.4, -0.5),
];

/// Everything the render loop needs: GPU resources, draw parameters, the
/// table instance list, and the camera.
pub struct Application {
    params: DrawParameters<'static>,
    program: Program,
    surface_texture: SrgbTexture2d,
    ripple_texture: SrgbTexture2d,
    pool: Mesh,
    walkway: Mesh,
    table: Mesh,
    tables: Vec<Mat4>,
    pub camera: Camera,
}

impl Application {
    pub fn new(display: &Display<WindowSurface>, aspect: f32) -> Result<Self, SceneError> {
        let surface_texture = texture::load(display, texture::SURFACE_TEXTURE_PATH)?;
        let ripple_texture = texture::load(display, texture::RIPPLE_TEXTURE_PATH)?;
        let program = shader::scene_program(display)?;

        Ok(Self {
            params: glium::DrawParameters {
                depth: glium::Depth {
                    test: glium::DepthTest::IfLess,
                    write: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            program,
            surface_texture,
            ripple_texture,
            pool: Mesh::pool(display)?,
            walkway: Mesh::walkway(display)?,
            table: Mesh::cube(display)?,
            tables: TABLE_PLACEMENTS
                .iter()
                .map(|&placement| {
                    Mat4::from_translation(placement) * Mat4::from_scale(Vec3::splat(TABLE_SCALE))
                })
                .collect(),
            camera: Camera::new(aspect),
        })
    }

    /// Draws one frame: tables first against the surface texture, then the
    /// pool basin with the ripple texture, then the walkway ring.
    pub fn draw_frame(&mut self, target: &mut Frame) -> Result<(), DrawError> {
        self.camera.update();

        for &model in &self.tables {
            self.table
                .draw(target, &self.program, &self.uniforms(model, false), &self.params)?;
        }

        let basin_model = Mat4::from_translation(SCENE_OFFSET);
        self.pool
            .draw(target, &self.program, &self.uniforms(basin_model, true), &self.params)?;
        self.walkway
            .draw(target, &self.program, &self.uniforms(basin_model, false), &self.params)?;

        Ok(())
    }

    /// Full uniform set for one draw call. Only the model matrix and the pool
    /// flag vary between calls within a frame.
    fn uniforms(&self, model: Mat4, is_pool: bool) -> impl Uniforms + '_ {
        let spotlight_position = self.camera.position - SPOTLIGHT_OFFSET;
        let spotlight_cutoff = SPOTLIGHT_CUTOFF_DEGREES.to_radians().cos();

        uniform! {
            model: model.to_cols_array_2d(),
            view: self.camera.view_matrix().to_cols_array_2d(),
            projection: self.camera.projection_matrix().to_cols_array_2d(),
            view_pos: self.camera.position.to_array(),

            light_position: LIGHT_POSITION.to_array(),
            light_color: LIGHT_COLOR,
            light_ambient_strength: LIGHT_AMBIENT_STRENGTH,
            light_diffuse_strength: LIGHT_DIFFUSE_STRENGTH,
            light_specular_strength: LIGHT_SPECULAR_STRENGTH,

            spotlight_position: spotlight_position.to_array(),
            spotlight_direction: self.camera.front().to_array(),
            spotlight_color: SPOTLIGHT_COLOR,
            spotlight_cut_off: spotlight_cutoff,
            spotlight_outer_cut_off: spotlight_cutoff,
            spotlight_ambient_strength: SPOTLIGHT_AMBIENT_STRENGTH,
            spotlight_diffuse_strength: SPOTLIGHT_DIFFUSE_STRENGTH,
            spotlight_specular_strength: SPOTLIGHT_SPECULAR_STRENGTH,

            surface_tex: sampled(&self.surface_texture),
            ripple_tex: sampled(&self.ripple_texture),
            is_pool: is_pool,
        }
    }
}

/// Repeat-wrapped trilinear sampling, matching the original scene's texture
/// parameters.
fn sampled(texture: &SrgbTexture2d) -> Sampler<'_, SrgbTexture2d> {
    texture
        .sampled()
        .wrap_function(SamplerWrapFunction::Repeat)
        .minify_filter(MinifySamplerFilter::LinearMipmapLinear)
        .magnify_filter(MagnifySamplerFilter::Linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_tables_mirror_across_the_pool() {
        assert_eq!(TABLE_PLACEMENTS.len(), 6);
        for placement in &TABLE_PLACEMENTS {
            let mirrored = Vec3::new(-placement.x, placement.y, placement.z);
            assert!(TABLE_PLACEMENTS.contains(&mirrored));
        }
    }

    #[test]
    fn table_transform_scales_uniformly() {
        let model = Mat4::from_translation(TABLE_PLACEMENTS[0])
            * Mat4::from_scale(Vec3::splat(TABLE_SCALE));
        let corner = model.transform_point3(Vec3::splat(0.5));
        let expected = TABLE_PLACEMENTS[0] + Vec3::splat(0.5 * TABLE_SCALE);
        assert!((corner - expected).length() < 1e-6);
    }
}
