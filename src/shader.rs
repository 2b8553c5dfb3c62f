use glium::{Display, Program};
use glutin::surface::WindowSurface;

use crate::error::SceneError;

const VERTEX_SHADER: &str = "
    #version 330 core

    layout(location = 0) in vec3 position;
    layout(location = 1) in vec2 tex_coords;

    out vec2 v_tex_coords;
    out vec3 v_frag_pos;

    uniform mat4 model;
    uniform mat4 view;
    uniform mat4 projection;

    void main() {
        v_frag_pos = position;
        gl_Position = projection * view * model * vec4(position, 1.0);
        v_tex_coords = tex_coords;
    }
";

const FRAGMENT_SHADER: &str = "
    #version 330 core

    in vec2 v_tex_coords;
    in vec3 v_frag_pos;
    out vec4 fragment_color;

    uniform vec3 light_position;
    uniform vec3 light_color;
    uniform float light_ambient_strength;
    uniform float light_diffuse_strength;
    uniform float light_specular_strength;

    uniform vec3 spotlight_position;
    uniform vec3 spotlight_direction;
    uniform vec3 spotlight_color;
    uniform float spotlight_cut_off;
    uniform float spotlight_outer_cut_off;
    uniform float spotlight_ambient_strength;
    uniform float spotlight_diffuse_strength;
    uniform float spotlight_specular_strength;

    uniform vec3 view_pos;
    uniform sampler2D surface_tex;
    uniform sampler2D ripple_tex;
    uniform bool is_pool;

    void main() {
        // every face shades with a flat upward normal
        vec3 norm = vec3(0.0, 1.0, 0.0);

        vec3 light_dir = normalize(light_position - v_frag_pos);
        float diff = max(dot(norm, light_dir), 0.0);
        vec3 diffuse = light_diffuse_strength * diff * light_color;

        vec3 view_dir = normalize(view_pos - v_frag_pos);
        vec3 reflect_dir = reflect(-light_dir, norm);
        float spec = pow(max(dot(view_dir, reflect_dir), 0.0), 128.0);
        vec3 specular = light_specular_strength * spec * light_color;

        vec3 ambient = light_ambient_strength * light_color;
        vec3 result = ambient + diffuse + specular;

        vec3 spotlight_dir = normalize(spotlight_position - v_frag_pos);
        float theta = dot(spotlight_dir, normalize(-spotlight_direction));
        float epsilon = spotlight_cut_off - spotlight_outer_cut_off;
        float intensity = clamp((theta - spotlight_outer_cut_off) / epsilon, 0.0, 1.0);
        vec3 spotlight_effect = intensity
            * (spotlight_ambient_strength * ambient
                + spotlight_diffuse_strength * diffuse
                + spotlight_specular_strength * specular)
            * spotlight_color;
        result += spotlight_effect * intensity;

        if (is_pool) {
            vec4 pool_color = vec4(0.0, 0.4, 0.7, 1.0);
            vec4 ripple_color = texture(ripple_tex, v_tex_coords);
            fragment_color = vec4(result, 1.0) * mix(pool_color, ripple_color, 0.5);
        } else {
            fragment_color = vec4(result, 1.0) * texture(surface_tex, v_tex_coords);
        }
    }
";

/// Compiles and links the single scene program. Compile failures surface as
/// [`SceneError::ShaderCompile`] with the driver log, link failures as
/// [`SceneError::ShaderLink`]; both abort startup.
pub fn scene_program(display: &Display<WindowSurface>) -> Result<Program, SceneError> {
    let program = Program::from_source(display, VERTEX_SHADER, FRAGMENT_SHADER, None)?;
    Ok(program)
}
