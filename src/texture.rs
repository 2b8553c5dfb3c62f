use glium::texture::{RawImage2d, SrgbTexture2d};
use glium::Display;
use glutin::surface::WindowSurface;
use tracing::info;

use crate::error::SceneError;

pub const SURFACE_TEXTURE_PATH: &str = "assets/brick.png";
pub const RIPPLE_TEXTURE_PATH: &str = "assets/water_ripple.png";

/// Decodes an image file and uploads it as an sRGB texture with mipmaps.
/// Rows are flipped during upload so the image's top row ends up at v = 1.
pub fn load(display: &Display<WindowSurface>, path: &str) -> Result<SrgbTexture2d, SceneError> {
    let image = image::open(path)
        .map_err(|source| SceneError::TextureLoad {
            path: path.to_owned(),
            source,
        })?
        .to_rgba8();
    let dimensions = image.dimensions();
    let raw = RawImage2d::from_raw_rgba_reversed(&image.into_raw(), dimensions);
    let texture = SrgbTexture2d::new(display, raw)?;
    info!("loaded texture from {path}");
    Ok(texture)
}
