use glium::program::{ProgramCreationError, ShaderType};

/// Shader stage named in compile-error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Errors raised during scene startup. All of them are fatal: main logs the
/// message and exits with a failure code.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to create the window: {0}")]
    WindowCreation(String),
    #[error("event loop terminated abnormally: {0}")]
    EventLoop(String),
    #[error("GPU resource creation failed: {0}")]
    Gpu(String),
    #[error("failed to load the texture at {path}: {source}")]
    TextureLoad {
        path: String,
        source: image::ImageError,
    },
    #[error("{stage} shader compilation failed:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("shader program linking failed:\n{log}")]
    ShaderLink { log: String },
}

impl From<ProgramCreationError> for SceneError {
    fn from(err: ProgramCreationError) -> Self {
        match err {
            ProgramCreationError::CompilationError(log, shader_type) => {
                let stage = match shader_type {
                    ShaderType::Fragment => ShaderStage::Fragment,
                    // only vertex and fragment stages are ever submitted
                    _ => ShaderStage::Vertex,
                };
                SceneError::ShaderCompile { stage, log }
            }
            ProgramCreationError::LinkingError(log) => SceneError::ShaderLink { log },
            other => SceneError::Gpu(other.to_string()),
        }
    }
}

impl From<glium::vertex::BufferCreationError> for SceneError {
    fn from(err: glium::vertex::BufferCreationError) -> Self {
        SceneError::Gpu(format!("vertex buffer: {err}"))
    }
}

impl From<glium::index::BufferCreationError> for SceneError {
    fn from(err: glium::index::BufferCreationError) -> Self {
        SceneError::Gpu(format!("index buffer: {err}"))
    }
}

impl From<glium::texture::TextureCreationError> for SceneError {
    fn from(err: glium::texture::TextureCreationError) -> Self {
        SceneError::Gpu(format!("texture upload: {err:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_errors_keep_stage_and_log() {
        let err = ProgramCreationError::CompilationError(
            "0:1(1): error: syntax error".into(),
            ShaderType::Fragment,
        );
        match SceneError::from(err) {
            SceneError::ShaderCompile { stage, log } => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(log.contains("syntax error"));
            }
            other => panic!("expected ShaderCompile, got {other:?}"),
        }
    }

    #[test]
    fn link_errors_keep_log() {
        let err = ProgramCreationError::LinkingError("undefined reference".into());
        match SceneError::from(err) {
            SceneError::ShaderLink { log } => assert!(log.contains("undefined reference")),
            other => panic!("expected ShaderLink, got {other:?}"),
        }
    }
}
