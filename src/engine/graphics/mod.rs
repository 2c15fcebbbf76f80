pub mod draw;
pub mod procedural;
pub mod renderer;
pub mod scaling;
pub mod texture;
pub mod vertex;

pub use draw::{Color, DrawList, Point3, UvRect};
pub use renderer::Renderer;
pub use scaling::RenderScaling;
pub use texture::{Texture, TextureId};
pub use vertex::Vertex;
