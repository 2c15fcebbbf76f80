//! 2D building blocks drawn in internal screen space.

pub mod font;
pub mod menu;
pub mod particle;
pub mod rect;
pub mod sprite;
pub mod tilemap;

pub use font::BitmapFont;
pub use menu::Menu;
pub use particle::{ParticleSystem, MAX_PARTICLES};
pub use rect::Rect;
pub use sprite::{Sprite, SpriteSheet};
pub use tilemap::{TileId, TileMap};
