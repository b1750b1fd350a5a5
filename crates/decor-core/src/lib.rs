pub mod clock;
pub mod config;
pub mod constants;
pub mod element;
pub mod error;
pub mod field;
pub mod grid;
pub mod layout;
pub mod lifecycle;
pub mod motion;
pub mod mount;
pub mod puff;
pub mod starfield;
pub mod state;

pub use clock::*;
pub use config::*;
pub use constants::*;
pub use element::*;
pub use error::*;
pub use field::*;
pub use grid::GridConfig;
pub use layout::generate_layout;
pub use lifecycle::*;
pub use motion::*;
pub use mount::*;
pub use puff::{puff_texture, PuffTexture};
pub use starfield::{generate_starfield, Star, StarfieldConfig};
pub use state::*;

// Shaders bundled as string constants
pub static SPRITES_WGSL: &str = include_str!("../shaders/sprites.wgsl");
pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static GRID_WGSL: &str = include_str!("../shaders/grid.wgsl");
