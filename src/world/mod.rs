mod backdrop;
mod camera;
mod grid;
mod texture;
mod wall;

pub use backdrop::{Backdrop, PlaneLayer};

pub use camera::Camera;

pub use grid::WorldGrid;

pub use texture::{Texture, TextureBank, TextureError, TextureId};

pub use wall::{FillState, Fog, Surface, Wall};
