pub mod camera;
pub mod core;
pub mod light;
pub mod loader;
pub mod material;
pub mod renderer;
pub mod sampler;
pub mod shader;
pub mod shape;
