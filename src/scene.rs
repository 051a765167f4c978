pub mod camera;
pub mod context;
pub mod face;
pub mod mesh;

pub use context::Scene;
