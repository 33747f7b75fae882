pub mod assets;
pub mod camera;
pub mod core;
pub mod layers;
pub mod loading;
pub mod point_cloud;
pub mod scene;
pub mod systems;
