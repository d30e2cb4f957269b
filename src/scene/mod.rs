pub mod prefabs;
pub mod scenario;
pub mod test_scene;
