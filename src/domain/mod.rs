pub mod model;
pub mod primitive;
