pub mod model;
pub mod shared;
pub mod sort;
pub mod video;
