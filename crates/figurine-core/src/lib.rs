pub mod config;
pub mod consts;
pub mod crop;
pub mod error;
pub mod geometry;
pub mod surface;
pub mod viewport;
