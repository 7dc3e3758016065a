pub mod config;
pub mod consts;
pub mod error;
pub mod geometry;
pub mod grades;
pub mod interaction;
pub mod io;
pub mod landmarks;
pub mod provider;
pub mod render;
pub mod session;
pub mod viewport;
