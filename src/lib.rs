pub mod config;
pub mod error;
pub mod extract;
pub mod geometry;
pub mod media;
pub mod model;
pub mod report;
pub mod select;
pub mod session;
pub mod store;
pub mod upload;
