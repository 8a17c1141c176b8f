pub mod store;

pub use store::{MediaStore, media_key};
