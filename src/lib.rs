pub mod config;
pub mod document;
pub mod error;
pub mod loader;
pub mod logging;
pub mod markup;
pub mod ready;
pub mod renderer;

pub use gallery_model as model;
pub use renderer::{GalleryRenderer, Rendered};
