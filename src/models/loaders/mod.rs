pub mod image_loader;
pub mod toml_loader;

pub use image_loader::{load_images_from_folder, UploadedImage};
pub use toml_loader::load_style_preset;
