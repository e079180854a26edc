pub mod batch_item;
pub mod global_config;
pub mod loaders;

pub use batch_item::{BatchItem, ItemId, ItemStatus};
pub use global_config::{GlobalConfig, WordReplacement};
pub use loaders::{load_images_from_folder, load_style_preset, UploadedImage};
