pub mod export_service;
pub mod image_edit_service;
pub mod remote_client;
pub mod rewrite_service;
pub mod studio_client;

pub use export_service::{build_manifest, image_file_name, ExportService, MANIFEST_FILE_NAME};
pub use image_edit_service::ImageEditService;
pub use remote_client::RemoteEditClient;
pub use rewrite_service::RewriteService;
pub use studio_client::StudioClient;
