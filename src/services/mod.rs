pub mod ad_copy_service;
pub mod image_edit_service;
pub mod result_writer;
pub mod warn_writer;

pub use ad_copy_service::AdCopyService;
pub use image_edit_service::ImageEditService;
pub use result_writer::ResultWriter;
pub use warn_writer::WarnWriter;
