pub mod ad;
pub mod listing;
pub mod loaders;
pub mod treatment;

pub use ad::{AdAudience, AdLength, AdSettings, AdTone};
pub use listing::{
    EditedImage, GenerationResult, ImageEntry, ImagePayload, ImageStatus, Listing, PropertyImage,
};
pub use loaders::{load_all_toml_files, load_toml_to_listing};
pub use treatment::Treatment;
