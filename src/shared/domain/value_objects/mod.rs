mod catalog_id;
mod media_kind;

pub use catalog_id::CatalogId;
pub use media_kind::MediaKind;
