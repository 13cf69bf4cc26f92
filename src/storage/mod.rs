pub mod format;
pub mod hash;
pub mod persist;

pub use format::{ImageFormatTag, detect_image_format};
pub use hash::short_digest;
pub use persist::{DEFAULT_IMAGES_DIR, persist_base64_image, strip_data_uri_prefix};
