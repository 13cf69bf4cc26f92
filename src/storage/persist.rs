use std::fs;
use std::path::Path;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;

use crate::error::PersistError;
use crate::storage::{detect_image_format, short_digest};

pub const DEFAULT_IMAGES_DIR: &str = "images";

const DATA_URI_SCHEME: &str = "data:";

/// Returns the payload part of `data:<mime>;base64,<payload>`, or the input
/// unchanged when it carries no data-URI prefix.
pub fn strip_data_uri_prefix(base64_data: &str) -> &str {
    if !base64_data.starts_with(DATA_URI_SCHEME) {
        return base64_data;
    }
    match base64_data.split_once(',') {
        Some((_, payload)) => payload,
        None => "",
    }
}

/// Decodes a base64 image, sniffs its format and writes it into `target_dir`
/// as `{unix_seconds}_{digest}.{ext}`. Returns the file name, not the path.
///
/// Two calls in the same second with the same leading 100 bytes produce the
/// same name; the later write replaces the earlier file.
pub fn persist_base64_image(
    base64_data: &str,
    target_dir: impl AsRef<Path>,
) -> Result<String, PersistError> {
    let target_dir = target_dir.as_ref();
    let payload = strip_data_uri_prefix(base64_data).trim();
    let image_bytes = STANDARD.decode(payload)?;

    let format = detect_image_format(&image_bytes).ok_or(PersistError::UnknownFormat)?;

    fs::create_dir_all(target_dir).map_err(|source| PersistError::Write {
        path: target_dir.to_path_buf(),
        source,
    })?;

    let timestamp = Utc::now().timestamp();
    let filename = format!(
        "{timestamp}_{}.{}",
        short_digest(&image_bytes),
        format.extension()
    );
    let path = target_dir.join(&filename);
    fs::write(&path, &image_bytes).map_err(|source| PersistError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        format = %format,
        size = image_bytes.len(),
        "saved generated image"
    );
    Ok(filename)
}
