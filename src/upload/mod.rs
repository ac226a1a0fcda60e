//! Client-side checks for avatar and quest-photo uploads.
//!
//! Everything here runs before any intent is dispatched: a rejected file
//! never reaches the store or the network.

mod form;
mod photos;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub use form::SignUpForm;
pub use photos::PhotoSet;

/// Bytes read from the start of a file to sniff its format.
const SNIFF_LEN: usize = 64;

/// MIME used when the content matches no known image format.
const UNKNOWN_MIME: &str = "application/octet-stream";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_bytes: u64,
    pub max_photos: usize,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_bytes: 5 * 1024 * 1024,
            max_photos: 5,
        }
    }
}

/// Input rejected before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{name}' is not an image")]
    NotAnImage { name: String },

    #[error("'{name}' is {size} bytes; the limit is {max} bytes")]
    TooLarge { name: String, size: u64, max: u64 },

    #[error("At most {max} photos can be attached")]
    TooManyPhotos { max: usize },

    #[error("Attach at least one photo")]
    NoPhotos,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Please add an avatar")]
    MissingAvatar,

    #[error("{field} must not be empty")]
    EmptyField { field: &'static str },

    #[error("Cannot read '{path}': {message}")]
    Unreadable { path: PathBuf, message: String },
}

/// A file picked for upload, with the metadata validation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub path: PathBuf,
    pub name: String,
    pub mime: String,
    pub size: u64,
}

impl UploadFile {
    /// Read size and sniff the MIME type from the file's leading bytes.
    ///
    /// The extension is not trusted: a text file named `photo.jpg` is
    /// reported as `application/octet-stream`.
    pub fn inspect(path: impl AsRef<Path>) -> Result<Self, ValidationError> {
        let path = path.as_ref();
        let unreadable = |err: std::io::Error| ValidationError::Unreadable {
            path: path.to_path_buf(),
            message: err.to_string(),
        };

        let size = std::fs::metadata(path).map_err(unreadable)?.len();

        let mut head = Vec::with_capacity(SNIFF_LEN);
        File::open(path)
            .map_err(unreadable)?
            .take(SNIFF_LEN as u64)
            .read_to_end(&mut head)
            .map_err(unreadable)?;

        let mime = image::guess_format(&head)
            .map(|format| format.to_mime_type())
            .unwrap_or(UNKNOWN_MIME);

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            mime: mime.to_string(),
            size,
        })
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Type first, then size.
pub fn validate_image(file: &UploadFile, limits: &UploadLimits) -> Result<(), ValidationError> {
    if !file.is_image() {
        return Err(ValidationError::NotAnImage {
            name: file.name.clone(),
        });
    }
    if file.size > limits.max_file_bytes {
        return Err(ValidationError::TooLarge {
            name: file.name.clone(),
            size: file.size,
            max: limits.max_file_bytes,
        });
    }
    Ok(())
}

/// Inspect and validate in one step.
pub fn inspect_image(
    path: impl AsRef<Path>,
    limits: &UploadLimits,
) -> Result<UploadFile, ValidationError> {
    let file = UploadFile::inspect(path)?;
    validate_image(&file, limits)?;
    Ok(file)
}
