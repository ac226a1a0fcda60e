use std::path::Path;

use super::{inspect_image, UploadFile, UploadLimits, ValidationError};

/// Photos attached to a quest completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSet {
    files: Vec<UploadFile>,
}

impl PhotoSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[UploadFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn is_full(&self, limits: &UploadLimits) -> bool {
        self.files.len() >= limits.max_photos
    }

    /// Add a batch of files.
    ///
    /// All or nothing: every file must pass validation and the total must
    /// stay within `max_photos`, otherwise the set is left unchanged.
    pub fn add_batch<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        limits: &UploadLimits,
    ) -> Result<usize, ValidationError> {
        let mut batch = Vec::with_capacity(paths.len());
        for path in paths {
            batch.push(inspect_image(path, limits)?);
        }
        self.add_files(batch, limits)
    }

    /// Add already inspected files under the same all-or-nothing rule.
    pub fn add_files(
        &mut self,
        batch: Vec<UploadFile>,
        limits: &UploadLimits,
    ) -> Result<usize, ValidationError> {
        for file in &batch {
            super::validate_image(file, limits)?;
        }
        if self.files.len() + batch.len() > limits.max_photos {
            return Err(ValidationError::TooManyPhotos {
                max: limits.max_photos,
            });
        }
        let added = batch.len();
        self.files.extend(batch);
        Ok(added)
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Files ready to submit; an empty set is rejected.
    pub fn for_submit(&self) -> Result<Vec<UploadFile>, ValidationError> {
        if self.files.is_empty() {
            return Err(ValidationError::NoPhotos);
        }
        Ok(self.files.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn jpeg(name: &str) -> UploadFile {
        UploadFile {
            path: PathBuf::from(name),
            name: name.to_string(),
            mime: "image/jpeg".to_string(),
            size: 1024,
        }
    }

    #[test]
    fn overflowing_batch_adds_nothing() {
        let limits = UploadLimits::default();
        let mut set = PhotoSet::new();
        set.add_files(vec![jpeg("a"), jpeg("b"), jpeg("c")], &limits)
            .unwrap();

        let err = set
            .add_files(vec![jpeg("d"), jpeg("e"), jpeg("f")], &limits)
            .unwrap_err();
        assert_eq!(err, ValidationError::TooManyPhotos { max: 5 });
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn one_bad_file_rejects_whole_batch() {
        let limits = UploadLimits::default();
        let mut bad = jpeg("doc");
        bad.mime = "application/pdf".to_string();

        let mut set = PhotoSet::new();
        assert!(set.add_files(vec![jpeg("a"), bad], &limits).is_err());
        assert!(set.is_empty());
    }

    #[test]
    fn empty_set_cannot_be_submitted() {
        assert_eq!(
            PhotoSet::new().for_submit().unwrap_err(),
            ValidationError::NoPhotos
        );
    }
}
