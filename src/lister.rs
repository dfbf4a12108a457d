//! Directory listing for the fixed image categories.
//!
//! Every call re-reads the category directory; there is no cache.

use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::category::{Category, ImageRef};
use crate::error::ListError;

/// Extensions (lowercase, without dot) that are listed as images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Return `true` if `path` has an allowed image extension, ignoring case.
#[must_use]
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            IMAGE_EXTENSIONS.iter().any(|e| *e == ext)
        })
}

/// Lists image files found under `<public-root>/images/<category>`.
#[derive(Debug, Clone)]
pub struct ImageLister {
    public_root: PathBuf,
}

impl ImageLister {
    pub fn new(public_root: impl Into<PathBuf>) -> Self {
        Self {
            public_root: public_root.into(),
        }
    }

    pub fn public_root(&self) -> &Path {
        &self.public_root
    }

    /// Directory a category resolves to. Only the public root is configurable.
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.public_root.join("images").join(category.as_str())
    }

    /// List a category given by name.
    ///
    /// # Errors
    /// [`ListError::InvalidCategory`] for unknown names, otherwise as
    /// [`ImageLister::list_category`].
    pub fn list(&self, category: &str) -> Result<Vec<ImageRef>, ListError> {
        let category: Category = category.parse()?;
        self.list_category(category)
    }

    /// Enumerate the category directory in filesystem order.
    ///
    /// # Errors
    /// [`ListError::DirectoryNotFound`] if the directory is absent,
    /// [`ListError::ReadFailure`] for any other I/O problem.
    #[instrument(skip(self), fields(root = %self.public_root.display()))]
    pub fn list_category(&self, category: Category) -> Result<Vec<ImageRef>, ListError> {
        let dir = self.category_dir(category);
        match dir.metadata() {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ListError::read_failure(
                    dir,
                    io::Error::other("image path is not a directory"),
                ));
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(ListError::DirectoryNotFound(dir));
            }
            Err(err) => return Err(ListError::read_failure(dir, err)),
        }

        let mut images = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = match entry {
                Ok(entry) => entry,
                // Depth 0 means the directory itself could not be opened.
                Err(err) if err.depth() == 0 => {
                    return Err(ListError::read_failure(&dir, err.into()));
                }
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !entry.file_type().is_file() || !is_supported_image(path) {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => images.push(ImageRef::new(category, name)),
                None => debug!(path = %path.display(), "skipping non UTF-8 file name"),
            }
        }

        debug!(count = images.len(), "listed images");
        Ok(images)
    }
}

/// Something that can list a category asynchronously.
pub trait ImageSource: Send + Sync + 'static {
    fn fetch(
        &self,
        category: Category,
    ) -> impl Future<Output = Result<Vec<ImageRef>, ListError>> + Send;
}

impl ImageSource for ImageLister {
    async fn fetch(&self, category: Category) -> Result<Vec<ImageRef>, ListError> {
        let lister = self.clone();
        let dir = self.category_dir(category);
        tokio::task::spawn_blocking(move || lister.list_category(category))
            .await
            .map_err(|err| ListError::read_failure(dir, io::Error::other(err.to_string())))?
    }
}
