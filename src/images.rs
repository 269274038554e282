//! User-uploaded image tracking.
//!
//! Uploads are tracked as they move through the upload pipeline so the
//! library panel can show progress and failures alongside finished previews.
//! Persistence is behind [`ImageStore`] so the browser-storage backend can
//! be swapped out in tests.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an upload currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Uploading,
    Complete,
    Error,
}

/// One image the user has added to their library.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub id: Uuid,
    /// Data URL used for the library preview and canvas placement.
    pub preview: String,
    pub status: ImageStatus,
    /// Upload progress, 0.0 to 1.0. Only meaningful while uploading.
    pub progress: f32,
    pub error: Option<String>,
}

impl UploadedImage {
    pub fn uploading(preview: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            preview: preview.into(),
            status: ImageStatus::Uploading,
            progress: 0.0,
            error: None,
        }
    }
}

/// Backend for persisting the library between sessions.
pub trait ImageStore {
    fn persist(&mut self, images: &[UploadedImage]);
    fn load_all(&self) -> Vec<UploadedImage>;
    fn clear(&mut self);
}

/// In-memory store, the default when no session backend is wired up.
#[derive(Debug, Default)]
pub struct MemoryImageStore {
    saved: Vec<UploadedImage>,
}

impl ImageStore for MemoryImageStore {
    fn persist(&mut self, images: &[UploadedImage]) {
        self.saved = images.to_vec();
    }

    fn load_all(&self) -> Vec<UploadedImage> {
        self.saved.clone()
    }

    fn clear(&mut self) {
        self.saved.clear();
    }
}

/// Ordered collection of the user's uploads.
pub struct ImageLibrary {
    images: Vec<UploadedImage>,
    store: Box<dyn ImageStore>,
}

impl ImageLibrary {
    pub fn new(store: Box<dyn ImageStore>) -> Self {
        let images = store.load_all();
        Self { images, store }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryImageStore::default()))
    }

    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    pub fn get(&self, id: Uuid) -> Option<&UploadedImage> {
        self.images.iter().find(|img| img.id == id)
    }

    /// Register a new upload in the Uploading state and return its id.
    pub fn begin_upload(&mut self, preview: impl Into<String>) -> Uuid {
        let image = UploadedImage::uploading(preview);
        let id = image.id;
        info!("upload started: {id}");
        self.images.push(image);
        id
    }

    pub fn set_progress(&mut self, id: Uuid, progress: f32) {
        if let Some(image) = self.images.iter_mut().find(|img| img.id == id) {
            image.progress = progress.clamp(0.0, 1.0);
        }
    }

    /// Mark an upload finished and persist the library.
    pub fn complete_upload(&mut self, id: Uuid) {
        if let Some(image) = self.images.iter_mut().find(|img| img.id == id) {
            image.status = ImageStatus::Complete;
            image.progress = 1.0;
            self.store.persist(&self.images);
        } else {
            warn!("complete_upload for unknown image {id}");
        }
    }

    pub fn fail_upload(&mut self, id: Uuid, message: impl Into<String>) {
        if let Some(image) = self.images.iter_mut().find(|img| img.id == id) {
            image.status = ImageStatus::Error;
            image.error = Some(message.into());
        }
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.images.len();
        self.images.retain(|img| img.id != id);
        let removed = self.images.len() != before;
        if removed {
            self.store.persist(&self.images);
        }
        removed
    }
}
