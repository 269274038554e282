use thiserror::Error;

/// Errors surfaced by the editor core.
///
/// Most user-facing paths never return these: bad variant metadata falls
/// back to defaults and a failed image decode simply never places a
/// drawable. The fallible surface is scene round-tripping and thumbnail
/// encoding.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to serialize scene: {0}")]
    SceneSerialization(#[source] serde_json::Error),

    #[error("failed to deserialize scene: {0}")]
    SceneDeserialization(#[source] serde_json::Error),

    #[error("failed to encode thumbnail: {0}")]
    ThumbnailEncode(#[from] image::ImageError),
}

pub type EditorResult<T> = Result<T, EditorError>;
