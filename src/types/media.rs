use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

/// Upper bound the backend accepts for a single image upload.
pub const MAX_IMAGE_BYTES: u64 = 16 * 1024 * 1024;

/// Voice notes are a few seconds long; anything past this is not one.
pub const MAX_AUDIO_BYTES: u64 = 64 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Please select a valid image file!")]
    NotAnImage { mime: String },

    #[error("Please select a valid audio file!")]
    NotAudio { mime: String },

    #[error("Recording is too large ({size} bytes); the limit is 64MB.")]
    AudioTooLarge { size: u64 },

    #[error("Image is too large ({size} bytes); the limit is 16MB.")]
    TooLarge { size: u64 },

    #[error("{path} is not a regular file")]
    NotAFile { path: String },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A file picked from disk, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { file_name: file_name.into(), mime: mime.into(), bytes }
    }

    /// Stats `path` without reading it. Only regular files are accepted.
    fn stat(path: &Path) -> Result<u64, UploadError> {
        let metadata = fs::metadata(path).map_err(|source| UploadError::Read {
            path: path.display().to_string(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(UploadError::NotAFile { path: path.display().to_string() });
        }
        Ok(metadata.len())
    }

    /// Reads at most `limit + 1` bytes so a file that grew after `stat`
    /// still trips the size check.
    fn read(path: &Path, mime: String, limit: u64) -> Result<Self, UploadError> {
        let read_error = |source| UploadError::Read {
            path: path.display().to_string(),
            source,
        };
        let mut bytes = Vec::new();
        fs::File::open(path)
            .map_err(read_error)?
            .take(limit.saturating_add(1))
            .read_to_end(&mut bytes)
            .map_err(read_error)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self { file_name, mime, bytes })
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// `data:<mime>;base64,<payload>` rendition of the file.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime, STANDARD.encode(&self.bytes))
    }
}

fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().essence_str().to_string()
}

/// Plant photo for the analyze routes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedImage(pub MediaFile);

impl SelectedImage {
    /// Type and size are checked from the path and metadata before any
    /// byte is read.
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let mime = guess_mime(path);
        if !mime.starts_with("image/") {
            return Err(UploadError::NotAnImage { mime });
        }
        let size = MediaFile::stat(path)?;
        if size > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge { size });
        }
        Self::from_file(MediaFile::read(path, mime, MAX_IMAGE_BYTES)?)
    }

    pub fn from_file(file: MediaFile) -> Result<Self, UploadError> {
        if !file.mime.starts_with("image/") {
            return Err(UploadError::NotAnImage { mime: file.mime });
        }
        if file.size() as u64 > MAX_IMAGE_BYTES {
            return Err(UploadError::TooLarge { size: file.size() as u64 });
        }
        Ok(Self(file))
    }

    pub fn file(&self) -> &MediaFile {
        &self.0
    }
}

/// Recorded symptom description for the voice route.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip(pub MediaFile);

impl AudioClip {
    pub fn from_path(path: &Path) -> Result<Self, UploadError> {
        let mime = guess_mime(path);
        if !mime.starts_with("audio/") {
            return Err(UploadError::NotAudio { mime });
        }
        let size = MediaFile::stat(path)?;
        if size > MAX_AUDIO_BYTES {
            return Err(UploadError::AudioTooLarge { size });
        }
        let file = MediaFile::read(path, mime, MAX_AUDIO_BYTES)?;
        if file.size() as u64 > MAX_AUDIO_BYTES {
            return Err(UploadError::AudioTooLarge { size: file.size() as u64 });
        }
        Ok(Self(file))
    }

    pub fn file(&self) -> &MediaFile {
        &self.0
    }
}
