use std::fmt;

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings field name is unknown.
    InvalidKey(String),
    /// The settings store lock was poisoned by a panicking writer.
    Unavailable(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::Unavailable(msg) => write!(f, "Settings unavailable: {}", msg),
        }
    }
}

impl std::error::Error for SettingsError {}

// === FileStoreError ===

/// Errors raised by the destination file store.
#[derive(Debug)]
pub enum FileStoreError {
    /// The path is empty, absolute, or escapes the vault root.
    InvalidPath(String),
    /// The file to append to does not exist.
    NotFound(String),
    /// The underlying file system operation failed.
    Io(String),
}

impl fmt::Display for FileStoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStoreError::InvalidPath(path) => write!(f, "Invalid vault path: {}", path),
            FileStoreError::NotFound(path) => write!(f, "File not found: {}", path),
            FileStoreError::Io(msg) => write!(f, "File store I/O error: {}", msg),
        }
    }
}

impl std::error::Error for FileStoreError {}

// === SyncError ===

/// Errors that abort a sync run.
#[derive(Debug)]
pub enum SyncError {
    /// The instance URL or query could not be turned into a request URL.
    InvalidUrl(String),
    /// The request could not be sent or the response body could not be read.
    Network(String),
    /// The server answered with a non-success status.
    Status { status: u16, body: String },
    /// The response body is not valid JSON.
    InvalidResponse(String),
    /// The destination path exists but is not a file.
    DestinationNotFile(String),
    /// The destination could not be looked up or created.
    Destination(String),
    /// An append failed after `written` blocks had already been appended.
    Append { written: usize, message: String },
}

impl SyncError {
    /// True when the run failed before anything was written to the destination.
    pub fn is_before_write(&self) -> bool {
        match self {
            SyncError::Append { written, .. } => *written == 0,
            _ => true,
        }
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::InvalidUrl(msg) => write!(f, "Invalid Linkding URL: {}", msg),
            SyncError::Network(msg) => write!(f, "Linkding network error: {}", msg),
            SyncError::Status { status, body } => {
                write!(f, "Linkding returned HTTP {}: {}", status, body)
            }
            SyncError::InvalidResponse(msg) => {
                write!(f, "Invalid Linkding response: {}", msg)
            }
            SyncError::DestinationNotFile(path) => {
                write!(f, "Destination path is not a file: {}", path)
            }
            SyncError::Destination(msg) => write!(f, "Destination error: {}", msg),
            SyncError::Append { written, message } => write!(
                f,
                "Append failed after {} bookmark(s) were written: {}",
                written, message
            ),
        }
    }
}

impl std::error::Error for SyncError {}
