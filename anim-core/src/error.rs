//! Error types for ANIM operations
//!
//! Every failure raised by the codec, the validator, the legacy converter and
//! the pixel pipeline is one [`AnimError`] variant. Each variant maps to a
//! stable [`ErrorCode`] so callers can switch on the failure kind without
//! parsing messages.

use core::fmt::Write as _;

/// Broad concern an error code belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Binary layout and header problems
    Format,
    /// Structural, type and range checks
    Validation,
    /// Legacy format conversion
    Conversion,
    /// Pixel codec, merging and extraction
    Processing,
}

impl core::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ErrorCategory::Format => "format",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Conversion => "conversion",
            ErrorCategory::Processing => "processing",
        };
        write!(f, "{msg}")
    }
}

/// Stable numeric error codes
///
/// Values are part of the file format contract and are never reassigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    InvalidSignature = 1001,
    UnsupportedVersion = 1002,
    CorruptedHeader = 1003,
    InvalidImageData = 1004,
    InvalidMetadata = 1005,
    FileTruncated = 1006,
    SizeMismatch = 1007,

    ValidationError = 2001,
    TypeMismatch = 2002,
    MissingField = 2003,
    OutOfRange = 2004,
    InvalidArrayLength = 2005,

    ConversionFailed = 3001,
    JsonParseError = 3002,
    Base64DecodeError = 3003,

    PixelCodecError = 4001,
    ImageMergeError = 4002,
    FrameExtractionError = 4003,
}

impl ErrorCode {
    /// Numeric value of the code
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Upper snake case name of the code
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::InvalidSignature => "INVALID_SIGNATURE",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::CorruptedHeader => "CORRUPTED_HEADER",
            ErrorCode::InvalidImageData => "INVALID_IMAGE_DATA",
            ErrorCode::InvalidMetadata => "INVALID_METADATA",
            ErrorCode::FileTruncated => "FILE_TRUNCATED",
            ErrorCode::SizeMismatch => "SIZE_MISMATCH",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::TypeMismatch => "TYPE_MISMATCH",
            ErrorCode::MissingField => "MISSING_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidArrayLength => "INVALID_ARRAY_LENGTH",
            ErrorCode::ConversionFailed => "CONVERSION_FAILED",
            ErrorCode::JsonParseError => "JSON_PARSE_ERROR",
            ErrorCode::Base64DecodeError => "BASE64_DECODE_ERROR",
            ErrorCode::PixelCodecError => "PIXEL_CODEC_ERROR",
            ErrorCode::ImageMergeError => "IMAGE_MERGE_ERROR",
            ErrorCode::FrameExtractionError => "FRAME_EXTRACTION_ERROR",
        }
    }

    /// Convert from the numeric representation
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            1001 => Some(ErrorCode::InvalidSignature),
            1002 => Some(ErrorCode::UnsupportedVersion),
            1003 => Some(ErrorCode::CorruptedHeader),
            1004 => Some(ErrorCode::InvalidImageData),
            1005 => Some(ErrorCode::InvalidMetadata),
            1006 => Some(ErrorCode::FileTruncated),
            1007 => Some(ErrorCode::SizeMismatch),
            2001 => Some(ErrorCode::ValidationError),
            2002 => Some(ErrorCode::TypeMismatch),
            2003 => Some(ErrorCode::MissingField),
            2004 => Some(ErrorCode::OutOfRange),
            2005 => Some(ErrorCode::InvalidArrayLength),
            3001 => Some(ErrorCode::ConversionFailed),
            3002 => Some(ErrorCode::JsonParseError),
            3003 => Some(ErrorCode::Base64DecodeError),
            4001 => Some(ErrorCode::PixelCodecError),
            4002 => Some(ErrorCode::ImageMergeError),
            4003 => Some(ErrorCode::FrameExtractionError),
            _ => None,
        }
    }

    /// Concern this code is grouped under
    pub const fn category(self) -> ErrorCategory {
        match self.as_u16() / 1000 {
            1 => ErrorCategory::Format,
            2 => ErrorCategory::Validation,
            3 => ErrorCategory::Conversion,
            _ => ErrorCategory::Processing,
        }
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "E{} {}", self.as_u16(), self.name())
    }
}

/// Errors that can occur during ANIM operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnimError {
    #[error("invalid file signature: expected \"ANIM\", found {actual:?}")]
    InvalidSignature { actual: String, position: usize },

    #[error("unsupported format version {version}")]
    UnsupportedVersion { version: u32, position: usize },

    #[error("corrupted header: {message}")]
    CorruptedHeader { message: String, position: usize },

    #[error("invalid image data: {message}")]
    InvalidImageData { message: String },

    #[error("invalid metadata: {message}")]
    InvalidMetadata { message: String, position: Option<usize> },

    #[error("file truncated: needed {needed} bytes, {available} available")]
    FileTruncated {
        position: usize,
        needed: usize,
        available: usize,
    },

    #[error("size mismatch: {message}")]
    SizeMismatch { message: String, position: Option<usize> },

    #[error("validation failed: {message}")]
    Validation {
        message: String,
        missing_fields: Vec<String>,
        field_path: Option<String>,
    },

    #[error("type mismatch at {field_path}: expected {expected_type}, got {actual_type}")]
    TypeMismatch {
        field_path: String,
        expected_type: String,
        actual_type: String,
    },

    #[error("missing required fields: {}", .missing_fields.join(", "))]
    MissingField {
        missing_fields: Vec<String>,
        field_path: Option<String>,
    },

    #[error("value out of range at {field_path}: {message}")]
    OutOfRange { field_path: String, message: String },

    #[error("invalid array length at {field_path}: expected {expected}, got {actual}")]
    InvalidArrayLength {
        field_path: String,
        expected: String,
        actual: usize,
    },

    #[error("conversion failed: {message}")]
    ConversionFailed { message: String },

    #[error("JSON parse error at line {line}, column {column}: {message}")]
    JsonParse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("base64 decode failed for bitmap {index}: {message}")]
    Base64Decode { index: usize, message: String },

    #[error("pixel codec failure: {message}")]
    PixelCodec { message: String },

    #[error("image merge failed: {message}")]
    ImageMerge { message: String },

    #[error("frame extraction failed: {message}")]
    FrameExtraction { message: String },
}

impl AnimError {
    /// Stable code of this error
    pub const fn code(&self) -> ErrorCode {
        match self {
            AnimError::InvalidSignature { .. } => ErrorCode::InvalidSignature,
            AnimError::UnsupportedVersion { .. } => ErrorCode::UnsupportedVersion,
            AnimError::CorruptedHeader { .. } => ErrorCode::CorruptedHeader,
            AnimError::InvalidImageData { .. } => ErrorCode::InvalidImageData,
            AnimError::InvalidMetadata { .. } => ErrorCode::InvalidMetadata,
            AnimError::FileTruncated { .. } => ErrorCode::FileTruncated,
            AnimError::SizeMismatch { .. } => ErrorCode::SizeMismatch,
            AnimError::Validation { .. } => ErrorCode::ValidationError,
            AnimError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            AnimError::MissingField { .. } => ErrorCode::MissingField,
            AnimError::OutOfRange { .. } => ErrorCode::OutOfRange,
            AnimError::InvalidArrayLength { .. } => ErrorCode::InvalidArrayLength,
            AnimError::ConversionFailed { .. } => ErrorCode::ConversionFailed,
            AnimError::JsonParse { .. } => ErrorCode::JsonParseError,
            AnimError::Base64Decode { .. } => ErrorCode::Base64DecodeError,
            AnimError::PixelCodec { .. } => ErrorCode::PixelCodecError,
            AnimError::ImageMerge { .. } => ErrorCode::ImageMergeError,
            AnimError::FrameExtraction { .. } => ErrorCode::FrameExtractionError,
        }
    }

    /// Byte offset into the buffer where the failure was detected
    pub fn position(&self) -> Option<usize> {
        match self {
            AnimError::InvalidSignature { position, .. }
            | AnimError::UnsupportedVersion { position, .. }
            | AnimError::CorruptedHeader { position, .. }
            | AnimError::FileTruncated { position, .. } => Some(*position),
            AnimError::InvalidMetadata { position, .. }
            | AnimError::SizeMismatch { position, .. } => *position,
            _ => None,
        }
    }

    pub fn expected_type(&self) -> Option<&str> {
        match self {
            AnimError::TypeMismatch { expected_type, .. } => Some(expected_type),
            _ => None,
        }
    }

    pub fn actual_type(&self) -> Option<&str> {
        match self {
            AnimError::TypeMismatch { actual_type, .. } => Some(actual_type),
            _ => None,
        }
    }

    /// Names of every missing field reported together
    pub fn missing_fields(&self) -> &[String] {
        match self {
            AnimError::Validation { missing_fields, .. }
            | AnimError::MissingField { missing_fields, .. } => missing_fields,
            _ => &[],
        }
    }

    /// Dotted path of the offending field, e.g. `meta.frame[2].objects[0].opacity`
    pub fn field_path(&self) -> Option<&str> {
        match self {
            AnimError::TypeMismatch { field_path, .. }
            | AnimError::OutOfRange { field_path, .. }
            | AnimError::InvalidArrayLength { field_path, .. } => Some(field_path),
            AnimError::Validation { field_path, .. } | AnimError::MissingField { field_path, .. } => {
                field_path.as_deref()
            }
            _ => None,
        }
    }

    /// Render code, message and every present diagnostic field on one line
    pub fn diagnostic(&self) -> String {
        let mut line = format!("[{}] {}", self.code(), self);
        let mut details = Vec::new();

        if let Some(position) = self.position() {
            details.push(format!("position: {position}"));
        }
        if let Some(expected) = self.expected_type() {
            details.push(format!("expected: {expected}"));
        }
        if let Some(actual) = self.actual_type() {
            details.push(format!("actual: {actual}"));
        }
        if !self.missing_fields().is_empty() {
            details.push(format!("missing: {}", self.missing_fields().join(", ")));
        }
        if let Some(path) = self.field_path() {
            details.push(format!("field: {path}"));
        }

        if !details.is_empty() {
            let _ = write!(line, " ({})", details.join(", "));
        }
        line
    }

    pub(crate) fn type_mismatch(
        field_path: impl Into<String>,
        expected_type: &str,
        actual_type: &str,
    ) -> Self {
        AnimError::TypeMismatch {
            field_path: field_path.into(),
            expected_type: expected_type.to_string(),
            actual_type: actual_type.to_string(),
        }
    }

    pub(crate) fn out_of_range(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        AnimError::OutOfRange {
            field_path: field_path.into(),
            message: message.into(),
        }
    }

    pub(crate) fn conversion(message: impl Into<String>) -> Self {
        AnimError::ConversionFailed {
            message: message.into(),
        }
    }
}

/// Result type for ANIM operations
pub type Result<T> = core::result::Result<T, AnimError>;
