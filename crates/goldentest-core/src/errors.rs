use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Result type alias using GoldenError
pub type Result<T> = std::result::Result<T, GoldenError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that tests and callers can match on
/// without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenErrorKind {
    // Filesystem
    Io,

    // Codec
    Encode,
    Decode,

    // Shape / configuration
    CountMismatch,
    UnsupportedType,
    InvalidMessage,
    UnsupportedDestination,

    // Caller-supplied hooks
    Hook,
}

impl GoldenErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            GoldenErrorKind::Io => "ERR_IO",
            GoldenErrorKind::Encode => "ERR_ENCODE",
            GoldenErrorKind::Decode => "ERR_DECODE",
            GoldenErrorKind::CountMismatch => "ERR_COUNT_MISMATCH",
            GoldenErrorKind::UnsupportedType => "ERR_UNSUPPORTED_TYPE",
            GoldenErrorKind::InvalidMessage => "ERR_INVALID_MESSAGE",
            GoldenErrorKind::UnsupportedDestination => "ERR_UNSUPPORTED_DESTINATION",
            GoldenErrorKind::Hook => "ERR_HOOK",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind, the operation that failed, the golden file
/// involved and the underlying cause, if any.
#[derive(Debug, Clone)]
pub struct GoldenError {
    kind: GoldenErrorKind,
    op: Option<String>,
    path: Option<PathBuf>,
    message: String,
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl GoldenError {
    /// Create a new error with the specified kind
    pub fn new(kind: GoldenErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Build a hook failure. Hooks return this and it reaches the caller untouched.
    pub fn hook(message: impl Into<String>) -> Self {
        Self::new(GoldenErrorKind::Hook).with_message(message)
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add golden file path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach the underlying cause
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Arc::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> GoldenErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the golden file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Downcast the underlying cause
    pub fn source_as<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        self.source.as_deref().and_then(|s| s.downcast_ref::<E>())
    }
}

impl std::fmt::Display for GoldenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for GoldenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Failures raised inside an encoder, before they are classified.
#[derive(Error, Debug)]
pub enum CodecError {
    /// Marshal input is neither a message nor a list of messages
    #[error("unsupported type: {kind}")]
    UnsupportedType { kind: &'static str },

    /// A list handed to the schema encoder holds a non-message element
    #[error("invalid proto message at index {index}: got {kind}")]
    InvalidMessage { index: usize, kind: &'static str },

    /// Unmarshal destination is not a message
    #[error("unsupported destination: {kind}")]
    UnsupportedDestination { kind: &'static str },

    /// JSON payload could not be produced
    #[error("encode json: {0}")]
    EncodeJson(#[source] serde_json::Error),

    /// JSON payload could not be parsed into the destination
    #[error("decode json: {0}")]
    DecodeJson(#[source] serde_json::Error),

    /// A dynamic message could not be converted into its generated type
    #[error("transcode message: {0}")]
    Transcode(#[from] prost::DecodeError),
}

impl CodecError {
    /// Classify into the canonical error kind
    pub fn kind(&self) -> GoldenErrorKind {
        match self {
            CodecError::UnsupportedType { .. } => GoldenErrorKind::UnsupportedType,
            CodecError::InvalidMessage { .. } => GoldenErrorKind::InvalidMessage,
            CodecError::UnsupportedDestination { .. } => GoldenErrorKind::UnsupportedDestination,
            CodecError::EncodeJson(_) => GoldenErrorKind::Encode,
            CodecError::DecodeJson(_) | CodecError::Transcode(_) => GoldenErrorKind::Decode,
        }
    }
}

/// Conversion from CodecError to GoldenError
impl From<CodecError> for GoldenError {
    fn from(err: CodecError) -> Self {
        GoldenError::new(err.kind())
            .with_message(err.to_string())
            .with_source(err)
    }
}

/// Create an IO error
pub fn io_error(op: &str, path: &Path, err: std::io::Error) -> GoldenError {
    GoldenError::new(GoldenErrorKind::Io)
        .with_op(op)
        .with_path(path)
        .with_message(err.to_string())
        .with_source(err)
}

/// Wrap an encoder failure with operation and path context
pub fn codec_error(op: &str, path: &Path, err: GoldenError) -> GoldenError {
    let message = err.message().to_string();
    let mut wrapped = GoldenError::new(err.kind())
        .with_op(op)
        .with_path(path)
        .with_message(message);
    wrapped.source = Some(Arc::new(err));
    wrapped
}

/// Encoded bytes that do not decode back into the value's type
pub fn unreadable_encoding(path: &Path, err: GoldenError) -> GoldenError {
    let message = format!("encoded value does not decode: {}", err.message());
    let mut wrapped = GoldenError::new(GoldenErrorKind::Encode)
        .with_op("marshal")
        .with_path(path)
        .with_message(message);
    wrapped.source = Some(Arc::new(err));
    wrapped
}

/// Create a batch length mismatch error
pub fn count_mismatch(path: &Path, want: usize, got: usize) -> GoldenError {
    GoldenError::new(GoldenErrorKind::CountMismatch)
        .with_op("compare_values")
        .with_path(path)
        .with_message(format!("want {} items but got {}", want, got))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (GoldenErrorKind::Io, "ERR_IO"),
            (GoldenErrorKind::Encode, "ERR_ENCODE"),
            (GoldenErrorKind::Decode, "ERR_DECODE"),
            (GoldenErrorKind::CountMismatch, "ERR_COUNT_MISMATCH"),
            (GoldenErrorKind::UnsupportedType, "ERR_UNSUPPORTED_TYPE"),
            (GoldenErrorKind::InvalidMessage, "ERR_INVALID_MESSAGE"),
            (
                GoldenErrorKind::UnsupportedDestination,
                "ERR_UNSUPPORTED_DESTINATION",
            ),
            (GoldenErrorKind::Hook, "ERR_HOOK"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_display_includes_op_message_and_path() {
        let err = GoldenError::new(GoldenErrorKind::Io)
            .with_op("read_file")
            .with_path("testdata/missing.golden.json")
            .with_message("No such file or directory");

        let rendered = err.to_string();
        assert_eq!(
            rendered,
            "[ERR_IO] in operation 'read_file': No such file or directory \
             (path: testdata/missing.golden.json)"
        );
    }

    #[test]
    fn test_io_error_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = io_error("read_file", Path::new("a.json"), io);

        assert_eq!(err.kind(), GoldenErrorKind::Io);
        assert_eq!(err.op(), Some("read_file"));
        let source = err.source_as::<std::io::Error>().expect("io source");
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_codec_error_conversion_keeps_kind() {
        let err: GoldenError = CodecError::UnsupportedType { kind: "i32" }.into();
        assert_eq!(err.kind(), GoldenErrorKind::UnsupportedType);
        assert_eq!(err.message(), "unsupported type: i32");

        let wrapped = codec_error("marshal", Path::new("x.json"), err);
        assert_eq!(wrapped.kind(), GoldenErrorKind::UnsupportedType);
        assert_eq!(wrapped.op(), Some("marshal"));
        assert!(wrapped.source_as::<GoldenError>().is_some());
    }

    #[test]
    fn test_unreadable_encoding_is_encode_error() {
        let decode: GoldenError =
            CodecError::DecodeJson(serde_json::from_str::<f64>("null").unwrap_err()).into();
        let err = unreadable_encoding(Path::new("r.json"), decode);

        assert_eq!(err.kind(), GoldenErrorKind::Encode);
        assert_eq!(err.op(), Some("marshal"));
        assert!(err.message().starts_with("encoded value does not decode: decode json:"));
        assert_eq!(
            err.source_as::<GoldenError>().map(GoldenError::kind),
            Some(GoldenErrorKind::Decode)
        );
    }

    #[test]
    fn test_count_mismatch_message() {
        let err = count_mismatch(Path::new("batch.json"), 2, 3);
        assert_eq!(err.code(), "ERR_COUNT_MISMATCH");
        assert_eq!(err.message(), "want 2 items but got 3");
    }

    #[test]
    fn test_hook_error_has_no_context_added() {
        let err = GoldenError::hook("timestamp missing");
        assert_eq!(err.kind(), GoldenErrorKind::Hook);
        assert!(err.op().is_none());
        assert!(err.path().is_none());
        assert_eq!(err.to_string(), "[ERR_HOOK]: timestamp missing");
    }
}
