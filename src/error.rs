/// Broad failure category, used for exit codes and by callers that need to
/// tell failures apart (tests, mostly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input path does not exist.
    FileNotFound,
    /// An input path exists but is not a readable regular file.
    NotReadable,
    /// A token in an input file is not a finite number.
    ParseError,
    /// A series does not hold exactly `numSamples` values.
    InsufficientData,
    /// The quadratic fit cannot be built (too few points, bad axis, singular system).
    InterpolationError,
    /// Rejected flag values (non-integral counts, unsupported extensions, ...).
    InvalidConfig,
    /// Drawing the chart (terminal viewer, SVG or PNG) failed.
    Render,
    /// Writing the CSV/JSON export failed.
    Export,
}

impl ErrorKind {
    /// Process exit code for this kind.
    ///
    /// - `2`: bad input files or flags
    /// - `3`: inputs readable but unusable for a chart
    /// - `4`: output-side failure
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorKind::FileNotFound
            | ErrorKind::NotReadable
            | ErrorKind::ParseError
            | ErrorKind::InvalidConfig => 2,
            ErrorKind::InsufficientData | ErrorKind::InterpolationError => 3,
            ErrorKind::Render | ErrorKind::Export => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code: kind.exit_code(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
