use hyper::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The upload request carried no `file` part.
    #[error("no file provided")]
    NoFileProvided,

    #[error("invalid file name: {0:?}")]
    InvalidName(String),

    #[error("malformed multipart body: {0}")]
    Multipart(#[from] multer::Error),

    #[error("file not found")]
    NotFound,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::NoFileProvided
            | StoreError::InvalidName(_)
            | StoreError::Multipart(_) => StatusCode::BAD_REQUEST,
            StoreError::NotFound => StatusCode::NOT_FOUND,
            StoreError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text sent to the client. I/O failures use the caller's wording so the
    /// underlying error never leaks.
    pub fn user_message<'a>(&self, io_failure: &'a str) -> &'a str {
        match self {
            StoreError::NoFileProvided => "No files uploaded.",
            StoreError::InvalidName(_) => "Invalid file name.",
            StoreError::Multipart(_) => "Invalid form data.",
            StoreError::NotFound => "File not found.",
            StoreError::Io(_) => io_failure,
        }
    }
}
