use thiserror::Error;

/// Coarse failure classes, for callers that need to branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Auth,
    NotFound,
    Network,
    Parse,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("{0}")]
    Auth(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("http error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("couldn't read gradescope page: {0}")]
    Parse(String),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Auth(_) => ErrorKind::Auth,
            ClientError::NotFound(_) => ErrorKind::NotFound,
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::Parse(_) => ErrorKind::Parse,
        }
    }
}
