use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Invalid parameters: {reason}")]
    Validation { reason: String },

    #[error("A node already occupies ({x}, {y})")]
    DuplicateCoordinate { x: i32, y: i32 },

    #[error("Duplicate {kind} id: {id}")]
    DuplicateId { kind: &'static str, id: u32 },

    #[error("No node at ({x}, {y})")]
    NoSuchNode { x: i32, y: i32 },

    #[error("No node with id {id}")]
    NoSuchNodeId { id: u32 },

    #[error("No behavior with id {id}")]
    NoSuchBehavior { id: u32 },

    #[error("Node at ({x}, {y}) is not an {expected}")]
    WrongNodeKind { x: i32, y: i32, expected: &'static str },

    #[error("graph incomplete: some nodes are not linked")]
    IncompleteGraph,

    #[error("build_graph must be called before building entities")]
    BuilderNotStarted,
}

impl NetworkError {
    pub(crate) fn validation(reason: impl Into<String>) -> Self {
        NetworkError::Validation { reason: reason.into() }
    }
}

#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Malformed template: sentinel line {sentinel:?} not found")]
    MalformedTemplate { sentinel: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Emit error: {0}")]
    Emit(#[from] EmitError),

    #[error("Description error: {0}")]
    Description(String),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
pub type EmitResult<T> = Result<T, EmitError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
