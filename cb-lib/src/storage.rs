use std::fmt::{Display, Formatter, Result as FmtResult};

pub const MEBI: u64 = 1024 * 1024;

/// exclusive lower bound for files placed in mongo
pub const MONGO_MIN_SIZE: u64 = MEBI;
/// inclusive upper bound for files placed in mongo
pub const MONGO_MAX_SIZE: u64 = 2 * MEBI;
/// exclusive upper bound for files placed in dynamo
pub const DYNAMO_MAX_SIZE: u64 = MEBI;

/// the backing store a resource lives in.
///
/// the backend reports this as a free form string so anything that is not
/// recognized is kept as is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageKind {
    Mongo,
    Dynamo,
    S3,
    Other(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SizeError {
    #[error("files stored in MongoDB must be greater than 1MB and less than or equal to 2MB. given {0} bytes")]
    Mongo(u64),

    #[error("files stored in DynamoDB must be less than 1MB. given {0} bytes")]
    Dynamo(u64),

    #[error("storage \"{0}\" does not accept new files")]
    NoIngest(StorageKind),
}

impl StorageKind {
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "mongo" | "mongodb" => StorageKind::Mongo,
            "dynamo" | "dynamodb" => StorageKind::Dynamo,
            "s3" => StorageKind::S3,
            _ => StorageKind::Other(name.to_owned()),
        }
    }

    /// path segment of the per store endpoints, if the store has any
    pub fn segment(&self) -> Option<&'static str> {
        match self {
            StorageKind::Mongo => Some("mongo"),
            StorageKind::Dynamo => Some("dynamo"),
            StorageKind::S3 |
            StorageKind::Other(_) => None,
        }
    }

    /// checks that a file of the given size is accepted by the store
    pub fn check_size(&self, size: u64) -> Result<(), SizeError> {
        match self {
            StorageKind::Mongo => if size <= MONGO_MIN_SIZE || size > MONGO_MAX_SIZE {
                Err(SizeError::Mongo(size))
            } else {
                Ok(())
            },
            StorageKind::Dynamo => if size >= DYNAMO_MAX_SIZE {
                Err(SizeError::Dynamo(size))
            } else {
                Ok(())
            },
            StorageKind::S3 |
            StorageKind::Other(_) => Err(SizeError::NoIngest(self.clone()))
        }
    }
}

impl Display for StorageKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageKind::Mongo => write!(f, "MongoDB"),
            StorageKind::Dynamo => write!(f, "DynamoDB"),
            StorageKind::S3 => write!(f, "S3"),
            StorageKind::Other(name) => write!(f, "{name}"),
        }
    }
}
