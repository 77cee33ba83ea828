use thiserror::Error;

use crate::ids::{EntityId, EntityKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("invalid id: {0:?}")]
    InvalidId(String),
    #[error("bean {0} does not exist")]
    UnknownBean(EntityId),
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: EntityKind, id: EntityId },
}

pub type Result<T> = std::result::Result<T, ModelError>;
