use beanlog_model::{EntityId, EntityKind, ModelError};
use beanlog_persistence::PersistenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: EntityId },

    #[error("cannot log a shot for missing bean {bean_id}")]
    ReferentialIntegrity { bean_id: EntityId },

    #[error("cannot {action} from the {from} screen")]
    InvalidTransition {
        from: &'static str,
        action: &'static str,
    },

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl CoreError {
    pub(crate) fn bean_not_found(id: &EntityId) -> Self {
        Self::NotFound {
            kind: EntityKind::Bean,
            id: id.clone(),
        }
    }

    pub(crate) fn shot_not_found(id: &EntityId) -> Self {
        Self::NotFound {
            kind: EntityKind::Shot,
            id: id.clone(),
        }
    }

    /// Whether the call was a no-op on a missing entity.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
