//! View state - which screen is shown.
//!
//! # Architecture
//!
//! Each variant carries exactly the ids its screen needs, never entity data.
//! User navigation goes through `View::navigate`; mutations pick their own
//! destination. Either way the app stores the result of `View::resolve`, so a
//! view naming a bean that no longer exists falls back to the bean list
//! instead of rendering a dangling reference.

use beanlog_model::{EntityId, Snapshot};

use crate::error::{CoreError, Result};

// =============================================================================
// VIEW
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// All beans. Initial screen.
    #[default]
    BeanList,

    /// New-bean form.
    AddBean,

    /// Edit form for one bean.
    EditBean { bean_id: EntityId },

    /// One bean with its best shot and shot log.
    BeanDetails { bean_id: EntityId },

    /// New-shot form for one bean.
    AddShot { bean_id: EntityId },
}

impl View {
    pub fn bean_details(bean_id: EntityId) -> Self {
        Self::BeanDetails { bean_id }
    }

    /// Stable name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            Self::BeanList => "bean-list",
            Self::AddBean => "add-bean",
            Self::EditBean { .. } => "edit-bean",
            Self::BeanDetails { .. } => "bean-details",
            Self::AddShot { .. } => "add-shot",
        }
    }

    /// The bean this view is about, if any.
    pub fn bean_id(&self) -> Option<&EntityId> {
        match self {
            Self::BeanList | Self::AddBean => None,
            Self::EditBean { bean_id }
            | Self::BeanDetails { bean_id }
            | Self::AddShot { bean_id } => Some(bean_id),
        }
    }

    pub fn is_bean_list(&self) -> bool {
        matches!(self, Self::BeanList)
    }

    /// Apply a user navigation.
    ///
    /// Pairs not listed here are rejected and leave the caller's view as is.
    pub fn navigate(&self, navigate: &Navigate) -> Result<View> {
        let next = match (self, navigate) {
            (Self::BeanList, Navigate::Create) => Self::AddBean,
            (Self::BeanList, Navigate::Select(bean_id)) => Self::bean_details(bean_id.clone()),
            (Self::BeanList, Navigate::Back) => Self::BeanList,

            (Self::BeanDetails { bean_id }, Navigate::Edit) => Self::EditBean {
                bean_id: bean_id.clone(),
            },
            (Self::BeanDetails { bean_id }, Navigate::LogShot) => Self::AddShot {
                bean_id: bean_id.clone(),
            },
            (Self::BeanDetails { .. }, Navigate::Back) => Self::BeanList,

            (Self::AddBean, Navigate::Back | Navigate::Cancel) => Self::BeanList,
            (
                Self::EditBean { bean_id } | Self::AddShot { bean_id },
                Navigate::Back | Navigate::Cancel,
            ) => Self::bean_details(bean_id.clone()),

            _ => {
                return Err(CoreError::InvalidTransition {
                    from: self.name(),
                    action: navigate.name(),
                });
            }
        };
        Ok(next)
    }

    /// Fall back to the bean list if the referenced bean is gone.
    pub fn resolve(self, snapshot: &Snapshot) -> View {
        match self.bean_id() {
            Some(bean_id) if !snapshot.contains_bean(bean_id) => {
                tracing::debug!(view = self.name(), %bean_id, "bean no longer exists, showing bean list");
                Self::BeanList
            }
            _ => self,
        }
    }
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// A user navigation that does not change data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigate {
    /// Open the new-bean form.
    Create,
    /// Open a bean's details.
    Select(EntityId),
    /// Open the edit form for the bean on screen.
    Edit,
    /// Open the new-shot form for the bean on screen.
    LogShot,
    Back,
    /// Leave a form without saving.
    Cancel,
}

impl Navigate {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Select(_) => "select bean",
            Self::Edit => "edit",
            Self::LogShot => "log shot",
            Self::Back => "go back",
            Self::Cancel => "cancel",
        }
    }
}
