//! Behavior switches for the app.

use beanlog_model::ShotOrder;
use beanlog_persistence::AutoSaveConfig;
use serde::{Deserialize, Serialize};

/// Where the app goes after a new bean is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AfterAddBean {
    #[default]
    BeanList,
    BeanDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppOptions {
    pub after_add_bean: AfterAddBean,
    /// Initial order of a bean's shot log.
    pub shot_order: ShotOrder,
    pub autosave: AutoSaveConfig,
}
