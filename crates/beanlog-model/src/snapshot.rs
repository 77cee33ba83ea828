//! The full bean/shot state.

use serde::{Deserialize, Serialize};

use crate::entities::{Bean, BeanDraft, Shot, ShotDraft};
use crate::error::{ModelError, Result};
use crate::ids::{EntityId, EntityKind, generate_unique_id};

/// Both collections, newest first.
///
/// Collection order is the recency order: new entities are prepended and
/// never reordered. Serializes to exactly `{"beans": [...], "shots": [...]}`;
/// any other top-level key is ignored when reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub beans: Vec<Bean>,
    #[serde(default)]
    pub shots: Vec<Shot>,
}

impl Snapshot {
    pub fn new(beans: Vec<Bean>, shots: Vec<Shot>) -> Self {
        Self { beans, shots }
    }

    pub fn is_empty(&self) -> bool {
        self.beans.is_empty() && self.shots.is_empty()
    }

    pub fn bean(&self, id: &EntityId) -> Option<&Bean> {
        self.beans.iter().find(|bean| &bean.id == id)
    }

    pub fn bean_mut(&mut self, id: &EntityId) -> Option<&mut Bean> {
        self.beans.iter_mut().find(|bean| &bean.id == id)
    }

    pub fn shot(&self, id: &EntityId) -> Option<&Shot> {
        self.shots.iter().find(|shot| &shot.id == id)
    }

    pub fn contains_bean(&self, id: &EntityId) -> bool {
        self.bean(id).is_some()
    }

    pub fn contains_shot(&self, id: &EntityId) -> bool {
        self.shot(id).is_some()
    }

    /// Create a bean with a fresh id and prepend it.
    pub fn add_bean(&mut self, draft: BeanDraft, created_at: i64) -> &Bean {
        let id = generate_unique_id(|id| self.contains_bean(id));
        self.beans.insert(0, Bean::from_draft(id, draft, created_at));
        &self.beans[0]
    }

    /// Create a shot with a fresh id and prepend it.
    ///
    /// Fails without touching anything when the draft's bean does not exist.
    pub fn add_shot(&mut self, draft: ShotDraft, timestamp: i64) -> Result<&Shot> {
        if !self.contains_bean(&draft.bean_id) {
            return Err(ModelError::UnknownBean(draft.bean_id));
        }
        let id = generate_unique_id(|id| self.contains_shot(id));
        self.shots.insert(0, Shot::from_draft(id, draft, timestamp));
        Ok(&self.shots[0])
    }

    /// Prepend a bean that already has an id.
    pub fn insert_bean(&mut self, bean: Bean) -> Result<&Bean> {
        if self.contains_bean(&bean.id) {
            return Err(ModelError::DuplicateId {
                kind: EntityKind::Bean,
                id: bean.id,
            });
        }
        self.beans.insert(0, bean);
        Ok(&self.beans[0])
    }

    /// Prepend a shot that already has an id. Its bean must exist.
    pub fn insert_shot(&mut self, shot: Shot) -> Result<&Shot> {
        if !self.contains_bean(&shot.bean_id) {
            return Err(ModelError::UnknownBean(shot.bean_id));
        }
        if self.contains_shot(&shot.id) {
            return Err(ModelError::DuplicateId {
                kind: EntityKind::Shot,
                id: shot.id,
            });
        }
        self.shots.insert(0, shot);
        Ok(&self.shots[0])
    }

    /// Remove a bean and every shot logged against it.
    ///
    /// Returns the removed bean and how many shots went with it.
    pub fn remove_bean(&mut self, id: &EntityId) -> Option<(Bean, usize)> {
        let index = self.beans.iter().position(|bean| &bean.id == id)?;
        let bean = self.beans.remove(index);
        let before = self.shots.len();
        self.shots.retain(|shot| &shot.bean_id != id);
        Some((bean, before - self.shots.len()))
    }

    pub fn remove_shot(&mut self, id: &EntityId) -> Option<Shot> {
        let index = self.shots.iter().position(|shot| &shot.id == id)?;
        Some(self.shots.remove(index))
    }
}
