//! Resolving ids typed on the command line.
//!
//! Full ids are long, so any unique prefix is accepted. An exact match wins
//! over prefix matches.

use anyhow::{Result, bail};
use beanlog_model::{EntityId, EntityKind, Snapshot};

/// Number of id characters shown in listings.
pub const SHORT_ID_LEN: usize = 8;

/// The leading part of an id, as printed in tables.
pub fn short_id(id: &EntityId) -> &str {
    let id = id.as_str();
    id.get(..SHORT_ID_LEN).unwrap_or(id)
}

pub fn find_bean(snapshot: &Snapshot, input: &str) -> Result<EntityId> {
    find(EntityKind::Bean, snapshot.beans.iter().map(|b| &b.id), input)
}

pub fn find_shot(snapshot: &Snapshot, input: &str) -> Result<EntityId> {
    find(EntityKind::Shot, snapshot.shots.iter().map(|s| &s.id), input)
}

fn find<'a>(
    kind: EntityKind,
    ids: impl Iterator<Item = &'a EntityId> + Clone,
    input: &str,
) -> Result<EntityId> {
    let input = input.trim();
    if input.is_empty() {
        bail!("no {kind} id given");
    }
    if let Some(exact) = ids.clone().find(|id| id.as_str() == input) {
        return Ok(exact.clone());
    }

    let mut matches = ids.filter(|id| id.as_str().starts_with(input));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(id.clone()),
        (None, _) => bail!("no {kind} matches `{input}`"),
        (Some(_), Some(_)) => {
            bail!("`{input}` matches more than one {kind}, type more of the id")
        }
    }
}
