//! Whole-snapshot invariant checks.
//!
//! Snapshots built through `Snapshot::insert_*` hold these invariants by
//! construction. Snapshots arriving from outside (backup files) are checked
//! here before they replace anything.

use std::collections::HashSet;

use thiserror::Error;

use crate::entities::{Bean, Shot};
use crate::ids::{EntityId, EntityKind};
use crate::snapshot::Snapshot;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 10;

/// One broken invariant.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Violation {
    #[error("{kind} {id} appears more than once")]
    DuplicateId { kind: EntityKind, id: EntityId },

    #[error("bean {id} has an empty {field}")]
    EmptyField { id: EntityId, field: &'static str },

    #[error("shot {id} has rating {rating}, expected 1 to 10")]
    RatingOutOfRange { id: EntityId, rating: u8 },

    #[error("shot {id} has {field} {value}, expected a positive number")]
    NotPositive {
        id: EntityId,
        field: &'static str,
        value: f64,
    },

    #[error("shot {shot_id} references missing bean {bean_id}")]
    DanglingShot { shot_id: EntityId, bean_id: EntityId },
}

/// Check every invariant, collecting all violations.
pub fn validate(snapshot: &Snapshot) -> Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let mut bean_ids = HashSet::new();
    for bean in &snapshot.beans {
        check_id(EntityKind::Bean, &bean.id, &mut bean_ids, &mut violations);
        check_bean(bean, &mut violations);
    }

    let mut shot_ids = HashSet::new();
    for shot in &snapshot.shots {
        check_id(EntityKind::Shot, &shot.id, &mut shot_ids, &mut violations);
        check_shot(shot, &mut violations);
        if !bean_ids.contains(&shot.bean_id) {
            violations.push(Violation::DanglingShot {
                shot_id: shot.id.clone(),
                bean_id: shot.bean_id.clone(),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn check_id<'a>(
    kind: EntityKind,
    id: &'a EntityId,
    seen: &mut HashSet<&'a EntityId>,
    violations: &mut Vec<Violation>,
) {
    if !seen.insert(id) {
        violations.push(Violation::DuplicateId {
            kind,
            id: id.clone(),
        });
    }
}

fn check_bean(bean: &Bean, violations: &mut Vec<Violation>) {
    for (field, value) in [("roaster", &bean.roaster), ("name", &bean.name)] {
        if value.trim().is_empty() {
            violations.push(Violation::EmptyField {
                id: bean.id.clone(),
                field,
            });
        }
    }
}

fn check_shot(shot: &Shot, violations: &mut Vec<Violation>) {
    if !(MIN_RATING..=MAX_RATING).contains(&shot.rating) {
        violations.push(Violation::RatingOutOfRange {
            id: shot.id.clone(),
            rating: shot.rating,
        });
    }
    let measures = [
        ("dose", shot.dose),
        ("yield", shot.yield_g),
        ("time", f64::from(shot.time)),
    ];
    for (field, value) in measures {
        if !(value.is_finite() && value > 0.0) {
            violations.push(Violation::NotPositive {
                id: shot.id.clone(),
                field,
                value,
            });
        }
    }
}
