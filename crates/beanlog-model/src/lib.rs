//! Data model for the bean log.
//!
//! Beans are logged bags of coffee; shots are espresso extraction attempts
//! made against a bean. This crate owns the entity types, the snapshot that
//! holds both collections, the queries derived from them and the invariants
//! that tie shots to beans.
//!
//! # Architecture
//!
//! - `ids` - Entity identifiers and the identifier generator
//! - `entities` - `Bean`, `Shot` and their editable drafts
//! - `snapshot` - The `{beans, shots}` collection pair and its primitive mutations
//! - `stats` - Derived queries (average rating, best shot, sort orders)
//! - `validate` - Whole-snapshot invariant checks

pub mod entities;
pub mod error;
pub mod ids;
pub mod snapshot;
pub mod stats;
pub mod validate;

pub use entities::{Bean, BeanDraft, OriginType, RoastType, Shot, ShotDraft};
pub use error::{ModelError, Result};
pub use ids::{EntityId, EntityKind, generate_id, generate_unique_id};
pub use snapshot::Snapshot;
pub use stats::{
    BeanStats, ShotOrder, average_rating, beans_with_stats, best_shot, has_shots, shots_for,
    sorted_shots,
};
pub use validate::{Violation, validate};
