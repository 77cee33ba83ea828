//! Queries derived from the bean and shot collections.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::entities::{Bean, Shot};
use crate::ids::EntityId;

/// Order of a bean's shot log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotOrder {
    /// Highest rating first.
    #[default]
    Rating,
    /// Newest first.
    Recent,
}

impl ShotOrder {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Recent => "recent",
        }
    }

    /// The other order, as a sort toggle would switch to.
    pub fn toggled(self) -> Self {
        match self {
            Self::Rating => Self::Recent,
            Self::Recent => Self::Rating,
        }
    }
}

/// A bean with its shot aggregates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeanStats<'a> {
    pub bean: &'a Bean,
    pub shot_count: usize,
    /// Mean rating, absent when the bean has no shots.
    pub average_rating: Option<f64>,
}

/// Every bean, in collection order, with its shot count and mean rating.
pub fn beans_with_stats<'a>(beans: &'a [Bean], shots: &[Shot]) -> Vec<BeanStats<'a>> {
    let mut totals: HashMap<&EntityId, (usize, u32)> = HashMap::new();
    for shot in shots {
        let entry = totals.entry(&shot.bean_id).or_default();
        entry.0 += 1;
        entry.1 += u32::from(shot.rating);
    }
    beans
        .iter()
        .map(|bean| {
            let (shot_count, rating_sum) = totals.get(&bean.id).copied().unwrap_or_default();
            BeanStats {
                bean,
                shot_count,
                average_rating: mean(rating_sum, shot_count),
            }
        })
        .collect()
}

/// Mean rating of one bean's shots.
pub fn average_rating(bean_id: &EntityId, shots: &[Shot]) -> Option<f64> {
    let (count, sum) = shots_for(bean_id, shots).fold((0usize, 0u32), |(count, sum), shot| {
        (count + 1, sum + u32::from(shot.rating))
    });
    mean(sum, count)
}

fn mean(sum: u32, count: usize) -> Option<f64> {
    (count > 0).then(|| f64::from(sum) / count as f64)
}

/// Shots logged against `bean_id`, in collection order.
pub fn shots_for<'a, 'b>(
    bean_id: &'b EntityId,
    shots: &'a [Shot],
) -> impl Iterator<Item = &'a Shot> + use<'a, 'b> {
    shots.iter().filter(move |shot| &shot.bean_id == bean_id)
}

pub fn has_shots(bean_id: &EntityId, shots: &[Shot]) -> bool {
    shots_for(bean_id, shots).next().is_some()
}

/// The highest-rated shot for a bean.
///
/// Ties on rating go to the most recent timestamp; shots with equal rating
/// and timestamp keep the first one in collection order.
pub fn best_shot<'a>(bean_id: &EntityId, shots: &'a [Shot]) -> Option<&'a Shot> {
    shots_for(bean_id, shots).fold(None, |best: Option<&Shot>, shot| match best {
        Some(current) if (shot.rating, shot.timestamp) <= (current.rating, current.timestamp) => {
            Some(current)
        }
        _ => Some(shot),
    })
}

/// A bean's shots in the requested order. Equal keys keep collection order.
pub fn sorted_shots<'a>(bean_id: &EntityId, shots: &'a [Shot], order: ShotOrder) -> Vec<&'a Shot> {
    let mut sorted: Vec<&Shot> = shots_for(bean_id, shots).collect();
    match order {
        ShotOrder::Rating => sorted.sort_by(|a, b| b.rating.cmp(&a.rating)),
        ShotOrder::Recent => sorted.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
    }
    sorted
}
