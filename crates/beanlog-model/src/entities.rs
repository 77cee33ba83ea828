//! Bean and shot entities.
//!
//! Field names serialize in camelCase and enum values use their display
//! strings, matching the JSON the web app stores and exports.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

// =============================================================================
// ENUMS
// =============================================================================

/// Whether a bean comes from one origin or is a blend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OriginType {
    #[default]
    #[serde(rename = "Single Origin")]
    SingleOrigin,
    Blend,
}

impl OriginType {
    pub const ALL: [Self; 2] = [Self::SingleOrigin, Self::Blend];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SingleOrigin => "Single Origin",
            Self::Blend => "Blend",
        }
    }
}

impl fmt::Display for OriginType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Roast level, lightest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum RoastType {
    Light,
    #[serde(rename = "Light-Medium")]
    LightMedium,
    #[default]
    Medium,
    #[serde(rename = "Medium-Dark")]
    MediumDark,
    Dark,
}

impl RoastType {
    pub const ALL: [Self; 5] = [
        Self::Light,
        Self::LightMedium,
        Self::Medium,
        Self::MediumDark,
        Self::Dark,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::LightMedium => "Light-Medium",
            Self::Medium => "Medium",
            Self::MediumDark => "Medium-Dark",
            Self::Dark => "Dark",
        }
    }
}

impl fmt::Display for RoastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// BEAN
// =============================================================================

/// One logged bag of coffee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bean {
    pub id: EntityId,
    pub roaster: String,
    pub name: String,
    pub origin_type: OriginType,
    pub roast_type: RoastType,
    #[serde(default)]
    pub tasting_notes: String,
    /// Encoded thumbnail, stored as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Bean {
    /// Build a bean from its editable fields.
    pub fn from_draft(id: EntityId, draft: BeanDraft, created_at: i64) -> Self {
        let BeanDraft {
            roaster,
            name,
            origin_type,
            roast_type,
            tasting_notes,
            image,
        } = draft;
        Self {
            id,
            roaster,
            name,
            origin_type,
            roast_type,
            tasting_notes,
            image,
            created_at,
        }
    }

    /// Replace every editable field, keeping `id` and `created_at`.
    pub fn apply(&mut self, draft: BeanDraft) {
        self.roaster = draft.roaster;
        self.name = draft.name;
        self.origin_type = draft.origin_type;
        self.roast_type = draft.roast_type;
        self.tasting_notes = draft.tasting_notes;
        self.image = draft.image;
    }

    /// The editable fields, as an edit form would start with them.
    pub fn draft(&self) -> BeanDraft {
        BeanDraft {
            roaster: self.roaster.clone(),
            name: self.name.clone(),
            origin_type: self.origin_type,
            roast_type: self.roast_type,
            tasting_notes: self.tasting_notes.clone(),
            image: self.image.clone(),
        }
    }
}

/// Editable fields of a bean.
///
/// Required-field checks happen where the draft is entered; the default
/// matches an empty add-bean form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeanDraft {
    pub roaster: String,
    pub name: String,
    pub origin_type: OriginType,
    pub roast_type: RoastType,
    pub tasting_notes: String,
    pub image: Option<String>,
}

impl BeanDraft {
    pub fn new(roaster: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            roaster: roaster.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_origin(mut self, origin_type: OriginType) -> Self {
        self.origin_type = origin_type;
        self
    }

    #[must_use]
    pub fn with_roast(mut self, roast_type: RoastType) -> Self {
        self.roast_type = roast_type;
        self
    }

    #[must_use]
    pub fn with_tasting_notes(mut self, notes: impl Into<String>) -> Self {
        self.tasting_notes = notes.into();
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image;
        self
    }
}

// =============================================================================
// SHOT
// =============================================================================

/// One espresso extraction attempt against a bean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shot {
    pub id: EntityId,
    pub bean_id: EntityId,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Grams in.
    pub dose: f64,
    /// Grams out.
    #[serde(rename = "yield")]
    pub yield_g: f64,
    /// Seconds.
    pub time: u32,
    #[serde(default)]
    pub grind_setting: String,
    /// 1 to 10.
    pub rating: u8,
    #[serde(default)]
    pub notes: String,
}

impl Shot {
    pub fn from_draft(id: EntityId, draft: ShotDraft, timestamp: i64) -> Self {
        let ShotDraft {
            bean_id,
            dose,
            yield_g,
            time,
            grind_setting,
            rating,
            notes,
        } = draft;
        Self {
            id,
            bean_id,
            timestamp,
            dose,
            yield_g,
            time,
            grind_setting,
            rating,
            notes,
        }
    }

    /// Yield divided by dose, if the dose is usable.
    pub fn brew_ratio(&self) -> Option<f64> {
        (self.dose > 0.0).then(|| self.yield_g / self.dose)
    }
}

/// Fields of a shot before it is logged.
#[derive(Debug, Clone, PartialEq)]
pub struct ShotDraft {
    pub bean_id: EntityId,
    pub dose: f64,
    pub yield_g: f64,
    pub time: u32,
    pub grind_setting: String,
    pub rating: u8,
    pub notes: String,
}

impl ShotDraft {
    pub const DEFAULT_DOSE: f64 = 18.0;
    pub const DEFAULT_YIELD: f64 = 36.0;
    pub const DEFAULT_TIME: u32 = 30;
    pub const DEFAULT_RATING: u8 = 7;

    /// Starting values for a new shot against `bean_id`.
    ///
    /// Dose, yield, time and grind carry over from the bean's most recent
    /// shot (the first one in collection order); rating and notes start fresh.
    pub fn defaults_for(bean_id: &EntityId, shots: &[Shot]) -> Self {
        let last = shots.iter().find(|shot| &shot.bean_id == bean_id);
        Self {
            bean_id: bean_id.clone(),
            dose: last.map_or(Self::DEFAULT_DOSE, |shot| shot.dose),
            yield_g: last.map_or(Self::DEFAULT_YIELD, |shot| shot.yield_g),
            time: last.map_or(Self::DEFAULT_TIME, |shot| shot.time),
            grind_setting: last
                .map(|shot| shot.grind_setting.clone())
                .unwrap_or_default(),
            rating: Self::DEFAULT_RATING,
            notes: String::new(),
        }
    }
}
