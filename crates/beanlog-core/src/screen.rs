//! What each view renders, borrowed from the snapshot.

use beanlog_model::{
    Bean, BeanDraft, BeanStats, Shot, ShotDraft, ShotOrder, Snapshot, average_rating,
    beans_with_stats, best_shot, sorted_shots,
};

use crate::view::View;

/// Render data for one view.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen<'a> {
    BeanList {
        beans: Vec<BeanStats<'a>>,
    },
    AddBean {
        draft: BeanDraft,
    },
    EditBean {
        bean: &'a Bean,
        /// Form pre-filled with the bean's current fields.
        draft: BeanDraft,
    },
    BeanDetails {
        bean: &'a Bean,
        average_rating: Option<f64>,
        best_shot: Option<&'a Shot>,
        shots: Vec<&'a Shot>,
        order: ShotOrder,
    },
    AddShot {
        bean: &'a Bean,
        /// Form pre-filled from the bean's latest shot.
        draft: ShotDraft,
    },
}

impl<'a> Screen<'a> {
    /// Build the screen for `view`.
    ///
    /// A view naming a missing bean gets the bean list.
    pub fn build(view: &View, snapshot: &'a Snapshot, order: ShotOrder) -> Self {
        let bean_list = || Screen::BeanList {
            beans: beans_with_stats(&snapshot.beans, &snapshot.shots),
        };
        let Some(bean_id) = view.bean_id() else {
            return match view {
                View::AddBean => Screen::AddBean {
                    draft: BeanDraft::default(),
                },
                _ => bean_list(),
            };
        };
        let Some(bean) = snapshot.bean(bean_id) else {
            return bean_list();
        };

        match view {
            View::EditBean { .. } => Screen::EditBean {
                bean,
                draft: bean.draft(),
            },
            View::AddShot { .. } => Screen::AddShot {
                bean,
                draft: ShotDraft::defaults_for(bean_id, &snapshot.shots),
            },
            _ => Screen::BeanDetails {
                bean,
                average_rating: average_rating(bean_id, &snapshot.shots),
                best_shot: best_shot(bean_id, &snapshot.shots),
                shots: sorted_shots(bean_id, &snapshot.shots, order),
                order,
            },
        }
    }

    pub fn title(&self) -> String {
        match self {
            Self::BeanList { .. } => "My Beans".to_string(),
            Self::AddBean { .. } => "New Beans".to_string(),
            Self::EditBean { bean, .. } => format!("Edit {}", bean.name),
            Self::BeanDetails { bean, .. } => format!("{} ({})", bean.name, bean.roaster),
            Self::AddShot { bean, .. } => format!("Log Shot: {}", bean.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanlog_model::EntityId;

    fn id(value: &str) -> EntityId {
        EntityId::new(value).unwrap()
    }

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot
            .insert_bean(Bean::from_draft(id("b1"), BeanDraft::new("Acme", "House"), 0))
            .unwrap();
        for (n, rating) in [5u8, 9, 7].into_iter().enumerate() {
            let mut draft = ShotDraft::defaults_for(&id("b1"), &[]);
            draft.rating = rating;
            draft.dose = 17.0 + n as f64;
            snapshot
                .insert_shot(Shot::from_draft(id(&format!("s{n}")), draft, n as i64))
                .unwrap();
        }
        snapshot
    }

    #[test]
    fn test_details_screen() {
        let snapshot = snapshot();
        let screen = Screen::build(&View::bean_details(id("b1")), &snapshot, ShotOrder::Rating);
        let Screen::BeanDetails {
            best_shot,
            shots,
            average_rating,
            ..
        } = screen
        else {
            panic!("expected details screen");
        };
        assert_eq!(best_shot.unwrap().id, id("s1"));
        let ratings: Vec<u8> = shots.iter().map(|s| s.rating).collect();
        assert_eq!(ratings, [9, 7, 5]);
        assert_eq!(average_rating, Some(7.0));
    }

    #[test]
    fn test_add_shot_prefills_from_latest_shot() {
        let snapshot = snapshot();
        let screen = Screen::build(&View::AddShot { bean_id: id("b1") }, &snapshot, ShotOrder::Rating);
        let Screen::AddShot { draft, .. } = screen else {
            panic!("expected add-shot screen");
        };
        // s2 was inserted last, so it heads the collection
        assert_eq!(draft.dose, 19.0);
    }

    #[test]
    fn test_missing_bean_builds_bean_list() {
        let snapshot = snapshot();
        let screen = Screen::build(&View::EditBean { bean_id: id("gone") }, &snapshot, ShotOrder::Recent);
        assert!(matches!(screen, Screen::BeanList { ref beans } if beans.len() == 1));
        assert_eq!(screen.title(), "My Beans");
    }
}
