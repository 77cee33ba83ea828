//! Rendering of screens produced by a live app.

use beanlog_cli::lookup::find_bean;
use beanlog_cli::render::{render_screen, shot_summary};
use beanlog_cli::settings::Settings;
use beanlog_core::{App, AssumeYes, ManualClock, Navigate, Screen};
use beanlog_model::{BeanDraft, OriginType, RoastType, ShotDraft};
use beanlog_persistence::MemorySlotStore;

fn app() -> App<MemorySlotStore, ManualClock> {
    App::open_with_clock(
        MemorySlotStore::new(),
        Settings::default().app_options(),
        ManualClock::starting_at(1_714_550_400_000).with_step(60_000),
    )
}

#[test]
fn bean_list_shows_stats() {
    let mut app = app();
    let bean_id = app
        .add_bean(
            BeanDraft::new("Acme", "Dark Roast")
                .with_origin(OriginType::Blend)
                .with_roast(RoastType::Dark),
        )
        .id
        .clone();
    for rating in [6, 8] {
        let mut draft = ShotDraft::defaults_for(&bean_id, app.shots());
        draft.rating = rating;
        app.add_shot(draft).unwrap();
    }
    app.navigate(Navigate::Back).unwrap();

    let text = render_screen(&app.screen());
    assert!(text.contains("Acme"));
    assert!(text.contains("Blend"));
    assert!(text.contains("7.0"));
}

#[test]
fn details_follow_prefix_lookup() {
    let mut app = app();
    let bean_id = app.add_bean(BeanDraft::new("Acme", "House")).id.clone();
    let mut draft = ShotDraft::defaults_for(&bean_id, app.shots());
    draft.rating = 9;
    draft.time = 27;
    app.add_shot(draft).unwrap();
    app.navigate(Navigate::Back).unwrap();

    let found = find_bean(app.snapshot(), &bean_id.as_str()[..6]).unwrap();
    app.navigate(Navigate::Select(found)).unwrap();
    let Screen::BeanDetails { best_shot, .. } = app.screen() else {
        panic!("expected details screen");
    };
    insta::assert_snapshot!(shot_summary(best_shot.unwrap()), @"18g in, 36g out, 27s, ratio 1:2.0");

    let text = render_screen(&app.screen());
    assert!(text.starts_with("House (Acme)\n"));
    assert!(text.contains("Best shot: 9/10"));
}

#[test]
fn list_after_delete_is_empty() {
    let mut app = app();
    let bean_id = app.add_bean(BeanDraft::new("Acme", "House")).id.clone();
    app.delete_bean(&bean_id, &AssumeYes).unwrap();
    insta::assert_snapshot!(render_screen(&app.screen()), @"No beans yet. Add one with `beanlog bean add`.");
}
