//! Terminal rendering of screens.

use beanlog_core::Screen;
use beanlog_model::{Bean, BeanDraft, BeanStats, Shot, ShotDraft, ShotOrder};
use chrono::{DateTime, Local};
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::lookup::short_id;

/// Text for the given screen, ready to print.
pub fn render_screen(screen: &Screen<'_>) -> String {
    match screen {
        Screen::BeanList { beans } => render_bean_list(beans),
        Screen::BeanDetails {
            bean,
            average_rating,
            best_shot,
            shots,
            order,
        } => render_bean_details(bean, *average_rating, *best_shot, shots, *order),
        Screen::AddBean { draft } => render_bean_form(&screen.title(), draft),
        Screen::EditBean { draft, .. } => render_bean_form(&screen.title(), draft),
        Screen::AddShot { draft, .. } => render_shot_form(&screen.title(), draft),
    }
}

fn render_bean_list(beans: &[BeanStats<'_>]) -> String {
    if beans.is_empty() {
        return "No beans yet. Add one with `beanlog bean add`.".to_string();
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("Roaster"),
        header_cell("Name"),
        header_cell("Origin"),
        header_cell("Roast"),
        header_cell("Shots"),
        header_cell("Avg"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Right);
    align_column(&mut table, 6, CellAlignment::Right);
    for stats in beans {
        let bean = stats.bean;
        table.add_row(vec![
            dim_cell(short_id(&bean.id)),
            Cell::new(&bean.roaster),
            Cell::new(&bean.name).add_attribute(Attribute::Bold),
            Cell::new(bean.origin_type),
            Cell::new(bean.roast_type),
            Cell::new(stats.shot_count),
            rating_cell(stats.average_rating),
        ]);
    }
    table.to_string()
}

fn render_bean_details(
    bean: &Bean,
    average_rating: Option<f64>,
    best_shot: Option<&Shot>,
    shots: &[&Shot],
    order: ShotOrder,
) -> String {
    let mut lines = vec![
        format!("{} ({})", bean.name, bean.roaster),
        format!("{} · {} roast · id {}", bean.origin_type, bean.roast_type, bean.id),
    ];
    if !bean.tasting_notes.is_empty() {
        lines.push(format!("Notes: {}", bean.tasting_notes));
    }
    if bean.image.is_some() {
        lines.push("Photo attached".to_string());
    }
    lines.push(format!("Average rating: {}", format_rating(average_rating)));

    let Some(best) = best_shot else {
        lines.push(String::new());
        lines.push("No shots logged yet.".to_string());
        return lines.join("\n");
    };
    lines.push(format!("Best shot: {}/10, {}", best.rating, shot_summary(best)));
    lines.push(String::new());
    lines.push(format!("Shots by {}:", order.label()));

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Id"),
        header_cell("When"),
        header_cell("Rating"),
        header_cell("Dose"),
        header_cell("Yield"),
        header_cell("Time"),
        header_cell("Ratio"),
        header_cell("Grind"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for shot in shots {
        let rating = Cell::new(shot.rating);
        let rating = if shot.id == best.id {
            rating.fg(Color::Green).add_attribute(Attribute::Bold)
        } else {
            rating
        };
        table.add_row(vec![
            dim_cell(short_id(&shot.id)),
            Cell::new(format_timestamp(shot.timestamp)),
            rating,
            Cell::new(format!("{}g", shot.dose)),
            Cell::new(format!("{}g", shot.yield_g)),
            Cell::new(format!("{}s", shot.time)),
            Cell::new(format_ratio(shot)),
            Cell::new(&shot.grind_setting),
            Cell::new(&shot.notes),
        ]);
    }
    lines.push(table.to_string());
    lines.join("\n")
}

fn render_bean_form(title: &str, draft: &BeanDraft) -> String {
    [
        title.to_string(),
        format!("Roaster: {}", draft.roaster),
        format!("Name: {}", draft.name),
        format!("Origin: {}", draft.origin_type),
        format!("Roast: {}", draft.roast_type),
        format!("Notes: {}", or_dash(&draft.tasting_notes)),
    ]
    .join("\n")
}

fn render_shot_form(title: &str, draft: &ShotDraft) -> String {
    [
        title.to_string(),
        format!("Dose: {}g", draft.dose),
        format!("Yield: {}g", draft.yield_g),
        format!("Time: {}s", draft.time),
        format!("Grind: {}", or_dash(&draft.grind_setting)),
        format!("Rating: {}/10", draft.rating),
    ]
    .join("\n")
}

/// One-line description of a shot's recipe.
pub fn shot_summary(shot: &Shot) -> String {
    format!(
        "{}g in, {}g out, {}s, ratio {}",
        shot.dose,
        shot.yield_g,
        shot.time,
        format_ratio(shot)
    )
}

fn format_ratio(shot: &Shot) -> String {
    shot.brew_ratio()
        .map_or_else(|| "-".to_string(), |ratio| format!("1:{ratio:.1}"))
}

fn or_dash(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub fn format_rating(rating: Option<f64>) -> String {
    rating.map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}"))
}

fn format_timestamp(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|utc| utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}

fn rating_cell(rating: Option<f64>) -> Cell {
    match rating {
        Some(value) => Cell::new(format_rating(rating)).fg(if value >= 8.0 {
            Color::Green
        } else {
            Color::Reset
        }),
        None => dim_cell("-"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beanlog_core::View;
    use beanlog_model::{EntityId, RoastType, Snapshot};

    fn id(value: &str) -> EntityId {
        EntityId::new(value).unwrap()
    }

    fn snapshot() -> Snapshot {
        let mut snapshot = Snapshot::default();
        snapshot
            .insert_bean(Bean::from_draft(
                id("8d0f5c3e-5a39-4a8e-9d2b-1f0e7c6b5a49"),
                BeanDraft::new("Acme", "Dark Roast")
                    .with_roast(RoastType::Dark)
                    .with_tasting_notes("Cocoa"),
                0,
            ))
            .unwrap();
        snapshot
    }

    fn shot(rating: u8) -> Shot {
        let mut draft = ShotDraft::defaults_for(&id("8d0f5c3e-5a39-4a8e-9d2b-1f0e7c6b5a49"), &[]);
        draft.rating = rating;
        draft.dose = 18.5;
        draft.yield_g = 37.0;
        draft.time = 28;
        Shot::from_draft(id("shot-1"), draft, 1_714_550_400_000)
    }

    #[test]
    fn test_shot_summary() {
        insta::assert_snapshot!(shot_summary(&shot(8)), @"18.5g in, 37g out, 28s, ratio 1:2.0");
    }

    #[test]
    fn test_empty_list() {
        let snapshot = Snapshot::default();
        let screen = Screen::build(&View::BeanList, &snapshot, ShotOrder::Rating);
        insta::assert_snapshot!(render_screen(&screen), @"No beans yet. Add one with `beanlog bean add`.");
    }

    #[test]
    fn test_bean_list_table() {
        let snapshot = snapshot();
        let screen = Screen::build(&View::BeanList, &snapshot, ShotOrder::Rating);
        let text = render_screen(&screen);
        assert!(text.contains("8d0f5c3e"));
        assert!(!text.contains("5a39"));
        assert!(text.contains("Dark Roast"));
        assert!(text.contains("Single Origin"));
    }

    #[test]
    fn test_details_without_shots() {
        let snapshot = snapshot();
        let view = View::bean_details(snapshot.beans[0].id.clone());
        let screen = Screen::build(&view, &snapshot, ShotOrder::Rating);
        insta::assert_snapshot!(render_screen(&screen), @r"
        Dark Roast (Acme)
        Single Origin · Dark roast · id 8d0f5c3e-5a39-4a8e-9d2b-1f0e7c6b5a49
        Notes: Cocoa
        Average rating: -

        No shots logged yet.
        ");
    }

    #[test]
    fn test_details_with_shots() {
        let mut snapshot = snapshot();
        snapshot.insert_shot(shot(8)).unwrap();
        let view = View::bean_details(snapshot.beans[0].id.clone());
        let screen = Screen::build(&view, &snapshot, ShotOrder::Recent);
        let text = render_screen(&screen);
        assert!(text.contains("Average rating: 8.0"));
        assert!(text.contains("Best shot: 8/10, 18.5g in, 37g out, 28s, ratio 1:2.0"));
        assert!(text.contains("Shots by recent:"));
        assert!(text.contains("shot-1"));
    }

    #[test]
    fn test_shot_form_prefill() {
        let snapshot = snapshot();
        let view = View::AddShot {
            bean_id: snapshot.beans[0].id.clone(),
        };
        let screen = Screen::build(&view, &snapshot, ShotOrder::Rating);
        insta::assert_snapshot!(render_screen(&screen), @r"
        Log Shot: Dark Roast
        Dose: 18g
        Yield: 36g
        Time: 30s
        Grind: -
        Rating: 7/10
        ");
    }
}
