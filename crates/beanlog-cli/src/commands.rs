//! Command runners.

use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow, bail};
use beanlog_cli::confirm::TerminalConfirm;
use beanlog_cli::lookup::{find_bean, find_shot, short_id};
use beanlog_cli::render::render_screen;
use beanlog_cli::settings::Settings;
use beanlog_core::{App, Confirm, CoreError, Decision, Navigate, Screen};
use beanlog_model::{BeanDraft, ShotDraft};
use beanlog_persistence::{
    DirSlotStore, MemorySlotStore, PersistenceError, SlotStore, read_backup,
};

use crate::cli::{
    BeanCommand, BeanEditFields, BeanFields, ConfigCommand, ExportArgs, ImportArgs, ShotCommand,
    ShotFields,
};

type CliApp = App<Box<dyn SlotStore>>;

/// Settings and storage location resolved from flags and the settings file.
pub struct Context {
    pub settings: Settings,
    pub config_path: PathBuf,
    /// `None` keeps the log in memory.
    pub data_dir: Option<PathBuf>,
}

impl Context {
    pub fn new(config: Option<PathBuf>, data_dir: Option<PathBuf>, ephemeral: bool) -> Self {
        let config_path = config.unwrap_or_else(Settings::config_path);
        let settings = Settings::load_from(&config_path);
        let data_dir = if ephemeral {
            None
        } else {
            Some(data_dir.unwrap_or_else(|| settings.data_dir()))
        };
        Self {
            settings,
            config_path,
            data_dir,
        }
    }

    fn open_app(&self) -> CliApp {
        let slot: Box<dyn SlotStore> = match &self.data_dir {
            Some(dir) => {
                tracing::debug!(dir = %dir.display(), "using bean log directory");
                Box::new(DirSlotStore::new(dir))
            }
            None => Box::new(MemorySlotStore::new()),
        };
        App::open(slot, self.settings.app_options())
    }
}

// =============================================================================
// BEANS
// =============================================================================

pub fn run_beans(ctx: &Context) -> Result<()> {
    let app = ctx.open_app();
    println!("{}", render_screen(&app.screen()));
    Ok(())
}

pub fn run_bean(ctx: &Context, command: BeanCommand) -> Result<()> {
    let mut app = ctx.open_app();
    match command {
        BeanCommand::Add(fields) => {
            app.navigate(Navigate::Create).map_err(core_error)?;
            let bean = app.add_bean(bean_draft(fields)?);
            println!("Added {} by {} ({})", bean.name, bean.roaster, short_id(&bean.id));
        }
        BeanCommand::Edit { bean, fields } => {
            let bean_id = find_bean(app.snapshot(), &bean)?;
            app.navigate(Navigate::Select(bean_id.clone()))
                .map_err(core_error)?;
            app.navigate(Navigate::Edit).map_err(core_error)?;
            let Screen::EditBean { mut draft, .. } = app.screen() else {
                bail!("bean {bean_id} cannot be edited");
            };
            apply_bean_edits(&mut draft, fields)?;
            app.update_bean(&bean_id, draft).map_err(core_error)?;
            println!("{}", render_screen(&app.screen()));
        }
        BeanCommand::Show { bean, sort } => {
            let bean_id = find_bean(app.snapshot(), &bean)?;
            if let Some(sort) = sort {
                app.set_shot_order(sort.into());
            }
            app.navigate(Navigate::Select(bean_id)).map_err(core_error)?;
            println!("{}", render_screen(&app.screen()));
        }
        BeanCommand::Delete { bean, confirm } => {
            let bean_id = find_bean(app.snapshot(), &bean)?;
            let decision = app
                .delete_bean(&bean_id, &TerminalConfirm::new(confirm.yes))
                .map_err(core_error)?;
            report(decision, "Bean deleted.");
        }
    }
    finish(&mut app)
}

fn bean_draft(fields: BeanFields) -> Result<BeanDraft> {
    let draft = BeanDraft::new(fields.roaster.trim(), fields.name.trim())
        .with_origin(fields.origin.into())
        .with_roast(fields.roast.into())
        .with_tasting_notes(fields.notes.trim())
        .with_image(fields.image);
    check_bean_draft(&draft)?;
    Ok(draft)
}

fn apply_bean_edits(draft: &mut BeanDraft, fields: BeanEditFields) -> Result<()> {
    if let Some(roaster) = fields.roaster {
        draft.roaster = roaster.trim().to_string();
    }
    if let Some(name) = fields.name {
        draft.name = name.trim().to_string();
    }
    if let Some(origin) = fields.origin {
        draft.origin_type = origin.into();
    }
    if let Some(roast) = fields.roast {
        draft.roast_type = roast.into();
    }
    if let Some(notes) = fields.notes {
        draft.tasting_notes = notes.trim().to_string();
    }
    if fields.clear_image {
        draft.image = None;
    } else if let Some(image) = fields.image {
        draft.image = Some(image);
    }
    check_bean_draft(draft)
}

fn check_bean_draft(draft: &BeanDraft) -> Result<()> {
    if draft.roaster.is_empty() {
        bail!("roaster must not be empty");
    }
    if draft.name.is_empty() {
        bail!("name must not be empty");
    }
    Ok(())
}

// =============================================================================
// SHOTS
// =============================================================================

pub fn run_shot(ctx: &Context, command: ShotCommand) -> Result<()> {
    let mut app = ctx.open_app();
    match command {
        ShotCommand::Add(fields) => {
            let bean_id = find_bean(app.snapshot(), &fields.bean)?;
            app.navigate(Navigate::Select(bean_id.clone()))
                .map_err(core_error)?;
            app.navigate(Navigate::LogShot).map_err(core_error)?;
            let Screen::AddShot { mut draft, .. } = app.screen() else {
                bail!("cannot log a shot for bean {bean_id}");
            };
            apply_shot_fields(&mut draft, fields)?;
            app.add_shot(draft).map_err(core_error)?;
            println!("{}", render_screen(&app.screen()));
        }
        ShotCommand::Delete { shot, confirm } => {
            let shot_id = find_shot(app.snapshot(), &shot)?;
            let decision = app
                .delete_shot(&shot_id, &TerminalConfirm::new(confirm.yes))
                .map_err(core_error)?;
            report(decision, "Shot deleted.");
        }
    }
    finish(&mut app)
}

fn apply_shot_fields(draft: &mut ShotDraft, fields: ShotFields) -> Result<()> {
    if let Some(dose) = fields.dose {
        draft.dose = positive("dose", dose)?;
    }
    if let Some(yield_g) = fields.yield_g {
        draft.yield_g = positive("yield", yield_g)?;
    }
    if let Some(time) = fields.time {
        draft.time = time;
    }
    if let Some(grind) = fields.grind {
        draft.grind_setting = grind.trim().to_string();
    }
    if let Some(rating) = fields.rating {
        draft.rating = rating;
    }
    draft.notes = fields.notes.trim().to_string();
    Ok(())
}

fn positive(field: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        bail!("{field} must be a positive number of grams, got {value}")
    }
}

// =============================================================================
// BACKUP
// =============================================================================

pub fn run_export(ctx: &Context, args: ExportArgs) -> Result<()> {
    let app = ctx.open_app();
    let backup = app.export_data().map_err(core_error)?;
    let dir = args.dir.unwrap_or_else(|| ctx.settings.backup_dir());
    let path = backup.write_to(&dir).map_err(persistence_error)?;
    println!("{}", path.display());
    Ok(())
}

pub fn run_import(ctx: &Context, args: ImportArgs) -> Result<()> {
    import_backup(ctx, &args.file, &TerminalConfirm::new(args.confirm.yes))
}

fn import_backup(ctx: &Context, file: &Path, confirm: &impl Confirm) -> Result<()> {
    let mut app = ctx.open_app();
    let raw = read_backup(file).map_err(persistence_error)?;
    let decision = app.import_data(&raw, confirm).map_err(core_error)?;
    report(decision, "Backup restored.");
    if decision.is_applied() {
        println!("{}", render_screen(&app.screen()));
    }
    finish(&mut app)
}

// =============================================================================
// CONFIG
// =============================================================================

pub fn run_config(ctx: &Context, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Path => println!("{}", ctx.config_path.display()),
        ConfigCommand::Show => {
            print!("{}", ctx.settings.to_toml()?);
            match &ctx.data_dir {
                Some(dir) => println!("# bean log directory: {}", dir.display()),
                None => println!("# bean log kept in memory"),
            }
        }
        ConfigCommand::Init { force } => {
            if ctx.config_path.exists() && !force {
                bail!(
                    "{} already exists, pass --force to overwrite it",
                    ctx.config_path.display()
                );
            }
            Settings::default().save_to(&ctx.config_path)?;
            println!("{}", ctx.config_path.display());
        }
    }
    Ok(())
}

// =============================================================================
// HELPERS
// =============================================================================

fn report(decision: Decision, applied: &str) {
    match decision {
        Decision::Applied => println!("{applied}"),
        Decision::Declined => println!("Cancelled, nothing changed."),
    }
}

/// Push pending changes to disk before exiting.
///
/// With autosave turned off in the settings file nothing is written.
fn finish(app: &mut CliApp) -> Result<()> {
    if !app.options().autosave.enabled {
        if app.is_dirty() {
            tracing::warn!("autosave is disabled, leaving changes unsaved");
            eprintln!("note: autosave is disabled in the settings file, changes were not saved");
        }
        return Ok(());
    }
    if app.flush() {
        Ok(())
    } else {
        Err(anyhow!("changes could not be saved; see the log for details"))
    }
}

fn core_error(error: CoreError) -> anyhow::Error {
    match error {
        CoreError::Persistence(error) => persistence_error(error),
        other => anyhow::Error::new(other),
    }
}

fn persistence_error(error: PersistenceError) -> anyhow::Error {
    let message = match error.suggestion() {
        Some(hint) => format!("{}\nhint: {hint}", error.user_message()),
        None => error.user_message(),
    };
    anyhow::Error::new(error).context(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use beanlog_core::{AppOptions, AssumeNo, AssumeYes};
    use beanlog_model::{EntityId, RoastType};
    use beanlog_persistence::{AutoSaveConfig, STORAGE_KEY};
    use tempfile::{TempDir, tempdir};

    use crate::cli::{OriginArg, RoastArg};

    const BACKUP: &str = r#"{"beans":[{"id":"b9","roaster":"Other","name":"Guest","originType":"Blend","roastType":"Light","createdAt":1}],"shots":[]}"#;

    fn context(dir: &TempDir) -> Context {
        Context::new(
            Some(dir.path().join("settings.toml")),
            Some(dir.path().join("data")),
            false,
        )
    }

    fn slot_path(dir: &TempDir) -> PathBuf {
        dir.path().join("data").join(format!("{STORAGE_KEY}.json"))
    }

    fn bean_fields(roaster: &str, name: &str) -> BeanFields {
        BeanFields {
            roaster: roaster.to_string(),
            name: name.to_string(),
            origin: OriginArg::Blend,
            roast: RoastArg::Dark,
            notes: " Cocoa ".to_string(),
            image: Some("data:image/png;base64,AAAA".to_string()),
        }
    }

    fn no_edits() -> BeanEditFields {
        BeanEditFields {
            roaster: None,
            name: None,
            origin: None,
            roast: None,
            notes: None,
            image: None,
            clear_image: false,
        }
    }

    fn shot_fields(bean: &str) -> ShotFields {
        ShotFields {
            bean: bean.to_string(),
            rating: None,
            dose: None,
            yield_g: None,
            time: None,
            grind: None,
            notes: String::new(),
        }
    }

    #[test]
    fn test_bean_draft_trims_and_requires_names() {
        let draft = bean_draft(bean_fields(" Acme ", "House")).unwrap();
        assert_eq!(draft.roaster, "Acme");
        assert_eq!(draft.tasting_notes, "Cocoa");

        let err = bean_draft(bean_fields("Acme", "   ")).unwrap_err();
        assert_eq!(err.to_string(), "name must not be empty");
    }

    #[test]
    fn test_bean_edits_keep_unset_fields() {
        let original = bean_draft(bean_fields("Acme", "House")).unwrap();
        let mut draft = original.clone();
        apply_bean_edits(&mut draft, no_edits()).unwrap();
        assert_eq!(draft, original);

        let edits = BeanEditFields {
            name: Some(" Decaf ".to_string()),
            roast: Some(RoastArg::Light),
            ..no_edits()
        };
        apply_bean_edits(&mut draft, edits).unwrap();
        assert_eq!(draft.name, "Decaf");
        assert_eq!(draft.roast_type, RoastType::Light);
        assert_eq!(draft.roaster, "Acme");
        assert_eq!(draft.image, original.image);
    }

    #[test]
    fn test_image_replace_and_clear() {
        let mut draft = bean_draft(bean_fields("Acme", "House")).unwrap();
        let replace = BeanEditFields {
            image: Some("data:image/png;base64,BBBB".to_string()),
            ..no_edits()
        };
        apply_bean_edits(&mut draft, replace).unwrap();
        assert_eq!(draft.image.as_deref(), Some("data:image/png;base64,BBBB"));

        let clear = BeanEditFields {
            clear_image: true,
            ..no_edits()
        };
        apply_bean_edits(&mut draft, clear).unwrap();
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_edit_cannot_blank_roaster() {
        let mut draft = bean_draft(bean_fields("Acme", "House")).unwrap();
        let edits = BeanEditFields {
            roaster: Some("  ".to_string()),
            ..no_edits()
        };
        let err = apply_bean_edits(&mut draft, edits).unwrap_err();
        assert_eq!(err.to_string(), "roaster must not be empty");
    }

    #[test]
    fn test_positive_grams() {
        assert_eq!(positive("dose", 18.5).unwrap(), 18.5);
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(positive("dose", value).is_err(), "{value} accepted");
        }
        assert_eq!(
            positive("yield", 0.0).unwrap_err().to_string(),
            "yield must be a positive number of grams, got 0"
        );
    }

    #[test]
    fn test_shot_fields_override_defaults() {
        let bean_id = EntityId::new("b1").unwrap();
        let mut draft = ShotDraft::defaults_for(&bean_id, &[]);
        let fields = ShotFields {
            dose: Some(19.0),
            rating: Some(9),
            grind: Some(" 12 ".to_string()),
            ..shot_fields("b1")
        };
        apply_shot_fields(&mut draft, fields).unwrap();
        assert_eq!(draft.dose, 19.0);
        assert_eq!(draft.yield_g, ShotDraft::DEFAULT_YIELD);
        assert_eq!(draft.time, ShotDraft::DEFAULT_TIME);
        assert_eq!(draft.grind_setting, "12");
        assert_eq!(draft.rating, 9);

        let negative = ShotFields {
            yield_g: Some(-2.0),
            ..shot_fields("b1")
        };
        assert!(apply_shot_fields(&mut draft, negative).is_err());
    }

    #[test]
    fn test_commands_persist_to_data_dir() {
        let dir = tempdir().unwrap();
        let ctx = context(&dir);
        run_bean(&ctx, BeanCommand::Add(bean_fields("Acme", "House"))).unwrap();
        let bean_id = ctx.open_app().beans()[0].id.clone();

        let fields = ShotFields {
            rating: Some(9),
            ..shot_fields(&bean_id.as_str()[..4])
        };
        run_shot(&ctx, ShotCommand::Add(fields)).unwrap();

        let app = ctx.open_app();
        assert_eq!(app.beans().len(), 1);
        assert_eq!(app.shots().len(), 1);
        assert_eq!(app.shots()[0].bean_id, bean_id);
        assert_eq!(app.shots()[0].rating, 9);
        assert!(slot_path(&dir).exists());
    }

    #[test]
    fn test_declined_import_leaves_slot_alone() {
        let dir = tempdir().unwrap();
        let ctx = context(&dir);
        run_bean(&ctx, BeanCommand::Add(bean_fields("Acme", "House"))).unwrap();
        let before = fs::read_to_string(slot_path(&dir)).unwrap();
        let backup = dir.path().join("backup.json");
        fs::write(&backup, BACKUP).unwrap();

        import_backup(&ctx, &backup, &AssumeNo).unwrap();
        assert_eq!(fs::read_to_string(slot_path(&dir)).unwrap(), before);

        import_backup(&ctx, &backup, &AssumeYes).unwrap();
        let app = ctx.open_app();
        assert_eq!(app.beans().len(), 1);
        assert_eq!(app.beans()[0].name, "Guest");
    }

    #[test]
    fn test_rejected_import_reports_reason() {
        let dir = tempdir().unwrap();
        let ctx = context(&dir);
        run_bean(&ctx, BeanCommand::Add(bean_fields("Acme", "House"))).unwrap();
        let before = fs::read_to_string(slot_path(&dir)).unwrap();
        let backup = dir.path().join("backup.json");
        fs::write(&backup, r#"{"beans": []}"#).unwrap();

        let err = import_backup(&ctx, &backup, &AssumeYes).unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Invalid file: the backup has no `shots` list."),
            "{err}"
        );
        assert_eq!(fs::read_to_string(slot_path(&dir)).unwrap(), before);
    }

    #[test]
    fn test_finish_fails_when_save_fails() {
        let slot: Box<dyn SlotStore> = Box::new(MemorySlotStore::with_quota(8));
        let mut app = App::open(slot, AppOptions::default());
        app.add_bean(BeanDraft::new("Acme", "House"));

        let err = finish(&mut app).unwrap_err();
        assert_eq!(
            err.to_string(),
            "changes could not be saved; see the log for details"
        );
    }

    #[test]
    fn test_disabled_autosave_writes_nothing() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            autosave: AutoSaveConfig::disabled(),
            ..Settings::default()
        };
        settings.save_to(&dir.path().join("settings.toml")).unwrap();
        let ctx = context(&dir);
        assert!(!ctx.settings.autosave.enabled);

        run_bean(&ctx, BeanCommand::Add(bean_fields("Acme", "House"))).unwrap();
        assert!(!slot_path(&dir).exists());
        assert!(ctx.open_app().beans().is_empty());
    }
}
