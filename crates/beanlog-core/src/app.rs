//! The application state object.

use beanlog_model::{
    Bean, BeanDraft, EntityId, ModelError, Shot, ShotDraft, ShotOrder, Snapshot, shots_for,
};
use beanlog_persistence::{
    Backup, DirtyTracker, SlotStore, export_snapshot, import_snapshot, load_snapshot,
    save_snapshot,
};

use crate::clock::{Clock, SystemClock};
use crate::confirm::{Confirm, ConfirmPrompt};
use crate::error::{CoreError, Result};
use crate::options::{AfterAddBean, AppOptions};
use crate::screen::Screen;
use crate::view::{Navigate, View};

/// Outcome of an action behind the confirmation gate.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Applied,
    Declined,
}

impl Decision {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Bean log state: the snapshot, the current view and the slot it is kept in.
///
/// Memory is authoritative. Each applied mutation marks the state dirty and
/// saves it when the auto-save config says so; a failed save is logged and
/// the session carries on with the in-memory state.
pub struct App<S: SlotStore, C: Clock = SystemClock> {
    snapshot: Snapshot,
    view: View,
    shot_order: ShotOrder,
    options: AppOptions,
    slot: S,
    clock: C,
    tracker: DirtyTracker,
}

impl<S: SlotStore> App<S> {
    /// Load the snapshot from `slot` and start on the bean list.
    pub fn open(slot: S, options: AppOptions) -> Self {
        Self::open_with_clock(slot, options, SystemClock)
    }
}

impl<S: SlotStore, C: Clock> App<S, C> {
    pub fn open_with_clock(mut slot: S, options: AppOptions, clock: C) -> Self {
        let snapshot = load_snapshot(&mut slot);
        tracing::info!(
            beans = snapshot.beans.len(),
            shots = snapshot.shots.len(),
            "bean log opened"
        );
        Self {
            snapshot,
            view: View::default(),
            shot_order: options.shot_order,
            options,
            slot,
            clock,
            tracker: DirtyTracker::new(),
        }
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn beans(&self) -> &[Bean] {
        &self.snapshot.beans
    }

    pub fn shots(&self) -> &[Shot] {
        &self.snapshot.shots
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    /// Render data for the current view.
    pub fn screen(&self) -> Screen<'_> {
        Screen::build(&self.view, &self.snapshot, self.shot_order)
    }

    pub fn options(&self) -> &AppOptions {
        &self.options
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whether some change has not reached the slot yet.
    pub fn is_dirty(&self) -> bool {
        self.tracker.is_dirty()
    }

    pub fn shot_order(&self) -> ShotOrder {
        self.shot_order
    }

    pub fn set_shot_order(&mut self, order: ShotOrder) {
        self.shot_order = order;
    }

    /// Switch between rating and recency order, returning the new order.
    pub fn toggle_shot_order(&mut self) -> ShotOrder {
        self.shot_order = self.shot_order.toggled();
        self.shot_order
    }

    // =========================================================================
    // NAVIGATION
    // =========================================================================

    /// Apply a user navigation. On error the view is unchanged.
    pub fn navigate(&mut self, navigate: Navigate) -> Result<&View> {
        if let Navigate::Select(bean_id) = &navigate
            && !self.snapshot.contains_bean(bean_id)
        {
            return Err(CoreError::bean_not_found(bean_id));
        }
        let next = self.view.navigate(&navigate)?;
        self.set_view(next);
        Ok(&self.view)
    }

    fn set_view(&mut self, view: View) {
        let view = view.resolve(&self.snapshot);
        if view != self.view {
            tracing::debug!(from = self.view.name(), to = view.name(), "view changed");
        }
        self.view = view;
    }

    // =========================================================================
    // BEANS
    // =========================================================================

    /// Create a bean and prepend it to the list.
    pub fn add_bean(&mut self, draft: BeanDraft) -> &Bean {
        let created_at = self.clock.now_ms();
        let bean_id = self.snapshot.add_bean(draft, created_at).id.clone();
        tracing::debug!(%bean_id, "bean added");

        let next = match self.options.after_add_bean {
            AfterAddBean::BeanList => View::BeanList,
            AfterAddBean::BeanDetails => View::bean_details(bean_id),
        };
        self.set_view(next);
        self.commit();
        &self.snapshot.beans[0]
    }

    /// Replace a bean's editable fields and show its details.
    pub fn update_bean(&mut self, bean_id: &EntityId, draft: BeanDraft) -> Result<&Bean> {
        self.snapshot
            .bean_mut(bean_id)
            .ok_or_else(|| CoreError::bean_not_found(bean_id))?
            .apply(draft);
        tracing::debug!(%bean_id, "bean updated");

        self.set_view(View::bean_details(bean_id.clone()));
        self.commit();
        self.snapshot
            .bean(bean_id)
            .ok_or_else(|| CoreError::bean_not_found(bean_id))
    }

    /// Delete a bean and every shot logged against it, once confirmed.
    pub fn delete_bean(&mut self, bean_id: &EntityId, confirm: &impl Confirm) -> Result<Decision> {
        let bean = self
            .snapshot
            .bean(bean_id)
            .ok_or_else(|| CoreError::bean_not_found(bean_id))?;
        let prompt = ConfirmPrompt::DeleteBean {
            bean,
            shot_count: shots_for(bean_id, &self.snapshot.shots).count(),
        };
        if !confirm.confirm(&prompt) {
            tracing::debug!(%bean_id, "bean deletion declined");
            return Ok(Decision::Declined);
        }

        if let Some((_, cascaded)) = self.snapshot.remove_bean(bean_id) {
            tracing::debug!(%bean_id, cascaded, "bean deleted");
        }
        self.set_view(View::BeanList);
        self.commit();
        Ok(Decision::Applied)
    }

    // =========================================================================
    // SHOTS
    // =========================================================================

    /// Log a shot and show its bean.
    pub fn add_shot(&mut self, draft: ShotDraft) -> Result<&Shot> {
        let timestamp = self.clock.now_ms();
        let bean_id = self
            .snapshot
            .add_shot(draft, timestamp)
            .map_err(|err| match err {
                ModelError::UnknownBean(bean_id) => CoreError::ReferentialIntegrity { bean_id },
                other => other.into(),
            })?
            .bean_id
            .clone();
        tracing::debug!(%bean_id, "shot logged");

        self.set_view(View::bean_details(bean_id));
        self.commit();
        Ok(&self.snapshot.shots[0])
    }

    /// Remove one shot, once confirmed. The view stays where it is.
    pub fn delete_shot(&mut self, shot_id: &EntityId, confirm: &impl Confirm) -> Result<Decision> {
        let shot = self
            .snapshot
            .shot(shot_id)
            .ok_or_else(|| CoreError::shot_not_found(shot_id))?;
        if !confirm.confirm(&ConfirmPrompt::DeleteShot { shot }) {
            tracing::debug!(%shot_id, "shot deletion declined");
            return Ok(Decision::Declined);
        }

        self.snapshot.remove_shot(shot_id);
        tracing::debug!(%shot_id, "shot deleted");
        self.set_view(self.view.clone());
        self.commit();
        Ok(Decision::Applied)
    }

    // =========================================================================
    // BACKUP
    // =========================================================================

    /// Serialize the whole log as a dated backup document.
    pub fn export_data(&self) -> Result<Backup> {
        let backup = export_snapshot(&self.snapshot, self.clock.today())?;
        tracing::info!(
            file = %backup.file_name,
            beans = self.snapshot.beans.len(),
            shots = self.snapshot.shots.len(),
            "backup exported"
        );
        Ok(backup)
    }

    /// Replace the whole log with a backup.
    ///
    /// The backup is checked before anything is asked; a rejected or declined
    /// import leaves the log untouched.
    pub fn import_data(&mut self, raw: &str, confirm: &impl Confirm) -> Result<Decision> {
        let imported = import_snapshot(raw)?;
        let prompt = ConfirmPrompt::ImportOverwrite {
            beans: imported.beans.len(),
            shots: imported.shots.len(),
        };
        if !confirm.confirm(&prompt) {
            tracing::debug!("import declined");
            return Ok(Decision::Declined);
        }

        tracing::info!(
            beans = imported.beans.len(),
            shots = imported.shots.len(),
            "backup imported"
        );
        self.snapshot = imported;
        self.set_view(View::BeanList);
        self.commit();
        Ok(Decision::Applied)
    }

    // =========================================================================
    // AUTO-SAVE
    // =========================================================================

    fn commit(&mut self) {
        self.tracker.mark_dirty();
        self.tick();
    }

    /// Save if the auto-save config says a save is due.
    pub fn tick(&mut self) {
        if self.tracker.should_auto_save(&self.options.autosave) {
            self.persist();
        }
    }

    /// Save any pending change now. Returns whether the slot is up to date.
    pub fn flush(&mut self) -> bool {
        if self.tracker.is_dirty() {
            self.persist();
        }
        !self.tracker.is_dirty()
    }

    fn persist(&mut self) {
        self.tracker.start_save();
        match save_snapshot(&mut self.slot, &self.snapshot) {
            Ok(()) => self.tracker.save_complete(),
            Err(error) => {
                tracing::warn!(
                    %error,
                    suggestion = ?error.suggestion(),
                    "failed to save bean log, keeping changes in memory"
                );
                self.tracker.save_failed();
            }
        }
    }
}

impl<S: SlotStore, C: Clock> std::fmt::Debug for App<S, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("beans", &self.snapshot.beans.len())
            .field("shots", &self.snapshot.shots.len())
            .field("view", &self.view)
            .field("shot_order", &self.shot_order)
            .field("dirty", &self.tracker.is_dirty())
            .finish()
    }
}
