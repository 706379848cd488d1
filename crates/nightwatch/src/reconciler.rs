//! Maps monitored-entity state to backlight transitions.

use crate::error::{NightwatchError, NightwatchResult};
use backlight::{LedDriver, NightmodeController};
use hass_protocol::{EntityState, StateChange};
use tracing::{debug, warn};

/// Filters the event/state stream down to one entity and decides which
/// backlight transition its value calls for.
pub struct Reconciler {
    entity_id: String,
}

impl Reconciler {
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
        }
    }

    /// Handle one state_changed event.
    ///
    /// Events for other entities are ignored before their payload is looked
    /// at; a matched event without a new state is malformed and fatal.
    pub async fn on_event<D: LedDriver>(
        &self,
        change: &StateChange,
        lights: &mut NightmodeController<D>,
    ) -> NightwatchResult<()> {
        if change.entity_id != self.entity_id {
            return Ok(());
        }
        let new_state =
            change
                .new_state
                .as_ref()
                .ok_or_else(|| NightwatchError::MissingNewState {
                    entity_id: change.entity_id.clone(),
                })?;
        self.reconcile(&new_state.state, lights).await
    }

    /// Handle a full-state snapshot, applying the monitored entity's current
    /// value if present. The first matching record wins.
    pub async fn on_bootstrap<D: LedDriver>(
        &self,
        states: &[EntityState],
        lights: &mut NightmodeController<D>,
    ) -> NightwatchResult<()> {
        match states.iter().find(|record| record.entity_id == self.entity_id) {
            Some(record) => self.reconcile(&record.state, lights).await,
            None => {
                warn!(entity_id = %self.entity_id, "Monitored entity absent from state snapshot");
                Ok(())
            }
        }
    }

    /// Apply the transition one observed state value calls for.
    ///
    /// Only the three known literals move the latch; anything else is
    /// deliberately left alone so unknown states never flap the lights.
    async fn reconcile<D: LedDriver>(
        &self,
        state: &str,
        lights: &mut NightmodeController<D>,
    ) -> NightwatchResult<()> {
        debug!(entity_id = %self.entity_id, state = %state, "Reconciling monitored entity");
        match state {
            "off" => lights.enable().await?,
            "on" | "unavailable" => lights.disable()?,
            _ => {}
        }
        Ok(())
    }
}
