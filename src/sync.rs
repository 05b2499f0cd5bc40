//! Thread-safe handle to one table.
//!
//! A turn spans movement, rent and ownership changes that must look atomic
//! to any observer. The only way in is [`SharedTable::with`], which runs a
//! closure under one lock, so a whole roll-and-resolve is a single critical
//! section.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::core::{ConfigError, GameConfig};
use crate::turn::TurnController;
use crate::view::TableView;

#[derive(Clone, Debug)]
pub struct SharedTable {
    inner: Arc<Mutex<TurnController>>,
}

impl SharedTable {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_controller(TurnController::new(config)?))
    }

    #[must_use]
    pub fn from_controller(controller: TurnController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Run `f` with exclusive access to the table.
    pub fn with<R>(&self, f: impl FnOnce(&mut TurnController) -> R) -> R {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }

    /// Snapshot taken under the lock.
    #[must_use]
    pub fn view(&self) -> TableView {
        self.inner.lock().view()
    }
}
