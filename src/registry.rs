// src/registry.rs
//! Plots kept alive across frames, keyed by the hash of their label.

use crate::host::Host;
use crate::plot::PlotState;
use crate::pool::Pool;
use std::fmt;
use std::rc::Rc;

pub struct PlotRegistry {
    pool: Pool<PlotState>,
    host: Rc<dyn Host>,
}

impl fmt::Debug for PlotRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlotRegistry")
            .field("plots", &self.pool.len())
            .finish_non_exhaustive()
    }
}

impl PlotRegistry {
    pub fn new(host: Rc<dyn Host>) -> Self {
        Self {
            pool: Pool::new(),
            host,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }

    /// Slot of the plot labelled `label`, created with defaults on first use.
    /// The flag is true when the plot was just created.
    pub fn ensure(&mut self, label: &str) -> (usize, bool) {
        let id = self.host.hash_str(label);
        let host = &self.host;
        let (idx, created) = self
            .pool
            .get_or_insert_with(id, || PlotState::new(id, label, host.clone()));
        if created {
            log::debug!("created plot '{}' ({:#010x}) in slot {}", label, id, idx);
        }
        (idx, created)
    }

    /// The plot labelled `label`, created on first use.
    pub fn get_or_create(&mut self, label: &str) -> &mut PlotState {
        let (idx, _) = self.ensure(label);
        &mut self.pool[idx]
    }

    pub fn get(&self, idx: usize) -> Option<&PlotState> {
        self.pool.get_by_index(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut PlotState> {
        self.pool.get_by_index_mut(idx)
    }

    pub fn get_by_label(&self, label: &str) -> Option<&PlotState> {
        self.pool.get_by_key(self.host.hash_str(label))
    }

    /// Restores the plot in slot `idx` to its defaults. Returns false for an
    /// unknown slot.
    pub fn reset(&mut self, idx: usize) -> bool {
        match self.pool.get_by_index_mut(idx) {
            Some(plot) => {
                plot.reset();
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlotState> {
        self.pool.iter()
    }
}
