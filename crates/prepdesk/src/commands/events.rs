//! Audit log operations

use super::*;

impl<S: MaterialStore> CommandExecutor<S> {
    /// Read the audit log, newest last.
    ///
    /// `limit` keeps only the most recent entries.
    pub fn list_events(&self, limit: Option<usize>) -> Result<Vec<Event>> {
        let events = self.storage.read_events()?;
        match limit {
            Some(n) if events.len() > n => Ok(events[events.len() - n..].to_vec()),
            _ => Ok(events),
        }
    }

    /// Read audit log entries for one material.
    pub fn events_for_material(&self, id: &str) -> Result<Vec<Event>> {
        let full_id = self.storage.resolve_material_id(id)?;
        Ok(self
            .storage
            .read_events()?
            .into_iter()
            .filter(|e| e.material_id() == full_id)
            .collect())
    }
}
