use thiserror::Error;
use tracing::debug;

use crate::schemas::{ExpenseEntry, RawAmount, Session, SettlementResult};

#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("No expense entry at index {0}")]
    EntryNotFound(usize),
    #[error("Expense entry {entry} has no participant at index {name}")]
    ParticipantNotFound { entry: usize, name: usize },
}

/// The editable expense list. Always holds at least one entry, and every
/// entry holds at least one participant slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
    card_owner: String,
    entries: Vec<ExpenseEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            card_owner: String::new(),
            entries: vec![ExpenseEntry::new()],
        }
    }

    pub fn entries(&self) -> &[ExpenseEntry] {
        &self.entries
    }

    pub fn card_owner(&self) -> &str {
        &self.card_owner
    }

    pub fn set_card_owner(&mut self, value: impl Into<String>) {
        self.card_owner = value.into();
        debug!(card_owner = %self.card_owner, "Card owner set");
    }

    pub fn add_entry(&mut self) {
        self.entries.push(ExpenseEntry::new());
        debug!(entries = self.entries.len(), "Expense entry added");
    }

    /// Removing the last remaining entry is a no-op.
    pub fn remove_entry(&mut self, index: usize) -> Result<(), LedgerError> {
        self.entry_mut(index)?;
        if self.entries.len() > 1 {
            self.entries.remove(index);
            debug!(index, "Expense entry removed");
        }
        Ok(())
    }

    pub fn set_amount(&mut self, index: usize, raw: impl Into<String>) -> Result<(), LedgerError> {
        let entry = self.entry_mut(index)?;
        entry.amount = RawAmount::new(raw);
        debug!(index, amount = %entry.amount.as_str(), "Amount set");
        Ok(())
    }

    pub fn toggle_category(&mut self, index: usize) -> Result<(), LedgerError> {
        let entry = self.entry_mut(index)?;
        entry.is_drinking = !entry.is_drinking;
        debug!(index, is_drinking = entry.is_drinking, "Category toggled");
        Ok(())
    }

    pub fn add_participant(&mut self, index: usize) -> Result<(), LedgerError> {
        let participants = &mut self.entry_mut(index)?.participants;
        participants.push(String::new());
        debug!(index, slots = participants.len(), "Participant slot added");
        Ok(())
    }

    /// Removing an entry's only participant slot is a no-op.
    pub fn remove_participant(&mut self, index: usize, name_index: usize) -> Result<(), LedgerError> {
        let participants = &mut self.entry_mut(index)?.participants;
        if name_index >= participants.len() {
            return Err(LedgerError::ParticipantNotFound {
                entry: index,
                name: name_index,
            });
        }
        if participants.len() > 1 {
            participants.remove(name_index);
            debug!(index, name_index, "Participant slot removed");
        }
        Ok(())
    }

    pub fn set_participant_name(
        &mut self,
        index: usize,
        name_index: usize,
        value: impl Into<String>,
    ) -> Result<(), LedgerError> {
        let slot = self
            .entry_mut(index)?
            .participants
            .get_mut(name_index)
            .ok_or(LedgerError::ParticipantNotFound {
                entry: index,
                name: name_index,
            })?;
        *slot = value.into();
        debug!(index, name_index, name = %slot, "Participant name set");
        Ok(())
    }

    pub fn to_session(&self, results: Vec<SettlementResult>) -> Session {
        Session {
            card_owner: self.card_owner.clone(),
            entries: self.entries.clone(),
            results,
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut ExpenseEntry, LedgerError> {
        self.entries
            .get_mut(index)
            .ok_or(LedgerError::EntryNotFound(index))
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}
