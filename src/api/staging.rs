use tracing::debug;

use crate::axes::model::{AxesInfo, AxisSlot, AxisValues};
use crate::error::{DigitizeError, DigitizeResult};

/// Lifecycle stage of one axis slot under staged editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStage {
    Absent,
    Draft,
    Committed,
    DeletePending,
}

/// Staged editing view over one annotation's axes.
///
/// A slot moves `Absent → Draft → Committed` when building a new axis, or
/// `Committed → DeletePending → Absent` when removing one. Drafts are deep
/// copies; the committed axes change only on an explicit accept or a
/// confirmed delete, and a rejected accept leaves both the draft and the
/// committed axes intact.
#[derive(Debug, Clone, PartialEq)]
pub struct AxesEditor {
    committed: AxesInfo,
    drafts: [Option<AxisValues>; 4],
    delete_pending: [bool; 4],
}

impl AxesEditor {
    #[must_use]
    pub fn new(committed: AxesInfo) -> Self {
        Self {
            committed,
            drafts: [None, None, None, None],
            delete_pending: [false; 4],
        }
    }

    #[must_use]
    pub fn committed(&self) -> &AxesInfo {
        &self.committed
    }

    #[must_use]
    pub fn into_committed(self) -> AxesInfo {
        self.committed
    }

    #[must_use]
    pub fn stage(&self, slot: AxisSlot) -> SlotStage {
        let index = slot_index(slot);
        if self.drafts[index].is_some() {
            SlotStage::Draft
        } else if self.delete_pending[index] {
            SlotStage::DeletePending
        } else if self.committed.slot(slot).is_some() {
            SlotStage::Committed
        } else {
            SlotStage::Absent
        }
    }

    /// Opens a draft on a slot: a deep copy of the committed axis if one
    /// exists, otherwise a fresh default.
    pub fn begin_draft(&mut self, slot: AxisSlot) -> DigitizeResult<&mut AxisValues> {
        let index = slot_index(slot);
        if self.delete_pending[index] {
            return Err(DigitizeError::InvalidData(format!(
                "axis slot {slot} has a pending deletion"
            )));
        }
        if self.drafts[index].is_some() {
            return Err(DigitizeError::InvalidData(format!(
                "axis slot {slot} already has a draft"
            )));
        }
        let draft = self.committed.slot(slot).cloned().unwrap_or_default();
        Ok(self.drafts[index].insert(draft))
    }

    #[must_use]
    pub fn draft(&self, slot: AxisSlot) -> Option<&AxisValues> {
        self.drafts[slot_index(slot)].as_ref()
    }

    pub fn draft_mut(&mut self, slot: AxisSlot) -> Option<&mut AxisValues> {
        self.drafts[slot_index(slot)].as_mut()
    }

    /// Installs the slot's draft into the committed axes. The merged result
    /// is validated first; on failure nothing changes and the draft stays
    /// open for correction.
    pub fn accept_draft(&mut self, slot: AxisSlot) -> DigitizeResult<()> {
        let index = slot_index(slot);
        let draft = self.drafts[index].clone().ok_or_else(|| {
            DigitizeError::InvalidData(format!("axis slot {slot} has no draft to accept"))
        })?;
        let mut candidate = self.committed.clone();
        *candidate.slot_mut(slot) = Some(draft);
        candidate.validate()?;
        self.committed = candidate;
        self.drafts[index] = None;
        debug!(slot = %slot, "accepted axis draft");
        Ok(())
    }

    /// Drops the slot's draft without touching the committed axes. Returns
    /// whether a draft existed.
    pub fn discard_draft(&mut self, slot: AxisSlot) -> bool {
        self.drafts[slot_index(slot)].take().is_some()
    }

    /// Marks a committed axis for deletion. The axis stays in place until
    /// the deletion is confirmed.
    pub fn request_delete(&mut self, slot: AxisSlot) -> DigitizeResult<()> {
        let index = slot_index(slot);
        if self.drafts[index].is_some() {
            return Err(DigitizeError::InvalidData(format!(
                "axis slot {slot} has an open draft"
            )));
        }
        if self.committed.slot(slot).is_none() {
            return Err(DigitizeError::InvalidData(format!(
                "axis slot {slot} is not committed"
            )));
        }
        self.delete_pending[index] = true;
        Ok(())
    }

    pub fn confirm_delete(&mut self, slot: AxisSlot) -> DigitizeResult<()> {
        let index = slot_index(slot);
        if !self.delete_pending[index] {
            return Err(DigitizeError::InvalidData(format!(
                "axis slot {slot} has no pending deletion"
            )));
        }
        *self.committed.slot_mut(slot) = None;
        self.delete_pending[index] = false;
        debug!(slot = %slot, "deleted committed axis");
        Ok(())
    }

    /// Returns whether a pending deletion was cancelled.
    pub fn cancel_delete(&mut self, slot: AxisSlot) -> bool {
        let index = slot_index(slot);
        let was_pending = self.delete_pending[index];
        self.delete_pending[index] = false;
        was_pending
    }
}

fn slot_index(slot: AxisSlot) -> usize {
    match slot {
        AxisSlot::PrimaryHorizontal => 0,
        AxisSlot::PrimaryVertical => 1,
        AxisSlot::SecondaryHorizontal => 2,
        AxisSlot::SecondaryVertical => 3,
    }
}
