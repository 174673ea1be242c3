use crate::domain::letter::LetterId;

/// Dialog shown on top of the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    /// Waiting for the user to confirm deleting `id`
    ConfirmDelete { id: LetterId, title: String },
    /// Full content of `id`
    Detail { id: LetterId },
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub modal: Modal,
}

impl UiState {
    pub fn is_confirming_delete(&self) -> bool {
        matches!(self.modal, Modal::ConfirmDelete { .. })
    }

    pub fn is_showing_detail(&self) -> bool {
        matches!(self.modal, Modal::Detail { .. })
    }

    /// Close whatever dialog is open
    pub fn close(&mut self) -> Modal {
        std::mem::take(&mut self.modal)
    }
}
