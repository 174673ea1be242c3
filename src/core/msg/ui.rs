/// UI-specific messages for dialogs on top of the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMsg {
    /// Show the full content of the selected letter
    OpenDetail,
    CloseDetail,

    /// Ask for confirmation before deleting the selected letter
    AskDeleteSelected,
    ConfirmDelete,
    CancelDelete,
}
