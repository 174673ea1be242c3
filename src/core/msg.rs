pub mod letters;
pub mod system;
pub mod ui;

use letters::LettersMsg;
use system::SystemMsg;
use ui::UiMsg;

/// Domain messages representing application intent.
/// These are processed by the update function and never perform I/O themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Quit, clock, status line (delegated to SystemState)
    System(SystemMsg),

    /// Loading, selection and deletion of letters (delegated to LettersState)
    Letters(LettersMsg),

    /// Modal dialogs and navigation
    Ui(UiMsg),
}

impl Msg {
    /// Helper to exclude frequent messages during debugging
    pub fn is_frequent(&self) -> bool {
        match self {
            Msg::System(msg) => msg.is_frequent(),
            Msg::Letters(_) | Msg::Ui(_) => false,
        }
    }
}
