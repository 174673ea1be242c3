use crate::{
    domain::letter::{Letter, LetterId},
    infrastructure::api::ApiError,
};

/// Messages specific to LettersState
#[derive(Debug, Clone, PartialEq)]
pub enum LettersMsg {
    /// Start a view load (startup or refresh)
    Load,
    Loaded(Vec<Letter>),
    LoadFailed(ApiError),

    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,

    /// The server confirmed the deletion
    Deleted(LetterId),
    DeleteFailed { id: LetterId, error: ApiError },
}
