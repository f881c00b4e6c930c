pub mod prompt;
pub mod request;

pub use prompt::{ChatMessage, CompletionResult, PromptPayload, Role};
pub use request::{
    CommentRequest, CompanionChat, RawCommentRequest, Rebuttal, Score, ScoreFeedback,
    HISTORY_WINDOW,
};
