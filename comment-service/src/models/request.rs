//! Inbound request body and its classification into a comment mode.

use super::prompt::{ChatMessage, Role};
use crate::error::CommentError;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Most recent transcript entries forwarded in companion mode.
pub const HISTORY_WINDOW: usize = 12;

/// A score as the caller sent it.
///
/// Rendered exactly as received, so `90` stays `90` and `92.5` stays `92.5`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Number(n) => write!(f, "{}", n),
            Score::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Score::Number(value.into())
    }
}

/// JSON body as posted by the frontend. Which fields matter depends on the mode.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCommentRequest {
    pub mode: Option<String>,
    pub exam_type: Option<String>,
    pub current_score: Option<Score>,
    pub history_scores: Option<Vec<Score>>,
    pub user_rebuttal: Option<String>,
    pub previous_comment: Option<String>,
    pub user_message: Option<String>,
    /// Kept loose: malformed entries are dropped, not rejected.
    pub conversation_history: Option<Value>,
}

/// Open-ended chat with the supportive companion persona.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanionChat {
    /// Valid transcript entries, oldest first, at most [`HISTORY_WINDOW`].
    pub history: Vec<ChatMessage>,
    /// Trimmed, non-empty message from the user.
    pub user_message: Option<String>,
}

/// The student pushes back on an earlier comment.
#[derive(Debug, Clone, PartialEq)]
pub struct Rebuttal {
    pub exam_type: String,
    pub current_score: Score,
    pub previous_comment: Option<String>,
    pub user_rebuttal: String,
}

/// A fresh score to be judged against the student's history.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreFeedback {
    pub exam_type: String,
    pub current_score: Score,
    pub history_scores: Vec<Score>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentRequest {
    Companion(CompanionChat),
    Rebuttal(Rebuttal),
    ScoreFeedback(ScoreFeedback),
}

impl CommentRequest {
    /// Parse and classify a raw request body.
    pub fn parse(body: &[u8]) -> Result<Self, CommentError> {
        let raw: RawCommentRequest = serde_json::from_slice(body)?;
        Self::classify(raw)
    }

    /// Pick the mode: companion if asked for, else rebuttal if the student
    /// wrote one, else plain score feedback.
    pub fn classify(raw: RawCommentRequest) -> Result<Self, CommentError> {
        if raw.mode.as_deref() == Some("companion") {
            return Ok(CommentRequest::Companion(CompanionChat {
                history: recent_history(raw.conversation_history.as_ref()),
                user_message: raw
                    .user_message
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty()),
            }));
        }

        let exam_type = raw
            .exam_type
            .ok_or_else(|| CommentError::BadInput("examType is required".to_string()))?;
        let current_score = raw
            .current_score
            .ok_or_else(|| CommentError::BadInput("currentScore is required".to_string()))?;

        match raw.user_rebuttal {
            Some(user_rebuttal) if !user_rebuttal.trim().is_empty() => {
                Ok(CommentRequest::Rebuttal(Rebuttal {
                    exam_type,
                    current_score,
                    previous_comment: raw.previous_comment,
                    user_rebuttal,
                }))
            }
            _ => {
                let history_scores = raw.history_scores.ok_or_else(|| {
                    CommentError::BadInput("historyScores is required".to_string())
                })?;
                Ok(CommentRequest::ScoreFeedback(ScoreFeedback {
                    exam_type,
                    current_score,
                    history_scores,
                }))
            }
        }
    }

    /// Stable label for logs and metrics.
    pub fn mode(&self) -> &'static str {
        match self {
            CommentRequest::Companion(_) => "companion",
            CommentRequest::Rebuttal(_) => "rebuttal",
            CommentRequest::ScoreFeedback(_) => "score_feedback",
        }
    }
}

/// Keep well-formed `{role, content}` entries, then the last [`HISTORY_WINDOW`].
fn recent_history(history: Option<&Value>) -> Vec<ChatMessage> {
    let Some(entries) = history.and_then(Value::as_array) else {
        return Vec::new();
    };

    let valid: Vec<ChatMessage> = entries.iter().filter_map(transcript_entry).collect();
    let skip = valid.len().saturating_sub(HISTORY_WINDOW);
    valid.into_iter().skip(skip).collect()
}

fn transcript_entry(entry: &Value) -> Option<ChatMessage> {
    let role = Role::from_transcript(entry.get("role")?.as_str()?)?;
    let content = entry.get("content")?.as_str()?;
    Some(ChatMessage::new(role, content))
}
