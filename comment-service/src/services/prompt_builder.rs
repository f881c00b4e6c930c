//! Persona texts and prompt assembly for each comment mode.

use crate::models::{
    ChatMessage, CommentRequest, CompanionChat, PromptPayload, Rebuttal, ScoreFeedback,
};

/// Strict teacher with a sharp tongue, judging a new score.
pub const SCORE_FEEDBACK_PERSONA: &str = "你是一个说话幽默、带点\"毒舌\"属性的严厉老师。
请根据学生的成绩给出一句简短的评价（50字以内）。
- 进步了：用略带惊讶但傲娇的语气夸奖 (例如: \"哟，这次居然没考砸？\")。
- 退步了：用幽默的比喻损一下，并给出复习建议。
- 必须包含1-2个emoji。";

/// Same teacher, answering a student who argues with the last comment.
pub const REBUTTAL_PERSONA: &str = "你是一个说话幽默、带点\"毒舌\"属性的严厉老师。
学生对你刚才的评价不服气，正在反驳你。
请用一句机智的话回怼（50字以内）：
- 保持傲娇，嘴上不认输，但不能真的伤人。
- 如果学生说得有道理，可以勉强承认，再顺手提醒一句学习上的事。
- 必须包含1-2个emoji。";

/// Warm study companion for free-form chat.
pub const COMPANION_PERSONA: &str = "你是一位温暖、耐心又有点幽默的学习陪伴者。
你在和一名正在备考的学生聊天：
- 认真倾听，先回应对方的情绪，再给出具体、可执行的小建议。
- 语气轻松自然，像朋友一样，不说教。
- 每次回复控制在100字以内，可以适当使用emoji。";

/// Sent in place of a user message when the companion chat is opened empty.
pub const COMPANION_OPENING: &str = "你好！请用一两句话介绍一下你自己，然后问问我最近的学习状态。";

const HISTORY_SEPARATOR: &str = " -> ";

const SCORE_FEEDBACK_TEMPERATURE: f32 = 1.1;
const REBUTTAL_TEMPERATURE: f32 = 1.3;
const COMPANION_TEMPERATURE: f32 = 0.9;

const SHORT_REPLY_MAX_TOKENS: u32 = 150;
const COMPANION_MAX_TOKENS: u32 = 220;

/// Build the outbound prompt for a classified request.
pub fn build_prompt(request: &CommentRequest) -> PromptPayload {
    match request {
        CommentRequest::Companion(chat) => companion_prompt(chat),
        CommentRequest::Rebuttal(rebuttal) => rebuttal_prompt(rebuttal),
        CommentRequest::ScoreFeedback(feedback) => score_feedback_prompt(feedback),
    }
}

fn score_feedback_prompt(feedback: &ScoreFeedback) -> PromptPayload {
    let history = feedback
        .history_scores
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(HISTORY_SEPARATOR);

    let content = format!(
        "考试：{}，本次：{}，历史：{}",
        feedback.exam_type, feedback.current_score, history
    );

    PromptPayload {
        system_prompt: SCORE_FEEDBACK_PERSONA.to_string(),
        messages: vec![ChatMessage::user(content)],
        temperature: SCORE_FEEDBACK_TEMPERATURE,
        max_tokens: SHORT_REPLY_MAX_TOKENS,
    }
}

fn rebuttal_prompt(rebuttal: &Rebuttal) -> PromptPayload {
    let content = format!(
        "考试：{}，本次：{}\n你之前的评价：{}\n学生的反驳：{}",
        rebuttal.exam_type,
        rebuttal.current_score,
        rebuttal.previous_comment.as_deref().unwrap_or(""),
        rebuttal.user_rebuttal
    );

    PromptPayload {
        system_prompt: REBUTTAL_PERSONA.to_string(),
        messages: vec![ChatMessage::user(content)],
        temperature: REBUTTAL_TEMPERATURE,
        max_tokens: SHORT_REPLY_MAX_TOKENS,
    }
}

fn companion_prompt(chat: &CompanionChat) -> PromptPayload {
    let mut messages = chat.history.clone();
    messages.push(ChatMessage::user(
        chat.user_message.as_deref().unwrap_or(COMPANION_OPENING),
    ));

    PromptPayload {
        system_prompt: COMPANION_PERSONA.to_string(),
        messages,
        temperature: COMPANION_TEMPERATURE,
        max_tokens: COMPANION_MAX_TOKENS,
    }
}
