//! 填空题适配 - 能力层
//!
//! 所有补全类题型（笔记、句子、摘要、表单、流程图、简答）都归一
//! 到这里。双模式：段落文本里含 `[<id>]` 占位符时作答位取自
//! 占位符解析，否则每道独立题目一个作答位。

use serde_json::Value;

use crate::models::{AnswerExpectation, AnswerSlot, GapFillGroup};
use crate::services::placeholder;
use crate::services::raw::{
    expectations_or_questions, instructions, parse_expectations, parse_questions, pick_string,
};

/// 归一化填空题组
pub fn normalize_gap_fill(raw: &Value) -> GapFillGroup {
    GapFillGroup {
        instructions: instructions(raw),
        passage: pick_string(raw, &["passage", "text", "content", "body"]),
        questions: parse_questions(raw, false),
        answers: parse_expectations(raw),
    }
}

/// 段落模式判定：有段落文本且其中含占位符
pub fn inline_mode(group: &GapFillGroup) -> bool {
    group
        .passage
        .as_deref()
        .is_some_and(placeholder::has_placeholder)
}

/// 作答位：段落模式取占位符 id，逐题模式取题目 id；都是单值位
pub fn answer_slots(group: &GapFillGroup) -> Vec<AnswerSlot> {
    if inline_mode(group) {
        let passage = group.passage.as_deref().unwrap_or("");
        return placeholder::extract_placeholder_ids(passage)
            .into_iter()
            .map(AnswerSlot::single)
            .collect();
    }

    group
        .questions
        .iter()
        .map(|q| AnswerSlot::single(q.id.clone()))
        .collect()
}

pub fn expectations(group: &GapFillGroup) -> Vec<AnswerExpectation> {
    expectations_or_questions(&group.answers, &group.questions)
}
