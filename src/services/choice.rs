//! 选择题适配 - 能力层
//!
//! 单选与多选共用结构归一化；选项兼容「纯字符串 + 前导字母」与
//! 结构化对象两种历史形态，多选额外携带勾选数量上限。

use serde_json::Value;

use crate::models::{AnswerExpectation, AnswerSlot, ChoiceGroup};
use crate::services::raw::{
    expectations_or_questions, instructions, parse_expectations, parse_questions, pick_usize,
};

/// 归一化选择题组
pub fn normalize_choice(raw: &Value) -> ChoiceGroup {
    ChoiceGroup {
        instructions: instructions(raw),
        questions: parse_questions(raw, true),
        required_count: pick_usize(raw, &["required_count", "max_select", "select_count"]),
        answers: parse_expectations(raw),
    }
}

/// 作答位：每道题一个位；多选模式下为多值位
pub fn answer_slots(group: &ChoiceGroup, multi: bool) -> Vec<AnswerSlot> {
    group
        .questions
        .iter()
        .map(|q| {
            if multi {
                AnswerSlot::multi(q.id.clone())
            } else {
                AnswerSlot::single(q.id.clone())
            }
        })
        .collect()
}

pub fn expectations(group: &ChoiceGroup) -> Vec<AnswerExpectation> {
    expectations_or_questions(&group.answers, &group.questions)
}
