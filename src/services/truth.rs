//! 判断题适配 - 能力层
//!
//! TFNG（TRUE/FALSE/NOT GIVEN）与 YNNG（YES/NO/NOT GIVEN）共用
//! 同一套结构归一化，三选项集合固定，由题组枚举变体决定。

use serde_json::Value;

use crate::models::{AnswerExpectation, AnswerSlot, TruthGroup};
use crate::services::raw::{expectations_or_questions, instructions, parse_expectations, parse_questions};

/// 归一化判断题组
pub fn normalize_truth(raw: &Value) -> TruthGroup {
    TruthGroup {
        instructions: instructions(raw),
        questions: parse_questions(raw, false),
        answers: parse_expectations(raw),
    }
}

/// 作答位：每道题一个单值位
pub fn answer_slots(group: &TruthGroup) -> Vec<AnswerSlot> {
    group
        .questions
        .iter()
        .map(|q| AnswerSlot::single(q.id.clone()))
        .collect()
}

pub fn expectations(group: &TruthGroup) -> Vec<AnswerExpectation> {
    expectations_or_questions(&group.answers, &group.questions)
}
