//! 配对题适配 - 能力层
//!
//! 左列条目来自显式列表，缺失时退回题组的题目列表；右列选项来自
//! 显式列表或旧版 `headings`/`options` 字段，用与选择题相同的
//! 前导标号模式解析成 `{id, text}`。
//!
//! matching information 风格的题组按「行×列勾选矩阵」标记
//! （`matrix` 为真），行内仍是单选语义，只是换成勾选交互。

use serde_json::Value;

use crate::models::{AnswerExpectation, AnswerSlot, AnswerValue, LabeledItem, MatchingGroup};
use crate::services::raw::{
    instructions, parse_expectations, parse_labeled_item, parse_questions, pick_array, pick_bool,
    pick_str,
};

/// 归一化配对题组
pub fn normalize_matching(raw: &Value) -> MatchingGroup {
    let mut answers = parse_expectations(raw);

    let left_items = match pick_array(raw, &["left_items", "items"]) {
        Some(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| parse_labeled_item(item, (i + 1).to_string()))
            .collect(),
        // 旧版数据把左列放在题目列表里，题目自带的答案一并收走
        None => {
            let questions = parse_questions(raw, false);
            if answers.is_empty() {
                answers = questions
                    .iter()
                    .filter(|q| !q.correct_answer.is_unanswered())
                    .map(|q| AnswerExpectation {
                        id: q.id.clone(),
                        correct_answer: q.correct_answer.clone(),
                    })
                    .collect();
            }
            questions
                .into_iter()
                .map(|q| LabeledItem::new(q.id, q.prompt))
                .collect()
        }
    };

    let right_options = pick_array(raw, &["right_options", "options", "headings"])
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(i, item)| parse_labeled_item(item, positional_letter(i)))
                .collect()
        })
        .unwrap_or_default();

    MatchingGroup {
        instructions: instructions(raw),
        left_items,
        right_options,
        use_once: pick_bool(raw, &["use_once", "unique", "once"]),
        matrix: is_matrix(raw),
        answers,
    }
}

/// 选项缺 id 时的位置字母兜底
fn positional_letter(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

/// 是否按勾选矩阵渲染
///
/// 归一化后的 `matrix` 字段优先；原始数据靠类型标签里的
/// info 字样识别（matching_info / matching_information）。
fn is_matrix(raw: &Value) -> bool {
    if pick_bool(raw, &["matrix", "is_matrix"]) {
        return true;
    }
    pick_str(raw, &["group_type", "type"])
        .unwrap_or("")
        .to_lowercase()
        .contains("info")
}

/// 作答位：每个左列条目一个单值位（矩阵模式同样是行内单选）
pub fn answer_slots(group: &MatchingGroup) -> Vec<AnswerSlot> {
    group
        .left_items
        .iter()
        .map(|item| AnswerSlot::single(item.id.clone()))
        .collect()
}

pub fn expectations(group: &MatchingGroup) -> Vec<AnswerExpectation> {
    group.answers.to_vec()
}

/// 某一行当前可选的右列选项
///
/// `use_once` 为真时剔除其他行已选走的选项；每次渲染基于当前
/// 作答全集现算，不做缓存，取消选择后选项立即回到候选集。
pub fn selectable_options(
    group: &MatchingGroup,
    row_id: &str,
    answers: &crate::models::AnswerMap,
) -> Vec<LabeledItem> {
    if !group.use_once {
        return group.right_options.clone();
    }

    let taken: Vec<&str> = group
        .left_items
        .iter()
        .filter(|item| item.id != row_id)
        .filter_map(|item| answers.get(&item.id))
        .filter_map(|value| match value {
            AnswerValue::Text(s) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        })
        .collect();

    group
        .right_options
        .iter()
        .filter(|option| !taken.contains(&option.id.as_str()))
        .cloned()
        .collect()
}
