//! 原始题组字段解析 - 能力层
//!
//! 历史数据由多代编辑工具产出，同一个概念的字段名、类型都不统一
//! （id 可能是数字或字符串、选项可能是字符串或对象）。这里集中放
//! 各适配器共用的宽松提取函数：按候选字段名依次尝试，取不到就
//! 降级，绝不中断整组归一化。

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::models::{AnswerExpectation, AnswerValue, LabeledItem, OptionItem, Question};

/// 按候选字段名依次取字符串
pub(crate) fn pick_str<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a str> {
    for key in keys {
        if let Some(s) = raw.get(key).and_then(|v| v.as_str()) {
            if !s.is_empty() {
                return Some(s);
            }
        }
    }
    None
}

/// 按候选字段名依次取字符串（owned）
pub(crate) fn pick_string(raw: &Value, keys: &[&str]) -> Option<String> {
    pick_str(raw, keys).map(|s| s.to_string())
}

/// 按候选字段名依次取 id（数字或字符串都接受）
pub(crate) fn pick_id(raw: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        match raw.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(Value::Number(n)) => return Some(n.to_string()),
            _ => {}
        }
    }
    None
}

/// 按候选字段名依次取布尔（true / "true" / 1 都算真）
pub(crate) fn pick_bool(raw: &Value, keys: &[&str]) -> bool {
    for key in keys {
        match raw.get(key) {
            Some(Value::Bool(b)) => return *b,
            Some(Value::String(s)) => return s.eq_ignore_ascii_case("true"),
            Some(Value::Number(n)) => return n.as_i64() == Some(1),
            _ => {}
        }
    }
    false
}

/// 按候选字段名依次取非负整数
pub(crate) fn pick_usize(raw: &Value, keys: &[&str]) -> Option<usize> {
    for key in keys {
        match raw.get(key) {
            Some(Value::Number(n)) => return n.as_u64().map(|v| v as usize),
            Some(Value::String(s)) => {
                if let Ok(v) = s.parse::<usize>() {
                    return Some(v);
                }
            }
            _ => {}
        }
    }
    None
}

/// 按候选字段名依次取数组
pub(crate) fn pick_array<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    for key in keys {
        if let Some(arr) = raw.get(key).and_then(|v| v.as_array()) {
            return Some(arr);
        }
    }
    None
}

/// 标量转显示字符串（其余形态降级为空字符串）
pub(crate) fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// 题组说明文字
pub(crate) fn instructions(raw: &Value) -> Option<String> {
    pick_string(raw, &["instructions", "instruction", "description", "tip"])
}

/// 「前导标号 + 分隔符」模式，如 `A. text` / `ii) heading` / `3、正文`
fn label_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*([A-Za-z0-9]{1,5})\s*[\.\)．、:：]\s*(.*\S)\s*$")
            .expect("内置选项标号正则必定合法")
    })
}

/// 第 index 个位置的兜底字母标号（A、B、C…）
fn positional_key(index: usize) -> String {
    char::from(b'A' + (index % 26) as u8).to_string()
}

/// 解析一个选择题选项
///
/// 兼容三种历史形态：
/// - 纯字符串 `"A. text"`（前导标号模式），不匹配则按位置字母兜底
/// - 对象 `{key/id, label, text}`
/// - 其余形态降级为位置字母 + 标量文本
pub(crate) fn parse_option_item(value: &Value, index: usize) -> OptionItem {
    match value {
        Value::String(s) => match label_regex().captures(s) {
            Some(cap) => OptionItem::new(&cap[1], &cap[2]),
            None => OptionItem::new(positional_key(index), s.trim()),
        },
        Value::Object(_) => {
            let key = pick_id(value, &["key", "id", "label"])
                .unwrap_or_else(|| positional_key(index));
            let text = pick_string(value, &["text", "label", "value", "content"])
                .unwrap_or_default();
            OptionItem::new(key, text)
        }
        other => OptionItem::new(positional_key(index), scalar_string(other)),
    }
}

/// 解析一个带 id 的文本条目（配对左右列、图示条目）
///
/// 字符串走与选择题相同的前导标号模式；取不到 id 时用调用方
/// 给定的兜底 id（配对选项用位置字母、图示条目用位置序号）。
pub(crate) fn parse_labeled_item(value: &Value, fallback_id: String) -> LabeledItem {
    match value {
        Value::String(s) => match label_regex().captures(s) {
            Some(cap) => LabeledItem::new(&cap[1], &cap[2]),
            None => LabeledItem::new(fallback_id, s.trim()),
        },
        Value::Object(_) => {
            let id = pick_id(value, &["id", "key", "label"]).unwrap_or(fallback_id);
            let text = pick_string(value, &["text", "title", "content", "heading"])
                .unwrap_or_default();
            LabeledItem::new(id, text)
        }
        other => LabeledItem::new(fallback_id, scalar_string(other)),
    }
}

/// 解析题组内的题目列表
///
/// # 参数
/// - `raw`: 原始题组对象
/// - `with_options`: 是否解析每题自带的选项列表（选择题）
pub(crate) fn parse_questions(raw: &Value, with_options: bool) -> Vec<Question> {
    let Some(items) = pick_array(raw, &["questions"]) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_question(item, index, with_options))
        .collect()
}

fn parse_question(value: &Value, index: usize, with_options: bool) -> Question {
    // 题目本身退化成一个字符串时，只有题干可用
    if let Value::String(s) = value {
        return Question::new((index + 1).to_string(), s.trim());
    }

    let id = pick_id(value, &["id", "question_id", "qid", "number"])
        .unwrap_or_else(|| (index + 1).to_string());
    let prompt = pick_string(value, &["prompt", "question", "text", "stem", "title"])
        .unwrap_or_default();

    let options = if with_options {
        pick_array(value, &["options", "choices"])
            .map(|items| {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| parse_option_item(item, i))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        Vec::new()
    };

    let correct_answer = value
        .get("correct_answer")
        .or_else(|| value.get("answer"))
        .or_else(|| value.get("key"))
        .map(AnswerValue::from_json)
        .unwrap_or_default();

    Question {
        id,
        prompt,
        options,
        correct_answer,
    }
}

/// 解析题组显式的期望答案列表
///
/// 兼容数组 `[{id, correct_answer}]` 与对象 `{"14": "答案"}` 两种形态；
/// 缺 id 的条目直接跳过。
pub(crate) fn parse_expectations(raw: &Value) -> Vec<AnswerExpectation> {
    match raw.get("answers") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| {
                let id = pick_id(item, &["id", "question_id", "qid"])?;
                let correct_answer = item
                    .get("correct_answer")
                    .or_else(|| item.get("answer"))
                    .or_else(|| item.get("value"))
                    .map(AnswerValue::from_json)
                    .unwrap_or_default();
                Some(AnswerExpectation { id, correct_answer })
            })
            .collect(),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(id, value)| AnswerExpectation {
                id: id.clone(),
                correct_answer: AnswerValue::from_json(value),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// 期望答案：显式列表优先，否则从题目的 correct_answer 推导
pub(crate) fn expectations_or_questions(
    answers: &[AnswerExpectation],
    questions: &[Question],
) -> Vec<AnswerExpectation> {
    if !answers.is_empty() {
        return answers.to_vec();
    }
    questions
        .iter()
        .map(|q| AnswerExpectation {
            id: q.id.clone(),
            correct_answer: q.correct_answer.clone(),
        })
        .collect()
}
