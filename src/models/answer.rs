use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 考生对单个作答位的作答值
///
/// 线上格式保持 `string | string[]` 两种形态：
/// - 单值题（判断、单选、配对、填空）存 `Text`
/// - 多选题存 `Many`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    /// 单值作答
    Text(String),
    /// 多值作答（多选）
    Many(Vec<String>),
}

impl Default for AnswerValue {
    fn default() -> Self {
        AnswerValue::Text(String::new())
    }
}

impl AnswerValue {
    /// 单值空作答（种子值）
    pub fn empty_text() -> Self {
        AnswerValue::Text(String::new())
    }

    /// 多值空作答（种子值）
    pub fn empty_many() -> Self {
        AnswerValue::Many(Vec::new())
    }

    /// 是否仍是未作答状态
    pub fn is_unanswered(&self) -> bool {
        match self {
            AnswerValue::Text(s) => s.trim().is_empty(),
            AnswerValue::Many(items) => items.is_empty(),
        }
    }

    /// 从任意 JSON 值宽松转换
    ///
    /// 历史数据中答案字段可能是字符串、数组、数字或布尔值；
    /// 无法识别的形态一律降级为空字符串，保证判分不会崩溃。
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => AnswerValue::Text(s.clone()),
            serde_json::Value::Array(items) => {
                AnswerValue::Many(items.iter().map(json_scalar_to_string).collect())
            }
            serde_json::Value::Number(n) => AnswerValue::Text(n.to_string()),
            serde_json::Value::Bool(b) => AnswerValue::Text(b.to_string()),
            _ => AnswerValue::Text(String::new()),
        }
    }
}

/// 数组元素转字符串（非标量元素降级为空字符串）
fn json_scalar_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(items: Vec<String>) -> Self {
        AnswerValue::Many(items)
    }
}

/// 作答位 id → 作答值 的全量映射
///
/// 整场考试加载时一次性播种，之后逐 id 原地更新，提交时整体读出。
pub type AnswerMap = BTreeMap<String, AnswerValue>;

/// 单个作答位的期望答案
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerExpectation {
    pub id: String,
    pub correct_answer: AnswerValue,
}

impl AnswerExpectation {
    pub fn new(id: impl Into<String>, correct_answer: impl Into<AnswerValue>) -> Self {
        Self {
            id: id.into(),
            correct_answer: correct_answer.into(),
        }
    }
}
