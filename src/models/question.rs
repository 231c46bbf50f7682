use serde::{Deserialize, Serialize};

use crate::models::answer::AnswerValue;

/// 归一化后的单道题目
///
/// 原始数据里 id 可能是数字或字符串、题干字段名五花八门，
/// 适配层统一收敛成这里的形态；id 全卷唯一（由内容侧约定，引擎不校验）。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<OptionItem>,
    #[serde(default)]
    pub correct_answer: AnswerValue,
}

impl Question {
    pub fn new(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            options: Vec::new(),
            correct_answer: AnswerValue::empty_text(),
        }
    }
}

/// 选择题选项（key 为选项字母，text 为选项正文）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionItem {
    pub key: String,
    pub text: String,
}

impl OptionItem {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
        }
    }
}

/// 带 id 的文本条目（配对题左右两列、图示标注条目）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledItem {
    pub id: String,
    pub text: String,
}

impl LabeledItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}
