//! 占位符解析 - 能力层
//!
//! 从自由文本中解析 `[<数字>]` 形式的作答占位符。
//! 填空、表格填空、图示标注三类题组都依赖这里来确定
//! 「文本里到底有哪些可作答位置」。
//!
//! 语法不合法（括号不配对、内容非数字）的片段一律按普通文本
//! 处理，不会报错。

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// 文本拆分出的片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// 普通文本片段
    Text { value: String },
    /// 占位符片段（id 为去掉括号后的数字串，raw 为原始标记）
    Placeholder { id: String, raw: String },
}

impl Token {
    /// 片段对应的原文（文本取 value，占位符取 raw）
    ///
    /// 按顺序拼接所有片段的原文可以完整还原输入文本。
    pub fn literal(&self) -> &str {
        match self {
            Token::Text { value } => value,
            Token::Placeholder { raw, .. } => raw,
        }
    }
}

/// 占位符标记正则：`[一个或多个数字]`
fn marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[(\d+)\]").expect("内置占位符正则必定合法"))
}

/// 提取文本中的全部占位符 id
///
/// # 返回
/// 去重后的 id 列表，保持首次出现顺序；无占位符时返回空列表
pub fn extract_placeholder_ids(text: &str) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for m in marker_regex().find_iter(text) {
        let raw = m.as_str();
        let id = raw[1..raw.len() - 1].to_string();
        if !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids
}

/// 按占位符拆分文本
///
/// 返回文本片段与占位符片段交替的有序列表；占位符前后的文本
/// 片段始终保留（允许为空字符串），保证拼接可还原原文。
/// 不含占位符的文本返回单个完整文本片段。
pub fn split_by_placeholders(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in marker_regex().find_iter(text) {
        tokens.push(Token::Text {
            value: text[last..m.start()].to_string(),
        });
        let raw = m.as_str().to_string();
        let id = raw[1..raw.len() - 1].to_string();
        tokens.push(Token::Placeholder { id, raw });
        last = m.end();
    }

    tokens.push(Token::Text {
        value: text[last..].to_string(),
    });
    tokens
}

/// 文本中是否含有占位符
///
/// 同一个填空题组据此在「段落嵌入输入」与「逐题独立输入」
/// 两种渲染模式间二选一。
pub fn has_placeholder(text: &str) -> bool {
    marker_regex().is_match(text)
}
