//! 答案核对 - 能力层
//!
//! 容错比对算法：大小写与空白差异一律忽略；多值答案（数组或
//! 逗号连接的字符串）按集合比较，与顺序无关。核对过程绝不
//! panic：无法比较的形态统一降级成空值，坏数据只会判错，
//! 不会让判分崩溃。

use serde::Serialize;

use crate::models::{AnswerExpectation, AnswerMap, AnswerValue};

/// 归一化比较文本：去首尾空白、转大写、内部连续空白压成单个空格
pub fn normalize_text(raw: &str) -> String {
    raw.trim()
        .to_uppercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 是否按多值处理：数组，或含逗号的字符串
///
/// 已知歧义：真含逗号的单值答案（如地址）会被误判成多值，
/// 这是沿用的线上算法行为，不在这里修正。
fn is_multi(value: &AnswerValue) -> bool {
    match value {
        AnswerValue::Many(_) => true,
        AnswerValue::Text(s) => s.contains(','),
    }
}

/// 剥掉元素外层的一对括号字符（只剥一层）
fn strip_bracket_layer(s: &str) -> &str {
    let s = s.trim();
    let s = s.strip_prefix(['(', '[']).unwrap_or(s);
    s.strip_suffix([')', ']']).unwrap_or(s)
}

/// 拆出归一化后的多值元素列表（已排序）
fn multi_elements(value: &AnswerValue) -> Vec<String> {
    let mut elements: Vec<String> = match value {
        AnswerValue::Many(items) => items
            .iter()
            .map(|item| normalize_text(strip_bracket_layer(item)))
            .collect(),
        AnswerValue::Text(s) => s
            .split(',')
            .map(|item| normalize_text(strip_bracket_layer(item)))
            .collect(),
    };
    elements.sort();
    elements
}

/// 单值形态的归一化文本
fn single_text(value: &AnswerValue) -> String {
    match value {
        AnswerValue::Text(s) => normalize_text(s),
        // 单值分支只会收到不含逗号的 Text；数组到不了这里
        AnswerValue::Many(items) => normalize_text(&items.join(",")),
    }
}

/// 核对单个作答
///
/// 任意一侧是多值形态就走多值比较，另一侧按需拆分或包装：
/// 单元素可以互相转换，多元素的作答永远匹配不上单值期望。
/// 两侧都是单值时直接比归一化文本。
pub fn check_answer(user: &AnswerValue, expected: &AnswerValue) -> bool {
    if is_multi(user) || is_multi(expected) {
        let user_elements = multi_elements(user);
        let expected_elements = multi_elements(expected);
        return user_elements.len() == expected_elements.len()
            && user_elements == expected_elements;
    }

    single_text(user) == single_text(expected)
}

/// 单个作答位的核对明细
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerDetail {
    pub id: String,
    pub correct: bool,
    /// 考生原始作答（未作答时为空值）
    pub user: AnswerValue,
    /// 期望答案原文
    pub expected: AnswerValue,
}

/// 整组/整卷核对结果
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct VerifyReport {
    pub total: usize,
    pub correct: usize,
    pub wrong: usize,
    pub detail: Vec<AnswerDetail>,
}

impl VerifyReport {
    /// 合并另一份核对结果（分组报告聚合成整卷报告）
    pub fn merge(&mut self, other: VerifyReport) {
        self.total += other.total;
        self.correct += other.correct;
        self.wrong += other.wrong;
        self.detail.extend(other.detail);
    }
}

/// 按期望答案列表核对作答映射
///
/// 未作答的 id 按空值核对：期望也为空才算对，否则判错。
/// 提交前没有任何「必须作答」的拦截，整卷未答完同样可以判分。
pub fn check_answers(expectations: &[AnswerExpectation], answers: &AnswerMap) -> VerifyReport {
    let mut report = VerifyReport::default();

    for expectation in expectations {
        let user = answers
            .get(&expectation.id)
            .cloned()
            .unwrap_or_else(AnswerValue::empty_text);
        let correct = check_answer(&user, &expectation.correct_answer);

        report.total += 1;
        if correct {
            report.correct += 1;
        } else {
            report.wrong += 1;
        }
        report.detail.push(AnswerDetail {
            id: expectation.id.clone(),
            correct,
            user,
            expected: expectation.correct_answer.clone(),
        });
    }

    report
}
