use serde::Serialize;
use std::fmt;

use crate::models::answer::AnswerExpectation;
use crate::models::question::{LabeledItem, Question};

/// 规范题组类型标签
///
/// 八种固定形态；历史数据里无法识别的类型标签原样大写透传，
/// 渲染层对其输出惰性占位，不会中断整卷渲染。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupType {
    Tfng,
    Ynng,
    McSingle,
    McMulti,
    Matching,
    GapFill,
    TableCompletion,
    DiagramLabel,
    Unsupported(String),
}

impl GroupType {
    /// 线上稳定的类型字符串
    pub fn as_str(&self) -> &str {
        match self {
            GroupType::Tfng => "TFNG",
            GroupType::Ynng => "YNNG",
            GroupType::McSingle => "MULTIPLE_CHOICE_SINGLE",
            GroupType::McMulti => "MULTIPLE_CHOICE_MULTI",
            GroupType::Matching => "MATCHING",
            GroupType::GapFill => "GAP_FILL",
            GroupType::TableCompletion => "TABLE_COMPLETION",
            GroupType::DiagramLabel => "DIAGRAM_LABEL",
            GroupType::Unsupported(raw) => raw,
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 判断题三选项集合（TRUE/FALSE/NOT GIVEN）
pub const TRUE_FALSE_NOT_GIVEN: [&str; 3] = ["TRUE", "FALSE", "NOT GIVEN"];
/// 判断题三选项集合（YES/NO/NOT GIVEN）
pub const YES_NO_NOT_GIVEN: [&str; 3] = ["YES", "NO", "NOT GIVEN"];

/// 判断题组（TFNG 与 YNNG 共用结构，选项集合由枚举变体决定）
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TruthGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerExpectation>,
}

/// 选择题组（单选与多选共用结构）
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct ChoiceGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub questions: Vec<Question>,
    /// 多选模式下限定的勾选数量上限
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_count: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerExpectation>,
}

/// 配对题组
///
/// `matrix` 为真时按「行×列勾选矩阵」渲染（matching information 风格），
/// 否则每行一个下拉选择。`use_once` 为真时每个右侧选项只能被选走一次。
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct MatchingGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub left_items: Vec<LabeledItem>,
    pub right_options: Vec<LabeledItem>,
    pub use_once: bool,
    pub matrix: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerExpectation>,
}

/// 填空题组
///
/// 双模式：`passage` 中含 `[<id>]` 占位符时按嵌入式输入渲染，
/// 否则按 `questions` 逐题渲染独立输入框。
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct GapFillGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub questions: Vec<Question>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerExpectation>,
}

/// 表格填空题组（rows × columns 网格，单元格内可混排文本与占位符）
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct TableGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerExpectation>,
}

/// 图示标注题组
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DiagramGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub items: Vec<LabeledItem>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<AnswerExpectation>,
}

/// 未识别类型的惰性载体
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct UnsupportedGroup {
    pub raw_type: String,
}

/// 归一化后的题组
///
/// 封闭和类型：渲染分发与判分对其做穷尽匹配，
/// 新增规范类型时所有消费方都会被编译器强制更新。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "group_type")]
pub enum QuestionGroup {
    #[serde(rename = "TFNG")]
    Tfng(TruthGroup),
    #[serde(rename = "YNNG")]
    Ynng(TruthGroup),
    #[serde(rename = "MULTIPLE_CHOICE_SINGLE")]
    ChoiceSingle(ChoiceGroup),
    #[serde(rename = "MULTIPLE_CHOICE_MULTI")]
    ChoiceMulti(ChoiceGroup),
    #[serde(rename = "MATCHING")]
    Matching(MatchingGroup),
    #[serde(rename = "GAP_FILL")]
    GapFill(GapFillGroup),
    #[serde(rename = "TABLE_COMPLETION")]
    TableCompletion(TableGroup),
    #[serde(rename = "DIAGRAM_LABEL")]
    DiagramLabel(DiagramGroup),
    #[serde(rename = "UNSUPPORTED")]
    Unsupported(UnsupportedGroup),
}

impl QuestionGroup {
    /// 当前题组的规范类型标签
    pub fn group_type(&self) -> GroupType {
        match self {
            QuestionGroup::Tfng(_) => GroupType::Tfng,
            QuestionGroup::Ynng(_) => GroupType::Ynng,
            QuestionGroup::ChoiceSingle(_) => GroupType::McSingle,
            QuestionGroup::ChoiceMulti(_) => GroupType::McMulti,
            QuestionGroup::Matching(_) => GroupType::Matching,
            QuestionGroup::GapFill(_) => GroupType::GapFill,
            QuestionGroup::TableCompletion(_) => GroupType::TableCompletion,
            QuestionGroup::DiagramLabel(_) => GroupType::DiagramLabel,
            QuestionGroup::Unsupported(g) => GroupType::Unsupported(g.raw_type.clone()),
        }
    }
}

/// 题组枚举出的单个作答位
///
/// `multi` 决定播种值：多选位播 `[]`，其余播 `""`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerSlot {
    pub id: String,
    pub multi: bool,
}

impl AnswerSlot {
    pub fn single(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            multi: false,
        }
    }

    pub fn multi(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            multi: true,
        }
    }
}
