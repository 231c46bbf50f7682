//! 渲染分发 - 流程层
//!
//! 把归一化题组和当前作答状态绑定成声明式的输入面描述；
//! 真正的视图层只按 `kind` 渲染对应控件、按 id 回写作答状态，
//! 不包含任何归一化或判分逻辑。
//!
//! 对题组和类型做穷尽匹配：新增规范类型时这里不更新就无法编译。
//! 畸形题组（空表格、空配对列、空图示）渲染成显式空态，未识别
//! 类型渲染成惰性占位，都不会中断整卷渲染。

use serde::Serialize;

use crate::models::{
    AnswerMap, AnswerValue, DiagramGroup, Exam, GapFillGroup, LabeledItem, MatchingGroup,
    OptionItem, QuestionGroup, Section, TableGroup, TruthGroup, ChoiceGroup,
    TRUE_FALSE_NOT_GIVEN, YES_NO_NOT_GIVEN,
};
use crate::services::{gap_fill, matching, placeholder};

/// 文本与输入混排的片段（填空段落、表格单元格、图示条目）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Segment {
    Text { value: String },
    Input { id: String, value: String },
}

/// 判断题一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TruthRow {
    pub id: String,
    pub prompt: String,
    pub selected: String,
}

/// 单选题一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleChoiceRow {
    pub id: String,
    pub prompt: String,
    pub options: Vec<OptionItem>,
    pub selected: String,
}

/// 多选题一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiChoiceRow {
    pub id: String,
    pub prompt: String,
    pub options: Vec<OptionItem>,
    pub selected: Vec<String>,
    /// 已勾满数量上限：视图层应禁用其余未选项
    pub limit_reached: bool,
}

/// 配对题下拉一行（options 已按 use_once 规则过滤）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectRow {
    pub id: String,
    pub text: String,
    pub options: Vec<LabeledItem>,
    pub selected: String,
}

/// 配对矩阵一行（行内单选，勾选交互）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixRow {
    pub id: String,
    pub text: String,
    pub selected: String,
}

/// 逐题独立输入一行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputRow {
    pub id: String,
    pub prompt: String,
    pub value: String,
}

/// 单个题组的输入面描述
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Surface {
    /// 判断题（三选项按钮组）
    Truth {
        instructions: Option<String>,
        options: Vec<String>,
        rows: Vec<TruthRow>,
    },
    /// 单选题
    ChoiceSingle {
        instructions: Option<String>,
        rows: Vec<SingleChoiceRow>,
    },
    /// 多选题
    ChoiceMulti {
        instructions: Option<String>,
        required_count: Option<usize>,
        rows: Vec<MultiChoiceRow>,
    },
    /// 配对题（每行一个下拉）
    MatchingSelect {
        instructions: Option<String>,
        rows: Vec<SelectRow>,
    },
    /// 配对题（行×列勾选矩阵）
    MatchingMatrix {
        instructions: Option<String>,
        columns: Vec<LabeledItem>,
        rows: Vec<MatrixRow>,
    },
    /// 填空题（段落嵌入输入）
    GapFillInline {
        instructions: Option<String>,
        segments: Vec<Segment>,
    },
    /// 填空题（逐题独立输入）
    GapFillList {
        instructions: Option<String>,
        rows: Vec<InputRow>,
    },
    /// 表格填空（每个单元格一串片段）
    TableGrid {
        instructions: Option<String>,
        title: Option<String>,
        cells: Vec<Vec<Vec<Segment>>>,
    },
    /// 图示标注（每个条目一串片段）
    DiagramLabels {
        instructions: Option<String>,
        image_url: Option<String>,
        rows: Vec<Vec<Segment>>,
    },
    /// 未识别类型的惰性占位
    Unsupported { raw_type: String },
    /// 畸形题组的显式空态
    Empty { reason: String },
}

/// 一个分节的渲染结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSurface {
    pub section_number: u32,
    pub passage: Option<String>,
    pub audio_url: Option<String>,
    pub groups: Vec<Surface>,
}

/// 渲染整卷
pub fn render_exam(exam: &Exam, answers: &AnswerMap) -> Vec<SectionSurface> {
    exam.sections
        .iter()
        .map(|section| render_section(section, answers))
        .collect()
}

/// 渲染一个分节
pub fn render_section(section: &Section, answers: &AnswerMap) -> SectionSurface {
    SectionSurface {
        section_number: section.section_number,
        passage: section.passage.clone(),
        audio_url: section.audio_url.clone(),
        groups: section
            .question_groups
            .iter()
            .map(|group| render_group(group, answers))
            .collect(),
    }
}

/// 渲染单个题组
pub fn render_group(group: &QuestionGroup, answers: &AnswerMap) -> Surface {
    match group {
        QuestionGroup::Tfng(g) => render_truth(g, &TRUE_FALSE_NOT_GIVEN, answers),
        QuestionGroup::Ynng(g) => render_truth(g, &YES_NO_NOT_GIVEN, answers),
        QuestionGroup::ChoiceSingle(g) => render_choice_single(g, answers),
        QuestionGroup::ChoiceMulti(g) => render_choice_multi(g, answers),
        QuestionGroup::Matching(g) => render_matching(g, answers),
        QuestionGroup::GapFill(g) => render_gap_fill(g, answers),
        QuestionGroup::TableCompletion(g) => render_table(g, answers),
        QuestionGroup::DiagramLabel(g) => render_diagram(g, answers),
        QuestionGroup::Unsupported(g) => Surface::Unsupported {
            raw_type: g.raw_type.clone(),
        },
    }
}

/// 取单值作答的展示文本（多值历史数据降级为逗号连接）
fn text_value(answers: &AnswerMap, id: &str) -> String {
    match answers.get(id) {
        Some(AnswerValue::Text(s)) => s.clone(),
        Some(AnswerValue::Many(items)) => items.join(", "),
        None => String::new(),
    }
}

/// 取多值作答的选中列表
fn many_value(answers: &AnswerMap, id: &str) -> Vec<String> {
    match answers.get(id) {
        Some(AnswerValue::Many(items)) => items.clone(),
        Some(AnswerValue::Text(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn render_truth(group: &TruthGroup, options: &[&str; 3], answers: &AnswerMap) -> Surface {
    Surface::Truth {
        instructions: group.instructions.clone(),
        options: options.iter().map(|s| s.to_string()).collect(),
        rows: group
            .questions
            .iter()
            .map(|q| TruthRow {
                id: q.id.clone(),
                prompt: q.prompt.clone(),
                selected: text_value(answers, &q.id),
            })
            .collect(),
    }
}

fn render_choice_single(group: &ChoiceGroup, answers: &AnswerMap) -> Surface {
    Surface::ChoiceSingle {
        instructions: group.instructions.clone(),
        rows: group
            .questions
            .iter()
            .map(|q| SingleChoiceRow {
                id: q.id.clone(),
                prompt: q.prompt.clone(),
                options: q.options.clone(),
                selected: text_value(answers, &q.id),
            })
            .collect(),
    }
}

fn render_choice_multi(group: &ChoiceGroup, answers: &AnswerMap) -> Surface {
    Surface::ChoiceMulti {
        instructions: group.instructions.clone(),
        required_count: group.required_count,
        rows: group
            .questions
            .iter()
            .map(|q| {
                let selected = many_value(answers, &q.id);
                let limit_reached = group
                    .required_count
                    .is_some_and(|count| selected.len() >= count);
                MultiChoiceRow {
                    id: q.id.clone(),
                    prompt: q.prompt.clone(),
                    options: q.options.clone(),
                    selected,
                    limit_reached,
                }
            })
            .collect(),
    }
}

fn render_matching(group: &MatchingGroup, answers: &AnswerMap) -> Surface {
    if group.left_items.is_empty() || group.right_options.is_empty() {
        return Surface::Empty {
            reason: "配对题缺少左列条目或右列选项".to_string(),
        };
    }

    if group.matrix {
        return Surface::MatchingMatrix {
            instructions: group.instructions.clone(),
            columns: group.right_options.clone(),
            rows: group
                .left_items
                .iter()
                .map(|item| MatrixRow {
                    id: item.id.clone(),
                    text: item.text.clone(),
                    selected: text_value(answers, &item.id),
                })
                .collect(),
        };
    }

    Surface::MatchingSelect {
        instructions: group.instructions.clone(),
        rows: group
            .left_items
            .iter()
            .map(|item| SelectRow {
                id: item.id.clone(),
                text: item.text.clone(),
                // use_once 过滤基于当前作答全集，每次渲染现算
                options: matching::selectable_options(group, &item.id, answers),
                selected: text_value(answers, &item.id),
            })
            .collect(),
    }
}

/// 文本绑定作答值后的片段列表
fn bind_segments(text: &str, answers: &AnswerMap) -> Vec<Segment> {
    placeholder::split_by_placeholders(text)
        .into_iter()
        .map(|token| match token {
            placeholder::Token::Text { value } => Segment::Text { value },
            placeholder::Token::Placeholder { id, .. } => {
                let value = text_value(answers, &id);
                Segment::Input { id, value }
            }
        })
        .collect()
}

fn render_gap_fill(group: &GapFillGroup, answers: &AnswerMap) -> Surface {
    if gap_fill::inline_mode(group) {
        let passage = group.passage.as_deref().unwrap_or("");
        return Surface::GapFillInline {
            instructions: group.instructions.clone(),
            segments: bind_segments(passage, answers),
        };
    }

    Surface::GapFillList {
        instructions: group.instructions.clone(),
        rows: group
            .questions
            .iter()
            .map(|q| InputRow {
                id: q.id.clone(),
                prompt: q.prompt.clone(),
                value: text_value(answers, &q.id),
            })
            .collect(),
    }
}

fn render_table(group: &TableGroup, answers: &AnswerMap) -> Surface {
    if group.rows == 0 || group.columns == 0 {
        return Surface::Empty {
            reason: "表格填空缺少行列数据".to_string(),
        };
    }

    Surface::TableGrid {
        instructions: group.instructions.clone(),
        title: group.title.clone(),
        cells: group
            .cells
            .iter()
            .map(|row| row.iter().map(|cell| bind_segments(cell, answers)).collect())
            .collect(),
    }
}

fn render_diagram(group: &DiagramGroup, answers: &AnswerMap) -> Surface {
    if group.items.is_empty() {
        return Surface::Empty {
            reason: "图示标注没有任何条目".to_string(),
        };
    }

    Surface::DiagramLabels {
        instructions: group.instructions.clone(),
        image_url: group.image_url.clone(),
        rows: group
            .items
            .iter()
            .map(|item| {
                if placeholder::has_placeholder(&item.text) {
                    bind_segments(&item.text, answers)
                } else {
                    // 条目文本无占位符：条目 id 本身就是作答位
                    vec![
                        Segment::Text {
                            value: format!("{} ", item.text),
                        },
                        Segment::Input {
                            id: item.id.clone(),
                            value: text_value(answers, &item.id),
                        },
                    ]
                }
            })
            .collect(),
    }
}
