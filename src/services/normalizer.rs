//! 题型归一化 - 能力层
//!
//! 历史数据里的类型标签多达几十种写法，这里把它们收敛到八种
//! 规范题组类型，并把原始题组分发给对应的结构适配器。
//!
//! 收敛规则：
//! 1. 静态别名表直查（大小写不敏感）
//! 2. `mult_choice` 一个标签有歧义，按布局提示与题目数量二次判定
//! 3. 认不出的标签大写后原样透传，由渲染层按不支持处理，不致命

use phf::phf_map;
use serde_json::Value;
use tracing::warn;

use crate::models::{AnswerExpectation, AnswerSlot, GroupType, QuestionGroup, UnsupportedGroup};
use crate::services::raw::{pick_array, pick_bool, pick_str, pick_string};
use crate::services::{choice, diagram, gap_fill, matching, table, truth};

/// 历史类型标签 → 规范类型 静态别名表（键全部小写）
///
/// 各类补全题（笔记、句子、摘要、表单、流程图……）统一收敛到
/// GAP_FILL，只有表格和图示标注保留自己的形态。
static TYPE_ALIASES: phf::Map<&'static str, GroupType> = phf_map! {
    // 判断题
    "tfng" => GroupType::Tfng,
    "true_false_notgiven" => GroupType::Tfng,
    "true_false_not_given" => GroupType::Tfng,
    "true_false" => GroupType::Tfng,
    "ynng" => GroupType::Ynng,
    "yes_no_notgiven" => GroupType::Ynng,
    "yes_no_not_given" => GroupType::Ynng,
    // 选择题
    "multiple_choice_single" => GroupType::McSingle,
    "multiple_choice" => GroupType::McSingle,
    "single_choice" => GroupType::McSingle,
    "multiple_choice_multi" => GroupType::McMulti,
    "multi_select" => GroupType::McMulti,
    "checkbox" => GroupType::McMulti,
    // 配对题
    "matching" => GroupType::Matching,
    "matching_headings" => GroupType::Matching,
    "matching_info" => GroupType::Matching,
    "matching_information" => GroupType::Matching,
    "matching_features" => GroupType::Matching,
    "matching_sentence_endings" => GroupType::Matching,
    "matching_paragraphs" => GroupType::Matching,
    // 各类补全 → 填空
    "gap_fill" => GroupType::GapFill,
    "note_completion" => GroupType::GapFill,
    "sentence_completion" => GroupType::GapFill,
    "summary_completion" => GroupType::GapFill,
    "form_completion" => GroupType::GapFill,
    "short_answer" => GroupType::GapFill,
    "flow_chart_completion" => GroupType::GapFill,
    "flowchart_completion" => GroupType::GapFill,
    // 表格填空
    "table_completion" => GroupType::TableCompletion,
    "table" => GroupType::TableCompletion,
    // 图示标注
    "diagram_label" => GroupType::DiagramLabel,
    "diagram_labelling" => GroupType::DiagramLabel,
    "diagram_labeling" => GroupType::DiagramLabel,
    "plan_map_diagram" => GroupType::DiagramLabel,
    "listening_map" => GroupType::DiagramLabel,
    "map_labelling" => GroupType::DiagramLabel,
};

/// 判定原始题组的规范类型
pub fn normalize_type(raw: &Value) -> GroupType {
    let label = pick_str(raw, &["group_type", "type"]).unwrap_or("").trim();
    let key = label.to_lowercase();

    // mult_choice 标签单独判定单选/多选
    if key == "mult_choice" {
        return resolve_mult_choice(raw);
    }

    if let Some(canonical) = TYPE_ALIASES.get(key.as_str()) {
        return canonical.clone();
    }

    let raw_type = if label.is_empty() {
        "UNKNOWN".to_string()
    } else {
        label.to_uppercase()
    };
    warn!("⚠️ 未识别的题组类型标签: {}", raw_type);
    GroupType::Unsupported(raw_type)
}

/// `mult_choice` 歧义标签的二次判定
///
/// 声明了多选/勾选布局提示，或题目条数大于 1 时按多选处理，
/// 否则按单选处理。
fn resolve_mult_choice(raw: &Value) -> GroupType {
    let layout = pick_str(raw, &["layout", "render", "style"])
        .unwrap_or("")
        .to_lowercase();
    let multi_hint = layout.contains("checkbox")
        || layout.contains("multi")
        || pick_bool(raw, &["multi", "is_multi"]);

    let question_count = pick_array(raw, &["questions"]).map(|a| a.len()).unwrap_or(0);

    if multi_hint || question_count > 1 {
        GroupType::McMulti
    } else {
        GroupType::McSingle
    }
}

/// 归一化单个原始题组
///
/// 判定类型后交给对应适配器做结构归一化；适配器都是纯函数且幂等。
pub fn normalize_group(raw: &Value) -> QuestionGroup {
    match normalize_type(raw) {
        GroupType::Tfng => QuestionGroup::Tfng(truth::normalize_truth(raw)),
        GroupType::Ynng => QuestionGroup::Ynng(truth::normalize_truth(raw)),
        GroupType::McSingle => QuestionGroup::ChoiceSingle(choice::normalize_choice(raw)),
        GroupType::McMulti => QuestionGroup::ChoiceMulti(choice::normalize_choice(raw)),
        GroupType::Matching => QuestionGroup::Matching(matching::normalize_matching(raw)),
        GroupType::GapFill => QuestionGroup::GapFill(gap_fill::normalize_gap_fill(raw)),
        GroupType::TableCompletion => {
            QuestionGroup::TableCompletion(table::normalize_table(raw))
        }
        GroupType::DiagramLabel => QuestionGroup::DiagramLabel(diagram::normalize_diagram(raw)),
        GroupType::Unsupported(raw_type) => QuestionGroup::Unsupported(UnsupportedGroup {
            // 已归一化的不支持题组再次进来时保留最初的原始标签
            raw_type: pick_string(raw, &["raw_type"]).unwrap_or(raw_type),
        }),
    }
}

/// 枚举题组的全部作答位
///
/// 播种作答状态前对每个题组调用一次；任何可作答位置都必须
/// 出现在返回列表里，否则首次渲染时会读到不存在的 id。
pub fn answer_slots(group: &QuestionGroup) -> Vec<AnswerSlot> {
    match group {
        QuestionGroup::Tfng(g) | QuestionGroup::Ynng(g) => truth::answer_slots(g),
        QuestionGroup::ChoiceSingle(g) => choice::answer_slots(g, false),
        QuestionGroup::ChoiceMulti(g) => choice::answer_slots(g, true),
        QuestionGroup::Matching(g) => matching::answer_slots(g),
        QuestionGroup::GapFill(g) => gap_fill::answer_slots(g),
        QuestionGroup::TableCompletion(g) => table::answer_slots(g),
        QuestionGroup::DiagramLabel(g) => diagram::answer_slots(g),
        QuestionGroup::Unsupported(_) => Vec::new(),
    }
}

/// 汇总题组的期望答案列表（判分输入）
pub fn expectations(group: &QuestionGroup) -> Vec<AnswerExpectation> {
    match group {
        QuestionGroup::Tfng(g) | QuestionGroup::Ynng(g) => truth::expectations(g),
        QuestionGroup::ChoiceSingle(g) | QuestionGroup::ChoiceMulti(g) => {
            choice::expectations(g)
        }
        QuestionGroup::Matching(g) => matching::expectations(g),
        QuestionGroup::GapFill(g) => gap_fill::expectations(g),
        QuestionGroup::TableCompletion(g) => table::expectations(g),
        QuestionGroup::DiagramLabel(g) => diagram::expectations(g),
        QuestionGroup::Unsupported(_) => Vec::new(),
    }
}
