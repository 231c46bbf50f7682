//! 图示标注适配 - 能力层
//!
//! 平面图、地图、流程示意图等标注类题组：有序条目列表，每条
//! 文本过一遍占位符解析；条目文本里没有占位符时，退回用条目
//! 自身的 id 作为作答位 id。条目列表为空时归一化成显式空态。

use serde_json::Value;

use crate::models::{AnswerExpectation, AnswerSlot, DiagramGroup, LabeledItem};
use crate::services::placeholder;
use crate::services::raw::{instructions, parse_expectations, parse_labeled_item, pick_array, pick_string};

/// 归一化图示标注题组
pub fn normalize_diagram(raw: &Value) -> DiagramGroup {
    let items = pick_array(raw, &["items", "diagram_items", "labels"])
        .map(|values| {
            values
                .iter()
                .enumerate()
                .map(|(i, item)| parse_labeled_item(item, (i + 1).to_string()))
                .collect()
        })
        .unwrap_or_default();

    DiagramGroup {
        instructions: instructions(raw),
        image_url: pick_string(raw, &["image_url", "image", "img", "diagram_url"]),
        items,
        answers: parse_expectations(raw),
    }
}

/// 单个条目贡献的作答位 id：文本里的占位符 id，没有则用条目 id
pub fn item_slot_ids(item: &LabeledItem) -> Vec<String> {
    let ids = placeholder::extract_placeholder_ids(&item.text);
    if ids.is_empty() {
        vec![item.id.clone()]
    } else {
        ids
    }
}

/// 作答位：按条目顺序汇总，去重；都是单值位
pub fn answer_slots(group: &DiagramGroup) -> Vec<AnswerSlot> {
    let mut ids: Vec<String> = Vec::new();
    for item in &group.items {
        for id in item_slot_ids(item) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids.into_iter().map(AnswerSlot::single).collect()
}

pub fn expectations(group: &DiagramGroup) -> Vec<AnswerExpectation> {
    group.answers.to_vec()
}
