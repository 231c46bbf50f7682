//! 表格填空适配 - 能力层
//!
//! 把各种历史表格形态收敛成稠密的 rows × columns 网格；每个
//! 单元格可以混排普通文本与占位符，作答位是全表占位符 id 的并集
//! （按行优先阅读顺序）。行列缺失或为零时归一化成显式空态，
//! 不抛错，保证单个畸形题组不会拖垮整卷渲染。

use serde_json::Value;

use crate::models::{AnswerExpectation, AnswerSlot, TableGroup};
use crate::services::placeholder;
use crate::services::raw::{instructions, parse_expectations, pick_array, pick_string, scalar_string};

/// 归一化表格填空题组
pub fn normalize_table(raw: &Value) -> TableGroup {
    // 网格可能包在 table 子对象里，也可能铺在题组顶层
    let grid = raw.get("table").filter(|v| v.is_object()).unwrap_or(raw);

    let mut cells: Vec<Vec<String>> = cell_rows(grid)
        .map(|rows| {
            rows.iter()
                .map(|row| match row {
                    Value::Array(items) => items.iter().map(scalar_string).collect(),
                    other => vec![scalar_string(other)],
                })
                .collect()
        })
        .unwrap_or_default();

    // 以数据实际尺寸为准；不规则行按最宽列数补空串成稠密网格
    let rows = cells.len();
    let columns = cells.iter().map(|row| row.len()).max().unwrap_or(0);
    for row in &mut cells {
        row.resize(columns, String::new());
    }

    TableGroup {
        instructions: instructions(raw),
        title: pick_string(grid, &["title"]).or_else(|| pick_string(raw, &["title"])),
        rows,
        columns,
        cells,
        answers: parse_expectations(raw),
    }
}

/// 取网格数据行
///
/// 规范字段是 `cells`；旧版数据有的把数据行直接放在 `rows` 里
/// （此时 `rows` 是数组而非行数）。
fn cell_rows(grid: &Value) -> Option<&Vec<Value>> {
    if let Some(rows) = pick_array(grid, &["cells", "data", "grid"]) {
        return Some(rows);
    }
    grid.get("rows").and_then(|v| v.as_array())
}

/// 作答位：全表占位符 id 的并集，按行优先顺序去重
pub fn answer_slots(group: &TableGroup) -> Vec<AnswerSlot> {
    let mut ids: Vec<String> = Vec::new();
    for row in &group.cells {
        for cell in row {
            for id in placeholder::extract_placeholder_ids(cell) {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        }
    }
    ids.into_iter().map(AnswerSlot::single).collect()
}

pub fn expectations(group: &TableGroup) -> Vec<AnswerExpectation> {
    group.answers.to_vec()
}
