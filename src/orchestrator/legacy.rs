//! 旧版考试数据适配 - 编排层
//!
//! 老版阅读/听力考试用 `{ type, reading: [...], listening: [...] }`
//! 存储，这里把它转换成规范的分节结构。转换时每个原始题组都
//! 走一遍类型归一化与结构适配，旧数据只在这一层被触碰。

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ExamError, ExamResult};
use crate::models::{Exam, Section};
use crate::services::normalizer;
use crate::services::raw::{pick_array, pick_string, pick_usize};

/// 是否为旧版考试形态
///
/// 没有规范的 `sections` 字段、但携带 `reading`/`listening`
/// 数组的对象按旧版处理。
pub fn is_legacy_exam(raw: &Value) -> bool {
    raw.is_object()
        && raw.get("sections").is_none()
        && (raw.get("reading").is_some() || raw.get("listening").is_some())
}

/// 旧版考试转规范结构
///
/// 模块名取自 `type` 字段；reading/listening 里与模块匹配的
/// 数组作为分节来源，模块不明时两个数组按先阅读后听力拼接。
pub fn convert_legacy_exam(raw: &Value) -> ExamResult<Exam> {
    if !raw.is_object() {
        return Err(ExamError::not_an_object("旧版考试数据"));
    }

    let module = pick_string(raw, &["type", "module"]).unwrap_or_else(|| "reading".to_string());

    let mut raw_sections: Vec<&Value> = Vec::new();
    match module.to_lowercase().as_str() {
        "reading" => collect_sections(raw, "reading", &mut raw_sections),
        "listening" => collect_sections(raw, "listening", &mut raw_sections),
        other => {
            debug!("旧版考试模块名不明确: {}，按阅读+听力合并处理", other);
            collect_sections(raw, "reading", &mut raw_sections);
            collect_sections(raw, "listening", &mut raw_sections);
        }
    }

    if raw_sections.is_empty() {
        warn!("⚠️ 旧版考试数据没有任何分节内容");
    }

    let sections = raw_sections
        .iter()
        .enumerate()
        .map(|(index, section)| convert_legacy_section(section, index))
        .collect();

    Ok(Exam { module, sections })
}

fn collect_sections<'a>(raw: &'a Value, key: &str, out: &mut Vec<&'a Value>) {
    if let Some(items) = raw.get(key).and_then(|v| v.as_array()) {
        out.extend(items.iter());
    }
}

/// 转换一个旧版分节
///
/// 分节编号优先取显式字段，缺失时用卷面顺序；题组列表缺失时
/// 得到一个没有题组的空分节，不报错。
fn convert_legacy_section(raw: &Value, index: usize) -> Section {
    let section_number = pick_usize(raw, &["section_number", "number", "section"])
        .map(|n| n as u32)
        .unwrap_or(index as u32 + 1);

    let question_groups = pick_array(raw, &["question_groups", "groups"])
        .map(|groups| groups.iter().map(normalizer::normalize_group).collect())
        .unwrap_or_default();

    Section {
        section_number,
        passage: pick_string(raw, &["passage", "article", "text"]),
        audio_url: pick_string(raw, &["audio_url", "audio", "audio_src"]),
        question_groups,
    }
}
