use serde::Serialize;

use crate::models::group::QuestionGroup;

/// 一场完整考试
///
/// 由持久化数据或旧版数据适配而来；加载完成后结构不再变化，
/// 考生的作答全部走独立的作答状态，不回写考试结构。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Exam {
    /// 模块名（如 reading / listening）
    pub module: String,
    pub sections: Vec<Section>,
}

impl Exam {
    /// 全卷题组总数
    pub fn group_count(&self) -> usize {
        self.sections.iter().map(|s| s.question_groups.len()).sum()
    }

    /// 按卷面顺序遍历所有题组
    pub fn groups(&self) -> impl Iterator<Item = &QuestionGroup> {
        self.sections.iter().flat_map(|s| s.question_groups.iter())
    }
}

/// 考试的一个部分（阅读的一篇文章 / 听力的一个 section）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub section_number: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub question_groups: Vec<QuestionGroup>,
}
