//! 考试会话 - 编排层
//!
//! 把归一化、播种、渲染、判分串成一条完整流程：
//! 1. 识别数据形态（规范 / 旧版），归一化成 `Exam`
//! 2. 播种作答状态（可带已保存作答续答）
//! 3. 考生交互逐 id 更新，变化回调交给外部做自动保存
//! 4. 提交时整体读出作答并核对期望答案
//!
//! 会话本身不做任何 I/O，持久化与网络完全由调用方负责。

use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{ExamError, ExamResult};
use crate::models::{AnswerExpectation, AnswerMap, AnswerValue, Exam, Section};
use crate::orchestrator::legacy;
use crate::services::raw::{pick_array, pick_string, pick_usize};
use crate::services::{normalizer, verify};
use crate::workflow::{render, AnswerState, SectionSurface};

/// 从原始 JSON 加载并归一化考试结构
///
/// 旧版形态先过旧版适配；规范形态要求对象且携带 `sections` 数组，
/// 分节内的题组逐个归一化，畸形题组降级处理、不阻断加载。
pub fn load_exam(raw: &Value) -> ExamResult<Exam> {
    if legacy::is_legacy_exam(raw) {
        return legacy::convert_legacy_exam(raw);
    }

    if !raw.is_object() {
        return Err(ExamError::not_an_object("考试数据"));
    }

    let module = pick_string(raw, &["module", "type"]).unwrap_or_else(|| "reading".to_string());

    let raw_sections = pick_array(raw, &["sections"])
        .ok_or_else(|| ExamError::missing_field("sections"))?;

    let sections = raw_sections
        .iter()
        .enumerate()
        .map(|(index, section)| Section {
            section_number: pick_usize(section, &["section_number", "number", "section"])
                .map(|n| n as u32)
                .unwrap_or(index as u32 + 1),
            passage: pick_string(section, &["passage", "article", "text"]),
            audio_url: pick_string(section, &["audio_url", "audio", "audio_src"]),
            question_groups: pick_array(section, &["question_groups", "groups"])
                .map(|groups| groups.iter().map(normalizer::normalize_group).collect())
                .unwrap_or_default(),
        })
        .collect();

    Ok(Exam { module, sections })
}

/// 提交结果：完整作答映射 + 核对报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub answers: AnswerMap,
    pub report: verify::VerifyReport,
}

/// 一场考试的作答会话
pub struct ExamSession {
    exam: Exam,
    state: AnswerState,
}

impl ExamSession {
    /// 从原始 JSON 创建会话
    ///
    /// # 参数
    /// - `raw`: 规范或旧版形态的考试数据
    /// - `initial`: 可选的已保存作答（续答）
    pub fn new(raw: &Value, initial: Option<&AnswerMap>) -> ExamResult<Self> {
        let exam = load_exam(raw)?;
        Ok(Self::from_exam(exam, initial))
    }

    /// 从已归一化的考试结构创建会话
    pub fn from_exam(exam: Exam, initial: Option<&AnswerMap>) -> Self {
        let state = AnswerState::seed(&exam, initial);
        info!(
            "📝 会话就绪: 模块 {}，{} 个分节，{} 个作答位",
            exam.module,
            exam.sections.len(),
            state.map().len()
        );
        Self { exam, state }
    }

    pub fn exam(&self) -> &Exam {
        &self.exam
    }

    /// 当前完整作答映射
    pub fn answers(&self) -> &AnswerMap {
        self.state.map()
    }

    /// 已作答的作答位数量
    pub fn answered_count(&self) -> usize {
        self.state.answered_count()
    }

    /// 写入单个作答位
    pub fn set_answer(&mut self, id: &str, value: impl Into<AnswerValue>) {
        self.state.set(id, value);
    }

    /// 函数式更新单个作答位
    pub fn update_answer<F>(&mut self, id: &str, updater: F)
    where
        F: FnOnce(&AnswerValue, &AnswerMap) -> AnswerValue,
    {
        self.state.update(id, updater);
    }

    /// 多选开关（勾选/取消勾选一项）
    pub fn toggle_answer(&mut self, id: &str, item: &str) {
        self.state.toggle(id, item);
    }

    /// 注册作答变化回调（外部自动保存）
    pub fn on_change(&mut self, listener: impl Fn(&AnswerMap) + 'static) {
        self.state.set_on_change(listener);
    }

    /// 换卷 / 重置初始作答，整体重播作答状态
    pub fn reset(&mut self, initial: Option<&AnswerMap>) {
        self.state.reseed(&self.exam, initial);
    }

    /// 渲染整卷输入面
    pub fn render(&self) -> Vec<SectionSurface> {
        render::render_exam(&self.exam, self.state.map())
    }

    /// 全卷期望答案列表（按卷面顺序）
    pub fn expectations(&self) -> Vec<AnswerExpectation> {
        self.exam
            .groups()
            .flat_map(|group| normalizer::expectations(group))
            .collect()
    }

    /// 提交：整体读出作答并核对
    ///
    /// 没有「必须作答」的拦截，未答完同样可以提交，空作答只在
    /// 期望答案也为空时判对。
    pub fn submit(&self) -> Submission {
        let expectations = self.expectations();
        let report = verify::check_answers(&expectations, self.state.map());
        info!(
            "📊 提交完成: 共 {} 题，对 {} 题，错 {} 题",
            report.total, report.correct, report.wrong
        );
        Submission {
            answers: self.state.map().clone(),
            report,
        }
    }
}
