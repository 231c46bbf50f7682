//! # Exam Engine
//!
//! 在线考试作答引擎：题组归一化 + 作答状态 + 答案核对
//!
//! 多代编辑工具产出的松散题目数据（字段名、类型标签都不统一）
//! 在这里收敛成统一的规范结构，渲染成可交互的输入面描述，
//! 提交后用容错比对算法核对考生作答。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 规范考试结构与作答值类型，加载后不可变
//! - `models/loaders/` - JSON / TOML 考试文件加载（CLI 入口用）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，全部是纯函数
//! - `placeholder` - 占位符解析能力
//! - `normalizer` - 题型归一化与适配器分发能力
//! - `truth` / `choice` / `matching` / `gap_fill` / `table` / `diagram` - 各题型结构适配能力
//! - `verify` - 答案核对能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一场作答"的状态与展示流程
//! - `AnswerState` - 作答状态（播种 → 更新 → 读出）
//! - `render` - 按题型分发的输入面渲染
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/legacy` - 旧版阅读/听力数据适配
//! - `orchestrator/session` - 考试会话（归一化 → 播种 → 渲染 → 判分）
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{ExamError, ExamResult};
pub use models::{
    AnswerExpectation, AnswerMap, AnswerValue, Exam, GroupType, Question, QuestionGroup, Section,
};
pub use orchestrator::{load_exam, ExamSession, Submission};
pub use services::{
    check_answer, check_answers, extract_placeholder_ids, has_placeholder, normalize_group,
    normalize_type, split_by_placeholders, Token, VerifyReport,
};
pub use workflow::{AnswerState, SectionSurface, Surface};
