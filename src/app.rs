use crate::config::Config;
use crate::models::{load_all_exam_files, load_answers_file, AnswerMap, QuestionGroup};
use crate::orchestrator::ExamSession;
use crate::utils::logging::{
    init_log_file, log_exams_loaded, log_startup, print_final_stats, truncate_text,
};
use anyhow::{Context, Result};
use serde_json::Value;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        // 初始化日志文件
        init_log_file(&config.output_log_file)?;

        log_startup();

        Ok(Self { config })
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<()> {
        // 加载所有待处理的考试文件
        info!("\n📁 正在扫描考试数据目录...");
        let exams =
            load_all_exam_files(&self.config.exam_folder).context("扫描考试数据目录失败")?;

        if exams.is_empty() {
            warn!("⚠️ 没有找到待处理的考试文件，程序结束");
            return Ok(());
        }

        log_exams_loaded(exams.len());

        // 已保存的作答（续答与判分用）
        let saved_answers = match &self.config.answers_file {
            Some(path) => Some(
                load_answers_file(path).with_context(|| format!("加载作答文件失败: {}", path))?,
            ),
            None => None,
        };

        let mut stats = ProcessingStats {
            total: exams.len(),
            ..Default::default()
        };

        for (index, (name, raw)) in exams.iter().enumerate() {
            let exam_index = index + 1;
            match self.process_exam(exam_index, name, raw, saved_answers.as_ref()) {
                Ok(()) => stats.success += 1,
                Err(e) => {
                    error!("[试卷 {}] ❌ 处理过程中发生错误: {}", exam_index, e);
                    stats.failed += 1;
                }
            }
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );

        Ok(())
    }

    /// 处理单场考试
    ///
    /// 归一化 → 播种 → 渲染；提供了作答文件时再走一遍判分。
    fn process_exam(
        &self,
        exam_index: usize,
        name: &str,
        raw: &Value,
        saved: Option<&AnswerMap>,
    ) -> Result<()> {
        info!("\n[试卷 {}] {}", exam_index, "─".repeat(30));
        info!("[试卷 {}] 名称: {}", exam_index, name);

        let session = ExamSession::new(raw, saved)?;
        let exam = session.exam();

        info!(
            "[试卷 {}] 模块: {}, 分节 {} 个, 题组 {} 个, 作答位 {} 个",
            exam_index,
            exam.module,
            exam.sections.len(),
            exam.group_count(),
            session.answers().len()
        );

        let unsupported = exam
            .groups()
            .filter(|g| matches!(g, QuestionGroup::Unsupported(_)))
            .count();
        if unsupported > 0 {
            warn!(
                "[试卷 {}] ⚠️ 有 {} 个题组类型未识别，将按惰性占位渲染",
                exam_index, unsupported
            );
        }

        // 详细日志（如果启用）
        if self.config.verbose_logging {
            self.log_sections(exam_index, &session);
        }

        // 渲染一遍整卷，确认每个题组都能产出输入面
        let surfaces = session.render();
        info!(
            "[试卷 {}] ✓ 渲染完成，共 {} 个分节输入面",
            exam_index,
            surfaces.len()
        );

        // 有作答数据时判分
        if saved.is_some() {
            info!(
                "[试卷 {}] 已作答 {}/{} 个作答位",
                exam_index,
                session.answered_count(),
                session.answers().len()
            );

            let submission = session.submit();
            info!(
                "[试卷 {}] ✓ 判分完成: 共 {} 题, 对 {} 题, 错 {} 题",
                exam_index,
                submission.report.total,
                submission.report.correct,
                submission.report.wrong
            );

            if self.config.verbose_logging {
                for detail in submission.report.detail.iter().filter(|d| !d.correct) {
                    info!(
                        "[试卷 {}]   ✗ 题 {}: 作答 {:?}, 期望 {:?}",
                        exam_index, detail.id, detail.user, detail.expected
                    );
                }
            }
        }

        Ok(())
    }

    /// 日志：显示各分节概要
    fn log_sections(&self, exam_index: usize, session: &ExamSession) {
        for section in &session.exam().sections {
            let types: Vec<String> = section
                .question_groups
                .iter()
                .map(|g| g.group_type().to_string())
                .collect();
            info!(
                "[试卷 {}]   分节 {}: [{}]",
                exam_index,
                section.section_number,
                types.join(", ")
            );
            if let Some(passage) = &section.passage {
                info!(
                    "[试卷 {}]   段落: {}",
                    exam_index,
                    truncate_text(passage, 80)
                );
            }
        }
    }
}

/// 处理统计
#[derive(Debug, Default)]
struct ProcessingStats {
    success: usize,
    failed: usize,
    total: usize,
}
