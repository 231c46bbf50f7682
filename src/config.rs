/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 考试数据文件存放目录
    pub exam_folder: String,
    /// 已保存作答文件（可选，用于续答与判分）
    pub answers_file: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exam_folder: "exam_data".to_string(),
            answers_file: None,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            exam_folder: std::env::var("EXAM_FOLDER").unwrap_or(default.exam_folder),
            answers_file: std::env::var("ANSWERS_FILE").ok().filter(|v| !v.is_empty()),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }
}
