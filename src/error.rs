use std::fmt;

/// 引擎错误类型
#[derive(Debug)]
pub enum ExamError {
    /// 考试数据结构错误
    Schema(SchemaError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for ExamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExamError::Schema(e) => write!(f, "数据结构错误: {}", e),
            ExamError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for ExamError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExamError::Schema(e) => Some(e),
            ExamError::Other(_) => None,
        }
    }
}

/// 考试数据结构错误
///
/// 只在整卷形态完全无法辨认时出现；单个题组的畸形数据
/// 由适配器降级为空态处理，不会走到这里。
#[derive(Debug)]
pub enum SchemaError {
    /// 期望 JSON 对象
    NotAnObject { context: String },
    /// 缺少必要字段
    MissingField { field: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaError::NotAnObject { context } => {
                write!(f, "{} 不是 JSON 对象", context)
            }
            SchemaError::MissingField { field } => {
                write!(f, "缺少必要字段: {}", field)
            }
        }
    }
}

impl std::error::Error for SchemaError {}

// ========== 便捷构造函数 ==========

impl ExamError {
    /// 创建「不是对象」错误
    pub fn not_an_object(context: impl Into<String>) -> Self {
        ExamError::Schema(SchemaError::NotAnObject {
            context: context.into(),
        })
    }

    /// 创建「缺少字段」错误
    pub fn missing_field(field: impl Into<String>) -> Self {
        ExamError::Schema(SchemaError::MissingField {
            field: field.into(),
        })
    }
}

// ========== Result 类型别名 ==========

/// 引擎结果类型
pub type ExamResult<T> = Result<T, ExamError>;
