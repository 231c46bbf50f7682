//! 考试数据文件加载
//!
//! 内容由多代编辑工具产出，既有 JSON 也有 TOML；这里只负责把
//! 文件读成原始 `serde_json::Value`，形态识别与归一化交给引擎。

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::answer::{AnswerMap, AnswerValue};

/// 文件加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("无法读取文件 {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("无法解析 JSON 文件 {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("无法解析 TOML 文件 {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("不支持的文件类型: {path}")]
    UnsupportedExtension { path: String },
    #[error("文件夹不存在: {path}")]
    FolderNotFound { path: String },
    #[error("作答文件 {path} 不是 JSON 对象")]
    NotAnObject { path: String },
}

/// 从单个文件加载原始考试数据（按扩展名识别 JSON / TOML）
pub fn load_exam_file(path: &Path) -> Result<Value, LoadError> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: display.clone(),
        source,
    })?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("json") => serde_json::from_str(&content).map_err(|source| LoadError::Json {
            path: display,
            source,
        }),
        Some("toml") => {
            let parsed: toml::Value =
                toml::from_str(&content).map_err(|source| LoadError::Toml {
                    path: display.clone(),
                    source,
                })?;
            serde_json::to_value(parsed).map_err(|source| LoadError::Json {
                path: display,
                source,
            })
        }
        _ => Err(LoadError::UnsupportedExtension { path: display }),
    }
}

/// 从文件夹加载所有考试数据文件
///
/// 单个文件加载失败只记录警告并跳过，不影响其余文件。
///
/// # 返回
/// 返回 (文件名, 原始数据) 列表，按文件名排序保证处理顺序稳定
pub fn load_all_exam_files(folder_path: &str) -> Result<Vec<(String, Value)>, LoadError> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(LoadError::FolderNotFound {
            path: folder_path.to_string(),
        });
    }

    let entries = fs::read_dir(&folder).map_err(|source| LoadError::Read {
        path: folder_path.to_string(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            matches!(
                path.extension().and_then(|s| s.to_str()),
                Some("json") | Some("toml")
            )
        })
        .collect();
    paths.sort();

    let mut exams = Vec::new();
    for path in paths {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        info!("正在加载: {}", name);

        match load_exam_file(&path) {
            Ok(value) => exams.push((name, value)),
            Err(e) => {
                warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(exams)
}

/// 加载已保存的作答文件（JSON 对象：id → string | string[]）
///
/// 值的形态宽松转换，认不出的形态降级为空字符串。
pub fn load_answers_file(path: &str) -> Result<AnswerMap, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_string(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| LoadError::Json {
        path: path.to_string(),
        source,
    })?;

    let Some(object) = value.as_object() else {
        return Err(LoadError::NotAnObject {
            path: path.to_string(),
        });
    };

    Ok(object
        .iter()
        .map(|(id, v)| (id.clone(), AnswerValue::from_json(v)))
        .collect())
}
