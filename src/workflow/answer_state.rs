//! 作答状态模型 - 流程层
//!
//! 整卷唯一的可变状态：作答位 id → 作答值。
//!
//! 生命周期：
//! 1. 考试加载时走一遍全卷播种，多选位播 `[]`、其余播 `""`，
//!    外部传入的已保存作答优先生效（续答）
//! 2. 考生交互逐 id 原地更新，更新同步串行执行，不会交错
//! 3. 提交时整体读出交给判分
//! 4. 换卷或初始作答变化时整体重播，不与在途更新合并
//!
//! 映射字段私有、更新只走 `&mut self` 方法，「单一写者」由所有权
//! 体系保证。

use std::fmt;

use crate::models::{AnswerMap, AnswerValue, Exam};
use crate::services::normalizer;

/// 每次写入后收到整张作答映射的回调（外部自动保存用）
pub type ChangeListener = Box<dyn Fn(&AnswerMap)>;

/// 作答状态
pub struct AnswerState {
    map: AnswerMap,
    on_change: Option<ChangeListener>,
}

impl fmt::Debug for AnswerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnswerState")
            .field("map", &self.map)
            .field("on_change", &self.on_change.is_some())
            .finish()
    }
}

impl AnswerState {
    /// 从考试结构播种作答状态
    ///
    /// 遍历每个分节、每个题组枚举出的作答位；`initial` 中已有的
    /// id 取已保存的值，其余写入对应形态的空值。同一 id 在多个
    /// 题组重复出现时后写覆盖（此时两处输入共享同一状态，属于
    /// 内容数据问题，引擎不校验）。
    ///
    /// # 参数
    /// - `exam`: 归一化后的考试结构
    /// - `initial`: 可选的已保存作答（续答场景）
    pub fn seed(exam: &Exam, initial: Option<&AnswerMap>) -> Self {
        let mut map = AnswerMap::new();

        for group in exam.groups() {
            for slot in normalizer::answer_slots(group) {
                let value = initial
                    .and_then(|saved| saved.get(&slot.id).cloned())
                    .unwrap_or_else(|| {
                        if slot.multi {
                            AnswerValue::empty_many()
                        } else {
                            AnswerValue::empty_text()
                        }
                    });
                map.insert(slot.id, value);
            }
        }

        Self {
            map,
            on_change: None,
        }
    }

    /// 整体重播（换卷 / 初始作答变化）
    ///
    /// 从调用方视角是原子替换：旧映射整个丢弃，不做合并。
    pub fn reseed(&mut self, exam: &Exam, initial: Option<&AnswerMap>) {
        self.map = Self::seed(exam, initial).map;
        self.fire();
    }

    /// 读取单个作答位
    pub fn value(&self, id: &str) -> Option<&AnswerValue> {
        self.map.get(id)
    }

    /// 当前完整作答映射
    pub fn map(&self) -> &AnswerMap {
        &self.map
    }

    /// 已作答的作答位数量（日志与进度展示用）
    pub fn answered_count(&self) -> usize {
        self.map.values().filter(|v| !v.is_unanswered()).count()
    }

    /// 写入单个作答位
    pub fn set(&mut self, id: &str, value: impl Into<AnswerValue>) {
        self.map.insert(id.to_string(), value.into());
        self.fire();
    }

    /// 函数式更新单个作答位
    ///
    /// 更新函数拿到该 id 的当前值与整张映射，适合「在多选数组里
    /// 增删一项」这类基于旧值的更新；更新同步执行，不存在
    /// 读-改-写竞争。
    pub fn update<F>(&mut self, id: &str, updater: F)
    where
        F: FnOnce(&AnswerValue, &AnswerMap) -> AnswerValue,
    {
        let previous = self.map.get(id).cloned().unwrap_or_default();
        let next = updater(&previous, &self.map);
        self.map.insert(id.to_string(), next);
        self.fire();
    }

    /// 多选便捷开关：已选则移除，未选则追加
    pub fn toggle(&mut self, id: &str, item: &str) {
        let item = item.to_string();
        self.update(id, |previous, _| {
            let mut selected = match previous {
                AnswerValue::Many(items) => items.clone(),
                // 单值历史数据宽松升格成数组
                AnswerValue::Text(s) if !s.is_empty() => vec![s.clone()],
                AnswerValue::Text(_) => Vec::new(),
            };
            match selected.iter().position(|v| *v == item) {
                Some(index) => {
                    selected.remove(index);
                }
                None => selected.push(item),
            }
            AnswerValue::Many(selected)
        });
    }

    /// 注册写入回调
    pub fn set_on_change(&mut self, listener: impl Fn(&AnswerMap) + 'static) {
        self.on_change = Some(Box::new(listener));
    }

    fn fire(&self) {
        if let Some(listener) = &self.on_change {
            listener(&self.map);
        }
    }
}
