//! 派生列表
//!
//! 完整记录集 + 筛选状态 → 保持原始顺序的子序列。

use crate::engine::predicate::Predicate;
use crate::models::filter_state::FilterState;
use crate::models::record::Filterable;
use std::sync::Arc;

/// 对记录集应用筛选，返回保持原顺序的引用列表
///
/// 没有匹配时返回空列表。
pub fn derive<'a, R: Filterable>(records: &'a [R], state: &FilterState) -> Vec<&'a R> {
    let predicate = Predicate::compile(state);
    records.iter().filter(|r| predicate.test(*r)).collect()
}

/// 同 [`derive`]，返回克隆后的记录
pub fn derive_owned<R: Filterable + Clone>(records: &[R], state: &FilterState) -> Vec<R> {
    derive(records, state).into_iter().cloned().collect()
}

/// 带缓存的派生列表
///
/// 只在数据源（按 `Arc` 指针判断）或筛选状态变化时重新计算。
#[derive(Debug)]
pub struct DerivedList<R> {
    source: Arc<Vec<R>>,
    state: FilterState,
    indices: Vec<usize>,
    recomputations: usize,
}

impl<R: Filterable> DerivedList<R> {
    pub fn new(source: Arc<Vec<R>>, state: FilterState) -> Self {
        let mut list = Self {
            source,
            state,
            indices: Vec::new(),
            recomputations: 0,
        };
        list.recompute();
        list
    }

    /// 同步数据源和筛选状态，返回本次是否重新计算
    pub fn refresh(&mut self, source: &Arc<Vec<R>>, state: &FilterState) -> bool {
        let source_changed = !Arc::ptr_eq(&self.source, source);
        let state_changed = self.state != *state;
        if !source_changed && !state_changed {
            return false;
        }

        if source_changed {
            self.source = Arc::clone(source);
        }
        if state_changed {
            self.state = state.clone();
        }
        self.recompute();
        true
    }

    /// 只更新筛选状态
    pub fn set_state(&mut self, state: &FilterState) -> bool {
        let source = Arc::clone(&self.source);
        self.refresh(&source, state)
    }

    fn recompute(&mut self) {
        let predicate = Predicate::compile(&self.state);
        self.indices = self
            .source
            .iter()
            .enumerate()
            .filter(|(_, r)| predicate.test(*r))
            .map(|(i, _)| i)
            .collect();
        self.recomputations += 1;
        tracing::debug!(
            "派生列表重新计算: {}/{} 条匹配",
            self.indices.len(),
            self.source.len()
        );
    }

    pub fn iter(&self) -> impl Iterator<Item = &R> + '_ {
        self.indices.iter().map(move |&i| &self.source[i])
    }

    pub fn get(&self, position: usize) -> Option<&R> {
        self.indices.get(position).map(|&i| &self.source[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// 累计计算次数（含构造时的一次）
    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Exam;

    fn exams() -> Arc<Vec<Exam>> {
        Arc::new(
            [("1", "AWS", 650), ("2", "Cisco", 1450), ("3", "AWS", 540)]
                .into_iter()
                .map(|(id, provider, questions)| Exam {
                    id: id.to_string(),
                    name: format!("{} exam {}", provider, id),
                    provider: provider.to_string(),
                    questions,
                    ..Exam::default()
                })
                .collect(),
        )
    }

    #[test]
    fn test_derive_preserves_order() {
        let records = exams();
        let ids: Vec<&str> = derive(&records, &FilterState::new().with_provider("AWS"))
            .into_iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_no_match_is_empty_not_absent() {
        let records = exams();
        assert!(derive(&records, &FilterState::new().with_keyword("zzz")).is_empty());
        let empty: Vec<Exam> = Vec::new();
        assert!(derive(&empty, &FilterState::default()).is_empty());
    }

    #[test]
    fn test_memoized_until_inputs_change() {
        let records = exams();
        let state = FilterState::new().with_provider("AWS");
        let mut list = DerivedList::new(Arc::clone(&records), state.clone());
        assert_eq!(list.recomputations(), 1);

        // 相同输入不重新计算
        assert!(!list.refresh(&records, &state));
        assert_eq!(list.recomputations(), 1);

        // 筛选状态变化
        assert!(list.set_state(&state.clone().with_min_threshold(600)));
        assert_eq!(list.len(), 1);

        // 数据源内容相同但引用不同，也要重新计算
        let reloaded = Arc::new(records.as_ref().clone());
        let current = list.state().clone();
        assert!(list.refresh(&reloaded, &current));
        assert_eq!(list.recomputations(), 3);
        assert_eq!(list.get(0).map(|e| e.id.as_str()), Some("1"));
    }
}
