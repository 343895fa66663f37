//! 列表页流程 - 流程层
//!
//! 把筛选状态、派生列表和轮播索引组合成一个可复用的列表视图，
//! 每个页面只需要提供记录集和断点配置。
//!
//! 任何会改变派生列表长度的操作之后都会重新夹紧轮播索引。

use crate::engine::{Breakpoints, Carousel, DerivedList};
use crate::models::filter_state::{FilterState, RouteScope};
use crate::models::record::Filterable;
use std::sync::Arc;
use tracing::debug;

/// 列表视图
#[derive(Debug)]
pub struct ListingView<R> {
    source: Arc<Vec<R>>,
    state: FilterState,
    derived: DerivedList<R>,
    carousel: Carousel,
}

impl<R: Filterable> ListingView<R> {
    pub fn new(records: Vec<R>, breakpoints: Breakpoints, viewport_width: u32) -> Self {
        Self::with_state(records, FilterState::default(), breakpoints, viewport_width)
    }

    pub fn with_state(records: Vec<R>, state: FilterState, breakpoints: Breakpoints, viewport_width: u32) -> Self {
        let source = Arc::new(records);
        let derived = DerivedList::new(Arc::clone(&source), state.clone());
        let carousel = Carousel::new(derived.len(), breakpoints, viewport_width);
        Self {
            source,
            state,
            derived,
            carousel,
        }
    }

    /// 替换记录集（重新拉取后）
    pub fn set_records(&mut self, records: Vec<R>) {
        self.source = Arc::new(records);
        self.sync();
    }

    /// 修改筛选状态
    pub fn update_filter(&mut self, f: impl FnOnce(&mut FilterState)) {
        f(&mut self.state);
        self.sync();
    }

    pub fn set_keyword(&mut self, keyword: impl Into<String>) {
        let keyword = keyword.into();
        self.update_filter(|s| s.keyword = keyword);
    }

    pub fn set_provider(&mut self, provider: impl Into<String>) {
        let provider = provider.into();
        self.update_filter(|s| s.selected_provider = provider);
    }

    pub fn toggle_category(&mut self, category: &str) {
        self.update_filter(|s| s.toggle_category(category));
    }

    pub fn set_min_threshold(&mut self, min_threshold: u32) {
        self.update_filter(|s| s.min_threshold = min_threshold);
    }

    pub fn set_route(&mut self, route: RouteScope) {
        self.update_filter(|s| s.route = route);
    }

    pub fn clear_filters(&mut self) {
        self.update_filter(FilterState::reset);
    }

    pub fn resize(&mut self, viewport_width: u32) {
        self.carousel.resize(viewport_width);
    }

    pub fn next(&mut self) {
        self.carousel.next();
    }

    pub fn prev(&mut self) {
        self.carousel.prev();
    }

    pub fn jump(&mut self, k: usize) {
        self.carousel.jump(k);
    }

    fn sync(&mut self) {
        if self.derived.refresh(&self.source, &self.state) {
            self.carousel.set_len(self.derived.len());
            debug!(
                "列表同步: {} 条匹配, 索引 {}",
                self.derived.len(),
                self.carousel.index()
            );
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn derived(&self) -> &DerivedList<R> {
        &self.derived
    }

    pub fn carousel(&self) -> &Carousel {
        &self.carousel
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }

    /// 全部匹配记录
    pub fn results(&self) -> Vec<&R> {
        self.derived.iter().collect()
    }

    /// 当前窗口内可见的记录
    pub fn visible(&self) -> Vec<&R> {
        self.carousel
            .window()
            .filter_map(|i| self.derived.get(i))
            .collect()
    }

    /// 没有结果时页面展示"无结果"
    pub fn is_empty(&self) -> bool {
        self.derived.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Exam;

    fn exams(n: usize) -> Vec<Exam> {
        (1..=n)
            .map(|i| Exam {
                id: i.to_string(),
                name: format!("Exam {}", i),
                provider: if i % 2 == 0 { "Cisco" } else { "AWS" }.to_string(),
                questions: (i * 100) as u32,
                ..Exam::default()
            })
            .collect()
    }

    #[test]
    fn test_filter_change_reclamps_carousel() {
        let mut view = ListingView::new(exams(10), Breakpoints::new(3), 1280);
        view.jump(7);
        assert_eq!(view.carousel().index(), 7);

        view.set_provider("AWS");
        assert_eq!(view.derived().len(), 5);
        assert_eq!(view.carousel().index(), 2);

        view.set_min_threshold(800);
        assert_eq!(view.derived().len(), 1);
        assert_eq!(view.carousel().index(), 0);
        let ids: Vec<&str> = view.visible().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["9"]);
    }

    #[test]
    fn test_no_results_state() {
        let mut view = ListingView::new(exams(4), Breakpoints::new(4), 1280);
        view.set_keyword("nothing matches this");
        assert!(view.is_empty());
        assert!(view.visible().is_empty());
        view.clear_filters();
        assert_eq!(view.results().len(), 4);
    }

    #[test]
    fn test_set_records_rederives() {
        let mut view = ListingView::new(exams(2), Breakpoints::default(), 500);
        view.set_provider("Cisco");
        assert_eq!(view.results().len(), 1);
        view.set_records(exams(6));
        assert_eq!(view.results().len(), 3);
        assert_eq!(view.total(), 6);
    }
}
