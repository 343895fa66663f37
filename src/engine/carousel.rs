//! 轮播 / 分页索引
//!
//! 搜索结果分页和首页轮播共用同一个窗口指针，始终满足 `0 <= index <= max_index`。

use std::ops::Range;

/// 视口宽度断点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breakpoints {
    /// 宽度小于该值时每屏 1 个
    pub mobile: u32,
    /// 宽度小于该值时每屏 2 个
    pub tablet: u32,
    /// 更宽时每屏数量（区块不同取 3 或 4）
    pub wide_items: usize,
}

impl Breakpoints {
    pub const fn new(wide_items: usize) -> Self {
        Self {
            mobile: 768,
            tablet: 1024,
            wide_items,
        }
    }

    pub fn items_per_view(&self, viewport_width: u32) -> usize {
        if viewport_width < self.mobile {
            1
        } else if viewport_width < self.tablet {
            2
        } else {
            self.wide_items.max(1)
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(3)
    }
}

/// 轮播索引状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carousel {
    index: usize,
    len: usize,
    items_per_view: usize,
    breakpoints: Breakpoints,
}

impl Carousel {
    pub fn new(len: usize, breakpoints: Breakpoints, viewport_width: u32) -> Self {
        Self {
            index: 0,
            len,
            items_per_view: breakpoints.items_per_view(viewport_width),
            breakpoints,
        }
    }

    /// 直接指定每屏数量（不依赖视口）
    pub fn with_items_per_view(len: usize, items_per_view: usize) -> Self {
        Self {
            index: 0,
            len,
            items_per_view: items_per_view.max(1),
            breakpoints: Breakpoints::new(items_per_view.max(1)),
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn items_per_view(&self) -> usize {
        self.items_per_view
    }

    pub fn max_index(&self) -> usize {
        self.len.saturating_sub(self.items_per_view)
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.max_index());
    }

    pub fn prev(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn jump(&mut self, k: usize) {
        self.index = k.min(self.max_index());
    }

    /// 派生列表长度变化（例如筛选后变短）
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.clamp();
    }

    /// 视口尺寸变化
    pub fn resize(&mut self, viewport_width: u32) {
        self.items_per_view = self.breakpoints.items_per_view(viewport_width);
        self.clamp();
    }

    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index < self.max_index()
    }

    /// 当前可见的下标区间
    pub fn window(&self) -> Range<usize> {
        self.index..(self.index + self.items_per_view).min(self.len)
    }

    fn clamp(&mut self) {
        let max = self.max_index();
        if self.index > max {
            tracing::debug!("轮播索引 {} 超出范围，回退到 {}", self.index, max);
            self.index = max;
        }
    }
}

/// 管理端表格分页
///
/// 页码从 1 开始，空表也至少有 1 页。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
    total: usize,
}

impl Pager {
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            total,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.page_size).max(1)
    }

    pub fn go_to(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next(&mut self) {
        self.go_to(self.page + 1);
    }

    pub fn prev(&mut self) {
        self.go_to(self.page.saturating_sub(1));
    }

    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        self.go_to(self.page);
    }

    /// 当前页的下标区间
    pub fn range(&self) -> Range<usize> {
        let start = ((self.page - 1) * self.page_size).min(self.total);
        start..(start + self.page_size).min(self.total)
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.range();
        let end = range.end.min(items.len());
        &items[range.start.min(end)..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        let bp = Breakpoints::new(4);
        assert_eq!(bp.items_per_view(375), 1);
        assert_eq!(bp.items_per_view(768), 2);
        assert_eq!(bp.items_per_view(1023), 2);
        assert_eq!(bp.items_per_view(1024), 4);
    }

    #[test]
    fn test_next_prev_clamp() {
        let mut c = Carousel::with_items_per_view(5, 3);
        assert_eq!(c.max_index(), 2);
        c.prev();
        assert_eq!(c.index(), 0);
        for _ in 0..10 {
            c.next();
        }
        assert_eq!(c.index(), 2);
        assert!(!c.can_next());
        assert_eq!(c.window(), 2..5);
        c.jump(99);
        assert_eq!(c.index(), 2);
    }

    #[test]
    fn test_shrinking_list_reclamps_index() {
        let mut c = Carousel::with_items_per_view(5, 3);
        c.jump(2);
        c.set_len(3);
        assert_eq!(c.max_index(), 0);
        assert_eq!(c.index(), 0);
    }

    #[test]
    fn test_resize_reclamps_index() {
        let mut c = Carousel::new(6, Breakpoints::new(3), 500);
        assert_eq!(c.items_per_view(), 1);
        c.jump(5);
        c.resize(1440);
        assert_eq!(c.items_per_view(), 3);
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn test_fewer_items_than_slots() {
        let mut c = Carousel::with_items_per_view(2, 4);
        c.next();
        assert_eq!(c.index(), 0);
        assert_eq!(c.window(), 0..2);
        let empty = Carousel::with_items_per_view(0, 3);
        assert_eq!(empty.window(), 0..0);
    }

    #[test]
    fn test_invariant_holds_over_random_walk() {
        let mut c = Carousel::with_items_per_view(9, 2);
        let steps = [3usize, 0, 1, 7, 2, 5, 4, 6, 1, 0, 3, 3];
        for (i, step) in steps.iter().enumerate() {
            match step % 4 {
                0 => c.next(),
                1 => c.prev(),
                2 => c.jump(*step * 3),
                _ => c.set_len(*step + i),
            }
            assert!(c.index() <= c.max_index());
        }
    }

    #[test]
    fn test_pager() {
        let items: Vec<u32> = (1..=23).collect();
        let mut pager = Pager::new(items.len(), 10);
        assert_eq!(pager.total_pages(), 3);
        pager.go_to(3);
        assert_eq!(pager.slice(&items), &[21, 22, 23]);
        pager.set_total(5);
        assert_eq!(pager.page(), 1);
        pager.prev();
        assert_eq!(pager.page(), 1);
        assert_eq!(Pager::new(0, 10).total_pages(), 1);
        assert!(Pager::new(0, 10).slice(&items[..0]).is_empty());
    }
}
