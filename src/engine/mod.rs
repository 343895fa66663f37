//! 筛选引擎
//!
//! 各列表页共用的"拉取 → 筛选 → 渲染"模式中与数据无关的部分：
//!
//! - `predicate` - 筛选状态编译为规则并逐条求值
//! - `derived` - 保持顺序的派生列表（带缓存）
//! - `carousel` - 轮播 / 分页窗口指针
//! - `duration` - 报名时长（月）

pub mod carousel;
pub mod derived;
pub mod duration;
pub mod predicate;

pub use carousel::{Breakpoints, Carousel, Pager};
pub use derived::{derive, derive_owned, DerivedList};
pub use duration::{months_between, parse_date};
pub use predicate::{matches, Predicate, Rule};
