//! 筛选状态
//!
//! 页面挂载时以默认值创建，随用户输入变化，不持久化。

use std::collections::BTreeSet;

/// 供应商下拉框的"全部"选项
pub const ALL_PROVIDERS: &str = "all";

/// 路由段带来的范围限制（来自 URL 路径）
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RouteScope {
    pub provider: Option<String>,
    pub category: Option<String>,
}

impl RouteScope {
    pub fn provider(provider: impl Into<String>) -> Self {
        Self {
            provider: Some(provider.into()),
            category: None,
        }
    }

    pub fn category(category: impl Into<String>) -> Self {
        Self {
            provider: None,
            category: Some(category.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.provider.is_none() && self.category.is_none()
    }
}

/// 用户当前的搜索 / 筛选输入
///
/// 每个字段的默认值（空字符串、"all"、空集合、0）表示不做限制。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilterState {
    pub keyword: String,
    pub selected_provider: String,
    pub selected_categories: BTreeSet<String>,
    pub min_threshold: u32,
    pub route: RouteScope,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            selected_provider: ALL_PROVIDERS.to_string(),
            selected_categories: BTreeSet::new(),
            min_threshold: 0,
            route: RouteScope::default(),
        }
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = keyword.into();
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.selected_provider = provider.into();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_min_threshold(mut self, min_threshold: u32) -> Self {
        self.min_threshold = min_threshold;
        self
    }

    pub fn with_route(mut self, route: RouteScope) -> Self {
        self.route = route;
        self
    }

    /// 复选框切换：已选中则移除，否则加入
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_string());
        }
    }

    /// 清空用户输入，保留路由范围
    pub fn reset(&mut self) {
        *self = Self {
            route: std::mem::take(&mut self.route),
            ..Self::default()
        };
    }

    /// 所有字段都处于默认值
    pub fn is_neutral(&self) -> bool {
        self.keyword.trim().is_empty()
            && is_all(&self.selected_provider)
            && self.selected_categories.is_empty()
            && self.min_threshold == 0
            && self.route.is_empty()
    }
}

/// 供应商选项是否为"全部"（空字符串同样视为不限制）
pub fn is_all(provider: &str) -> bool {
    provider.is_empty() || provider == ALL_PROVIDERS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_neutral() {
        assert!(FilterState::default().is_neutral());
        assert!(!FilterState::new().with_min_threshold(1).is_neutral());
    }

    #[test]
    fn test_toggle_category() {
        let mut state = FilterState::new();
        state.toggle_category("Cloud");
        assert!(state.selected_categories.contains("Cloud"));
        state.toggle_category("Cloud");
        assert!(state.selected_categories.is_empty());
    }

    #[test]
    fn test_reset_keeps_route() {
        let mut state = FilterState::new()
            .with_keyword("aws")
            .with_route(RouteScope::provider("aws"));
        state.reset();
        assert_eq!(state.keyword, "");
        assert_eq!(state.route.provider.as_deref(), Some("aws"));
    }
}
