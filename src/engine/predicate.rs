//! 谓词求值
//!
//! 把筛选状态编译成一组声明式规则，所有规则 AND 组合。

use crate::models::filter_state::{is_all, FilterState};
use crate::models::record::Filterable;
use std::collections::BTreeSet;

/// 单条筛选规则
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// 路由段中的供应商，大小写不敏感
    RouteProvider(String),
    /// 路由段中的分类，大小写不敏感
    RouteCategory(String),
    /// 下拉框选中的供应商，精确匹配
    Provider(String),
    /// 复选框选中的分类集合
    Categories(BTreeSet<String>),
    /// 关键词（已转小写），匹配 name / code / provider 任一字段
    Keyword(String),
    /// 数量下限
    MinQuantity(u32),
}

impl Rule {
    pub fn matches<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        match self {
            Rule::RouteProvider(p) => eq_folded(record.provider(), p),
            Rule::RouteCategory(c) => eq_folded(record.category(), c),
            Rule::Provider(p) => record.provider() == p,
            Rule::Categories(set) => set.contains(record.category()),
            Rule::Keyword(needle) => [record.name(), record.code(), record.provider()]
                .iter()
                .any(|field| field.to_lowercase().contains(needle.as_str())),
            Rule::MinQuantity(min) => record.quantity() >= *min,
        }
    }
}

fn eq_folded(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// 编译后的谓词
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    rules: Vec<Rule>,
}

impl Predicate {
    /// 只收集处于激活状态的规则，默认值字段不产生规则
    pub fn compile(state: &FilterState) -> Self {
        let mut rules = Vec::new();

        if let Some(provider) = state.route.provider.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
            rules.push(Rule::RouteProvider(provider.to_string()));
        }
        if let Some(category) = state.route.category.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
            rules.push(Rule::RouteCategory(category.to_string()));
        }
        if !is_all(&state.selected_provider) {
            rules.push(Rule::Provider(state.selected_provider.clone()));
        }
        if !state.selected_categories.is_empty() {
            rules.push(Rule::Categories(state.selected_categories.clone()));
        }
        let keyword = state.keyword.trim();
        if !keyword.is_empty() {
            rules.push(Rule::Keyword(keyword.to_lowercase()));
        }
        if state.min_threshold > 0 {
            rules.push(Rule::MinQuantity(state.min_threshold));
        }

        Self { rules }
    }

    /// 直接由规则列表构造（页面按需声明）
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// 没有任何激活规则时所有记录都通过
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn test<R: Filterable + ?Sized>(&self, record: &R) -> bool {
        self.rules.iter().all(|rule| rule.matches(record))
    }
}

/// 判断单条记录是否满足当前筛选状态
pub fn matches<R: Filterable + ?Sized>(record: &R, state: &FilterState) -> bool {
    Predicate::compile(state).test(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::filter_state::RouteScope;
    use crate::models::record::Exam;

    fn exam(provider: &str, category: &str, questions: u32) -> Exam {
        Exam {
            id: "1".to_string(),
            name: "Certified Solutions Architect".to_string(),
            code: "SAA-C03".to_string(),
            provider: provider.to_string(),
            category: category.to_string(),
            questions,
            ..Exam::default()
        }
    }

    #[test]
    fn test_neutral_state_compiles_to_no_rules() {
        assert!(Predicate::compile(&FilterState::default()).is_empty());
        let blank_keyword = FilterState::new().with_keyword("   ").with_provider("");
        assert!(Predicate::compile(&blank_keyword).is_empty());
    }

    #[test]
    fn test_route_provider_is_case_insensitive_but_dropdown_is_exact() {
        let record = exam("AWS", "Cloud", 650);
        let by_route = FilterState::new().with_route(RouteScope::provider("aws"));
        assert!(matches(&record, &by_route));

        let by_dropdown = FilterState::new().with_provider("aws");
        assert!(!matches(&record, &by_dropdown));
        assert!(matches(&record, &FilterState::new().with_provider("AWS")));
    }

    #[test]
    fn test_keyword_searches_name_code_and_provider() {
        let record = exam("AWS", "Cloud", 650);
        assert!(matches(&record, &FilterState::new().with_keyword("architect")));
        assert!(matches(&record, &FilterState::new().with_keyword("saa-c")));
        assert!(matches(&record, &FilterState::new().with_keyword("aws")));
        // 分类不参与关键词匹配
        assert!(!matches(&record, &FilterState::new().with_keyword("cloud")));
    }

    #[test]
    fn test_all_rules_are_anded() {
        let record = exam("AWS", "Cloud", 650);
        let state = FilterState::new()
            .with_provider("AWS")
            .with_categories(["Cloud"])
            .with_min_threshold(700);
        assert!(!matches(&record, &state));
        assert!(matches(&record, &state.clone().with_min_threshold(650)));
    }

    #[test]
    fn test_missing_fields_do_not_match_active_rules() {
        let empty = Exam::default();
        assert!(matches(&empty, &FilterState::default()));
        assert!(!matches(&empty, &FilterState::new().with_keyword("a")));
        assert!(!matches(&empty, &FilterState::new().with_min_threshold(1)));
        assert!(!matches(&empty, &FilterState::new().with_route(RouteScope::category("Cloud"))));
    }

    #[test]
    fn test_predicate_is_pure() {
        let record = exam("Cisco", "Networking", 1450);
        let state = FilterState::new().with_keyword("sol").with_min_threshold(1000);
        let first = matches(&record, &state);
        let second = matches(&record, &state);
        assert_eq!(first, second);
    }
}
