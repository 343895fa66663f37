//! 路由解析
//!
//! 路径段编码了供应商 / 分类 / 考试代码 / 测试 ID，用于构造筛选范围和 API slug。

use crate::models::filter_state::RouteScope;

/// 从路径中解析出的参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub provider: Option<String>,
    pub category: Option<String>,
    pub exam_code: Option<String>,
    pub test_id: Option<String>,
}

impl RouteParams {
    /// 解析路径，支持：
    /// - `/exams/{provider}`
    /// - `/exams/{provider}/{examCode}`
    /// - `/exams/{provider}/{examCode}/practice/{testId}`
    /// - `/categories/{category}`
    ///
    /// 无法识别的路径返回空参数。
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["exams", provider] => Self {
                provider: Some(decode(provider)),
                ..Self::default()
            },
            ["exams", provider, code] => Self {
                provider: Some(decode(provider)),
                exam_code: Some(decode(code)),
                ..Self::default()
            },
            ["exams", provider, code, "practice", test_id] => Self {
                provider: Some(decode(provider)),
                exam_code: Some(decode(code)),
                test_id: Some(decode(test_id)),
                ..Self::default()
            },
            ["categories", category] => Self {
                category: Some(decode(category)),
                ..Self::default()
            },
            _ => Self::default(),
        }
    }

    /// 转换为筛选用的路由范围
    pub fn scope(&self) -> RouteScope {
        RouteScope {
            provider: self.provider.clone(),
            category: self.category.clone(),
        }
    }

    /// 考试详情的 API slug：`{provider}/{examCode}`
    pub fn exam_slug(&self) -> Option<String> {
        match (&self.provider, &self.exam_code) {
            (Some(provider), Some(code)) => Some(format!("{}/{}", slugify(provider), slugify(code))),
            _ => None,
        }
    }

    /// 还原为页面路径
    pub fn to_path(&self) -> String {
        match (&self.provider, &self.exam_code, &self.test_id, &self.category) {
            (Some(p), Some(c), Some(t), _) => {
                format!("/exams/{}/{}/practice/{}", slugify(p), slugify(c), t)
            }
            (Some(p), Some(c), None, _) => format!("/exams/{}/{}", slugify(p), slugify(c)),
            (Some(p), None, _, _) => format!("/exams/{}", slugify(p)),
            (None, _, _, Some(cat)) => format!("/categories/{}", slugify(cat)),
            _ => "/".to_string(),
        }
    }
}

/// 小写化并把空白替换为 `-`
pub fn slugify(value: &str) -> String {
    value
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

// 路径里只会出现 %20 这类简单转义
fn decode(segment: &str) -> String {
    segment.replace("%20", " ").replace('+', " ")
}
