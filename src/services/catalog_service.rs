//! 目录服务 - 业务能力层
//!
//! 拉取记录后交给筛选引擎，不关心渲染。

use crate::clients::{ApiClient, Resource};
use crate::engine::derive_owned;
use crate::error::AppResult;
use crate::models::filter_state::FilterState;
use crate::models::record::{Category, Course, Enrollment, Exam, PracticeTest};
use crate::models::route::RouteParams;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// 搜索日志
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchLog {
    pub keyword: String,
    pub result_count: usize,
    pub searched_at: String,
}

/// 目录服务
pub struct CatalogService {
    client: ApiClient,
}

impl CatalogService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// 拉取全部考试
    pub async fn all_exams(&self) -> AppResult<Vec<Exam>> {
        let exams: Vec<Exam> = self.client.list(Resource::Exams).await?;
        info!("✓ 拉取到 {} 个考试", exams.len());
        Ok(exams)
    }

    /// 拉取考试并按筛选状态派生列表
    pub async fn exams(&self, state: &FilterState) -> AppResult<Vec<Exam>> {
        let exams = self.all_exams().await?;
        let derived = derive_owned(&exams, state);
        debug!("筛选后剩余 {}/{} 个考试", derived.len(), exams.len());
        Ok(derived)
    }

    /// 考试详情（路由中的 provider + examCode）
    pub async fn exam_detail(&self, route: &RouteParams) -> AppResult<Option<Exam>> {
        match route.exam_slug() {
            Some(slug) => self.client.get_by_slug(Resource::Exams, &slug).await.map(Some),
            None => Ok(None),
        }
    }

    /// 某个考试下的练习测试
    pub async fn practice_tests(&self, exam_code: &str) -> AppResult<Vec<PracticeTest>> {
        let tests: Vec<PracticeTest> = self.client.list(Resource::Tests).await?;
        Ok(tests
            .into_iter()
            .filter(|t| t.exam_code.eq_ignore_ascii_case(exam_code))
            .collect())
    }

    /// 分类列表，附带每个分类下的课程数
    ///
    /// 分类和课程并发拉取，两者都成功后才合并。
    pub async fn category_overview(&self) -> AppResult<Vec<Category>> {
        let (categories, courses) = futures::future::try_join(
            self.client.list::<Category>(Resource::Categories),
            self.client.list::<Course>(Resource::Courses),
        )
        .await?;

        Ok(attach_course_counts(categories, &courses))
    }

    /// 管理端报名列表
    pub async fn enrollments(&self) -> AppResult<Vec<Enrollment>> {
        self.client.list(Resource::Enrollments).await
    }

    /// 记录一次搜索，失败只记日志
    pub async fn record_search(&self, keyword: &str, result_count: usize) {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return;
        }

        let log = SearchLog {
            keyword: keyword.to_string(),
            result_count,
            searched_at: chrono::Utc::now().to_rfc3339(),
        };
        if let Err(e) = self
            .client
            .create::<_, serde_json::Value>(Resource::SearchLogs, &log)
            .await
        {
            warn!("⚠️ 搜索日志写入失败: {}", e);
        }
    }
}

/// 按分类名 / slug / id 统计课程数（大小写不敏感）
pub fn attach_course_counts(mut categories: Vec<Category>, courses: &[Course]) -> Vec<Category> {
    let mut counts: HashMap<String, u32> = HashMap::new();
    for course in courses {
        let key = course.category.trim().to_lowercase();
        if !key.is_empty() {
            *counts.entry(key).or_default() += 1;
        }
    }

    for category in &mut categories {
        let keys = [&category.name, &category.slug, &category.id];
        let mut seen = Vec::with_capacity(keys.len());
        let mut total = 0;
        for key in keys {
            let key = key.trim().to_lowercase();
            if key.is_empty() || seen.contains(&key) {
                continue;
            }
            total += counts.get(&key).copied().unwrap_or(0);
            seen.push(key);
        }
        category.course_count = total;
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_course_counts() {
        let categories = vec![
            Category {
                id: "1".to_string(),
                name: "Cloud".to_string(),
                slug: "cloud".to_string(),
                course_count: 99,
            },
            Category {
                id: "2".to_string(),
                name: "Security".to_string(),
                slug: "security".to_string(),
                course_count: 0,
            },
        ];
        let courses: Vec<Course> = ["cloud", "Cloud", "security", "", "Networking"]
            .iter()
            .enumerate()
            .map(|(i, cat)| Course {
                id: i.to_string(),
                category: cat.to_string(),
                ..Course::default()
            })
            .collect();

        let result = attach_course_counts(categories, &courses);
        assert_eq!(result[0].course_count, 2);
        assert_eq!(result[1].course_count, 1);
    }
}
