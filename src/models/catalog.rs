use crate::models::record::{Category, Course, Enrollment, Exam, PracticeTest, Subscriber};
use serde::{Deserialize, Serialize};

/// 离线目录快照
///
/// 与后端返回的数据结构一致，用于没有后端时的本地浏览和测试。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub exams: Vec<Exam>,
    #[serde(default)]
    pub courses: Vec<Course>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub tests: Vec<PracticeTest>,
    #[serde(default)]
    pub subscribers: Vec<Subscriber>,
    #[serde(default)]
    pub enrollments: Vec<Enrollment>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl Catalog {
    pub fn record_count(&self) -> usize {
        self.exams.len()
            + self.courses.len()
            + self.categories.len()
            + self.tests.len()
            + self.subscribers.len()
            + self.enrollments.len()
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}
