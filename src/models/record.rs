use serde::{Deserialize, Serialize};

/// 可被筛选的记录
///
/// 所有字段访问都有默认值（空字符串 / 0），缺字段的记录只会"不匹配"，不会报错。
pub trait Filterable {
    /// 稳定标识
    fn id(&self) -> &str;

    fn name(&self) -> &str {
        ""
    }

    fn code(&self) -> &str {
        ""
    }

    fn provider(&self) -> &str {
        ""
    }

    fn category(&self) -> &str {
        ""
    }

    /// 数量字段（题目数、课程数等），用于最小阈值筛选
    fn quantity(&self) -> u32 {
        0
    }
}

/// 考试
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub questions: u32,
    #[serde(default, deserialize_with = "deserialize_amount", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_amount", skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Filterable for Exam {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn provider(&self) -> &str {
        &self.provider
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn quantity(&self) -> u32 {
        self.questions
    }
}

/// 课程
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub test_count: u32,
}

impl Filterable for Course {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.title
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn provider(&self) -> &str {
        &self.provider
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn quantity(&self) -> u32 {
        self.test_count
    }
}

/// 分类
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: String,
    /// 由 CatalogService 根据课程列表回填
    #[serde(default, deserialize_with = "deserialize_count")]
    pub course_count: u32,
}

impl Filterable for Category {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn code(&self) -> &str {
        &self.slug
    }
    fn category(&self) -> &str {
        &self.name
    }
    fn quantity(&self) -> u32 {
        self.course_count
    }
}

/// 练习测试
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeTest {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub exam_code: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub question_count: u32,
}

impl Filterable for PracticeTest {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.title
    }
    fn code(&self) -> &str {
        &self.exam_code
    }
    fn provider(&self) -> &str {
        &self.provider
    }
    fn quantity(&self) -> u32 {
        self.question_count
    }
}

/// 邮件订阅者
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub status: String,
}

impl Filterable for Subscriber {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.email
    }
    fn category(&self) -> &str {
        &self.status
    }
}

/// 报名记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    #[serde(default, deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub course_code: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub enrolled_date: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
}

impl Enrollment {
    /// 报名时长（月），仅用于展示
    pub fn duration_months(&self) -> u32 {
        crate::engine::months_between(self.enrolled_date.as_deref(), self.expiry_date.as_deref())
    }
}

impl Filterable for Enrollment {
    fn id(&self) -> &str {
        &self.id
    }
    fn name(&self) -> &str {
        &self.user_name
    }
    fn code(&self) -> &str {
        &self.course_code
    }
    fn category(&self) -> &str {
        &self.status
    }
}

// 后端的 id / 计数字段有时是数字，有时是字符串
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer id")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        // 缺 id 的记录照样保留，只是无法被定位
        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

fn deserialize_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct CountVisitor;

    impl<'de> Visitor<'de> for CountVisitor {
        type Value = u32;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a non-negative number or numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            // 无法解析的字符串按 0 处理
            Ok(value.trim().parse().unwrap_or(0))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).unwrap_or(0))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(u32::try_from(value).unwrap_or(u32::MAX))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            if value.is_finite() && value > 0.0 {
                Ok(value.min(u32::MAX as f64) as u32)
            } else {
                Ok(0)
            }
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(0)
        }
    }

    deserializer.deserialize_any(CountVisitor)
}

/// 价格、评分：数字或数字字符串，其他值视为缺失
fn deserialize_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct AmountVisitor;

    impl<'de> Visitor<'de> for AmountVisitor {
        type Value = Option<f64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value as f64))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, _value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(AmountVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exam_accepts_numeric_strings() {
        let exam: Exam = serde_json::from_value(serde_json::json!({
            "id": 7,
            "name": "AWS Certified Developer",
            "questions": "540"
        }))
        .unwrap();
        assert_eq!(exam.id, "7");
        assert_eq!(exam.questions, 540);
        assert_eq!(exam.provider, "");
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let course: Course = serde_json::from_value(serde_json::json!({ "id": "c-1" })).unwrap();
        assert_eq!(course.name(), "");
        assert_eq!(course.quantity(), 0);
    }

    #[test]
    fn test_missing_or_null_id_keeps_record() {
        let exams: Vec<Exam> = serde_json::from_value(serde_json::json!([
            { "id": 1, "provider": "AWS" },
            { "name": "B", "provider": "AWS" },
            { "id": null, "provider": "AWS" },
            { "id": 7, "provider": "AWS" }
        ]))
        .unwrap();
        let ids: Vec<&str> = exams.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "", "", "7"]);
        assert_eq!(exams[1].name, "B");
    }

    #[test]
    fn test_price_and_rating_accept_strings() {
        let exam: Exam = serde_json::from_value(serde_json::json!({
            "id": 1,
            "price": "49.99",
            "rating": 4
        }))
        .unwrap();
        assert_eq!(exam.price, Some(49.99));
        assert_eq!(exam.rating, Some(4.0));

        let exam: Exam = serde_json::from_value(serde_json::json!({
            "id": 2,
            "price": "free",
            "rating": null
        }))
        .unwrap();
        assert_eq!(exam.price, None);
        assert_eq!(exam.rating, None);
    }

    #[test]
    fn test_null_count_is_zero() {
        let category: Category =
            serde_json::from_value(serde_json::json!({ "id": 1, "courseCount": null })).unwrap();
        assert_eq!(category.course_count, 0);
    }
}
