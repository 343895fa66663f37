/// 后端资源族
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Exams,
    Categories,
    Courses,
    Tests,
    Enrollments,
    Reviews,
    Providers,
    Blogs,
    Hero,
    Testimonials,
    Faqs,
    ValuePropositions,
    SearchLogs,
    Leads,
    Subscribers,
    Signup,
    AdminLogin,
}

static RESOURCE_NAMES: phf::Map<&'static str, Resource> = phf::phf_map! {
    "exams" => Resource::Exams,
    "categories" => Resource::Categories,
    "courses" => Resource::Courses,
    "tests" => Resource::Tests,
    "enrollments" => Resource::Enrollments,
    "reviews" => Resource::Reviews,
    "providers" => Resource::Providers,
    "blogs" => Resource::Blogs,
    "hero" => Resource::Hero,
    "testimonials" => Resource::Testimonials,
    "faqs" => Resource::Faqs,
    "value-propositions" => Resource::ValuePropositions,
    "search-logs" => Resource::SearchLogs,
    "leads" => Resource::Leads,
    "subscribers" => Resource::Subscribers,
    "signup" => Resource::Signup,
    "admin-login" => Resource::AdminLogin,
};

impl Resource {
    /// 接口路径（相对 base url）
    pub fn path(self) -> &'static str {
        match self {
            Resource::Exams => "exams",
            Resource::Categories => "categories",
            Resource::Courses => "courses",
            Resource::Tests => "tests",
            Resource::Enrollments => "enrollments",
            Resource::Reviews => "reviews",
            Resource::Providers => "providers",
            Resource::Blogs => "blogs",
            Resource::Hero => "home/hero",
            Resource::Testimonials => "home/testimonials",
            Resource::Faqs => "home/faqs",
            Resource::ValuePropositions => "home/value-propositions",
            Resource::SearchLogs => "search-logs",
            Resource::Leads => "leads",
            Resource::Subscribers => "subscribers",
            Resource::Signup => "auth/signup",
            Resource::AdminLogin => "admin/login",
        }
    }

    /// 按名称查找（大小写不敏感，`_` 视同 `-`）
    pub fn from_name(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace('_', "-");
        RESOURCE_NAMES.get(key.as_str()).copied()
    }

    /// 是否为管理端资源（请求带 bearer token）；公开表单接口不带
    pub fn admin_scoped(self) -> bool {
        !matches!(
            self,
            Resource::SearchLogs
                | Resource::Leads
                | Resource::Subscribers
                | Resource::Signup
                | Resource::AdminLogin
        )
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Resource::from_name("Courses"), Some(Resource::Courses));
        assert_eq!(
            Resource::from_name("value_propositions"),
            Some(Resource::ValuePropositions)
        );
        assert_eq!(Resource::from_name("payments"), None);
    }

    #[test]
    fn test_public_writes() {
        assert!(!Resource::Leads.admin_scoped());
        assert!(Resource::Courses.admin_scoped());
        assert_eq!(Resource::Faqs.path(), "home/faqs");
    }
}
