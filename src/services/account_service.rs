//! 账号与线索服务 - 业务能力层
//!
//! 所有表单先在本地校验，校验失败不会发出请求。

use crate::clients::{ApiClient, Resource};
use crate::error::AppResult;
use crate::services::session::{AuthContext, Session};
use crate::services::validation::{LeadForm, LoginForm, SignupForm, SubscribeForm};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

/// 登录接口返回
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub admin_id: Option<String>,
}

impl From<LoginResponse> for Session {
    fn from(resp: LoginResponse) -> Self {
        Self {
            token: resp.token,
            role: resp.role,
            name: resp.name.clone(),
            email: resp.email,
            admin_id: resp.admin_id,
            user_name: Some(resp.name).filter(|n| !n.is_empty()),
        }
    }
}

pub struct AccountService {
    client: ApiClient,
    auth: AuthContext,
}

impl AccountService {
    pub fn new(client: ApiClient, auth: AuthContext) -> Self {
        Self { client, auth }
    }

    /// 管理员登录，成功后写入会话
    pub async fn admin_login(&self, form: &LoginForm) -> AppResult<Session> {
        form.validate()?;
        let resp: LoginResponse = self.client.create(Resource::AdminLogin, form).await?;
        let session = Session::from(resp);
        self.auth.sign_in(session.clone())?;
        Ok(session)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.auth.sign_out()
    }

    /// 管理端接口使用的客户端（带当前会话的 token）
    pub fn admin_client(&self) -> AppResult<ApiClient> {
        let session = self.auth.require_admin()?;
        Ok(self.client.clone().with_token(Some(session.token)))
    }

    /// 学员注册（附带人机验证 token）
    pub async fn signup(&self, form: &SignupForm) -> AppResult<Value> {
        form.validate()?;
        let resp = self.client.create(Resource::Signup, form).await?;
        info!("✓ 注册成功: {}", form.email);
        Ok(resp)
    }

    pub async fn submit_lead(&self, form: &LeadForm) -> AppResult<Value> {
        form.validate()?;
        self.client.create(Resource::Leads, form).await
    }

    pub async fn subscribe(&self, form: &SubscribeForm) -> AppResult<Value> {
        form.validate()?;
        self.client.create(Resource::Subscribers, form).await
    }
}
