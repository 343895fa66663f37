//! 应用编排
//!
//! 管理配置、客户端和会话，加载记录后交给列表视图，输出统计。

use crate::clients::ApiClient;
use crate::config::Config;
use crate::engine::{Breakpoints, Pager};
use crate::error::AppError;
use crate::models::filter_state::FilterState;
use crate::models::loaders::load_catalog;
use crate::models::record::Exam;
use crate::models::route::RouteParams;
use crate::services::{AuthContext, CatalogService, FileStore};
use crate::utils::logging::{log_records_loaded, log_startup, print_final_stats};
use crate::utils::truncate_text;
use crate::workflow::ListingView;
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    auth: AuthContext,
    catalog: Option<CatalogService>,
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub matched: usize,
    pub visible_ids: Vec<String>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        let auth = AuthContext::new(Arc::new(FileStore::new(&config.session_file)))
            .context("无法恢复会话")?;

        let catalog = if config.has_backend() {
            // 已登录时优先使用会话 token
            let client = ApiClient::new(&config)?;
            let client = match auth.bearer_token() {
                Some(token) => client.with_token(Some(token)),
                None => client,
            };
            log_startup(client.base_url());
            Some(CatalogService::new(client))
        } else {
            log_startup(&config.catalog_file);
            None
        };

        Ok(Self {
            config,
            auth,
            catalog,
        })
    }

    pub fn auth(&self) -> &AuthContext {
        &self.auth
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<RunSummary> {
        let exams = match self.load_exams().await {
            Ok(exams) => exams,
            Err(e) => {
                self.report(&e);
                return Err(e.into());
            }
        };

        let state = filter_from_config(&self.config);
        let breakpoints = Breakpoints::new(self.config.wide_items_per_view);
        let view = ListingView::with_state(exams, state, breakpoints, self.config.viewport_width);

        log_records_loaded(view.total(), view.carousel().items_per_view());

        if view.is_empty() {
            warn!("⚠️ 没有符合条件的考试");
        } else if self.config.verbose_logging {
            let results = view.results();
            let pager = Pager::new(results.len(), self.config.page_size);
            info!("第 {}/{} 页:", pager.page(), pager.total_pages());
            for exam in pager.slice(&results) {
                info!(
                    "  #{} [{}] {} ({} 题)",
                    exam.id,
                    exam.provider,
                    truncate_text(&exam.name, 60),
                    exam.questions
                );
            }
        }

        if let Some(service) = &self.catalog {
            service
                .record_search(&view.state().keyword, view.derived().len())
                .await;
        }

        let window = view.carousel().window();
        print_final_stats(
            view.derived().len(),
            view.total(),
            &format!("{}..{}", window.start, window.end),
        );

        Ok(RunSummary {
            total: view.total(),
            matched: view.derived().len(),
            visible_ids: view.visible().iter().map(|e| e.id.clone()).collect(),
        })
    }

    /// 有后端时走接口，否则读取离线快照
    async fn load_exams(&self) -> Result<Vec<Exam>, AppError> {
        match &self.catalog {
            Some(service) => service.all_exams().await,
            None => {
                info!("\n📁 正在读取目录快照...");
                let catalog = load_catalog(Path::new(&self.config.catalog_file)).await?;
                Ok(catalog.exams)
            }
        }
    }

    /// 错误提示；鉴权失败时给出跳转指令
    fn report(&self, e: &AppError) {
        error!("❌ {}", e.banner());
        let delay = Duration::from_millis(self.config.auth_redirect_delay_ms);
        if let Some(redirect) = e.redirect(&self.config.login_route, delay) {
            warn!(
                "将在 {} 毫秒后跳转到 {}",
                redirect.delay.as_millis(),
                redirect.route
            );
            if let Err(clear_err) = self.auth.sign_out() {
                warn!("清除会话失败: {}", clear_err);
            }
        }
    }
}

/// 由配置构造筛选状态（路由段来自 ROUTE_PATH）
pub fn filter_from_config(config: &Config) -> FilterState {
    FilterState::new()
        .with_keyword(config.search_keyword.clone())
        .with_provider(config.search_provider.clone())
        .with_categories(config.search_categories.iter().cloned())
        .with_min_threshold(config.min_questions)
        .with_route(RouteParams::parse(&config.route_path).scope())
}
