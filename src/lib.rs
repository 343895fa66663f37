//! # Exam Catalog
//!
//! 考试备考平台的目录检索引擎：各列表页共用的搜索 / 筛选 / 分页逻辑，
//! 以及围绕它的后端客户端、会话上下文和表单校验。
//!
//! ## 架构设计
//!
//! ### ① 引擎层（Engine）
//! - `engine/` - 纯函数，不做 IO
//! - `Predicate` - 筛选状态编译成规则，AND 组合
//! - `DerivedList` - 保持顺序的派生列表，按输入变化重新计算
//! - `Carousel` / `Pager` - 窗口指针，始终夹紧在合法范围
//! - `months_between` - 报名时长（30 天一个月）
//!
//! ### ② 业务能力层（Services / Clients）
//! - `clients/` - 后端 REST 客户端（reqwest）
//! - `services/` - 目录拉取、账号表单、会话上下文、表单校验
//!
//! ### ③ 流程层（Workflow）
//! - `ListingView` - 一个列表页的完整状态：筛选 → 派生 → 窗口
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 选择数据来源，运行一次筛选并输出统计
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{ApiClient, Resource};
pub use config::Config;
pub use engine::{derive, matches, months_between, Breakpoints, Carousel, DerivedList, Pager, Predicate};
pub use error::{AppError, AppResult};
pub use models::{Exam, FilterState, Filterable, RouteParams, RouteScope};
pub use orchestrator::App;
pub use services::{AuthContext, CatalogService};
pub use workflow::ListingView;
