//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 持有配置、会话和后端客户端，决定数据从哪里来，
//! 把记录交给 `workflow::ListingView`，最后输出统计。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (配置 / 会话 / 数据来源)
//!     ↓
//! workflow::ListingView (筛选状态 + 派生列表 + 轮播)
//!     ↓
//! engine (谓词 / 派生 / 轮播 / 时长)
//!     ↓
//! services / clients (后端 REST、会话、校验)
//! ```

pub mod app;

pub use app::{filter_from_config, App, RunSummary};
