//! 会话上下文 - 业务能力层
//!
//! 令牌的签发、读取和清除只在这里发生，其他模块通过 `AuthContext` 访问。

use crate::error::{AppError, AppResult, AuthError, FileError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use tracing::{debug, info};

/// 登录会话（原先散落在浏览器存储里的几个键）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.role.eq_ignore_ascii_case("admin")
    }
}

/// 会话存储
///
/// 同步读写，后写覆盖先写，不做跨进程协调。
pub trait SessionStore: Send + Sync {
    fn load(&self) -> AppResult<Option<Session>>;
    fn save(&self, session: &Session) -> AppResult<()>;
    fn clear(&self) -> AppResult<()>;
}

/// 内存存储（测试和一次性运行）
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Session>>,
}

impl SessionStore for MemoryStore {
    fn load(&self) -> AppResult<Option<Session>> {
        Ok(self.slot.lock().map_err(poisoned)?.clone())
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        *self.slot.lock().map_err(poisoned)? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        *self.slot.lock().map_err(poisoned)? = None;
        Ok(())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> AppError {
    AppError::SessionPoisoned
}

/// JSON 文件存储
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn path_str(&self) -> String {
        self.path.display().to_string()
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> AppResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| FileError::ReadFailed {
            path: self.path_str(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }
        let session = serde_json::from_str(&content).map_err(|source| FileError::SessionParseFailed {
            path: self.path_str(),
            source,
        })?;
        Ok(Some(session))
    }

    fn save(&self, session: &Session) -> AppResult<()> {
        let content = serde_json::to_string_pretty(session).map_err(|source| FileError::SessionParseFailed {
            path: self.path_str(),
            source,
        })?;
        std::fs::write(&self.path, content).map_err(|source| FileError::WriteFailed {
            path: self.path_str(),
            source,
        })?;
        Ok(())
    }

    fn clear(&self) -> AppResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(FileError::WriteFailed {
                path: self.path_str(),
                source,
            }
            .into()),
        }
    }
}

/// 注入式的鉴权上下文
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn SessionStore>,
    current: Arc<RwLock<Option<Session>>>,
}

impl AuthContext {
    /// 从存储恢复会话
    pub fn new(store: Arc<dyn SessionStore>) -> AppResult<Self> {
        let current = store.load()?;
        if let Some(session) = &current {
            debug!("恢复会话: {} ({})", session.name, session.role);
        }
        Ok(Self {
            store,
            current: Arc::new(RwLock::new(current)),
        })
    }

    /// 只在内存中保存会话
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::default()),
            current: Arc::new(RwLock::new(None)),
        }
    }

    pub fn sign_in(&self, session: Session) -> AppResult<()> {
        let mut current = self.current.write().map_err(poisoned)?;
        self.store.save(&session)?;
        info!("✓ 已登录: {}", session.name);
        *current = Some(session);
        Ok(())
    }

    pub fn sign_out(&self) -> AppResult<()> {
        let mut current = self.current.write().map_err(poisoned)?;
        self.store.clear()?;
        *current = None;
        info!("已退出登录");
        Ok(())
    }

    pub fn session(&self) -> Option<Session> {
        self.current.read().ok().and_then(|s| s.clone())
    }

    pub fn bearer_token(&self) -> Option<String> {
        self.session()
            .map(|s| s.token)
            .filter(|t| !t.is_empty())
    }

    pub fn is_admin(&self) -> bool {
        self.session().is_some_and(|s| s.is_admin() && !s.token.is_empty())
    }

    /// 管理端页面的入口检查
    pub fn require_admin(&self) -> AppResult<Session> {
        match self.session() {
            Some(session) if session.is_admin() && !session.token.is_empty() => Ok(session),
            _ => Err(AuthError::NotSignedIn.into()),
        }
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("signed_in", &self.session().is_some())
            .finish()
    }
}

/// 进程内的一次性标记（原先存在 sessionStorage，不持久化）
#[derive(Debug, Default)]
pub struct SessionFlags {
    lead_popup_shown: std::sync::atomic::AtomicBool,
}

impl SessionFlags {
    /// 标记线索弹窗已展示，返回本次是否为第一次
    pub fn mark_lead_popup_shown(&self) -> bool {
        !self
            .lead_popup_shown
            .swap(true, std::sync::atomic::Ordering::SeqCst)
    }

    pub fn lead_popup_shown(&self) -> bool {
        self.lead_popup_shown.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn admin() -> Session {
        Session {
            token: "t-123".to_string(),
            role: "admin".to_string(),
            name: "Ops".to_string(),
            email: "ops@example.com".to_string(),
            admin_id: Some("1".to_string()),
            user_name: None,
        }
    }

    #[test]
    fn test_require_admin() {
        let ctx = AuthContext::in_memory();
        assert!(matches!(
            ctx.require_admin(),
            Err(AppError::Auth(AuthError::NotSignedIn))
        ));

        ctx.sign_in(admin()).unwrap();
        assert!(ctx.is_admin());
        assert_eq!(ctx.bearer_token().as_deref(), Some("t-123"));

        ctx.sign_out().unwrap();
        assert!(ctx.bearer_token().is_none());
    }

    #[test]
    fn test_student_is_not_admin() {
        let ctx = AuthContext::in_memory();
        ctx.sign_in(Session {
            role: "student".to_string(),
            ..admin()
        })
        .unwrap();
        assert!(!ctx.is_admin());
        assert!(ctx.require_admin().is_err());
    }

    #[test]
    fn test_file_store_restores_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let ctx = AuthContext::new(Arc::new(FileStore::new(&path))).unwrap();
        ctx.sign_in(admin()).unwrap();

        let restored = AuthContext::new(Arc::new(FileStore::new(&path))).unwrap();
        assert_eq!(restored.session(), Some(admin()));

        restored.sign_out().unwrap();
        assert!(!path.exists());
        // 重复清除不报错
        FileStore::new(&path).clear().unwrap();
    }

    #[test]
    fn test_poisoned_lock_is_reported() {
        let store = Arc::new(MemoryStore::default());
        let held = Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = held.slot.lock().unwrap();
            panic!("writer crashed");
        })
        .join();

        assert!(matches!(store.save(&admin()), Err(AppError::SessionPoisoned)));
        assert!(matches!(store.clear(), Err(AppError::SessionPoisoned)));

        let ctx = AuthContext::in_memory();
        let current = Arc::clone(&ctx.current);
        let _ = std::thread::spawn(move || {
            let _guard = current.write().unwrap();
            panic!("writer crashed");
        })
        .join();
        assert!(matches!(ctx.sign_in(admin()), Err(AppError::SessionPoisoned)));
        assert!(matches!(ctx.sign_out(), Err(AppError::SessionPoisoned)));
    }

    #[test]
    fn test_lead_popup_shown_once() {
        let flags = SessionFlags::default();
        assert!(flags.mark_lead_popup_shown());
        assert!(!flags.mark_lead_popup_shown());
        assert!(flags.lead_popup_shown());
    }
}
