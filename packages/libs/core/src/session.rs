//! 세션 토큰 저장소
//!
//! 현재 세션의 토큰과 role을 보관합니다. 브라우저의 `localStorage`에 해당하며,
//! 두 값은 고정된 키 이름으로 저장됩니다.
//!
//! 토큰과 role은 서로 독립적으로 설정/삭제할 수 있습니다. 둘을 함께 관리하는 것은
//! 호출자(`AuthService`)의 책임입니다.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};

/// 토큰 저장 키
pub const TOKEN_KEY: &str = "raulawards_token";

/// role 저장 키
pub const ROLE_KEY: &str = "raulawards_role";

/// 세션 상태 저장소
///
/// 쓰기 연산은 덮어쓰기이며, 삭제는 값이 없어도 성공합니다.
/// 토큰 형식은 검증하지 않습니다.
pub trait TokenStore: Send + Sync {
    /// 저장된 값 조회
    fn get(&self, key: &str) -> Option<String>;

    /// 값 저장 (기존 값 덮어쓰기)
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// 값 삭제
    fn remove(&self, key: &str) -> Result<()>;

    fn get_token(&self) -> Option<String> {
        self.get(TOKEN_KEY)
    }

    fn set_token(&self, token: &str) -> Result<()> {
        self.set(TOKEN_KEY, token)
    }

    fn clear_token(&self) -> Result<()> {
        self.remove(TOKEN_KEY)
    }

    fn get_role(&self) -> Option<String> {
        self.get(ROLE_KEY)
    }

    fn set_role(&self, role: &str) -> Result<()> {
        self.set(ROLE_KEY, role)
    }

    fn clear_role(&self) -> Result<()> {
        self.remove(ROLE_KEY)
    }
}

fn read_lock<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write_lock<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

// ─────────────────────────────────────────────────────────────────────────────
// In-memory
// ─────────────────────────────────────────────────────────────────────────────

/// 메모리 저장소 (테스트 및 일회성 세션용)
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 토큰/role이 미리 채워진 저장소
    pub fn with_session(token: &str, role: Option<&str>) -> Self {
        let mut values = HashMap::new();
        values.insert(TOKEN_KEY.to_string(), token.to_string());
        if let Some(role) = role {
            values.insert(ROLE_KEY.to_string(), role.to_string());
        }
        Self {
            values: RwLock::new(values),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        read_lock(&self.values).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        write_lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        write_lock(&self.values).remove(key);
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File-backed
// ─────────────────────────────────────────────────────────────────────────────

/// 파일 저장소
///
/// 단일 JSON 객체(`{"raulawards_token": "...", "raulawards_role": "..."}`)를
/// 파일에 보관합니다. 프로세스 재시작 후에도 세션이 유지됩니다.
/// 파일이 없거나 읽을 수 없으면 빈 저장소로 취급합니다.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl FileTokenStore {
    /// 파일에서 로드
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = load_values(&path);
        Self {
            path,
            values: RwLock::new(values),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &HashMap<String, String>) -> Result<()> {
        if values.is_empty() {
            if self.path.exists() {
                std::fs::remove_file(&self.path)?;
            }
            return Ok(());
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    fn commit(
        &self,
        current: &mut HashMap<String, String>,
        next: HashMap<String, String>,
    ) -> Result<()> {
        self.persist(&next).map_err(|e| Error::SessionStore {
            message: format!("failed to write {}: {}", self.path.display(), e),
        })?;
        *current = next;
        Ok(())
    }
}

fn load_values(path: &Path) -> HashMap<String, String> {
    if !path.exists() {
        return HashMap::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Failed to read session file {}: {}", path.display(), e);
            return HashMap::new();
        }
    };

    serde_json::from_str(&content).unwrap_or_else(|e| {
        tracing::warn!("Ignoring malformed session file {}: {}", path.display(), e);
        HashMap::new()
    })
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        read_lock(&self.values).get(key).cloned()
    }

    // 파일 쓰기에 성공한 경우에만 메모리 상태를 교체
    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = write_lock(&self.values);
        let mut next = values.clone();
        next.insert(key.to_string(), value.to_string());
        self.commit(&mut values, next)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = write_lock(&self.values);
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.commit(&mut values, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_independent_keys() {
        let store = MemoryTokenStore::new();
        assert!(store.get_token().is_none());

        store.set_token("t1").unwrap();
        store.set_token("t2").unwrap();
        store.set_role("ADMIN").unwrap();
        assert_eq!(store.get_token().as_deref(), Some("t2"));

        store.clear_token().unwrap();
        store.clear_token().unwrap();
        assert!(store.get_token().is_none());
        assert_eq!(store.get_role().as_deref(), Some("ADMIN"));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let store = FileTokenStore::open(&path);
        store.set_token("abc").unwrap();
        store.set_role("USER").unwrap();

        let reopened = FileTokenStore::open(&path);
        assert_eq!(reopened.get_token().as_deref(), Some("abc"));
        assert_eq!(reopened.get_role().as_deref(), Some("USER"));

        let raw = std::fs::read_to_string(&path).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json[TOKEN_KEY], "abc");
        assert_eq!(json[ROLE_KEY], "USER");
    }

    #[test]
    fn test_file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(&path);
        store.clear_role().unwrap();
        assert!(!path.exists());

        store.set_token("abc").unwrap();
        assert!(path.exists());
        store.clear_token().unwrap();
        assert!(!path.exists());
        assert!(FileTokenStore::open(&path).get_token().is_none());
    }

    #[test]
    fn test_file_store_malformed_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileTokenStore::open(&path);
        assert!(store.get_token().is_none());
        store.set_token("fresh").unwrap();
        assert_eq!(FileTokenStore::open(&path).get_token().as_deref(), Some("fresh"));
    }

    #[test]
    fn test_file_store_failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let store = FileTokenStore::open(blocker.join("session.json"));
        let err = store.set_token("T").unwrap_err();
        assert_eq!(err.code(), "SESSION_STORE_ERROR");
        assert!(store.get_token().is_none());
    }

    #[test]
    fn test_file_store_failed_remove_keeps_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = FileTokenStore::open(&path);
        store.set_token("abc").unwrap();
        // 파일 자리를 디렉터리로 바꿔 삭제가 실패하게 만듦
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        assert!(store.clear_token().is_err());
        assert_eq!(store.get_token().as_deref(), Some("abc"));
    }
}
