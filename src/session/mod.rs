/// 세션 저장소
/// 현재 액세스/리프레시 토큰 쌍과 사용자 정보를 보관한다.
/// 네트워크를 알지 못하며, 만료 여부도 직접 판단하지 않는다.
// region:    --- Imports
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

// endregion: --- Imports

// region:    --- Session Model
/// 토큰 쌍
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

// 토큰 값은 로그에 남기지 않는다
impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"***")
            .field("refresh_token", &"***")
            .finish()
    }
}

/// 사용자 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub tokens: TokenPair,
    pub identity: Identity,
}
// endregion: --- Session Model

// region:    --- Session Store
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 세션 전체 교체
    pub fn store(&self, tokens: TokenPair, identity: Identity) {
        info!("{:<12} --> 세션 저장: {}", "Session", identity.email);
        *self.write() = Some(Session { tokens, identity });
    }

    pub fn read(&self) -> Option<Session> {
        self.read_guard().clone()
    }

    pub fn clear(&self) {
        if self.write().take().is_some() {
            info!("{:<12} --> 세션 삭제", "Session");
        }
    }

    /// 토큰 보유 여부 (실제 유효성은 서버 응답으로만 판단)
    pub fn is_authenticated(&self) -> bool {
        self.read_guard()
            .as_ref()
            .is_some_and(|s| !s.tokens.access_token.is_empty())
    }

    pub fn access_token(&self) -> Option<String> {
        self.read_guard()
            .as_ref()
            .map(|s| s.tokens.access_token.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.read_guard()
            .as_ref()
            .map(|s| s.tokens.refresh_token.clone())
    }

    pub fn identity(&self) -> Option<Identity> {
        self.read_guard().as_ref().map(|s| s.identity.clone())
    }

    /// 갱신된 토큰 쌍 반영 (두 토큰을 한 번에 교체, 사용자 정보 유지)
    /// 교환에 쓴 리프레시 토큰을 아직 보유하고 있을 때만 반영한다.
    /// 그 사이 세션이 삭제되거나 재로그인으로 교체되었으면 false 를 반환
    pub fn rotate(&self, exchanged_refresh: &str, tokens: TokenPair) -> bool {
        match self.write().as_mut() {
            Some(session) if session.tokens.refresh_token == exchanged_refresh => {
                session.tokens = tokens;
                true
            }
            _ => false,
        }
    }

    /// 사용자 정보만 교체 (토큰 유지)
    pub fn update_identity(&self, identity: Identity) -> bool {
        match self.write().as_mut() {
            Some(session) => {
                session.identity = identity;
                true
            }
            None => false,
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
// endregion: --- Session Store
