/// 상품 등록 초안
/// 등록 화면과 미리보기 화면 사이에서 초안을 id 로 주고받는다.
/// 초안은 꺼내면(take) 사라지고, 유효 시간이 지나면 정리된다.
// region:    --- Imports
use crate::api::NewProduct;
use crate::auction::Money;
use crate::error::{ClientError, ClientResult};
use crate::transport::UploadFile;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::fmt;
use std::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

// endregion: --- Imports

/// 초안 유효 시간 상한 (30일)
pub const MAX_DRAFT_TTL_SECS: u64 = 30 * 24 * 60 * 60;

// region:    --- Draft Model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DraftId(Uuid);

impl DraftId {
    fn new() -> Self {
        DraftId(Uuid::new_v4())
    }
}

impl fmt::Display for DraftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 상품 등록 초안 (업로드 전 파일 포함)
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDraft {
    pub title: String,
    pub description: String,
    pub category: Option<String>,
    pub starting_price: Money,
    pub end_time: DateTime<Utc>,
    pub pending_files: Vec<UploadFile>,
}

impl ListingDraft {
    /// 업로드된 이미지 URL 로 등록 요청 생성
    pub fn into_new_product(self, images: Vec<String>) -> NewProduct {
        NewProduct {
            title: self.title,
            description: self.description,
            category: self.category,
            starting_price: self.starting_price,
            end_time: self.end_time,
            images,
        }
    }
}
// endregion: --- Draft Model

// region:    --- Draft Cache
struct Entry {
    draft: ListingDraft,
    expires_at: DateTime<Utc>,
}

pub struct DraftCache {
    ttl: Duration,
    entries: Mutex<HashMap<DraftId, Entry>>,
}

impl DraftCache {
    /// 유효 시간은 0초 초과, MAX_DRAFT_TTL_SECS 이하
    pub fn new(ttl: std::time::Duration) -> ClientResult<Self> {
        Ok(Self {
            ttl: validate_ttl(ttl)?,
            entries: Mutex::new(HashMap::new()),
        })
    }

    pub fn stash(&self, draft: ListingDraft) -> DraftId {
        self.stash_at(draft, Utc::now())
    }

    pub fn stash_at(&self, draft: ListingDraft, now: DateTime<Utc>) -> DraftId {
        let id = DraftId::new();
        info!("{:<12} --> 초안 저장 id: {}, 제목: {}", "Draft", id, draft.title);
        self.lock().insert(
            id,
            Entry {
                draft,
                expires_at: now + self.ttl,
            },
        );
        id
    }

    /// 초안 조회 (만료된 초안은 없는 것으로 본다)
    pub fn get(&self, id: DraftId) -> Option<ListingDraft> {
        self.get_at(id, Utc::now())
    }

    pub fn get_at(&self, id: DraftId, now: DateTime<Utc>) -> Option<ListingDraft> {
        self.lock()
            .get(&id)
            .filter(|entry| entry.expires_at > now)
            .map(|entry| entry.draft.clone())
    }

    /// 초안 꺼내기 (캐시에서 제거)
    pub fn take(&self, id: DraftId) -> Option<ListingDraft> {
        self.take_at(id, Utc::now())
    }

    pub fn take_at(&self, id: DraftId, now: DateTime<Utc>) -> Option<ListingDraft> {
        let entry = self.lock().remove(&id)?;
        if entry.expires_at <= now {
            debug!("{:<12} --> 만료된 초안 id: {}", "Draft", id);
            return None;
        }
        Some(entry.draft)
    }

    pub fn discard(&self, id: DraftId) -> bool {
        let removed = self.lock().remove(&id).is_some();
        if removed {
            info!("{:<12} --> 초안 폐기 id: {}", "Draft", id);
        }
        removed
    }

    /// 만료된 초안 정리, 정리된 개수 반환
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|_, entry| entry.expires_at > now);
        let purged = before - entries.len();
        if purged > 0 {
            debug!("{:<12} --> 만료된 초안 {}건 정리", "Draft", purged);
        }
        purged
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<DraftId, Entry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
// endregion: --- Draft Cache

pub(crate) fn validate_ttl(ttl: std::time::Duration) -> ClientResult<Duration> {
    if ttl.is_zero() || ttl.as_secs() > MAX_DRAFT_TTL_SECS {
        return Err(ClientError::Config(format!(
            "초안 유효 시간은 1초 이상 {}초 이하여야 합니다 ({}초)",
            MAX_DRAFT_TTL_SECS,
            ttl.as_secs()
        )));
    }
    Duration::from_std(ttl).map_err(|e| ClientError::Config(format!("초안 유효 시간: {}", e)))
}
