/// 클라이언트 설정
/// 환경 변수에서 읽고, 없으면 기본값을 사용한다.
// region:    --- Imports
use crate::auction::Money;
use crate::drafts::validate_ttl;
use crate::error::{ClientError, ClientResult};
use std::time::Duration;

// endregion: --- Imports

pub const DEFAULT_API_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BID_INCREMENT: Money = Money::from_minor(1);
pub const DEFAULT_DRAFT_TTL_SECS: u64 = 30 * 60;

// region:    --- Client Config
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    pub bid_increment: Money,
    pub draft_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            bid_increment: DEFAULT_BID_INCREMENT,
            draft_ttl: Duration::from_secs(DEFAULT_DRAFT_TTL_SECS),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// 환경 변수로부터 설정 생성
    /// AUCTION_API_URL, AUCTION_REQUEST_TIMEOUT_SECS, AUCTION_BID_INCREMENT, AUCTION_DRAFT_TTL_SECS
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ClientResult<Self> {
        let defaults = Self::default();

        let base_url = lookup("AUCTION_API_URL").unwrap_or(defaults.base_url);

        let request_timeout = match lookup("AUCTION_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_secs("AUCTION_REQUEST_TIMEOUT_SECS", &raw)?),
            None => defaults.request_timeout,
        };

        let bid_increment = match lookup("AUCTION_BID_INCREMENT") {
            Some(raw) => {
                let increment: Money = raw
                    .parse()
                    .map_err(|e| ClientError::Config(format!("AUCTION_BID_INCREMENT: {}", e)))?;
                if !increment.is_positive() {
                    return Err(ClientError::Config(
                        "AUCTION_BID_INCREMENT 는 0보다 커야 합니다".to_string(),
                    ));
                }
                increment
            }
            None => defaults.bid_increment,
        };

        let draft_ttl = match lookup("AUCTION_DRAFT_TTL_SECS") {
            Some(raw) => {
                let ttl = Duration::from_secs(parse_secs("AUCTION_DRAFT_TTL_SECS", &raw)?);
                validate_ttl(ttl)?;
                ttl
            }
            None => defaults.draft_ttl,
        };

        Ok(Self {
            base_url,
            request_timeout,
            bid_increment,
            draft_ttl,
        })
    }
}
// endregion: --- Client Config

fn parse_secs(key: &str, raw: &str) -> ClientResult<u64> {
    raw.trim()
        .parse()
        .map_err(|_| ClientError::Config(format!("{}: 숫자가 아닙니다 ({})", key, raw)))
}
