/// 클라이언트 오류 분류
/// 1. 입찰 검증 실패 (로컬, 네트워크 요청 없음)
/// 2. 네트워크 오류 (응답 없음)
/// 3. API 오류 (서버가 요청을 거부)
/// 4. 세션 만료 (토큰 갱신 실패)
// region:    --- Imports
use crate::bidding::validator::BidRejection;

// endregion: --- Imports

// region:    --- Client Error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    #[error("입찰 검증 실패: {0}")]
    Validation(BidRejection),

    #[error("네트워크 오류: {0}")]
    Network(String),

    #[error("API 오류 ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("세션이 만료되었습니다. 다시 로그인해 주세요.")]
    SessionExpired,

    #[error("응답 해석 실패: {0}")]
    Decode(String),

    #[error("초안을 찾을 수 없습니다: {0}")]
    DraftNotFound(String),

    #[error("설정 오류: {0}")]
    Config(String),
}

impl ClientError {
    /// 재인증이 필요한 오류인지 확인
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::SessionExpired)
    }
}

impl From<BidRejection> for ClientError {
    fn from(reason: BidRejection) -> Self {
        ClientError::Validation(reason)
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
// endregion: --- Client Error
