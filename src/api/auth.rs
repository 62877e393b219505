// region:    --- Imports
use crate::error::ClientResult;
use crate::pipeline::{ApiRequest, RequestPipeline};
use crate::session::{Identity, TokenPair};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Models
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// 로그인/회원가입 응답
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl AuthResponse {
    pub fn into_parts(self) -> (TokenPair, Identity) {
        (
            TokenPair {
                access_token: self.access_token,
                refresh_token: self.refresh_token,
            },
            Identity {
                email: self.email,
                full_name: self.full_name,
                role: self.role,
            },
        )
    }
}
// endregion: --- Models

// region:    --- Auth Api
pub struct AuthApi<'a> {
    pipeline: &'a RequestPipeline,
}

impl<'a> AuthApi<'a> {
    pub fn new(pipeline: &'a RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// 1. 로그인
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<Identity> {
        info!("{:<12} --> 로그인 요청: {}", "Auth", email);
        let request = ApiRequest::post("/auth/login").json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        let response: AuthResponse = self.pipeline.execute_public_as(request).await?;
        Ok(self.establish(response))
    }

    /// 2. 회원가입
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
        phone: Option<&str>,
    ) -> ClientResult<Identity> {
        info!("{:<12} --> 회원가입 요청: {}", "Auth", email);
        let request = ApiRequest::post("/auth/register").json(&RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            full_name: full_name.to_string(),
            phone: phone.map(str::to_string),
        })?;
        let response: AuthResponse = self.pipeline.execute_public_as(request).await?;
        Ok(self.establish(response))
    }

    /// 3. 로그아웃
    /// 서버 호출 결과와 관계없이 로컬 세션은 삭제한다.
    pub async fn logout(&self) -> ClientResult<()> {
        let session = self.pipeline.session();
        if let Some(refresh_token) = session.refresh_token() {
            let request = ApiRequest::post("/auth/logout")
                .json(&serde_json::json!({ "refreshToken": refresh_token }))?;
            if let Err(e) = self.pipeline.execute(request).await {
                warn!("{:<12} --> 서버 로그아웃 실패 (무시): {}", "Auth", e);
            }
        }
        session.clear();
        info!("{:<12} --> 로그아웃 완료", "Auth");
        Ok(())
    }

    fn establish(&self, response: AuthResponse) -> Identity {
        let (tokens, identity) = response.into_parts();
        self.pipeline.session().store(tokens, identity.clone());
        identity
    }
}
// endregion: --- Auth Api
