/// 요청 파이프라인
/// 1. 세션의 액세스 토큰을 Bearer 헤더로 첨부
/// 2. 401 응답 시 리프레시 토큰으로 한 번만 갱신 (동시 호출자는 같은 갱신 결과를 공유)
/// 3. 갱신 성공 시 원 요청을 정확히 한 번 재시도
/// 4. 최종 응답을 성공 데이터 또는 오류로 분류
// region:    --- Imports
use crate::error::{ClientError, ClientResult};
use crate::session::{SessionStore, TokenPair};
use crate::transport::{Method, OutboundRequest, RawResponse, RequestBody, Transport, UploadFile};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

// endregion: --- Imports

pub const REFRESH_PATH: &str = "/auth/refresh";

// region:    --- Envelope
/// 모든 JSON 응답의 공통 래퍼
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}
// endregion: --- Envelope

// region:    --- Api Request
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Decode(format!("요청 직렬화 실패: {}", e)))?;
        self.body = RequestBody::Json(value);
        Ok(self)
    }

    pub fn multipart(mut self, field: impl Into<String>, file: UploadFile) -> Self {
        self.body = RequestBody::Multipart {
            field: field.into(),
            file,
        };
        self
    }

    pub fn query(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query = pairs;
        self
    }

    fn outbound(&self, bearer: Option<&str>) -> OutboundRequest {
        let mut headers = Vec::with_capacity(2);
        if let Some(token) = bearer {
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        // multipart 는 전송 계층이 boundary 를 포함해 직접 설정
        if !self.body.is_multipart() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }
        OutboundRequest {
            method: self.method.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            headers,
            body: self.body.clone(),
        }
    }
}
// endregion: --- Api Request

// region:    --- Request Pipeline
pub struct RequestPipeline {
    transport: Arc<dyn Transport>,
    session: Arc<SessionStore>,
    // 토큰 갱신 직렬화 (한 번에 하나의 갱신만 진행)
    refresh_gate: Mutex<()>,
}

impl RequestPipeline {
    pub fn new(transport: Arc<dyn Transport>, session: Arc<SessionStore>) -> Self {
        Self {
            transport,
            session,
            refresh_gate: Mutex::new(()),
        }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// 인증 요청 실행
    pub async fn execute(&self, request: ApiRequest) -> ClientResult<Value> {
        info!("{:<12} --> {} {}", "Pipeline", request.method, request.path);
        let sent_token = self.session.access_token();
        let response = self.send(&request, sent_token.as_deref()).await?;

        if response.status != 401 {
            return classify(response);
        }

        // 토큰 없이 보낸 요청의 401 은 일반 API 오류
        let Some(sent_token) = sent_token else {
            return classify(response);
        };

        warn!(
            "{:<12} --> 401 수신, 토큰 갱신 필요: {} {}",
            "Pipeline", request.method, request.path
        );
        let fresh_token = self.recover(&sent_token).await?;

        debug!(
            "{:<12} --> 갱신된 토큰으로 재시도: {} {}",
            "Pipeline", request.method, request.path
        );
        let retried = self.send(&request, Some(&fresh_token)).await?;
        classify(retried)
    }

    pub async fn execute_as<T: DeserializeOwned>(&self, request: ApiRequest) -> ClientResult<T> {
        decode(self.execute(request).await?)
    }

    /// 인증 없이 실행 (로그인, 회원가입, 토큰 갱신)
    pub async fn execute_public(&self, request: ApiRequest) -> ClientResult<Value> {
        info!("{:<12} --> {} {} (public)", "Pipeline", request.method, request.path);
        let response = self.send(&request, None).await?;
        classify(response)
    }

    pub async fn execute_public_as<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ClientResult<T> {
        decode(self.execute_public(request).await?)
    }

    async fn send(&self, request: &ApiRequest, bearer: Option<&str>) -> ClientResult<RawResponse> {
        Ok(self.transport.send(request.outbound(bearer)).await?)
    }

    /// 만료된 토큰 복구
    /// 갱신 게이트를 잡은 뒤 세션을 다시 확인하여, 다른 호출자가 이미
    /// 갱신을 마쳤다면 그 결과를 그대로 사용한다.
    async fn recover(&self, stale_token: &str) -> ClientResult<String> {
        let _gate = self.refresh_gate.lock().await;

        let refresh_token = match self.session.read() {
            None => {
                debug!("{:<12} --> 세션 없음 (이전 갱신 실패 또는 로그아웃)", "Pipeline");
                return Err(ClientError::SessionExpired);
            }
            Some(current) if current.tokens.access_token != stale_token => {
                debug!("{:<12} --> 이미 갱신된 토큰 사용", "Pipeline");
                return Ok(current.tokens.access_token);
            }
            Some(current) => current.tokens.refresh_token,
        };

        if refresh_token.is_empty() {
            warn!("{:<12} --> 리프레시 토큰 없음, 세션 삭제", "Pipeline");
            self.session.clear();
            return Err(ClientError::SessionExpired);
        }

        info!("{:<12} --> 토큰 갱신 요청", "Pipeline");
        let request = ApiRequest::post(REFRESH_PATH)
            .json(&serde_json::json!({ "refreshToken": &refresh_token }))?;

        match self.execute_public_as::<TokenPair>(request).await {
            Ok(tokens) => {
                let access_token = tokens.access_token.clone();
                if self.session.rotate(&refresh_token, tokens) {
                    info!("{:<12} --> 토큰 갱신 성공", "Pipeline");
                    return Ok(access_token);
                }
                // 갱신 중 재로그인되었으면 새 세션의 토큰으로 재시도
                match self.session.access_token() {
                    Some(current) => {
                        warn!("{:<12} --> 갱신 중 세션이 교체됨, 현재 토큰 사용", "Pipeline");
                        Ok(current)
                    }
                    None => {
                        warn!("{:<12} --> 갱신 중 세션이 삭제됨", "Pipeline");
                        Err(ClientError::SessionExpired)
                    }
                }
            }
            Err(e) => {
                warn!("{:<12} --> 토큰 갱신 실패, 세션 삭제: {}", "Pipeline", e);
                self.session.clear();
                Err(ClientError::SessionExpired)
            }
        }
    }
}
// endregion: --- Request Pipeline

// region:    --- Response Classification
/// 응답 분류
/// 204 -> 빈 성공, 그 외 2xx -> envelope.data, 나머지 -> ApiError
fn classify(response: RawResponse) -> ClientResult<Value> {
    match response.status {
        204 => Ok(Value::Null),
        200..=299 => {
            if response.body.is_empty() {
                return Ok(Value::Null);
            }
            let envelope: Envelope<Value> = serde_json::from_slice(&response.body)
                .map_err(|e| ClientError::Decode(format!("응답 envelope 해석 실패: {}", e)))?;
            Ok(envelope.data.unwrap_or(Value::Null))
        }
        status => {
            let message = serde_json::from_slice::<Envelope<Value>>(&response.body)
                .ok()
                .map(|envelope| envelope.message)
                .filter(|message| !message.trim().is_empty())
                .unwrap_or_else(|| format!("요청 처리에 실패했습니다 (HTTP {})", status));
            debug!("{:<12} --> API 오류 {}: {}", "Pipeline", status, message);
            Err(ClientError::Api { status, message })
        }
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| ClientError::Decode(e.to_string()))
}
// endregion: --- Response Classification
