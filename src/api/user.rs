// region:    --- Imports
use crate::auction::Money;
use crate::error::ClientResult;
use crate::pipeline::{ApiRequest, RequestPipeline};
use crate::session::Identity;
use serde::{Deserialize, Serialize};
use tracing::info;

// endregion: --- Imports

// region:    --- Models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserBidStatus {
    Active,
    Won,
    Outbid,
    Ended,
}

/// 내 입찰 목록 항목
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBidItem {
    pub product_id: String,
    pub product_title: String,
    #[serde(default)]
    pub product_image: Option<String>,
    pub my_bid_amount: Money,
    pub current_highest_bid: Money,
    pub is_my_bid_winning: bool,
    pub bid_status: UserBidStatus,
    #[serde(default)]
    pub time_remaining: Option<String>,
    #[serde(default)]
    pub total_bids: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub full_name: String,
    pub role: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserProfile {
    pub fn identity(&self) -> Identity {
        Identity {
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            role: self.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
// endregion: --- Models

// region:    --- User Api
pub struct UserApi<'a> {
    pipeline: &'a RequestPipeline,
}

impl<'a> UserApi<'a> {
    pub fn new(pipeline: &'a RequestPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn my_bids(&self) -> ClientResult<Vec<UserBidItem>> {
        info!("{:<12} --> 내 입찰 목록 조회", "User");
        self.pipeline.execute_as(ApiRequest::get("/user/bids")).await
    }

    /// 내 정보 조회 (세션의 사용자 정보도 갱신)
    pub async fn me(&self) -> ClientResult<UserProfile> {
        info!("{:<12} --> 내 정보 조회", "User");
        let profile: UserProfile = self.pipeline.execute_as(ApiRequest::get("/user/me")).await?;
        self.pipeline.session().update_identity(profile.identity());
        Ok(profile)
    }

    pub async fn update_me(&self, update: &ProfileUpdate) -> ClientResult<UserProfile> {
        info!("{:<12} --> 내 정보 수정", "User");
        let request = ApiRequest::put("/user/me").json(update)?;
        let profile: UserProfile = self.pipeline.execute_as(request).await?;
        self.pipeline.session().update_identity(profile.identity());
        Ok(profile)
    }
}
// endregion: --- User Api
