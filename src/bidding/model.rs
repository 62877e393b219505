use crate::auction::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// 입찰 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BidStatus {
    Active,
    Outbid,
    Won,
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: String,
    pub product_id: String,
    pub bidder_id: String,
    #[serde(default)]
    pub bidder_name: String,
    pub amount: Money,
    pub status: BidStatus,
    pub created_at: DateTime<Utc>,
}

// 입찰 요청
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceBidRequest {
    pub product_id: String,
    pub amount: Money,
}
