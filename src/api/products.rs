// region:    --- Imports
use crate::auction::{Auction, AuctionStatus, Money};
use crate::error::ClientResult;
use crate::pipeline::{ApiRequest, RequestPipeline};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

// endregion: --- Imports

// region:    --- Models
/// 상품 목록 조회 조건
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub status: Option<AuctionStatus>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl ProductQuery {
    pub fn active() -> Self {
        Self {
            status: Some(AuctionStatus::Active),
            ..Default::default()
        }
    }

    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(category) = &self.category {
            pairs.push(("category".to_string(), category.clone()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size".to_string(), size.to_string()));
        }
        pairs
    }
}

/// 상품 등록 요청
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub starting_price: Money,
    pub end_time: DateTime<Utc>,
    pub images: Vec<String>,
}

/// 상품 수정 요청 (값이 있는 필드만 전송)
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AuctionStatus>,
}
// endregion: --- Models

// region:    --- Products Api
pub struct ProductsApi<'a> {
    pipeline: &'a RequestPipeline,
}

impl<'a> ProductsApi<'a> {
    pub fn new(pipeline: &'a RequestPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn list(&self, query: &ProductQuery) -> ClientResult<Vec<Auction>> {
        info!("{:<12} --> 상품 목록 조회: {:?}", "Products", query);
        let request = ApiRequest::get("/products").query(query.to_pairs());
        self.pipeline.execute_as(request).await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Auction> {
        info!("{:<12} --> 상품 조회 id: {}", "Products", id);
        self.pipeline
            .execute_as(ApiRequest::get(format!("/products/{}", id)))
            .await
    }

    pub async fn create(&self, product: &NewProduct) -> ClientResult<Auction> {
        info!("{:<12} --> 상품 등록: {}", "Products", product.title);
        let request = ApiRequest::post("/products").json(product)?;
        self.pipeline.execute_as(request).await
    }

    pub async fn update(&self, id: &str, update: &ProductUpdate) -> ClientResult<Auction> {
        info!("{:<12} --> 상품 수정 id: {}", "Products", id);
        let request = ApiRequest::put(format!("/products/{}", id)).json(update)?;
        self.pipeline.execute_as(request).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        info!("{:<12} --> 상품 삭제 id: {}", "Products", id);
        self.pipeline
            .execute(ApiRequest::delete(format!("/products/{}", id)))
            .await?;
        Ok(())
    }
}
// endregion: --- Products Api
