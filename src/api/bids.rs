use crate::auction::Money;
use crate::bidding::{Bid, PlaceBidRequest};
use crate::error::ClientResult;
use crate::pipeline::{ApiRequest, RequestPipeline};
use tracing::info;

pub struct BidsApi<'a> {
    pipeline: &'a RequestPipeline,
}

impl<'a> BidsApi<'a> {
    pub fn new(pipeline: &'a RequestPipeline) -> Self {
        Self { pipeline }
    }

    /// 상품 입찰 이력 조회
    pub async fn for_product(&self, product_id: &str) -> ClientResult<Vec<Bid>> {
        info!("{:<12} --> 상품 입찰 이력 조회 id: {}", "Bids", product_id);
        self.pipeline
            .execute_as(ApiRequest::get(format!("/bids/product/{}", product_id)))
            .await
    }

    /// 입찰 (검증은 호출 전에 끝나 있어야 한다)
    pub async fn place(&self, product_id: &str, amount: Money) -> ClientResult<Bid> {
        info!(
            "{:<12} --> 입찰 요청 id: {}, 금액: {}",
            "Bids", product_id, amount
        );
        let request = ApiRequest::post("/bids").json(&PlaceBidRequest {
            product_id: product_id.to_string(),
            amount,
        })?;
        self.pipeline.execute_as(request).await
    }
}
