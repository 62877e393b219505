/// 경매 클라이언트
/// 세션, 요청 파이프라인, 입찰 검증, 초안 캐시를 묶어 호출자에게 제공한다.
/// 1. 입찰 (로컬 검증 후 전송)
/// 2. 상품 및 입찰 이력 새로고침
/// 3. 초안 등록
// region:    --- Imports
use crate::api::{AuthApi, BidsApi, ProductsApi, UploadApi, UserApi};
use crate::auction::{Auction, Money};
use crate::bidding::{Bid, BidLedger, BidValidator};
use crate::config::ClientConfig;
use crate::drafts::{DraftCache, DraftId, ListingDraft};
use crate::error::{ClientError, ClientResult};
use crate::pipeline::RequestPipeline;
use crate::session::SessionStore;
use crate::transport::{ReqwestTransport, Transport};
use std::sync::Arc;
use tracing::{info, warn};

// endregion: --- Imports

// region:    --- Auction Client
pub struct AuctionClient {
    pipeline: RequestPipeline,
    validator: BidValidator,
    drafts: DraftCache,
}

impl AuctionClient {
    /// reqwest 전송 계층으로 클라이언트 생성
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Self::with_transport(config, transport, Arc::new(SessionStore::new()))
    }

    pub fn with_transport(
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        session: Arc<SessionStore>,
    ) -> ClientResult<Self> {
        Ok(Self {
            pipeline: RequestPipeline::new(transport, session),
            validator: BidValidator::new(config.bid_increment),
            drafts: DraftCache::new(config.draft_ttl)?,
        })
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        self.pipeline.session()
    }

    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    pub fn validator(&self) -> &BidValidator {
        &self.validator
    }

    pub fn drafts(&self) -> &DraftCache {
        &self.drafts
    }

    pub fn is_authenticated(&self) -> bool {
        self.session().is_authenticated()
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(&self.pipeline)
    }

    pub fn products(&self) -> ProductsApi<'_> {
        ProductsApi::new(&self.pipeline)
    }

    pub fn bids(&self) -> BidsApi<'_> {
        BidsApi::new(&self.pipeline)
    }

    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(&self.pipeline)
    }

    pub fn upload(&self) -> UploadApi<'_> {
        UploadApi::new(&self.pipeline)
    }

    /// 1. 입찰
    /// 로컬 검증에 실패하면 네트워크 요청 없이 ValidationError 를 반환한다.
    pub async fn place_bid(
        &self,
        auction: &mut Auction,
        ledger: &mut BidLedger,
        amount: Money,
    ) -> ClientResult<Bid> {
        let highest = ledger.known_highest(auction);
        self.validator
            .validate(auction, highest, amount)
            .into_result()
            .map_err(|reason| {
                warn!(
                    "{:<12} --> 입찰 로컬 검증 실패 id: {}: {}",
                    "Client", auction.id, reason
                );
                ClientError::Validation(reason)
            })?;

        let bid = self.bids().place(&auction.id, amount).await?;
        info!(
            "{:<12} --> 입찰 성공 id: {}, 금액: {}",
            "Client", auction.id, bid.amount
        );
        ledger.insert(bid.clone());
        auction.apply_accepted_bid(bid.amount);
        Ok(bid)
    }

    /// 다음 최소 입찰가
    pub fn minimum_next_bid(&self, auction: &Auction, ledger: &BidLedger) -> Money {
        ledger.minimum_next_bid(auction, &self.validator)
    }

    /// 2. 상품 및 입찰 이력 새로고침 (서버 상태로 원장을 덮어쓴다)
    pub async fn refresh_listing(
        &self,
        product_id: &str,
        ledger: &mut BidLedger,
    ) -> ClientResult<Auction> {
        let auction = self.products().get(product_id).await?;
        let bids = self.bids().for_product(product_id).await?;
        ledger.sync(bids);
        Ok(auction)
    }

    /// 3. 초안 등록
    /// 초안을 캐시에서 꺼낸 뒤 파일을 하나씩 업로드하고 상품을 등록한다.
    /// 실패해도 초안은 캐시로 돌아가지 않는다.
    pub async fn publish_draft(&self, id: DraftId) -> ClientResult<Auction> {
        let draft: ListingDraft = self
            .drafts
            .take(id)
            .ok_or_else(|| ClientError::DraftNotFound(id.to_string()))?;
        info!(
            "{:<12} --> 초안 등록 id: {}, 파일 {}개",
            "Client",
            id,
            draft.pending_files.len()
        );
        let urls = self.upload().upload_all(&draft.pending_files).await?;
        let product = draft.into_new_product(urls);
        self.products().create(&product).await
    }
}
// endregion: --- Auction Client
