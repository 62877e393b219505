// region:    --- Imports
use auction_client::api::ProductQuery;
use auction_client::auction::Money;
use auction_client::bidding::BidLedger;
use auction_client::{AuctionClient, ClientConfig};
use tracing::{error, info, warn};

// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 로드 (없어도 무시)
    dotenvy::dotenv().ok();

    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = ClientConfig::from_env()?;
    info!("{:<12} --> API 서버: {}", "Main", config.base_url);
    let client = AuctionClient::new(&config)?;

    // 로그인 (계정 정보가 있을 때만)
    if let (Ok(email), Ok(password)) = (
        std::env::var("AUCTION_EMAIL"),
        std::env::var("AUCTION_PASSWORD"),
    ) {
        match client.auth().login(&email, &password).await {
            Ok(identity) => info!(
                "{:<12} --> 로그인 성공: {} ({})",
                "Main", identity.full_name, identity.role
            ),
            Err(e) => {
                error!("{:<12} --> 로그인 실패: {}", "Main", e);
                return Err(e.into());
            }
        }
    }

    // 진행 중인 경매 목록
    let auctions = client.products().list(&ProductQuery::active()).await?;
    info!("{:<12} --> 진행 중인 경매 {}건", "Main", auctions.len());
    for auction in &auctions {
        let mut ledger = BidLedger::new(auction.id.clone());
        ledger.sync(client.bids().for_product(&auction.id).await?);
        info!(
            "{:<12} --> [{}] {} | 상태: {} | 현재가: {} | 최소 입찰가: {}",
            "Main",
            auction.id,
            auction.title,
            auction.effective_status(),
            auction.current_price,
            client.minimum_next_bid(auction, &ledger)
        );
    }

    // 입찰 (상품과 금액이 지정된 경우)
    if let (Ok(product_id), Ok(raw_amount)) = (
        std::env::var("AUCTION_BID_PRODUCT"),
        std::env::var("AUCTION_BID_AMOUNT"),
    ) {
        let amount: Money = raw_amount.parse()?;
        let mut ledger = BidLedger::new(product_id.clone());
        let mut auction = client.refresh_listing(&product_id, &mut ledger).await?;
        match client.place_bid(&mut auction, &mut ledger, amount).await {
            Ok(bid) => info!(
                "{:<12} --> 입찰 완료 id: {}, 금액: {}",
                "Main", bid.id, bid.amount
            ),
            Err(e) if e.requires_login() => {
                warn!("{:<12} --> 세션 만료, 다시 로그인 필요", "Main");
                return Err(e.into());
            }
            Err(e) => {
                error!("{:<12} --> 입찰 실패: {}", "Main", e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
// endregion: --- Main
