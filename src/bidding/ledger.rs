/// 입찰 원장
/// 경매 하나의 입찰 목록을 메모리에 보관한다.
/// insert 시의 상태 갱신(OUTBID/ACTIVE)은 낙관적 추정이며,
/// 서버에서 다시 조회한 목록(sync)이 항상 우선한다.
// region:    --- Imports
use super::model::{Bid, BidStatus};
use super::validator::BidValidator;
use crate::auction::{Auction, Money};
use chrono::{DateTime, Utc};
use std::cmp::{Ordering, Reverse};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, warn};

// endregion: --- Imports

// region:    --- Bid Ledger
#[derive(Debug, Clone)]
pub struct BidLedger {
    product_id: String,
    bids: HashMap<String, Bid>,
    // 최신순 정렬 인덱스
    recency: BTreeSet<(Reverse<DateTime<Utc>>, String)>,
}

impl BidLedger {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            bids: HashMap::new(),
            recency: BTreeSet::new(),
        }
    }

    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    pub fn len(&self) -> usize {
        self.bids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty()
    }

    pub fn get(&self, bid_id: &str) -> Option<&Bid> {
        self.bids.get(bid_id)
    }

    /// 입찰 추가 (같은 id 는 무시)
    pub fn insert(&mut self, mut bid: Bid) -> bool {
        if bid.product_id != self.product_id {
            warn!(
                "{:<12} --> 다른 상품의 입찰 무시: {} (원장: {})",
                "Ledger", bid.product_id, self.product_id
            );
            return false;
        }
        if self.bids.contains_key(&bid.id) {
            debug!("{:<12} --> 중복 입찰 무시 id: {}", "Ledger", bid.id);
            return false;
        }

        let previous = self
            .highest()
            .map(|top| (top.id.clone(), rank(&bid, top) == Ordering::Greater));
        let becomes_highest = previous.as_ref().map_or(true, |(_, outranks)| *outranks);

        if becomes_highest {
            if let Some((previous_id, _)) = previous {
                if let Some(prev) = self.bids.get_mut(&previous_id) {
                    prev.status = BidStatus::Outbid;
                }
            }
            bid.status = BidStatus::Active;
        } else {
            bid.status = BidStatus::Outbid;
        }

        debug!(
            "{:<12} --> 입찰 추가 id: {}, 금액: {}, 최고가 여부: {}",
            "Ledger", bid.id, bid.amount, becomes_highest
        );
        self.recency.insert((Reverse(bid.created_at), bid.id.clone()));
        self.bids.insert(bid.id.clone(), bid);
        true
    }

    /// 서버 목록으로 전체 교체 (서버 상태를 그대로 사용)
    pub fn sync(&mut self, bids: impl IntoIterator<Item = Bid>) {
        self.bids.clear();
        self.recency.clear();
        for bid in bids {
            if bid.product_id != self.product_id {
                continue;
            }
            self.recency.insert((Reverse(bid.created_at), bid.id.clone()));
            self.bids.insert(bid.id.clone(), bid);
        }
        debug!(
            "{:<12} --> 서버 입찰 목록 동기화 상품: {}, 입찰 수: {}",
            "Ledger",
            self.product_id,
            self.bids.len()
        );
    }

    /// 최고 입찰 (금액 최대, 동액이면 먼저 들어온 입찰)
    pub fn highest(&self) -> Option<&Bid> {
        self.bids.values().max_by(|a, b| rank(a, b))
    }

    pub fn highest_amount(&self) -> Option<Money> {
        self.highest().map(|b| b.amount)
    }

    /// 알려진 최고가: 원장 최고 입찰과 경매 현재가 중 큰 값
    /// 현재가가 시작가보다 높으면 원장에 없더라도 수락된 입찰이 있다.
    pub fn known_highest(&self, auction: &Auction) -> Option<Money> {
        let listed =
            (auction.current_price > auction.starting_price).then_some(auction.current_price);
        self.highest_amount().max(listed)
    }

    /// 최신순 입찰 목록 (호출할 때마다 처음부터 다시 순회)
    pub fn ordered_for_display(&self) -> impl Iterator<Item = &Bid> + '_ {
        self.recency.iter().filter_map(|(_, id)| self.bids.get(id))
    }

    pub fn minimum_next_bid(&self, auction: &Auction, validator: &BidValidator) -> Money {
        validator.minimum_next_bid(auction, self.known_highest(auction))
    }

    /// 경매 종료 반영: 최고 입찰은 WON, 나머지는 OUTBID
    pub fn close(&mut self) {
        let winner = self.highest().map(|b| b.id.clone());
        for bid in self.bids.values_mut() {
            bid.status = if Some(&bid.id) == winner.as_ref() {
                BidStatus::Won
            } else {
                BidStatus::Outbid
            };
        }
    }
}
// endregion: --- Bid Ledger

// 금액 우선, 동액이면 먼저 생성된 입찰이 우위
fn rank(bid: &Bid, other: &Bid) -> Ordering {
    bid.amount
        .cmp(&other.amount)
        .then_with(|| other.created_at.cmp(&bid.created_at))
        .then_with(|| other.id.cmp(&bid.id))
}
