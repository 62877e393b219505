/// 입찰 검증
/// 1. 경매의 유효 상태가 ACTIVE 가 아니면 거절
/// 2. 입찰 금액이 하한가(최고 입찰가 또는 시작가) 이하이면 거절
// region:    --- Imports
use crate::auction::{Auction, AuctionStatus, Money};
use chrono::{DateTime, Utc};
use std::fmt;
use tracing::debug;

// endregion: --- Imports

// region:    --- Verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidRejection {
    AuctionNotActive(AuctionStatus),
    BelowFloor { floor: Money, proposed: Money },
}

impl fmt::Display for BidRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidRejection::AuctionNotActive(status) => {
                write!(f, "진행 중인 경매가 아닙니다 ({})", status)
            }
            BidRejection::BelowFloor { floor, proposed } => write!(
                f,
                "입찰 금액({})은 현재 가격({})보다 높아야 합니다",
                proposed, floor
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidVerdict {
    Accept,
    Reject(BidRejection),
}

impl BidVerdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, BidVerdict::Accept)
    }

    pub fn into_result(self) -> Result<(), BidRejection> {
        match self {
            BidVerdict::Accept => Ok(()),
            BidVerdict::Reject(reason) => Err(reason),
        }
    }
}
// endregion: --- Verdict

// region:    --- Bid Validator
#[derive(Debug, Clone, Copy)]
pub struct BidValidator {
    increment: Money,
}

impl Default for BidValidator {
    fn default() -> Self {
        Self::new(Money::from_minor(1))
    }
}

impl BidValidator {
    pub fn new(increment: Money) -> Self {
        Self { increment }
    }

    pub fn increment(&self) -> Money {
        self.increment
    }

    /// 입찰 하한가: 최고 입찰가가 없으면 시작가
    pub fn floor(auction: &Auction, highest: Option<Money>) -> Money {
        highest.unwrap_or(auction.starting_price)
    }

    pub fn validate(&self, auction: &Auction, highest: Option<Money>, proposed: Money) -> BidVerdict {
        self.validate_at(auction, highest, proposed, Utc::now())
    }

    pub fn validate_at(
        &self,
        auction: &Auction,
        highest: Option<Money>,
        proposed: Money,
        now: DateTime<Utc>,
    ) -> BidVerdict {
        let status = auction.effective_status_at(now);
        if status != AuctionStatus::Active {
            debug!(
                "{:<12} --> 입찰 거절 id: {}, 경매 상태: {}",
                "Validator", auction.id, status
            );
            return BidVerdict::Reject(BidRejection::AuctionNotActive(status));
        }

        let floor = Self::floor(auction, highest);
        if proposed <= floor {
            debug!(
                "{:<12} --> 입찰 거절 id: {}, 금액: {} <= 하한가: {}",
                "Validator", auction.id, proposed, floor
            );
            return BidVerdict::Reject(BidRejection::BelowFloor { floor, proposed });
        }

        BidVerdict::Accept
    }

    /// 다음 최소 입찰가 (UI 기본값 용도)
    pub fn minimum_next_bid(&self, auction: &Auction, highest: Option<Money>) -> Money {
        Self::floor(auction, highest) + self.increment
    }
}
// endregion: --- Bid Validator
