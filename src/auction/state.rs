/// 경매 상태 머신
/// 종료(CLOSED)는 저장된 상태가 아니라 조회 시점의 시각으로 판단한다.
/// CLOSED, CANCELLED 는 종료 상태이며 다시 ACTIVE 로 돌아가지 않는다.
// region:    --- Imports
use super::model::{Auction, AuctionStatus, Money};
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

// endregion: --- Imports

// region:    --- Transition Error
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("이미 종료된 경매입니다: {0}")]
    Terminal(AuctionStatus),
}
// endregion: --- Transition Error

// region:    --- State Machine
impl Auction {
    /// 유효 상태 계산
    pub fn effective_status_at(&self, now: DateTime<Utc>) -> AuctionStatus {
        match self.status {
            AuctionStatus::Active if now < self.end_time => AuctionStatus::Active,
            AuctionStatus::Active => AuctionStatus::Closed,
            terminal => terminal,
        }
    }

    pub fn effective_status(&self) -> AuctionStatus {
        self.effective_status_at(Utc::now())
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.effective_status_at(now) == AuctionStatus::Active
    }

    /// 남은 시간 (진행 중이 아니면 None)
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.is_open_at(now).then(|| self.end_time - now)
    }

    /// 종료 시각이 지난 경매의 저장 상태를 CLOSED 로 확정
    pub fn settle_at(&mut self, now: DateTime<Utc>) -> AuctionStatus {
        let effective = self.effective_status_at(now);
        if effective != self.status {
            info!(
                "{:<12} --> 경매 종료 확정 id: {} ({} -> {})",
                "Auction", self.id, self.status, effective
            );
            self.status = effective;
        }
        effective
    }

    /// 판매자 취소 (ACTIVE -> CANCELLED)
    pub fn cancel_at(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.effective_status_at(now) {
            AuctionStatus::Active => {
                info!("{:<12} --> 경매 취소 id: {}", "Auction", self.id);
                self.status = AuctionStatus::Cancelled;
                Ok(())
            }
            terminal => Err(TransitionError::Terminal(terminal)),
        }
    }

    /// 수락된 입찰 반영 (현재가보다 높을 때만)
    pub fn apply_accepted_bid(&mut self, amount: Money) -> bool {
        if amount <= self.current_price {
            debug!(
                "{:<12} --> 현재가 이하 입찰 무시 id: {}, 금액: {}",
                "Auction", self.id, amount
            );
            return false;
        }
        self.current_price = amount;
        self.bid_count += 1;
        true
    }
}
// endregion: --- State Machine
