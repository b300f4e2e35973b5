use futures::future::join;
use log::{error, info, warn};
use thiserror::Error;

use crate::gateway::{DataGateway, GatewayError};
use crate::model::{Bid, Candidate, Direction};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("data unavailable: {0}")]
    DataUnavailable(#[from] GatewayError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
    Terminal,
}

pub async fn load_candidates<G: DataGateway + ?Sized>(
    gateway: &G,
) -> Result<Vec<Candidate>, SessionError> {
    Ok(gateway.list_candidates().await?)
}

pub async fn load_prior_bids<G: DataGateway + ?Sized>(
    gateway: &G,
) -> Result<Vec<Bid>, SessionError> {
    Ok(gateway.list_bids().await?)
}

/// One pass through the candidate deck: which card is showing and which bids
/// this client knows about.
#[derive(Debug, Clone)]
pub struct SessionController {
    candidates: Vec<Candidate>,
    cursor: usize,
    bids: Vec<Bid>,
    user_id: String,
    loading: bool,
}

impl SessionController {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            candidates: Vec::new(),
            cursor: 0,
            bids: Vec::new(),
            user_id: user_id.into(),
            loading: true,
        }
    }

    /// Fetches candidates and prior bids concurrently and leaves `Loading`
    /// once both have settled, whatever their outcome.
    ///
    /// Holds `&mut self` across the await, so a UI keeping the session in a
    /// `RefCell` runs [`load_candidates`]/[`load_prior_bids`] itself and then
    /// calls [`SessionController::finish_loading`].
    pub async fn load<G: DataGateway + ?Sized>(&mut self, gateway: &G) {
        let (candidates, bids) = join(load_candidates(gateway), load_prior_bids(gateway)).await;
        self.finish_loading(candidates, bids);
    }

    /// Applies both load outcomes. Failures are logged and leave the
    /// corresponding collection empty.
    pub fn finish_loading(
        &mut self,
        candidates: Result<Vec<Candidate>, SessionError>,
        bids: Result<Vec<Bid>, SessionError>,
    ) {
        if !self.loading {
            warn!("Ignoring late load results, session already started");
            return;
        }

        match candidates {
            Ok(candidates) => {
                info!("Loaded {} friends", candidates.len());
                self.candidates = candidates;
            }
            Err(err) => error!("Error loading friends: {err}"),
        }
        match bids {
            Ok(bids) => self.bids = bids,
            Err(err) => error!("Error loading bids: {err}"),
        }
        self.loading = false;
    }

    /// Moves past the current candidate. A right swipe yields the bid that
    /// should be submitted; nothing happens once the deck is exhausted.
    pub fn advance(&mut self, direction: Direction) -> Option<Bid> {
        let candidate = self.candidates.get(self.cursor)?;
        let bid = match direction {
            Direction::Right => Some(Bid::for_candidate(candidate, &self.user_id)),
            Direction::Left => None,
        };
        self.cursor += 1;
        bid
    }

    /// Adds a bid the backend accepted.
    pub fn record_bid(&mut self, bid: Bid) {
        self.bids.push(bid);
    }

    /// Advances and, on a right swipe, persists the bid. A failed insert is
    /// logged and dropped; the deck still moves on. Returns whether the swipe
    /// applied to a candidate.
    ///
    /// Event-loop callers that cannot hold the session across the insert use
    /// the split form: [`SessionController::advance`], then
    /// [`SessionController::settle_bid`] when the insert completes.
    pub async fn resolve_swipe<G: DataGateway + ?Sized>(
        &mut self,
        gateway: &G,
        direction: Direction,
    ) -> bool {
        if self.is_exhausted() {
            return false;
        }
        if let Some(bid) = self.advance(direction) {
            let result = gateway.insert_bid(&bid).await;
            self.settle_bid(bid, result);
        }
        true
    }

    /// Applies the outcome of a bid insert: recorded on success, logged and
    /// dropped otherwise.
    pub fn settle_bid(&mut self, bid: Bid, result: Result<(), GatewayError>) {
        match result {
            Ok(()) => self.record_bid(bid),
            Err(err) => error!("Error saving bid: {}", SessionError::from(err)),
        }
    }

    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Loading
        } else if self.is_exhausted() {
            Phase::Terminal
        } else {
            Phase::Ready
        }
    }

    pub fn current(&self) -> Option<&Candidate> {
        if self.loading {
            return None;
        }
        self.candidates.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn bid_count(&self) -> usize {
        self.bids.len()
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    fn is_exhausted(&self) -> bool {
        self.cursor >= self.candidates.len()
    }
}
