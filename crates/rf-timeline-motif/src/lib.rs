//! Sequence search over a fused event timeline.
//!
//! - [`Motif`] / [`MotifToken`]: three-step patterns written as short tokens
//!   such as `wifi5_20,ultra19,wifi6_20`
//! - [`MotifMatcher`]: every ordered occurrence of a motif where consecutive
//!   steps lie within a gap bound
//! - [`TripletMiner`]: the most frequent ordered label triplets inside a
//!   sliding time window
//!
//! Both searches expect events in ascending timestamp order, as produced by
//! [`rf_timeline_core::Timeline`].

#![forbid(unsafe_code)]

pub mod matcher;
pub mod miner;
pub mod token;

pub use matcher::{MotifHit, MotifMatcher};
pub use miner::{TripletCount, TripletKey, TripletMiner};
pub use token::{Motif, MotifToken, MOTIF_LEN};

use thiserror::Error;

/// Errors from motif parsing and search configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MotifError {
    #[error("Motif must have exactly {expected} tokens, got {actual}")]
    TokenCount { expected: usize, actual: usize },

    #[error("Invalid {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, MotifError>;
