// Vote domain module
// Vote records plus the pure toggle decision applied when one is cast

#![allow(clippy::module_inception)]

pub mod vote;

pub use vote::{apply_vote, Vote, VoteKind, VoteOutcome, VoteTally};
