//! Suggestion candidates for the input popup
//!
//! Fuzzy matching happens elsewhere; this module takes the raw matches for
//! files, agents and symbols, puts their scores on one axis with
//! [`normalize`](crate::score::normalize), and produces a single ranked,
//! capped list. [`trigger`] decides whether a keystroke opens the popup at
//! all.

pub mod ranker;
pub mod trigger;
pub mod types;

pub use ranker::{ScoreScale, ScoredMatch, SuggestionBatch, SuggestionRanker};
pub use trigger::{SuggestionGate, SuggestionRoute, Trigger, extract_trigger};
pub use types::{AgentItem, SuggestionItem, SymbolResult};
