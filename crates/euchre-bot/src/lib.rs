pub mod bot;
pub mod policy;
pub mod table;

pub use bot::{
    CALL_THRESHOLD, HandCounters, PlayChoice, PlayReason, choose_card, decide_to_call,
    estimate_winners, select_card,
};
pub use policy::{BidContext, HeuristicPolicy, Policy, PolicyContext};
pub use table::{RoundResult, Table, TableError};
