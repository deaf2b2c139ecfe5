mod bid;
mod estimator;
mod play;

pub use bid::{CALL_THRESHOLD, decide_to_call};
pub use estimator::{HandCounters, estimate_winners};
pub use play::{PlayChoice, PlayReason, choose_card, select_card};
