//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `CrawlState`: transient per-run accumulation state, owned exclusively
//!   by one crawl controller
//! - `CrawlPhase`: the controller's state machine (running/done/failed)

mod crawl_state;
mod phase;

pub use crawl_state::CrawlState;
pub use phase::CrawlPhase;
