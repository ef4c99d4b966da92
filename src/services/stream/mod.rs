//! Event stream subscription and job-completion watching.
//!
//! The CATCH service announces job progress on a single shared
//! server-sent-event feed at `/stream`. Every subscriber sees every job's
//! messages, so a client tracking one job filters the feed for its own
//! job identifier and disconnects once a terminal message arrives.

mod events;
mod protocol;
mod watcher;

pub use events::EventStream;
pub use protocol::{
    protocol_for, BareJobIdProtocol, JobState, JobUpdate, PrefixStatusProtocol, StreamProtocol,
};
pub use watcher::{JobWatcher, ProgressObserver, StderrProgress};

#[cfg(test)]
mod tests;
