// libwlc-rs/libwlc/src/transport/mod.rs

/// In-memory collaborators for tests
pub mod mock;
/// Collaborator traits
pub mod traits;

pub use mock::{MockHost, MockRf, MockTag, RecordingSink};
pub use traits::{
    ChargingEventSink, HostPollingControl, LinkLostNotifier, NullEventSink, RfFrontEnd,
    TagChannel,
};
