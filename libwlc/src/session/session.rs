// libwlc-rs/libwlc/src/session/session.rs

use super::state::WlcState;
use crate::types::SequenceCounter;

/// Retry budgets of one session. The two counters are independent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryCounters {
    /// Capability re-reads while the listener asks the poller to wait
    pub negotiation: u8,
    /// Re-reads of a WLCCTL that repeated the previous counter
    pub read_confirm: u8,
}

/// Mutable state of one charging session, owned by the watchdog thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WlcSession {
    /// State the next step runs
    pub state: WlcState,
    /// Counter of the last accepted WLCCTL
    pub sequence_counter_seen: Option<SequenceCounter>,
    /// Retry budgets in use
    pub retry: RetryCounters,
    /// Power is being delivered
    pub charging_active: bool,
    /// The last read found the listener
    pub listener_present: bool,
    /// Setup register sequences are applied only once per session
    pub first_pass: bool,
}

impl Default for WlcSession {
    fn default() -> Self {
        Self {
            state: WlcState::Idle,
            sequence_counter_seen: None,
            retry: RetryCounters::default(),
            charging_active: false,
            listener_present: false,
            first_pass: true,
        }
    }
}

impl WlcSession {
    /// Fresh session in `Idle`
    pub fn new() -> Self {
        Self::default()
    }
}
