//! Hover activation with an optional cancellable deferred deactivation.
//!
//! The gate never owns a timer. `leave` hands the host a token to arm; the
//! host calls `fire` with that token when its timer elapses. Tokens increase
//! monotonically, so a timer that escaped cancellation can never deactivate a
//! later hover.

use std::time::Duration;

use crate::constants::DEFAULT_LEAVE_DELAY_MS;

/// What happens to distortion when the pointer leaves the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeavePolicy {
    Immediate,
    Delayed(Duration),
}

impl Default for LeavePolicy {
    fn default() -> Self {
        LeavePolicy::Delayed(Duration::from_millis(DEFAULT_LEAVE_DELAY_MS))
    }
}

/// Timer work the host must perform after a gate transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateCommand {
    None,
    Arm { delay: Duration, token: u64 },
    Cancel { token: u64 },
}

#[derive(Clone, Debug)]
pub struct HoverGate {
    policy: LeavePolicy,
    active: bool,
    pending: Option<u64>,
    next_token: u64,
}

impl HoverGate {
    pub fn new(policy: LeavePolicy) -> Self {
        Self {
            policy,
            active: false,
            pending: None,
            next_token: 1,
        }
    }

    #[inline]
    pub fn policy(&self) -> LeavePolicy {
        self.policy
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub fn pending(&self) -> Option<u64> {
        self.pending
    }

    pub fn enter(&mut self) -> GateCommand {
        self.active = true;
        match self.pending.take() {
            Some(token) => GateCommand::Cancel { token },
            None => GateCommand::None,
        }
    }

    pub fn leave(&mut self) -> GateCommand {
        match self.policy {
            LeavePolicy::Immediate => {
                self.active = false;
                GateCommand::None
            }
            LeavePolicy::Delayed(delay) => {
                if !self.active {
                    return GateCommand::None;
                }
                // A leave while a deactivation is pending supersedes it.
                let previous = self.pending.take();
                let token = self.next_token;
                self.next_token += 1;
                self.pending = Some(token);
                if let Some(old) = previous {
                    log::debug!("[gate] superseding pending deactivation {}", old);
                }
                GateCommand::Arm { delay, token }
            }
        }
    }

    /// Returns `true` when the token was current and distortion switched off.
    pub fn fire(&mut self, token: u64) -> bool {
        if self.pending == Some(token) {
            self.pending = None;
            self.active = false;
            true
        } else {
            false
        }
    }

    /// Drop any pending deactivation without touching the active flag.
    pub fn cancel_pending(&mut self) -> GateCommand {
        match self.pending.take() {
            Some(token) => GateCommand::Cancel { token },
            None => GateCommand::None,
        }
    }
}
