//! Activation tickets.
//!
//! A companion's state machine runs one controller at a time. Instead of
//! controllers comparing themselves against a shared "current controller"
//! field, the state machine hands a [`ControllerTicket`] to the controller it
//! activates and revokes it when it switches away. A controller is current
//! exactly while it holds a ticket that has not been revoked.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Proof that a controller is the active one.
#[derive(Debug, Clone)]
pub struct ControllerTicket {
    live: Arc<AtomicBool>,
    serial: u64,
}

impl ControllerTicket {
    pub fn is_valid(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Issue number, increasing per [`ControllerSwitch`].
    pub fn serial(&self) -> u64 {
        self.serial
    }
}

/// Issues tickets; at most one is valid at a time.
#[derive(Debug, Default)]
pub struct ControllerSwitch {
    current: Option<ControllerTicket>,
    issued: u64,
}

impl ControllerSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revoke the outstanding ticket and issue a fresh one.
    pub fn issue(&mut self) -> ControllerTicket {
        self.revoke();
        self.issued += 1;
        let ticket = ControllerTicket {
            live: Arc::new(AtomicBool::new(true)),
            serial: self.issued,
        };
        self.current = Some(ticket.clone());
        ticket
    }

    /// Invalidate the outstanding ticket, if any.
    pub fn revoke(&mut self) {
        if let Some(ticket) = self.current.take() {
            ticket.live.store(false, Ordering::Release);
        }
    }

    pub fn current_serial(&self) -> Option<u64> {
        self.current.as_ref().map(ControllerTicket::serial)
    }
}
