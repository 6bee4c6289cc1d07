//! Interrupt Handling Logic.
//!
//! This module implements software and hardware interrupt delivery. It performs
//! the following:
//! 1. **Queueing:** Appends messages to a bounded FIFO, applying the overflow policy when full.
//! 2. **Dispatch:** At the start of a step, enters the handler at `IA` with the oldest message.
//! 3. **Return Handling:** Implements `RFI`, which restores `A` and `PC` and lifts queueing.

use std::collections::VecDeque;

use tracing::{trace, warn};

use super::Cpu;
use crate::common::{CpuError, Register, Word};
use crate::config::OverflowPolicy;

/// Bounded FIFO of pending interrupt messages.
#[derive(Clone, Debug)]
pub struct InterruptQueue {
    pending: VecDeque<Word>,
    capacity: usize,
    policy: OverflowPolicy,
}

impl InterruptQueue {
    /// Creates an empty queue.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum number of pending messages.
    /// * `policy` - What to do with a message that arrives at a full queue.
    pub fn new(capacity: usize, policy: OverflowPolicy) -> Self {
        Self {
            pending: VecDeque::new(),
            capacity,
            policy,
        }
    }

    /// Appends a message.
    ///
    /// # Returns
    ///
    /// `Ok(None)` if the message was queued without loss, or `Ok(Some(lost))`
    /// with the message that the drop policy discarded (the incoming one for
    /// `DropNewest`, the oldest pending one for `DropOldest`).
    ///
    /// # Errors
    ///
    /// Returns `CpuError::InterruptQueueFull` under the `Fail` policy; the queue is unchanged.
    pub fn push(&mut self, message: Word) -> Result<Option<Word>, CpuError> {
        if self.pending.len() < self.capacity {
            self.pending.push_back(message);
            return Ok(None);
        }
        match self.policy {
            OverflowPolicy::DropNewest => Ok(Some(message)),
            OverflowPolicy::DropOldest => {
                let Some(oldest) = self.pending.pop_front() else {
                    return Ok(Some(message));
                };
                self.pending.push_back(message);
                Ok(Some(oldest))
            }
            OverflowPolicy::Fail => Err(CpuError::InterruptQueueFull {
                message,
                capacity: self.capacity,
            }),
        }
    }

    /// Removes and returns the oldest message.
    pub fn pop(&mut self) -> Option<Word> {
        self.pending.pop_front()
    }

    /// Pending messages, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Word> + '_ {
        self.pending.iter().copied()
    }

    /// Number of pending messages.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if nothing is pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Configured capacity.
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Configured overflow policy.
    pub const fn policy(&self) -> OverflowPolicy {
        self.policy
    }

    /// Discards every pending message.
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

impl Cpu {
    /// Queues an interrupt message for delivery to the program's handler.
    ///
    /// Legal in any state; the message is delivered by a later `step` once
    /// queueing is off.
    ///
    /// # Arguments
    ///
    /// * `message` - Value placed in `A` when the handler is entered.
    ///
    /// # Errors
    ///
    /// Returns `CpuError::InterruptQueueFull` if the queue is full and the
    /// overflow policy is `Fail`. Under the drop policies the call succeeds and
    /// the lost message is counted in `CpuStats::interrupts_dropped`.
    pub fn queue_interrupt(&mut self, message: Word) -> Result<(), CpuError> {
        match self.interrupts.push(message) {
            Ok(None) => Ok(()),
            Ok(Some(lost)) => {
                self.stats.interrupts_dropped += 1;
                warn!(
                    lost,
                    policy = ?self.interrupts.policy(),
                    "interrupt queue full, message dropped"
                );
                Ok(())
            }
            Err(err) => {
                warn!(message, "interrupt queue full, message rejected");
                Err(err)
            }
        }
    }

    /// Pending interrupt messages, oldest first.
    pub fn pending_interrupts(&self) -> Vec<Word> {
        self.interrupts.iter().collect()
    }

    /// Delivers at most one pending interrupt.
    ///
    /// Does nothing while queueing is on. With `IA == 0` the message is
    /// discarded; otherwise queueing is turned on, `PC` and `A` are pushed, and
    /// execution continues at `IA` with the message in `A`.
    pub(crate) fn service_interrupt(&mut self) {
        if self.queueing {
            return;
        }
        let Some(message) = self.interrupts.pop() else {
            return;
        };
        if self.regs.ia == 0 {
            self.stats.interrupts_discarded += 1;
            trace!(message, "interrupt discarded, no handler installed");
            return;
        }
        self.queueing = true;
        self.push(self.regs.pc);
        self.push(self.regs.read(Register::A));
        self.regs.pc = self.regs.ia;
        self.regs.write(Register::A, message);
        self.stats.interrupts_serviced += 1;
        trace!(message, handler = self.regs.ia, "interrupt handler entered");
    }

    /// `RFI`: turns queueing off and pops `A`, then `PC`.
    pub(crate) fn return_from_interrupt(&mut self) {
        self.queueing = false;
        let a = self.pop();
        self.regs.write(Register::A, a);
        self.regs.pc = self.pop();
    }

    /// Enqueues messages raised by device hooks.
    ///
    /// Every message is offered to the queue; the first rejection is returned.
    pub(crate) fn enqueue_raised(&mut self, raised: Vec<Word>) -> Result<(), CpuError> {
        let mut first_err = None;
        for message in raised {
            let result = self.queue_interrupt(message);
            if first_err.is_none() {
                first_err = result.err();
            }
        }
        first_err.map_or(Ok(()), Err)
    }
}
