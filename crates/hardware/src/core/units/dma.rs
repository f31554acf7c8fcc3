//! Block-copy DMA engine.
//!
//! The engine copies `remaining` words from `src` to `dst` in the data SRAM,
//! one read and one write in flight at a time. It runs every cycle after the
//! pipeline and yields the memory port whenever the pipeline uses it: the
//! caller passes that in as `conflict`, and a conflicted state holds for the
//! cycle instead of touching the SRAM.
//!
//! Reads complete one cycle after they are issued, so the engine keeps a
//! `pending_read` flag meaning "the SRAM output register holds a word this
//! engine asked for and has not captured yet".

use std::fmt;

use tracing::debug;

use crate::soc::memory::sram::Sram;

/// DMA state machine states.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DmaState {
    /// Waiting for a transfer request.
    #[default]
    Idle,
    /// Issue the read of the first word.
    ReadFirst,
    /// Capture the pending word and issue the next read.
    DoRead,
    /// Capture the pending word and write the previous one.
    DoWrite,
    /// Write the held word after a conflict in `DoWrite`.
    WriteStalled,
    /// Write the final word and release the engine.
    WriteLast,
    /// Single-word transfer: capture the only word.
    Do,
}

impl DmaState {
    /// Upper-case state name used in traces.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::ReadFirst => "READ_FIRST",
            Self::DoRead => "DO_READ",
            Self::DoWrite => "DO_WRITE",
            Self::WriteStalled => "WRITE_STALLED",
            Self::WriteLast => "WRITE_LAST",
            Self::Do => "DO",
        }
    }
}

impl fmt::Display for DmaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// DMA control block. Lives in the double-buffered core state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DmaEngine {
    /// A transfer has been requested and is not finished.
    pub busy: bool,
    /// Next source address to read.
    pub src: u16,
    /// Next destination address to write.
    pub dst: u16,
    /// Words still to be written.
    pub remaining: u32,
    /// Transfer register: the next word to write.
    pub reg: u32,
    /// Shadow register: word captured during a conflicted `DoWrite`.
    pub shadow: u32,
    /// The SRAM output register holds a word this engine has not captured.
    pub pending_read: bool,
    /// State machine state.
    pub state: DmaState,
}

/// What the engine did in one cycle; used for traces and statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DmaActivity {
    /// The engine held its state because the pipeline owned the port.
    pub stalled: bool,
    /// Address read this cycle.
    pub read: Option<u16>,
    /// Address and word written this cycle.
    pub write: Option<(u16, u32)>,
    /// The transfer finished this cycle.
    pub finished: bool,
}

impl DmaEngine {
    /// Latches a transfer request into `next` if the engine in `self` is idle.
    ///
    /// Returns false (and changes nothing) when a transfer is already running;
    /// a second request is silently dropped. A non-positive length requests
    /// nothing and only raises `busy` for the cycle it takes to clear it.
    pub fn launch(&self, next: &mut Self, src: i32, dst: i32, len: i32) -> bool {
        if self.busy {
            return false;
        }
        next.busy = true;
        next.src = src as u16;
        next.dst = dst as u16;
        next.remaining = len.max(0) as u32;
        true
    }

    /// Advances the state machine by one cycle.
    ///
    /// Reads `self` (the current snapshot), writes `next`, and schedules at
    /// most one read and one write on `dmem`.
    ///
    /// # Arguments
    ///
    /// * `next` - Next-cycle control block (a copy of `self` on entry).
    /// * `dmem` - The shared data SRAM.
    /// * `conflict` - The pipeline uses the data port this cycle.
    pub fn step(&self, next: &mut Self, dmem: &mut Sram, conflict: bool) -> DmaActivity {
        let mut act = DmaActivity::default();

        match self.state {
            DmaState::Idle => {
                if self.busy && self.remaining > 0 {
                    next.state = DmaState::ReadFirst;
                } else if self.busy {
                    next.busy = false;
                    act.finished = true;
                }
            }

            DmaState::ReadFirst => {
                if conflict {
                    return self.stall(act);
                }
                act.read = Some(self.issue_read(next, dmem));
                next.state = if self.remaining == 1 {
                    DmaState::Do
                } else {
                    DmaState::DoRead
                };
            }

            DmaState::DoRead => {
                // The pending word is captured even if the port is taken:
                // a pipeline read this cycle would overwrite the output register.
                if self.pending_read {
                    next.reg = dmem.extract_result();
                }
                next.pending_read = false;
                if conflict {
                    return self.stall(act);
                }
                act.read = Some(self.issue_read(next, dmem));
                next.state = DmaState::DoWrite;
            }

            DmaState::DoWrite => {
                if conflict {
                    next.shadow = dmem.extract_result();
                    next.pending_read = false;
                    next.state = DmaState::WriteStalled;
                    act.stalled = true;
                    debug!(state = %self.state, "DMA stalled on data port");
                    return act;
                }
                if self.pending_read {
                    next.reg = dmem.extract_result();
                }
                next.pending_read = false;
                act.write = Some(self.write_word(next, dmem));
                next.state = self.after_write();
            }

            DmaState::WriteStalled => {
                if conflict {
                    return self.stall(act);
                }
                act.write = Some(self.write_word(next, dmem));
                next.reg = self.shadow;
                next.state = self.after_write();
            }

            DmaState::WriteLast => {
                if conflict {
                    return self.stall(act);
                }
                dmem.write(self.dst, self.reg);
                act.write = Some((self.dst, self.reg));
                next.remaining = 0;
                next.busy = false;
                next.state = DmaState::Idle;
                act.finished = true;
                debug!(dst = self.dst, "DMA transfer complete");
            }

            DmaState::Do => {
                next.reg = dmem.extract_result();
                next.pending_read = false;
                next.state = DmaState::WriteLast;
            }
        }

        act
    }

    fn stall(&self, mut act: DmaActivity) -> DmaActivity {
        act.stalled = true;
        debug!(state = %self.state, "DMA stalled on data port");
        act
    }

    fn issue_read(&self, next: &mut Self, dmem: &mut Sram) -> u16 {
        dmem.read(self.src);
        next.src = self.src.wrapping_add(1);
        next.pending_read = true;
        self.src
    }

    fn write_word(&self, next: &mut Self, dmem: &mut Sram) -> (u16, u32) {
        dmem.write(self.dst, self.reg);
        next.dst = self.dst.wrapping_add(1);
        next.remaining = self.remaining.saturating_sub(1);
        (self.dst, self.reg)
    }

    const fn after_write(&self) -> DmaState {
        if self.remaining == 2 {
            DmaState::WriteLast
        } else {
            DmaState::DoRead
        }
    }
}
