//! Clocked SRAM model.
//!
//! `read` and `write` only schedule an access; nothing changes until
//! [`Sram::commit`] is called at the cycle boundary. A read scheduled in cycle
//! `t` is visible through [`Sram::extract_result`] during cycle `t + 1` and the
//! output register keeps that word until another read completes.

use std::io::{self, Write};

use crate::common::constants::ADDR_MASK;

/// Single-ported synchronous SRAM of 32-bit words.
#[derive(Clone, Debug)]
pub struct Sram {
    words: Vec<u32>,
    /// Address of the read scheduled this cycle.
    read_addr: Option<u16>,
    /// Write scheduled this cycle.
    write_req: Option<(u16, u32)>,
    /// Output register: the word fetched by the last completed read.
    data_out: u32,
}

impl Sram {
    /// Creates a zero-filled SRAM of `height` words.
    pub fn new(height: usize) -> Self {
        Self {
            words: vec![0; height.max(1)],
            read_addr: None,
            write_req: None,
            data_out: 0,
        }
    }

    /// Number of words.
    pub fn height(&self) -> usize {
        self.words.len()
    }

    #[inline]
    fn slot(&self, addr: u16) -> usize {
        (u32::from(addr) & ADDR_MASK) as usize % self.words.len()
    }

    /// Schedules a read of `addr`; the word is available next cycle.
    #[inline]
    pub fn read(&mut self, addr: u16) {
        debug_assert!(
            self.read_addr.is_none(),
            "second SRAM read in one cycle (addr {addr:#06x})"
        );
        self.read_addr = Some(addr);
    }

    /// Returns the output register (result of the read issued last cycle).
    #[inline]
    pub const fn extract_result(&self) -> u32 {
        self.data_out
    }

    /// Schedules a write of `word` to `addr` at the end of this cycle.
    #[inline]
    pub fn write(&mut self, addr: u16, word: u32) {
        debug_assert!(
            self.write_req.is_none(),
            "second SRAM write in one cycle (addr {addr:#06x})"
        );
        self.write_req = Some((addr, word));
    }

    /// Clock edge: completes the pending read, then applies the pending write.
    ///
    /// A read and a write to the same address in one cycle therefore return
    /// the old word.
    pub fn commit(&mut self) {
        if let Some(addr) = self.read_addr.take() {
            self.data_out = self.words[self.slot(addr)];
        }
        if let Some((addr, word)) = self.write_req.take() {
            let slot = self.slot(addr);
            self.words[slot] = word;
        }
    }

    /// Drops the accesses scheduled this cycle.
    pub fn discard(&mut self) {
        self.read_addr = None;
        self.write_req = None;
    }

    /// Untimed read used by the loader, dumps and tests.
    pub fn peek(&self, addr: u16) -> u32 {
        self.words[self.slot(addr)]
    }

    /// Untimed write used by the loader and tests.
    pub fn poke(&mut self, addr: u16, word: u32) {
        let slot = self.slot(addr);
        self.words[slot] = word;
    }

    /// Full contents.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    /// Writes every word as eight lowercase hex digits, one per line.
    ///
    /// # Errors
    ///
    /// Propagates any error from `out`.
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for word in &self.words {
            writeln!(out, "{word:08x}")?;
        }
        out.flush()
    }
}
