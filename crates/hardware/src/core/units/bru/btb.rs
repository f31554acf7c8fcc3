//! Branch Target Buffer (BTB).
//!
//! The BTB is a direct-mapped table indexed by `pc % size`. Each entry records
//! the last outcome (taken bit and target) of the branch that mapped to it.
//! There is no tag, so aliasing branches share an entry.

/// Fetch-time prediction for one instruction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Prediction {
    /// Predicted taken.
    pub taken: bool,
    /// Predicted target address (meaningful when `taken`).
    pub target: u16,
}

impl Prediction {
    /// Address fetched after `pc` under this prediction.
    pub const fn next_pc(&self, pc: u16) -> u16 {
        if self.taken {
            self.target
        } else {
            pc.wrapping_add(1)
        }
    }
}

/// Branch Target Buffer structure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Btb {
    /// The table of BTB entries.
    table: Vec<Prediction>,
}

impl Btb {
    /// Creates a new Branch Target Buffer with the specified size.
    ///
    /// # Arguments
    ///
    /// * `size` - The number of entries in the BTB. A size of zero is treated as one.
    pub fn new(size: usize) -> Self {
        Self {
            table: vec![Prediction::default(); size.max(1)],
        }
    }

    /// Number of entries.
    pub fn size(&self) -> usize {
        self.table.len()
    }

    #[inline]
    fn index(&self, pc: u16) -> usize {
        pc as usize % self.table.len()
    }

    /// Looks up the prediction for `pc`.
    #[inline]
    pub fn lookup(&self, pc: u16) -> Prediction {
        self.table[self.index(pc)]
    }

    /// Overwrites the entry for `pc` with a resolved outcome.
    ///
    /// # Arguments
    ///
    /// * `pc` - The program counter of the branch or jump.
    /// * `taken` - Whether the branch was taken.
    /// * `target` - The resolved target address.
    pub fn update(&mut self, pc: u16, taken: bool, target: u16) {
        let idx = self.index(pc);
        self.table[idx] = Prediction { taken, target };
    }
}
