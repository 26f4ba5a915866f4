//! Interrupt line bitmask

use crate::irqn::{IrqNumber, MAX_INTERRUPTS};

/// Bits per mask word, matching the width of one NVIC ISER/ICER register
pub const WORD_BITS: u16 = 32;

/// Number of words in a [`LineMask`]
pub const MASK_WORDS: usize = MAX_INTERRUPTS.div_ceil(WORD_BITS) as usize;

/// Set of interrupt lines, laid out exactly like the NVIC enable registers
///
/// Word `n` bit `b` stands for line `n * 32 + b`. Masks are plain values:
/// queries hand out a copy and operations take one by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineMask {
    words: [u32; MASK_WORDS],
}

impl LineMask {
    /// Mask with no lines
    pub const EMPTY: Self = Self { words: [0; MASK_WORDS] };

    /// Create a new empty mask
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Create a mask from raw register words
    pub const fn from_words(words: [u32; MASK_WORDS]) -> Self {
        Self { words }
    }

    /// Create a mask holding every valid line in `lines`
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator<Item = IrqNumber>,
    {
        let mut mask = Self::EMPTY;
        for irq in lines {
            mask.set_line(irq);
        }
        mask
    }

    /// Add `irq` to the mask
    ///
    /// Exceptions have no individual enable bit, so they (and invalid
    /// identifiers) leave the mask unchanged.
    pub fn set_line(&mut self, irq: IrqNumber) {
        if let Some(line) = irq.line_index() {
            self.words[(line / WORD_BITS) as usize] |= 1 << (line % WORD_BITS);
        }
    }

    /// Remove `irq` from the mask; no-op for exceptions and invalid identifiers
    pub fn clear_line(&mut self, irq: IrqNumber) {
        if let Some(line) = irq.line_index() {
            self.words[(line / WORD_BITS) as usize] &= !(1 << (line % WORD_BITS));
        }
    }

    /// Builder form of [`set_line`](Self::set_line)
    #[must_use]
    pub fn with_line(mut self, irq: IrqNumber) -> Self {
        self.set_line(irq);
        self
    }

    /// Check if `irq` is in the mask
    pub const fn contains(&self, irq: IrqNumber) -> bool {
        match irq.line_index() {
            Some(line) => self.words[(line / WORD_BITS) as usize] & (1 << (line % WORD_BITS)) != 0,
            None => false,
        }
    }

    /// Check if the mask is empty
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// Check if the two masks share any line
    pub fn intersects(&self, other: &LineMask) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| a & b != 0)
    }

    /// Lines present in both masks
    #[must_use]
    pub fn and(&self, other: &LineMask) -> Self {
        self.zip_with(other, |a, b| a & b)
    }

    /// Lines present in either mask
    #[must_use]
    pub fn or(&self, other: &LineMask) -> Self {
        self.zip_with(other, |a, b| a | b)
    }

    /// Lines present in `self` but not in `other`
    #[must_use]
    pub fn and_not(&self, other: &LineMask) -> Self {
        self.zip_with(other, |a, b| a & !b)
    }

    /// Raw word `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= MASK_WORDS`.
    pub const fn word(&self, index: usize) -> u32 {
        self.words[index]
    }

    /// All raw words
    pub const fn words(&self) -> &[u32; MASK_WORDS] {
        &self.words
    }

    /// Number of lines in the mask
    pub fn count(&self) -> u32 {
        self.words.iter().map(|word| word.count_ones()).sum()
    }

    /// Iterate over the lines in the mask, lowest first
    pub fn iter(&self) -> Lines {
        Lines {
            words: self.words,
            index: 0,
        }
    }

    fn zip_with(&self, other: &LineMask, op: impl Fn(u32, u32) -> u32) -> Self {
        let mut words = [0; MASK_WORDS];
        for (i, word) in words.iter_mut().enumerate() {
            *word = op(self.words[i], other.words[i]);
        }
        Self { words }
    }
}

impl Default for LineMask {
    fn default() -> Self {
        Self::new()
    }
}

impl IntoIterator for &LineMask {
    type Item = IrqNumber;
    type IntoIter = Lines;

    fn into_iter(self) -> Lines {
        self.iter()
    }
}

/// Iterator over the lines of a [`LineMask`]
#[derive(Debug, Clone)]
pub struct Lines {
    words: [u32; MASK_WORDS],
    index: usize,
}

impl Iterator for Lines {
    type Item = IrqNumber;

    fn next(&mut self) -> Option<IrqNumber> {
        while self.index < MASK_WORDS {
            let word = self.words[self.index];
            if word == 0 {
                self.index += 1;
                continue;
            }
            let bit = word.trailing_zeros();
            self.words[self.index] &= !(1 << bit);
            let line = self.index as u32 * WORD_BITS as u32 + bit;
            return Some(IrqNumber::new(line as i16));
        }
        None
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for LineMask {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "LineMask({=[u32]:#x})", self.words[..]);
    }
}
