//! Mask snapshots returned by section entry
//!
//! Snapshots are neither `Copy` nor `Clone`: each one comes from exactly one
//! enter call and is consumed by exactly one exit call. Exits must still
//! happen in reverse order of entry; that part is on the caller.

/// Global enable state captured by entering a full-mask section
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the snapshot must be passed to the matching exit call"]
pub struct FullMaskState {
    was_masked: bool,
}

impl FullMaskState {
    pub(crate) const fn new(was_masked: bool) -> Self {
        Self { was_masked }
    }

    /// Whether interrupts were already masked when the section was entered
    pub const fn was_masked(&self) -> bool {
        self.was_masked
    }

    /// Convert into the raw form used by `critical_section::RawRestoreState`
    pub const fn into_raw(self) -> bool {
        self.was_masked
    }

    /// Rebuild a snapshot from [`into_raw`](Self::into_raw)
    ///
    /// # Safety
    ///
    /// `raw` must come from `into_raw` of a snapshot that has not been
    /// restored yet. Restoring a forged state can re-enable interrupts inside
    /// an outer section.
    pub const unsafe fn from_raw(raw: bool) -> Self {
        Self::new(raw)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Saved {
    Basepri(u8),
    FullMask(FullMaskState),
}

/// Masking level captured by entering a threshold section
///
/// On cores without BASEPRI the section falls back to a full mask and the
/// snapshot records the PRIMASK state instead.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "the snapshot must be passed to the matching exit call"]
pub struct ThresholdState {
    pub(crate) saved: Saved,
}

impl ThresholdState {
    pub(crate) const fn basepri(raw: u8) -> Self {
        Self { saved: Saved::Basepri(raw) }
    }

    pub(crate) const fn full_mask(state: FullMaskState) -> Self {
        Self { saved: Saved::FullMask(state) }
    }

    /// Raw BASEPRI value in force before the section, if the section used BASEPRI
    pub const fn previous_basepri(&self) -> Option<u8> {
        match self.saved {
            Saved::Basepri(raw) => Some(raw),
            Saved::FullMask(_) => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FullMaskState {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "FullMaskState{{was_masked: {}}}", self.was_masked);
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ThresholdState {
    fn format(&self, fmt: defmt::Formatter) {
        match &self.saved {
            Saved::Basepri(raw) => defmt::write!(fmt, "ThresholdState{{basepri: {=u8:#x}}}", raw),
            Saved::FullMask(state) => defmt::write!(fmt, "ThresholdState{{{}}}", state),
        }
    }
}
