//! Settings that survive a reset, and the scratch-register store that keeps them.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Runtime-adjustable settings, loaded once at startup and written back every iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Degrees added to every temperature reading.
    pub temperature_offset: i8,
}

impl Settings {
    /// Steps the calibration offset up by one degree, wrapping from 127 to -128.
    pub const fn raise_temperature_offset(&mut self) {
        self.temperature_offset = self.temperature_offset.wrapping_add(1);
    }
}

/// Persistence for [`Settings`].
///
/// Neither call reports failure: the main task neither retries nor branches on storage faults.
pub trait ConfigStore {
    /// The stored settings, or the defaults if nothing valid is stored.
    fn load(&mut self) -> Settings;

    /// Stores `settings`. Must finish before the main task's next delay.
    fn write(&mut self, settings: &Settings);
}

/// A bank of word-sized registers that keep their contents across a reset.
pub trait ScratchRegisters {
    fn read_scratch(&mut self, index: usize) -> u32;
    fn write_scratch(&mut self, index: usize, value: u32);
}

/// Number of registers one settings record occupies.
pub const RECORD_WORDS: usize = 3;

const MAGIC: u32 = 0x5345_4701; // 'SEG' + version 1
const PAYLOAD_BYTES: usize = 4;

/// Stores [`Settings`] in [`RECORD_WORDS`] consecutive scratch registers.
///
/// Layout: magic/version word, up to four bytes of `postcard` payload, CRC-32 of the payload.
#[derive(Debug)]
pub struct ScratchStore<S> {
    registers: S,
    first: usize,
}

impl<S: ScratchRegisters> ScratchStore<S> {
    /// Uses registers `first..first + RECORD_WORDS`.
    #[must_use]
    pub const fn new(registers: S, first: usize) -> Self {
        Self { registers, first }
    }

    /// Reads the record.
    ///
    /// Returns `Ok(None)` when no record was ever written (or it is from another version).
    ///
    /// # Errors
    ///
    /// Returns an error if the record fails its CRC or does not decode.
    pub fn try_load(&mut self) -> Result<Option<Settings>> {
        let words: [u32; RECORD_WORDS] =
            core::array::from_fn(|offset| self.registers.read_scratch(self.index(offset)));
        decode(words)
    }

    /// Writes the record.
    ///
    /// # Errors
    ///
    /// Returns an error if `settings` does not fit the record's payload.
    pub fn save(&mut self, settings: &Settings) -> Result<()> {
        let words = encode(settings)?;
        for (offset, word) in words.into_iter().enumerate() {
            let index = self.index(offset);
            self.registers.write_scratch(index, word);
        }
        Ok(())
    }

    #[must_use]
    pub const fn registers(&self) -> &S {
        &self.registers
    }

    /// The register bank, e.g. to service a watchdog that owns it.
    pub const fn registers_mut(&mut self) -> &mut S {
        &mut self.registers
    }

    const fn index(&self, offset: usize) -> usize {
        self.first.saturating_add(offset)
    }
}

impl<S: ScratchRegisters> ConfigStore for ScratchStore<S> {
    fn load(&mut self) -> Settings {
        match self.try_load() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(_err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "Stored settings unusable, using defaults: {}",
                    defmt::Display2Format(&_err)
                );
                Settings::default()
            }
        }
    }

    fn write(&mut self, settings: &Settings) {
        if let Err(_err) = self.save(settings) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Settings not saved: {}", defmt::Display2Format(&_err));
        }
    }
}

/// Encodes `settings` as a scratch record.
///
/// # Errors
///
/// Returns an error if `settings` does not fit the record's payload.
pub fn encode(settings: &Settings) -> Result<[u32; RECORD_WORDS]> {
    let mut payload = [0_u8; PAYLOAD_BYTES];
    postcard::to_slice(settings, &mut payload)?;
    Ok([MAGIC, u32::from_le_bytes(payload), compute_crc(&payload)])
}

/// Decodes a scratch record.
///
/// # Errors
///
/// Returns an error if the record fails its CRC or does not decode.
pub fn decode([magic, payload, crc]: [u32; RECORD_WORDS]) -> Result<Option<Settings>> {
    if magic != MAGIC {
        return Ok(None);
    }
    let payload = payload.to_le_bytes();
    if compute_crc(&payload) != crc {
        return Err(Error::SettingsCorrupted);
    }
    Ok(Some(postcard::from_bytes(&payload)?))
}

fn compute_crc(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}
