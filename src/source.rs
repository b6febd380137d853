//! Random number and clock sources consumed by [`Generator`](crate::Generator).

use rand::rngs::{adapter::ReseedingRng, OsRng, SmallRng};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha12Core;

/// A trait that defines the minimum random number generator interface for
/// [`Generator`](crate::Generator).
pub trait RandSource {
    /// Returns the next random `u32`.
    fn next_u32(&mut self) -> u32;

    /// Returns the next random `u64`.
    fn next_u64(&mut self) -> u64;

    /// Fills `dest` with random data, or reports why the source could not do so.
    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error>;
}

/// A trait that defines the minimum system clock interface for [`Generator`](crate::Generator).
pub trait TimeSource {
    /// Returns the current Unix timestamp in milliseconds.
    fn unix_ts_ms(&mut self) -> u64;
}

/// The default [`TimeSource`] that uses [`std::time::SystemTime`].
///
/// # Panics
///
/// [`unix_ts_ms`](TimeSource::unix_ts_ms) panics if the system clock is set before the Unix
/// epoch.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct StdSystemTime;

impl TimeSource for StdSystemTime {
    fn unix_ts_ms(&mut self) -> u64 {
        use std::time;
        time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .expect("clock may have gone backwards")
            .as_millis() as u64
    }
}

/// A cryptographically strong [`RandSource`] backed by the operating system.
///
/// It employs [`ChaCha12Core`] with [`ReseedingRng`] wrapper reseeded from [`OsRng`] to emulate
/// the strategy used by [`rand::rngs::ThreadRng`].
#[derive(Debug)]
pub struct SecureRandSource(ReseedingRng<ChaCha12Core, OsRng>);

impl SecureRandSource {
    /// Creates a source seeded from [`OsRng`], failing if the operating system cannot supply
    /// entropy.
    pub fn new() -> Result<Self, rand::Error> {
        let core = ChaCha12Core::from_rng(OsRng)?;
        Ok(Self(ReseedingRng::new(core, 1024 * 64, OsRng)))
    }
}

impl RandSource for SecureRandSource {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

/// A non-cryptographic [`RandSource`] used where no secure source is available.
#[derive(Clone, Debug)]
pub struct PseudoRandSource(SmallRng);

impl PseudoRandSource {
    /// Creates a source seeded from the system clock and the process ID.
    pub fn new() -> Self {
        use std::time;
        let nanos = time::SystemTime::now()
            .duration_since(time::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos() as u64);
        Self::from_seed(nanos ^ (u64::from(std::process::id()) << 32))
    }

    /// Creates a source with a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }
}

impl Default for PseudoRandSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandSource for PseudoRandSource {
    fn next_u32(&mut self) -> u32 {
        self.0.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.next_u64()
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.0.try_fill_bytes(dest)
    }
}

/// The [`RandSource`] chosen once by capability detection: secure when the operating system
/// supplies entropy, pseudo-random otherwise.
#[derive(Debug)]
pub enum DefaultRandSource {
    /// Backed by [`SecureRandSource`].
    Secure(SecureRandSource),
    /// Backed by [`PseudoRandSource`].
    Pseudo(PseudoRandSource),
}

impl DefaultRandSource {
    /// Probes the operating system entropy source and picks the strongest source available.
    pub fn detect() -> Self {
        match SecureRandSource::new() {
            Ok(secure) => {
                tracing::debug!("using operating system entropy for random numbers");
                Self::Secure(secure)
            }
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    "secure random source unavailable; falling back to pseudo-random numbers"
                );
                Self::Pseudo(PseudoRandSource::new())
            }
        }
    }

    /// Returns `true` if the source is cryptographically strong.
    pub fn is_secure(&self) -> bool {
        matches!(self, Self::Secure(_))
    }
}

impl Default for DefaultRandSource {
    fn default() -> Self {
        Self::detect()
    }
}

impl RandSource for DefaultRandSource {
    fn next_u32(&mut self) -> u32 {
        match self {
            Self::Secure(inner) => inner.next_u32(),
            Self::Pseudo(inner) => inner.next_u32(),
        }
    }

    fn next_u64(&mut self) -> u64 {
        match self {
            Self::Secure(inner) => inner.next_u64(),
            Self::Pseudo(inner) => inner.next_u64(),
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        match self {
            Self::Secure(inner) => inner.try_fill_bytes(dest),
            Self::Pseudo(inner) => inner.try_fill_bytes(dest),
        }
    }
}
