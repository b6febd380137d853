//! UUIDv1 and UUIDv4 generator and related types.

use crate::source::{RandSource, StdSystemTime, TimeSource};
use crate::{GenerateError, Uuid};

pub mod with_rand08;


/// The number of milliseconds between the UUID epoch (1582-10-15 00:00:00 UTC) and the Unix
/// epoch.
pub const UUID_EPOCH_OFFSET_MS: u64 = 12_219_292_800_000;

/// The largest Unix timestamp in milliseconds whose UUIDv1 timestamp fits in 60 bits.
pub const MAX_UNIX_TS_MS: u64 = (1 << 60) / 10_000 - UUID_EPOCH_OFFSET_MS;

const MAX_CLOCK_SEQ: u16 = (1 << 14) - 1;

/// Represents a UUIDv1 and UUIDv4 generator that encapsulates a node identifier and a clock
/// sequence.
///
/// The node identifier is a random 48-bit value with the multicast bit set, drawn once when the
/// generator is created. The clock sequence is drawn at random for the first UUIDv1 and whenever
/// the timestamp does not advance past the previous one (same millisecond or clock rollback);
/// otherwise it is incremented by one, wrapping around to zero after `0x3fff`. UUIDs generated
/// within the same millisecond are therefore distinguished only by a random 14-bit clock
/// sequence.
///
/// A generator is a plain value mutated through `&mut self`. The following example shares one
/// across threads using Rust's standard synchronization mechanism, which is what the
/// process-wide entry points such as [`v1()`](crate::v1) do.
///
/// # Examples
///
/// ```rust
/// use rfc4122::{DefaultRandSource, Generator};
/// use std::{sync, thread};
///
/// let g = sync::Arc::new(sync::Mutex::new(Generator::new(DefaultRandSource::detect())));
/// thread::scope(|s| {
///     for i in 0..4 {
///         let g = sync::Arc::clone(&g);
///         s.spawn(move || {
///             for _ in 0..8 {
///                 println!("{} by thread {}", g.lock().unwrap().generate_v1(), i);
///                 thread::yield_now();
///             }
///         });
///     }
/// });
/// ```
///
/// # Generator functions
///
/// | Version | Returns `Uuid`   | Writes into a buffer   |
/// | ------- | ---------------- | ---------------------- |
/// | 1       | [`generate_v1`]  | [`generate_v1_into`]   |
/// | 4       | [`generate_v4`]  | [`generate_v4_into`]   |
///
/// [`generate_v1_core`] takes the Unix timestamp as an argument instead of reading the clock.
///
/// [`generate_v1`]: Generator::generate_v1
/// [`generate_v1_into`]: Generator::generate_v1_into
/// [`generate_v1_core`]: Generator::generate_v1_core
/// [`generate_v4`]: Generator::generate_v4
/// [`generate_v4_into`]: Generator::generate_v4_into
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Generator<R, T = StdSystemTime> {
    timestamp: u64,
    clock_seq: Option<u16>,
    node: [u8; 6],

    /// The random number generator used by the generator.
    rng: R,

    /// The system clock used by the generator.
    time_source: T,
}

impl<R: RandSource> Generator<R> {
    /// Creates a generator instance that reads the system clock.
    pub fn new(rng: R) -> Self {
        Self::with_rand_and_time_sources(rng, StdSystemTime)
    }
}

/// Creates a generator instance from the default sources, that is, for
/// `Generator<DefaultRandSource>`, the strongest random number source available and the system
/// clock.
impl<R: RandSource + Default, T: TimeSource + Default> Default for Generator<R, T> {
    fn default() -> Self {
        Self::with_rand_and_time_sources(R::default(), T::default())
    }
}

impl<R: RandSource, T: TimeSource> Generator<R, T> {
    /// Creates a generator instance with specified random number and time sources.
    pub fn with_rand_and_time_sources(mut rng: R, time_source: T) -> Self {
        let mut node = [0u8; 6];
        node.copy_from_slice(&rng.next_u64().to_be_bytes()[2..]);
        // multicast bit marks the node as not being a real MAC address
        node[0] |= 0x01;
        tracing::debug!(node = ?node, "created UUID generator");

        Self {
            timestamp: 0,
            clock_seq: None,
            node,
            rng,
            time_source,
        }
    }

    /// Returns the node identifier embedded in every UUIDv1 from this generator.
    pub const fn node(&self) -> [u8; 6] {
        self.node
    }

    /// Generates a new UUIDv1 object from the current timestamp.
    ///
    /// # Panics
    ///
    /// Panics if the time source reports a timestamp greater than [`MAX_UNIX_TS_MS`]. The default
    /// [`StdSystemTime`] also panics if the system clock is set before 1970-01-01 00:00:00 UTC.
    pub fn generate_v1(&mut self) -> Uuid {
        let unix_ts_ms = self.time_source.unix_ts_ms();
        self.generate_v1_core(unix_ts_ms)
    }

    /// Generates a new UUIDv1 object from the current timestamp and writes its 16 bytes into
    /// `buf` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::BufferTooSmall`] if `buf` cannot hold 16 bytes at `offset`, in
    /// which case neither `buf` nor the generator state is modified.
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`generate_v1`](Self::generate_v1).
    pub fn generate_v1_into(
        &mut self,
        buf: &mut [u8],
        offset: usize,
    ) -> Result<(), GenerateError> {
        let dest = dest_slice(buf, offset)?;
        dest.copy_from_slice(self.generate_v1().as_bytes());
        Ok(())
    }

    /// Generates a new UUIDv1 object from the `unix_ts_ms` passed.
    ///
    /// The clock sequence is drawn at random if none has been established yet or if `unix_ts_ms`
    /// is smaller than or equal to the one passed in the previous call; otherwise the previous
    /// clock sequence plus one is used.
    ///
    /// # Panics
    ///
    /// Panics if `unix_ts_ms` is greater than [`MAX_UNIX_TS_MS`].
    pub fn generate_v1_core(&mut self, unix_ts_ms: u64) -> Uuid {
        assert!(
            unix_ts_ms <= MAX_UNIX_TS_MS,
            "`unix_ts_ms` must fit in a 60-bit UUID timestamp"
        );

        let clock_seq = match self.clock_seq {
            Some(prev) if unix_ts_ms > self.timestamp => prev.wrapping_add(1) & MAX_CLOCK_SEQ,
            Some(_) => {
                tracing::trace!(
                    previous = self.timestamp,
                    current = unix_ts_ms,
                    "clock did not advance; drawing new clock sequence"
                );
                self.rng.next_u32() as u16 & MAX_CLOCK_SEQ
            }
            None => self.rng.next_u32() as u16 & MAX_CLOCK_SEQ,
        };
        self.clock_seq = Some(clock_seq);
        self.timestamp = unix_ts_ms;

        // 100-nanosecond intervals since the UUID epoch
        let timestamp = (unix_ts_ms + UUID_EPOCH_OFFSET_MS) * 10_000;
        Uuid::from_fields_v1(
            timestamp as u32,
            (timestamp >> 32) as u16,
            (timestamp >> 48) as u16 & 0x0fff,
            clock_seq,
            self.node,
        )
    }

    /// Generates a new UUIDv4 object utilizing the random number generator inside.
    ///
    /// # Panics
    ///
    /// Panics if the random number generator fails to supply random data.
    pub fn generate_v4(&mut self) -> Uuid {
        self.try_generate_v4()
            .unwrap_or_else(|err| panic!("rfc4122: could not generate UUIDv4: {}", err))
    }

    /// Generates a new UUIDv4 object, or returns an error if the random number generator fails.
    pub fn try_generate_v4(&mut self) -> Result<Uuid, GenerateError> {
        let mut bytes = [0u8; 16];
        self.rng.try_fill_bytes(&mut bytes)?;
        Ok(Uuid::from_random_bytes_v4(bytes))
    }

    /// Generates a new UUIDv4 object and writes its 16 bytes into `buf` starting at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::BufferTooSmall`] if `buf` cannot hold 16 bytes at `offset`, or
    /// [`GenerateError::Entropy`] if the random number generator fails. `buf` is left untouched
    /// on error.
    pub fn generate_v4_into(
        &mut self,
        buf: &mut [u8],
        offset: usize,
    ) -> Result<(), GenerateError> {
        let dest = dest_slice(buf, offset)?;
        dest.copy_from_slice(self.try_generate_v4()?.as_bytes());
        Ok(())
    }
}

/// Returns the 16-byte window of `buf` starting at `offset`.
fn dest_slice(buf: &mut [u8], offset: usize) -> Result<&mut [u8], GenerateError> {
    let len = buf.len();
    offset
        .checked_add(16)
        .and_then(|end| buf.get_mut(offset..end))
        .ok_or(GenerateError::BufferTooSmall { len, offset })
}
