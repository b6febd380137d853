//! Default generator and entry point functions.

#![cfg(feature = "global_gen")]
#![cfg_attr(docsrs, doc(cfg(feature = "global_gen")))]

use std::sync;

use crate::{GenerateError, Uuid};
use inner::GlobalGenInner;

/// Returns the lock handle of process-wide global generator, creating one if none exists.
fn lock_global_gen() -> sync::MutexGuard<'static, GlobalGenInner> {
    static G: sync::OnceLock<sync::Mutex<GlobalGenInner>> = sync::OnceLock::new();
    G.get_or_init(Default::default)
        .lock()
        .expect("rfc4122: could not lock global generator")
}

/// Generates a UUIDv1 object.
///
/// This function employs a global generator that holds the process-wide node identifier and clock
/// sequence. Identifiers generated within the same millisecond get freshly drawn random clock
/// sequences. On Unix, this function resets the generator when the process ID changes (i.e., upon
/// process forks) so that the child process gets its own node identifier.
///
/// # Panics
///
/// Panics if the system clock is set before 1970-01-01 00:00:00 UTC.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::v1();
/// println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
/// println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
///
/// let uuid_string: String = rfc4122::v1().to_string();
/// ```
pub fn v1() -> Uuid {
    lock_global_gen().get_mut().generate_v1()
}

/// Generates a UUIDv1 and writes its 16 bytes into `buf` starting at `offset`.
///
/// # Examples
///
/// ```rust
/// let mut buf = [0u8; 20];
/// rfc4122::v1_into(&mut buf, 4)?;
/// assert_eq!(buf[..4], [0u8; 4]);
/// assert_eq!(buf[10] >> 4, 1);
/// # Ok::<(), rfc4122::GenerateError>(())
/// ```
pub fn v1_into(buf: &mut [u8], offset: usize) -> Result<(), GenerateError> {
    lock_global_gen().get_mut().generate_v1_into(buf, offset)
}

/// Generates a UUIDv4 object.
///
/// # Panics
///
/// Panics if the random number generator fails to supply random data.
///
/// # Examples
///
/// ```rust
/// let uuid = rfc4122::v4();
/// println!("{}", uuid); // e.g., "6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b"
/// ```
pub fn v4() -> Uuid {
    lock_global_gen().get_mut().generate_v4()
}

/// Generates a UUIDv4 and writes its 16 bytes into `buf` starting at `offset`.
///
/// # Examples
///
/// ```rust
/// let mut buf = [0u8; 16];
/// rfc4122::v4_into(&mut buf, 0)?;
/// assert_eq!(buf[6] >> 4, 4);
/// # Ok::<(), rfc4122::GenerateError>(())
/// ```
pub fn v4_into(buf: &mut [u8], offset: usize) -> Result<(), GenerateError> {
    lock_global_gen().get_mut().generate_v4_into(buf, offset)
}

mod inner {
    use crate::{source::DefaultRandSource, Generator};

    /// A thin wrapper to reset the state when the process ID changes (i.e., upon Unix forks).
    #[derive(Debug)]
    pub struct GlobalGenInner {
        #[cfg(unix)]
        pid: u32,
        generator: Generator<DefaultRandSource>,
    }

    impl Default for GlobalGenInner {
        fn default() -> Self {
            Self {
                #[cfg(unix)]
                pid: std::process::id(),
                generator: Generator::new(DefaultRandSource::detect()),
            }
        }
    }

    impl GlobalGenInner {
        /// Returns a mutable reference to the inner [`Generator`] instance, reseting the generator
        /// state on Unix if the process ID has changed.
        pub fn get_mut(&mut self) -> &mut Generator<DefaultRandSource> {
            #[cfg(unix)]
            if self.pid != std::process::id() {
                tracing::debug!(
                    parent = self.pid,
                    child = std::process::id(),
                    "process forked; resetting global UUID generator"
                );
                *self = Default::default();
            }
            &mut self.generator
        }
    }
}

#[cfg(test)]
mod tests_v1 {
    use super::v1;
    use crate::Variant;

    const N_SAMPLES: usize = 100_000;
    thread_local!(static SAMPLES: Vec<String> = (0..N_SAMPLES).map(|_| v1().into()).collect());

    /// Generates canonical string
    #[test]
    fn generates_canonical_string() {
        let pattern = r"^[0-9a-f]{8}-[0-9a-f]{4}-1[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$";
        let re = regex::Regex::new(pattern).unwrap();
        SAMPLES.with(|samples| {
            for e in samples {
                assert!(re.is_match(e));
            }
        });
    }

    /// Encodes non-decreasing timestamps in a single thread
    #[test]
    fn encodes_non_decreasing_timestamps_in_a_single_thread() {
        let timestamp = |e: &str| -> u64 {
            let digits = format!("{}{}{}", &e[15..18], &e[9..13], &e[..8]);
            u64::from_str_radix(&digits, 16).unwrap()
        };
        SAMPLES.with(|samples| {
            for w in samples.windows(2) {
                assert!(timestamp(&w[0]) <= timestamp(&w[1]));
            }
        });
    }

    /// Shares one node identifier across calls
    #[test]
    fn shares_one_node_identifier_across_calls() {
        SAMPLES.with(|samples| {
            let node = &samples[0][24..];
            for e in samples {
                assert_eq!(&e[24..], node);
            }
        });
    }

    /// Sets multicast bit of node identifier
    #[test]
    fn sets_multicast_bit_of_node_identifier() {
        SAMPLES.with(|samples| {
            for e in samples {
                let first_octet = u8::from_str_radix(&e[24..26], 16).unwrap();
                assert_eq!(first_octet & 0x01, 0x01);
            }
        });
    }

    /// Sets correct variant and version bits
    #[test]
    fn sets_correct_variant_and_version_bits() {
        for _ in 0..1_000 {
            let e = v1();
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
        }
    }

    /// Generates valid IDs with one shared node identifier under multithreading
    #[test]
    fn generates_valid_ids_with_one_shared_node_identifier_under_multithreading(
    ) -> Result<(), Box<dyn std::error::Error>> {
        use std::{collections::HashSet, sync::mpsc, thread};

        let (tx, rx) = mpsc::channel();
        for _ in 0..4 {
            let tx = tx.clone();
            thread::Builder::new()
                .spawn(move || {
                    for _ in 0..10_000 {
                        tx.send(v1()).unwrap();
                    }
                })
                .map_err(|err| format!("failed to spawn thread: {:?}", err))?;
        }
        drop(tx);

        let mut count = 0;
        let mut nodes = HashSet::new();
        while let Ok(e) = rx.recv() {
            assert_eq!(e.variant(), Variant::Var10);
            assert_eq!(e.version(), Some(1));
            nodes.insert(<[u8; 6]>::try_from(&e.as_bytes()[10..]).unwrap());
            count += 1;
        }

        assert_eq!(count, 4 * 10_000);
        assert_eq!(nodes.len(), 1);
        Ok(())
    }

    /// Writes into caller buffer at offset
    #[test]
    fn writes_into_caller_buffer_at_offset() {
        let mut buf = [0xffu8; 24];
        super::v1_into(&mut buf, 4).unwrap();
        assert_eq!(buf[..4], [0xff; 4]);
        assert_eq!(buf[20..], [0xff; 4]);
        assert_eq!(buf[4 + 6] >> 4, 1);
        assert_eq!(buf[4 + 8] >> 6, 0b10);
        assert!(super::v1_into(&mut buf, 9).is_err());
    }
}
