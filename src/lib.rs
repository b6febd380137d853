//! RFC4122 UUID version 1 and version 4 generation
//!
//! ```rust
//! let uuid = rfc4122::v4();
//! println!("{}", uuid); // e.g., "6ec0bd7f-11c0-43da-975e-2a8ad9ebae0b"
//! println!("{:?}", uuid.as_bytes()); // as 16-byte big-endian array
//!
//! let uuid = rfc4122::v1();
//! println!("{}", uuid); // e.g., "c232ab00-9414-11ec-b3c8-9f6bdeced846"
//! ```
//!
//! See [RFC 4122](https://www.rfc-editor.org/rfc/rfc4122).
//!
//! # Field and bit layout
//!
//! Version 1 identifiers have the following bit layout:
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                          time_low                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |       time_mid                |  ver  |       time_high       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |var|         clock_seq         |             node              |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |                              node                             |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! Where:
//!
//! - The 60-bit timestamp split into `time_low`, `time_mid`, and `time_high` counts
//!   100-nanosecond intervals since 1582-10-15 00:00:00 UTC. This library derives it from the
//!   system clock in milliseconds, so the lowest digits are always zero.
//! - The 4-bit `ver` field is set at `0001`.
//! - The 2-bit `var` field is set at `10`.
//! - The 14-bit `clock_seq` field is randomly initialized, incremented by one when the
//!   millisecond timestamp advances, and randomly reinitialized whenever it does not (another ID
//!   within the same millisecond or a clock rollback).
//! - The 48-bit `node` field is a random number drawn once per generator (and thus once per
//!   process for [`v1()`]) with the multicast bit set, so it never collides with a real MAC
//!   address.
//!
//! Version 4 identifiers carry the same `ver` (`0100`) and `var` fields, and the remaining 122
//! bits are filled with a cryptographically strong random number whenever the operating system
//! provides one.
//!
//! # Crate features
//!
//! Default features:
//!
//! - `global_gen`: enables the primary [`v1()`] and [`v4()`] functions and their buffer-writing
//!   variants backed by a process-wide generator.
//!
//! Optional features:
//!
//! - `serde`: enables serialization/deserialization of [`Uuid`] via serde.
//! - `uuid`: enables conversion from/to [`uuid::Uuid`](https://docs.rs/uuid).
//!
//! # Logging
//!
//! This library emits diagnostic events through [`tracing`](https://docs.rs/tracing): which
//! random number source was selected, clock sequence reinitializations, and
//! generator resets upon process forks. It never installs a subscriber.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod id;
pub use id::{Uuid, Variant};

mod codec;
pub use codec::{parse, unparse};

mod error;
pub use error::{GenerateError, ParseError};

pub mod source;
pub use source::DefaultRandSource;

pub mod generator;
pub use generator::Generator;

mod global_gen;
#[cfg(feature = "global_gen")]
pub use global_gen::{v1, v1_into, v4, v4_into};
