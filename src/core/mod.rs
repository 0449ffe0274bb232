//! # Core Codec Components
//!
//! Low-level wire primitives every message schema is built from.
//!
//! This module provides the foundation for the protocol: the bit-oriented
//! buffer cursors and the recurring domain value codecs layered on them.
//!
//! ## Components
//! - **Bit buffer**: [`BitWriter`]/[`BitReader`] with byte-aligned primitives
//!   and sub-byte bitfields
//! - **Guid**: packed mask-plus-nonzero-bytes identifier codec
//! - **Packed time**: 32-bit calendar word codec
//!
//! ## Wire Format
//! ```text
//! integers/floats  little-endian
//! bitfields        low-bit-first within each byte, zero-padded on flush
//! packed guid      [Mask(1)] [NonzeroBytes(popcount(mask))]
//! packed time      [CalendarWord(4)]
//! ```
//!
//! ## Security
//! - Every read is bounds-checked; underruns are typed errors, not panics
//! - Untrusted lengths are clamped before allocation

pub mod bit_buffer;
pub mod guid;
pub mod packed_time;

pub use bit_buffer::{BitReader, BitWriter};
pub use guid::Guid;
pub use packed_time::{pack_time, unpack_time};
