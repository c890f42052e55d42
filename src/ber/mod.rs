//! The TLV machinery: tag constants, the length codec, a cursor-style
//! [`Decoder`], and the back-to-front [`EncodeBuf`].
//!
//! Everything here follows X.690 on the encode side and is deliberately
//! forgiving on the decode side (padded integers, non-minimal lengths,
//! the 0x10 sequence tag), since real agents emit all of those.

mod decode;
mod encode;
mod length;
pub mod tag;

pub use decode::*;
pub use encode::*;
pub use length::*;
