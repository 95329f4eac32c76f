//! Fixed-capacity, NUL-terminated buffers with bounded copies.
//!
//! Every copy into a [`FixedBuffer`] is checked against the buffer capacity before a single byte is written. Input
//! that does not fit is reported as [`CopyError::InputTooLarge`]; what happens to the destination in that case is
//! governed by the [`OverflowPolicy`]:
//!
//! - [`OverflowPolicy::Reject`] leaves the destination untouched
//! - [`OverflowPolicy::Truncate`] stores the longest prefix that fits
//!
//! Neither policy ever writes past the end of the buffer, and neither silently succeeds.
//!
//! # Example
//! ```
//! use bounded_copy_buffer::{CopyError, FixedBuffer, OverflowPolicy};
//!
//! let mut buffer = FixedBuffer::<10>::new();
//! buffer.copy_from_str("hello").unwrap();
//! assert_eq!(buffer.to_string(), "hello");
//!
//! let err = buffer
//!     .copy_str_with("This string is way too long", OverflowPolicy::Reject)
//!     .unwrap_err();
//! assert!(matches!(err, CopyError::InputTooLarge(_)));
//! assert_eq!(buffer.to_string(), "hello");
//! ```
pub use crate::{
    buffer::FixedBuffer,
    error::{CopyError, LimitExceeded},
    policy::{OverflowPolicy, UnknownPolicy},
};

mod buffer;
mod error;
mod policy;
