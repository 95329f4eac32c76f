//! Fixed-capacity buffer.

use std::{borrow::Cow, ffi::CStr};

use crate::{
    error::{CopyError, LimitExceeded},
    policy::OverflowPolicy,
};

/// A fixed-capacity, NUL-terminated byte buffer of `N` bytes in total.
///
/// The terminator counts towards the capacity, so at most [`MAX_LEN`](Self::MAX_LEN) `= N - 1` content bytes fit.
/// The buffer does not allocate: it lives wherever its owner puts it, usually on the stack.
///
/// # Invariants
/// The following properties hold after every operation, including failed ones:
///
/// - `len() < N`
/// - the byte at `len()` is the NUL terminator
/// - the content contains no NUL byte
/// - all bytes past the terminator are zero
///
/// Because of the last property, comparing two buffers compares their contents.
#[derive(Clone, PartialEq, Eq)]
pub struct FixedBuffer<const N: usize> {
    /// Backing storage.
    data: [u8; N],

    /// Content length in bytes, excluding the terminator.
    len: usize,
}

impl<const N: usize> FixedBuffer<N> {
    /// Total capacity in bytes, terminator included.
    pub const CAPACITY: usize = N;

    /// Maximum content length in bytes, terminator excluded.
    pub const MAX_LEN: usize = N - 1;

    /// Create a new, empty buffer.
    ///
    /// A zero-sized buffer cannot even hold the terminator and is rejected at compile time.
    pub const fn new() -> Self {
        const { assert!(N > 0, "FixedBuffer capacity must be > 0") };

        Self {
            data: [0; N],
            len: 0,
        }
    }

    /// Content length in bytes, terminator excluded.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the buffer holds the empty string.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Content, terminator excluded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Content, terminator included.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.data[..=self.len]
    }

    /// Content as C string.
    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_with_nul(self.as_bytes_with_nul())
            .expect("content has no NUL byte and is terminated")
    }

    /// Content as UTF-8, replacing invalid sequences with `U+FFFD`.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    /// Reset to the empty string.
    pub fn clear(&mut self) {
        self.data[..self.len].fill(0);
        self.len = 0;
    }

    /// Copy `src`, rejecting input that does not fit.
    ///
    /// Same as [`copy_bytes_with`](Self::copy_bytes_with) with [`OverflowPolicy::Reject`].
    pub fn copy_from_bytes(&mut self, src: &[u8]) -> Result<(), CopyError> {
        self.copy_bytes_with(src, OverflowPolicy::Reject)
    }

    /// Copy `src`, rejecting input that does not fit.
    ///
    /// Same as [`copy_str_with`](Self::copy_str_with) with [`OverflowPolicy::Reject`].
    pub fn copy_from_str(&mut self, src: &str) -> Result<(), CopyError> {
        self.copy_str_with(src, OverflowPolicy::Reject)
    }

    /// Copy `src`, rejecting input that does not fit.
    ///
    /// Same as [`copy_c_str_with`](Self::copy_c_str_with) with [`OverflowPolicy::Reject`].
    pub fn copy_from_c_str(&mut self, src: &CStr) -> Result<(), CopyError> {
        self.copy_c_str_with(src, OverflowPolicy::Reject)
    }

    /// Copy raw bytes.
    ///
    /// # Errors
    /// - [`CopyError::InteriorNul`] if `src` contains a NUL byte anywhere, even past the capacity. The buffer is left
    ///   untouched.
    /// - [`CopyError::InputTooLarge`] if `src` is longer than [`MAX_LEN`](Self::MAX_LEN). The buffer is handled
    ///   according to `policy`.
    pub fn copy_bytes_with(&mut self, src: &[u8], policy: OverflowPolicy) -> Result<(), CopyError> {
        check_no_nul(src)?;
        self.copy_checked(src, src.len().min(Self::MAX_LEN), policy)
    }

    /// Copy a string.
    ///
    /// Under [`OverflowPolicy::Truncate`], the stored prefix ends on a UTF-8 character boundary.
    ///
    /// # Errors
    /// See [`copy_bytes_with`](Self::copy_bytes_with).
    pub fn copy_str_with(&mut self, src: &str, policy: OverflowPolicy) -> Result<(), CopyError> {
        check_no_nul(src.as_bytes())?;
        self.copy_checked(
            src.as_bytes(),
            src.floor_char_boundary(Self::MAX_LEN),
            policy,
        )
    }

    /// Copy a C string, terminator excluded.
    ///
    /// # Errors
    /// [`CopyError::InputTooLarge`] if `src` is longer than [`MAX_LEN`](Self::MAX_LEN). The buffer is handled
    /// according to `policy`.
    pub fn copy_c_str_with(&mut self, src: &CStr, policy: OverflowPolicy) -> Result<(), CopyError> {
        let src = src.to_bytes();
        self.copy_checked(src, src.len().min(Self::MAX_LEN), policy)
    }

    /// Copy NUL-free `src`.
    ///
    /// `fit` is the length of the prefix stored under [`OverflowPolicy::Truncate`]; it MUST NOT exceed
    /// [`MAX_LEN`](Self::MAX_LEN).
    fn copy_checked(
        &mut self,
        src: &[u8],
        fit: usize,
        policy: OverflowPolicy,
    ) -> Result<(), CopyError> {
        let len = src.len();
        if len <= Self::MAX_LEN {
            self.write(src);
            return Ok(());
        }

        let e = LimitExceeded {
            name: "buffer",
            limit: Self::MAX_LEN as u64,
            requested: len as u64,
        };
        match policy {
            OverflowPolicy::Reject => {
                log::debug!("rejected copy: {e}");
            }
            OverflowPolicy::Truncate => {
                log::debug!("truncated copy to {fit} bytes: {e}");
                self.write(&src[..fit]);
            }
        }
        Err(e.into())
    }

    /// Replace the content.
    ///
    /// # Panic
    /// The caller MUST ensure that `src` has no NUL byte and is at most [`MAX_LEN`](Self::MAX_LEN) bytes long,
    /// otherwise this method panics.
    fn write(&mut self, src: &[u8]) {
        let len = src.len();
        assert!(len <= Self::MAX_LEN);
        debug_assert!(!src.contains(&0));

        self.data[..len].copy_from_slice(src);

        // zero the terminator and whatever is left over from a longer previous content
        let tail_end = self.len.max(len);
        self.data[len..=tail_end].fill(0);

        self.len = len;
    }
}

impl<const N: usize> Default for FixedBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> std::fmt::Debug for FixedBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixedBuffer")
            .field("capacity", &N)
            .field("content", &self.as_c_str())
            .finish()
    }
}

impl<const N: usize> std::fmt::Display for FixedBuffer<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl<const N: usize> AsRef<[u8]> for FixedBuffer<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> TryFrom<&[u8]> for FixedBuffer<N> {
    type Error = CopyError;

    fn try_from(src: &[u8]) -> Result<Self, Self::Error> {
        let mut buffer = Self::new();
        buffer.copy_from_bytes(src)?;
        Ok(buffer)
    }
}

impl<const N: usize> TryFrom<&str> for FixedBuffer<N> {
    type Error = CopyError;

    fn try_from(src: &str) -> Result<Self, Self::Error> {
        let mut buffer = Self::new();
        buffer.copy_from_str(src)?;
        Ok(buffer)
    }
}

impl<const N: usize> TryFrom<&CStr> for FixedBuffer<N> {
    type Error = CopyError;

    fn try_from(src: &CStr) -> Result<Self, Self::Error> {
        let mut buffer = Self::new();
        buffer.copy_from_c_str(src)?;
        Ok(buffer)
    }
}

/// Fail if `src` contains a NUL byte.
fn check_no_nul(src: &[u8]) -> Result<(), CopyError> {
    match src.iter().position(|b| *b == 0) {
        Some(position) => Err(CopyError::InteriorNul { position }),
        None => Ok(()),
    }
}


#[cfg(kani)]
mod verification {
    use super::*;

    /// Length of the symbolic input.
    const INPUT_LEN: usize = 5;

    #[kani::proof]
    #[kani::unwind(7)]
    fn check_copy_keeps_invariant() {
        let mut buffer = FixedBuffer::<3>::new();

        let prev: [u8; 2] = kani::any();
        let prev_len: usize = kani::any();
        kani::assume(prev_len <= prev.len());
        let _ = buffer.copy_from_bytes(&prev[..prev_len]);
        let before = buffer.clone();

        let src: [u8; INPUT_LEN] = kani::any();
        let len: usize = kani::any();
        kani::assume(len <= INPUT_LEN);
        let src = &src[..len];
        let policy = if kani::any() {
            OverflowPolicy::Reject
        } else {
            OverflowPolicy::Truncate
        };

        let res = buffer.copy_bytes_with(src, policy);

        assert!(buffer.len < 3);
        assert_eq!(buffer.data[buffer.len], 0);
        assert!(buffer.data[buffer.len..].iter().all(|b| *b == 0));
        assert!(!buffer.as_bytes().contains(&0));

        match res {
            Ok(()) => assert_eq!(buffer.as_bytes(), src),
            Err(CopyError::InteriorNul { position }) => {
                assert_eq!(src[position], 0);
                assert!(buffer == before);
            }
            Err(CopyError::InputTooLarge(_)) => {
                assert!(len > FixedBuffer::<3>::MAX_LEN);
                match policy {
                    OverflowPolicy::Reject => assert!(buffer == before),
                    OverflowPolicy::Truncate => assert_eq!(buffer.as_bytes(), &src[..2]),
                }
            }
        }
    }
}
