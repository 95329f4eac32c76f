//! Process untrusted input through a fixed-size buffer.
//!
//! The input is copied into a [`BUFFER_SIZE`]-byte [`FixedBuffer`] and echoed as a single `Processed: ...` line. The
//! hard-coded [`MALICIOUS_INPUT`] is far larger than that buffer; instead of writing past its end, the copy fails and
//! the failure is handed back to the caller.
use std::io::Write;

use bounded_copy_buffer::{CopyError, FixedBuffer, OverflowPolicy};
// only used by the binary
use env_logger as _;

/// Size of the buffer, terminator included.
pub const BUFFER_SIZE: usize = 10;

/// Input that does not fit into [`BUFFER_SIZE`] bytes.
pub const MALICIOUS_INPUT: &str = "This string is way too long and will overflow the buffer";

/// Copy `input` into a [`BUFFER_SIZE`]-byte buffer and write `Processed: <buffer>` to `out`.
///
/// The buffer content is printed lossily as UTF-8.
///
/// # Errors
/// - [`ProcessError::Copy`] if the input does not fit or contains a NUL byte. Nothing is written to `out`, except for
///   oversized input under [`OverflowPolicy::Truncate`], where the truncated content is still printed.
/// - [`ProcessError::Io`] if `out` fails.
pub fn process_input<W>(
    input: &[u8],
    policy: OverflowPolicy,
    out: &mut W,
) -> Result<(), ProcessError>
where
    W: Write,
{
    let mut buffer = FixedBuffer::<BUFFER_SIZE>::new();
    let res = buffer.copy_bytes_with(input, policy);

    let print = match &res {
        Ok(()) => true,
        Err(CopyError::InputTooLarge(_)) => policy == OverflowPolicy::Truncate,
        Err(CopyError::InteriorNul { .. }) => false,
    };
    if print {
        writeln!(out, "Processed: {buffer}")?;
    }

    res?;
    log::info!("processed {} bytes of input", buffer.len());
    Ok(())
}

/// Error of [`process_input`].
#[derive(Debug)]
pub enum ProcessError {
    /// Input was rejected or truncated.
    Copy(CopyError),

    /// Output could not be written.
    Io(std::io::Error),
}

impl std::fmt::Display for ProcessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Copy(e) => write!(f, "cannot process input: {e}"),
            Self::Io(e) => write!(f, "cannot write output: {e}"),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Copy(e) => Some(e),
            Self::Io(e) => Some(e),
        }
    }
}

impl From<CopyError> for ProcessError {
    fn from(e: CopyError) -> Self {
        Self::Copy(e)
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Run [`process_input`] and capture its output.
    fn run(input: &[u8], policy: OverflowPolicy) -> (String, Result<(), ProcessError>) {
        let mut out = Vec::new();
        let res = process_input(input, policy, &mut out);
        (String::from_utf8(out).unwrap(), res)
    }

    #[test]
    fn test_hello() {
        for policy in OverflowPolicy::ALL {
            let (out, res) = run(b"hello", policy);
            res.unwrap();
            assert_eq!(out, "Processed: hello\n");
        }
    }

    #[test]
    fn test_err_malicious_input_reject() {
        let (out, res) = run(MALICIOUS_INPUT.as_bytes(), OverflowPolicy::Reject);
        assert_eq!(out, "");
        insta::assert_snapshot!(
            res.unwrap_err(),
            @"cannot process input: input too large: buffer: got=56, limit=9",
        );
    }

    #[test]
    fn test_err_malicious_input_truncate() {
        let (out, res) = run(MALICIOUS_INPUT.as_bytes(), OverflowPolicy::Truncate);
        assert_eq!(out, "Processed: This stri\n");
        assert!(matches!(
            res,
            Err(ProcessError::Copy(CopyError::InputTooLarge(_)))
        ));
    }

    #[test]
    fn test_err_interior_nul() {
        for policy in OverflowPolicy::ALL {
            let (out, res) = run(b"a\0b", policy);
            assert_eq!(out, "");
            assert!(matches!(
                res,
                Err(ProcessError::Copy(CopyError::InteriorNul { position: 1 }))
            ));
            insta::allow_duplicates! {
                insta::assert_snapshot!(
                    res.unwrap_err(),
                    @"cannot process input: input contains NUL byte at position 1",
                );
            }
        }
    }

    #[test]
    fn test_non_utf8() {
        let (out, res) = run(b"\xffab", OverflowPolicy::Reject);
        res.unwrap();
        assert_eq!(out, "Processed: \u{FFFD}ab\n");
    }

    #[test]
    fn test_err_io() {
        /// Writer that always fails.
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("broken pipe"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let err = process_input(b"hello", OverflowPolicy::Reject, &mut Broken).unwrap_err();
        insta::assert_snapshot!(
            err,
            @"cannot write output: broken pipe",
        );
    }
}
