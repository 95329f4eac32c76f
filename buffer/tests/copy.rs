#![expect(
    // Docs are not strictly required for tests.
    missing_docs,
    // unused-crate-dependencies false positives
    unused_crate_dependencies,
)]

use bounded_copy_buffer::{CopyError, FixedBuffer, LimitExceeded, OverflowPolicy};

/// Buffer under test.
type Buffer = FixedBuffer<10>;

/// Input of the given length without NUL bytes.
fn input(len: usize) -> Vec<u8> {
    (0..len).map(|i| b'a' + (i % 26) as u8).collect()
}

#[test]
fn test_fits() {
    for len in 0..=Buffer::MAX_LEN {
        let src = input(len);
        for policy in OverflowPolicy::ALL {
            let mut buffer = Buffer::new();
            buffer.copy_bytes_with(&src, policy).unwrap();

            let mut expected = src.clone();
            expected.push(0);
            assert_eq!(buffer.as_bytes_with_nul(), expected);
        }
    }
}

#[test]
fn test_too_large() {
    for len in Buffer::CAPACITY..=(4 * Buffer::CAPACITY) {
        let src = input(len);
        let expected_err = CopyError::InputTooLarge(LimitExceeded {
            name: "buffer",
            limit: 9,
            requested: len as u64,
        });

        let mut buffer = Buffer::try_from("previous").unwrap();
        let err = buffer
            .copy_bytes_with(&src, OverflowPolicy::Reject)
            .unwrap_err();
        assert_eq!(err, expected_err);
        assert_eq!(buffer.as_bytes(), b"previous");

        let err = buffer
            .copy_bytes_with(&src, OverflowPolicy::Truncate)
            .unwrap_err();
        assert_eq!(err, expected_err);
        assert_eq!(buffer.as_bytes(), &src[..Buffer::MAX_LEN]);
        assert_eq!(buffer.as_bytes_with_nul().len(), Buffer::CAPACITY);
    }
}

#[test]
fn test_sequence() {
    let mut buffer = Buffer::new();

    buffer.copy_from_str("hello").unwrap();
    buffer
        .copy_from_str("This string is way too long and will overflow the buffer")
        .unwrap_err();
    buffer.copy_from_str("hi").unwrap();
    buffer
        .copy_str_with("truncated input", OverflowPolicy::Truncate)
        .unwrap_err();

    insta::assert_snapshot!(
        format!("{buffer:?}"),
        @r#"FixedBuffer { capacity: 10, content: "truncated" }"#,
    );
}

#[test]
fn test_idempotent() {
    for len in 0..=Buffer::MAX_LEN {
        let src = input(len);
        let mut buffer = Buffer::new();

        buffer.copy_from_bytes(&src).unwrap();
        let first = buffer.clone();
        buffer.copy_from_bytes(&src).unwrap();

        assert_eq!(buffer, first);
    }
}

#[test]
fn test_err_io() {
    let mut buffer = Buffer::new();
    let err: std::io::Error = buffer.copy_from_str("0123456789").unwrap_err().into();
    assert_eq!(err.kind(), std::io::ErrorKind::QuotaExceeded);
}
