#![no_main]
use bounded_copy_buffer::{CopyError, FixedBuffer, OverflowPolicy};
use libfuzzer_sys::fuzz_target;

/// Feed arbitrary bytes through both overflow policies.
///
/// The first byte selects the policy, the rest is the input. The copy must never panic and the buffer must stay
/// terminated within its capacity.
fuzz_target!(|data: &[u8]| {
    let Some((selector, src)) = data.split_first() else {
        return;
    };
    let policy = if selector % 2 == 0 {
        OverflowPolicy::Reject
    } else {
        OverflowPolicy::Truncate
    };

    let mut buffer = FixedBuffer::<10>::new();
    let res = buffer.copy_bytes_with(src, policy);

    let stored = buffer.as_bytes_with_nul();
    assert!(stored.len() <= 10);
    assert_eq!(stored.last(), Some(&0));
    assert!(!buffer.as_bytes().contains(&0));

    match res {
        Ok(()) => assert_eq!(buffer.as_bytes(), src),
        Err(CopyError::InteriorNul { position }) => {
            assert_eq!(src[position], 0);
            assert!(buffer.is_empty());
        }
        Err(CopyError::InputTooLarge(_)) => {
            assert!(src.len() >= 10);
            match policy {
                OverflowPolicy::Reject => assert!(buffer.is_empty()),
                OverflowPolicy::Truncate => assert_eq!(buffer.as_bytes(), &src[..9]),
            }
        }
    }
});
