#![expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

use pretty_assertions::assert_eq;
use risk_diagnostic::{catch_fatal, FatalKind, FatalReport};

use super::*;

/// Run `f`, which must hit a fatal check, and return the report.
fn fatal<R>(f: impl FnOnce() -> R) -> FatalReport {
    catch_fatal(f).map(|_| ()).unwrap_err()
}

fn filled(n: u32) -> Buffer<u32> {
    let mut buf = Buffer::alloc(0);
    for v in 0..n {
        buf.push(v);
    }
    buf
}

// === Lifecycle ===

#[test]
fn alloc_zero_has_no_storage() {
    let buf: Buffer<u32> = Buffer::alloc(0);
    assert_eq!(buf.len(), 0);
    assert_eq!(buf.capacity(), 0);
    assert!(buf.is_empty());
    buf.dealloc();
}

#[test]
fn alloc_reserves_exact_capacity() {
    let buf: Buffer<u64> = Buffer::alloc(10);
    assert_eq!(buf.capacity(), 10);
    assert_eq!(buf.len(), 0);
}

#[test]
fn alloc_failure_is_reported() {
    let err = Buffer::<u64>::try_alloc(usize::MAX).unwrap_err();
    assert_eq!(
        err,
        BufferError::AllocationFailure {
            requested: usize::MAX
        }
    );

    let report = fatal(|| Buffer::<u64>::alloc(usize::MAX));
    assert!(report.message.starts_with("AllocationFailure"));
}

#[test]
fn default_is_empty() {
    let buf: Buffer<String, u16> = Buffer::default();
    assert!(buf.is_empty());
    assert_eq!(buf.capacity(), 0);
}

// === Growth ===

#[test]
fn capacity_sequence_from_empty() {
    let mut buf: Buffer<i32, u8> = Buffer::alloc(0);
    let mut seen = vec![buf.capacity()];
    for v in 0..48 {
        buf.push(v);
        if *seen.last().unwrap() != buf.capacity() {
            seen.push(buf.capacity());
        }
    }
    assert_eq!(seen, [0, 3, 6, 12, 24, 48]);
}

#[test]
fn reserve_guarantees_room() {
    let mut buf = filled(5);
    buf.reserve(20);
    assert!(buf.capacity() >= buf.len() + 20);
}

#[test]
fn reserve_never_shrinks() {
    let mut buf: Buffer<u8> = Buffer::alloc(100);
    buf.reserve(0);
    buf.reserve(1);
    assert_eq!(buf.capacity(), 100);
}

#[test]
fn reserve_overflow_is_allocation_failure() {
    let mut buf = filled(2);
    let before = buf.capacity();
    assert_eq!(
        buf.try_reserve(usize::MAX),
        Err(BufferError::AllocationFailure {
            requested: usize::MAX
        })
    );
    assert_eq!(buf.capacity(), before);

    let report = fatal(|| buf.reserve(usize::MAX));
    assert_eq!(report.kind, FatalKind::Assert);
    assert!(report.message.starts_with("AllocationFailure"));
}

#[test]
fn growth_preserves_elements() {
    let mut buf = filled(3);
    buf.reserve(1000);
    assert_eq!(buf.as_slice(), [0, 1, 2]);
}

// === Push / pop ===

#[test]
fn push_appends_at_end() {
    let mut buf = filled(4);
    buf.push(99);
    assert_eq!(buf.len(), 5);
    assert_eq!(buf.at(4), 99);
    assert!(buf.capacity() >= buf.len());
}

#[test]
fn pop_is_lifo() {
    let mut buf = filled(3);
    buf.push(7);
    assert_eq!(buf.pop(), 7);
    assert_eq!(buf.len(), 3);
    assert_eq!(buf.pop(), 2);
    assert_eq!(buf.pop(), 1);
    assert_eq!(buf.pop(), 0);
    assert!(buf.is_empty());
}

#[test]
fn pop_empty_is_underflow() {
    let mut buf: Buffer<u32> = Buffer::new();
    assert_eq!(buf.try_pop(), Err(BufferError::Empty));

    let expected_line = line!() + 1;
    let report = fatal(|| buf.pop());
    assert_eq!(report.message, "Underflow: buffer is empty");
    assert_eq!(report.assertion.map(|a| a.expr), Some("!self.is_empty()"));
    assert_eq!(report.caller.line, expected_line);
    assert!(report.caller.file.ends_with("tests.rs"));
}

#[test]
fn pop_n_truncates() {
    let mut buf = filled(6);
    buf.pop_n(4);
    assert_eq!(buf.as_slice(), [0, 1]);
    buf.pop_n(0);
    assert_eq!(buf.len(), 2);
    buf.pop_n(2);
    assert!(buf.is_empty());
}

#[test]
fn pop_n_past_len_leaves_buffer_unchanged() {
    let mut buf = filled(3);
    let report = fatal(|| buf.pop_n(4));
    assert_eq!(
        report.message,
        "Underflow: cannot pop 4 from a buffer of len 3"
    );
    assert_eq!(buf.len(), 3);
}

#[test]
fn pop_n_keeps_capacity() {
    let mut buf = filled(12);
    let capacity = buf.capacity();
    buf.pop_n(12);
    assert_eq!(buf.capacity(), capacity);
}

// === Ids ===

#[test]
fn push_with_id_overflows_u8() {
    let mut buf: Buffer<i32, u8> = Buffer::alloc(0);
    for v in 0..255 {
        let expected = u8::try_from(v).unwrap();
        assert_eq!(buf.push_with_id(v), expected);
    }
    assert_eq!(buf.len(), 255);

    assert_eq!(
        buf.try_push_with_id(255),
        Err(BufferError::IndexOverflow {
            len: 255,
            limit: 255
        })
    );
    let report = fatal(|| buf.push_with_id(255));
    assert!(report.message.starts_with("IndexOverflow"));
    assert_eq!(buf.len(), 255);
}

#[test]
fn id_is_next_push_id() {
    let mut buf: Buffer<char, u16> = Buffer::alloc(0);
    assert_eq!(buf.id(), 0);
    buf.push('a');
    buf.push('b');
    assert_eq!(buf.id(), 2);
    assert_eq!(buf.push_with_id('c'), 2);
}

#[test]
fn id_overflows_at_index_max() {
    let mut buf: Buffer<(), u8> = Buffer::alloc(0);
    for _ in 0..255 {
        buf.push(());
    }
    assert!(buf.try_id().is_err());
    let report = fatal(|| buf.id());
    assert_eq!(report.assertion.map(|a| a.expr), Some("self.len() < I::MAX"));
}

crate::define_index! {
    struct TokenId(u16);
}

#[test]
fn newtype_ids_are_issued_in_order() {
    let mut tokens: Buffer<&str, TokenId> = Buffer::alloc(0);
    let a = tokens.push_with_id("let");
    let b = tokens.push_with_id("x");
    assert_eq!(a, TokenId::new(0));
    assert_eq!(b.raw(), 1);
    assert_eq!(tokens.at(b.index()), "x");
}

// === Element access ===

#[test]
fn at_out_of_bounds() {
    let buf = filled(3);
    assert_eq!(buf.at(2), 2);
    assert_eq!(
        buf.try_at(3),
        Err(BufferError::OutOfBounds { index: 3, len: 3 })
    );
    let report = fatal(|| buf.at(3));
    assert_eq!(
        report.message,
        "OutOfBounds: index `3` out of bounds (len 3)"
    );
}

#[test]
fn at_mut_writes_in_place() {
    let mut buf = filled(3);
    *buf.at_mut(1) = 50;
    assert_eq!(buf.as_slice(), [0, 50, 2]);

    let report = fatal(|| {
        buf.at_mut(3);
    });
    assert!(report.message.starts_with("OutOfBounds"));
}

#[test]
fn slice_bounds() {
    let buf = filled(5);
    assert_eq!(buf.slice(1, 3), [1, 2, 3]);
    assert_eq!(buf.slice(5, 0), []);
    assert_eq!(
        buf.try_slice(3, 3),
        Err(BufferError::RangeOutOfBounds {
            start: 3,
            len: 3,
            buffer_len: 5
        })
    );
    assert!(buf.try_slice(usize::MAX, 2).is_err());

    let report = fatal(|| buf.slice(4, 2));
    assert_eq!(
        report.message,
        "OutOfBounds: range `4` + 2 out of bounds (len 5)"
    );
    assert_eq!(
        report.assertion.map(|a| a.expr),
        Some("start + len <= self.len()")
    );
}

// === Extend ===

#[test]
fn extend_appends_in_order() {
    let mut buf = filled(2);
    let view = buf.extend(&[10, 11, 12]);
    assert_eq!(view, [10, 11, 12]);
    assert_eq!(buf.as_slice(), [0, 1, 10, 11, 12]);
}

#[test]
fn extend_empty_slice() {
    let mut buf = filled(2);
    assert!(buf.extend(&[]).is_empty());
    assert_eq!(buf.len(), 2);
}

#[test]
fn extend_indexed_survives_growth() {
    let mut buf: Buffer<u32, u32> = Buffer::alloc(0);
    buf.push(1);
    let range = buf.extend_indexed(&[5, 6, 7]);
    assert_eq!(range, IndexedRange::new(1, 3));

    buf.reserve(1000);
    for v in 0..100 {
        buf.push(v);
    }
    assert_eq!(buf.resolve(range), [5, 6, 7]);
}

#[test]
fn extend_indexed_start_must_fit_index() {
    let mut buf: Buffer<u8, u8> = Buffer::alloc(0);
    buf.extend(&[0; 250]);
    let range = buf.extend_indexed(&[1; 5]);
    assert_eq!(range.start(), 250);
    assert_eq!(buf.len(), 255);

    buf.push(2);
    let report = fatal(|| buf.extend_indexed(&[3]));
    assert!(report.message.starts_with("IndexOverflow"));
    assert_eq!(buf.len(), 256);
}

#[test]
fn resolve_stale_range_is_fatal() {
    let mut buf = filled(4);
    let range = IndexedRange::new(2, 2);
    buf.pop_n(3);
    assert!(buf.try_resolve(range).is_err());
    let report = fatal(|| buf.resolve(range));
    assert!(report.message.starts_with("OutOfBounds"));
}

#[test]
fn extend_from_range_copies_within() {
    let mut buf = filled(3);
    let src = IndexedRange::new(1, 2);
    let copy = buf.extend_from_range(src);
    assert_eq!(copy, IndexedRange::new(3, 2));
    assert_eq!(buf.as_slice(), [0, 1, 2, 1, 2]);

    assert!(buf.try_extend_from_range(IndexedRange::new(4, 5)).is_err());
    assert_eq!(buf.len(), 5);
}

// === Traits ===

#[test]
fn clone_keeps_capacity_and_elements() {
    let buf = filled(4);
    let copy = buf.clone();
    assert_eq!(copy.capacity(), buf.capacity());
    assert_eq!(copy.as_slice(), buf.as_slice());
}

#[test]
fn debug_shows_len_and_capacity() {
    let buf = filled(2);
    assert_eq!(
        format!("{buf:?}"),
        "Buffer { len: 2, capacity: 3, items: [0, 1] }"
    );
}

#[test]
fn iterates_in_order() {
    let buf = filled(4);
    let collected: Vec<u32> = buf.iter().copied().collect();
    assert_eq!(collected, [0, 1, 2, 3]);
    assert_eq!((&buf).into_iter().count(), 4);
}

// === Property tests ===

mod proptest_buffer {
    use super::super::Buffer;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        Push(i64),
        Pop,
        PopN(usize),
        Reserve(usize),
        Extend(Vec<i64>),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            any::<i64>().prop_map(Op::Push),
            Just(Op::Pop),
            (0usize..8).prop_map(Op::PopN),
            (0usize..64).prop_map(Op::Reserve),
            proptest::collection::vec(any::<i64>(), 0..16).prop_map(Op::Extend),
        ]
    }

    proptest! {
        #[test]
        fn matches_vec_model(ops in proptest::collection::vec(op(), 0..128)) {
            let mut buf: Buffer<i64, u32> = Buffer::alloc(0);
            let mut model: Vec<i64> = Vec::new();
            let mut capacity = buf.capacity();

            for op in ops {
                match op {
                    Op::Push(v) => {
                        buf.push(v);
                        model.push(v);
                        prop_assert_eq!(buf.at(buf.len() - 1), v);
                    }
                    Op::Pop => {
                        prop_assert_eq!(buf.try_pop().ok(), model.pop());
                    }
                    Op::PopN(n) => {
                        let ok = buf.try_pop_n(n).is_ok();
                        prop_assert_eq!(ok, n <= model.len());
                        if ok {
                            model.truncate(model.len() - n);
                        }
                    }
                    Op::Reserve(n) => {
                        buf.reserve(n);
                        prop_assert!(buf.capacity() >= buf.len() + n);
                    }
                    Op::Extend(items) => {
                        let start = buf.len();
                        let range = buf.extend_indexed(&items);
                        model.extend_from_slice(&items);
                        prop_assert_eq!(range.start(), start);
                        prop_assert_eq!(buf.resolve(range).as_slice(), items.as_slice());
                    }
                }

                prop_assert!(buf.capacity() >= capacity);
                prop_assert!(buf.len() <= buf.capacity());
                capacity = buf.capacity();
                prop_assert_eq!(buf.as_slice().as_slice(), model.as_slice());
            }
        }

        #[test]
        fn push_then_pop_restores(prefix in proptest::collection::vec(any::<u16>(), 0..64), v: u16) {
            let mut buf: Buffer<u16> = Buffer::alloc(0);
            buf.extend(&prefix);
            let len = buf.len();
            buf.push(v);
            prop_assert_eq!(buf.pop(), v);
            prop_assert_eq!(buf.len(), len);
        }
    }
}

// === Default termination ===

const CHILD_ENV: &str = "RISK_BUFFER_CHILD";

#[test]
fn pop_empty_in_child() {
    if std::env::var_os(CHILD_ENV).is_none() {
        return;
    }
    let mut buf: Buffer<u32> = Buffer::alloc(0);
    buf.pop();
}

#[test]
fn pop_empty_exits_with_annotated_report() {
    let output = std::process::Command::new(std::env::current_exe().unwrap())
        .args(["buffer::tests::pop_empty_in_child", "--exact", "--nocapture"])
        .env(CHILD_ENV, "1")
        .env("RISK_FATAL", "exit")
        .env("RISK_COLOR", "never")
        .env_remove("RUST_LOG")
        .output()
        .unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(
        stderr.contains("assert: Underflow: buffer is empty\n"),
        "stderr: {stderr}"
    );
    assert!(
        stderr.contains(" | risk_assert!(!self.is_empty(), ...)\n"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("^^^^^^^^^^^^^^^^ must be true\n"), "stderr: {stderr}");
}
