//! Property-based tests for rust_log_pipeline using proptest

use proptest::prelude::*;
use rust_log_pipeline::core::{BufferPool, Record};
use rust_log_pipeline::prelude::*;
use std::io::Write;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop::sample::select(LogLevel::ALL.to_vec())
}

fn encode(record: &Record<'_>) -> String {
    let mut buf = EncoderBuffer::with_capacity(128);
    record.encode(&TimeLayout::default(), &mut buf);
    buf.to_string_lossy().into_owned()
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Level names parse back to the same level
    #[test]
    fn test_log_level_str_roundtrip(level in any_level()) {
        let parsed: LogLevel = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Ordering follows the declared discriminants
    #[test]
    fn test_log_level_ordering(level1 in any_level(), level2 in any_level()) {
        let val1 = level1 as u8;
        let val2 = level2 as u8;

        prop_assert_eq!(level1 <= level2, val1 <= val2);
        prop_assert_eq!(level1 < level2, val1 < val2);
    }

    /// Only PUBLIC uses the `||` separator
    #[test]
    fn test_separator_by_level(level in any_level()) {
        let expected = if level == LogLevel::Public { "||" } else { " " };
        prop_assert_eq!(level.field_separator(), expected);
    }
}

// ============================================================================
// Field Tests
// ============================================================================

proptest! {
    #[test]
    fn test_int64_field_renders_decimal(value in any::<i64>()) {
        prop_assert_eq!(Field::int64("n", value).to_string(), format!("n={}", value));
    }

    #[test]
    fn test_uint64_field_renders_decimal(value in any::<u64>()) {
        prop_assert_eq!(Field::uint64("n", value).to_string(), format!("n={}", value));
    }

    #[test]
    fn test_uintptr_field_renders_hex(value in any::<usize>()) {
        prop_assert_eq!(Field::uintptr("p", value).to_string(), format!("p={:#x}", value));
    }

    /// The bit pattern survives storage, so the text matches the original value
    #[test]
    fn test_float64_field_preserves_value(value in any::<f64>()) {
        prop_assert_eq!(Field::float64("f", value).to_string(), format!("f={}", value));
    }

    #[test]
    fn test_string_field_never_breaks_line(key in "[a-z]{1,8}", value in ".*") {
        let rendered = Field::string(key.as_str(), value.as_str()).to_string();
        prop_assert!(!rendered.contains('\n'));
        prop_assert!(!rendered.contains('\r'));
        let prefix = format!("{}=", key);
        prop_assert!(rendered.starts_with(&prefix));
    }
}

// ============================================================================
// Record encoding Tests
// ============================================================================

proptest! {
    /// Whatever the message, a record is exactly one terminated line
    #[test]
    fn test_record_is_one_line(level in any_level(), message in ".*", value in ".*") {
        let fields = [Field::string("v", value.as_str())];
        let structured = encode(&Record::structured(level, None, &message, &fields));
        prop_assert!(structured.ends_with('\n'));
        prop_assert_eq!(structured.matches('\n').count(), 1);
        prop_assert!(!structured.contains('\r'));

        let positional = encode(&Record::positional(level, None, format_args!("{}", message)));
        prop_assert_eq!(positional.matches('\n').count(), 1);
    }

    /// Structured body is the message followed by one separated pair per field
    #[test]
    fn test_structured_body_layout(
        level in any_level(),
        message in "[a-z ]{0,16}",
        values in prop::collection::vec(any::<i64>(), 0..6),
    ) {
        let fields: Vec<Field<'_>> = values.iter().map(|v| Field::int64("k", *v)).collect();
        let line = encode(&Record::structured(level, None, &message, &fields));

        let mut expected = format!("[{}] [:] {}", level, message);
        for v in &values {
            expected.push_str(level.field_separator());
            expected.push_str(&format!("k={}", v));
        }
        expected.push('\n');
        prop_assert!(line.ends_with(&expected), "{:?} does not end with {:?}", line, expected);
    }
}

// ============================================================================
// Buffer pool Tests
// ============================================================================

proptest! {
    /// A released buffer comes back empty with its capacity intact
    #[test]
    fn test_pool_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..512), level in any_level()) {
        let pool = BufferPool::new(4, 1024);
        let mut buf = pool.acquire(level);
        buf.write_all(&bytes).unwrap();
        let capacity = buf.capacity();
        pool.release(buf);

        let again = pool.acquire(LogLevel::Info);
        prop_assert!(again.is_empty());
        prop_assert_eq!(again.capacity(), capacity);
        prop_assert_eq!(again.level(), LogLevel::Info);
        prop_assert_eq!(pool.allocated(), 1);
    }
}

// ============================================================================
// Logger Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Records below the floor never reach the channel
    #[test]
    fn test_level_gate(floor in any_level(), level in any_level()) {
        let logger = Logger::builder().level(floor).build().unwrap();
        logger.log(level, format_args!("probe")).unwrap();

        let expected = if level >= floor { 1 } else { 0 };
        prop_assert_eq!(logger.metrics().total_enqueued(), expected);
        logger.close().unwrap();
    }
}
