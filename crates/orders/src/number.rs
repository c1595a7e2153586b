//! Order number generation.
//!
//! Format: `YYYYMMDD-HHMMSS-mmm-XXXXXXXXXXXX` — a millisecond-precision
//! timestamp followed by a 12-character uppercase random suffix. The suffix
//! space (16^12 = 2^48) makes collisions negligible at realistic concurrency,
//! but generation alone does not guarantee uniqueness: the order store
//! enforces a uniqueness constraint and the fulfillment service treats a
//! violation as a retryable collision.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::order::OrderNumber;

/// Number of characters in the random suffix.
pub const SUFFIX_LEN: usize = 12;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S-%3f";

/// Injectable time source.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Injectable randomness for the order-number suffix.
pub trait SuffixSource: Send + Sync {
    /// Produce a fresh [`SUFFIX_LEN`]-character uppercase suffix.
    fn suffix(&self) -> String;
}

/// Default suffix source: the first [`SUFFIX_LEN`] hex characters of a
/// UUIDv4, uppercased.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSuffix;

impl SuffixSource for UuidSuffix {
    fn suffix(&self) -> String {
        Uuid::new_v4().simple().to_string()[..SUFFIX_LEN].to_uppercase()
    }
}

/// Seam between the fulfillment service and number generation, so tests can
/// inject deterministic sequences.
pub trait OrderNumberSource: Send + Sync {
    fn next(&self) -> OrderNumber;
}

/// Order number generator. Stateless apart from its clock and randomness;
/// callable concurrently from any number of callers with no coordination.
#[derive(Debug, Clone)]
pub struct OrderNumberGenerator<C = SystemClock, S = UuidSuffix> {
    clock: C,
    suffixes: S,
}

impl OrderNumberGenerator {
    pub fn new() -> Self {
        Self::with_parts(SystemClock, UuidSuffix)
    }
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock, S: SuffixSource> OrderNumberGenerator<C, S> {
    pub fn with_parts(clock: C, suffixes: S) -> Self {
        Self { clock, suffixes }
    }

    pub fn next(&self) -> OrderNumber {
        let timestamp = self.clock.now().format(TIMESTAMP_FORMAT);
        OrderNumber::new(format!("{timestamp}-{}", self.suffixes.suffix()))
    }
}

impl<C: Clock, S: SuffixSource> OrderNumberSource for OrderNumberGenerator<C, S> {
    fn next(&self) -> OrderNumber {
        OrderNumberGenerator::next(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    struct FixedSuffix(&'static str);

    impl SuffixSource for FixedSuffix {
        fn suffix(&self) -> String {
            self.0.to_string()
        }
    }

    fn test_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(589))
            .unwrap()
    }

    fn assert_order_number_shape(value: &str) {
        let parts: Vec<&str> = value.split('-').collect();
        assert_eq!(parts.len(), 4, "unexpected shape: {value}");
        assert_eq!(parts[0].len(), 8);
        assert_eq!(parts[1].len(), 6);
        assert_eq!(parts[2].len(), 3);
        assert_eq!(parts[3].len(), SUFFIX_LEN);
        assert!(parts[..3]
            .iter()
            .all(|p| p.chars().all(|c| c.is_ascii_digit())));
        assert!(parts[3]
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn injected_clock_yields_deterministic_timestamp() {
        let generator = OrderNumberGenerator::with_parts(
            FixedClock(test_instant()),
            FixedSuffix("0A1B2C3D4E5F"),
        );
        assert_eq!(
            generator.next().as_str(),
            "20260314-092653-589-0A1B2C3D4E5F"
        );
    }

    #[test]
    fn generated_numbers_match_the_documented_shape() {
        let generator = OrderNumberGenerator::new();
        for _ in 0..100 {
            assert_order_number_shape(generator.next().as_str());
        }
    }

    #[test]
    fn same_millisecond_calls_produce_distinct_numbers() {
        // Freeze the clock so only the random suffix can differ.
        let generator = OrderNumberGenerator::with_parts(FixedClock(test_instant()), UuidSuffix);
        let first = generator.next();
        let second = generator.next();
        assert_ne!(first, second);
    }
}
