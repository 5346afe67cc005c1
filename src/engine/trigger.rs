//! Trigger scanning (input pre-classification).
//!
//! Before a cascade runs, the subject text is scanned once for a handful of
//! coarse features. Rules declare the features they cannot match without, and
//! the cascade skips them when a feature is missing.
//!
//! ## Design notes
//!
//! - This is a *heuristic* scan. False positives are fine because the rule
//!   pattern still has to match.
//! - Keep the scan cheap: one pass over the bytes, no allocation.

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS   = 1 << 0;
        const HAS_DOT      = 1 << 1;
        const HAS_COLON    = 1 << 2;
        const HAS_PLUS     = 1 << 3;
        const HAS_DASH     = 1 << 4;
        const HAS_BRACKET  = 1 << 5;
        const HAS_PAREN    = 1 << 6;
        const HAS_QUOTE    = 1 << 7;
        const HAS_HASH     = 1 << 8;
        const HAS_BREAK    = 1 << 9;
    }
}

/// Input characteristics detected from the subject text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TriggerInfo {
    pub buckets: BucketMask,
}

impl TriggerInfo {
    /// Scan `input` for coarse buckets.
    pub fn scan(input: &str) -> Self {
        let mut buckets = BucketMask::empty();

        for b in input.bytes() {
            buckets |= match b {
                b'0'..=b'9' => BucketMask::HAS_DIGITS,
                b'.' => BucketMask::HAS_DOT,
                b':' => BucketMask::HAS_COLON,
                b'+' => BucketMask::HAS_PLUS,
                b'-' => BucketMask::HAS_DASH,
                b'[' | b']' => BucketMask::HAS_BRACKET,
                b'(' | b')' => BucketMask::HAS_PAREN,
                b'"' | b'\'' => BucketMask::HAS_QUOTE,
                b'#' => BucketMask::HAS_HASH,
                _ => BucketMask::empty(),
            };
        }

        if input.contains("<br") {
            buckets |= BucketMask::HAS_BREAK;
        }

        Self { buckets }
    }

    /// True when every bucket in `required` was seen.
    pub fn satisfies(&self, required: BucketMask) -> bool {
        self.buckets.contains(required)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_collects_buckets() {
        let info = TriggerInfo::scan("[15.03.2014] CO+40 - \"Name\"<br />");
        for bucket in [
            BucketMask::HAS_DIGITS,
            BucketMask::HAS_DOT,
            BucketMask::HAS_PLUS,
            BucketMask::HAS_DASH,
            BucketMask::HAS_BRACKET,
            BucketMask::HAS_QUOTE,
            BucketMask::HAS_BREAK,
        ] {
            assert!(info.buckets.contains(bucket), "missing {bucket:?}");
        }
        assert!(!info.buckets.contains(BucketMask::HAS_COLON));
        assert!(!info.buckets.contains(BucketMask::HAS_HASH));
    }

    #[test]
    fn empty_requirement_is_always_satisfied() {
        assert!(TriggerInfo::scan("").satisfies(BucketMask::empty()));
        assert!(!TriggerInfo::scan("abc").satisfies(BucketMask::HAS_DIGITS));
        assert!(TriggerInfo::scan("#1").satisfies(BucketMask::HAS_DIGITS | BucketMask::HAS_HASH));
    }
}
