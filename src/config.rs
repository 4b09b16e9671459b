//! Codec configuration.
//!
//! [`CodecConfig`] is built with chained setters starting from its default:
//!
//! ```
//! use snmp_varvalue::{CodecConfig, UnsignedTagPolicy};
//!
//! let config = CodecConfig::new()
//!     .unsigned_tags(UnsignedTagPolicy::TimeTicksCompat)
//!     .max_length(64 * 1024)
//!     .strict_exceptions(true);
//! assert_eq!(config.max_length_limit(), 64 * 1024);
//! ```

use crate::ber::{MAX_LENGTH, tag};

/// Which tags the unsigned value kinds are written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnsignedTagPolicy {
    /// Counter32 0x41, Gauge32 0x42, TimeTicks 0x43.
    #[default]
    Distinct,
    /// Gauge32 and Counter32 are written with the TimeTicks tag (0x43).
    ///
    /// Some legacy peers emit this. Values encoded this way decode back as
    /// TimeTicks, so only use it to talk to a peer that needs it.
    TimeTicksCompat,
}

impl UnsignedTagPolicy {
    /// Wire tag for Counter32 under this policy.
    pub const fn counter32_tag(self) -> u8 {
        match self {
            Self::Distinct => tag::application::COUNTER32,
            Self::TimeTicksCompat => tag::application::TIMETICKS,
        }
    }

    /// Wire tag for Gauge32 under this policy.
    pub const fn gauge32_tag(self) -> u8 {
        match self {
            Self::Distinct => tag::application::GAUGE32,
            Self::TimeTicksCompat => tag::application::TIMETICKS,
        }
    }
}

/// Settings shared by value encoding and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    unsigned_tags: UnsignedTagPolicy,
    max_length: usize,
    strict_exceptions: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            unsigned_tags: UnsignedTagPolicy::Distinct,
            max_length: MAX_LENGTH,
            strict_exceptions: false,
        }
    }
}

impl CodecConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tag policy for Gauge32 and Counter32.
    pub fn unsigned_tags(mut self, policy: UnsignedTagPolicy) -> Self {
        self.unsigned_tags = policy;
        self
    }

    /// Set the largest content length accepted when decoding.
    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = max;
        self
    }

    /// Reject exception markers that carry content instead of skipping it.
    pub fn strict_exceptions(mut self, strict: bool) -> Self {
        self.strict_exceptions = strict;
        self
    }

    /// Current unsigned tag policy.
    pub fn unsigned_tag_policy(&self) -> UnsignedTagPolicy {
        self.unsigned_tags
    }

    /// Current decode length limit.
    pub fn max_length_limit(&self) -> usize {
        self.max_length
    }

    /// Whether exception content is rejected.
    pub fn is_strict_exceptions(&self) -> bool {
        self.strict_exceptions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CodecConfig::default();
        assert_eq!(config.unsigned_tag_policy(), UnsignedTagPolicy::Distinct);
        assert_eq!(config.max_length_limit(), MAX_LENGTH);
        assert!(!config.is_strict_exceptions());
    }

    #[test]
    fn test_policy_tags() {
        assert_eq!(UnsignedTagPolicy::Distinct.counter32_tag(), 0x41);
        assert_eq!(UnsignedTagPolicy::Distinct.gauge32_tag(), 0x42);
        assert_eq!(UnsignedTagPolicy::TimeTicksCompat.counter32_tag(), 0x43);
        assert_eq!(UnsignedTagPolicy::TimeTicksCompat.gauge32_tag(), 0x43);
    }
}
