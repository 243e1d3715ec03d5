//! Target domain validation for resolved URLs.

use std::fmt;
use std::str::FromStr;

/// How a host is compared against the configured domain suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DomainMatch {
    /// Host equals the suffix or ends with `.` followed by the suffix.
    #[default]
    LabelBoundary,
    /// Plain string suffix check. `evilamazon.it` matches `amazon.it`.
    Suffix,
}

impl FromStr for DomainMatch {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" => Ok(Self::LabelBoundary),
            "suffix" => Ok(Self::Suffix),
            other => Err(format!("unknown domain match mode '{other}'")),
        }
    }
}

impl fmt::Display for DomainMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelBoundary => write!(f, "label"),
            Self::Suffix => write!(f, "suffix"),
        }
    }
}

/// Decides whether a host belongs to the target marketplace domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainMatcher {
    suffix: String,
    mode: DomainMatch,
}

impl DomainMatcher {
    pub fn new(suffix: &str, mode: DomainMatch) -> Self {
        Self {
            suffix: normalize_host(suffix),
            mode,
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn mode(&self) -> DomainMatch {
        self.mode
    }

    /// Returns true if `host` belongs to the target domain.
    ///
    /// Comparison is ASCII case-insensitive and ignores a trailing root dot.
    /// The host must not carry a port.
    pub fn is_target_domain(&self, host: &str) -> bool {
        let host = normalize_host(host);
        if host.is_empty() || self.suffix.is_empty() {
            return false;
        }

        match self.mode {
            DomainMatch::Suffix => host.ends_with(&self.suffix),
            DomainMatch::LabelBoundary => {
                host == self.suffix
                    || host
                        .strip_suffix(&self.suffix)
                        .is_some_and(|rest| rest.ends_with('.'))
            }
        }
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}
