use std::fmt;

/// How [`EventHub::off`](crate::EventHub::off) treats a listener registered
/// more than once for the same event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RemovalPolicy {
    /// Remove only the earliest matching registration.
    #[default]
    FirstMatch,
    /// Remove every matching registration, keeping the others in order.
    AllMatches,
}

impl fmt::Display for RemovalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemovalPolicy::FirstMatch => write!(f, "first-match"),
            RemovalPolicy::AllMatches => write!(f, "all-matches"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_match() {
        assert_eq!(RemovalPolicy::default(), RemovalPolicy::FirstMatch);
    }

    #[test]
    fn display_names() {
        assert_eq!(RemovalPolicy::FirstMatch.to_string(), "first-match");
        assert_eq!(RemovalPolicy::AllMatches.to_string(), "all-matches");
    }
}
