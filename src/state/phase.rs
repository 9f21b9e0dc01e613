/// Crawl controller phase definitions
use std::fmt;

/// Represents the current phase of a crawl run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Pages are still being fetched and accumulated
    Running,

    /// A termination condition fired; results are ready for the sinks
    Done,

    /// The retry budget was exhausted or the run was cancelled
    Failed,
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Running => "running",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlPhase::Running), "running");
        assert_eq!(format!("{}", CrawlPhase::Done), "done");
        assert_eq!(format!("{}", CrawlPhase::Failed), "failed");
    }
}
