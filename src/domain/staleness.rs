//! Staleness policy for cached domain batches.

use chrono::{DateTime, Utc};

use super::Domain;

/// Returns true when a batch of `age_minutes` must be refetched.
///
/// The comparison is strict: a batch exactly at the threshold is still fresh.
#[must_use]
pub fn is_stale(domain: Domain, age_minutes: f64) -> bool {
    #[allow(clippy::cast_precision_loss)]
    let threshold = domain.staleness_threshold_minutes() as f64;
    age_minutes > threshold
}

/// Outcome of inspecting the stored batch for a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No rows stored for the location.
    Miss,
    /// Rows stored and young enough to serve.
    Fresh,
    /// Rows stored but past the domain threshold.
    Stale,
}

impl CacheState {
    /// Classifies a batch from the `created_time` of its first row.
    #[must_use]
    pub fn classify(
        domain: Domain,
        created_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        let Some(created_time) = created_time else {
            return Self::Miss;
        };

        #[allow(clippy::cast_precision_loss)]
        let age_minutes = (now - created_time).num_milliseconds() as f64 / 60_000.0;

        if is_stale(domain, age_minutes) {
            Self::Stale
        } else {
            Self::Fresh
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Miss => "miss",
            Self::Fresh => "fresh",
            Self::Stale => "stale",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[test]
    fn age_equal_to_threshold_is_fresh() {
        for domain in Domain::ALL {
            #[allow(clippy::cast_precision_loss)]
            let threshold = domain.staleness_threshold_minutes() as f64;
            assert!(!is_stale(domain, threshold), "{domain} at threshold");
            assert!(is_stale(domain, threshold + 0.01), "{domain} past threshold");
        }
    }

    #[test]
    fn weather_goes_stale_after_half_an_hour() {
        assert!(!is_stale(Domain::Weather, 29.0));
        assert!(is_stale(Domain::Weather, 45.0));
        assert!(!is_stale(Domain::Trails, 45.0));
    }

    #[test]
    fn classify_without_rows_is_miss() {
        assert_eq!(
            CacheState::classify(Domain::Movies, None, Utc::now()),
            CacheState::Miss
        );
    }

    #[test]
    fn classify_uses_batch_age() {
        let now = Utc::now();

        let at_threshold = now - TimeDelta::minutes(30);
        assert_eq!(
            CacheState::classify(Domain::Weather, Some(at_threshold), now),
            CacheState::Fresh
        );

        let old = now - TimeDelta::minutes(45);
        assert_eq!(
            CacheState::classify(Domain::Weather, Some(old), now),
            CacheState::Stale
        );
        assert_eq!(
            CacheState::classify(Domain::Restaurants, Some(old), now),
            CacheState::Fresh
        );
    }

    #[test]
    fn future_timestamps_are_fresh() {
        let now = Utc::now();
        let ahead = now + TimeDelta::minutes(90);
        assert_eq!(
            CacheState::classify(Domain::Weather, Some(ahead), now),
            CacheState::Fresh
        );
    }
}
