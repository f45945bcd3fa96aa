//! Per-client daily request quotas.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use parking_lot::Mutex;

/// Drafting requests allowed per client and window.
pub const DRAFT_LIMIT: u32 = 3;
/// PDF exports allowed per client and window.
pub const EXPORT_LIMIT: u32 = 1;

#[derive(Debug, Clone, Copy)]
struct Window {
    start: DateTime<Utc>,
    count: u32,
}

/// Fixed-window request counter keyed by client address.
///
/// A window opens at a client's first counted request and lasts one day. Refused requests are
/// not counted. The exempt address is never counted nor refused. Expired windows are evicted
/// whenever a new client is first seen, so the map only holds clients active within a day.
#[derive(Debug)]
pub struct DailyQuota {
    limit: u32,
    window: TimeDelta,
    exempt: Option<String>,
    hits: Mutex<HashMap<String, Window>>,
}

impl DailyQuota {
    /// Allows `limit` requests per client per day.
    #[must_use]
    pub fn new(limit: u32, exempt: Option<String>) -> Self {
        Self {
            limit,
            window: TimeDelta::days(1),
            exempt: exempt.filter(|ip| !ip.is_empty()),
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Counts a request from `client` now; `false` means it must be refused.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Utc::now())
    }

    /// Counts a request from `client` at `now`; `false` means it must be refused.
    pub fn check_at(&self, client: &str, now: DateTime<Utc>) -> bool {
        if self.exempt.as_deref() == Some(client) {
            return true;
        }

        let mut hits = self.hits.lock();
        if !hits.contains_key(client) {
            hits.retain(|_, w| now - w.start < self.window);
        }
        let window = hits.entry(client.to_string()).or_insert(Window {
            start: now,
            count: 0,
        });
        if now - window.start >= self.window {
            *window = Window {
                start: now,
                count: 0,
            };
        }
        if window.count >= self.limit {
            tracing::info!(client, limit = self.limit, "Rate limit reached");
            return false;
        }
        window.count += 1;
        true
    }
}

/// The quotas guarding the web endpoints.
#[derive(Debug)]
pub struct Quotas {
    /// Guards `POST /`.
    pub draft: DailyQuota,
    /// Guards `POST /export`.
    pub export: DailyQuota,
}

impl Quotas {
    /// Standard limits, exempting `home_ip`.
    #[must_use]
    pub fn new(home_ip: Option<String>) -> Self {
        Self {
            draft: DailyQuota::new(DRAFT_LIMIT, home_ip.clone()),
            export: DailyQuota::new(EXPORT_LIMIT, home_ip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hours: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap() + TimeDelta::hours(hours)
    }

    #[test]
    fn fourth_request_in_a_day_is_refused() {
        let quota = DailyQuota::new(3, None);
        assert!(quota.check_at("10.0.0.1", at(0)));
        assert!(quota.check_at("10.0.0.1", at(1)));
        assert!(quota.check_at("10.0.0.1", at(2)));
        assert!(!quota.check_at("10.0.0.1", at(3)));
        assert!(quota.check_at("10.0.0.2", at(3)));
    }

    #[test]
    fn window_reopens_after_a_day() {
        let quota = DailyQuota::new(1, None);
        assert!(quota.check_at("10.0.0.1", at(0)));
        assert!(!quota.check_at("10.0.0.1", at(23)));
        assert!(quota.check_at("10.0.0.1", at(24)));
        assert!(!quota.check_at("10.0.0.1", at(30)));
    }

    #[test]
    fn exempt_address_is_never_limited() {
        let quota = DailyQuota::new(1, Some("203.0.113.7".into()));
        for hour in 0..10 {
            assert!(quota.check_at("203.0.113.7", at(hour)));
        }
        assert!(quota.check_at("10.0.0.1", at(0)));
        assert!(!quota.check_at("10.0.0.1", at(1)));
    }

    #[test]
    fn expired_windows_are_evicted() {
        let quota = DailyQuota::new(3, None);
        for n in 0..1_000 {
            assert!(quota.check_at(&format!("10.0.{}.{}", n / 256, n % 256), at(0)));
        }
        assert!(quota.check_at("10.0.0.1", at(12)));
        assert_eq!(quota.hits.lock().len(), 1_000);

        assert!(quota.check_at("192.0.2.1", at(24 * 30)));
        assert_eq!(quota.hits.lock().len(), 1);
        assert!(quota.hits.lock().contains_key("192.0.2.1"));
    }

    #[test]
    fn eviction_keeps_live_windows() {
        let quota = DailyQuota::new(1, None);
        assert!(quota.check_at("10.0.0.1", at(0)));
        assert!(quota.check_at("10.0.0.2", at(20)));
        assert!(quota.check_at("10.0.0.3", at(25)));
        assert!(!quota.check_at("10.0.0.2", at(26)));
        assert_eq!(quota.hits.lock().len(), 2);
    }

    #[test]
    fn empty_exempt_address_exempts_nobody() {
        let quota = DailyQuota::new(1, Some(String::new()));
        assert!(quota.check_at("", at(0)));
        assert!(!quota.check_at("", at(1)));
    }
}
