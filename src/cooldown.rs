use std::collections::HashMap;

use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownDecision {
    Allowed,
    OnCooldown { remaining_ms: i64 },
}

/// Per-user debounce: a user may run one command per window.
///
/// Entries are overwritten on every allowed use and never evicted.
pub struct CooldownTracker {
    window_ms: i64,
    last_seen: Mutex<HashMap<String, i64>>,
}

impl CooldownTracker {
    pub fn new(window_ms: i64) -> Self {
        Self {
            window_ms,
            last_seen: Mutex::new(HashMap::new()),
        }
    }

    /// Allow and record `now_ms` for `user_id`, unless the previous allowed call is still
    /// within the window, in which case nothing is recorded.
    pub async fn check_and_record(&self, user_id: &str, now_ms: i64) -> CooldownDecision {
        let mut last_seen = self.last_seen.lock().await;

        if let Some(&last) = last_seen.get(user_id) {
            let elapsed = now_ms - last;
            if elapsed < self.window_ms {
                return CooldownDecision::OnCooldown {
                    remaining_ms: self.window_ms - elapsed,
                };
            }
        }

        last_seen.insert(user_id.to_string(), now_ms);
        CooldownDecision::Allowed
    }

    /// Number of users ever seen.
    pub async fn tracked_users(&self) -> usize {
        self.last_seen.lock().await.len()
    }
}
