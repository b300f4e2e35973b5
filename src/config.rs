//! Compile-time settings for the swipe deck and the Supabase backend.

/// Fraction of the screen width a drag must exceed to commit a swipe.
pub const SWIPE_THRESHOLD_FRACTION: f64 = 0.25;

/// How far past the screen edge a committed card flies before it is replaced.
pub const FLING_OVERSHOOT_PX: f64 = 100.0;

/// Duration of the off-screen fling after a commit.
pub const FLING_DURATION_MS: f64 = 250.0;

/// Maximum card tilt, reached at half a screen width of drag.
pub const MAX_ROTATION_DEG: f64 = 10.0;

/// Spring used to return a cancelled card to the center.
pub const SPRING_STIFFNESS: f64 = 230.2;
pub const SPRING_DAMPING: f64 = 22.0;
pub const SPRING_MASS: f64 = 1.0;
pub const SPRING_REST_DISPLACEMENT: f64 = 0.001;
pub const SPRING_REST_SPEED: f64 = 0.001;

/// Interval between animation ticks while a card is moving on its own.
pub const FRAME_MS: f64 = 16.0;

/// Pointer travel below which a press on the card counts as a tap.
pub const TAP_SLOP_PX: f64 = 6.0;

/// Width assumed when the browser window cannot be queried.
pub const FALLBACK_SCREEN_WIDTH: f64 = 390.0;

/// Stand-in submitter identity until real accounts exist.
pub const PLACEHOLDER_USER_ID: &str = "demo-user";

pub const CANDIDATES_TABLE: &str = "friends";
pub const BIDS_TABLE: &str = "bids";

const DEFAULT_SUPABASE_URL: &str = "http://localhost:54321";
const DEFAULT_SUPABASE_ANON_KEY: &str = "";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Reads `SUPABASE_URL` and `SUPABASE_ANON_KEY` as they were set when the
    /// crate was compiled; wasm has no process environment at runtime.
    pub fn from_env() -> Self {
        let url = option_env!("SUPABASE_URL").unwrap_or(DEFAULT_SUPABASE_URL);
        let key = option_env!("SUPABASE_ANON_KEY").unwrap_or(DEFAULT_SUPABASE_ANON_KEY);
        if key.is_empty() {
            log::warn!("SUPABASE_ANON_KEY not set at build time, requests will be anonymous");
        }
        Self::new(url, key)
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_strips_trailing_slash() {
        let config = GatewayConfig::new("https://abc.supabase.co/", "key");
        assert_eq!(
            config.table_url(CANDIDATES_TABLE),
            "https://abc.supabase.co/rest/v1/friends"
        );
    }
}
