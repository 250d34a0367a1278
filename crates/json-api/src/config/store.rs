//! Store Config

use std::{path::PathBuf, time::Duration};

use alero_app::domain::dispatch::DEFAULT_TIME_ZONE;
use clap::Args;

/// Store scheduling settings.
#[derive(Debug, Args)]
pub struct StoreSettings {
    /// IANA time zone dispatch cutoffs are evaluated in
    #[arg(long = "store-time-zone", env = "STORE_TIME_ZONE", default_value = DEFAULT_TIME_ZONE)]
    pub time_zone: String,

    /// YAML dispatch rule table; the built-in table is used when unset
    #[arg(long, env = "DISPATCH_RULES_PATH")]
    pub dispatch_rules_path: Option<PathBuf>,

    /// Seconds a cart may sit untouched before it is discarded; 0 keeps carts forever
    #[arg(long, env = "CART_IDLE_TTL_SECONDS", default_value_t = 86_400)]
    pub cart_idle_ttl_seconds: u64,
}

impl StoreSettings {
    /// Idle lifetime of a session cart, if carts expire at all.
    #[must_use]
    pub fn cart_idle_ttl(&self) -> Option<Duration> {
        (self.cart_idle_ttl_seconds > 0).then(|| Duration::from_secs(self.cart_idle_ttl_seconds))
    }
}
