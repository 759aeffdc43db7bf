//! Time helpers.
//!
//! The platform's home timezone is Philippine Standard Time (UTC+8); all
//! server-generated timestamps use it.

use chrono::{DateTime, FixedOffset, Utc};

/// Get current Unix timestamp in PHT (milliseconds)
pub fn now_pht_timestamp() -> i64 {
    let pht_offset = FixedOffset::east_opt(8 * 3600).unwrap(); // PHT is UTC+8
    let now_utc = Utc::now();
    let now_pht: DateTime<FixedOffset> = now_utc.with_timezone(&pht_offset);
    now_pht.timestamp_millis()
}
