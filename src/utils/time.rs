use chrono::Utc;

/// Current Unix time in whole seconds, as carried in the handshake epoch field
pub fn current_timestamp_secs() -> u32 {
    Utc::now().timestamp().max(0) as u32
}
