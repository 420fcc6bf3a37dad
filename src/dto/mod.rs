use time::{OffsetDateTime, macros::format_description};

/// Health check payloads.
pub mod health;
/// Match control requests and scoreboard responses.
pub mod scoreboard;
/// Match settings payload.
pub mod settings;
/// Server-sent event payloads.
pub mod sse;
/// Team profile payloads.
pub mod team;
/// Play-by-play transcript payload.
pub mod transcript;
/// Custom validators shared by DTOs.
pub mod validation;

/// `HH:MM:SS` stamp prefixed to transcript lines.
pub fn format_wall_clock(time: OffsetDateTime) -> String {
    time.format(format_description!("[hour]:[minute]:[second]"))
        .unwrap_or_else(|_| "--:--:--".into())
}

/// Current local time, or UTC when the local offset cannot be determined.
pub fn now_local() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
