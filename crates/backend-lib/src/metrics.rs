// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const AUTH_REGISTER: &str = "auth.register";
pub const AUTH_LOGIN: &str = "auth.login";
pub const AUTH_LOGIN_FAILED: &str = "auth.login_failed";
pub const EVENTS_PUBLISHED: &str = "events.published";
pub const WS_VIEWERS: &str = "ws.viewers";
pub const HTTP_REQUEST_DURATION_MS: &str = "http.request_duration_ms";
