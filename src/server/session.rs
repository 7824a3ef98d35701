//! Cookie-keyed in-memory sessions for the admin area.
//!
//! Session ids are random v4 UUIDs handed out in an HttpOnly cookie and
//! kept in a process-local map with a 24 hour expiry. Restarting the server
//! logs everyone out.

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "desa_session";

const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
}

impl SessionStore {
    /// Mint a session for a logged-in admin and return its id.
    pub fn create(&self, username: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(
            id.clone(),
            Session {
                username: username.to_string(),
                expires_at: Utc::now() + Duration::hours(SESSION_TTL_HOURS),
            },
        );
        id
    }

    /// Username behind a live session id. Expired sessions are dropped on
    /// access.
    pub fn username(&self, id: &str) -> Option<String> {
        let expired = match self.sessions.get(id) {
            Some(session) if session.expires_at > Utc::now() => {
                return Some(session.username.clone());
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            self.sessions.remove(id);
        }
        None
    }

    pub fn destroy(&self, id: &str) {
        self.sessions.remove(id);
    }
}

/// Pull the session id out of request cookies, if present.
pub fn session_id(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

/// Set-Cookie value establishing a session.
pub fn session_cookie(id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        id,
        SESSION_TTL_HOURS * 3600
    )
}

/// Set-Cookie value clearing the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn create_and_resolve_session() {
        let store = SessionStore::default();
        let id = store.create("admin");
        assert_eq!(store.username(&id), Some("admin".to_string()));

        store.destroy(&id);
        assert_eq!(store.username(&id), None);
    }

    #[test]
    fn unknown_session_id_resolves_to_none() {
        let store = SessionStore::default();
        assert_eq!(store.username("not-a-session"), None);
    }

    #[test]
    fn session_id_is_parsed_from_cookie_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; desa_session=abc-123; lang=id"),
        );
        assert_eq!(session_id(&headers), Some("abc-123".to_string()));

        headers.insert(COOKIE, HeaderValue::from_static("theme=dark"));
        assert_eq!(session_id(&headers), None);
    }
}
