use std::fmt;
use std::time::Duration;

use tracing::info;
use url::form_urlencoded;

pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1200);

/// Process-wide sign-in flag. There is no token or identity behind it.
#[derive(Debug, Clone)]
pub struct Session {
    authenticated: bool,
    login_delay: Duration,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_LOGIN_DELAY)
    }
}

impl Session {
    pub fn new(login_delay: Duration) -> Self {
        Self {
            authenticated: false,
            login_delay,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Simulated sign-in: waits out the configured delay, then flips the flag.
    pub async fn login(&mut self) {
        tokio::time::sleep(self.login_delay).await;
        self.authenticated = true;
        info!("signed in");
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        info!("signed out");
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Postings,
    PostingDetail(String),
    TalentPool { posting_id: Option<String> },
    NotFound(String),
}

impl Route {
    pub fn parse(target: &str) -> Route {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Login,
            ["vagas"] => Route::Postings,
            ["vagas", id] => Route::PostingDetail(id.to_string()),
            ["banco-talentos"] => Route::TalentPool {
                posting_id: form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == "vagaId")
                    .map(|(_, value)| value.into_owned())
                    .filter(|value| !value.is_empty()),
            },
            _ => Route::NotFound(target.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => "/".to_string(),
            Route::Postings => "/vagas".to_string(),
            Route::PostingDetail(id) => format!("/vagas/{}", id),
            Route::TalentPool { posting_id: None } => "/banco-talentos".to_string(),
            Route::TalentPool {
                posting_id: Some(id),
            } => {
                let query: String = form_urlencoded::Serializer::new(String::new())
                    .append_pair("vagaId", id)
                    .finish();
                format!("/banco-talentos?{}", query)
            }
            Route::NotFound(target) => target.clone(),
        }
    }

    /// Routes reachable without signing in.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Where navigation to `route` actually lands given the session state.
pub fn guard(route: Route, session: &Session) -> Route {
    match (session.is_authenticated(), route) {
        (false, route) if !route.is_public() => Route::Login,
        (true, Route::Login) => Route::Postings,
        (_, route) => route,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_parse_known_paths() {
        assert_eq!(Route::parse("/"), Route::Login);
        assert_eq!(Route::parse("/vagas"), Route::Postings);
        assert_eq!(Route::parse("/vagas/"), Route::Postings);
        assert_eq!(Route::parse("/vagas/abc-123"), Route::PostingDetail("abc-123".to_string()));
        assert_eq!(
            Route::parse("/banco-talentos"),
            Route::TalentPool { posting_id: None }
        );
        assert_eq!(
            Route::parse("/banco-talentos?vagaId=v%201"),
            Route::TalentPool {
                posting_id: Some("v 1".to_string())
            }
        );
        assert_eq!(
            Route::parse("/elsewhere"),
            Route::NotFound("/elsewhere".to_string())
        );
    }

    #[test]
    fn test_path_round_trips() {
        for route in [
            Route::Login,
            Route::Postings,
            Route::PostingDetail("p9".to_string()),
            Route::TalentPool { posting_id: None },
            Route::TalentPool {
                posting_id: Some("p9".to_string()),
            },
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guard_redirects_signed_out_users_to_login() {
        let session = Session::new(Duration::ZERO);
        assert_eq!(guard(Route::Postings, &session), Route::Login);
        assert_eq!(guard(Route::PostingDetail("1".to_string()), &session), Route::Login);
        assert_eq!(
            guard(Route::TalentPool { posting_id: None }, &session),
            Route::Login
        );
        assert_eq!(guard(Route::Login, &session), Route::Login);
    }

    #[tokio::test]
    async fn test_guard_sends_signed_in_users_past_login() {
        let mut session = Session::new(Duration::ZERO);
        session.login().await;

        assert_eq!(guard(Route::Login, &session), Route::Postings);
        assert_eq!(
            guard(Route::PostingDetail("1".to_string()), &session),
            Route::PostingDetail("1".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_waits_then_logout_clears() {
        let mut session = Session::new(Duration::from_millis(20));
        assert!(!session.is_authenticated());

        let started = Instant::now();
        session.login().await;
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert!(session.is_authenticated());

        session.logout();
        assert!(!session.is_authenticated());
        assert_eq!(guard(Route::Postings, &session), Route::Login);
    }
}
