use std::sync::Arc;

use arc_swap::ArcSwapOption;
use secrecy::{ExposeSecret, Secret};

use crate::domain::user::UserProfile;

/// Bearer credential for the remote API.
///
/// Tokens are only ever minted by the remote auth service; this type exists
/// for gateway response mapping and credential-store rehydration, never for
/// fabricating credentials client-side.
#[derive(Debug, Clone)]
pub struct AccessToken(Secret<String>);

impl AccessToken {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Secret::from(raw.into()))
    }
}

impl AsRef<Secret<String>> for AccessToken {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

/// The client-held proof of authentication: a token plus the cached user
/// projection. The profile is absent when a session is rehydrated from the
/// credential store alone.
#[derive(Debug, Clone)]
pub struct AuthSession {
    user: Option<UserProfile>,
    token: AccessToken,
}

impl AuthSession {
    pub fn new(user: Option<UserProfile>, token: AccessToken) -> Self {
        Self { user, token }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn token(&self) -> &AccessToken {
        &self.token
    }
}

/// Lock-free slot holding the current session. Cheap to clone; all clones
/// observe the same session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    current: Arc<ArcSwapOption<AuthSession>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn establish(&self, session: AuthSession) {
        self.current.store(Some(Arc::new(session)));
    }

    pub fn clear(&self) {
        self.current.store(None);
    }

    pub fn current(&self) -> Option<Arc<AuthSession>> {
        self.current.load_full()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.load().is_some()
    }
}
