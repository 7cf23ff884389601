//! Reactive auth state, fanned out to consumers over a watch channel.

use tokio::sync::watch;

use crate::auth::{AuthSession, Identity, SessionPersistence, SignUpOutcome, SupabaseAuthClient};
use crate::error::{Error, Result};

/// The two auth states consumers render against.
///
/// Token refresh collapses into `SignedIn`; consumers only observe identity
/// changes, not token rotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthState {
    #[default]
    SignedOut,
    SignedIn(Identity),
}

impl AuthState {
    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::SignedOut => None,
            Self::SignedIn(identity) => Some(identity),
        }
    }
}

/// Resolves the live authenticated identity at call time.
///
/// Mutating gateway operations call this at the start of every request so a
/// stale or expired session is never acted on.
#[allow(async_fn_in_trait)]
pub trait IdentityResolver {
    /// Re-resolve the current session; `Error::NotAuthenticated` when none.
    async fn require_live_session(&self) -> Result<AuthSession>;

    /// Non-failing probe of the current identity.
    async fn current_identity(&self) -> Option<Identity>;
}

/// Exposes the current signed-in identity and pushes transitions to
/// subscribers on sign-in, sign-up, and sign-out events.
pub struct AuthProvider<S: SessionPersistence> {
    client: SupabaseAuthClient<S>,
    state_tx: watch::Sender<AuthState>,
}

impl<S: SessionPersistence> AuthProvider<S> {
    #[must_use]
    pub fn new(client: SupabaseAuthClient<S>) -> Self {
        let (state_tx, _) = watch::channel(AuthState::SignedOut);
        Self { client, state_tx }
    }

    /// Async probe of the identity provider at startup.
    ///
    /// Restores (and if needed refreshes) the persisted session and publishes
    /// the resulting state.
    pub async fn initialize(&self) -> Result<AuthState> {
        let state = match self.client.restore_session().await {
            Ok(Some(session)) => AuthState::SignedIn(session.user),
            Ok(None) => AuthState::SignedOut,
            Err(error) => {
                tracing::warn!("Auth startup probe failed: {}", error);
                AuthState::SignedOut
            }
        };
        self.publish(state.clone());
        Ok(state)
    }

    /// Subscribe to auth state transitions.
    ///
    /// Dropping the receiver unsubscribes; no explicit teardown call needed.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state_tx.subscribe()
    }

    #[must_use]
    pub fn current_state(&self) -> AuthState {
        self.state_tx.borrow().clone()
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession> {
        let session = self
            .client
            .sign_in(email, password)
            .await
            .map_err(|error| Error::Auth(error.to_string()))?;
        self.publish(AuthState::SignedIn(session.user.clone()));
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let outcome = self
            .client
            .sign_up(email, password)
            .await
            .map_err(|error| Error::Auth(error.to_string()))?;
        if let SignUpOutcome::SignedIn(session) = &outcome {
            self.publish(AuthState::SignedIn(session.user.clone()));
        }
        Ok(outcome)
    }

    pub async fn sign_out(&self) -> Result<()> {
        if let Ok(Some(session)) = self.client.session_store().load_session() {
            self.client
                .sign_out(&session.access_token)
                .await
                .map_err(|error| Error::Auth(error.to_string()))?;
        }
        self.publish(AuthState::SignedOut);
        Ok(())
    }

    pub fn auth_client(&self) -> &SupabaseAuthClient<S> {
        &self.client
    }

    fn publish(&self, state: AuthState) {
        // send_replace never fails even with zero subscribers.
        self.state_tx.send_replace(state);
    }
}

impl<S: SessionPersistence> IdentityResolver for AuthProvider<S> {
    async fn require_live_session(&self) -> Result<AuthSession> {
        match self.client.restore_session().await {
            Ok(Some(session)) => {
                self.publish(AuthState::SignedIn(session.user.clone()));
                Ok(session)
            }
            Ok(None) => {
                self.publish(AuthState::SignedOut);
                Err(Error::NotAuthenticated)
            }
            Err(error) => Err(Error::Auth(error.to_string())),
        }
    }

    async fn current_identity(&self) -> Option<Identity> {
        match self.client.restore_session().await {
            Ok(Some(session)) => Some(session.user),
            Ok(None) => None,
            Err(error) => {
                tracing::warn!("Identity probe failed: {}", error);
                None
            }
        }
    }
}

/// Fixed-identity resolver for tests and embedding without a live provider.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityResolver {
    session: Option<AuthSession>,
}

impl StaticIdentityResolver {
    #[must_use]
    pub fn signed_in(session: AuthSession) -> Self {
        Self {
            session: Some(session),
        }
    }

    #[must_use]
    pub const fn signed_out() -> Self {
        Self { session: None }
    }
}

impl IdentityResolver for StaticIdentityResolver {
    async fn require_live_session(&self) -> Result<AuthSession> {
        self.session.clone().ok_or(Error::NotAuthenticated)
    }

    async fn current_identity(&self) -> Option<Identity> {
        self.session.as_ref().map(|session| session.user.clone())
    }
}
