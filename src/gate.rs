use chrono::{DateTime, Utc};
use futures::{Stream, StreamExt, stream};
use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;
use uuid::Uuid;

pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Session {
    pub access_token: String,
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SignedIn { user_id: Uuid, email: String },
    SignedOut { user_id: Uuid },
}

/// Fan-out of session changes to every mounted gate.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<SessionEvent>,
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new(64)
    }
}

impl SessionEvents {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn publish(&self, event: SessionEvent) {
        // No subscribers is fine.
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> SessionSubscription {
        SessionSubscription {
            rx: self.tx.subscribe(),
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription; dropping it unsubscribes.
#[derive(Debug)]
pub struct SessionSubscription {
    rx: broadcast::Receiver<SessionEvent>,
}

impl SessionSubscription {
    /// Next session change, or `None` once the publisher is gone.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "session subscription lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum GateDecision {
    Redirect { to: String },
    ShowSignIn,
}

impl GateDecision {
    pub fn for_session(session: Option<&Session>) -> Self {
        match session {
            Some(_) => GateDecision::Redirect {
                to: DASHBOARD_ROUTE.to_string(),
            },
            None => GateDecision::ShowSignIn,
        }
    }
}

/// Sign-in screen guard. Holds exactly one session subscription from
/// `mount` until it is unmounted or dropped.
#[derive(Debug)]
pub struct AuthGate {
    subscription: SessionSubscription,
}

impl AuthGate {
    pub fn mount(events: &SessionEvents, current: Option<&Session>) -> (Self, GateDecision) {
        let gate = Self {
            subscription: events.subscribe(),
        };
        (gate, GateDecision::for_session(current))
    }

    /// Wait until some session becomes present and return where to go.
    pub async fn next_redirect(&mut self) -> Option<&'static str> {
        while let Some(event) = self.subscription.next().await {
            if let SessionEvent::SignedIn { .. } = event {
                return Some(DASHBOARD_ROUTE);
            }
        }
        None
    }

    /// `initial`, then a redirect for every later sign-in. The stream owns
    /// the gate, so dropping it unsubscribes.
    pub fn into_decisions(
        self,
        initial: GateDecision,
    ) -> impl Stream<Item = GateDecision> + Send + 'static {
        let redirects = stream::unfold(self, |mut gate| async move {
            let to = gate.next_redirect().await?;
            Some((GateDecision::Redirect { to: to.to_string() }, gate))
        });
        stream::once(async move { initial }).chain(redirects)
    }

    pub fn unmount(self) {
        drop(self.subscription);
    }
}
