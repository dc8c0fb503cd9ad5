use std::time::Duration;

use catalog_admin_api::{
    gate::{AuthGate, DASHBOARD_ROUTE, GateDecision, Session, SessionEvent, SessionEvents},
    middleware::auth::decode_session,
    models::User,
    services::auth_service::issue_session,
};
use chrono::Utc;
use futures::StreamExt;
use uuid::Uuid;

fn admin() -> User {
    User {
        id: Uuid::new_v4(),
        email: "admin@example.com".into(),
        role: "admin".into(),
        created_at: Utc::now(),
    }
}

fn session() -> Session {
    issue_session("test-secret", &admin()).expect("session")
}

#[test]
fn present_session_redirects_on_mount() {
    let events = SessionEvents::default();
    let current = session();

    let (_gate, decision) = AuthGate::mount(&events, Some(&current));
    assert_eq!(
        decision,
        GateDecision::Redirect {
            to: DASHBOARD_ROUTE.to_string()
        }
    );

    let (_gate, decision) = AuthGate::mount(&events, None);
    assert_eq!(decision, GateDecision::ShowSignIn);
}

#[tokio::test]
async fn sign_in_event_redirects_mounted_gate() {
    let events = SessionEvents::default();
    let (mut gate, _) = AuthGate::mount(&events, None);

    let user = admin();
    events.publish(SessionEvent::SignedOut { user_id: user.id });
    events.publish(SessionEvent::SignedIn {
        user_id: user.id,
        email: user.email.clone(),
    });

    let redirect = tokio::time::timeout(Duration::from_secs(1), gate.next_redirect())
        .await
        .expect("gate woke up");
    assert_eq!(redirect, Some(DASHBOARD_ROUTE));
}

#[test]
fn gate_owns_exactly_one_subscription_until_unmounted() {
    let events = SessionEvents::default();
    assert_eq!(events.subscriber_count(), 0);

    let (gate, _) = AuthGate::mount(&events, None);
    assert_eq!(events.subscriber_count(), 1);

    gate.unmount();
    assert_eq!(events.subscriber_count(), 0);

    {
        let (_gate, _) = AuthGate::mount(&events, None);
        assert_eq!(events.subscriber_count(), 1);
    }
    assert_eq!(events.subscriber_count(), 0);
}

#[tokio::test]
async fn gate_stops_when_publisher_is_gone() {
    let events = SessionEvents::default();
    let (mut gate, _) = AuthGate::mount(&events, None);
    drop(events);

    assert_eq!(gate.next_redirect().await, None);
}

#[tokio::test]
async fn decision_stream_starts_with_mount_decision_then_follows_sign_ins() {
    let events = SessionEvents::default();
    let (gate, decision) = AuthGate::mount(&events, None);
    let mut decisions = Box::pin(gate.into_decisions(decision));

    assert_eq!(decisions.next().await, Some(GateDecision::ShowSignIn));

    let user = admin();
    events.publish(SessionEvent::SignedIn {
        user_id: user.id,
        email: user.email.clone(),
    });
    let next = tokio::time::timeout(Duration::from_secs(1), decisions.next())
        .await
        .expect("stream woke up");
    assert_eq!(
        next,
        Some(GateDecision::Redirect {
            to: DASHBOARD_ROUTE.to_string()
        })
    );

    assert_eq!(events.subscriber_count(), 1);
    drop(decisions);
    assert_eq!(events.subscriber_count(), 0);
}

#[test]
fn issued_session_round_trips_through_token() {
    let user = admin();
    let issued = issue_session("test-secret", &user).expect("session");

    let decoded = decode_session("test-secret", &issued.access_token).expect("decoded");
    assert_eq!(decoded.user_id, user.id);
    assert_eq!(decoded.email, user.email);
    assert_eq!(decoded.role, "admin");
    assert_eq!(decoded.expires_at.timestamp(), issued.expires_at.timestamp());

    assert!(decode_session("other-secret", &issued.access_token).is_err());
}
