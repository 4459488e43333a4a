//! In-memory purchase-flow sessions.
//!
//! One session per user, held only in process memory. Sessions are reset
//! after an order attempt and evicted once idle or past their TTL.

mod store;
mod types;

pub use store::{SessionGuard, SessionStore};
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_session_new_is_idle() {
        let session = Session::new(42);
        assert_eq!(session.user_id, 42);
        assert!(session.is_idle());
        assert!(session.selected_package().is_none());
    }

    #[test]
    fn test_session_flow_transitions() {
        let mut session = Session::new(42);

        session.open_menu();
        assert_eq!(session.state, SessionState::ChoosingPackage);

        session.select_package("60");
        assert_eq!(session.selected_package(), Some("60"));

        session.reset();
        assert!(session.is_idle());
    }

    #[test]
    fn test_open_menu_keeps_pending_selection() {
        let mut session = Session::new(42);
        session.select_package("325");
        session.open_menu();
        assert_eq!(session.selected_package(), Some("325"));
    }

    #[test]
    fn test_select_replaces_previous_choice() {
        let mut session = Session::new(42);
        session.select_package("60");
        session.select_package("1800");
        assert_eq!(session.selected_package(), Some("1800"));
    }

    #[test]
    fn test_session_state_serialization() {
        let state = SessionState::EnteringIdentifier {
            package_id: "660".into(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(json, r#"{"state":"entering_identifier","package_id":"660"}"#);
    }

    #[test]
    fn test_updated_at_changes() {
        let mut session = Session::new(42);
        let initial = session.updated_at;

        std::thread::sleep(Duration::from_millis(10));
        session.select_package("60");

        assert!(session.updated_at > initial);
    }

    // Store tests

    #[tokio::test]
    async fn test_store_acquire_creates_session() {
        let store = SessionStore::new(Duration::from_secs(3600));

        {
            let session = store.acquire(1).await;
            assert!(session.is_idle());
        }

        let session = store.get(1).await.unwrap();
        assert_eq!(session.user_id, 1);
    }

    #[tokio::test]
    async fn test_store_updates_persist_between_acquires() {
        let store = SessionStore::new(Duration::from_secs(3600));

        {
            let mut session = store.acquire(1).await;
            session.select_package("60");
        }

        let session = store.acquire(1).await;
        assert_eq!(session.selected_package(), Some("60"));
    }

    #[tokio::test]
    async fn test_store_guard_clear() {
        let store = SessionStore::new(Duration::from_secs(3600));

        {
            let mut session = store.acquire(1).await;
            session.select_package("60");
            session.clear();
        }

        assert!(store.get(1).await.unwrap().is_idle());
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_clear() {
        let store = SessionStore::new(Duration::from_secs(3600));

        store.acquire(1).await.select_package("325");
        assert_eq!(store.active_count().await, 1);

        assert!(store.clear(1).await);
        assert!(!store.clear(1).await);
        assert!(!store.clear(999).await);
        assert_eq!(store.active_count().await, 0);
    }

    #[tokio::test]
    async fn test_store_users_isolated() {
        let store = SessionStore::new(Duration::from_secs(3600));

        store.acquire(1).await.select_package("60");
        store.acquire(2).await.select_package("1800");

        assert_eq!(store.get(1).await.unwrap().selected_package(), Some("60"));
        assert_eq!(store.get(2).await.unwrap().selected_package(), Some("1800"));
        assert_eq!(store.active_count().await, 2);
    }

    #[tokio::test]
    async fn test_store_expired_session_resets() {
        let store = SessionStore::new(Duration::from_millis(20));

        store.acquire(1).await.select_package("60");
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert!(store.get(1).await.is_none());
        assert!(store.acquire(1).await.is_idle());
    }

    #[tokio::test]
    async fn test_store_purge_removes_idle_and_expired() {
        let store = SessionStore::new(Duration::from_millis(20));

        drop(store.acquire(1).await);
        store.acquire(2).await.select_package("60");
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(store.purge_expired().await, 2);
        assert!(store.get(1).await.is_none());
        assert!(store.get(2).await.is_none());
    }

    #[tokio::test]
    async fn test_store_purge_keeps_held_sessions() {
        let store = SessionStore::new(Duration::from_secs(3600));

        let held = store.acquire(1).await;
        store.acquire(2).await.select_package("60");

        assert_eq!(store.purge_expired().await, 0);
        drop(held);
        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.active_count().await, 1);
    }

    #[tokio::test]
    async fn test_store_serializes_same_user() {
        let store = SessionStore::new(Duration::from_secs(3600));

        let mut first = store.acquire(1).await;
        let waiter = {
            let store = store.clone();
            tokio::spawn(async move {
                let session = store.acquire(1).await;
                session.selected_package().map(String::from)
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished());

        first.select_package("660");
        drop(first);

        assert_eq!(waiter.await.unwrap(), Some("660".to_string()));
    }
}
