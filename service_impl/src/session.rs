use service::session::{Identity, SessionService};
use tokio::sync::watch;

/// In-process session holder. Sign-in and sign-out are broadcast to every
/// subscriber.
pub struct SessionServiceImpl {
    sender: watch::Sender<Option<Identity>>,
}

impl SessionServiceImpl {
    pub fn new(identity: Option<Identity>) -> Self {
        let (sender, _) = watch::channel(identity);
        Self { sender }
    }

    pub fn sign_in(&self, identity: Identity) {
        tracing::info!("Signed in as {}", identity.user_id);
        self.sender.send_modify(|current| *current = Some(identity));
    }

    pub fn sign_out(&self) {
        if self.sender.send_replace(None).is_some() {
            tracing::info!("Signed out");
        }
    }
}

impl Default for SessionServiceImpl {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionService for SessionServiceImpl {
    fn current_identity(&self) -> Option<Identity> {
        self.sender.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.sender.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_identity() -> Identity {
        Identity {
            user_id: "U1".into(),
            name: "Kim".into(),
            phone: Some("010-0000-0000".into()),
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionServiceImpl::default();
        assert_eq!(session.current_identity(), None);
        session.sign_in(default_identity());
        assert_eq!(session.current_identity(), Some(default_identity()));
        session.sign_out();
        assert_eq!(session.current_identity(), None);
    }

    #[tokio::test]
    async fn test_subscriber_is_notified() {
        let session = SessionServiceImpl::default();
        let mut receiver = session.subscribe();
        session.sign_in(default_identity());
        receiver.changed().await.unwrap();
        assert_eq!(
            receiver.borrow_and_update().as_ref().map(|i| i.user_id.clone()),
            Some("U1".into())
        );
        session.sign_out();
        receiver.changed().await.unwrap();
        assert_eq!(*receiver.borrow(), None);
    }
}
