use std::sync::Arc;

use mockall::automock;
use tokio::sync::watch;

/// The signed-in customer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Arc<str>,
    pub name: Arc<str>,
    pub phone: Option<Arc<str>>,
}

/// Source of the current customer identity.
///
/// Sign-in and sign-out are pushed to subscribers; nobody has to poll.
#[automock]
pub trait SessionService {
    fn current_identity(&self) -> Option<Identity>;
    fn subscribe(&self) -> watch::Receiver<Option<Identity>>;
}
