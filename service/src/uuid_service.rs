use mockall::automock;
use uuid::Uuid;

#[automock]
pub trait UuidService {
    /// `usage` names the purpose of the id so tests can tell requests apart.
    fn new_uuid(&self, usage: &str) -> Uuid;
}
