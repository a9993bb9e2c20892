use service::uuid_service::UuidService;
use uuid::Uuid;

/// Random (v4) ids.
pub struct UuidServiceImpl;

impl UuidService for UuidServiceImpl {
    fn new_uuid(&self, usage: &str) -> Uuid {
        let id = Uuid::new_v4();
        tracing::trace!("New id {} for {}", id, usage);
        id
    }
}
