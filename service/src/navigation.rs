use mockall::automock;

/// Full-page redirect target, used to hand over to a hosted checkout page.
#[automock]
pub trait NavigationService {
    fn redirect(&self, url: &str);
}
