use mockall::automock;

#[automock]
pub trait ClockService {
    /// Today in the shop's local offset.
    fn date_now(&self) -> time::Date;
}
