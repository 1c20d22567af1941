pub use annotars_core::models::Interval;

pub trait Overlapper<T>: Send + Sync
where
    T: Eq + Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<T>>) -> Self
    where
        Self: Sized;

    fn find(&self, start: u32, end: u32) -> Vec<Interval<T>>;

    fn find_iter<'a>(&'a self, start: u32, end: u32)
    -> Box<dyn Iterator<Item = &'a Interval<T>> + 'a>;
}
