use super::{Bar, BarInterval};

/// Strategy that tells the movement engine where a bar keeps the interval
/// being scheduled.
///
/// Every interval read and write performed by the movement engine goes
/// through this seam, so the engine never indexes bar fields by name.
pub trait IntervalAccess {
    fn interval(&self, bar: &Bar) -> BarInterval;
    fn set_interval(&self, bar: &mut Bar, interval: BarInterval);
}

/// Reads and writes `Bar::interval`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrimaryInterval;

impl IntervalAccess for PrimaryInterval {
    fn interval(&self, bar: &Bar) -> BarInterval {
        bar.interval
    }

    fn set_interval(&self, bar: &mut Bar, interval: BarInterval) {
        bar.interval = interval;
    }
}
