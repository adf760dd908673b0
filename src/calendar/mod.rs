mod table;
mod util;
mod weeks;
pub(crate) use self::table::{NoteMode, Table};
pub(crate) use self::util::WeekdayExt;
pub(crate) use self::weeks::WeekGrid;
#[cfg(test)]
pub(crate) use self::table::{Annotation, DayCell};
use crate::directive::Mark;

/// Looks up the mark, if any, recorded for a day of the month
pub(crate) trait DayMarker {
    fn mark(&self, day: u8) -> Option<&Mark>;
}

impl<T: DayMarker + ?Sized> DayMarker for &T {
    fn mark(&self, day: u8) -> Option<&Mark> {
        (**self).mark(day)
    }
}
