use std::ops::Index;
use time::Weekday;

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_sunday()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Cell {
    /// Padding before the 1st or after the last day of the month
    Blank,
    Day(u8),
}

impl Cell {
    pub(crate) fn day(self) -> Option<u8> {
        match self {
            Cell::Blank => None,
            Cell::Day(d) => Some(d),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Week([Cell; DAYS_IN_WEEK]);

impl Week {
    // Places `days` into consecutive columns starting at `offset`; everything
    // else stays blank.  Days that don't fit are dropped.
    pub(super) fn from_days(offset: usize, days: &[u8]) -> Week {
        let mut cells = [Cell::Blank; DAYS_IN_WEEK];
        for (slot, &d) in cells.iter_mut().skip(offset).zip(days) {
            *slot = Cell::Day(d);
        }
        Week(cells)
    }

    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.0.iter().copied()
    }
}

impl Index<usize> for Week {
    type Output = Cell;

    fn index(&self, column: usize) -> &Cell {
        &self.0[column]
    }
}

/// Number of blank cells needed before the 1st of a month starting on
/// `first_weekday` when columns begin at `week_start`.  Both arguments are
/// weekday indices counted from Sunday.
pub(crate) fn leading_blanks(first_weekday: u8, week_start: u8) -> u8 {
    if first_weekday >= week_start {
        first_weekday - week_start
    } else {
        7 - week_start + first_weekday
    }
}
