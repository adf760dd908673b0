use crate::calendar::WeekdayExt;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
static YMD_SLASH_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]/[month]/[day]");
static YMD_BASIC_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year][month][day]");

/// A calendar month resolved from a `[month: ...]` value, remembering the
/// exact date that was written so that the label can be formatted from it
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthSpec {
    date: Date,
}

impl MonthSpec {
    /// Accepts `YYYY-MM`, `YYYY-MM-DD`, `YYYY/MM`, `YYYY/MM/DD`, `YYYYMMDD`,
    /// and a full date followed by `T` and a time of day (the time is
    /// ignored).
    pub(crate) fn parse(s: &str) -> Option<MonthSpec> {
        let s = s.trim();
        let date_part = match s.split_once('T') {
            Some((date, _)) if date.len() >= 8 => date,
            _ => s,
        };
        for fmt in [YMD_FMT, YMD_SLASH_FMT, YMD_BASIC_FMT] {
            if let Ok(date) = Date::parse(date_part, &fmt) {
                return Some(MonthSpec { date });
            }
        }
        // A month without a day refers to the month's first day
        if date_part.len() == s.len() {
            for (sep, fmt) in [('-', YMD_FMT), ('/', YMD_SLASH_FMT)] {
                if let Ok(date) = Date::parse(&format!("{s}{sep}01"), &fmt) {
                    return Some(MonthSpec { date });
                }
            }
        }
        None
    }

    pub(crate) fn date(&self) -> Date {
        self.date
    }

    /// Weekday of the 1st of the month, counted from Sunday = 0
    pub(crate) fn first_weekday(&self) -> u8 {
        self.date
            .replace_day(1)
            .map_or_else(|_| self.date.weekday(), |d| d.weekday())
            .index0()
    }

    pub(crate) fn days(&self) -> u8 {
        self.date.month().length(self.date.year())
    }
}
