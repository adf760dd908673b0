use crate::calendar::DayMarker;
use crate::config::Config;
use crate::error::DirectiveError;
use crate::month::MonthSpec;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static MONTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[month:(.*?)\]").expect("valid month directive regex"));
static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[width:(.*?)\]").expect("valid width directive regex"));
static MARK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\((.*?)\)").expect("valid mark directive regex"));
static DAY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid day number regex"));

/// Everything needed to lay out and label one month
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct RenderContext {
    pub(crate) week_start: u8,
    pub(crate) first_weekday: u8,
    pub(crate) month_days: u8,
    pub(crate) label: String,
    pub(crate) width: Option<String>,
    pub(crate) marks: Marks,
}

/// Scans `source` for the month, width, and mark directives.
///
/// Only a missing or unreadable month is an error; anything else that does
/// not look like a directive is ignored.
pub(crate) fn parse(source: &str, config: &Config) -> Result<RenderContext, DirectiveError> {
    let caps = MONTH_RE
        .captures(source)
        .filter(|c| c.get(1).is_some_and(|m| !m.is_empty()))
        .ok_or(DirectiveError::MissingMonth)?;
    let token = caps.get(0).map_or("", |m| m.as_str());
    let value = caps.get(1).map_or("", |m| m.as_str());
    let month = MonthSpec::parse(value).ok_or_else(|| DirectiveError::InvalidMonth {
        token: token.to_owned(),
    })?;
    let marks = parse_marks(source);
    log::debug!(
        "Resolved {token} to {} with {} marked days",
        month.date(),
        marks.len()
    );
    Ok(RenderContext {
        week_start: config.start_of_week.index(),
        first_weekday: month.first_weekday(),
        month_days: month.days(),
        label: config.month_format.format(month.date()),
        width: parse_width(source),
        marks,
    })
}

fn parse_width(source: &str) -> Option<String> {
    let width = WIDTH_RE.captures(source)?.get(1)?.as_str().trim();
    (!width.is_empty()).then(|| width.to_owned())
}

fn parse_marks(source: &str) -> Marks {
    MARK_RE
        .captures_iter(source)
        .filter_map(|caps| {
            let inner = caps.get(1)?.as_str();
            let (day, note) = match inner.split_once(',') {
                Some((day, note)) => (day, Some(note)),
                None => (inner, None),
            };
            let Some(day) = parse_day(day) else {
                log::debug!("Skipping mark {inner:?}: no day number");
                return None;
            };
            let mark = match note {
                Some(note) if !note.is_empty() => Mark::Note(note.to_owned()),
                _ => Mark::Check,
            };
            Some((day, mark))
        })
        .collect()
}

// Reads the integer at the start of `s`, ignoring anything after it
fn parse_day(s: &str) -> Option<i64> {
    DAY_RE.captures(s)?.get(1)?.as_str().parse().ok()
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Mark {
    /// Marked without any text; shown with a check glyph
    Check,
    Note(String),
}

/// Marked days of the month.  Built once per parse; when a day is marked more
/// than once, the last mark wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct Marks(BTreeMap<i64, Mark>);

impl Marks {
    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }
}

impl FromIterator<(i64, Mark)> for Marks {
    fn from_iter<I: IntoIterator<Item = (i64, Mark)>>(iter: I) -> Marks {
        Marks(iter.into_iter().collect())
    }
}

impl DayMarker for Marks {
    fn mark(&self, day: u8) -> Option<&Mark> {
        self.0.get(&i64::from(day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_default(source: &str) -> Result<RenderContext, DirectiveError> {
        parse(source, &Config::default())
    }

    #[test]
    fn test_month() {
        let ctx = parse_default("[month: 2021-01]").expect("should parse");
        assert_eq!(ctx.week_start, 0);
        assert_eq!(ctx.first_weekday, 5);
        assert_eq!(ctx.month_days, 31);
        assert_eq!(ctx.label, "2021-01");
        assert_eq!(ctx.width, None);
        assert_eq!(ctx.marks.len(), 0);
    }

    #[test]
    fn test_week_start_from_config() {
        let mut config = Config::default();
        config.set("startOfWeek", "1").expect("should set");
        let ctx = parse("[month: 2021-01]", &config).expect("should parse");
        assert_eq!(ctx.week_start, 1);
    }

    #[test]
    fn test_label_uses_written_date() {
        let mut config = Config::default();
        config
            .set("monthFormat", "[year]-[month]-[day]")
            .expect("should set");
        let ctx = parse("[month:2021-02-14]", &config).expect("should parse");
        assert_eq!(ctx.label, "2021-02-14");
        assert_eq!(ctx.first_weekday, 1);
        assert_eq!(ctx.month_days, 28);
    }

    #[test]
    fn test_first_month_wins() {
        let ctx = parse_default("[month: 2021-02]\n[month: 2021-03]").expect("should parse");
        assert_eq!(ctx.label, "2021-02");
    }

    #[test]
    fn test_missing_month() {
        let err = parse_default("(1)(2,done)").expect_err("should fail");
        assert_eq!(err, DirectiveError::MissingMonth);
        assert_eq!(
            err.to_string(),
            "Fail: Month not found. e.g. [month: 2021-01]"
        );
    }

    #[test]
    fn test_empty_month_is_missing() {
        assert_eq!(
            parse_default("[month:]"),
            Err(DirectiveError::MissingMonth)
        );
    }

    #[test]
    fn test_invalid_month() {
        let err = parse_default("[month: not-a-date] (3)").expect_err("should fail");
        assert_eq!(
            err,
            DirectiveError::InvalidMonth {
                token: String::from("[month: not-a-date]")
            }
        );
        assert!(err.to_string().contains("[month: not-a-date]"));
        assert!(err.to_string().contains("Invalid Date"));
    }

    #[test]
    fn test_blank_month_is_invalid() {
        assert!(matches!(
            parse_default("[month:   ]"),
            Err(DirectiveError::InvalidMonth { .. })
        ));
    }

    #[test]
    fn test_width() {
        let ctx = parse_default("[month: 2021-01][width: 50% ]").expect("should parse");
        assert_eq!(ctx.width.as_deref(), Some("50%"));
        let ctx = parse_default("[month: 2021-01][width: ]").expect("should parse");
        assert_eq!(ctx.width, None);
    }

    #[test]
    fn test_marks() {
        let ctx = parse_default("[month: 2021-01]\n(15,✅)(20)").expect("should parse");
        assert_eq!(ctx.marks.len(), 2);
        assert_eq!(ctx.marks.mark(15), Some(&Mark::Note(String::from("✅"))));
        assert_eq!(ctx.marks.mark(20), Some(&Mark::Check));
        assert_eq!(ctx.marks.mark(16), None);
    }

    #[test]
    fn test_last_mark_wins() {
        let ctx = parse_default("[month: 2021-01] (10,first)(10,second)").expect("should parse");
        assert_eq!(ctx.marks.mark(10), Some(&Mark::Note(String::from("second"))));
        let ctx = parse_default("[month: 2021-01] (10,first)(10)").expect("should parse");
        assert_eq!(ctx.marks.mark(10), Some(&Mark::Check));
    }

    #[test]
    fn test_note_is_verbatim() {
        let ctx = parse_default("[month: 2021-01] (3, ran 5k, felt good)").expect("should parse");
        assert_eq!(
            ctx.marks.mark(3),
            Some(&Mark::Note(String::from(" ran 5k, felt good")))
        );
    }

    #[test]
    fn test_empty_note_is_check() {
        let ctx = parse_default("[month: 2021-01] (4,)").expect("should parse");
        assert_eq!(ctx.marks.mark(4), Some(&Mark::Check));
    }

    #[test]
    fn test_unparseable_marks_skipped() {
        let ctx = parse_default("[month: 2021-01] (abc)(,x)() (7th,run)").expect("should parse");
        assert_eq!(ctx.marks.len(), 1);
        assert_eq!(ctx.marks.mark(7), Some(&Mark::Note(String::from("run"))));
    }

    #[test]
    fn test_out_of_range_marks_kept() {
        let ctx = parse_default("[month: 2021-02] (0)(-3)(35)").expect("should parse");
        assert_eq!(ctx.marks.len(), 3);
    }

    #[test]
    fn test_marks_do_not_span_lines() {
        let ctx = parse_default("[month: 2021-01] (5\n,x)").expect("should parse");
        assert_eq!(ctx.marks.len(), 0);
    }

    #[test]
    fn test_parse_day() {
        assert_eq!(parse_day("12"), Some(12));
        assert_eq!(parse_day("  8"), Some(8));
        assert_eq!(parse_day("-2"), Some(-2));
        assert_eq!(parse_day("+9"), Some(9));
        assert_eq!(parse_day("4 "), Some(4));
        assert_eq!(parse_day("x4"), None);
        assert_eq!(parse_day(""), None);
        assert_eq!(parse_day("99999999999999999999999"), None);
    }
}
