use super::util::{Cell, DAYS_IN_WEEK};
use super::weeks::WeekGrid;
use super::DayMarker;
use crate::directive::Mark;
use crate::html::Escaped;
use std::fmt;

/// Shown in a marked day that carries no text of its own
pub(crate) const CHECK_GLYPH: &str = "✔️";

/// How the text of a mark ends up in the page
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NoteMode {
    /// Escaped, so that it always displays literally
    Text,
    /// Inserted unescaped, so that the host interprets it as markup
    Markup,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Annotation {
    Glyph,
    Text(String),
    Markup(String),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum DayCell {
    Blank,
    Day {
        day: u8,
        annotation: Option<Annotation>,
    },
}

impl DayCell {
    fn new<M: DayMarker>(cell: Cell, marker: &M, mode: NoteMode) -> DayCell {
        let Some(day) = cell.day() else {
            return DayCell::Blank;
        };
        let annotation = marker.mark(day).map(|mark| match (mark, mode) {
            (Mark::Check, _) => Annotation::Glyph,
            (Mark::Note(s), NoteMode::Text) => Annotation::Text(s.clone()),
            (Mark::Note(s), NoteMode::Markup) => Annotation::Markup(s.clone()),
        });
        DayCell::Day { day, annotation }
    }
}

/// A month laid out as a table: an optional title row, a row of weekday
/// labels, and one row per week
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Table {
    width: Option<String>,
    title: Option<String>,
    weekday_labels: [String; DAYS_IN_WEEK],
    weeks: Vec<[DayCell; DAYS_IN_WEEK]>,
}

impl Table {
    pub(crate) fn new<M: DayMarker>(grid: &WeekGrid, marker: M, mode: NoteMode) -> Table {
        let weeks = grid
            .weeks()
            .iter()
            .map(|week| {
                let mut cells = week.cells();
                std::array::from_fn(|_| {
                    let cell = cells.next().unwrap_or(Cell::Blank);
                    DayCell::new(cell, &marker, mode)
                })
            })
            .collect();
        Table {
            width: None,
            title: None,
            weekday_labels: std::array::from_fn(|_| String::new()),
            weeks,
        }
    }

    pub(crate) fn width(mut self, width: Option<String>) -> Self {
        self.width = width;
        self
    }

    pub(crate) fn title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub(crate) fn weekday_labels(mut self, labels: [String; DAYS_IN_WEEK]) -> Self {
        self.weekday_labels = labels;
        self
    }
}

#[cfg(test)]
impl Table {
    pub(crate) fn weeks(&self) -> &[[DayCell; DAYS_IN_WEEK]] {
        &self.weeks
    }

    pub(crate) fn header_labels(&self) -> &[String] {
        &self.weekday_labels
    }

    pub(crate) fn heading(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.width {
            Some(width) => write!(
                f,
                r#"<table class="habitt" style="width: {};">"#,
                Escaped(width)
            )?,
            None => write!(f, r#"<table class="habitt">"#)?,
        }
        write!(f, "<thead>")?;
        if let Some(title) = &self.title {
            write!(
                f,
                r#"<tr><th colspan="7" class="habitt-head">{}</th></tr>"#,
                Escaped(title)
            )?;
        }
        write!(f, "<tr>")?;
        for (i, label) in self.weekday_labels.iter().enumerate() {
            write!(
                f,
                r#"<th class="habitt-th habitt-th-{i}">{}</th>"#,
                Escaped(label)
            )?;
        }
        write!(f, "</tr></thead><tbody>")?;
        for week in &self.weeks {
            write!(f, "<tr>")?;
            for cell in week {
                write!(f, "{cell}")?;
            }
            write!(f, "</tr>")?;
        }
        write!(f, "</tbody></table>")
    }
}

impl fmt::Display for DayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayCell::Blank => write!(
                f,
                concat!(
                    r#"<td class="habitt-td habitt-td--disabled">"#,
                    r#"<div class="habitt-c"><div class="habitt-date"></div>"#,
                    r#"<div class="habitt-dots"></div></div></td>"#,
                )
            ),
            DayCell::Day {
                day,
                annotation: None,
            } => write!(
                f,
                concat!(
                    r#"<td class="habitt-td habitt-td--{day}">"#,
                    r#"<div class="habitt-c"><div class="habitt-date">{day}</div>"#,
                    r#"<div class="habitt-dots"></div></div></td>"#,
                ),
                day = day
            ),
            DayCell::Day {
                day,
                annotation: Some(annotation),
            } => write!(
                f,
                concat!(
                    r#"<td class="habitt-td habitt-td--{day} habitt-td--checked">"#,
                    r#"<div class="habitt-c"><div class="habitt-date">{day}</div>"#,
                    r#"<div class="habitt-dots"><div>{annotation}</div></div></div></td>"#,
                ),
                day = day,
                annotation = annotation
            ),
        }
    }
}

impl fmt::Display for Annotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Annotation::Glyph => f.write_str(CHECK_GLYPH),
            Annotation::Text(s) => write!(f, "{}", Escaped(s)),
            Annotation::Markup(s) => f.write_str(s),
        }
    }
}
