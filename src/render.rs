use crate::calendar::{NoteMode, Table, WeekGrid};
use crate::config::Config;
use crate::directive::{self, RenderContext};
use crate::error::DirectiveError;
use crate::html::Escaped;
use std::fmt;

/// What a markup block turns into: a calendar, or the reason there isn't one
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Rendered {
    Table(Box<Table>),
    Error(ErrorPanel),
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ErrorPanel {
    message: String,
}

impl ErrorPanel {
    pub(crate) fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"<div class="habitt-error">{}</div>"#,
            Escaped(self.message())
        )
    }
}

impl fmt::Display for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rendered::Table(table) => write!(f, "{table}"),
            Rendered::Error(panel) => write!(f, "{panel}"),
        }
    }
}

/// Parses and renders one markup block
pub(crate) fn render_source(source: &str, config: &Config) -> Rendered {
    render(directive::parse(source, config), config)
}

pub(crate) fn render(parsed: Result<RenderContext, DirectiveError>, config: &Config) -> Rendered {
    let ctx = match parsed {
        Ok(ctx) => ctx,
        Err(e) => {
            log::debug!("Rendering error panel: {e}");
            return Rendered::Error(ErrorPanel {
                message: e.to_string(),
            });
        }
    };
    let grid = WeekGrid::new(ctx.first_weekday, ctx.week_start, ctx.month_days);
    log::debug!(
        "Laying out {} days in {} weeks after {} blank(s)",
        ctx.month_days,
        grid.weeks().len(),
        grid.leading()
    );
    let mode = if config.enable_raw_markup_in_marks {
        NoteMode::Markup
    } else {
        NoteMode::Text
    };
    let labels = std::array::from_fn(|i| {
        // i < 7, so the sum always fits
        let offset = u8::try_from(i).unwrap_or_default();
        config.day_labels.get(offset + ctx.week_start).to_owned()
    });
    let table = Table::new(&grid, &ctx.marks, mode)
        .weekday_labels(labels)
        .title(config.display_head.then_some(ctx.label))
        .width(ctx.width);
    Rendered::Table(Box::new(table))
}
