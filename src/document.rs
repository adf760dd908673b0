//! Rendering of calendar blocks embedded in a Markdown document.
//!
//! A calendar block is a fenced code block whose info string is `habitt`:
//!
//! ````text
//! ```habitt
//! [month: 2021-01]
//! (1)(2,gym)
//! ```
//! ````
//!
//! Each block is replaced by its rendered HTML; all other text passes through
//! unchanged.

use crate::config::Config;
use crate::render::render_source;
use pulldown_cmark::{CodeBlockKind, Event, Parser, Tag, TagEnd};
use std::ops::Range;

const BLOCK_LANG: &str = "habitt";

/// Replaces every calendar block in `doc` with its rendered table.  A block
/// that is never closed runs to the end of its container.
pub(crate) fn render_document(doc: &str, config: &Config) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut copied = 0;
    let mut current: Option<(Range<usize>, String)> = None;
    let mut blocks = 0usize;
    for (event, range) in Parser::new(doc).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info)))
                if info.split_whitespace().next() == Some(BLOCK_LANG) =>
            {
                current = Some((range, String::new()));
            }
            Event::Text(text) => {
                if let Some((_, source)) = current.as_mut() {
                    source.push_str(&text);
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((block, source)) = current.take() {
                    out.push_str(&doc[copied..block.start]);
                    out.push_str(&render_source(&source, config).to_string());
                    out.push_str(line_ending(&doc[block.clone()]));
                    copied = block.end;
                    blocks += 1;
                }
            }
            _ => (),
        }
    }
    out.push_str(&doc[copied..]);
    log::debug!("Rendered {blocks} calendar block(s)");
    out
}

/// The line ending that closes a block's source range, if it has one
fn line_ending(block: &str) -> &'static str {
    if block.ends_with("\r\n") {
        "\r\n"
    } else if block.ends_with('\n') {
        "\n"
    } else {
        ""
    }
}
