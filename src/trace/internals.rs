use std::io::Write;

use crate::cursor::Cursor;
use crate::error::ParseResult;

pub(crate) struct Depth {
    depth: usize,
}

impl Depth {
    pub(crate) fn new() -> Self {
        let depth = DEPTH.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Self { depth }
    }
}

impl Drop for Depth {
    fn drop(&mut self) {
        let _ = DEPTH.fetch_sub(1, std::sync::atomic::Ordering::SeqCst);
    }
}

impl std::ops::Deref for Depth {
    type Target = usize;

    #[inline(always)]
    fn deref(&self) -> &Self::Target {
        &self.depth
    }
}

static DEPTH: std::sync::atomic::AtomicUsize = std::sync::atomic::AtomicUsize::new(0);

pub(crate) fn start<C: Cursor>(depth: usize, name: &str, input: &C) {
    let gutter_style = anstyle::Style::new().bold();
    let input_style = anstyle::Style::new().underline();

    let (call_width, input_width) = column_widths();
    let call_column = format!("{:depth$}> {name}", "");
    let preview = preview(input, input_width);

    let writer = anstream::stderr();
    let mut writer = writer.lock();
    let _ = writeln!(
        writer,
        "{call_column:call_width$} {gutter_style}|{gutter_reset} @{position} {input_style}{preview}{input_reset}",
        gutter_style = gutter_style.render(),
        gutter_reset = gutter_style.render_reset(),
        position = input.position(),
        input_style = input_style.render(),
        input_reset = input_style.render_reset(),
    );
}

pub(crate) fn end<C: Cursor, A>(
    depth: usize,
    name: &str,
    entry: usize,
    result: &ParseResult<C, A>,
) {
    let gutter_style = anstyle::Style::new().bold();
    let (call_width, _) = column_widths();
    let call_column = format!("{:depth$}< {name}", "");

    let (status_style, status) = match result {
        ParseResult::Match { next, .. } => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Green.into())),
            format!("+{}", next.position() - entry),
        ),
        ParseResult::NoMatch(_) => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Yellow.into())),
            "no-match".to_owned(),
        ),
        ParseResult::Partial(failure) => (
            anstyle::Style::new().fg_color(Some(anstyle::AnsiColor::Red.into())),
            format!("partial @{}", failure.at().position()),
        ),
    };

    let writer = anstream::stderr();
    let mut writer = writer.lock();
    let _ = writeln!(
        writer,
        "{status_style}{call_column:call_width$}{status_reset} {gutter_style}|{gutter_reset} {status_style}{status}{status_reset}",
        gutter_style = gutter_style.render(),
        gutter_reset = gutter_style.render_reset(),
        status_style = status_style.render(),
        status_reset = status_style.render_reset(),
    );
}

/// Debug-renders the next few tokens, truncated to `width` columns.
fn preview<C: Cursor>(input: &C, width: usize) -> String {
    let mut out = String::new();
    let mut cur = input.clone();
    while !cur.is_eof() && out.chars().count() < width {
        if let Some(token) = cur.current() {
            out.push_str(&format!("{token:?}"));
        }
        cur = cur.advance();
    }
    if out.chars().count() > width {
        out = out.chars().take(width).collect();
        out.push('…');
    } else if cur.is_eof() {
        out.push('∅');
    }
    out
}

fn column_widths() -> (usize, usize) {
    let term_width = term_width();

    let min_call_width = 40;
    let min_input_width = 20;
    let decor_width = 3;
    let extra_width = term_width
        .checked_sub(min_call_width + min_input_width + decor_width)
        .unwrap_or_default();
    let call_width = min_call_width + 2 * extra_width / 3;
    let input_width = min_input_width + extra_width / 3;

    (call_width, input_width)
}

fn term_width() -> usize {
    columns_env().or_else(query_width).unwrap_or(80)
}

fn query_width() -> Option<usize> {
    use is_terminal_polyfill::IsTerminal;
    if std::io::stderr().is_terminal() {
        terminal_size::terminal_size().map(|(w, _h)| w.0.into())
    } else {
        None
    }
}

fn columns_env() -> Option<usize> {
    std::env::var("COLUMNS")
        .ok()
        .and_then(|c| c.parse::<usize>().ok())
}
