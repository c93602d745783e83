//! Renders [`App`] into styled lines.
//!
//! Drawing is split from terminal output so layout can be tested as plain
//! text.

use std::ops::Range;
use std::time::Instant;

use registration_lib::model::AddressLine;
use registration_lib::model::DocumentField;
use registration_lib::model::FieldPath;
use registration_lib::validation::ValidationContext;
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::app::Focus;
use crate::app::Liveness;
use crate::toast::ToastLevel;
use crate::widgets::SpinnerCell;

const LABEL_WIDTH: usize = 22;
const INPUT_WIDTH: usize = 34;
const INDENT: &str = "  ";

const TITLE: &str = "Registration";
const HELP: [&str; 2] = [
    "Tab/Shift+Tab move  Space toggle  Enter load file",
    "Ctrl+N add document  Ctrl+D remove last  Ctrl+S submit  Esc quit",
];

pub const SUBMIT_LABEL: &str = "Submit";
pub const SUBMITTING_LABEL: &str = "Loading...";
pub const FILE_TYPE_PLACEHOLDER: &str = "Select file type";
pub const NO_FILE: &str = "No file chosen";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpanStyle {
    Plain,
    Title,
    Label,
    Input,
    FocusedInput,
    Placeholder,
    Disabled,
    Error,
    Muted,
    Button,
    FocusedButton,
    Success,
    Info,
    Snake(f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    pub fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, SpanStyle::Plain)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    fn push(&mut self, span: Span) -> &mut Self {
        self.spans.push(span);
        self
    }

    fn width(&self) -> usize {
        self.spans.iter().map(|s| s.text.width()).sum()
    }

    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }
}

/// One full screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub lines: Vec<Line>,
    /// Terminal cursor as `(column, row)`, shown only in text inputs.
    pub cursor: Option<(u16, u16)>,
}

impl Frame {
    fn line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// All lines as plain text, joined by newlines.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(Line::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Vertical scroll position of the form body, kept across frames.
///
/// The header and the footer (buttons, notifications, help) are pinned; the
/// fields between them scroll so the focused one stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    height: usize,
    offset: usize,
}

impl Viewport {
    pub fn new(height: u16) -> Self {
        Self {
            height: height as usize,
            offset: 0,
        }
    }

    /// Updates the terminal height, e.g. after a resize.
    pub fn set_height(&mut self, height: u16) {
        self.height = height as usize;
    }

    /// First body line on screen.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Scrolls the least distance that brings `rows` into a window of
    /// `window` lines, then clamps to a body of `len` lines.
    fn scroll_to(&mut self, rows: Option<Range<usize>>, window: usize, len: usize) {
        if let Some(rows) = rows {
            if rows.end > self.offset + window {
                self.offset = rows.end.saturating_sub(window);
            }
            if rows.start < self.offset {
                self.offset = rows.start;
            }
        }
        self.offset = self.offset.min(len.saturating_sub(window));
    }
}

/// Lines of the scrolling part, with the focused field's rows.
#[derive(Default)]
struct Body {
    lines: Vec<Line>,
    cursor: Option<(u16, usize)>,
    focus: Option<Range<usize>>,
}

pub fn render(app: &App, cx: &ValidationContext, now: Instant, viewport: &mut Viewport) -> Frame {
    let errors = app.form().visible_errors(cx);

    let header = vec![header(app, now), Line::default()];

    let mut body = Body::default();
    for path in FieldPath::SCALARS {
        render_field(&mut body, app, path, errors.get(&path));
    }
    body.lines.push(Line::default());
    let documents = app.form().draft().documents.len();
    body.lines.push(Line {
        spans: vec![Span::new(format!("Documents ({})", documents), SpanStyle::Title)],
    });
    for index in 0..documents {
        for path in FieldPath::document(index) {
            render_field(&mut body, app, path, errors.get(&path));
        }
    }

    let footer = footer(app);

    let window = viewport
        .height
        .saturating_sub(header.len() + footer.len());
    viewport.scroll_to(body.focus.clone(), window, body.lines.len());
    let offset = viewport.offset;
    let visible = offset..(offset + window).min(body.lines.len());

    let mut frame = Frame::default();
    for line in header {
        frame.line(line);
    }
    frame.cursor = body
        .cursor
        .filter(|(_, row)| visible.contains(row))
        .map(|(column, row)| (column, (frame.lines.len() + row - offset) as u16));
    for line in body.lines.drain(visible) {
        frame.line(line);
    }
    for line in footer {
        frame.line(line);
    }
    frame
}

fn footer(app: &App) -> Vec<Line> {
    let mut lines = vec![Line::default(), buttons(app)];

    if !app.toasts().is_empty() {
        lines.push(Line::default());
    }
    for toast in app.toasts().iter() {
        let style = match toast.level {
            ToastLevel::Info => SpanStyle::Info,
            ToastLevel::Success => SpanStyle::Success,
            ToastLevel::Error => SpanStyle::Error,
        };
        lines.push(Line {
            spans: vec![Span::plain(INDENT), Span::new(&toast.message, style)],
        });
    }

    lines.push(Line::default());
    for help in HELP {
        lines.push(Line {
            spans: vec![Span::new(help, SpanStyle::Muted)],
        });
    }
    lines
}

fn header(app: &App, now: Instant) -> Line {
    let mut line = Line::default();
    line.push(Span::new(TITLE, SpanStyle::Title)).push(Span::plain("  "));

    if app.is_animating() {
        for cell in app.spinner().frame_at(app.elapsed(now)) {
            let style = match cell {
                SpinnerCell::Track => SpanStyle::Muted,
                SpinnerCell::Snake(t) => SpanStyle::Snake(t),
            };
            line.push(Span::new(cell.glyph().to_string(), style));
        }
        line.push(Span::plain(" "));
    }

    let (status, style) = match app.liveness() {
        Liveness::Checking => ("Connecting...", SpanStyle::Muted),
        Liveness::Live => ("Service online", SpanStyle::Success),
        Liveness::Unreachable => ("Service unreachable", SpanStyle::Error),
    };
    line.push(Span::new(status, style));
    line
}

fn render_field(body: &mut Body, app: &App, path: FieldPath, error: Option<&str>) {
    let focused = app.focus() == Focus::Field(path);
    let mirrored =
        app.form().draft().same_as_residential && matches!(path, FieldPath::Permanent(_));

    let mut line = Line::default();
    let marker = if focused { "> " } else { INDENT };
    line.push(Span::plain(marker));
    line.push(Span::new(pad(&label(path), LABEL_WIDTH), SpanStyle::Label));

    match path {
        FieldPath::SameAsResidential => {
            let mark = if app.form().draft().same_as_residential { "[x]" } else { "[ ]" };
            let style = if focused { SpanStyle::FocusedInput } else { SpanStyle::Input };
            line.push(Span::new(mark, style));
        }
        FieldPath::Document(_, DocumentField::FileType) => {
            let value = app.form().display_value(path);
            let (text, style) = if value.is_empty() {
                (FILE_TYPE_PLACEHOLDER.to_string(), SpanStyle::Placeholder)
            } else {
                (value, SpanStyle::Input)
            };
            let style = if focused { SpanStyle::FocusedInput } else { style };
            line.push(Span::new(format!("< {} >", pad(&text, 16)), style));
        }
        FieldPath::Document(index, DocumentField::File) if !focused => {
            let documents = &app.form().draft().documents;
            let loaded = documents.get(index).and_then(|e| e.file.as_ref());
            match loaded {
                Some(file) => {
                    line.push(Span::new(field_box(file.name()), SpanStyle::Input));
                    let size = format!(" {}", human_size(file.len()));
                    line.push(Span::new(size, SpanStyle::Muted));
                }
                None if !app.file_path(index).is_empty() => {
                    line.push(Span::new(field_box(app.file_path(index)), SpanStyle::Input));
                    line.push(Span::new(" Enter to load", SpanStyle::Muted));
                }
                None => {
                    line.push(Span::new(field_box(NO_FILE), SpanStyle::Placeholder));
                }
            }
        }
        _ if focused => {
            let editor = app.editor();
            let column = line.width() + 1 + editor.before_cursor().width();
            body.cursor = Some((column as u16, body.lines.len()));
            line.push(Span::new(field_box(editor.text()), SpanStyle::FocusedInput));
            if matches!(path, FieldPath::Document(_, DocumentField::File)) {
                line.push(Span::new(" path, Enter to load", SpanStyle::Muted));
            }
        }
        _ => {
            let style = if mirrored { SpanStyle::Disabled } else { SpanStyle::Input };
            line.push(Span::new(field_box(&app.form().display_value(path)), style));
        }
    }
    let start = body.lines.len();
    body.lines.push(line);

    if let Some(message) = error {
        body.lines.push(Line {
            spans: vec![
                Span::plain(" ".repeat(INDENT.len() + LABEL_WIDTH + 1)),
                Span::new(message, SpanStyle::Error),
            ],
        });
    }
    if focused {
        body.focus = Some(start..body.lines.len());
    }
}

fn buttons(app: &App) -> Line {
    let mut line = Line::default();
    line.push(Span::plain(INDENT));

    let submitting = app.handler().is_submitting();
    let submit_label = if submitting { SUBMITTING_LABEL } else { SUBMIT_LABEL };
    let controls = [
        (Focus::AddDocument, "Add document"),
        (Focus::RemoveDocument, "Remove last"),
        (Focus::Submit, submit_label),
    ];
    for (focus, text) in controls {
        let style = if focus == Focus::Submit && submitting {
            SpanStyle::Disabled
        } else if app.focus() == focus {
            SpanStyle::FocusedButton
        } else {
            SpanStyle::Button
        };
        line.push(Span::new(format!("[ {} ]", text), style)).push(Span::plain(" "));
    }
    line
}

/// Human-readable label for a field.
pub fn label(path: FieldPath) -> String {
    let street = |line: AddressLine| match line {
        AddressLine::Street1 => "street 1",
        AddressLine::Street2 => "street 2",
    };
    match path {
        FieldPath::FirstName => "First name".to_string(),
        FieldPath::LastName => "Last name".to_string(),
        FieldPath::Email => "Email".to_string(),
        FieldPath::DateOfBirth => "Date of birth".to_string(),
        FieldPath::Residential(line) => format!("Residential {}", street(line)),
        FieldPath::SameAsResidential => "Same as residential".to_string(),
        FieldPath::Permanent(line) => format!("Permanent {}", street(line)),
        FieldPath::Document(index, field) => {
            let name = match field {
                DocumentField::FileName => "file name",
                DocumentField::FileType => "type",
                DocumentField::File => "file",
            };
            format!("#{} {}", index + 1, name)
        }
    }
}

fn field_box(text: &str) -> String {
    format!("[{}]", pad(text, INPUT_WIDTH))
}

/// Pads `text` with spaces to `width` columns. Longer text is kept whole.
fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    if used >= width {
        return text.to_string();
    }
    format!("{}{}", text, " ".repeat(width - used))
}

fn human_size(bytes: usize) -> String {
    const KIB: usize = 1024;
    const MIB: usize = KIB * 1024;
    if bytes >= MIB {
        format!("({:.1} MiB)", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("({:.1} KiB)", bytes as f64 / KIB as f64)
    } else {
        format!("({} B)", bytes)
    }
}
