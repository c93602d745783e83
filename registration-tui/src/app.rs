//! Application state and input handling.
//!
//! [`App`] owns the form and is only touched by the event loop. Anything
//! slow (the network, reading files) is returned as a [`Command`] for the
//! loop to run on a task; the outcome comes back as an [`AppEvent`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyModifiers;
use log::debug;
use log::info;
use log::warn;
use registration_lib::RegisterResponse;
use registration_lib::error::ApiError;
use registration_lib::form::FormState;
use registration_lib::model::DocumentField;
use registration_lib::model::FieldPath;
use registration_lib::model::FieldValue;
use registration_lib::model::FilePayload;
use registration_lib::model::FileType;
use registration_lib::model::MIN_DOCUMENTS;
use registration_lib::submit::RegistrationPayload;
use registration_lib::submit::SubmissionHandler;
use registration_lib::submit::SubmitRejected;
use registration_lib::validation::ValidationContext;

use crate::editor::EditResult;
use crate::editor::TextInput;
use crate::toast::Toast;
use crate::toast::Toasts;
use crate::widgets::Spinner;

/// A focusable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(FieldPath),
    AddDocument,
    RemoveDocument,
    Submit,
}

/// Work the event loop runs off the UI thread.
#[derive(Debug)]
pub enum Command {
    Submit(RegistrationPayload),
    /// `ticket` comes back with the result so stale loads can be dropped.
    LoadFile {
        index: usize,
        path: PathBuf,
        ticket: u64,
    },
}

/// Results delivered back to the event loop.
#[derive(Debug)]
pub enum AppEvent {
    Live(Result<(), ApiError>),
    Submitted(Result<RegisterResponse, ApiError>),
    FileLoaded {
        index: usize,
        path: PathBuf,
        ticket: u64,
        result: std::io::Result<FilePayload>,
    },
}

/// State of the start-up liveness check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Checking,
    Live,
    Unreachable,
}

/// Issues tickets for file loads.
///
/// A load is current only if its document entry has not been removed and the
/// form has not been reset since the ticket was issued.
#[derive(Debug, Default)]
struct LoadTickets {
    generation: u64,
    reset_at: u64,
    removed_at: BTreeMap<usize, u64>,
}

impl LoadTickets {
    fn issue(&self) -> u64 {
        self.generation
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.reset_at = self.generation;
        self.removed_at.clear();
    }

    fn remove(&mut self, index: usize) {
        self.generation += 1;
        self.removed_at.insert(index, self.generation);
    }

    fn is_current(&self, index: usize, ticket: u64) -> bool {
        ticket >= self.reset_at
            && self
                .removed_at
                .get(&index)
                .is_none_or(|removed| ticket >= *removed)
    }
}

pub struct App {
    form: FormState,
    handler: SubmissionHandler,
    focus: Focus,
    editor: TextInput,
    file_paths: BTreeMap<usize, String>,
    loads: LoadTickets,
    toasts: Toasts,
    liveness: Liveness,
    spinner: Spinner,
    started: Instant,
    quit: bool,
}

impl App {
    pub fn new(now: Instant) -> Self {
        let mut app = Self {
            form: FormState::new(),
            handler: SubmissionHandler::new(),
            focus: Focus::Field(FieldPath::FirstName),
            editor: TextInput::default(),
            file_paths: BTreeMap::new(),
            loads: LoadTickets::default(),
            toasts: Toasts::new(),
            liveness: Liveness::Checking,
            spinner: Spinner::new(),
            started: now,
            quit: false,
        };
        app.load_editor();
        app
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    #[cfg(test)]
    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        &mut self.form
    }

    pub fn handler(&self) -> &SubmissionHandler {
        &self.handler
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn editor(&self) -> &TextInput {
        &self.editor
    }

    pub fn toasts(&self) -> &Toasts {
        &self.toasts
    }

    pub fn liveness(&self) -> Liveness {
        self.liveness
    }

    pub fn spinner(&self) -> &Spinner {
        &self.spinner
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Path typed for the document at `index`, before or after loading.
    pub fn file_path(&self, index: usize) -> &str {
        self.file_paths.get(&index).map(String::as_str).unwrap_or("")
    }

    /// Whether a loading indicator is showing.
    pub fn is_animating(&self) -> bool {
        self.liveness == Liveness::Checking || self.handler.is_submitting()
    }

    /// Time since start, driving the spinner.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started)
    }

    /// When the loop should wake up without input.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        let frame = self
            .is_animating()
            .then(|| now + self.spinner.frame_duration());
        match (frame, self.toasts.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune(now);
    }

    /// Focusable controls, top to bottom.
    ///
    /// Permanent address inputs are skipped while they mirror the
    /// residential address.
    pub fn focus_order(&self) -> Vec<Focus> {
        let mirrored = self.form.draft().same_as_residential;
        let mut order: Vec<Focus> = FieldPath::SCALARS
            .into_iter()
            .filter(|path| !(mirrored && matches!(path, FieldPath::Permanent(_))))
            .map(Focus::Field)
            .collect();
        for index in 0..self.form.draft().documents.len() {
            order.extend(FieldPath::document(index).map(Focus::Field));
        }
        order.extend([Focus::AddDocument, Focus::RemoveDocument, Focus::Submit]);
        order
    }

    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        cx: &ValidationContext,
        now: Instant,
    ) -> Option<Command> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => {
                self.quit = true;
                return None;
            }
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
                self.quit = true;
                return None;
            }
            KeyCode::Char('s') if ctrl => return self.submit(cx, now),
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(1);
                return None;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(-1);
                return None;
            }
            // The draft is read-only while a request is in flight.
            _ if self.handler.is_submitting() => return None,
            KeyCode::Char('n') if ctrl => {
                self.append_document();
                return None;
            }
            KeyCode::Char('d') if ctrl => {
                self.remove_last_document(now);
                return None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Field(FieldPath::SameAsResidential) => {
                if matches!(key.code, KeyCode::Char(' ') | KeyCode::Enter) {
                    self.toggle_same_as_residential();
                }
                None
            }
            Focus::Field(FieldPath::Document(index, DocumentField::FileType)) => {
                match key.code {
                    KeyCode::Right | KeyCode::Char(' ') => self.cycle_file_type(index, true),
                    KeyCode::Left => self.cycle_file_type(index, false),
                    KeyCode::Enter => self.move_focus(1),
                    _ => {}
                }
                None
            }
            Focus::Field(FieldPath::Document(index, DocumentField::File)) => {
                if key.code == KeyCode::Enter {
                    return self.load_file(index);
                }
                if self.editor.handle_key(key) == EditResult::Changed {
                    self.file_paths.insert(index, self.editor.text().to_string());
                }
                None
            }
            Focus::Field(path) => {
                if key.code == KeyCode::Enter {
                    self.move_focus(1);
                    return None;
                }
                if self.editor.handle_key(key) == EditResult::Changed {
                    let value = FieldValue::text(self.editor.text());
                    if let Err(e) = self.form.set_field(path, value) {
                        warn!("Failed to update {}: {}", path, e);
                    }
                }
                None
            }
            Focus::AddDocument => {
                if is_activate(key) {
                    self.append_document();
                }
                None
            }
            Focus::RemoveDocument => {
                if is_activate(key) {
                    self.remove_last_document(now);
                }
                None
            }
            Focus::Submit => {
                if is_activate(key) {
                    return self.submit(cx, now);
                }
                None
            }
        }
    }

    pub fn handle_event(&mut self, event: AppEvent, now: Instant) {
        match event {
            AppEvent::Live(Ok(())) => {
                info!("Registration service is live");
                self.liveness = Liveness::Live;
            }
            AppEvent::Live(Err(e)) => {
                warn!("Liveness check failed: {}", e);
                self.liveness = Liveness::Unreachable;
            }
            AppEvent::Submitted(result) => {
                let notification = self.handler.finish(&mut self.form, result);
                if notification.is_success() {
                    self.loads.reset();
                    self.file_paths.clear();
                    self.focus = Focus::Field(FieldPath::FirstName);
                    self.load_editor();
                }
                self.toasts.push(notification.into(), now);
            }
            AppEvent::FileLoaded {
                index,
                ticket,
                ..
            } if !self.loads.is_current(index, ticket) => {
                debug!("Dropping stale file load for document {}", index);
            }
            AppEvent::FileLoaded {
                index,
                path,
                result,
                ..
            } => match result {
                Ok(file) => {
                    debug!(
                        "Loaded {} ({} bytes) for document {}",
                        file.name(),
                        file.len(),
                        index
                    );
                    let name = file.name().to_string();
                    let path = FieldPath::Document(index, DocumentField::File);
                    match self.form.set_file(index, Some(file)) {
                        Ok(()) => {
                            self.form.mark_touched(path);
                            self.toasts.push(Toast::info(format!("Attached {}", name)), now);
                        }
                        Err(e) => warn!("Dropped file for document {}: {}", index, e),
                    }
                }
                Err(e) => {
                    warn!("Failed to read {}: {}", path.display(), e);
                    self.toasts.push(
                        Toast::error(format!("Could not read {}: {}", path.display(), e)),
                        now,
                    );
                }
            },
        }
    }

    fn submit(&mut self, cx: &ValidationContext, now: Instant) -> Option<Command> {
        if !self.handler.submit_enabled() {
            return None;
        }
        self.blur();
        match self.handler.begin(&mut self.form, cx) {
            Ok(payload) => Some(Command::Submit(payload)),
            Err(SubmitRejected::Invalid(errors)) => {
                if let Some((path, _)) = errors.first() {
                    self.focus = Focus::Field(*path);
                    self.load_editor();
                }
                None
            }
            Err(rejected) => {
                if let Some(notification) = rejected.notification() {
                    self.toasts.push(notification.into(), now);
                }
                None
            }
        }
    }

    fn load_file(&mut self, index: usize) -> Option<Command> {
        let path = self.file_path(index).trim();
        if path.is_empty() {
            self.form.mark_touched(FieldPath::Document(index, DocumentField::File));
            return None;
        }
        Some(Command::LoadFile {
            index,
            path: PathBuf::from(path),
            ticket: self.loads.issue(),
        })
    }

    fn toggle_same_as_residential(&mut self) {
        let checked = !self.form.draft().same_as_residential;
        if let Err(e) = self.form.set_field(FieldPath::SameAsResidential, checked.into()) {
            warn!("Failed to toggle same-as-residential: {}", e);
        }
    }

    fn cycle_file_type(&mut self, index: usize, forward: bool) {
        let current = self
            .form
            .draft()
            .documents
            .get(index)
            .and_then(|entry| entry.file_type);
        let next = cycle(current, forward);
        let path = FieldPath::Document(index, DocumentField::FileType);
        if let Err(e) = self.form.set_field(path, FieldValue::FileType(next)) {
            warn!("Failed to update {}: {}", path, e);
        }
    }

    fn append_document(&mut self) {
        self.form.append_document();
    }

    fn remove_last_document(&mut self, now: Instant) {
        if !self.form.remove_last_document() {
            let message = format!("At least {} documents are required", MIN_DOCUMENTS);
            self.toasts.push(Toast::info(message), now);
            return;
        }
        let len = self.form.draft().documents.len();
        self.loads.remove(len);
        self.file_paths.retain(|index, _| *index < len);
        if let Focus::Field(path) = self.focus
            && path.document_index().is_some_and(|index| index >= len)
        {
            self.focus = Focus::Field(FieldPath::Document(len - 1, DocumentField::FileName));
            self.load_editor();
        }
    }

    fn move_focus(&mut self, delta: isize) {
        let order = self.focus_order();
        let current = order.iter().position(|f| *f == self.focus).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(order.len() as isize) as usize;
        self.blur();
        self.focus = order[next];
        self.load_editor();
    }

    fn blur(&mut self) {
        if let Focus::Field(path) = self.focus {
            self.form.mark_touched(path);
        }
    }

    fn load_editor(&mut self) {
        self.editor = match self.focus {
            Focus::Field(FieldPath::Document(index, DocumentField::File)) => {
                TextInput::new(self.file_path(index))
            }
            Focus::Field(path) if is_text(path) => TextInput::new(self.form.display_value(path)),
            _ => TextInput::default(),
        };
    }
}

/// Whether `path` is edited as free text.
pub fn is_text(path: FieldPath) -> bool {
    !matches!(
        path,
        FieldPath::SameAsResidential
            | FieldPath::Document(_, DocumentField::FileType)
            | FieldPath::Document(_, DocumentField::File)
    )
}

fn is_activate(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Placeholder, then each type, then back to the placeholder.
fn cycle(current: Option<FileType>, forward: bool) -> Option<FileType> {
    let mut options: Vec<Option<FileType>> = vec![None];
    options.extend(FileType::ALL.map(Some));
    let position = options.iter().position(|o| *o == current).unwrap_or(0);
    let len = options.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use registration_lib::model::AddressLine;
    use registration_lib::submit::SubmissionState;
    use registration_lib::validation::FIRST_NAME_REQUIRED;

    use super::*;
    use crate::toast::ToastLevel;

    fn cx() -> ValidationContext {
        ValidationContext::new(NaiveDate::from_ymd_opt(2024, 10, 14).unwrap())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Command> {
        app.handle_key(key(code), &cx(), Instant::now())
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn focus_on(app: &mut App, target: Focus) {
        for _ in 0..app.focus_order().len() {
            if app.focus() == target {
                return;
            }
            press(app, KeyCode::Tab);
        }
        panic!("{:?} is not focusable", target);
    }

    fn fill_valid(app: &mut App) {
        let fields = [
            "Ada",
            "Lovelace",
            "ada@example.com",
            "1990-12-10",
            "12 St James's Square",
            "London",
        ];
        for value in fields {
            type_text(app, value);
            press(app, KeyCode::Tab);
        }
        // Same as residential
        press(app, KeyCode::Char(' '));
        for index in 0..2 {
            focus_on(app, Focus::Field(FieldPath::Document(index, DocumentField::FileName)));
            type_text(app, "Scan");
            press(app, KeyCode::Tab);
            press(app, KeyCode::Right);
            app.handle_event(
                AppEvent::FileLoaded {
                    index,
                    path: PathBuf::from("scan.png"),
                    ticket: 0,
                    result: Ok(FilePayload::new("scan.png", vec![1, 2])),
                },
                Instant::now(),
            );
        }
    }

    #[test]
    fn test_typing_updates_draft() {
        let mut app = App::new(Instant::now());
        type_text(&mut app, "Ada");
        assert_eq!(app.form().draft().first_name, "Ada");
        assert_eq!(app.editor().text(), "Ada");
    }

    #[test]
    fn test_tab_marks_touched() {
        let mut app = App::new(Instant::now());
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus(), Focus::Field(FieldPath::LastName));
        assert_eq!(
            app.form().visible_error(FieldPath::FirstName, &cx()).as_deref(),
            Some(FIRST_NAME_REQUIRED)
        );
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus(), Focus::Field(FieldPath::FirstName));
    }

    #[test]
    fn test_mirrored_permanent_fields_are_skipped() {
        let mut app = App::new(Instant::now());
        focus_on(&mut app, Focus::Field(FieldPath::SameAsResidential));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.form().draft().same_as_residential);

        press(&mut app, KeyCode::Tab);
        assert_eq!(
            app.focus(),
            Focus::Field(FieldPath::Document(0, DocumentField::FileName))
        );
        assert!(
            !app.focus_order()
                .contains(&Focus::Field(FieldPath::Permanent(AddressLine::Street1)))
        );
    }

    #[test]
    fn test_file_type_cycles_through_placeholder() {
        assert_eq!(cycle(None, true), Some(FileType::Image));
        assert_eq!(cycle(Some(FileType::Pdf), true), None);
        assert_eq!(cycle(None, false), Some(FileType::Pdf));
    }

    #[test]
    fn test_ctrl_n_and_ctrl_d_respect_floor() {
        let mut app = App::new(Instant::now());
        app.handle_key(ctrl('n'), &cx(), Instant::now());
        assert_eq!(app.form().draft().documents.len(), 3);

        focus_on(&mut app, Focus::Field(FieldPath::Document(2, DocumentField::File)));
        type_text(&mut app, "/tmp/x.pdf");
        assert_eq!(app.file_path(2), "/tmp/x.pdf");

        app.handle_key(ctrl('d'), &cx(), Instant::now());
        assert_eq!(app.form().draft().documents.len(), 2);
        assert_eq!(app.file_path(2), "");
        assert_eq!(
            app.focus(),
            Focus::Field(FieldPath::Document(1, DocumentField::FileName))
        );

        app.handle_key(ctrl('d'), &cx(), Instant::now());
        assert_eq!(app.form().draft().documents.len(), 2);
        let toast = app.toasts().iter().last().unwrap();
        assert_eq!(toast.message, "At least 2 documents are required");
    }

    #[test]
    fn test_enter_on_file_requests_load() {
        let mut app = App::new(Instant::now());
        focus_on(&mut app, Focus::Field(FieldPath::Document(0, DocumentField::File)));
        assert!(press(&mut app, KeyCode::Enter).is_none());

        type_text(&mut app, " ./id.png ");
        match press(&mut app, KeyCode::Enter) {
            Some(Command::LoadFile { index, path, .. }) => {
                assert_eq!(index, 0);
                assert_eq!(path, PathBuf::from("./id.png"));
            }
            other => panic!("expected file load, got {:?}", other),
        }
    }

    #[test]
    fn test_failed_file_load_shows_error() {
        let mut app = App::new(Instant::now());
        app.handle_event(
            AppEvent::FileLoaded {
                index: 0,
                path: PathBuf::from("missing.pdf"),
                ticket: 0,
                result: Err(std::io::Error::from(std::io::ErrorKind::NotFound)),
            },
            Instant::now(),
        );
        let toast = app.toasts().iter().next().unwrap();
        assert_eq!(toast.level, ToastLevel::Error);
        assert!(toast.message.contains("missing.pdf"));
    }

    #[test]
    fn test_invalid_submit_focuses_first_error() {
        let mut app = App::new(Instant::now());
        type_text(&mut app, "Ada");
        press(&mut app, KeyCode::Tab);

        assert!(app.handle_key(ctrl('s'), &cx(), Instant::now()).is_none());
        assert_eq!(app.focus(), Focus::Field(FieldPath::LastName));
        assert!(app.form().submit_attempted());
    }

    #[test]
    fn test_submit_round_trip() {
        let mut app = App::new(Instant::now());
        fill_valid(&mut app);

        let command = app.handle_key(ctrl('s'), &cx(), Instant::now());
        assert!(matches!(command, Some(Command::Submit(_))));
        assert_eq!(app.handler().state(), SubmissionState::Submitting);
        assert!(app.is_animating());

        // Disabled while in flight
        assert!(app.handle_key(ctrl('s'), &cx(), Instant::now()).is_none());

        app.handle_event(
            AppEvent::Submitted(Ok(RegisterResponse {
                message: Some("Registered".to_string()),
            })),
            Instant::now(),
        );
        assert_eq!(app.handler().state(), SubmissionState::Idle);
        assert_eq!(app.form().draft().first_name, "");
        assert_eq!(app.file_path(0), "");
        assert_eq!(app.focus(), Focus::Field(FieldPath::FirstName));
        let toast = app.toasts().iter().last().unwrap();
        assert_eq!(toast.level, ToastLevel::Success);
        assert_eq!(toast.message, "Registered");
    }

    #[test]
    fn test_failed_submit_keeps_draft() {
        let mut app = App::new(Instant::now());
        fill_valid(&mut app);
        app.handle_key(ctrl('s'), &cx(), Instant::now());

        app.handle_event(
            AppEvent::Submitted(Err(ApiError::http(
                409,
                Some("Email already exists".to_string()),
            ))),
            Instant::now(),
        );
        assert_eq!(app.form().draft().first_name, "Ada");
        assert!(app.handler().submit_enabled());
        let toast = app.toasts().iter().last().unwrap();
        assert_eq!(toast.message, "Error : Email already exists");
    }

    fn request_load(app: &mut App, index: usize, path: &str) -> u64 {
        focus_on(app, Focus::Field(FieldPath::Document(index, DocumentField::File)));
        type_text(app, path);
        match press(app, KeyCode::Enter) {
            Some(Command::LoadFile { ticket, .. }) => ticket,
            other => panic!("expected file load, got {:?}", other),
        }
    }

    fn loaded(index: usize, ticket: u64) -> AppEvent {
        AppEvent::FileLoaded {
            index,
            path: PathBuf::from("late.pdf"),
            ticket,
            result: Ok(FilePayload::new("late.pdf", vec![9])),
        }
    }

    fn attached(app: &App, index: usize) -> Option<&str> {
        app.form()
            .draft()
            .documents
            .get(index)
            .and_then(|entry| entry.file.as_ref())
            .map(FilePayload::name)
    }

    #[test]
    fn test_load_finishing_after_reset_is_dropped() {
        let mut app = App::new(Instant::now());
        fill_valid(&mut app);
        let ticket = request_load(&mut app, 0, "late.pdf");

        app.handle_key(ctrl('s'), &cx(), Instant::now());
        app.handle_event(AppEvent::Submitted(Ok(RegisterResponse::default())), Instant::now());
        assert_eq!(attached(&app, 0), None);

        app.handle_event(loaded(0, ticket), Instant::now());
        assert_eq!(attached(&app, 0), None);
        assert!(!app.form().is_touched(FieldPath::Document(0, DocumentField::File)));
    }

    #[test]
    fn test_load_for_removed_entry_is_dropped() {
        let mut app = App::new(Instant::now());
        app.handle_key(ctrl('n'), &cx(), Instant::now());
        let kept = request_load(&mut app, 0, "id.png");
        let removed = request_load(&mut app, 2, "late.pdf");

        app.handle_key(ctrl('d'), &cx(), Instant::now());
        app.handle_key(ctrl('n'), &cx(), Instant::now());
        assert_eq!(app.form().draft().documents.len(), 3);

        app.handle_event(loaded(2, removed), Instant::now());
        assert_eq!(attached(&app, 2), None);

        app.handle_event(loaded(0, kept), Instant::now());
        assert_eq!(attached(&app, 0), Some("late.pdf"));

        let fresh = request_load(&mut app, 2, "new.pdf");
        app.handle_event(loaded(2, fresh), Instant::now());
        assert_eq!(attached(&app, 2), Some("late.pdf"));
    }

    #[test]
    fn test_draft_is_read_only_while_submitting() {
        let mut app = App::new(Instant::now());
        fill_valid(&mut app);
        app.handle_key(ctrl('s'), &cx(), Instant::now());
        assert!(app.handler().is_submitting());

        focus_on(&mut app, Focus::Field(FieldPath::FirstName));
        type_text(&mut app, "X");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.form().draft().first_name, "Ada");
        assert_eq!(app.editor().text(), "Ada");

        app.handle_key(ctrl('n'), &cx(), Instant::now());
        assert_eq!(app.form().draft().documents.len(), 2);

        app.handle_event(
            AppEvent::Submitted(Err(ApiError::http(500, None))),
            Instant::now(),
        );
        type_text(&mut app, "!");
        assert_eq!(app.form().draft().first_name, "Ada!");
    }

    #[test]
    fn test_liveness_updates() {
        let mut app = App::new(Instant::now());
        assert!(app.is_animating());
        app.handle_event(AppEvent::Live(Ok(())), Instant::now());
        assert_eq!(app.liveness(), Liveness::Live);
        assert!(!app.is_animating());
        assert!(app.next_deadline(Instant::now()).is_none());

        app.handle_event(AppEvent::Live(Err(ApiError::http(503, None))), Instant::now());
        assert_eq!(app.liveness(), Liveness::Unreachable);
    }

    #[test]
    fn test_escape_quits() {
        let mut app = App::new(Instant::now());
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit());
    }
}
