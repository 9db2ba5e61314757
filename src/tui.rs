use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::iter;

use crate::app::App;
use crate::backend::Backend;
use crate::display::{format_brl, format_date, parse_date, truncate};
use crate::error::ValidationErrors;
use crate::filter::{CandidateFilter, CandidateSort, ModeFilter, PostingFilter, MAX_DISTANCE_KM};
use crate::form::{FormStep, LoginForm, PostingForm};
use crate::models::{Candidate, Posting, PostingStatus, WorkMode};
use crate::session::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoginField {
    Email,
    Password,
}

/// Text box currently receiving keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    PostingSearch,
    CandidateName,
    CandidateEquipment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormField {
    Title,
    Service,
    Value,
    ServiceDate,
    Availability,
    Requirements,
    Contact,
    Training,
    Status,
    WorkMode,
    Cep,
    Radius,
    EquipmentQuestion,
    CustomQuestion(usize),
}

const DETAIL_FIELDS: [FormField; 12] = [
    FormField::Title,
    FormField::Service,
    FormField::Value,
    FormField::ServiceDate,
    FormField::Availability,
    FormField::Requirements,
    FormField::Contact,
    FormField::Training,
    FormField::Status,
    FormField::WorkMode,
    FormField::Cep,
    FormField::Radius,
];

impl FormField {
    /// Key the form validation reports this field under.
    fn key(&self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Service => "service",
            FormField::Value => "value",
            FormField::ServiceDate => "service_date",
            FormField::Availability => "availability",
            FormField::Requirements => "requirements",
            FormField::Contact => "contact",
            FormField::Training => "training",
            FormField::Status => "status",
            FormField::WorkMode => "work_mode",
            FormField::Cep => "cep",
            FormField::Radius => "radius",
            FormField::EquipmentQuestion => "equipment_question",
            FormField::CustomQuestion(_) => "custom_questions",
        }
    }

    fn label(&self) -> String {
        match self {
            FormField::Title => "Title".to_string(),
            FormField::Service => "Service".to_string(),
            FormField::Value => "Value (R$)".to_string(),
            FormField::ServiceDate => "Date (DD/MM/YYYY)".to_string(),
            FormField::Availability => "Availability".to_string(),
            FormField::Requirements => "Requirements".to_string(),
            FormField::Contact => "Contact".to_string(),
            FormField::Training => "Training".to_string(),
            FormField::Status => "Status".to_string(),
            FormField::WorkMode => "Mode".to_string(),
            FormField::Cep => "CEP".to_string(),
            FormField::Radius => "Radius (km)".to_string(),
            FormField::EquipmentQuestion => "Equipment question".to_string(),
            FormField::CustomQuestion(i) => format!("Question {}", i + 1),
        }
    }
}

/// Create/edit dialog over the postings screen.
struct Editor {
    form: PostingForm,
    focus: usize,
    date_text: String,
}

impl Editor {
    fn new(form: PostingForm) -> Self {
        let date_text = form.fields().service_date.map(format_date).unwrap_or_default();
        Self {
            form,
            focus: 0,
            date_text,
        }
    }

    /// Fields shown on the current step; postal code and radius only for on-site.
    fn visible_fields(&self) -> Vec<FormField> {
        let fields = self.form.fields();
        match self.form.step() {
            FormStep::Details => DETAIL_FIELDS
                .into_iter()
                .filter(|f| {
                    fields.work_mode == Some(WorkMode::OnSite)
                        || !matches!(f, FormField::Cep | FormField::Radius)
                })
                .collect(),
            FormStep::Questions => iter::once(FormField::EquipmentQuestion)
                .chain((0..fields.custom_questions.len()).map(FormField::CustomQuestion))
                .collect(),
        }
    }

    fn focused(&self) -> Option<FormField> {
        self.visible_fields().get(self.focus).copied()
    }

    fn move_focus(&mut self, forward: bool) {
        let len = self.visible_fields().len();
        if len == 0 {
            return;
        }
        self.focus = if forward {
            (self.focus + 1) % len
        } else {
            (self.focus + len - 1) % len
        };
    }

    fn clamp_focus(&mut self) {
        let len = self.visible_fields().len();
        self.focus = self.focus.min(len.saturating_sub(1));
    }

    /// Moves focus to the first field on this step that failed validation.
    fn focus_first_error(&mut self) {
        let errors = self.form.errors();
        if let Some(index) = self
            .visible_fields()
            .iter()
            .position(|f| errors.for_field(f.key()).is_some())
        {
            self.focus = index;
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        let fields = self.form.fields_mut();
        Some(match field {
            FormField::Title => &mut fields.title,
            FormField::Service => &mut fields.service,
            FormField::Value => &mut fields.value,
            FormField::ServiceDate => &mut self.date_text,
            FormField::Availability => &mut fields.availability,
            FormField::Requirements => &mut fields.requirements,
            FormField::Contact => &mut fields.contact,
            FormField::Cep => &mut fields.cep,
            FormField::Radius => &mut fields.radius,
            FormField::EquipmentQuestion => &mut fields.equipment_question,
            FormField::CustomQuestion(i) => fields.custom_questions.get_mut(i)?,
            FormField::Training | FormField::Status | FormField::WorkMode => return None,
        })
    }

    fn toggle(&mut self, field: FormField) {
        let fields = self.form.fields_mut();
        match field {
            FormField::Training => fields.training = !fields.training,
            FormField::Status => fields.status = fields.status.toggled(),
            FormField::WorkMode => {
                fields.work_mode = Some(match fields.work_mode {
                    Some(WorkMode::OnSite) => WorkMode::Remote,
                    _ => WorkMode::OnSite,
                });
            }
            _ => {}
        }
        self.clamp_focus();
    }

    fn edit_text(&mut self, field: FormField, code: KeyCode) {
        let Some(buffer) = self.text_mut(field) else { return };
        match code {
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => return,
        }
        if field == FormField::ServiceDate {
            self.form.fields_mut().service_date = parse_date(&self.date_text);
        }
    }

    fn display_value(&self, field: FormField) -> String {
        let fields = self.form.fields();
        match field {
            FormField::Title => fields.title.clone(),
            FormField::Service => fields.service.clone(),
            FormField::Value => fields.value.clone(),
            FormField::ServiceDate => self.date_text.clone(),
            FormField::Availability => fields.availability.clone(),
            FormField::Requirements => fields.requirements.clone(),
            FormField::Contact => fields.contact.clone(),
            FormField::Training => {
                String::from(if fields.training { "[x] provided" } else { "[ ] not provided" })
            }
            FormField::Status => format!("< {} >", fields.status),
            FormField::WorkMode => match fields.work_mode {
                Some(mode) => format!("< {} >", mode),
                None => "< select >".to_string(),
            },
            FormField::Cep => fields.cep.clone(),
            FormField::Radius => fields.radius.clone(),
            FormField::EquipmentQuestion => fields.equipment_question.clone(),
            FormField::CustomQuestion(i) => fields.custom_questions.get(i).cloned().unwrap_or_default(),
        }
    }
}

struct AppState<B> {
    app: App<B>,
    route: Route,
    login: LoginForm,
    login_field: LoginField,
    login_errors: ValidationErrors,
    posting_filter: PostingFilter,
    selected: usize,
    scroll_offset: u16,
    confirm_delete: bool,
    candidate_filter: CandidateFilter,
    sort: CandidateSort,
    candidate_selected: usize,
    input: Option<Input>,
    editor: Option<Editor>,
    signing_in: bool,
    toast: Option<String>,
    quit: bool,
}

impl<B: Backend> AppState<B> {
    fn new(app: App<B>, login: LoginForm) -> Self {
        Self {
            app,
            route: Route::Login,
            login,
            login_field: LoginField::Email,
            login_errors: ValidationErrors::new(),
            posting_filter: PostingFilter::default(),
            selected: 0,
            scroll_offset: 0,
            confirm_delete: false,
            candidate_filter: CandidateFilter::for_dashboard(),
            sort: CandidateSort::AsListed,
            candidate_selected: 0,
            input: None,
            editor: None,
            signing_in: false,
            toast: None,
            quit: false,
        }
    }

    fn visible_postings(&self) -> Vec<&Posting> {
        self.posting_filter.apply(self.app.postings.list())
    }

    fn current_posting(&self) -> Option<&Posting> {
        self.visible_postings().get(self.selected).copied()
    }

    fn visible_candidates(&self) -> Vec<&Candidate> {
        self.app.talent.filtered(&self.candidate_filter, self.sort)
    }

    fn current_candidate(&self) -> Option<&Candidate> {
        self.visible_candidates().get(self.candidate_selected).copied()
    }

    fn context_posting_id(&self) -> Option<String> {
        match &self.route {
            Route::TalentPool { posting_id } => posting_id.clone(),
            _ => None,
        }
    }

    async fn go(&mut self, target: &str) {
        let route = self.app.navigate(target);
        if let Err(e) = self.app.load(&route).await {
            self.toast = Some(format!("Could not load {}: {}", route, e));
        }

        match &route {
            Route::PostingDetail(id) => {
                let found = self.visible_postings().iter().position(|p| p.id == *id);
                match found {
                    Some(index) => self.selected = index,
                    None => self.toast = Some(format!("Posting {} not found", id)),
                }
            }
            Route::Postings => self.clamp_postings(),
            Route::TalentPool { .. } => self.candidate_selected = 0,
            Route::Login | Route::NotFound(_) => {}
        }
        self.scroll_offset = 0;
        self.confirm_delete = false;
        self.route = route;
    }

    fn clamp_postings(&mut self) {
        let len = self.visible_postings().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn clamp_candidates(&mut self) {
        let len = self.visible_candidates().len();
        self.candidate_selected = self.candidate_selected.min(len.saturating_sub(1));
    }

    fn next(&mut self) {
        match self.route {
            Route::TalentPool { .. } => {
                if self.candidate_selected + 1 < self.visible_candidates().len() {
                    self.candidate_selected += 1;
                }
            }
            _ => {
                if self.selected + 1 < self.visible_postings().len() {
                    self.selected += 1;
                    self.scroll_offset = 0;
                }
            }
        }
    }

    fn prev(&mut self) {
        match self.route {
            Route::TalentPool { .. } => self.candidate_selected = self.candidate_selected.saturating_sub(1),
            _ => {
                if self.selected > 0 {
                    self.selected -= 1;
                    self.scroll_offset = 0;
                }
            }
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }

    async fn handle_key(&mut self, code: KeyCode) {
        self.toast = None;

        if self.editor.is_some() {
            self.handle_form_key(code).await;
            return;
        }

        if let Some(input) = self.input {
            self.edit_input(input, code);
            return;
        }

        match self.route {
            Route::Login => self.handle_login_key(code).await,
            Route::Postings | Route::PostingDetail(_) => self.handle_postings_key(code).await,
            Route::TalentPool { .. } => self.handle_talent_key(code).await,
            Route::NotFound(_) => match code {
                KeyCode::Char('q') => self.quit = true,
                _ => self.go("/vagas").await,
            },
        }
    }

    fn edit_input(&mut self, input: Input, code: KeyCode) {
        let buffer = match input {
            Input::PostingSearch => &mut self.posting_filter.search,
            Input::CandidateName => &mut self.candidate_filter.name,
            Input::CandidateEquipment => &mut self.candidate_filter.equipment,
        };
        match code {
            KeyCode::Enter | KeyCode::Esc => self.input = None,
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Char(c) => buffer.push(c),
            _ => {}
        }
        self.clamp_postings();
        self.clamp_candidates();
    }

    async fn handle_login_key(&mut self, code: KeyCode) {
        let field = match self.login_field {
            LoginField::Email => &mut self.login.email,
            LoginField::Password => &mut self.login.password,
        };
        match code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Up | KeyCode::Down => {
                self.login_field = match self.login_field {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            KeyCode::Backspace => {
                field.pop();
            }
            KeyCode::Char(c) => field.push(c),
            KeyCode::Enter => match self.login.validate() {
                Ok(()) => {
                    self.login_errors = ValidationErrors::new();
                    self.signing_in = true;
                    self.toast = Some("Signing in...".to_string());
                }
                Err(errors) => self.login_errors = errors,
            },
            _ => {}
        }
    }

    /// Completes a sign-in started by Enter. Run after the "signing in"
    /// frame is on screen, since the session login waits out its delay.
    async fn finish_login(&mut self) {
        self.signing_in = false;
        self.toast = None;
        match self.app.login(&self.login).await {
            Ok(()) => {
                self.login.password.clear();
                self.go("/vagas").await;
            }
            Err(errors) => self.login_errors = errors,
        }
    }

    async fn handle_postings_key(&mut self, code: KeyCode) {
        if self.confirm_delete {
            self.confirm_delete = false;
            if code == KeyCode::Char('y') {
                self.delete_current().await;
            }
            return;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.prev(),
            KeyCode::Char('J') | KeyCode::PageDown => self.scroll_down(),
            KeyCode::Char('K') | KeyCode::PageUp => self.scroll_up(),
            KeyCode::Char('/') => self.input = Some(Input::PostingSearch),
            KeyCode::Char('f') => {
                self.posting_filter.status = match self.posting_filter.status {
                    None => Some(PostingStatus::Active),
                    Some(PostingStatus::Active) => Some(PostingStatus::Inactive),
                    Some(PostingStatus::Inactive) => None,
                };
                self.clamp_postings();
            }
            KeyCode::Char('m') => {
                self.posting_filter.mode = self.posting_filter.mode.cycle();
                self.clamp_postings();
            }
            KeyCode::Char('r') => {
                match self.app.postings.refresh().await {
                    Ok(()) => self.toast = Some(format!("{} postings loaded", self.app.postings.list().len())),
                    Err(e) => self.toast = Some(format!("Refresh failed: {}", e)),
                }
                self.clamp_postings();
            }
            KeyCode::Char('s') => {
                let Some(id) = self.current_posting().map(|p| p.id.clone()) else { return };
                match self.app.toggle_status(&id).await {
                    Ok(posting) => self.toast = Some(format!("{} is now {}", posting.title, posting.status)),
                    Err(e) => self.toast = Some(format!("Status change failed: {}", e)),
                }
                self.clamp_postings();
            }
            KeyCode::Char('d') => {
                if self.current_posting().is_some() {
                    self.confirm_delete = true;
                }
            }
            KeyCode::Char('n') => self.editor = Some(Editor::new(PostingForm::new())),
            KeyCode::Char('E') => {
                if let Some(form) = self.current_posting().map(PostingForm::for_posting) {
                    self.editor = Some(Editor::new(form));
                }
            }
            KeyCode::Char('t') => {
                let Some(id) = self.current_posting().map(|p| p.id.clone()) else { return };
                let target = Route::TalentPool { posting_id: Some(id) }.path();
                self.go(&target).await;
            }
            KeyCode::Char('b') => self.go("/banco-talentos").await,
            KeyCode::Char('L') => {
                self.app.logout();
                self.go("/").await;
            }
            _ => {}
        }
    }

    async fn delete_current(&mut self) {
        let Some((id, title)) = self.current_posting().map(|p| (p.id.clone(), p.title.clone())) else {
            return;
        };
        match self.app.postings.delete(&id).await {
            Ok(()) => self.toast = Some(format!("Deleted {}", title)),
            Err(e) => self.toast = Some(format!("Delete failed: {}", e)),
        }
        self.clamp_postings();
    }

    async fn handle_form_key(&mut self, code: KeyCode) {
        let Some(editor) = self.editor.as_mut() else { return };
        let focused = editor.focused();
        match code {
            KeyCode::Esc => match editor.form.step() {
                FormStep::Details => {
                    self.editor = None;
                    self.toast = Some("Discarded".to_string());
                }
                FormStep::Questions => {
                    editor.form.back();
                    editor.focus = 0;
                }
            },
            KeyCode::Tab | KeyCode::Down => editor.move_focus(true),
            KeyCode::BackTab | KeyCode::Up => editor.move_focus(false),
            KeyCode::Insert if editor.form.step() == FormStep::Questions => {
                editor.form.add_question("");
                editor.focus = editor.visible_fields().len() - 1;
            }
            KeyCode::Delete => {
                if let Some(FormField::CustomQuestion(i)) = focused {
                    editor.form.remove_question(i);
                    editor.clamp_focus();
                }
            }
            KeyCode::Enter => match editor.form.step() {
                FormStep::Details => match editor.form.next() {
                    Ok(()) => editor.focus = 0,
                    Err(_) => {
                        editor.focus_first_error();
                        self.toast = Some("Fix the fields marked in red".to_string());
                    }
                },
                FormStep::Questions => self.save_form().await,
            },
            KeyCode::Char(' ') | KeyCode::Left | KeyCode::Right
                if matches!(
                    focused,
                    Some(FormField::Training | FormField::Status | FormField::WorkMode)
                ) =>
            {
                if let Some(field) = focused {
                    editor.toggle(field);
                }
            }
            KeyCode::Char(_) | KeyCode::Backspace => {
                if let Some(field) = focused {
                    editor.edit_text(field, code);
                }
            }
            _ => {}
        }
    }

    /// Submits the dialog through the store. The dialog stays open on failure.
    async fn save_form(&mut self) {
        let Some(editor) = self.editor.as_mut() else { return };
        let draft = match editor.form.submit() {
            Ok(draft) => draft,
            Err(_) => {
                editor.focus_first_error();
                self.toast = Some("Fix the fields marked in red".to_string());
                return;
            }
        };

        let result = match editor.form.editing().map(str::to_string) {
            Some(id) => self.app.postings.update(&id, &draft).await,
            None => self.app.postings.create(&draft).await.cloned(),
        };
        match result {
            Ok(posting) => {
                self.editor = None;
                self.toast = Some(format!("Saved {}", posting.title));
                match self.visible_postings().iter().position(|p| p.id == posting.id) {
                    Some(index) => self.selected = index,
                    None => self.clamp_postings(),
                }
                self.scroll_offset = 0;
            }
            Err(e) => self.toast = Some(format!("Save failed: {}", e)),
        }
    }

    async fn handle_talent_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Esc | KeyCode::Char('v') => {
                let target = match self.context_posting_id() {
                    Some(id) => Route::PostingDetail(id).path(),
                    None => Route::Postings.path(),
                };
                self.go(&target).await;
            }
            KeyCode::Down | KeyCode::Char('j') => self.next(),
            KeyCode::Up | KeyCode::Char('k') => self.prev(),
            KeyCode::Char('/') => self.input = Some(Input::CandidateName),
            KeyCode::Char('e') => self.input = Some(Input::CandidateEquipment),
            KeyCode::Char('m') => self.candidate_filter.mode = self.candidate_filter.mode.cycle(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.candidate_filter.widen(),
            KeyCode::Char('-') => self.candidate_filter.narrow(),
            KeyCode::Char('n') => {
                self.sort = match self.sort {
                    CandidateSort::AsListed => CandidateSort::Nearest,
                    CandidateSort::Nearest => CandidateSort::AsListed,
                };
            }
            KeyCode::Char('c') => self.candidate_filter = CandidateFilter::for_dashboard(),
            KeyCode::Char('r') => {
                if let Err(e) = self.app.talent.refresh().await {
                    self.toast = Some(format!("Refresh failed: {}", e));
                }
            }
            KeyCode::Char('i') => self.invite_current().await,
            KeyCode::Char('L') => {
                self.app.logout();
                self.go("/").await;
            }
            _ => {}
        }
        self.clamp_candidates();
    }

    async fn invite_current(&mut self) {
        let Some(posting_id) = self.context_posting_id() else {
            self.toast = Some("Open the talent pool from a posting (t) to send invitations".to_string());
            return;
        };
        let Some((candidate_id, name)) = self.current_candidate().map(|c| (c.id.clone(), c.name.clone())) else {
            return;
        };
        match self.app.invite(&posting_id, &candidate_id).await {
            Ok(invitation) => self.toast = Some(format!("Invited {}: {}", name, invitation.link)),
            Err(e) => self.toast = Some(format!("Invite failed: {}", e)),
        }
    }
}

/// Interactive dashboard. Starts at the guarded root, so a fresh session sees the login screen.
pub async fn run_dashboard<B: Backend>(app: App<B>, login: LoginForm) -> Result<()> {
    let mut state = AppState::new(app, login);
    state.go("/").await;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state).await;

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn run_loop<B: Backend>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState<B>,
) -> Result<()> {
    let mut list_state = ListState::default();

    while !state.quit {
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            state.handle_key(key.code).await;
            if state.signing_in {
                terminal.draw(|frame| draw(frame, state, &mut list_state))?;
                state.finish_login().await;
            }
        }
    }
    Ok(())
}

fn draw<B: Backend>(frame: &mut Frame, state: &AppState<B>, list_state: &mut ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let header = Paragraph::new(format!(" vagas  {}", state.route))
        .style(Style::default().add_modifier(Modifier::BOLD));
    frame.render_widget(header, rows[0]);

    match &state.route {
        Route::Login => draw_login(frame, state, rows[1]),
        Route::Postings | Route::PostingDetail(_) => match &state.editor {
            Some(editor) => draw_form(frame, editor, rows[1]),
            None => draw_postings(frame, state, list_state, rows[1]),
        },
        Route::TalentPool { .. } => draw_talent(frame, state, list_state, rows[1]),
        Route::NotFound(path) => {
            let body = Paragraph::new(format!("Nothing at {}. Press any key to go to the postings.", path))
                .block(Block::default().borders(Borders::ALL).title(" Not found "));
            frame.render_widget(body, rows[1]);
        }
    }

    let toast = if state.confirm_delete {
        Paragraph::new(" Delete this posting? y to confirm, any other key cancels")
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Paragraph::new(format!(" {}", state.toast.as_deref().unwrap_or("")))
            .style(Style::default().fg(Color::Yellow))
    };
    frame.render_widget(toast, rows[2]);

    let help = match (&state.route, state.input) {
        _ if state.signing_in => " please wait",
        _ if state.editor.as_ref().is_some_and(|e| e.form.step() == FormStep::Details) => {
            " tab/up/down:field  space:toggle  enter:next step  esc:discard"
        }
        _ if state.editor.is_some() => {
            " tab/up/down:field  ins:add question  del:remove question  enter:save  esc:back"
        }
        (_, Some(_)) => " type to filter  enter/esc:done",
        (Route::Login, _) => " tab:switch field  enter:sign in  esc:quit",
        (Route::TalentPool { .. }, _) => {
            " j/k:navigate  /:name e:equipment m:mode +/-:distance n:nearest c:clear  i:invite r:refresh  v:postings L:logout q:quit"
        }
        (Route::NotFound(_), _) => " any key:postings  q:quit",
        _ => {
            " j/k:navigate  J/K:scroll  /:search f:status m:mode  r:refresh n:new E:edit s:toggle d:delete  t:talent b:pool  L:logout q:quit"
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        rows[3],
    );
}

fn draw_login<B: Backend>(frame: &mut Frame, state: &AppState<B>, area: Rect) {
    let field_style = |field: LoginField| {
        if state.login_field == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let mut lines = vec![
        Line::from("Sign in to manage postings and the talent pool."),
        Line::from(""),
        Line::from(Span::styled(
            format!("Email:    {}", state.login.email),
            field_style(LoginField::Email),
        )),
        Line::from(Span::styled(
            format!("Password: {}", "*".repeat(state.login.password.chars().count())),
            field_style(LoginField::Password),
        )),
        Line::from(""),
    ];
    for error in state.login_errors.iter() {
        lines.push(Line::from(Span::styled(
            format!("{}: {}", error.field, error.message),
            Style::default().fg(Color::Red),
        )));
    }

    let width = area.width.min(60);
    let height = area.height.min(10);
    let centered = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let form = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Login "))
        .wrap(Wrap { trim: false });
    frame.render_widget(form, centered);
}

fn draw_postings<B: Backend>(frame: &mut Frame, state: &AppState<B>, list_state: &mut ListState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let postings = state.visible_postings();
    let items: Vec<ListItem> = postings
        .iter()
        .map(|posting| {
            let status_icon = match posting.status {
                PostingStatus::Active => "+",
                PostingStatus::Inactive => "-",
            };
            ListItem::new(format!(
                "{} {:<28} {:>14}",
                status_icon,
                truncate(&posting.title, 28),
                format_brl(posting.value)
            ))
        })
        .collect();

    let mut title = format!(" Postings ({}/{}) ", postings.len(), state.app.postings.list().len());
    if !state.posting_filter.search.is_empty() || state.input == Some(Input::PostingSearch) {
        title.push_str(&format!("search: {} ", state.posting_filter.search));
    }
    if let Some(status) = state.posting_filter.status {
        title.push_str(&format!("[{}] ", status));
    }
    if state.posting_filter.mode != ModeFilter::Any {
        title.push_str(&format!("[{}] ", state.posting_filter.mode.label()));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    list_state.select((!postings.is_empty()).then_some(state.selected));
    frame.render_stateful_widget(list, chunks[0], list_state);

    let detail = match state.current_posting() {
        Some(posting) => build_detail(posting),
        None => Text::raw("No posting selected"),
    };
    let detail_widget = Paragraph::new(detail)
        .block(Block::default().borders(Borders::ALL).title(" Detail "))
        .wrap(Wrap { trim: false })
        .scroll((state.scroll_offset, 0));
    frame.render_widget(detail_widget, chunks[1]);
}

fn draw_form(frame: &mut Frame, editor: &Editor, area: Rect) {
    let form = &editor.form;
    let step = match form.step() {
        FormStep::Details => "1/2 details",
        FormStep::Questions => "2/2 questions",
    };
    let title = match form.editing() {
        Some(id) => format!(" Edit posting {} ({}) ", id, step),
        None => format!(" New posting ({}) ", step),
    };

    let focus_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let error_style = Style::default().fg(Color::Red);
    let mut lines: Vec<Line> = Vec::new();
    for (i, field) in editor.visible_fields().into_iter().enumerate() {
        let style = if i == editor.focus { focus_style } else { Style::default() };
        lines.push(Line::from(Span::styled(
            format!("{:<20} {}", field.label(), editor.display_value(field)),
            style,
        )));
        if matches!(field, FormField::CustomQuestion(_)) {
            continue;
        }
        if let Some(message) = form.errors().for_field(field.key()) {
            lines.push(Line::from(Span::styled(format!("{:<20} {}", "", message), error_style)));
        }
    }
    if form.step() == FormStep::Questions {
        if form.fields().custom_questions.is_empty() {
            lines.push(Line::from(Span::styled(
                "No custom questions. Press Insert to add one.",
                Style::default().fg(Color::DarkGray),
            )));
        }
        if let Some(message) = form.errors().for_field("custom_questions") {
            lines.push(Line::from(Span::styled(message, error_style)));
        }
    }

    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false }),
        area,
    );
}

fn build_detail(posting: &Posting) -> Text<'_> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(posting.title.as_str(), bold)));
    lines.push(Line::from(format!("Service: {}", posting.service)));

    let status_style = match posting.status {
        PostingStatus::Active => Style::default().fg(Color::Green),
        PostingStatus::Inactive => Style::default().fg(Color::DarkGray),
    };
    lines.push(Line::from(Span::styled(
        format!("Status: {}", posting.status),
        status_style,
    )));

    lines.push(Line::from(format!("Value: {}", format_brl(posting.value))));
    lines.push(Line::from(format!("Date: {}", format_date(posting.service_date))));
    lines.push(Line::from(format!("Mode: {}", posting.work_mode)));
    if posting.is_on_site() {
        lines.push(Line::from(format!(
            "CEP: {}  Radius: {} km",
            posting.cep.as_deref().unwrap_or("-"),
            posting.radius.as_deref().unwrap_or("-")
        )));
    }
    lines.push(Line::from(format!("Availability: {}", posting.availability)));
    lines.push(Line::from(format!(
        "Training: {}",
        if posting.training { "provided" } else { "not provided" }
    )));
    lines.push(Line::from(format!("Contact: {}", posting.contact)));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Requirements", bold)));
    for line in textwrap::fill(&posting.requirements, 70).lines() {
        lines.push(Line::from(format!("  {}", line)));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled("Questions", bold)));
    if posting.equipment_question.is_empty() && posting.custom_questions.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (none)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    if !posting.equipment_question.is_empty() {
        lines.push(Line::from(format!("  * {}", posting.equipment_question)));
    }
    for (i, question) in posting.custom_questions.iter().enumerate() {
        lines.push(Line::from(format!("  {}. {}", i + 1, question.question)));
    }

    Text::from(lines)
}

fn draw_talent<B: Backend>(frame: &mut Frame, state: &AppState<B>, list_state: &mut ListState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let filter = &state.candidate_filter;
    let active = |input: Input| {
        if state.input == Some(input) {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let distance = filter.max_distance.unwrap_or(MAX_DISTANCE_KM);
    let bar = Line::from(vec![
        Span::styled(format!("Name: [{}]", filter.name), active(Input::CandidateName)),
        Span::raw("  "),
        Span::styled(
            format!("Equipment: [{}]", filter.equipment),
            active(Input::CandidateEquipment),
        ),
        Span::raw(format!(
            "  Mode: {}  Max: {:.0} km  Sort: {}",
            filter.mode.label(),
            distance,
            match state.sort {
                CandidateSort::AsListed => "as listed",
                CandidateSort::Nearest => "nearest",
            }
        )),
    ]);

    let context = state
        .context_posting_id()
        .map(|id| match state.app.postings.get(&id) {
            Some(posting) => format!(" Filters  (inviting for: {}) ", posting.title),
            None => format!(" Filters  (posting {}) ", id),
        })
        .unwrap_or_else(|| " Filters ".to_string());
    frame.render_widget(
        Paragraph::new(bar).block(Block::default().borders(Borders::ALL).title(context)),
        rows[0],
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    let candidates = state.visible_candidates();
    let items: Vec<ListItem> = candidates
        .iter()
        .map(|c| {
            ListItem::new(format!(
                "{:<24} {:>5.0} km  {}",
                truncate(&c.name, 22),
                c.distance,
                c.work_mode
            ))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Talent pool ({}/{}) ",
            candidates.len(),
            state.app.talent.list().len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    list_state.select((!candidates.is_empty()).then_some(state.candidate_selected));
    frame.render_stateful_widget(list, chunks[0], list_state);

    let detail = match state.current_candidate() {
        Some(candidate) => build_candidate_detail(candidate),
        None => Text::raw("No candidate matches the filters"),
    };
    frame.render_widget(
        Paragraph::new(detail)
            .block(Block::default().borders(Borders::ALL).title(" Candidate "))
            .wrap(Wrap { trim: false }),
        chunks[1],
    );
}

fn build_candidate_detail(candidate: &Candidate) -> Text<'_> {
    let lines = vec![
        Line::from(Span::styled(
            candidate.name.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Equipment: {} ({})",
            candidate.equipment_type, candidate.equipment_model
        )),
        Line::from(format!(
            "Location: {}/{}  CEP {}",
            candidate.city, candidate.state, candidate.cep
        )),
        Line::from(format!("Distance: {:.1} km", candidate.distance)),
        Line::from(format!("Availability: {}", candidate.availability)),
        Line::from(format!("Prefers: {}", candidate.work_mode)),
        Line::from(""),
        Line::from(Span::styled(
            candidate.avatar_url.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use url::Url;

    use crate::store::testing::{candidate_row, posting_row, FakeBackend};

    fn state_with(backend: Arc<FakeBackend>) -> AppState<FakeBackend> {
        let app = App::new(
            backend,
            Duration::ZERO,
            Url::parse("https://vagas.app/convite").unwrap(),
        );
        AppState::new(app, LoginForm::default())
    }

    async fn signed_in(backend: Arc<FakeBackend>) -> AppState<FakeBackend> {
        let mut state = state_with(backend);
        state.login = LoginForm {
            email: "recrutador@example.com".to_string(),
            password: "secret1".to_string(),
        };
        state.app.login(&state.login).await.unwrap();
        state.go("/vagas").await;
        state
    }

    async fn press(state: &mut AppState<FakeBackend>, keys: &[KeyCode]) {
        for key in keys {
            state.handle_key(*key).await;
        }
    }

    async fn type_text(state: &mut AppState<FakeBackend>, text: &str) {
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c)).await;
        }
    }

    fn three_postings() -> Arc<FakeBackend> {
        Arc::new(FakeBackend::with_postings(vec![
            posting_row("1", "Pintura"),
            posting_row("2", "Montagem"),
            posting_row("3", "Elétrica"),
        ]))
    }

    fn fill_valid_details(state: &mut AppState<FakeBackend>) {
        let fields = state.editor.as_mut().unwrap().form.fields_mut();
        fields.service = "Suporte técnico".to_string();
        fields.value = "180".to_string();
        fields.availability = "Manhã".to_string();
        fields.requirements = "Conhecimento em redes".to_string();
        fields.contact = "rh@example.com".to_string();
        fields.work_mode = Some(WorkMode::Remote);
    }

    #[tokio::test]
    async fn test_fresh_dashboard_lands_on_login_and_signs_in() {
        let mut state = state_with(three_postings());
        state.go("/").await;
        assert_eq!(state.route, Route::Login);

        type_text(&mut state, "ana@example.com").await;
        press(&mut state, &[KeyCode::Tab]).await;
        type_text(&mut state, "secret1").await;
        press(&mut state, &[KeyCode::Enter]).await;

        assert!(state.signing_in);
        assert_eq!(state.toast.as_deref(), Some("Signing in..."));
        assert_eq!(state.route, Route::Login);

        state.finish_login().await;
        assert!(!state.signing_in);
        assert_eq!(state.route, Route::Postings);
        assert!(state.login.password.is_empty());
        assert_eq!(state.visible_postings().len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_login_reports_errors_without_signing_in() {
        let mut state = state_with(three_postings());
        state.go("/vagas").await;
        assert_eq!(state.route, Route::Login);

        type_text(&mut state, "ana").await;
        press(&mut state, &[KeyCode::Enter]).await;

        assert!(!state.signing_in);
        assert_eq!(state.login_errors.for_field("email"), Some("invalid email"));
        assert!(state.login_errors.for_field("password").is_some());
        assert!(!state.app.session.is_authenticated());
    }

    #[tokio::test]
    async fn test_deleting_last_visible_posting_keeps_selection_in_bounds() {
        let backend = three_postings();
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('j'), KeyCode::Char('j')]).await;
        assert_eq!(state.selected, 2);

        press(&mut state, &[KeyCode::Char('d'), KeyCode::Char('x')]).await;
        assert!(!state.confirm_delete);
        assert_eq!(backend.postings.lock().unwrap().len(), 3);

        press(&mut state, &[KeyCode::Char('d')]).await;
        assert!(state.confirm_delete);
        press(&mut state, &[KeyCode::Char('y')]).await;

        assert_eq!(backend.postings.lock().unwrap().len(), 2);
        assert_eq!(state.selected, 1);
        assert_eq!(state.current_posting().unwrap().id, "2");
        assert_eq!(state.toast.as_deref(), Some("Deleted Elétrica"));
    }

    #[tokio::test]
    async fn test_search_clamps_selection_to_matches() {
        let mut state = signed_in(three_postings()).await;
        press(&mut state, &[KeyCode::Char('j'), KeyCode::Char('j')]).await;

        press(&mut state, &[KeyCode::Char('/')]).await;
        type_text(&mut state, "pint").await;
        press(&mut state, &[KeyCode::Enter]).await;

        assert_eq!(state.input, None);
        assert_eq!(state.visible_postings().len(), 1);
        assert_eq!(state.selected, 0);
        assert_eq!(state.current_posting().unwrap().title, "Pintura");
    }

    #[tokio::test]
    async fn test_invite_without_posting_context_sends_nothing() {
        let backend = three_postings();
        backend.candidates.lock().unwrap().push(candidate_row("t1", "Ana", 4.0));
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('b')]).await;
        assert_eq!(state.route, Route::TalentPool { posting_id: None });

        press(&mut state, &[KeyCode::Char('i')]).await;
        assert!(state.toast.as_deref().unwrap().starts_with("Open the talent pool"));
        assert!(backend.invitations.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invite_from_posting_context_records_invitation() {
        let backend = three_postings();
        backend.candidates.lock().unwrap().push(candidate_row("t1", "Ana", 4.0));
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('j'), KeyCode::Char('t')]).await;
        assert_eq!(
            state.route,
            Route::TalentPool {
                posting_id: Some("2".to_string())
            }
        );

        press(&mut state, &[KeyCode::Char('i')]).await;
        let invitations = backend.invitations.lock().unwrap();
        assert_eq!(invitations.len(), 1);
        assert_eq!(invitations[0].vaga_id, "2");
        assert!(state.toast.as_deref().unwrap().starts_with("Invited Ana: https://vagas.app/convite/"));
    }

    #[tokio::test]
    async fn test_distance_slider_starts_at_limit_and_clear_restores_it() {
        let backend = three_postings();
        {
            let mut candidates = backend.candidates.lock().unwrap();
            candidates.push(candidate_row("t1", "Ana", 4.0));
            candidates.push(candidate_row("t2", "Bruno", 800.0));
        }
        let mut state = signed_in(backend).await;
        press(&mut state, &[KeyCode::Char('b')]).await;

        assert_eq!(state.candidate_filter.max_distance, Some(MAX_DISTANCE_KM));
        assert_eq!(state.visible_candidates().len(), 1);

        press(&mut state, &[KeyCode::Char('-'), KeyCode::Char('-')]).await;
        assert_eq!(state.candidate_filter.max_distance, Some(480.0));

        press(&mut state, &[KeyCode::Char('c')]).await;
        assert_eq!(state.candidate_filter.max_distance, Some(MAX_DISTANCE_KM));
        assert_eq!(state.visible_candidates().len(), 1);
    }

    #[tokio::test]
    async fn test_new_posting_form_walks_both_steps_and_creates() {
        let backend = three_postings();
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('n')]).await;
        assert!(state.editor.is_some());

        press(&mut state, &[KeyCode::Enter]).await;
        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.form.step(), FormStep::Details);
        assert_eq!(editor.form.errors().for_field("title"), Some("title is required"));
        assert_eq!(editor.focused(), Some(FormField::Title));
        assert_eq!(state.toast.as_deref(), Some("Fix the fields marked in red"));

        type_text(&mut state, "Suporte").await;
        fill_valid_details(&mut state);
        press(&mut state, &[KeyCode::Tab, KeyCode::Tab, KeyCode::Tab]).await;
        assert_eq!(state.editor.as_ref().unwrap().focused(), Some(FormField::ServiceDate));
        type_text(&mut state, "05/11/2024").await;
        assert_eq!(
            state.editor.as_ref().unwrap().form.fields().service_date,
            chrono::NaiveDate::from_ymd_opt(2024, 11, 5)
        );

        press(&mut state, &[KeyCode::Enter]).await;
        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.form.step(), FormStep::Questions);
        assert_eq!(
            editor.form.fields().equipment_question,
            "Do you have the equipment required for Suporte técnico?"
        );

        press(&mut state, &[KeyCode::Insert]).await;
        assert_eq!(state.editor.as_ref().unwrap().focused(), Some(FormField::CustomQuestion(0)));
        type_text(&mut state, "Tem carro?").await;
        press(&mut state, &[KeyCode::Enter]).await;

        assert!(state.editor.is_none());
        assert_eq!(state.toast.as_deref(), Some("Saved Suporte"));
        assert_eq!(backend.postings.lock().unwrap().len(), 4);
        let created = state.current_posting().unwrap();
        assert_eq!(created.title, "Suporte");
        assert_eq!(created.custom_questions[0].question, "Tem carro?");
    }

    #[tokio::test]
    async fn test_blank_custom_question_can_be_removed_before_saving() {
        let mut state = signed_in(three_postings()).await;
        press(&mut state, &[KeyCode::Char('n')]).await;
        type_text(&mut state, "Suporte").await;
        fill_valid_details(&mut state);
        state.editor.as_mut().unwrap().form.fields_mut().service_date =
            chrono::NaiveDate::from_ymd_opt(2024, 11, 5);
        press(&mut state, &[KeyCode::Enter, KeyCode::Insert, KeyCode::Enter]).await;

        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.form.errors().for_field("custom_questions"), Some("question 1 is empty"));
        assert_eq!(editor.focused(), Some(FormField::CustomQuestion(0)));

        press(&mut state, &[KeyCode::Delete]).await;
        let editor = state.editor.as_ref().unwrap();
        assert!(editor.form.fields().custom_questions.is_empty());
        assert_eq!(editor.focused(), Some(FormField::EquipmentQuestion));

        press(&mut state, &[KeyCode::Enter]).await;
        assert!(state.editor.is_none());
    }

    #[tokio::test]
    async fn test_edit_form_prefills_and_updates_in_place() {
        let backend = three_postings();
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('E')]).await;
        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.form.editing(), Some("1"));
        assert_eq!(editor.date_text, "01/10/2024");

        type_text(&mut state, " II").await;
        press(&mut state, &[KeyCode::Enter, KeyCode::Enter]).await;

        assert!(state.editor.is_none());
        assert_eq!(state.app.postings.get("1").unwrap().title, "Pintura II");
        assert_eq!(backend.postings.lock().unwrap()[0].titulo, "Pintura II");
        assert_eq!(state.app.postings.list().len(), 3);
        assert_eq!(state.selected, 0);
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dialog_open() {
        let backend = three_postings();
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('E'), KeyCode::Enter]).await;
        backend.set_failing(true);
        press(&mut state, &[KeyCode::Enter]).await;

        assert!(state.editor.is_some());
        assert!(state.toast.as_deref().unwrap().starts_with("Save failed"));
        assert_eq!(state.app.postings.get("1").unwrap().title, "Pintura");
    }

    #[tokio::test]
    async fn test_escape_steps_back_then_discards() {
        let backend = three_postings();
        let mut state = signed_in(backend.clone()).await;

        press(&mut state, &[KeyCode::Char('E'), KeyCode::Enter]).await;
        assert_eq!(state.editor.as_ref().unwrap().form.step(), FormStep::Questions);

        press(&mut state, &[KeyCode::Esc]).await;
        assert_eq!(state.editor.as_ref().unwrap().form.step(), FormStep::Details);

        press(&mut state, &[KeyCode::Esc]).await;
        assert!(state.editor.is_none());
        assert_eq!(state.toast.as_deref(), Some("Discarded"));
        assert!(!state.quit);
        assert_eq!(backend.postings.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_work_mode_toggle_hides_on_site_fields() {
        let mut state = signed_in(three_postings()).await;
        press(&mut state, &[KeyCode::Char('n')]).await;
        assert!(state.editor.as_ref().unwrap().visible_fields().contains(&FormField::Cep));

        press(&mut state, &[KeyCode::BackTab, KeyCode::BackTab, KeyCode::BackTab]).await;
        assert_eq!(state.editor.as_ref().unwrap().focused(), Some(FormField::WorkMode));
        press(&mut state, &[KeyCode::Char(' ')]).await;

        let editor = state.editor.as_ref().unwrap();
        assert_eq!(editor.form.fields().work_mode, Some(WorkMode::Remote));
        assert!(!editor.visible_fields().contains(&FormField::Cep));
        assert!(!editor.visible_fields().contains(&FormField::Radius));
    }
}
