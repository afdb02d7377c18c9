use crate::board::TaskBoard;
use crate::config::Config;
use crate::model::{Status, Task, TaskId};
use crate::policy::Action;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use tracing::debug;

const DRAWER_WIDTH: u16 = 44;
const EMPTY_MESSAGE: &str = "No tasks in this category";

pub fn run(board: TaskBoard, config: Config) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(board, config);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

pub struct App {
    board: TaskBoard,
    config: Config,
    selected: usize,
    status: String,
    mode: Mode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Normal,
    Menu { task_id: TaskId, cursor: usize },
}

impl App {
    pub fn new(board: TaskBoard, config: Config) -> Self {
        App {
            board,
            config,
            selected: 0,
            status: "Press a to add a task".into(),
            mode: Mode::Normal,
        }
    }

    pub fn board(&self) -> &TaskBoard {
        &self.board
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(self.config.tick_rate())? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns `true` when the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        if self.board.panel_open() {
            self.handle_drawer_key(key);
            return false;
        }
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Menu { .. } => {
                self.handle_menu_key(key);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.board.toggle_panel();
                self.status = "Type a task, Enter to add, Esc to close".into();
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.select_tab(self.board.tab().next())
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.select_tab(self.board.tab().prev())
            }
            KeyCode::Char(c @ '1'..='3') => {
                if let Some(tab) = Status::from_index(c as usize - '1' as usize) {
                    self.select_tab(tab);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected + 1 < self.board.visible().len() {
                    self.selected += 1;
                }
            }
            KeyCode::Char(' ') => self.toggle_selected(),
            KeyCode::Enter | KeyCode::Char('m') => self.open_menu(),
            KeyCode::Char(c) => {
                if let Some(action) = action_for_key(c) {
                    if let Some(id) = self.selected_id() {
                        self.run_action(action, id);
                    }
                }
            }
            _ => {}
        }
        false
    }

    fn handle_drawer_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.board.set_panel(false);
                self.status = "Closed".into();
                return;
            }
            KeyCode::Enter => {
                self.submit();
                return;
            }
            _ => {}
        }
        let field = self.board.compose_mut();
        match key.code {
            KeyCode::Backspace => field.backspace(),
            KeyCode::Delete => field.delete(),
            KeyCode::Left => field.move_left(),
            KeyCode::Right => field.move_right(),
            KeyCode::Home => field.home(),
            KeyCode::End => field.end(),
            KeyCode::Char(c) => {
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                {
                    field.insert_char(c);
                }
            }
            _ => {}
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        let (task_id, cursor) = match self.mode {
            Mode::Menu { task_id, cursor } => (task_id, cursor),
            Mode::Normal => return,
        };
        let actions = Action::offered(self.board.tab());
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.mode = Mode::Normal;
                self.status = "Canceled".into();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.mode = Mode::Menu {
                    task_id,
                    cursor: cursor.saturating_sub(1),
                };
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.mode = Mode::Menu {
                    task_id,
                    cursor: (cursor + 1).min(actions.len().saturating_sub(1)),
                };
            }
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                if let Some(action) = actions.get(cursor) {
                    self.run_action(*action, task_id);
                }
            }
            KeyCode::Char(c) => {
                if let Some(action) = action_for_key(c) {
                    self.mode = Mode::Normal;
                    self.run_action(action, task_id);
                }
            }
            _ => {}
        }
    }

    fn select_tab(&mut self, tab: Status) {
        if self.board.tab() != tab {
            self.board.select_tab(tab);
            self.selected = 0;
            self.status = format!("Showing {}", tab.label());
            debug!(%tab, "tab selected");
        }
    }

    fn submit(&mut self) {
        match self.board.submit() {
            Some(_) => {
                self.selected = 0;
                self.mode = Mode::Normal;
                self.status = "Added".into();
            }
            None => self.status = "Type something first".into(),
        }
    }

    fn open_menu(&mut self) {
        match self.selected_id() {
            Some(task_id) => self.mode = Mode::Menu { task_id, cursor: 0 },
            None => self.status = "No task selected".into(),
        }
    }

    fn toggle_selected(&mut self) {
        let Some(id) = self.selected_id() else {
            self.status = "No task selected".into();
            return;
        };
        match self.board.quick_toggle(id) {
            Some(action) => {
                self.status = action.past_tense().into();
                self.clamp_selection();
            }
            None => self.status = format!("No checkbox in {}", self.board.tab().label()),
        }
    }

    fn run_action(&mut self, action: Action, id: TaskId) {
        let tab = self.board.tab();
        if self.board.apply(action, id) {
            self.status = action.past_tense().into();
            self.clamp_selection();
        } else {
            self.status = format!("{} is not available in {}", action.menu_label(tab), tab.label());
        }
    }

    fn selected_id(&self) -> Option<TaskId> {
        self.board.visible().get(self.selected).map(|t| t.id)
    }

    fn clamp_selection(&mut self) {
        let len = self.board.visible().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    pub fn draw(&self, f: &mut ratatui::Frame<'_>) {
        let footer_height = if self.config.show_help { 4 } else { 2 };
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(4),
                Constraint::Length(footer_height),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        self.draw_tabs(f, layout[1]);
        self.draw_list(f, layout[2]);
        self.draw_footer(f, layout[3]);

        if let Mode::Menu { task_id, cursor } = self.mode {
            self.draw_menu(f, task_id, cursor);
        }
        if self.board.panel_open() {
            self.draw_drawer(f);
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                self.config.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.config.tagline.clone(),
                Style::default().fg(Color::Gray),
            )),
        ];
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn draw_tabs(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let counts = self.board.counts();
        let titles = Status::ALL
            .iter()
            .map(|s| Line::from(format!(" {} ({}) ", s.label(), counts[s.index()])))
            .collect::<Vec<_>>();
        let tabs = Tabs::new(titles)
            .select(self.board.tab().index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightCyan)
                    .add_modifier(Modifier::BOLD),
            )
            .divider("|")
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(tabs, area);
    }

    fn draw_list(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let tab = self.board.tab();
        let block = Block::default()
            .title(Span::styled(
                tab.label(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::DarkGray));
        let visible = self.board.visible();
        if visible.is_empty() {
            let msg = Paragraph::new(EMPTY_MESSAGE)
                .style(Style::default().fg(Color::White))
                .block(block);
            f.render_widget(msg, area);
            return;
        }
        let items = visible
            .iter()
            .map(|task| task_item(task, tab))
            .collect::<Vec<_>>();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 44, 56))
                .add_modifier(Modifier::BOLD),
        );
        let mut state = ListState::default().with_selected(Some(self.selected));
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let mut constraints = vec![Constraint::Length(2)];
        if self.config.show_help {
            constraints.insert(0, Constraint::Length(2));
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(area);

        let top_border = || {
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(Color::DarkGray))
        };
        if self.config.show_help {
            let help = Paragraph::new(self.footer_help_line())
                .alignment(Alignment::Center)
                .block(top_border());
            f.render_widget(help, rows[0]);
        }
        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(top_border());
        f.render_widget(status, rows[rows.len() - 1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let key = |k: &'static str, color: Color| Span::styled(k, Style::default().fg(color));
        let tab = self.board.tab();
        let mut spans = vec![
            key("Tab/1-3", Color::LightCyan),
            Span::raw(" switch  "),
            key("↑↓", Color::LightCyan),
            Span::raw(" select  "),
        ];
        if Action::quick_toggle(tab).is_some() {
            spans.extend([key("space", Color::LightGreen), Span::raw(" check  ")]);
        }
        for action in Action::offered(tab) {
            spans.push(key(key_label(*action), action_color(*action)));
            spans.push(Span::raw(format!(" {}  ", action.menu_label(tab).to_lowercase())));
        }
        spans.extend([
            key("Enter", Color::LightYellow),
            Span::raw(" menu  "),
            key("a", Color::LightMagenta),
            Span::raw(" add  "),
            key("q", Color::LightRed),
            Span::raw(" quit"),
        ]);
        Line::from(spans)
    }

    fn draw_menu(&self, f: &mut ratatui::Frame<'_>, task_id: TaskId, cursor: usize) {
        let tab = self.board.tab();
        let actions = Action::offered(tab);
        let title = self
            .board
            .store()
            .get(task_id)
            .map(|t| t.text.clone())
            .unwrap_or_default();
        let area = menu_rect(actions.len() as u16, f.size());
        let items = actions
            .iter()
            .map(|a| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:<2}", key_label(*a)),
                        Style::default().fg(action_color(*a)),
                    ),
                    Span::raw(a.menu_label(tab)),
                ]))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(
                Block::default()
                    .title(Span::styled(
                        truncate_text(&title, area.width.saturating_sub(4) as usize),
                        Style::default().add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::LightYellow)),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            );
        let mut state = ListState::default().with_selected(Some(cursor));
        f.render_widget(Clear, area);
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_drawer(&self, f: &mut ratatui::Frame<'_>) {
        let full = f.size();
        let width = DRAWER_WIDTH.min(full.width);
        let area = Rect::new(full.x + full.width - width, full.y, width, full.height);
        let block = Block::default()
            .title(Span::styled(
                "Add New To Do",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        f.render_widget(Clear, area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let field = self.board.compose();
        let input = if field.value().is_empty() {
            Line::from(vec![
                Span::raw("▌"),
                Span::styled("Your text", Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(field.with_caret())
        };
        let input = Paragraph::new(input).wrap(Wrap { trim: false }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray)),
        );
        f.render_widget(input, rows[0]);

        let button_style = if self.board.can_submit() {
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightGreen)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let button = Paragraph::new(Span::styled("[ Add ]", button_style)).alignment(Alignment::Center);
        f.render_widget(button, rows[1]);

        let hint = Paragraph::new(Span::styled(
            "Enter add • Esc close",
            Style::default().fg(Color::Gray),
        ))
        .alignment(Alignment::Center);
        f.render_widget(hint, rows[2]);
    }
}

fn action_for_key(c: char) -> Option<Action> {
    match c {
        'd' => Some(Action::MarkDone),
        'x' => Some(Action::MoveToTrash),
        'r' => Some(Action::Restore),
        'D' => Some(Action::DeleteForever),
        _ => None,
    }
}

fn key_label(action: Action) -> &'static str {
    match action {
        Action::MarkDone => "d",
        Action::MoveToTrash => "x",
        Action::Restore => "r",
        Action::DeleteForever => "D",
    }
}

fn action_color(action: Action) -> Color {
    match action {
        Action::MarkDone => Color::LightGreen,
        Action::MoveToTrash | Action::DeleteForever => Color::LightRed,
        Action::Restore => Color::LightBlue,
    }
}

fn task_item(task: &Task, tab: Status) -> ListItem<'static> {
    let mut spans = vec![Span::styled("⋮⋮ ", Style::default().fg(Color::DarkGray))];
    if tab != Status::Deleted {
        let checkbox = if task.is_active() { "[ ] " } else { "[x] " };
        spans.push(Span::styled(checkbox, Style::default().fg(Color::LightGreen)));
    }
    let text_style = if task.is_active() {
        Style::default().fg(Color::White)
    } else {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    };
    spans.push(Span::styled(task.text.clone(), text_style));
    ListItem::new(Line::from(spans))
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// A box just tall enough for `rows` menu entries, centered in `r`.
fn menu_rect(rows: u16, r: Rect) -> Rect {
    let height = (rows + 2).min(r.height);
    let width = 36.min(r.width);
    Rect::new(
        r.x + (r.width - width) / 2,
        r.y + (r.height - height) / 2,
        width,
        height,
    )
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}
