use std::cell::Cell;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style, palette::tailwind},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
};

use crate::component::Component;
use crate::component::chips::{self, ChipRow};
use crate::component::input::SearchInput;
use crate::libs::selector::{MAX_SELECTED, SelectOutcome, Selector};
use crate::utils::help_msg::{HelpEntry, HelpMsg};
use crate::{RootState, actions::Action, tui::Event};

use super::Page;

/// Rows of the dropdown list before it starts windowing.
const DROPDOWN_ROWS: u16 = 8;

/// Columns reserved for the search input next to the chips.
const MIN_INPUT_WIDTH: u16 = 12;

const HIGHLIGHT_FG: Color = tailwind::INDIGO.c400;

/// The concentration picker: a chip field with a search input on top of a
/// filterable dropdown.
///
/// Key routing follows focus: while the dropdown is open the search input
/// captures keystrokes (app input mode); a focused chip takes removal and
/// movement keys; otherwise the field is idle. The hit-test rectangles of the
/// last frame are cached so mouse clicks resolve against what is actually on
/// screen.
pub struct Picker {
    selector: Selector,
    search: SearchInput,
    chip_focus: Option<usize>,
    disabled: bool,
    accent: Option<Color>,

    field_area: Cell<Rect>,
    dropdown_area: Cell<Rect>,
    dropdown_start: Cell<usize>,
}

#[derive(Clone, Debug)]
pub enum PickerAction {
    /// Open the dropdown and focus the search input.
    Open,
    /// Close the dropdown and drop query/highlight (escape, outside click).
    Dismiss,
    HighlightNext,
    HighlightPrev,
    SelectHighlighted,
    /// Select a row of the filtered list (mouse).
    SelectAt(usize),
    RemoveChip(usize),
    /// Drop the whole selection.
    Clear,
    FocusChip(usize),
    FocusSearch,
    /// Arm the reject cue without touching the selection.
    Shake,
}

impl From<PickerAction> for Action {
    fn from(val: PickerAction) -> Self {
        Action::Picker(val)
    }
}

impl Picker {
    pub fn new(app: &RootState) -> Self {
        let picker = &app.config.picker;
        Self {
            selector: Selector::new(picker.concentrations.clone())
                .with_selected(picker.selected.clone()),
            search: SearchInput::new(rand::random::<u64>(), picker.placeholder.clone()),
            chip_focus: None,
            disabled: picker.disabled,
            accent: picker
                .accent
                .as_deref()
                .and_then(|accent| accent.parse::<Color>().ok()),
            field_area: Cell::new(Rect::default()),
            dropdown_area: Cell::new(Rect::default()),
            dropdown_start: Cell::new(0),
        }
    }

    pub fn get_help_msg(&self, app: &RootState) -> HelpMsg {
        if self.disabled {
            return vec![HelpEntry::new('q', "quit")].into();
        }
        if app.input_mode() {
            vec![
                HelpEntry::new_plain("↑↓", "navigate"),
                HelpEntry::new(KeyCode::Enter, "select"),
                HelpEntry::new(KeyCode::Esc, "close"),
                HelpEntry::new_plain("ctrl-l", "clear"),
            ]
            .into()
        } else if self.chip_focus.is_some() {
            vec![
                HelpEntry::new(KeyCode::Delete, "remove"),
                HelpEntry::new_plain("←→", "move"),
                HelpEntry::new(KeyCode::Esc, "back to search"),
            ]
            .into()
        } else {
            let mut msg = HelpMsg::default();
            if !self.selector.is_full() {
                msg.push(HelpEntry::new(KeyCode::Down, "open"));
            }
            if !self.selector.selected().is_empty() {
                msg.push(HelpEntry::new(KeyCode::Backspace, "edit chips"));
            }
            msg.push(HelpEntry::new('q', "accept and quit"));
            msg
        }
    }

    fn last_chip(&self) -> usize {
        self.selector.selected().len().saturating_sub(1)
    }

    /// Split the field interior between the chip row and the search input.
    /// The input keeps a minimum width until the cap hides it entirely.
    fn split_field(&self, inner: Rect) -> (Rect, Rect) {
        let want = chips::row_width(self.selector.selected());
        if self.selector.is_full() {
            let chips_rect = Rect {
                width: want.min(inner.width),
                ..inner
            };
            return (chips_rect, Rect { width: 0, ..inner });
        }
        let chips_w = want.min(inner.width.saturating_sub(MIN_INPUT_WIDTH + 1));
        let gap = if chips_w > 0 { 1 } else { 0 };
        let chips_rect = Rect {
            width: chips_w,
            ..inner
        };
        let input_rect = Rect {
            x: inner.x + chips_w + gap,
            width: inner.width.saturating_sub(chips_w + gap),
            ..inner
        };
        (chips_rect, input_rect)
    }

    fn handle_mouse(&self, mouse: &MouseEvent, app: &RootState) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let pos = Position::new(mouse.column, mouse.row);

        if self.selector.is_open() && self.dropdown_area.get().contains(pos) {
            let inner = self.dropdown_area.get().inner(Margin::new(1, 1));
            if inner.contains(pos) {
                let index = self.dropdown_start.get() + (pos.y - inner.y) as usize;
                if index < self.selector.filtered().len() {
                    app.send_action(PickerAction::SelectAt(index));
                }
            }
        } else if self.field_area.get().contains(pos) {
            let inner = self.field_area.get().inner(Margin::new(1, 1));
            let (chips_rect, _) = self.split_field(inner);
            let hit = chips::chip_areas(self.selector.selected(), chips_rect)
                .iter()
                .position(|rect| rect.contains(pos));
            match hit {
                Some(i) => app.send_action(PickerAction::FocusChip(i)),
                None if !self.selector.is_full() => app.send_action(PickerAction::Open),
                None => {}
            }
        } else if self.selector.is_open() || self.chip_focus.is_some() {
            app.send_action(PickerAction::Dismiss);
        }
    }

    fn after_select(&mut self, outcome: SelectOutcome, app: &RootState) {
        if outcome != SelectOutcome::Added {
            return;
        }
        app.send_action(self.search.reset_action());
        app.send_action(Action::SelectionChanged(self.selector.selected().to_vec()));
        if self.selector.is_full() {
            app.send_action(Action::SwitchInputMode(false));
            app.send_action(self.search.set_active_action(false));
        }
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, app: &RootState, shaking: bool) {
        self.field_area.set(area);
        let selected = self.selector.selected();

        let border_style = if shaking {
            Style::default().fg(tailwind::RED.c500)
        } else if self.disabled {
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM)
        } else if app.input_mode() {
            Style::default().fg(Color::Yellow)
        } else if self.selector.is_open() {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let mut title = format!("Concentrations {}/{}", selected.len(), MAX_SELECTED);
        if shaking {
            title.push_str(" (limit reached)");
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let (chips_rect, input_rect) = self.split_field(inner);
        frame.render_widget(
            ChipRow::new(selected, self.chip_focus, shaking).accent(self.accent),
            chips_rect,
        );
        if !self.selector.is_full() {
            self.search.draw(frame, &input_rect, app);
        }
    }

    fn render_dropdown(&self, frame: &mut Frame, area: Rect, filtered: &[&str]) {
        self.dropdown_area.set(area);
        let visible = area.height.saturating_sub(2) as usize;
        let start = match self.selector.highlight() {
            Some(h) if visible > 0 && h + 1 > visible => h + 1 - visible,
            _ => 0,
        };
        self.dropdown_start.set(start);

        let items: Vec<ListItem> = if filtered.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "no matches",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )))]
        } else {
            filtered
                .iter()
                .enumerate()
                .skip(start)
                .take(visible)
                .map(|(i, candidate)| {
                    let already = self
                        .selector
                        .selected()
                        .iter()
                        .any(|s| s.as_str() == *candidate);
                    let mut line = if already {
                        Line::from(format!("✓ {candidate}"))
                            .style(Style::default().fg(Color::DarkGray))
                    } else {
                        Line::from(format!("  {candidate}"))
                    };
                    if self.selector.highlight() == Some(i) {
                        line = line.style(
                            Style::default()
                                .fg(self.accent.unwrap_or(HIGHLIGHT_FG))
                                .add_modifier(Modifier::REVERSED),
                        );
                    }
                    ListItem::new(line)
                })
                .collect()
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!("{} matches", filtered.len()));
        frame.render_widget(List::new(items).block(block), area);
    }
}

impl Page for Picker {
    fn render(&self, frame: &mut Frame, app: &RootState) {
        let area = frame.area();
        let shaking = self.selector.shake_active(Instant::now());
        let filtered = self.selector.filtered();

        let dropdown_height = if self.selector.is_open() {
            (filtered.len().max(1) as u16).min(DROPDOWN_ROWS) + 2
        } else {
            0
        };

        let chunks = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(dropdown_height),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .split(area);

        self.render_field(frame, chunks[0], app, shaking);
        if self.selector.is_open() {
            self.render_dropdown(frame, chunks[1], &filtered);
        } else {
            self.dropdown_area.set(Rect::default());
        }

        let mut help = self.get_help_msg(app);
        help.render(frame, chunks[3]);
    }

    fn handle_events(&self, app: &RootState, event: Event) -> color_eyre::eyre::Result<()> {
        if self.disabled {
            return Ok(());
        }
        match &event {
            Event::Key(key) => {
                if app.input_mode() {
                    let action = match key.code {
                        KeyCode::Down => Some(PickerAction::HighlightNext),
                        KeyCode::Up => Some(PickerAction::HighlightPrev),
                        KeyCode::Enter => Some(PickerAction::SelectHighlighted),
                        KeyCode::Esc => Some(PickerAction::Dismiss),
                        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            Some(PickerAction::Clear)
                        }
                        KeyCode::Backspace
                            if self.search.value().is_empty()
                                && !self.selector.selected().is_empty() =>
                        {
                            Some(PickerAction::FocusChip(self.last_chip()))
                        }
                        _ => None,
                    };
                    match action {
                        Some(action) => app.send_action(action),
                        None => self.search.handle_events(&event, app)?,
                    }
                } else if let Some(focused) = self.chip_focus {
                    match key.code {
                        KeyCode::Backspace | KeyCode::Delete => {
                            app.send_action(PickerAction::RemoveChip(focused))
                        }
                        KeyCode::Left => {
                            if focused > 0 {
                                app.send_action(PickerAction::FocusChip(focused - 1));
                            }
                        }
                        KeyCode::Right => {
                            if focused < self.last_chip() {
                                app.send_action(PickerAction::FocusChip(focused + 1));
                            } else {
                                app.send_action(PickerAction::FocusSearch);
                            }
                        }
                        KeyCode::Esc => app.send_action(PickerAction::FocusSearch),
                        _ => (),
                    }
                } else {
                    match key.code {
                        KeyCode::Down if !self.selector.is_full() => {
                            app.send_action(PickerAction::Open)
                        }
                        KeyCode::Enter => {
                            if self.selector.is_full() {
                                app.send_action(PickerAction::Shake);
                            } else {
                                app.send_action(PickerAction::Open);
                            }
                        }
                        KeyCode::Backspace if !self.selector.selected().is_empty() => {
                            app.send_action(PickerAction::FocusChip(self.last_chip()))
                        }
                        KeyCode::Char('l') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            app.send_action(PickerAction::Clear)
                        }
                        KeyCode::Esc => app.send_action(Action::Quit),
                        _ => (),
                    }
                }
            }
            Event::Paste(_) => self.search.handle_events(&event, app)?,
            Event::Mouse(mouse) => self.handle_mouse(mouse, app),
            _ => (),
        }
        Ok(())
    }

    fn update(&mut self, app: &RootState, action: Action) {
        if let Some(query) = self.search.parse_changed_action(&action) {
            self.selector.set_query(query);
        }

        if let Action::Picker(picker_action) = &action {
            match picker_action {
                PickerAction::Open => {
                    if self.selector.open() {
                        self.chip_focus = None;
                        app.send_action(Action::SwitchInputMode(true));
                        app.send_action(self.search.set_active_action(true));
                    }
                }
                PickerAction::Dismiss => {
                    self.selector.close();
                    self.chip_focus = None;
                    app.send_action(self.search.reset_action());
                    app.send_action(Action::SwitchInputMode(false));
                    app.send_action(self.search.set_active_action(false));
                }
                PickerAction::HighlightNext => self.selector.highlight_next(),
                PickerAction::HighlightPrev => self.selector.highlight_prev(),
                PickerAction::SelectHighlighted => {
                    let outcome = self.selector.select_highlighted(Instant::now());
                    self.after_select(outcome, app);
                }
                PickerAction::SelectAt(index) => {
                    let outcome = self.selector.select_filtered(*index, Instant::now());
                    self.after_select(outcome, app);
                }
                PickerAction::RemoveChip(index) => {
                    if self.selector.remove(*index).is_some() {
                        self.chip_focus = None;
                        app.send_action(Action::SelectionChanged(
                            self.selector.selected().to_vec(),
                        ));
                        // below the cap again: the dropdown reopened, refocus
                        // the search input
                        app.send_action(Action::SwitchInputMode(true));
                        app.send_action(self.search.set_active_action(true));
                    }
                }
                PickerAction::Clear => {
                    self.selector.clear();
                    self.chip_focus = None;
                    app.send_action(self.search.reset_action());
                    app.send_action(Action::SelectionChanged(Vec::new()));
                    app.send_action(Action::SwitchInputMode(false));
                    app.send_action(self.search.set_active_action(false));
                }
                PickerAction::FocusChip(index) => {
                    if !self.selector.selected().is_empty() {
                        self.chip_focus = Some((*index).min(self.last_chip()));
                        app.send_action(Action::SwitchInputMode(false));
                        app.send_action(self.search.set_active_action(false));
                    }
                }
                PickerAction::FocusSearch => {
                    self.chip_focus = None;
                    if self.selector.is_open() {
                        app.send_action(Action::SwitchInputMode(true));
                        app.send_action(self.search.set_active_action(true));
                    }
                }
                PickerAction::Shake => self.selector.shake(Instant::now()),
            }
        }

        self.search.update(&action, app).unwrap();
    }

    fn get_name(&self) -> String {
        "Concentration Picker".to_string()
    }

    fn init(&mut self, app: &RootState) {
        app.send_action(Action::SelectionChanged(self.selector.selected().to_vec()));
        if !self.disabled {
            app.send_action(PickerAction::Open);
        }
    }
}

#[cfg(test)]
mod test {
    use ratatui::{Terminal, backend::TestBackend};

    use crate::config::Config;
    use crate::utils::key_events::test_utils::{get_char_evt, get_ctrl_evt, get_key_evt};

    use super::*;

    fn get_test_objs() -> (RootState, Picker) {
        get_test_objs_with(Config::test_default())
    }

    fn get_test_objs_with(config: Config) -> (RootState, Picker) {
        let mut app = RootState::new(config);
        let mut page = Picker::new(&app);
        page.init(&app);
        while let Ok(action) = app.try_recv() {
            app.update(&action);
            page.update(&app, action);
        }
        (app, page)
    }

    fn select_first_two(app: &mut RootState, page: &mut Picker) {
        app.handle_event_and_update(page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(page, get_key_evt(KeyCode::Enter));
        // the first candidate is still listed (as already selected), so the
        // second pick needs two steps down
        app.handle_event_and_update(page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(page, get_key_evt(KeyCode::Enter));
    }

    fn draw(page: &Picker, app: &RootState) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(80, 25)).unwrap();
        terminal.draw(|f| page.render(f, app)).unwrap();
        terminal
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn starts_open_with_the_input_focused() {
        let (app, page) = get_test_objs();
        assert!(page.selector.is_open());
        assert!(app.input_mode());
        assert!(page.search.is_active());
    }

    #[test]
    fn typing_filters_the_dropdown() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_char_evt('t'));
        app.handle_event_and_update(&mut page, get_char_evt('h'));

        assert_eq!(page.search.value(), "th");
        assert_eq!(page.selector.filtered(), vec!["Theory"]);
    }

    #[test]
    fn enter_selects_the_highlighted_candidate() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        assert_eq!(page.selector.highlight(), Some(0));

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert_eq!(page.selector.selected(), ["Artificial Intelligence"]);
        assert_eq!(app.selection(), ["Artificial Intelligence"]);
        assert_eq!(page.search.value(), "", "select resets the query");
        assert!(page.selector.is_open(), "below the cap stays open");
        assert!(app.input_mode());
    }

    #[test]
    fn enter_without_highlight_is_ignored() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert!(page.selector.selected().is_empty());
        assert!(app.selection().is_empty());
    }

    #[test]
    fn reaching_the_cap_hides_dropdown_and_input() {
        let (mut app, mut page) = get_test_objs();
        select_first_two(&mut app, &mut page);

        assert_eq!(app.selection().len(), 2);
        assert!(page.selector.is_full());
        assert!(!page.selector.is_open());
        assert!(!app.input_mode());
        assert!(!page.search.is_active());
    }

    #[test]
    fn third_enter_arms_the_reject_cue() {
        let (mut app, mut page) = get_test_objs();
        select_first_two(&mut app, &mut page);

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert_eq!(app.selection().len(), 2);
        assert!(page.selector.shake_active(Instant::now()));
    }

    #[test]
    fn duplicate_select_is_a_noop() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));

        // first candidate again, still listed, now marked as selected
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert_eq!(app.selection(), ["Artificial Intelligence"]);
        assert!(page.selector.is_open());
    }

    #[test]
    fn backspace_on_empty_query_focuses_the_last_chip() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Backspace));
        assert_eq!(page.chip_focus, Some(0));
        assert!(!app.input_mode());
        assert!(page.selector.is_open(), "chip focus keeps the dropdown open");
    }

    #[test]
    fn delete_on_a_focused_chip_removes_and_refocuses() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Backspace));

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Delete));
        assert!(app.selection().is_empty());
        assert_eq!(page.chip_focus, None);
        assert!(page.selector.is_open());
        assert!(app.input_mode());
    }

    #[test]
    fn removing_at_the_cap_reopens_the_dropdown() {
        let (mut app, mut page) = get_test_objs();
        select_first_two(&mut app, &mut page);

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Backspace));
        assert_eq!(page.chip_focus, Some(1));

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Delete));
        assert_eq!(app.selection(), ["Artificial Intelligence"]);
        assert!(page.selector.is_open());
        assert!(app.input_mode());
    }

    #[test]
    fn chip_focus_moves_with_arrow_keys() {
        let (mut app, mut page) = get_test_objs();
        select_first_two(&mut app, &mut page);

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Backspace));
        assert_eq!(page.chip_focus, Some(1));

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Left));
        assert_eq!(page.chip_focus, Some(0));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Left));
        assert_eq!(page.chip_focus, Some(0), "left edge clamps");

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Right));
        assert_eq!(page.chip_focus, Some(1));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Right));
        assert_eq!(page.chip_focus, None, "right past the last chip leaves the chips");
        assert!(!app.input_mode(), "the dropdown is hidden at the cap");
    }

    #[test]
    fn escape_dismisses_and_clears_transient_state() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_char_evt('t'));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Esc));
        assert!(!page.selector.is_open());
        assert_eq!(page.selector.query(), "");
        assert_eq!(page.search.value(), "");
        assert_eq!(page.selector.highlight(), None);
        assert!(!app.input_mode());

        // a second escape accepts the (empty) selection and quits
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_l_clears_the_selection() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        assert_eq!(app.selection().len(), 1);

        app.handle_event_and_update(&mut page, get_ctrl_evt('l'));
        assert!(app.selection().is_empty());
        assert!(!page.selector.is_open());
        assert!(!app.input_mode());
    }

    #[test]
    fn outside_click_dismisses() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_char_evt('t'));
        let _terminal = draw(&page, &app);

        app.handle_event_and_update(&mut page, click(79, 24));
        assert!(!page.selector.is_open());
        assert_eq!(page.selector.query(), "");
        assert!(!app.input_mode());
    }

    #[test]
    fn clicking_a_dropdown_row_selects_it() {
        let (mut app, mut page) = get_test_objs();
        let _terminal = draw(&page, &app);

        // field takes rows 0..3, the dropdown border row 3, first row at 4
        app.handle_event_and_update(&mut page, click(2, 4));
        assert_eq!(app.selection(), ["Artificial Intelligence"]);
    }

    #[test]
    fn clicking_a_chip_focuses_it() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));
        let _terminal = draw(&page, &app);

        app.handle_event_and_update(&mut page, click(2, 1));
        assert_eq!(page.chip_focus, Some(0));
        assert!(!app.input_mode());
    }

    #[test]
    fn clicking_the_field_reopens_after_dismiss() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Esc));
        assert!(!page.selector.is_open());
        let _terminal = draw(&page, &app);

        app.handle_event_and_update(&mut page, click(40, 1));
        assert!(page.selector.is_open());
        assert!(app.input_mode());
    }

    #[test]
    fn render_shows_placeholder_title_and_candidates() {
        let (app, page) = get_test_objs();
        let terminal = draw(&page, &app);
        let text = buffer_text(&terminal);

        assert!(text.contains("Concentrations 0/2"));
        assert!(text.contains("type to filter"));
        assert!(text.contains("Theory"));
        assert!(text.contains("4 matches"));
    }

    #[test]
    fn render_marks_selected_candidates() {
        let (mut app, mut page) = get_test_objs();
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Enter));

        let terminal = draw(&page, &app);
        let text = buffer_text(&terminal);
        assert!(text.contains("Concentrations 1/2"));
        assert!(text.contains("✓ Artificial Intelligence"));
    }

    #[test]
    fn seeded_full_selection_starts_closed() {
        let mut config = Config::test_default();
        config.picker.selected = vec!["Theory".into(), "Computer Systems".into()];
        let (app, page) = get_test_objs_with(config);

        assert!(page.selector.is_full());
        assert!(!page.selector.is_open());
        assert!(!app.input_mode());
        assert_eq!(app.selection().len(), 2);
    }

    #[test]
    fn accent_color_is_parsed_from_config() {
        let mut config = Config::test_default();
        config.picker.accent = Some("cyan".into());
        let (_, page) = get_test_objs_with(config);
        assert_eq!(page.accent, Some(Color::Cyan));

        let mut config = Config::test_default();
        config.picker.accent = Some("not a color".into());
        let (_, page) = get_test_objs_with(config);
        assert_eq!(page.accent, None, "unparsable accents fall back to the default");
    }

    #[test]
    fn disabled_picker_ignores_events() {
        let mut config = Config::test_default();
        config.picker.disabled = true;
        let (mut app, mut page) = get_test_objs_with(config);

        assert!(!page.selector.is_open());
        assert!(!app.input_mode());

        app.handle_event_and_update(&mut page, get_key_evt(KeyCode::Down));
        app.handle_event_and_update(&mut page, get_char_evt('t'));
        assert!(!page.selector.is_open());
        assert_eq!(page.search.value(), "");
    }
}
