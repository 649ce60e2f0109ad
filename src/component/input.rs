use color_eyre::Result;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    widgets::Paragraph,
};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{
    RootState,
    actions::{Action, CompAction},
    tui::Event,
    utils::key_events::KeyEvent,
};

/// The picker's search field.
///
/// Draws bare text (the picker owns the surrounding border) and publishes
/// every edit live through [`InputAction::Changed`], which the picker parses
/// to re-filter the dropdown. Activation is switched by the picker via
/// [`SearchInput::set_active_action`].
#[derive(Clone, Debug)]
pub(crate) struct SearchInput {
    id: u64,
    input: Input,
    active: bool,
    placeholder: String,
}

#[derive(Clone, Debug)]
pub(crate) enum InputAction {
    SetActive(bool),
    HandleKey(KeyEvent),
    HandlePaste(String),
    Reset,

    /// the event owner should pay attention to
    Changed(String),
}

impl SearchInput {
    pub fn new<T: Into<String>>(id: u64, placeholder: T) -> Self {
        Self {
            id,
            input: Input::default(),
            active: false,
            placeholder: placeholder.into(),
        }
    }

    pub fn value(&self) -> &str {
        self.input.value()
    }

    pub fn set_active_action(&self, active: bool) -> Action {
        self.get_action(InputAction::SetActive(active))
    }

    pub fn reset_action(&self) -> Action {
        self.get_action(InputAction::Reset)
    }

    pub fn parse_changed_action(&self, action: &Action) -> Option<String> {
        match self.unwrap_action(action) {
            Some(InputAction::Changed(s)) => Some(s),
            _ => None,
        }
    }

    fn get_action(&self, action: InputAction) -> Action {
        Action::Comp((CompAction::Input(action), self.id))
    }

    fn unwrap_action(&self, action: &Action) -> Option<InputAction> {
        if let Action::Comp((comp_action, id)) = action {
            if *id != self.id {
                return None;
            };
            let CompAction::Input(action) = comp_action;
            Some(action.clone())
        } else {
            None
        }
    }
}

impl super::Component for SearchInput {
    fn get_id(&self) -> u64 {
        self.id
    }

    fn handle_events(&self, event: &Event, app: &RootState) -> Result<()> {
        if !self.active || !app.input_mode() {
            return Ok(());
        }
        match event {
            Event::Key(key) => {
                app.send_action(self.get_action(InputAction::HandleKey((*key).into())))
            }
            Event::Paste(s) => {
                app.send_action(self.get_action(InputAction::HandlePaste(s.clone())))
            }
            _ => (),
        }
        Ok(())
    }

    fn update(&mut self, action: &Action, app: &RootState) -> Result<()> {
        let Some(action) = self.unwrap_action(action) else {
            return Ok(());
        };

        match action {
            InputAction::SetActive(active) => {
                self.active = active;
            }
            InputAction::HandleKey(key_event) => {
                self.input
                    .handle_event(&crossterm::event::Event::Key(key_event.into()));
                app.send_action(self.get_action(InputAction::Changed(self.input.value().to_string())));
            }
            InputAction::HandlePaste(string) => {
                string.chars().for_each(|c| {
                    self.input.handle(tui_input::InputRequest::InsertChar(c));
                });
                app.send_action(self.get_action(InputAction::Changed(self.input.value().to_string())));
            }
            InputAction::Reset => {
                self.input.reset();
            }
            InputAction::Changed(_) => (),
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame, area: &ratatui::prelude::Rect, app: &RootState) {
        if area.width == 0 {
            return;
        }
        let typing = self.active && app.input_mode();
        let scroll = self.input.visual_scroll(area.width as usize);

        let widget = if self.input.value().is_empty() {
            Paragraph::new(self.placeholder.as_str())
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM))
        } else {
            let style = if typing {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            Paragraph::new(self.input.value())
                .style(style)
                .scroll((0, scroll as u16))
        };
        frame.render_widget(widget, *area);

        if typing {
            // Ratatui hides the cursor unless it's explicitly set.
            let x = self.input.visual_cursor().max(scroll) - scroll;
            frame.set_cursor_position((area.x + x as u16, area.y));
        }
    }
}

#[cfg(test)]
impl SearchInput {
    pub fn is_active(&self) -> bool {
        self.active
    }
}
