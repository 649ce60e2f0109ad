use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use tracing::info;

use crate::{
    actions::Action,
    config::Config,
    page::Page,
    tui::{Event, TuiEnum},
};

/// State shared across the whole application.
///
/// The selection vector is the host's copy of what the picker widget chose.
/// It is mutated in exactly one place, [`RootState::update`] on
/// [`Action::SelectionChanged`], which is the widget's change notification.
pub struct RootState {
    should_quit: bool,
    action_tx: tokio::sync::mpsc::UnboundedSender<Action>,
    action_rx: tokio::sync::mpsc::UnboundedReceiver<Action>,
    input_mode: bool,
    selection: Vec<String>,
    pub config: Config,
}

impl RootState {
    pub fn new(config: Config) -> Self {
        let (action_tx, action_rx) = tokio::sync::mpsc::unbounded_channel();
        Self {
            should_quit: false,
            action_tx,
            action_rx,
            input_mode: false,
            selection: Vec::new(),
            config,
        }
    }

    pub fn send_action<T: Into<Action>>(&self, action: T) {
        // Failure means the receiver half is gone, i.e. we are shutting down.
        let _ = self.action_tx.send(action.into());
    }

    pub fn try_recv(&mut self) -> Result<Action, tokio::sync::mpsc::error::TryRecvError> {
        self.action_rx.try_recv()
    }

    pub fn input_mode(&self) -> bool {
        self.input_mode
    }

    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply the application-wide share of an action. Page-specific shares
    /// are applied by [`Page::update`] afterwards.
    pub fn update(&mut self, action: &Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::SwitchInputMode(mode) => self.input_mode = *mode,
            Action::SelectionChanged(selection) => {
                info!("selection changed: {:?}", selection);
                self.selection = selection.clone();
            }
            _ => {}
        }
    }

    #[cfg(test)]
    /// Run one event through a page the way [`App::run`] would: translate,
    /// then drain the action channel into both the root state and the page.
    pub fn handle_event_and_update(&mut self, page: &mut dyn Page, event: Event) {
        page.handle_events(self, event).unwrap();
        while let Ok(action) = self.try_recv() {
            self.update(&action);
            page.update(self, action);
        }
    }
}

pub struct App {
    pub page: Box<dyn Page>,
    pub state: RootState,
    pub tui: TuiEnum,
}

impl App {
    pub fn new(state: RootState, page: Box<dyn Page>, tui: TuiEnum) -> Self {
        Self { page, state, tui }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.tui.enter()?;
        info!("starting {}", self.page.get_name());
        self.page.init(&self.state);
        self.drain_actions()?;

        loop {
            let e = self.tui.next().await?;

            self.handle_event(e)?;
            self.drain_actions()?;

            if self.state.should_quit() {
                break;
            }
        }

        self.tui.exit()?;
        Ok(())
    }

    /// Translate a [`tui::Event`](crate::tui::Event) into actions.
    ///
    /// Application-wide keys are handled here (quit on ctrl-c always, on `q`
    /// when no input is capturing); everything else is delegated to the page.
    fn handle_event(&mut self, event: Event) -> Result<()> {
        match &event {
            Event::Tick => self.state.send_action(Action::Tick),
            Event::Render | Event::Resize(_, _) => self.state.send_action(Action::Render),
            Event::Error => self.state.send_action(Action::Quit),
            Event::Init | Event::FocusGained | Event::FocusLost => {}

            Event::Key(key) => {
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    self.state.send_action(Action::Quit);
                } else if !self.state.input_mode() && key.code == KeyCode::Char('q') {
                    self.state.send_action(Action::Quit);
                } else {
                    self.page.handle_events(&self.state, event)?;
                }
            }

            Event::Paste(_) | Event::Mouse(_) => {
                self.page.handle_events(&self.state, event)?;
            }
        }
        Ok(())
    }

    fn drain_actions(&mut self) -> Result<()> {
        while let Ok(action) = self.state.try_recv() {
            self.perform_action(action)?;
        }
        Ok(())
    }

    /// Perform an action. This is the only place application state changes.
    fn perform_action(&mut self, action: Action) -> Result<()> {
        match action {
            Action::Render => {
                self.tui.draw(|f| {
                    self.page.render(f, &self.state);
                })?;
            }
            Action::Tick => {}
            action => {
                self.state.update(&action);
                self.page.update(&self.state, action);
            }
        }
        Ok(())
    }
}
