//! Pages own a full screen of UI: rendering, event handling, and reaction to
//! actions. The picker is the only page of this application.

use color_eyre::eyre::Result;
use ratatui::Frame;

use crate::{RootState, actions::Action, tui::Event};

pub(crate) mod picker;

pub trait Page {
    fn render(&self, frame: &mut Frame, app: &RootState);

    /// Translate an event into actions. Pages never mutate state here; they
    /// send actions through `app`.
    fn handle_events(&self, app: &RootState, event: Event) -> Result<()>;

    /// React to an action after [`RootState`] has applied its own share.
    fn update(&mut self, app: &RootState, action: Action);

    fn get_name(&self) -> String;

    fn init(&mut self, _app: &RootState) {}
}
