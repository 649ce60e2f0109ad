pub(crate) mod chips;
pub(crate) mod input;

use color_eyre::eyre::Result;
use ratatui::Frame;

use crate::{RootState, actions::Action, tui::Event};

pub(crate) trait Component {
    #[allow(dead_code)]
    fn get_id(&self) -> u64;

    fn handle_events(&self, event: &Event, app: &RootState) -> Result<()>;

    fn update(&mut self, action: &Action, app: &RootState) -> Result<()>;

    fn draw(&self, frame: &mut Frame, area: &ratatui::prelude::Rect, app: &RootState);
}
