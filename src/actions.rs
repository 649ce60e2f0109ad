use crate::{component::input::InputAction, page::picker::PickerAction};

#[derive(Clone, Debug)]
pub enum Action {
    Tick,
    Render,
    Quit,

    /// Route keystrokes to the focused input component (true) or to page
    /// navigation (false).
    SwitchInputMode(bool),

    /// The widget mutated its selection; the host copy in
    /// [`RootState`](crate::RootState) follows.
    SelectionChanged(Vec<String>),

    Picker(PickerAction),

    /// Component actions, addressed by component id.
    Comp((CompAction, u64)),
}

#[derive(Clone, Debug)]
pub enum CompAction {
    Input(InputAction),
}
