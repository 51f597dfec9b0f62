use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputField, MenuList, TitleBar, Transcript};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

const MENU_PANE_WIDTH: u16 = 34;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(3)]);
    let [title_area, main_area, input_area] = layout.areas(frame.area());

    let [menu_area, transcript_area] =
        Layout::horizontal([Length(MENU_PANE_WIDTH), Min(0)]).areas(main_area);

    TitleBar::new(
        format!(
            "gitup (push: {}/{})",
            app.defaults.remote, app.defaults.branch
        ),
        app.status_message.clone(),
        tui.transcript.is_following(),
    )
    .render(frame, title_area);

    MenuList::new(&app.menu, !app.in_input_mode()).render(frame, menu_area);

    Transcript::new(&app.transcript, &mut tui.transcript).render(frame, transcript_area);

    InputField::new(app.input.as_ref()).render(frame, input_area);
}
