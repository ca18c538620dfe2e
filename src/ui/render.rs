use crate::ui::app::App;
use crate::ui::footer::Footer;
use crate::ui::header::Header;
use crate::ui::layout::layout_regions;
use crate::ui::search_panel;
use crate::ui::theme::{GLOBAL_BORDER, STATUS_ERROR, STATUS_OK};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();
    let (header, body, footer) = layout_regions(area);
    let state = app.state();

    let header_widget = Header::new();
    frame.render_widget(
        header_widget.widget(app.route(), state, app.search_state().is_searching),
        header,
    );

    frame.render_widget(Clear, body);
    app.screen().render(frame, body, state);

    match app.flash() {
        Some(flash) => {
            let color = if flash.is_error { STATUS_ERROR } else { STATUS_OK };
            let widget = Paragraph::new(Line::from(Span::styled(
                format!(" {}", flash.message),
                Style::default().fg(color),
            )))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(GLOBAL_BORDER)),
            );
            frame.render_widget(widget, footer);
        }
        None => {
            let footer_widget = Footer::new();
            frame.render_widget(footer_widget.widget(footer, app.screen().hints()), footer);
        }
    }

    if app.is_search_open() {
        search_panel::render(frame, body, app.search_state(), app.search_error());
    }
}
