use crate::app::App;
use crate::braille::{braille_bits, braille_char, BrailleCanvas};
use crate::map::{ramp_color, MapLayers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Widget},
    Frame,
};
use std::time::Instant;

/// Terminal regions of one frame
struct Panes {
    map: Rect,
    aggregation: Rect,
    forms: Rect,
    status: Rect,
}

fn panes(area: Rect) -> Panes {
    // Split into main area and status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(5)])
        .split(columns[1]);

    Panes {
        map: columns[0],
        aggregation: side[0],
        forms: side[1],
        status: rows[1],
    }
}

fn map_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Wastewater Map ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

/// Inner map area (inside the border) for a terminal of the given size
pub fn map_area(area: Rect) -> Rect {
    map_block().inner(panes(area).map)
}

/// Render the UI
pub fn render(frame: &mut Frame, app: &App, now: Instant) {
    let panes = panes(frame.area());

    render_map(frame, app, panes.map);
    render_aggregation(frame, app, panes.aggregation);
    render_forms(frame, app, panes.forms, now);
    render_status_bar(frame, app, panes.status);
}

fn render_map(frame: &mut Frame, app: &App, area: Rect) {
    let block = map_block();
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let map_widget = MapWidget {
        layers: app.map.render(),
    };
    frame.render_widget(map_widget, inner);
}

/// Braille map layers composited back to front
struct MapWidget {
    layers: MapLayers,
}

impl MapWidget {
    /// Paint a layer, OR-ing its dots into cells already drawn so that
    /// overlapping layers keep each other's shape. The later color wins.
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        for (col, row, bits) in canvas.lit_cells() {
            if col >= area.width as usize || row >= area.height as usize {
                continue;
            }
            let cell = &mut buf[(area.x + col as u16, area.y + row as u16)];
            let below = cell.symbol().chars().next().and_then(braille_bits).unwrap_or(0);
            cell.set_char(braille_char(below | bits)).set_fg(color);
        }
    }

    fn put_text(text: &str, col: u16, row: u16, style: Style, area: Rect, buf: &mut Buffer) {
        if row >= area.height {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let x = col as usize + i;
            if x >= area.width as usize {
                break;
            }
            buf[(area.x + x as u16, area.y + row)].set_char(ch).set_style(style);
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layers = &self.layers;

        // Region and enclave, then their outlines
        Self::render_layer(&layers.region_fill, Color::Yellow, area, buf);
        Self::render_layer(&layers.region_outline, Color::DarkGray, area, buf);

        // Lake
        Self::render_layer(&layers.lake_fill, Color::Cyan, area, buf);
        Self::render_layer(&layers.lake_outline, Color::Blue, area, buf);

        // Markers in insertion order, latest on top
        for marker in &layers.markers {
            Self::render_layer(&marker.fill, marker.color, area, buf);
            Self::render_layer(&marker.outline, Color::White, area, buf);
        }

        if let Some(legend) = &layers.legend {
            // Green at the top, red at the bottom
            for r in 0..legend.rows {
                let ratio = (r as f64 + 0.5) / legend.rows as f64;
                let y = legend.row + r;
                if y >= area.height {
                    break;
                }
                for c in 0..legend.cols {
                    let x = legend.col + c;
                    if x >= area.width {
                        break;
                    }
                    buf[(area.x + x, area.y + y)].set_bg(ramp_color(ratio));
                }
            }
            Self::render_layer(&legend.outline, Color::White, area, buf);

            let caption_style = Style::default().fg(Color::White);
            for (col, row, text) in &legend.captions {
                Self::put_text(text, *col, *row, caption_style, area, buf);
            }
        }
    }
}

fn render_aggregation(frame: &mut Frame, app: &App, area: Rect) {
    let agg = &app.aggregation;
    let label = Style::default().fg(Color::DarkGray);
    let value = Style::default().fg(Color::Yellow);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Population measured: ", label),
            Span::styled(agg.total_population().to_string(), value),
        ]),
        Line::from(vec![
            Span::styled("Plants reporting: ", label),
            Span::styled(agg.reported().to_string(), value),
        ]),
    ];
    for (category, average) in agg.averages() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", category.to_string()), label),
            Span::styled(format!("{average:.2}"), value),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            " Overview ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_forms(frame: &mut Frame, app: &App, area: Rect, now: Instant) {
    let title = app
        .focused_form()
        .map(|f| format!(" {} ", f.site().title()))
        .unwrap_or_else(|| " No plants loaded ".to_string());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(form) = app.focused_form() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let tabs = Tabs::new(app.forms.iter().map(|f| f.site().name.clone()))
        .select(app.focused)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[0]);

    let locked = form.is_locked();
    let mut lines = Vec::with_capacity(form.inputs().len() + 1);
    for (idx, (category, text)) in form.inputs().iter().enumerate() {
        let selected = idx == form.selected() && !locked;
        let field_style = if locked {
            Style::default().fg(Color::DarkGray)
        } else if selected {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:<18}", category.to_string()), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("[{:<8}]", text), field_style),
        ]));
    }

    if locked {
        let secs = app
            .cooldown_remaining(app.focused, now)
            .map(|d| d.as_secs_f64().ceil() as u64)
            .unwrap_or(0);
        lines.push(Line::from(Span::styled(
            format!("Sent, locked for {secs}s"),
            Style::default().fg(Color::DarkGray),
        )));
    } else if let Some(error) = form.error() {
        lines.push(Line::from(Span::styled(error.to_string(), Style::default().fg(Color::Red))));
    }

    frame.render_widget(Paragraph::new(lines), chunks[1]);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(tooltip) = &app.tooltip {
        Line::from(Span::styled(format!(" {tooltip}"), Style::default().fg(Color::Cyan)))
    } else {
        let mut spans = Vec::new();
        if let Some(message) = &app.status {
            spans.push(Span::styled(format!(" {message} |"), Style::default().fg(Color::Yellow)));
        }
        spans.push(Span::styled(
            " tab:plant ↑↓:field enter:send esc:quit",
            Style::default().fg(Color::DarkGray),
        ));
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(status), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::Aggregation;
    use crate::config::MapConfig;
    use crate::data::parse_sites;
    use crate::journal::MemoryJournal;
    use crate::map::{MapView, RegionGeometry};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::time::Duration;

    fn app() -> App {
        let map = MapView::new(&MapConfig::default(), RegionGeometry::builtin());
        let aggregation = Aggregation::new(Box::new(MemoryJournal::default()));
        App::new(map, aggregation, parse_sites("Bruchsal;50000;8.594;49.142"), Duration::from_secs(10))
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_map_area_is_inside_border() {
        let area = map_area(Rect::new(0, 0, 100, 40));
        assert_eq!((area.x, area.y), (1, 1));
        assert_eq!(area.width, 58);
        assert_eq!(area.height, 37);
    }

    #[test]
    fn test_render_frame() {
        let mut app = app();
        app.resize(120, 40);
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        terminal.draw(|frame| render(frame, &app, Instant::now())).unwrap();
        let text = screen(&terminal);

        assert!(text.contains("Wastewater Map"));
        assert!(text.contains("Population measured: 0"));
        assert!(text.contains("ALPHA (B.1.1.7)"));
        assert!(text.contains("Bruchsal (50000 people)"));
        assert!(text.contains(">500 ppp"));
    }

    #[test]
    fn test_render_locked_form_and_tooltip() {
        let mut app = app();
        app.resize(120, 40);
        let now = Instant::now();
        if let Some(form) = app.focused_form_mut() {
            for category in crate::model::Category::ALL {
                form.set_input(category, "3");
            }
        }
        app.submit_focused(now).unwrap();
        app.tooltip = Some("Bruchsal (50000 people), 15ppp total".to_string());

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| render(frame, &app, now)).unwrap();
        let text = screen(&terminal);

        assert!(text.contains("Sent, locked for 10s"));
        assert!(text.contains("Population measured: 50000"));
        assert!(text.contains("15ppp total"));
    }
}
