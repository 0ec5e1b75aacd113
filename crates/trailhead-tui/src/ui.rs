use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Sparkline, Wrap},
    Frame,
};
use trailhead_core::carousel::SceneKind;
use trailhead_core::{dashboard, Difficulty, Trail, View};

use crate::app::{App, SearchField, TextInput, TRAIL_ITEM_HEIGHT};

const ACCENT: Color = Color::Rgb(234, 88, 12);
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    match app.view() {
        View::Home => render_home_screen(app, frame, body_area),
        View::Map => render_map_screen(app, frame, body_area),
    }

    render_footer(app, frame, footer_area);

    if app.show_model_picker {
        render_model_picker(app, frame, area);
    }
}

fn render_header(app: &mut App, frame: &mut Frame, area: Rect) {
    let key_indicator = if app.has_api_key {
        Span::styled(" live ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" offline: sample trails ", Style::default().fg(Color::Yellow))
    };

    let (brand, tagline) = app.logo();
    let logo = [
        Span::styled(format!(" ▲ {} ", brand), Style::default().fg(ACCENT).bold()),
        Span::styled(format!("{} ", tagline), Style::default().fg(Color::DarkGray)),
    ];
    let logo_width = logo.iter().map(Span::width).sum::<usize>();
    app.logo_area = Some(Rect {
        width: u16::try_from(logo_width).unwrap_or(u16::MAX).min(area.width),
        height: 1,
        ..area
    });

    let [brand_span, tagline_span] = logo;
    let title = Line::from(vec![
        brand_span,
        tagline_span,
        Span::styled(app.service.model().to_string(), Style::default().fg(Color::Gray)),
        key_indicator,
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::Black));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let (mode_text, mode_style) = match app.view() {
        View::Home => (" SEARCH ", Style::default().bg(Color::Yellow).fg(Color::Black)),
        View::Map => (" TRAILS ", Style::default().bg(Color::Blue).fg(Color::White)),
    };

    let keys: &[(&str, &str)] = if app.show_model_picker {
        &[(" j/k ", " nav "), (" Enter ", " use model "), (" Esc ", " close ")]
    } else {
        match app.view() {
            View::Home => &[
                (" Tab ", " switch field "),
                (" Enter ", " find trails "),
                (" F2 ", " model "),
                (" Esc ", " quit "),
            ],
            View::Map => &[
                (" j/k ", " trail "),
                (" click ", " select "),
                (" Esc ", " back to search "),
                (" q ", " quit "),
            ],
        }
    };

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::styled(" ", label_style)];
    for (key, label) in keys {
        spans.push(Span::styled(*key, key_style));
        spans.push(Span::styled(*label, label_style));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

// ============================================================================
// Search screen
// ============================================================================

fn render_home_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [scene_area, _, title_area, form_area, notice_area, _, status_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(5),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_scene_label(app, frame, scene_area);

    let title = Text::from(vec![
        Line::from(Span::styled("BEYOND THE", Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(
            "TRAILHEAD",
            Style::default().fg(Color::Gray).bold().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Discover the spaces between the destinations. The quiet hollows, the jagged ridges, and the routes less taken.",
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(
        Paragraph::new(title).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        title_area,
    );

    render_search_form(app, frame, form_area);

    if let Some(notice) = &app.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(notice.as_str(), Style::default().fg(Color::Red)))
                .alignment(Alignment::Center),
            notice_area,
        );
    }

    let status = Line::from(vec![
        Span::styled("Live Trail Data", Style::default().fg(ACCENT).bold()),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Weather Sync Active", Style::default().fg(Color::Gray).bold()),
    ]);
    frame.render_widget(Paragraph::new(status).alignment(Alignment::Center), status_area);
}

fn render_scene_label(app: &App, frame: &mut Frame, area: Rect) {
    let scene = app.carousel.active();
    let kind = match scene.kind {
        SceneKind::Wide => "wide",
        SceneKind::Detail => "detail",
    };

    let text = Text::from(vec![
        Line::from(vec![
            Span::styled(scene.label, Style::default().fg(Color::White).italic()),
            Span::styled(" ●", Style::default().fg(ACCENT)),
        ]),
        Line::from(Span::styled(
            format!("AI SCENERY GEN • v2.5 • {}", kind),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            scene.url,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::UNDERLINED),
        )),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Right), area);
}

fn render_search_form(app: &mut App, frame: &mut Frame, area: Rect) {
    let [form_area] = Layout::horizontal([Constraint::Max(90)])
        .flex(Flex::Center)
        .areas(area);
    let [start_area, destination_area, button_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
        Constraint::Length(10),
    ])
    .areas(form_area);

    render_input(
        frame,
        start_area,
        " Begin Journey ",
        "Portland, OR",
        &app.start_input,
        app.focus == SearchField::Start,
    );
    render_input(
        frame,
        destination_area,
        " Destination ",
        "Joshua Tree, CA",
        &app.destination_input,
        app.focus == SearchField::Destination,
    );

    let button_text = if app.is_loading() {
        Span::styled(
            format!(" {} ", SPINNER[app.animation_frame as usize % SPINNER.len()]),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::styled("Find →", Style::default().fg(Color::Black).bold())
    };
    let button_style = if app.is_loading() {
        Style::default().bg(Color::Gray)
    } else {
        Style::default().bg(Color::White)
    };
    let button = Paragraph::new(button_text)
        .alignment(Alignment::Center)
        .style(button_style)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, button_area);

    if !app.show_model_picker {
        let (input, input_area) = match app.focus {
            SearchField::Start => (&app.start_input, start_area),
            SearchField::Destination => (&app.destination_input, destination_area),
        };
        frame.set_cursor_position((cursor_column(input_area, input), input_area.y.saturating_add(1)));
    }
}

/// Characters scrolled off the left edge so the cursor stays inside a
/// field `inner_width` cells wide.
fn input_scroll(cursor: usize, inner_width: u16) -> usize {
    let width = usize::from(inner_width.max(1));
    (cursor + 1).saturating_sub(width)
}

/// Terminal column of the cursor for a bordered input box.
fn cursor_column(area: Rect, input: &TextInput) -> u16 {
    let inner_width = area.width.saturating_sub(2);
    let visible = input.cursor - input_scroll(input.cursor, inner_width);
    let offset = u16::try_from(visible).unwrap_or(u16::MAX);
    area.x.saturating_add(1).saturating_add(offset)
}

fn render_input(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    placeholder: &str,
    input: &TextInput,
    focused: bool,
) {
    let border_color = if focused { ACCENT } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title.to_string());

    let content = if input.value.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray))
    } else {
        let skip = input_scroll(input.cursor, area.width.saturating_sub(2));
        let visible: String = input.value.chars().skip(skip).collect();
        Span::styled(visible, Style::default().fg(Color::White))
    };

    frame.render_widget(Paragraph::new(content).block(block), area);
}

// ============================================================================
// Results screen
// ============================================================================

fn render_map_screen(app: &mut App, frame: &mut Frame, area: Rect) {
    let [sidebar_area, map_area] = Layout::horizontal([
        Constraint::Length(56),
        Constraint::Min(0),
    ])
    .areas(area);

    let [summary_area, list_area] = Layout::vertical([
        Constraint::Length(7),
        Constraint::Min(0),
    ])
    .areas(sidebar_area);

    render_route_summary(app, frame, summary_area);
    render_trail_list(app, frame, list_area);

    let [route_area, detail_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(14),
    ])
    .areas(map_area);

    render_route_map(app, frame, route_area);
    render_trail_detail(app, frame, detail_area);
}

fn render_route_summary(app: &App, frame: &mut Frame, area: Rect) {
    let (start, destination) = app
        .controller
        .state()
        .route
        .as_ref()
        .map(|r| (r.start.as_str(), r.destination.as_str()))
        .unwrap_or(("", ""));

    let text = Text::from(vec![
        Line::from(Span::styled("← Back to Search (Esc)", Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(destination.to_string(), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(
            format!("—— From {}", start),
            Style::default().fg(ACCENT).italic(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("TOTAL DISTANCE ", Style::default().fg(Color::DarkGray)),
            Span::styled(dashboard::ROUTE_DISTANCE, Style::default().fg(Color::White).bold()),
            Span::styled("   EST. TIME ", Style::default().fg(Color::DarkGray)),
            Span::styled(dashboard::ROUTE_DURATION, Style::default().fg(Color::White).bold()),
        ]),
    ]);

    let block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Hard | Difficulty::Extreme => Color::Red,
        Difficulty::Moderate => Color::Yellow,
        Difficulty::Easy => Color::Green,
    }
}

fn trail_item(trail: &Trail, width: usize) -> ListItem<'static> {
    let mut description: String = trail.description.chars().take(width).collect();
    if trail.description.chars().count() > width {
        description.pop();
        description.push('…');
    }

    // Exactly TRAIL_ITEM_HEIGHT lines, click mapping depends on it
    ListItem::new(vec![
        Line::from(vec![
            Span::styled(trail.name.clone(), Style::default().bold()),
            Span::styled(format!("  ★ {}", trail.rating), Style::default().fg(Color::Yellow)),
        ]),
        Line::from(Span::styled(description, Style::default().fg(Color::Gray))),
        Line::from(vec![
            Span::styled(
                trail.difficulty.as_str().to_uppercase(),
                Style::default().fg(difficulty_color(trail.difficulty)),
            ),
            Span::raw(" · "),
            Span::raw(trail.duration.clone()),
            Span::raw(" · "),
            Span::raw(trail.distance.clone()),
        ]),
    ])
}

fn render_trail_list(app: &mut App, frame: &mut Frame, area: Rect) {
    app.trail_list_area = Some(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Curated Stops ({}) ", app.trails().len()));

    if app.trails().is_empty() {
        let placeholder = Paragraph::new("No trails found along this route")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = app.trails().iter().map(|t| trail_item(t, width)).collect();
    debug_assert!(items.iter().all(|i| i.height() == TRAIL_ITEM_HEIGHT as usize));

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::White)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▌ ");

    frame.render_stateful_widget(list, area, &mut app.trail_list_state);
}

fn render_route_map(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Route ");

    let (start, destination) = app
        .controller
        .state()
        .route
        .as_ref()
        .map(|r| (r.start.clone(), r.destination.clone()))
        .unwrap_or_default();

    let mut lines = vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::White)),
        Span::styled(start, Style::default().bold()),
    ])];
    for trail in app.trails() {
        let marker = if app.selected_trail().is_some_and(|t| t.id == trail.id) {
            Span::styled("╞═▲ ", Style::default().fg(ACCENT).bold())
        } else {
            Span::styled("╎ △ ", Style::default().fg(ACCENT))
        };
        lines.push(Line::from(vec![
            marker,
            Span::raw(trail.name.clone()),
            Span::styled(
                format!("  ({:.2}, {:.2})", trail.coordinates.lat, trail.coordinates.lng),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    lines.push(Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::White)),
        Span::styled(destination, Style::default().bold()),
    ]));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_trail_detail(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));

    let Some(trail) = app.selected_trail() else {
        frame.render_widget(block, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [text_area, chart_area] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(34),
    ])
    .areas(inner);

    let text = Text::from(vec![
        Line::from(Span::styled(
            dashboard::WEATHER_SUMMARY.to_uppercase(),
            Style::default().fg(ACCENT).bold(),
        )),
        Line::default(),
        Line::from(Span::styled(trail.name.clone(), Style::default().fg(Color::White).bold())),
        Line::from(Span::styled(trail.location.clone(), Style::default().fg(Color::DarkGray))),
        Line::default(),
        Line::from(trail.description.clone()),
    ]);
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), text_area);

    let profile = dashboard::elevation_profile();
    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Elevation Profile ")
        .title(Line::from(dashboard::ELEVATION_GAIN_LABEL).right_aligned().fg(ACCENT));
    let sparkline = Sparkline::default()
        .block(chart_block)
        .data(&profile)
        .style(Style::default().fg(ACCENT));
    frame.render_widget(sparkline, chart_area);
}

// ============================================================================
// Popups
// ============================================================================

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [vertical] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(vertical);
    rect
}

fn render_model_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(area, 40, app.available_models.len() as u16 + 2);
    frame.render_widget(Clear, popup);

    let current = app.service.model().to_string();
    let items: Vec<ListItem> = app
        .available_models
        .iter()
        .map(|m| {
            let marker = if *m == current { "● " } else { "  " };
            ListItem::new(format!("{}{}", marker, m))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Gemini Model "),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, popup, &mut app.model_picker_state);
}
