use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mumbai_housing::{
    colormap::Rgb,
    format::{format_amount, popup_line, selection_mean_line},
    map::{markers, price_colormap, MapMarker},
    AppContext, MapStyle, Prediction, PropertyInput, ViewMode, AREA_RANGE, BHK_RANGE,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Circle, Points},
        Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap,
    },
    Frame, Terminal,
};
use std::collections::BTreeSet;
use std::io;

const NOT_SURE: &str = "Any / Not Sure";
const AREA_STEP: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Predict,
    Map,
}

impl Page {
    pub fn next(&self) -> Self {
        match self {
            Page::Predict => Page::Map,
            Page::Map => Page::Predict,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Page::Predict => "Predict Price",
            Page::Map => "Explore Map",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Bhk,
    Area,
    Age,
    Region,
}

impl FormField {
    const ALL: [FormField; 4] = [FormField::Bhk, FormField::Area, FormField::Age, FormField::Region];

    fn next(&self) -> Self {
        match self {
            FormField::Bhk => FormField::Area,
            FormField::Area => FormField::Age,
            FormField::Age => FormField::Region,
            FormField::Region => FormField::Bhk,
        }
    }

    fn previous(&self) -> Self {
        match self {
            FormField::Bhk => FormField::Region,
            FormField::Area => FormField::Bhk,
            FormField::Age => FormField::Area,
            FormField::Region => FormField::Age,
        }
    }

    fn label(&self) -> &str {
        match self {
            FormField::Bhk => "Number of BHK",
            FormField::Area => "Area (sqft)",
            FormField::Age => "Property Age",
            FormField::Region => "Select Region",
        }
    }
}

pub struct App {
    pub ctx: AppContext,
    pub current_page: Page,

    // Predict tab
    pub form: PropertyInput,
    pub focus: FormField,
    /// Picker entries: "not sure" first, then the catalog sorted
    pub region_options: Vec<String>,
    pub region_choice: usize,
    pub result: Option<Result<Prediction, String>>,

    // Map tab
    pub map_state: TableState,
    pub selected_regions: BTreeSet<String>,
    pub map_style: MapStyle,
    pub view_mode: ViewMode,
}

impl App {
    pub fn new(ctx: AppContext) -> Self {
        let region_options = std::iter::once(NOT_SURE.to_string())
            .chain(ctx.catalog().sorted_names().into_iter().map(String::from))
            .collect();

        let mut map_state = TableState::default();
        if !ctx.view().rows.is_empty() {
            map_state.select(Some(0));
        }

        Self {
            ctx,
            current_page: Page::Predict,
            form: PropertyInput::default(),
            focus: FormField::Bhk,
            region_options,
            region_choice: 0,
            result: None,
            map_state,
            selected_regions: BTreeSet::new(),
            map_style: MapStyle::default(),
            view_mode: ViewMode::default(),
        }
    }

    pub fn next_page(&mut self) {
        self.current_page = self.current_page.next();
    }

    // ------------------------------------------------------------------
    // Prediction form
    // ------------------------------------------------------------------

    /// Step the focused field; values stay inside the form bounds
    pub fn adjust(&mut self, steps: i32) {
        match self.focus {
            FormField::Bhk => {
                let bhk = i64::from(self.form.bhk) + i64::from(steps);
                self.form.bhk = bhk.clamp(i64::from(BHK_RANGE.0), i64::from(BHK_RANGE.1)) as u32;
            }
            FormField::Area => {
                let area = self.form.area + f64::from(steps) * AREA_STEP;
                self.form.area = area.clamp(AREA_RANGE.0, AREA_RANGE.1);
            }
            FormField::Age => {
                for _ in 0..steps.unsigned_abs() {
                    self.form.age = if steps > 0 { self.form.age.next() } else { self.form.age.previous() };
                }
            }
            FormField::Region => {
                let len = self.region_options.len() as i64;
                let choice = (self.region_choice as i64 + i64::from(steps)).rem_euclid(len);
                self.region_choice = choice as usize;
                self.form.region = if self.region_choice == 0 {
                    None
                } else {
                    Some(self.region_options[self.region_choice].clone())
                };
            }
        }
        self.result = None;
    }

    pub fn region_label(&self) -> &str {
        &self.region_options[self.region_choice]
    }

    pub fn submit(&mut self) {
        self.result = Some(
            self.ctx
                .predict(&self.form)
                .map_err(|e| format!("Prediction failed: {}", e)),
        );
    }

    pub fn reset_form(&mut self) {
        self.form = PropertyInput::default();
        self.region_choice = 0;
        self.result = None;
    }

    // ------------------------------------------------------------------
    // Map
    // ------------------------------------------------------------------

    pub fn next_region(&mut self) {
        let len = self.ctx.view().rows.len();
        if len == 0 {
            return;
        }
        let i = match self.map_state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.map_state.select(Some(i));
    }

    pub fn previous_region(&mut self) {
        let len = self.ctx.view().rows.len();
        if len == 0 {
            return;
        }
        let i = match self.map_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.map_state.select(Some(i));
    }

    /// Add or remove the highlighted region from the filter
    pub fn toggle_region(&mut self) {
        let Some(row) = self.map_state.selected().and_then(|i| self.ctx.view().rows.get(i)) else {
            return;
        };
        let region = row.region.clone();
        if !self.selected_regions.remove(&region) {
            self.selected_regions.insert(region);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_regions.clear();
    }

    fn selection(&self) -> Vec<&str> {
        self.selected_regions.iter().map(String::as_str).collect()
    }

    pub fn visible_markers(&self) -> Vec<MapMarker> {
        markers(self.ctx.view(), &self.selection())
    }

    /// Mean of the selected regions' medians; only shown with a selection
    pub fn selection_mean(&self) -> Option<f64> {
        if self.selected_regions.is_empty() {
            return None;
        }
        self.ctx.view().mean_median(&self.selection())
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        tracing::error!(error = ?err, "dashboard loop failed");
    }

    Ok(res?)
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
            KeyCode::Tab | KeyCode::BackTab => app.next_page(),
            _ => match app.current_page {
                Page::Predict => handle_predict_key(app, key.code),
                Page::Map => handle_map_key(app, key.code),
            },
        }
    }
}

fn handle_predict_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.focus = app.focus.next(),
        KeyCode::Up | KeyCode::Char('k') => app.focus = app.focus.previous(),
        KeyCode::Right | KeyCode::Char('l') => app.adjust(1),
        KeyCode::Left | KeyCode::Char('h') => app.adjust(-1),
        KeyCode::PageUp => app.adjust(10),
        KeyCode::PageDown => app.adjust(-10),
        KeyCode::Enter | KeyCode::Char('p') => app.submit(),
        KeyCode::Char('r') => app.reset_form(),
        _ => {}
    }
}

fn handle_map_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down | KeyCode::Char('j') => app.next_region(),
        KeyCode::Up | KeyCode::Char('k') => app.previous_region(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_region(),
        KeyCode::Char('c') => app.clear_selection(),
        KeyCode::Char('s') => app.map_style = app.map_style.next(),
        KeyCode::Char('m') => app.view_mode = app.view_mode.toggle(),
        KeyCode::Home => app.map_state.select(Some(0)),
        _ => {}
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header with navigation
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    match app.current_page {
        Page::Predict => render_predict(f, chunks[1], app),
        Page::Map => render_map_page(f, chunks[1], app),
    }

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        " Mumbai Housing Price Predictor ",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];

    for page in [Page::Predict, Page::Map] {
        tab_spans.push(Span::raw(" │ "));
        let style = if page == app.current_page {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(page.title().to_string(), style));
    }

    let summary = app.ctx.summary();
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!("{} regions priced / {} mapped", summary.priced_regions, summary.mapped_regions),
        Style::default().fg(Color::Cyan),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_predict(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FormField::ALL.len() as u16 * 2 + 3), Constraint::Min(0)])
        .split(area);

    let mut lines = vec![Line::from("")];
    for field in FormField::ALL {
        let value = match field {
            FormField::Bhk => format!("{}", app.form.bhk),
            FormField::Area => format!("{:.0}", app.form.area),
            FormField::Age => app.form.age.to_string(),
            FormField::Region => app.region_label().to_string(),
        };

        let focused = field == app.focus;
        let marker = if focused {
            Span::styled("  → ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        } else {
            Span::raw("    ")
        };
        let value_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };

        lines.push(Line::from(vec![
            marker,
            Span::styled(
                format!("{:<16}", field.label()),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("◀ {} ▶", value), value_style),
        ]));
        lines.push(Line::from(""));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Enter Property Details "),
    );
    f.render_widget(form, chunks[0]);

    let (text, style) = match &app.result {
        None => (
            vec![Line::from(Span::styled(
                "  Press Enter to predict",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))],
            Style::default().fg(Color::White),
        ),
        Some(Ok(prediction)) => {
            let mut lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    format!("  {}", prediction.display),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )),
            ];
            for warning in &prediction.warnings {
                lines.push(Line::from(Span::styled(
                    format!("  ⚠ {}", warning),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            (lines, Style::default().fg(Color::Yellow))
        }
        Some(Err(message)) => (
            vec![Line::from(""), Line::from(Span::styled(format!("  {}", message), Style::default().fg(Color::Red)))],
            Style::default().fg(Color::Red),
        ),
    };

    let result = Paragraph::new(text).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(style)
            .title(" Estimate "),
    );
    f.render_widget(result, chunks[1]);
}

fn render_map_page(f: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(chunks[0]);

    render_region_table(f, left[0], app);
    render_map_options(f, left[1], app);
    render_canvas(f, chunks[1], app);
}

fn render_region_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header_cells = ["", "Region", "Median ₹/sqft"].iter().map(|h| {
        Cell::from(*h).style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
    });
    let header = Row::new(header_cells)
        .style(Style::default().bg(Color::DarkGray))
        .height(1);

    let scale = price_colormap(app.ctx.view());
    let rows = app.ctx.view().rows.iter().map(|row| {
        let checked = if app.selected_regions.contains(&row.region) { "[x]" } else { "[ ]" };
        let price = row
            .median_price
            .map(format_amount)
            .unwrap_or_else(|| "—".to_string());

        Row::new(vec![
            Cell::from(checked),
            Cell::from(truncate(&row.label, 24)),
            Cell::from(price).style(Style::default().fg(to_color(scale.color_for(row.median_price)))),
        ])
        .height(1)
    });

    let table = Table::new(
        rows,
        [Constraint::Length(4), Constraint::Length(25), Constraint::Length(14)],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Filter by Region "),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.map_state);
}

fn render_map_options(f: &mut Frame, area: Rect, app: &App) {
    let mean = match app.selection_mean() {
        Some(mean) => Span::styled(selection_mean_line(mean), Style::default().fg(Color::Green)),
        None if app.selected_regions.is_empty() => {
            Span::styled("No regions selected", Style::default().fg(Color::DarkGray))
        }
        None => Span::styled("No price data for selection", Style::default().fg(Color::DarkGray)),
    };

    let content = vec![
        Line::from(vec![
            Span::styled(" Map Style: ", Style::default().fg(Color::Cyan)),
            Span::raw(app.map_style.tiles()),
        ]),
        Line::from(vec![
            Span::styled(" View Mode: ", Style::default().fg(Color::Cyan)),
            Span::raw(app.view_mode.name()),
        ]),
        Line::from(vec![Span::raw(" "), mean]),
    ];

    let options = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(options, area);
}

fn render_canvas(f: &mut Frame, area: Rect, app: &App) {
    let ([x_min, x_max], [y_min, y_max]) = map_bounds(app);
    let (background, text) = match app.map_style {
        MapStyle::OpenStreetMap => (Color::Reset, Color::White),
        MapStyle::CartoPositron => (Color::Rgb(0xf2, 0xf2, 0xf0), Color::Black),
        MapStyle::CartoDarkMatter => (Color::Rgb(0x1a, 0x1a, 0x1a), Color::Gray),
    };

    let markers = app.visible_markers();
    let highlighted = app
        .map_state
        .selected()
        .and_then(|i| app.ctx.view().rows.get(i))
        .map(|row| row.region.clone());
    let heat = app.ctx.view().heat_points();
    let scale = price_colormap(app.ctx.view());
    let mode = app.view_mode;
    let span = (x_max - x_min).max(y_max - y_min);

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Mumbai Housing {} ", mode.name())),
        )
        .background_color(background)
        .marker(Marker::Braille)
        .x_bounds([x_min, x_max])
        .y_bounds([y_min, y_max])
        .paint(move |ctx| match mode {
            ViewMode::CircleMarkers => {
                for marker in &markers {
                    ctx.draw(&Circle {
                        x: marker.longitude,
                        y: marker.latitude,
                        radius: span / 120.0,
                        color: to_color(marker.color),
                    });
                }
                if let Some(region) = &highlighted {
                    if let Some(marker) = markers.iter().find(|m| &m.region == region) {
                        ctx.print(
                            marker.longitude,
                            marker.latitude,
                            Line::from(Span::styled(
                                format!(" {} · {}", marker.label, popup_line(marker.median_price)),
                                Style::default().fg(text).add_modifier(Modifier::BOLD),
                            )),
                        );
                    }
                }
            }
            ViewMode::Heatmap => {
                for &(lat, lon, price) in &heat {
                    // Hotter regions spread wider
                    let reach = span / 200.0 * (1.0 + 3.0 * scale.position(price));
                    let cloud: Vec<(f64, f64)> = (-2..=2)
                        .flat_map(|i| (-2..=2).map(move |j| (i, j)))
                        .map(|(i, j)| (lon + f64::from(i) * reach / 2.0, lat + f64::from(j) * reach / 2.0))
                        .collect();
                    ctx.draw(&Points {
                        coords: &cloud,
                        color: to_color(scale.color_at(price)),
                    });
                }
            }
        });

    f.render_widget(canvas, area);
}

/// Longitude and latitude bounds around every mapped region
fn map_bounds(app: &App) -> ([f64; 2], [f64; 2]) {
    let rows = &app.ctx.view().rows;
    if rows.is_empty() {
        let (lat, lon) = mumbai_housing::MUMBAI_CENTER;
        return ([lon - 0.5, lon + 0.5], [lat - 0.5, lat + 0.5]);
    }

    let (mut lon_min, mut lon_max) = (f64::MAX, f64::MIN);
    let (mut lat_min, mut lat_max) = (f64::MAX, f64::MIN);
    for row in rows {
        lon_min = lon_min.min(row.longitude);
        lon_max = lon_max.max(row.longitude);
        lat_min = lat_min.min(row.latitude);
        lat_max = lat_max.max(row.latitude);
    }

    let pad = 0.05;
    ([lon_min - pad, lon_max + pad], [lat_min - pad, lat_max + pad])
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    let keys: &[(&str, &str)] = match app.current_page {
        Page::Predict => &[
            ("↑/↓", " Field | "),
            ("←/→", " Adjust | "),
            ("Enter", " Predict | "),
            ("r", " Reset | "),
        ],
        Page::Map => &[
            ("↑/↓", " Region | "),
            ("Space", " Select | "),
            ("c", " Clear | "),
            ("s", " Style | "),
            ("m", " Mode | "),
        ],
    };

    status_spans.push(Span::raw(" "));
    for (key, action) in keys {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*action));
    }
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Page | "));
    status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mumbai_housing::{
        AgeCategory, CoordRow, CoordsTable, FeatureSchema, FeatureVector, LinearModel, ListingRow, ListingsTable,
        ModelArtifact, PredictError, PricePredictor, RegionCatalog,
    };

    struct RejectingModel(Vec<String>);

    impl PricePredictor for RejectingModel {
        fn predict(&self, _batch: &[FeatureVector]) -> Result<Vec<f64>, PredictError> {
            Err(PredictError::NonFinite)
        }

        fn input_features(&self) -> &[String] {
            &self.0
        }
    }

    fn app() -> App {
        let schema = FeatureSchema::new(RegionCatalog::new(["worli", "powai"]));
        let model = LinearModel::from_artifact(ModelArtifact {
            feature_names: schema.names().to_vec(),
            coefficients: vec![10.0, 0.01, 1.0, 50.0, 90.0, 0.0],
            intercept: 0.0,
            units: "Lakhs".to_string(),
        })
        .unwrap();
        let listings = ListingsTable {
            rows: vec![ListingRow { region: "powai".to_string(), price_per_sqft: Some(21000.0) }],
        };
        let coords = CoordsTable {
            rows: vec![
                CoordRow { region: "powai".to_string(), label: "Powai".to_string(), latitude: 19.11, longitude: 72.90 },
                CoordRow { region: "worli".to_string(), label: "Worli".to_string(), latitude: 19.01, longitude: 72.81 },
            ],
        };

        App::new(AppContext::from_parts(schema, Box::new(model), &listings, &coords).unwrap())
    }

    #[test]
    fn test_form_values_stay_in_bounds() {
        let mut app = app();

        app.focus = FormField::Bhk;
        app.adjust(10);
        assert_eq!(app.form.bhk, 3);
        app.adjust(-10);
        assert_eq!(app.form.bhk, 1);

        app.focus = FormField::Area;
        app.adjust(-100);
        assert_eq!(app.form.area, 100.0);
        app.adjust(1);
        assert_eq!(app.form.area, 150.0);
    }

    #[test]
    fn test_region_picker_starts_not_sure_and_wraps() {
        let mut app = app();
        app.focus = FormField::Region;

        assert_eq!(app.region_label(), NOT_SURE);
        assert_eq!(app.form.region, None);

        app.adjust(1);
        assert_eq!(app.form.region.as_deref(), Some("other"));
        app.adjust(-2);
        assert_eq!(app.form.region.as_deref(), Some("worli"));
    }

    #[test]
    fn test_submit_shows_estimate() {
        let mut app = app();
        app.focus = FormField::Age;
        app.adjust(1);
        assert_eq!(app.form.age, AgeCategory::Resale);

        app.submit();
        let prediction = app.result.clone().unwrap().unwrap();
        // 10 * 1 + 0.01 * 1000 + 2
        assert_eq!(prediction.price, 22.0);
    }

    #[test]
    fn test_submit_failure_is_shown_in_form() {
        let schema = FeatureSchema::new(RegionCatalog::new(["worli", "powai"]));
        let model = RejectingModel(schema.names().to_vec());
        let ctx = AppContext::from_parts(
            schema,
            Box::new(model),
            &ListingsTable::default(),
            &CoordsTable::default(),
        )
        .unwrap();
        let mut app = App::new(ctx);

        app.submit();

        assert_eq!(
            app.result,
            Some(Err("Prediction failed: model produced a non-finite estimate".to_string()))
        );
    }

    #[test]
    fn test_selection_mean_follows_toggles() {
        let mut app = app();
        assert_eq!(app.selection_mean(), None);

        app.toggle_region();
        assert_eq!(app.selection_mean(), Some(21000.0));
        assert_eq!(app.visible_markers().len(), 1);

        app.next_region();
        app.toggle_region();
        assert_eq!(app.selection_mean(), Some(21000.0));

        app.clear_selection();
        assert_eq!(app.visible_markers().len(), 2);
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Bandra Kurla Complex", 10), "Bandra ...");
        assert_eq!(truncate("Sion", 10), "Sion");
    }
}
