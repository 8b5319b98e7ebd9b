use crate::dashboard::{Dashboard, Headlines, Metric};
use crate::dataset::IncomeRecord;
use crate::difference::DifferenceRecord;
use crate::format::format_or;
use crate::theme::ColorTheme;
use crate::{DATA_SOURCE, GINI_ABOUT, PLACEHOLDER};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};
use std::collections::HashMap;
use std::io;

const BAR_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Ranking,
    Differences,
}

impl Focus {
    pub fn toggle(&self) -> Self {
        match self {
            Focus::Ranking => Focus::Differences,
            Focus::Differences => Focus::Ranking,
        }
    }
}

pub struct App<'a> {
    dashboard: &'a Dashboard,
    pub year_index: usize,
    pub theme: ColorTheme,
    pub focus: Focus,
    pub ranked: Vec<IncomeRecord>,
    pub differences: Vec<DifferenceRecord>,
    pub headlines: Headlines,
    pub max_index: f64,
    pub ranking_state: TableState,
    pub differences_state: TableState,
    /// First country column shown in the heatmap
    pub heatmap_offset: usize,
    countries: Vec<String>,
    heat: HashMap<(i32, String), f64>,
    heat_max: f64,
}

impl<'a> App<'a> {
    pub fn new(dashboard: &'a Dashboard, year: i32, theme: ColorTheme) -> Self {
        let table = dashboard.table();
        let year_index = dashboard
            .years()
            .iter()
            .position(|y| *y == year)
            .unwrap_or(0);

        // Heatmap cells keep the max per (year, country), as the Vega-Lite heatmap does
        let mut heat: HashMap<(i32, String), f64> = HashMap::new();
        for r in table {
            let cell = heat.entry((r.year, r.country.clone())).or_insert(r.gini_index);
            if r.gini_index > *cell {
                *cell = r.gini_index;
            }
        }

        let mut countries = table.countries();
        countries.sort();

        let mut app = Self {
            dashboard,
            year_index,
            theme,
            focus: Focus::Ranking,
            ranked: Vec::new(),
            differences: Vec::new(),
            headlines: Headlines::from_differences(&[]),
            max_index: 0.0,
            ranking_state: TableState::default(),
            differences_state: TableState::default(),
            heatmap_offset: 0,
            countries,
            heat,
            heat_max: table.max_index().unwrap_or(0.0),
        };
        app.refresh();
        app
    }

    pub fn selected_year(&self) -> Option<i32> {
        self.dashboard.years().get(self.year_index).copied()
    }

    /// Recompute everything derived from the current year
    pub fn refresh(&mut self) {
        let Some(year) = self.selected_year() else {
            return;
        };

        self.ranked = self.dashboard.ranked(year);
        self.differences = self.dashboard.differences(year);
        self.headlines = Headlines::from_differences(&self.differences);
        self.max_index = crate::max_gini(&self.ranked).unwrap_or(0.0);

        self.ranking_state
            .select(if self.ranked.is_empty() { None } else { Some(0) });
        self.differences_state
            .select(if self.differences.is_empty() { None } else { Some(0) });
    }

    /// Years are listed latest first, so "older" moves down the list
    pub fn older_year(&mut self) {
        if self.year_index + 1 < self.dashboard.years().len() {
            self.year_index += 1;
            self.refresh();
        }
    }

    pub fn newer_year(&mut self) {
        if self.year_index > 0 {
            self.year_index -= 1;
            self.refresh();
        }
    }

    pub fn next_theme(&mut self) {
        self.theme = self.theme.next();
    }

    pub fn previous_theme(&mut self) {
        self.theme = self.theme.previous();
    }

    pub fn scroll_heatmap(&mut self, delta: isize) {
        let max = self.countries.len().saturating_sub(1);
        self.heatmap_offset = self.heatmap_offset.saturating_add_signed(delta).min(max);
    }

    fn focused(&mut self) -> (&mut TableState, usize) {
        match self.focus {
            Focus::Ranking => (&mut self.ranking_state, self.ranked.len()),
            Focus::Differences => (&mut self.differences_state, self.differences.len()),
        }
    }

    pub fn next(&mut self) {
        let (state, len) = self.focused();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let (state, len) = self.focused();
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        state.select(Some(i));
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Dashboard loop failed: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.focus = app.focus.toggle(),
                KeyCode::Left | KeyCode::Char('h') => app.older_year(),
                KeyCode::Right | KeyCode::Char('l') => app.newer_year(),
                KeyCode::Char('t') => app.next_theme(),
                KeyCode::Char('T') => app.previous_theme(),
                KeyCode::Char('[') => app.scroll_heatmap(-10),
                KeyCode::Char(']') => app.scroll_heatmap(10),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                _ => {}
            }
        }
    }
}

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title, year, theme
            Constraint::Min(0),    // Three columns
            Constraint::Length(5), // About
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(19), // Gains/Losses
            Constraint::Percentage(56), // Distribution
            Constraint::Percentage(25), // Top Countries
        ])
        .split(chunks[1]);

    render_gains_losses(f, columns[0], app);
    render_heatmap(f, columns[1], app);
    render_ranking(f, columns[2], app);
    render_about(f, chunks[2]);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let year = app
        .selected_year()
        .map(|y| y.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    let (r, g, b) = app.theme.rgb_at(0.75);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "💸 Gini Index Dashboard",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  │  Year: "),
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(year, Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
        Span::raw("  │  Theme: "),
        Span::styled(app.theme.name(), Style::default().fg(Color::Rgb(r, g, b))),
        Span::styled(
            "   ←/→ year · t theme · [/] scroll map · Tab focus · q quit",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn metric_lines<'m>(title: &'m str, metric: &'m Metric) -> Vec<Line<'m>> {
    let delta_style = if metric.delta.starts_with('-') {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let arrow = match metric.delta.as_str() {
        "" => "",
        d if d.starts_with('-') => "▼ ",
        _ => "▲ ",
    };

    vec![
        Line::from(Span::styled(title, Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(
            metric.label.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            metric.value.as_str(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::styled(arrow, delta_style),
            Span::styled(metric.delta.as_str(), delta_style),
        ]),
        Line::from(""),
    ]
}

fn render_gains_losses(f: &mut Frame, area: Rect, app: &mut App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(12), Constraint::Min(0)])
        .split(area);

    let mut lines = metric_lines("Largest gain", &app.headlines.gain);
    lines.extend(metric_lines("Largest loss", &app.headlines.loss));

    let cards = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Gains/Losses "),
    );
    f.render_widget(cards, parts[0]);

    let rows: Vec<Row> = app
        .differences
        .iter()
        .map(|d| {
            let style = if d.is_gain() {
                Style::default().fg(Color::Green)
            } else if d.gini_difference < 0.0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(d.country.clone()),
                Cell::from(format_or(d.gini_difference, PLACEHOLDER)).style(style),
                Cell::from(format_or(d.gini_absolute_difference, PLACEHOLDER)),
            ])
        })
        .collect();

    let border = if app.focus == Focus::Differences {
        Color::Yellow
    } else {
        Color::White
    };

    let table = Table::new(
        rows,
        [Constraint::Min(8), Constraint::Length(6), Constraint::Length(6)],
    )
    .header(
        Row::new(vec!["Country", "Δ", "|Δ|"])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Changes ({}) ", app.differences.len())),
    )
    .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(table, parts[1], &mut app.differences_state);
}

fn render_heatmap(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Gini Index Distribution ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    // 4-digit year label + space, then one column per country
    let label_width = 5;
    let visible = (inner.width as usize).saturating_sub(label_width);
    let countries: Vec<&String> = app
        .countries
        .iter()
        .skip(app.heatmap_offset)
        .take(visible)
        .collect();

    let selected = app.selected_year();
    let mut lines: Vec<Line> = Vec::new();

    for year in app.dashboard.years().iter().take(inner.height.saturating_sub(2) as usize) {
        let label_style = if Some(*year) == selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut spans = vec![Span::styled(format!("{:<5}", year), label_style)];

        for country in &countries {
            let span = match app.heat.get(&(*year, (*country).clone())) {
                Some(value) => {
                    let t = if app.heat_max > 0.0 { value / app.heat_max } else { 0.0 };
                    let (r, g, b) = app.theme.rgb_at(t);
                    Span::styled("█", Style::default().fg(Color::Rgb(r, g, b)))
                }
                None => Span::raw(" "),
            };
            spans.push(span);
        }
        lines.push(Line::from(spans));
    }

    let first = countries.first().map(|c| c.as_str()).unwrap_or(PLACEHOLDER);
    let last = countries.last().map(|c| c.as_str()).unwrap_or(PLACEHOLDER);
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(
            "Countries {}-{} of {}: {} … {}",
            app.heatmap_offset + usize::from(!countries.is_empty()),
            app.heatmap_offset + countries.len(),
            app.countries.len(),
            first,
            last
        ),
        Style::default().fg(Color::DarkGray),
    )));

    f.render_widget(Paragraph::new(lines), inner);
}

fn progress_bar(value: f64, max: f64) -> String {
    let filled = if max > 0.0 && value.is_finite() {
        ((value / max) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize
    } else {
        0
    };
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn render_ranking(f: &mut Frame, area: Rect, app: &mut App) {
    let (r, g, b) = app.theme.rgb_at(0.8);
    let bar_style = Style::default().fg(Color::Rgb(r, g, b));

    let rows: Vec<Row> = app
        .ranked
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(record.country.clone()),
                Cell::from(format!("{:.2}", record.gini_index)),
                Cell::from(progress_bar(record.gini_index, app.max_index)).style(bar_style),
            ])
        })
        .collect();

    let border = if app.focus == Focus::Ranking {
        Color::Yellow
    } else {
        Color::White
    };

    let table = Table::new(
        rows,
        [
            Constraint::Min(10),
            Constraint::Length(6),
            Constraint::Length(BAR_WIDTH as u16),
        ],
    )
    .header(
        Row::new(vec!["Countries", "Gini", ""])
            .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Top Countries ({}) ", app.ranked.len())),
    )
    .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol("→ ");

    f.render_stateful_widget(table, area, &mut app.ranking_state);
}

fn render_about(f: &mut Frame, area: Rect) {
    let about = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Data: ", Style::default().fg(Color::Yellow)),
            Span::raw(DATA_SOURCE),
        ]),
        Line::from(vec![
            Span::styled("Gini Index: ", Style::default().fg(Color::Rgb(0xF3, 0x9C, 0x12))),
            Span::raw(GINI_ABOUT),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(" About "));

    f.render_widget(about, area);
}
