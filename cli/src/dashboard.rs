use std::{io, time::Duration};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Bar, BarChart, BarGroup, Block, Borders, BorderType, Paragraph, Gauge, Padding},
};
use chrono::{Datelike, Weekday};
use spendboard_core::{
    generate_daily_spending_monthly, generate_monthly_spending, masked_number, summarize, Category,
    DailySpendingEntry, MonthlySpending, PeriodSummary,
};

// --- THEME ---
struct Theme {
    primary: Color,
    muted: Color,
    text: Color,
    weekday: Color,
    weekend: Color,
    over: Color,
}

const THEME: Theme = Theme {
    primary: Color::Cyan,
    muted: Color::DarkGray,
    text: Color::White,
    weekday: Color::Blue,
    weekend: Color::Green,
    over: Color::Red,
};

fn category_color(category: Category) -> Color {
    match category {
        Category::Food => Color::Yellow,
        Category::Transport => Color::Blue,
        Category::Entertainment => Color::Magenta,
        Category::Utilities => Color::Green,
    }
}

pub struct DashboardApp {
    pub card_number: String,
    pub year: i32,
    pub month: u32, // zero-based
    pub monthly: MonthlySpending,
    pub entries: Vec<DailySpendingEntry>,
    pub summary: PeriodSummary,
}

impl DashboardApp {
    pub fn new(card_number: &str, year: i32, month: u32) -> Self {
        let monthly = generate_monthly_spending(card_number);
        let mut app = Self {
            card_number: card_number.to_string(),
            year,
            month,
            monthly,
            entries: Vec::new(),
            summary: summarize(&[]),
        };
        app.reload();
        app
    }

    fn reload(&mut self) {
        self.entries = generate_daily_spending_monthly(&self.card_number, self.year, self.month);
        self.summary = summarize(&self.entries);
    }

    pub fn next_month(&mut self) {
        if self.month == 11 {
            self.year += 1;
            self.month = 0;
        } else {
            self.month += 1;
        }
        self.reload();
    }

    pub fn previous_month(&mut self) {
        if self.month == 0 {
            self.year -= 1;
            self.month = 11;
        } else {
            self.month -= 1;
        }
        self.reload();
    }

    /// Generated month total relative to the card's monthly figure.
    pub fn budget_ratio(&self) -> f64 {
        if self.monthly.total > 0 {
            self.summary.total as f64 / self.monthly.total as f64
        } else {
            0.0
        }
    }

    fn title(&self) -> String {
        format!(" {:04}-{:02} ", self.year, self.month + 1)
    }
}

pub fn run(card_number: &str, year: i32, month: u32) -> Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = DashboardApp::new(card_number, year, month);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal before reporting any loop error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut DashboardApp) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code) == Flow::Quit {
                    return Ok(());
                }
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

fn handle_key(app: &mut DashboardApp, code: KeyCode) -> Flow {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
        KeyCode::Left | KeyCode::Char('h') => app.previous_month(),
        KeyCode::Right | KeyCode::Char('l') => app.next_month(),
        _ => {}
    }
    Flow::Continue
}

fn ui(frame: &mut Frame, app: &DashboardApp) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Chart + side panel
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    // --- Header ---
    let header_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(30),
            Constraint::Min(1),
            Constraint::Length(20),
        ])
        .split(main_layout[0]);

    let app_title = Paragraph::new(Line::from(vec![
        Span::styled("SPENDBOARD ", Style::default().fg(THEME.primary).add_modifier(Modifier::BOLD)),
        Span::styled(masked_number(&app.card_number), Style::default().fg(THEME.muted)),
    ]))
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(app_title, header_layout[0]);

    let nav = Paragraph::new(Line::from(vec![
        Span::styled(" < ", Style::default().fg(THEME.text)),
        Span::styled(app.title(), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        Span::styled(" > ", Style::default().fg(THEME.text)),
    ]))
    .alignment(Alignment::Right)
    .block(Block::default().padding(Padding::new(0, 0, 1, 0)));
    frame.render_widget(nav, header_layout[2]);

    frame.render_widget(
        Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(THEME.muted)),
        main_layout[0],
    );

    // --- Content ---
    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(72),
            Constraint::Length(1),
            Constraint::Percentage(28),
        ])
        .split(main_layout[1]);

    draw_chart(frame, app, content_chunks[0]);
    draw_side_panel(frame, app, content_chunks[2]);

    // --- Footer ---
    let help = Line::from(vec![
        Span::styled("MONTH: ", Style::default().fg(THEME.muted)),
        Span::styled("←/→ ", Style::default().fg(THEME.text)),
        Span::raw("  "),
        Span::styled("QUIT: ", Style::default().fg(THEME.muted)),
        Span::styled("q", Style::default().fg(THEME.text)),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), main_layout[2]);
}

fn draw_chart(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let bar_items: Vec<Bar> = app
        .entries
        .iter()
        .map(|entry| {
            let color = match entry.date.weekday() {
                Weekday::Sat | Weekday::Sun => THEME.weekend,
                _ => THEME.weekday,
            };
            Bar::default()
                .label(format!("{}", entry.date.day()))
                .value(entry.total.max(0) as u64)
                .style(Style::default().fg(color))
                .text_value(String::new())
        })
        .collect();

    let chart_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(THEME.muted))
        .title(" Daily Spending ");

    let chart = BarChart::default()
        .block(chart_block)
        .bar_width(2)
        .bar_gap(1)
        .data(BarGroup::default().bars(&bar_items));

    frame.render_widget(chart, area);
}

fn draw_side_panel(frame: &mut Frame, app: &DashboardApp, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(12), // Categories
            Constraint::Min(3),     // Budget gauge
        ])
        .split(area);

    let summary = &app.summary;
    let mut lines = vec![
        Line::from(vec![Span::styled("Overview", Style::default().add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Total:   ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{}", summary.total), Style::default().fg(THEME.text).add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::styled("Average: ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{:.0}/day", summary.average), Style::default().fg(THEME.text)),
        ]),
    ];
    if let Some(peak) = &summary.peak {
        lines.push(Line::from(vec![
            Span::styled("Peak:    ", Style::default().fg(THEME.muted)),
            Span::styled(format!("{} ({})", peak.total, peak.date.format("%b %d")), Style::default().fg(THEME.text)),
        ]));
    }
    lines.push(Line::from(""));
    for (category, amount) in summary.categories.iter() {
        lines.push(Line::from(vec![
            Span::styled(format!("{:<14}", category.label()), Style::default().fg(THEME.muted)),
            Span::styled(
                format!("{:>7} {:>3}%", amount, app.monthly.percentages.get(category)),
                Style::default().fg(category_color(category)).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    let info = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(THEME.muted))
            .title(" Summary "),
    );
    frame.render_widget(info, chunks[0]);

    let ratio = app.budget_ratio();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .title(" vs Monthly Figure ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(THEME.muted)),
        )
        .gauge_style(Style::default().fg(if ratio > 1.0 { THEME.over } else { THEME.weekend }))
        .ratio(ratio.clamp(0.0, 1.0))
        .label(format!("{:.0}% of {}", ratio * 100.0, app.monthly.total));
    frame.render_widget(gauge, chunks[1]);
}
