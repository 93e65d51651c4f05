//! Ratatui-based interactive calculator.
//!
//! Two panels, switched with Tab:
//! - Loan: price, down payment, term, rate and option toggles, with a summary
//!   and a balance/interest chart
//! - Estimate: property attributes with the valuation breakdown
//!
//! Every field change recomputes the panel's result synchronously and replaces
//! the previous one, so the display always reflects the latest inputs.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::app::pipeline::{EstimateRun, LoanRun, run_estimate, run_loan};
use crate::config::Settings;
use crate::domain::{Amenities, Condition, EstimationRequest, LoanRequest, PropertyType, Quote};
use crate::error::{AppError, CalcError};
use crate::report::{fmt_money, fmt_whole};

mod plotters_chart;

use plotters_chart::BalanceChart;

/// Slider bounds for the loan form.
const TERM_YEARS_MIN: u32 = 5;
const TERM_YEARS_MAX: u32 = 30;
const RATE_MIN: f64 = 0.1;
const RATE_MAX: f64 = 10.0;
const RATE_STEP: f64 = 0.05;
const AMOUNT_STEP: f64 = 5_000.0;
const AREA_STEP: f64 = 5.0;

const LOAN_FIELDS: usize = 6;
const ESTIMATE_FIELDS: usize = 7;
const CITY_FIELD: usize = 2;

/// Start the TUI with an initial loan request.
pub fn run(initial: LoanRequest, settings: Settings) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(initial, settings);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Panel {
    Loan,
    Estimate,
}

struct App {
    settings: Settings,
    panel: Panel,

    loan: LoanRequest,
    loan_field: usize,
    loan_run: Result<LoanRun, CalcError>,

    estimate: EstimationRequest,
    estimate_field: usize,
    estimate_run: Result<EstimateRun, CalcError>,

    editing_city: bool,
    city_input: String,
    status: String,
}

impl App {
    fn new(loan: LoanRequest, settings: Settings) -> Self {
        let estimate = default_estimation_request();
        let loan_run = run_loan(&loan);
        let estimate_run = run_estimate(&estimate, &settings.tables);
        Self {
            settings,
            panel: Panel::Loan,
            loan,
            loan_field: 0,
            loan_run,
            estimate,
            estimate_field: 0,
            estimate_run,
            editing_city: false,
            city_input: String::new(),
            status: "Ready.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))? {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the user asked to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing_city {
            self.handle_city_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.panel = match self.panel {
                    Panel::Loan => Panel::Estimate,
                    Panel::Estimate => Panel::Loan,
                };
                self.status = String::new();
            }
            KeyCode::Up => {
                let field = self.selected_field_mut();
                *field = field.saturating_sub(1);
            }
            KeyCode::Down => {
                let max = self.field_count() - 1;
                let field = self.selected_field_mut();
                *field = (*field + 1).min(max);
            }
            KeyCode::Left => self.adjust_field(-1),
            KeyCode::Right => self.adjust_field(1),
            KeyCode::Char(' ') => self.adjust_field(0),
            KeyCode::Enter => {
                if self.panel == Panel::Estimate && self.estimate_field == CITY_FIELD {
                    self.editing_city = true;
                    self.city_input = self.estimate.city.clone();
                    self.status = "Editing city. Enter to apply, Esc to cancel.".to_string();
                }
            }
            KeyCode::Char('s') => self.save_quote(),
            _ => {}
        }

        false
    }

    fn handle_city_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => {
                self.editing_city = false;
                self.status = "City edit canceled.".to_string();
            }
            KeyCode::Enter => {
                self.editing_city = false;
                self.estimate.city = self.city_input.trim().to_string();
                self.recompute();
            }
            KeyCode::Backspace => {
                self.city_input.pop();
            }
            KeyCode::Char(c) => {
                self.city_input.push(c);
            }
            _ => {}
        }
    }

    fn field_count(&self) -> usize {
        match self.panel {
            Panel::Loan => LOAN_FIELDS,
            Panel::Estimate => ESTIMATE_FIELDS,
        }
    }

    fn selected_field_mut(&mut self) -> &mut usize {
        match self.panel {
            Panel::Loan => &mut self.loan_field,
            Panel::Estimate => &mut self.estimate_field,
        }
    }

    /// Step the selected field. `delta = 0` toggles booleans only.
    fn adjust_field(&mut self, delta: i32) {
        let step = delta.signum() as f64;
        match self.panel {
            Panel::Loan => {
                let req = &mut self.loan;
                match self.loan_field {
                    0 => req.property_price = (req.property_price + step * AMOUNT_STEP).max(AMOUNT_STEP),
                    1 => req.down_payment = (req.down_payment + step * AMOUNT_STEP).max(0.0),
                    2 => {
                        let years = req.loan_term_years as i64 + delta.signum() as i64;
                        req.loan_term_years =
                            years.clamp(TERM_YEARS_MIN as i64, TERM_YEARS_MAX as i64) as u32;
                    }
                    3 => {
                        let rate = req.annual_rate_percent + step * RATE_STEP;
                        // Snap to the step grid so repeated steps don't drift.
                        req.annual_rate_percent =
                            ((rate / RATE_STEP).round() * RATE_STEP).clamp(RATE_MIN, RATE_MAX);
                    }
                    4 => req.include_insurance = !req.include_insurance,
                    5 => req.include_notary_fees = !req.include_notary_fees,
                    _ => {}
                }
            }
            Panel::Estimate => {
                let req = &mut self.estimate;
                match self.estimate_field {
                    0 => req.property_type = cycle(&PropertyType::ALL, req.property_type, delta),
                    1 => req.area_sqm = (req.area_sqm + step * AREA_STEP).max(0.0),
                    2 => {}
                    3 => req.condition = cycle(&Condition::ALL, req.condition, delta),
                    4 => req.amenities.parking = !req.amenities.parking,
                    5 => req.amenities.balcony = !req.amenities.balcony,
                    6 => req.amenities.elevator = !req.amenities.elevator,
                    _ => {}
                }
            }
        }
        self.recompute();
    }

    /// Replace the current panel's result with one computed from its latest inputs.
    fn recompute(&mut self) {
        match self.panel {
            Panel::Loan => {
                self.loan_run = run_loan(&self.loan);
                self.status = match &self.loan_run {
                    Ok(_) => String::new(),
                    Err(err) => err.to_string(),
                };
            }
            Panel::Estimate => {
                self.estimate_run = run_estimate(&self.estimate, &self.settings.tables);
                self.status = match &self.estimate_run {
                    Ok(_) => String::new(),
                    Err(err) => err.to_string(),
                };
            }
        }
    }

    fn save_quote(&mut self) {
        let (kind, quote) = match self.panel {
            Panel::Loan => match &self.loan_run {
                Ok(run) => (
                    "loan",
                    Quote::Loan {
                        request: run.request,
                        result: *run.simulation(),
                    },
                ),
                Err(_) => {
                    self.status = "Nothing to save: fix the inputs first.".to_string();
                    return;
                }
            },
            Panel::Estimate => match &self.estimate_run {
                Ok(run) => (
                    "estimate",
                    Quote::Estimate {
                        request: run.request.clone(),
                        result: run.result,
                    },
                ),
                Err(_) => {
                    self.status = "Nothing to save: fix the inputs first.".to_string();
                    return;
                }
            },
        };

        let path = PathBuf::from(format!(
            "immo_quote_{kind}_{}.json",
            Local::now().format("%Y%m%d_%H%M%S")
        ));
        let file = crate::io::new_quote_file(quote, &self.settings.currency);
        self.status = match crate::io::write_quote_json(&path, &file) {
            Ok(()) => format!("Saved quote: {}", path.display()),
            Err(err) => format!("Save failed: {err}"),
        };
    }

    fn draw(&self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.panel {
            Panel::Loan => self.draw_loan(frame, chunks[1]),
            Panel::Estimate => self.draw_estimate(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let tab = |label: &'static str, active: bool| {
            if active {
                Span::styled(
                    format!(" {label} "),
                    Style::default().fg(Color::Black).bg(Color::Cyan),
                )
            } else {
                Span::styled(format!(" {label} "), Style::default().fg(Color::Gray))
            }
        };
        let line = Line::from(vec![
            Span::styled("immo", Style::default().fg(Color::Cyan)),
            Span::raw("  "),
            tab("Loan", self.panel == Panel::Loan),
            Span::raw(" "),
            tab("Estimate", self.panel == Panel::Estimate),
            Span::styled(
                format!("  amounts in {}", self.settings.currency),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_loan(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(LOAN_FIELDS as u16 + 2), Constraint::Min(0)])
            .split(cols[0]);

        let currency = &self.settings.currency;
        let req = &self.loan;
        let items = vec![
            format!("Price      : {}", fmt_whole(req.property_price, currency)),
            format!("Down       : {}", fmt_whole(req.down_payment, currency)),
            format!("Term       : {} years", req.loan_term_years),
            format!("Rate       : {:.2}%", req.annual_rate_percent),
            format!("Insurance  : {}", on_off(req.include_insurance)),
            format!("Notary fees: {}", on_off(req.include_notary_fees)),
        ];
        self.draw_form(frame, left[0], "Loan", items, self.loan_field);

        let summary = match &self.loan_run {
            Ok(run) => {
                let sim = run.simulation();
                let mut lines = vec![
                    kv("Loan amount", fmt_money(sim.loan_amount, currency)),
                    kv("Monthly (P&I)", fmt_money(sim.monthly_payment, currency)),
                ];
                if req.include_insurance {
                    lines.push(kv("Insurance/mo", fmt_money(sim.insurance_monthly_cost, currency)));
                }
                lines.push(kv("Total monthly", fmt_money(sim.total_monthly_payment, currency)));
                lines.push(kv("Total interest", fmt_money(sim.total_interest, currency)));
                if req.include_notary_fees {
                    lines.push(kv("Notary fees", fmt_money(sim.notary_fees, currency)));
                }
                lines.push(kv("Total cost", fmt_money(sim.total_cost, currency)));
                Text::from(lines)
            }
            Err(err) => error_text(err),
        };
        let p = Paragraph::new(summary).block(Block::default().title("Result").borders(Borders::ALL));
        frame.render_widget(p, left[1]);

        self.draw_chart(frame, cols[1]);
    }

    fn draw_chart(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("Balance (cyan) / cumulative interest (amber)")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Clear, inner);

        let Ok(run) = &self.loan_run else {
            let msg = Paragraph::new("No schedule for the current inputs.")
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(msg, inner);
            return;
        };

        let balance = run.schedule.balance_curve();
        let interest = run.schedule.cumulative_interest_curve();
        let (x_bounds, y_bounds) = chart_bounds(&balance, &interest);

        let widget = BalanceChart {
            balance: &balance,
            interest: &interest,
            x_bounds,
            y_bounds,
            x_label: "years",
            y_label: self.settings.currency.clone(),
            fmt_x: fmt_axis_years,
            fmt_y: fmt_axis_amount,
        };
        frame.render_widget(widget, inner);
    }

    fn draw_estimate(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(38), Constraint::Min(0)])
            .split(area);

        let req = &self.estimate;
        let city = if self.editing_city {
            format!("{}_", self.city_input)
        } else if req.city.is_empty() {
            "-".to_string()
        } else {
            req.city.clone()
        };
        let items = vec![
            format!("Type      : {}", req.property_type.display_name()),
            format!("Area      : {:.0} m²", req.area_sqm),
            format!("City      : {city}"),
            format!("Condition : {}", req.condition.display_name()),
            format!("Parking   : {}", on_off(req.amenities.parking)),
            format!("Balcony   : {}", on_off(req.amenities.balcony)),
            format!("Elevator  : {}", on_off(req.amenities.elevator)),
        ];
        self.draw_form(frame, cols[0], "Property", items, self.estimate_field);

        let currency = &self.settings.currency;
        let text = match &self.estimate_run {
            Ok(run) => {
                let res = &run.result;
                Text::from(vec![
                    kv("Estimated price", fmt_whole(res.estimated_price, currency)),
                    kv("Price per m²", fmt_whole(res.price_per_sqm, currency)),
                    kv("Low", fmt_whole(res.min_price, currency)),
                    kv("High", fmt_whole(res.max_price, currency)),
                    kv(
                        "Confidence",
                        format!(
                            "{}% ({} comparables)",
                            res.confidence_level, res.comparable_properties_count
                        ),
                    ),
                    Line::raw(""),
                    kv("Base price/m²", fmt_whole(res.base_price_per_sqm, currency)),
                    kv("Location", format!("x{:.2}", res.location_multiplier)),
                    kv("Condition", format!("x{:.2}", res.condition_multiplier)),
                    kv("Amenities", fmt_whole(res.amenities_bonus, currency)),
                    Line::raw(""),
                    Line::from(Span::styled(
                        "Indicative estimate only; not an appraisal.",
                        Style::default().fg(Color::Gray),
                    )),
                ])
            }
            Err(err) => error_text(err),
        };
        let p = Paragraph::new(text).block(Block::default().title("Estimate").borders(Borders::ALL));
        frame.render_widget(p, cols[1]);
    }

    fn draw_form(
        &self,
        frame: &mut ratatui::Frame<'_>,
        area: Rect,
        title: &str,
        items: Vec<String>,
        selected: usize,
    ) {
        let items: Vec<ListItem> = items.into_iter().map(ListItem::new).collect();
        let list = List::new(items)
            .block(Block::default().title(title.to_string()).borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ListState::default();
        state.select(Some(selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.panel {
            Panel::Loan => "Tab panel  ↑/↓ select  ←/→ adjust  Space toggle  s save  q quit",
            Panel::Estimate => "Tab panel  ↑/↓ select  ←/→ adjust  Enter edit city  s save  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(
                &self.status,
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn default_estimation_request() -> EstimationRequest {
    EstimationRequest {
        address: String::new(),
        city: "Paris".to_string(),
        postal_code: String::new(),
        property_type: PropertyType::Apartment,
        area_sqm: 75.0,
        rooms: 3,
        bedrooms: 2,
        floor: None,
        construction_year: None,
        condition: Condition::Good,
        amenities: Amenities::default(),
    }
}

/// Step through `values` from `current`, wrapping around.
fn cycle<T: Copy + PartialEq>(values: &[T], current: T, delta: i32) -> T {
    let n = values.len() as i32;
    let idx = values.iter().position(|v| *v == current).unwrap_or(0) as i32;
    let step = if delta < 0 { -1 } else { 1 };
    values[(idx + step).rem_euclid(n) as usize]
}

fn on_off(v: bool) -> &'static str {
    if v { "on" } else { "off" }
}

fn kv(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<16}"), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn error_text(err: &CalcError) -> Text<'static> {
    Text::from(vec![
        Line::from(Span::styled(
            "Input rejected",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::raw(err.to_string()),
    ])
}

fn chart_bounds(balance: &[(f64, f64)], interest: &[(f64, f64)]) -> ([f64; 2], [f64; 2]) {
    let x_max = balance.last().map(|&(t, _)| t).unwrap_or(1.0);
    let y_max = balance
        .iter()
        .chain(interest.iter())
        .map(|&(_, y)| y)
        .fold(0.0_f64, f64::max);
    let x_bounds = if x_max > 0.0 { [0.0, x_max] } else { [0.0, 1.0] };
    let y_bounds = if y_max > 0.0 { [0.0, y_max * 1.05] } else { [0.0, 1.0] };
    (x_bounds, y_bounds)
}

fn fmt_axis_years(v: f64) -> String {
    format!("{v:.0}")
}

fn fmt_axis_amount(v: f64) -> String {
    if v.abs() >= 1_000_000.0 {
        format!("{:.1}M", v / 1_000_000.0)
    } else if v.abs() >= 1_000.0 {
        format!("{:.0}k", v / 1_000.0)
    } else {
        format!("{v:.0}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let loan = LoanRequest {
            property_price: 300_000.0,
            down_payment: 60_000.0,
            loan_term_years: 20,
            annual_rate_percent: 3.5,
            include_insurance: false,
            include_notary_fees: false,
        };
        App::new(loan, Settings::default())
    }

    #[test]
    fn adjustments_recompute_immediately() {
        let mut app = app();
        let before = app.loan_run.as_ref().unwrap().simulation().monthly_payment;

        app.loan_field = 1;
        app.handle_key(KeyCode::Right);
        assert_eq!(app.loan.down_payment, 65_000.0);
        let after = app.loan_run.as_ref().unwrap().simulation().monthly_payment;
        assert!(after < before);
    }

    #[test]
    fn invalid_inputs_replace_stale_result() {
        let mut app = app();
        app.loan_field = 1;
        app.loan.down_payment = 295_000.0;
        app.handle_key(KeyCode::Right);
        assert!(app.loan_run.is_err());
        assert!(app.status.contains("down_payment"));

        app.handle_key(KeyCode::Left);
        app.handle_key(KeyCode::Left);
        assert!(app.loan_run.is_ok());
        assert!(app.status.is_empty());
    }

    #[test]
    fn sliders_respect_bounds() {
        let mut app = app();
        app.loan_field = 2;
        for _ in 0..40 {
            app.handle_key(KeyCode::Right);
        }
        assert_eq!(app.loan.loan_term_years, TERM_YEARS_MAX);

        app.loan_field = 3;
        for _ in 0..400 {
            app.handle_key(KeyCode::Left);
        }
        assert_eq!(app.loan.annual_rate_percent, RATE_MIN);
    }

    #[test]
    fn city_edit_updates_estimate() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        assert_eq!(app.panel, Panel::Estimate);
        let paris = app.estimate_run.as_ref().unwrap().result.estimated_price;

        app.estimate_field = CITY_FIELD;
        app.handle_key(KeyCode::Enter);
        assert!(app.editing_city);
        for _ in 0..5 {
            app.handle_key(KeyCode::Backspace);
        }
        for c in "Lyon".chars() {
            app.handle_key(KeyCode::Char(c));
        }
        app.handle_key(KeyCode::Enter);

        assert_eq!(app.estimate.city, "Lyon");
        let lyon = app.estimate_run.as_ref().unwrap().result.estimated_price;
        assert!(lyon < paris);
    }

    #[test]
    fn q_while_editing_is_text() {
        let mut app = app();
        app.handle_key(KeyCode::Tab);
        app.estimate_field = CITY_FIELD;
        app.handle_key(KeyCode::Enter);
        assert!(!app.handle_key(KeyCode::Char('q')));
        assert!(app.city_input.ends_with('q'));
        assert!(!app.handle_key(KeyCode::Esc));
        assert!(!app.editing_city);
        assert!(app.handle_key(KeyCode::Char('q')));
    }

    #[test]
    fn cycle_wraps_both_ways() {
        assert_eq!(cycle(&PropertyType::ALL, PropertyType::Office, 1), PropertyType::Apartment);
        assert_eq!(cycle(&PropertyType::ALL, PropertyType::Apartment, -1), PropertyType::Office);
        assert_eq!(cycle(&Condition::ALL, Condition::Good, 1), Condition::Average);
    }

    #[test]
    fn axis_labels_are_compact() {
        assert_eq!(fmt_axis_amount(250_000.0), "250k");
        assert_eq!(fmt_axis_amount(1_500_000.0), "1.5M");
        assert_eq!(fmt_axis_amount(500.0), "500");
    }
}
