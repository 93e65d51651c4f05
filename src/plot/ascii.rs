//! ASCII plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - outstanding balance: `-` line
//! - cumulative interest paid: `.` line (optional)
//! - year markers on the bottom axis: `|` every 5 years

/// Render the outstanding balance over time.
///
/// `balance` and `interest` are `(years elapsed, amount)` series as produced by
/// `AmortizationSchedule::balance_curve` / `cumulative_interest_curve`.
pub fn render_balance_plot(
    balance: &[(f64, f64)],
    interest: Option<&[(f64, f64)]>,
    width: usize,
    height: usize,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (t_min, t_max) = x_range(balance).unwrap_or((0.0, 1.0));
    let (y_min, y_max) = y_range(balance, interest).unwrap_or((0.0, 1.0));

    let mut grid = vec![vec![' '; width]; height];

    // Only blank cells are written: balance goes first so it stays visible where the lines cross.
    draw_curve(&mut grid, balance, t_min, t_max, y_min, y_max, '-');
    if let Some(interest) = interest {
        draw_curve(&mut grid, interest, t_min, t_max, y_min, y_max, '.');
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: years=[{t_min:.0}, {t_max:.0}] | amount=[{y_min:.0}, {y_max:.0}]\n"
    ));
    for row in grid {
        out.push_str(row.into_iter().collect::<String>().trim_end());
        out.push('\n');
    }
    out.push_str(&year_axis(t_min, t_max, width));
    out.push('\n');

    out
}

fn year_axis(t_min: f64, t_max: f64, width: usize) -> String {
    let mut axis = vec!['_'; width];
    let mut year = (t_min / 5.0).ceil() * 5.0;
    while year <= t_max {
        axis[map_x(year, t_min, t_max, width)] = '|';
        year += 5.0;
    }
    axis.into_iter().collect()
}

fn x_range(series: &[(f64, f64)]) -> Option<(f64, f64)> {
    let mut min_t = f64::INFINITY;
    let mut max_t = f64::NEG_INFINITY;
    for &(t, _) in series {
        min_t = min_t.min(t);
        max_t = max_t.max(t);
    }
    if min_t.is_finite() && max_t.is_finite() && max_t > min_t {
        Some((min_t, max_t))
    } else {
        None
    }
}

fn y_range(balance: &[(f64, f64)], interest: Option<&[(f64, f64)]>) -> Option<(f64, f64)> {
    // Amounts are non-negative; anchor the axis at zero.
    let mut max_y = f64::NEG_INFINITY;
    for &(_, y) in balance.iter().chain(interest.unwrap_or(&[]).iter()) {
        max_y = max_y.max(y);
    }
    if max_y.is_finite() && max_y > 0.0 {
        Some((0.0, max_y))
    } else {
        None
    }
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(
    grid: &mut [Vec<char>],
    curve: &[(f64, f64)],
    t_min: f64,
    t_max: f64,
    y_min: f64,
    y_max: f64,
    ch: char,
) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, ch);
        } else if grid[yy][x] == ' ' {
            grid[yy][x] = ch;
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}
