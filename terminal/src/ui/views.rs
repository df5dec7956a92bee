//! # Views
//!
//! One render function per page. Each takes normalized service types and
//! returns the finished text; nothing here talks to the backend.

use chrono::{DateTime, Utc};

use super::tables::{render_empty_state, render_key_values, render_stats_summary, render_table, Table};
use crate::app::navigation::MenuSource;
use crate::app::session::LocalUser;
use crate::services::api::{
    unlocked_count, Achievement, LeaderboardEntry, LeaderboardPeriod, MarketEvent, MarketStatus,
    NavItem, PerformancePoint, Portfolio, PricePoint, Settings, Stock, StockDetail, TimeRange,
    TradeResult, Transaction, WatchlistItem,
};
use crate::utils::format::{
    format_change, format_compact, format_currency, format_date, format_datetime, format_number,
    format_percentage, format_relative,
};
use shared::truncate_text;

const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

fn opt_currency(value: Option<f64>) -> String {
    value.map(format_currency).unwrap_or_else(|| "-".to_string())
}

/// One character per value, scaled between the series min and max.
pub fn sparkline(values: &[f64]) -> String {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = max - min;
    values
        .iter()
        .map(|v| {
            if span <= f64::EPSILON {
                SPARK_LEVELS[SPARK_LEVELS.len() / 2]
            } else {
                let idx = ((v - min) / span * (SPARK_LEVELS.len() - 1) as f64).round() as usize;
                SPARK_LEVELS[idx.min(SPARK_LEVELS.len() - 1)]
            }
        })
        .collect()
}

/// Evenly spaced samples so long histories fit on one line.
fn downsample(values: &[f64], max_points: usize) -> Vec<f64> {
    if values.len() <= max_points || max_points == 0 {
        return values.to_vec();
    }
    let step = values.len() as f64 / max_points as f64;
    (0..max_points)
        .map(|i| values[((i as f64 * step) as usize).min(values.len() - 1)])
        .collect()
}

pub fn render_market_status(status: &MarketStatus) -> String {
    if status.is_open {
        match status.next_close {
            Some(close) => format!("Market OPEN (closes {})", format_datetime(&close)),
            None => "Market OPEN".to_string(),
        }
    } else {
        match status.next_open {
            Some(open) => format!("Market CLOSED (opens {})", format_datetime(&open)),
            None => "Market CLOSED".to_string(),
        }
    }
}

pub fn render_market(stocks: &[Stock], status: Option<&MarketStatus>) -> String {
    let mut table = Table::new(&["Symbol", "Name", "Sector", "Price", "Change", "Change %", "Volume", "Mkt Cap"])
        .numeric(&[3, 4, 5, 6, 7]);
    for stock in stocks {
        table.row(vec![
            stock.symbol.clone(),
            truncate_text(&stock.name, 24),
            stock.sector.clone().unwrap_or_default(),
            format_currency(stock.price),
            format_change(stock.change),
            format_percentage(stock.change_percent),
            format_compact(stock.volume as f64),
            stock.market_cap.map(format_compact).unwrap_or_else(|| "-".to_string()),
        ]);
    }

    let mut out = String::new();
    if let Some(status) = status {
        out.push_str(&render_market_status(status));
        out.push_str("\n\n");
    }
    out.push_str(&render_table(&table, "No stocks match.", None));
    out
}

pub fn render_stock_detail(detail: &StockDetail, history: &[PricePoint], range: TimeRange) -> String {
    let quote = &detail.quote;
    let mut out = format!(
        "{} - {}\n{}  {} ({})\n\n",
        quote.symbol,
        quote.name,
        format_currency(quote.price),
        format_change(quote.change),
        format_percentage(quote.change_percent)
    );

    let mut pairs = vec![
        ("Open", opt_currency(detail.open)),
        ("High", opt_currency(detail.high)),
        ("Low", opt_currency(detail.low)),
        ("Prev close", opt_currency(detail.previous_close)),
        ("Volume", format_number(quote.volume as f64, 0)),
        ("Market cap", quote.market_cap.map(format_compact).unwrap_or_else(|| "-".to_string())),
        ("P/E", detail.pe_ratio.map(|pe| format!("{:.2}", pe)).unwrap_or_else(|| "-".to_string())),
        ("52w range", format!("{} - {}", opt_currency(detail.week52_low), opt_currency(detail.week52_high))),
    ];
    if let Some(sector) = &quote.sector {
        pairs.insert(0, ("Sector", sector.clone()));
    }
    out.push_str(&render_key_values(&pairs));

    if let Some(description) = &detail.description {
        out.push('\n');
        out.push_str(description);
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&render_history_summary(history, range));
    out
}

/// Sparkline plus first/last/min/max of a price series.
pub fn render_history_summary(history: &[PricePoint], range: TimeRange) -> String {
    let (Some(first), Some(last)) = (history.first(), history.last()) else {
        return render_empty_state(&format!("No price history for {}.", range), None);
    };

    let prices: Vec<f64> = history.iter().map(|p| p.price).collect();
    let low = prices.iter().cloned().fold(f64::INFINITY, f64::min);
    let high = prices.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let change = last.price - first.price;
    let change_pct = if first.price > 0.0 { change / first.price * 100.0 } else { 0.0 };

    format!(
        "{} history ({} to {})\n{}\n{}\n",
        range,
        format_date(&first.timestamp),
        format_date(&last.timestamp),
        sparkline(&downsample(&prices, 60)),
        render_stats_summary(&[
            ("Change", format!("{} ({})", format_change(change), format_percentage(change_pct))),
            ("Low", format_currency(low)),
            ("High", format_currency(high)),
        ])
    )
}

pub fn render_portfolio(portfolio: &Portfolio) -> String {
    let mut out = render_key_values(&[
        ("Cash", format_currency(portfolio.cash_balance)),
        ("Invested", format_currency(portfolio.invested_value)),
        ("Total value", format_currency(portfolio.total_value)),
        ("Unrealized P/L", format_change(portfolio.total_gain_loss)),
    ]);
    out.push('\n');

    let mut table = Table::new(&["Symbol", "Shares", "Avg Cost", "Price", "Value", "P/L", "P/L %"])
        .numeric(&[1, 2, 3, 4, 5, 6]);
    for position in &portfolio.positions {
        table.row(vec![
            position.symbol.clone(),
            format_number(position.shares as f64, 0),
            format_currency(position.average_cost),
            format_currency(position.current_price),
            format_currency(position.market_value),
            format_change(position.gain_loss),
            format_percentage(position.gain_loss_percent),
        ]);
    }
    out.push_str(&render_table(&table, "No positions yet.", Some("Buy something with `stocksim buy <SYMBOL> <SHARES>`.")));
    out
}

pub fn render_transactions(transactions: &[Transaction]) -> String {
    let mut table = Table::new(&["Date", "Side", "Symbol", "Shares", "Price", "Total"]).numeric(&[3, 4, 5]);
    for tx in transactions {
        table.row(vec![
            format_datetime(&tx.executed_at),
            tx.side.as_str().to_uppercase(),
            tx.symbol.clone(),
            format_number(tx.shares as f64, 0),
            format_currency(tx.price),
            format_currency(tx.total),
        ]);
    }
    render_table(&table, "No transactions yet.", None)
}

pub fn render_performance(points: &[PerformancePoint], range: TimeRange) -> String {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return render_empty_state(&format!("No performance data for {}.", range), None);
    };
    let values: Vec<f64> = points.iter().map(|p| p.value).collect();
    let change = last.value - first.value;
    let change_pct = if first.value > 0.0 { change / first.value * 100.0 } else { 0.0 };

    format!(
        "Portfolio value, {} ({} to {})\n{}\n{}\n",
        range,
        format_date(&first.date),
        format_date(&last.date),
        sparkline(&downsample(&values, 60)),
        render_stats_summary(&[
            ("Start", format_currency(first.value)),
            ("Now", format_currency(last.value)),
            ("Change", format!("{} ({})", format_change(change), format_percentage(change_pct))),
        ])
    )
}

pub fn render_watchlist(items: &[WatchlistItem]) -> String {
    let mut table = Table::new(&["Symbol", "Name", "Price", "Change %", "Added"]).numeric(&[2, 3]);
    for item in items {
        table.row(vec![
            item.symbol.clone(),
            item.name.as_deref().map(|n| truncate_text(n, 24)).unwrap_or_default(),
            opt_currency(item.price),
            item.change_percent.map(format_percentage).unwrap_or_else(|| "-".to_string()),
            item.added_at.as_ref().map(format_date).unwrap_or_default(),
        ]);
    }
    render_table(&table, "Your watchlist is empty.", Some("Add one with `stocksim watchlist add <SYMBOL>`."))
}

pub fn render_achievements(achievements: &[Achievement]) -> String {
    let (unlocked, total) = unlocked_count(achievements);
    let mut table = Table::new(&["", "Achievement", "Description", "Progress"]).numeric(&[3]);
    for achievement in achievements {
        let progress = match achievement.unlocked_at {
            Some(at) => format_date(&at),
            None if achievement.unlocked => "done".to_string(),
            None => format!("{:.0}%", achievement.completion_percent()),
        };
        table.row(vec![
            if achievement.unlocked { "[x]" } else { "[ ]" }.to_string(),
            achievement.name.clone(),
            truncate_text(&achievement.description, 48),
            progress,
        ]);
    }

    if table.is_empty() {
        return render_empty_state("No achievements available.", None);
    }
    format!(
        "{}\n\n{}",
        render_stats_summary(&[("Unlocked", format!("{}/{}", unlocked, total))]),
        table.render()
    )
}

pub fn render_events(events: &[MarketEvent], now: DateTime<Utc>) -> String {
    if events.is_empty() {
        return render_empty_state("No market news.", None);
    }
    let mut out = String::new();
    for event in events {
        let impact = event
            .impact
            .map(|i| format!(" {}", format_percentage(i)))
            .unwrap_or_default();
        out.push_str(&format!(
            "[{}] {} ({}{})\n",
            format_relative(&event.published_at, now),
            event.headline,
            event.sentiment,
            impact
        ));
        if !event.affected_symbols.is_empty() {
            out.push_str(&format!("    Symbols: {}\n", event.affected_symbols.join(", ")));
        }
        if let Some(summary) = &event.summary {
            out.push_str(&format!("    {}\n", truncate_text(summary, 120)));
        }
    }
    out
}

/// Marks the row of `current_user` with `*`.
pub fn render_leaderboard(entries: &[LeaderboardEntry], period: LeaderboardPeriod, current_user: Option<&str>) -> String {
    let mut table = Table::new(&["", "Rank", "Trader", "Total Value", "Return"]).numeric(&[1, 3, 4]);
    for entry in entries {
        let me = current_user.is_some_and(|id| id == entry.user_id);
        table.row(vec![
            if me { "*" } else { "" }.to_string(),
            format!("#{}", entry.rank),
            entry.display_name.clone(),
            format_currency(entry.total_value),
            format_percentage(entry.return_percent),
        ]);
    }
    format!(
        "Leaderboard ({})\n\n{}",
        period,
        render_table(&table, "Nobody has traded yet.", None)
    )
}

pub fn render_settings(settings: &Settings) -> String {
    render_key_values(&[
        ("Display name", settings.display_name.clone().unwrap_or_else(|| "-".to_string())),
        ("Currency", settings.currency.clone()),
        ("Theme", settings.theme.to_string()),
        ("Notifications", if settings.notifications_enabled { "on" } else { "off" }.to_string()),
        ("Refresh interval", format!("{}s", settings.refresh_interval_secs)),
        ("Default chart range", settings.default_chart_range.to_string()),
    ])
}

pub fn render_nav(items: &[NavItem], source: MenuSource) -> String {
    let mut table = Table::new(&["#", "Page", "Path"]).numeric(&[0]);
    for (i, item) in items.iter().enumerate() {
        table.row(vec![(i + 1).to_string(), item.label.clone(), item.path.clone()]);
    }
    let mut out = table.render();
    if source == MenuSource::Fallback {
        out.push_str("\n(offline menu)\n");
    }
    out
}

pub fn render_trade(result: &TradeResult) -> String {
    let tx = &result.transaction;
    let mut out = format!(
        "{} {} {} @ {} = {}\n",
        if tx.side == shared::TradeSide::Buy { "Bought" } else { "Sold" },
        format_number(tx.shares as f64, 0),
        tx.symbol,
        format_currency(tx.price),
        format_currency(tx.total)
    );
    if let Some(cash) = result.cash_balance {
        out.push_str(&format!("Cash balance: {}\n", format_currency(cash)));
    }
    if let Some(message) = &result.message {
        out.push_str(message);
        out.push('\n');
    }
    out
}

pub fn render_user(user: &LocalUser, token_present: bool) -> String {
    render_key_values(&[
        ("Trader", user.display_name.clone()),
        ("User id", user.id.clone()),
        ("Since", format_date(&user.created_at)),
        ("Backend token", if token_present { "stored" } else { "none" }.to_string()),
    ])
}

/// One ticker frame for `watch`.
pub fn render_quotes(stocks: &[Stock], at: DateTime<Utc>) -> String {
    let mut table = Table::new(&["Symbol", "Price", "Change", "Change %"]).numeric(&[1, 2, 3]);
    for stock in stocks {
        table.row(vec![
            stock.symbol.clone(),
            format_currency(stock.price),
            format_change(stock.change),
            format_percentage(stock.change_percent),
        ]);
    }
    format!("{}\n{}", at.format("%H:%M:%S UTC"), render_table(&table, "No quotes.", None))
}
