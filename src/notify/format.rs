//! Message formatting for Telegram (`parse_mode = HTML`).

use chrono::{DateTime, Local};
use std::fmt::Write;
use std::time::Duration;

use crate::health::{Status, StatusReport, TransitionEvent};
use crate::targets::TargetSnapshot;

const TIMESTAMP: &str = "%d/%m/%Y %H:%M:%S";

pub fn glyph(status: Status) -> &'static str {
    match status {
        Status::Up => "🟢",
        Status::Down => "🔴",
        Status::Unknown => "🟡",
    }
}

/// Escape the three characters Telegram's HTML mode reserves.
pub fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn format_downtime(downtime: Duration) -> String {
    let total = downtime.as_secs();
    let (hours, rem) = (total / 3600, total % 3600);
    format!("{}h {}m {}s", hours, rem / 60, rem % 60)
}

fn format_latency(latency: Duration) -> String {
    format!("{:.2}ms", latency.as_secs_f64() * 1000.0)
}

/// Alert for a single transition. `target` is the state after the event.
pub fn format_alert(target: &TargetSnapshot, event: &TransitionEvent, now: &DateTime<Local>) -> String {
    let (header, emoji, status_text) = match event {
        TransitionEvent::WentDown { .. } => ("🚨 <b>ALERT: SERVICE DOWN</b> 🚨", "🔴", "DOWN"),
        TransitionEvent::Recovered { .. } => ("✅ <b>SERVICE RECOVERED</b> ✅", "✅", "RECOVERED"),
    };

    let mut message = format!(
        "{header}\n\n{emoji} <b>{name}</b>\n📋 Type: <code>{kind}</code>\n📊 Status: <b>{status_text}</b>\n🕐 Time: <code>{time}</code>\n",
        name = escape_html(&target.name),
        kind = escape_html(&target.kind),
        time = now.format(TIMESTAMP),
    );

    match event {
        TransitionEvent::WentDown { error } => {
            if !error.is_empty() {
                let _ = writeln!(message, "❗ Error: <code>{}</code>", escape_html(error));
            }
        }
        TransitionEvent::Recovered { downtime, latency } => {
            if !latency.is_zero() {
                let _ = writeln!(message, "⚡ Response: <code>{}</code>", format_latency(*latency));
            }
            if let Some(downtime) = downtime {
                let _ = writeln!(message, "⏱️ Downtime: <code>{}</code>", format_downtime(*downtime));
            }
        }
    }

    message
}

pub fn format_report(report: &StatusReport, now: &DateTime<Local>) -> String {
    let mut message = format!(
        "📊 <b>STATUS REPORT</b>\n🕐 <code>{}</code>\n\n✅ Online: <b>{}</b>\n🔴 Offline: <b>{}</b>\n━━━━━━━━━━━━━━━━━━━━\n",
        now.format(TIMESTAMP),
        report.up,
        report.down,
    );

    for target in &report.entries {
        let state = &target.state;
        let _ = writeln!(message, "{} {}", glyph(state.status), escape_html(&target.name));
        if state.status == Status::Down && !state.last_error.is_empty() {
            let _ = writeln!(message, "   ❗ <code>{}</code>", escape_html(&state.last_error));
        }
    }

    message
}

pub fn help_text() -> String {
    "🤖 <b>Commands</b>\n\n\
     /status - Status of every monitored target\n\
     /help - This message\n\n\
     Alerts are sent automatically when a target goes DOWN or comes back UP"
        .to_string()
}

pub fn startup_text(target_count: usize, check_interval: Duration) -> String {
    format!(
        "🚀 <b>Monitor started</b>\n\n📋 Targets: <b>{}</b>\n⏱️ Interval: <b>{}s</b>\n\nSend /status for the state of every target",
        target_count,
        check_interval.as_secs(),
    )
}
