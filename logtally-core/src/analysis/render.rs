use crate::analysis::report::{RankedCounts, Report};
use owo_colors::OwoColorize;

pub fn render_summary(report: &Report, color: bool) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str(&heading("Access Log Summary", color));
    out.push_str("==================\n");
    out.push_str(&format!(
        "requests: {} | clients: {} | 404s: {}\n\n",
        s.total_requests, s.unique_clients, s.total_404_errors
    ));

    out.push_str(&heading("Top clients:", color));
    push_ranking(&mut out, &report.top_clients);

    out.push_str(&heading("Top paths:", color));
    push_ranking(&mut out, &report.top_paths);

    out.push_str("Status: ");
    if report.status_codes.is_empty() {
        out.push_str("<none>");
    }
    for (code, count) in &report.status_codes.0 {
        out.push_str(&format!("{code}={count} "));
    }
    out.push_str("\n\n");

    let total_hourly = report.hourly_traffic.total();
    if total_hourly > 0 {
        out.push_str(&heading("Hourly traffic:", color));
        for (hour, count) in &report.hourly_traffic.0 {
            let pct = (*count as f64 / total_hourly as f64) * 100.0;
            let bars = ((pct / 5.0).floor() as usize).max(1);
            out.push_str(&format!(
                "  {:<4} {:<20} {:>5.1}%\n",
                hour,
                "█".repeat(bars),
                pct
            ));
        }
    } else {
        out.push_str("Hourly traffic: <no samples>\n");
    }

    out
}

fn heading(text: &str, color: bool) -> String {
    if color {
        format!("{}\n", text.bold())
    } else {
        format!("{text}\n")
    }
}

fn push_ranking(out: &mut String, ranking: &RankedCounts) {
    if ranking.is_empty() {
        out.push_str("  <none>\n\n");
        return;
    }

    for (key, count) in &ranking.0 {
        out.push_str(&format!("  {key:<24} {count:>8}\n"));
    }
    out.push('\n');
}
