use axum::response::Html;

use crate::bench::{AllMetrics, MetricRecord};

use super::{run_benchmark, AppError};

// ─── GET / ───────────────────────────────────────────────────────
/// Comparison table of one fresh benchmark pass.

pub async fn home() -> Result<Html<String>, AppError> {
    let all = run_benchmark().await?;
    Ok(Html(render_home(&all)))
}

// ─── GET /insights ───────────────────────────────────────────────
/// Chart page; the data is pulled by `/static/app.js`.

pub async fn insights() -> Html<&'static str> {
    Html(INSIGHTS_HTML)
}

// ─── Rendering ───────────────────────────────────────────────────

type Cell = fn(&MetricRecord) -> String;

/// Row label plus how to format the cell for each algorithm.
const ROWS: &[(&str, Cell)] = &[
    ("Key generation (ms)", |r| format!("{:.3}", r.keygen_ms)),
    ("Encrypt / encapsulate (ms)", |r| format!("{:.3}", r.encrypt_ms)),
    ("Decrypt / decapsulate (ms)", |r| format!("{:.3}", r.decrypt_ms)),
    ("Total (ms)", |r| format!("{:.3}", r.total_ms)),
    ("Public key (bytes)", |r| r.public_key.to_string()),
    ("Ciphertext (bytes)", |r| r.ciphertext.to_string()),
    ("Quantum safe", |r| match r.quantum_score {
        1 => "yes".to_owned(),
        _ => "no".to_owned(),
    }),
    ("Throughput (ops/s)", |r| format!("{:.1}", r.throughput_ops)),
];

fn render_home(all: &AllMetrics) -> String {
    let header: String = all
        .iter()
        .map(|(_, r)| format!("<th>{}</th>", escape(&r.algorithm)))
        .collect();

    let body: String = ROWS
        .iter()
        .map(|(label, cell)| {
            let cells: String = all
                .iter()
                .map(|(_, r)| format!("<td>{}</td>", cell(r)))
                .collect();
            format!("<tr><th scope=\"row\">{label}</th>{cells}</tr>\n")
        })
        .collect();

    format!(
        r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PQC Supremacy Dashboard</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<h1>PQC Supremacy Dashboard</h1>
<table>
<thead><tr><th>Metric</th>{header}</tr></thead>
<tbody>
{body}</tbody>
</table>
<p><a href="/insights">Live insights &rarr;</a></p>
</body>
</html>
"#
    )
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

const INSIGHTS_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PQC Insights</title>
<link rel="stylesheet" href="/static/style.css">
<script src="https://cdn.jsdelivr.net/npm/chart.js"></script>
</head>
<body>
<h1>Live insights</h1>
<p><a href="/">&larr; Comparison table</a> &middot; <span id="status">connecting&hellip;</span></p>
<div class="grid">
<canvas id="keygen"></canvas>
<canvas id="encrypt"></canvas>
<canvas id="decrypt"></canvas>
<canvas id="total"></canvas>
<canvas id="pubkey"></canvas>
<canvas id="cipher"></canvas>
<canvas id="quantum"></canvas>
<canvas id="throughput"></canvas>
</div>
<script src="/static/app.js"></script>
</body>
</html>
"#;
