//! HTTP surface for the park condition dashboard.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};

use park_watch_engine::{
    ConditionReport, EngineError, ParkConditionEngine, PeakInflow, TimeSlot, VehicleClass,
};

pub fn create_router(engine: Arc<ParkConditionEngine>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/summary", get(summary))
        .route("/api/series", get(series))
        .route("/api/fleet", get(fleet))
        .route("/api/slots/{label}", get(slot))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(engine)
}

#[derive(Serialize)]
struct SummaryResponse {
    latest: ConditionReport,
    peak: PeakInflow,
    total_capacity: u32,
    observations: usize,
}

#[derive(Serialize)]
struct FleetResponse {
    classes: Vec<VehicleClass>,
    total_capacity: u32,
    largest: Option<VehicleClass>,
}

async fn index() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

async fn summary(State(engine): State<Arc<ParkConditionEngine>>) -> Json<SummaryResponse> {
    Json(SummaryResponse {
        latest: engine.classify_latest(),
        peak: engine.peak_inflow(),
        total_capacity: engine.total_capacity(),
        observations: engine.slots().len(),
    })
}

async fn series(State(engine): State<Arc<ParkConditionEngine>>) -> Json<Vec<TimeSlot>> {
    Json(engine.slots().to_vec())
}

async fn fleet(State(engine): State<Arc<ParkConditionEngine>>) -> Json<FleetResponse> {
    Json(FleetResponse {
        classes: engine.fleet_summary().to_vec(),
        total_capacity: engine.total_capacity(),
        largest: engine.max_capacity_class().cloned(),
    })
}

async fn slot(
    State(engine): State<Arc<ParkConditionEngine>>,
    Path(label): Path<String>,
) -> Response {
    match engine.classify_at(&label) {
        Ok(report) => Json(report).into_response(),
        Err(err @ EngineError::SlotNotFound(_)) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

async fn health() -> &'static str {
    "OK"
}

const DASHBOARD_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Park Condition Monitor</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        body { margin: 0; background: #0f172a; color: #e2e8f0; font-family: system-ui, sans-serif; }
        .wrap { max-width: 1100px; margin: 0 auto; padding: 2rem 1rem; }
        h1 { color: #fff; margin-bottom: 0.25rem; }
        .sub { color: #94a3b8; margin-bottom: 1.5rem; }
        .cards { display: grid; grid-template-columns: repeat(auto-fit, minmax(220px, 1fr)); gap: 1rem; margin-bottom: 1.5rem; }
        .card { background: #1e293b; border: 1px solid #334155; border-radius: 0.75rem; padding: 1.25rem; }
        .card .label { color: #94a3b8; font-size: 0.85rem; }
        .card .value { font-size: 1.6rem; font-weight: 700; margin-top: 0.25rem; }
        .card .hint { color: #94a3b8; font-size: 0.8rem; margin-top: 0.5rem; }
        .status-CRITICAL { color: #ef4444; }
        .status-BUSY { color: #f59e0b; }
        .status-MODERATE { color: #eab308; }
        .status-CLEAR { color: #22c55e; }
        .charts { display: grid; grid-template-columns: 2fr 1fr; gap: 1rem; margin-bottom: 1.5rem; }
        .panel { background: #1e293b; border: 1px solid #334155; border-radius: 0.75rem; padding: 1.25rem; }
        .panel h2 { font-size: 1rem; color: #fff; margin: 0 0 1rem; }
        select { background: #0f172a; color: #e2e8f0; border: 1px solid #334155; border-radius: 0.5rem; padding: 0.5rem; }
        #lookup-result { margin-top: 0.75rem; color: #94a3b8; }
        @media (max-width: 800px) { .charts { grid-template-columns: 1fr; } }
    </style>
</head>
<body>
    <div class="wrap">
        <h1>Park Condition Monitor</h1>
        <div class="sub">Hourly hints on shuttle park conditions, from student group observation logs.</div>

        <div class="cards">
            <div class="card">
                <div class="label">Current Queue Residue</div>
                <div class="value" id="residue">&ndash;</div>
            </div>
            <div class="card">
                <div class="label">Status</div>
                <div class="value" id="status">&ndash;</div>
                <div class="hint" id="status-hint"></div>
            </div>
            <div class="card">
                <div class="label">Peak Inflow Rate</div>
                <div class="value" id="peak">&ndash;</div>
            </div>
            <div class="card">
                <div class="label">Fleet Capacity</div>
                <div class="value" id="capacity">&ndash;</div>
            </div>
        </div>

        <div class="charts">
            <div class="panel">
                <h2>Queue Accumulation vs. Inflow</h2>
                <canvas id="trend"></canvas>
            </div>
            <div class="panel">
                <h2>Passenger Capacity per Vehicle Type</h2>
                <canvas id="fleet"></canvas>
            </div>
        </div>

        <div class="panel">
            <h2>Check My Hour</h2>
            <select id="time-select"></select>
            <div id="lookup-result"></div>
        </div>
    </div>

    <script>
        async function fetchJson(url) {
            const res = await fetch(url);
            if (!res.ok) throw new Error(await res.text());
            return res.json();
        }

        function renderSummary(summary) {
            document.getElementById('residue').textContent = summary.latest.residue + ' people';
            const status = document.getElementById('status');
            status.textContent = summary.latest.status;
            status.className = 'value status-' + summary.latest.status;
            document.getElementById('status-hint').textContent = summary.latest.hint;
            document.getElementById('peak').textContent = summary.peak.inflow + '/15m at ' + summary.peak.time;
            document.getElementById('capacity').textContent = summary.total_capacity + ' seats';
        }

        function renderTrend(series) {
            new Chart(document.getElementById('trend'), {
                data: {
                    labels: series.map(s => s.label),
                    datasets: [
                        {
                            type: 'line',
                            label: 'Joining Queue',
                            data: series.map(s => s.inflow),
                            borderColor: '#3498db',
                            borderWidth: 3,
                            tension: 0.3,
                        },
                        {
                            type: 'bar',
                            label: 'People Left Behind',
                            data: series.map(s => s.residue),
                            backgroundColor: 'rgba(231, 76, 60, 0.6)',
                        },
                    ],
                },
                options: { scales: { y: { beginAtZero: true } } },
            });
        }

        function renderFleet(fleet) {
            new Chart(document.getElementById('fleet'), {
                type: 'doughnut',
                data: {
                    labels: fleet.classes.map(c => c.id),
                    datasets: [{ data: fleet.classes.map(c => c.capacity) }],
                },
            });
        }

        function setupLookup(series) {
            const select = document.getElementById('time-select');
            const result = document.getElementById('lookup-result');
            for (const slot of series) {
                const option = document.createElement('option');
                option.value = slot.label;
                option.textContent = slot.label;
                select.appendChild(option);
            }
            async function lookup() {
                try {
                    const report = await fetchJson('/api/slots/' + encodeURIComponent(select.value));
                    result.textContent = 'At ' + report.time + ', expect a backlog of approximately '
                        + report.residue + ' people. ' + report.outlook + '.';
                } catch (err) {
                    result.textContent = 'No data for this time.';
                }
            }
            select.addEventListener('change', lookup);
            lookup();
        }

        async function init() {
            const [summary, series, fleet] = await Promise.all([
                fetchJson('/api/summary'),
                fetchJson('/api/series'),
                fetchJson('/api/fleet'),
            ]);
            renderSummary(summary);
            renderTrend(series);
            renderFleet(fleet);
            setupLookup(series);
        }

        init();
    </script>
</body>
</html>
"##;
