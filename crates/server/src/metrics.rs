//! Prometheus metrics exporter
//!
//! The engine records through the `metrics` facade; this installs the
//! recorder and serves `/metrics` on the configured port.

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::ServerError;

/// Install the Prometheus recorder with an HTTP listener on `port`
pub fn init_metrics(port: u16) -> Result<(), ServerError> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| ServerError::Metrics(e.to_string()))?;

    describe();
    tracing::info!(%addr, "Prometheus metrics exporter listening");
    Ok(())
}

fn describe() {
    metrics::describe_counter!("survey_turns_total", "Classified respondent turns by label");
    metrics::describe_counter!("survey_silent_turns_total", "Turns without a response");
    metrics::describe_counter!("survey_answers_submitted_total", "Answers accepted by the store");
    metrics::describe_counter!("survey_submit_failures_total", "Answers the store rejected");
    metrics::describe_counter!("survey_finalize_failures_total", "Sessions the store failed to close");
    metrics::describe_counter!("survey_sessions_total", "Finished sessions by outcome");
    metrics::describe_counter!("survey_turn_failures_total", "Turns lost to capture errors");
    metrics::describe_counter!("survey_forced_completions_total", "Answers closed by the follow-up cap");
    metrics::describe_counter!("survey_playback_failures_total", "Utterances that failed to play");
    metrics::describe_histogram!(
        "survey_session_duration_seconds",
        metrics::Unit::Seconds,
        "Wall time per session"
    );
}
