//! Integration tests for the redir library.
//!
//! These tests drive the public API against `httptest` mock servers. They do
//! not make requests outside the loopback interface.

use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use redir::{
    run_traces_with, Config, OutputFormat, RedirectTracer, TraceError, TraceErrorKind, TracerConfig,
};
use serde_json::Value;

fn json_config() -> Config {
    Config {
        output: OutputFormat::Json,
        timeout_seconds: 5,
        ..Default::default()
    }
}

/// Splits concatenated pretty-printed JSON arrays into values.
fn parse_json_stream(output: &[u8]) -> Vec<Value> {
    serde_json::Deserializer::from_slice(output)
        .into_iter::<Value>()
        .collect::<Result<_, _>>()
        .expect("output should be a stream of JSON documents")
}

#[tokio::test]
async fn test_three_server_chain() {
    let server_c = Server::run();
    server_c.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(status_code(200)),
    );
    let url_c = server_c.url("/").to_string();

    let server_b = Server::run();
    server_b.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(302).append_header("Location", url_c.as_str())),
    );
    let url_b = server_b.url("/").to_string();

    let server_a = Server::run();
    server_a.expect(
        Expectation::matching(request::method_path("GET", "/"))
            .respond_with(status_code(302).append_header("Location", url_b.as_str())),
    );

    let tracer = RedirectTracer::new(&TracerConfig::default()).expect("tracer should build");
    let trace = tracer
        .trace(&server_a.url("/").to_string(), 10)
        .await
        .expect("trace should succeed");

    let statuses: Vec<u16> = trace.iter().map(|hop| hop.status_code).collect();
    assert_eq!(statuses, vec![302, 302, 200]);
    assert_eq!(trace.hops()[0].url, server_a.url("/").to_string());
    assert_eq!(trace.hops()[1].url, url_b);
    assert_eq!(trace.hops()[2].url, url_c);
}

#[tokio::test]
async fn test_chain_longer_than_limit() {
    let server = Server::run();
    for (path, next) in [
        ("/hop/0", "/hop/1"),
        ("/hop/1", "/hop/2"),
        ("/hop/2", "/hop/3"),
        ("/hop/3", "/hop/4"),
    ] {
        server.expect(
            Expectation::matching(request::method_path("GET", path))
                .respond_with(status_code(301).append_header("Location", next)),
        );
    }
    // Never requested: the limit stops the trace first
    server.expect(
        Expectation::matching(request::method_path("GET", "/hop/4"))
            .times(0)
            .respond_with(status_code(200)),
    );

    let tracer = RedirectTracer::new(&TracerConfig::default()).expect("tracer should build");
    let trace = tracer
        .trace(&server.url("/hop/0").to_string(), 4)
        .await
        .expect("the hop limit is not an error");

    assert_eq!(trace.len(), 4);
    assert!(!trace.is_complete());
    assert_eq!(trace.hops()[3].url, server.url("/hop/3").to_string());
}

#[tokio::test]
async fn test_partial_trace_on_missing_location() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/start"))
            .respond_with(status_code(308).append_header("Location", "/broken")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/broken"))
            .respond_with(status_code(302)),
    );

    let tracer = RedirectTracer::new(&TracerConfig::default()).expect("tracer should build");
    let failure = tracer
        .trace(&server.url("/start").to_string(), 10)
        .await
        .expect_err("second hop has no Location");

    let (trace, error) = failure.into_parts();
    assert_eq!(trace.len(), 2);
    assert_eq!(trace.hops()[0].status_code, 308);
    assert_eq!(trace.hops()[1].status_code, 302);
    assert!(matches!(error, TraceError::MissingRedirectTarget { .. }));
}

#[tokio::test]
async fn test_run_single_url_json_output() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/old"))
            .respond_with(status_code(301).append_header("Location", "/new")),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/new")).respond_with(
            delay_and_then(Duration::from_millis(20), status_code(200)),
        ),
    );

    let config = Config {
        url: Some(server.url("/old").to_string()),
        ..json_config()
    };
    let mut out = Vec::new();
    let report = run_traces_with(config, tokio::io::empty(), &mut out)
        .await
        .expect("run should succeed");

    assert_eq!(report.total_urls, 1);
    assert_eq!(report.successful, 1);
    assert_eq!(report.failed, 0);
    assert!(report.errors.is_empty());

    let documents = parse_json_stream(&out);
    assert_eq!(documents.len(), 1);
    let hops = documents[0].as_array().expect("trace is an array");
    assert_eq!(hops.len(), 2);
    assert_eq!(hops[0]["status_code"], 301);
    assert_eq!(hops[1]["url"], server.url("/new").to_string());
    assert!(hops[1]["duration"].as_u64().expect("nanoseconds") >= 20_000_000);
}

#[tokio::test]
async fn test_run_stdin_batch_continues_after_failure() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ok")).respond_with(status_code(200)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/no-location"))
            .respond_with(status_code(302)),
    );
    server.expect(
        Expectation::matching(request::method_path("GET", "/gone")).respond_with(status_code(410)),
    );

    let input = format!(
        "first: {}\nnothing here\n{} (should fail)\nlast {}\n",
        server.url("/ok"),
        server.url("/no-location"),
        server.url("/gone"),
    );

    let mut out = Vec::new();
    let report = run_traces_with(json_config(), input.as_bytes(), &mut out)
        .await
        .expect("run should succeed despite a failing target");

    assert_eq!(report.total_urls, 3);
    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.errors, vec![(TraceErrorKind::MissingRedirectTarget, 1)]);

    // Failed targets are reported on stderr, not rendered
    let documents = parse_json_stream(&out);
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0][0]["status_code"], 200);
    assert_eq!(documents[1][0]["status_code"], 410);
}

#[tokio::test]
async fn test_run_table_output() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/")).respond_with(status_code(200)),
    );

    let config = Config {
        url: Some(server.url("/").to_string()),
        output: OutputFormat::Table,
        timeout_seconds: 5,
        ..Default::default()
    };
    let mut out = Vec::new();
    run_traces_with(config, tokio::io::empty(), &mut out)
        .await
        .expect("run should succeed");

    let text = String::from_utf8(out).expect("table output is UTF-8");
    assert!(text.contains(&server.url("/").to_string()));
    assert!(text.contains("200"));
    assert!(text.contains("Finished at"));
}

#[tokio::test]
async fn test_run_empty_stdin() {
    let mut out = Vec::new();
    let report = run_traces_with(json_config(), &b""[..], &mut out)
        .await
        .expect("empty input is not an error");

    assert_eq!(report.total_urls, 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_run_stdin_skips_invalid_utf8_line() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/ok")).respond_with(status_code(200)),
    );

    let mut input = b"garbage \xff\xfe line\n".to_vec();
    input.extend_from_slice(server.url("/ok").to_string().as_bytes());
    input.push(b'\n');

    let mut out = Vec::new();
    let report = run_traces_with(json_config(), input.as_slice(), &mut out)
        .await
        .expect("invalid UTF-8 on one line does not abort the run");

    assert_eq!(report.total_urls, 1);
    assert_eq!(report.successful, 1);
    let documents = parse_json_stream(&out);
    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0][0]["status_code"], 200);
}

#[tokio::test]
async fn test_run_empty_url_reads_stdin() {
    let server = Server::run();
    server.expect(
        Expectation::matching(request::method_path("GET", "/from-stdin"))
            .respond_with(status_code(200)),
    );

    let config = Config {
        url: Some(String::new()),
        ..json_config()
    };
    let input = format!("{}\n", server.url("/from-stdin"));
    let mut out = Vec::new();
    let report = run_traces_with(config, input.as_bytes(), &mut out)
        .await
        .expect("run should succeed");

    assert_eq!(report.total_urls, 1);
    assert_eq!(report.failed, 0);
    let documents = parse_json_stream(&out);
    assert_eq!(documents[0][0]["url"], server.url("/from-stdin").to_string());
}
