//! Service boundary tests
//!
//! Feeds JSON requests through `SynthesisService` the way the `handle`
//! command does.

use stroke_synth::app::config::Config;
use stroke_synth::service::{GenerationRequest, GenerationResponse, ServiceConfig, SynthesisService, DENIED_MESSAGE};
use stroke_synth::solver::UniformRange;
use tempfile::TempDir;

const TOKEN: &str = "069137edba02";

fn service() -> SynthesisService {
    let mut config = Config::default();
    config.service = ServiceConfig {
        auth_token: Some(TOKEN.to_string()),
        ..Default::default()
    };
    config.solver.log_time_mean = UniformRange::new(-1.6, -1.2);
    config.solver.log_time_std_dev = UniformRange::new(0.3, 0.5);
    SynthesisService::new(config.service.clone(), config.plan, config.synthesizer())
}

fn handle_json(service: &SynthesisService, json: &str) -> GenerationResponse {
    let request: GenerationRequest = serde_json::from_str(json).expect("valid request JSON");
    service.handle(&request)
}

#[test]
fn test_constrained_request_succeeds() {
    let response = handle_json(
        &service(),
        r#"{
            "duration": 1.5,
            "x0": 100, "y0": 100,
            "stroke_count": 3,
            "targets_x": [200, 300, 400],
            "targets_y": [150, 100, 250],
            "seed": 8,
            "token": "069137edba02"
        }"#,
    );

    match response {
        GenerationResponse::Success { sensor_data } => {
            let records: Vec<&str> = sensor_data.split(';').collect();
            assert!(records.len() > 50);
            assert!(records.iter().all(|r| r.split(',').count() == 6));
        }
        other => panic!("Expected success, got {:?}", other),
    }
}

#[test]
fn test_broadcast_single_axis_value() {
    let response = handle_json(
        &service(),
        r#"{"duration": 1.0, "x0": 50, "y0": 50, "stroke_count": 2,
            "targets_x": 400, "targets_y": [200, 600], "seed": 4, "token": "069137edba02"}"#,
    );
    assert!(response.is_success(), "{:?}", response);
}

#[test]
fn test_list_length_mismatch_is_rejected() {
    let response = handle_json(
        &service(),
        r#"{"duration": 1.0, "stroke_count": 3, "targets_x": [1, 2], "targets_y": [3, 4],
            "token": "069137edba02"}"#,
    );
    match response {
        GenerationResponse::Failure { error, solver_dump, .. } => {
            assert!(error.starts_with("Configuration error"));
            assert!(error.contains("targets_x"));
            assert!(solver_dump.is_none());
        }
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[test]
fn test_one_sided_targets_are_rejected() {
    let response = handle_json(
        &service(),
        r#"{"duration": 1.0, "targets_x": 500, "token": "069137edba02"}"#,
    );
    assert!(matches!(response, GenerationResponse::Failure { ref error, .. } if error.contains("together")));
}

#[test]
fn test_oversized_stroke_count_fails_cleanly() {
    let response = handle_json(
        &service(),
        r#"{"duration": 1.2, "stroke_count": 18446744073709551615,
            "targets_x": 500.0, "targets_y": 500.0, "token": "069137edba02"}"#,
    );
    match response {
        GenerationResponse::Failure { error, .. } => assert!(error.contains("stroke_count")),
        other => panic!("Expected failure, got {:?}", other),
    }
}

#[test]
fn test_missing_token_is_denied() {
    let response = handle_json(&service(), r#"{"duration": 1.0}"#);
    match response {
        GenerationResponse::Failure { error, trace, solver_dump } => {
            assert_eq!(error, DENIED_MESSAGE);
            assert!(trace.is_empty());
            assert!(solver_dump.is_none());
        }
        other => panic!("Expected denial, got {:?}", other),
    }
}

#[test]
fn test_failure_response_serializes_with_dump() {
    let response = handle_json(
        &service(),
        r#"{"duration": 1.0, "x0": 10, "y0": 10, "stroke_count": 2,
            "targets_x": 300, "targets_y": 200, "seed": 1, "token": "069137edba02"}"#,
    );

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["status"], "failure");
    assert!(json["error"].as_str().unwrap().contains("stroke 1"));
    let dump: serde_json::Value = serde_json::from_str(json["solver_dump"].as_str().unwrap()).unwrap();
    assert_eq!(dump["amplitudes"].as_array().unwrap().len(), 1);
    assert_eq!(dump["targets"].as_array().unwrap().len(), 2);
}

#[test]
fn test_service_section_loads_from_config_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[service]
auth_token = "file-token"
default_duration = 0.8
default_stroke_count = 1
"#,
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let service = SynthesisService::new(config.service.clone(), config.plan, config.synthesizer());
    let response = service.handle(&GenerationRequest {
        seed: Some(6),
        token: Some("file-token".to_string()),
        ..Default::default()
    });
    assert!(response.is_success(), "{:?}", response);
}
