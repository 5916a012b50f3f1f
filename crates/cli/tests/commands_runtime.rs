use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use giftwise_cli::commands::batch::BatchArgs;
use giftwise_cli::commands::recommend::RecommendArgs;
use giftwise_cli::commands::stats::StatsArgs;
use giftwise_cli::commands::{batch, catalog, config, doctor, recommend, stats};
use serde_json::Value;
use tempfile::NamedTempFile;

const NOW: &str = "2025-06-15T12:00:00Z";

const ALICE: &str = r#"{
    "id": "8f14e45f-ceea-467f-a0e6-5bf0a1c2d3e4",
    "name": "Alice",
    "birthDate": "1995-03-10",
    "interests": ["kitap", "kahve"],
    "personalityTraits": ["Meraklı"],
    "notes": ["Sabahları yoga yapıyor"],
    "budgetMin": "500 TL",
    "budgetMax": 1500
}"#;

#[test]
fn recommend_offline_returns_target_count() {
    with_env(&[], || {
        let file = persona_file(ALICE);
        let result = recommend::run(recommend_args(file.path().to_path_buf(), Some(42)));
        assert_eq!(result.exit_code, 0, "expected successful recommendation: {}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["personaName"], "Alice");
        assert_eq!(payload["age"], 30);
        assert_eq!(payload["ageCategory"], "adult");
        assert_eq!(payload["aiGenerated"], false);
        assert_eq!(payload["generatedAt"], "2025-06-15T12:00:00Z");
        assert!(payload.get("error").is_none());

        let recommendations = payload["recommendations"].as_array().expect("recommendations array");
        assert_eq!(recommendations.len(), 3);
        for item in recommendations {
            assert!(!item["title"].as_str().unwrap_or_default().is_empty());
            assert!(!item["reason"].as_str().unwrap_or_default().is_empty());
            let confidence = item["confidence"].as_u64().expect("confidence");
            assert!((70..=100).contains(&confidence));
        }
    });
}

#[test]
fn recommend_is_reproducible_with_seed_and_clock() {
    with_env(&[], || {
        let file = persona_file(ALICE);
        let first = recommend::run(recommend_args(file.path().to_path_buf(), Some(7)));
        let second = recommend::run(recommend_args(file.path().to_path_buf(), Some(7)));
        assert_eq!(first.exit_code, 0);
        assert_eq!(first.output, second.output);
    });
}

#[test]
fn recommend_honours_configured_target_count() {
    with_env(&[("GIFTWISE_RECOMMENDATION_TARGET_COUNT", "4")], || {
        let file = persona_file(ALICE);
        let result = recommend::run(recommend_args(file.path().to_path_buf(), Some(1)));
        let payload = parse_payload(&result.output);
        assert_eq!(payload["recommendations"].as_array().map(Vec::len), Some(4));
    });
}

#[test]
fn recommend_without_name_or_role_is_unsuccessful() {
    with_env(&[], || {
        let file = persona_file(r#"{ "name": "", "interests": ["kitap"] }"#);
        let result = recommend::run(recommend_args(file.path().to_path_buf(), Some(1)));
        assert_eq!(result.exit_code, 1);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["success"], false);
        assert_eq!(payload["recommendations"], Value::Array(Vec::new()));
        assert!(payload["error"].as_str().is_some_and(|error| !error.is_empty()));
    });
}

#[test]
fn recommend_rejects_lists_and_bad_input() {
    with_env(&[], || {
        let list = persona_file(r#"[{ "name": "A" }, { "name": "B" }]"#);
        let result = recommend::run(recommend_args(list.path().to_path_buf(), None));
        assert_eq!(result.exit_code, 5);
        assert_eq!(parse_payload(&result.output)["error_class"], "bad_request");

        let bad_id = persona_file(r#"{ "id": "not-a-uuid", "name": "A" }"#);
        let result = recommend::run(recommend_args(bad_id.path().to_path_buf(), None));
        assert_eq!(result.exit_code, 4);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["status"], "error");
        assert_eq!(payload["error_class"], "input");

        let missing = recommend::run(recommend_args(PathBuf::from("does/not/exist.json"), None));
        assert_eq!(missing.exit_code, 4);
    });
}

#[test]
fn recommend_rejects_malformed_clock() {
    with_env(&[], || {
        let file = persona_file(ALICE);
        let mut args = recommend_args(file.path().to_path_buf(), None);
        args.now = Some("yesterday".to_string());
        let result = recommend::run(args);
        assert_eq!(result.exit_code, 5);
        assert_eq!(parse_payload(&result.output)["error_class"], "invalid_argument");
    });
}

#[test]
fn recommend_reports_config_failure() {
    with_env(&[("GIFTWISE_RECOMMENDATION_TARGET_COUNT", "9")], || {
        let file = persona_file(ALICE);
        let result = recommend::run(recommend_args(file.path().to_path_buf(), None));
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "recommend");
        assert_eq!(payload["error_class"], "config_validation");
        let message = payload["message"].as_str().expect("message");
        assert!(message.starts_with("configuration issue:"), "{message}");
    });
}

#[test]
fn config_command_shares_the_config_failure_shape() {
    with_env(&[("GIFTWISE_LLM_TIMEOUT_SECS", "0")], || {
        let result = config::run();
        assert_eq!(result.exit_code, 2);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["command"], "config");
        assert_eq!(payload["error_class"], "config_validation");
    });
}

#[test]
fn batch_splits_results_and_errors() {
    with_env(&[], || {
        let personas = format!(r#"[{ALICE}, {{ "name": "  " }}, {{ "role": "Öğretmen" }}]"#);
        let file = persona_file(&personas);
        let result = batch::run(batch_args(file.path().to_path_buf()));
        assert_eq!(result.exit_code, 0, "{}", result.output);

        let payload = parse_payload(&result.output);
        assert_eq!(payload["summary"]["totalRequested"], 3);
        assert_eq!(payload["summary"]["totalSuccess"], 2);
        assert_eq!(payload["summary"]["totalErrors"], 1);

        let results = payload["results"].as_array().expect("results");
        assert_eq!(results[0]["personaId"], "8f14e45f-ceea-467f-a0e6-5bf0a1c2d3e4");
        assert_eq!(results[0]["personaName"], "Alice");
        assert_eq!(results[1]["personaId"], Value::Null);
        assert_eq!(results[1]["personaName"], "Öğretmen");
        assert_eq!(payload["errors"][0]["personaName"], "Kişi");
    });
}

#[test]
fn batch_size_is_bounded() {
    with_env(&[], || {
        let eleven =
            (0..11).map(|index| format!(r#"{{ "name": "P{index}" }}"#)).collect::<Vec<_>>();
        let file = persona_file(&format!("[{}]", eleven.join(",")));
        let result = batch::run(batch_args(file.path().to_path_buf()));
        assert_eq!(result.exit_code, 5);
        let payload = parse_payload(&result.output);
        assert_eq!(payload["error_class"], "bad_request");
        let message = payload["message"].as_str().expect("message");
        assert!(message.contains("batch size 11"), "{message}");

        let empty = persona_file("[]");
        let result = batch::run(batch_args(empty.path().to_path_buf()));
        assert_eq!(result.exit_code, 5);
    });
}

#[test]
fn stats_summarize_personas() {
    let file = persona_file(
        r#"[
            { "name": "A", "interests": ["kitap", "kahve"], "notes": "ilk not\nikinci not" },
            { "name": "B", "interests": "kahve, müzik" },
            { "name": "C" }
        ]"#,
    );
    let result = stats::run(StatsArgs { personas: file.path().to_path_buf() });
    assert_eq!(result.exit_code, 0);

    let payload = parse_payload(&result.output);
    assert_eq!(payload["totalPersonas"], 3);
    assert_eq!(payload["totalInterests"], 4);
    assert_eq!(payload["totalNotes"], 2);
    assert_eq!(payload["averageInterestsPerPersona"], 1.33);
    assert_eq!(payload["popularInterests"][0]["interest"], "kahve");
    assert_eq!(payload["popularInterests"][0]["count"], 2);
    assert_eq!(payload["availableCategories"], 10);
}

#[test]
fn catalogs_are_listed() {
    let categories = parse_payload(&catalog::categories().output);
    let categories = categories.as_array().expect("category list");
    assert_eq!(categories.len(), 10);
    assert_eq!(categories[0]["id"], "books");
    assert_eq!(categories[0]["name"], "Kitap & Okuma");

    let traits = parse_payload(&catalog::traits().output);
    assert_eq!(traits["categories"].as_array().map(Vec::len), Some(6));
    assert!(traits["all"].as_array().is_some_and(|all| !all.is_empty()));
    assert_eq!(traits["byCategory"][0]["key"], "social");
}

#[test]
fn config_redacts_api_key_and_names_sources() {
    with_env(
        &[("GIFTWISE_LLM_API_KEY", "sk-test-secret"), ("GIFTWISE_LLM_PROVIDER", "openai")],
        || {
            let result = config::run();
            assert_eq!(result.exit_code, 0);
            assert!(!result.output.contains("sk-test-secret"));
            assert!(result
                .output
                .contains("- llm.api_key = sk-*** (source: env (GIFTWISE_LLM_API_KEY))"));
            let expected = "- llm.provider = openai (source: env (GIFTWISE_LLM_PROVIDER))";
            assert!(result.output.contains(expected), "{}", result.output);
            assert!(result.output.contains("- recommendation.target_count = 3 (source: default)"));
        },
    );
}

#[test]
fn doctor_passes_with_generative_path_disabled() {
    with_env(&[("GIFTWISE_LLM_ENABLED", "false")], || {
        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(check(&payload, "config_validation")["status"], "pass");
        assert_eq!(check(&payload, "llm_readiness")["status"], "skipped");
        assert_eq!(check(&payload, "engine_selftest")["status"], "pass");
    });
}

#[test]
fn doctor_warns_on_missing_api_key() {
    with_env(&[], || {
        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "pass");
        assert_eq!(check(&payload, "llm_readiness")["status"], "warn");

        let human = doctor::run(false);
        assert!(human.starts_with("doctor: all readiness checks passed"));
        assert!(human.contains("- [warn] llm_readiness:"));
    });
}

#[test]
fn doctor_fails_on_invalid_config() {
    with_env(&[("GIFTWISE_LLM_TIMEOUT_SECS", "0")], || {
        let payload = parse_payload(&doctor::run(true));
        assert_eq!(payload["overall_status"], "fail");
        assert_eq!(check(&payload, "config_validation")["status"], "fail");
        assert_eq!(check(&payload, "engine_selftest")["status"], "skipped");
    });
}

fn recommend_args(persona: PathBuf, seed: Option<u64>) -> RecommendArgs {
    RecommendArgs { persona, seed, offline: true, now: Some(NOW.to_string()) }
}

fn batch_args(personas: PathBuf) -> BatchArgs {
    BatchArgs { personas, seed: Some(3), offline: true, now: Some(NOW.to_string()) }
}

fn persona_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write persona fixture");
    file
}

fn check<'a>(report: &'a Value, name: &str) -> &'a Value {
    report["checks"]
        .as_array()
        .and_then(|checks| checks.iter().find(|check| check["name"] == name))
        .unwrap_or_else(|| panic!("missing check `{name}`"))
}

fn parse_payload(output: &str) -> Value {
    serde_json::from_str(output).expect("command output should be valid JSON")
}

fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    let _guard =
        ENV_LOCK.get_or_init(|| Mutex::new(())).lock().expect("env mutex should not be poisoned");

    let keys = [
        "GIFTWISE_LLM_ENABLED",
        "GIFTWISE_LLM_PROVIDER",
        "GIFTWISE_LLM_API_KEY",
        "GEMINI_API_KEY",
        "GIFTWISE_LLM_BASE_URL",
        "GIFTWISE_LLM_MODEL",
        "GIFTWISE_LLM_TIMEOUT_SECS",
        "GIFTWISE_RECOMMENDATION_TARGET_COUNT",
        "GIFTWISE_LOGGING_LEVEL",
        "GIFTWISE_LOGGING_FORMAT",
        "GIFTWISE_LOG_LEVEL",
        "GIFTWISE_LOG_FORMAT",
    ];

    let previous_values: Vec<(&str, Option<String>)> =
        keys.iter().map(|key| (*key, env::var(key).ok())).collect();

    for key in &keys {
        env::remove_var(key);
    }
    for (key, value) in vars {
        env::set_var(key, value);
    }

    test_fn();

    for (key, value) in previous_values {
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
    }
}
