//! Integration tests for `defuse deploy`.
//!
//! Every test drives the real binary against a fake `sf` (a shell script),
//! so the suite is Unix-only.

#![cfg(unix)]

mod common;

use common::*;

fn env_with_trigger() -> TestEnv {
    let env = TestEnv::builder()
        .with_file(TRIGGER_PATH, ACCOUNT_TRIGGER)
        .with_file(UNRELATED_PATH, UNRELATED_CLASS)
        .build();
    env.stage_delta(Some(&destructive_classes(&["AccountHelper"])));
    env
}

#[test]
fn deploy_neutralizes_dependents_during_deploy_and_restores_after() {
    let env = env_with_trigger();

    let result = env.run(&["deploy", "--target-org", "uat"]);

    assert_eq!(result.exit_code, 0, "{}", result.combined_output());
    let deployed = env.deployed_file(TRIGGER_PATH);
    assert!(
        deployed.contains("// defuse:     AccountHelper.handle(Trigger.new);"),
        "trigger was not neutralized at deploy time:\n{}",
        deployed
    );
    assert!(deployed.contains("    System.debug('done');\n"));
    assert_eq!(env.deployed_file(UNRELATED_PATH), UNRELATED_CLASS);

    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
    assert_eq!(env.git_status(), "");
    assert!(!env.state_dir().join("journal.json").exists());
}

#[test]
fn deploy_passes_manifests_and_settings_to_sf() {
    let env = env_with_trigger();

    let result = env.run(&["deploy", "--target-org", "uat", "--test-level", "RunLocalTests"]);

    assert!(result.success, "{}", result.combined_output());
    let args = env.deploy_args();
    assert!(args.contains("--manifest"), "{}", args);
    assert!(args.contains("package/package.xml"), "{}", args);
    assert!(args.contains("--post-destructive-changes"), "{}", args);
    assert!(args.contains("--target-org uat"), "{}", args);
    assert!(args.contains("--test-level RunLocalTests"), "{}", args);
}

#[test]
fn deploy_without_dependents_mutates_nothing() {
    let env = TestEnv::builder()
        .with_file(UNRELATED_PATH, UNRELATED_CLASS)
        .build();
    env.stage_delta(Some(&destructive_classes(&["AccountHelper"])));

    let result = env.run(&["deploy", "--target-org", "uat", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    let events = result.events();
    assert!(!events.contains(&"file_neutralized".to_string()), "{:?}", events);
    assert!(!events.contains(&"snapshot_acquired".to_string()), "{:?}", events);
    assert!(env.deploy_invoked());
    assert_file_eq!(env, UNRELATED_PATH, UNRELATED_CLASS);
}

#[test]
fn deploy_without_destructive_manifest_deploys_additions_only() {
    let env = TestEnv::builder()
        .with_file(TRIGGER_PATH, ACCOUNT_TRIGGER)
        .build();
    env.stage_delta(None);

    let result = env.run(&["deploy", "--target-org", "uat"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(!env.deploy_args().contains("--post-destructive-changes"));
    assert_eq!(env.deployed_file(TRIGGER_PATH), ACCOUNT_TRIGGER);
}

#[test]
fn failed_deployment_restores_files_and_exits_non_zero() {
    let env = env_with_trigger();
    env.fail_deploy_with(1);

    let result = env.run(&["deploy", "--target-org", "uat"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "Component Failures");
    assert!(env.deployed_file(TRIGGER_PATH).contains("// defuse: "));
    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
    assert_eq!(env.git_status(), "");
}

#[test]
fn crlf_files_keep_their_line_endings() {
    let env = TestEnv::builder()
        .with_file(SERVICE_PATH, BILLING_SERVICE)
        .build();
    env.stage_delta(Some(&destructive_classes(&["AccountHelper"])));

    let result = env.run(&["deploy", "--target-org", "uat"]);

    assert!(result.success, "{}", result.combined_output());
    let deployed = env.deployed_file(SERVICE_PATH);
    assert!(deployed.contains("// defuse:         AccountHelper.prepare();\r\n"));
    assert!(deployed.contains("// defuse:         AccountHelper.handle(null);\r\n"));
    assert_file_eq!(env, SERVICE_PATH, BILLING_SERVICE);
}

#[test]
fn dry_run_reports_plan_and_changes_nothing() {
    let env = env_with_trigger();

    let result = env.run(&["deploy", "--dry-run"]);

    assert!(result.success, "{}", result.combined_output());
    assert_output_contains!(result, "AccountTrigger.trigger");
    assert_output_contains!(result, "Dry Run Complete");
    assert!(!env.deploy_invoked());
    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
}

#[test]
fn missing_target_org_is_a_config_error() {
    let env = env_with_trigger();

    let result = env.run(&["deploy"]);

    assert_eq!(result.exit_code, 1);
    assert_output_contains!(result, "--target-org");
    assert_output_contains!(result, "DEFUSE_TARGET_ORG");
    assert!(!env.deploy_invoked());
}

#[test]
fn target_org_from_project_config() {
    let env = TestEnv::builder()
        .with_file(TRIGGER_PATH, ACCOUNT_TRIGGER)
        .with_project_config("[deploy]\ntarget_org = \"staging\"\n")
        .build();
    env.stage_delta(Some(&destructive_classes(&["AccountHelper"])));

    let result = env.run(&["deploy"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.deploy_args().contains("--target-org staging"));
}

#[test]
fn target_org_from_environment_beats_config() {
    let env = TestEnv::builder()
        .with_file(TRIGGER_PATH, ACCOUNT_TRIGGER)
        .with_project_config("[deploy]\ntarget_org = \"staging\"\n")
        .build();
    env.stage_delta(Some(&destructive_classes(&["AccountHelper"])));

    let result = env.run_with_env(&["deploy"], &[("DEFUSE_TARGET_ORG", "prod")]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.deploy_args().contains("--target-org prod"));
}

#[test]
fn json_output_is_ndjson_in_pipeline_order() {
    let env = env_with_trigger();

    let result = env.run(&["deploy", "--target-org", "uat", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(
        result.events(),
        vec![
            "delta_ready",
            "manifest_parsed",
            "scanned",
            "snapshot_acquired",
            "file_neutralized",
            "deploy_started",
            "deploy_finished",
            "restored",
            "finished",
        ]
    );
    let lines = result.json_lines();
    let finished = lines.last().unwrap();
    assert_eq!(finished["success"], true);
    assert_eq!(finished["state"], "Done");
}

#[test]
fn json_failure_ends_with_error_event() {
    let env = env_with_trigger();
    env.fail_deploy_with(1);

    let result = env.run(&["deploy", "--target-org", "uat", "--json"]);

    assert_eq!(result.exit_code, 1);
    let lines = result.json_lines();
    let error = lines.last().unwrap();
    assert_eq!(error["event"], "error");
    assert!(lines.iter().any(|l| l["event"] == "restored" && l["files"] == 1));
}

#[test]
fn local_changes_are_set_aside_and_reapplied() {
    let env = env_with_trigger();
    let edited = "public class Unrelated {\n    // work in progress\n}\n";
    env.write_project_file(UNRELATED_PATH, edited);
    env.write_project_file("force-app/main/default/classes/Draft.cls", "public class Draft {}\n");

    let result = env.run(&["deploy", "--target-org", "uat", "--json"]);

    assert!(result.success, "{}", result.combined_output());
    // the org never sees uncommitted work
    assert_eq!(env.deployed_file(UNRELATED_PATH), UNRELATED_CLASS);
    assert_file_eq!(env, UNRELATED_PATH, edited);
    assert!(env.project_path("force-app/main/default/classes/Draft.cls").exists());
    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
    assert_eq!(env.stash_count(), 0);
}

#[test]
fn no_stash_deploys_local_changes_as_they_are() {
    let env = env_with_trigger();
    let edited = "public class Unrelated {\n    // work in progress\n}\n";
    env.write_project_file(UNRELATED_PATH, edited);

    let result = env.run(&["deploy", "--target-org", "uat", "--no-stash"]);

    assert!(result.success, "{}", result.combined_output());
    assert_eq!(env.deployed_file(UNRELATED_PATH), edited);
    assert_file_eq!(env, UNRELATED_PATH, edited);
}

#[test]
fn works_outside_git() {
    let env = TestEnv::builder()
        .with_file(TRIGGER_PATH, ACCOUNT_TRIGGER)
        .without_git()
        .build();
    env.stage_delta(Some(&destructive_classes(&["AccountHelper"])));

    let result = env.run(&["deploy", "--target-org", "uat"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(env.deployed_file(TRIGGER_PATH).contains("// defuse: "));
    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
}

#[test]
fn failing_delta_generation_never_touches_sources() {
    let env = env_with_trigger();
    std::fs::remove_file(env.tool_path("delta/package.xml")).unwrap();

    let result = env.run(&["deploy", "--target-org", "uat"]);

    assert_eq!(result.exit_code, 1);
    assert!(!env.deploy_invoked());
    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
}
