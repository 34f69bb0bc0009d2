//! Scenario: Release Day
//!
//! Journey: a developer deletes an Apex helper that a trigger and a service
//! class still call, and ships the deletion.
//!
//! Steps:
//! 1. `defuse scan` shows which files would break the deployment
//! 2. `defuse deploy --dry-run` previews the rewrite
//! 3. The first deployment is rejected by the org
//! 4. The retry succeeds
//!
//! Success Criteria:
//! - The org always receives neutralized dependents
//! - The working tree is untouched after every step
//! - No journal or stash is left behind

use crate::common::*;
use crate::{assert_file_eq, assert_output_contains};

#[test]
fn scenario_release_day() {
    let env = TestEnv::builder()
        .with_file(TRIGGER_PATH, ACCOUNT_TRIGGER)
        .with_file(SERVICE_PATH, BILLING_SERVICE)
        .with_file(UNRELATED_PATH, UNRELATED_CLASS)
        .with_project_config("[deploy]\ntarget_org = \"release\"\ntest_level = \"RunLocalTests\"\n")
        .build();
    let manifest = destructive_classes(&["AccountHelper"]);
    env.stage_delta(Some(&manifest));

    // Step 1: scan the staged manifest
    env.write_project_file("destructiveChanges.xml", &manifest);
    let result = env.run(&["scan", "-m", "destructiveChanges.xml"]);
    assert!(result.success, "Step 1: {}", result.combined_output());
    assert_output_contains!(result, "2 dependent file(s)");
    std::fs::remove_file(env.project_path("destructiveChanges.xml")).unwrap();

    // Step 2: dry run
    let result = env.run(&["deploy", "--dry-run"]);
    assert!(result.success, "Step 2: {}", result.combined_output());
    assert_output_contains!(result, "+// defuse:     AccountHelper.handle(Trigger.new);");
    assert!(!env.deploy_invoked(), "Step 2: dry run must not deploy");

    // Step 3: the org rejects the first attempt
    env.fail_deploy_with(1);
    let result = env.run(&["deploy"]);
    assert_eq!(result.exit_code, 1, "Step 3: {}", result.combined_output());
    assert!(env.deploy_args().contains("--target-org release"));
    assert!(env.deploy_args().contains("--test-level RunLocalTests"));
    assert_eq!(env.git_status(), "", "Step 3: tree must be restored");

    // Step 4: retry
    env.fail_deploy_with(0);
    let result = env.run(&["deploy", "--json"]);
    assert!(result.success, "Step 4: {}", result.combined_output());
    let neutralized: Vec<_> = result
        .json_lines()
        .into_iter()
        .filter(|l| l["event"] == "file_neutralized")
        .collect();
    assert_eq!(neutralized.len(), 2);
    assert!(env.deployed_file(SERVICE_PATH).contains("// defuse: "));
    assert!(env.deployed_file(TRIGGER_PATH).contains("// defuse: "));

    assert_file_eq!(env, TRIGGER_PATH, ACCOUNT_TRIGGER);
    assert_file_eq!(env, SERVICE_PATH, BILLING_SERVICE);
    assert_eq!(env.git_status(), "");
    assert_eq!(env.stash_count(), 0);
    assert!(!env.state_dir().join("journal.json").exists());
}
