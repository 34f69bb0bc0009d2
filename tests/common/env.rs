//! Test environment builder for isolated defuse testing.
//!
//! `TestEnv` owns three temp directories: the project (a Salesforce DX
//! layout, optionally a git repository), a HOME, and a tools directory
//! holding a fake `sf` shell script. The fake `sf` serves the delta
//! manifests staged by the test and snapshots `force-app` whenever a
//! deployment starts, so tests can see what the org would have received.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

use super::fixtures::{EMPTY_PACKAGE, SFDX_PROJECT};

/// Result of running a defuse CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse every stdout line as JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("stdout line is not JSON ({}): {}", e, l))
            })
            .collect()
    }

    /// Names of the NDJSON events, in order
    pub fn events(&self) -> Vec<String> {
        self.json_lines()
            .iter()
            .filter_map(|v| v["event"].as_str().map(str::to_string))
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    pub tools_dir: TempDir,
    git: bool,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn tool_path(&self, relative: &str) -> PathBuf {
        self.tools_dir.path().join(relative)
    }

    pub fn sf_bin(&self) -> PathBuf {
        self.tool_path("sf")
    }

    /// Run defuse from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.project_root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_defuse"));
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env("NO_COLOR", "1")
            .env("DEFUSE_SF_BIN", self.sf_bin())
            .env("GIT_AUTHOR_NAME", "defuse-test")
            .env("GIT_AUTHOR_EMAIL", "test@example.com")
            .env("GIT_COMMITTER_NAME", "defuse-test")
            .env("GIT_COMMITTER_EMAIL", "test@example.com")
            .env_remove("DEFUSE_TARGET_ORG")
            .env_remove("DEFUSE_MODE")
            .env_remove("DEFUSE_TEST_LEVEL")
            .env_remove("DEFUSE_SOURCE_ROOT")
            .env_remove("GITHUB_ACTIONS")
            .env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute defuse");
        to_result(output)
    }

    pub fn read_project_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.project_path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn write_project_file(&self, relative: &str, content: &str) {
        write(&self.project_path(relative), content);
    }

    /// Stage the manifests the fake `sf sgd source delta` will emit
    pub fn stage_delta(&self, destructive: Option<&str>) {
        write(&self.tool_path("delta/package.xml"), EMPTY_PACKAGE);
        let destructive_path = self.tool_path("delta/destructiveChanges.xml");
        match destructive {
            Some(content) => write(&destructive_path, content),
            None => {
                let _ = std::fs::remove_file(&destructive_path);
            }
        }
    }

    /// Make the next `sf project deploy start` exit with `code`
    pub fn fail_deploy_with(&self, code: i32) {
        write(&self.tool_path("deploy-exit"), &code.to_string());
    }

    pub fn deploy_invoked(&self) -> bool {
        self.tool_path("deploy-args").exists()
    }

    /// Arguments of the last `sf project deploy start`
    pub fn deploy_args(&self) -> String {
        std::fs::read_to_string(self.tool_path("deploy-args")).unwrap_or_default()
    }

    /// A file as it was on disk while the deployment ran
    pub fn deployed_file(&self, relative: &str) -> String {
        let path = self.tool_path("deployed").join(relative);
        std::fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("{} was not captured at deploy time: {}", relative, e))
    }

    /// `git status --porcelain` of the project
    pub fn git_status(&self) -> String {
        assert!(self.git, "project is not a git repository");
        let output = git(self.project_root.path(), &["status", "--porcelain"]);
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn stash_count(&self) -> usize {
        let output = git(self.project_root.path(), &["stash", "list"]);
        String::from_utf8_lossy(&output.stdout).lines().count()
    }

    /// Directory holding the run lock and recovery journal
    pub fn state_dir(&self) -> PathBuf {
        if self.git {
            self.project_path(".git/defuse")
        } else {
            self.project_path(".defuse")
        }
    }
}

pub struct TestEnvBuilder {
    files: Vec<(String, String)>,
    project_config: Option<String>,
    user_config: Option<String>,
    init_git: bool,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            project_config: None,
            user_config: None,
            init_git: true,
        }
    }

    /// Add a file to the project, committed when git is enabled
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Write `defuse.toml` at the project root
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.project_config = Some(toml.to_string());
        self
    }

    /// Write `$XDG_CONFIG_HOME/defuse/config.toml`
    pub fn with_user_config(mut self, toml: &str) -> Self {
        self.user_config = Some(toml.to_string());
        self
    }

    pub fn without_git(mut self) -> Self {
        self.init_git = false;
        self
    }

    pub fn build(self) -> TestEnv {
        let project_root = TempDir::new().expect("Failed to create project temp dir");
        let home_dir = TempDir::new().expect("Failed to create home temp dir");
        let tools_dir = TempDir::new().expect("Failed to create tools temp dir");
        let root = project_root.path();

        write(&root.join("sfdx-project.json"), SFDX_PROJECT);
        std::fs::create_dir_all(root.join("force-app/main/default"))
            .expect("Failed to create force-app");
        for (relative, content) in &self.files {
            write(&root.join(relative), content);
        }
        if let Some(toml) = &self.project_config {
            write(&root.join("defuse.toml"), toml);
        }
        if let Some(toml) = &self.user_config {
            write(&home_dir.path().join(".config/defuse/config.toml"), toml);
        }

        if self.init_git {
            git(root, &["init", "-q"]);
            git(root, &["add", "-A"]);
            git(root, &["commit", "-q", "-m", "initial"]);
        }

        write_fake_sf(tools_dir.path(), root);
        let env = TestEnv {
            project_root,
            home_dir,
            tools_dir,
            git: self.init_git,
        };
        env.stage_delta(None);
        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

fn git(dir: &Path, args: &[&str]) -> Output {
    Command::new("git")
        .current_dir(dir)
        .args(["-c", "user.name=defuse-test", "-c", "user.email=test@example.com"])
        .args(["-c", "commit.gpgsign=false", "-c", "core.autocrlf=false"])
        .args(args)
        .output()
        .expect("Failed to run git")
}

/// Write the fake `sf` script into `tools`
fn write_fake_sf(tools: &Path, project: &Path) {
    let script = format!(
        r#"#!/bin/sh
tools='{tools}'
project='{project}'
case "$1 $2" in
  "sgd source")
    out=""
    while [ $# -gt 0 ]; do
      if [ "$1" = "--output-dir" ]; then out="$2"; fi
      shift
    done
    mkdir -p "$out/package"
    cp "$tools/delta/package.xml" "$out/package/package.xml"
    if [ -f "$tools/delta/destructiveChanges.xml" ]; then
      mkdir -p "$out/destructiveChanges"
      cp "$tools/delta/destructiveChanges.xml" "$out/destructiveChanges/destructiveChanges.xml"
    fi
    echo '{{"status":0,"result":{{"success":true}}}}'
    ;;
  "project deploy")
    echo "$@" > "$tools/deploy-args"
    rm -rf "$tools/deployed"
    mkdir -p "$tools/deployed"
    cp -R "$project/force-app" "$tools/deployed/force-app"
    code=0
    if [ -f "$tools/deploy-exit" ]; then code=$(cat "$tools/deploy-exit"); fi
    if [ "$code" = "0" ]; then
      echo "Deploy Succeeded."
    else
      echo "Component Failures [1]: AccountHelper is referenced elsewhere" >&2
    fi
    exit "$code"
    ;;
  *)
    echo "fake sf: unexpected command: $*" >&2
    exit 2
    ;;
esac
"#,
        tools = tools.display(),
        project = project.display(),
    );

    let path = tools.join("sf");
    write(&path, &script);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake sf executable");
    }
}
