#![allow(deprecated)]

use assert_cmd::Command;
use kubeenv::document::KubeConfig;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SOURCE: &str = r#"apiVersion: v1
kind: Config
preferences: {}
current-context: dev
clusters:
- name: c1
  cluster:
    certificate-authority-data: Q0Ex
    server: https://c1.example.com
- name: c2
  cluster:
    certificate-authority-data: Q0Ey
    server: https://c2.example.com
contexts:
- name: dev
  context:
    cluster: c1
    user: u1
- name: prod
  context:
    cluster: c2
    user: u2
users:
- name: u1
  user:
    token: secret-1
- name: u2
  user:
    token: secret-2
"#;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    fn home(&self) -> &Path {
        self.dir.path()
    }

    fn root(&self) -> PathBuf {
        self.home().join("envs")
    }

    fn env_file(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Writes the source kubeconfig at its default location, ~/.kube/config.
    fn write_default_source(&self) -> PathBuf {
        let kube = self.home().join(".kube");
        fs::create_dir_all(&kube).unwrap();
        let path = kube.join("config");
        fs::write(&path, SOURCE).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("kubeenv").unwrap();
        cmd.env("HOME", self.home())
            .env("KUBEENV_HOME", self.root())
            .env("NO_COLOR", "1")
            .env_remove("KUBEENV")
            .env_remove("KUBECONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    fn load(&self, name: &str) -> KubeConfig {
        KubeConfig::load(&self.env_file(name)).unwrap()
    }
}

#[test]
fn empty_list_prints_hint_and_creates_root() {
    let sb = Sandbox::new();
    sb.cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("No environments yet"));
    assert!(sb.root().is_dir());
}

#[test]
fn add_then_list_sorted_with_active_marker() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "prod", "dev"]).assert().success();

    sb.cmd()
        .env("KUBEENV", "prod")
        .assert()
        .success()
        .stdout(predicate::str::contains("  dev\n* prod\n"));
}

#[test]
fn add_skips_existing_and_creates_the_rest() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "b"]).assert().success();

    sb.cmd()
        .args(["-a", "a", "b", "c"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Environment already exists: b"));

    for name in ["a", "b", "c"] {
        assert!(sb.env_file(name).is_file(), "{name} missing");
    }
}

#[cfg(unix)]
#[test]
fn added_env_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let sb = Sandbox::new();
    sb.cmd().args(["-a", "dev"]).assert().success();
    let mode = fs::metadata(sb.env_file("dev")).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn add_rejects_invalid_names() {
    let sb = Sandbox::new();
    sb.cmd()
        .args(["-a", "../escape"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid environment name"));
}

#[test]
fn delete_missing_env_is_a_no_op() {
    let sb = Sandbox::new();
    sb.cmd().args(["-d", "ghost"]).assert().success().code(0);
}

#[test]
fn delete_removes_env() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "dev", "prod"]).assert().success();
    sb.cmd().args(["-d", "dev"]).assert().success();
    assert!(!sb.env_file("dev").exists());
    assert!(sb.env_file("prod").exists());
}

#[test]
fn rename_moves_content() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "old"]).assert().success();
    fs::write(sb.env_file("old"), SOURCE).unwrap();

    sb.cmd().arg("new=old").assert().success();

    assert!(!sb.env_file("old").exists());
    assert_eq!(fs::read_to_string(sb.env_file("new")).unwrap(), SOURCE);
}

#[test]
fn rename_onto_existing_fails_without_changes() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "a", "b"]).assert().success();
    fs::write(sb.env_file("a"), "kind: Config\n").unwrap();

    sb.cmd()
        .arg("b=a")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists: b"));

    assert_eq!(fs::read_to_string(sb.env_file("a")).unwrap(), "kind: Config\n");
    assert_eq!(fs::read_to_string(sb.env_file("b")).unwrap(), "");
}

#[test]
fn rename_dot_uses_active_env() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "dev"]).assert().success();

    sb.cmd()
        .arg("dev2=.")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active environment"));

    sb.cmd()
        .env("KUBEENV", "dev")
        .arg("dev2=.")
        .assert()
        .success();
    assert!(sb.env_file("dev2").exists());
}

#[test]
fn current_prints_active_name() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "dev"]).assert().success();

    sb.cmd()
        .env("KUBEENV", "dev")
        .env("KUBECONFIG", sb.env_file("dev"))
        .arg("-c")
        .assert()
        .success()
        .stdout("dev\n");

    sb.cmd().arg("--current").assert().failure().code(1);
}

#[test]
fn import_all_from_default_source() {
    let sb = Sandbox::new();
    sb.write_default_source();

    sb.cmd().arg("-i").assert().success();

    for (env, cluster, user) in [("dev", "c1", "u1"), ("prod", "c2", "u2")] {
        let doc = sb.load(env);
        assert_eq!(doc.current_context.as_deref(), Some(env));
        assert_eq!(doc.api_version.as_deref(), Some("v1"));
        assert_eq!(doc.context_names(), vec![env]);
        assert_eq!(doc.clusters.len(), 1);
        assert_eq!(doc.clusters[0].name, cluster);
        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.users[0].name, user);
    }
}

#[test]
fn import_one_is_idempotent() {
    let sb = Sandbox::new();
    let source = sb.home().join("other.yaml");
    fs::write(&source, SOURCE).unwrap();
    let source = source.to_str().unwrap();

    sb.cmd().args(["-i", "work", "prod", source]).assert().success();
    let first = fs::read_to_string(sb.env_file("work")).unwrap();

    sb.cmd()
        .args(["-i", "work", "prod", source])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in environment work"));

    assert_eq!(fs::read_to_string(sb.env_file("work")).unwrap(), first);
    let doc = sb.load("work");
    assert_eq!(doc.find_cluster("c2").unwrap().cluster.server.as_deref(), Some("https://c2.example.com"));
}

#[test]
fn import_unknown_context_fails_and_writes_nothing() {
    let sb = Sandbox::new();
    sb.write_default_source();

    sb.cmd()
        .args(["-i", "work", "staging"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Context not found: staging"));

    assert!(!sb.env_file("work").exists());
}

#[test]
fn import_refuses_same_named_cluster_from_another_file() {
    let sb = Sandbox::new();
    let k3s = |context: &str, server: &str| {
        format!(
            "apiVersion: v1\nkind: Config\n\
             clusters:\n- name: default\n  cluster:\n    server: {server}\n\
             contexts:\n- name: {context}\n  context:\n    cluster: default\n    user: default\n\
             users:\n- name: default\n  user:\n    token: token-{context}\n"
        )
    };
    let first = sb.home().join("a.yaml");
    let second = sb.home().join("b.yaml");
    fs::write(&first, k3s("a", "https://a.example")).unwrap();
    fs::write(&second, k3s("b", "https://b.example")).unwrap();

    sb.cmd()
        .args(["-i", "work", "a", first.to_str().unwrap()])
        .assert()
        .success();
    let before = fs::read_to_string(sb.env_file("work")).unwrap();

    sb.cmd()
        .args(["-i", "work", "b", second.to_str().unwrap()])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Cluster already exists: default"));

    assert_eq!(fs::read_to_string(sb.env_file("work")).unwrap(), before);
}

#[test]
fn import_malformed_source_fails() {
    let sb = Sandbox::new();
    let source = sb.home().join("bad.yaml");
    fs::write(&source, "contexts: [ {name: dev").unwrap();

    sb.cmd()
        .args(["-i", source.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"));
}

#[cfg(unix)]
#[test]
fn switch_replaces_process_with_env_exported() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "dev"]).assert().success();

    // env(1) as the "shell" prints the environment it was started with
    sb.cmd()
        .env("SHELL", "/usr/bin/env")
        .arg("dev")
        .assert()
        .success()
        .stdout(predicate::str::contains("KUBEENV=dev\n"))
        .stdout(predicate::str::contains(format!(
            "KUBECONFIG={}\n",
            sb.env_file("dev").display()
        )));
}

#[test]
fn switch_to_missing_env_fails() {
    let sb = Sandbox::new();
    sb.cmd()
        .env("SHELL", "/usr/bin/env")
        .arg("ghost")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Environment not found: ghost"));
}

#[test]
fn switch_with_missing_shell_reports_launch_error() {
    let sb = Sandbox::new();
    sb.cmd().args(["-a", "dev"]).assert().success();
    sb.cmd()
        .env("SHELL", "/nonexistent/kubeenv-shell")
        .arg("dev")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to launch shell"));
}

#[test]
fn verbose_flag_enables_debug_logs() {
    let sb = Sandbox::new();
    sb.cmd()
        .arg("-vv")
        .assert()
        .success()
        .stderr(predicate::str::contains("configuration loaded"));
}

#[test]
fn help_exits_zero() {
    let sb = Sandbox::new();
    sb.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("kubeenv -i ENV CONTEXT [SOURCE]"));
}
