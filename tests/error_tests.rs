//! Error scenario integration tests

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn toastwire_in(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("toastwire").expect("binary is built");
    cmd.env("HOME", config_home.path())
        .env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("TOASTWIRE_APP_NAME")
        .env_remove("TOASTWIRE_AUMI");
    cmd
}

#[test]
fn config_get_unknown_key() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .args(["config", "get", "unknown_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .args(["config", "set", "api_key", "secret"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown key"));
}

#[test]
fn config_set_invalid_policy() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .args(["config", "set", "shortcut_policy", "always"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("shortcut policy"));
}

#[test]
fn config_set_invalid_wait() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .args(["config", "set", "wait_secs", "soon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("wait_secs"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_set_then_get() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .args(["config", "set", "aumi", "Contoso.App"])
        .assert()
        .success();

    toastwire_in(&home)
        .args(["config", "get", "aumi"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Contoso.App"));

    assert!(home.path().join("toastwire").join("config.toml").exists());
}

#[test]
#[cfg(target_os = "linux")]
fn config_init_twice_fails() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home).args(["config", "init"]).assert().success();
    toastwire_in(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
#[cfg(target_os = "linux")]
fn config_list_shows_every_key() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("app_name")
                .and(predicate::str::contains("icon_background_color"))
                .and(predicate::str::contains("wait_secs")),
        );
}

#[test]
#[cfg(not(windows))]
fn shortcut_only_on_unsupported_system() {
    let home = TempDir::new().unwrap();
    toastwire_in(&home)
        .arg("--only-create-shortcut")
        .assert()
        .code(3);
}
