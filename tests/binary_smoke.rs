// use macro form directly; no import needed
use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn relocate_cmd(config_dir: &std::path::Path) -> Command {
    let me = assert_cmd::cargo::cargo_bin!("relocate");
    let mut cmd = Command::new(me);
    // Point at a config file that does not exist so the host's config is never read.
    cmd.env("RELOCATE_CONFIG", config_dir.join("config.xml"));
    cmd
}

#[test]
fn binary_print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = relocate_cmd(td.path())
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(String::from_utf8_lossy(&out.stdout).contains("RELOCATE_CONFIG"));
}

#[test]
fn binary_moves_a_tree() {
    let td = tempdir().unwrap();
    fs::write(
        td.path().join("config.xml"),
        "<config><log_level>quiet</log_level></config>",
    )
    .unwrap();
    let src = td.path().join("src");
    fs::create_dir_all(src.join("nested")).unwrap();
    fs::write(src.join("nested/file.txt"), b"payload").unwrap();
    let dest = td.path().join("dest");

    let out = relocate_cmd(td.path())
        .args(["move", "--force-recursive"])
        .arg(&src)
        .arg(&dest)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert!(!src.exists());
    assert_eq!(fs::read(dest.join("nested/file.txt")).unwrap(), b"payload");
}

#[test]
fn binary_missing_source_fails_with_code() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("config.xml"), "<config/>").unwrap();
    let out = relocate_cmd(td.path())
        .arg("move")
        .arg(td.path().join("absent"))
        .arg(td.path().join("dest"))
        .output()
        .expect("spawn binary");

    assert_eq!(out.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error:"));
}

#[test]
fn binary_missing_explicit_config_fails() {
    let td = tempdir().unwrap();
    let out = relocate_cmd(td.path())
        .args(["same-path", "a", "a"])
        .output()
        .expect("spawn binary");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("RELOCATE_CONFIG"));
}

#[test]
fn binary_same_path_prints_answer() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("config.xml"), "<config/>").unwrap();
    let a = td.path().join("Dir");
    let b = format!("{}/", td.path().join("dir").display());

    let out = relocate_cmd(td.path())
        .arg("same-path")
        .arg(&a)
        .arg(&b)
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).lines().last(), Some("true"));
}

#[cfg(unix)]
#[test]
fn binary_is_reparse_prints_answer() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("config.xml"), "<config/>").unwrap();
    let target = td.path().join("target");
    fs::create_dir(&target).unwrap();
    let link = td.path().join("link");
    std::os::unix::fs::symlink(&target, &link).unwrap();

    for (path, expected) in [(&link, "true"), (&target, "false")] {
        let out = relocate_cmd(td.path())
            .arg("is-reparse")
            .arg(path)
            .output()
            .expect("spawn binary");
        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout).lines().last(), Some(expected));
    }
}

#[test]
fn binary_delete_dry_run_keeps_tree() {
    let td = tempdir().unwrap();
    fs::write(td.path().join("config.xml"), "<config/>").unwrap();
    let victim = td.path().join("victim");
    fs::create_dir_all(victim.join("a")).unwrap();

    let out = relocate_cmd(td.path())
        .args(["delete", "--dry-run"])
        .arg(&victim)
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(victim.join("a").is_dir());

    let out = relocate_cmd(td.path())
        .arg("delete")
        .arg(&victim)
        .output()
        .expect("spawn binary");
    assert!(out.status.success());
    assert!(!victim.exists());
}
