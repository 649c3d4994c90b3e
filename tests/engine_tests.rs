use hooksync::sync::marker::Marker;
use hooksync::uninstall::default_preserved;
use hooksync::{compute_signature, sync, uninstall, HookError, Outcome};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

fn project() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("hooks");
    let target = temp_dir.path().join(".git").join("hooks");
    fs::create_dir_all(&source).unwrap();
    (temp_dir, source, target)
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_signature_is_deterministic() {
    let (_temp_dir, source, _target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();
    fs::write(source.join("pre-push"), "echo B").unwrap();

    let first = compute_signature(&source).unwrap();
    let second = compute_signature(&source).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_signature_ignores_creation_order_and_mtime() {
    let temp_dir = TempDir::new().unwrap();
    let a = temp_dir.path().join("a");
    let b = temp_dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();

    fs::write(a.join("pre-commit"), "echo A").unwrap();
    fs::write(a.join("commit-msg"), "echo M").unwrap();
    fs::write(b.join("commit-msg"), "echo M").unwrap();
    fs::write(b.join("pre-commit"), "echo A").unwrap();

    let old = SystemTime::now() - Duration::from_secs(86_400);
    fs::File::options()
        .write(true)
        .open(b.join("pre-commit"))
        .unwrap()
        .set_modified(old)
        .unwrap();

    assert_eq!(compute_signature(&a).unwrap(), compute_signature(&b).unwrap());
}

#[test]
fn test_signature_is_content_and_name_sensitive() {
    let (_temp_dir, source, _target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();
    let original = compute_signature(&source).unwrap();

    fs::write(source.join("pre-commit"), "echo B").unwrap();
    let edited = compute_signature(&source).unwrap();
    assert_ne!(original, edited);

    fs::write(source.join("pre-commit"), "echo A").unwrap();
    fs::rename(source.join("pre-commit"), source.join("pre-push")).unwrap();
    let renamed = compute_signature(&source).unwrap();
    assert_ne!(original, renamed);
}

#[test]
fn test_second_sync_performs_no_writes() {
    let (_temp_dir, source, target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();

    sync(&source, &target).unwrap();
    let marker_mtime = fs::metadata(target.join(".installed"))
        .unwrap()
        .modified()
        .unwrap();
    let hook_mtime = fs::metadata(target.join("pre-commit"))
        .unwrap()
        .modified()
        .unwrap();

    let report = sync(&source, &target).unwrap();

    assert!(matches!(report.outcome, Outcome::Unchanged { .. }));
    assert_eq!(
        fs::metadata(target.join(".installed")).unwrap().modified().unwrap(),
        marker_mtime
    );
    assert_eq!(
        fs::metadata(target.join("pre-commit")).unwrap().modified().unwrap(),
        hook_mtime
    );
}

#[test]
fn test_sync_removes_stale_files() {
    let (_temp_dir, source, target) = project();
    fs::write(source.join("pre-commit"), "#!/bin/sh\necho 'New hook'").unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("pre-commit"), "#!/bin/sh\necho 'Old hook'").unwrap();
    fs::write(target.join("custom-hook"), "#!/bin/sh\necho 'Should be removed'").unwrap();

    sync(&source, &target).unwrap();

    assert_eq!(file_names(&target), vec![".installed", "pre-commit"]);
    let content = fs::read_to_string(target.join("pre-commit")).unwrap();
    assert!(content.contains("New hook"));
}

#[cfg(unix)]
#[test]
fn test_synced_hooks_are_executable() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp_dir, source, target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();
    fs::write(source.join("pre-push"), "echo B").unwrap();
    fs::set_permissions(source.join("pre-push"), fs::Permissions::from_mode(0o600)).unwrap();

    sync(&source, &target).unwrap();

    for name in ["pre-commit", "pre-push"] {
        let mode = fs::metadata(target.join(name)).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111, "{} is not executable", name);
    }
}

#[test]
fn test_empty_source_installs_only_marker() {
    let (_temp_dir, source, target) = project();

    let report = sync(&source, &target).unwrap();

    match report.outcome {
        Outcome::Changed { signature, installed } => {
            assert!(signature.is_empty());
            assert!(installed.is_empty());
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(file_names(&target), vec![".installed"]);
    assert_eq!(fs::read_to_string(target.join(".installed")).unwrap(), "");
}

#[test]
fn test_missing_source_leaves_target_untouched() {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join(".git").join("hooks");
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("pre-commit.sample"), "sample").unwrap();
    fs::write(target.join(".installed"), "stale").unwrap();

    let report = sync(&temp_dir.path().join("hooks"), &target).unwrap();

    assert_eq!(report.outcome, Outcome::Skipped);
    assert_eq!(file_names(&target), vec![".installed", "pre-commit.sample"]);
    assert_eq!(fs::read_to_string(target.join(".installed")).unwrap(), "stale");
}

#[cfg(unix)]
#[test]
fn test_unreadable_source_entry_surfaces_io_error() {
    let (temp_dir, source, target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();
    std::os::unix::fs::symlink(temp_dir.path().join("missing.sh"), source.join("pre-push"))
        .unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(target.join("pre-commit"), "old").unwrap();

    let err = sync(&source, &target).unwrap_err();

    match err {
        HookError::Io { path, .. } => assert_eq!(path, source.join("pre-push")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!target.join(".installed").exists());
    assert_eq!(fs::read_to_string(target.join("pre-commit")).unwrap(), "old");
}

#[test]
fn test_edit_then_resync_scenario() {
    let (_temp_dir, source, target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();

    let first = sync(&source, &target).unwrap();
    let s1 = first.outcome.signature().unwrap().clone();
    assert_eq!(
        s1.as_str(),
        format!("pre-commit:{}", blake3::hash(b"echo A").to_hex())
    );
    assert_eq!(fs::read_to_string(target.join(".installed")).unwrap(), s1.as_str());

    fs::write(source.join("pre-commit"), "echo B").unwrap();
    let second = sync(&source, &target).unwrap();
    let s2 = second.outcome.signature().unwrap().clone();

    assert!(second.outcome.is_changed());
    assert_ne!(s1, s2);
    assert_eq!(fs::read_to_string(target.join("pre-commit")).unwrap(), "echo B");
    assert_eq!(
        Marker::new(&target, ".installed").read().unwrap(),
        Some(s2)
    );
}

#[test]
fn test_uninstall_after_sync_keeps_gitignore() {
    let (_temp_dir, source, target) = project();
    fs::write(source.join("pre-commit"), "echo A").unwrap();
    sync(&source, &target).unwrap();
    fs::write(target.join(".gitignore"), "*").unwrap();

    let report = uninstall(&target, &default_preserved()).unwrap();

    assert_eq!(report.removed, vec![".installed", "pre-commit"]);
    assert_eq!(file_names(&target), vec![".gitignore"]);

    // Reinstall works against the surviving directory.
    let report = sync(&source, &target).unwrap();
    assert!(report.outcome.is_changed());
    assert_eq!(file_names(&target), vec![".installed", "pre-commit"]);
}
