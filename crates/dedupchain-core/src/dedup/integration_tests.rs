//! Integration tests for tree comparison, pruning and chain scheduling

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use filetime::{FileTime, set_file_mtime};
use tempfile::TempDir;

use super::{CancelToken, DedupEngine, DeletionExecutor, TreeComparator};
use crate::comparison::DeleteRule;
use crate::config::Policy;

fn setup_test_dirs() -> (TempDir, PathBuf, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let reference = tmp.path().join("reference");
    let candidate = tmp.path().join("candidate");
    fs::create_dir_all(&reference).unwrap();
    fs::create_dir_all(&candidate).unwrap();
    (tmp, reference, candidate)
}

fn create_test_file(dir: &Path, rel_path: &str, content: &str) -> PathBuf {
    let path = dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

fn set_age(path: &Path, secs_ago: u64) {
    let when = SystemTime::now() - Duration::from_secs(secs_ago);
    set_file_mtime(path, FileTime::from_system_time(when)).unwrap();
}

fn compare(policy: &Policy, reference: &Path, candidate: &Path) -> super::DedupResult {
    TreeComparator::new(policy, DeletionExecutor::new(false), CancelToken::new())
        .compare(reference, candidate)
        .unwrap()
}

#[test]
fn test_identical_files_deleted_from_candidate_only() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "2019/beach.jpg", "sand");
    create_test_file(&candidate, "2019/beach.jpg", "sand");
    create_test_file(&reference, "2019/deep/nested/sea.jpg", "water");
    create_test_file(&candidate, "2019/deep/nested/sea.jpg", "water");

    let result = compare(&Policy::default(), &reference, &candidate);

    assert_eq!(result.deleted, 2);
    assert_eq!(result.deleted_by(DeleteRule::ByHash), 2);
    assert!(result.conflicts.is_empty());
    assert!(result.is_success());
    assert!(!candidate.join("2019/beach.jpg").exists());
    assert!(!candidate.join("2019/deep/nested/sea.jpg").exists());
    assert!(reference.join("2019/beach.jpg").exists());
    assert!(reference.join("2019/deep/nested/sea.jpg").exists());
}

#[test]
fn test_different_content_kept_and_reported_once() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    let ref_file = create_test_file(&reference, "album/cat.jpg", "original");
    let cand_file = create_test_file(&candidate, "album/cat.jpg", "edited");

    let result = compare(&Policy::default(), &reference, &candidate);

    assert_eq!(result.deleted, 0);
    assert_eq!(result.conflicts.len(), 1);
    assert_eq!(result.conflicts[0].reference, ref_file);
    assert_eq!(result.conflicts[0].candidate, cand_file);
    assert!(ref_file.exists());
    assert!(cand_file.exists());
}

#[test]
fn test_unmatched_files_untouched() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "album/only-in-ref.jpg", "a");
    create_test_file(&candidate, "album/only-in-cand.jpg", "a");
    create_test_file(&candidate, "other/only-in-cand.jpg", "a");

    let result = compare(&Policy::default(), &reference, &candidate);

    assert_eq!(result.deleted, 0);
    assert!(result.conflicts.is_empty());
    assert!(candidate.join("album/only-in-cand.jpg").exists());
    assert!(candidate.join("other/only-in-cand.jpg").exists());
}

#[test]
fn test_smaller_and_older_matrix() {
    // (candidate older, candidate smaller, expect deletion)
    let cases = [
        (true, true, true),
        (true, false, false),
        (false, true, false),
        (false, false, false),
    ];

    for (older, smaller, expect_deleted) in cases {
        let (_tmp, reference, candidate) = setup_test_dirs();
        let ref_file = create_test_file(&reference, "docs/report.txt", "reference body");
        let cand_body = if smaller { "short" } else { "a much longer candidate body" };
        let cand_file = create_test_file(&candidate, "docs/report.txt", cand_body);

        set_age(&ref_file, 1_000);
        set_age(&cand_file, if older { 5_000 } else { 10 });

        let policy = Policy {
            delete_if_smaller_and_older: true,
            ..Policy::default()
        };
        let result = compare(&policy, &reference, &candidate);

        assert_eq!(
            !cand_file.exists(),
            expect_deleted,
            "older={older} smaller={smaller}"
        );
        if expect_deleted {
            assert_eq!(result.deleted_by(DeleteRule::BySizeAndAge), 1);
            assert!(result.conflicts.is_empty());
        } else {
            assert_eq!(result.conflicts.len(), 1);
        }
        assert!(ref_file.exists());
    }
}

#[test]
fn test_force_all_extensions_deletes_without_conflict() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "trip/photo.jpg", "reference bytes");
    create_test_file(&candidate, "trip/photo.jpg", "different bytes");

    let policy = Policy {
        force_delete_extensions: vec!["*".to_string()],
        ..Policy::default()
    };
    let result = compare(&policy, &reference, &candidate);

    assert!(!candidate.join("trip/photo.jpg").exists());
    assert_eq!(result.deleted_by(DeleteRule::ByExtension), 1);
    assert!(result.conflicts.is_empty());
}

#[test]
fn test_trailing_star_does_not_force_other_extensions() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "trip/photo.png", "reference bytes");
    create_test_file(&candidate, "trip/photo.png", "different bytes");
    create_test_file(&reference, "trip/photo.jpg", "reference bytes");
    create_test_file(&candidate, "trip/photo.jpg", "different bytes");

    let policy = Policy {
        force_delete_extensions: vec![".jpg".to_string(), "*".to_string()],
        ..Policy::default()
    };
    let result = compare(&policy, &reference, &candidate);

    assert!(candidate.join("trip/photo.png").exists());
    assert!(!candidate.join("trip/photo.jpg").exists());
    assert_eq!(result.deleted, 1);
    assert_eq!(result.deleted_by(DeleteRule::ByExtension), 1);
    assert_eq!(result.conflicts.len(), 1);
}

#[test]
fn test_force_by_name_deletes_different_content() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "a/notes.txt", "one");
    create_test_file(&candidate, "a/notes.txt", "two");

    let policy = Policy {
        force_delete_by_name: true,
        ..Policy::default()
    };
    let result = compare(&policy, &reference, &candidate);

    assert!(!candidate.join("a/notes.txt").exists());
    assert_eq!(result.deleted_by(DeleteRule::ByName), 1);
}

#[test]
fn test_hidden_directory_never_visited_when_excluded() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, ".cache/thumb.db", "same");
    create_test_file(&candidate, ".cache/thumb.db", "same");
    create_test_file(&reference, "album/.hidden.jpg", "same");
    create_test_file(&candidate, "album/.hidden.jpg", "same");
    create_test_file(&reference, "album/.cache/inner.jpg", "same");
    create_test_file(&candidate, "album/.cache/inner.jpg", "same");

    let policy = Policy {
        include_hidden: false,
        ..Policy::default()
    };
    let result = compare(&policy, &reference, &candidate);

    assert_eq!(result.deleted, 0);
    assert!(candidate.join(".cache/thumb.db").exists());
    assert!(candidate.join("album/.hidden.jpg").exists());
    assert!(candidate.join("album/.cache/inner.jpg").exists());
}

#[test]
fn test_hidden_entries_compared_when_included() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, ".cache/thumb.db", "same");
    create_test_file(&candidate, ".cache/thumb.db", "same");
    create_test_file(&reference, "album/.hidden.jpg", "same");
    create_test_file(&candidate, "album/.hidden.jpg", "same");

    let result = compare(&Policy::default(), &reference, &candidate);

    assert_eq!(result.deleted, 2);
    assert!(!candidate.join(".cache/thumb.db").exists());
    assert!(!candidate.join("album/.hidden.jpg").exists());
}

#[test]
fn test_cache_marker_removed_independent_of_reference() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "album/photo.jpg", "ref");
    create_test_file(&candidate, "album/.DS_Store", "finder metadata");
    create_test_file(&candidate, "unmatched/.DS_Store", "finder metadata");

    let result = compare(&Policy::default(), &reference, &candidate);

    assert!(!candidate.join("album/.DS_Store").exists());
    assert_eq!(result.deleted_by(DeleteRule::CacheMarker), 1);
    // No counterpart directory in the reference tree
    assert!(candidate.join("unmatched/.DS_Store").exists());
}

#[test]
fn test_cache_marker_kept_when_disabled() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    fs::create_dir_all(reference.join("album")).unwrap();
    create_test_file(&candidate, "album/.DS_Store", "finder metadata");

    let policy = Policy {
        remove_cache_files: false,
        ..Policy::default()
    };
    compare(&policy, &reference, &candidate);

    assert!(candidate.join("album/.DS_Store").exists());
}

#[test]
fn test_root_files_only_compared_when_enabled() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "top.txt", "same");
    create_test_file(&candidate, "top.txt", "same");

    compare(&Policy::default(), &reference, &candidate);
    assert!(candidate.join("top.txt").exists());

    let policy = Policy {
        compare_root_files: true,
        ..Policy::default()
    };
    let result = compare(&policy, &reference, &candidate);
    assert!(!candidate.join("top.txt").exists());
    assert_eq!(result.deleted, 1);
}

#[test]
fn test_second_pass_is_idempotent() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "a/same.txt", "same");
    create_test_file(&candidate, "a/same.txt", "same");
    create_test_file(&reference, "a/diff.txt", "one");
    create_test_file(&candidate, "a/diff.txt", "two");

    let engine = DedupEngine::new(Policy::default(), false).unwrap();
    let first = engine.run_pair(&reference, &candidate).unwrap();
    let second = engine.run_pair(&reference, &candidate).unwrap();

    assert_eq!(first.deleted, 1);
    assert_eq!(second.deleted, 0);
    assert!(second.errors.is_empty());
    assert!(second.pruned.is_empty());
}

#[test]
fn test_pair_prunes_emptied_directories() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "2019/jan/a.jpg", "a");
    create_test_file(&candidate, "2019/jan/a.jpg", "a");
    create_test_file(&candidate, "2019/jan/.DS_Store", "meta");
    create_test_file(&reference, "2019/feb/b.jpg", "b");
    create_test_file(&candidate, "2019/feb/b.jpg", "changed");

    let engine = DedupEngine::new(Policy::default(), false).unwrap();
    let result = engine.run_pair(&reference, &candidate).unwrap();

    assert!(!candidate.join("2019/jan").exists());
    assert!(candidate.join("2019/feb/b.jpg").exists());
    assert_eq!(result.pruned, vec![candidate.join("2019/jan")]);
}

#[test]
fn test_priority_chain_leaves_file_only_in_first_tree() {
    let tmp = TempDir::new().unwrap();
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    let c = tmp.path().join("c");
    create_test_file(&a, "photos/x.jpg", "pixels");
    create_test_file(&b, "photos/x.jpg", "pixels");
    create_test_file(&c, "photos/x.jpg", "pixels");
    create_test_file(&c, "keep/unique.txt", "only here");

    let engine = DedupEngine::new(Policy::default(), false).unwrap();
    let report = engine.run_chain(&[a.clone(), b.clone(), c.clone()]).unwrap();

    assert!(a.join("photos/x.jpg").exists());
    assert!(!b.join("photos/x.jpg").exists());
    assert!(!c.join("photos/x.jpg").exists());
    assert!(c.join("keep/unique.txt").exists());
    // b held nothing else and was pruned away entirely
    assert!(!b.exists());
    assert_eq!(report.total().deleted, 2);
}

#[test]
fn test_priority_chain_later_tree_arbitrates_further_trees() {
    let tmp = TempDir::new().unwrap();
    let a = tmp.path().join("a");
    let b = tmp.path().join("b");
    let c = tmp.path().join("c");
    create_test_file(&a, "docs/anchor.txt", "anchor");
    create_test_file(&b, "docs/draft.txt", "draft v1");
    create_test_file(&c, "docs/draft.txt", "draft v1");

    let engine = DedupEngine::new(Policy::default(), false).unwrap();
    let report = engine.run_chain(&[a, b.clone(), c.clone()]).unwrap();

    assert!(b.join("docs/draft.txt").exists());
    assert!(!c.join("docs/draft.txt").exists());
    assert_eq!(report.pairs.len(), 3);
    assert_eq!(report.pairs[2].result.deleted, 1);
}

#[test]
fn test_dry_run_deletes_nothing() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "a/same.txt", "same");
    create_test_file(&candidate, "a/same.txt", "same");
    create_test_file(&candidate, "a/.DS_Store", "meta");

    let engine = DedupEngine::new(Policy::default(), true).unwrap();
    let result = engine.run_pair(&reference, &candidate).unwrap();

    assert_eq!(result.deleted, 2);
    assert!(candidate.join("a/same.txt").exists());
    assert!(candidate.join("a/.DS_Store").exists());
    assert!(result.pruned.is_empty());
}

#[test]
fn test_parallel_and_sequential_agree() {
    let build = || {
        let (tmp, reference, candidate) = setup_test_dirs();
        for i in 0..20 {
            let name = format!("batch/file{i:02}.bin");
            create_test_file(&reference, &name, &format!("content {i}"));
            let body = if i % 3 == 0 { format!("changed {i}") } else { format!("content {i}") };
            create_test_file(&candidate, &name, &body);
        }
        (tmp, reference, candidate)
    };

    let (_t1, r1, c1) = build();
    let (_t2, r2, c2) = build();

    let parallel = compare(&Policy::default(), &r1, &c1);
    let sequential = compare(
        &Policy {
            parallel_hashing: false,
            ..Policy::default()
        },
        &r2,
        &c2,
    );

    assert_eq!(parallel.deleted, sequential.deleted);
    assert_eq!(parallel.deleted, 13);
    let names = |result: &super::DedupResult| -> Vec<_> {
        result
            .conflicts
            .iter()
            .map(|c| c.candidate.file_name().unwrap().to_owned())
            .collect()
    };
    assert_eq!(names(&parallel), names(&sequential));
}

#[test]
fn test_root_prefix_inside_path_does_not_confuse_counterpart() {
    let tmp = TempDir::new().unwrap();
    let reference = tmp.path().join("data");
    let candidate = tmp.path().join("copy");
    create_test_file(&reference, "data/inner.txt", "same");
    create_test_file(&candidate, "data/inner.txt", "same");

    let result = compare(&Policy::default(), &reference, &candidate);

    assert_eq!(result.deleted, 1);
    assert!(!candidate.join("data/inner.txt").exists());
    assert!(reference.join("data/inner.txt").exists());
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(unix)]
#[test]
fn test_unreadable_candidate_recorded_and_siblings_processed() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "docs/a.txt", "alpha");
    create_test_file(&candidate, "docs/a.txt", "alpha");
    create_test_file(&reference, "docs/secret.txt", "same");
    let secret = create_test_file(&candidate, "docs/secret.txt", "same");
    create_test_file(&reference, "docs/z.txt", "omega");
    create_test_file(&candidate, "docs/z.txt", "omega");

    set_mode(&secret, 0o000);
    if fs::read(&secret).is_ok() {
        // Permission bits are not enforced (running as root)
        set_mode(&secret, 0o644);
        return;
    }

    let result = compare(&Policy::default(), &reference, &candidate);
    set_mode(&secret, 0o644);

    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("secret.txt"));
    assert_eq!(result.deleted, 2);
    assert!(!candidate.join("docs/a.txt").exists());
    assert!(!candidate.join("docs/z.txt").exists());
    assert!(secret.exists());
    assert!(!result.is_success());
}

#[cfg(unix)]
#[test]
fn test_failed_delete_recorded_and_walk_continues() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "locked/dup.txt", "same");
    create_test_file(&candidate, "locked/dup.txt", "same");
    create_test_file(&reference, "open/dup.txt", "same");
    create_test_file(&candidate, "open/dup.txt", "same");

    let locked = candidate.join("locked");
    set_mode(&locked, 0o555);
    if fs::write(locked.join("write_check"), "x").is_ok() {
        set_mode(&locked, 0o755);
        return;
    }

    let result = compare(&Policy::default(), &reference, &candidate);
    set_mode(&locked, 0o755);

    assert_eq!(result.errors.len(), 1);
    assert!(candidate.join("locked/dup.txt").exists());
    assert!(!candidate.join("open/dup.txt").exists());
    assert_eq!(result.deleted, 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_reference_directory_skips_only_that_subtree() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "closed/dup.txt", "same");
    create_test_file(&candidate, "closed/dup.txt", "same");
    create_test_file(&reference, "closed/inner/deep.txt", "deep");
    create_test_file(&candidate, "closed/inner/deep.txt", "deep");
    create_test_file(&reference, "open/dup.txt", "same");
    create_test_file(&candidate, "open/dup.txt", "same");

    let closed = reference.join("closed");
    set_mode(&closed, 0o000);
    if fs::read_dir(&closed).is_ok() {
        set_mode(&closed, 0o755);
        return;
    }

    let result = compare(&Policy::default(), &reference, &candidate);
    set_mode(&closed, 0o755);

    // Listing and descent failures of one directory count once
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("closed"));
    assert!(candidate.join("closed/dup.txt").exists());
    assert!(candidate.join("closed/inner/deep.txt").exists());
    assert!(!candidate.join("open/dup.txt").exists());
    assert_eq!(result.deleted, 1);
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_without_counterpart_reported_once() {
    let (_tmp, reference, candidate) = setup_test_dirs();
    create_test_file(&reference, "closed/only.txt", "x");
    create_test_file(&reference, "open/dup.txt", "same");
    create_test_file(&candidate, "open/dup.txt", "same");

    let closed = reference.join("closed");
    set_mode(&closed, 0o000);
    if fs::read_dir(&closed).is_ok() {
        set_mode(&closed, 0o755);
        return;
    }

    let result = compare(&Policy::default(), &reference, &candidate);
    set_mode(&closed, 0o755);

    assert_eq!(result.errors.len(), 1);
    assert!(!candidate.join("open/dup.txt").exists());
}
