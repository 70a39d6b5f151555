use std::fs;
use std::path::{Path, PathBuf};

fn collect_rs_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        if let Ok(read_dir) = fs::read_dir(&dir) {
            for entry in read_dir.flatten() {
                let path = entry.path();
                if path.is_dir() {
                    stack.push(path);
                } else if path.extension().map(|e| e == "rs").unwrap_or(false) {
                    files.push(path);
                }
            }
        }
    }
    files
}

fn file_contains(path: &Path, needle: &str) -> bool {
    fs::read_to_string(path)
        .map(|c| c.contains(needle))
        .unwrap_or(false)
}

fn src_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src")
}

#[test]
fn post_mutations_live_only_in_the_post_repository() {
    let allowed = ["src/db/post_repo.rs"];

    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root()) {
        let path_str = file.to_string_lossy().replace('\\', "/");
        if allowed.iter().any(|a| path_str.ends_with(a)) {
            continue;
        }
        if file_contains(&file, "UPDATE posts") || file_contains(&file, "DELETE FROM posts") {
            offenders.push(path_str.to_string());
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Post writes must go through db::post_repo only. Offenders: {:?}",
            offenders
        );
    }
}

#[test]
fn post_mutations_always_scope_by_author() {
    let repo = src_root().join("db/post_repo.rs");
    let contents = fs::read_to_string(&repo).expect("post_repo.rs is readable");

    let mut checked = 0;
    for needle in ["UPDATE posts", "DELETE FROM posts"] {
        let mut from = 0;
        while let Some(found) = contents[from..].find(needle) {
            let start = from + found;
            let window_end = (start + 300).min(contents.len());
            let window = &contents[start..window_end];
            assert!(
                window.contains("author_id"),
                "statement at byte {start} mutates posts without an author_id guard:\n{window}"
            );
            checked += 1;
            from = start + needle.len();
        }
    }

    assert!(checked >= 2, "expected at least an update and a delete path");
}

#[test]
fn follow_writes_live_only_in_the_follow_repository() {
    let allowed = ["src/db/follow_repo.rs"];

    let mut offenders = Vec::new();
    for file in collect_rs_files(&src_root()) {
        let path_str = file.to_string_lossy().replace('\\', "/");
        if allowed.iter().any(|a| path_str.ends_with(a)) {
            continue;
        }
        if file_contains(&file, "INSERT INTO follows") || file_contains(&file, "DELETE FROM follows")
        {
            offenders.push(path_str.to_string());
        }
    }

    if !offenders.is_empty() {
        panic!(
            "Follow edge writes must go through db::follow_repo only. Offenders: {:?}",
            offenders
        );
    }
}

#[test]
fn follow_inserts_are_idempotent() {
    let repo = src_root().join("db/follow_repo.rs");
    assert!(
        file_contains(&repo, "ON CONFLICT (follower_id, author_id) DO NOTHING"),
        "follow insert must tolerate an existing (follower, author) edge"
    );
}

#[test]
fn creation_timestamps_are_never_rewritten() {
    for file in collect_rs_files(&src_root()) {
        assert!(
            !file_contains(&file, "SET created_at"),
            "{} rewrites a creation timestamp",
            file.display()
        );
    }
}
