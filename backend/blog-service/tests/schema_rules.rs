use std::fs;
use std::path::PathBuf;

/// Concatenated text of every SQL migration, in order.
fn migrations_sql() -> String {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .expect("migrations directory is readable")
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|e| e == "sql").unwrap_or(false))
        .collect();
    paths.sort();

    paths
        .iter()
        .map(|path| fs::read_to_string(path).expect("migration is readable"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn table_block<'a>(sql: &'a str, table: &str) -> &'a str {
    let start = sql
        .find(&format!("CREATE TABLE IF NOT EXISTS {table}"))
        .unwrap_or_else(|| panic!("no CREATE TABLE for {table}"));
    let end = sql[start..].find(';').map(|i| start + i).unwrap_or(sql.len());
    &sql[start..end]
}

#[test]
fn deleting_a_group_keeps_its_posts() {
    let sql = migrations_sql();
    let posts = table_block(&sql, "posts");

    let group_line = posts
        .lines()
        .find(|line| line.contains("group_id"))
        .expect("posts has a group_id column");
    assert!(
        group_line.contains("ON DELETE SET NULL"),
        "posts.group_id must null out on group deletion, not cascade: {group_line}"
    );
}

#[test]
fn deleting_an_author_cascades_to_their_content() {
    let sql = migrations_sql();

    for table in ["posts", "comments"] {
        let block = table_block(&sql, table);
        let author_line = block
            .lines()
            .find(|line| line.contains("author_id"))
            .unwrap_or_else(|| panic!("{table} has an author_id column"));
        assert!(
            author_line.contains("REFERENCES users") && author_line.contains("ON DELETE CASCADE"),
            "{table}.author_id must cascade with its user: {author_line}"
        );
    }
}

#[test]
fn deleting_a_post_cascades_to_its_comments() {
    let sql = migrations_sql();
    let comments = table_block(&sql, "comments");

    let post_line = comments
        .lines()
        .find(|line| line.contains("post_id"))
        .expect("comments has a post_id column");
    assert!(
        post_line.contains("REFERENCES posts") && post_line.contains("ON DELETE CASCADE"),
        "comments.post_id must cascade with its post: {post_line}"
    );
    assert!(
        !post_line.contains("NOT NULL"),
        "comments.post_id stays nullable in the schema: {post_line}"
    );
}

#[test]
fn follow_edges_are_unique_per_pair() {
    let sql = migrations_sql();
    let follows = table_block(&sql, "follows");

    assert!(
        follows.contains("UNIQUE (follower_id, author_id)"),
        "follows must constrain one edge per (follower, author) pair"
    );
}

#[test]
fn comment_text_is_bounded() {
    let sql = migrations_sql();
    let comments = table_block(&sql, "comments");

    let text_line = comments
        .lines()
        .find(|line| line.trim_start().starts_with("text"))
        .expect("comments has a text column");
    assert!(
        text_line.contains("VARCHAR(400)"),
        "comment text must stay bounded at 400 characters: {text_line}"
    );
}

#[test]
fn usernames_are_unique() {
    let sql = migrations_sql();
    let users = table_block(&sql, "users");

    let username_line = users
        .lines()
        .find(|line| line.contains("username"))
        .expect("users has a username column");
    assert!(username_line.contains("UNIQUE"), "{username_line}");
}
