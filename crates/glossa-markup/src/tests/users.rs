use crate::*;
use std::collections::BTreeSet;

#[test]
fn profile_url_defaults_to_user_page() {
    let user = User::new("alice", "Alice A");
    assert_eq!(user.profile_url(), "/user/alice/");

    let user = user.with_profile_url("https://example.com/~alice");
    assert_eq!(user.profile_url(), "https://example.com/~alice");
}

#[test]
fn visible_name_falls_back_to_username() {
    assert_eq!(User::new("alice", "Alice A").visible_name(), "Alice A");
    assert_eq!(User::new("alice", "").visible_name(), "alice");
}

#[test]
fn in_memory_directory_matches_case_insensitively() {
    let directory: InMemoryUserDirectory = [
        User::new("bob", "Bob B"),
        User::new("Carol", "Carol C"),
        User::new("dave", "Dave D"),
    ]
    .into_iter()
    .collect();

    let wanted = BTreeSet::from(["Bob", "carol", "nobody"]);
    let found = directory.find_by_usernames(&wanted).unwrap();
    let names: Vec<&str> = found.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["bob", "Carol"]);
}

#[test]
fn in_memory_directory_loads_json() {
    let directory = InMemoryUserDirectory::from_json_str(
        r#"[
            {"username": "alice", "full_name": "Alice A"},
            {"username": "bob", "profile_url": "/people/bob"}
        ]"#,
    )
    .unwrap();
    assert_eq!(directory.users().len(), 2);
    assert_eq!(directory.users()[0], User::new("alice", "Alice A"));
    assert_eq!(directory.users()[1].profile_url(), "/people/bob");
    assert_eq!(directory.users()[1].visible_name(), "bob");

    assert!(matches!(
        InMemoryUserDirectory::from_json_str(r#"[{"full_name": "x"}]"#).unwrap_err(),
        Error::Json(_)
    ));
}
