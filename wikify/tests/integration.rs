#![allow(clippy::expect_used, reason = "Fine in tests")]

use std::{fs, path::Path};

use tempfile::tempdir;
use wikify::{config::Config, utils::mirror_tree, walker::convert_topics};

fn write_topic(dir: &Path, key: &str, content: &str) {
  fs::write(dir.join(format!("{key}.md")), content)
    .expect("Failed to write topic in test");
}

fn fixture(work_dir: &Path) {
  fs::write(
    work_dir.join("toc.xml"),
    r#"<topics>
  <topic file="Intro"/>
  <topic file="Guide">
    <topic file="Child"/>
  </topic>
  <topic file="Broken"/>
</topics>"#,
  )
  .expect("Failed to write toc in test");

  write_topic(
    work_dir,
    "Intro",
    "## Welcome\n<span id=\"PageHeader\"></span>\nIntro body",
  );
  write_topic(work_dir, "Guide", "## Using The Tool\nGuide body");
  write_topic(work_dir, "Child", "plain child text");
  write_topic(work_dir, "Broken", "<p>text<div></p></div>");
}

fn config_for(work_dir: &Path) -> Config {
  Config {
    toc_path: work_dir.join("toc.xml"),
    work_dir: work_dir.to_path_buf(),
    default_topic: Some("Intro".to_string()),
    ..Default::default()
  }
}

#[test]
fn test_walk_converts_topics_and_builds_sidebar() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let work_dir = temp_dir.path();
  fixture(work_dir);

  let summary =
    convert_topics(&config_for(work_dir)).expect("walk should succeed");

  assert_eq!(summary.converted, 3);
  assert_eq!(summary.skipped, 1);

  let sidebar = fs::read_to_string(work_dir.join("_Sidebar.md"))
    .expect("sidebar should exist");
  let lines: Vec<&str> = sidebar.lines().collect();

  // One sidebar line per successfully parsed topic; the malformed topic is
  // absent from both the sidebar and the output.
  assert_eq!(lines.len(), summary.converted);
  assert_eq!(lines[0], "- [Welcome](Intro)");
  assert_eq!(lines[1], "- [Using The Tool](Guide)");
  assert_eq!(lines[2], "  - [Child](Child)");
}

#[test]
fn test_topics_are_rewritten_in_place() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let work_dir = temp_dir.path();
  fixture(work_dir);

  convert_topics(&config_for(work_dir)).expect("walk should succeed");

  let intro =
    fs::read_to_string(work_dir.join("Intro.md")).expect("topic exists");
  assert!(intro.contains("## Welcome"));
  // The page-header anchor span is stripped from the rewritten topic.
  assert!(!intro.contains("<span"));

  // The malformed topic is left untouched.
  let broken =
    fs::read_to_string(work_dir.join("Broken.md")).expect("topic exists");
  assert_eq!(broken, "<p>text<div></p></div>");
}

#[test]
fn test_sidebar_links_with_md_extension() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let work_dir = temp_dir.path();
  fixture(work_dir);

  let config = Config {
    link_extension: true,
    ..config_for(work_dir)
  };
  convert_topics(&config).expect("walk should succeed");

  let sidebar = fs::read_to_string(work_dir.join("_Sidebar.md"))
    .expect("sidebar should exist");
  assert!(sidebar.contains("- [Welcome](Intro.md)"));
}

#[test]
fn test_home_page_synthesized_from_default_topic() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let work_dir = temp_dir.path();
  fixture(work_dir);

  convert_topics(&config_for(work_dir)).expect("walk should succeed");

  let home =
    fs::read_to_string(work_dir.join("Home.md")).expect("Home.md synthesized");
  let intro =
    fs::read_to_string(work_dir.join("Intro.md")).expect("topic exists");
  assert_eq!(home, intro);
}

#[test]
fn test_existing_home_page_is_not_overwritten() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let work_dir = temp_dir.path();
  fixture(work_dir);
  fs::write(work_dir.join("Home.md"), "hand-written home")
    .expect("Failed to write Home.md in test");

  convert_topics(&config_for(work_dir)).expect("walk should succeed");

  let home = fs::read_to_string(work_dir.join("Home.md")).expect("Home.md");
  assert_eq!(home, "hand-written home");
}

#[test]
fn test_missing_toc_is_fatal() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let config = Config {
    toc_path: temp_dir.path().join("missing-toc.xml"),
    work_dir: temp_dir.path().to_path_buf(),
    ..Default::default()
  };

  assert!(convert_topics(&config).is_err());
}

#[test]
fn test_mirror_skips_hidden_subtrees_and_clears_readonly() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let work_dir = temp_dir.path().join("work");
  let output_dir = temp_dir.path().join("out");
  fs::create_dir_all(work_dir.join("assets"))
    .expect("Failed to create dir in test");
  fs::create_dir_all(work_dir.join(".git"))
    .expect("Failed to create dir in test");

  fs::write(work_dir.join("Page.md"), "content")
    .expect("Failed to write file in test");
  fs::write(work_dir.join("assets").join("logo.txt"), "logo")
    .expect("Failed to write file in test");
  fs::write(work_dir.join(".git").join("HEAD"), "ref")
    .expect("Failed to write file in test");

  // Make one source file read-only; the copy must not stay read-only.
  let readonly_path = work_dir.join("Page.md");
  let mut permissions = fs::metadata(&readonly_path)
    .expect("metadata")
    .permissions();
  permissions.set_readonly(true);
  fs::set_permissions(&readonly_path, permissions).expect("set permissions");

  let copied =
    mirror_tree(&work_dir, &output_dir).expect("mirror should succeed");

  assert_eq!(copied, 2);
  assert!(output_dir.join("Page.md").exists());
  assert!(output_dir.join("assets").join("logo.txt").exists());
  assert!(!output_dir.join(".git").exists());

  let mirrored = fs::metadata(output_dir.join("Page.md"))
    .expect("metadata")
    .permissions();
  assert!(!mirrored.readonly());
}
