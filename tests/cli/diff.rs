use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const PAGE_V1: &str = "<h1>Existing heading</h1>;\n";
const PAGE_V2: &str = "<h1>Existing heading</h1>;\n<p>New paragraph</p>;\n";

#[test]
fn test_diff_reports_only_added_lines() -> Result<()> {
    let test = CliTest::git_repo(&[("src/page.tsx", PAGE_V1)])?;
    test.write_file("src/page.tsx", PAGE_V2)?;

    assert_cmd_snapshot!(test.command().arg("--diff"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    src/page.tsx:2 -> "New paragraph"

    ✘ 1 violation(s) in 1 file(s)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_full_scan_reports_everything() -> Result<()> {
    let test = CliTest::git_repo(&[("src/page.tsx", PAGE_V1)])?;
    test.write_file("src/page.tsx", PAGE_V2)?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "src/page.tsx:1 -> \"Existing heading\"\nsrc/page.tsx:2 -> \"New paragraph\"\n\n✘ 2 violation(s) in 1 file(s)\n"
    );

    Ok(())
}

#[test]
fn test_diff_without_changes() -> Result<()> {
    let test = CliTest::git_repo(&[("src/page.tsx", PAGE_V1)])?;

    assert_cmd_snapshot!(test.command().arg("--diff-only"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No changed lines to scan

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_staged_changes() -> Result<()> {
    let test = CliTest::git_repo(&[("src/page.tsx", PAGE_V1)])?;
    test.write_file("src/page.tsx", PAGE_V2)?;
    test.git(&["add", "src/page.tsx"])?;

    let staged = test.command().arg("--staged").output()?;
    assert_eq!(staged.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(staged.stdout)?,
        "src/page.tsx:2 -> \"New paragraph\"\n\n✘ 1 violation(s) in 1 file(s)\n"
    );

    // Everything is staged, so the working tree has nothing new.
    let unstaged = test.command().arg("--diff").output()?;
    assert_eq!(unstaged.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(unstaged.stdout)?,
        "✓ No changed lines to scan\n"
    );

    Ok(())
}

#[test]
fn test_base_and_head_range() -> Result<()> {
    let test = CliTest::git_repo(&[("src/page.tsx", PAGE_V1)])?;
    test.write_file("src/page.tsx", PAGE_V2)?;
    test.git(&["commit", "--quiet", "-am", "add paragraph"])?;

    let output = test
        .command()
        .args(["--diff", "--base", "HEAD~1", "--head", "HEAD"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "src/page.tsx:2 -> \"New paragraph\"\n\n✘ 1 violation(s) in 1 file(s)\n"
    );

    Ok(())
}

#[test]
fn test_diff_restricted_to_explicit_files() -> Result<()> {
    let test = CliTest::git_repo(&[("src/a.tsx", PAGE_V1), ("src/b.tsx", PAGE_V1)])?;
    test.write_file("src/a.tsx", PAGE_V2)?;
    test.write_file("src/b.tsx", PAGE_V2)?;

    let output = test.command().args(["--diff", "src/b.tsx"]).output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "src/b.tsx:2 -> \"New paragraph\"\n\n✘ 1 violation(s) in 1 file(s)\n"
    );

    Ok(())
}

#[test]
fn test_deleted_file_is_not_scanned() -> Result<()> {
    let test = CliTest::git_repo(&[("src/old.tsx", PAGE_V2)])?;
    test.remove_file("src/old.tsx")?;

    let output = test.command().arg("--diff").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "✓ No changed lines to scan\n"
    );

    Ok(())
}

#[test]
fn test_diff_outside_repository_fails() -> Result<()> {
    let test = CliTest::with_file("src/page.tsx", PAGE_V2)?;

    let output = test.command().arg("--diff").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(
        stderr.starts_with("error: Unable to read git diff:"),
        "unexpected stderr: {stderr}"
    );

    Ok(())
}

#[test]
fn test_bad_ref_fails() -> Result<()> {
    let test = CliTest::git_repo(&[("src/page.tsx", PAGE_V1)])?;

    let output = test
        .command()
        .args(["--diff", "--base", "no-such-ref", "--head", "HEAD"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains("Unable to read git diff"));
    assert!(test.root().join("src/page.tsx").exists());

    Ok(())
}
