use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_hardcoded_text() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"
export function Button() {
    return <button>Submit</button>;
}
"#,
    )?;

    assert_cmd_snapshot!(test.command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    src/app.tsx:3 -> "Submit"

    ✘ 1 violation(s) in 1 file(s)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_clean_file() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"
export function Button() {
    return <button>{t('submit')}</button>;
}
"#,
    )?;

    assert_cmd_snapshot!(test.command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no non-internationalized user-visible text found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_no_files_to_scan() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ No files to scan

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_multiple_files_grouped() -> Result<()> {
    let test = CliTest::new()?;

    test.write_file(
        "src/components/Card.tsx",
        r#"export function Card() {
  return (
    <div className="rounded-lg p-4">
      <h2>Welcome</h2>
      <input placeholder="Search projects" />
    </div>
  );
}
"#,
    )?;
    test.write_file(
        "src/app.tsx",
        r#"export function App() {
  toast.error("Could not save");
  return <main>{t("home.title")}</main>;
}
"#,
    )?;
    test.write_file("src/app.test.tsx", "<p>Test only</p>\n")?;
    test.write_file("src/__mocks__/data.ts", "<p>Mock</p>\n")?;

    assert_cmd_snapshot!(test.command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    src/app.tsx:2 -> "Could not save"

    src/components/Card.tsx:4 -> "Welcome"
    src/components/Card.tsx:5 -> "Search projects"

    ✘ 3 violation(s) in 2 file(s)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_explicit_files() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("lib/b.tsx", "<p>Second</p>\n")?;
    test.write_file("lib/a.tsx", "<p>First</p>\n")?;
    test.write_file("lib/a.spec.tsx", "<p>Spec</p>\n")?;

    let output = test
        .command()
        .args(["lib/b.tsx", "lib", "lib/a.spec.tsx", "missing.tsx", "lib/a.tsx"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "lib/b.tsx:1 -> \"Second\"\n\nlib/a.tsx:1 -> \"First\"\n\n✘ 2 violation(s) in 2 file(s)\n"
    );

    Ok(())
}

#[test]
fn test_explicit_files_all_filtered() -> Result<()> {
    let test = CliTest::with_file("src/app.test.tsx", "<p>Test</p>\n")?;

    let output = test.command().arg("src/app.test.tsx").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8(output.stdout)?, "✓ No files to scan\n");

    Ok(())
}

#[test]
fn test_verbose_directory_warning() -> Result<()> {
    let test = CliTest::with_file("src/app.tsx", "<p>{t(\"a\")}</p>\n")?;

    let output = test.command().args(["-v", "src", "src/app.tsx"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8(output.stderr)?.contains("warning: Skipping directory src"));

    Ok(())
}

#[test]
fn test_ignore_directives() -> Result<()> {
    let test = CliTest::with_file(
        "src/app.tsx",
        r#"export function Page() {
  return (
    <div>
      <h1>Reported</h1>
      <p>Skipped</p> {/* intl-lint-ignore-line */}
      {/* intl-lint-ignore-next-line */}
      <p>Also skipped</p>
    </div>
  );
}
"#,
    )?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "src/app.tsx:4 -> \"Reported\"\n\n✘ 1 violation(s) in 1 file(s)\n"
    );

    Ok(())
}

#[test]
fn test_config_source_root_and_ignores() -> Result<()> {
    let test = CliTest::new()?;

    test.write_file(
        ".intllintrc.json",
        r#"{
            "sourceRoot": "app",
            "ignores": ["**/generated/**"],
            "ignoreTexts": ["Acme"]
        }"#,
    )?;
    test.write_file("app/page.tsx", "<footer>Acme</footer>;\n<h1>Dashboard</h1>;\n")?;
    test.write_file("app/generated/types.tsx", "<p>Generated</p>\n")?;
    test.write_file("src/ignored.tsx", "<p>Outside source root</p>\n")?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "app/page.tsx:2 -> \"Dashboard\"\n\n✘ 1 violation(s) in 1 file(s)\n"
    );

    Ok(())
}

#[test]
fn test_typescript_type_assertion() -> Result<()> {
    let test = CliTest::with_file(
        "src/form.ts",
        r#"export function focusName() {
    const el = <HTMLInputElement>document.getElementById('name');
    el.focus();
    toast.error("Name is required");
}
"#,
    )?;

    assert_cmd_snapshot!(test.command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    src/form.ts:4 -> "Name is required"

    ✘ 1 violation(s) in 1 file(s)

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_unparsable_file_warning() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("src/broken.tsx", "<p>Unclosed\n")?;
    test.write_file("src/app.tsx", "<p>{t(\"a\")}</p>;\n")?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(
        String::from_utf8(output.stderr)?
            .contains("warning: 1 file(s) could not be parsed (use -v for details)")
    );

    let output = test.command().arg("-v").output()?;
    assert!(String::from_utf8(output.stderr)?.contains("Cannot parse src/broken.tsx: line "));

    Ok(())
}

#[test]
fn test_malformed_config_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intllintrc.json", "{ \"ignores\": ")?;
    test.write_file("src/app.tsx", "<p>Hello</p>\n")?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Failed to parse config file"));

    Ok(())
}

#[test]
fn test_invalid_ignore_pattern_is_an_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".intllintrc.json", r#"{ "ignores": ["[oops"] }"#)?;

    let output = test.command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_unknown_flag() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--frobnicate").output()?;

    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("--help").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(output.status.code(), Some(0));
    for flag in ["--diff", "--diff-only", "--staged", "--base", "--head", "--verbose"] {
        assert!(stdout.contains(flag), "help is missing {flag}");
    }

    Ok(())
}
