//! Directory conversion coordination.
//!
//! [`convert_directory`] runs a whole conversion in a fixed order:
//!
//! 1. validate options and resolve ignore rules
//! 2. discover and classify every convertible file
//! 3. convert each file independently, isolating failures
//! 4. cleanup: delete ambient declarations, then rename any typed
//!    source that still carries its old extension
//! 5. return the accumulated [`ConversionReport`]
//!
//! A file that fails to convert is left exactly as it was found, and the
//! cleanup passes leave failed files alone too. Only discovery and
//! option problems abort the run.

use tracing::{debug, info, warn};

use camino::Utf8PathBuf;

use dt_core::{ConversionReport, ConversionTask, ConvertOptions, FileKind, FxHashSet, Outcome};
use dt_scanner::{FileWalker, IgnoreRules};

use crate::error::ConvertError;
use crate::file::convert_file;

/// Converts every recognized file under `options.root` in place.
///
/// # Errors
///
/// Returns [`ConvertError::Config`] for invalid options and
/// [`ConvertError::Scan`] when discovery fails. Per-file problems are
/// recorded in the report, never returned.
pub fn convert_directory(options: &ConvertOptions) -> Result<ConversionReport, ConvertError> {
    options.validate()?;

    let ignore = IgnoreRules::from_root(&options.root)?;
    let tasks = build_walker(options)?.collect_tasks(&ignore)?;
    info!(count = tasks.len(), root = %options.root, "starting conversion");

    let mut report = ConversionReport::new();

    for task in &tasks {
        // Ambient declarations are handled by the cleanup pass
        if task.kind == FileKind::AmbientDeclaration {
            continue;
        }
        let result = convert_file(task);
        apply_result(task, result.new_path, result.content, result.outcome, &mut report);
    }

    delete_ambient_declarations(&tasks, &mut report);
    cleanup_leftovers(options, &ignore, &mut report)?;

    info!(
        converted = report.converted,
        unchanged = report.unchanged,
        failed = report.failed(),
        "conversion finished"
    );
    Ok(report)
}

fn build_walker(options: &ConvertOptions) -> Result<FileWalker, dt_scanner::ScanError> {
    Ok(FileWalker::new(&options.root)?
        .with_skip_dirs(&options.skip_dirs)
        .with_follow_links(options.follow_links))
}

/// Writes one conversion result to disk and records it in the report.
///
/// Write and remove failures are recorded against the source path; the
/// run keeps going either way.
fn apply_result(
    task: &ConversionTask,
    new_path: Utf8PathBuf,
    content: String,
    outcome: Outcome,
    report: &mut ConversionReport,
) {
    match outcome {
        Outcome::Failed(message) => {
            warn!(path = %task.source_path, error = %message, "conversion failed");
            report.record_failure(task.source_path.clone(), message);
        }
        Outcome::Unchanged => {
            debug!(path = %task.source_path, "unchanged");
            report.record_unchanged();
        }
        Outcome::Converted => {
            if let Err(err) = std::fs::write(&new_path, &content) {
                warn!(path = %new_path, error = %err, "failed to write output");
                report.record_failure(
                    task.source_path.clone(),
                    format!("failed to write {new_path}: {err}"),
                );
                return;
            }
            if new_path != task.source_path {
                if let Err(err) = std::fs::remove_file(&task.source_path) {
                    warn!(path = %task.source_path, error = %err, "failed to remove source");
                    report.record_failure(
                        task.source_path.clone(),
                        format!("failed to remove original: {err}"),
                    );
                    return;
                }
            }
            debug!(from = %task.source_path, to = %new_path, "converted");
            report.record_converted();
        }
    }
}

/// Deletes every discovered ambient declaration file.
fn delete_ambient_declarations(tasks: &[ConversionTask], report: &mut ConversionReport) {
    for task in tasks
        .iter()
        .filter(|t| t.kind == FileKind::AmbientDeclaration)
    {
        match std::fs::remove_file(&task.source_path) {
            Ok(()) => {
                debug!(path = %task.source_path, "deleted ambient declaration");
                report.record_converted();
            }
            Err(err) => {
                warn!(path = %task.source_path, error = %err, "failed to delete ambient declaration");
                report.record_failure(
                    task.source_path.clone(),
                    format!("failed to delete: {err}"),
                );
            }
        }
    }
}

/// Sweeps up anything the conversion pass left behind: typed sources
/// that still carry their old extension are renamed, and any remaining
/// config file is migrated the same way the main pass would have.
///
/// Files that failed conversion keep their name and contents.
fn cleanup_leftovers(
    options: &ConvertOptions,
    ignore: &IgnoreRules,
    report: &mut ConversionReport,
) -> Result<(), ConvertError> {
    let leftovers = build_walker(options)?.collect_tasks(ignore)?;
    let failed: FxHashSet<Utf8PathBuf> = report
        .failures
        .iter()
        .map(|(path, _)| path.clone())
        .collect();

    for task in &leftovers {
        if failed.contains(&task.source_path) {
            continue;
        }
        match task.kind {
            FileKind::Module => {
                let new_ext = if task.source_path.extension() == Some("tsx") {
                    "jsx"
                } else {
                    "js"
                };
                let target = task.source_path.with_extension(new_ext);
                match std::fs::rename(&task.source_path, &target) {
                    Ok(()) => {
                        debug!(from = %task.source_path, to = %target, "renamed leftover source");
                    }
                    Err(err) => {
                        warn!(path = %task.source_path, error = %err, "failed to rename leftover source");
                    }
                }
            }
            FileKind::Config => {
                let result = convert_file(task);
                apply_result(task, result.new_path, result.content, result.outcome, report);
            }
            FileKind::ComponentMarkup | FileKind::AmbientDeclaration => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::{Utf8Path, Utf8PathBuf};
    use std::fs;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_owned()).expect("utf-8 tempdir");
        (dir, root)
    }

    fn write(root: &Utf8Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("mkdirs");
        }
        fs::write(path, content).expect("write");
    }

    fn read(root: &Utf8Path, relative: &str) -> String {
        fs::read_to_string(root.join(relative)).expect("read")
    }

    #[test]
    fn test_clean_run_converts_everything() {
        let (_dir, root) = temp_root();
        write(&root, "src/app.ts", "export const port: number = 3000;\n");
        write(&root, "src/App.tsx", "const App = () => <div/>;\n");
        write(&root, "tsconfig.json", "{ \"strict\": true }\n");

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert!(report.is_clean());
        assert_eq!(report.converted, 3);
        assert_eq!(
            read(&root, "src/app.js"),
            "const port = 3000;\nexports.port = port;\n"
        );
        assert!(root.join("src/App.jsx").exists());
        assert!(!root.join("src/app.ts").exists());
        assert!(!root.join("src/App.tsx").exists());
        assert_eq!(read(&root, "jsconfig.json"), "{ \"checkJs\": false }\n");
        assert!(!root.join("tsconfig.json").exists());
    }

    #[test]
    fn test_failure_is_isolated_and_file_left_alone() {
        let (_dir, root) = temp_root();
        write(&root, "src/a.ts", "const a: number = 1;\n");
        let broken = "const = broken\n";
        write(&root, "src/b.ts", broken);
        write(&root, "src/c.ts", "const c: number = 3;\n");

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert_eq!(report.converted, 2);
        assert_eq!(report.failed(), 1);
        assert!(root.join("src/a.js").exists());
        assert!(root.join("src/c.js").exists());
        // The failing file keeps its name and its exact contents
        assert_eq!(read(&root, "src/b.ts"), broken);
        assert!(!root.join("src/b.js").exists());
        assert!(report.is_failure(&root.join("src/b.ts")));
    }

    #[test]
    fn test_renamed_import_and_strict_config_end_to_end() {
        let (_dir, root) = temp_root();
        write(
            &root,
            "src/main.ts",
            "import { foo, bar as baz } from './x';\nfoo(baz);\n",
        );
        write(
            &root,
            "tsconfig.json",
            "{\n  \"compilerOptions\": {\n    \"strict\": true\n  }\n}\n",
        );

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert!(report.is_clean());
        assert_eq!(
            read(&root, "src/main.js"),
            "const { foo, bar: baz } = require('./x');\nfoo(baz);\n"
        );
        assert_eq!(
            read(&root, "jsconfig.json"),
            "{\n  \"compilerOptions\": {\n    \"checkJs\": false\n  }\n}\n"
        );
        assert!(!root.join("src/main.ts").exists());
        assert!(!root.join("tsconfig.json").exists());
    }

    #[test]
    fn test_ambient_declarations_deleted() {
        let (_dir, root) = temp_root();
        write(&root, "src/env.d.ts", "declare module '*.svg';\n");
        write(&root, "src/app.ts", "const x = 1;\n");

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert!(!root.join("src/env.d.ts").exists());
        assert_eq!(report.converted, 2);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_component_markup_converted_in_place() {
        let (_dir, root) = temp_root();
        write(
            &root,
            "pages/index.astro",
            "---\nconst { site } = require('./config');\n---\n<h1>{site.title}</h1>\n",
        );

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert_eq!(report.converted, 1);
        assert_eq!(
            read(&root, "pages/index.astro"),
            "---\nimport { site } from './config';\n---\n<h1>{site.title}</h1>\n"
        );
    }

    #[test]
    fn test_ignore_rules_respected() {
        let (_dir, root) = temp_root();
        write(&root, ".gitignore", "generated\n");
        write(&root, "src/app.ts", "const x = 1;\n");
        write(&root, "generated/api.ts", "const y: number = 2;\n");

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert_eq!(report.converted, 1);
        assert!(root.join("generated/api.ts").exists());
        assert!(!root.join("generated/api.js").exists());
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let options = ConvertOptions::new(Utf8Path::new("/definitely/not/here"));
        let err = convert_directory(&options).expect_err("missing root should fail");
        assert!(matches!(err, ConvertError::Config(_)));
    }

    #[test]
    fn test_unchanged_component_counted() {
        let (_dir, root) = temp_root();
        write(&root, "pages/static.astro", "<h1>no frontmatter</h1>\n");

        let report = convert_directory(&ConvertOptions::new(&root)).expect("run");

        assert_eq!(report.unchanged, 1);
        assert_eq!(report.converted, 0);
        assert!(report.is_clean());
    }
}
