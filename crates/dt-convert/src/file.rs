//! Per-file conversion orchestration.
//!
//! [`convert_source`] is the single dispatch point from a file's kind to
//! its conversion strategy. It is total: every code path produces a
//! [`TransformResult`], and anything that goes wrong inside a strategy
//! becomes a failed outcome rather than an error. That contract is what
//! lets the coordinator treat each file independently.

use tracing::debug;

use dt_core::{ConversionTask, FileKind, TransformResult};
use dt_transform::{Dialect, RuleSet, transform};

use crate::config::{config_target_path, relax_strict_flag};

/// Reads a file and converts it according to its kind.
///
/// Read failures are reported as a failed outcome, like any other
/// per-file problem.
#[must_use]
pub fn convert_file(task: &ConversionTask) -> TransformResult {
    match std::fs::read_to_string(&task.source_path) {
        Ok(source) => convert_source(task, &source),
        Err(err) => TransformResult::failed(
            task.source_path.clone(),
            String::new(),
            format!("failed to read file: {err}"),
        ),
    }
}

/// Converts one file's contents according to its kind.
///
/// The strategy per kind:
///
/// - **modules** are type-erased, lowered to common-module syntax, and
///   renamed `.ts` to `.js` (`.tsx` to `.jsx`)
/// - **component markup** has its frontmatter block raised to
///   ECMAScript-module syntax; the markup body and the path stay as
///   they are
/// - **config** files get their strictness relaxed and move to
///   `jsconfig.json`
/// - **ambient declarations** pass through unchanged; the coordinator
///   deletes them in its cleanup pass
#[must_use]
pub fn convert_source(task: &ConversionTask, source: &str) -> TransformResult {
    debug!(path = %task.source_path, kind = task.kind.label(), "converting");

    match task.kind {
        FileKind::Module => convert_module(task, source),
        FileKind::ComponentMarkup => convert_component(task, source),
        FileKind::Config => TransformResult::converted(
            config_target_path(&task.source_path),
            relax_strict_flag(source),
        ),
        FileKind::AmbientDeclaration => {
            TransformResult::unchanged(task.source_path.clone(), source.to_owned())
        }
    }
}

fn convert_module(task: &ConversionTask, source: &str) -> TransformResult {
    let (dialect, new_ext) = match task.source_path.extension() {
        Some("tsx") => (Dialect::Tsx, "jsx"),
        _ => (Dialect::TypeScript, "js"),
    };

    match transform(source, dialect, &RuleSet::typed_module()) {
        // The extension always changes, so a successful transform is a
        // conversion even when the text happens to be identical
        Ok(output) => {
            TransformResult::converted(task.source_path.with_extension(new_ext), output)
        }
        Err(err) => TransformResult::failed(
            task.source_path.clone(),
            source.to_owned(),
            err.to_string(),
        ),
    }
}

/// The frontmatter fence marker in component files.
const FENCE: &str = "---";

fn convert_component(task: &ConversionTask, source: &str) -> TransformResult {
    // Fence layout: leading fence, frontmatter, closing fence, markup.
    // splitn keeps any later fence-like text in the markup intact.
    let mut parts = source.splitn(3, FENCE);
    let (Some(prefix), Some(frontmatter), Some(markup)) =
        (parts.next(), parts.next(), parts.next())
    else {
        // No frontmatter block to normalize
        return TransformResult::unchanged(task.source_path.clone(), source.to_owned());
    };

    match transform(frontmatter, Dialect::TypeScript, &RuleSet::component_frontmatter()) {
        Ok(output) if output == frontmatter => {
            TransformResult::unchanged(task.source_path.clone(), source.to_owned())
        }
        Ok(output) => {
            let rebuilt = format!("{prefix}{FENCE}{output}{FENCE}{markup}");
            TransformResult::converted(task.source_path.clone(), rebuilt)
        }
        Err(err) => TransformResult::failed(
            task.source_path.clone(),
            source.to_owned(),
            err.to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use dt_core::Outcome;

    fn task(path: &str) -> ConversionTask {
        ConversionTask::classify(Utf8Path::new(path)).expect("recognized path")
    }

    #[test]
    fn test_module_erased_lowered_and_renamed() {
        let result = convert_source(
            &task("/proj/src/app.ts"),
            "import { join } from 'path';\nconst p: string = join('a', 'b');\n",
        );
        assert_eq!(result.new_path, Utf8Path::new("/proj/src/app.js"));
        assert_eq!(
            result.content,
            "const { join } = require('path');\nconst p = join('a', 'b');\n"
        );
        assert_eq!(result.outcome, Outcome::Converted);
    }

    #[test]
    fn test_tsx_renamed_to_jsx() {
        let result = convert_source(
            &task("/proj/src/App.tsx"),
            "export const App = () => <p>hi</p>;\n",
        );
        assert_eq!(result.new_path, Utf8Path::new("/proj/src/App.jsx"));
        assert_eq!(
            result.content,
            "const App = () => <p>hi</p>;\nexports.App = App;\n"
        );
    }

    #[test]
    fn test_unparseable_module_fails_with_original_content() {
        let source = "const = broken";
        let result = convert_source(&task("/proj/src/bad.ts"), source);
        assert_eq!(result.new_path, Utf8Path::new("/proj/src/bad.ts"));
        assert_eq!(result.content, source);
        assert!(!result.succeeded());
        assert!(result.error_message().is_some());
    }

    #[test]
    fn test_component_frontmatter_raised_markup_untouched() {
        let source = "---\nconst { getPosts } = require('./posts');\nconst posts: Post[] = getPosts();\n---\n<ul>{posts.map(p => <li>{p.title}</li>)}</ul>\n";
        let result = convert_source(&task("/proj/pages/index.astro"), source);
        assert_eq!(result.new_path, Utf8Path::new("/proj/pages/index.astro"));
        assert_eq!(
            result.content,
            "---\nimport { getPosts } from './posts';\nconst posts: Post[] = getPosts();\n---\n<ul>{posts.map(p => <li>{p.title}</li>)}</ul>\n"
        );
        assert_eq!(result.outcome, Outcome::Converted);
    }

    #[test]
    fn test_component_without_frontmatter_unchanged() {
        let source = "<h1>static page</h1>\n";
        let result = convert_source(&task("/proj/pages/static.astro"), source);
        assert_eq!(result.outcome, Outcome::Unchanged);
        assert_eq!(result.content, source);
    }

    #[test]
    fn test_component_with_clean_frontmatter_unchanged() {
        let source = "---\nimport { a } from './a';\n---\n<p>{a}</p>\n";
        let result = convert_source(&task("/proj/pages/clean.astro"), source);
        assert_eq!(result.outcome, Outcome::Unchanged);
    }

    #[test]
    fn test_config_relaxed_and_renamed() {
        let result = convert_source(
            &task("/proj/tsconfig.json"),
            "{ \"compilerOptions\": { \"strict\": true } }\n",
        );
        assert_eq!(result.new_path, Utf8Path::new("/proj/jsconfig.json"));
        assert_eq!(
            result.content,
            "{ \"compilerOptions\": { \"checkJs\": false } }\n"
        );
    }

    #[test]
    fn test_ambient_declaration_passes_through() {
        let source = "declare module '*.svg';\n";
        let result = convert_source(&task("/proj/src/env.d.ts"), source);
        assert_eq!(result.outcome, Outcome::Unchanged);
        assert_eq!(result.new_path, Utf8Path::new("/proj/src/env.d.ts"));
    }
}
