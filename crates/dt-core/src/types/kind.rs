//! File classification by extension and name pattern.

use camino::Utf8Path;
use serde::{Deserialize, Serialize};

/// The kind of a discovered input file.
///
/// The kind is derived purely from the file's extension and name pattern
/// at discovery time and never changes afterwards. It determines which
/// conversion strategy the orchestrator applies.
///
/// # Examples
///
/// ```
/// use dt_core::FileKind;
/// use camino::Utf8Path;
///
/// assert_eq!(FileKind::classify(Utf8Path::new("src/app.ts")), Some(FileKind::Module));
/// assert_eq!(FileKind::classify(Utf8Path::new("src/env.d.ts")), Some(FileKind::AmbientDeclaration));
/// assert_eq!(FileKind::classify(Utf8Path::new("tsconfig.json")), Some(FileKind::Config));
/// assert_eq!(FileKind::classify(Utf8Path::new("readme.md")), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// A TypeScript module (`.ts` or `.tsx`).
    Module,

    /// A component file mixing markup with an embedded TypeScript
    /// frontmatter block (`.astro`).
    ComponentMarkup,

    /// A `tsconfig.json` project configuration file.
    Config,

    /// An ambient declaration file (`*.d.ts`), recognized only so the
    /// coordinator can delete it.
    AmbientDeclaration,
}

impl FileKind {
    /// Classifies a path, returning `None` for unrecognized files.
    ///
    /// The `.d.ts` pattern is checked before the plain `.ts` extension so
    /// ambient declarations are never treated as modules.
    #[must_use]
    pub fn classify(path: &Utf8Path) -> Option<Self> {
        let name = path.file_name()?;
        if name == "tsconfig.json" {
            return Some(Self::Config);
        }
        if name.ends_with(".d.ts") {
            return Some(Self::AmbientDeclaration);
        }
        match path.extension()? {
            "ts" | "tsx" => Some(Self::Module),
            "astro" => Some(Self::ComponentMarkup),
            _ => None,
        }
    }

    /// Returns `true` if files of this kind are parsed into an AST.
    ///
    /// Config files are rewritten textually and ambient declarations are
    /// only ever deleted.
    #[inline]
    #[must_use]
    pub const fn is_parsed(self) -> bool {
        matches!(self, Self::Module | Self::ComponentMarkup)
    }

    /// A short human-readable label for logging.
    #[inline]
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Module => "module",
            Self::ComponentMarkup => "component",
            Self::Config => "config",
            Self::AmbientDeclaration => "ambient",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_modules() {
        assert_eq!(
            FileKind::classify(Utf8Path::new("src/app.ts")),
            Some(FileKind::Module)
        );
        assert_eq!(
            FileKind::classify(Utf8Path::new("src/App.tsx")),
            Some(FileKind::Module)
        );
    }

    #[test]
    fn test_classify_component_markup() {
        assert_eq!(
            FileKind::classify(Utf8Path::new("src/pages/index.astro")),
            Some(FileKind::ComponentMarkup)
        );
    }

    #[test]
    fn test_classify_config_by_name() {
        assert_eq!(
            FileKind::classify(Utf8Path::new("tsconfig.json")),
            Some(FileKind::Config)
        );
        assert_eq!(
            FileKind::classify(Utf8Path::new("packages/a/tsconfig.json")),
            Some(FileKind::Config)
        );
        // Other JSON files are not recognized
        assert_eq!(FileKind::classify(Utf8Path::new("package.json")), None);
    }

    #[test]
    fn test_ambient_wins_over_module() {
        assert_eq!(
            FileKind::classify(Utf8Path::new("src/env.d.ts")),
            Some(FileKind::AmbientDeclaration)
        );
        assert_eq!(
            FileKind::classify(Utf8Path::new("types/global.d.ts")),
            Some(FileKind::AmbientDeclaration)
        );
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(FileKind::classify(Utf8Path::new("readme.md")), None);
        assert_eq!(FileKind::classify(Utf8Path::new("main.js")), None);
        assert_eq!(FileKind::classify(Utf8Path::new("noextension")), None);
    }

    #[test]
    fn test_is_parsed() {
        assert!(FileKind::Module.is_parsed());
        assert!(FileKind::ComponentMarkup.is_parsed());
        assert!(!FileKind::Config.is_parsed());
        assert!(!FileKind::AmbientDeclaration.is_parsed());
    }
}
