use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::ParseResult,
    },
};

/// Splices `#import` directives into a token stream.
///
/// Every file is included at most once per resolver. Paths are compared after
/// canonicalization, so `lib.tsl` and `./dir/../lib.tsl` are the same file.
/// Including a file a second time, whether through a cycle or a diamond, fails
/// with `ParseError::CircularImport`.
#[derive(Debug, Default)]
pub struct ImportResolver {
    included: HashSet<PathBuf>,
}

impl ImportResolver {
    /// Creates a resolver with no files included yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads, tokenizes and expands the root file of a compilation.
    ///
    /// The root file counts as included, so a file importing itself fails.
    ///
    /// # Errors
    /// - `ImportFailed` if the file cannot be read.
    /// - Any lexing or import error from the file or its imports.
    pub fn load_file(&mut self, path: &Path) -> ParseResult<Vec<(Token, usize)>> {
        self.include(&path.display().to_string(), path, 0)
    }

    /// Replaces every `#import` token in `tokens` with the tokens of the named
    /// file, resolved relative to `base_dir`.
    ///
    /// Imported files are expanded recursively relative to their own
    /// directory.
    ///
    /// Spliced tokens keep the lines of the file they were read from, and the
    /// resulting stream records no file names. A syntax or runtime error inside
    /// imported code therefore reports its line within the imported file,
    /// without naming that file. Errors about a directive itself
    /// (`CircularImport`, `ImportFailed`) name the path as written.
    ///
    /// # Errors
    /// - `CircularImport` when a file is included a second time.
    /// - `ImportFailed` when an imported file cannot be read.
    /// - Any lexing error in an imported file.
    pub fn expand(&mut self,
                  tokens: Vec<(Token, usize)>,
                  base_dir: &Path)
                  -> ParseResult<Vec<(Token, usize)>> {
        let mut expanded = Vec::with_capacity(tokens.len());

        for (token, line) in tokens {
            if let Token::Import(raw) = &token {
                let imported = self.include(raw, &base_dir.join(raw), line)?;
                expanded.extend(imported);
            } else {
                expanded.push((token, line));
            }
        }

        Ok(expanded)
    }

    fn include(&mut self, raw: &str, path: &Path, line: usize) -> ParseResult<Vec<(Token, usize)>> {
        let failed = |e: std::io::Error| ParseError::ImportFailed { path: raw.to_string(),
                                                                    details: e.to_string(),
                                                                    line };

        let canonical = fs::canonicalize(path).map_err(failed)?;

        if !self.included.insert(canonical.clone()) {
            return Err(ParseError::CircularImport { path: raw.to_string(),
                                                    line });
        }

        debug!(path = %canonical.display(), "including source file");

        let source = fs::read_to_string(&canonical).map_err(failed)?;
        let tokens = tokenize(&source)?;
        let dir = canonical.parent().map(Path::to_path_buf).unwrap_or_default();

        self.expand(tokens, &dir)
    }
}
