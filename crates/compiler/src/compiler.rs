use glyphpress_core::{CompileOptions, GlyphSource, NormalizedGlyph};
use glyphpress_font_builder::{AssembleError, FontArtifact, assemble};
use glyphpress_glyph_source::{ArchiveEntry, ValidationError, Validator};
use glyphpress_outline_import::{self as outline_import, ImportWarning, ImportedGlyph, import_glyph};
use log::{info, warn};
use rayon::{ThreadPoolBuilder, prelude::*};

use crate::{BuildFailure, BuildReport, CancelToken, FailureReason};

type ImportOutcome = Option<outline_import::Result<ImportedGlyph>>;

/// Compiles glyph archives into fonts.
///
/// A compiler holds only its options, so one instance can serve any number
/// of concurrent builds.
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    options: CompileOptions,
}

impl Compiler {
    pub fn new(options: CompileOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CompileOptions {
        &self.options
    }

    /// Compile archive entries into a font.
    ///
    /// The artifact is `None` exactly when the report carries a fatal
    /// failure.
    pub fn compile(
        &self,
        entries: impl IntoIterator<Item = ArchiveEntry>,
    ) -> (Option<FontArtifact>, BuildReport) {
        self.compile_with_cancel(entries, &CancelToken::new())
    }

    /// Like [`compile`](Self::compile), stopping early once `cancel` is set.
    ///
    /// Imports already running finish, the rest are skipped, and a cancelled
    /// build never yields a font.
    pub fn compile_with_cancel(
        &self,
        entries: impl IntoIterator<Item = ArchiveEntry>,
        cancel: &CancelToken,
    ) -> (Option<FontArtifact>, BuildReport) {
        self.run(entries, cancel, import_glyph)
    }

    fn run<F>(
        &self,
        entries: impl IntoIterator<Item = ArchiveEntry>,
        cancel: &CancelToken,
        import: F,
    ) -> (Option<FontArtifact>, BuildReport)
    where
        F: Fn(&GlyphSource, &CompileOptions) -> outline_import::Result<ImportedGlyph> + Sync,
    {
        let report = BuildReport::default();
        if let Err(err) = self.options.validate() {
            return (None, report.fail(err.into()));
        }
        if cancel.is_cancelled() {
            return (None, report.fail(BuildFailure::Cancelled));
        }

        let validation = Validator::new(&self.options).validate(entries);
        let mut report = BuildReport {
            issues: validation.issues.into_iter().map(Into::into).collect(),
            ..report
        };
        let sources = match validation.sources {
            Ok(set) => {
                info!("Importing {} glyph sources", set.len());
                set.into_sources()
            }
            Err(ValidationError::EmptyArchive { entries, rejected }) => {
                return (None, report.fail(BuildFailure::EmptyArchive { entries, rejected }));
            }
        };

        let outcomes = self.import_all(&sources, cancel, &import);
        if cancel.is_cancelled() {
            info!("Build cancelled after import");
            return (None, report.fail(BuildFailure::Cancelled));
        }

        let mut glyphs: Vec<NormalizedGlyph> = Vec::with_capacity(sources.len());
        for (source, outcome) in sources.iter().zip(outcomes) {
            match outcome {
                Some(Ok(imported)) => {
                    for warning in imported.warnings {
                        match warning {
                            ImportWarning::DegenerateOutline => report.push(
                                source.entry_name(),
                                source.code_point(),
                                FailureReason::DegenerateOutline,
                            ),
                        }
                    }
                    report.succeeded.insert(source.code_point());
                    glyphs.push(imported.glyph);
                }
                Some(Err(err)) => {
                    warn!("{} ({}): {err}", source.entry_name(), source.code_point());
                    report.push(source.entry_name(), source.code_point(), (&err).into());
                }
                None => return (None, report.fail(BuildFailure::Cancelled)),
            }
        }
        info!(
            "Imported {} of {} glyph sources ({} rejected entries, {} issues)",
            glyphs.len(),
            sources.len(),
            report.rejected().count(),
            report.issues.len()
        );

        self.finish(assemble(&glyphs, &self.options), report, cancel)
    }

    fn finish(
        &self,
        assembled: Result<FontArtifact, AssembleError>,
        report: BuildReport,
        cancel: &CancelToken,
    ) -> (Option<FontArtifact>, BuildReport) {
        if cancel.is_cancelled() {
            info!("Build cancelled during assembly");
            return (None, report.fail(BuildFailure::Cancelled));
        }
        match assembled {
            Ok(artifact) => {
                info!("Built font: {} glyphs, {} bytes", artifact.glyph_count(), artifact.len());
                (Some(artifact), report)
            }
            Err(err) if err.is_too_large() => {
                (None, report.fail(BuildFailure::ArtifactTooLarge(err.to_string())))
            }
            Err(err) => (None, report.fail(BuildFailure::Assembly(err.to_string()))),
        }
    }

    /// Import every source in parallel, in source order. `None` marks an
    /// import skipped because of cancellation.
    fn import_all<F>(&self, sources: &[GlyphSource], cancel: &CancelToken, import: &F) -> Vec<ImportOutcome>
    where
        F: Fn(&GlyphSource, &CompileOptions) -> outline_import::Result<ImportedGlyph> + Sync,
    {
        let import_one = |source: &GlyphSource| -> ImportOutcome {
            if cancel.is_cancelled() {
                return None;
            }
            Some(import(source, &self.options))
        };

        let threads = self.options.max_workers.unwrap_or(0);
        match ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool.install(|| sources.par_iter().map(import_one).collect()),
            Err(err) => {
                warn!("Failed to create worker pool, using the global pool: {err}");
                sources.par_iter().map(import_one).collect()
            }
        }
    }
}
