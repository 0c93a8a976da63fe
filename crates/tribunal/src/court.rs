//! Batch evaluation over a corpus.
//!
//! A [`Court`] is compiled once from a [`Lex`] document. Structural problems
//! in the document abort compilation; everything after that is isolated per
//! subject and only logged.

use indexmap::IndexMap;
use lex_cache::{CacheEntry, CacheError, Fingerprint, VerdictCache};
use lex_law::{BindingTable, ConfigError, Lex};
use lex_primitives::Asset;
use thiserror::Error;

use crate::compare::Comparators;
use crate::database::{AssetDatabase, expand_selection};
use crate::judicator::{AdjudicationCtx, Judicator, NullProbe, SceneProbe};
use crate::remedy::{Remedied, RemedyError};
use crate::verdict::{Verdict, ViolationId};

#[derive(Debug, Error)]
pub enum CourtError {
	#[error(transparent)]
	Config(#[from] ConfigError),
	#[error("verdict cache: {0}")]
	Cache(#[from] CacheError),
}

/// Progress sink polled once per subject.
pub trait Progress {
	/// Called before a subject is evaluated. `fraction` is in `0.0..1.0`.
	fn report(&mut self, _fraction: f32, _path: &str) {}

	/// Polled after each subject; returning true stops the run.
	fn cancel_requested(&mut self) -> bool {
		false
	}
}

/// Progress sink that ignores reports and never cancels.
#[derive(Debug, Default)]
pub struct Silent;

impl Progress for Silent {}

/// How a subject resolved against the binding table.
#[derive(Debug)]
pub enum Resolution<'a> {
	Bound(&'a Judicator),
	/// No binding for the subject's (type, source kind) pair.
	Unmapped,
	/// Binding exists but names no judicator yet.
	Unbound,
	Disabled,
	/// Binding names a judicator missing from the document.
	UnknownJudicator(&'a str),
}

/// Result of a batch run.
#[derive(Debug, Default)]
pub struct JudgmentReport {
	pub verdicts: Vec<Verdict>,
	/// Subjects handed to a judicator.
	pub evaluated: usize,
	/// Evaluated subjects whose judicator could not run every check. They
	/// are never cached as passes.
	pub partial: usize,
	/// Subjects skipped because their cached pass is still current.
	pub skipped: usize,
	/// Subjects with no usable binding.
	pub unjudged: usize,
	pub cancelled: bool,
}

impl JudgmentReport {
	/// False when the run was cancelled; a partial report never means
	/// "everything passed".
	pub fn is_complete(&self) -> bool {
		!self.cancelled
	}

	pub fn is_clean(&self) -> bool {
		self.is_complete() && self.verdicts.is_empty()
	}

	pub fn violation_count(&self) -> usize {
		self.verdicts.iter().map(Verdict::len).sum()
	}
}

/// Per-run collaborators for [`Court::pass_judgment`].
pub struct Session<'a> {
	cache: Option<&'a mut VerdictCache>,
	probe: Option<&'a mut dyn SceneProbe>,
	progress: Option<&'a mut dyn Progress>,
}

impl<'a> Session<'a> {
	pub fn new() -> Self {
		Self { cache: None, probe: None, progress: None }
	}

	pub fn with_cache(mut self, cache: &'a mut VerdictCache) -> Self {
		self.cache = Some(cache);
		self
	}

	pub fn with_probe(mut self, probe: &'a mut dyn SceneProbe) -> Self {
		self.probe = Some(probe);
		self
	}

	pub fn with_progress(mut self, progress: &'a mut dyn Progress) -> Self {
		self.progress = Some(progress);
		self
	}
}

impl Default for Session<'_> {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug)]
pub struct Court {
	judicators: IndexMap<String, Judicator>,
	bindings: BindingTable,
	comparators: Comparators,
	law: Fingerprint,
}

impl Court {
	pub fn from_lex(lex: &Lex) -> Result<Self, CourtError> {
		lex.validate()?;
		let bindings = lex.binding_table()?;
		let judicators = lex
			.judicators
			.iter()
			.map(|(name, config)| (name.clone(), Judicator::compile(lex, name, config)))
			.collect();
		let law = Fingerprint::of_value(lex).map_err(CacheError::from)?;
		Ok(Self { judicators, bindings, comparators: Comparators::builtin(), law })
	}

	/// Replaces the comparator registry.
	pub fn with_comparators(mut self, comparators: Comparators) -> Self {
		self.comparators = comparators;
		self
	}

	pub fn comparators(&self) -> &Comparators {
		&self.comparators
	}

	/// Fingerprint of the document this court was compiled from.
	pub fn law(&self) -> &Fingerprint {
		&self.law
	}

	pub fn judicator(&self, name: &str) -> Option<&Judicator> {
		self.judicators.get(name)
	}

	pub fn resolve(&self, asset: &Asset) -> Resolution<'_> {
		let Some(binding) = self.bindings.lookup(&asset.object_type, asset.source_kind) else {
			return Resolution::Unmapped;
		};
		if !binding.enabled {
			return Resolution::Disabled;
		}
		let Some(name) = binding.judicator.as_deref() else {
			return Resolution::Unbound;
		};
		match self.judicators.get(name) {
			Some(judicator) => Resolution::Bound(judicator),
			None => Resolution::UnknownJudicator(name),
		}
	}

	/// Judges one asset with its bound judicator.
	pub fn adjudicate(&self, asset: &Asset, probe: &mut dyn SceneProbe) -> Option<Verdict> {
		let Resolution::Bound(judicator) = self.resolve(asset) else {
			return None;
		};
		let mut ctx = AdjudicationCtx { comparators: &self.comparators, probe };
		judicator.adjudicate(asset, &mut ctx)
	}

	/// Judges `selection` and everything it depends on.
	///
	/// Cache failures abort the run since later skips could no longer be
	/// trusted; per-subject problems are logged and the subject skipped.
	pub fn pass_judgment(
		&self,
		db: &dyn AssetDatabase,
		selection: &[String],
		session: Session<'_>,
	) -> Result<JudgmentReport, CourtError> {
		let Session { mut cache, probe, progress } = session;
		let mut null_probe = NullProbe;
		let probe: &mut dyn SceneProbe = match probe {
			Some(probe) => probe,
			None => &mut null_probe,
		};
		let mut silent = Silent;
		let progress: &mut dyn Progress = match progress {
			Some(progress) => progress,
			None => &mut silent,
		};

		let subjects = expand_selection(db, selection);
		let total = subjects.len();
		let mut report = JudgmentReport::default();
		tracing::info!(selected = selection.len(), subjects = total, "passing judgment");

		for (index, path) in subjects.iter().enumerate() {
			progress.report(index as f32 / total as f32, path);
			self.judge_subject(db, path, cache.as_deref_mut(), probe, &mut report)?;

			if progress.cancel_requested() {
				tracing::info!(evaluated = index + 1, total, "judgment cancelled");
				report.cancelled = true;
				break;
			}
		}

		tracing::info!(
			evaluated = report.evaluated,
			partial = report.partial,
			skipped = report.skipped,
			verdicts = report.verdicts.len(),
			"judgment finished"
		);
		Ok(report)
	}

	fn judge_subject(
		&self,
		db: &dyn AssetDatabase,
		path: &str,
		cache: Option<&mut VerdictCache>,
		probe: &mut dyn SceneProbe,
		report: &mut JudgmentReport,
	) -> Result<(), CourtError> {
		let Some(asset) = db.asset(path) else {
			tracing::warn!(path, "subject not found in asset database");
			return Ok(());
		};

		let fingerprint = match Fingerprint::of_asset(asset) {
			Ok(fingerprint) => Some(fingerprint),
			Err(error) => {
				tracing::warn!(path, %error, "cannot fingerprint subject; cache bypassed");
				None
			}
		};
		if let (Some(cache), Some(fingerprint)) = (cache.as_deref(), &fingerprint)
			&& cache.should_skip(path, fingerprint, &self.law)
		{
			tracing::debug!(path, "unchanged since last pass; skipped");
			report.skipped += 1;
			return Ok(());
		}

		let judicator = match self.resolve(asset) {
			Resolution::Bound(judicator) => judicator,
			Resolution::Unmapped => {
				tracing::debug!(path, object_type = %asset.object_type, source_kind = %asset.source_kind, "no binding");
				report.unjudged += 1;
				return Ok(());
			}
			Resolution::Unbound => {
				tracing::error!(
					path,
					object_type = %asset.object_type,
					source_kind = %asset.source_kind,
					"binding has no judicator assigned"
				);
				report.unjudged += 1;
				return Ok(());
			}
			Resolution::Disabled => {
				tracing::debug!(path, "binding disabled");
				report.unjudged += 1;
				return Ok(());
			}
			Resolution::UnknownJudicator(name) => {
				tracing::error!(path, judicator = name, "binding names an unknown judicator");
				report.unjudged += 1;
				return Ok(());
			}
		};

		let mut ctx = AdjudicationCtx { comparators: &self.comparators, probe };
		let judgment = judicator.judge(asset, &mut ctx);
		report.evaluated += 1;

		if !judgment.complete {
			tracing::debug!(path, judicator = judicator.name(), "judged only partially; not cached");
			report.partial += 1;
		} else if let (Some(cache), Some(fingerprint)) = (cache, fingerprint) {
			let passed = judgment.passed();
			cache.record(path, CacheEntry { fingerprint, law: self.law.clone(), passed })?;
		}
		report.verdicts.extend(judgment.verdict);
		Ok(())
	}

	/// Remediates one violation of `verdict` against the asset in `db`.
	pub fn remediate(
		&self,
		db: &mut dyn AssetDatabase,
		verdict: &mut Verdict,
		id: ViolationId,
	) -> Result<Remedied, RemedyError> {
		let judicator = self
			.judicators
			.get(&verdict.judicator)
			.ok_or_else(|| RemedyError::UnknownJudicator(verdict.judicator.clone()))?;
		let asset = db
			.asset_mut(&verdict.subject)
			.ok_or_else(|| RemedyError::SubjectMissing(verdict.subject.clone()))?;
		judicator.remediate(verdict, id, asset, &self.comparators)
	}

	/// Remediates every fixable violation of `verdict`, one call each.
	///
	/// Violations resolved as a side effect of an earlier remedy are not
	/// attempted again.
	pub fn remediate_all(
		&self,
		db: &mut dyn AssetDatabase,
		verdict: &mut Verdict,
	) -> Vec<(ViolationId, Result<Remedied, RemedyError>)> {
		let mut results = Vec::new();
		for id in verdict.fixable_ids() {
			if verdict.get(id).is_none() {
				continue;
			}
			results.push((id, self.remediate(db, verdict, id)));
		}
		results
	}
}
