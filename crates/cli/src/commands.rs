//! Subcommand implementations.
//!
//! Each command returns whether the run was clean, which `main` maps to the
//! process exit code.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use lex_cache::VerdictCache;
use lex_law::{BindingOutcome, Lex, VariantOutcome, load_from_dir};
use lex_primitives::{AssetBody, SourceKind};
use lex_tribunal::{AssetDatabase, Court, MemoryDatabase, RemediationStatus, Session, Verdict};

use crate::cli::{Cli, Command, Target, law_file};
use crate::report;

pub fn run(cli: &Cli) -> Result<bool> {
	match &cli.command {
		Command::Judge { target, cache, json } => judge(&cli.config, target, cache.as_deref(), *json),
		Command::Fix { target, dry_run } => fix(&cli.config, target, *dry_run),
		Command::Bind { object_type, source_kind } => bind(&cli.config, object_type, *source_kind),
		Command::Legislate { corpus, material, permutations } => {
			legislate(&cli.config, corpus, material, *permutations)
		}
	}
}

/// Loads the merged law from a config directory or a single file.
pub fn load_lex(config: &Path) -> Result<Lex> {
	if config.is_dir() {
		return load_from_dir(config)
			.into_result()?
			.with_context(|| format!("no law found in {}", config.display()));
	}
	Lex::load(config).with_context(|| format!("loading law from {}", config.display()))
}

/// Loads only the writable layer, starting empty when it does not exist yet.
fn load_for_edit(config: &Path) -> Result<Lex> {
	let file = law_file(config);
	if !file.exists() {
		tracing::info!(path = %file.display(), "starting a new law file");
		return Ok(Lex::default());
	}
	Lex::load(&file).with_context(|| format!("loading law from {}", file.display()))
}

fn save_lex(lex: &Lex, config: &Path) -> Result<()> {
	let file = law_file(config);
	lex.save(&file)
		.with_context(|| format!("saving law to {}", file.display()))
}

fn load_corpus(path: &Path) -> Result<MemoryDatabase> {
	MemoryDatabase::load(path).with_context(|| format!("loading corpus {}", path.display()))
}

fn selection(target: &Target, db: &MemoryDatabase) -> Vec<String> {
	if target.paths.is_empty() {
		db.paths().map(str::to_string).collect()
	} else {
		target.paths.clone()
	}
}

fn judge(config: &Path, target: &Target, cache: Option<&Path>, json: bool) -> Result<bool> {
	let court = Court::from_lex(&load_lex(config)?)?;
	let db = load_corpus(&target.corpus)?;
	let selection = selection(target, &db);

	let mut cache = cache
		.map(VerdictCache::open)
		.transpose()
		.context("opening verdict cache")?;
	let mut session = Session::new();
	if let Some(cache) = cache.as_mut() {
		session = session.with_cache(cache);
	}

	let report = court.pass_judgment(&db, &selection, session)?;
	if json {
		println!("{}", serde_json::to_string_pretty(&report.verdicts)?);
	} else {
		print!("{}", report::render(&report));
	}
	Ok(report.is_clean())
}

fn fix(config: &Path, target: &Target, dry_run: bool) -> Result<bool> {
	let court = Court::from_lex(&load_lex(config)?)?;
	let mut db = load_corpus(&target.corpus)?;
	let selection = selection(target, &db);

	let mut report = court.pass_judgment(&db, &selection, Session::new())?;
	for verdict in &mut report.verdicts {
		for (id, result) in court.remediate_all(&mut db, verdict) {
			println!("{} {id}: {}", verdict.subject, result.describe());
		}
	}

	let dirty = db.dirty().count();
	if dirty > 0 && !dry_run {
		db.save(&target.corpus)
			.with_context(|| format!("saving corpus {}", target.corpus.display()))?;
		tracing::info!(assets = dirty, "saved remediated assets");
	}

	let remaining: usize = report.verdicts.iter().map(Verdict::len).sum();
	if remaining > 0 {
		println!("{remaining} violation(s) need manual attention");
	}
	Ok(remaining == 0 && report.is_complete())
}

fn bind(config: &Path, object_type: &str, source_kind: SourceKind) -> Result<bool> {
	let mut lex = load_for_edit(config)?;
	let outcome = lex.create_binding(object_type, source_kind);
	println!("{outcome}");
	if matches!(outcome, BindingOutcome::Created(_)) {
		save_lex(&lex, config)?;
	}
	Ok(true)
}

fn legislate(config: &Path, corpus: &Path, material: &str, permutations: bool) -> Result<bool> {
	let db = load_corpus(corpus)?;
	let asset = db
		.asset(material)
		.ok_or_else(|| anyhow!("{material} is not in the corpus"))?;
	let AssetBody::Material(body) = &asset.body else {
		bail!("{material} is not a material");
	};

	let mut lex = load_for_edit(config)?;
	let shader = &body.shader.name;
	let changed = if permutations {
		let recorded = lex.record_all_permutations(shader, &body.shader.keyword_space)?;
		println!("recorded {recorded} new variant(s) of {shader}");
		recorded > 0
	} else {
		let outcome = lex.record_variant(shader, &body.keywords);
		println!("{outcome}");
		outcome == VariantOutcome::Recorded
	};

	if changed {
		save_lex(&lex, config)?;
	}
	Ok(true)
}

#[cfg(test)]
mod tests;
