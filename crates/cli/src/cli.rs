//! CLI schema for the lex binary.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use lex_law::config::load::BASE_FILE;
use lex_primitives::SourceKind;

#[derive(Parser, Debug)]
#[command(name = "lex")]
#[command(about = "Validate assets against declarative law")]
#[command(version)]
/// Command-line arguments.
pub struct Cli {
	/// Config directory holding lex.toml, or a single law file
	#[arg(long, short = 'c', global = true, value_name = "PATH", default_value = ".")]
	pub config: PathBuf,

	/// Verbose logging
	#[arg(long, short = 'v', global = true)]
	pub verbose: bool,

	/// Subcommand to execute.
	#[command(subcommand)]
	pub command: Command,
}

impl Cli {
	/// File that editing commands write back to.
	///
	/// Only the base layer is ever written; local overrides stay untouched.
	pub fn law_file(&self) -> PathBuf {
		law_file(&self.config)
	}
}

pub fn law_file(config: &Path) -> PathBuf {
	if config.is_dir() {
		config.join(BASE_FILE)
	} else {
		config.to_path_buf()
	}
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
	/// Judge assets and report violations
	Judge {
		#[command(flatten)]
		target: Target,

		/// Verdict cache; unchanged assets that passed before are skipped
		#[arg(long, value_name = "FILE")]
		cache: Option<PathBuf>,

		/// Print verdicts as JSON
		#[arg(long)]
		json: bool,
	},
	/// Judge assets and remediate every fixable violation
	Fix {
		#[command(flatten)]
		target: Target,

		/// Report remediations without saving the corpus
		#[arg(long)]
		dry_run: bool,
	},
	/// Add an unbound binding for an asset type
	Bind {
		/// Object type, e.g. Texture2D
		object_type: String,

		/// Source kind, e.g. TextureImporter
		source_kind: SourceKind,
	},
	/// Record a material's shader variant into the law
	Legislate {
		/// JSON corpus containing the material
		#[arg(long, value_name = "FILE")]
		corpus: PathBuf,

		/// Path of the material inside the corpus
		material: String,

		/// Record every subset of the shader's keyword space
		#[arg(long)]
		permutations: bool,
	},
}

/// Assets a command operates on.
#[derive(Args, Debug)]
pub struct Target {
	/// JSON corpus describing assets and their dependencies
	#[arg(long, value_name = "FILE")]
	pub corpus: PathBuf,

	/// Asset paths to judge (defaults to the whole corpus)
	pub paths: Vec<String>,
}
