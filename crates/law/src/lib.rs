//! Declarative law for lex: presets, judicator configurations, and the
//! binding table that decides which judicator handles which asset.

pub mod binding;
pub mod config;
pub mod judicator;
pub mod legislate;
pub mod spec;

pub use binding::{Binding, BindingKey, BindingTable};
pub use config::load::{ConfigLoadReport, load_from_dir};
pub use config::{ConfigError, Lex};
pub use judicator::{
	ComponentRules, DEFAULT_PRECISION, JudicatorConfig, MatchPolicy, MaterialLaw, ModelRules, PerformanceStandards,
	Placeholder, PresetRules, QualityProfile, ShaderLaw,
};
pub use legislate::{BindingOutcome, VariantOutcome};
pub use spec::{NamedSpec, PropertyModification, Specification};

#[cfg(test)]
mod tests;
