//! Rule evaluation for lex.
//!
//! [`Court`] ties the pieces together: it resolves each subject's judicator
//! through the binding table, consults the verdict cache, and collects
//! [`Verdict`]s. Judicators compare properties through the [`Comparators`]
//! registry and the [`Matcher`], and remediate the violations they raised.

pub mod compare;
pub mod court;
pub mod database;
pub mod judicator;
pub mod matcher;
pub mod remedy;
pub mod verdict;

pub use compare::{CompareOptions, Comparators, Mismatch, Normalized};
pub use court::{Court, CourtError, JudgmentReport, Progress, Resolution, Session, Silent};
pub use database::{AssetDatabase, CorpusError, MemoryDatabase, expand_selection};
pub use judicator::{
	AdjudicationCtx, CameraAngle, Findings, Judgment, Judicator, NullProbe, ProbeError, RenderStats, Rule, SceneProbe,
};
pub use matcher::{MatchOutcome, Matcher, SpecMismatch};
pub use remedy::{RemediationStatus, Remedied, RemedyError};
pub use verdict::{AggregateError, KeywordClass, Remedy, Verdict, Violation, ViolationId};
