//! Rule compilation and text rewriting for layout-migrate.
//!
//! This module handles:
//! - Compiling strict and fallback patterns
//! - Applying an ordered rule set to a buffer, one rule after another

pub mod matcher;
pub mod rewriter;

pub use matcher::{CompiledRule, MatchTier, compile_rules};
pub use rewriter::{Rewrite, RuleOutcome, RuleReport, RuleSet, TextRewriter, apply_rules};
