use crate::config::types::Rule;
use crate::error::Result;
use crate::rules::matcher::{CompiledRule, MatchTier, compile_rules};
use tracing::{debug, trace};

/// What happened when one rule ran against one buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleOutcome {
	/// The strict pattern matched and every occurrence was replaced.
	Applied { replacements: usize },

	/// Only the fallback pattern matched.
	AppliedFallback { replacements: usize },

	/// Neither pattern matched; the buffer is untouched.
	NoMatch,

	/// The rule's `unless_contains` literal was already present.
	Guarded,
}

impl RuleOutcome {
	/// Whether the rule changed anything.
	pub fn applied(&self) -> bool {
		matches!(
			self,
			RuleOutcome::Applied { .. } | RuleOutcome::AppliedFallback { .. }
		)
	}
}

/// Per-rule record of a rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
	pub name: String,

	/// Diagnostic label copied from the rule, if it has one.
	pub label: Option<String>,

	/// Whether the rule carried a fallback pattern to try.
	pub has_fallback: bool,

	pub outcome: RuleOutcome,
}

impl RuleReport {
	/// A labelled rule whose strict pattern missed. The fallback may still have matched.
	pub fn strict_missed(&self) -> bool {
		self.label.is_some()
			&& matches!(
				self.outcome,
				RuleOutcome::AppliedFallback { .. } | RuleOutcome::NoMatch
			)
	}

	/// A labelled rule that missed on every pattern it has.
	pub fn gave_up(&self) -> bool {
		self.label.is_some() && self.outcome == RuleOutcome::NoMatch
	}

	/// A labelled rule whose fallback was tried and missed too.
	pub fn fallback_missed(&self) -> bool {
		self.has_fallback && self.gave_up()
	}
}

/// The result of running a rule set over one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	/// Final text after every rule.
	pub text: String,

	/// One report per rule, in rule order.
	pub rules: Vec<RuleReport>,
}

/// Something that turns a file's text into new text plus a per-rule account.
///
/// The batch driver only talks to this trait, so a structural rewriter can stand in for the
/// regex one.
pub trait TextRewriter {
	fn rewrite(&self, text: &str) -> Rewrite;
}

/// Ordered, compiled regex rules.
#[derive(Debug)]
pub struct RuleSet {
	rules: Vec<CompiledRule>,
}

impl RuleSet {
	/// Compile every rule up front so a bad pattern fails before any file is read.
	pub fn compile(rules: &[Rule]) -> Result<Self> {
		Ok(RuleSet {
			rules: compile_rules(rules)?,
		})
	}

	pub fn len(&self) -> usize {
		self.rules.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &CompiledRule> {
		self.rules.iter()
	}
}

impl TextRewriter for RuleSet {
	fn rewrite(&self, text: &str) -> Rewrite {
		let mut buffer = text.to_string();
		let mut reports = Vec::with_capacity(self.rules.len());

		for compiled in &self.rules {
			let outcome = apply_rule(compiled, &mut buffer);
			debug!(rule = %compiled.rule.name, ?outcome, "rule evaluated");
			reports.push(RuleReport {
				name: compiled.rule.name.clone(),
				label: compiled.rule.label.clone(),
				has_fallback: compiled.fallback_regex.is_some(),
				outcome,
			});
		}

		Rewrite {
			text: buffer,
			rules: reports,
		}
	}
}

/// Run one rule against the evolving buffer.
fn apply_rule(compiled: &CompiledRule, buffer: &mut String) -> RuleOutcome {
	if compiled.is_guarded(buffer.as_str()) {
		return RuleOutcome::Guarded;
	}

	let Some((tier, regex, replacements)) = compiled.select(buffer.as_str()) else {
		return RuleOutcome::NoMatch;
	};

	trace!(rule = %compiled.rule.name, pattern = regex.as_str(), "replacing");
	let replaced = regex
		.replace_all(buffer.as_str(), compiled.rule.replacement.as_str())
		.into_owned();
	*buffer = replaced;

	match tier {
		MatchTier::Strict => RuleOutcome::Applied { replacements },
		MatchTier::Fallback => RuleOutcome::AppliedFallback { replacements },
	}
}

/// Apply a rule set to a text.
pub fn apply_rules(text: &str, rules: &RuleSet) -> Rewrite {
	rules.rewrite(text)
}
