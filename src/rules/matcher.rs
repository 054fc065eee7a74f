use crate::config::types::Rule;
use crate::error::{MigrateError, Result};
use regex::Regex;

/// A compiled rule ready for matching.
#[derive(Debug)]
pub struct CompiledRule {
	/// The original rule.
	pub rule: Rule,

	/// Compiled strict pattern.
	pub regex: Regex,

	/// Compiled fallback pattern.
	pub fallback_regex: Option<Regex>,
}

/// Which of a rule's patterns produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
	Strict,
	Fallback,
}

impl CompiledRule {
	/// Compile a rule's strict and fallback patterns.
	pub fn compile(rule: &Rule) -> Result<Self> {
		let regex = compile_regex(&rule.name, &rule.pattern)?;

		let fallback_regex = rule
			.fallback
			.as_ref()
			.map(|p| compile_regex(&rule.name, p))
			.transpose()?;

		Ok(CompiledRule {
			rule: rule.clone(),
			regex,
			fallback_regex,
		})
	}

	/// Whether the rule's guard says it has already been applied to `text`.
	pub fn is_guarded(&self, text: &str) -> bool {
		self.rule
			.unless_contains
			.as_deref()
			.is_some_and(|needle| text.contains(needle))
	}

	/// Pick the pattern to use on `text`: strict first, then fallback.
	///
	/// Returns the tier, the regex and the number of non-overlapping matches, or `None` when
	/// neither pattern matches.
	pub fn select(&self, text: &str) -> Option<(MatchTier, &Regex, usize)> {
		let strict = self.regex.find_iter(text).count();
		if strict > 0 {
			return Some((MatchTier::Strict, &self.regex, strict));
		}

		let fallback = self.fallback_regex.as_ref()?;
		let loose = fallback.find_iter(text).count();
		(loose > 0).then_some((MatchTier::Fallback, fallback, loose))
	}
}

/// Compile a regex pattern string.
fn compile_regex(rule: &str, pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| MigrateError::InvalidRegex {
		rule: rule.to_string(),
		pattern: pattern.to_string(),
		source,
	})
}

/// Compile a list of rules, preserving order.
pub fn compile_rules(rules: &[Rule]) -> Result<Vec<CompiledRule>> {
	rules.iter().map(CompiledRule::compile).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn make_rule(pattern: &str, fallback: Option<&str>) -> Rule {
		Rule {
			name: "test".to_string(),
			pattern: pattern.to_string(),
			replacement: "X".to_string(),
			fallback: fallback.map(str::to_string),
			..Default::default()
		}
	}

	#[test]
	fn test_compile_invalid_regex() {
		let result = CompiledRule::compile(&make_rule(r"[invalid", None));
		match result.unwrap_err() {
			MigrateError::InvalidRegex { rule, pattern, .. } => {
				assert_eq!(rule, "test");
				assert_eq!(pattern, "[invalid");
			}
			e => panic!("Expected InvalidRegex error, got {e:?}"),
		}
	}

	#[test]
	fn test_compile_invalid_fallback() {
		let result = CompiledRule::compile(&make_rule("ok", Some("(unclosed")));
		assert!(matches!(
			result,
			Err(MigrateError::InvalidRegex { ref pattern, .. }) if pattern == "(unclosed"
		));
	}

	#[test]
	fn test_select_prefers_strict() {
		let compiled = CompiledRule::compile(&make_rule("a b", Some(r"a\s+b"))).unwrap();
		let (tier, _, count) = compiled.select("a b and a b").unwrap();
		assert_eq!(tier, MatchTier::Strict);
		assert_eq!(count, 2);
	}

	#[test]
	fn test_select_falls_back() {
		let compiled = CompiledRule::compile(&make_rule("a b", Some(r"a\s+b"))).unwrap();
		let (tier, _, count) = compiled.select("a   b").unwrap();
		assert_eq!(tier, MatchTier::Fallback);
		assert_eq!(count, 1);
	}

	#[test]
	fn test_select_no_match() {
		let compiled = CompiledRule::compile(&make_rule("a b", Some(r"a\s+b"))).unwrap();
		assert!(compiled.select("nothing here").is_none());

		let strict_only = CompiledRule::compile(&make_rule("a b", None)).unwrap();
		assert!(strict_only.select("a  b").is_none());
	}

	#[test]
	fn test_is_guarded() {
		let mut rule = make_rule("x", None);
		rule.unless_contains = Some("done".to_string());
		let compiled = CompiledRule::compile(&rule).unwrap();
		assert!(compiled.is_guarded("already done"));
		assert!(!compiled.is_guarded("pending"));

		let unguarded = CompiledRule::compile(&make_rule("x", None)).unwrap();
		assert!(!unguarded.is_guarded("done"));
	}

	#[test]
	fn test_compile_rules_preserves_order() {
		let rules = vec![make_rule("first", None), make_rule("second", None)];
		let compiled = compile_rules(&rules).unwrap();
		assert_eq!(compiled[0].rule.pattern, "first");
		assert_eq!(compiled[1].rule.pattern, "second");
	}
}
