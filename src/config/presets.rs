//! Built-in rule sets for the sidebar layout migration.
//!
//! `add-sidebar` wires pages up to the collapsible sidebar hook; `remove-sidebar-var` moves them
//! onto the `--sidebar-width` CSS variable and drops the hook again. They are independent: each
//! works on its own target list and neither assumes the other has run.

use crate::config::types::{Config, DEFAULT_BASE_DIR, Rule};
use std::path::PathBuf;

/// Pages that get the collapsible sidebar wiring.
pub const ADD_SIDEBAR_TARGETS: &[&str] = &[
	"Outlets.tsx",
	"Employees.tsx",
	"Payments.tsx",
	"Users.tsx",
	"Products.tsx",
	"Inventory.tsx",
	"Orders.tsx",
	"AuditLogs.tsx",
];

/// Pages moved onto the CSS variable.
pub const REMOVE_SIDEBAR_VAR_TARGETS: &[&str] = &[
	"Dashboard.tsx",
	"Reports.tsx",
	"Payments.tsx",
	"Users.tsx",
	"Products.tsx",
	"Inventory.tsx",
	"Orders.tsx",
	"AuditLogs.tsx",
];

/// A named, built-in batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
	AddSidebar,
	RemoveSidebarVar,
}

impl Preset {
	/// Every preset, in display order.
	pub const ALL: [Preset; 2] = [Preset::AddSidebar, Preset::RemoveSidebarVar];

	/// The name used on the command line.
	pub fn as_str(&self) -> &'static str {
		match self {
			Preset::AddSidebar => "add-sidebar",
			Preset::RemoveSidebarVar => "remove-sidebar-var",
		}
	}

	/// Build the preset's config against the default base directory.
	pub fn config(&self) -> Config {
		match self {
			Preset::AddSidebar => Config {
				base_dir: PathBuf::from(DEFAULT_BASE_DIR),
				targets: to_targets(ADD_SIDEBAR_TARGETS),
				summary: Some("All pages updated successfully!".to_string()),
				rules: add_sidebar_rules(),
			},
			Preset::RemoveSidebarVar => Config {
				base_dir: PathBuf::from(DEFAULT_BASE_DIR),
				targets: to_targets(REMOVE_SIDEBAR_VAR_TARGETS),
				summary: Some("Batch update complete!".to_string()),
				rules: remove_sidebar_var_rules(),
			},
		}
	}
}

fn to_targets(names: &[&str]) -> Vec<String> {
	names.iter().map(|s| s.to_string()).collect()
}

fn rule(name: &str, pattern: &str, replacement: &str) -> Rule {
	Rule {
		name: name.to_string(),
		pattern: pattern.to_string(),
		replacement: replacement.to_string(),
		..Default::default()
	}
}

/// Rules that insert the hook, flatten the flex wrapper, and make `<main>` collapse-aware.
pub fn add_sidebar_rules() -> Vec<Rule> {
	vec![
		Rule {
			unless_contains: Some("useSidebarState".to_string()),
			..rule(
				"add-hook-import",
				r"(import.*from '@/contexts/AuthContext')",
				"${1}\nimport { useSidebarState } from '@/hooks/useSidebarState'",
			)
		},
		Rule {
			unless_contains: Some("isCollapsed = useSidebarState()".to_string()),
			..rule(
				"add-hook-call",
				r"(const \{ user.*\} = useAuth\(\))",
				"${1}\n  const isCollapsed = useSidebarState()",
			)
		},
		rule(
			"flatten-layout-div",
			r#"<div className="flex min-h-screen bg-gray-50">"#,
			r#"<div className="min-h-screen bg-gray-50">"#,
		),
		rule(
			"collapsible-main",
			r#"<main className="flex-1 overflow-auto">"#,
			r#"<main className={`$${isCollapsed ? 'ml-16' : 'ml-64'} transition-all duration-300`}>"#,
		),
		rule(
			"sticky-header",
			r#"(<main[^>]*>\s*\{/\* Header \*/\}\s*)<div className="bg-white border-b"#,
			r#"${1}<div className="sticky top-0 z-10 bg-white border-b"#,
		),
	]
}

/// Rules that replace the collapse-aware margin with the CSS variable and drop the hook.
pub fn remove_sidebar_var_rules() -> Vec<Rule> {
	vec![
		Rule {
			fallback: Some(
				r"<main className=\{`\$\{isCollapsed \? 'ml-16' : 'ml-64'\} [^`]+`\}>".to_string(),
			),
			label: Some("main tag".to_string()),
			..rule(
				"css-var-main",
				r"<main className=\{`\$\{isCollapsed \? 'ml-16' : 'ml-64'\} transition-all duration-300`\}>",
				r#"<main className="transition-all duration-300 ease-in-out" style={{ marginLeft: 'var(--sidebar-width, 16rem)' }}>"#,
			)
		},
		rule(
			"drop-hook-call",
			r"\s+const isCollapsed = useSidebarState\(\)\n",
			"\n",
		),
		rule(
			"drop-hook-import",
			r"import \{ useSidebarState \} from '@/hooks/useSidebarState'\n",
			"",
		),
	]
}
