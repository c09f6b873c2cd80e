//! Candidate filtering rules for script discovery

use crate::domain::Scope;

/// Any of the owner, group or other execute bits.
const EXECUTE_BITS: u32 = 0o111;

/// Name-based exclusion rules applied before a candidate is stat'ed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFilter {
    /// Exact file names never listed (packaging/metadata files)
    pub denylist: Vec<String>,
    /// Names additionally excluded in the package root
    pub root_excludes: Vec<String>,
}

impl ScriptFilter {
    pub fn new(denylist: Vec<String>, root_excludes: Vec<String>) -> Self {
        Self {
            denylist,
            root_excludes,
        }
    }

    /// Whether a directory entry may be considered a script by name alone.
    pub fn admits(&self, name: &str, scope: Scope) -> bool {
        if name.starts_with('.') {
            return false;
        }
        if self.denylist.iter().any(|d| d == name) {
            return false;
        }
        if scope == Scope::Root && self.root_excludes.iter().any(|d| d == name) {
            return false;
        }
        true
    }
}

/// True if any execute permission bit is set in a POSIX mode.
pub fn is_executable(mode: u32) -> bool {
    mode & EXECUTE_BITS != 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn filter() -> ScriptFilter {
        ScriptFilter::new(
            vec!["README.md".into(), "package.json".into(), "yarn.lock".into()],
            vec!["bin".into(), "tools".into()],
        )
    }

    #[rstest]
    #[case(".hidden", Scope::Scripts, false)]
    #[case(".hidden", Scope::Root, false)]
    #[case("README.md", Scope::Scripts, false)]
    #[case("yarn.lock", Scope::Root, false)]
    #[case("bin", Scope::Root, false)]
    #[case("tools", Scope::Root, false)]
    #[case("bin", Scope::Scripts, true)]
    #[case("tools", Scope::Scripts, true)]
    #[case("deploy", Scope::Root, true)]
    #[case("readme.md", Scope::Scripts, true)]
    fn given_name_and_scope_when_filtering_then_matches_rules(
        #[case] name: &str,
        #[case] scope: Scope,
        #[case] expected: bool,
    ) {
        assert_eq!(filter().admits(name, scope), expected);
    }

    #[rstest]
    #[case(0o644, false)]
    #[case(0o600, false)]
    #[case(0o755, true)]
    #[case(0o744, true)]
    #[case(0o654, true)]
    #[case(0o645, true)]
    #[case(0o100755, true)]
    fn given_mode_when_checking_then_any_execute_bit_counts(
        #[case] mode: u32,
        #[case] expected: bool,
    ) {
        assert_eq!(is_executable(mode), expected);
    }
}
