// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use pspec_metadata::OutcomeKind;
use serde::Deserialize;

/// The rendering mode a glyph is looked up for.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum GlyphMode {
    /// One glyph per test, appended to the module's line.
    Compact,

    /// One line per test, prefixed with its glyph.
    Expanded,
}

/// A built-in set of default glyphs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum GlyphProfile {
    /// Check marks and crosses.
    #[default]
    Unicode,

    /// ASCII only.
    Plaintext,
}

/// One glyph for each known outcome kind.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SymbolTable {
    /// The glyph for passed tests.
    pub passed: String,

    /// The glyph for failed tests.
    pub failed: String,

    /// The glyph for skipped tests.
    pub skipped: String,
}

impl SymbolTable {
    fn get(&self, outcome: &OutcomeKind) -> Option<&str> {
        match outcome {
            OutcomeKind::Passed => Some(&self.passed),
            OutcomeKind::Failed => Some(&self.failed),
            OutcomeKind::Skipped => Some(&self.skipped),
            OutcomeKind::Other(_) => None,
        }
    }
}

/// The default glyphs of a [`GlyphProfile`].
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ProfileSymbols {
    /// Defaults for compact mode.
    pub compact: SymbolTable,

    /// Defaults for expanded mode.
    pub expanded: SymbolTable,

    /// The glyph for outcome kinds other than passed, failed and skipped.
    pub fallback: String,
}

/// User-supplied glyphs for some outcome kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SymbolOverrides {
    /// Override for passed tests.
    pub passed: Option<String>,

    /// Override for failed tests.
    pub failed: Option<String>,

    /// Override for skipped tests.
    pub skipped: Option<String>,
}

impl SymbolOverrides {
    fn get(&self, outcome: &OutcomeKind) -> Option<&str> {
        match outcome {
            OutcomeKind::Passed => self.passed.as_deref(),
            OutcomeKind::Failed => self.failed.as_deref(),
            OutcomeKind::Skipped => self.skipped.as_deref(),
            OutcomeKind::Other(_) => None,
        }
    }
}

/// The resolved outcome glyphs for a run.
///
/// For each mode, a glyph is looked up in this order:
///
/// 1. the override for that mode;
/// 2. the shared override;
/// 3. the profile default for that mode.
///
/// Outcome kinds that aren't passed, failed or skipped always get the
/// profile's fallback glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymbolConfig {
    defaults: ProfileSymbols,
    shared: SymbolOverrides,
    compact: SymbolOverrides,
    expanded: SymbolOverrides,
}

impl SymbolConfig {
    /// Creates a new `SymbolConfig` with no overrides.
    pub fn new(defaults: ProfileSymbols) -> Self {
        Self {
            defaults,
            shared: SymbolOverrides::default(),
            compact: SymbolOverrides::default(),
            expanded: SymbolOverrides::default(),
        }
    }

    /// Sets overrides that apply to both modes.
    pub fn with_shared(mut self, overrides: SymbolOverrides) -> Self {
        self.shared = overrides;
        self
    }

    /// Sets overrides that apply to a single mode.
    pub fn with_mode_overrides(mut self, mode: GlyphMode, overrides: SymbolOverrides) -> Self {
        match mode {
            GlyphMode::Compact => self.compact = overrides,
            GlyphMode::Expanded => self.expanded = overrides,
        }
        self
    }

    /// Returns the glyph to display for `outcome` in `mode`.
    pub fn symbol(&self, outcome: &OutcomeKind, mode: GlyphMode) -> &str {
        let (mode_overrides, mode_defaults) = match mode {
            GlyphMode::Compact => (&self.compact, &self.defaults.compact),
            GlyphMode::Expanded => (&self.expanded, &self.defaults.expanded),
        };

        mode_overrides
            .get(outcome)
            .or_else(|| self.shared.get(outcome))
            .or_else(|| mode_defaults.get(outcome))
            .unwrap_or(&self.defaults.fallback)
    }

    /// Returns the fallback glyph.
    pub fn fallback(&self) -> &str {
        &self.defaults.fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use test_strategy::proptest;

    fn defaults() -> ProfileSymbols {
        ProfileSymbols {
            compact: SymbolTable {
                passed: "✓".to_owned(),
                failed: "✗".to_owned(),
                skipped: "»".to_owned(),
            },
            expanded: SymbolTable {
                passed: "[x]".to_owned(),
                failed: "[!]".to_owned(),
                skipped: "[-]".to_owned(),
            },
            fallback: "?".to_owned(),
        }
    }

    fn overrides() -> impl Strategy<Value = SymbolOverrides> {
        (
            proptest::option::of("[a-z]{1,3}"),
            proptest::option::of("[A-Z]{1,3}"),
            proptest::option::of("[0-9]{1,3}"),
        )
            .prop_map(|(passed, failed, skipped)| SymbolOverrides {
                passed,
                failed,
                skipped,
            })
    }

    #[test]
    fn no_overrides_uses_defaults() {
        let config = SymbolConfig::new(defaults());
        let cases = [
            (OutcomeKind::Passed, GlyphMode::Compact, "✓"),
            (OutcomeKind::Failed, GlyphMode::Compact, "✗"),
            (OutcomeKind::Skipped, GlyphMode::Compact, "»"),
            (OutcomeKind::Passed, GlyphMode::Expanded, "[x]"),
            (OutcomeKind::Failed, GlyphMode::Expanded, "[!]"),
            (OutcomeKind::Skipped, GlyphMode::Expanded, "[-]"),
        ];
        for (outcome, mode, expected) in cases {
            assert_eq!(
                config.symbol(&outcome, mode),
                expected,
                "for {outcome} in {mode:?}"
            );
        }
    }

    #[test]
    fn shared_overrides_apply_to_both_modes() {
        let config = SymbolConfig::new(defaults()).with_shared(SymbolOverrides {
            passed: Some("☂".to_owned()),
            failed: Some("⚡".to_owned()),
            skipped: Some("🥑".to_owned()),
        });
        for mode in [GlyphMode::Compact, GlyphMode::Expanded] {
            assert_eq!(config.symbol(&OutcomeKind::Passed, mode), "☂");
            assert_eq!(config.symbol(&OutcomeKind::Failed, mode), "⚡");
            assert_eq!(config.symbol(&OutcomeKind::Skipped, mode), "🥑");
        }
    }

    #[test]
    fn mode_overrides_stay_in_their_mode() {
        let config = SymbolConfig::new(defaults())
            .with_shared(SymbolOverrides {
                passed: Some("shared".to_owned()),
                ..Default::default()
            })
            .with_mode_overrides(
                GlyphMode::Compact,
                SymbolOverrides {
                    passed: Some(".".to_owned()),
                    ..Default::default()
                },
            );
        assert_eq!(config.symbol(&OutcomeKind::Passed, GlyphMode::Compact), ".");
        assert_eq!(
            config.symbol(&OutcomeKind::Passed, GlyphMode::Expanded),
            "shared"
        );
        assert_eq!(
            config.symbol(&OutcomeKind::Failed, GlyphMode::Compact),
            "✗",
            "outcomes without overrides use the default"
        );
    }

    #[proptest(cases = 64)]
    fn precedence(
        #[strategy(overrides())] shared: SymbolOverrides,
        #[strategy(overrides())] mode_specific: SymbolOverrides,
        mode: GlyphMode,
        #[strategy(prop_oneof![
            Just(OutcomeKind::Passed),
            Just(OutcomeKind::Failed),
            Just(OutcomeKind::Skipped),
        ])]
        outcome: OutcomeKind,
    ) {
        let config = SymbolConfig::new(defaults())
            .with_shared(shared.clone())
            .with_mode_overrides(mode, mode_specific.clone());
        let expected = mode_specific
            .get(&outcome)
            .or_else(|| shared.get(&outcome))
            .map(str::to_owned)
            .unwrap_or_else(|| {
                SymbolConfig::new(defaults())
                    .symbol(&outcome, mode)
                    .to_owned()
            });

        prop_assert_eq!(config.symbol(&outcome, mode), expected.as_str());
    }

    #[proptest(cases = 64)]
    fn unknown_outcomes_use_fallback(
        #[strategy(overrides())] shared: SymbolOverrides,
        #[strategy(overrides())] compact: SymbolOverrides,
        #[strategy(overrides())] expanded: SymbolOverrides,
        mode: GlyphMode,
        #[strategy("[a-z]{1,10}")] kind: String,
    ) {
        let outcome = OutcomeKind::from(kind);
        prop_assume!(!outcome.is_known());

        let config = SymbolConfig::new(defaults())
            .with_shared(shared)
            .with_mode_overrides(GlyphMode::Compact, compact)
            .with_mode_overrides(GlyphMode::Expanded, expanded);
        prop_assert_eq!(config.symbol(&outcome, mode), "?");
    }

    #[proptest(cases = 64)]
    fn resolution_is_idempotent(
        #[strategy(overrides())] shared: SymbolOverrides,
        mode: GlyphMode,
        outcome: OutcomeKind,
    ) {
        let config = SymbolConfig::new(defaults()).with_shared(shared);
        let first = config.symbol(&outcome, mode).to_owned();
        prop_assert_eq!(config.symbol(&outcome, mode), first.as_str());
    }
}
