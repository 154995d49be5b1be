// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! WCAG 2.1 success criteria catalog.
//!
//! A read-only reference dataset: every criterion the auditor knows about,
//! its conformance level, whether it needs human (AI) judgment, and the
//! guidance handed to the judgment provider. Catalog order is the order
//! criteria are evaluated and reported in.

use serde::{Deserialize, Serialize};

/// WCAG conformance level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WcagLevel {
    /// Level A - minimum conformance
    A,
    /// Level AA - standard conformance
    AA,
    /// Level AAA - enhanced conformance
    AAA,
}

impl WcagLevel {
    /// All levels, weakest first
    pub const ALL: [WcagLevel; 3] = [WcagLevel::A, WcagLevel::AA, WcagLevel::AAA];

    /// Tag the automated scanner uses to select rules for this level
    pub fn scanner_tag(&self) -> &'static str {
        match self {
            WcagLevel::A => "wcag2a",
            WcagLevel::AA => "wcag2aa",
            WcagLevel::AAA => "wcag2aaa",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WcagLevel::A => "A",
            WcagLevel::AA => "AA",
            WcagLevel::AAA => "AAA",
        }
    }
}

impl std::fmt::Display for WcagLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for WcagLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" => Ok(WcagLevel::A),
            "aa" => Ok(WcagLevel::AA),
            "aaa" => Ok(WcagLevel::AAA),
            other => Err(format!("Unknown WCAG level: {}", other)),
        }
    }
}

/// A single WCAG success criterion
#[derive(Debug, Clone, Serialize)]
pub struct Criterion {
    /// Dotted identifier, e.g. "1.1.1"
    pub id: &'static str,
    pub title: &'static str,
    pub level: WcagLevel,
    pub description: &'static str,
    /// Needs human (AI) judgment rather than rule-based scanning
    pub requires_manual_assessment: bool,
    /// What the judgment provider should look at
    pub guidance: &'static str,
}

const fn criterion(
    id: &'static str,
    title: &'static str,
    level: WcagLevel,
    description: &'static str,
    requires_manual_assessment: bool,
    guidance: &'static str,
) -> Criterion {
    Criterion {
        id,
        title,
        level,
        description,
        requires_manual_assessment,
        guidance,
    }
}

/// The WCAG 2.1 criteria known to the auditor, in evaluation order
pub static CATALOG: &[Criterion] = &[
    criterion(
        "1.1.1",
        "Non-text Content",
        WcagLevel::A,
        "All non-text content that is presented to the user has a text alternative that serves the equivalent purpose.",
        true,
        "Images carry alt text conveying the same information; decorative images use alt=\"\"; \
         charts and graphs have adequate long descriptions; images of text repeat the text; \
         CAPTCHAs offer an alternative modality.",
    ),
    criterion(
        "1.2.1",
        "Audio-only and Video-only (Prerecorded)",
        WcagLevel::A,
        "For prerecorded audio-only and prerecorded video-only media, alternatives are provided.",
        true,
        "Audio-only content has a transcript; video-only content has an audio track or text \
         alternative; alternatives are complete, accurate and easy to reach.",
    ),
    criterion(
        "1.2.2",
        "Captions (Prerecorded)",
        WcagLevel::A,
        "Captions are provided for all prerecorded audio content in synchronized media.",
        true,
        "Every video with audio has synchronized captions that identify speakers and relevant \
         sounds; caption controls are keyboard reachable and captions do not hide key content.",
    ),
    criterion(
        "1.3.1",
        "Info and Relationships",
        WcagLevel::A,
        "Information, structure, and relationships conveyed through presentation can be programmatically determined.",
        true,
        "Heading levels mirror the content hierarchy; lists, tables and form labels use the \
         proper elements; visual grouping is also expressed in markup.",
    ),
    criterion(
        "1.3.2",
        "Meaningful Sequence",
        WcagLevel::A,
        "When the sequence in which content is presented affects its meaning, a correct reading sequence can be programmatically determined.",
        true,
        "DOM order matches the visual reading order; CSS positioning does not reorder meaning; \
         layout tables linearize sensibly.",
    ),
    criterion(
        "1.3.3",
        "Sensory Characteristics",
        WcagLevel::A,
        "Instructions provided for understanding and operating content do not rely solely on sensory characteristics.",
        true,
        "Instructions do not depend only on shape, size, position, color or sound \
         (\"click the round button on the right\").",
    ),
    criterion(
        "1.4.1",
        "Use of Color",
        WcagLevel::A,
        "Color is not used as the only visual means of conveying information.",
        true,
        "Links, required fields, errors and chart series are distinguishable without color, \
         via text, icons, patterns or underlines.",
    ),
    criterion(
        "1.4.3",
        "Contrast (Minimum)",
        WcagLevel::AA,
        "Text has a contrast ratio of at least 4.5:1 (3:1 for large text).",
        false,
        "Measured by the automated scanner.",
    ),
    criterion(
        "2.1.1",
        "Keyboard",
        WcagLevel::A,
        "All functionality is available from a keyboard.",
        true,
        "Every interactive control is reachable and operable with the keyboard alone; custom \
         widgets handle the expected keys; no action requires specific timing of keystrokes.",
    ),
    criterion(
        "2.1.2",
        "No Keyboard Trap",
        WcagLevel::A,
        "If keyboard focus can be moved to a component, it can be moved away using only keyboard.",
        true,
        "Focus can leave embedded widgets, dialogs and media players with standard keys, or the \
         page explains how to leave them.",
    ),
    criterion(
        "2.2.1",
        "Timing Adjustable",
        WcagLevel::A,
        "Users can turn off, adjust, or extend time limits.",
        true,
        "Session timeouts, auto-advancing content and timed forms can be turned off, adjusted \
         or extended, with a warning before expiry.",
    ),
    criterion(
        "2.2.2",
        "Pause, Stop, Hide",
        WcagLevel::A,
        "Users can pause, stop, or hide moving, blinking, or auto-updating information.",
        true,
        "Carousels, animations, tickers and auto-refreshing regions longer than five seconds \
         offer a pause, stop or hide control.",
    ),
    criterion(
        "2.4.1",
        "Bypass Blocks",
        WcagLevel::A,
        "Mechanism is available to bypass blocks of content repeated on multiple pages.",
        true,
        "A skip link or landmark structure lets users jump past navigation repeated on every page.",
    ),
    criterion(
        "2.4.2",
        "Page Titled",
        WcagLevel::A,
        "Pages have titles that describe topic or purpose.",
        true,
        "The <title> is present, unique within the site and describes the page's topic or purpose.",
    ),
    criterion(
        "2.4.3",
        "Focus Order",
        WcagLevel::A,
        "Components receive focus in an order that preserves meaning and operability.",
        true,
        "Tab order follows the reading order; positive tabindex values do not scramble it; \
         dialogs move focus in and return it on close.",
    ),
    criterion(
        "2.4.4",
        "Link Purpose (In Context)",
        WcagLevel::A,
        "Purpose of each link can be determined from link text or context.",
        true,
        "Link text alone or with its sentence, paragraph or list item explains the destination; \
         flag generic text such as \"click here\" or \"read more\".",
    ),
    criterion(
        "2.4.6",
        "Headings and Labels",
        WcagLevel::AA,
        "Headings and labels describe topic or purpose.",
        true,
        "Headings summarize the section that follows; form labels say what input is expected.",
    ),
    criterion(
        "3.1.1",
        "Language of Page",
        WcagLevel::A,
        "Default human language of page can be programmatically determined.",
        false,
        "Checked by the automated scanner via the lang attribute.",
    ),
    criterion(
        "3.1.2",
        "Language of Parts",
        WcagLevel::AA,
        "Human language of each passage can be programmatically determined.",
        true,
        "Passages in a language other than the page default carry their own lang attribute.",
    ),
    criterion(
        "3.2.1",
        "On Focus",
        WcagLevel::A,
        "Receiving focus does not initiate a change of context.",
        true,
        "Focusing a control never submits a form, opens a window or moves focus elsewhere.",
    ),
    criterion(
        "3.2.2",
        "On Input",
        WcagLevel::A,
        "Changing input settings does not automatically cause change of context.",
        true,
        "Selecting an option or typing does not navigate or submit unless the user was told \
         beforehand.",
    ),
    criterion(
        "3.3.1",
        "Error Identification",
        WcagLevel::A,
        "If input error is detected, item in error is identified and error described in text.",
        true,
        "Validation errors name the field in error and describe the problem in text, not only \
         with color or icons.",
    ),
    criterion(
        "3.3.2",
        "Labels or Instructions",
        WcagLevel::A,
        "Labels or instructions are provided when content requires user input.",
        true,
        "Every input has a visible label; required fields and expected formats are stated up front.",
    ),
    criterion(
        "4.1.1",
        "Parsing",
        WcagLevel::A,
        "Content implemented using markup languages has complete start/end tags and proper nesting.",
        false,
        "Checked by the automated scanner.",
    ),
    criterion(
        "4.1.2",
        "Name, Role, Value",
        WcagLevel::A,
        "Name, role, value can be programmatically determined for UI components.",
        true,
        "Custom controls expose an accessible name, the right role and their current state; \
         state changes reach assistive technology.",
    ),
];

/// Look up a criterion by its dotted identifier
pub fn lookup(id: &str) -> Option<&'static Criterion> {
    CATALOG.iter().find(|c| c.id == id)
}

/// Criteria at exactly the given level, in catalog order
pub fn by_level(level: WcagLevel) -> Vec<&'static Criterion> {
    CATALOG.iter().filter(|c| c.level == level).collect()
}

/// Criteria that need human (AI) judgment
pub fn manual_criteria() -> Vec<&'static Criterion> {
    CATALOG.iter().filter(|c| c.requires_manual_assessment).collect()
}

/// Criteria fully covered by the automated scanner
pub fn automated_criteria() -> Vec<&'static Criterion> {
    CATALOG.iter().filter(|c| !c.requires_manual_assessment).collect()
}

/// Manual-assessment criteria at any of the requested levels, in catalog order
pub fn criteria_for_levels(levels: &[WcagLevel]) -> Vec<&'static Criterion> {
    CATALOG
        .iter()
        .filter(|c| c.requires_manual_assessment && levels.contains(&c.level))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identifiers_are_unique() {
        let ids: HashSet<_> = CATALOG.iter().map(|c| c.id).collect();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn test_lookup() {
        let c = lookup("2.4.2").expect("2.4.2 is in the catalog");
        assert_eq!(c.title, "Page Titled");
        assert_eq!(c.level, WcagLevel::A);
        assert!(lookup("9.9.9").is_none());
    }

    #[test]
    fn test_manual_and_automated_partition() {
        assert_eq!(
            manual_criteria().len() + automated_criteria().len(),
            CATALOG.len()
        );
        let automated: Vec<_> = automated_criteria().iter().map(|c| c.id).collect();
        assert_eq!(automated, vec!["1.4.3", "3.1.1", "4.1.1"]);
    }

    #[test]
    fn test_criteria_for_levels_skips_automated_and_other_levels() {
        let aa_only = criteria_for_levels(&[WcagLevel::AA]);
        let ids: Vec<_> = aa_only.iter().map(|c| c.id).collect();
        // 1.4.3 is AA but scanner-only
        assert_eq!(ids, vec!["2.4.6", "3.1.2"]);
        assert!(criteria_for_levels(&[WcagLevel::AAA]).is_empty());
    }

    #[test]
    fn test_by_level_keeps_catalog_order() {
        let a = by_level(WcagLevel::A);
        assert_eq!(a.first().map(|c| c.id), Some("1.1.1"));
        assert_eq!(a.last().map(|c| c.id), Some("4.1.2"));
    }

    #[test]
    fn test_level_parse_and_tag() {
        assert_eq!("aa".parse::<WcagLevel>().unwrap(), WcagLevel::AA);
        assert_eq!(" AAA ".parse::<WcagLevel>().unwrap(), WcagLevel::AAA);
        assert!("b".parse::<WcagLevel>().is_err());
        assert_eq!(WcagLevel::AA.scanner_tag(), "wcag2aa");
    }
}
