//! Source attribution for guideline files.
//!
//! Only validated medical sources get a title and canonical URL; anything
//! else is cited by bare filename so readers can still trace the claim.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::path::Path;

/// Title and canonical URL for the known guideline files.
static SOURCE_ATTRIBUTIONS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            (
                "aap_fever_baby.md",
                (
                    "Fever and Your Baby - AAP",
                    "https://www.healthychildren.org/English/health-issues/conditions/fever/Pages/Fever-and-Your-Baby.aspx",
                ),
            ),
            (
                "aap_fever_without_fear.md",
                (
                    "Fever Without Fear - AAP",
                    "https://www.healthychildren.org/English/health-issues/conditions/fever/Pages/Fever-Without-Fear.aspx",
                ),
            ),
            (
                "aap_symptom_checker.md",
                (
                    "Symptom Checker: Fever - AAP",
                    "https://www.healthychildren.org/English/tips-tools/symptom-checker/Pages/symptomviewer.aspx?symptom=Fever+(0-12+Months)",
                ),
            ),
            (
                "aap_when_to_call.md",
                (
                    "When to Call the Pediatrician - AAP",
                    "https://www.healthychildren.org/English/health-issues/conditions/fever/Pages/When-to-Call-the-Pediatrician.aspx",
                ),
            ),
            (
                "nhs_fever_children.md",
                (
                    "High Temperature in Children - NHS",
                    "https://www.nhs.uk/conditions/fever-in-children/",
                ),
            ),
            (
                "unified_fever_guidelines.md",
                (
                    "Unified Fever Guidelines - AAP",
                    "https://www.healthychildren.org/English/health-issues/conditions/fever/",
                ),
            ),
            (
                "fever_assessment_examples.md",
                (
                    "Fever Assessment Examples - AAP",
                    "https://www.healthychildren.org/English/health-issues/conditions/fever/",
                ),
            ),
        ])
    });

/// A citation rendered into prompts and the sources section of replies.
#[derive(Debug, Clone, PartialEq)]
pub struct Citation {
    pub title: String,
    pub url: Option<String>,
}

impl Citation {
    /// Markdown rendering: `[Title](url)` or the bare title without a link.
    pub fn to_markdown(&self) -> String {
        match &self.url {
            Some(url) => format!("[{}]({})", self.title, url),
            None => self.title.clone(),
        }
    }
}

/// Resolve the citation for a guideline file path.
///
/// Unknown filenames fall back to the bare filename with no URL; never an
/// error, since any loaded file can legitimately be cited.
pub fn citation(path: &Path) -> Citation {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string_lossy().to_string());

    match SOURCE_ATTRIBUTIONS.get(file_name.as_str()) {
        Some((title, url)) => Citation {
            title: (*title).to_string(),
            url: Some((*url).to_string()),
        },
        None => Citation {
            title: file_name,
            url: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_known_file_has_title_and_url() {
        let c = citation(&PathBuf::from("knowledge/nhs_fever_children.md"));
        assert_eq!(c.title, "High Temperature in Children - NHS");
        assert_eq!(
            c.url.as_deref(),
            Some("https://www.nhs.uk/conditions/fever-in-children/")
        );
    }

    #[test]
    fn test_unknown_file_falls_back_to_filename() {
        let c = citation(&PathBuf::from("/some/dir/local_notes.md"));
        assert_eq!(c.title, "local_notes.md");
        assert!(c.url.is_none());
        assert_eq!(c.to_markdown(), "local_notes.md");
    }

    #[test]
    fn test_markdown_rendering_links_known_sources() {
        let c = citation(&PathBuf::from("aap_fever_baby.md"));
        assert!(c.to_markdown().starts_with("[Fever and Your Baby - AAP]("));
    }

    #[test]
    fn test_all_known_sources_resolve() {
        for name in [
            "aap_fever_baby.md",
            "aap_fever_without_fear.md",
            "aap_symptom_checker.md",
            "aap_when_to_call.md",
            "nhs_fever_children.md",
            "unified_fever_guidelines.md",
            "fever_assessment_examples.md",
        ] {
            let c = citation(&PathBuf::from(name));
            assert!(c.url.is_some(), "missing attribution for {name}");
        }
    }
}
