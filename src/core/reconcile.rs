use crate::core::narrative;
use crate::domain::model::{InterpretationResult, Source, Spread};
use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h3\b[^>]*>(.*?)</h3\s*>").expect("heading pattern is valid")
});

static INNER_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// One of the required sections of an interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Past,
    Present,
    Future,
    Synthesis,
}

impl Section {
    /// Reads a heading title as a section when its leading word names one.
    ///
    /// Case, accents, inner tags and a leading article are ignored: `LE PASSÉ`
    /// and `<em>Présent</em>` match, `Ce qui se passe` matches nothing and
    /// `Synthèse : du passé vers le futur` is Synthesis only.
    pub fn classify(title: &str) -> Option<Self> {
        let text = INNER_TAG.replace_all(title, " ");
        let folded: String = text
            .chars()
            .flat_map(char::to_lowercase)
            .map(fold_accent)
            .collect();

        let mut words = folded
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty());
        let mut word = words.next()?;
        if matches!(word, "le" | "la" | "l") {
            word = words.next()?;
        }

        match word {
            "passe" => Some(Self::Past),
            "present" => Some(Self::Present),
            "futur" => Some(Self::Future),
            "synthese" => Some(Self::Synthesis),
            _ => None,
        }
    }
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// Which of the required sections a fragment carries, read from its `<h3>` headings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionPresence {
    pub past: bool,
    pub present: bool,
    pub future: bool,
    pub synthesis: bool,
}

impl SectionPresence {
    /// Each heading counts for at most one section.
    pub fn detect(html: &str) -> Self {
        let mut presence = Self::default();

        for caps in HEADING.captures_iter(html) {
            match Section::classify(&caps[1]) {
                Some(Section::Past) => presence.past = true,
                Some(Section::Present) => presence.present = true,
                Some(Section::Future) => presence.future = true,
                Some(Section::Synthesis) => presence.synthesis = true,
                None => {}
            }
        }

        presence
    }

    /// Past, Present and Future are all there.
    pub fn details_complete(&self) -> bool {
        self.past && self.present && self.future
    }

    pub fn is_complete(&self) -> bool {
        self.details_complete() && self.synthesis
    }

    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.past, "past"),
            (self.present, "present"),
            (self.future, "future"),
            (self.synthesis, "synthesis"),
        ]
        .into_iter()
        .filter(|(found, _)| !found)
        .map(|(_, name)| name)
        .collect()
    }
}

/// Accepts, patches or replaces remote text so the result always has every section.
///
/// Only a missing synthesis is repaired in place; a missing detail section
/// discards the remote text in favour of the local narrative.
pub fn reconcile(raw: &str, spread: &Spread) -> InterpretationResult {
    let presence = SectionPresence::detect(raw);

    if presence.is_complete() {
        return InterpretationResult {
            html: raw.to_string(),
            source: Source::Remote,
        };
    }

    if presence.details_complete() {
        tracing::info!("Remote interpretation has no synthesis, appending a local one");
        let mut html = raw.to_string();
        if !html.is_empty() && !html.ends_with('\n') {
            html.push('\n');
        }
        html.push_str(&narrative::synthesis_section(spread));
        return InterpretationResult {
            html,
            source: Source::Remote,
        };
    }

    tracing::warn!(
        missing = ?presence.missing(),
        "Remote interpretation is incomplete, using local narrative"
    );
    InterpretationResult {
        html: narrative::generate(spread),
        source: Source::Local,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Card;

    fn spread() -> Spread {
        Spread::new(
            Card::new("Le Fou", "liberté,spontanéité").unwrap(),
            Card::new("La Roue de Fortune", "changement,cycle").unwrap(),
            Card::new("Le Soleil", "réussite,joie").unwrap(),
            Some("Mon avenir professionnel".to_string()),
        )
    }

    const COMPLETE: &str = "<h3>Votre question</h3><p>q</p>\
        <h3>Le Passé</h3><p>a</p>\
        <h3>Le Présent</h3><p>b</p>\
        <h3>Le Futur</h3><p>c</p>\
        <h3>Synthèse</h3><p>d</p>";

    #[test]
    fn test_detect_tolerates_attributes_case_and_spacing() {
        let html = "<H3 class=\"t\"> LE PASSÉ </H3><h3>\n<em>Présent</em></h3 >\
                    <h3>Futur</h3><h3>synthese</h3>";
        let presence = SectionPresence::detect(html);
        assert!(presence.is_complete(), "{:?}", presence);
    }

    #[test]
    fn test_classify_reads_the_leading_word_only() {
        assert_eq!(Section::classify("Le Passé"), Some(Section::Past));
        assert_eq!(Section::classify("l'<b>Présent</b>"), Some(Section::Present));
        assert_eq!(Section::classify("  Le Futur proche"), Some(Section::Future));
        assert_eq!(
            Section::classify("Synthèse : du passé vers le futur"),
            Some(Section::Synthesis)
        );
        assert_eq!(Section::classify("Ce qui se passe"), None);
        assert_eq!(Section::classify("Ce que représente la carte"), None);
        assert_eq!(Section::classify("Dépasser ses peurs"), None);
        assert_eq!(Section::classify("Votre question"), None);
        assert_eq!(Section::classify(""), None);
    }

    #[test]
    fn test_each_heading_counts_for_one_section() {
        let presence = SectionPresence::detect(
            "<h3>Synthèse : du passé vers le futur</h3>\
             <h3>Ce qui se passe</h3><h3>Ce que représente la carte</h3>",
        );
        assert_eq!(
            presence,
            SectionPresence {
                synthesis: true,
                ..SectionPresence::default()
            }
        );
    }

    #[test]
    fn test_synthesis_mentioning_other_sections_does_not_hide_missing_future() {
        let spread = spread();
        let raw = "<h3>Le Passé</h3><p>a</p>\
                   <h3>Le Présent</h3><p>b</p>\
                   <h3>Synthèse : du passé vers le futur</h3><p>d</p>";

        let result = reconcile(raw, &spread);

        assert_eq!(result.source, Source::Local);
        assert_eq!(result.html, narrative::generate(&spread));
    }

    #[test]
    fn test_markers_outside_headings_do_not_count() {
        let presence = SectionPresence::detect("<p>Le Passé, le Présent, le Futur et la Synthèse</p>");
        assert_eq!(presence, SectionPresence::default());
        assert_eq!(presence.missing(), vec!["past", "present", "future", "synthesis"]);
    }

    #[test]
    fn test_complete_text_is_accepted_unchanged() {
        let result = reconcile(COMPLETE, &spread());
        assert_eq!(result.html, COMPLETE);
        assert_eq!(result.source, Source::Remote);

        let again = reconcile(&result.html, &spread());
        assert_eq!(again, result);
    }

    #[test]
    fn test_missing_synthesis_is_appended() {
        let raw = "<h3>Le Passé</h3><p>a</p><h3>Le Présent</h3><p>b</p><h3>Le Futur</h3><p>c</p>";
        let result = reconcile(raw, &spread());

        assert_eq!(result.source, Source::Remote);
        assert!(result.html.starts_with(raw));
        assert!(result.html.contains("<h3>Synthèse</h3>"));
        assert!(SectionPresence::detect(&result.html).is_complete());
    }

    #[test]
    fn test_missing_detail_section_falls_back_to_local() {
        let spread = spread();
        let raw_without = [
            "<h3>Le Présent</h3><p>b</p><h3>Le Futur</h3><p>c</p><h3>Synthèse</h3><p>d</p>",
            "<h3>Le Passé</h3><p>a</p><h3>Le Futur</h3><p>c</p><h3>Synthèse</h3><p>d</p>",
            "<h3>Le Passé</h3><p>a</p><h3>Le Présent</h3><p>b</p>",
            "",
        ];

        for raw in raw_without {
            let result = reconcile(raw, &spread);
            assert_eq!(result.source, Source::Local);
            assert_eq!(result.html, narrative::generate(&spread));
        }
    }
}
