use crate::core::narrative::{QUESTION_HEADING, SYNTHESIS_HEADING};
use crate::domain::model::{Position, Spread};

/// Builds the single user message sent to the remote model.
///
/// Card names, keywords and the question are embedded verbatim; the model is
/// asked to answer with the exact heading skeleton the reconcile step checks.
pub fn build_prompt(spread: &Spread) -> String {
    let mut prompt = String::from(
        "Tu es un tarologue expérimenté. Interprète ce tirage de tarot à 3 cartes.\n\n",
    );

    prompt.push_str(&format!("Question du consultant : {}\n", spread.question));
    for position in Position::ALL {
        let card = spread.card(position);
        prompt.push_str(&format!(
            "{} : {} (mots-clés : {})\n",
            position_label(position),
            card.name,
            card.keywords
        ));
    }

    prompt.push_str(
        "\nFais une analyse détaillée de chaque carte en tenant compte de sa position \
         et de ses mots-clés, puis une synthèse globale qui relie les trois cartes et \
         répond à la question.\n\
         Réponds uniquement en HTML, sans Markdown, en respectant exactement cette structure :\n",
    );

    prompt.push_str(&format!("<h3>{}</h3>\n<p>...</p>\n", QUESTION_HEADING));
    for position in Position::ALL {
        prompt.push_str(&format!("<h3>{}</h3>\n<p>...</p>\n", position.heading()));
    }
    prompt.push_str(&format!("<h3>{}</h3>\n<p>...</p>\n", SYNTHESIS_HEADING));

    prompt
}

fn position_label(position: Position) -> &'static str {
    match position {
        Position::Past => "Passé",
        Position::Present => "Présent",
        Position::Future => "Futur",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Card;

    #[test]
    fn test_prompt_embeds_cards_and_question_verbatim() {
        let spread = Spread::new(
            Card::new("Le Fou", "liberté,spontanéité").unwrap(),
            Card::new("La Roue de Fortune", "changement,cycle").unwrap(),
            Card::new("Le Soleil", "réussite,joie").unwrap(),
            Some("Vais-je déménager <bientôt> ?".to_string()),
        );

        let prompt = build_prompt(&spread);

        assert!(prompt.contains("Passé : Le Fou (mots-clés : liberté,spontanéité)"));
        assert!(prompt.contains("Présent : La Roue de Fortune (mots-clés : changement,cycle)"));
        assert!(prompt.contains("Futur : Le Soleil (mots-clés : réussite,joie)"));
        assert!(prompt.contains("Vais-je déménager <bientôt> ?"));
    }

    #[test]
    fn test_prompt_lists_skeleton_in_order() {
        let spread = Spread::new(
            Card::new("Le Fou", "").unwrap(),
            Card::new("Le Mat", "").unwrap(),
            Card::new("Le Monde", "").unwrap(),
            None,
        );
        let prompt = build_prompt(&spread);

        let positions: Vec<usize> = [
            "<h3>Votre question</h3>",
            "<h3>Le Passé</h3>",
            "<h3>Le Présent</h3>",
            "<h3>Le Futur</h3>",
            "<h3>Synthèse</h3>",
        ]
        .iter()
        .map(|h| prompt.find(h).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(prompt.contains("general guidance"));
    }
}
