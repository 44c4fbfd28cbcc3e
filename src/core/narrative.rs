//! Deterministic, offline interpretation of a spread.
//!
//! This is the fallback of last resort: it has no I/O and cannot fail, and
//! its output always carries the Past, Present, Future and Synthesis
//! sections.

use crate::domain::model::{Card, Position, Spread};

pub const QUESTION_HEADING: &str = "Votre question";
pub const SYNTHESIS_HEADING: &str = "Synthèse";

/// Renders the full interpretation for `spread`.
///
/// Card names, keywords and the question are copied verbatim except for
/// `&`, `<`, `>` and `"`, which appear as entities (see [`escape_html`]).
/// A keyword list such as `feu & eau` is therefore rendered `feu &amp; eau`.
pub fn generate(spread: &Spread) -> String {
    let mut html = question_section(spread);
    for position in Position::ALL {
        html.push_str(&card_section(position, spread.card(position)));
    }
    html.push_str(&synthesis_section(spread));
    html
}

/// Renders only the closing synthesis block.
pub fn synthesis_section(spread: &Spread) -> String {
    let past = escape_html(&spread.past.name);
    let present = escape_html(&spread.present.name);
    let future = escape_html(&spread.future.name);

    format!(
        "<h3>{heading}</h3>\n<p>Le tirage trace un chemin de <strong>{past}</strong> \
         à <strong>{present}</strong>, puis vers <strong>{future}</strong>. \
         Les influences du passé ({past_kw}) ont ouvert la voie à un présent placé \
         sous le signe de {present_kw}, qui prépare un avenir tourné vers {future_kw}. \
         Concernant « {question} », les cartes vous invitent à reconnaître ce que \
         {past} vous a appris, à agir avec lucidité sous l'influence de {present} \
         et à accueillir ce que {future} annonce.</p>\n",
        heading = SYNTHESIS_HEADING,
        past_kw = keywords_or_name(&spread.past),
        present_kw = keywords_or_name(&spread.present),
        future_kw = keywords_or_name(&spread.future),
        question = escape_html(&spread.question),
    )
}

fn question_section(spread: &Spread) -> String {
    format!(
        "<h3>{}</h3>\n<p>{}</p>\n",
        QUESTION_HEADING,
        escape_html(&spread.question)
    )
}

fn card_section(position: Position, card: &Card) -> String {
    let name = escape_html(&card.name);
    let themes = themes(card);

    let body = match position {
        Position::Past => format!(
            "<strong>{name}</strong> occupe la position du passé. À travers {themes}, \
             cette carte décrit les fondations de votre situation : les expériences \
             et les choix qui ont préparé le terrain."
        ),
        Position::Present => format!(
            "<strong>{name}</strong> représente le moment présent. À travers {themes}, \
             elle montre les énergies à l'œuvre aujourd'hui et ce qui mérite votre \
             attention."
        ),
        Position::Future => format!(
            "<strong>{name}</strong> indique la direction à venir. À travers {themes}, \
             elle esquisse l'issue probable si vous poursuivez sur la voie actuelle."
        ),
    };

    format!("<h3>{}</h3>\n<p>{}</p>\n", position.heading(), body)
}

fn themes(card: &Card) -> String {
    if card.keywords.trim().is_empty() {
        "son symbolisme".to_string()
    } else {
        format!("ses thèmes ({})", escape_html(&card.keywords))
    }
}

fn keywords_or_name(card: &Card) -> String {
    if card.keywords.trim().is_empty() {
        escape_html(&card.name)
    } else {
        escape_html(&card.keywords)
    }
}

/// Escapes the characters that would change the structure of the fragment.
///
/// Text without `& < > "` passes through byte for byte.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
