//! Completion prompt for the generative suggestion path.

use std::fmt::Write as _;

use super::engine::RecommendationContext;
use crate::persona::non_blank;

const MAX_PROMPT_EVENTS: usize = 5;

/// Renders every populated persona field and asks for exactly `target_count`
/// items in `N. Title - Reason` form.
pub fn build_prompt(context: &RecommendationContext<'_>, target_count: usize) -> String {
    let persona = context.persona;
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Sen kişiye özel hediye önerileri hazırlayan bir asistansın.");
    let _ = writeln!(
        prompt,
        "Aşağıdaki kişi için tam olarak {target_count} hediye önerisi hazırla."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "Kişi bilgileri:");
    let _ = writeln!(prompt, "- İsim: {}", context.subject);
    match context.age.age {
        Some(age) => {
            let _ = writeln!(prompt, "- Yaş: {age} ({})", context.age.category.as_str());
        }
        None => {
            let _ = writeln!(prompt, "- Yaş grubu: {}", context.age.category.as_str());
        }
    }
    if let Some(role) = non_blank(persona.role.as_deref()) {
        let _ = writeln!(prompt, "- Rol: {}", role.trim());
    }
    if !persona.personality_traits.is_empty() {
        let traits = persona.personality_traits.join(", ");
        let _ = writeln!(prompt, "- Kişilik özellikleri: {traits}");
    }
    if !persona.interests.is_empty() {
        let interests = persona
            .interests
            .iter()
            .map(|interest| match franchise_for_interest(context, interest) {
                Some(franchise) => format!("{interest} (popüler kültür: {franchise})"),
                None => interest.clone(),
            })
            .collect::<Vec<_>>();
        let _ = writeln!(prompt, "- İlgi alanları: {}", interests.join(", "));
    }

    let free_text = [
        ("Hedefler", persona.goals.as_deref()),
        ("Zorluklar", persona.challenges.as_deref()),
        ("Açıklama", persona.description.as_deref()),
        ("Notlar", persona.notes.as_deref()),
        ("Davranışsal içgörüler", persona.behavioral_insights.as_deref()),
    ];
    for (label, value) in free_text {
        if let Some(value) = non_blank(value) {
            let _ = writeln!(prompt, "- {label}: {}", value.trim());
        }
    }

    if let Some(budget) = budget_line(persona.budget_min, persona.budget_max) {
        let _ = writeln!(prompt, "- Bütçe: {budget}");
    }

    let events = persona.recent_events(MAX_PROMPT_EVENTS);
    if !events.is_empty() {
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Son olaylar:");
        for event in events {
            let mut line = String::from("- ");
            if let Some(at) = event.occurred_at {
                let _ = write!(line, "{}: ", at.date_naive());
            }
            line.push_str(event.title.trim());
            if let Some(kind) = non_blank(event.event_type.as_deref()) {
                let _ = write!(line, " ({})", kind.trim());
            }
            if let Some(description) = non_blank(event.description.as_deref()) {
                let _ = write!(line, " - {}", description.trim());
            }
            let _ = writeln!(prompt, "{line}");
        }
    }

    if !context.franchises.is_empty() {
        let names =
            context.franchises.iter().map(|known| known.franchise.as_str()).collect::<Vec<_>>();
        let _ = writeln!(prompt);
        let _ = writeln!(
            prompt,
            "Önemli: Kişi şu popüler kültür serilerinin hayranı: {}. \
             Önerilerin en az biri doğrudan bu serilerle ilgili olsun.",
            names.join(", ")
        );
    }

    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Yanıtı yalnızca aşağıdaki biçimde, her satıra bir öneri gelecek şekilde ver:"
    );
    for ordinal in 1..=target_count {
        let _ = writeln!(prompt, "{ordinal}. Hediye adı - Kısa gerekçe");
    }
    prompt
}

fn franchise_for_interest<'a>(
    context: &'a RecommendationContext<'_>,
    interest: &str,
) -> Option<&'a str> {
    let interest = super::matcher::normalize(interest);
    if interest.is_empty() {
        return None;
    }
    context
        .franchises
        .iter()
        .find(|known| interest.contains(&known.keyword) || known.keyword.contains(&interest))
        .map(|known| known.franchise.as_str())
}

fn budget_line(min: Option<f64>, max: Option<f64>) -> Option<String> {
    match (min, max) {
        (Some(min), Some(max)) => Some(format!("{} - {} TL", amount(min), amount(max))),
        (Some(min), None) => Some(format!("en az {} TL", amount(min))),
        (None, Some(max)) => Some(format!("en fazla {} TL", amount(max))),
        (None, None) => None,
    }
}

fn amount(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}
