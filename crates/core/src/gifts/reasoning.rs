//! Human-readable reasons and confidence values for chosen gifts.
//!
//! [`explain`] walks a fixed rule list and returns the first sentence that
//! applies; later rules only fire when nothing more specific matched.

use rand::seq::SliceRandom;
use rand::Rng;

use super::matcher::{normalize, RecognizedFranchise};
use super::types::{AgeCategory, AgeProfile, Candidate, CandidateSource};
use super::{CONFIDENCE_RANGE, FRANCHISE_CONFIDENCE_RANGE};
use crate::persona::{non_blank, PersonaProfile};

// (trait fragment, title terms)
const TRAIT_HINTS: &[(&str, &[&str])] = &[
    ("kitap", &["kitap", "okuma", "book", "reading"]),
    ("spor", &["spor", "fitness", "yoga", "koşu", "gym", "sport"]),
    ("teknoloji", &["akıllı", "smart", "wireless", "bluetooth", "charger", "e-kitap"]),
    ("müzik", &["müzik", "music", "plak", "vinyl", "kulaklık", "headphone", "speaker"]),
    ("sanat", &["sanat", "boya", "tuval", "canvas", "art", "sketch", "paint"]),
    ("seyahat", &["seyahat", "travel", "harita", "map", "valiz"]),
    ("doğa", &["bahçe", "bitki", "tohum", "garden", "plant", "sera"]),
    ("yemek", &["yemek", "mutfak", "baharat", "bıçak", "cook", "gourmet"]),
    ("fotoğraf", &["fotoğraf", "albüm", "kamera", "photo", "camera"]),
    ("romantik", &["çiçek", "mücevher", "parfüm", "mum", "çikolata"]),
    ("sakin", &["meditasyon", "meditation", "aromaterapi", "spa", "çay", "tea"]),
    ("koleksiyon", &["koleksiyon", "collection", "replika", "figür", "limited"]),
    ("maceracı", &["deneyim", "macera", "kamp", "outdoor", "seyahat"]),
    ("minimalist", &["minimal", "organizer", "düzenleyici", "sade"]),
];

struct Theme {
    triggers: &'static [&'static str],
    gift_terms: &'static [&'static str],
    sentence: &'static str,
}

const THEMES: &[Theme] = &[
    Theme {
        triggers: &["yoga", "meditasyon", "meditation", "wellness", "sağlıklı yaşam"],
        gift_terms: &["yoga", "meditasyon", "meditation", "aromaterapi", "spa", "mat"],
        sentence: "{name} için huzur ve denge arayışına eşlik edecek bir seçim",
    },
    Theme {
        triggers: &["müzik", "music", "konser", "şarkı", "enstrüman"],
        gift_terms: &[
            "müzik", "music", "plak", "vinyl", "kulaklık", "headphone", "speaker", "metronom",
        ],
        sentence: "Müzikle geçen anlarını zenginleştirecek, {name} için düşünülmüş bir hediye",
    },
    Theme {
        triggers: &["bahçe", "bitki", "garden", "çiçek"],
        gift_terms: &["bahçe", "bitki", "tohum", "garden", "plant", "saksı", "sera", "sulama"],
        sentence: "Bahçesiyle ilgilenmeyi seven {name} için keyifli bir seçim",
    },
    Theme {
        triggers: &["kitap", "okuma", "book", "reading", "roman"],
        gift_terms: &["kitap", "book", "okuma", "reading", "ayraç", "bookmark"],
        sentence: "Okumaya vakit ayıran {name} için sayfalar arasında eşlik edecek bir hediye",
    },
    Theme {
        triggers: &["kahve", "coffee", "espresso"],
        gift_terms: &["kahve", "coffee", "espresso", "french press"],
        sentence: "Kahve molalarını özel kılacak, {name} için seçilmiş bir hediye",
    },
];

const DEFAULT_TEMPLATES: &[&str] = &[
    "{name} için ilgi alanlarına uygun seçim",
    "{name} için kişisel notlarına dayanarak önerilen hediye",
    "{name} için zevklerine göre seçilmiş özel hediye",
    "İlgi alanları göz önünde bulundurularak {name} için önerilen",
    "{name} için kişisel özelliklerine uygun düşünülmüş hediye",
];

const MIN_ROLE_WORD: usize = 3;
const MIN_GOAL_WORD: usize = 5;

/// Everything the reasoning rules look at besides the candidate itself.
#[derive(Debug, Clone, Copy)]
pub struct ReasonContext<'a> {
    pub persona: &'a PersonaProfile,
    /// Name, role or the generic placeholder
    pub subject: &'a str,
    pub age: AgeProfile,
    pub franchises: &'a [RecognizedFranchise],
}

pub fn explain<R>(candidate: &Candidate, context: &ReasonContext<'_>, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let title = normalize(&candidate.title);
    let name = context.subject;

    if let Some(franchise) = franchise_of(candidate, context.franchises) {
        return format!("{franchise} hayranı {name} için koleksiyonuna değer katacak bir hediye");
    }

    if candidate.source == CandidateSource::AgeDefault {
        return age_sentence(context.age.category, name);
    }

    if let Some(sentence) = trait_sentence(&title, context) {
        return sentence;
    }

    if let Some(role) = non_blank(context.persona.role.as_deref()) {
        let role_hit = normalize(role)
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_ROLE_WORD)
            .any(|word| title.contains(word));
        if role_hit {
            return format!("{} olarak {name} için işine yarayacak bir seçim", role.trim());
        }
    }

    if let Some(goals) = non_blank(context.persona.goals.as_deref()) {
        let goals = normalize(goals);
        let keyword_hit = candidate.keyword().is_some_and(|keyword| goals.contains(keyword));
        let word_hit = title
            .split_whitespace()
            .filter(|word| word.chars().count() >= MIN_GOAL_WORD)
            .any(|word| goals.contains(word));
        if keyword_hit || word_hit {
            return format!("{name} için hedeflerine ulaşmasında destek olacak bir hediye");
        }
    }

    if let Some(interest) = interest_of(candidate, &title, context.persona) {
        return format!("{interest} ilgisine uygun özel seçim");
    }

    if let Some(sentence) = theme_sentence(&title, context) {
        return sentence;
    }
    if let CandidateSource::FreeText { keyword, .. } = &candidate.source {
        return format!(
            "Notlarında bahsettiği {keyword} ilgisinden yola çıkılarak {name} için seçildi"
        );
    }

    let template = DEFAULT_TEMPLATES.choose(rng).copied().unwrap_or(DEFAULT_TEMPLATES[0]);
    template.replace("{name}", name)
}

/// Reason used for completion-sourced titles that came without one.
pub fn default_ai_reason(subject: &str) -> String {
    format!("{subject} için kişisel zevklerine göre seçilmiş özel hediye")
}

/// Franchise titles draw from the high band, everything else from the base band.
pub fn confidence<R>(candidate: &Candidate, franchises: &[RecognizedFranchise], rng: &mut R) -> u8
where
    R: Rng + ?Sized,
{
    if franchise_of(candidate, franchises).is_some() {
        rng.gen_range(FRANCHISE_CONFIDENCE_RANGE)
    } else {
        rng.gen_range(CONFIDENCE_RANGE)
    }
}

pub(crate) fn franchise_of<'a>(
    candidate: &'a Candidate,
    franchises: &'a [RecognizedFranchise],
) -> Option<&'a str> {
    if let CandidateSource::Franchise { franchise, .. } = &candidate.source {
        return Some(franchise);
    }
    let title = normalize(&candidate.title);
    franchises
        .iter()
        .find(|known| {
            title.contains(&known.keyword) || title.contains(&normalize(&known.franchise))
        })
        .map(|known| known.franchise.as_str())
}

fn age_sentence(category: AgeCategory, name: &str) -> String {
    match category {
        AgeCategory::Child => {
            format!("{name} için yaşına uygun, hem eğlenceli hem öğretici bir seçim")
        }
        AgeCategory::Young => format!("{name} gibi genç ve dinamik biri için popüler bir seçim"),
        AgeCategory::Adult => format!("{name} için günlük hayatına kalite katacak bir seçim"),
        AgeCategory::Senior => format!("{name} için konforu ve keyfi ön plana çıkaran bir seçim"),
    }
}

fn trait_sentence(title: &str, context: &ReasonContext<'_>) -> Option<String> {
    for raw_trait in &context.persona.personality_traits {
        let normalized = normalize(raw_trait);
        if normalized.is_empty() {
            continue;
        }
        let hit = TRAIT_HINTS
            .iter()
            .filter(|(fragment, _)| normalized.contains(fragment))
            .any(|(_, terms)| terms.iter().any(|term| title.contains(term)));
        if hit {
            let (label, subject) = (raw_trait.trim(), context.subject);
            return Some(format!("{label} kişiliğiyle {subject} için uyumlu bir hediye"));
        }
    }
    None
}

fn interest_of<'a>(
    candidate: &'a Candidate,
    title: &str,
    persona: &'a PersonaProfile,
) -> Option<&'a str> {
    if let CandidateSource::Interest { interest, .. } = &candidate.source {
        return Some(interest);
    }
    let first_word = title.split_whitespace().next()?;
    persona.interests.iter().map(|interest| interest.trim()).find(|interest| {
        let normalized = normalize(interest);
        !normalized.is_empty() && (title.contains(&normalized) || normalized.contains(first_word))
    })
}

fn theme_sentence(title: &str, context: &ReasonContext<'_>) -> Option<String> {
    let persona = context.persona;
    let text = [persona.notes.as_deref(), persona.description.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .map(normalize)
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return None;
    }
    THEMES
        .iter()
        .find(|theme| {
            theme.triggers.iter().any(|trigger| text.contains(trigger))
                && theme.gift_terms.iter().any(|term| title.contains(term))
        })
        .map(|theme| theme.sentence.replace("{name}", context.subject))
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{confidence, explain, ReasonContext};
    use crate::gifts::matcher::RecognizedFranchise;
    use crate::gifts::types::{AgeCategory, AgeProfile, Candidate, CandidateSource, MatchKind};
    use crate::persona::PersonaProfile;

    fn context<'a>(
        persona: &'a PersonaProfile,
        franchises: &'a [RecognizedFranchise],
    ) -> ReasonContext<'a> {
        ReasonContext {
            persona,
            subject: persona.display_name(),
            age: AgeProfile { age: Some(40), category: AgeCategory::Adult },
            franchises,
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    fn known(franchise: &str, keyword: &str) -> RecognizedFranchise {
        RecognizedFranchise { franchise: franchise.into(), keyword: keyword.into() }
    }

    fn from_interest(title: &str, interest: &str) -> Candidate {
        let source = CandidateSource::Interest {
            interest: interest.into(),
            keyword: interest.into(),
            kind: MatchKind::Exact,
        };
        Candidate::new(title, source)
    }

    #[test]
    fn franchise_rule_wins_over_everything() {
        let persona = PersonaProfile::new("Kerem").with_traits(["Koleksiyoncu"]);
        let franchises = vec![known("Star Wars", "star wars")];
        let candidate = Candidate::new("Star Wars koleksiyon figürü", CandidateSource::Ai);

        let reason = explain(&candidate, &context(&persona, &franchises), &mut rng());
        assert!(reason.contains("Star Wars"));
        assert!(reason.contains("Kerem"));
    }

    #[test]
    fn age_default_uses_age_phrasing() {
        let persona = PersonaProfile::new("Nur");
        let mut ctx = context(&persona, &[]);
        ctx.age = AgeProfile { age: Some(70), category: AgeCategory::Senior };

        let candidate = Candidate::new("Rahat ev ayakkabısı", CandidateSource::AgeDefault);
        assert_eq!(
            explain(&candidate, &ctx, &mut rng()),
            "Nur için konforu ve keyfi ön plana çıkaran bir seçim"
        );
    }

    #[test]
    fn trait_then_role_then_goals() {
        let persona = PersonaProfile::new("Deniz").with_traits(["Müziksever"]);
        let candidate = Candidate::new("Bluetooth kulaklık", CandidateSource::Generic);
        let reason = explain(&candidate, &context(&persona, &[]), &mut rng());
        assert_eq!(reason, "Müziksever kişiliğiyle Deniz için uyumlu bir hediye");

        let persona = PersonaProfile::new("Deniz").with_role("Grafik tasarım uzmanı");
        let candidate = Candidate::new("Özel tasarım tişört", CandidateSource::Generic);
        let reason = explain(&candidate, &context(&persona, &[]), &mut rng());
        assert!(reason.starts_with("Grafik tasarım uzmanı olarak Deniz"));

        let persona = PersonaProfile::new("Deniz")
            .with_goals("Bu yıl maraton koşmak ve fitness rutinini oturtmak");
        let candidate = from_interest("Foam roller", "fitness");
        let reason = explain(&candidate, &context(&persona, &[]), &mut rng());
        assert_eq!(reason, "Deniz için hedeflerine ulaşmasında destek olacak bir hediye");
    }

    #[test]
    fn interest_source_names_the_interest() {
        let persona = PersonaProfile::new("Alice").with_interests(["yoga"]);
        let candidate = from_interest("Meditation cushion", "yoga");
        let reason = explain(&candidate, &context(&persona, &[]), &mut rng());
        assert_eq!(reason, "yoga ilgisine uygun özel seçim");
    }

    #[test]
    fn notes_theme_and_free_text_fallback() {
        let persona =
            PersonaProfile::new("Ece").with_notes("Her sabah kahve içmeden güne başlamaz");
        let themed = Candidate::new(
            "French press",
            CandidateSource::FreeText { keyword: "kahve".into(), kind: MatchKind::Substring },
        );
        let reason = explain(&themed, &context(&persona, &[]), &mut rng());
        assert_eq!(reason, "Kahve molalarını özel kılacak, Ece için seçilmiş bir hediye");

        let persona = PersonaProfile::new("Ece").with_notes("Hafta sonları moda dergileri okur");
        let untouched = Candidate::new(
            "Stil danışmanlığı",
            CandidateSource::FreeText { keyword: "moda".into(), kind: MatchKind::Substring },
        );
        let reason = explain(&untouched, &context(&persona, &[]), &mut rng());
        assert!(reason.starts_with("Notlarında bahsettiği moda"));
    }

    #[test]
    fn default_template_names_the_subject_and_is_seeded() {
        let persona = PersonaProfile::new("Zeynep");
        let candidate = Candidate::new("Kaliteli cüzdan", CandidateSource::Generic);
        let first = explain(&candidate, &context(&persona, &[]), &mut rng());
        let second = explain(&candidate, &context(&persona, &[]), &mut rng());
        assert_eq!(first, second);
        assert!(first.contains("Zeynep"));
    }

    #[test]
    fn confidence_bands() {
        let franchises = vec![known("Harry Potter", "harry potter")];
        let source = CandidateSource::Franchise {
            franchise: "Harry Potter".into(),
            keyword: "hogwarts".into(),
        };
        let franchise = Candidate::new("Hogwarts bina atkısı", source);
        let plain = Candidate::new("Kaliteli cüzdan", CandidateSource::Generic);
        let mut rng = rng();

        for _ in 0..200 {
            assert!((90..=100).contains(&confidence(&franchise, &franchises, &mut rng)));
            assert!((70..=100).contains(&confidence(&plain, &franchises, &mut rng)));
        }
    }
}
