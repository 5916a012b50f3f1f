//! Personality trait catalog offered when building a persona.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitGroup {
    pub key: &'static str,
    pub category: &'static str,
    pub traits: &'static [&'static str],
}

pub const TRAIT_GROUPS: &[TraitGroup] = &[
    TraitGroup {
        key: "social",
        category: "Sosyal Özellikler",
        traits: &[
            "Dışa dönük",
            "İçe dönük",
            "Sosyal",
            "Utangaç",
            "Konuşkan",
            "Sessiz",
            "Arkadaş canlısı",
            "Çekingen",
            "Lider ruhlu",
            "Takipçi",
            "Empati kurabilen",
            "Anlayışlı",
            "Yardımsever",
            "Bağımsız",
            "Takım oyuncusu",
            "Diplomatik",
            "Açık sözlü",
            "Nazik",
            "Samimi",
            "Güvenilir",
        ],
    },
    TraitGroup {
        key: "emotional",
        category: "Duygusal Özellikler",
        traits: &[
            "Sakin",
            "Enerjik",
            "Sabırlı",
            "Aceleci",
            "Optimist",
            "Pesimist",
            "Duygusal",
            "Mantıklı",
            "Hassas",
            "Güçlü",
            "Neşeli",
            "Ciddi",
            "Romantik",
            "Pratik",
            "Spontan",
            "Planlı",
            "Rahat",
            "Gergin",
            "Pozitif",
            "Eleştirel",
        ],
    },
    TraitGroup {
        key: "intellectual",
        category: "Zihinsel Özellikler",
        traits: &[
            "Meraklı",
            "Analitik",
            "Yaratıcı",
            "Sezgisel",
            "Detaycı",
            "Büyük resmi gören",
            "Öğrenmeyi seven",
            "Araştırmacı",
            "Yenilikçi",
            "Geleneksel",
            "Deneyci",
            "Eleştirel düşünen",
            "Açık fikirli",
            "Kararlı",
            "Esnek",
            "Odaklı",
            "Dağınık",
            "Organize",
            "Sistematik",
        ],
    },
    TraitGroup {
        key: "lifestyle",
        category: "Yaşam Tarzı",
        traits: &[
            "Aktif",
            "Maceracı",
            "Güvenli oynamayı seven",
            "Seyahat seven",
            "Ev tipi",
            "Spor seven",
            "Kitap kurdu",
            "Teknoloji meraklısı",
            "Doğa seven",
            "Şehir hayatını seven",
            "Kırsal yaşamı tercih eden",
            "Gece kuşu",
            "Sabah insanı",
            "Minimalist",
            "Koleksiyoncu",
            "Tasarruflu",
            "Cömert",
        ],
    },
    TraitGroup {
        key: "professional",
        category: "İş ve Kariyer",
        traits: &[
            "Hırslı",
            "Mütevazı",
            "Çalışkan",
            "Perfeksiyonist",
            "Rekabetçi",
            "İşbirlikçi",
            "Risk alan",
            "Güvenli oynayan",
            "Lider",
            "Destekleyici",
            "Bağımsız çalışan",
            "Takım halinde çalışan",
            "Detay odaklı",
            "Strateji odaklı",
            "Sonuç odaklı",
            "Süreç odaklı",
        ],
    },
    TraitGroup {
        key: "interests",
        category: "Hobiler ve İlgi Alanları",
        traits: &[
            "Sanat seven",
            "Müzik seven",
            "Film/dizi meraklısı",
            "Oyun seven",
            "Spor yapan",
            "Yemek pişirmeyi seven",
            "Bahçıvanlık yapan",
            "El işi yapan",
            "Fotoğraf çeken",
            "Yazı yazan",
            "Blog tutan",
            "Sosyal medya aktif",
            "Teknoloji takipçisi",
            "Moda takipçisi",
            "Antika meraklısı",
            "DIY projeleri yapan",
            "Gönüllü çalışan",
            "Eğitim alan",
            "Öğreten",
        ],
    },
];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraitCatalog {
    pub all: Vec<&'static str>,
    pub by_category: Vec<TraitCategoryView>,
    pub categories: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitCategoryView {
    pub key: &'static str,
    pub category: &'static str,
    pub traits: Vec<&'static str>,
}

/// Every trait across all groups, sorted.
pub fn all_traits() -> Vec<&'static str> {
    let mut traits =
        TRAIT_GROUPS.iter().flat_map(|group| group.traits.iter().copied()).collect::<Vec<_>>();
    traits.sort_unstable();
    traits
}

pub fn trait_catalog() -> TraitCatalog {
    TraitCatalog {
        all: all_traits(),
        by_category: TRAIT_GROUPS
            .iter()
            .map(|group| TraitCategoryView {
                key: group.key,
                category: group.category,
                traits: group.traits.to_vec(),
            })
            .collect(),
        categories: TRAIT_GROUPS.iter().map(|group| group.key).collect(),
    }
}
