//! Keyword-to-gift lookup tables.
//!
//! The built-in tables are plain constants; [`Taxonomy`] turns them into an
//! owned value the engine is constructed with, so tests can swap in their own.

use serde::Serialize;

use super::types::AgeCategory;

const INTEREST_GIFTS: &[(&str, &[&str])] = &[
    ("kitap", &["Bestseller kitap seti", "E-kitap okuyucu", "Kitap ayracı koleksiyonu"]),
    ("okumak", &["Özel ciltli klasik eser", "Okuma lambası", "Kitap standı"]),
    ("reading", &["Premium bookmark set", "Reading chair cushion", "Book light"]),
    ("books", &["Limited edition book series", "Bookshelf organizer", "Literary poster set"]),
    ("yemek", &["Profesyonel bıçak seti", "Yemek kitabı koleksiyonu", "Özel baharat seti"]),
    ("cooking", &["Cast iron cookware", "Cooking class subscription", "Gourmet spice collection"]),
    ("aşçılık", &["Mutfak robotu", "Ahşap kesme tahtası seti", "Silikon pişirme kalıpları"]),
    ("bahçe", &["Özel bitki saksıları", "Bahçıvanlık araç seti", "Nadir tohum koleksiyonu"]),
    ("bahçıvanlık", &["Mini sera kiti", "Sulama sistemi", "Organik gübre seti"]),
    ("gardening", &["Premium garden tools", "Rare plant seeds", "Smart watering system"]),
    ("müzik", &["Bluetooth kulaklık", "Vintage plak koleksiyonu", "Müzik kutusu"]),
    ("music", &["Wireless headphones", "Vinyl record collection", "Portable speaker"]),
    ("enstrüman", &["Enstrüman aksesuarları", "Müzik standı", "Metronom"]),
    ("sanat", &["Profesyonel boya kalem seti", "Canvas tuval seti", "Sanat kitapları"]),
    ("art", &["Watercolor paint set", "Sketchbook collection", "Art easel"]),
    ("el işi", &["El işi malzemeleri kutusu", "Örgü şişleri seti", "Tasarım kalıpları"]),
    ("spor", &["Fitness tracker", "Yoga matı", "Protein shaker seti"]),
    ("fitness", &["Resistance bands set", "Foam roller", "Gym towel set"]),
    ("yoga", &["Premium yoga mat", "Meditation cushion", "Yoga block set"]),
    ("seyahat", &["Seyahat çantası seti", "Dünya haritası", "Seyahat günlüğü"]),
    ("travel", &["Travel organizer set", "Scratch-off world map", "Travel pillow"]),
    ("teknoloji", &["Akıllı ev cihazı", "Wireless charger", "Bluetooth speaker"]),
    ("technology", &["Smart home device", "Portable charger", "Tech organizer bag"]),
    ("moda", &["Özel aksesuar seti", "Parfüm koleksiyonu", "Stil danışmanlığı"]),
    ("beauty", &["Skincare gift set", "Makeup organizer", "Beauty tools kit"]),
    ("kahve", &["Özel kahve çekirdekleri", "French press", "Kahve fincan seti"]),
    ("coffee", &["Coffee bean subscription", "Espresso machine", "Coffee grinder"]),
    ("çay", &["Özel çay koleksiyonu", "Cam demlik seti", "Çay kaşığı koleksiyonu"]),
    ("tea", &["Premium tea collection", "Tea infuser set", "Ceramic teapot"]),
];

const HARRY_POTTER_GIFTS: &[&str] =
    &["Harry Potter asa replikası", "Harry Potter özel ciltli kitap seti", "Hogwarts bina atkısı"];
const STAR_WARS_GIFTS: &[&str] =
    &["Star Wars LEGO seti", "Star Wars ışın kılıcı replikası", "Star Wars koleksiyon figürü"];
const MARVEL_GIFTS: &[&str] =
    &["Marvel süper kahraman figür seti", "Marvel çizgi roman koleksiyonu", "Marvel temalı kupa"];
const MIDDLE_EARTH_GIFTS: &[&str] = &[
    "Yüzüklerin Efendisi özel baskı kitap seti",
    "Orta Dünya haritası posteri",
    "Tek Yüzük replikası",
];
const POKEMON_GIFTS: &[&str] =
    &["Pokémon kart koleksiyon kutusu", "Pikachu peluş oyuncak", "Pokémon temalı sırt çantası"];
const WESTEROS_GIFTS: &[&str] = &[
    "Westeros haritası posteri",
    "Demir Taht replika figürü",
    "Game of Thrones hane bayrakları seti",
];
const DISNEY_GIFTS: &[&str] = &[
    "Disney karakter koleksiyon figürü",
    "Disney klasikleri film seti",
    "Disney temalı müzik kutusu",
];
const SHERLOCK_GIFTS: &[&str] = &[
    "Sherlock Holmes bütün hikayeler seti",
    "Dedektif bulmaca kutusu",
    "221B Baker Street posteri",
];

// (keyword, franchise display name, gifts)
const FRANCHISE_GIFTS: &[(&str, &str, &[&str])] = &[
    ("harry potter", "Harry Potter", HARRY_POTTER_GIFTS),
    ("hogwarts", "Harry Potter", HARRY_POTTER_GIFTS),
    ("star wars", "Star Wars", STAR_WARS_GIFTS),
    ("marvel", "Marvel", MARVEL_GIFTS),
    ("yüzüklerin efendisi", "Yüzüklerin Efendisi", MIDDLE_EARTH_GIFTS),
    ("lord of the rings", "Yüzüklerin Efendisi", MIDDLE_EARTH_GIFTS),
    ("pokemon", "Pokémon", POKEMON_GIFTS),
    ("pokémon", "Pokémon", POKEMON_GIFTS),
    ("game of thrones", "Game of Thrones", WESTEROS_GIFTS),
    ("taht oyunları", "Game of Thrones", WESTEROS_GIFTS),
    ("disney", "Disney", DISNEY_GIFTS),
    ("sherlock", "Sherlock Holmes", SHERLOCK_GIFTS),
];

const AGE_CHILD_GIFTS: &[&str] =
    &["Eğitici oyuncak seti", "Çocuk kitap koleksiyonu", "Sanat malzemeleri kutusu"];
const AGE_YOUNG_GIFTS: &[&str] = &["Bluetooth kulaklık", "Trendy aksesuar", "Deneyim hediyesi"];
const AGE_ADULT_GIFTS: &[&str] =
    &["Premium ev tekstili", "Kişisel bakım seti", "Hobiye özel hediye"];
const AGE_SENIOR_GIFTS: &[&str] =
    &["Rahat ev ayakkabısı", "Nostaljik müzik koleksiyonu", "Bahçe bitkileri"];

const GENERIC_GIFTS: &[&str] = &[
    "Özel fotoğraf albümü",
    "Aromaterapi difüzörü",
    "Premium çikolata kutusu",
    "Kişiye özel mücevher",
    "Spa deneyim paketi",
    "Gourmet yemek sepeti",
    "Kişiselleştirilmiş kupa",
    "Dekoratif mum seti",
    "Kaliteli cüzdan",
    "Özel tasarım tişört",
];

/// Browsable gift category with the taxonomy keywords it groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GiftCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

pub const GIFT_CATEGORIES: &[GiftCategory] = &[
    GiftCategory {
        id: "books",
        name: "Kitap & Okuma",
        keywords: &["kitap", "okumak", "reading", "books"],
    },
    GiftCategory {
        id: "cooking",
        name: "Yemek & Mutfak",
        keywords: &["yemek", "cooking", "aşçılık"],
    },
    GiftCategory {
        id: "gardening",
        name: "Bahçıvanlık",
        keywords: &["bahçe", "bahçıvanlık", "gardening"],
    },
    GiftCategory { id: "music", name: "Müzik", keywords: &["müzik", "music", "enstrüman"] },
    GiftCategory { id: "art", name: "Sanat & El İşi", keywords: &["sanat", "art", "el işi"] },
    GiftCategory { id: "sports", name: "Spor & Fitness", keywords: &["spor", "fitness", "yoga"] },
    GiftCategory { id: "travel", name: "Seyahat", keywords: &["seyahat", "travel"] },
    GiftCategory { id: "technology", name: "Teknoloji", keywords: &["teknoloji", "technology"] },
    GiftCategory { id: "fashion", name: "Moda & Güzellik", keywords: &["moda", "beauty"] },
    GiftCategory {
        id: "beverages",
        name: "Kahve & Çay",
        keywords: &["kahve", "coffee", "çay", "tea"],
    },
];

/// A keyword and the gifts it unlocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyEntry {
    pub keyword: String,
    pub gifts: Vec<String>,
}

/// A recognized franchise keyword. Several keywords may share one franchise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FranchiseEntry {
    pub keyword: String,
    pub franchise: String,
    pub gifts: Vec<String>,
}

/// All lookup tables the engine draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub interests: Vec<TaxonomyEntry>,
    pub franchises: Vec<FranchiseEntry>,
    pub age_defaults: AgeDefaults,
    pub generic: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AgeDefaults {
    pub child: Vec<String>,
    pub young: Vec<String>,
    pub adult: Vec<String>,
    pub senior: Vec<String>,
}

impl AgeDefaults {
    pub fn for_category(&self, category: AgeCategory) -> &[String] {
        match category {
            AgeCategory::Child => &self.child,
            AgeCategory::Young => &self.young,
            AgeCategory::Adult => &self.adult,
            AgeCategory::Senior => &self.senior,
        }
    }
}

impl Taxonomy {
    /// The shipped tables.
    pub fn builtin() -> Self {
        Self {
            interests: INTEREST_GIFTS
                .iter()
                .map(|(keyword, gifts)| TaxonomyEntry {
                    keyword: (*keyword).to_string(),
                    gifts: owned(gifts),
                })
                .collect(),
            franchises: FRANCHISE_GIFTS
                .iter()
                .map(|(keyword, franchise, gifts)| FranchiseEntry {
                    keyword: (*keyword).to_string(),
                    franchise: (*franchise).to_string(),
                    gifts: owned(gifts),
                })
                .collect(),
            age_defaults: AgeDefaults {
                child: owned(AGE_CHILD_GIFTS),
                young: owned(AGE_YOUNG_GIFTS),
                adult: owned(AGE_ADULT_GIFTS),
                senior: owned(AGE_SENIOR_GIFTS),
            },
            generic: owned(GENERIC_GIFTS),
        }
    }

    /// Built-in fallback lists with no keyword tables.
    pub fn fallback_only() -> Self {
        Self { interests: Vec::new(), franchises: Vec::new(), ..Self::builtin() }
    }

    pub fn with_interest<I, S>(mut self, keyword: impl Into<String>, gifts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests.push(TaxonomyEntry {
            keyword: keyword.into(),
            gifts: gifts.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn with_franchise<I, S>(
        mut self,
        keyword: impl Into<String>,
        franchise: impl Into<String>,
        gifts: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.franchises.push(FranchiseEntry {
            keyword: keyword.into(),
            franchise: franchise.into(),
            gifts: gifts.into_iter().map(Into::into).collect(),
        });
        self
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}
