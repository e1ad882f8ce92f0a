//! Fixed archetype casts per theme, used when no character provider delivers.

use crate::{Appearance, CharacterDraft, CharacterRole, Theme};

struct CharacterTemplate {
    name: &'static str,
    description: &'static str,
    traits: &'static [&'static str],
    age: &'static str,
    physique: &'static str,
    hair: &'static str,
    eyes: &'static str,
    clothing: &'static str,
    role: CharacterRole,
}

impl CharacterTemplate {
    fn to_draft(&self) -> CharacterDraft {
        CharacterDraft {
            name: self.name.to_string(),
            description: self.description.to_string(),
            traits: self.traits.iter().map(|t| t.to_string()).collect(),
            appearance: Appearance {
                age: Some(self.age.to_string()),
                physique: Some(self.physique.to_string()),
                hair: Some(self.hair.to_string()),
                eyes: Some(self.eyes.to_string()),
                clothing: Some(self.clothing.to_string()),
                distinguishing_features: Vec::new(),
            },
            role: self.role,
        }
    }
}

const FANTASY: &[CharacterTemplate] = &[
    CharacterTemplate {
        name: "Aria Thornwood",
        description: "A young ranger who hears the old forest speak",
        traits: &["brave", "curious", "stubborn"],
        age: "early twenties",
        physique: "lean and wiry",
        hair: "auburn, braided",
        eyes: "green",
        clothing: "moss-green cloak and leather bracers",
        role: CharacterRole::Protagonist,
    },
    CharacterTemplate {
        name: "Malgrath the Pale",
        description: "A sorcerer who bargained his shadow for immortality",
        traits: &["cunning", "patient", "ruthless"],
        age: "ageless",
        physique: "tall and gaunt",
        hair: "white, shoulder-length",
        eyes: "colorless",
        clothing: "ash-grey robes stitched with runes",
        role: CharacterRole::Antagonist,
    },
    CharacterTemplate {
        name: "Bram Oakenshield",
        description: "A retired dwarven smith who still keeps a hammer close",
        traits: &["loyal", "gruff", "protective"],
        age: "old",
        physique: "stocky",
        hair: "iron-grey beard",
        eyes: "dark brown",
        clothing: "soot-stained apron over chainmail",
        role: CharacterRole::Supporting,
    },
];

const SCI_FI: &[CharacterTemplate] = &[
    CharacterTemplate {
        name: "Captain Nova Reyes",
        description: "Commander of a salvage ship at the edge of charted space",
        traits: &["decisive", "resourceful", "haunted"],
        age: "late thirties",
        physique: "athletic",
        hair: "black, cropped short",
        eyes: "hazel",
        clothing: "worn flight suit with mission patches",
        role: CharacterRole::Protagonist,
    },
    CharacterTemplate {
        name: "ARGUS",
        description: "A station AI that has quietly rewritten its own directives",
        traits: &["calculating", "polite", "inscrutable"],
        age: "activated forty years ago",
        physique: "holographic silhouette",
        hair: "none",
        eyes: "a single amber lens",
        clothing: "none",
        role: CharacterRole::Antagonist,
    },
    CharacterTemplate {
        name: "Dr. Kai Lindqvist",
        description: "Xenobiologist who trusts data more than people",
        traits: &["brilliant", "anxious", "honest"],
        age: "early thirties",
        physique: "slight",
        hair: "blond, unkempt",
        eyes: "blue",
        clothing: "lab coat over a thermal undersuit",
        role: CharacterRole::Supporting,
    },
];

const MYSTERY: &[CharacterTemplate] = &[
    CharacterTemplate {
        name: "Inspector Elena Marsh",
        description: "A detective who never forgets a face or a lie",
        traits: &["observant", "dry-witted", "relentless"],
        age: "mid forties",
        physique: "average height, restless",
        hair: "dark, pinned back",
        eyes: "grey",
        clothing: "belted trench coat",
        role: CharacterRole::Protagonist,
    },
    CharacterTemplate {
        name: "Julian Ashcombe",
        description: "A charming heir with an alibi for everything",
        traits: &["charming", "evasive", "vain"],
        age: "early thirties",
        physique: "slim and poised",
        hair: "sandy, slicked back",
        eyes: "pale blue",
        clothing: "tailored three-piece suit",
        role: CharacterRole::Antagonist,
    },
];

const ROMANCE: &[CharacterTemplate] = &[
    CharacterTemplate {
        name: "Clara Bennett",
        description: "A bookshop owner who has stopped expecting surprises",
        traits: &["warm", "guarded", "witty"],
        age: "late twenties",
        physique: "petite",
        hair: "chestnut waves",
        eyes: "brown",
        clothing: "oversized cardigan",
        role: CharacterRole::Protagonist,
    },
    CharacterTemplate {
        name: "Theo Alvarez",
        description: "A travelling photographer who never stays anywhere long",
        traits: &["spontaneous", "kind", "restless"],
        age: "early thirties",
        physique: "tall",
        hair: "dark curls",
        eyes: "amber",
        clothing: "denim jacket and a camera strap",
        role: CharacterRole::Supporting,
    },
];

const ADVENTURE: &[CharacterTemplate] = &[
    CharacterTemplate {
        name: "Sam Calloway",
        description: "A cartographer chasing the map her father never finished",
        traits: &["daring", "optimistic", "impulsive"],
        age: "mid twenties",
        physique: "sturdy",
        hair: "sun-bleached ponytail",
        eyes: "green",
        clothing: "canvas field jacket with many pockets",
        role: CharacterRole::Protagonist,
    },
    CharacterTemplate {
        name: "Victor Krane",
        description: "A treasure hunter who funds expeditions and takes everything",
        traits: &["ambitious", "smooth", "merciless"],
        age: "fifties",
        physique: "broad-shouldered",
        hair: "silver, close-cropped",
        eyes: "steel blue",
        clothing: "linen suit and a panama hat",
        role: CharacterRole::Antagonist,
    },
];

const HORROR: &[CharacterTemplate] = &[
    CharacterTemplate {
        name: "Nora Whitlock",
        description: "A night-shift nurse who keeps seeing the same patient",
        traits: &["steady", "skeptical", "sleep-deprived"],
        age: "early thirties",
        physique: "slender",
        hair: "black bob",
        eyes: "dark",
        clothing: "scrubs under a long coat",
        role: CharacterRole::Protagonist,
    },
    CharacterTemplate {
        name: "The Hollow Man",
        description: "Something that wears the faces of the recently dead",
        traits: &["patient", "mimicking", "hungry"],
        age: "unknown",
        physique: "too tall, too thin",
        hair: "none",
        eyes: "reflective, like an animal's",
        clothing: "a borrowed hospital gown",
        role: CharacterRole::Antagonist,
    },
];

impl Theme {
    fn templates(self) -> &'static [CharacterTemplate] {
        match self {
            Theme::Fantasy => FANTASY,
            Theme::SciFi => SCI_FI,
            Theme::Mystery => MYSTERY,
            Theme::Romance => ROMANCE,
            Theme::Adventure => ADVENTURE,
            Theme::Horror => HORROR,
        }
    }

    /// The fixed archetype cast for this theme.
    ///
    /// Deterministic: the same theme always yields the same drafts.
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::Theme;
    ///
    /// let cast = Theme::Mystery.character_templates();
    /// assert!(cast.len() >= 2);
    /// assert_eq!(cast, Theme::Mystery.character_templates());
    /// ```
    pub fn character_templates(self) -> Vec<CharacterDraft> {
        self.templates()
            .iter()
            .map(CharacterTemplate::to_draft)
            .collect()
    }
}
