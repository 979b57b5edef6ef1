//! Milestone catalog partitioned into age buckets.
//!
//! The catalog is immutable process-wide data. Each bucket holds four
//! category lists (physical, cognitive, social, communication). Ages beyond
//! 36 months fall into the last bucket because no later bucket exists.

use serde::{Deserialize, Serialize};
use shared::{MilestoneCategory, MilestoneItem};
use std::fmt;

/// Contiguous age-in-months range used to select a milestone list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "0-3")]
    ZeroToThree,
    #[serde(rename = "4-6")]
    FourToSix,
    #[serde(rename = "7-9")]
    SevenToNine,
    #[serde(rename = "10-12")]
    TenToTwelve,
    #[serde(rename = "13-18")]
    ThirteenToEighteen,
    #[serde(rename = "19-24")]
    NineteenToTwentyFour,
    #[serde(rename = "24-36")]
    TwentyFourToThirtySix,
}

impl AgeBucket {
    /// Buckets in ascending age order
    pub const ALL: [AgeBucket; 7] = [
        AgeBucket::ZeroToThree,
        AgeBucket::FourToSix,
        AgeBucket::SevenToNine,
        AgeBucket::TenToTwelve,
        AgeBucket::ThirteenToEighteen,
        AgeBucket::NineteenToTwentyFour,
        AgeBucket::TwentyFourToThirtySix,
    ];

    /// Map an age in months to its bucket. Total over all ages.
    pub fn for_age(age_in_months: u32) -> AgeBucket {
        match age_in_months {
            0..=3 => AgeBucket::ZeroToThree,
            4..=6 => AgeBucket::FourToSix,
            7..=9 => AgeBucket::SevenToNine,
            10..=12 => AgeBucket::TenToTwelve,
            13..=18 => AgeBucket::ThirteenToEighteen,
            19..=24 => AgeBucket::NineteenToTwentyFour,
            _ => AgeBucket::TwentyFourToThirtySix,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            AgeBucket::ZeroToThree => "0-3",
            AgeBucket::FourToSix => "4-6",
            AgeBucket::SevenToNine => "7-9",
            AgeBucket::TenToTwelve => "10-12",
            AgeBucket::ThirteenToEighteen => "13-18",
            AgeBucket::NineteenToTwentyFour => "19-24",
            AgeBucket::TwentyFourToThirtySix => "24-36",
        }
    }

    pub fn from_key(key: &str) -> Option<AgeBucket> {
        AgeBucket::ALL.into_iter().find(|bucket| bucket.key() == key)
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Milestones expected within one age bucket
#[derive(Debug, PartialEq, Eq)]
pub struct MilestoneCatalogEntry {
    pub bucket: AgeBucket,
    pub label: &'static str,
    pub physical: &'static [&'static str],
    pub cognitive: &'static [&'static str],
    pub social: &'static [&'static str],
    pub communication: &'static [&'static str],
}

impl MilestoneCatalogEntry {
    pub fn milestones(&self, category: MilestoneCategory) -> &'static [&'static str] {
        match category {
            MilestoneCategory::Physical => self.physical,
            MilestoneCategory::Cognitive => self.cognitive,
            MilestoneCategory::Social => self.social,
            MilestoneCategory::Communication => self.communication,
        }
    }

    pub fn total(&self) -> usize {
        MilestoneCategory::ALL
            .iter()
            .map(|category| self.milestones(*category).len())
            .sum()
    }
}

/// Catalog entry for a bucket. Exhaustive, so every bucket has an entry.
pub fn entry_for_bucket(bucket: AgeBucket) -> &'static MilestoneCatalogEntry {
    match bucket {
        AgeBucket::ZeroToThree => &ZERO_TO_THREE,
        AgeBucket::FourToSix => &FOUR_TO_SIX,
        AgeBucket::SevenToNine => &SEVEN_TO_NINE,
        AgeBucket::TenToTwelve => &TEN_TO_TWELVE,
        AgeBucket::ThirteenToEighteen => &THIRTEEN_TO_EIGHTEEN,
        AgeBucket::NineteenToTwentyFour => &NINETEEN_TO_TWENTY_FOUR,
        AgeBucket::TwentyFourToThirtySix => &TWENTY_FOUR_TO_THIRTY_SIX,
    }
}

/// Look up an entry by its string key ("0-3", "4-6", ...)
pub fn entry_for_key(key: &str) -> Option<&'static MilestoneCatalogEntry> {
    AgeBucket::from_key(key).map(entry_for_bucket)
}

/// Milestones to show for a baby of the given age
pub fn milestones_for(age_in_months: u32) -> &'static MilestoneCatalogEntry {
    entry_for_bucket(AgeBucket::for_age(age_in_months))
}

/// Every catalog entry in ascending bucket order
pub fn all_entries() -> impl Iterator<Item = &'static MilestoneCatalogEntry> {
    AgeBucket::ALL.into_iter().map(entry_for_bucket)
}

/// Concatenate the four category lists, tagging each item with its category
pub fn flatten(entry: &MilestoneCatalogEntry) -> Vec<MilestoneItem> {
    MilestoneCategory::ALL
        .iter()
        .flat_map(|category| {
            entry.milestones(*category).iter().map(move |text| MilestoneItem {
                text: (*text).to_string(),
                category: *category,
            })
        })
        .collect()
}

/// Stable checklist ID, e.g. "physical_rolls_over_in_both_directions"
pub fn milestone_id(category: MilestoneCategory, text: &str) -> String {
    let slug = text.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}", category.as_str().to_lowercase(), slug.to_lowercase())
}

static ZERO_TO_THREE: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::ZeroToThree,
    label: "0-3 Months",
    physical: &[
        "Lifts head when on tummy",
        "Opens and closes hands",
        "Brings hands to mouth",
        "Moves arms and legs actively",
        "Holds head steady when upright",
    ],
    cognitive: &[
        "Focuses on faces",
        "Follows moving objects with eyes",
        "Recognizes familiar people at a distance",
        "Starts to act bored if activity doesn't change",
    ],
    social: &[
        "Begins to smile at people",
        "Can briefly calm themselves",
        "Tries to look at parents",
        "Gurgles or makes cooing sounds",
    ],
    communication: &[
        "Makes cooing sounds",
        "Turns head toward sounds",
        "Begins to babble",
        "Cries in different ways for different needs",
    ],
};

static FOUR_TO_SIX: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::FourToSix,
    label: "4-6 Months",
    physical: &[
        "Rolls over in both directions",
        "Sits without support",
        "Rocks back and forth on hands and knees",
        "Supports weight on legs when standing",
        "Transfers objects from one hand to another",
    ],
    cognitive: &[
        "Looks around at things nearby",
        "Brings things to mouth",
        "Shows curiosity about things",
        "Tries to get things that are out of reach",
    ],
    social: &[
        "Knows familiar faces",
        "Likes to play with others",
        "Responds to other people's emotions",
        "Likes to look at themselves in mirror",
    ],
    communication: &[
        "Responds to sounds by making sounds",
        "Strings vowels together when babbling",
        "Responds to own name",
        "Makes sounds to show joy and displeasure",
    ],
};

static SEVEN_TO_NINE: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::SevenToNine,
    label: "7-9 Months",
    physical: &[
        "Sits without support",
        "Gets to sitting position without help",
        "Crawls forward on belly",
        "Gets to hands-and-knees position",
        "Pulls to stand",
    ],
    cognitive: &[
        "Watches the path of something as it falls",
        "Looks for things they see you hide",
        "Plays peek-a-boo",
        "Puts things in their mouth",
    ],
    social: &[
        "May be afraid of strangers",
        "May be clingy with familiar adults",
        "Has favorite toys",
        "Understands 'no'",
    ],
    communication: &[
        "Understands 'no'",
        "Makes many different sounds",
        "Copies sounds and gestures",
        "Uses fingers to point at things",
    ],
};

static TEN_TO_TWELVE: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::TenToTwelve,
    label: "10-12 Months",
    physical: &[
        "Pulls to stand and cruises along furniture",
        "Takes a few steps without holding on",
        "Stands alone",
        "Walks holding onto furniture",
        "May take first independent steps",
    ],
    cognitive: &[
        "Explores things by shaking, banging, throwing",
        "Finds hidden things easily",
        "Looks at right picture when named",
        "Copies gestures",
    ],
    social: &[
        "Shy or nervous with strangers",
        "Cries when mom or dad leaves",
        "Has favorite things and people",
        "Shows fear in some situations",
    ],
    communication: &[
        "Responds to simple spoken requests",
        "Uses simple gestures like waving bye-bye",
        "Makes sounds with changes in tone",
        "Says 'mama' and 'dada' and exclamations",
    ],
};

static THIRTEEN_TO_EIGHTEEN: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::ThirteenToEighteen,
    label: "13-18 Months",
    physical: &[
        "Walks alone",
        "May walk up steps and run",
        "Pulls toys while walking",
        "Can help undress themselves",
        "Drinks from a cup",
    ],
    cognitive: &[
        "Knows what ordinary things are for",
        "Points to get attention of others",
        "Shows interest in a doll or stuffed animal",
        "Points to one body part",
    ],
    social: &[
        "Likes to hand things to others as play",
        "May have temper tantrums",
        "May be afraid of strangers",
        "Shows affection to familiar people",
    ],
    communication: &[
        "Says several single words",
        "Says and shakes head 'no'",
        "Points to show others something interesting",
        "Tries to say words you say",
    ],
};

static NINETEEN_TO_TWENTY_FOUR: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::NineteenToTwentyFour,
    label: "19-24 Months",
    physical: &[
        "Runs and climbs",
        "Walks up and down stairs holding on",
        "Throws ball overhand",
        "Makes or copies straight lines",
        "Takes off some clothes",
    ],
    cognitive: &[
        "Finds things even when hidden under covers",
        "Begins to sort shapes and colors",
        "Completes sentences in familiar books",
        "Plays simple make-believe games",
    ],
    social: &[
        "Copies others, especially adults",
        "Gets excited when with other children",
        "Shows more independence",
        "Shows defiant behavior",
    ],
    communication: &[
        "Points to things in a book when named",
        "Says sentences with 2-4 words",
        "Follows simple instructions",
        "Repeats words overheard in conversation",
    ],
};

static TWENTY_FOUR_TO_THIRTY_SIX: MilestoneCatalogEntry = MilestoneCatalogEntry {
    bucket: AgeBucket::TwentyFourToThirtySix,
    label: "2-3 Years",
    physical: &[
        "Climbs well",
        "Runs easily",
        "Pedals a tricycle",
        "Walks up and down stairs one foot per step",
        "Kicks ball forward",
    ],
    cognitive: &[
        "Makes mechanical toys work",
        "Plays make-believe with dolls and animals",
        "Sorts objects by shape and color",
        "Completes puzzles with 3-4 pieces",
    ],
    social: &[
        "Imitates adults and playmates",
        "Shows affection for friends without prompting",
        "Takes turns in games",
        "Shows concern for crying friend",
    ],
    communication: &[
        "Follows instructions with 2-3 steps",
        "Can name most familiar things",
        "Understands words like 'in,' 'on,' and 'under'",
        "Says first name, age, and sex",
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_thresholds() {
        assert_eq!(AgeBucket::for_age(0).key(), "0-3");
        assert_eq!(AgeBucket::for_age(3).key(), "0-3");
        assert_eq!(AgeBucket::for_age(4).key(), "4-6");
        assert_eq!(AgeBucket::for_age(9).key(), "7-9");
        assert_eq!(AgeBucket::for_age(10).key(), "10-12");
        assert_eq!(AgeBucket::for_age(13).key(), "13-18");
        assert_eq!(AgeBucket::for_age(19).key(), "19-24");
        assert_eq!(AgeBucket::for_age(24).key(), "19-24");
        assert_eq!(AgeBucket::for_age(25).key(), "24-36");
        assert_eq!(AgeBucket::for_age(100).key(), "24-36");
    }

    #[test]
    fn test_bucket_is_monotonic() {
        for age in 0..120 {
            assert!(AgeBucket::for_age(age) <= AgeBucket::for_age(age + 1));
        }
    }

    #[test]
    fn test_every_bucket_is_reachable() {
        for bucket in AgeBucket::ALL {
            assert!((0..40).any(|age| AgeBucket::for_age(age) == bucket));
        }
    }

    #[test]
    fn test_entry_for_bucket_matches_bucket() {
        for bucket in AgeBucket::ALL {
            let entry = entry_for_bucket(bucket);
            assert_eq!(entry.bucket, bucket);
            assert_eq!(entry.total(), 17);
        }
    }

    #[test]
    fn test_entry_for_key() {
        assert_eq!(entry_for_key("10-12").map(|e| e.label), Some("10-12 Months"));
        assert!(entry_for_key("36-48").is_none());
    }

    #[test]
    fn test_milestones_for_age() {
        assert_eq!(milestones_for(5).label, "4-6 Months");
        assert_eq!(milestones_for(48).label, "2-3 Years");
    }

    #[test]
    fn test_flatten_preserves_category_order() {
        let items = flatten(milestones_for(0));
        assert_eq!(items.len(), 17);
        assert_eq!(items[0].text, "Lifts head when on tummy");
        assert_eq!(items[0].category, MilestoneCategory::Physical);
        assert_eq!(items[5].category, MilestoneCategory::Cognitive);
        assert_eq!(items[16].category, MilestoneCategory::Communication);
        assert_eq!(items[16].text, "Cries in different ways for different needs");
    }

    #[test]
    fn test_milestone_id() {
        assert_eq!(
            milestone_id(MilestoneCategory::Physical, "Rolls over in both directions"),
            "physical_rolls_over_in_both_directions"
        );
        assert_eq!(
            milestone_id(MilestoneCategory::Social, "Has  favorite toys"),
            "social_has_favorite_toys"
        );
    }

    #[test]
    fn test_bucket_serializes_as_key() {
        let json = serde_json::to_string(&AgeBucket::ThirteenToEighteen).unwrap();
        assert_eq!(json, "\"13-18\"");
        assert_eq!(AgeBucket::from_key("19-24"), Some(AgeBucket::NineteenToTwentyFour));
    }
}
