use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::MatchError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScoreCategory {
    BlueCards,
    GreenCards,
    YellowCards,
    PurpleCards,
    GodsCards,
    Wonders,
    Capitol,
    Senate,
    Military,
    Progress,
    Coins,
    GreatTemple,
    Naval,
}

impl ScoreCategory {
    pub const ALL: [ScoreCategory; 13] = [
        ScoreCategory::BlueCards,
        ScoreCategory::GreenCards,
        ScoreCategory::YellowCards,
        ScoreCategory::PurpleCards,
        ScoreCategory::GodsCards,
        ScoreCategory::Wonders,
        ScoreCategory::Capitol,
        ScoreCategory::Senate,
        ScoreCategory::Military,
        ScoreCategory::Progress,
        ScoreCategory::Coins,
        ScoreCategory::GreatTemple,
        ScoreCategory::Naval,
    ];

    /// Short key used on the command line and in serialized sheets.
    pub fn key(self) -> &'static str {
        match self {
            ScoreCategory::BlueCards => "blue",
            ScoreCategory::GreenCards => "green",
            ScoreCategory::YellowCards => "yellow",
            ScoreCategory::PurpleCards => "purple",
            ScoreCategory::GodsCards => "gods",
            ScoreCategory::Wonders => "wonders",
            ScoreCategory::Capitol => "capitol",
            ScoreCategory::Senate => "senate",
            ScoreCategory::Military => "military",
            ScoreCategory::Progress => "progress",
            ScoreCategory::Coins => "coins",
            ScoreCategory::GreatTemple => "temple",
            ScoreCategory::Naval => "naval",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::BlueCards => "Blue cards",
            ScoreCategory::GreenCards => "Green cards",
            ScoreCategory::YellowCards => "Yellow cards",
            ScoreCategory::PurpleCards => "Guilds",
            ScoreCategory::GodsCards => "Gods",
            ScoreCategory::Wonders => "Wonders",
            ScoreCategory::Capitol => "Capitol",
            ScoreCategory::Senate => "Senate",
            ScoreCategory::Military => "Military",
            ScoreCategory::Progress => "Progress tokens",
            ScoreCategory::Coins => "Coins",
            ScoreCategory::GreatTemple => "Great temple",
            ScoreCategory::Naval => "Naval",
        }
    }

    /// Categories that may be absent on a stored match.
    pub fn is_optional(self) -> bool {
        matches!(self, ScoreCategory::Naval)
    }
}

impl Display for ScoreCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for ScoreCategory {
    type Err = MatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ScoreCategory::ALL
            .into_iter()
            .find(|category| category.key() == key)
            .ok_or(MatchError::UnknownCategory(key))
    }
}

/// One player's points, one field per [`ScoreCategory`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub blue_cards: u32,
    pub green_cards: u32,
    pub yellow_cards: u32,
    pub purple_cards: u32,
    pub gods_cards: u32,
    pub wonders: u32,
    pub capitol: u32,
    pub senate: u32,
    pub military: u32,
    pub progress: u32,
    pub coins: u32,
    pub great_temple: u32,
    pub naval: Option<u32>,
}

impl ScoreSheet {
    /// Stored value; `None` only for an absent optional category.
    pub fn get(&self, category: ScoreCategory) -> Option<u32> {
        match category {
            ScoreCategory::BlueCards => Some(self.blue_cards),
            ScoreCategory::GreenCards => Some(self.green_cards),
            ScoreCategory::YellowCards => Some(self.yellow_cards),
            ScoreCategory::PurpleCards => Some(self.purple_cards),
            ScoreCategory::GodsCards => Some(self.gods_cards),
            ScoreCategory::Wonders => Some(self.wonders),
            ScoreCategory::Capitol => Some(self.capitol),
            ScoreCategory::Senate => Some(self.senate),
            ScoreCategory::Military => Some(self.military),
            ScoreCategory::Progress => Some(self.progress),
            ScoreCategory::Coins => Some(self.coins),
            ScoreCategory::GreatTemple => Some(self.great_temple),
            ScoreCategory::Naval => self.naval,
        }
    }

    pub fn points(&self, category: ScoreCategory) -> u32 {
        self.get(category).unwrap_or(0)
    }

    pub fn set(&mut self, category: ScoreCategory, value: u32) {
        match category {
            ScoreCategory::BlueCards => self.blue_cards = value,
            ScoreCategory::GreenCards => self.green_cards = value,
            ScoreCategory::YellowCards => self.yellow_cards = value,
            ScoreCategory::PurpleCards => self.purple_cards = value,
            ScoreCategory::GodsCards => self.gods_cards = value,
            ScoreCategory::Wonders => self.wonders = value,
            ScoreCategory::Capitol => self.capitol = value,
            ScoreCategory::Senate => self.senate = value,
            ScoreCategory::Military => self.military = value,
            ScoreCategory::Progress => self.progress = value,
            ScoreCategory::Coins => self.coins = value,
            ScoreCategory::GreatTemple => self.great_temple = value,
            ScoreCategory::Naval => self.naval = Some(value),
        }
    }

    pub fn clear(&mut self, category: ScoreCategory) -> Result<(), MatchError> {
        match category {
            ScoreCategory::Naval => {
                self.naval = None;
                Ok(())
            }
            other => Err(MatchError::RequiredCategory(other.key().to_string())),
        }
    }

    pub fn with(mut self, category: ScoreCategory, value: u32) -> Self {
        self.set(category, value);
        self
    }

    /// Sum over every category, absent ones counting as zero.
    pub fn total(&self) -> u64 {
        ScoreCategory::ALL
            .iter()
            .map(|&category| u64::from(self.points(category)))
            .sum()
    }
}
