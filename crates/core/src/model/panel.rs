use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DeckError;

/// Identifier of a full-viewport panel. Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Cheese,
    Paramedic,
    Faith,
    Nerd,
    Marcus,
    Gallery,
    Finale,
}

impl SectionId {
    pub const ALL: [SectionId; 7] = [
        SectionId::Cheese,
        SectionId::Paramedic,
        SectionId::Faith,
        SectionId::Nerd,
        SectionId::Marcus,
        SectionId::Gallery,
        SectionId::Finale,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionId::Cheese => "cheese",
            SectionId::Paramedic => "paramedic",
            SectionId::Faith => "faith",
            SectionId::Nerd => "nerd",
            SectionId::Marcus => "marcus",
            SectionId::Gallery => "gallery",
            SectionId::Finale => "finale",
        }
    }

    /// Position in display order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionId {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SectionId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| DeckError::UnknownSection(s.to_string()))
    }
}

/// One content section of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Panel {
    pub id: SectionId,
    pub label: &'static str,
}

pub const SECTIONS: [Panel; 7] = [
    Panel {
        id: SectionId::Cheese,
        label: "Cheese & Vanuatu",
    },
    Panel {
        id: SectionId::Paramedic,
        label: "Paramedic",
    },
    Panel {
        id: SectionId::Faith,
        label: "Faith",
    },
    Panel {
        id: SectionId::Nerd,
        label: "Movies and stuff",
    },
    Panel {
        id: SectionId::Marcus,
        label: "Marcus",
    },
    Panel {
        id: SectionId::Gallery,
        label: "Gallery",
    },
    Panel {
        id: SectionId::Finale,
        label: "Finale",
    },
];

/// One entry of the dot navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub id: SectionId,
    pub label: &'static str,
    pub active: bool,
}
