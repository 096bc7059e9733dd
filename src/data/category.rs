//! Browsable exercise categories
//!
//! ExerciseDB lists exercises per body part or per equipment. The names below
//! are the ones offered on the search screen; the value sent upstream is the
//! lowercased name.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which axis a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CategoryKind {
    BodyPart,
    Equipment,
}

impl CategoryKind {
    /// Path segment used by ExerciseDB
    pub fn path_segment(self) -> &'static str {
        match self {
            CategoryKind::BodyPart => "bodyPart",
            CategoryKind::Equipment => "equipment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryKind::BodyPart => "Body Parts",
            CategoryKind::Equipment => "Equipment",
        }
    }

    /// Parses a kind as typed on the command line
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "bodypart" | "body-part" | "body_part" | "body" => Some(CategoryKind::BodyPart),
            "equipment" | "equip" => Some(CategoryKind::Equipment),
            _ => None,
        }
    }
}

/// A body part or piece of equipment to browse by
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Category {
    pub kind: CategoryKind,
    /// Display name, e.g. "Upper arm"
    pub name: String,
}

impl Category {
    pub fn new(kind: CategoryKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }

    /// Value sent to ExerciseDB
    pub fn value(&self) -> String {
        self.name.to_lowercase()
    }

    /// Heading for the category screen, e.g. "Chest Exercises"
    pub fn title(&self) -> String {
        let mut chars = self.name.chars();
        match chars.next() {
            Some(first) => format!("{}{} Exercises", first.to_uppercase(), chars.as_str()),
            None => "Exercises".to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

static BODY_PARTS: [&str; 8] = [
    "back",
    "cardio",
    "chest",
    "Lower arm",
    "Upper leg",
    "neck",
    "Upper arm",
    "Waist",
];

static EQUIPMENT: [&str; 22] = [
    "assisted",
    "band",
    "barbell",
    "bodyweight",
    "bosu ball",
    "dumbell",
    "Ez barbell",
    "Hammer",
    "kettlebell",
    "leverage machine",
    "Olympic barbel",
    "Resistance band",
    "Rope",
    "Skierg machine",
    "Stability ball",
    "Stationary bike",
    "Smith machine",
    "Sled machine",
    "tire",
    "trap bar",
    "upper body ergometer",
    "weighted",
];

/// Names offered on the body part tab
pub fn body_parts() -> &'static [&'static str] {
    &BODY_PARTS
}

/// Names offered on the equipment tab
pub fn equipment() -> &'static [&'static str] {
    &EQUIPMENT
}

/// All categories of one kind, in display order
pub fn all_categories(kind: CategoryKind) -> Vec<Category> {
    let names = match kind {
        CategoryKind::BodyPart => body_parts(),
        CategoryKind::Equipment => equipment(),
    };
    names.iter().map(|name| Category::new(kind, *name)).collect()
}
