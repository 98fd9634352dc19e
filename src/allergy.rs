//! Allergy check sheet: pick allergens by their Japanese name and get a
//! Korean sentence to show restaurant staff.
//!
//! The selection is persisted as a JSON array of Japanese identifiers, the
//! same shape the browser stores under `selectedAllergies`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Allergen {
    pub ja: &'static str,
    pub ko: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct AllergenCategory {
    pub category: &'static str,
    pub items: &'static [Allergen],
}

const fn allergen(ja: &'static str, ko: &'static str) -> Allergen {
    Allergen { ja, ko }
}

pub const CATALOG: &[AllergenCategory] = &[
    AllergenCategory {
        category: "畜産品",
        items: &[
            allergen("卵", "계란"),
            allergen("乳", "우유"),
            allergen("牛肉", "소고기"),
            allergen("鶏肉", "닭고기"),
            allergen("豚肉", "돼지고기"),
        ],
    },
    AllergenCategory {
        category: "穀物",
        items: &[
            allergen("小麦", "밀"),
            allergen("そば", "메밀"),
            allergen("ごま", "참깨"),
            allergen("大豆", "대두"),
        ],
    },
    AllergenCategory {
        category: "魚介類",
        items: &[
            allergen("えび", "새우"),
            allergen("かに", "게"),
            allergen("あわび", "전복"),
            allergen("いか", "오징어"),
            allergen("いくら", "이쿠라"),
            allergen("さけ", "연어"),
            allergen("さば", "고등어"),
            allergen("その他貝類", "조개류"),
        ],
    },
    AllergenCategory {
        category: "ナッツ類",
        items: &[
            allergen("落花生", "땅콩"),
            allergen("くるみ", "호두"),
            allergen("アーモンド", "아몬드"),
            allergen("カシューナッツ", "캐슈넛"),
            allergen("ピスタチオ", "피스타치오"),
            allergen("マカダミアナッツ", "마카다미아"),
            allergen("ヘーゼルナッツ", "헤이즐넛"),
        ],
    },
    AllergenCategory {
        category: "果物",
        items: &[
            allergen("オレンジ", "오렌지"),
            allergen("キウイフルーツ", "키위"),
            allergen("バナナ", "바나나"),
            allergen("パイナップル", "파인애플"),
            allergen("もも", "복숭아"),
            allergen("りんご", "사과"),
            allergen("なし", "배"),
        ],
    },
    AllergenCategory {
        category: "その他",
        items: &[
            allergen("まつたけ", "송이버섯"),
            allergen("やまいも", "마"),
            allergen("ゼラチン", "젤라틴"),
        ],
    },
];

/// Korean name for a Japanese allergen identifier, if it is in the catalog.
pub fn korean_name(ja: &str) -> Option<&'static str> {
    CATALOG
        .iter()
        .flat_map(|category| category.items.iter())
        .find(|item| item.ja == ja)
        .map(|item| item.ko)
}

/// Ordered list of selected allergens, by Japanese identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllergySelection {
    items: Vec<String>,
}

impl AllergySelection {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, ja: &str) -> bool {
        self.items.iter().any(|item| item == ja)
    }

    /// Select `ja` if it is not selected yet, otherwise deselect it.
    /// Returns whether it is selected afterwards.
    pub fn toggle(&mut self, ja: &str) -> bool {
        if self.contains(ja) {
            self.items.retain(|item| item != ja);
            false
        } else {
            self.items.push(ja.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Number of selected allergens belonging to `category`.
    pub fn selected_in(&self, category: &AllergenCategory) -> usize {
        category
            .items
            .iter()
            .filter(|item| self.contains(item.ja))
            .count()
    }

    /// Sentence for restaurant staff, in Korean. Empty when nothing is selected.
    pub fn korean_phrase(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        let list = self
            .items
            .iter()
            .map(|ja| korean_name(ja).unwrap_or(ja.as_str()))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "저는 {}에 알레르기가 있습니다. 해당 음식에 위 재료가 들어가 있나요?",
            list
        )
    }

    /// The same sentence in Japanese, for the guest to check.
    pub fn japanese_phrase(&self) -> String {
        if self.items.is_empty() {
            return String::new();
        }
        format!(
            "私は {} アレルギーがあります。この料理にこれらが含まれていますか？",
            self.items.join("、")
        )
    }
}

/// File-backed persistence for the selection.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: PathBuf,
}

impl SelectionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored selection; a missing file means nothing is selected.
    pub fn load(&self) -> Result<AllergySelection> {
        if !self.path.exists() {
            debug!("No stored selection at {}", self.path.display());
            return Ok(AllergySelection::default());
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse selection in {}", self.path.display()))
    }

    pub fn save(&self, selection: &AllergySelection) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string(selection)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}
