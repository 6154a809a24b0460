//! Preference parsing
//!
//! Turns the traveller's free text into preference tags by substring
//! matching against a fixed keyword table, and scores places by how many of
//! their tags were requested.

use async_trait::async_trait;
use indexmap::IndexSet;
use tracing::debug;

use crate::Result;

/// Trigger substring and the tags it contributes.
const KEYWORD_MAPPING: &[(&str, &[&str])] = &[
    ("카페", &["카페", "커피"]),
    ("바다", &["바다", "바다뷰", "해변", "오션뷰"]),
    ("조용", &["조용한", "힐링", "평화"]),
    ("인스타", &["인스타감성", "감성", "예술", "색채"]),
    ("맛집", &["맛집", "식당", "음식"]),
    ("관광", &["관광지", "명소", "투어"]),
    ("쇼핑", &["쇼핑", "백화점", "거리"]),
    ("자연", &["자연", "산책", "등산"]),
    ("힙", &["힙한", "트렌디", "모던"]),
    ("전통", &["전통", "역사", "문화"]),
    ("활기", &["활기찬", "북적", "번화가"]),
    ("데이트", &["데이트", "로맨틱"]),
];

const CROWD_TRIGGER: &str = "사람 많";
const DISLIKE_TRIGGER: &str = "싫";
const QUIET_TAG: &str = "조용한";
const LIVELY_TAG: &str = "활기찬";

/// Score returned when the traveller expressed no preference at all
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Extract preference tags from free text.
///
/// Tags come out in table order, de-duplicated. "사람 많 ... 싫" forces the
/// quiet tag and drops the lively one.
#[must_use]
pub fn parse_preferences(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut keywords: Vec<&str> = Vec::new();

    for &(trigger, tags) in KEYWORD_MAPPING {
        if lower.contains(trigger) {
            keywords.extend_from_slice(tags);
        }
    }

    if lower.contains(CROWD_TRIGGER) && lower.contains(DISLIKE_TRIGGER) {
        keywords.push(QUIET_TAG);
        if let Some(index) = keywords.iter().position(|tag| *tag == LIVELY_TAG) {
            keywords.remove(index);
        }
    }

    let unique: IndexSet<&str> = keywords.into_iter().collect();
    debug!("Extracted {} preference tags from {:?}", unique.len(), text);
    unique.into_iter().map(str::to_string).collect()
}

/// Fraction of user keywords hit by a place's tags.
///
/// Every place tag that is a requested keyword counts once, duplicates
/// included, and the count is divided by the number of keywords. The result
/// is therefore not capped at 1.0. No keywords at all yields
/// [`NEUTRAL_SCORE`].
#[must_use]
pub fn calculate_match_score<T: AsRef<str>, K: AsRef<str>>(
    place_tags: &[T],
    user_keywords: &[K],
) -> f64 {
    if user_keywords.is_empty() {
        return NEUTRAL_SCORE;
    }

    let match_count = place_tags
        .iter()
        .filter(|tag| {
            user_keywords
                .iter()
                .any(|keyword| keyword.as_ref() == tag.as_ref())
        })
        .count();

    match_count as f64 / user_keywords.len() as f64
}

/// Turns preference text into tags. Seam for a language-model backed
/// analyzer; the keyword table is the only implementation today.
#[async_trait]
pub trait PreferenceAnalyzer: Send + Sync {
    async fn analyze(&self, text: &str) -> Result<Vec<String>>;
}

/// Analyzer backed by [`parse_preferences`]
#[derive(Debug, Default, Clone, Copy)]
pub struct KeywordPreferenceAnalyzer;

#[async_trait]
impl PreferenceAnalyzer for KeywordPreferenceAnalyzer {
    async fn analyze(&self, text: &str) -> Result<Vec<String>> {
        Ok(parse_preferences(text))
    }
}

/// Placeholder for a remote preference analysis call.
///
/// Resolves immediately with the keyword parser's result.
pub async fn call_ai_preference(text: &str) -> Vec<String> {
    parse_preferences(text)
}
