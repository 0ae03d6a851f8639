//! Tool parameter structs.
//!
//! Each struct doubles as the tool's JSON input schema (via `schemars`) and
//! as its argument parser, so the advertised schema and the accepted input
//! cannot diverge.

use schemars::JsonSchema;
use serde::Deserialize;

fn default_page() -> u32 {
    1
}

fn default_group() -> String {
    "all".to_string()
}

/// Tools that take no arguments.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NoParams {}

// ============================================================================
// Schedules & lists
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScheduleIdParams {
    #[schemars(description = "The schedule ID")]
    pub schedule_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ScheduleTermsParams {
    #[schemars(description = "The schedule ID")]
    pub schedule_id: String,

    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,

    #[schemars(description = "Filter group: all, studied, notyetstudied, review_today, etc.")]
    #[serde(default = "default_group")]
    pub group: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListPageParams {
    #[schemars(description = "The list ID")]
    pub list_id: String,

    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StudiedTermsParams {
    #[schemars(description = "Type of terms: vocab, grammar, kanji, or sent")]
    pub termtype: String,

    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

// ============================================================================
// Search
// ============================================================================

/// Paged dictionary search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PagedSearchParams {
    #[schemars(description = "Search query (Japanese or English)")]
    pub query: String,

    #[schemars(description = "Page number (default: 1)")]
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Search query")]
    pub query: String,
}

// ============================================================================
// Words
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WordIdParams {
    #[schemars(description = "The word ID")]
    pub word_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WordScheduleParams {
    #[schemars(description = "The word ID")]
    pub word_id: String,

    #[schemars(description = "The schedule ID")]
    pub schedule_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WordListParams {
    #[schemars(description = "The word ID")]
    pub word_id: String,

    #[schemars(description = "The list ID")]
    pub list_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WordByScheduleNameParams {
    #[schemars(description = "The name of the schedule to add the word to")]
    pub schedule_name: String,

    #[schemars(description = "The word to search for and add (Japanese or English)")]
    pub word: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WordByListNameParams {
    #[schemars(description = "The name of the list to add the word to")]
    pub list_name: String,

    #[schemars(description = "The word to search for and add (Japanese or English)")]
    pub word: String,
}

// ============================================================================
// Kanji
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KanjiParams {
    #[schemars(description = "The kanji character")]
    pub kanji: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KanjiScheduleParams {
    #[schemars(description = "The kanji character")]
    pub kanji: String,

    #[schemars(description = "The schedule ID")]
    pub schedule_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct KanjiListParams {
    #[schemars(description = "The kanji character")]
    pub kanji: String,

    #[schemars(description = "The list ID")]
    pub list_id: String,
}

// ============================================================================
// Grammar
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GrammarIdParams {
    #[schemars(description = "The grammar ID")]
    pub grammar_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GrammarScheduleParams {
    #[schemars(description = "The grammar ID")]
    pub grammar_id: String,

    #[schemars(description = "The schedule ID")]
    pub schedule_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GrammarListParams {
    #[schemars(description = "The grammar ID")]
    pub grammar_id: String,

    #[schemars(description = "The list ID")]
    pub list_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_and_group_defaults() {
        let params: ScheduleTermsParams =
            serde_json::from_str(r#"{"schedule_id": "12"}"#).unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.group, "all");

        let params: PagedSearchParams = serde_json::from_str(r#"{"query": "eat"}"#).unwrap();
        assert_eq!(params.page, 1);
    }

    #[test]
    fn test_required_fields_enforced() {
        let result: Result<WordByScheduleNameParams, _> =
            serde_json::from_str(r#"{"schedule_name": "Daily"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_no_params_accepts_empty_object() {
        let _: NoParams = serde_json::from_str("{}").unwrap();
    }
}
