//! The fixed catalog of Renshuu tools.
//!
//! Every tool is a variant of [`RenshuuTool`]. Name, description and input
//! schema are derived from the variant, and dispatch in
//! [`ToolRegistry`](crate::domains::tools::ToolRegistry) matches on it
//! exhaustively, so adding a variant without wiring it up fails to compile.

use std::sync::Arc;

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{JsonObject, Tool},
};

use super::params::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenshuuTool {
    // User & lists
    GetProfile,
    GetSchedules,
    GetSchedule,
    GetScheduleTerms,
    GetLists,
    GetList,
    GetAllStudiedTerms,
    // Vocab
    SearchWords,
    GetWord,
    AddWordToSchedule,
    AddWordToList,
    RemoveWordFromSchedule,
    RemoveWordFromList,
    AddWordByScheduleName,
    AddWordByListName,
    // Kanji
    SearchKanji,
    GetKanji,
    AddKanjiToSchedule,
    AddKanjiToList,
    RemoveKanjiFromSchedule,
    RemoveKanjiFromList,
    // Grammar
    SearchGrammar,
    GetGrammar,
    AddGrammarToSchedule,
    AddGrammarToList,
    RemoveGrammarFromSchedule,
    RemoveGrammarFromList,
    // Sentences
    SearchSentences,
    GetSentencesForWord,
}

impl RenshuuTool {
    /// Every tool, in the order they are advertised.
    pub const ALL: [RenshuuTool; 29] = [
        Self::GetProfile,
        Self::GetSchedules,
        Self::GetSchedule,
        Self::GetScheduleTerms,
        Self::GetLists,
        Self::GetList,
        Self::GetAllStudiedTerms,
        Self::SearchWords,
        Self::GetWord,
        Self::AddWordToSchedule,
        Self::AddWordToList,
        Self::RemoveWordFromSchedule,
        Self::RemoveWordFromList,
        Self::AddWordByScheduleName,
        Self::AddWordByListName,
        Self::SearchKanji,
        Self::GetKanji,
        Self::AddKanjiToSchedule,
        Self::AddKanjiToList,
        Self::RemoveKanjiFromSchedule,
        Self::RemoveKanjiFromList,
        Self::SearchGrammar,
        Self::GetGrammar,
        Self::AddGrammarToSchedule,
        Self::AddGrammarToList,
        Self::RemoveGrammarFromSchedule,
        Self::RemoveGrammarFromList,
        Self::SearchSentences,
        Self::GetSentencesForWord,
    ];

    /// Tool name as registered in MCP.
    pub const fn name(self) -> &'static str {
        match self {
            Self::GetProfile => "get_profile",
            Self::GetSchedules => "get_schedules",
            Self::GetSchedule => "get_schedule",
            Self::GetScheduleTerms => "get_schedule_terms",
            Self::GetLists => "get_lists",
            Self::GetList => "get_list",
            Self::GetAllStudiedTerms => "get_all_studied_terms",
            Self::SearchWords => "search_words",
            Self::GetWord => "get_word",
            Self::AddWordToSchedule => "add_word_to_schedule",
            Self::AddWordToList => "add_word_to_list",
            Self::RemoveWordFromSchedule => "remove_word_from_schedule",
            Self::RemoveWordFromList => "remove_word_from_list",
            Self::AddWordByScheduleName => "add_word_by_schedule_name",
            Self::AddWordByListName => "add_word_by_list_name",
            Self::SearchKanji => "search_kanji",
            Self::GetKanji => "get_kanji",
            Self::AddKanjiToSchedule => "add_kanji_to_schedule",
            Self::AddKanjiToList => "add_kanji_to_list",
            Self::RemoveKanjiFromSchedule => "remove_kanji_from_schedule",
            Self::RemoveKanjiFromList => "remove_kanji_from_list",
            Self::SearchGrammar => "search_grammar",
            Self::GetGrammar => "get_grammar",
            Self::AddGrammarToSchedule => "add_grammar_to_schedule",
            Self::AddGrammarToList => "add_grammar_to_list",
            Self::RemoveGrammarFromSchedule => "remove_grammar_from_schedule",
            Self::RemoveGrammarFromList => "remove_grammar_from_list",
            Self::SearchSentences => "search_sentences",
            Self::GetSentencesForWord => "get_sentences_for_word",
        }
    }

    /// Look a tool up by its MCP name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.name() == name)
    }

    /// Tool description shown to clients.
    pub const fn description(self) -> &'static str {
        match self {
            Self::GetProfile => "Get the current user's Renshuu profile including study statistics, streaks, and level progress.",
            Self::GetSchedules => "Get all of the user's study schedules. Returns schedule names, IDs, and study counts.",
            Self::GetSchedule => "Get details of a specific schedule by ID.",
            Self::GetScheduleTerms => "Get the terms (vocabulary, kanji, etc.) in a specific schedule.",
            Self::GetLists => "Get all user-created vocabulary/kanji/grammar lists.",
            Self::GetList => "Get contents of a specific user list by ID.",
            Self::GetAllStudiedTerms => "Get all terms of a specified type (vocab, grammar, kanji, sent) that the user has studied.",
            Self::SearchWords => "Search the Renshuu vocabulary dictionary. You can search in Japanese (kanji, hiragana) or English.",
            Self::GetWord => "Get detailed information about a specific vocabulary word by its ID.",
            Self::AddWordToSchedule => "Add a vocabulary word to a study schedule. First search for the word to get its ID, then use this tool.",
            Self::AddWordToList => "Add a vocabulary word to a user list.",
            Self::RemoveWordFromSchedule => "Remove a vocabulary word from a study schedule.",
            Self::RemoveWordFromList => "Remove a vocabulary word from a user list.",
            Self::AddWordByScheduleName => "Add a word to a schedule by schedule name. This is a convenience tool that searches for the schedule by name, searches for the word, and adds it in a single operation. This endpoint MUST be used for add-word requests.",
            Self::AddWordByListName => "Add a word to a list by list name. This is a convenience tool that searches for the list by name, searches for the word, and adds it in a single operation.",
            Self::SearchKanji => "Search for kanji by character or meaning.",
            Self::GetKanji => "Get detailed information about a specific kanji character.",
            Self::AddKanjiToSchedule => "Add a kanji to a study schedule.",
            Self::AddKanjiToList => "Add a kanji to a user list.",
            Self::RemoveKanjiFromSchedule => "Remove a kanji from a study schedule.",
            Self::RemoveKanjiFromList => "Remove a kanji from a user list.",
            Self::SearchGrammar => "Search the grammar dictionary.",
            Self::GetGrammar => "Get detailed information about a specific grammar point.",
            Self::AddGrammarToSchedule => "Add a grammar point to a study schedule.",
            Self::AddGrammarToList => "Add a grammar point to a user list.",
            Self::RemoveGrammarFromSchedule => "Remove a grammar point from a study schedule.",
            Self::RemoveGrammarFromList => "Remove a grammar point from a user list.",
            Self::SearchSentences => "Search for example sentences in Japanese or English.",
            Self::GetSentencesForWord => "Get example sentences that use a specific vocabulary word.",
        }
    }

    /// JSON schema of the tool's arguments.
    pub fn input_schema(self) -> Arc<JsonObject> {
        match self {
            Self::GetProfile | Self::GetSchedules | Self::GetLists => {
                cached_schema_for_type::<NoParams>()
            }
            Self::GetSchedule => cached_schema_for_type::<ScheduleIdParams>(),
            Self::GetScheduleTerms => cached_schema_for_type::<ScheduleTermsParams>(),
            Self::GetList => cached_schema_for_type::<ListPageParams>(),
            Self::GetAllStudiedTerms => cached_schema_for_type::<StudiedTermsParams>(),
            Self::SearchWords | Self::SearchGrammar => cached_schema_for_type::<PagedSearchParams>(),
            Self::SearchKanji | Self::SearchSentences => cached_schema_for_type::<SearchParams>(),
            Self::GetWord | Self::GetSentencesForWord => cached_schema_for_type::<WordIdParams>(),
            Self::AddWordToSchedule | Self::RemoveWordFromSchedule => {
                cached_schema_for_type::<WordScheduleParams>()
            }
            Self::AddWordToList | Self::RemoveWordFromList => {
                cached_schema_for_type::<WordListParams>()
            }
            Self::AddWordByScheduleName => cached_schema_for_type::<WordByScheduleNameParams>(),
            Self::AddWordByListName => cached_schema_for_type::<WordByListNameParams>(),
            Self::GetKanji => cached_schema_for_type::<KanjiParams>(),
            Self::AddKanjiToSchedule | Self::RemoveKanjiFromSchedule => {
                cached_schema_for_type::<KanjiScheduleParams>()
            }
            Self::AddKanjiToList | Self::RemoveKanjiFromList => {
                cached_schema_for_type::<KanjiListParams>()
            }
            Self::GetGrammar => cached_schema_for_type::<GrammarIdParams>(),
            Self::AddGrammarToSchedule | Self::RemoveGrammarFromSchedule => {
                cached_schema_for_type::<GrammarScheduleParams>()
            }
            Self::AddGrammarToList | Self::RemoveGrammarFromList => {
                cached_schema_for_type::<GrammarListParams>()
            }
        }
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool(self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

impl std::fmt::Display for RenshuuTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
