//! quiz persistence in workers kv
//!
//! keys:
//!     quiz:{id}   full StoredQuiz json
//!     url:{url}   id of the quiz generated for that url
//!     history     Vec<HistoryEntry>, newest first
//!     next_id     next id to hand out
//!
//! kv is eventually consistent and has no transactions, so two generations
//! racing on `next_id` can collide. acceptable for a single-user demo.

use serde::{Deserialize, Serialize};
use shared::{HistoryEntry, Quiz};
use worker::kv::KvStore;
use worker::*;

/// kv namespace binding name in wrangler.toml
pub const KV_BINDING: &str = "QUIZZES";

const HISTORY_KEY: &str = "history";
const NEXT_ID_KEY: &str = "next_id";

/// everything kept about one generated quiz
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuiz {
    pub id: u64,
    pub url: String,
    pub title: String,
    /// iso-8601
    pub date_generated: String,
    pub scraped_content: String,
    pub quiz_data: Quiz,
}

impl StoredQuiz {
    pub fn entry(&self) -> HistoryEntry {
        HistoryEntry {
            id: self.id,
            title: self.title.clone(),
            url: self.url.clone(),
            date_generated: Some(self.date_generated.clone()),
        }
    }
}

fn quiz_key(id: u64) -> String {
    format!("quiz:{}", id)
}

fn url_key(url: &str) -> String {
    format!("url:{}", url)
}

/// put `entry` first, dropping any older row with the same id
fn push_history(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) {
    history.retain(|row| row.id != entry.id);
    history.insert(0, entry);
}

pub struct QuizStore {
    kv: KvStore,
}

impl QuizStore {
    pub fn open(env: &Env) -> Result<Self> {
        Ok(Self { kv: env.kv(KV_BINDING)? })
    }

    pub async fn get(&self, id: u64) -> Result<Option<StoredQuiz>> {
        Ok(self.kv.get(&quiz_key(id)).json::<StoredQuiz>().await?)
    }

    /// quiz previously generated for exactly this url
    pub async fn find_by_url(&self, url: &str) -> Result<Option<StoredQuiz>> {
        let id = match self.kv.get(&url_key(url)).text().await? {
            Some(raw) => raw.parse::<u64>().ok(),
            None => None,
        };

        match id {
            Some(id) => self.get(id).await,
            None => Ok(None),
        }
    }

    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        Ok(self
            .kv
            .get(HISTORY_KEY)
            .json::<Vec<HistoryEntry>>()
            .await?
            .unwrap_or_default())
    }

    /// persist a fresh quiz and list it at the top of the history
    pub async fn insert(&self, url: &str, scraped_content: String, quiz: Quiz) -> Result<StoredQuiz> {
        let id = self.next_id().await?;

        let record = StoredQuiz {
            id,
            url: url.to_string(),
            title: quiz.title.clone(),
            date_generated: String::from(js_sys::Date::new_0().to_iso_string()),
            scraped_content,
            quiz_data: quiz,
        };

        let json = serde_json::to_string(&record)?;
        self.kv.put(&quiz_key(id), json)?.execute().await?;
        self.kv.put(&url_key(url), id.to_string())?.execute().await?;

        let mut history = self.history().await?;
        push_history(&mut history, record.entry());
        self.kv
            .put(HISTORY_KEY, serde_json::to_string(&history)?)?
            .execute()
            .await?;

        Ok(record)
    }

    async fn next_id(&self) -> Result<u64> {
        let id = self
            .kv
            .get(NEXT_ID_KEY)
            .text()
            .await?
            .and_then(|raw| raw.parse::<u64>().ok())
            .unwrap_or(1);

        self.kv.put(NEXT_ID_KEY, (id + 1).to_string())?.execute().await?;
        Ok(id)
    }
}

// ==============================================================================
// tests
// ==============================================================================
