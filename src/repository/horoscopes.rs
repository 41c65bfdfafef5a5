use std::sync::Arc;

use crate::dates::DateProvider;
use crate::error::{AppError, Result};
use crate::models::{DocumentKey, Horoscope, Slot, SlotMode, Style, ZodiacSign};
use crate::store::{DocumentStore, HOROSCOPES_COLLECTION};

/// Fetching and saving horoscopes against the remote document store.
///
/// Writes are existence-checked: a non-forced save of a key that is
/// already present fails with `AlreadyExists` instead of clobbering it.
/// The check-then-write sequence is unguarded, which is acceptable for the
/// human-triggered seeding workflow this serves; concurrent seeders would
/// need a conditional create at the store level instead.
pub struct HoroscopeRepository {
    store: Arc<dyn DocumentStore>,
    dates: DateProvider,
}

impl HoroscopeRepository {
    pub fn new(store: Arc<dyn DocumentStore>, dates: DateProvider) -> Self {
        Self { store, dates }
    }

    /// Fetch one horoscope by its components. Absent keys and documents
    /// that fail to decode are both `Ok(None)`.
    pub async fn fetch(
        &self,
        date: &str,
        sign: ZodiacSign,
        style: Style,
        slot: Slot,
    ) -> Result<Option<Horoscope>> {
        let key = DocumentKey::new(date, sign, style, slot).to_string();
        let Some(doc) = self.store.get(HOROSCOPES_COLLECTION, &key).await? else {
            return Ok(None);
        };

        match Horoscope::from_document(&doc) {
            Some(horoscope) => Ok(Some(horoscope)),
            None => {
                tracing::warn!("Undecodable horoscope document at {}", key);
                Ok(None)
            }
        }
    }

    /// Fetch today's horoscope, picking the slot that matches the delivery
    /// mode: the fixed daily slot, or the slot covering the current hour.
    pub async fn fetch_today(
        &self,
        sign: ZodiacSign,
        style: Style,
        mode: SlotMode,
    ) -> Result<Option<Horoscope>> {
        let slot = match mode {
            SlotMode::Daily => Slot::Daily,
            SlotMode::Triple => Slot::for_hour(self.dates.current_hour()),
        };
        self.fetch(&self.dates.today_string(), sign, style, slot)
            .await
    }

    pub async fn exists(
        &self,
        date: &str,
        sign: ZodiacSign,
        style: Style,
        slot: Slot,
    ) -> Result<bool> {
        let key = DocumentKey::new(date, sign, style, slot).to_string();
        self.store.exists(HOROSCOPES_COLLECTION, &key).await
    }

    /// Save one horoscope. Without `force_overwrite`, fails with
    /// `AlreadyExists` when the key is present.
    pub async fn save(&self, horoscope: &Horoscope, force_overwrite: bool) -> Result<()> {
        let key = horoscope.document_key().to_string();

        if !force_overwrite && self.store.exists(HOROSCOPES_COLLECTION, &key).await? {
            return Err(AppError::AlreadyExists);
        }

        self.store
            .set(HOROSCOPES_COLLECTION, &key, horoscope.to_document(), false)
            .await
    }

    /// Save several horoscopes in one atomic commit, returning how many
    /// were actually written. Existence checks run one key at a time
    /// before the commit, so the sequence as a whole is not atomic; a
    /// concurrent writer could slip in between check and commit.
    pub async fn save_batch(
        &self,
        horoscopes: &[Horoscope],
        force_overwrite: bool,
    ) -> Result<usize> {
        let mut writes = Vec::with_capacity(horoscopes.len());
        for horoscope in horoscopes {
            let key = horoscope.document_key().to_string();
            if !force_overwrite && self.store.exists(HOROSCOPES_COLLECTION, &key).await? {
                tracing::debug!("Skipping existing document {}", key);
                continue;
            }
            writes.push((key, horoscope.to_document()));
        }

        let written = writes.len();
        if written > 0 {
            self.store.batch_set(HOROSCOPES_COLLECTION, writes).await?;
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;
    use chrono::NaiveDate;

    fn repo() -> (Arc<MemoryDocumentStore>, HoroscopeRepository) {
        let store = Arc::new(MemoryDocumentStore::new());
        let dates = DateProvider::fixed(NaiveDate::from_ymd_opt(2026, 8, 6).unwrap(), 9);
        (store.clone(), HoroscopeRepository::new(store, dates))
    }

    fn sample(message: &str) -> Horoscope {
        Horoscope::new(
            "2026-08-06",
            ZodiacSign::Leo,
            Style::Plain,
            Slot::Daily,
            message,
        )
    }

    #[tokio::test]
    async fn fetch_absent_is_none() {
        let (_store, repo) = repo();
        let fetched = repo
            .fetch("2026-08-06", ZodiacSign::Leo, Style::Plain, Slot::Daily)
            .await
            .unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn non_forced_save_is_idempotent() {
        let (store, repo) = repo();
        repo.save(&sample("first"), false).await.unwrap();

        let second = repo.save(&sample("second"), false).await;
        assert!(matches!(second, Err(AppError::AlreadyExists)));
        assert_eq!(store.len(HOROSCOPES_COLLECTION), 1);

        let kept = repo
            .fetch("2026-08-06", ZodiacSign::Leo, Style::Plain, Slot::Daily)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.message, "first");
    }

    #[tokio::test]
    async fn forced_save_overwrites() {
        let (store, repo) = repo();
        repo.save(&sample("first"), false).await.unwrap();
        repo.save(&sample("second"), true).await.unwrap();

        assert_eq!(store.len(HOROSCOPES_COLLECTION), 1);
        let kept = repo
            .fetch("2026-08-06", ZodiacSign::Leo, Style::Plain, Slot::Daily)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.message, "second");
    }

    #[tokio::test]
    async fn batch_save_skips_existing_keys() {
        let (store, repo) = repo();
        let items: Vec<Horoscope> = ZodiacSign::ALL
            .into_iter()
            .map(|sign| {
                Horoscope::new("2026-08-06", sign, Style::Plain, Slot::Daily, "msg")
            })
            .collect();

        assert_eq!(repo.save_batch(&items, false).await.unwrap(), 12);
        assert_eq!(repo.save_batch(&items, false).await.unwrap(), 0);
        assert_eq!(store.len(HOROSCOPES_COLLECTION), 12);
        assert_eq!(repo.save_batch(&items, true).await.unwrap(), 12);
        assert!(repo
            .exists("2026-08-06", ZodiacSign::Leo, Style::Plain, Slot::Daily)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn save_stamps_server_time() {
        let (_store, repo) = repo();
        repo.save(&sample("msg"), false).await.unwrap();
        let fetched = repo
            .fetch("2026-08-06", ZodiacSign::Leo, Style::Plain, Slot::Daily)
            .await
            .unwrap()
            .unwrap();
        assert!(fetched.created_at.is_some());
    }
}
