use std::collections::HashSet;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use tracing::{debug, info};

use crate::model::card::{card_id_for, CardRecord};
use crate::repository::CardRepository;
use crate::settings::Settings;

/// Keeps the cached card records in step with the caller's card set.
pub struct CardService<R: CardRepository> {
    repo: R,
    refresh_interval: Duration,
}

impl<R: CardRepository> CardService<R> {
    pub fn new(repo: R, settings: &Settings) -> Self {
        Self {
            repo,
            refresh_interval: settings.refresh_interval(),
        }
    }

    /// Makes `card_numbers` the active set. Missing or stale records are
    /// regenerated for the month of `today`; records for numbers no longer in
    /// the set stay in the store but are marked inactive.
    pub fn sync(&self, card_numbers: &[String], today: NaiveDate, now: DateTime<Utc>) -> Result<Vec<CardRecord>> {
        let mut seen = HashSet::new();
        let wanted: Vec<&String> = card_numbers
            .iter()
            .filter(|n| !n.trim().is_empty())
            .filter(|n| seen.insert(card_id_for(n)))
            .collect();
        let wanted_ids: HashSet<String> = wanted.iter().map(|n| card_id_for(n)).collect();

        let mut records = self.repo.list()?;
        for record in records.iter_mut() {
            if wanted_ids.contains(&record.card_id) {
                if self.is_stale(record, today, now) {
                    info!(card_id = %record.card_id, "regenerating stale card data");
                    *record = CardRecord::generate(&record.card_number, today.year(), today.month0(), now);
                } else if !record.is_active {
                    debug!(card_id = %record.card_id, "reactivating card");
                    record.is_active = true;
                }
            } else if record.is_active {
                info!(card_id = %record.card_id, "card removed from set, marking inactive");
                record.is_active = false;
            }
        }

        for number in &wanted {
            let card_id = card_id_for(number);
            if !records.iter().any(|r| r.card_id == card_id) {
                info!(card_id = %card_id, "generating data for new card");
                records.push(CardRecord::generate(number, today.year(), today.month0(), now));
            }
        }

        self.repo.replace_all(&records)?;

        let active = wanted
            .iter()
            .filter_map(|n| {
                let id = card_id_for(n);
                records.iter().find(|r| r.card_id == id).cloned()
            })
            .collect();
        Ok(active)
    }

    pub fn all_cards(&self) -> Result<Vec<CardRecord>> {
        self.repo.list()
    }

    pub fn active_cards(&self) -> Result<Vec<CardRecord>> {
        Ok(self.repo.list()?.into_iter().filter(|r| r.is_active).collect())
    }

    /// Looks a card up by its derived id or its number.
    pub fn find(&self, query: &str) -> Result<CardRecord> {
        if let Some(record) = self.repo.get(query)? {
            return Ok(record);
        }
        self.repo
            .get(&card_id_for(query))?
            .ok_or_else(|| anyhow!("Card {} not found", query))
    }

    /// Regenerates one stored card for the month of `today`, whatever its age.
    /// The active flag is left as it was.
    pub fn refresh(&self, query: &str, today: NaiveDate, now: DateTime<Utc>) -> Result<CardRecord> {
        let existing = self.find(query)?;
        let mut record = CardRecord::generate(&existing.card_number, today.year(), today.month0(), now);
        record.is_active = existing.is_active;
        info!(card_id = %record.card_id, "refreshing card data");
        self.repo.upsert(record.clone())?;
        Ok(record)
    }

    fn is_stale(&self, record: &CardRecord, today: NaiveDate, now: DateTime<Utc>) -> bool {
        !record.covers(today) || now - record.generated_at >= self.refresh_interval
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::FileCardRepository;
    use chrono::TimeZone;
    use std::cell::RefCell;
    use tempfile::TempDir;

    struct MockCardRepo {
        records: RefCell<Vec<CardRecord>>,
    }

    impl MockCardRepo {
        fn new() -> Self {
            Self { records: RefCell::new(Vec::new()) }
        }
    }

    impl CardRepository for MockCardRepo {
        fn list(&self) -> Result<Vec<CardRecord>> {
            Ok(self.records.borrow().clone())
        }
        fn get(&self, card_id: &str) -> Result<Option<CardRecord>> {
            Ok(self.records.borrow().iter().find(|r| r.card_id == card_id).cloned())
        }
        fn upsert(&self, record: CardRecord) -> Result<()> {
            let mut records = self.records.borrow_mut();
            let pos = records.iter().position(|r| r.card_id == record.card_id);
            match pos {
                Some(pos) => records[pos] = record,
                None => records.push(record),
            }
            Ok(())
        }
        fn replace_all(&self, records: &[CardRecord]) -> Result<()> {
            *self.records.borrow_mut() = records.to_vec();
            Ok(())
        }
    }

    fn numbers(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn march_first() -> (NaiveDate, DateTime<Utc>) {
        (
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_sync_generates_new_cards() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();

        let active = service.sync(&numbers(&["4111111111111111", "5500000000000004"]), today, now).unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].card_number, "4111111111111111");
        assert_eq!(active[0].daily_spending.monthly.len(), 31);
        assert!(active.iter().all(|r| r.is_active));
    }

    #[test]
    fn test_sync_ignores_duplicates_and_blanks() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();

        let active = service.sync(&numbers(&["a", "a", " ", "b"]), today, now).unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(service.all_cards().unwrap().len(), 2);
    }

    #[test]
    fn test_sync_marks_removed_cards_inactive() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();

        service.sync(&numbers(&["a", "b"]), today, now).unwrap();
        let active = service.sync(&numbers(&["b"]), today, now).unwrap();
        assert_eq!(active.len(), 1);

        let all = service.all_cards().unwrap();
        assert_eq!(all.len(), 2);
        let a = all.iter().find(|r| r.card_number == "a").unwrap();
        assert!(!a.is_active);
        assert_eq!(service.active_cards().unwrap().len(), 1);

        // Re-adding reactivates without regenerating.
        service.sync(&numbers(&["a", "b"]), today, now + Duration::hours(1)).unwrap();
        let a = service.find("a").unwrap();
        assert!(a.is_active);
        assert_eq!(a.generated_at, now);
    }

    #[test]
    fn test_sync_regenerates_after_interval_or_month_change() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();
        service.sync(&numbers(&["a"]), today, now).unwrap();

        let fresh = service.sync(&numbers(&["a"]), today, now + Duration::hours(2)).unwrap();
        assert_eq!(fresh[0].generated_at, now);

        let later = now + Duration::hours(25);
        let refreshed = service.sync(&numbers(&["a"]), today, later).unwrap();
        assert_eq!(refreshed[0].generated_at, later);

        let april = NaiveDate::from_ymd_opt(2024, 4, 1).unwrap();
        let april_now = later + Duration::hours(1);
        let moved = service.sync(&numbers(&["a"]), april, april_now).unwrap();
        assert_eq!(moved[0].daily_spending.monthly.len(), 30);
        assert_eq!(moved[0].daily_spending.monthly[0].date, april);
    }

    #[test]
    fn test_regeneration_is_identical_for_same_period() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();
        let first = service.sync(&numbers(&["a"]), today, now).unwrap();
        let second = service.sync(&numbers(&["a"]), today, now + Duration::days(2)).unwrap();

        assert_eq!(first[0].monthly_spending, second[0].monthly_spending);
        assert_eq!(first[0].daily_spending, second[0].daily_spending);
    }

    #[test]
    fn test_find_by_number_or_id() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();
        service.sync(&numbers(&["4111111111111111"]), today, now).unwrap();

        let by_number = service.find("4111111111111111").unwrap();
        let by_id = service.find(&by_number.card_id).unwrap();
        assert_eq!(by_number, by_id);
        assert!(service.find("0000").is_err());
    }

    #[test]
    fn test_refresh_regenerates_single_card() {
        let service = CardService::new(MockCardRepo::new(), &Settings::default());
        let (today, now) = march_first();
        service.sync(&numbers(&["a", "b"]), today, now).unwrap();
        service.sync(&numbers(&["b"]), today, now).unwrap();

        let april = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap();
        let later = now + Duration::hours(1);
        let refreshed = service.refresh("a", april, later).unwrap();
        assert_eq!(refreshed.generated_at, later);
        assert_eq!(refreshed.daily_spending.monthly.len(), 30);
        assert!(!refreshed.is_active);

        // Only the refreshed card changed, and the store did not grow.
        let all = service.all_cards().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(service.find("b").unwrap().generated_at, now);
        assert_eq!(service.find(&card_id_for("a")).unwrap(), refreshed);

        assert!(service.refresh("missing", april, later).is_err());
    }

    #[test]
    fn test_sync_with_file_repository() {
        let dir = TempDir::new().unwrap();
        let repo = FileCardRepository::new(dir.path()).unwrap();
        let service = CardService::new(repo.clone(), &Settings::default());
        let (today, now) = march_first();

        service.sync(&numbers(&["a", "b"]), today, now).unwrap();
        service.sync(&numbers(&["a"]), today, now).unwrap();

        let b = repo.get(&card_id_for("b")).unwrap().unwrap();
        assert!(!b.is_active);
    }
}
