use crate::model::card::CardRecord;
use anyhow::Result;

pub trait CardRepository {
    fn list(&self) -> Result<Vec<CardRecord>>;
    fn get(&self, card_id: &str) -> Result<Option<CardRecord>>;
    fn upsert(&self, record: CardRecord) -> Result<()>;
    fn replace_all(&self, records: &[CardRecord]) -> Result<()>;
}
