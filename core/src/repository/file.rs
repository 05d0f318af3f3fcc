use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::debug;

use crate::model::card::CardRecord;
use crate::repository::traits::CardRepository;

const DEFAULT_FILE_NAME: &str = "cards.json";

/// Card cache kept as one pretty-printed JSON array.
#[derive(Clone)]
pub struct FileCardRepository {
    file_path: PathBuf,
}

impl FileCardRepository {
    pub fn new(data_dir: &Path) -> Result<Self> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(DEFAULT_FILE_NAME);

        if !path.exists() {
            debug!(path = %path.display(), "initializing empty card store");
            let mut writer = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(&mut writer, &Vec::<CardRecord>::new())?;
            writer.flush()?;
        }

        Ok(FileCardRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn read_records(&self) -> Result<Vec<CardRecord>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let records = serde_json::from_reader(reader)?;
        Ok(records)
    }

    fn write_records(&self, records: &[CardRecord]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        debug!(count = records.len(), "wrote card store");
        Ok(())
    }
}

impl CardRepository for FileCardRepository {
    fn list(&self) -> Result<Vec<CardRecord>> {
        self.read_records()
    }

    fn get(&self, card_id: &str) -> Result<Option<CardRecord>> {
        let records = self.read_records()?;
        Ok(records.into_iter().find(|r| r.card_id == card_id))
    }

    fn upsert(&self, record: CardRecord) -> Result<()> {
        let mut records = self.read_records()?;
        if let Some(pos) = records.iter().position(|r| r.card_id == record.card_id) {
            records[pos] = record;
        } else {
            records.push(record);
        }
        self.write_records(&records)
    }

    fn replace_all(&self, records: &[CardRecord]) -> Result<()> {
        self.write_records(records)
    }
}
