use crate::input::read_records;
use crate::render;
use anyhow::{Context, anyhow, bail};
use chrono::Utc;
use plasmid_client::{ApiClient, BagListing};
use plasmid_core::record::format_volume_entry;
use plasmid_core::{AppConfig, Inventory, PlasmidRecord, RecordId, SortKey, Volume, sort_records};
use plasmid_search::{SearchQuery, search};
use std::path::Path;

pub(crate) struct App {
    pub config: AppConfig,
    pub client: ApiClient,
}

/// Builds the inventory from a backend listing. Stored records whose id or
/// bag cannot be read are reported and left out.
fn load_inventory(listing: BagListing) -> anyhow::Result<Inventory> {
    let groups = listing.into_iter().map(|(group, records)| {
        let readable: Vec<PlasmidRecord> = records
            .into_iter()
            .filter(|record| {
                let readable = record.record_id().is_some() && record.bag_name().is_some();
                if !readable {
                    log::warn!(
                        "skipping stored record {} in '{group}': unreadable id or bag",
                        record.full_id()
                    );
                }
                readable
            })
            .collect();
        (group, readable)
    });
    Inventory::from_bags(groups).context("backend listing is inconsistent")
}

/// Converts a 1-based sample number to an index.
fn sample_index(sample: usize) -> anyhow::Result<usize> {
    sample
        .checked_sub(1)
        .ok_or_else(|| anyhow!("sample numbers start at 1"))
}

pub(crate) fn validate(path: &Path) -> anyhow::Result<bool> {
    let records = read_records(path)?;
    let mut all_valid = true;
    for record in &records {
        all_valid &= record.is_valid();
        println!("{}", render::validation(record));
    }
    Ok(all_valid)
}

impl App {
    fn inventory(&self) -> anyhow::Result<Inventory> {
        load_inventory(self.client.fetch_all_bags()?)
    }

    fn stored(&self, inventory: &Inventory, id: &str) -> anyhow::Result<PlasmidRecord> {
        let id: RecordId = id.parse()?;
        inventory
            .get(id)
            .cloned()
            .ok_or_else(|| anyhow!("record {id} not found"))
    }

    pub(crate) fn bags(&self, sort: SortKey) -> anyhow::Result<()> {
        let inventory = self.inventory()?;
        for bag in inventory.bags() {
            let mut records: Vec<PlasmidRecord> = bag.records.into_iter().cloned().collect();
            sort_records(&mut records, sort);
            println!("{}", render::bag(bag.name.as_ref(), &records));
        }
        println!(
            "{} records in {} bags, {} mL total",
            inventory.len(),
            inventory.bag_names().count(),
            inventory.total_volume()
        );
        Ok(())
    }

    pub(crate) fn search(&self, query: &str, remote: bool) -> anyhow::Result<()> {
        if remote {
            let summary = self.client.search(query)?;
            println!("{}", render::summary(&summary));
            return Ok(());
        }

        let inventory = self.inventory()?;
        let results = search(&inventory, &SearchQuery::parse(query));
        if results.is_empty() {
            println!("no records match '{}'", query.trim());
        }
        for bag in results.bags() {
            println!("{}", render::bag(bag.name.as_ref(), bag.records.iter().copied()));
        }
        Ok(())
    }

    pub(crate) fn add(&self, path: &Path) -> anyhow::Result<()> {
        let records = read_records(path)?;
        let max = self.config.records.max_samples_per_record;
        if let Some(record) = records.iter().find(|r| r.samples().len() > max) {
            bail!("record {} has more than {max} samples", record.full_id());
        }
        let message = self.client.add(&records)?;
        log::info!("added {} records", records.len());
        if !message.is_empty() {
            println!("{message}");
        }
        Ok(())
    }

    pub(crate) fn check_out(
        &self,
        id: &str,
        sample: usize,
        user: Option<String>,
    ) -> anyhow::Result<()> {
        let user = user
            .or_else(|| self.config.user.name.clone())
            .context("no user given; pass --user or set user.name in the config")?;
        let index = sample_index(sample)?;
        let stored = self.stored(&self.inventory()?, id)?;
        // Rejects unknown samples and double checkouts before the request.
        stored.check_out(index, &user, Utc::now())?;

        let message = self.client.check_out(&stored, index, &user)?;
        log::info!("sample {sample} of {id} checked out by {user}");
        if !message.is_empty() {
            println!("{message}");
        }
        Ok(())
    }

    pub(crate) fn check_in(
        &self,
        id: &str,
        sample: usize,
        volume: Option<String>,
    ) -> anyhow::Result<()> {
        let index = sample_index(sample)?;
        let stored = self.stored(&self.inventory()?, id)?;
        let volume = volume
            .map(|v| Volume::from(format_volume_entry(&v)))
            .unwrap_or_default();
        let returned = stored.check_in(index, volume, Utc::now())?;

        let message = self.client.check_in(&returned, index)?;
        log::info!("sample {sample} of {id} checked in");
        if !message.is_empty() {
            println!("{message}");
        }
        Ok(())
    }

    pub(crate) fn checked_out(&self) -> anyhow::Result<()> {
        let inventory = load_inventory(self.client.checked_out()?)?;
        if inventory.is_empty() {
            println!("no samples are checked out");
        }
        for bag in inventory.bags() {
            println!("{}", render::bag(bag.name.as_ref(), bag.records));
        }
        Ok(())
    }

    fn report_health(&self) -> bool {
        let api = self.client.health();
        let database = self.client.database_health();
        println!("API ({}): {api}", self.client.base_url());
        println!("database: {database}");
        api.is_connected() && database.is_connected()
    }

    /// One check, or a check every `health.poll_interval_secs` until interrupted.
    pub(crate) fn health(&self, watch: bool) -> anyhow::Result<()> {
        if !watch {
            if !self.report_health() {
                bail!("backend is not healthy");
            }
            return Ok(());
        }
        let interval = self.config.health.poll_interval();
        log::info!("polling every {}s", interval.as_secs());
        loop {
            if !self.report_health() {
                log::warn!("backend is not healthy");
            }
            std::thread::sleep(interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(lot: &str, bag: &str) -> PlasmidRecord {
        PlasmidRecord::from_json(serde_json::json!({
            "lot": lot, "sublot": "1", "bag": bag, "samples": ["1.0"]
        }))
    }

    #[test]
    fn test_unreadable_stored_records_are_skipped() {
        let mut listing = BagListing::new();
        listing.insert(
            "C1".to_string(),
            vec![stored("42", "C1"), stored("0042", "C1"), stored("43", "bag?")],
        );

        let inventory = load_inventory(listing).unwrap();

        assert_eq!(inventory.len(), 1);
        assert!(inventory.get("42-1".parse().unwrap()).is_some());
    }

    #[test]
    fn test_duplicate_stored_ids_still_fail() {
        let mut listing = BagListing::new();
        listing.insert("C1".to_string(), vec![stored("42", "C1")]);
        listing.insert("C2".to_string(), vec![stored("42", "C2")]);

        let err = load_inventory(listing).unwrap_err();

        assert!(format!("{err:#}").contains("42-1"));
    }

    #[test]
    fn test_sample_numbers_are_one_based() {
        assert_eq!(sample_index(1).unwrap(), 0);
        assert_eq!(sample_index(3).unwrap(), 2);
        assert!(sample_index(0).is_err());
    }

    #[test]
    fn test_validate_reports_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"[{"lot": "12", "sublot": "1", "bag": "C1", "samples": ["1.0"]},
                {"lot": "012", "sublot": "1", "bag": "C1", "samples": ["1.0"]}]"#,
        )
        .unwrap();

        assert!(!validate(&path).unwrap());
    }
}
