use crate::error::{LoadResult, Result};
use crate::models::MeasurementTable;
use crate::readers::MeasurementReader;
use crate::settings::Settings;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

struct CacheEntry {
    path: PathBuf,
    loaded_at: Instant,
    table: Arc<MeasurementTable>,
}

/// Single-entry, time-expiring cache for the loaded dataset.
///
/// The entry is keyed by source path and invalidated purely by elapsed time.
/// Callers share the cached table through an `Arc` and only ever read it.
pub struct LoadCache {
    ttl: Duration,
    reader: MeasurementReader,
    entry: Option<CacheEntry>,
}

impl LoadCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            reader: MeasurementReader::new(),
            entry: None,
        }
    }

    pub fn with_reader(ttl: Duration, reader: MeasurementReader) -> Self {
        Self {
            ttl,
            reader,
            entry: None,
        }
    }

    /// Cache for long-lived hosts, using the configured TTL and delimiter
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let reader = MeasurementReader::with_delimiter(settings.delimiter_byte()?);
        Ok(Self::with_reader(settings.cache_ttl(), reader))
    }

    pub fn get_or_load(&mut self, path: &Path) -> LoadResult<Arc<MeasurementTable>> {
        self.get_or_load_at(path, Instant::now())
    }

    /// Same as [`get_or_load`](Self::get_or_load) with an explicit clock reading
    pub fn get_or_load_at(&mut self, path: &Path, now: Instant) -> LoadResult<Arc<MeasurementTable>> {
        if let Some(entry) = &self.entry {
            if self.is_entry_fresh(entry, path, now) {
                debug!(path = %path.display(), "Load cache hit");
                return Ok(Arc::clone(&entry.table));
            }
        }

        info!(path = %path.display(), "Load cache miss, reading source");
        let table = Arc::new(self.reader.load(path)?);
        self.entry = Some(CacheEntry {
            path: path.to_path_buf(),
            loaded_at: now,
            table: Arc::clone(&table),
        });

        Ok(table)
    }

    /// Whether a call at `now` would be served without touching the source
    pub fn is_fresh_at(&self, path: &Path, now: Instant) -> bool {
        self.entry
            .as_ref()
            .is_some_and(|entry| self.is_entry_fresh(entry, path, now))
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    fn is_entry_fresh(&self, entry: &CacheEntry, path: &Path, now: Instant) -> bool {
        entry.path == path && now.saturating_duration_since(entry.loaded_at) < self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    const HEADER: &str = "date,location,lat,lon,parameter,value,unit";

    fn write_rows(file: &NamedTempFile, rows: usize) {
        let mut content = format!("{HEADER}\n");
        for i in 0..rows {
            content.push_str(&format!("2024-01-01,Site{i},1.0,2.0,pm25,{i},µg/m³\n"));
        }
        std::fs::write(file.path(), content).unwrap();
    }

    #[test]
    fn test_cache_serves_same_table_within_ttl() {
        let file = NamedTempFile::new().unwrap();
        write_rows(&file, 2);

        let mut cache = LoadCache::new(Duration::from_secs(3600));
        let start = Instant::now();

        let first = cache.get_or_load_at(file.path(), start).unwrap();
        write_rows(&file, 5);
        let second = cache
            .get_or_load_at(file.path(), start + Duration::from_secs(3599))
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 2);
    }

    #[test]
    fn test_cache_reloads_after_expiry() {
        let file = NamedTempFile::new().unwrap();
        write_rows(&file, 2);

        let mut cache = LoadCache::new(Duration::from_secs(60));
        let start = Instant::now();

        cache.get_or_load_at(file.path(), start).unwrap();
        write_rows(&file, 3);

        let later = start + Duration::from_secs(60);
        assert!(!cache.is_fresh_at(file.path(), later));
        let reloaded = cache.get_or_load_at(file.path(), later).unwrap();

        assert_eq!(reloaded.len(), 3);
        assert!(cache.is_fresh_at(file.path(), later));
    }

    #[test]
    fn test_cache_is_keyed_by_path() {
        let first_file = NamedTempFile::new().unwrap();
        let second_file = NamedTempFile::new().unwrap();
        write_rows(&first_file, 1);
        write_rows(&second_file, 4);

        let mut cache = LoadCache::new(Duration::from_secs(3600));
        let now = Instant::now();

        assert_eq!(cache.get_or_load_at(first_file.path(), now).unwrap().len(), 1);
        assert_eq!(cache.get_or_load_at(second_file.path(), now).unwrap().len(), 4);
        assert!(!cache.is_fresh_at(first_file.path(), now));
    }

    #[test]
    fn test_cache_from_settings_uses_ttl_and_delimiter() {
        let file = NamedTempFile::new().unwrap();
        std::fs::write(
            file.path(),
            "date;location;lat;lon;parameter;value\n2024-01-01;Delhi;1.0;2.0;pm25;7\n",
        )
        .unwrap();

        let settings = Settings {
            cache_ttl_secs: 10,
            delimiter: ";".to_string(),
            ..Settings::default()
        };
        let mut cache = LoadCache::from_settings(&settings).unwrap();
        let now = Instant::now();

        assert_eq!(cache.get_or_load_at(file.path(), now).unwrap().len(), 1);
        assert!(cache.is_fresh_at(file.path(), now + Duration::from_secs(9)));
        assert!(!cache.is_fresh_at(file.path(), now + Duration::from_secs(10)));
    }

    #[test]
    fn test_invalidate_forces_reload_and_errors_surface() {
        let file = NamedTempFile::new().unwrap();
        write_rows(&file, 1);

        let mut cache = LoadCache::new(Duration::from_secs(3600));
        let now = Instant::now();
        cache.get_or_load_at(file.path(), now).unwrap();

        cache.invalidate();
        assert!(!cache.is_fresh_at(file.path(), now));

        let missing = Path::new("no/such/measurements.csv");
        assert!(cache.get_or_load_at(missing, now).is_err());
    }
}
