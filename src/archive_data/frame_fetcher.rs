//! Disk- and memory-cached access to flattened archive responses.

use crate::archive_data::api_client::ApiClient;
use crate::archive_data::error::ArchiveDataError;
use crate::archive_data::flatten::flatten_hourly;
use crate::types::archive_request::ArchiveRequest;
use log::{info, warn};
use polars::frame::DataFrame;
use polars::prelude::*;
use std::collections::{hash_map::Entry, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::sync::Mutex;
use tokio::{fs, task};

pub(crate) struct FrameFetcher {
    cache_dir: PathBuf,
    cache_ttl: Option<Duration>,
    api: ApiClient,
    lazyframe_cache: Mutex<HashMap<String, LazyFrame>>,
}

impl FrameFetcher {
    pub fn new(cache_dir: &Path, api: ApiClient, cache_ttl: Option<Duration>) -> Self {
        Self {
            cache_dir: cache_dir.to_path_buf(),
            cache_ttl,
            api,
            lazyframe_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Gets the flattened LazyFrame for a request, using the caches if possible.
    pub async fn get_cache_lazyframe(
        &self,
        request: &ArchiveRequest,
    ) -> Result<LazyFrame, ArchiveDataError> {
        let key = Self::cache_key(request);

        // --- Fast path: already materialized in this process ---
        {
            let cache = self.lazyframe_cache.lock().await;
            if let Some(frame) = cache.get(&key) {
                return Ok(frame.clone());
            }
            // Not in cache, release the lock before loading
        }

        // --- Slow path: disk cache or network, outside the lock ---
        let loaded_frame = self.load_frame(request, &key).await?;

        let mut cache = self.lazyframe_cache.lock().await;
        // Entry API handles the race where another task loaded it meanwhile.
        match cache.entry(key) {
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                entry.insert(loaded_frame.clone());
                Ok(loaded_frame)
            }
        }
    }

    /// Stable cache identity: digest of the canonical query parameters, so
    /// the key covers exactly what would go on the wire.
    fn cache_key(request: &ArchiveRequest) -> String {
        let canonical = ApiClient::query_params(request)
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{:x}", md5::compute(canonical))
    }

    async fn load_frame(
        &self,
        request: &ArchiveRequest,
        key: &str,
    ) -> Result<LazyFrame, ArchiveDataError> {
        let parquet_path = self.cache_dir.join(format!("hourly-{key}.parquet"));

        if self.cache_file_is_fresh(&parquet_path).await? {
            info!("Cache hit for hourly archive request at {:?}", parquet_path);
        } else {
            warn!("Cache miss for hourly archive request. Downloading and flattening.");
            let series = self.api.fetch_hourly(request).await?;
            let df = flatten_hourly(&series, &request.hourly)?;

            fs::create_dir_all(&self.cache_dir)
                .await
                .map_err(|e| ArchiveDataError::CacheDirCreation(self.cache_dir.clone(), e))?;
            Self::cache_dataframe(df, &parquet_path).await?;
            info!("Cached hourly archive data to {:?}", parquet_path);
        }

        LazyFrame::scan_parquet(&parquet_path, Default::default())
            .map_err(|e| ArchiveDataError::ParquetScan(parquet_path.clone(), e))
    }

    /// A missing file is a miss; with no TTL configured, any present file is
    /// a hit. A file older than the TTL is deleted and treated as a miss.
    async fn cache_file_is_fresh(&self, path: &Path) -> Result<bool, ArchiveDataError> {
        let metadata = match fs::metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(ArchiveDataError::CacheMetadataRead(path.to_path_buf(), e)),
        };
        let Some(ttl) = self.cache_ttl else {
            return Ok(true);
        };

        let modified = metadata
            .modified()
            .map_err(|e| ArchiveDataError::CacheMetadataRead(path.to_path_buf(), e))?;
        let age = SystemTime::now()
            .duration_since(modified)
            .map_err(|e| ArchiveDataError::CacheAgeCalculation(path.to_path_buf(), e))?;
        if age <= ttl {
            return Ok(true);
        }

        warn!("Cache file {:?} exceeded its TTL, refetching", path);
        fs::remove_file(path)
            .await
            .map_err(|e| ArchiveDataError::CacheDeletion(path.to_path_buf(), e))?;
        Ok(false)
    }

    /// Writes a DataFrame to a Parquet file via spawn_blocking; ParquetWriter
    /// needs `&mut df` and blocking I/O.
    async fn cache_dataframe(mut df: DataFrame, path: &Path) -> Result<(), ArchiveDataError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| ArchiveDataError::ParquetWriteIo(path_buf.clone(), e))?;
            ParquetWriter::new(file)
                .with_compression(ParquetCompression::Snappy)
                .finish(&mut df)
                .map_err(|e| ArchiveDataError::ParquetWritePolars(path_buf, e))?;
            Ok::<(), ArchiveDataError>(())
        })
        .await??;
        Ok(())
    }
}
