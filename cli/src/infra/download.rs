//! HTTP download infrastructure: implements `Downloader` with `ureq`.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::Downloader;

/// Upper bound for a single download; the AWS CLI archive is ~60 MB.
const MAX_DOWNLOAD_BYTES: u64 = 512 * 1024 * 1024;

/// Blocking `ureq` client run on the blocking thread pool.
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, dest: &Path) -> Result<()> {
        let url_owned = url.to_string();
        let dest_owned: PathBuf = dest.to_path_buf();
        tracing::debug!(url, dest = %dest.display(), "downloading");
        let bytes = tokio::task::spawn_blocking(move || fetch_to_file(&url_owned, &dest_owned))
            .await
            .context("spawn_blocking for download")??;
        tracing::debug!(url, bytes, "download complete");
        Ok(())
    }
}

fn fetch_to_file(url: &str, dest: &Path) -> Result<u64> {
    let response = ureq::get(url)
        .call()
        .with_context(|| format!("failed to download {url}"))?;

    let mut file = std::fs::File::create(dest)
        .with_context(|| format!("cannot create {}", dest.display()))?;
    let mut reader = response.into_reader().take(MAX_DOWNLOAD_BYTES);
    let written = std::io::copy(&mut reader, &mut file)
        .with_context(|| format!("failed to read {url}"))?;
    file.flush()
        .with_context(|| format!("cannot write {}", dest.display()))?;
    Ok(written)
}
