use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use thiserror::Error;

use super::model::{Dataset, RawRecord};

// ---------------------------------------------------------------------------
// Data sources
// ---------------------------------------------------------------------------

/// Local dataset file, relative to the working directory.
pub const LOCAL_DATA_PATH: &str = "housing.csv";

/// Remote copy of the same file, used when the local read fails.
pub const REMOTE_DATA_URL: &str =
    "https://raw.githubusercontent.com/ageron/handson-ml2/master/datasets/housing/housing.csv";

/// Request timeout for the remote fetch.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fatal load failure: both the local and the remote source failed.
/// Carries the distinct cause of each attempt.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("dataset unavailable: local source failed ({local:#}); remote source failed ({remote:#})")]
    Unavailable {
        local: anyhow::Error,
        remote: anyhow::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load the housing dataset: `housing.csv` from disk first, the fixed HTTPS
/// mirror second. Called exactly once per session from `main`; the returned
/// [`Dataset`] is the session's read-only copy.
pub fn load_dataset() -> Result<Dataset, LoadError> {
    load_with(Path::new(LOCAL_DATA_PATH), fetch_remote)
}

/// Ordered two-step attempt, generic over the remote fetch so tests can
/// inject one. The local failure is kept and reported alongside the remote
/// failure if both paths fail.
pub fn load_with<F>(local: &Path, fetch: F) -> Result<Dataset, LoadError>
where
    F: FnOnce() -> Result<Dataset>,
{
    let local_err = match read_local(local) {
        Ok(ds) => {
            log::info!("loaded {} records from {}", ds.len(), local.display());
            return Ok(ds);
        }
        Err(e) => {
            log::warn!(
                "local dataset {} unavailable ({e:#}), falling back to remote",
                local.display()
            );
            e
        }
    };

    match fetch() {
        Ok(ds) => {
            log::info!("loaded {} records from remote source", ds.len());
            Ok(ds)
        }
        Err(remote) => Err(LoadError::Unavailable {
            local: local_err,
            remote,
        }),
    }
}

fn read_local(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    parse_records(file)
}

fn fetch_remote() -> Result<Dataset> {
    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("building HTTP client")?;
    let body = retry_once(|| download(&client))?;
    parse_records(body.as_bytes())
}

fn download(client: &reqwest::blocking::Client) -> Result<String> {
    let response = client
        .get(REMOTE_DATA_URL)
        .send()
        .context("requesting remote dataset")?
        .error_for_status()
        .context("remote dataset request")?;
    response.text().context("reading remote dataset body")
}

/// Run `attempt`; on failure, log and try exactly once more.
fn retry_once<T>(mut attempt: impl FnMut() -> Result<T>) -> Result<T> {
    match attempt() {
        Ok(v) => Ok(v),
        Err(e) => {
            log::warn!("remote fetch failed ({e:#}), retrying once");
            attempt()
        }
    }
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse the housing CSV from any reader.
///
/// Rows missing a required field, and rows the CSV decoder rejects outright,
/// are dropped and counted; the load only fails if nothing usable remains.
pub fn parse_records<R: Read>(input: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                log::debug!("row {row_no}: undecodable, dropping ({e})");
                dropped += 1;
                continue;
            }
        };
        match raw.validate() {
            Some(rec) => records.push(rec),
            None => {
                log::debug!("row {row_no}: missing required field, dropping");
                dropped += 1;
            }
        }
    }

    if dropped > 0 {
        log::warn!("dropped {dropped} rows missing required fields");
    }
    if records.is_empty() {
        bail!("no usable rows in dataset ({dropped} dropped)");
    }
    Ok(Dataset::from_records(records))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::io::Write;
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::tests::record;

    const HEADER: &str = "longitude,latitude,housing_median_age,total_rooms,total_bedrooms,population,households,median_income,median_house_value,ocean_proximity";

    fn write_csv(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn parses_well_formed_rows() {
        let file = write_csv(&[
            "-122.23,37.88,41.0,880.0,129.0,322.0,126.0,8.3252,452600.0,NEAR BAY",
            "-122.22,37.86,21.0,7099.0,1106.0,2401.0,1138.0,8.3014,358500.0,NEAR BAY",
        ]);
        let ds = read_local(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].median_house_value, 452600.0);
        assert_eq!(ds.records[1].ocean_proximity, "NEAR BAY");
    }

    #[test]
    fn drops_rows_missing_required_fields() {
        let file = write_csv(&[
            "-122.23,37.88,41.0,880.0,129.0,322.0,126.0,8.3252,452600.0,NEAR BAY",
            // median_income missing
            "-122.22,37.86,21.0,7099.0,1106.0,2401.0,1138.0,,358500.0,NEAR BAY",
            // a missing total_bedrooms is fine, the column is optional
            "-122.24,37.85,52.0,1467.0,,496.0,177.0,7.2574,352100.0,NEAR BAY",
        ]);
        let ds = read_local(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].total_bedrooms, None);
    }

    #[test]
    fn all_rows_malformed_is_a_load_failure() {
        let file = write_csv(&[",,,,,,,,,"]);
        assert!(read_local(file.path()).is_err());
    }

    #[test]
    fn local_success_never_touches_the_remote() {
        let file = write_csv(&[
            "-122.23,37.88,41.0,880.0,129.0,322.0,126.0,8.3252,452600.0,NEAR BAY",
        ]);
        let ds = load_with(file.path(), || panic!("remote fetch must not run")).unwrap();
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn local_failure_invokes_the_remote_exactly_once() {
        let calls = Cell::new(0usize);
        let missing = PathBuf::from("definitely-not-here.csv");
        let ds = load_with(&missing, || {
            calls.set(calls.get() + 1);
            Ok(Dataset::from_records(vec![record(100_000.0, 2.0, "INLAND")]))
        })
        .unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn both_sources_failing_surfaces_both_causes() {
        let missing = PathBuf::from("definitely-not-here.csv");
        let err = load_with(&missing, || bail!("mirror unreachable")).unwrap_err();
        let LoadError::Unavailable { local, remote } = err;
        assert!(local.to_string().contains("definitely-not-here.csv"));
        assert!(remote.to_string().contains("mirror unreachable"));
    }

    #[test]
    fn retry_once_recovers_from_a_single_failure() {
        let calls = Cell::new(0usize);
        let out = retry_once(|| {
            calls.set(calls.get() + 1);
            if calls.get() == 1 {
                bail!("transient")
            }
            Ok(42)
        })
        .unwrap();
        assert_eq!(out, 42);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn retry_once_gives_up_after_the_second_failure() {
        let calls = Cell::new(0usize);
        let out: Result<()> = retry_once(|| {
            calls.set(calls.get() + 1);
            bail!("still down")
        });
        assert!(out.is_err());
        assert_eq!(calls.get(), 2);
    }
}
