//! Loading a dataset from CSV text, a local file, or a URL.
//!
//! The first CSV row is the header. Headers are trimmed and lower-cased so
//! predicates can name columns regardless of how the source spells them.
//! Each column is coerced once: numeric if every non-empty cell parses as
//! `f64`, text otherwise.
//!
//! The public entry points that take a *source* never fail. Any fetch, read
//! or parse error is logged and turned into an empty [`Dataset`] with a
//! diagnostic, so the dashboards always have something to filter.

use crate::error::{DataError, Result};
use crate::value::{normalize_column_name, Column, ColumnKind, Value};
use crate::Dataset;
use flate2::read::GzDecoder;
use std::collections::HashSet;
use std::fmt::Display;
use std::io::Read;
use std::path::Path;

/// What a load attempt produced.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    /// Where the data came from (path or URL), for messages.
    pub source: String,
    /// The loaded table, or [`Dataset::empty`] on failure.
    pub dataset: Dataset,
    /// Set when loading failed and the dataset is the empty fallback.
    pub diagnostic: Option<String>,
}

impl LoadOutcome {
    pub fn is_fallback(&self) -> bool {
        self.diagnostic.is_some()
    }
}

/// Parse CSV text (with a header row) into a dataset.
///
/// # Example CSV
/// ```text
/// total_bill,tip,sex,smoker,day,time,size
/// 16.99,1.01,Female,No,Sun,Dinner,2
/// ```
pub fn parse_csv(csv_data: &str) -> Result<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(csv_data.as_bytes());

    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for raw in rdr.headers()?.iter() {
        let name = normalize_column_name(raw);
        if !seen.insert(name.clone()) {
            return Err(DataError::DuplicateColumn(name));
        }
        names.push(name);
    }
    if names.is_empty() || names.iter().all(String::is_empty) {
        return Err(DataError::MissingHeader);
    }

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        // Skip blank lines that slipped through as a single empty field
        if record.len() == 1 && record.get(0).is_some_and(|f| f.trim().is_empty()) {
            continue;
        }
        raw_rows.push(record.iter().map(str::to_string).collect());
    }

    let kinds: Vec<ColumnKind> = (0..names.len())
        .map(|i| infer_kind(raw_rows.iter().filter_map(|r| r.get(i))))
        .collect();

    let rows: Vec<Vec<Value>> = raw_rows
        .iter()
        .map(|r| {
            kinds
                .iter()
                .enumerate()
                .map(|(i, kind)| coerce(r.get(i).map(String::as_str), *kind))
                .collect()
        })
        .collect();

    let columns = names
        .into_iter()
        .zip(kinds)
        .map(|(name, kind)| Column { name, kind })
        .collect();

    let dataset = Dataset::from_rows(columns, rows)?;
    log::info!(
        "[Dash Debug] loader: Loaded {} rows x {} columns",
        dataset.row_count(),
        dataset.columns().len()
    );
    Ok(dataset)
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a String>) -> ColumnKind {
    let mut any = false;
    for cell in cells {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        any = true;
        if cell.parse::<f64>().is_err() {
            return ColumnKind::Text;
        }
    }
    if any {
        ColumnKind::Numeric
    } else {
        ColumnKind::Text
    }
}

fn coerce(cell: Option<&str>, kind: ColumnKind) -> Value {
    match cell {
        None => Value::Missing,
        Some(c) if c.trim().is_empty() => Value::Missing,
        Some(c) => match kind {
            ColumnKind::Numeric => c
                .trim()
                .parse::<f64>()
                .map(Value::Number)
                .unwrap_or(Value::Missing),
            ColumnKind::Text => Value::Text(c.to_string()),
        },
    }
}

/// Turn a fetched body into text, inflating it first if `source` ends in `.gz`.
pub fn decode_body(bytes: Vec<u8>, source: &str) -> Result<String> {
    if is_gzip(source) {
        let mut text = String::new();
        GzDecoder::new(bytes.as_slice()).read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(String::from_utf8(bytes)?)
    }
}

fn is_gzip(source: &str) -> bool {
    let path = source.split(['?', '#']).next().unwrap_or(source);
    path.to_ascii_lowercase().ends_with(".gz")
}

/// Parse fetched text, or fall back to an empty dataset.
///
/// `fetched` is whatever the transport produced: the browser bridge hands in
/// a `Result<String, String>`, the native fetcher a `Result<String, DataError>`.
pub fn load_or_empty<E: Display>(source: &str, fetched: std::result::Result<String, E>) -> LoadOutcome {
    let parsed = match fetched {
        Ok(text) => parse_csv(&text).map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    match parsed {
        Ok(dataset) => LoadOutcome {
            source: source.to_string(),
            dataset,
            diagnostic: None,
        },
        Err(e) => {
            let message = format!("Failed to load dataset from {}: {}", source, e);
            log::warn!("[Dash] loader: {}", message);
            LoadOutcome {
                source: source.to_string(),
                dataset: Dataset::empty(),
                diagnostic: Some(message),
            }
        }
    }
}

/// Read a local CSV (optionally gzip-compressed).
pub fn load_path(path: impl AsRef<Path>) -> LoadOutcome {
    let path = path.as_ref();
    let source = path.display().to_string();
    let text = std::fs::read(path)
        .map_err(DataError::from)
        .and_then(|bytes| decode_body(bytes, &source));
    load_or_empty(&source, text)
}

/// Whether `source` names an HTTP resource rather than a file.
pub fn is_url(source: &str) -> bool {
    let lower = source.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Fetch a CSV over HTTP. Non-success statuses count as failures.
#[cfg(feature = "api")]
pub async fn fetch(url: &str) -> LoadOutcome {
    load_or_empty(url, fetch_text(url).await)
}

#[cfg(feature = "api")]
async fn fetch_text(url: &str) -> Result<String> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(DataError::HttpStatus {
            status: response.status().to_string(),
            url: url.to_string(),
        });
    }
    let bytes = response.bytes().await?;
    decode_body(bytes.to_vec(), url)
}

/// Load from a URL or a local path, whichever `source` is.
#[cfg(feature = "api")]
pub async fn load_source(source: &str) -> LoadOutcome {
    if is_url(source) {
        fetch(source).await
    } else {
        load_path(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    const TITANIC: &str = include_str!("../../fixtures/titanic_sample.csv");
    const TIPS: &str = include_str!("../../fixtures/tips_sample.csv");

    // ───────────────────── parse_csv tests ─────────────────────

    #[test]
    fn headers_are_normalized() {
        let ds = parse_csv(TITANIC).unwrap();
        let names: Vec<&str> = ds.columns().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "passengerid", "survived", "pclass", "name", "sex", "age", "sibsp", "parch",
                "ticket", "fare", "cabin", "embarked"
            ]
        );
        let ds = parse_csv("  Total_Bill , TIP\n1,2\n").unwrap();
        assert!(ds.column("total_bill").is_some());
        assert!(ds.column("tip").is_some());
    }

    #[test]
    fn column_kinds_are_inferred() {
        let ds = parse_csv(TITANIC).unwrap();
        let kind = |name: &str| ds.column(name).unwrap().kind;
        assert_eq!(kind("pclass"), ColumnKind::Numeric);
        assert_eq!(kind("age"), ColumnKind::Numeric);
        assert_eq!(kind("fare"), ColumnKind::Numeric);
        assert_eq!(kind("sex"), ColumnKind::Text);
        // Mixed "A/5 21171" and "113803" stays text
        assert_eq!(kind("ticket"), ColumnKind::Text);
    }

    #[test]
    fn quoted_fields_and_missing_cells() {
        let ds = parse_csv(TITANIC).unwrap();
        assert_eq!(ds.row_count(), 20);
        let view = ds.all_rows();
        let names: Vec<String> = view.values("name").map(Value::key).collect();
        assert_eq!(names[0], "Braund, Mr. Owen Harris");
        let ages: Vec<&Value> = view.values("age").collect();
        assert_eq!(*ages[5], Value::Missing);
        assert_eq!(*ages[0], Value::Number(22.0));
    }

    #[test]
    fn header_only_input_has_columns_but_no_rows() {
        let ds = parse_csv("a,b,c\n").unwrap();
        assert_eq!(ds.columns().len(), 3);
        assert!(ds.is_empty());
    }

    #[test]
    fn empty_input_is_missing_header() {
        assert!(matches!(parse_csv(""), Err(DataError::MissingHeader)));
    }

    #[test]
    fn duplicate_normalized_headers_are_rejected() {
        match parse_csv("Age,age \n1,2\n") {
            Err(DataError::DuplicateColumn(name)) => assert_eq!(name, "age"),
            other => panic!("expected duplicate column error, got {other:?}"),
        }
    }

    #[test]
    fn tips_fixture_loads() {
        let ds = parse_csv(TIPS).unwrap();
        assert_eq!(ds.row_count(), 18);
        assert_eq!(ds.column("total_bill").unwrap().kind, ColumnKind::Numeric);
        assert_eq!(ds.column("day").unwrap().kind, ColumnKind::Text);
    }

    // ───────────────────── fallback tests ─────────────────────

    #[test]
    fn fetch_error_yields_empty_dataset_with_diagnostic() {
        let outcome = load_or_empty("https://example.invalid/x.csv", Err::<String, _>("HTTP 404"));
        assert!(outcome.is_fallback());
        assert!(outcome.dataset.is_empty());
        assert!(outcome.dataset.columns().is_empty());
        let msg = outcome.diagnostic.unwrap();
        assert!(msg.contains("example.invalid"));
        assert!(msg.contains("HTTP 404"));
    }

    #[test]
    fn parse_error_yields_empty_dataset() {
        let outcome = load_or_empty("inline", Ok::<_, String>("a,A\n1,2\n".to_string()));
        assert!(outcome.is_fallback());
        assert!(outcome.dataset.is_empty());
    }

    #[test]
    fn successful_load_has_no_diagnostic() {
        let outcome = load_or_empty("inline", Ok::<_, String>(TIPS.to_string()));
        assert!(!outcome.is_fallback());
        assert_eq!(outcome.dataset.row_count(), 18);
    }

    #[test]
    fn missing_file_falls_back() {
        let outcome = load_path("/definitely/not/here/titanic.csv");
        assert!(outcome.is_fallback());
        assert!(outcome.dataset.is_empty());
    }

    #[test]
    fn local_file_loads() {
        let path = std::env::temp_dir().join(format!("dash-data-tips-{}.csv", std::process::id()));
        std::fs::write(&path, TIPS).unwrap();
        let outcome = load_path(&path);
        std::fs::remove_file(&path).ok();
        assert!(!outcome.is_fallback(), "{:?}", outcome.diagnostic);
        assert_eq!(outcome.dataset.row_count(), 18);
    }

    // ───────────────────── decode_body tests ─────────────────────

    #[test]
    fn gzip_bodies_are_inflated() {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(TIPS.as_bytes()).unwrap();
        let gz = encoder.finish().unwrap();

        let text = decode_body(gz, "https://host/data/tips.csv.gz?v=2").unwrap();
        assert_eq!(text, TIPS);
    }

    #[test]
    fn plain_bodies_must_be_utf8() {
        assert!(matches!(
            decode_body(vec![0xff, 0xfe, 0x00], "tips.csv"),
            Err(DataError::Utf8(_))
        ));
    }

    #[test]
    fn url_detection() {
        assert!(is_url("https://raw.githubusercontent.com/x.csv"));
        assert!(is_url("HTTP://host/x.csv"));
        assert!(!is_url("fixtures/tips_sample.csv"));
    }

    // ───────────────────── fetch tests ─────────────────────

    #[cfg(feature = "api")]
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/titanic.csv", addr)
    }

    #[cfg(feature = "api")]
    #[tokio::test]
    async fn non_success_status_falls_back_to_empty() {
        let url = serve_once(
            "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        )
        .await;
        let outcome = fetch(&url).await;
        assert!(outcome.dataset.is_empty());
        let msg = outcome.diagnostic.expect("diagnostic");
        assert!(msg.contains("404"), "{msg}");
    }

    #[cfg(feature = "api")]
    #[tokio::test]
    async fn successful_fetch_loads_rows() {
        let url = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/csv\r\nContent-Length: 27\r\nConnection: close\r\n\r\npclass,sex,age\n1,male,30.0\n",
        )
        .await;
        let outcome = fetch(&url).await;
        assert!(!outcome.is_fallback(), "{:?}", outcome.diagnostic);
        assert_eq!(outcome.dataset.row_count(), 1);
    }
}
