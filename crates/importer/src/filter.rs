//! Single-pass streaming filter over a raw SQL dump.
//!
//! The raw export is a multi-gigabyte text dump; only the configured tables'
//! schemas and a small slice of their rows matter. The filter scans forward
//! once, reproduces each configured table as `DROP TABLE IF EXISTS` + its
//! `CREATE TABLE` + one consolidated filtered `INSERT`, and stops as soon as
//! every configured table has been fully captured.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{ImporterError, Result};

/// Per-table row predicate applied to INSERT value tuples.
#[derive(Debug, Clone)]
pub enum TableFilter {
    /// Keep rows whose last column equals 1. Used for the rank tables, where
    /// the trailing `countryRank` flags the nationally relevant rows.
    FlagColumnEqualsOne,
    /// Keep rows containing the token verbatim. Used for the identity table,
    /// where the token is the country id.
    ContainsToken(String),
}

/// Ordered `table -> filter` mapping. Order controls emission order.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    tables: Vec<(String, TableFilter)>,
}

impl FilterConfig {
    pub fn new(tables: Vec<(String, TableFilter)>) -> Self {
        Self { tables }
    }

    /// The standard configuration: both rank tables keep only flagged rows,
    /// the identity table keeps the configured country's competitors.
    pub fn national_records(country: &str) -> Self {
        Self::new(vec![
            ("RanksSingle".to_string(), TableFilter::FlagColumnEqualsOne),
            ("RanksAverage".to_string(), TableFilter::FlagColumnEqualsOne),
            (
                "Persons".to_string(),
                TableFilter::ContainsToken(country.to_string()),
            ),
        ])
    }

    pub fn tables(&self) -> &[(String, TableFilter)] {
        &self.tables
    }
}

/// Capture progress for one configured table.
#[derive(Debug, Clone, Copy, Default)]
pub struct TableFlags {
    pub create_processed: bool,
    pub insert_processed: bool,
}

/// Per-table capture flags for a completed pass. An incomplete report means
/// the dump ended before some table's markers; loading such a dump would build
/// a partial database, so the load stage treats it as fatal.
#[derive(Debug, Clone)]
pub struct FilterReport {
    tables: Vec<(String, TableFlags)>,
}

impl FilterReport {
    fn new(config: &FilterConfig) -> Self {
        Self {
            tables: config
                .tables
                .iter()
                .map(|(name, _)| (name.clone(), TableFlags::default()))
                .collect(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.tables
            .iter()
            .all(|(_, flags)| flags.create_processed && flags.insert_processed)
    }

    pub fn missing_tables(&self) -> Vec<&str> {
        self.tables
            .iter()
            .filter(|(_, flags)| !flags.create_processed || !flags.insert_processed)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn flags_for(&self, table: &str) -> Option<TableFlags> {
        self.tables
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, flags)| *flags)
    }

    pub fn ensure_complete(&self) -> Result<()> {
        if self.is_complete() {
            return Ok(());
        }
        Err(ImporterError::IncompleteDump(format!(
            "no complete capture for table(s): {}",
            self.missing_tables().join(", ")
        )))
    }
}

// Prefixes and markers are precomputed so the per-line scan allocates nothing
// on non-matching lines.
struct TableMatcher {
    name: String,
    create_prefix: String,
    insert_prefix: String,
    keys_marker: String,
    filter: TableFilter,
}

impl TableMatcher {
    fn new(name: &str, filter: TableFilter) -> Self {
        Self {
            name: name.to_string(),
            create_prefix: format!("CREATE TABLE `{name}`"),
            insert_prefix: format!("INSERT INTO `{name}`"),
            keys_marker: format!("ALTER TABLE `{name}` ENABLE KEYS"),
            filter,
        }
    }
}

enum ScanState {
    Idle,
    InCreate {
        table: usize,
    },
    InInsert {
        table: usize,
        prefix: String,
        rows: Vec<String>,
    },
}

/// Runs the filtering pass, writing the reduced dump to `output`.
///
/// Filtering an already-filtered dump with the same configuration yields
/// byte-identical output (though such a dump lacks the `ENABLE KEYS` markers,
/// so its report is never complete).
pub fn filter_dump<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &FilterConfig,
) -> Result<FilterReport> {
    let matchers: Vec<TableMatcher> = config
        .tables
        .iter()
        .map(|(name, filter)| TableMatcher::new(name, filter.clone()))
        .collect();
    let mut report = FilterReport::new(config);
    let mut state = ScanState::Idle;

    for matcher in &matchers {
        writeln!(output, "DROP TABLE IF EXISTS `{}`;", matcher.name)?;
    }

    // Byte-wise line reads: dumps may contain non-UTF-8 noise in free-text
    // columns and a single bad row must not abort the pass.
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim();

        state = match state {
            ScanState::Idle => scan_idle(line, &matchers, output)?,
            ScanState::InCreate { table } => {
                scan_create(line, table, &matchers, &mut report, output)?
            }
            ScanState::InInsert {
                table,
                prefix,
                rows,
            } => scan_insert(line, table, prefix, rows, &matchers, output)?,
        };

        for (idx, matcher) in matchers.iter().enumerate() {
            if line.contains(&matcher.keys_marker) {
                info!("Processed all INSERT statements for table `{}`", matcher.name);
                report.tables[idx].1.insert_processed = true;
            }
        }

        // The rest of the dump is irrelevant once every table is captured.
        if report.is_complete() {
            break;
        }
    }

    Ok(report)
}

/// Convenience wrapper reading from and writing to files.
pub fn filter_dump_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    config: &FilterConfig,
) -> Result<FilterReport> {
    let input = input.as_ref();
    let output = output.as_ref();
    info!(
        "Filtering SQL dump {} into {}",
        input.display(),
        output.display()
    );
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);
    let report = filter_dump(reader, &mut writer, config)?;
    writer.flush()?;
    info!(
        "Finished filtering SQL dump; complete: {}",
        report.is_complete()
    );
    Ok(report)
}

fn scan_idle<W: Write>(
    line: &str,
    matchers: &[TableMatcher],
    output: &mut W,
) -> Result<ScanState> {
    for (idx, matcher) in matchers.iter().enumerate() {
        if line.starts_with(&matcher.create_prefix) {
            writeln!(output, "{line}")?;
            return Ok(ScanState::InCreate { table: idx });
        }
        if line.starts_with(&matcher.insert_prefix) {
            return Ok(ScanState::InInsert {
                table: idx,
                prefix: line.to_string(),
                rows: Vec::new(),
            });
        }
    }
    Ok(ScanState::Idle)
}

fn scan_create<W: Write>(
    line: &str,
    table: usize,
    matchers: &[TableMatcher],
    report: &mut FilterReport,
    output: &mut W,
) -> Result<ScanState> {
    if line.starts_with(')') {
        // Closing the statement here also drops the engine/charset clauses the
        // target store would reject.
        writeln!(output, ");")?;
        report.tables[table].1.create_processed = true;
        info!(
            "Processed CREATE statement for table `{}`",
            matchers[table].name
        );
        return Ok(ScanState::Idle);
    }
    // The source collation does not exist in the target store.
    writeln!(output, "{}", line.replace("utf8mb4_unicode_ci", "NOCASE"))?;
    Ok(ScanState::InCreate { table })
}

fn scan_insert<W: Write>(
    line: &str,
    table: usize,
    prefix: String,
    mut rows: Vec<String>,
    matchers: &[TableMatcher],
    output: &mut W,
) -> Result<ScanState> {
    if row_passes(&matchers[table].filter, line) {
        rows.push(line.trim_end_matches([',', ';']).to_string());
    }

    if !line.ends_with(';') {
        return Ok(ScanState::InInsert {
            table,
            prefix,
            rows,
        });
    }

    // End of the multi-row statement: emit one consolidated INSERT, one row
    // per line so the output stays re-filterable.
    if !rows.is_empty() {
        writeln!(output, "{prefix}")?;
        let last = rows.len() - 1;
        for (idx, row) in rows.iter().enumerate() {
            if idx == last {
                writeln!(output, "{row};")?;
            } else {
                writeln!(output, "{row},")?;
            }
        }
    }
    Ok(ScanState::Idle)
}

fn row_passes(filter: &TableFilter, line: &str) -> bool {
    match filter {
        TableFilter::FlagColumnEqualsOne => {
            let fields = line.trim_matches(|c| matches!(c, '(' | ')' | ',' | ';'));
            match fields.rsplit(',').next().map(|f| f.trim().parse::<i64>()) {
                Some(Ok(flag)) => flag == 1,
                // A malformed row fails the row, never the pass.
                _ => {
                    debug!("Skipping malformed row: {line}");
                    false
                }
            }
        }
        TableFilter::ContainsToken(token) => line.contains(token.as_str()),
    }
}
