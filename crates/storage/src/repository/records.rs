use std::path::Path;

use rusqlite::Connection;

use crate::error::Result;

/// Row shape shared by the two ranking queries.
#[derive(Debug, Clone)]
pub struct RankedRow {
    pub person_id: String,
    pub name: String,
    pub gender: Option<String>,
    pub event_id: String,
    pub best: i64,
}

/// Disposable SQLite store for one run: loaded from the filtered dump, queried
/// for the two ranking joins, then dropped.
pub struct RecordStore {
    conn: Connection,
}

impl RecordStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Executes the filtered dump inside a single transaction; nothing is
    /// committed if any statement fails.
    pub fn load_dump(&mut self, sql: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(sql)?;
        tx.commit()?;
        Ok(())
    }

    pub fn load_dump_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let sql = std::fs::read_to_string(path)?;
        self.load_dump(&sql)
    }

    /// Best single result per person and event, joined with person identity,
    /// best-first within each event.
    pub fn best_singles(&self) -> Result<Vec<RankedRow>> {
        self.fetch_ranked("RanksSingle")
    }

    /// Best average result per person and event, joined with person identity,
    /// best-first within each event.
    pub fn best_averages(&self) -> Result<Vec<RankedRow>> {
        self.fetch_ranked("RanksAverage")
    }

    fn fetch_ranked(&self, table: &str) -> Result<Vec<RankedRow>> {
        let sql = format!(
            "SELECT p.id, p.name, p.gender, r.eventId, r.best \
             FROM {table} AS r \
             INNER JOIN Persons AS p ON r.personId = p.id \
             ORDER BY r.eventId, r.best ASC"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], |row| {
            Ok(RankedRow {
                person_id: row.get(0)?,
                name: row.get(1)?,
                gender: row.get(2)?,
                event_id: row.get(3)?,
                best: row.get(4)?,
            })
        })?;

        let mut out = Vec::new();
        for row in rows {
            out.push(row?);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_DUMP: &str = "\
        DROP TABLE IF EXISTS `Persons`;\n\
        DROP TABLE IF EXISTS `RanksSingle`;\n\
        DROP TABLE IF EXISTS `RanksAverage`;\n\
        CREATE TABLE `Persons` (\n\
        `id` varchar(10) NOT NULL,\n\
        `subid` int NOT NULL,\n\
        `name` varchar(80) COLLATE NOCASE,\n\
        `countryId` varchar(50) NOT NULL,\n\
        `gender` varchar(1)\n\
        );\n\
        CREATE TABLE `RanksSingle` (\n\
        `personId` varchar(10) NOT NULL,\n\
        `eventId` varchar(6) NOT NULL,\n\
        `best` int NOT NULL,\n\
        `worldRank` int NOT NULL,\n\
        `continentRank` int NOT NULL,\n\
        `countryRank` int NOT NULL\n\
        );\n\
        CREATE TABLE `RanksAverage` (\n\
        `personId` varchar(10) NOT NULL,\n\
        `eventId` varchar(6) NOT NULL,\n\
        `best` int NOT NULL,\n\
        `worldRank` int NOT NULL,\n\
        `continentRank` int NOT NULL,\n\
        `countryRank` int NOT NULL\n\
        );\n\
        INSERT INTO `Persons` VALUES\n\
        ('2010IVAN01',1,'Ivan Ivanov','Bulgaria','m'),\n\
        ('2012PETR01',1,'Petra Petrova','Bulgaria','f');\n\
        INSERT INTO `RanksSingle` VALUES\n\
        ('2010IVAN01','333',650,900,400,1),\n\
        ('2012PETR01','222',210,800,350,1);\n\
        INSERT INTO `RanksAverage` VALUES\n\
        ('2010IVAN01','333',820,950,420,1);\n";

    #[test]
    fn test_load_and_query_in_memory() {
        let mut store = RecordStore::open_in_memory().unwrap();
        store.load_dump(SAMPLE_DUMP).unwrap();

        let singles = store.best_singles().unwrap();
        assert_eq!(singles.len(), 2);
        // Ordered by eventId: 222 before 333.
        assert_eq!(singles[0].event_id, "222");
        assert_eq!(singles[0].person_id, "2012PETR01");
        assert_eq!(singles[1].event_id, "333");
        assert_eq!(singles[1].best, 650);

        let averages = store.best_averages().unwrap();
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].best, 820);
        assert_eq!(averages[0].gender.as_deref(), Some("m"));
    }

    #[test]
    fn test_best_first_within_event() {
        let mut store = RecordStore::open_in_memory().unwrap();
        store.load_dump(SAMPLE_DUMP).unwrap();
        store
            .load_dump("INSERT INTO `RanksSingle` VALUES ('2012PETR01','333',600,700,300,1);")
            .unwrap();

        let singles = store.best_singles().unwrap();
        let threes: Vec<_> = singles.iter().filter(|r| r.event_id == "333").collect();
        assert_eq!(threes[0].best, 600);
        assert_eq!(threes[1].best, 650);
    }

    #[test]
    fn test_file_backed_store_loads_dump_file_and_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("records.db");
        let dump = dir.path().join("filtered.sql");
        std::fs::write(&dump, SAMPLE_DUMP).unwrap();

        {
            let mut store = RecordStore::open(&db).unwrap();
            store.load_dump_file(&dump).unwrap();
        }

        // The committed load is visible through a fresh connection.
        let store = RecordStore::open(&db).unwrap();
        let singles = store.best_singles().unwrap();
        assert_eq!(singles.len(), 2);
        assert_eq!(store.best_averages().unwrap().len(), 1);
    }

    #[test]
    fn test_failed_load_commits_nothing() {
        let mut store = RecordStore::open_in_memory().unwrap();
        assert!(
            store
                .load_dump("CREATE TABLE `Persons` (`id` varchar(10)); NOT SQL;")
                .is_err()
        );
        // The CREATE from the failed batch must not have been committed.
        assert!(store.best_singles().is_err());
    }

    #[test]
    fn test_query_against_missing_tables_is_fatal() {
        let store = RecordStore::open_in_memory().unwrap();
        assert!(store.best_singles().is_err());
    }
}
