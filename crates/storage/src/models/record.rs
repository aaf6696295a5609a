use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::{Event, Gender, ResultKind};

/// One national-record fact: who holds it, for which event and result kind,
/// and the raw encoded result value from the rank tables.
///
/// Records are built once (from store rows or from the persisted snapshot) and
/// never mutated. The raw `result` encoding depends on the event: centiseconds
/// for timed events, a move count for FMC, and a packed 9-digit value for
/// multiblind (see [`Record::readable_result`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub person_id: String,
    pub name: String,
    pub gender: Gender,
    pub result: i64,
    pub event: Event,
    #[serde(rename = "result_type")]
    pub kind: ResultKind,
}

// Identity for diffing deliberately excludes gender: a gender-code correction
// in the export must not re-announce an existing record.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.person_id == other.person_id
            && self.name == other.name
            && self.event == other.event
            && self.kind == other.kind
            && self.result == other.result
    }
}

impl Eq for Record {}

impl Hash for Record {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.person_id.hash(state);
        self.name.hash(state);
        self.event.hash(state);
        self.kind.hash(state);
        self.result.hash(state);
    }
}

impl Record {
    /// Renders the raw result according to the event's encoding.
    pub fn readable_result(&self) -> String {
        match (self.event, self.kind) {
            // FMC single is a plain move count; the average is a move-count
            // mean stored times 100.
            (Event::ThreeFewestMoves, ResultKind::Single) => self.result.to_string(),
            (Event::ThreeFewestMoves, ResultKind::Average) => {
                format!("{:.2}", self.result as f64 / 100.0)
            }
            (Event::MultiBlind, _) => readable_multiblind(self.result),
            _ => centiseconds_to_time(self.result),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) - {} {}: {}",
            self.name,
            self.person_id,
            self.event.display_name(),
            self.kind.as_str(),
            self.readable_result()
        )
    }
}

/// Formats centiseconds as `M:SS.cc`, dropping the minute part under one
/// minute and the seconds zero-pad under ten seconds.
pub fn centiseconds_to_time(time: i64) -> String {
    let minutes = time / 6000;
    let seconds = (time % 6000) / 100;
    let centiseconds = time % 100;
    if minutes == 0 {
        format!("{seconds}.{centiseconds:02}")
    } else {
        format!("{minutes}:{seconds:02}.{centiseconds:02}")
    }
}

/// Decodes the packed multiblind value `PPTTTTTU`: `99 - PP` is the score, the
/// middle six digits carry the attempt time in seconds (with a trailing
/// divider digit), `U` is the number of unsolved cubes.
///
/// Example: `400346703` is a 62/65 in 57:47 (score 59, 3467 seconds,
/// 3 unsolved).
fn readable_multiblind(raw: i64) -> String {
    let unsolved = raw % 10;
    let seconds = (raw / 10) % 1_000_000 / 10;
    let score = 99 - raw / 10_000_000;
    let solved = score + unsolved;
    let attempted = solved + unsolved;
    format!("{}/{} - {}:{:02}", solved, attempted, seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(event: Event, kind: ResultKind, result: i64) -> Record {
        Record {
            person_id: "2010IVAN01".to_string(),
            name: "Ivan Ivanov".to_string(),
            gender: Gender::Male,
            result,
            event,
            kind,
        }
    }

    #[test]
    fn test_time_formatting() {
        assert_eq!(centiseconds_to_time(0), "0.00");
        assert_eq!(centiseconds_to_time(999), "9.99");
        assert_eq!(centiseconds_to_time(1000), "10.00");
        assert_eq!(centiseconds_to_time(6000), "1:00.00");
        assert_eq!(centiseconds_to_time(7234), "1:12.34");
    }

    #[test]
    fn test_timed_event_result() {
        let rec = record(Event::ThreeByThree, ResultKind::Single, 456);
        assert_eq!(rec.readable_result(), "4.56");
    }

    #[test]
    fn test_fmc_single_is_a_move_count() {
        let rec = record(Event::ThreeFewestMoves, ResultKind::Single, 21);
        assert_eq!(rec.readable_result(), "21");
    }

    #[test]
    fn test_fmc_average_is_a_scaled_mean() {
        let rec = record(Event::ThreeFewestMoves, ResultKind::Average, 2433);
        assert_eq!(rec.readable_result(), "24.33");
    }

    #[test]
    fn test_multiblind_decoding() {
        let rec = record(Event::MultiBlind, ResultKind::Single, 400346703);
        assert_eq!(rec.readable_result(), "62/65 - 57:47");
    }

    #[test]
    fn test_identity_ignores_gender() {
        let a = record(Event::ThreeByThree, ResultKind::Single, 456);
        let mut b = a.clone();
        b.gender = Gender::Female;
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_covers_result_and_kind() {
        let a = record(Event::ThreeByThree, ResultKind::Single, 456);
        let mut faster = a.clone();
        faster.result = 455;
        assert_ne!(a, faster);

        let mut average = a.clone();
        average.kind = ResultKind::Average;
        assert_ne!(a, average);
    }

    #[test]
    fn test_snapshot_field_names() {
        let rec = record(Event::SquareOne, ResultKind::Average, 1234);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["event"], "sq1");
        assert_eq!(json["result_type"], "AVERAGE");
        assert_eq!(json["gender"], "MALE");
        assert_eq!(json["result"], 1234);
    }
}
