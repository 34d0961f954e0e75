use std::fmt;

// ---------------------------------------------------------------------------
// Cell – a single comma-separated field of a fitness row
// ---------------------------------------------------------------------------

/// One parsed field.
///
/// Parsing never fails outright: a field with no leading digits becomes
/// [`Cell::Unparsable`], which renders as `NaN` and is never a multiple of
/// anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Int(i64),
    Unparsable,
}

impl Cell {
    /// Lenient numeric-prefix parse.
    ///
    /// Leading whitespace is skipped, an optional `+`/`-` sign is accepted,
    /// then decimal digits are consumed up to the first non-digit. Anything
    /// after that is ignored (`"12abc"` → 12, `"7\r"` → 7). No digits at all,
    /// or a digit run too large for `i64`, yields [`Cell::Unparsable`].
    pub fn parse_lenient(s: &str) -> Cell {
        let s = s.trim_start();
        let (negative, rest) = match s.as_bytes().first() {
            Some(b'-') => (true, &s[1..]),
            Some(b'+') => (false, &s[1..]),
            _ => (false, s),
        };

        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            return Cell::Unparsable;
        }

        let mut value: i64 = 0;
        for b in rest[..digits].bytes() {
            let d = i64::from(b - b'0');
            let next = value.checked_mul(10).and_then(|v| {
                if negative {
                    v.checked_sub(d)
                } else {
                    v.checked_add(d)
                }
            });
            match next {
                Some(v) => value = v,
                None => return Cell::Unparsable,
            }
        }
        Cell::Int(value)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(i) => Some(*i),
            Cell::Unparsable => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(i) => write!(f, "{i}"),
            Cell::Unparsable => write!(f, "NaN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Record – one line of a fitness.csv
// ---------------------------------------------------------------------------

/// A generation index followed by its fitness values.
///
/// Arity is whatever the source line had.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source file.
    pub line: usize,
    pub cells: Vec<Cell>,
}

impl Record {
    pub fn new(line: usize, cells: Vec<Cell>) -> Self {
        Record { line, cells }
    }

    /// The first field. `Unparsable` for a record with no cells.
    pub fn generation(&self) -> Cell {
        self.cells.first().copied().unwrap_or(Cell::Unparsable)
    }
}

// ---------------------------------------------------------------------------
// RecordSet – an ordered collection of records
// ---------------------------------------------------------------------------

/// Records in source order. Used both for the parse result and the filter
/// result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub records: Vec<Record>,
}

impl RecordSet {
    pub fn from_records(records: Vec<Record>) -> Self {
        RecordSet { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }
}
