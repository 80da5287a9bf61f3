use super::RecordType;

const QUOTE: char = '"';
/// Left behind when one logical value was split into several quoted
/// character-strings, e.g. `"abc" "def"`.
const SEGMENT_BOUNDARY: &str = "\" \"";

/// Reduces a record value to its unquoted payload. Values without a leading
/// quote are returned as is.
pub fn normalize_value(value: &str) -> String {
    if !value.starts_with(QUOTE) {
        return value.to_string();
    }
    value.trim_matches(QUOTE).replace(SEGMENT_BOUNDARY, "")
}

/// Only for comparison. What goes over the wire keeps its order and quoting.
pub fn normalize_set<S: AsRef<str>>(values: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = values.iter().map(|v| normalize_value(v.as_ref())).collect();
    normalized.sort();
    normalized
}

/// The remote may reorder records and may not echo the quoting it was sent.
pub fn records_equivalent<A: AsRef<str>, B: AsRef<str>>(current: &[A], desired: &[B]) -> bool {
    normalize_set(current) == normalize_set(desired)
}

/// Wraps text values in one layer of quotes unless they already have one.
///
/// Inner quotes are passed through unescaped, so `say "hi"` goes out as
/// `"say "hi""`. Values that need escaping must arrive already quoted and
/// escaped, e.g. `"say \"hi\""`, and are then sent untouched.
pub fn encode_records(kind: RecordType, values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| {
            if kind.is_text() && !value.starts_with(QUOTE) {
                format!("{QUOTE}{value}{QUOTE}")
            } else {
                value.clone()
            }
        })
        .collect()
}

#[derive(Debug)]
pub struct DiffResult<R> {
    pub create: Vec<R>,
    pub update: Vec<R>,
    pub unchanged: Vec<R>,
}

impl<R> DiffResult<R> {
    pub fn len(&self) -> usize {
        self.create.len() + self.update.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Current state of one desired entry, as found remotely.
pub struct Observed<'a> {
    pub ttl: u32,
    pub records: &'a [String],
}

/// Sorts desired entries into create, update or unchanged. `current`
/// returns the remote state for an entry or `None` when it is absent.
pub fn diff_records<R, F, E>(desired: Vec<R>, mut current: F) -> Result<DiffResult<R>, E>
where
    R: AsDesired,
    F: FnMut(&R) -> Result<Option<(u32, Vec<String>)>, E>,
{
    let mut create = Vec::with_capacity(desired.len());
    let mut update = Vec::new();
    let mut unchanged = Vec::new();

    for record in desired {
        match current(&record)? {
            None => create.push(record),
            Some((ttl, records)) => {
                let observed = Observed {
                    ttl,
                    records: &records,
                };
                if record.matches(&observed) {
                    unchanged.push(record);
                } else {
                    update.push(record);
                }
            }
        }
    }

    Ok(DiffResult {
        create,
        update,
        unchanged,
    })
}

/// Desired state that can be compared to what the remote reports.
pub trait AsDesired {
    fn ttl(&self) -> u32;
    fn records(&self) -> &[String];

    fn matches(&self, observed: &Observed<'_>) -> bool {
        self.ttl() == observed.ttl && records_equivalent(observed.records, self.records())
    }
}
