use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
/// Strings already written or read, in first-occurrence order.
///
/// Index 0 is reserved as the "new string, literal follows" marker, so
/// entries are addressed 1-based. The table lives for one marshall or
/// demarshall call.
pub(crate) struct StringTable {
    entries: Vec<String>,
    index: HashMap<String, u64>,
}

impl StringTable {
    pub(crate) fn new() -> StringTable { StringTable::default() }

    /// 1-based index of `s`, if it has been interned.
    pub(crate) fn lookup(&self, s: &str) -> Option<u64> { self.index.get(s).copied() }

    /// Appends `s`, returning its new 1-based index.
    pub(crate) fn intern(&mut self, s: &str) -> u64 {
        self.entries.push(s.to_string());
        let idx = self.entries.len() as u64;
        self.index.insert(s.to_string(), idx);
        idx
    }

    /// The entry at 1-based `idx`.
    pub(crate) fn get(&self, idx: u64) -> Option<&str> {
        if idx == 0 || idx > self.entries.len() as u64 {
            None
        } else {
            self.entries.get(idx as usize - 1).map(String::as_str)
        }
    }
}
