use super::SourceValue;

/// An untyped source row: column names paired with their values, in query order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawRow {
    columns: Vec<(String, SourceValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            columns: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: SourceValue) {
        self.columns.push((name.into(), value));
    }

    /// Builder-style [`RawRow::push`].
    pub fn with(mut self, name: impl Into<String>, value: SourceValue) -> Self {
        self.push(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&SourceValue> {
        self.columns
            .iter()
            .find(|(column, _)| column == name)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// The `id` column rendered as text, for log context.
    pub fn id_hint(&self) -> Option<String> {
        match self.get("id")? {
            SourceValue::Text(id) => Some(id.clone()),
            SourceValue::Integer(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

impl FromIterator<(String, SourceValue)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (String, SourceValue)>>(iter: I) -> Self {
        Self {
            columns: iter.into_iter().collect(),
        }
    }
}
