/// One SD-ELEMENT: an element identifier plus an ordered multimap of
/// parameters.
///
/// Parameter order is insertion order, and a name that repeats keeps
/// every value it was given (RFC 5424 allows repeated PARAM-NAMEs), so
/// re-encoding reproduces the element exactly as it was read.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StructuredElement {
    id: String,
    params: Vec<(String, Vec<String>)>,
}

impl StructuredElement {
    pub fn new(id: impl Into<String>) -> Self {
        StructuredElement {
            id: id.into(),
            params: Vec::new(),
        }
    }

    /// The SD-ID, e.g. `exampleSDID@32473`.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// True when the element carries no parameters, e.g. `[foo -]`.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Append a value. A repeated name grows that name's value list
    /// rather than overwriting it.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        match self.params.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value.into()),
            None => self.params.push((name, vec![value.into()])),
        }
    }

    /// Parameters in insertion order, each with its value list.
    pub fn params(&self) -> &[(String, Vec<String>)] {
        &self.params
    }

    /// All values recorded for `name`, in insertion order.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// The first value recorded for `name`.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name)?.first().map(String::as_str)
    }
}
