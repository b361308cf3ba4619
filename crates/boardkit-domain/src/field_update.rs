use serde_json::Value;

/// Three-state update for an optional field
///
/// - `NoChange`: keep the current value
/// - `Set(value)`: replace it
/// - `Clear`: reset it to `None`
///
/// # Example
///
/// ```
/// use boardkit_domain::FieldUpdate;
///
/// let mut color = Some("#ffcc00".to_string());
/// FieldUpdate::Set("#00ccff".to_string()).apply_to(&mut color);
/// assert_eq!(color.as_deref(), Some("#00ccff"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut color);
/// assert_eq!(color, None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some` sets, `None` clears.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

impl FieldUpdate<Value> {
    /// Read a JSON patch entry: absent key keeps, `null` clears.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            None => FieldUpdate::NoChange,
            Some(Value::Null) => FieldUpdate::Clear,
            Some(v) => FieldUpdate::Set(v.clone()),
        }
    }
}
