/// Identity read by every view to key its fetches. Passed explicitly; views
/// refetch when it changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub organizer_id: String,
}

impl SessionContext {
    pub fn new(organizer_id: impl Into<String>) -> Option<Self> {
        let organizer_id = organizer_id.into().trim().to_string();
        if organizer_id.is_empty() {
            None
        } else {
            Some(Self { organizer_id })
        }
    }
}
