use uuid::Uuid;

/// A fresh navigation session identifier. Time-ordered, so sessions sort by start.
pub fn new_session_identifier() -> String {
    Uuid::now_v7().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_identifiers_are_unique_v7() {
        let first = new_session_identifier();
        let second = new_session_identifier();

        assert_ne!(first, second);
        assert_eq!(Uuid::parse_str(&first).unwrap().get_version_num(), 7);
    }
}
