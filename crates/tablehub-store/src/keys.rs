//! Key builders for all TableHub store entries.
//!
//! Keys are relative; the Redis client applies the configured prefix.

/// List holding the reservation documents of one resource on one day.
pub fn reservations(resource_id: &str, day: &str) -> String {
    format!("reservations:{resource_id}:{day}")
}

/// Hash mapping each reservation id to the list key holding it.
pub fn reservation_index() -> String {
    "reservations:index".to_string()
}

/// Set of every reservation list key in use.
pub fn reservation_lists() -> String {
    "reservations:lists".to_string()
}

/// Hash mapping each board game id to its JSON document.
pub fn games() -> String {
    "games".to_string()
}

/// Hash mapping each board game name to its id.
pub fn game_names() -> String {
    "games:names".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_key() {
        assert_eq!(
            reservations("Catan", "2025-06-01"),
            "reservations:Catan:2025-06-01"
        );
    }
}
