//! Traffic-signal state codes and their display names.

/// Display name for a lane signal state code. Codes outside 0-8 fall back
/// to "UNKNOWN" rather than failing the decode.
pub fn signal_state_name(code: i32) -> &'static str {
    match code {
        0 => "UNKNOWN",
        1 => "ARROW_STOP",
        2 => "ARROW_CAUTION",
        3 => "ARROW_GO",
        4 => "STOP",
        5 => "CAUTION",
        6 => "GO",
        7 => "FLASHING_STOP",
        8 => "FLASHING_CAUTION",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::signal_state_name;

    #[test]
    fn known_codes_have_names() {
        assert_eq!(signal_state_name(0), "UNKNOWN");
        assert_eq!(signal_state_name(3), "ARROW_GO");
        assert_eq!(signal_state_name(6), "GO");
        assert_eq!(signal_state_name(8), "FLASHING_CAUTION");
    }

    #[test]
    fn out_of_range_codes_fall_back_to_unknown() {
        assert_eq!(signal_state_name(9), "UNKNOWN");
        assert_eq!(signal_state_name(-1), "UNKNOWN");
        assert_eq!(signal_state_name(i32::MAX), "UNKNOWN");
    }
}
