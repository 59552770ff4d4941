//! Contact plans in the JSON file format.

/// Two ground stations relaying through a satellite, plus a slow direct
/// contact. Node ids are numeric; contact ids mix numbers and names.
pub const GROUND_RELAY: &str = r#"{
    "contacts": [
        {"contact": 1, "source": 10, "dest": 20, "startTime": 0, "endTime": 60, "rate": 100, "owlt": 2},
        {"contact": 2, "source": 20, "dest": 30, "startTime": 30, "endTime": 90, "rate": 100, "owlt": 2},
        {"contact": "direct", "source": 10, "dest": 30, "startTime": 100, "endTime": 200, "rate": 10, "owlt": 1},
        {"contact": 4, "source": 30, "dest": 20, "startTime": 0, "endTime": 300, "rate": 100, "owlt": 2}
    ]
}"#;

/// A plan whose only contact towards the destination has no capacity.
pub const ZERO_RATE: &str = r#"{
    "contacts": [
        {"contact": 1, "source": "a", "dest": "b", "startTime": 0, "endTime": 10, "rate": 1, "owlt": 1},
        {"contact": 2, "source": "b", "dest": "c", "startTime": 0, "endTime": 10, "rate": 0, "owlt": 1}
    ]
}"#;

/// Missing `owlt` on the second record.
pub const MALFORMED: &str = r#"{
    "contacts": [
        {"contact": 1, "source": "a", "dest": "b", "startTime": 0, "endTime": 10, "rate": 1, "owlt": 1},
        {"contact": 2, "source": "b", "dest": "c", "startTime": 0, "endTime": 10, "rate": 1}
    ]
}"#;
