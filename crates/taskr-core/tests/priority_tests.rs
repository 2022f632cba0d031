use taskr_core::{Priority, TaskError};

#[test]
fn test_default_priority() {
    assert_eq!(Priority::default(), Priority::Medium);
}

#[test]
fn test_rank_order() {
    assert!(Priority::High.rank() < Priority::Medium.rank());
    assert!(Priority::Medium.rank() < Priority::Low.rank());
}

#[test]
fn test_strict_parse_is_case_insensitive() {
    for text in ["high", "HIGH", "High", "hIgH"] {
        assert_eq!(text.parse::<Priority>().unwrap(), Priority::High);
    }
    assert_eq!("Low".parse::<Priority>().unwrap(), Priority::Low);
    assert_eq!("MEDIUM".parse::<Priority>().unwrap(), Priority::Medium);
}

#[test]
fn test_strict_parse_rejects_unknown() {
    for text in ["urgent", "", " high", "hi", "none"] {
        let err = text.parse::<Priority>().unwrap_err();
        assert!(matches!(err, TaskError::InvalidPriority(ref v) if v == text));
    }
}

#[test]
fn test_lenient_parse_falls_back_to_medium() {
    assert_eq!(Priority::parse_lenient("LOW"), Priority::Low);
    assert_eq!(Priority::parse_lenient("urgent"), Priority::Medium);
    assert_eq!(Priority::parse_lenient(""), Priority::Medium);
}

#[test]
fn test_display_is_lowercase() {
    let names: Vec<String> = Priority::ALL.iter().map(|p| p.to_string()).collect();
    assert_eq!(names, ["high", "medium", "low"]);
}
