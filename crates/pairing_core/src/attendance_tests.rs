use super::*;

#[test]
fn test_lenient_parse() {
    assert_eq!(AttendanceStatus::parse_lenient("Late"), AttendanceStatus::Late);
    assert_eq!(AttendanceStatus::parse_lenient(" absent"), AttendanceStatus::Absent);
    assert_eq!(AttendanceStatus::parse_lenient("unknown"), AttendanceStatus::Present);
    assert_eq!(AttendanceStatus::parse_lenient(""), AttendanceStatus::Present);
}

#[test]
fn test_eligible_players_filters_inactive_and_absent() {
    let mut retired = Player::new(3, "Cy");
    retired.active = false;
    let players = vec![
        Player::new(1, "Ann"),
        Player::new(2, "Bo"),
        retired,
        Player::new(4, "Di"),
        Player::new(5, "Ed"),
    ];
    let statuses = HashMap::from([
        (PlayerId(2), AttendanceStatus::Absent),
        (PlayerId(4), AttendanceStatus::Late),
        (PlayerId(5), AttendanceStatus::Excused),
    ]);

    let ids: Vec<_> = eligible_players(&players, &statuses)
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![PlayerId(1), PlayerId(4)]);
}

#[test]
fn test_status_counts() {
    let records = [
        AttendanceRecord {
            round_id: RoundId(1),
            player_id: PlayerId(1),
            status: AttendanceStatus::Present,
        },
        AttendanceRecord {
            round_id: RoundId(1),
            player_id: PlayerId(2),
            status: AttendanceStatus::Present,
        },
        AttendanceRecord {
            round_id: RoundId(1),
            player_id: PlayerId(3),
            status: AttendanceStatus::Late,
        },
    ];
    let counts = status_counts(&records);
    assert_eq!(counts.get(&AttendanceStatus::Present), Some(&2));
    assert_eq!(counts.get(&AttendanceStatus::Late), Some(&1));
    assert_eq!(counts.get(&AttendanceStatus::Absent), None);
}
