use super::*;

fn every_kind() -> Vec<BetKind> {
    let mut kinds = vec![
        BetKind::PassLine,
        BetKind::DontPass,
        BetKind::Come,
        BetKind::DontCome,
        BetKind::Field,
        BetKind::AnySeven,
        BetKind::AnyCraps,
    ];
    for point in Point::all() {
        kinds.push(BetKind::ComePoint(point));
        kinds.push(BetKind::DontComePoint(point));
        kinds.push(BetKind::Place(point));
        kinds.push(BetKind::Buy(point));
        kinds.push(BetKind::Lay(point));
    }
    for number in HARD_WAY_NUMBERS {
        kinds.push(BetKind::HardWay(Point::new(number).unwrap()));
    }
    for number in SINGLE_NUMBERS {
        kinds.push(BetKind::SingleNumber(number));
    }
    kinds
}

#[test]
fn test_point_validation() {
    for number in 0..=13u8 {
        let expected = POINT_NUMBERS.contains(&number);
        assert_eq!(Point::new(number).is_ok(), expected, "number {number}");
    }
    assert_eq!(Point::try_from(7), Err(InvalidPoint(7)));
    assert_eq!(Point::all().count(), 6);
}

#[test]
fn test_bet_kind_area_ids() {
    for kind in every_kind() {
        let id = kind.to_string();
        let parsed: BetKind = id.parse().unwrap();
        assert_eq!(parsed, kind, "area id {id}");
    }
}

#[test]
fn test_bet_kind_parse_errors() {
    assert_eq!(
        "big-red".parse::<BetKind>(),
        Err(ParseBetKindError::Unknown("big-red".to_string()))
    );
    assert!(matches!(
        "place-7".parse::<BetKind>(),
        Err(ParseBetKindError::InvalidNumber { .. })
    ));
    assert!(matches!(
        "hard-5".parse::<BetKind>(),
        Err(ParseBetKindError::Invalid(InvalidBetKind(BetKind::HardWay(_))))
    ));
    assert!(matches!(
        "roll-7".parse::<BetKind>(),
        Err(ParseBetKindError::Invalid(_))
    ));
    assert!("roll-x".parse::<BetKind>().is_err());
}

#[test]
fn test_bet_kind_validate() {
    assert!(BetKind::HardWay(Point::NINE).validate().is_err());
    assert!(BetKind::HardWay(Point::TEN).validate().is_ok());
    assert!(BetKind::SingleNumber(4).validate().is_err());
    assert!(BetKind::SingleNumber(11).validate().is_ok());
    for kind in every_kind() {
        assert!(kind.validate().is_ok(), "{kind}");
    }
}

#[test]
fn test_rule_groups() {
    assert_eq!(BetKind::PassLine.group(), RuleGroup::Line);
    assert_eq!(BetKind::Buy(Point::SIX).group(), RuleGroup::PlaceBuy);
    assert_eq!(BetKind::Lay(Point::SIX).group(), RuleGroup::Lay);
    assert_eq!(BetKind::DontCome.group(), RuleGroup::ComeBase);
    assert_eq!(BetKind::ComePoint(Point::FIVE).group(), RuleGroup::ComePoint);
    assert_eq!(BetKind::SingleNumber(12).group(), RuleGroup::OneRoll);
    assert_eq!(BetKind::HardWay(Point::FOUR).group(), RuleGroup::HardWay);

    assert!(BetKind::Place(Point::FOUR).needs_point());
    assert!(BetKind::Lay(Point::FOUR).needs_point());
    assert!(!BetKind::HardWay(Point::FOUR).needs_point());
    assert!(BetKind::Field.is_one_roll());
    assert!(!BetKind::HardWay(Point::FOUR).is_one_roll());
}

#[test]
fn test_roll_validation() {
    assert!(Roll::new(1, 6).is_ok());
    assert_eq!(Roll::new(0, 3), Err(InvalidRoll { die1: 0, die2: 3 }));
    assert!(Roll::new(3, 7).is_err());

    let roll = Roll::new(3, 3).unwrap();
    assert_eq!(roll.total(), 6);
    assert!(roll.is_hard());
    assert!(!Roll::new(2, 4).unwrap().is_hard());
}

#[test]
fn test_all_rolls_match_ways() {
    let mut counts = [0u8; 13];
    for roll in Roll::all() {
        counts[roll.total() as usize] += 1;
    }
    assert_eq!(counts, WAYS);
    assert_eq!(WAYS.iter().map(|w| *w as u32).sum::<u32>(), 36);
}

#[test]
fn test_table_phase_point() {
    assert_eq!(TablePhase::default(), TablePhase::ComingOut);
    assert_eq!(TablePhase::ComingOut.point(), None);
    assert_eq!(
        TablePhase::PointEstablished(Point::EIGHT).point(),
        Some(Point::EIGHT)
    );
}

#[test]
fn test_max_bet_payouts_fit_in_credits() {
    let largest = (MAX_BET_AMOUNT as i128)
        * (MAX_PAYOUT_TO_ONE as i128 + 1)
        * (SCALE as i128)
        * every_kind().len() as i128;
    assert!(largest <= i64::MAX as i128);
    assert_eq!(
        Credits::from_units(MAX_BET_AMOUNT * (MAX_PAYOUT_TO_ONE + 1)).raw() as i128,
        (MAX_BET_AMOUNT as i128) * (MAX_PAYOUT_TO_ONE as i128 + 1) * (SCALE as i128)
    );
}

#[test]
fn test_resolution_returned() {
    let win = BetResolution {
        handle: BetHandle(1),
        kind: BetKind::Buy(Point::SIX),
        amount: 30,
        disposition: Disposition::Win(Credits::from_raw(345_000)),
        successor: None,
    };
    assert_eq!(win.returned(), Credits::from_raw(645_000));

    let moved = BetResolution {
        handle: BetHandle(2),
        kind: BetKind::Come,
        amount: 10,
        disposition: Disposition::Move(BetKind::ComePoint(Point::FIVE)),
        successor: Some(BetHandle(3)),
    };
    assert_eq!(moved.returned(), Credits::ZERO);
    assert!(moved.disposition.removes_bet());
    assert!(!Disposition::Push.removes_bet());
}

#[test]
fn test_report_serialization() {
    let report = ResolutionReport {
        roll_id: 7,
        roll: Roll::new(3, 4).unwrap(),
        outcome: RollOutcome::Natural,
        resolutions: vec![BetResolution {
            handle: BetHandle(1),
            kind: BetKind::PassLine,
            amount: 10,
            disposition: Disposition::Win(Credits::from_units(10)),
            successor: None,
        }],
        phase_before: TablePhase::ComingOut,
        phase_after: TablePhase::ComingOut,
    };
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["outcome"]["type"], "natural");
    assert_eq!(json["resolutions"][0]["kind"], "pass-line");
    assert_eq!(json["resolutions"][0]["disposition"]["type"], "win");
    assert_eq!(json["resolutions"][0]["disposition"]["value"], 10.0);
    assert!(json["resolutions"][0].get("successor").is_none());
    assert_eq!(report.total_returned(), Credits::from_units(20));
}
