#[cfg(test)]
mod ledger_import_tests {
    use std::io::Write;
    
    use rand::rngs::StdRng;
    use tempfile::NamedTempFile;
    use rand::{Rng, SeedableRng};

    use workforce_timebank::parser::{build_ledgers, load_daily_deltas};
    use workforce_timebank::timebank::{compute_adjustment, fold_balance, DayKind, MovementOrigin, OrgTimeBankPolicy};

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn imports_csv_and_builds_ledgers() {
        let file = write_csv(
            "employee_id,date,worked_minutes,expected_minutes,festive\n\
             E1,2024-03-04,503,480,no\n\
             E1,2024-03-05,473,480,\n\
             E1,2024-03-06,462,480,no\n\
             E2,2024-03-10,240,0,yes\n\
             ,2024-03-10,240,0,yes\n",
        );
        let deltas = load_daily_deltas(file.path()).unwrap();
        assert_eq!(deltas.len(), 4);
        assert_eq!(deltas[3].day_kind, DayKind::Festive);

        let policy = OrgTimeBankPolicy {
            excess_grace_minutes: 15,
            deficit_grace_minutes: 10,
            rounding_increment_minutes: 5,
            max_positive_minutes: 4800,
            max_negative_minutes: 480,
        };
        let ledgers = build_ledgers(&deltas, &policy);

        // +23 -> +25, -7 absorbed, -18 -> -20
        let e1 = &ledgers["E1"];
        assert_eq!(e1.balance(), 5);
        assert_eq!(e1.movements().len(), 2);

        let e2 = &ledgers["E2"];
        assert_eq!(e2.movements()[0].origin, MovementOrigin::AutoFestive);
        assert_eq!(e2.balance(), 240);
    }

    #[test]
    fn bad_date_is_reported() {
        let file = write_csv("employee_id,date,worked_minutes,expected_minutes,festive\nE1,04/03/2024,480,480,no\n");
        let err = load_daily_deltas(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn out_of_range_minutes_are_reported() {
        let file = write_csv(
            "employee_id,date,worked_minutes,expected_minutes,festive\n\
             E1,2024-03-04,9223372036854775807,-1,no\n",
        );
        let err = load_daily_deltas(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2: invalid worked_minutes"));

        let file = write_csv(
            "employee_id,date,worked_minutes,expected_minutes,festive\n\
             E1,2024-03-04,480,-1,no\n",
        );
        let err = load_daily_deltas(file.path()).unwrap_err();
        assert!(err.to_string().contains("line 2: invalid expected_minutes"));
    }

    #[test]
    fn balance_never_leaves_limits() {
        let mut rng = StdRng::seed_from_u64(0x7153_b4c0);

        for _ in 0..200 {
            let policy = OrgTimeBankPolicy {
                excess_grace_minutes: rng.gen_range(0..60),
                deficit_grace_minutes: rng.gen_range(0..60),
                rounding_increment_minutes: rng.gen_range(1..=30),
                max_positive_minutes: rng.gen_range(0..6000),
                max_negative_minutes: rng.gen_range(0..1000),
            };
            let lower = policy.lower_bound();
            let upper = policy.upper_bound();

            let mut balance = rng.gen_range(lower..=upper);
            for _ in 0..50 {
                let raw = rng.gen_range(-600i64..=600);
                let adj = compute_adjustment(raw, &policy, balance);
                assert!(adj.new_balance_minutes >= lower && adj.new_balance_minutes <= upper);
                assert_eq!(balance + adj.applied_minutes, adj.new_balance_minutes);
                balance = adj.new_balance_minutes;
            }
        }
    }

    #[test]
    fn ledger_balance_matches_fold() {
        let mut rng = StdRng::seed_from_u64(42);
        let policy = OrgTimeBankPolicy::default();
        let mut ledger = workforce_timebank::timebank::Ledger::new("E1");
        let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        for offset in 0..120u64 {
            let date = start + chrono::Days::new(offset);
            ledger.record_daily(date, rng.gen_range(-120..=180), DayKind::Regular, &policy);
            assert!(ledger.balance() >= policy.lower_bound() && ledger.balance() <= policy.upper_bound());
        }
        assert_eq!(fold_balance(ledger.movements()), ledger.balance());
    }
}
